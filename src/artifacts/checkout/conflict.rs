use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::Tree;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::BitletError;
use derive_new::new;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// What an operation is about to write at a path
#[derive(Debug, Clone, Copy)]
pub enum IncomingContent<'t> {
    /// The content of a stored blob
    Blob(&'t ObjectId),
    /// Content assembled during the operation, such as a file with conflict markers
    Generated,
}

/// Detects working-directory files that are not tracked by HEAD but would be overwritten
#[derive(new)]
pub struct UntrackedOverwriteCheck<'r> {
    workspace: &'r Workspace,
    /// The tree of the HEAD commit
    head_tree: &'r Tree,
}

impl<'r> UntrackedOverwriteCheck<'r> {
    /// Collect every untracked file in the way of `incoming`
    ///
    /// An untracked file already holding exactly the incoming blob is not in the way. Untracked
    /// files inside a directory standing at an incoming path are, and so is an untracked file
    /// standing where an incoming path needs a directory.
    pub fn find_collisions<'t>(
        &self,
        incoming: impl IntoIterator<Item = (&'t Path, IncomingContent<'t>)>,
    ) -> anyhow::Result<Vec<PathBuf>> {
        let mut collisions = BTreeSet::new();

        for (path, content) in incoming {
            collisions.extend(
                path.ancestors()
                    .skip(1)
                    .filter(|ancestor| !ancestor.as_os_str().is_empty())
                    .filter(|ancestor| self.is_untracked_file(ancestor))
                    .map(Path::to_path_buf),
            );

            if self.workspace.is_dir(path) {
                collisions.extend(
                    self.workspace
                        .list_files_in(path)?
                        .into_iter()
                        .filter(|file| !self.head_tree.contains_key(file)),
                );
                continue;
            }

            if !self.is_untracked_file(path) {
                continue;
            }

            let in_the_way = match content {
                IncomingContent::Blob(oid) => &self.workspace.parse_blob(path)?.object_id()? != oid,
                IncomingContent::Generated => true,
            };

            if in_the_way {
                collisions.insert(path.to_path_buf());
            }
        }

        Ok(collisions.into_iter().collect())
    }

    fn is_untracked_file(&self, path: &Path) -> bool {
        !self.head_tree.contains_key(path) && self.workspace.is_file(path)
    }

    /// Fail with `UntrackedFileWouldBeOverwritten` if anything is in the way of `incoming`
    pub fn ensure_no_collisions<'t>(
        &self,
        incoming: impl IntoIterator<Item = (&'t Path, IncomingContent<'t>)>,
    ) -> anyhow::Result<()> {
        let collisions = self.find_collisions(incoming)?;

        if collisions.is_empty() {
            Ok(())
        } else {
            Err(BitletError::UntrackedFileWouldBeOverwritten(
                collisions
                    .iter()
                    .map(|path| path.display().to_string())
                    .collect(),
            )
            .into())
        }
    }
}
