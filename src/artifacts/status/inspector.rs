use crate::areas::workspace::Workspace;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use derive_new::new;
use std::path::Path;

#[derive(new)]
pub struct Inspector<'r> {
    workspace: &'r Workspace,
}

impl<'r> Inspector<'r> {
    /// Id the working-directory file would get as a blob, `None` if there is no such file
    pub fn workspace_blob_id(&self, path: &Path) -> anyhow::Result<Option<ObjectId>> {
        if !self.workspace.is_file(path) {
            return Ok(None);
        }

        Ok(Some(self.workspace.parse_blob(path)?.object_id()?))
    }

    /// Compare the working-directory file against the blob the next commit would record
    pub fn check_workspace_against(
        &self,
        path: &Path,
        expected: &ObjectId,
    ) -> anyhow::Result<Option<WorkspaceChangeType>> {
        match self.workspace_blob_id(path)? {
            None => Ok(Some(WorkspaceChangeType::Deleted)),
            Some(oid) if &oid != expected => Ok(Some(WorkspaceChangeType::Modified)),
            Some(_) => Ok(None),
        }
    }
}
