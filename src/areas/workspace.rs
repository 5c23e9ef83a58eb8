use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::blob::Blob;
use crate::errors::BitletError;
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 3] = [".bitlet", ".", ".."];

/// The working directory: the files the user edits, outside of `.bitlet`
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Normalize a user-supplied path into a repository-relative one
    ///
    /// `./a/../b.txt` becomes `b.txt`. Absolute paths inside the repository are accepted too.
    /// Paths that climb above the repository root or reach into `.bitlet` are rejected.
    pub fn relative_path(&self, path: &str) -> anyhow::Result<PathBuf> {
        let outside = || BitletError::FileNotFound(path.to_string());
        let user_path = Path::new(path);
        let user_path = user_path
            .strip_prefix(self.path.as_ref())
            .unwrap_or(user_path);

        let mut normalized = PathBuf::new();
        for component in user_path.components() {
            match component {
                Component::Normal(name) if Self::is_ignored(Path::new(name)) => {
                    return Err(outside().into());
                }
                Component::Normal(name) => normalized.push(name),
                Component::ParentDir => {
                    if !normalized.pop() {
                        return Err(outside().into());
                    }
                }
                Component::CurDir => {}
                Component::RootDir | Component::Prefix(_) => return Err(outside().into()),
            }
        }

        Ok(normalized)
    }

    pub fn parse_blob(&self, path: &Path) -> anyhow::Result<Blob> {
        Ok(Blob::new(self.read_file(path)?))
    }

    /// Every file in the working directory, sorted by path
    pub fn list_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        self.list_files_in(Path::new(""))
    }

    /// Every file below `dir_path`, as repository-relative paths sorted by path
    pub fn list_files_in(&self, dir_path: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let mut files = WalkDir::new(self.path.join(dir_path))
            .into_iter()
            .filter_entry(|entry| !Self::is_ignored(entry.path()))
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                entry
                    .path()
                    .strip_prefix(self.path.as_ref())
                    .ok()
                    .map(PathBuf::from)
            })
            .collect::<Vec<_>>();
        files.sort();

        Ok(files)
    }

    fn is_ignored(path: &Path) -> bool {
        path.file_name()
            .map(|name| IGNORED_PATHS.contains(&name.to_string_lossy().as_ref()))
            .unwrap_or_default()
    }

    pub fn is_file(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_file()
    }

    pub fn is_dir(&self, dir_path: &Path) -> bool {
        self.path.join(dir_path).is_dir()
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let full_path = self.path.join(file_path);

        let content = std::fs::read(&full_path)
            .with_context(|| format!("Failed to read file: {:?}", file_path))?;

        Ok(content.into())
    }

    /// Overwrite `file_path` with `data`, replacing whatever is in the way
    pub fn write_file(&self, file_path: &Path, data: &[u8]) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if full_path.is_dir() {
            std::fs::remove_dir_all(&full_path).with_context(|| {
                format!("Failed to remove existing directory: {:?}", file_path)
            })?;
        }

        if let Some(parent) = file_path.parent() {
            self.make_directory(parent)?;
        }

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&full_path)
            .with_context(|| format!("Failed to open file: {:?}", file_path))?;

        file.write_all(data)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))?;

        Ok(())
    }

    /// Delete `file_path` if present, then remove parent directories left empty
    pub fn remove_file(&self, file_path: &Path) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if full_path.is_file() {
            std::fs::remove_file(&full_path)
                .with_context(|| format!("Failed to remove file: {:?}", file_path))?;
        }

        self.prune_empty_parent_dirs(file_path)
    }

    fn prune_empty_parent_dirs(&self, file_path: &Path) -> anyhow::Result<()> {
        for ancestor in file_path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }

            let dir_path = self.path.join(ancestor);
            if !dir_path.is_dir() || dir_path.read_dir()?.next().is_some() {
                break;
            }

            std::fs::remove_dir(&dir_path)
                .with_context(|| format!("Failed to remove directory: {:?}", ancestor))?;
        }

        Ok(())
    }

    fn make_directory(&self, dir_path: &Path) -> anyhow::Result<()> {
        // a file where a directory should be is replaced
        for ancestor in dir_path.ancestors().collect::<Vec<_>>().into_iter().rev() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }

            let full_path = self.path.join(ancestor);
            if full_path.is_file() {
                std::fs::remove_file(&full_path)
                    .with_context(|| format!("Failed to remove file: {:?}", ancestor))?;
            }
        }

        std::fs::create_dir_all(self.path.join(dir_path))
            .with_context(|| format!("Failed to create directory: {:?}", dir_path))?;

        Ok(())
    }

    // Deletions go first so that a file replaced by a directory (or the other way around)
    // never collides with the new entry.
    pub fn apply_migration(&self, migration: &Migration) -> anyhow::Result<()> {
        for file_path in migration.deletions() {
            self.remove_file(file_path)?;
        }

        for (file_path, oid) in migration.writes() {
            let data = migration.load_blob_data(oid)?;
            self.write_file(file_path, &data)?;
        }

        Ok(())
    }
}
