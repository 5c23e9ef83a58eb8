use crate::areas::commit_graph::CommitGraph;
use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::{Commit, Tree};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::status_info::Status;
use crate::errors::BitletError;
use std::cell::{RefCell, RefMut};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Name of the metadata directory at the root of the working directory
pub const BITLET_DIR: &str = ".bitlet";
pub const BLOBS_DIR: &str = "blobs";
pub const COMMITS_DIR: &str = "commits";
pub const INDEX_FILE: &str = "index";

/// Everything a command works on
///
/// Each command borrows the repository, loads the staging area, applies its change and
/// persists what it touched before returning.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: Arc<Mutex<Index>>,
    database: Database,
    commit_graph: CommitGraph,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path);

        if !path.exists() {
            std::fs::create_dir_all(path)?;
        }

        let path = path.canonicalize()?;
        let bitlet_path = path.join(BITLET_DIR);

        let index = Index::new(bitlet_path.join(INDEX_FILE).into_boxed_path());
        let database = Database::new(bitlet_path.join(BLOBS_DIR).into_boxed_path());
        let commit_graph = CommitGraph::new(bitlet_path.join(COMMITS_DIR).into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(bitlet_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: Arc::new(Mutex::new(index)),
            database,
            commit_graph,
            workspace,
            refs,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bitlet_path(&self) -> Box<Path> {
        self.path.join(BITLET_DIR).into_boxed_path()
    }

    pub fn is_initialized(&self) -> bool {
        self.bitlet_path().is_dir()
    }

    pub fn ensure_initialized(&self) -> anyhow::Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(BitletError::NotInitialized.into())
        }
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> Arc<Mutex<Index>> {
        self.index.clone()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn commit_graph(&self) -> &CommitGraph {
        &self.commit_graph
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn inspect_status(&'_ self) -> Status<'_> {
        Status::new(self)
    }

    pub fn head_commit(&self) -> anyhow::Result<(ObjectId, Commit)> {
        let head = self.refs.read_head()?;
        let commit = self.commit_graph.get(&head)?;

        Ok((head, commit))
    }

    pub fn head_tree(&self) -> anyhow::Result<Tree> {
        Ok(self.head_commit()?.1.tree().clone())
    }
}
