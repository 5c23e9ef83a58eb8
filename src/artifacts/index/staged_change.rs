use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::objects::object::Packable;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::{Context, anyhow};
use bytes::Bytes;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

const ADDITION_TAG: u8 = b'A';
const REMOVAL_TAG: u8 = b'R';

/// One record of the staging file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagedChange {
    /// `path` will hold blob `oid` in the next commit
    Addition { path: PathBuf, oid: ObjectId },
    /// `path` will be dropped from the next commit
    Removal { path: PathBuf },
}

impl StagedChange {
    pub fn path(&self) -> &Path {
        match self {
            StagedChange::Addition { path, .. } | StagedChange::Removal { path } => path,
        }
    }

    pub(crate) fn read_from(reader: &mut Checksum) -> anyhow::Result<Self> {
        let tag = reader.read(1)?;

        match tag[0] {
            ADDITION_TAG => {
                let oid_bytes = reader.read(20)?;
                let oid = ObjectId::read_h40_from(&mut Cursor::new(oid_bytes))?;
                let path = Self::read_path(reader)?;

                Ok(StagedChange::Addition { path, oid })
            }
            REMOVAL_TAG => Ok(StagedChange::Removal {
                path: Self::read_path(reader)?,
            }),
            other => Err(anyhow!("Invalid staged change tag {other:#04x}")),
        }
    }

    fn read_path(reader: &mut Checksum) -> anyhow::Result<PathBuf> {
        let path = reader.read_until_nul()?;
        let path = String::from_utf8(path.to_vec()).context("Invalid path in index record")?;

        Ok(PathBuf::from(path))
    }
}

impl Packable for StagedChange {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut bytes = Vec::new();

        match self {
            StagedChange::Addition { oid, .. } => {
                bytes.write_all(&[ADDITION_TAG])?;
                oid.write_h40_to(&mut bytes)?;
            }
            StagedChange::Removal { .. } => bytes.write_all(&[REMOVAL_TAG])?,
        }

        let path = self
            .path()
            .to_str()
            .with_context(|| format!("Path {} is not valid UTF-8", self.path().display()))?;
        bytes.write_all(path.as_bytes())?;
        bytes.write_all(&[0])?;

        Ok(Bytes::from(bytes))
    }
}
