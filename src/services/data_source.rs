use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::record::Record;
use crate::domain::snapshot::EstimationSnapshot;
use crate::services::estimation_api::HttpSnapshotProvider;
use crate::services::snapshot_yaml::{SnapshotYamlError, load_snapshot_from_yaml_file};

#[derive(Error, Debug)]
pub enum DataSourceError {
    #[error("resource not found")]
    NotFound,
    #[error("connection error")]
    Connection,
    #[error("parse error")]
    Parse,
    #[error("unauthorized")]
    Unauthorized,
    #[error("{0}")]
    Other(String),
}

/// Describes an interface for retrieving the estimation data of one record.
pub trait EstimationDataProvider {
    async fn fetch_snapshot(&self, record: &Record) -> Result<EstimationSnapshot, DataSourceError>;
}

/// Reads `<dir>/<record id>.yaml`.
#[derive(Debug, Clone)]
pub struct YamlSnapshotProvider {
    dir: PathBuf,
}

impl YamlSnapshotProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Rejects ids that would resolve outside the snapshot directory.
    pub fn snapshot_path(&self, record: &Record) -> Result<PathBuf, DataSourceError> {
        let id = record.id().id.as_str();
        if id.is_empty() || id.contains(['/', '\\']) || id.starts_with('.') {
            return Err(DataSourceError::Other(format!("invalid record id: {id:?}")));
        }
        Ok(self.dir.join(format!("{id}.yaml")))
    }
}

impl EstimationDataProvider for YamlSnapshotProvider {
    async fn fetch_snapshot(&self, record: &Record) -> Result<EstimationSnapshot, DataSourceError> {
        let path = self.snapshot_path(record)?;
        let path = path
            .to_str()
            .ok_or_else(|| DataSourceError::Other(format!("invalid snapshot path: {path:?}")))?;
        load_snapshot_from_yaml_file(path).await.map_err(|err| match err {
            SnapshotYamlError::Read(source) if source.kind() == io::ErrorKind::NotFound => {
                DataSourceError::NotFound
            }
            SnapshotYamlError::Read(source) if source.kind() == io::ErrorKind::PermissionDenied => {
                DataSourceError::Unauthorized
            }
            SnapshotYamlError::Read(source) => {
                DataSourceError::Other(format!("failed to read snapshot: {source}"))
            }
            SnapshotYamlError::Parse(_) | SnapshotYamlError::InvalidTimestamp(_) => {
                DataSourceError::Parse
            }
        })
    }
}

/// The provider picked from config and command line.
pub enum SnapshotSource {
    Files(YamlSnapshotProvider),
    Http(HttpSnapshotProvider),
}

impl EstimationDataProvider for SnapshotSource {
    async fn fetch_snapshot(&self, record: &Record) -> Result<EstimationSnapshot, DataSourceError> {
        match self {
            SnapshotSource::Files(provider) => provider.fetch_snapshot(record).await,
            SnapshotSource::Http(provider) => provider.fetch_snapshot(record).await,
        }
    }
}
