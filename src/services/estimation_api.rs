use std::env;

use reqwest::{Client, StatusCode};

use crate::domain::record::Record;
use crate::domain::snapshot::EstimationSnapshot;
use crate::services::data_source::{DataSourceError, EstimationDataProvider};
use crate::services::snapshot_yaml::{SnapshotRecord, snapshot_from_record};

#[derive(Debug, Clone)]
pub struct AuthData {
    pub username: String,
    pub api_token: String,
}

impl AuthData {
    pub fn from_env() -> Result<Self, DataSourceError> {
        let username = env::var("ESTIMATION_API_USERNAME").ok();
        let api_token = env::var("ESTIMATION_API_TOKEN").ok();
        match (username, api_token) {
            (Some(username), Some(api_token)) => Ok(Self {
                username,
                api_token,
            }),
            _ => Err(DataSourceError::Unauthorized),
        }
    }
}

/// Fetches snapshots as JSON from `{base_url}/{collection}/{id}/estimation`.
pub struct HttpSnapshotProvider {
    base_url: String,
    auth: Option<AuthData>,
    client: Client,
}

impl HttpSnapshotProvider {
    pub fn new(base_url: &str, auth: Option<AuthData>) -> Result<Self, DataSourceError> {
        let base_url = base_url.trim_end_matches('/');
        if base_url.is_empty() {
            return Err(DataSourceError::Other(
                "estimation api base_url is empty".to_string(),
            ));
        }

        Ok(Self {
            base_url: base_url.to_string(),
            auth,
            client: Client::new(),
        })
    }

    pub fn snapshot_url(&self, record: &Record) -> String {
        format!(
            "{}/{}/{}/estimation",
            self.base_url,
            record.collection_name(),
            record.id()
        )
    }
}

impl EstimationDataProvider for HttpSnapshotProvider {
    async fn fetch_snapshot(&self, record: &Record) -> Result<EstimationSnapshot, DataSourceError> {
        let mut request = self.client.get(self.snapshot_url(record));
        if let Some(auth) = &self.auth {
            request = request.basic_auth(auth.username.clone(), Some(auth.api_token.clone()));
        }

        let response = request
            .send()
            .await
            .map_err(|_| DataSourceError::Connection)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(DataSourceError::Unauthorized);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(DataSourceError::NotFound);
        }
        if !status.is_success() {
            return Err(DataSourceError::Connection);
        }

        let record = response
            .json::<SnapshotRecord>()
            .await
            .map_err(|_| DataSourceError::Parse)?;
        snapshot_from_record(record).map_err(|_| DataSourceError::Parse)
    }
}
