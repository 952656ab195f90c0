use crate::commands::base_commands::Commands;
use crate::services::data_source::EstimationDataProvider;
use crate::services::estimation_api::{AuthData, HttpSnapshotProvider};
use crate::services::forecast_config::ForecastConfig;
use crate::services::snapshot_yaml::serialize_snapshot_to_yaml;

pub async fn get_snapshot_command(cmd: Commands) {
    if let Commands::GetSnapshot {
        record,
        config,
        base_url,
        output,
    } = cmd
    {
        let config = match config.as_deref().map(ForecastConfig::from_yaml_file) {
            Some(Ok(config)) => config,
            Some(Err(e)) => {
                eprintln!("Failed to load forecast config: {e}");
                return;
            }
            None => ForecastConfig::default(),
        };

        let Some(base_url) = base_url.or(config.base_url) else {
            eprintln!("Failed to get snapshot: no base_url configured");
            return;
        };

        let api_client = match HttpSnapshotProvider::new(&base_url, AuthData::from_env().ok()) {
            Ok(client) => client,
            Err(e) => {
                eprintln!("Failed to create estimation API client: {e:?}");
                return;
            }
        };

        let record = record.to_record();
        let snapshot = match api_client.fetch_snapshot(&record).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(record_id = %record, error = %e, "unable to load estimation data");
                eprintln!("Failed to get estimation data for {record}: {e}");
                return;
            }
        };

        let mut buffer = Vec::new();
        if let Err(e) = serialize_snapshot_to_yaml(&mut buffer, &snapshot) {
            eprintln!("Failed to serialize snapshot to YAML: {e:?}");
            return;
        }
        if let Err(e) = tokio::fs::write(&output, buffer).await {
            eprintln!("Failed to write output file: {e:?}");
        } else {
            println!("Estimation data for {record} written to {output}");
        }
    }
}
