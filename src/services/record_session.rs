use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::domain::analysis::{AnalysisOutcome, RecordAnalysis};
use crate::domain::parameters::AnalysisParameters;
use crate::domain::record::Record;
use crate::domain::snapshot::EstimationSnapshot;
use crate::domain::workflow::InProgressPolicy;
use crate::services::data_source::{DataSourceError, EstimationDataProvider};
use crate::services::record_analysis::analyze_single_record;

/// Identifies one fetch. Only the ticket of the latest selection is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    record: Record,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchApplied {
    Applied,
    Stale,
    /// No fetch was started: the record's snapshot is loaded or already loading.
    Cached,
}

/// What a renderer should show for the selected record.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionView {
    Idle,
    Loading,
    NoData,
    InsufficientData,
    Analyzed(RecordAnalysis),
}

#[derive(Debug)]
enum SnapshotState {
    Empty,
    Loading,
    Loaded(EstimationSnapshot),
    Failed,
}

/// Holds the snapshot of the displayed record so parameter changes can be
/// re-analyzed without fetching again.
pub struct RecordSession<D, P> {
    provider: D,
    policy: P,
    record: Option<Record>,
    generation: u64,
    state: SnapshotState,
}

impl<D: EstimationDataProvider, P: InProgressPolicy> RecordSession<D, P> {
    pub fn new(provider: D, policy: P) -> Self {
        Self {
            provider,
            policy,
            record: None,
            generation: 0,
            state: SnapshotState::Empty,
        }
    }

    pub fn record(&self) -> Option<&Record> {
        self.record.as_ref()
    }

    /// Switches the displayed record.
    ///
    /// Returns `None` when `record` is already selected and its snapshot
    /// loaded or loading, so no new fetch is needed.
    pub fn select_record(&mut self, record: Record) -> Option<FetchTicket> {
        let already_selected = self.record.as_ref() == Some(&record)
            && matches!(self.state, SnapshotState::Loading | SnapshotState::Loaded(_));
        if already_selected {
            debug!(record_id = %record, "estimation data already cached");
            return None;
        }

        self.generation += 1;
        self.record = Some(record.clone());
        self.state = SnapshotState::Loading;
        Some(FetchTicket {
            generation: self.generation,
            record,
        })
    }

    pub async fn fetch(&self, ticket: &FetchTicket) -> Result<EstimationSnapshot, DataSourceError> {
        self.provider.fetch_snapshot(&ticket.record).await
    }

    /// Stores a fetch result unless a newer record was selected meanwhile.
    pub fn apply_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<EstimationSnapshot, DataSourceError>,
    ) -> FetchApplied {
        if ticket.generation != self.generation {
            debug!(record_id = %ticket.record, "discarding stale estimation data");
            return FetchApplied::Stale;
        }

        self.state = match result {
            Ok(snapshot) => SnapshotState::Loaded(snapshot),
            Err(err) => {
                warn!(
                    record_id = %ticket.record,
                    error = %err,
                    "unable to load estimation data"
                );
                SnapshotState::Failed
            }
        };
        FetchApplied::Applied
    }

    /// Selects `record` and fetches its snapshot unless it is cached.
    pub async fn load_record(&mut self, record: Record) -> FetchApplied {
        let Some(ticket) = self.select_record(record) else {
            return FetchApplied::Cached;
        };
        let result = self.fetch(&ticket).await;
        self.apply_fetch(ticket, result)
    }

    /// Runs the analysis on the cached snapshot. Never fetches.
    pub fn view(&self, parameters: &AnalysisParameters, now: DateTime<Utc>) -> SessionView {
        match &self.state {
            SnapshotState::Empty => SessionView::Idle,
            SnapshotState::Loading => SessionView::Loading,
            SnapshotState::Failed => SessionView::NoData,
            SnapshotState::Loaded(snapshot) => {
                match analyze_single_record(snapshot, parameters, &self.policy, now) {
                    AnalysisOutcome::Analyzed(analysis) => SessionView::Analyzed(analysis),
                    AnalysisOutcome::InsufficientData => SessionView::InsufficientData,
                }
            }
        }
    }
}
