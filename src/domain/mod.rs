pub mod analysis;
pub mod calendar;
pub mod parameters;
pub mod record;
pub mod snapshot;
pub mod workflow;
