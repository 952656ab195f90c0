pub mod analyze_cmd;
pub mod base_commands;
pub mod get_snapshot_cmd;
pub mod report_format;
