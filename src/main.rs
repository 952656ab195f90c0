use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use projected_duration::commands::analyze_cmd::analyze_command;
use projected_duration::commands::base_commands::{CliArgs, Commands};
use projected_duration::commands::get_snapshot_cmd::get_snapshot_command;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    match args.command {
        Commands::Analyze(analyze) => analyze_command(analyze).await,
        cmd @ Commands::GetSnapshot { .. } => get_snapshot_command(cmd).await,
        Commands::Completions { shell } => {
            let mut command = CliArgs::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
        }
    }
}
