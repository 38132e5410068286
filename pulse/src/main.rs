// pulse/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use commands::validate::ValidateArgs;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs sur stderr, stdout reste lisible (--json)
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    match cli.command {
        // --- USE CASE: VALIDATE ONE FILE ---
        Commands::Validate {
            kind,
            input,
            output,
            format,
            workers,
            chunk_size,
            project_dir,
            fail_on_issues,
        } => {
            commands::validate::execute(ValidateArgs {
                kind,
                input,
                output,
                format,
                workers,
                chunk_size,
                project_dir,
                fail_on_issues,
            })
            .await
        }

        // --- USE CASE: RUN PROJECT ---
        Commands::Run {
            project_dir,
            format,
            fail_on_issues,
        } => commands::run::execute(project_dir, format, fail_on_issues).await,

        // --- USE CASE: POLICY LOOKUP ---
        Commands::Policy {
            issue_type,
            project_dir,
            json,
        } => commands::policy::execute(issue_type, project_dir, json),
    }
}
