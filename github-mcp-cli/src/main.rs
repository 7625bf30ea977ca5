use clap::CommandFactory;
use github_mcp_cli::cli::{Cli, Commands};
use github_mcp_cli::exit_codes::EXIT_SUCCESS;
use github_mcp_cli::logging::init_logging;
use github_mcp_cli::serve::{run_stdio, StdioOptions};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    let Some(command) = cli.command.as_ref() else {
        if let Err(e) = Cli::command().print_help() {
            eprintln!("Failed to print help: {e}");
        }
        process::exit(EXIT_SUCCESS);
    };

    let exit_code = match command {
        Commands::Stdio {
            read_only,
            gh_host,
            log_file,
            enable_command_logging,
        } => {
            init_logging(cli.log_level(), log_file.as_deref(), *enable_command_logging);
            tracing::info!("Starting GitHub MCP server v{}", github_mcp::VERSION);
            run_stdio(StdioOptions {
                read_only: *read_only,
                gh_host: gh_host.clone(),
                enable_command_logging: *enable_command_logging,
            })
            .await
        }
    };

    process::exit(exit_code);
}
