//! Serving MCP over stdin/stdout

use crate::command_log::CommandLogger;
use crate::exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_WARNING};
use crate::signal_handler::shutdown_signal;
use anyhow::Context;
use github_mcp::config::ConfigError;
use github_mcp::{Config, McpServer};
use rmcp::serve_server;

/// Options of the `stdio` subcommand that affect the server itself
#[derive(Debug, Clone, Default)]
pub struct StdioOptions {
    /// Exclude mutating tools
    pub read_only: bool,
    /// Enterprise host overriding `GH_HOST`
    pub gh_host: Option<String>,
    /// Log MCP traffic
    pub enable_command_logging: bool,
}

/// Environment configuration with the command-line overrides applied
pub fn load_config(options: &StdioOptions) -> Result<Config, ConfigError> {
    let mut config = Config::from_env()?;
    if let Some(host) = options.gh_host.as_deref().filter(|h| !h.trim().is_empty()) {
        config = config.with_host(host.trim())?;
    }
    if options.read_only {
        config = config.with_read_only(true);
    }
    Ok(config)
}

/// Load the configuration and build the server it describes
pub fn prepare_server(options: &StdioOptions) -> anyhow::Result<(Config, McpServer)> {
    let config = load_config(options).context("Failed to load configuration")?;
    let server = McpServer::new(&config).context("Failed to create MCP server")?;
    Ok((config, server))
}

/// Run the server until stdin closes or a shutdown signal arrives
pub async fn run_stdio(options: StdioOptions) -> i32 {
    let (config, server) = match prepare_server(&options) {
        Ok(prepared) => prepared,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {e:#}");
            return EXIT_ERROR;
        }
    };

    let transport = (
        CommandLogger::inbound(tokio::io::stdin(), options.enable_command_logging),
        CommandLogger::outbound(tokio::io::stdout(), options.enable_command_logging),
    );

    let running = match serve_server(server, transport).await {
        Ok(running) => running,
        Err(e) => {
            tracing::error!("MCP server error: {}", e);
            return EXIT_WARNING;
        }
    };
    tracing::info!(
        "MCP server running on stdio against {}",
        config.host.as_deref().unwrap_or("github.com")
    );

    tokio::select! {
        result = running.waiting() => match result {
            Ok(reason) => {
                tracing::info!("MCP server stopped: {:?}", reason);
                EXIT_SUCCESS
            }
            Err(e) => {
                tracing::error!("MCP server task failed: {}", e);
                EXIT_WARNING
            }
        },
        _ = shutdown_signal() => {
            tracing::info!("MCP server exited successfully");
            EXIT_SUCCESS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const TOKEN: &str = "GITHUB_PERSONAL_ACCESS_TOKEN";

    #[test]
    #[serial]
    fn test_missing_token_is_config_error() {
        std::env::remove_var(TOKEN);
        let err = load_config(&StdioOptions::default()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingToken { .. }));
        assert!(err.to_string().contains(TOKEN));
    }

    #[test]
    #[serial]
    fn test_prepare_server_adds_context() {
        std::env::remove_var(TOKEN);
        let err = prepare_server(&StdioOptions::default()).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.starts_with("Failed to load configuration"));
        assert!(message.contains(TOKEN));
    }

    #[test]
    #[serial]
    fn test_flags_override_environment() {
        std::env::set_var(TOKEN, "ghp_test");
        std::env::remove_var("GH_HOST");
        let config = load_config(&StdioOptions {
            read_only: true,
            gh_host: Some("github.example.com".to_string()),
            enable_command_logging: false,
        })
        .unwrap();
        std::env::remove_var(TOKEN);

        assert!(config.read_only);
        assert_eq!(config.rest_base_url, "https://github.example.com/api/v3/");
        assert_eq!(config.graphql_url, "https://github.example.com/api/graphql");
    }
}
