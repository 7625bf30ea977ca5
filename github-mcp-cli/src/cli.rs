use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "github-mcp-server")]
#[command(version)]
#[command(about = "An MCP server exposing GitHub operations as tools")]
#[command(long_about = "
github-mcp-server is an MCP (Model Context Protocol) server that lets AI
assistants work with GitHub: issues, pull requests, repositories, code and
user search, and Projects (v2).

The token is read from GITHUB_PERSONAL_ACCESS_TOKEN. Set GH_HOST to talk to a
GitHub Enterprise Server instead of github.com.

Example usage:
  github-mcp-server stdio               # Serve MCP over stdin/stdout
  github-mcp-server stdio --read-only   # Only expose tools that read
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve MCP over stdin/stdout
    #[command(long_about = "
Runs the MCP server on stdin/stdout, the transport MCP clients use when they
launch the server themselves. The server runs until stdin is closed or it
receives Ctrl+C or SIGTERM.

Logs go to stderr unless --log-file is given; stdout carries only protocol
messages.

Example:
  GITHUB_PERSONAL_ACCESS_TOKEN=ghp_... github-mcp-server stdio --log-file mcp.log
")]
    Stdio {
        /// Only register tools that do not change anything on GitHub
        #[arg(long)]
        read_only: bool,

        /// GitHub Enterprise host to use instead of github.com (overrides GH_HOST)
        #[arg(long, value_name = "HOST")]
        gh_host: Option<String>,

        /// Append logs to this file instead of stderr
        #[arg(long, value_name = "PATH")]
        log_file: Option<PathBuf>,

        /// Log every MCP message exchanged with the client
        #[arg(long)]
        enable_command_logging: bool,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    #[allow(dead_code)]
    pub fn try_parse_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(args)
    }

    /// Log level selected by the verbosity flags
    pub fn log_level(&self) -> Level {
        if self.quiet {
            Level::ERROR
        } else if self.debug {
            Level::DEBUG
        } else if self.verbose {
            Level::TRACE
        } else {
            Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from_args(["github-mcp-server"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.log_level(), Level::INFO);
    }

    #[test]
    fn test_stdio_flags() {
        let cli = Cli::try_parse_from_args([
            "github-mcp-server",
            "stdio",
            "--read-only",
            "--gh-host",
            "github.example.com",
            "--log-file",
            "/tmp/mcp.log",
            "--enable-command-logging",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Stdio {
                read_only,
                gh_host,
                log_file,
                enable_command_logging,
            }) => {
                assert!(read_only);
                assert_eq!(gh_host.as_deref(), Some("github.example.com"));
                assert_eq!(log_file, Some(PathBuf::from("/tmp/mcp.log")));
                assert!(enable_command_logging);
            }
            other => panic!("expected stdio command, got {other:?}"),
        }
    }

    #[test]
    fn test_stdio_defaults() {
        let cli = Cli::try_parse_from_args(["github-mcp-server", "stdio"]).unwrap();
        match cli.command {
            Some(Commands::Stdio {
                read_only,
                gh_host,
                log_file,
                enable_command_logging,
            }) => {
                assert!(!read_only);
                assert!(gh_host.is_none());
                assert!(log_file.is_none());
                assert!(!enable_command_logging);
            }
            other => panic!("expected stdio command, got {other:?}"),
        }
    }

    #[test]
    fn test_global_verbosity_after_subcommand() {
        let cli = Cli::try_parse_from_args(["github-mcp-server", "stdio", "--quiet"]).unwrap();
        assert_eq!(cli.log_level(), Level::ERROR);

        let cli = Cli::try_parse_from_args(["github-mcp-server", "-d", "stdio"]).unwrap();
        assert_eq!(cli.log_level(), Level::DEBUG);
    }

    #[test]
    fn test_unknown_subcommand_fails() {
        assert!(Cli::try_parse_from_args(["github-mcp-server", "serve-http"]).is_err());
    }
}
