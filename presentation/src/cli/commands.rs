//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use livechat_domain::LogFilter;
use std::path::PathBuf;

/// Log filter selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FilterArg {
    /// Tool calls, tool responses and cancellations
    Tools,
    /// Client turns and server content
    Conversations,
    /// Everything
    None,
}

impl From<FilterArg> for LogFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::Tools => LogFilter::Tools,
            FilterArg::Conversations => LogFilter::Conversations,
            FilterArg::None => LogFilter::None,
        }
    }
}

/// CLI arguments for livechat
#[derive(Parser, Debug)]
#[command(name = "livechat")]
#[command(author, version, about = "Live-API chat client with a protocol log viewer")]
#[command(long_about = r#"
livechat holds a scripted conversation with a live model session and keeps a
log of every protocol message exchanged.

A conversation goes through four phases:
1. Setup: waiting for the session to become ready
2. Active: the model greets you and you chat
3. Awaiting evaluation: after /end the model is asked for an evaluation
4. Concluded: the transcript can be exported with /export

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./livechat.toml     Project-level config
3. ~/.config/livechat/config.toml   Global config

Example:
  livechat chat --script session.jsonl
  livechat chat --script session.jsonl --log-dump session.log.jsonl --tui
  livechat logs session.log.jsonl --filter tools
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Write diagnostics to this file instead of stderr
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start an interactive conversation
    Chat(ChatArgs),
    /// Render a recorded protocol log
    Logs(LogsArgs),
}

#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Replay script with the server side of the session (JSONL)
    #[arg(long, value_name = "PATH")]
    pub script: PathBuf,

    /// Mirror the protocol log to this JSONL file
    #[arg(long, value_name = "PATH")]
    pub log_dump: Option<PathBuf>,

    /// Full-screen interface with transcript and log panes
    #[arg(long)]
    pub tui: bool,
}

#[derive(Args, Debug)]
pub struct LogsArgs {
    /// JSONL log dump to render
    pub file: PathBuf,

    /// Only show matching records (defaults to the configured filter)
    #[arg(short, long, value_enum)]
    pub filter: Option<FilterArg>,

    /// Show consecutive duplicates individually
    #[arg(long)]
    pub no_coalesce: bool,

    /// Browse the log in a full-screen viewer
    #[arg(long)]
    pub tui: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chat() {
        let cli = Cli::try_parse_from([
            "livechat",
            "-vv",
            "chat",
            "--script",
            "s.jsonl",
            "--log-dump",
            "d.jsonl",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Command::Chat(args)) => {
                assert_eq!(args.script, PathBuf::from("s.jsonl"));
                assert_eq!(args.log_dump, Some(PathBuf::from("d.jsonl")));
                assert!(!args.tui);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_logs() {
        let cli = Cli::try_parse_from([
            "livechat",
            "logs",
            "d.jsonl",
            "--filter",
            "tools",
            "--no-coalesce",
            "--config",
            "c.toml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
        match cli.command {
            Some(Command::Logs(args)) => {
                assert_eq!(args.filter.map(LogFilter::from), Some(LogFilter::Tools));
                assert!(args.no_coalesce);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_chat_requires_script() {
        assert!(Cli::try_parse_from(["livechat", "chat"]).is_err());
    }

    #[test]
    fn test_show_config_without_command() {
        let cli = Cli::try_parse_from(["livechat", "--show-config"]).unwrap();
        assert!(cli.show_config);
        assert!(cli.command.is_none());
    }
}
