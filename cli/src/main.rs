//! CLI entrypoint for livechat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use clap::{CommandFactory, Parser};
use livechat_application::{
    ConversationController, FanoutLogWriter, LogViewUseCase, LogWriter,
};
use livechat_infrastructure::{
    ConfigLoader, FileConfig, HtmlTranscriptExporter, InMemoryLogStore, JsonlLogSink,
    ReplayTransport, read_log_file,
};
use livechat_presentation::{
    ChatArgs, ChatRepl, ChatTui, Cli, Command, ConsoleLogFormatter, LogViewer, LogsArgs,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered diagnostics are flushed on exit
    let _guard = init_tracing(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting livechat");

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    config.validate()?;

    match cli.command {
        Some(Command::Chat(args)) => run_chat(&config, args).await,
        Some(Command::Logs(args)) => run_logs(&config, args).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

/// Initialize logging based on verbosity level
fn init_tracing(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let file_name = path
        .file_name()
        .with_context(|| format!("Invalid log file path: {}", path.display()))?;
    let appender = tracing_appender::rolling::never(dir.unwrap_or(Path::new(".")), file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();

    Ok(Some(guard))
}

async fn run_chat(config: &FileConfig, args: ChatArgs) -> Result<()> {
    // === Dependency Injection ===
    let store = Arc::new(InMemoryLogStore::new());

    let dump_path = args
        .log_dump
        .or_else(|| config.logger.dump_path.as_ref().map(PathBuf::from));
    let log_writer: Arc<dyn LogWriter> = match dump_path {
        Some(path) => {
            let sink = JsonlLogSink::new(&path)
                .ok_or_else(|| anyhow!("Could not create log dump {}", path.display()))?;
            info!("Mirroring protocol log to {}", sink.path().display());
            let store_writer: Arc<dyn LogWriter> = store.clone();
            Arc::new(FanoutLogWriter::new(vec![store_writer, Arc::new(sink)]))
        }
        None => store.clone(),
    };

    let transport = ReplayTransport::from_file(&args.script, log_writer)
        .with_context(|| format!("Failed to load replay script {}", args.script.display()))?;
    let exporter = HtmlTranscriptExporter::new(config.export_dir());

    let controller = ConversationController::new(
        Arc::new(transport),
        Arc::new(exporter),
        config.conversation_config(),
    );
    let log_view = LogViewUseCase::new(store, config.log_view_config());

    let session = if args.tui {
        ChatTui::new(controller, log_view).run().await?
    } else {
        ChatRepl::new(controller, log_view, config.session.model.clone())
            .run()
            .await?
    };

    info!(
        "Chat ended ({}, {} transcript entries)",
        session.phase(),
        session.transcript().len()
    );
    Ok(())
}

async fn run_logs(config: &FileConfig, args: LogsArgs) -> Result<()> {
    let records = read_log_file(&args.file)
        .with_context(|| format!("Failed to read log dump {}", args.file.display()))?;
    info!("Loaded {} log records", records.len());

    let mut view_config = config.log_view_config();
    if let Some(filter) = args.filter {
        view_config = view_config.with_filter(filter.into());
    }
    if args.no_coalesce {
        view_config = view_config.with_coalesce(false);
    }

    let view = LogViewUseCase::new(
        Arc::new(InMemoryLogStore::with_records(records)),
        view_config,
    );

    if args.tui {
        LogViewer::new(view).run().await?;
    } else {
        print!("{}", ConsoleLogFormatter::format_entries(&view.entries(&Local)));
    }
    Ok(())
}
