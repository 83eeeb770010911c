//! CLI entrypoint for tier-salon
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::{CommandFactory, Parser};
use salon_application::{
    ContentGenerator, ConversationLogger, NoConversationLogger, NoObserver, SalonHost,
    SalonObserver, TimeoutGenerator, TopicCorpus,
};
use salon_domain::{BehaviorStats, Category, Participant, TopicId};
use salon_infrastructure::{
    ConfigLoader, FileConfig, FileOutputFormat, GeminiContentGenerator, InMemoryCorpus,
    JsonlConversationLogger, SeedLoader,
};
use salon_presentation::{
    Cli, Command, ConsoleFormatter, ConsoleObserver, OutputFormat, RunArgs, SimpleObserver,
};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so the file writer flushes on exit
    let _log_guard = init_tracing(cli.verbose, cli.log_dir.as_deref())?;

    info!("Starting tier-salon");

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    if cli.show_config {
        ConfigLoader::print_config_sources();
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let issues = config.validate();
    if !issues.is_empty() {
        let list: Vec<String> = issues.iter().map(|i| format!("  - {}", i)).collect();
        bail!("Invalid configuration:\n{}", list.join("\n"));
    }

    if !config.output.color {
        colored::control::set_override(false);
    }
    let format = cli.output.unwrap_or(match config.output.format {
        Some(FileOutputFormat::Json) => OutputFormat::Json,
        _ => OutputFormat::Text,
    });

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    // === Dependency Injection ===
    let corpus: Arc<dyn TopicCorpus> = Arc::new(InMemoryCorpus::new(match &cli.seed {
        Some(path) => SeedLoader::load(path)
            .with_context(|| format!("Failed to load seed corpus {}", path.display()))?,
        None => SeedLoader::default_topics().context("Embedded seed corpus is invalid")?,
    }));

    // Listing needs no generator
    if let Command::Topics { category } = &command {
        let topics = match category {
            Some(c) => {
                let category: Category = c.parse()?;
                corpus
                    .snapshot()
                    .into_iter()
                    .filter(|t| t.category == category)
                    .collect()
            }
            None => corpus.snapshot(),
        };
        match format {
            OutputFormat::Text => print!("{}", ConsoleFormatter::format_topics(&topics)),
            OutputFormat::Json => println!("{}", ConsoleFormatter::format_topics_json(&topics)),
        }
        return Ok(());
    }

    // A missing credential stops here, before any session work
    let gemini = GeminiContentGenerator::from_config(&config.generator)
        .map_err(|e| anyhow!("Cannot create content generator: {}", e))?;
    info!(model = %gemini.model(), "Content generator ready");

    let salon_config = config.to_salon_config();
    let generator = Arc::new(TimeoutGenerator::new(gemini, salon_config.behavior.timeout));
    let logger = conversation_logger(&config);

    let seed = match &command {
        Command::Run(args) => args.rng_seed,
        _ => None,
    };
    let host = SalonHost::from_parts(generator, corpus, salon_config, logger, seed);

    match command {
        Command::Run(args) => run_salon(&host, args, format, cli.quiet).await,
        Command::Discover {
            category,
            count,
            exclude_keywords,
        } => {
            let category: Category = category.parse()?;
            let topics = host.discover(category, count, exclude_keywords).await;
            if topics.is_empty() {
                warn!("Discovery returned no topics for {}", category);
            }
            match format {
                OutputFormat::Text => print!("{}", ConsoleFormatter::format_topics(&topics)),
                OutputFormat::Json => println!("{}", ConsoleFormatter::format_topics_json(&topics)),
            }
            Ok(())
        }
        Command::Fuse { a, b } => {
            let fused = host.fuse(&TopicId::new(a), &TopicId::new(b)).await?;
            match (fused, format) {
                (Some(topic), OutputFormat::Text) => print!("{}", ConsoleFormatter::format_topic(&topic)),
                (Some(topic), OutputFormat::Json) => {
                    println!("{}", ConsoleFormatter::format_topics_json(&[topic]))
                }
                (None, _) => bail!("Fusion produced no topic"),
            }
            Ok(())
        }
        Command::Scan { duration } => {
            scan(&host, Duration::from_secs(duration)).await;
            let links = host.links();
            match format {
                OutputFormat::Text => print!("{}", ConsoleFormatter::format_links(&links)),
                OutputFormat::Json => println!("{}", ConsoleFormatter::format_links_json(&links)),
            }
            Ok(())
        }
        Command::Topics { .. } => Ok(()),
    }
}

/// Console logging from the verbosity flag, plus an optional daily file.
fn init_tracing(verbose: u8, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, "salon.log");
            let (file, guard) = tracing_appender::non_blocking(appender);
            builder
                .with_writer(std::io::stderr.and(file))
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        }
        None => {
            builder.with_writer(std::io::stderr).init();
            Ok(None)
        }
    }
}

fn conversation_logger(config: &FileConfig) -> Arc<dyn ConversationLogger> {
    let Some(path) = &config.logging.conversation_log else {
        return Arc::new(NoConversationLogger);
    };
    match JsonlConversationLogger::open(path) {
        Some(logger) => {
            info!("Conversation log: {}", logger.path().display());
            Arc::new(logger)
        }
        None => {
            warn!("Could not open conversation log {}, continuing without it", path);
            Arc::new(NoConversationLogger)
        }
    }
}

async fn run_salon<G: ContentGenerator + 'static>(
    host: &SalonHost<G>,
    args: RunArgs,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let knowledge = match &args.knowledge {
        Some(path) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read knowledge file {}", path.display()))?,
        ),
        None => None,
    };
    let envoy = Participant::envoy(
        args.name,
        &args.role,
        BehaviorStats::new(args.risk, args.creativity),
        knowledge,
    );

    // JSON output stays machine-readable, so nothing is rendered live
    let observer: Arc<dyn SalonObserver> = if quiet || format == OutputFormat::Json {
        Arc::new(NoObserver)
    } else if std::io::stdout().is_terminal() {
        Arc::new(ConsoleObserver::new())
    } else {
        Arc::new(SimpleObserver)
    };

    let session_id = host.create_session(&TopicId::new(args.topic_id), envoy, observer)?;
    for text in args.interject {
        host.interject(&session_id, text);
    }

    let wait = host.wait(&session_id);
    tokio::pin!(wait);
    let output = tokio::select! {
        result = &mut wait => result?,
        _ = tokio::signal::ctrl_c() => {
            info!(session = %session_id, "Interrupted, adjourning the salon");
            host.abort_session(&session_id);
            wait.await?
        }
    };

    match format {
        OutputFormat::Text => println!("{}", ConsoleFormatter::format_salon(&output)),
        OutputFormat::Json => println!("{}", ConsoleFormatter::format_salon_json(&output)),
    }
    Ok(())
}

async fn scan<G: ContentGenerator + 'static>(host: &SalonHost<G>, duration: Duration) {
    host.toggle_latent_scan(true);
    tokio::select! {
        _ = tokio::time::sleep(duration) => {}
        _ = tokio::signal::ctrl_c() => info!("Interrupted, stopping the scan"),
    }
    host.toggle_latent_scan(false);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_builds_default_logger() {
        let config = ConfigLoader::load_defaults();
        // Default config has no conversation log; building the logger must not touch disk
        let _logger = conversation_logger(&config);
        assert!(config.logging.conversation_log.is_none());
    }

    #[test]
    fn test_embedded_seed_corpus_loads() {
        let topics = SeedLoader::default_topics().unwrap();
        let corpus = InMemoryCorpus::new(topics);
        assert!(corpus.len() >= 20);
        assert!(corpus.get(&TopicId::new("t2")).is_some());
    }
}
