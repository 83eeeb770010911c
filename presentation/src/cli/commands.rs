//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, colored text
    Text,
    /// JSON output
    Json,
}

/// CLI arguments for tier-salon
#[derive(Parser, Debug)]
#[command(name = "salon")]
#[command(author, version, about = "TIER Knowledge Salon - autonomous agents deliberate until a new idea crystallizes")]
#[command(long_about = r#"
The salon seats a host, your envoy and a few guest personas around a topic
from the corpus. They take turns speaking until the group crystallizes a new
topic, progress reaches 100%, or the session runs out of time.

Configuration files are loaded from (in priority order):
1. SALON_* environment variables
2. --config <path>     Explicit config file
3. ./salon.toml        Project-level config
4. ~/.config/tier-salon/config.toml   Global config

The generator credential is read from the variable named by
generator.api_key_env (GEMINI_API_KEY by default).

Example:
  salon topics --category TRUE
  salon run t2 --name "Ada" --role "systems theorist" --creativity 0.8
  salon discover GOOD -n 3 --exclude-keyword economics
  salon fuse t2 g1
  salon scan --duration 60
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format (overrides output.format in config)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress live progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Seed corpus file (TOML); the built-in corpus is used otherwise
    #[arg(long, value_name = "PATH", global = true)]
    pub seed: Option<PathBuf>,

    /// Also write diagnostic logs to a daily rolling file in this directory
    #[arg(long, value_name = "DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    /// Show configuration file locations and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a salon on a corpus topic
    Run(RunArgs),

    /// Discover new topics in a category
    Discover {
        /// Category: TRUE, GOOD, BEAUTIFUL or SPIRIT
        category: String,

        /// Number of topics to request
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Theme the new topics must avoid (repeatable)
        #[arg(long = "exclude-keyword", value_name = "KEYWORD")]
        exclude_keywords: Vec<String>,
    },

    /// Fuse two topics into a hypothetical discovery
    Fuse {
        /// First topic id
        a: String,
        /// Second topic id
        b: String,
    },

    /// Run the latent link scanner for a while and report what it found
    Scan {
        /// How long to scan, in seconds
        #[arg(long, default_value_t = 30)]
        duration: u64,
    },

    /// List the corpus
    Topics {
        /// Only this category
        #[arg(long)]
        category: Option<String>,
    },
}

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Topic id from the corpus
    pub topic_id: String,

    /// Your envoy's name
    #[arg(long, default_value = "Envoy")]
    pub name: String,

    /// Your envoy's expertise
    #[arg(long, default_value = "independent researcher")]
    pub role: String,

    /// Risk tolerance, 0 (cautious) to 1 (reckless)
    #[arg(long, default_value_t = 0.5)]
    pub risk: f32,

    /// Creativity bias, 0 (logic-only) to 1 (abstract)
    #[arg(long, default_value_t = 0.5)]
    pub creativity: f32,

    /// File whose contents your envoy draws on
    #[arg(long, value_name = "PATH")]
    pub knowledge: Option<PathBuf>,

    /// Text your envoy speaks on its first turn (repeatable)
    #[arg(long, value_name = "TEXT")]
    pub interject: Vec<String>,

    /// Seed for reproducible speaker selection and progress
    #[arg(long)]
    pub rng_seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from([
            "salon", "run", "t2", "--name", "Ada", "--creativity", "0.9", "--interject", "Hello", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Some(Command::Run(args)) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.topic_id, "t2");
        assert_eq!(args.name, "Ada");
        assert_eq!(args.creativity, 0.9);
        assert_eq!(args.risk, 0.5);
        assert_eq!(args.interject, vec!["Hello"]);
    }

    #[test]
    fn test_parse_discover() {
        let cli = Cli::try_parse_from([
            "salon",
            "-o",
            "json",
            "discover",
            "GOOD",
            "-n",
            "3",
            "--exclude-keyword",
            "money",
            "--exclude-keyword",
            "war",
        ])
        .unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
        let Some(Command::Discover {
            category,
            count,
            exclude_keywords,
        }) = cli.command
        else {
            panic!("expected discover");
        };
        assert_eq!(category, "GOOD");
        assert_eq!(count, Some(3));
        assert_eq!(exclude_keywords, vec!["money", "war"]);
    }

    #[test]
    fn test_show_config_needs_no_subcommand() {
        let cli = Cli::try_parse_from(["salon", "--show-config"]).unwrap();
        assert!(cli.show_config);
        assert!(cli.command.is_none());
    }
}
