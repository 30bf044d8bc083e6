use anyhow::{anyhow, Context as _, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::config::{Config, LoggingConfig};
use crate::engine::{Args, Context, Registry, Script, Value};
use crate::tree::{write_document, Element};

#[derive(Parser)]
#[command(name = "functor")]
#[command(about = "Functor - run declarative block-structured scripts", long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default search)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Perform a script once and print its result and final arguments
    Run {
        /// Script file (.json, or text notation)
        file: PathBuf,

        /// Argument as NAME=VALUE; VALUE is read as JSON when it parses
        #[arg(short = 'a', long = "arg", value_name = "NAME=VALUE")]
        args: Vec<String>,

        /// Initial arguments as a JSON object
        #[arg(long)]
        args_json: Option<String>,

        /// Context values as a JSON object
        #[arg(long)]
        context_json: Option<String>,
    },

    /// Build and bind a script without performing it
    Check {
        /// Script file (.json, or text notation)
        file: PathBuf,
    },

    /// Re-serialize a script from its built tree
    Fmt {
        /// Script file (.json, or text notation)
        file: PathBuf,

        /// Emit JSON instead of text notation
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration
    Config,
}

/// Run the CLI by parsing process arguments
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    run_cli_with_args(cli)
}

/// Run the CLI with provided arguments (for hosts that need to filter args)
pub fn run_cli_from_args(args: Vec<String>) -> Result<()> {
    let cli = Cli::parse_from(args);
    run_cli_with_args(cli)
}

fn run_cli_with_args(cli: Cli) -> Result<()> {
    // Eagerly load configuration so errors surface before any command output
    let config = Config::builder()
        .config_path(cli.config)
        .with_env(true)
        .build()?;
    init_logging(&config.logging);

    let registry = Registry::with_stdlib();

    match cli.command {
        Commands::Run {
            file,
            args,
            args_json,
            context_json,
        } => {
            let mut script = load_script(&file, &registry, &config)?;
            script.bind(Context::new(parse_object(context_json.as_deref(), "--context-json")?))?;

            let mut arguments = Args::from(parse_object(args_json.as_deref(), "--args-json")?);
            for pair in &args {
                let (name, value) = parse_pair(pair)?;
                arguments.put(name, value);
            }

            let outcome = script.perform(&mut arguments);
            script.dispose()?;
            let result = outcome.with_context(|| format!("{} failed", file.display()))?;

            let report = json!({ "result": result, "args": arguments });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Commands::Check { file } => {
            let mut script = load_script(&file, &registry, &config)?;
            script.bind(Context::default())?;
            script.dispose()?;
            println!("✓ {} is valid", file.display());
        }

        Commands::Fmt { file, json } => {
            let root = Element::load(&file)?;
            let script = Script::configure(&root, &registry, &config.engine)
                .with_context(|| format!("Failed to build {}", file.display()))?;
            let element = script.to_element(&root.name)?;
            if json {
                println!("{}", element.to_json_pretty()?);
            } else {
                let text = write_document(&element)
                    .context("Tree cannot be written as text notation, use --json")?;
                print!("{}", text);
            }
        }

        Commands::Config => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.filter.as_str()));

    // A host may already have installed a subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_script(file: &Path, registry: &Registry, config: &Config) -> Result<Script> {
    let root = Element::load(file)?;
    Script::configure(&root, registry, &config.engine)
        .with_context(|| format!("Failed to build {}", file.display()))
}

fn parse_object(source: Option<&str>, flag: &str) -> Result<HashMap<String, Value>> {
    match source {
        Some(source) => serde_json::from_str(source)
            .with_context(|| format!("{} must be a JSON object", flag)),
        None => Ok(HashMap::new()),
    }
}

fn parse_pair(pair: &str) -> Result<(String, Value)> {
    let (name, raw) = pair
        .split_once('=')
        .ok_or_else(|| anyhow!("Invalid argument '{}', expected NAME=VALUE", pair))?;
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((name.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair_reads_json_then_falls_back_to_string() {
        assert_eq!(parse_pair("n=3").unwrap(), ("n".to_string(), json!(3)));
        assert_eq!(parse_pair("flag=true").unwrap(), ("flag".to_string(), json!(true)));
        assert_eq!(
            parse_pair("name=plain text").unwrap(),
            ("name".to_string(), json!("plain text"))
        );
        assert_eq!(parse_pair("eq=a=b").unwrap(), ("eq".to_string(), json!("a=b")));
        assert!(parse_pair("missing").is_err());
    }

    #[test]
    fn test_cli_parses_run_command() {
        let cli = Cli::parse_from([
            "functor",
            "run",
            "script.tree",
            "--arg",
            "a=1",
            "-a",
            "b=x",
            "--args-json",
            "{}",
        ]);
        let Commands::Run { file, args, args_json, .. } = cli.command else {
            unreachable!("expected run command");
        };
        assert_eq!(file, PathBuf::from("script.tree"));
        assert_eq!(args, vec!["a=1".to_string(), "b=x".to_string()]);
        assert_eq!(args_json.as_deref(), Some("{}"));
    }
}
