use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{debug, info};
use serde_json::Value;

use graphsync::complex::ComplexToolkit;
use graphsync::config::SyncConfig;
use graphsync::nodes::{register_complex_arithmetic_nodes, register_complex_trig_nodes, NodeRegistry};
use graphsync::sliders::{GraphSource, SliderEngine};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile graph sources and print the slider groups
    Reconcile {
        /// JSON array of graph sources
        #[arg(long)]
        sources: PathBuf,

        /// Graph treated as active during canonical election
        #[arg(long)]
        active: Option<String>,

        /// Overrides the configured primary role
        #[arg(long)]
        primary_role: Option<String>,
    },
    /// Map a canonical value onto every member of a group
    Map {
        /// JSON array of graph sources
        #[arg(long)]
        sources: PathBuf,

        /// Group id (slug)
        #[arg(long)]
        group: String,

        /// Canonical value to map
        #[arg(long, allow_hyphen_values = true)]
        value: f64,

        #[arg(long)]
        active: Option<String>,

        /// Overrides the configured primary role
        #[arg(long)]
        primary_role: Option<String>,
    },
    /// Evaluate a complex node by id or alias
    Eval {
        #[arg(long)]
        node: String,

        /// Input as name=value; values are JSON or complex strings like 3-4i
        #[arg(long = "pin", allow_hyphen_values = true)]
        pins: Vec<String>,
    },
    /// List registered complex nodes
    Nodes,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Config picks the log filter, so it is read before the logger starts
    let config = match &cli.config {
        Some(path) => read_config(path)?,
        None => SyncConfig::default(),
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(config.log_level.as_str())).init();
    match &cli.config {
        Some(path) => debug!("Loaded configuration from {}", path.display()),
        None => debug!("Using default configuration"),
    }

    match cli.command {
        Commands::Reconcile { sources, active, primary_role } => {
            let config = with_role_override(config, primary_role);
            let engine = reconcile_file(&config, &sources, active.as_deref())?;
            print_json(&engine.list())?;
        }
        Commands::Map { sources, group, value, active, primary_role } => {
            let config = with_role_override(config, primary_role);
            let engine = reconcile_file(&config, &sources, active.as_deref())?;
            let result = engine
                .map_value(&group, value)
                .ok_or_else(|| anyhow!("unknown slider group '{}'", group))?;
            print_json(&result)?;
        }
        Commands::Eval { node, pins } => {
            let registry = build_registry(&config)?;
            let pins = parse_pins(&pins)?;
            let outputs = registry
                .evaluate(&node, &pins)
                .ok_or_else(|| anyhow!("unknown node '{}'", node))?;
            print_json(&outputs)?;
        }
        Commands::Nodes => {
            let registry = build_registry(&config)?;
            for descriptor in registry.descriptors() {
                println!(
                    "{}  {:<20} {}",
                    descriptor.primary_id(),
                    descriptor.display_name,
                    descriptor.category
                );
            }
        }
    }
    Ok(())
}

fn read_config(path: &Path) -> Result<SyncConfig> {
    let contents = std::fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    SyncConfig::from_json_str(&contents).with_context(|| format!("parsing config {}", path.display()))
}

fn with_role_override(config: SyncConfig, primary_role: Option<String>) -> SyncConfig {
    match primary_role {
        Some(role) => config.with_primary_role(&role),
        None => config,
    }
}

fn reconcile_file(config: &SyncConfig, path: &Path, active: Option<&str>) -> Result<SliderEngine> {
    let contents = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let sources: Vec<GraphSource> =
        serde_json::from_str(&contents).with_context(|| format!("parsing {}", path.display()))?;

    let mut engine = SliderEngine::from_config(config)?;
    engine.reconcile(&sources, active);
    info!("Loaded {} graph sources from {}", sources.len(), path.display());
    Ok(engine)
}

fn build_registry(config: &SyncConfig) -> Result<NodeRegistry> {
    let toolkit = ComplexToolkit::from_config(config)?;
    let mut registry = NodeRegistry::new();
    register_complex_arithmetic_nodes(&mut registry, toolkit)?;
    register_complex_trig_nodes(&mut registry, toolkit)?;
    Ok(registry)
}

fn parse_pins(pins: &[String]) -> Result<BTreeMap<String, Value>> {
    let mut parsed = BTreeMap::new();
    for pin in pins {
        let Some((name, raw)) = pin.split_once('=') else {
            bail!("pin '{}' is not in name=value form", pin);
        };
        // Anything that isn't JSON is handed to the complex parser as a string
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        parsed.insert(name.trim().to_string(), value);
    }
    Ok(parsed)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_accepts_primary_role_override() {
        let cli = Cli::try_parse_from([
            "graphsync", "map", "--sources", "s.json", "--group", "radius", "--value", "-2", "--primary-role", "main",
        ])
        .unwrap();
        match cli.command {
            Commands::Map { primary_role, value, .. } => {
                assert_eq!(primary_role.as_deref(), Some("main"));
                assert_eq!(value, -2.0);
            }
            _ => panic!("expected map"),
        }
    }

    #[test]
    fn test_role_override_applies_to_config() {
        let config = with_role_override(SyncConfig::default(), Some("Hero".to_string()));
        assert_eq!(config.primary_role, "Hero");
        let config = with_role_override(SyncConfig::default(), None);
        assert_eq!(config.primary_role, SyncConfig::default().primary_role);
    }

    #[test]
    fn test_parse_pins_accepts_json_and_complex_strings() {
        let pins = parse_pins(&["a=[1, 2]".to_string(), "b=3-4i".to_string()]).unwrap();
        assert_eq!(pins["a"], serde_json::json!([1, 2]));
        assert_eq!(pins["b"], Value::String("3-4i".to_string()));
        assert!(parse_pins(&["novalue".to_string()]).is_err());
    }
}
