use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use gcol_graph::{document_from_json, Graph, NodeLabel, Positions};
use gcol_solve::{OptMode, SolveConfig, Strategy};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod dual;
pub mod faces;
pub mod nodes;

/// Encoding of node labels in a graph document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LabelKind {
    /// Non-negative integers.
    Index,
    /// Arbitrary strings.
    Name,
}

#[derive(Args, Debug)]
pub struct InputArgs {
    /// JSON graph document with `nodes`, `edges` and optional `weights` and `positions`.
    #[arg(long)]
    pub graph: PathBuf,
    /// How node labels are encoded in the document.
    #[arg(long, value_enum, default_value_t = LabelKind::Index)]
    pub labels: LabelKind,
    /// Write the JSON report to this file instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct SolveArgs {
    /// YAML solver configuration; flags below override its fields.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Construction heuristic (random, welsh-powell, dsatur, rlf).
    #[arg(long)]
    pub strategy: Option<Strategy>,
    /// Optimisation mode (none, exact, tabucol, partialcol, hea-tabucol, hea-partialcol).
    #[arg(long)]
    pub opt_mode: Option<OptMode>,
    /// Local search iteration budget.
    #[arg(long)]
    pub it_limit: Option<u64>,
    /// Master seed.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl SolveArgs {
    /// Loads the YAML config (or defaults) and applies command-line overrides.
    pub fn resolve(&self, verbose: u8) -> Result<SolveConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => SolveConfig::from_yaml_str(&fs::read_to_string(path)?)?,
            None => SolveConfig::default(),
        };
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if let Some(opt_mode) = self.opt_mode {
            config.opt_mode = opt_mode;
        }
        if let Some(it_limit) = self.it_limit {
            config.it_limit = it_limit;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        config.verbosity = config.verbosity.max(verbose);
        config.validate()?;
        Ok(config)
    }
}

pub fn load_document<N>(path: &Path) -> Result<(Graph<N>, Option<Positions<N>>), Box<dyn Error>>
where
    N: NodeLabel + DeserializeOwned,
{
    let json = fs::read_to_string(path)?;
    Ok(document_from_json(&json)?)
}

pub fn require_positions<N>(positions: Option<Positions<N>>, path: &Path) -> Result<Positions<N>, Box<dyn Error>> {
    positions.ok_or_else(|| format!("{} has no `positions` for a planar drawing", path.display()).into())
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn Error>> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

pub fn write_report<T: Serialize>(out: Option<&Path>, report: &T) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(report)?;
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, json)?;
        }
        None => println!("{json}"),
    }
    Ok(())
}
