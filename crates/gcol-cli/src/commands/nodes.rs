use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use gcol_core::Color;
use gcol_graph::NodeLabel;
use gcol_solve::{
    chromatic_number, coloring, equitable_k_coloring, k_coloring, list_coloring, precoloring,
    SolveConfig,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use super::{load_document, read_json, write_report, InputArgs, LabelKind, SolveArgs};
use crate::report::NodeReport;

#[derive(Args, Debug)]
pub struct ColorArgs {
    #[command(flatten)]
    pub input: InputArgs,
    #[command(flatten)]
    pub solve: SolveArgs,
    /// JSON object fixing the colours of some nodes, e.g. `{"0": 1}`.
    #[arg(long, conflicts_with = "lists")]
    pub precolor: Option<PathBuf>,
    /// JSON object giving every node its candidate colours, e.g. `{"0": [1, 2]}`.
    #[arg(long)]
    pub lists: Option<PathBuf>,
    /// Also report the exact chromatic number (exponential in the worst case).
    #[arg(long)]
    pub chromatic: bool,
}

#[derive(Args, Debug)]
pub struct KColorArgs {
    #[command(flatten)]
    pub input: InputArgs,
    #[command(flatten)]
    pub solve: SolveArgs,
    /// Number of colours to use.
    #[arg(long)]
    pub k: usize,
}

pub fn run_color(args: &ColorArgs, verbose: u8) -> Result<(), Box<dyn Error>> {
    let config = args.solve.resolve(verbose)?;
    match args.input.labels {
        LabelKind::Index => color_as::<usize>(args, &config),
        LabelKind::Name => color_as::<String>(args, &config),
    }
}

pub fn run_k_color(args: &KColorArgs, verbose: u8, equitable: bool) -> Result<(), Box<dyn Error>> {
    let config = args.solve.resolve(verbose)?;
    match args.input.labels {
        LabelKind::Index => k_color_as::<usize>(args, &config, equitable),
        LabelKind::Name => k_color_as::<String>(args, &config, equitable),
    }
}

fn color_as<N>(args: &ColorArgs, config: &SolveConfig) -> Result<(), Box<dyn Error>>
where
    N: NodeLabel + Serialize + DeserializeOwned,
{
    let (graph, _) = load_document::<N>(&args.input.graph)?;
    let result = if let Some(path) = &args.precolor {
        let fixed: BTreeMap<N, Color> = read_json(path)?;
        precoloring(&graph, &fixed, config)?
    } else if let Some(path) = &args.lists {
        let lists: BTreeMap<N, BTreeSet<Color>> = read_json(path)?;
        list_coloring(&graph, &lists, config)?
    } else {
        coloring(&graph, config)?
    };
    let mut report = NodeReport::new("color", &graph, &result, config);
    if args.chromatic {
        report.chromatic_number = Some(chromatic_number(&graph));
    }
    info!(colors = report.colors, nodes = report.nodes, "coloured nodes");
    write_report(args.input.out.as_deref(), &report)
}

fn k_color_as<N>(args: &KColorArgs, config: &SolveConfig, equitable: bool) -> Result<(), Box<dyn Error>>
where
    N: NodeLabel + Serialize + DeserializeOwned,
{
    let (graph, _) = load_document::<N>(&args.input.graph)?;
    let (command, result) = if equitable {
        ("equitable", equitable_k_coloring(&graph, args.k, config)?)
    } else {
        ("k-color", k_coloring(&graph, args.k, config)?)
    };
    let report = NodeReport::new(command, &graph, &result, config);
    info!(k = args.k, colors = report.colors, "coloured nodes");
    write_report(args.input.out.as_deref(), &report)
}
