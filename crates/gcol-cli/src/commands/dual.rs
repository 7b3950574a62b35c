use std::error::Error;

use clap::Args;
use gcol_graph::NodeLabel;
use gcol_planar::dual_graph;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use super::{load_document, require_positions, write_report, InputArgs, LabelKind};
use crate::report::DualReport;

#[derive(Args, Debug)]
pub struct DualArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

pub fn run(args: &DualArgs) -> Result<(), Box<dyn Error>> {
    match args.input.labels {
        LabelKind::Index => dual_as::<usize>(args),
        LabelKind::Name => dual_as::<String>(args),
    }
}

fn dual_as<N>(args: &DualArgs) -> Result<(), Box<dyn Error>>
where
    N: NodeLabel + Serialize + DeserializeOwned,
{
    let (graph, positions) = load_document::<N>(&args.input.graph)?;
    let positions = require_positions(positions, &args.input.graph)?;
    let dual = dual_graph(&graph, &positions)?;
    info!(faces = dual.len(), dual_edges = dual.graph().edges().len(), "extracted dual");
    write_report(args.input.out.as_deref(), &DualReport::new(&graph, &dual))
}
