use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use gcol_graph::NodeLabel;
use gcol_planar::dual_graph;
use gcol_solve::{
    dual_equitable_face_k_coloring, dual_face_chromatic_number, dual_face_coloring,
    dual_face_k_coloring, dual_face_list_coloring, dual_face_precoloring, SolveConfig,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use super::{load_document, read_json, require_positions, write_report, InputArgs, LabelKind, SolveArgs};
use crate::report::{face_lists, face_map, FaceColor, FaceList, FaceReport};

#[derive(Args, Debug)]
pub struct FacesArgs {
    #[command(flatten)]
    pub input: InputArgs,
    #[command(flatten)]
    pub solve: SolveArgs,
    /// Colour with exactly this many colours.
    #[arg(long)]
    pub k: Option<usize>,
    /// Balance class sizes; requires `--k`.
    #[arg(long, requires = "k")]
    pub equitable: bool,
    /// JSON array of `{"face": [...], "color": c}` fixing some faces.
    #[arg(long, conflicts_with_all = ["lists", "k"])]
    pub precolor: Option<PathBuf>,
    /// JSON array of `{"face": [...], "colors": [...]}` covering every face.
    #[arg(long, conflicts_with = "k")]
    pub lists: Option<PathBuf>,
    /// Also report the exact face chromatic number.
    #[arg(long)]
    pub chromatic: bool,
}

pub fn run(args: &FacesArgs, verbose: u8) -> Result<(), Box<dyn Error>> {
    let config = args.solve.resolve(verbose)?;
    match args.input.labels {
        LabelKind::Index => faces_as::<usize>(args, &config),
        LabelKind::Name => faces_as::<String>(args, &config),
    }
}

fn faces_as<N>(args: &FacesArgs, config: &SolveConfig) -> Result<(), Box<dyn Error>>
where
    N: NodeLabel + Serialize + DeserializeOwned,
{
    let (graph, positions) = load_document::<N>(&args.input.graph)?;
    let positions = require_positions(positions, &args.input.graph)?;
    let dual = dual_graph(&graph, &positions)?;
    let result = match (args.k, &args.precolor, &args.lists) {
        (Some(k), _, _) if args.equitable => dual_equitable_face_k_coloring(&dual, k, config)?,
        (Some(k), _, _) => dual_face_k_coloring(&dual, k, config)?,
        (None, Some(path), _) => {
            let entries: Vec<FaceColor<N>> = read_json(path)?;
            dual_face_precoloring(&dual, &face_map(entries), config)?
        }
        (None, None, Some(path)) => {
            let entries: Vec<FaceList<N>> = read_json(path)?;
            dual_face_list_coloring(&dual, &face_lists(entries), config)?
        }
        (None, None, None) => dual_face_coloring(&dual, config)?,
    };
    let mut report = FaceReport::new(&graph, &dual, &result, config);
    if args.chromatic {
        report.chromatic_number = Some(dual_face_chromatic_number(&dual));
    }
    info!(faces = report.faces, colors = report.colors, "coloured faces");
    write_report(args.input.out.as_deref(), &report)
}
