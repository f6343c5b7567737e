use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use unfold_zdd::graph::{read_grh, Graph};
use unfold_zdd::io::{
    read_automorphisms, read_edge_sets, Automorphisms, Phase4, Phase5, Phase6, Report,
};
use unfold_zdd::pipeline::{run, Pipeline, MAX_EDGES};

#[derive(Parser)]
#[command(
    name = "core",
    version,
    about = "Count spanning trees, non-overlapping unfoldings and their symmetry classes for a polyhedron graph"
)]
struct Cli {
    /// Input polyhedron graph (.grh)
    polyhedron: PathBuf,

    /// Minimal overlapping edge sets, one JSON object per line
    edge_sets: Option<PathBuf>,

    /// Automorphism group file (JSON) enabling the Burnside phase
    #[arg(long, value_name = "FILE")]
    automorphisms: Option<PathBuf>,

    /// Partition the run over the 2^d assignments of the top d edges
    #[arg(long, value_name = "D", default_value_t = 0)]
    split_depth: usize,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    // Argument errors exit with status 1 like every other input error;
    // help and version keep clap's behaviour.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            e.print()?;
            std::process::exit(1);
        }
    };

    let graph = load_graph(&cli.polyhedron)?;
    let num_edges = graph.num_edges();
    log::info!(
        "loaded {:?}: {} vertices, {} edges",
        cli.polyhedron,
        graph.num_vertices(),
        num_edges
    );

    if num_edges > MAX_EDGES {
        return Err(eyre!(
            "edge count ({}) exceeds maximum supported ({})",
            num_edges,
            MAX_EDGES
        ));
    }
    if cli.split_depth > 30 {
        return Err(eyre!("split-depth must be between 0 and 30"));
    }
    if cli.split_depth > 0 && cli.split_depth >= num_edges {
        return Err(eyre!(
            "split-depth ({}) must be less than the edge count ({})",
            cli.split_depth,
            num_edges
        ));
    }

    let mopes = match &cli.edge_sets {
        Some(path) => Some(load_mopes(path, num_edges)?),
        None => None,
    };
    let automorphisms = match &cli.automorphisms {
        Some(path) => Some(load_automorphisms(path, num_edges)?),
        None => None,
    };

    let outcome = run(&Pipeline {
        graph: &graph,
        mopes: mopes.as_deref(),
        automorphisms: automorphisms.as_ref(),
        split_depth: cli.split_depth,
    });

    let filter_applied = mopes.is_some();
    let report = Report {
        input_file: cli.polyhedron.display().to_string(),
        vertices: graph.num_vertices(),
        edges: num_edges,
        split_depth: (cli.split_depth > 0).then_some(cli.split_depth),
        phase4: Phase4 {
            build_time_ms: round_ms(outcome.build_time_ms),
            spanning_tree_count: outcome.spanning_tree_count.to_str_radix(10),
        },
        phase5: Phase5 {
            filter_applied,
            num_mopes: mopes.as_ref().map(Vec::len),
            subset_time_ms: filter_applied.then_some(round_ms(outcome.subset_time_ms)),
            non_overlapping_count: filter_applied
                .then(|| outcome.non_overlapping_count.to_str_radix(10)),
        },
        phase6: match (&automorphisms, outcome.burnside) {
            (Some(auto), Some(summary)) => Some(Phase6 {
                burnside_applied: true,
                group_order: auto.group_order,
                burnside_time_ms: round_ms(outcome.burnside_time_ms),
                burnside_sum: summary.sum.to_str_radix(10),
                nonisomorphic_count: summary.nonisomorphic_count.to_str_radix(10),
                invariant_counts: summary
                    .invariant_counts
                    .iter()
                    .map(|c| c.to_str_radix(10))
                    .collect(),
            }),
            _ => None,
        },
    };

    let stdout = std::io::stdout();
    writeln!(stdout.lock(), "{}", serde_json::to_string_pretty(&report)?)?;
    Ok(())
}

fn load_graph(path: &PathBuf) -> Result<Graph> {
    let file = File::open(path).map_err(|e| eyre!("cannot open {:?}: {}", path, e))?;
    read_grh(file).map_err(|e| eyre!("{:?}: {}", path, e))
}

fn load_mopes(path: &PathBuf, num_edges: usize) -> Result<Vec<Vec<usize>>> {
    let file = File::open(path).map_err(|e| eyre!("cannot open {:?}: {}", path, e))?;
    let mopes = read_edge_sets(file).map_err(|e| eyre!("{:?}: {}", path, e))?;
    for (i, mope) in mopes.iter().enumerate() {
        if let Some(&bad) = mope.iter().find(|&&e| e >= num_edges) {
            return Err(eyre!(
                "{:?}: edge set {} references edge {} but the graph has {} edges",
                path,
                i,
                bad,
                num_edges
            ));
        }
    }
    if mopes.is_empty() {
        log::warn!("no edge sets loaded from {:?}", path);
    }
    Ok(mopes)
}

fn load_automorphisms(path: &PathBuf, num_edges: usize) -> Result<Automorphisms> {
    let file = File::open(path).map_err(|e| eyre!("cannot open {:?}: {}", path, e))?;
    read_automorphisms(file, num_edges).map_err(|e| eyre!("{:?}: {}", path, e))
}

fn round_ms(ms: f64) -> f64 {
    (ms * 100.0).round() / 100.0
}
