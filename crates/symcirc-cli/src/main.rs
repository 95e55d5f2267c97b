//! symcirc command-line tool.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::info;
use symcirc_nodal::{AnalysisKind, NodalAnalysis, NodalOptions};
use symcirc_schematic::{DrawNodes, LabelNodes, Schematic, SchematicOptions, Style};

mod output;

#[derive(Parser)]
#[command(name = "symcirc")]
#[command(about = "Symbolic nodal analysis and schematic drawing for linear circuits")]
#[command(version)]
struct Cli {
    /// Log debug output (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the nodal equations of a netlist
    Nodal {
        /// Netlist file
        #[arg(value_hint = clap::ValueHint::FilePath)]
        netlist: PathBuf,

        /// Analysis domain: laplace, time, phasor or dc
        #[arg(short, long, default_value = "laplace")]
        kind: AnalysisKind,

        /// Print the matrix form A·y = b instead
        #[arg(long)]
        matrix: bool,

        /// Text inserted between V and node names
        #[arg(long, default_value = "")]
        prefix: String,
    },

    /// Print schematic node coordinates
    Layout {
        /// Netlist file
        #[arg(value_hint = clap::ValueHint::FilePath)]
        netlist: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Draw a schematic; the output extension picks the format
    Draw {
        /// Netlist file
        #[arg(value_hint = clap::ValueHint::FilePath)]
        netlist: PathBuf,

        /// Output file (.pytex, .tex, .pdf, .svg or .png)
        #[arg(short, long)]
        output: PathBuf,

        /// american, british or european
        #[arg(long, default_value = "american")]
        style: Style,

        #[arg(long, default_value = "1")]
        scale: f64,

        #[arg(long, default_value = "1")]
        stretch: f64,

        /// Raster density multiplier for PNG
        #[arg(long, default_value = "2")]
        oversample: f64,

        /// none, all, connections or primary
        #[arg(long, default_value = "primary")]
        draw_nodes: DrawNodes,

        /// none, all or primary
        #[arg(long, default_value = "primary")]
        label_nodes: LabelNodes,

        /// Leave component names off
        #[arg(long)]
        no_ids: bool,

        /// Leave component values off
        #[arg(long)]
        no_values: bool,

        /// Keep intermediate .tex and .pdf files
        #[arg(long)]
        keep: bool,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Nodal {
            netlist,
            kind,
            matrix,
            prefix,
        } => cmd_nodal(&netlist, kind, matrix, prefix),
        Commands::Layout { netlist, format } => cmd_layout(&netlist, format),
        Commands::Draw {
            netlist,
            output,
            style,
            scale,
            stretch,
            oversample,
            draw_nodes,
            label_nodes,
            no_ids,
            no_values,
            keep,
        } => {
            let options = SchematicOptions {
                draw_nodes,
                label_nodes,
                label_ids: !no_ids,
                label_values: !no_values,
                style,
                scale,
                stretch,
                oversample,
                keep_intermediate: keep,
            };
            cmd_draw(&netlist, &output, &options)
        }
    }
}

fn read_circuit(path: &Path) -> Result<symcirc_core::Circuit> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read netlist {}", path.display()))?;
    symcirc_parser::parse_circuit(&text).with_context(|| format!("in {}", path.display()))
}

fn cmd_nodal(path: &Path, kind: AnalysisKind, matrix: bool, prefix: String) -> Result<()> {
    let circuit = read_circuit(path)?;
    let options = NodalOptions { node_prefix: prefix };
    let analysis = NodalAnalysis::with_options(&circuit, kind, options)
        .context("nodal analysis failed")?;

    if matrix {
        let equations = analysis
            .equations_matrix()
            .context("cannot form the matrix equations")?;
        print!("{}", equations);
    } else {
        print!("{}", output::equations_text(&analysis));
    }
    Ok(())
}

fn cmd_layout(path: &Path, format: OutputFormat) -> Result<()> {
    let mut schematic = Schematic::from_file(path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    let layout = schematic.layout().context("layout failed")?;

    match format {
        OutputFormat::Text => print!("{}", output::layout_text(layout)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(layout)?),
    }
    Ok(())
}

fn cmd_draw(path: &Path, out: &Path, options: &SchematicOptions) -> Result<()> {
    let mut schematic = Schematic::from_file(path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    schematic
        .draw(out, options)
        .with_context(|| format!("failed to draw {}", out.display()))?;
    info!("wrote {}", out.display());
    Ok(())
}
