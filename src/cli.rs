use crate::config::load_config;
use crate::ir::BoardGraph;
use crate::layout::compute_layout;
use crate::layout_dump::write_layout_dump;
use crate::render::emit_draw_ops;
use anyhow::Result;
use clap::Parser;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "bwire", version, about = "Board wiring diagram layout engine")]
pub struct Args {
    /// Board graph JSON file, or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file for the draw-op list. Defaults to stdout.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Config JSON/JSON5 file (theme and layout overrides)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Also write a layout debug dump to this path
    #[arg(long = "dump-layout")]
    pub dump_layout: Option<PathBuf>,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let input = read_input(args.input.as_deref())?;
    let graph: BoardGraph = serde_json::from_str(&input)?;

    let layout = compute_layout(&graph, &config.theme, &config.layout)?;
    let ops = emit_draw_ops(&graph, &layout, &config.theme, &config.layout)?;

    if let Some(path) = args.dump_layout.as_deref() {
        write_layout_dump(path, &layout, &graph)?;
    }

    let serialized = serde_json::to_string_pretty(&ops)?;
    match args.output.as_deref() {
        Some(path) => std::fs::write(path, serialized)?,
        None => println!("{serialized}"),
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
