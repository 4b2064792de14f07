pub mod cli;
pub mod grid;
pub mod model;
pub mod parser;
pub mod report;

use anyhow::{Context, anyhow};
use clap::Parser;

use crate::cli::Command;
use crate::grid::ChunkGrid;

pub fn run() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    // 1. ── Configure ──────────────────────────────────────────────────
    let grid = ChunkGrid::new(args.tile_size, args.chunk_tiles)?;
    let mut out = std::io::stdout().lock();

    // 2. ── Load & report ──────────────────────────────────────────────
    match args.command {
        Command::Sizes { files } => {
            let failed = report::files::sizes(&files, &mut out)?;
            if failed > 0 {
                log::warn!("{} of {} files could not be read", failed, files.len());
            }
        }
        Command::Details { file } => {
            let project = parser::load_file(&file)?;
            report::files::details(&project, &mut out)?;
        }
        Command::Tilesets { file } => {
            let project = parser::load_file(&file)?;
            report::files::tilesets(&project, &mut out)?;
        }
        Command::Chunks {
            file,
            player,
            radius,
            tile,
            world_tiles,
        } => {
            let project = file.as_deref().map(parser::load_file).transpose()?;
            let level = match &project {
                Some(p) => Some(p.first_level().ok_or_else(|| anyhow!("no levels"))?),
                None => None,
            };

            let input = report::chunks::ChunkReport {
                level,
                player: cli::pair(player),
                radius,
                tile: cli::pair(tile),
                world_tiles,
            };
            let clean = report::chunks::visualize(&grid, &input, &mut out)
                .with_context(|| "Writing chunk report")?;
            if !clean {
                log::warn!("chunk layout has mismatches, see report above");
            }
        }
    }

    Ok(())
}
