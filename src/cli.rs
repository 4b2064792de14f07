use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::grid::{CHUNK_SIZE_TILES, TILE_SIZE};
use crate::report::chunks::DEFAULT_RADIUS;

// keeps every rectangle the reports print well inside i64
const MAX_EDGE: i64 = 1 << 16;
const MAX_COORD: i64 = 1 << 40;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Pixels per tile edge
    #[arg(long, global = true, default_value_t = TILE_SIZE,
          value_parser = clap::value_parser!(i64).range(1..=MAX_EDGE))]
    pub tile_size: i64,
    /// Tiles per chunk edge
    #[arg(long, global = true, default_value_t = CHUNK_SIZE_TILES,
          value_parser = clap::value_parser!(i64).range(1..=MAX_EDGE))]
    pub chunk_tiles: i64,
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the pixel size of every chunk file
    Sizes {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print the level and its layers
    Details { file: PathBuf },
    /// Print the tileset definitions
    Tilesets { file: PathBuf },
    /// Simulate chunk placement and check for overlaps
    Chunks {
        /// Chunk file whose level and layers are checked against the grid
        file: Option<PathBuf>,
        /// Player world position in pixels
        #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true,
              value_parser = clap::value_parser!(i64).range(-MAX_COORD..=MAX_COORD))]
        player: Option<Vec<i64>>,
        /// Chunks loaded on each side of the player's chunk
        #[arg(long, default_value_t = DEFAULT_RADIUS,
              value_parser = clap::value_parser!(i64).range(0..=64))]
        radius: i64,
        /// World tile to look up the chunk of
        #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true,
              value_parser = clap::value_parser!(i64).range(-MAX_COORD..=MAX_COORD))]
        tile: Option<Vec<i64>>,
        /// Edge of a square world in tiles; prints the chunk grid covering it
        #[arg(long, value_parser = clap::value_parser!(i64).range(0..=MAX_COORD))]
        world_tiles: Option<i64>,
    },
}

/// Turns a two-value `X Y` argument into a pair.
pub fn pair(values: Option<Vec<i64>>) -> Option<(i64, i64)> {
    match values.as_deref() {
        Some(&[x, y]) => Some((x, y)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunks_flags() {
        let cli = Cli::try_parse_from([
            "ldtk-chunk-inspect", "chunks", "--player", "-10", "5000", "--radius", "5",
            "--tile", "74", "-1", "--world-tiles", "1000",
        ])
        .expect("valid args");

        let Command::Chunks { file, player, radius, tile, world_tiles } = cli.command else {
            panic!("expected chunks subcommand");
        };
        assert!(file.is_none());
        assert_eq!(pair(player), Some((-10, 5000)));
        assert_eq!(radius, 5);
        assert_eq!(pair(tile), Some((74, -1)));
        assert_eq!(world_tiles, Some(1000));
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["ldtk-chunk-inspect", "chunks"]).expect("valid args");
        assert_eq!((cli.tile_size, cli.chunk_tiles), (48, 37));

        let Command::Chunks { radius, .. } = cli.command else {
            panic!("expected chunks subcommand");
        };
        assert_eq!(radius, 1);
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let test_cases: [&[&str]; 4] = [
            &["ldtk-chunk-inspect", "--tile-size", "0", "chunks"],
            &["ldtk-chunk-inspect", "--chunk-tiles", "4611686018427387903", "chunks"],
            &["ldtk-chunk-inspect", "chunks", "--radius", "1000000"],
            &["ldtk-chunk-inspect", "chunks", "--world-tiles", "-5"],
        ];

        for args in test_cases {
            assert!(Cli::try_parse_from(args).is_err(), "accepted {args:?}");
        }
    }
}
