//! Chunk placement simulation and per-layer size analysis.

use std::io::{self, Write};

use super::{heading, yes_no};
use crate::grid::{self, ChunkCoord, ChunkGrid};
use crate::model::Level;

/// Chunks shown in the positioning simulation.
const SIMULATED: &[(i64, i64, &str)] = &[
    (0, 0, "Spawn chunk"),
    (1, 0, "East of spawn"),
    (0, 1, "South of spawn"),
    (-1, 0, "West of spawn"),
    (0, -1, "North of spawn"),
];

/// Chunks loaded on each side of the player's chunk by the streaming system.
pub const DEFAULT_RADIUS: i64 = 1;

/// What the caller wants analysed besides the grid itself.
#[derive(Debug)]
pub struct ChunkReport<'a> {
    pub level: Option<&'a Level>,
    pub player: Option<(i64, i64)>,
    pub radius: i64,
    pub tile: Option<(i64, i64)>,
    pub world_tiles: Option<i64>,
}

impl Default for ChunkReport<'_> {
    fn default() -> Self {
        Self {
            level: None,
            player: None,
            radius: DEFAULT_RADIUS,
            tile: None,
            world_tiles: None,
        }
    }
}

/// Full visualisation. Returns `true` when nothing overlapped or mismatched.
pub fn visualize(
    g: &ChunkGrid,
    input: &ChunkReport<'_>,
    out: &mut impl Write,
) -> io::Result<bool> {
    let mut clean = true;
    let size = g.chunk_size_pixels();

    heading(out, "CHUNK SYSTEM VISUALIZATION")?;
    writeln!(out, "Tile size: {}px", g.tile_size())?;
    writeln!(out, "Chunk size: {} tiles ({}px)", g.chunk_size_tiles(), size)?;
    writeln!(out)?;

    if let Some(level) = input.level {
        let matches = level.px_wid == size && level.px_hei == size;
        writeln!(out, "Level {}:", level.identifier)?;
        writeln!(out, "  Level size: {}x{} pixels", level.px_wid, level.px_hei)?;
        writeln!(out, "  Expected: {size}x{size} pixels")?;
        writeln!(out, "  Match: {}", yes_no(matches))?;
        writeln!(out)?;
        clean &= matches;
    }

    positions(g, out)?;
    clean &= overlap_check(g, out)?;

    if let Some((px, py)) = input.player {
        player_neighbourhood(g, px, py, input.radius, out)?;
    }

    if let Some((tx, ty)) = input.tile {
        let c = g.chunk_at_tile(tx, ty);
        writeln!(out, "Tile ({tx}, {ty}) is in chunk ({}, {})", c.x, c.y)?;
        writeln!(out)?;
    }

    if let Some(tiles) = input.world_tiles {
        clean &= world_coverage(g, tiles, out)?;
    }

    if let Some(level) = input.level {
        clean &= layer_analysis(level, out)?;
    }

    Ok(clean)
}

fn positions(g: &ChunkGrid, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Chunk positioning simulation:")?;
    writeln!(out)?;

    for &(cx, cy, label) in SIMULATED {
        let r = g.rectangle_of(cx, cy);
        writeln!(out, "Chunk ({cx:2},{cy:2}) - {label:15}")?;
        writeln!(out, "  Position: ({:6}, {:6})", r.x, r.y)?;
        writeln!(
            out,
            "  Coverage: X=[{:6}, {:6}), Y=[{:6}, {:6})",
            r.x,
            r.end_x(),
            r.y,
            r.end_y()
        )?;
        writeln!(out)?;
    }
    Ok(())
}

/// Checks both axes of the spawn chunk against its east and south neighbours.
fn overlap_check(g: &ChunkGrid, out: &mut impl Write) -> io::Result<bool> {
    heading(out, "OVERLAP CHECK")?;

    let spawn = g.rectangle_of(0, 0);
    let east = g.rectangle_of(1, 0);
    let south = g.rectangle_of(0, 1);

    let horizontal = grid::check_overlap(&spawn, &east);
    let vertical = grid::check_overlap(&spawn, &south);

    writeln!(out, "Chunk (0,0) X range: [{}, {})", spawn.x, spawn.end_x())?;
    writeln!(out, "Chunk (1,0) X range: [{}, {})", east.x, east.end_x())?;
    writeln!(out, "Do they overlap? {}", yes_no(horizontal.overlaps))?;
    writeln!(out, "Gap between them: {} pixels", horizontal.gap_x)?;
    writeln!(out)?;
    writeln!(out, "Chunk (0,0) Y range: [{}, {})", spawn.y, spawn.end_y())?;
    writeln!(out, "Chunk (0,1) Y range: [{}, {})", south.y, south.end_y())?;
    writeln!(out, "Do they overlap? {}", yes_no(vertical.overlaps))?;
    writeln!(out, "Gap between them: {} pixels", vertical.gap_y)?;
    writeln!(out)?;

    let clean = !horizontal.overlaps
        && !vertical.overlaps
        && horizontal.gap_x == 0
        && vertical.gap_y == 0;
    if clean {
        writeln!(out, "No overlap (gap = 0): positioning math is sound")?;
    } else {
        writeln!(out, "OVERLAP OR GAP DETECTED in positioning math")?;
    }
    writeln!(out)?;

    Ok(clean)
}

fn player_neighbourhood(
    g: &ChunkGrid,
    px: i64,
    py: i64,
    radius: i64,
    out: &mut impl Write,
) -> io::Result<()> {
    let center = g.chunk_at_pixel(px, py);
    let side = 2 * radius.max(0) + 1;

    heading(out, "PLAYER NEIGHBOURHOOD")?;
    writeln!(out, "Player position: ({px}, {py})")?;
    writeln!(out, "Player chunk: ({}, {})", center.x, center.y)?;
    writeln!(out)?;
    writeln!(out, "{side}x{side} chunk grid positions:")?;

    for coord in grid::neighbourhood(center, radius) {
        let ChunkCoord { x, y } = coord;
        let r = g.rectangle_of_coord(coord);
        writeln!(out, "  Chunk ({x},{y}): worldX={}, worldY={}", r.x, r.y)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Chunk grid needed to cover a square world. `false` if it cannot be measured.
fn world_coverage(g: &ChunkGrid, tiles: i64, out: &mut impl Write) -> io::Result<bool> {
    heading(out, "WORLD COVERAGE")?;

    let Some((wide, high)) = g.chunks_covering(tiles) else {
        log::warn!("world of {} tiles overflows pixel space", tiles);
        writeln!(out, "World: {tiles} tiles is too large to measure")?;
        writeln!(out)?;
        return Ok(false);
    };

    writeln!(out, "World: {} tiles ({}px)", tiles, tiles.max(0) * g.tile_size())?;
    writeln!(out, "Chunks: {wide}x{high} grid, {} total", wide * high)?;
    writeln!(out)?;
    Ok(true)
}

/// Flags every Tiles / IntGrid layer whose pixel size differs from the level.
fn layer_analysis(level: &Level, out: &mut impl Write) -> io::Result<bool> {
    heading(out, &format!("LAYER ANALYSIS FOR {}", level.identifier))?;

    let mut clean = true;
    for layer in level.layer_instances.iter().filter(|l| l.is_grid_layer()) {
        writeln!(out, "Layer: {}", layer.identifier)?;
        writeln!(out, "  Type: {}", layer.layer_type)?;
        writeln!(out, "  Grid size: {}px", layer.grid_size)?;
        writeln!(out, "  Dimensions: {}x{} cells", layer.c_wid, layer.c_hei)?;

        let Some((w, h)) = layer.pixel_size() else {
            log::warn!("layer {}: pixel size overflows", layer.identifier);
            writeln!(out, "  ERROR - pixel size of {} overflows", layer.identifier)?;
            writeln!(out)?;
            clean = false;
            continue;
        };
        writeln!(out, "  Pixel size: {w}x{h}px")?;

        let ok = grid::cross_check_against_source(
            level.px_wid,
            level.px_hei,
            layer.c_wid,
            layer.c_hei,
            layer.grid_size,
        );
        if ok {
            writeln!(out, "  OK: matches level size")?;
        } else {
            log::warn!(
                "layer {} is {}x{}px in a {}x{}px level",
                layer.identifier,
                w,
                h,
                level.px_wid,
                level.px_hei
            );
            writeln!(
                out,
                "  MISMATCH! Expected {}x{}px",
                level.px_wid, level.px_hei
            )?;
            clean = false;
        }
        writeln!(out)?;
    }

    Ok(clean)
}
