//! Chunk grid math: maps chunk coordinates to world-pixel rectangles.
//!
//! Every chunk is the same square, `tile_size * chunk_size_tiles` pixels on a
//! side, so the lattice partitions the plane. All intervals are half-open:
//! a chunk covers `[x, x + width)` and `[y, y + height)`.

use anyhow::{Result, ensure};

// numeric constants the game ships with
pub const TILE_SIZE: i64 = 48;
pub const CHUNK_SIZE_TILES: i64 = 37;

/// Axis-aligned, half-open pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Rect {
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub fn end_x(&self) -> i64 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn end_y(&self) -> i64 {
        self.y + self.height
    }
}

/// Position of a chunk on the (unbounded) chunk lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkCoord {
    pub x: i64,
    pub y: i64,
}

impl ChunkCoord {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Result of comparing two rectangles.
///
/// `gap_x` / `gap_y` are measured from the end of the first rectangle to the
/// start of the second: 0 means exactly adjacent, positive a gap, negative
/// an overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap {
    pub overlaps: bool,
    pub gap_x: i64,
    pub gap_y: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkGrid {
    tile_size: i64,
    chunk_size_tiles: i64,
}

impl Default for ChunkGrid {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            chunk_size_tiles: CHUNK_SIZE_TILES,
        }
    }
}

impl ChunkGrid {
    /// Both constants must be positive.
    pub fn new(tile_size: i64, chunk_size_tiles: i64) -> Result<Self> {
        ensure!(tile_size > 0, "tile size must be positive, got {tile_size}");
        ensure!(
            chunk_size_tiles > 0,
            "chunk size must be positive, got {chunk_size_tiles} tiles"
        );
        ensure!(
            tile_size.checked_mul(chunk_size_tiles).is_some(),
            "chunk of {chunk_size_tiles} tiles at {tile_size}px does not fit in an i64"
        );
        Ok(Self {
            tile_size,
            chunk_size_tiles,
        })
    }

    pub fn tile_size(&self) -> i64 {
        self.tile_size
    }

    pub fn chunk_size_tiles(&self) -> i64 {
        self.chunk_size_tiles
    }

    pub fn chunk_size_pixels(&self) -> i64 {
        self.tile_size * self.chunk_size_tiles
    }

    /// World rectangle occupied by chunk `(chunk_x, chunk_y)`.
    pub fn rectangle_of(&self, chunk_x: i64, chunk_y: i64) -> Rect {
        let size = self.chunk_size_pixels();
        Rect::new(chunk_x * size, chunk_y * size, size, size)
    }

    pub fn rectangle_of_coord(&self, coord: ChunkCoord) -> Rect {
        self.rectangle_of(coord.x, coord.y)
    }

    /// Chunk containing the world pixel `(px, py)`. Floors, so `-1` is in chunk `-1`.
    pub fn chunk_at_pixel(&self, px: i64, py: i64) -> ChunkCoord {
        let size = self.chunk_size_pixels();
        ChunkCoord::new(px.div_euclid(size), py.div_euclid(size))
    }

    /// Chunk containing the world tile `(tx, ty)`.
    pub fn chunk_at_tile(&self, tx: i64, ty: i64) -> ChunkCoord {
        ChunkCoord::new(
            tx.div_euclid(self.chunk_size_tiles),
            ty.div_euclid(self.chunk_size_tiles),
        )
    }

    /// Number of chunks (wide, high) needed to cover a square world of
    /// `world_size_tiles` tiles per edge. `None` if the world is too large
    /// to measure in pixels.
    pub fn chunks_covering(&self, world_size_tiles: i64) -> Option<(i64, i64)> {
        let world_px = world_size_tiles.max(0).checked_mul(self.tile_size)?;
        let size = self.chunk_size_pixels();
        let n = world_px / size + i64::from(world_px % size != 0);
        Some((n, n))
    }
}

/// The `(2r + 1)²` chunks around `center`, dx outer and dy inner.
pub fn neighbourhood(center: ChunkCoord, radius: i64) -> Vec<ChunkCoord> {
    let radius = radius.max(0);
    let side = (2 * radius + 1) as usize;
    let mut out = Vec::with_capacity(side * side);
    for dx in -radius..=radius {
        for dy in -radius..=radius {
            out.push(ChunkCoord::new(center.x + dx, center.y + dy));
        }
    }
    out
}

/// Half-open overlap test. Touching edges do not overlap.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.end_x() && b.x < a.end_x() && a.y < b.end_y() && b.y < a.end_y()
}

/// Signed horizontal gap from the end of `a` to the start of `b`.
pub fn gap_x(a: &Rect, b: &Rect) -> i64 {
    b.x - a.end_x()
}

/// Signed vertical gap from the end of `a` to the start of `b`.
pub fn gap_y(a: &Rect, b: &Rect) -> i64 {
    b.y - a.end_y()
}

pub fn check_overlap(a: &Rect, b: &Rect) -> Overlap {
    Overlap {
        overlaps: overlaps(a, b),
        gap_x: gap_x(a, b),
        gap_y: gap_y(a, b),
    }
}

/// True iff a layer of `cell_w × cell_h` cells at `grid_size` px per cell
/// spans exactly `level_w × level_h` pixels.
pub fn cross_check_against_source(
    level_w: i64,
    level_h: i64,
    cell_w: i64,
    cell_h: i64,
    grid_size: i64,
) -> bool {
    cell_w.checked_mul(grid_size) == Some(level_w)
        && cell_h.checked_mul(grid_size) == Some(level_h)
}
