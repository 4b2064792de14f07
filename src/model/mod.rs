use serde::Deserialize;

/// Read-only view over an exported LDtk project.
///
/// Only the handful of fields the diagnostics look at are kept; everything
/// else in the file is ignored by serde.
#[derive(Debug, Clone, Deserialize)]
pub struct LdtkProject {
    pub levels: Vec<Level>,
    #[serde(default)]
    pub defs: Defs,
}

impl LdtkProject {
    /// Chunk files hold exactly one level; the rest are ignored.
    pub fn first_level(&self) -> Option<&Level> {
        self.levels.first()
    }

    pub fn tileset(&self, uid: i64) -> Option<&TilesetDef> {
        self.defs.tilesets.iter().find(|t| t.uid == uid)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Defs {
    #[serde(default)]
    pub tilesets: Vec<TilesetDef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Level {
    pub identifier: String,
    #[serde(rename = "pxWid")]
    pub px_wid: i64,
    #[serde(rename = "pxHei")]
    pub px_hei: i64,
    /// Null in the file when the level is saved separately.
    #[serde(rename = "layerInstances", default, deserialize_with = "null_as_empty")]
    pub layer_instances: Vec<LayerInstance>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum LayerType {
    Tiles,
    IntGrid,
    Entities,
    AutoLayer,
}

impl std::fmt::Display for LayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LayerType::Tiles => "Tiles",
            LayerType::IntGrid => "IntGrid",
            LayerType::Entities => "Entities",
            LayerType::AutoLayer => "AutoLayer",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LayerInstance {
    #[serde(rename = "__identifier")]
    pub identifier: String,
    #[serde(rename = "__type")]
    pub layer_type: LayerType,
    #[serde(rename = "__gridSize")]
    pub grid_size: i64,
    #[serde(rename = "__cWid")]
    pub c_wid: i64,
    #[serde(rename = "__cHei")]
    pub c_hei: i64,
    #[serde(rename = "__tilesetDefUid", default)]
    pub tileset_def_uid: Option<i64>,
}

impl LayerInstance {
    /// Width and height covered by the layer, in pixels.
    /// `None` when the file holds sizes too large to multiply.
    pub fn pixel_size(&self) -> Option<(i64, i64)> {
        Some((
            self.c_wid.checked_mul(self.grid_size)?,
            self.c_hei.checked_mul(self.grid_size)?,
        ))
    }

    pub fn cell_count(&self) -> Option<i64> {
        self.c_wid.checked_mul(self.c_hei)
    }

    /// Tiles and IntGrid layers are the ones laid out on the level grid.
    pub fn is_grid_layer(&self) -> bool {
        matches!(self.layer_type, LayerType::Tiles | LayerType::IntGrid)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TilesetDef {
    pub identifier: String,
    pub uid: i64,
    #[serde(rename = "relPath", default)]
    pub rel_path: Option<String>,
    #[serde(rename = "tileGridSize")]
    pub tile_grid_size: i64,
    #[serde(rename = "pxWid")]
    pub px_wid: i64,
    #[serde(rename = "pxHei")]
    pub px_hei: i64,
}

impl TilesetDef {
    pub fn tile_columns(&self) -> i64 {
        if self.tile_grid_size > 0 {
            self.px_wid / self.tile_grid_size
        } else {
            0
        }
    }

    pub fn tile_rows(&self) -> i64 {
        if self.tile_grid_size > 0 {
            self.px_hei / self.tile_grid_size
        } else {
            0
        }
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(layer_type: LayerType, c_wid: i64, c_hei: i64, grid_size: i64) -> LayerInstance {
        LayerInstance {
            identifier: "Ground".into(),
            layer_type,
            grid_size,
            c_wid,
            c_hei,
            tileset_def_uid: None,
        }
    }

    #[test]
    fn test_layer_sizes() {
        let l = layer(LayerType::Tiles, 37, 36, 48);
        assert_eq!(l.pixel_size(), Some((1776, 1728)));
        assert_eq!(l.cell_count(), Some(37 * 36));
    }

    #[test]
    fn test_layer_sizes_overflow() {
        let l = layer(LayerType::IntGrid, i64::MAX, 2, 48);
        assert_eq!(l.pixel_size(), None);
        assert_eq!(l.cell_count(), None);

        let tall = layer(LayerType::Tiles, 1, i64::MAX, 2);
        assert_eq!(tall.pixel_size(), None);
        assert_eq!(tall.cell_count(), Some(i64::MAX));
    }

    #[test]
    fn test_grid_layers() {
        assert!(layer(LayerType::Tiles, 1, 1, 1).is_grid_layer());
        assert!(layer(LayerType::IntGrid, 1, 1, 1).is_grid_layer());
        assert!(!layer(LayerType::Entities, 1, 1, 1).is_grid_layer());
        assert!(!layer(LayerType::AutoLayer, 1, 1, 1).is_grid_layer());
    }

    #[test]
    fn test_tileset_tile_counts() {
        let t = TilesetDef {
            identifier: "Forest".into(),
            uid: 7,
            rel_path: None,
            tile_grid_size: 48,
            px_wid: 480,
            px_hei: 500,
        };
        assert_eq!(t.tile_columns(), 10);
        assert_eq!(t.tile_rows(), 10);

        let broken = TilesetDef {
            tile_grid_size: 0,
            ..t
        };
        assert_eq!(broken.tile_columns(), 0);
    }
}
