//! Per-file reports: level sizes, layer details, tileset definitions.

use std::io::{self, Write};
use std::path::PathBuf;

use super::display_name;
use crate::model::LdtkProject;
use crate::parser;

/// One line per file with the pixel size of its first level.
///
/// A file that cannot be read is reported inline and the batch moves on.
/// Returns how many files failed.
pub fn sizes(paths: &[PathBuf], out: &mut impl Write) -> io::Result<usize> {
    let mut failed = 0;

    for path in paths {
        let name = display_name(path);
        let level = parser::load_file(path).and_then(|p| {
            p.first_level()
                .map(|l| (l.px_wid, l.px_hei))
                .ok_or_else(|| anyhow::anyhow!("no levels"))
        });

        match level {
            Ok((w, h)) => writeln!(out, "{name}: {w}x{h} pixels")?,
            Err(e) => {
                log::warn!("{}: {:#}", path.display(), e);
                writeln!(out, "{name}: ERROR - {e:#}")?;
                failed += 1;
            }
        }
    }

    Ok(failed)
}

/// Level size and every layer's grid, with the tileset each one draws from.
pub fn details(project: &LdtkProject, out: &mut impl Write) -> io::Result<()> {
    let Some(level) = project.first_level() else {
        return writeln!(out, "No levels in file");
    };

    writeln!(out, "Level: {}", level.identifier)?;
    writeln!(out, "Pixel dimensions: {}x{}", level.px_wid, level.px_hei)?;
    writeln!(out)?;
    writeln!(out, "Layers:")?;

    for layer in &level.layer_instances {
        writeln!(out, "  - {} ({})", layer.identifier, layer.layer_type)?;
        writeln!(out, "    Grid size: {}px", layer.grid_size)?;
        writeln!(
            out,
            "    Cell dimensions: {}x{} cells",
            layer.c_wid, layer.c_hei
        )?;
        match layer.cell_count() {
            Some(cells) => writeln!(
                out,
                "    Total grid: {} * {} = {} tiles",
                layer.c_wid, layer.c_hei, cells
            )?,
            None => {
                log::warn!("layer {}: cell count overflows", layer.identifier);
                writeln!(out, "    ERROR - cell count of {} overflows", layer.identifier)?;
            }
        }

        // uid 0 is a valid tileset
        if let Some(tileset) = layer.tileset_def_uid.and_then(|uid| project.tileset(uid)) {
            writeln!(
                out,
                "    Tileset: {} ({}px tiles)",
                tileset.identifier, tileset.tile_grid_size
            )?;
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Every tileset definition with its image size and tile count.
pub fn tilesets(project: &LdtkProject, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Tilesets:")?;

    for t in &project.defs.tilesets {
        writeln!(out, "  - {}", t.identifier)?;
        writeln!(out, "    UID: {}", t.uid)?;
        writeln!(out, "    Path: {}", t.rel_path.as_deref().unwrap_or("<none>"))?;
        writeln!(out, "    Tile grid size: {}px", t.tile_grid_size)?;
        writeln!(out, "    Image size: {}x{}px", t.px_wid, t.px_hei)?;
        writeln!(out, "    Tiles: {}x{}", t.tile_columns(), t.tile_rows())?;
        writeln!(out)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::load_from_json;

    const PROJECT: &str = r#"{
        "levels": [{
            "identifier": "Dark_Forest_1",
            "pxWid": 1776,
            "pxHei": 1776,
            "layerInstances": [
                { "__identifier": "Entities", "__type": "Entities", "__gridSize": 48,
                  "__cWid": 37, "__cHei": 37, "__tilesetDefUid": null },
                { "__identifier": "Ground", "__type": "Tiles", "__gridSize": 48,
                  "__cWid": 37, "__cHei": 37, "__tilesetDefUid": 12 }
            ]
        }],
        "defs": { "tilesets": [
            { "identifier": "Forest_tiles", "uid": 12, "relPath": "../tiles/forest.png",
              "tileGridSize": 48, "pxWid": 768, "pxHei": 1536 }
        ]}
    }"#;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).expect("write to vec");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn test_details_lists_layers_and_tilesets() {
        let p = load_from_json(PROJECT).unwrap();
        let text = render(|out| details(&p, out));

        assert!(text.starts_with("Level: Dark_Forest_1\nPixel dimensions: 1776x1776\n"));
        assert!(text.contains("  - Entities (Entities)\n"));
        assert!(text.contains("  - Ground (Tiles)\n"));
        assert!(text.contains("    Total grid: 37 * 37 = 1369 tiles\n"));
        assert!(text.contains("    Tileset: Forest_tiles (48px tiles)\n"));
        assert_eq!(text.matches("Tileset:").count(), 1);
    }

    #[test]
    fn test_details_reports_overflowing_layer_and_continues() {
        let json = r#"{ "levels": [{
            "identifier": "Broken", "pxWid": 1776, "pxHei": 1776,
            "layerInstances": [
                { "__identifier": "Huge", "__type": "IntGrid", "__gridSize": 48,
                  "__cWid": 9223372036854775807, "__cHei": 2 },
                { "__identifier": "Ground", "__type": "Tiles", "__gridSize": 48,
                  "__cWid": 37, "__cHei": 37 }
            ]
        }]}"#;
        let p = load_from_json(json).unwrap();
        let text = render(|out| details(&p, out));

        assert!(text.contains("    ERROR - cell count of Huge overflows\n"));
        assert!(text.contains("  - Ground (Tiles)\n"));
        assert!(text.contains("    Total grid: 37 * 37 = 1369 tiles\n"));
    }

    #[test]
    fn test_details_resolves_tileset_uid_zero() {
        let json = r#"{
            "levels": [{ "identifier": "L", "pxWid": 48, "pxHei": 48,
                "layerInstances": [{ "__identifier": "Ground", "__type": "Tiles",
                    "__gridSize": 48, "__cWid": 1, "__cHei": 1, "__tilesetDefUid": 0 }] }],
            "defs": { "tilesets": [{ "identifier": "First", "uid": 0,
                "tileGridSize": 16, "pxWid": 16, "pxHei": 16 }] }
        }"#;
        let p = load_from_json(json).unwrap();
        let text = render(|out| details(&p, out));

        assert!(text.contains("    Tileset: First (16px tiles)\n"));
    }

    #[test]
    fn test_tilesets_report() {
        let p = load_from_json(PROJECT).unwrap();
        let text = render(|out| tilesets(&p, out));

        assert!(text.contains("  - Forest_tiles\n"));
        assert!(text.contains("    UID: 12\n"));
        assert!(text.contains("    Path: ../tiles/forest.png\n"));
        assert!(text.contains("    Image size: 768x1536px\n"));
        assert!(text.contains("    Tiles: 16x32\n"));
    }

    #[test]
    fn test_sizes_continues_past_missing_file() {
        let dir = std::env::temp_dir().join(format!("ldtk-sizes-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let good = dir.join("chunk1.ldtk");
        std::fs::write(&good, PROJECT).unwrap();
        let missing = dir.join("chunk2.ldtk");

        let mut failed = 0;
        let text = render(|out| {
            failed = sizes(&[missing.clone(), good.clone()], out)?;
            Ok(())
        });

        assert_eq!(failed, 1);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("chunk2.ldtk: ERROR - Reading"), "got {}", lines[0]);
        assert_eq!(lines[1], "chunk1.ldtk: 1776x1776 pixels");

        std::fs::remove_dir_all(&dir).ok();
    }
}
