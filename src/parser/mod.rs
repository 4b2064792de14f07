use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde_json::Value;

use crate::model::LdtkProject;

/// Read and parse an `.ldtk` file from disk.
pub fn load_file(path: &Path) -> Result<LdtkProject> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Reading {}", path.display()))?;
    log::debug!("{}: loaded {} bytes", path.display(), json.len());

    load_from_json(&json).with_context(|| format!("Parsing {}", path.display()))
}

/// Parse the whole input JSON string into an `LdtkProject`.
///
/// The file is expected to contain a top-level non-empty `levels` array.
/// Anything wrong inside a level or layer is reported together with its
/// identifier so the user can find it in the editor.
pub fn load_from_json(json: &str) -> Result<LdtkProject> {
    // Grab the entire file as a dynamic value first.
    let root: Value = serde_json::from_str(json)?;

    let levels = root
        .get("levels")
        .and_then(|v| v.as_array())
        .ok_or_else(|| anyhow!("file has no `levels` array"))?;

    if levels.is_empty() {
        return Err(anyhow!("`levels` array is empty"));
    }
    log::debug!("Found {} levels", levels.len());

    for (i, level) in levels.iter().enumerate() {
        let name = level
            .get("identifier")
            .and_then(|n| n.as_str())
            .ok_or_else(|| anyhow!("level {} missing `identifier` field", i))?;

        let layers = level
            .get("layerInstances")
            .and_then(|v| v.as_array())
            .map(|a| a.as_slice())
            .unwrap_or_default();
        log::debug!("Level {}: {} layers", name, layers.len());

        for (j, layer) in layers.iter().enumerate() {
            let layer_name = layer
                .get("__identifier")
                .and_then(|n| n.as_str())
                .ok_or_else(|| anyhow!("level `{}` layer {} missing `__identifier`", name, j))?;

            serde_json::from_value::<crate::model::LayerInstance>(layer.clone())
                .with_context(|| format!("level `{}` layer `{}`", name, layer_name))?;
        }

        serde_json::from_value::<crate::model::Level>(level.clone())
            .with_context(|| format!("level `{}`", name))?;
    }

    let project: LdtkProject = serde_json::from_value(root)?;
    log::info!(
        "Parsed {} levels, {} tilesets",
        project.levels.len(),
        project.defs.tilesets.len()
    );
    Ok(project)
}
