//! Show layer metadata of a PSD document.

use std::path::PathBuf;

use rateposter_layers::{try_extract_layers, LayerDocument};

pub fn run(path: PathBuf, json: bool) -> anyhow::Result<()> {
    let document = try_extract_layers(&path).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Layer extraction failed");
        anyhow::anyhow!("Failed to read layers: {e}")
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else {
        print_table(&path, &document);
    }
    Ok(())
}

fn print_table(path: &std::path::Path, document: &LayerDocument) {
    println!("Document: {}", path.display());
    println!("  Size: {}x{}", document.width, document.height);
    println!("  Entries: {}", document.layers.len());
    println!();

    for layer in &document.layers {
        let indent = "  ".repeat(layer.depth + 1);
        let marker = if layer.visible { "●" } else { "○" };
        println!(
            "{indent}{marker} {} [{}] {}x{} at ({}, {}) opacity {}",
            layer.name,
            layer.kind.as_str(),
            layer.width,
            layer.height,
            layer.left,
            layer.top,
            layer.opacity
        );
    }
}
