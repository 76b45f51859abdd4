//! JSON metadata written next to each preview

use std::path::Path;

use serde::Serialize;

use crate::{
    algorithm::{
        executor::{Composition, FoldTargets},
        fold::Crease,
        strategy::FoldStrategy,
    },
    analysis::traits::Traits,
    io::error::{FoldfieldError, Result},
    palette::Palette,
    spatial::GridLayout,
};

/// Serializable view of a composition
#[derive(Debug, Serialize)]
pub struct CompositionRecord<'a> {
    /// Seed
    pub seed: i64,
    /// Trait strings and counts
    pub traits: Traits,
    /// Solved grid
    pub layout: &'a GridLayout,
    /// Strategy with its parameters
    pub strategy: &'a FoldStrategy,
    /// Resolved colours
    pub palette: &'a Palette,
    /// First and last fold targets
    pub fold_targets: &'a FoldTargets,
    /// Density level per cell, row by row
    pub levels: Vec<Vec<u8>>,
    /// Registered creases
    pub creases: &'a [Crease],
}

impl<'a> CompositionRecord<'a> {
    /// Borrow a composition for serialization
    pub fn new(composition: &'a Composition) -> Self {
        let levels = composition
            .density
            .levels
            .rows()
            .into_iter()
            .map(|row| row.to_vec())
            .collect();

        Self {
            seed: composition.seed,
            traits: composition.traits(),
            layout: &composition.layout,
            strategy: &composition.strategy,
            palette: &composition.palette,
            fold_targets: &composition.fold_targets,
            levels,
            creases: &composition.creases,
        }
    }
}

/// Pretty-printed JSON for a composition
///
/// # Errors
///
/// Returns an error if the record cannot be encoded
pub fn composition_json(composition: &Composition) -> Result<String> {
    Ok(serde_json::to_string_pretty(&CompositionRecord::new(
        composition,
    ))?)
}

/// Write the composition metadata to `output_path`
///
/// # Errors
///
/// Returns an error if:
/// - The record cannot be encoded
/// - The parent directory cannot be created
/// - The file cannot be written
pub fn export_metadata_json(composition: &Composition, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&CompositionRecord::new(composition)).map_err(
        |e| FoldfieldError::Serialization {
            path: output_path.to_path_buf(),
            source: e,
        },
    )?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| FoldfieldError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    std::fs::write(output_path, json).map_err(|e| FoldfieldError::FileSystem {
        path: output_path.to_path_buf(),
        operation: "write metadata",
        source: e,
    })?;

    Ok(())
}
