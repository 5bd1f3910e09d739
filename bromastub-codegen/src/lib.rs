//! # bromastub Codegen
//!
//! C++ header and stub-source generation from Broma descriptions.
//!
//! This crate provides:
//! - A line-oriented C++ text writer
//! - Name-based routing of classes into output directories
//! - The header, stub-source and umbrella-header passes
//! - Editor configuration for the generated tree

pub mod classify;
pub mod config;
pub mod error;
pub mod generator;
pub mod headers;
pub mod ide;
pub mod manifest;
pub mod signature;
pub mod sources;
pub mod umbrella;
pub mod writer;

pub use classify::{ClassCategory, classify};
pub use config::GeneratorConfig;
pub use error::CodegenError;
pub use generator::{GenerationReport, Generator};
pub use manifest::{Manifest, OutputRecord};
pub use writer::LineWriter;

use std::path::{Path, PathBuf};

/// Description files read when none are given.
pub const DEFAULT_INPUTS: &[&str] = &[
    ".temp/Cocos2d.bro",
    ".temp/GeometryDash.bro",
    ".temp/Extras.bro",
];

/// Returns [`DEFAULT_INPUTS`] as paths.
#[must_use]
pub fn default_inputs() -> Vec<PathBuf> {
    DEFAULT_INPUTS.iter().map(PathBuf::from).collect()
}

/// Concatenates description files in order, each followed by a newline.
///
/// # Errors
/// Returns `CodegenError::InputMissing` if any path does not exist, checked
/// before anything is read, or `CodegenError::Io` if a read fails.
pub fn read_sources<P: AsRef<Path>>(paths: &[P]) -> Result<String, CodegenError> {
    if let Some(missing) = paths.iter().find(|p| !p.as_ref().exists()) {
        return Err(CodegenError::InputMissing {
            path: missing.as_ref().to_path_buf(),
        });
    }

    let mut merged = String::new();
    for path in paths {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| CodegenError::io(path, e))?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "read description");
        merged.push_str(&text);
        merged.push('\n');
    }
    Ok(merged)
}

/// Parses a description and writes the full output tree.
///
/// # Errors
/// Returns `CodegenError` if parsing or any write fails.
pub fn generate_from_str(
    source: &str,
    config: GeneratorConfig,
) -> Result<GenerationReport, CodegenError> {
    let root = bromastub_schema::parse(source)?;
    tracing::info!(
        classes = root.classes.len(),
        functions = root.functions.len(),
        "parsed description"
    );
    Generator::with_config(&root, config).run()
}

/// Reads, concatenates and generates from description files.
///
/// # Errors
/// Returns `CodegenError` if an input is missing, or if reading, parsing or
/// writing fails. Nothing is written when an input is missing.
pub fn generate_from_files<P: AsRef<Path>>(
    paths: &[P],
    config: GeneratorConfig,
) -> Result<GenerationReport, CodegenError> {
    let source = read_sources(paths)?;
    generate_from_str(&source, config)
}
