//! Full pipeline: headers, stub sources, umbrella header, IDE settings.

use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::headers::HeaderGenerator;
use crate::ide::write_ide_config;
use crate::sources::generate_sources;
use crate::umbrella::write_umbrella;
use bromastub_schema::{Diagnostic, Root, validate};
use std::path::PathBuf;

/// What a generation run wrote.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Class headers in visitation order.
    pub headers: Vec<PathBuf>,
    /// Stub sources in record order.
    pub sources: Vec<PathBuf>,
    /// The umbrella header.
    pub umbrella: PathBuf,
    /// The IDE settings file, if enabled.
    pub ide_config: Option<PathBuf>,
    /// Delegate names inlined into the umbrella header.
    pub delegates: Vec<String>,
    /// `Dir/File.h` include paths in visitation order.
    pub includes: Vec<String>,
    /// Warnings found in the description.
    pub diagnostics: Vec<Diagnostic>,
}

/// Generator for a parsed description tree.
pub struct Generator<'a> {
    root: &'a Root,
    config: GeneratorConfig,
}

impl<'a> Generator<'a> {
    /// Creates a generator with the stock configuration.
    #[must_use]
    pub fn new(root: &'a Root) -> Self {
        Self::with_config(root, GeneratorConfig::default())
    }

    /// Creates a generator with an explicit configuration.
    #[must_use]
    pub fn with_config(root: &'a Root, config: GeneratorConfig) -> Self {
        Self { root, config }
    }

    /// Returns the configuration in use.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Runs every pass in order and writes all output files.
    ///
    /// # Errors
    /// Returns `CodegenError` on the first failed write. Files written before
    /// the failure are left in place.
    pub fn run(&self) -> Result<GenerationReport, CodegenError> {
        let diagnostics = validate(self.root);
        for diagnostic in &diagnostics {
            tracing::warn!(%diagnostic, "description warning");
        }

        let (manifest, headers) = HeaderGenerator::new(&self.config).run(self.root)?;
        let sources = generate_sources(&manifest, &self.config)?;
        let umbrella = write_umbrella(&manifest, &self.config)?;
        let ide_config = if self.config.writes_ide_config() {
            Some(write_ide_config(&self.config)?)
        } else {
            None
        };

        Ok(GenerationReport {
            headers,
            sources,
            umbrella,
            ide_config,
            delegates: manifest.delegates().iter().map(|c| c.name.clone()).collect(),
            includes: manifest.includes().to_vec(),
            diagnostics,
        })
    }
}
