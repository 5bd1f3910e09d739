//! Stub source pass: one `.cpp` of empty definitions per output record.

use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::manifest::{Manifest, OutputRecord};
use crate::signature::{Definition, render_definition};
use crate::writer::LineWriter;
use std::path::PathBuf;

/// Renders the stub source of one record.
///
/// Functions appear sorted by name so regenerated files diff cleanly no
/// matter how the description orders them.
#[must_use]
pub fn render_source(record: &OutputRecord<'_>, config: &GeneratorConfig) -> LineWriter {
    let mut writer = LineWriter::for_file(record.source_name.clone());
    writer.newline();
    writer.include(config.umbrella());
    writer.newline();
    writer.newline();

    let class = &record.class.name;
    for proto in record.class.functions_sorted() {
        match render_definition(class, proto, config.sentinel()) {
            Definition::Stub(line) => {
                writer.putline(&line);
                writer.newline();
            }
            Definition::Unresolved(text) => writer.comment(&text),
        }
    }

    writer
}

/// Writes `<sources>/<Dir>/<Class>.cpp` for every record.
///
/// # Returns
/// Written paths in record order.
///
/// # Errors
/// Returns `CodegenError::Io` on the first failed write.
pub fn generate_sources(
    manifest: &Manifest<'_>,
    config: &GeneratorConfig,
) -> Result<Vec<PathBuf>, CodegenError> {
    let root = config.sources_root();
    let mut written = Vec::with_capacity(manifest.records().len());

    for record in manifest.records() {
        let mut writer = render_source(record, config);
        let dir = root.join(record.directory);
        let path = writer
            .finalize_and_write(&dir)
            .map_err(|e| CodegenError::io(dir.join(&record.source_name), e))?;
        tracing::debug!(class = %record.class.name, path = %path.display(), "wrote stub source");
        written.push(path);
    }

    tracing::info!(sources = written.len(), "source pass complete");
    Ok(written)
}
