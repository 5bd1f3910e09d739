//! Umbrella header assembly.
//!
//! `includes.h` pulls in the external dependencies, every generated header
//! grouped by directory, and the delegate interfaces inline.

use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::headers::{forward_declarable, write_declaration};
use crate::manifest::Manifest;
use crate::writer::LineWriter;
use bromastub_schema::{Class, Field};
use std::path::PathBuf;

/// Headers every generated file may rely on.
pub const EXTERNAL_INCLUDES: &[&str] = &[
    "cocos2d.h",
    "fmt/format.h",
    "fmod/fmod.h",
    "cstdlib",
    "cstring",
    "string",
    "map",
    "unordered_map",
];

/// Renders the umbrella header.
#[must_use]
pub fn render_umbrella(manifest: &Manifest<'_>, config: &GeneratorConfig) -> LineWriter {
    let umbrella = config.umbrella();
    let mut writer = LineWriter::for_file(umbrella);
    writer.set_header_guard(umbrella.rsplit_once('.').map_or(umbrella, |(stem, _)| stem));

    writer.comment("External Resources");
    writer.putline("#ifdef _WIN32");
    writer.putline("    #define WIN32_LEAN_AND_MEAN");
    writer.putline("    #include <windows.h>");
    writer.putline("#endif /* _WIN32 */");
    for header in EXTERNAL_INCLUDES {
        writer.external_include(header);
    }
    writer.newline();

    let sentinel = config.sentinel();
    writer.comment("Macros");
    writer.putline(&format!("#ifndef {sentinel}"));
    writer.putline(&format!("    #define {sentinel} void*"));
    writer.putline(&format!("#endif /* {sentinel} */"));
    writer.newline();

    for (directory, files) in manifest.directories() {
        writer.comment(directory);
        for file in files {
            writer.include(&format!("{directory}/{file}"));
        }
        writer.newline();
    }

    writer.comment("Delegates");
    for delegate in manifest.delegates() {
        write_delegate(&mut writer, delegate);
    }

    writer.comment("Enums");
    writer.close_header_guard();
    writer
}

/// Writes one delegate interface block, functions sorted by name.
fn write_delegate(writer: &mut LineWriter, delegate: &Class) {
    writer.forward_declare(&forward_declarable(delegate));
    writer.open_class(&delegate.name, &delegate.superclasses);

    let mut functions: Vec<_> = delegate
        .fields
        .iter()
        .filter_map(|f| match f {
            Field::FunctionBind(bind) => Some(bind),
            _ => None,
        })
        .collect();
    functions.sort_by(|a, b| a.prototype.name.cmp(&b.prototype.name));
    for function in functions {
        write_declaration(writer, function);
    }

    writer.close_class();
    writer.newline();
    writer.newline();
}

/// Writes the umbrella header to `config.umbrella_path()`.
///
/// # Errors
/// Returns `CodegenError::Io` if the write fails.
pub fn write_umbrella(
    manifest: &Manifest<'_>,
    config: &GeneratorConfig,
) -> Result<PathBuf, CodegenError> {
    let mut writer = render_umbrella(manifest, config);
    let dir = config.headers_root();
    let path = writer
        .finalize_and_write(&dir)
        .map_err(|e| CodegenError::io(config.umbrella_path(), e))?;
    tracing::info!(
        directories = manifest.directories().len(),
        delegates = manifest.delegates().len(),
        path = %path.display(),
        "wrote umbrella header"
    );
    Ok(path)
}
