//! Header pass: one guarded header per emitted class.

use crate::classify::{ClassCategory, classify, is_framework};
use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::manifest::{HEADER_EXT, Manifest, OutputRecord};
use crate::signature::{render_declaration, translate_type};
use crate::writer::LineWriter;
use bromastub_schema::{
    Class, FunctionBindField, MemberField, PadField, Root, Visitor, walk_class, walk_root,
};
use std::path::PathBuf;

/// Superclasses worth a forward declaration: framework types are already
/// declared by the framework headers.
pub(crate) fn forward_declarable(class: &Class) -> Vec<&str> {
    class
        .superclasses
        .iter()
        .map(String::as_str)
        .filter(|s| !is_framework(s))
        .collect()
}

/// Writes a bound function declaration, preceded by its docs if any.
pub(crate) fn write_declaration(writer: &mut LineWriter, function: &FunctionBindField) {
    if let Some(docs) = &function.attributes.docs {
        for line in docs.lines() {
            writer.writeline(&format!("// {line}"));
        }
    }
    writer.writeline(&render_declaration(&function.prototype));
}

/// Visitor that renders and writes class headers while filling a [`Manifest`].
pub struct HeaderGenerator<'a, 'c> {
    config: &'c GeneratorConfig,
    manifest: Manifest<'a>,
    writer: LineWriter,
    written: Vec<PathBuf>,
}

impl<'a, 'c> HeaderGenerator<'a, 'c> {
    /// Creates a header generator writing under `config`'s headers root.
    #[must_use]
    pub fn new(config: &'c GeneratorConfig) -> Self {
        Self {
            config,
            manifest: Manifest::new(),
            writer: LineWriter::new(),
            written: Vec::new(),
        }
    }

    /// Walks the whole tree, writing one header per emitted class.
    ///
    /// # Returns
    /// The filled manifest and the header paths written, in visitation order.
    ///
    /// # Errors
    /// Returns `CodegenError::Io` on the first failed write.
    pub fn run(mut self, root: &'a Root) -> Result<(Manifest<'a>, Vec<PathBuf>), CodegenError> {
        walk_root(&mut self, root)?;
        tracing::info!(
            headers = self.written.len(),
            delegates = self.manifest.delegates().len(),
            "header pass complete"
        );
        Ok((self.manifest, self.written))
    }

    /// Renders the header of one class without touching the filesystem.
    ///
    /// # Errors
    /// Propagates the first error raised while visiting the class fields.
    pub fn render_class(&mut self, class: &'a Class) -> Result<LineWriter, CodegenError> {
        let mut writer = LineWriter::for_file(format!("{}{HEADER_EXT}", class.name));
        writer.set_header_guard(&class.name);
        writer.include(&format!("../{}", self.config.umbrella()));
        writer.newline();
        writer.forward_declare(&forward_declarable(class));
        writer.open_class(&class.name, &class.superclasses);

        self.writer = writer;
        walk_class(self, class)?;
        let mut writer = std::mem::take(&mut self.writer);

        writer.close_class();
        writer.newline();
        writer.close_header_guard();
        Ok(writer)
    }

    fn emit_class(
        &mut self,
        class: &'a Class,
        category: ClassCategory,
        directory: &'static str,
    ) -> Result<(), CodegenError> {
        let mut writer = self.render_class(class)?;
        let dir = self.config.headers_root().join(directory);
        let path = writer
            .finalize_and_write(&dir)
            .map_err(|e| CodegenError::io(dir.join(writer.file_name()), e))?;
        tracing::debug!(class = %class.name, path = %path.display(), "wrote header");

        if let Some(previous) = self.manifest.record(OutputRecord::new(class, category, directory)) {
            tracing::warn!(
                class = %class.name,
                path = %path.display(),
                replaced_superclasses = ?previous.superclasses,
                "duplicate class overwrote an earlier header"
            );
        } else {
            self.written.push(path);
        }
        Ok(())
    }
}

impl<'a> Visitor<'a> for HeaderGenerator<'a, '_> {
    type Error = CodegenError;

    fn visit_class(&mut self, class: &'a Class) -> Result<(), CodegenError> {
        let category = classify(&class.name);
        match category.directory() {
            Some(directory) => self.emit_class(class, category, directory),
            None => {
                if category == ClassCategory::Delegate && !self.manifest.add_delegate(class) {
                    tracing::warn!(class = %class.name, "duplicate delegate ignored");
                }
                Ok(())
            }
        }
    }

    fn visit_member(&mut self, member: &'a MemberField) -> Result<(), CodegenError> {
        let array = member
            .array_length
            .map(|n| format!("[{n}]"))
            .unwrap_or_default();
        self.writer.writeline(&format!(
            "{} {}{array};",
            translate_type(&member.ty.name),
            member.name
        ));
        Ok(())
    }

    fn visit_pad(&mut self, _pad: &'a PadField) -> Result<(), CodegenError> {
        self.writer.comment("PAD");
        Ok(())
    }

    fn visit_function_bind(&mut self, function: &'a FunctionBindField) -> Result<(), CodegenError> {
        write_declaration(&mut self.writer, function);
        Ok(())
    }
}
