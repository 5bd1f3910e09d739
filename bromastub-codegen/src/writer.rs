//! Line-oriented text buffer for emitting C++ source.
//!
//! The writer keeps a pending line: [`LineWriter::put`] and
//! [`LineWriter::startline`] extend it, [`LineWriter::newline`] flushes it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const INDENT: &str = "    ";

/// Ordered buffer of output lines with indent tracking.
#[derive(Debug, Clone, Default)]
pub struct LineWriter {
    lines: Vec<String>,
    current: String,
    indents: usize,
    guard: String,
    file_name: String,
}

impl LineWriter {
    /// Creates an empty writer with no target file name.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty writer targeting `file_name`.
    #[must_use]
    pub fn for_file(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            ..Self::default()
        }
    }

    /// Returns the target file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the current indent level.
    #[must_use]
    pub fn indent_level(&self) -> usize {
        self.indents
    }

    /// Flushes the pending line; on an empty pending line this adds a blank line.
    pub fn newline(&mut self) {
        self.lines.push(std::mem::take(&mut self.current));
    }

    /// Appends text to the pending line without indenting.
    pub fn put(&mut self, text: &str) {
        self.current.push_str(text);
    }

    /// Appends text without indenting and ends the line.
    pub fn putline(&mut self, text: &str) {
        self.put(text);
        self.newline();
    }

    /// Appends indented text to the pending line.
    pub fn startline(&mut self, text: &str) {
        for _ in 0..self.indents {
            self.current.push_str(INDENT);
        }
        self.current.push_str(text);
    }

    /// Appends indented text and ends the line.
    pub fn writeline(&mut self, text: &str) {
        self.startline(text);
        self.newline();
    }

    /// Increases the indent level.
    pub fn indent(&mut self) {
        self.indents += 1;
    }

    /// Decreases the indent level, never below zero.
    pub fn dedent(&mut self) {
        self.indents = self.indents.saturating_sub(1);
    }

    /// Emits `#include "name"`.
    pub fn include(&mut self, name: &str) {
        self.putline(&format!("#include \"{name}\""));
    }

    /// Emits `#include <name>`.
    pub fn external_include(&mut self, name: &str) {
        self.putline(&format!("#include <{name}>"));
    }

    /// Emits a `/* text */` line followed by a blank line.
    pub fn comment(&mut self, text: &str) {
        self.startline(&format!("/* {text} */"));
        self.newline();
        self.newline();
    }

    /// Opens an include guard keyed by the uppercased name.
    pub fn set_header_guard(&mut self, name: &str) {
        self.guard = name.to_uppercase();
        self.putline(&format!("#ifndef __{}_H__", self.guard));
        self.putline(&format!("#define __{}_H__", self.guard));
        self.newline();
    }

    /// Closes the guard opened by [`LineWriter::set_header_guard`].
    pub fn close_header_guard(&mut self) {
        self.putline(&format!("#endif /* __{}_H__ */", self.guard));
        self.guard.clear();
    }

    /// Emits a block of `class Name;` forward declarations. Emits nothing for
    /// an empty list.
    pub fn forward_declare<S: AsRef<str>>(&mut self, names: &[S]) {
        if names.is_empty() {
            return;
        }
        self.comment("Forward Declarations");
        for name in names {
            self.putline(&format!("class {};", name.as_ref()));
        }
        self.newline();
    }

    /// Opens `class Name : public A, public B {` with a `public:` label and
    /// indents the body.
    pub fn open_class<S: AsRef<str>>(&mut self, name: &str, superclasses: &[S]) {
        self.put(&format!("class {name}"));
        if !superclasses.is_empty() {
            let bases: Vec<String> = superclasses
                .iter()
                .map(|s| format!("public {}", s.as_ref()))
                .collect();
            self.put(&format!(" : {}", bases.join(", ")));
        }
        self.put(" {");
        self.newline();
        self.putline("public:");
        self.indent();
    }

    /// Closes a class body opened by [`LineWriter::open_class`].
    pub fn close_class(&mut self) {
        self.dedent();
        self.putline("};");
    }

    /// Returns the finished lines, including a non-empty pending line.
    #[must_use]
    pub fn lines(&self) -> Vec<&str> {
        let mut lines: Vec<&str> = self.lines.iter().map(String::as_str).collect();
        if !self.current.is_empty() {
            lines.push(&self.current);
        }
        lines
    }

    /// Returns the buffer joined by newlines.
    #[must_use]
    pub fn render(&self) -> String {
        self.lines().join("\n")
    }

    /// Creates `dir` if needed and writes the buffer to `dir/<file name>`,
    /// replacing any existing file.
    ///
    /// # Errors
    /// Returns the IO error of the directory creation or the write.
    pub fn finalize_and_write(&mut self, dir: &Path) -> io::Result<PathBuf> {
        if !self.current.is_empty() {
            self.newline();
        }
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        fs::write(&path, self.lines.join("\n"))?;
        Ok(path)
    }
}
