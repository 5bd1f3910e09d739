//! Side tables accumulated by the header pass.

use crate::classify::ClassCategory;
use bromastub_schema::Class;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Header file extension.
pub const HEADER_EXT: &str = ".h";
/// Stub source file extension.
pub const SOURCE_EXT: &str = ".cpp";

/// One class that received a header and gets a stub source.
#[derive(Debug, Clone)]
pub struct OutputRecord<'a> {
    /// `ClassName.cpp`.
    pub source_name: String,
    /// `ClassName.h`.
    pub header_name: String,
    /// Category directory (`Managers`, `Common`, ...).
    pub directory: &'static str,
    /// Source class.
    pub class: &'a Class,
    /// Category the class was routed by.
    pub category: ClassCategory,
}

impl<'a> OutputRecord<'a> {
    /// Creates the record for an emitted class.
    #[must_use]
    pub fn new(class: &'a Class, category: ClassCategory, directory: &'static str) -> Self {
        Self {
            source_name: format!("{}{SOURCE_EXT}", class.name),
            header_name: format!("{}{HEADER_EXT}", class.name),
            directory,
            class,
            category,
        }
    }

    /// Returns `Dir/ClassName.h`, the path used in include lines.
    #[must_use]
    pub fn include_path(&self) -> String {
        format!("{}/{}", self.directory, self.header_name)
    }
}

/// Everything the later passes need from the header pass.
#[derive(Debug, Default)]
pub struct Manifest<'a> {
    records: Vec<OutputRecord<'a>>,
    directories: BTreeMap<&'static str, Vec<String>>,
    includes: Vec<String>,
    delegates: Vec<&'a Class>,
    record_index: HashMap<String, usize>,
    delegate_names: HashSet<&'a str>,
}

impl<'a> Manifest<'a> {
    /// Creates an empty manifest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record, updating the directory manifest and include list.
    ///
    /// A record whose include path is already present replaces the earlier
    /// one in place and its class is returned; the directory manifest and the
    /// include list keep a single entry for that path.
    pub fn record(&mut self, record: OutputRecord<'a>) -> Option<&'a Class> {
        let path = record.include_path();
        if let Some(&index) = self.record_index.get(&path) {
            let previous = std::mem::replace(&mut self.records[index], record);
            return Some(previous.class);
        }

        self.directories
            .entry(record.directory)
            .or_default()
            .push(record.header_name.clone());
        self.includes.push(path.clone());
        self.record_index.insert(path, self.records.len());
        self.records.push(record);
        None
    }

    /// Adds a delegate class. Returns false if one with the same name was
    /// already collected.
    pub fn add_delegate(&mut self, class: &'a Class) -> bool {
        if !self.delegate_names.insert(class.name.as_str()) {
            return false;
        }
        self.delegates.push(class);
        true
    }

    /// Output records in visitation order.
    #[must_use]
    pub fn records(&self) -> &[OutputRecord<'a>] {
        &self.records
    }

    /// Directory name to header file names, directories sorted.
    #[must_use]
    pub fn directories(&self) -> &BTreeMap<&'static str, Vec<String>> {
        &self.directories
    }

    /// `Dir/File.h` paths in visitation order.
    #[must_use]
    pub fn includes(&self) -> &[String] {
        &self.includes
    }

    /// Delegate classes in first-seen order.
    #[must_use]
    pub fn delegates(&self) -> &[&'a Class] {
        &self.delegates
    }
}
