//! Generator configuration.

use std::path::{Path, PathBuf};

/// Default directory for generated headers, relative to the output root.
pub const DEFAULT_HEADERS_DIR: &str = "headers";
/// Default directory for generated stub sources, relative to the output root.
pub const DEFAULT_SOURCES_DIR: &str = "src";
/// Default umbrella header file name.
pub const DEFAULT_UMBRELLA: &str = "includes.h";
/// Return type meaning "not determined by the description".
pub const DEFAULT_UNRESOLVED_RETURN: &str = "TodoReturn";

/// Output layout and emission options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    output_root: PathBuf,
    headers_dir: String,
    sources_dir: String,
    umbrella_name: String,
    unresolved_return: String,
    ide_config: bool,
}

impl GeneratorConfig {
    /// Creates a configuration with the stock layout rooted at `.`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output_root: PathBuf::from("."),
            headers_dir: DEFAULT_HEADERS_DIR.to_string(),
            sources_dir: DEFAULT_SOURCES_DIR.to_string(),
            umbrella_name: DEFAULT_UMBRELLA.to_string(),
            unresolved_return: DEFAULT_UNRESOLVED_RETURN.to_string(),
            ide_config: true,
        }
    }

    /// Sets the directory everything is written under.
    #[must_use]
    pub fn output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = root.into();
        self
    }

    /// Sets the headers directory name.
    #[must_use]
    pub fn headers_dir(mut self, dir: impl Into<String>) -> Self {
        self.headers_dir = dir.into();
        self
    }

    /// Sets the stub sources directory name.
    #[must_use]
    pub fn sources_dir(mut self, dir: impl Into<String>) -> Self {
        self.sources_dir = dir.into();
        self
    }

    /// Sets the umbrella header file name.
    #[must_use]
    pub fn umbrella_name(mut self, name: impl Into<String>) -> Self {
        self.umbrella_name = name.into();
        self
    }

    /// Sets the unresolved-return sentinel.
    #[must_use]
    pub fn unresolved_return(mut self, sentinel: impl Into<String>) -> Self {
        self.unresolved_return = sentinel.into();
        self
    }

    /// Enables or disables the IDE configuration file.
    #[must_use]
    pub fn ide_config(mut self, enabled: bool) -> Self {
        self.ide_config = enabled;
        self
    }

    /// Returns the output root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.output_root
    }

    /// Returns `<root>/<headers>`.
    #[must_use]
    pub fn headers_root(&self) -> PathBuf {
        self.output_root.join(&self.headers_dir)
    }

    /// Returns `<root>/<sources>`.
    #[must_use]
    pub fn sources_root(&self) -> PathBuf {
        self.output_root.join(&self.sources_dir)
    }

    /// Returns the umbrella header file name.
    #[must_use]
    pub fn umbrella(&self) -> &str {
        &self.umbrella_name
    }

    /// Returns `<root>/<headers>/<umbrella>`.
    #[must_use]
    pub fn umbrella_path(&self) -> PathBuf {
        self.headers_root().join(&self.umbrella_name)
    }

    /// Returns the unresolved-return sentinel.
    #[must_use]
    pub fn sentinel(&self) -> &str {
        &self.unresolved_return
    }

    /// Returns true if the IDE configuration file should be written.
    #[must_use]
    pub fn writes_ide_config(&self) -> bool {
        self.ide_config
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new()
    }
}
