//! IntelliSense configuration for the generated tree.

use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Directory holding the editor settings, relative to the output root.
pub const IDE_DIR: &str = ".vscode";
/// Settings file name.
pub const IDE_FILE: &str = "c_cpp_properties.json";

/// Top-level `c_cpp_properties.json` document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CppProperties {
    /// Available configurations; the editor picks one by name.
    pub configurations: Vec<CppConfiguration>,
    /// Schema version of the file.
    pub version: u32,
}

/// One named compiler configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CppConfiguration {
    /// Configuration name shown in the editor.
    pub name: String,
    /// Include search globs.
    pub include_path: Vec<String>,
    /// Preprocessor symbols defined for IntelliSense.
    pub defines: Vec<String>,
    /// Windows SDK to resolve system headers from.
    pub windows_sdk_version: String,
    /// Compiler queried for built-in defines.
    pub compiler_path: String,
    /// C language standard.
    pub c_standard: String,
    /// C++ language standard.
    pub cpp_standard: String,
    /// IntelliSense platform and compiler mode.
    pub intelli_sense_mode: String,
}

impl Default for CppProperties {
    /// MSVC x64 setup that resolves the generated headers and the bundled
    /// cocos2d tree.
    fn default() -> Self {
        Self {
            configurations: vec![CppConfiguration {
                name: "Win32".into(),
                include_path: vec![
                    "${workspaceFolder}/**".into(),
                    "${workspaceFolder}/cocos2d/**".into(),
                ],
                defines: vec!["_DEBUG".into(), "UNICODE".into(), "_UNICODE".into()],
                windows_sdk_version: "10.0.19041.0".into(),
                compiler_path: "cl.exe".into(),
                c_standard: "c17".into(),
                cpp_standard: "c++17".into(),
                intelli_sense_mode: "windows-msvc-x64".into(),
            }],
            version: 4,
        }
    }
}

/// Writes `<root>/.vscode/c_cpp_properties.json`, replacing any existing file.
///
/// # Errors
/// Returns `CodegenError::IdeConfig` if serialisation fails or
/// `CodegenError::Io` if the write fails.
pub fn write_ide_config(config: &GeneratorConfig) -> Result<PathBuf, CodegenError> {
    let dir = config.root().join(IDE_DIR);
    let path = dir.join(IDE_FILE);
    let json = serde_json::to_string_pretty(&CppProperties::default())?;

    fs::create_dir_all(&dir).map_err(|e| CodegenError::io(&dir, e))?;
    fs::write(&path, json).map_err(|e| CodegenError::io(&path, e))?;
    tracing::debug!(path = %path.display(), "wrote IDE configuration");
    Ok(path)
}
