//! # bromastub
//!
//! Turns Broma class descriptions into a browsable C++ tree: one guarded
//! header and one stub source per class, routed into directories by naming
//! convention, plus an umbrella `includes.h`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use bromastub::codegen::{GeneratorConfig, generate_from_files};
//!
//! let config = GeneratorConfig::new().output_root("out");
//! let report = generate_from_files(&["GeometryDash.bro"], config)?;
//! println!("{} headers", report.headers.len());
//! # Ok::<(), bromastub::codegen::CodegenError>(())
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Description parsing, node types, validation
//! - [`codegen`] - Header, stub-source and umbrella generation

/// Description parsing and node types.
pub mod schema {
    pub use bromastub_schema::*;
}

/// C++ generation from parsed descriptions.
pub mod codegen {
    pub use bromastub_codegen::*;
}
