//! # bromastub Schema
//!
//! Parser and node types for Broma interface descriptions.
//!
//! This crate provides:
//! - A tokenizer and recursive-descent parser for the description language
//! - The class / field / prototype tree consumed by code generators
//! - A [`Visitor`] trait for depth-first traversal
//! - Non-fatal validation of a parsed tree

pub mod error;
pub mod lexer;
pub mod parser;
pub mod types;
pub mod validation;
pub mod visit;

pub use error::ParseError;
pub use parser::parse;
pub use types::{
    Argument, Attributes, BindValue, Binding, Class, Field, FunctionBindField, FunctionPrototype,
    MemberField, PadField, Platform, Root, TypeRef,
};
pub use validation::{Diagnostic, validate};
pub use visit::{Visitor, walk_class, walk_root};
