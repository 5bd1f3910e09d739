//! Function signature and type rendering.
//!
//! Every type name printed into generated code goes through
//! [`translate_type`].

use bromastub_schema::{Argument, FunctionPrototype, TypeRef};

/// Namespace alias used by the description for standard library types.
const SOURCE_STD_ALIAS: &str = "gd::";
/// Standard library namespace it maps to.
const TARGET_STD: &str = "std::";

/// Rewrites the description's standard library alias to `std::`.
#[must_use]
pub fn translate_type(name: &str) -> String {
    name.replace(SOURCE_STD_ALIAS, TARGET_STD)
}

fn render_type(ty: &TypeRef, elaborate_structs: bool) -> String {
    let name = translate_type(&ty.name);
    if elaborate_structs && ty.is_struct {
        format!("struct {name}")
    } else {
        name
    }
}

fn render_argument(arg: &Argument, elaborate_structs: bool) -> String {
    let ty = render_type(&arg.ty, elaborate_structs);
    if arg.name.is_empty() {
        ty
    } else {
        format!("{ty} {}", arg.name)
    }
}

/// Renders `(Type name, ...)`.
#[must_use]
pub fn render_arguments(proto: &FunctionPrototype, elaborate_structs: bool) -> String {
    let args: Vec<String> = proto
        .args
        .iter()
        .map(|a| render_argument(a, elaborate_structs))
        .collect();
    format!("({})", args.join(", "))
}

/// Renders the in-class declaration, e.g. `virtual const int get(int a);`.
#[must_use]
pub fn render_declaration(proto: &FunctionPrototype) -> String {
    let mut out = String::new();
    if proto.is_virtual {
        out.push_str("virtual ");
    } else if proto.is_static {
        out.push_str("static ");
    }
    if proto.is_const {
        out.push_str("const ");
    }
    if !proto.is_special_member() {
        out.push_str(&translate_type(&proto.ret.name));
        out.push(' ');
    }
    out.push_str(&proto.name);
    out.push_str(&render_arguments(proto, false));
    out.push(';');
    out
}

/// Renders `Class::name(struct A a, int b)` as used by out-of-class definitions.
#[must_use]
pub fn qualified_signature(class: &str, proto: &FunctionPrototype) -> String {
    format!("{class}::{}{}", proto.name, render_arguments(proto, true))
}

/// Out-of-class rendering of one prototype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Definition {
    /// Callable stub, one line.
    Stub(String),
    /// Return type is unresolved; only a comment body is available.
    Unresolved(String),
}

/// Renders the out-of-class stub definition of `proto`.
///
/// A prototype returning `sentinel` yields [`Definition::Unresolved`] holding
/// the comment text; anything else yields a `{ return; }` stub.
#[must_use]
pub fn render_definition(class: &str, proto: &FunctionPrototype, sentinel: &str) -> Definition {
    let signature = qualified_signature(class, proto);
    if proto.ret.name == sentinel {
        return Definition::Unresolved(format!("Unknown Return: {signature}{{}};"));
    }
    if proto.is_special_member() {
        Definition::Stub(format!("{signature} {{ return; }}"))
    } else {
        Definition::Stub(format!(
            "{} {signature} {{ return; }}",
            translate_type(&proto.ret.name)
        ))
    }
}
