//! Interface description node types.
//!
//! This module contains the tree produced by the parser: classes, their
//! fields (members, padding, bound functions) and function prototypes.

use std::collections::HashMap;
use std::fmt;

/// Parsed interface description.
#[derive(Debug, Clone, Default)]
pub struct Root {
    /// Classes in declaration order.
    pub classes: Vec<Class>,
    /// Free functions declared outside any class.
    pub functions: Vec<FunctionBindField>,
    /// Class lookup map (first declaration wins).
    class_map: HashMap<String, usize>,
}

impl Root {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a class to the tree.
    pub fn add_class(&mut self, class: Class) {
        let index = self.classes.len();
        self.class_map.entry(class.name.clone()).or_insert(index);
        self.classes.push(class);
    }

    /// Looks up a class by name.
    #[must_use]
    pub fn get_class(&self, name: &str) -> Option<&Class> {
        self.class_map.get(name).map(|&idx| &self.classes[idx])
    }

    /// Returns true if a class with the given name exists.
    #[must_use]
    pub fn has_class(&self, name: &str) -> bool {
        self.class_map.contains_key(name)
    }
}

/// One native class.
#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    /// Class name, possibly namespace qualified (`cocos2d::CCNode`).
    pub name: String,
    /// Superclass names in declaration order.
    pub superclasses: Vec<String>,
    /// Fields in declaration order.
    pub fields: Vec<Field>,
    /// Attributes attached to the class.
    pub attributes: Attributes,
}

impl Class {
    /// Creates a class with no superclasses or fields.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            superclasses: Vec::new(),
            fields: Vec::new(),
            attributes: Attributes::default(),
        }
    }

    /// Adds a superclass.
    #[must_use]
    pub fn with_superclass(mut self, name: impl Into<String>) -> Self {
        self.superclasses.push(name.into());
        self
    }

    /// Adds a field.
    #[must_use]
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Iterates over the bound function prototypes in declaration order.
    pub fn functions(&self) -> impl Iterator<Item = &FunctionPrototype> {
        self.fields.iter().filter_map(|f| match f {
            Field::FunctionBind(bind) => Some(&bind.prototype),
            _ => None,
        })
    }

    /// Returns the bound function prototypes sorted by name.
    ///
    /// The sort is stable, so overloads keep their declaration order.
    #[must_use]
    pub fn functions_sorted(&self) -> Vec<&FunctionPrototype> {
        let mut functions: Vec<_> = self.functions().collect();
        functions.sort_by(|a, b| a.name.cmp(&b.name));
        functions
    }
}

/// Class field variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// Data member.
    Member(MemberField),
    /// Reserved space of unknown purpose.
    Pad(PadField),
    /// Member function binding.
    FunctionBind(FunctionBindField),
}

impl Field {
    /// Creates a member field.
    #[must_use]
    pub fn member(ty: TypeRef, name: impl Into<String>) -> Self {
        Self::Member(MemberField {
            name: name.into(),
            ty,
            array_length: None,
        })
    }

    /// Creates a pad field with no platform amounts.
    #[must_use]
    pub fn pad() -> Self {
        Self::Pad(PadField::default())
    }

    /// Creates a function binding with no platform bindings.
    #[must_use]
    pub fn function(prototype: FunctionPrototype) -> Self {
        Self::FunctionBind(FunctionBindField::new(prototype))
    }
}

/// Data member declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberField {
    /// Member name.
    pub name: String,
    /// Member type.
    pub ty: TypeRef,
    /// Fixed array length (`int m_values[4];`).
    pub array_length: Option<u64>,
}

/// Padding declaration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PadField {
    /// Pad size per platform, in bytes.
    pub amounts: Vec<(Platform, u64)>,
}

/// Function prototype bound to platform addresses.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionBindField {
    /// Function signature.
    pub prototype: FunctionPrototype,
    /// Per-platform bindings.
    pub bindings: Vec<Binding>,
    /// Inline body, verbatim, without the surrounding braces.
    pub inline_body: Option<String>,
    /// Attributes attached to the function.
    pub attributes: Attributes,
}

impl FunctionBindField {
    /// Creates a binding with no platforms.
    #[must_use]
    pub fn new(prototype: FunctionPrototype) -> Self {
        Self {
            prototype,
            bindings: Vec::new(),
            inline_body: None,
            attributes: Attributes::default(),
        }
    }
}

/// Function signature.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionPrototype {
    /// Function name (`~Foo` for destructors).
    pub name: String,
    /// Return type; empty for constructors and destructors.
    pub ret: TypeRef,
    /// Arguments in declaration order.
    pub args: Vec<Argument>,
    /// Declared `virtual`.
    pub is_virtual: bool,
    /// Declared `static`.
    pub is_static: bool,
    /// Declared `const`.
    pub is_const: bool,
    /// Declared `callback`.
    pub is_callback: bool,
}

impl FunctionPrototype {
    /// Creates a non-virtual, non-static, non-const prototype with no arguments.
    #[must_use]
    pub fn new(name: impl Into<String>, ret: TypeRef) -> Self {
        Self {
            name: name.into(),
            ret,
            args: Vec::new(),
            is_virtual: false,
            is_static: false,
            is_const: false,
            is_callback: false,
        }
    }

    /// Adds an argument.
    #[must_use]
    pub fn with_arg(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.args.push(Argument {
            name: name.into(),
            ty,
        });
        self
    }

    /// Marks the prototype virtual.
    #[must_use]
    pub fn virtual_(mut self) -> Self {
        self.is_virtual = true;
        self
    }

    /// Marks the prototype static.
    #[must_use]
    pub fn static_(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Marks the prototype const.
    #[must_use]
    pub fn const_(mut self) -> Self {
        self.is_const = true;
        self
    }

    /// Returns true for constructors and destructors.
    #[must_use]
    pub fn is_special_member(&self) -> bool {
        self.ret.name.is_empty()
    }
}

/// Named function argument.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    /// Argument name (`p0`, `p1`, ... when unnamed in the source).
    pub name: String,
    /// Argument type.
    pub ty: TypeRef,
}

/// Reference to a type as written in the source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TypeRef {
    /// Normalised type text (`gd::vector<int>*`), without any `struct` keyword.
    pub name: String,
    /// Written with an elaborated `struct` prefix.
    pub is_struct: bool,
}

impl TypeRef {
    /// Creates a plain type reference.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_struct: false,
        }
    }

    /// Creates a `struct`-prefixed type reference.
    #[must_use]
    pub fn structure(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_struct: true,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Target platform of a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Platform {
    /// Windows.
    Windows,
    /// macOS (both architectures).
    Mac,
    /// macOS on Intel.
    IntelMac,
    /// macOS on Apple silicon.
    M1,
    /// iOS.
    Ios,
    /// Android (both architectures).
    Android,
    /// Android armv7.
    Android32,
    /// Android arm64.
    Android64,
}

impl Platform {
    /// Parses a platform from its source keyword.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "win" => Some(Self::Windows),
            "mac" => Some(Self::Mac),
            "imac" => Some(Self::IntelMac),
            "m1" => Some(Self::M1),
            "ios" => Some(Self::Ios),
            "android" => Some(Self::Android),
            "android32" => Some(Self::Android32),
            "android64" => Some(Self::Android64),
            _ => None,
        }
    }

    /// Returns the source keyword for this platform.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Windows => "win",
            Self::Mac => "mac",
            Self::IntelMac => "imac",
            Self::M1 => "m1",
            Self::Ios => "ios",
            Self::Android => "android",
            Self::Android32 => "android32",
            Self::Android64 => "android64",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One `platform value` entry of a binding list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    /// Target platform.
    pub platform: Platform,
    /// Where the function lives on that platform.
    pub value: BindValue,
}

/// Binding target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindValue {
    /// Absolute offset into the binary.
    Address(u64),
    /// Implemented inline.
    Inline,
    /// Platform listed with no value (linked by symbol).
    Linked,
}

/// Attributes from `[[...]]` blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    /// Documentation string.
    pub docs: Option<String>,
    /// Platforms the item is linked on.
    pub links: Vec<Platform>,
    /// Platforms the item is missing on.
    pub missing: Vec<Platform>,
    /// Classes this item depends on.
    pub depends: Vec<String>,
}

impl Attributes {
    /// Returns true if no attribute was set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.docs.is_none()
            && self.links.is_empty()
            && self.missing.is_empty()
            && self.depends.is_empty()
    }
}
