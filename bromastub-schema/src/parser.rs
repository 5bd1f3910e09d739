//! Interface description parser.
//!
//! This module turns the token stream produced by [`crate::lexer`] into a
//! [`Root`] tree of classes, fields and function prototypes. Tokens are
//! pulled on demand so inline function bodies can be skipped as raw text.

use crate::error::ParseError;
use crate::lexer::{Lexer, Token, TokenKind};
use crate::types::{
    Argument, Attributes, BindValue, Binding, Class, Field, FunctionBindField, FunctionPrototype,
    MemberField, PadField, Platform, Root, TypeRef,
};

/// Words that combine into multi-word builtin types (`unsigned long long`).
const BUILTIN_WORDS: &[&str] = &["unsigned", "signed", "long", "short", "int", "char", "double"];

/// Parses an interface description from a string.
///
/// # Arguments
/// * `src` - Description text (one or more concatenated files)
///
/// # Returns
/// Parsed tree or parse error.
///
/// # Errors
/// Returns `ParseError` if the text is not valid in the description grammar.
pub fn parse(src: &str) -> Result<Root, ParseError> {
    let mut parser = Parser {
        src,
        lexer: Lexer::new(src),
        tokens: Vec::new(),
        pos: 0,
    };
    parser.parse_root()
}

struct Parser<'a> {
    src: &'a str,
    lexer: Lexer<'a>,
    tokens: Vec<Token>,
    pos: usize,
}

#[derive(Default)]
struct Qualifiers {
    is_virtual: bool,
    is_static: bool,
    is_callback: bool,
}

impl Qualifiers {
    fn any(&self) -> bool {
        self.is_virtual || self.is_static || self.is_callback
    }
}

impl<'a> Parser<'a> {
    /// Lexes until `pos + n` is buffered or the end of input is reached.
    fn fill(&mut self, n: usize) -> Result<(), ParseError> {
        while self.tokens.len() <= self.pos + n {
            if self.tokens.last().is_some_and(|t| t.kind == TokenKind::Eof) {
                break;
            }
            let token = self.lexer.next_token()?;
            self.tokens.push(token);
        }
        Ok(())
    }

    fn peek(&mut self) -> Result<&Token, ParseError> {
        self.peek_at(0)
    }

    fn peek_at(&mut self, n: usize) -> Result<&Token, ParseError> {
        self.fill(n)?;
        let last = self.tokens.len() - 1;
        Ok(&self.tokens[(self.pos + n).min(last)])
    }

    fn advance(&mut self) -> Result<Token, ParseError> {
        let token = self.peek()?.clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        Ok(token)
    }

    fn at_eof(&mut self) -> Result<bool, ParseError> {
        Ok(self.peek()?.kind == TokenKind::Eof)
    }

    fn check_punct(&mut self, c: char) -> Result<bool, ParseError> {
        Ok(self.peek()?.is_punct(c))
    }

    fn eat_punct(&mut self, c: char) -> Result<bool, ParseError> {
        let found = self.check_punct(c)?;
        if found {
            self.pos += 1;
        }
        Ok(found)
    }

    fn eat_ident(&mut self, name: &str) -> Result<bool, ParseError> {
        let found = self.peek()?.is_ident(name);
        if found {
            self.pos += 1;
        }
        Ok(found)
    }

    /// Describes a token as written in the source.
    fn describe(&self, token: &Token) -> String {
        match token.kind {
            TokenKind::Eof | TokenKind::Str(_) => token.kind.to_string(),
            _ => format!("'{}'", &self.src[token.start..token.end]),
        }
    }

    fn error(&mut self, expected: &str) -> ParseError {
        let token = match self.peek() {
            Ok(token) => token.clone(),
            Err(err) => return err,
        };
        if token.kind == TokenKind::Eof {
            ParseError::eof(expected)
        } else {
            ParseError::unexpected(expected, self.describe(&token), token.line, token.column)
        }
    }

    fn expect_punct(&mut self, c: char) -> Result<(), ParseError> {
        if self.eat_punct(c)? {
            Ok(())
        } else {
            Err(self.error(&format!("'{c}'")))
        }
    }

    fn expect_ident(&mut self, what: &str) -> Result<String, ParseError> {
        if let TokenKind::Ident(name) = &self.peek()?.kind {
            let name = name.clone();
            self.pos += 1;
            return Ok(name);
        }
        Err(self.error(what))
    }

    fn expect_int(&mut self, what: &str) -> Result<u64, ParseError> {
        if let TokenKind::Int(value) = self.peek()?.kind {
            self.pos += 1;
            return Ok(value);
        }
        Err(self.error(what))
    }

    fn parse_root(&mut self) -> Result<Root, ParseError> {
        let mut root = Root::new();
        while !self.at_eof()? {
            let attributes = self.parse_attributes()?;
            if self.eat_ident("class")? {
                let class = self.parse_class(attributes)?;
                root.add_class(class);
            } else {
                match self.parse_member_or_function(attributes)? {
                    Field::FunctionBind(function) => root.functions.push(function),
                    _ => return Err(self.error("'class' or free function")),
                }
            }
        }
        Ok(root)
    }

    /// Parses any number of `[[attr, attr(...)]]` blocks.
    fn parse_attributes(&mut self) -> Result<Attributes, ParseError> {
        let mut attributes = Attributes::default();
        while self.check_punct('[')? && self.peek_at(1)?.is_punct('[') {
            self.pos += 2;
            loop {
                self.parse_attribute(&mut attributes)?;
                if !self.eat_punct(',')? {
                    break;
                }
            }
            self.expect_punct(']')?;
            self.expect_punct(']')?;
        }
        Ok(attributes)
    }

    fn parse_attribute(&mut self, attributes: &mut Attributes) -> Result<(), ParseError> {
        let token = self.peek()?.clone();
        let name = self.expect_ident("attribute name")?;
        self.expect_punct('(')?;
        match name.as_str() {
            "link" => attributes.links.extend(self.parse_platform_list()?),
            "missing" => attributes.missing.extend(self.parse_platform_list()?),
            "depends" => {
                while !self.check_punct(')')? {
                    attributes.depends.push(self.parse_qualified_name()?);
                    if !self.eat_punct(',')? {
                        break;
                    }
                }
            }
            "docs" => {
                let TokenKind::Str(text) = &self.peek()?.kind else {
                    return Err(self.error("docs string"));
                };
                attributes.docs = Some(text.clone());
                self.pos += 1;
            }
            _ => {
                return Err(ParseError::UnknownAttribute {
                    name,
                    line: token.line,
                    column: token.column,
                });
            }
        }
        self.expect_punct(')')
    }

    fn parse_platform(&mut self) -> Result<Platform, ParseError> {
        let token = self.peek()?.clone();
        let name = self.expect_ident("platform")?;
        Platform::parse(&name).ok_or(ParseError::UnknownPlatform {
            name,
            line: token.line,
            column: token.column,
        })
    }

    fn parse_platform_list(&mut self) -> Result<Vec<Platform>, ParseError> {
        let mut platforms = Vec::new();
        while !self.check_punct(')')? {
            platforms.push(self.parse_platform()?);
            if !self.eat_punct(',')? {
                break;
            }
        }
        Ok(platforms)
    }

    fn parse_qualified_name(&mut self) -> Result<String, ParseError> {
        let mut name = self.expect_ident("name")?;
        while self.peek()?.kind == TokenKind::ColonColon {
            self.pos += 1;
            name.push_str("::");
            name.push_str(&self.expect_ident("name after '::'")?);
        }
        Ok(name)
    }

    fn parse_class(&mut self, attributes: Attributes) -> Result<Class, ParseError> {
        let mut class = Class::new(self.parse_qualified_name()?);
        class.attributes = attributes;

        if self.eat_punct(':')? {
            loop {
                class.superclasses.push(self.parse_qualified_name()?);
                if !self.eat_punct(',')? {
                    break;
                }
            }
        }

        self.expect_punct('{')?;
        while !self.eat_punct('}')? {
            if self.at_eof()? {
                return Err(self.error("'}'"));
            }
            class.fields.push(self.parse_field()?);
        }
        self.eat_punct(';')?;

        Ok(class)
    }

    fn parse_field(&mut self) -> Result<Field, ParseError> {
        if self.peek()?.is_ident("PAD") && self.peek_at(1)?.is_punct('=') {
            self.pos += 2;
            let mut pad = PadField::default();
            loop {
                let platform = self.parse_platform()?;
                let amount = self.expect_int("pad size")?;
                pad.amounts.push((platform, amount));
                if !self.eat_punct(',')? {
                    break;
                }
            }
            self.expect_punct(';')?;
            return Ok(Field::Pad(pad));
        }

        let attributes = self.parse_attributes()?;
        self.parse_member_or_function(attributes)
    }

    fn parse_member_or_function(&mut self, attributes: Attributes) -> Result<Field, ParseError> {
        let mut qualifiers = Qualifiers::default();
        loop {
            if self.eat_ident("virtual")? {
                qualifiers.is_virtual = true;
            } else if self.eat_ident("static")? {
                qualifiers.is_static = true;
            } else if self.eat_ident("callback")? {
                qualifiers.is_callback = true;
            } else {
                break;
            }
        }

        if self.eat_punct('~')? {
            let name = format!("~{}", self.expect_ident("destructor name")?);
            return self.finish_function(name, TypeRef::default(), qualifiers, attributes);
        }

        let start = self.peek()?.clone();
        let ty = self.parse_type()?;

        // Constructor: what looked like a type is the class name.
        if self.check_punct('(')? {
            return self.finish_function(ty.name, TypeRef::default(), qualifiers, attributes);
        }

        let name = self.parse_function_or_member_name()?;
        if self.check_punct('(')? {
            return self.finish_function(name, ty, qualifiers, attributes);
        }

        if qualifiers.any() {
            return Err(ParseError::unexpected(
                "function after qualifier",
                format!("member '{name}'"),
                start.line,
                start.column,
            ));
        }

        let array_length = if self.eat_punct('[')? {
            let length = self.expect_int("array length")?;
            self.expect_punct(']')?;
            Some(length)
        } else {
            None
        };
        self.expect_punct(';')?;

        Ok(Field::Member(MemberField {
            name,
            ty,
            array_length,
        }))
    }

    fn parse_function_or_member_name(&mut self) -> Result<String, ParseError> {
        if !self.eat_ident("operator")? {
            return self.expect_ident("name");
        }
        let mut name = String::from("operator");
        if self.check_punct('(')? && self.peek_at(1)?.is_punct(')') {
            self.pos += 2;
            name.push_str("()");
            return Ok(name);
        }
        while !self.check_punct('(')? {
            if self.at_eof()? {
                return Err(self.error("'(' after operator"));
            }
            let token = self.advance()?;
            name.push_str(&self.src[token.start..token.end]);
        }
        Ok(name)
    }

    fn finish_function(
        &mut self,
        name: String,
        ret: TypeRef,
        qualifiers: Qualifiers,
        attributes: Attributes,
    ) -> Result<Field, ParseError> {
        let mut prototype = FunctionPrototype::new(name, ret);
        prototype.is_virtual = qualifiers.is_virtual;
        prototype.is_static = qualifiers.is_static;
        prototype.is_callback = qualifiers.is_callback;

        self.expect_punct('(')?;
        if !self.eat_punct(')')? {
            loop {
                if self.peek()?.kind == TokenKind::Ellipsis {
                    self.pos += 1;
                    prototype.args.push(Argument {
                        name: String::new(),
                        ty: TypeRef::new("..."),
                    });
                } else {
                    let ty = self.parse_type()?;
                    let name = match &self.peek()?.kind {
                        TokenKind::Ident(name) => {
                            let name = name.clone();
                            self.pos += 1;
                            name
                        }
                        _ => format!("p{}", prototype.args.len()),
                    };
                    prototype.args.push(Argument { name, ty });
                }
                if !self.eat_punct(',')? {
                    break;
                }
            }
            self.expect_punct(')')?;
        }

        prototype.is_const = self.eat_ident("const")?;

        let mut function = FunctionBindField::new(prototype);
        function.attributes = attributes;

        if self.eat_punct('=')? {
            loop {
                let platform = self.parse_platform()?;
                let value = if let TokenKind::Int(address) = self.peek()?.kind {
                    self.pos += 1;
                    BindValue::Address(address)
                } else if self.eat_ident("inline")? {
                    BindValue::Inline
                } else {
                    BindValue::Linked
                };
                function.bindings.push(Binding { platform, value });
                if !self.eat_punct(',')? {
                    break;
                }
            }
        }

        if self.check_punct('{')? {
            function.inline_body = Some(self.parse_raw_body()?);
        } else {
            self.expect_punct(';')?;
        }

        Ok(Field::FunctionBind(function))
    }

    /// Consumes a balanced `{ ... }` block of raw C++ and returns its inner
    /// text. The body is scanned straight from the source, so it may hold
    /// anything C++ allows.
    fn parse_raw_body(&mut self) -> Result<String, ParseError> {
        let open = self.advance()?;
        // Drop lookahead past the brace; the lexer resumes after the body.
        self.tokens.truncate(self.pos);
        self.lexer.seek(open.end, open.line, open.column + 1);
        let close = self.lexer.skip_raw_block(open.line, open.column)?;
        Ok(self.src[open.end..close].trim().to_string())
    }

    fn parse_type(&mut self) -> Result<TypeRef, ParseError> {
        let leading_const = self.eat_ident("const")?;
        let mut ty = TypeRef::default();
        let mut text = String::new();

        if self.eat_ident("struct")? {
            ty.is_struct = true;
        } else if self.eat_ident("enum")? {
            text.push_str("enum ");
        }

        if matches!(&self.peek()?.kind, TokenKind::Ident(w) if BUILTIN_WORDS.contains(&w.as_str())) {
            let mut words = Vec::new();
            while let TokenKind::Ident(word) = &self.peek()?.kind {
                if !BUILTIN_WORDS.contains(&word.as_str()) {
                    break;
                }
                words.push(word.clone());
                self.pos += 1;
            }
            text.push_str(&words.join(" "));
        } else {
            text.push_str(&self.parse_qualified_name()?);
            if self.check_punct('<')? {
                text.push_str(&self.parse_template_args()?);
            }
        }

        loop {
            if self.eat_punct('*')? {
                text.push('*');
            } else if self.eat_punct('&')? {
                text.push('&');
            } else if self.eat_ident("const")? {
                text.push_str(" const");
            } else {
                break;
            }
        }

        ty.name = if leading_const {
            format!("const {text}")
        } else {
            text
        };
        Ok(ty)
    }

    /// Consumes a balanced `<...>` list and returns it as normalised text.
    fn parse_template_args(&mut self) -> Result<String, ParseError> {
        let first = self.pos;
        let mut depth = 0usize;
        loop {
            let token = self.advance()?;
            match token.kind {
                TokenKind::Punct('<') => depth += 1,
                TokenKind::Punct('>') => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                TokenKind::Eof => return Err(ParseError::eof("'>' closing template arguments")),
                _ => {}
            }
        }
        Ok(self.render_tokens(&self.tokens[first..self.pos]))
    }

    fn render_tokens(&self, tokens: &[Token]) -> String {
        let wordish = |t: &Token| matches!(t.kind, TokenKind::Ident(_) | TokenKind::Int(_));
        let mut out = String::new();
        let mut previous: Option<&Token> = None;
        for token in tokens {
            if let Some(prev) = previous {
                if (wordish(prev) && wordish(token)) || prev.is_punct(',') {
                    out.push(' ');
                }
            }
            out.push_str(&self.src[token.start..token.end]);
            previous = Some(token);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_one(src: &str) -> Class {
        let root = parse(src).expect("Failed to parse");
        assert_eq!(root.classes.len(), 1);
        root.classes.into_iter().next().expect("one class")
    }

    fn function(field: &Field) -> &FunctionBindField {
        match field {
            Field::FunctionBind(f) => f,
            other => panic!("expected function, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_empty() {
        let root = parse("  // nothing here\n").expect("Failed to parse");
        assert!(root.classes.is_empty());
        assert!(root.functions.is_empty());
    }

    #[test]
    fn test_parse_class_with_superclasses() {
        let class = parse_one("class MenuLayer : cocos2d::CCLayer, FLAlertLayerProtocol {}");
        assert_eq!(class.name, "MenuLayer");
        assert_eq!(class.superclasses, vec!["cocos2d::CCLayer", "FLAlertLayerProtocol"]);
        assert!(class.fields.is_empty());
    }

    #[test]
    fn test_parse_member_pad_function_order() {
        let class = parse_one(
            "class PlayerManager {
                int health;
                PAD = win 0x8, android32 0x4;
                virtual void update();
            }",
        );

        assert_eq!(class.fields.len(), 3);
        assert_eq!(
            class.fields[0],
            Field::Member(MemberField {
                name: "health".into(),
                ty: TypeRef::new("int"),
                array_length: None,
            })
        );
        assert_eq!(
            class.fields[1],
            Field::Pad(PadField {
                amounts: vec![(Platform::Windows, 8), (Platform::Android32, 4)],
            })
        );
        let update = &function(&class.fields[2]).prototype;
        assert_eq!(update.name, "update");
        assert_eq!(update.ret.name, "void");
        assert!(update.is_virtual);
        assert!(!update.is_static);
    }

    #[test]
    fn test_parse_arguments_keep_order_and_struct_flag() {
        let class = parse_one(
            "class A {
                static A* create(gd::string const& name, struct cocos2d::ccColor3B color, int);
            }",
        );
        let proto = &function(&class.fields[0]).prototype;
        assert!(proto.is_static);
        assert_eq!(proto.ret.name, "A*");
        let args: Vec<_> = proto
            .args
            .iter()
            .map(|a| (a.name.as_str(), a.ty.name.as_str(), a.ty.is_struct))
            .collect();
        assert_eq!(
            args,
            vec![
                ("name", "gd::string const&", false),
                ("color", "cocos2d::ccColor3B", true),
                ("p2", "int", false),
            ]
        );
    }

    #[test]
    fn test_parse_const_and_bindings() {
        let class = parse_one(
            "class A {
                int getValue() const = win 0x1234, mac 0x5678, ios inline, android;
            }",
        );
        let bind = function(&class.fields[0]);
        assert!(bind.prototype.is_const);
        assert_eq!(
            bind.bindings,
            vec![
                Binding { platform: Platform::Windows, value: BindValue::Address(0x1234) },
                Binding { platform: Platform::Mac, value: BindValue::Address(0x5678) },
                Binding { platform: Platform::Ios, value: BindValue::Inline },
                Binding { platform: Platform::Android, value: BindValue::Linked },
            ]
        );
    }

    #[test]
    fn test_parse_inline_body() {
        let class = parse_one(
            "class A {
                bool isReady() = ios inline { if (m_a) { return true; } return false; }
                int m_a;
            }",
        );
        let bind = function(&class.fields[0]);
        assert_eq!(
            bind.inline_body.as_deref(),
            Some("if (m_a) { return true; } return false;")
        );
        assert!(matches!(class.fields[1], Field::Member(_)));
    }

    #[test]
    fn test_parse_inline_body_raw_cpp() {
        let class = parse_one(
            r#"class A {
                bool off() { return !m_on; }
                bool isReady() = win inline { return this->m_a != 0.5f && m_c == 'c'; }
                const char* label() { return m_b ? "{ open" : "close }"; /* } */ }
                // trailing } in a comment
                int m_a;
            }"#,
        );
        let bodies: Vec<_> = class
            .fields
            .iter()
            .filter_map(|f| match f {
                Field::FunctionBind(bind) => bind.inline_body.as_deref(),
                _ => None,
            })
            .collect();
        assert_eq!(
            bodies,
            vec![
                "return !m_on;",
                "return this->m_a != 0.5f && m_c == 'c';",
                r#"return m_b ? "{ open" : "close }"; /* } */"#,
            ]
        );
        assert_eq!(
            function(&class.fields[1]).bindings,
            vec![Binding { platform: Platform::Windows, value: BindValue::Inline }]
        );
        assert!(matches!(class.fields[3], Field::Member(_)));
    }

    #[test]
    fn test_parse_free_function_inline_body() {
        let root = parse("int twice(int x) { return x + x; }
class B {}").expect("Failed to parse");
        assert_eq!(root.functions[0].inline_body.as_deref(), Some("return x + x;"));
        assert_eq!(root.classes[0].name, "B");
    }

    #[test]
    fn test_unterminated_inline_body() {
        let err = parse("class A {
  void f() { if (x) { y(); }").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Unterminated { what: "inline body", line: 2, column: 12 }
        ));
    }

    #[test]
    fn test_error_shows_number_as_written() {
        let err = parse("class A { int m_a 4; }").unwrap_err();
        assert!(err.to_string().contains("found '4'"), "{err}");
        let err = parse("class A { int m_a 0x10; }").unwrap_err();
        assert!(err.to_string().contains("found '0x10'"), "{err}");
    }

    #[test]
    fn test_parse_templates_and_builtins() {
        let class = parse_one(
            "class A {
                gd::map<gd::string, gd::vector<int>> m_map;
                unsigned long long m_big;
                const char* m_text;
                float m_values[4];
            }",
        );
        let members: Vec<_> = class
            .fields
            .iter()
            .map(|f| match f {
                Field::Member(m) => (m.ty.name.clone(), m.name.clone(), m.array_length),
                other => panic!("expected member, got {other:?}"),
            })
            .collect();
        assert_eq!(
            members,
            vec![
                ("gd::map<gd::string, gd::vector<int>>".into(), "m_map".into(), None),
                ("unsigned long long".into(), "m_big".into(), None),
                ("const char*".into(), "m_text".into(), None),
                ("float".into(), "m_values".into(), Some(4)),
            ]
        );
    }

    #[test]
    fn test_parse_constructor_destructor_operator() {
        let class = parse_one(
            "class A {
                A();
                virtual ~A();
                bool operator==(A const& other);
            }",
        );
        let names: Vec<_> = class.functions().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "~A", "operator=="]);
        let ctor = class.functions().next().expect("constructor");
        assert!(ctor.is_special_member());
        assert!(class.functions().nth(1).expect("destructor").is_virtual);
    }

    #[test]
    fn test_parse_attributes() {
        let root = parse(
            r#"[[link(android), depends(GJGameLevel)]]
            class A {
                [[docs("Says hello")]]
                void hello() = win 0x10;
            }"#,
        )
        .expect("Failed to parse");
        let class = &root.classes[0];
        assert_eq!(class.attributes.links, vec![Platform::Android]);
        assert_eq!(class.attributes.depends, vec!["GJGameLevel"]);
        let bind = function(&class.fields[0]);
        assert_eq!(bind.attributes.docs.as_deref(), Some("Says hello"));
    }

    #[test]
    fn test_parse_free_function_and_varargs() {
        let root = parse("void log(char const* fmt, ...) = win 0x99;").expect("Failed to parse");
        assert!(root.classes.is_empty());
        assert_eq!(root.functions.len(), 1);
        let proto = &root.functions[0].prototype;
        assert_eq!(proto.args[1].ty.name, "...");
        assert!(proto.args[1].name.is_empty());
    }

    #[test]
    fn test_unknown_platform() {
        let err = parse("class A { void f() = linux 0x1; }").unwrap_err();
        assert!(matches!(err, ParseError::UnknownPlatform { ref name, .. } if name == "linux"));
    }

    #[test]
    fn test_unknown_attribute() {
        let err = parse("[[frobnicate(x)]] class A {}").unwrap_err();
        assert!(matches!(err, ParseError::UnknownAttribute { .. }));
    }

    #[test]
    fn test_missing_semicolon() {
        let err = parse("class A { int m_a }").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { line: 1, .. }));
    }

    #[test]
    fn test_unclosed_class() {
        let err = parse("class A { int m_a;").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_qualified_member_rejected() {
        let err = parse("class A { static int m_count; }").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }
}
