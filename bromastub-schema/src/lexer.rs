//! Tokenizer for the interface description language.

use crate::error::ParseError;
use std::fmt;

/// Token kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier or keyword.
    Ident(String),
    /// Integer literal (decimal or `0x` hex).
    Int(u64),
    /// String literal with escapes resolved.
    Str(String),
    /// `::`
    ColonColon,
    /// `...`
    Ellipsis,
    /// Single punctuation character.
    Punct(char),
    /// End of input.
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(s) => write!(f, "'{s}'"),
            Self::Int(v) => write!(f, "'{v}'"),
            Self::Str(s) => write!(f, "\"{s}\""),
            Self::ColonColon => f.write_str("'::'"),
            Self::Ellipsis => f.write_str("'...'"),
            Self::Punct(c) => write!(f, "'{c}'"),
            Self::Eof => f.write_str("end of input"),
        }
    }
}

/// Token with its source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token kind.
    pub kind: TokenKind,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
    /// 1-based line.
    pub line: usize,
    /// 1-based column.
    pub column: usize,
}

impl Token {
    /// Returns true if the token is the given punctuation character.
    #[must_use]
    pub fn is_punct(&self, c: char) -> bool {
        self.kind == TokenKind::Punct(c)
    }

    /// Returns true if the token is the given identifier or keyword.
    #[must_use]
    pub fn is_ident(&self, name: &str) -> bool {
        matches!(&self.kind, TokenKind::Ident(s) if s == name)
    }
}

const PUNCTUATION: &[char] = &[
    '{', '}', '(', ')', '[', ']', '<', '>', ',', ';', '=', '*', '&', '~', ':',
];

/// Splits source text into tokens on demand.
pub(crate) struct Lexer<'a> {
    src: &'a str,
    offset: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Self {
            src,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn peek_char(&self) -> Option<char> {
        self.src[self.offset..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut ahead = self.src[self.offset..].chars();
        ahead.next();
        ahead.next()
    }

    /// Moves the cursor to a byte offset whose line and column are known.
    pub(crate) fn seek(&mut self, offset: usize, line: usize, column: usize) {
        self.offset = offset;
        self.line = line;
        self.column = column;
    }

    fn skip_trivia(&mut self) -> Result<(), ParseError> {
        loop {
            match (self.peek_char(), self.peek_second()) {
                (Some(c), _) if c.is_whitespace() => {
                    self.bump();
                }
                (Some('/'), Some('/')) => {
                    while let Some(c) = self.peek_char() {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                (Some('/'), Some('*')) => {
                    let (line, column) = (self.line, self.column);
                    self.bump();
                    self.bump();
                    let mut closed = false;
                    while let Some(c) = self.bump() {
                        if c == '*' && self.peek_char() == Some('/') {
                            self.bump();
                            closed = true;
                            break;
                        }
                    }
                    if !closed {
                        return Err(ParseError::Unterminated {
                            what: "comment",
                            line,
                            column,
                        });
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    pub(crate) fn next_token(&mut self) -> Result<Token, ParseError> {
        self.skip_trivia()?;

        let (line, column) = (self.line, self.column);
        let start = self.offset;
        let Some(c) = self.peek_char() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                start,
                end: start,
                line,
                column,
            });
        };

        let kind = if c.is_ascii_alphabetic() || c == '_' {
            while matches!(self.peek_char(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
                self.bump();
            }
            TokenKind::Ident(self.src[start..self.offset].to_string())
        } else if c.is_ascii_digit() {
            while matches!(self.peek_char(), Some(c) if c.is_ascii_alphanumeric()) {
                self.bump();
            }
            let text = &self.src[start..self.offset];
            TokenKind::Int(parse_int(text).ok_or_else(|| ParseError::InvalidNumber {
                text: text.to_string(),
                line,
                column,
            })?)
        } else if c == '"' {
            self.bump();
            TokenKind::Str(self.string_body(line, column)?)
        } else if c == ':' && self.peek_second() == Some(':') {
            self.bump();
            self.bump();
            TokenKind::ColonColon
        } else if c == '.' && self.src[start..].starts_with("...") {
            self.bump();
            self.bump();
            self.bump();
            TokenKind::Ellipsis
        } else if PUNCTUATION.contains(&c) {
            self.bump();
            TokenKind::Punct(c)
        } else {
            return Err(ParseError::UnexpectedCharacter {
                character: c,
                line,
                column,
            });
        };

        Ok(Token {
            kind,
            start,
            end: self.offset,
            line,
            column,
        })
    }

    fn string_body(&mut self, line: usize, column: usize) -> Result<String, ParseError> {
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(out),
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some(other) => out.push(other),
                    None => break,
                },
                Some(c) => out.push(c),
                None => break,
            }
        }
        Err(ParseError::Unterminated {
            what: "string",
            line,
            column,
        })
    }

    /// Skips a string or character literal without interpreting it.
    fn skip_quoted(&mut self, quote: char) -> Result<(), ParseError> {
        let (line, column) = (self.line, self.column);
        self.bump();
        loop {
            match self.bump() {
                Some('\\') => {
                    self.bump();
                }
                Some(c) if c == quote => return Ok(()),
                Some(_) => {}
                None => {
                    return Err(ParseError::Unterminated {
                        what: if quote == '"' { "string" } else { "character literal" },
                        line,
                        column,
                    });
                }
            }
        }
    }

    /// Skips raw C++ up to the `}` matching an already consumed `{`.
    ///
    /// Braces inside comments, string literals and character literals do
    /// not count. `line` and `column` locate the opening brace for errors.
    ///
    /// # Returns
    /// Byte offset of the closing brace; the cursor is left just past it.
    ///
    /// # Errors
    /// Returns `ParseError::Unterminated` if the input ends first.
    pub(crate) fn skip_raw_block(
        &mut self,
        line: usize,
        column: usize,
    ) -> Result<usize, ParseError> {
        let mut depth = 1usize;
        loop {
            let start = self.offset;
            match (self.peek_char(), self.peek_second()) {
                (None, _) => {
                    return Err(ParseError::Unterminated {
                        what: "inline body",
                        line,
                        column,
                    });
                }
                (Some('/'), Some('/' | '*')) => self.skip_trivia()?,
                (Some(quote @ ('"' | '\'')), _) => self.skip_quoted(quote)?,
                (Some('{'), _) => {
                    self.bump();
                    depth += 1;
                }
                (Some('}'), _) => {
                    self.bump();
                    depth -= 1;
                    if depth == 0 {
                        return Ok(start);
                    }
                }
                _ => {
                    self.bump();
                }
            }
        }
    }
}

fn parse_int(text: &str) -> Option<u64> {
    if let Some(hex) = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        u64::from_str_radix(hex, 16).ok()
    } else {
        text.parse().ok()
    }
}

/// Tokenizes a whole document. The last token is always [`TokenKind::Eof`].
///
/// Inline function bodies are raw C++ and are not accepted here; the parser
/// skips them with the lexer directly.
///
/// # Errors
/// Returns `ParseError` on unterminated comments or strings, malformed
/// numbers and characters outside the language.
pub fn tokenize(src: &str) -> Result<Vec<Token>, ParseError> {
    let mut lexer = Lexer::new(src);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}
