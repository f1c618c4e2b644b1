//! Parser for annotation strings.
//!
//! Grammar:
//!
//! ```text
//! expr    := term ('|' term)*
//! term    := name ('[' expr (',' expr)* ']')? | string | '...'
//! ```
//!
//! `Annotated` keeps its metadata as raw text, `Literal` takes plain values,
//! and a quoted string anywhere else is a forward reference.

use super::{Origin, TypeExpr, UnionStyle};
use crate::{ClassId, TypeParseError, Value};

/// Prefixes dropped before a name is matched against the special forms.
const MODULE_PREFIXES: &[&str] = &[
    "typing_extensions.",
    "typing.",
    "collections.abc.",
    "collections.",
    "builtins.",
];

/// Parse an annotation, resolving plain class names with `resolve`.
///
/// `resolve` receives the name exactly as written first, then with any
/// module prefix removed.
pub fn parse_type(
    src: &str,
    resolve: impl Fn(&str) -> Option<ClassId>,
) -> Result<TypeExpr, TypeParseError> {
    let mut parser = Parser {
        src,
        pos: 0,
        resolve: &resolve,
    };

    parser.skip_ws();
    if parser.peek().is_none() {
        return Err(TypeParseError::Empty);
    }

    let expr = parser.expr()?;
    parser.skip_ws();
    match parser.peek() {
        None => Ok(expr),
        Some(found) => Err(TypeParseError::UnexpectedChar {
            found,
            offset: parser.pos,
        }),
    }
}

fn strip_module_prefix(name: &str) -> &str {
    MODULE_PREFIXES
        .iter()
        .find_map(|prefix| name.strip_prefix(prefix))
        .unwrap_or(name)
}

struct Parser<'a, R> {
    src: &'a str,
    pos: usize,
    resolve: &'a R,
}

impl<'a, R> Parser<'a, R>
where
    R: Fn(&str) -> Option<ClassId>,
{
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_ws();
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), TypeParseError> {
        self.skip_ws();
        match self.peek() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            }
            Some(found) => Err(TypeParseError::UnexpectedChar {
                found,
                offset: self.pos,
            }),
            None => Err(TypeParseError::UnexpectedEnd { offset: self.pos }),
        }
    }

    fn expr(&mut self) -> Result<TypeExpr, TypeParseError> {
        let mut alternatives = vec![self.term()?];
        while self.eat('|') {
            alternatives.push(self.term()?);
        }

        if alternatives.len() == 1 {
            Ok(alternatives.remove(0))
        } else {
            Ok(TypeExpr::union(UnionStyle::Pipe, alternatives))
        }
    }

    fn term(&mut self) -> Result<TypeExpr, TypeParseError> {
        self.skip_ws();
        let start = self.pos;
        match self.peek() {
            None => Err(TypeParseError::UnexpectedEnd { offset: start }),
            Some('\'' | '"') => Ok(TypeExpr::ForwardRef(self.string()?)),
            Some('.') if self.src[start..].starts_with("...") => {
                self.pos += 3;
                Ok(TypeExpr::Ellipsis)
            }
            Some(c) if c.is_alphabetic() || c == '_' => {
                let name = self.name();
                self.named(name, start)
            }
            Some(found) => Err(TypeParseError::UnexpectedChar {
                found,
                offset: start,
            }),
        }
    }

    fn name(&mut self) -> &'a str {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_' || c == '.') {
            self.bump();
        }
        &self.src[start..self.pos]
    }

    fn named(&mut self, raw: &str, start: usize) -> Result<TypeExpr, TypeParseError> {
        let name = strip_module_prefix(raw);
        self.skip_ws();
        let subscripted = self.peek() == Some('[');

        match name {
            "Any" | "None" | "NoneType" if subscripted => Err(TypeParseError::NotGeneric {
                name: name.to_string(),
                offset: start,
            }),
            "Any" => Ok(TypeExpr::Any),
            "None" | "NoneType" => Ok(TypeExpr::None),
            "Optional" => {
                let mut args = self.subscript(name, start)?;
                if args.len() != 1 {
                    return Err(arity(name, "exactly 1 argument", args.len(), start));
                }
                Ok(TypeExpr::optional(args.remove(0)))
            }
            "Union" => {
                let args = self.subscript(name, start)?;
                Ok(TypeExpr::union(UnionStyle::Union, args))
            }
            "Annotated" => self.annotated(name, start),
            "Literal" => self.literal(name, start),
            _ => {
                if let Some(origin) = Origin::from_name(name) {
                    let args = if subscripted { self.args()? } else { Vec::new() };
                    return Ok(TypeExpr::Generic {
                        origin,
                        spelling: name.to_string(),
                        args,
                    });
                }

                let id = (self.resolve)(raw)
                    .or_else(|| (self.resolve)(name))
                    .ok_or_else(|| TypeParseError::UnknownName {
                        name: raw.to_string(),
                        offset: start,
                    })?;
                if subscripted {
                    return Err(TypeParseError::NotGeneric {
                        name: raw.to_string(),
                        offset: start,
                    });
                }
                Ok(TypeExpr::Class(id))
            }
        }
    }

    fn subscript(&mut self, name: &str, start: usize) -> Result<Vec<TypeExpr>, TypeParseError> {
        self.skip_ws();
        if self.peek() != Some('[') {
            return Err(TypeParseError::NotSubscripted {
                name: name.to_string(),
                offset: start,
            });
        }
        self.args()
    }

    fn args(&mut self) -> Result<Vec<TypeExpr>, TypeParseError> {
        self.expect('[')?;
        let mut args = vec![self.expr()?];
        while self.eat(',') {
            args.push(self.expr()?);
        }
        self.expect(']')?;
        Ok(args)
    }

    fn annotated(&mut self, name: &str, start: usize) -> Result<TypeExpr, TypeParseError> {
        self.skip_ws();
        if self.peek() != Some('[') {
            return Err(TypeParseError::NotSubscripted {
                name: name.to_string(),
                offset: start,
            });
        }
        self.expect('[')?;
        let inner = self.expr()?;

        let mut metadata = Vec::new();
        while self.eat(',') {
            metadata.push(self.raw_metadata()?);
        }
        self.expect(']')?;

        if metadata.is_empty() {
            return Err(arity(name, "at least 2 arguments", 1, start));
        }
        Ok(TypeExpr::Annotated {
            inner: Box::new(inner),
            metadata,
        })
    }

    /// Capture one `Annotated` metadata argument verbatim.
    fn raw_metadata(&mut self) -> Result<String, TypeParseError> {
        self.skip_ws();
        let start = self.pos;
        let mut depth = 0usize;

        loop {
            match self.peek() {
                None => return Err(TypeParseError::UnexpectedEnd { offset: self.pos }),
                Some('\'' | '"') => {
                    self.string()?;
                }
                Some('(' | '[' | '{') => {
                    depth += 1;
                    self.bump();
                }
                Some(']') if depth == 0 => break,
                Some(',') if depth == 0 => break,
                Some(found @ (')' | ']' | '}')) => {
                    if depth == 0 {
                        return Err(TypeParseError::UnexpectedChar {
                            found,
                            offset: self.pos,
                        });
                    }
                    depth -= 1;
                    self.bump();
                }
                Some(_) => {
                    self.bump();
                }
            }
        }

        let raw = self.src[start..self.pos].trim_end();
        if raw.is_empty() {
            let found = self.peek().unwrap_or(']');
            return Err(TypeParseError::UnexpectedChar {
                found,
                offset: self.pos,
            });
        }
        Ok(raw.to_string())
    }

    fn literal(&mut self, name: &str, start: usize) -> Result<TypeExpr, TypeParseError> {
        self.skip_ws();
        if self.peek() != Some('[') {
            return Err(TypeParseError::NotSubscripted {
                name: name.to_string(),
                offset: start,
            });
        }
        self.expect('[')?;
        let mut values = vec![self.literal_value()?];
        while self.eat(',') {
            values.push(self.literal_value()?);
        }
        self.expect(']')?;
        Ok(TypeExpr::Literal(values))
    }

    fn literal_value(&mut self) -> Result<Value, TypeParseError> {
        self.skip_ws();
        let start = self.pos;
        match self.peek() {
            Some('\'' | '"') => Ok(Value::Str(self.string()?)),
            Some(c) if c.is_ascii_digit() || c == '-' => {
                self.bump();
                while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == '_') {
                    self.bump();
                }
                self.src[start..self.pos]
                    .replace('_', "")
                    .parse()
                    .map(Value::Int)
                    .map_err(|_| TypeParseError::InvalidLiteral { offset: start })
            }
            Some(c) if c.is_alphabetic() => match self.name() {
                "True" => Ok(Value::Bool(true)),
                "False" => Ok(Value::Bool(false)),
                "None" => Ok(Value::None),
                _ => Err(TypeParseError::InvalidLiteral { offset: start }),
            },
            Some(_) => Err(TypeParseError::InvalidLiteral { offset: start }),
            None => Err(TypeParseError::UnexpectedEnd { offset: start }),
        }
    }

    /// A quoted string; returns its contents with escapes applied.
    fn string(&mut self) -> Result<String, TypeParseError> {
        let start = self.pos;
        let quote = self
            .bump()
            .ok_or(TypeParseError::UnexpectedEnd { offset: start })?;

        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(TypeParseError::UnterminatedString { offset: start }),
                Some('\\') => match self.bump() {
                    Some(c) => out.push(c),
                    None => return Err(TypeParseError::UnterminatedString { offset: start }),
                },
                Some(c) if c == quote => return Ok(out),
                Some(c) => out.push(c),
            }
        }
    }
}

fn arity(name: &str, expected: &'static str, found: usize, offset: usize) -> TypeParseError {
    TypeParseError::Arity {
        name: name.to_string(),
        expected,
        found,
        offset,
    }
}
