//! Raw content: a pre-built node or a markup string parsed into one.

use crate::error::RawError;
use crate::props::{PropValue, Props};
use crate::NodeId;

#[derive(Clone, Debug, PartialEq)]
pub enum Raw {
    Node(NodeId),
    Markup(String),
}

/// Parsed markup, before it is built into the tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Markup {
    Element {
        tag: String,
        attrs: Props,
        children: Vec<Markup>,
    },
    Text(String),
}

/// Parses a markup fragment into its top-level nodes.
///
/// Attribute values are strings; an attribute without a value is `true`.
/// Whitespace-only text between elements is dropped.
pub fn parse_markup(input: &str) -> Result<Vec<Markup>, RawError> {
    let mut parser = Parser { input, pos: 0 };
    let mut stack: Vec<(String, Props, Vec<Markup>)> = Vec::new();
    let mut roots = Vec::new();

    while parser.pos < input.len() {
        let node = if parser.eat("<!--") {
            parser.skip_comment()?;
            None
        } else if parser.eat("</") {
            let offset = parser.pos;
            let tag = parser.name()?;
            parser.skip_whitespace();
            parser.expect('>')?;
            let Some((open, attrs, children)) = stack.pop() else {
                return Err(RawError::UnmatchedClose { offset, tag });
            };
            if open != tag {
                return Err(RawError::MismatchedClose {
                    offset,
                    expected: open,
                    found: tag,
                });
            }
            Some(Markup::Element {
                tag,
                attrs,
                children,
            })
        } else if parser.peek() == Some('<') {
            parser.pos += 1;
            let tag = parser.name()?;
            let attrs = parser.attributes()?;
            if parser.eat("/>") {
                Some(Markup::Element {
                    tag,
                    attrs,
                    children: Vec::new(),
                })
            } else {
                parser.expect('>')?;
                stack.push((tag, attrs, Vec::new()));
                None
            }
        } else {
            let text = parser.text();
            if text.trim().is_empty() {
                None
            } else {
                Some(Markup::Text(unescape(&text)))
            }
        };

        if let Some(node) = node {
            match stack.last_mut() {
                Some((_, _, children)) => children.push(node),
                None => roots.push(node),
            }
        }
    }

    if !stack.is_empty() {
        return Err(RawError::UnexpectedEof { offset: input.len() });
    }
    if roots.is_empty() {
        return Err(RawError::Empty);
    }
    Ok(roots)
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn rest(&self) -> &str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), RawError> {
        match self.peek() {
            Some(found) if found == expected => {
                self.pos += found.len_utf8();
                Ok(())
            }
            Some(found) => Err(RawError::UnexpectedChar {
                offset: self.pos,
                found,
            }),
            None => Err(RawError::UnexpectedEof { offset: self.pos }),
        }
    }

    fn skip_whitespace(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.input.len() - trimmed.len();
    }

    fn skip_comment(&mut self) -> Result<(), RawError> {
        match self.rest().find("-->") {
            Some(end) => {
                self.pos += end + 3;
                Ok(())
            }
            None => Err(RawError::UnexpectedEof {
                offset: self.input.len(),
            }),
        }
    }

    fn name(&mut self) -> Result<String, RawError> {
        let start = self.pos;
        let len = self
            .rest()
            .find(|c: char| !(c.is_alphanumeric() || matches!(c, '-' | '_' | ':' | '.')))
            .unwrap_or(self.rest().len());
        if len == 0 {
            return match self.peek() {
                Some(found) => Err(RawError::UnexpectedChar {
                    offset: start,
                    found,
                }),
                None => Err(RawError::UnexpectedEof { offset: start }),
            };
        }
        self.pos += len;
        Ok(self.input[start..self.pos].to_owned())
    }

    fn attributes(&mut self) -> Result<Props, RawError> {
        let mut attrs = Props::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('>') | Some('/') => return Ok(attrs),
                None => return Err(RawError::UnexpectedEof { offset: self.pos }),
                Some(_) => {}
            }
            let name = self.name()?;
            self.skip_whitespace();
            if !self.eat("=") {
                attrs.insert(name, PropValue::Bool(true));
                continue;
            }
            self.skip_whitespace();
            let quote = match self.peek() {
                Some(quote @ ('"' | '\'')) => quote,
                Some(found) => {
                    return Err(RawError::UnexpectedChar {
                        offset: self.pos,
                        found,
                    })
                }
                None => return Err(RawError::UnexpectedEof { offset: self.pos }),
            };
            self.pos += 1;
            let Some(end) = self.rest().find(quote) else {
                return Err(RawError::UnexpectedEof {
                    offset: self.input.len(),
                });
            };
            let value = unescape(&self.rest()[..end]);
            self.pos += end + 1;
            attrs.insert(name, PropValue::Str(value));
        }
    }

    fn text(&mut self) -> String {
        let len = self.rest().find('<').unwrap_or(self.rest().len());
        let text = self.rest()[..len].to_owned();
        self.pos += len;
        text
    }
}

/// Decodes the five predefined entities and numeric character references.
/// Unknown entities are kept verbatim.
pub fn unescape(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        output.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest.find(';').and_then(|semi| {
            let entity = &rest[1..semi];
            let ch = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                    .and_then(char::from_u32),
            };
            ch.map(|ch| (ch, semi))
        });
        match decoded {
            Some((ch, semi)) => {
                output.push(ch);
                rest = &rest[semi + 1..];
            }
            None => {
                output.push('&');
                rest = &rest[1..];
            }
        }
    }
    output.push_str(rest);
    output
}

#[cfg(test)]
#[path = "tests/raw_tests.rs"]
mod tests;
