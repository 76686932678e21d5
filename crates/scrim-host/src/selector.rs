#![forbid(unsafe_code)]

//! Minimal CSS selector subset for host queries.
//!
//! The overlay core only ever queries with a fixed focusable-element
//! selector set plus caller-supplied initial-focus hints, so this matcher
//! supports exactly that slice:
//!
//! - comma-separated lists of compound selectors
//! - tag names, `#id`, `.class`
//! - attribute tests: `[attr]`, `[attr=value]`, `[attr^=value]`
//!   (values optionally double-quoted)
//! - `:not(<simple>)` with one simple selector inside
//!
//! Combinators (descendant, `>`, `~`) are deliberately absent; queries are
//! always "any descendant matching this compound".
//!
//! # Failure modes
//!
//! Malformed input parses to `None`; the host then matches nothing rather
//! than panicking.

/// A node's view of itself, as much as matching needs.
pub(crate) trait Element {
    fn tag(&self) -> &str;
    fn attr(&self, name: &str) -> Option<&str>;
}

/// A parsed selector list (`a, b, c`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SelectorList {
    alternatives: Vec<Compound>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    parts: Vec<Simple>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Simple {
    Id(String),
    Class(String),
    Attr { name: String, op: AttrOp },
    Not(Box<Simple>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
}

impl SelectorList {
    /// Parse a selector list. Returns `None` on anything outside the
    /// supported subset.
    pub(crate) fn parse(input: &str) -> Option<Self> {
        let mut alternatives = Vec::new();
        for piece in input.split(',') {
            let piece = piece.trim();
            if piece.is_empty() {
                return None;
            }
            alternatives.push(parse_compound(piece)?);
        }
        Some(Self { alternatives })
    }

    /// Whether the element matches any alternative in the list.
    pub(crate) fn matches(&self, element: &dyn Element) -> bool {
        self.alternatives.iter().any(|c| c.matches(element))
    }
}

impl Compound {
    fn matches(&self, element: &dyn Element) -> bool {
        if let Some(tag) = &self.tag
            && !tag.eq_ignore_ascii_case(element.tag())
        {
            return false;
        }
        self.parts.iter().all(|p| p.matches(element))
    }
}

impl Simple {
    fn matches(&self, element: &dyn Element) -> bool {
        match self {
            Self::Id(id) => element.attr("id") == Some(id.as_str()),
            Self::Class(class) => element
                .attr("class")
                .is_some_and(|v| v.split_ascii_whitespace().any(|c| c == class)),
            Self::Attr { name, op } => match (element.attr(name), op) {
                (Some(_), AttrOp::Exists) => true,
                (Some(v), AttrOp::Equals(want)) => v == want,
                (Some(v), AttrOp::Prefix(want)) => v.starts_with(want.as_str()),
                (None, _) => false,
            },
            Self::Not(inner) => !inner.matches(element),
        }
    }
}

fn parse_compound(input: &str) -> Option<Compound> {
    let mut chars = Cursor::new(input);
    let tag = chars.take_ident();
    let mut parts = Vec::new();
    while !chars.done() {
        parts.push(parse_simple(&mut chars)?);
    }
    if tag.is_none() && parts.is_empty() {
        return None;
    }
    Some(Compound { tag, parts })
}

fn parse_simple(chars: &mut Cursor<'_>) -> Option<Simple> {
    match chars.peek()? {
        '#' => {
            chars.next();
            chars.take_ident().map(Simple::Id)
        }
        '.' => {
            chars.next();
            chars.take_ident().map(Simple::Class)
        }
        '[' => {
            chars.next();
            let name = chars.take_ident()?;
            let op = match chars.peek()? {
                ']' => AttrOp::Exists,
                '^' => {
                    chars.next();
                    chars.expect('=')?;
                    AttrOp::Prefix(chars.take_attr_value()?)
                }
                '=' => {
                    chars.next();
                    AttrOp::Equals(chars.take_attr_value()?)
                }
                _ => return None,
            };
            chars.expect(']')?;
            Some(Simple::Attr { name, op })
        }
        ':' => {
            chars.next();
            let name = chars.take_ident()?;
            if name != "not" {
                return None;
            }
            chars.expect('(')?;
            let inner = parse_simple(chars)?;
            chars.expect(')')?;
            Some(Simple::Not(Box::new(inner)))
        }
        _ => None,
    }
}

struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { rest: input }
    }

    fn done(&self) -> bool {
        self.rest.is_empty()
    }

    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn next(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.rest = &self.rest[c.len_utf8()..];
        Some(c)
    }

    fn expect(&mut self, want: char) -> Option<()> {
        (self.next()? == want).then_some(())
    }

    fn take_ident(&mut self) -> Option<String> {
        let end = self
            .rest
            .char_indices()
            .find(|&(_, c)| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
            .map_or(self.rest.len(), |(i, _)| i);
        if end == 0 {
            return None;
        }
        let (ident, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(ident.to_string())
    }

    /// Attribute value, optionally double-quoted, terminated by `]`.
    fn take_attr_value(&mut self) -> Option<String> {
        if self.peek() == Some('"') {
            self.next();
            let end = self.rest.find('"')?;
            let value = self.rest[..end].to_string();
            self.rest = &self.rest[end + 1..];
            Some(value)
        } else {
            let end = self.rest.find(']')?;
            if end == 0 {
                return None;
            }
            let value = self.rest[..end].to_string();
            self.rest = &self.rest[end..];
            Some(value)
        }
    }
}
