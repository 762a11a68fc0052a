//! Minimal CSS selector support
//!
//! Covers what the page scripts need: type, `#id`, `.class`, attribute
//! presence / equality / prefix matches, compound selectors and the
//! descendant combinator.

use super::element::Element;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unexpected character '{0}' in selector")]
    Unexpected(char),
    #[error("unterminated attribute selector")]
    UnterminatedAttribute,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrMatch {
    pub name: String,
    pub op: AttrOp,
}

/// One compound selector, e.g. `a.nav-link[href^="#"]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compound {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<AttrMatch>,
}

impl Compound {
    pub fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if *tag != element.tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.id.as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| element.has_class(c)) {
            return false;
        }
        self.attrs.iter().all(|a| match &a.op {
            AttrOp::Exists => element.has_attribute(&a.name),
            AttrOp::Equals(v) => element.attribute(&a.name) == Some(v.as_str()),
            AttrOp::Prefix(p) => element
                .attribute(&a.name)
                .is_some_and(|v| v.starts_with(p.as_str())),
        })
    }
}

/// Descendant chain of compound selectors, outermost first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    parts: Vec<Compound>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let mut parts = Vec::new();
        for token in split_descendants(input)? {
            parts.push(parse_compound(&token)?);
        }
        if parts.is_empty() {
            return Err(SelectorError::Empty);
        }
        Ok(Self { parts })
    }

    pub fn parts(&self) -> &[Compound] {
        &self.parts
    }

    /// The rightmost compound, which the candidate element itself must match
    pub fn subject(&self) -> &Compound {
        // parse() never produces an empty chain
        &self.parts[self.parts.len() - 1]
    }

    /// The compounds that must match ancestors, innermost first
    pub fn ancestors(&self) -> impl Iterator<Item = &Compound> {
        self.parts[..self.parts.len() - 1].iter().rev()
    }
}

/// Split on whitespace that is outside attribute brackets
fn split_descendants(input: &str) -> Result<Vec<String>, SelectorError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_brackets = false;
    let mut quote: Option<char> = None;

    for c in input.trim().chars() {
        match c {
            '"' | '\'' if in_brackets => {
                match quote {
                    Some(q) if q == c => quote = None,
                    None => quote = Some(c),
                    _ => {}
                }
                current.push(c);
            }
            '[' if quote.is_none() => {
                in_brackets = true;
                current.push(c);
            }
            ']' if quote.is_none() => {
                in_brackets = false;
                current.push(c);
            }
            c if c.is_whitespace() && !in_brackets => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            '>' | '+' | '~' | ',' if !in_brackets => return Err(SelectorError::Unexpected(c)),
            _ => current.push(c),
        }
    }
    if in_brackets {
        return Err(SelectorError::UnterminatedAttribute);
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    Ok(tokens)
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(chars: &[char], pos: &mut usize) -> String {
    let start = *pos;
    while *pos < chars.len() && is_ident_char(chars[*pos]) {
        *pos += 1;
    }
    chars[start..*pos].iter().collect()
}

fn parse_compound(token: &str) -> Result<Compound, SelectorError> {
    let chars: Vec<char> = token.chars().collect();
    let mut pos = 0;
    let mut compound = Compound::default();

    if pos < chars.len() && chars[pos] == '*' {
        pos += 1;
    } else {
        let tag = take_ident(&chars, &mut pos);
        if !tag.is_empty() {
            compound.tag = Some(tag.to_ascii_lowercase());
        }
    }

    while pos < chars.len() {
        match chars[pos] {
            '#' => {
                pos += 1;
                let id = take_ident(&chars, &mut pos);
                if id.is_empty() {
                    return Err(SelectorError::Unexpected('#'));
                }
                compound.id = Some(id);
            }
            '.' => {
                pos += 1;
                let class = take_ident(&chars, &mut pos);
                if class.is_empty() {
                    return Err(SelectorError::Unexpected('.'));
                }
                compound.classes.push(class);
            }
            '[' => {
                pos += 1;
                compound.attrs.push(parse_attr(&chars, &mut pos)?);
            }
            c => return Err(SelectorError::Unexpected(c)),
        }
    }
    Ok(compound)
}

fn parse_attr(chars: &[char], pos: &mut usize) -> Result<AttrMatch, SelectorError> {
    let name = take_ident(chars, pos);
    if name.is_empty() {
        return Err(SelectorError::UnterminatedAttribute);
    }

    let prefix = match chars.get(*pos).copied() {
        Some(']') => {
            *pos += 1;
            return Ok(AttrMatch {
                name,
                op: AttrOp::Exists,
            });
        }
        Some('^') => {
            *pos += 1;
            true
        }
        Some('=') => false,
        Some(c) => return Err(SelectorError::Unexpected(c)),
        None => return Err(SelectorError::UnterminatedAttribute),
    };
    if chars.get(*pos) != Some(&'=') {
        return Err(SelectorError::UnterminatedAttribute);
    }
    *pos += 1;

    let value = match chars.get(*pos).copied() {
        Some(q) if q == '"' || q == '\'' => {
            *pos += 1;
            let start = *pos;
            while *pos < chars.len() && chars[*pos] != q {
                *pos += 1;
            }
            if *pos >= chars.len() {
                return Err(SelectorError::UnterminatedAttribute);
            }
            let value: String = chars[start..*pos].iter().collect();
            *pos += 1;
            value
        }
        _ => take_ident(chars, pos),
    };

    if chars.get(*pos) != Some(&']') {
        return Err(SelectorError::UnterminatedAttribute);
    }
    *pos += 1;

    let op = if prefix {
        AttrOp::Prefix(value)
    } else {
        AttrOp::Equals(value)
    };
    Ok(AttrMatch { name, op })
}
