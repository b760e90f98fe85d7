//! Compound selectors of the form `tag[name="value"][other]`.
//!
//! This is the only selector shape the head matcher needs: an optional type selector followed
//! by attribute selectors. Attribute names and values are written with backslash escapes, so a
//! selector produced by [`Selector::for_element`] always parses back to the same selector.
use crate::dom::ElementRef;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSelector {
    pub name: String,
    /// `None` matches on presence only.
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    tag: Option<String>,
    attributes: Vec<AttributeSelector>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    Empty,
    UnexpectedChar { position: usize, found: char },
    UnterminatedAttribute,
    UnterminatedString,
}

impl fmt::Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorError::Empty => f.write_str("empty selector"),
            SelectorError::UnexpectedChar { position, found } => {
                write!(f, "unexpected {found:?} at byte {position}")
            }
            SelectorError::UnterminatedAttribute => f.write_str("missing `]`"),
            SelectorError::UnterminatedString => f.write_str("unterminated quoted value"),
        }
    }
}

impl std::error::Error for SelectorError {}

impl Selector {
    /// Structural fingerprint of an element: its tag plus every attribute, in source order.
    pub fn for_element(element: ElementRef<'_>) -> Self {
        Self {
            tag: Some(element.name().to_string()),
            attributes: element
                .attributes()
                .iter()
                .map(|(name, value)| AttributeSelector {
                    name: name.clone(),
                    value: Some(value.clone().unwrap_or_default()),
                })
                .collect(),
        }
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn attributes(&self) -> &[AttributeSelector] {
        &self.attributes
    }

    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(SelectorError::Empty);
        }
        let mut chars = input.char_indices().peekable();
        let mut selector = Selector::default();

        let mut tag = String::new();
        while let Some(&(_, c)) = chars.peek() {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '*' {
                tag.push(c.to_ascii_lowercase());
                chars.next();
            } else {
                break;
            }
        }
        // A leading tag must start with a letter; `*` means any tag.
        match tag.chars().next() {
            None => {}
            Some('*') if tag == "*" => {}
            Some(c) if c.is_ascii_alphabetic() => selector.tag = Some(tag),
            Some(found) => return Err(SelectorError::UnexpectedChar { position: 0, found }),
        }

        while let Some((position, c)) = chars.next() {
            if c != '[' {
                return Err(SelectorError::UnexpectedChar { position, found: c });
            }
            let mut name = String::new();
            let mut value = None;
            loop {
                let Some((position, c)) = chars.next() else {
                    return Err(SelectorError::UnterminatedAttribute);
                };
                match c {
                    ']' => break,
                    '\\' => match chars.next() {
                        Some((_, escaped)) => name.push(escaped),
                        None => return Err(SelectorError::UnterminatedAttribute),
                    },
                    '=' => {
                        value = Some(read_value(&mut chars)?);
                        match chars.next() {
                            Some((_, ']')) => break,
                            Some((position, found)) => {
                                return Err(SelectorError::UnexpectedChar { position, found });
                            }
                            None => return Err(SelectorError::UnterminatedAttribute),
                        }
                    }
                    '"' | '\'' | '[' => {
                        return Err(SelectorError::UnexpectedChar { position, found: c });
                    }
                    c if c.is_whitespace() => {}
                    c => name.push(c.to_ascii_lowercase()),
                }
            }
            if name.is_empty() {
                return Err(SelectorError::UnexpectedChar {
                    position,
                    found: '[',
                });
            }
            selector.attributes.push(AttributeSelector { name, value });
        }

        Ok(selector)
    }

    /// Best-effort reading for building elements: the leading tag name plus every well-formed
    /// `[name="value"]` group, wherever it appears. Anything else (pseudo-classes, combinators,
    /// flags, bare `[name]`) is skipped. A repeated attribute name keeps its first value, as the
    /// tokenizer does.
    pub fn parse_lenient(input: &str) -> Self {
        let input = input.trim();
        let tag_len = input
            .bytes()
            .take_while(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_'))
            .count();
        let tag = &input[..tag_len];
        let mut selector = Selector {
            tag: tag
                .starts_with(|c: char| c.is_ascii_alphabetic())
                .then(|| tag.to_ascii_lowercase()),
            attributes: Vec::new(),
        };

        let mut pos = tag_len;
        while let Some(rel) = input[pos..].find('[') {
            let start = pos + rel;
            match read_attribute_group(&input[start..]) {
                Some((attr, consumed)) => {
                    if !selector.attributes.iter().any(|a| a.name == attr.name) {
                        selector.attributes.push(attr);
                    }
                    pos = start + consumed;
                }
                None => pos = start + 1,
            }
        }
        selector
    }

    /// True when no attribute name appears twice.
    pub fn has_unique_attribute_names(&self) -> bool {
        self.attributes
            .iter()
            .enumerate()
            .all(|(i, attr)| self.attributes[..i].iter().all(|prev| prev.name != attr.name))
    }

    pub fn matches(&self, element: ElementRef<'_>) -> bool {
        if let Some(tag) = &self.tag {
            if !element.name().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        self.attributes.iter().all(|wanted| match element.attr(&wanted.name) {
            None => false,
            Some(actual) => wanted.value.as_deref().is_none_or(|v| v == actual),
        })
    }
}

fn read_value(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
) -> Result<String, SelectorError> {
    let mut value = String::new();
    match chars.peek().copied() {
        Some((_, quote @ ('"' | '\''))) => {
            chars.next();
            loop {
                match chars.next() {
                    Some((_, '\\')) => match chars.next() {
                        Some((_, escaped)) => value.push(escaped),
                        None => return Err(SelectorError::UnterminatedString),
                    },
                    Some((_, c)) if c == quote => return Ok(value),
                    Some((_, c)) => value.push(c),
                    None => return Err(SelectorError::UnterminatedString),
                }
            }
        }
        _ => {
            while let Some(&(_, c)) = chars.peek() {
                if c == ']' {
                    break;
                }
                value.push(c);
                chars.next();
            }
            Ok(value)
        }
    }
}

/// Reads one `[name="value"]` group at the start of `rest`, returning it with its byte length.
fn read_attribute_group(rest: &str) -> Option<(AttributeSelector, usize)> {
    let mut chars = rest.char_indices().peekable();
    if chars.next()?.1 != '[' {
        return None;
    }
    let mut name = String::new();
    loop {
        match chars.next()?.1 {
            '\\' => name.push(chars.next()?.1.to_ascii_lowercase()),
            '=' => break,
            c if c.is_ascii_alphanumeric() || c == '-' || c == '_' => {
                name.push(c.to_ascii_lowercase())
            }
            _ => return None,
        }
    }
    if name.is_empty() || !matches!(chars.peek(), Some((_, '"' | '\''))) {
        return None;
    }
    let value = read_value(&mut chars).ok()?;
    match chars.next()? {
        (end, ']') => Some((
            AttributeSelector {
                name,
                value: Some(value),
            },
            end + 1,
        )),
        _ => None,
    }
}

fn push_escaped_name(name: &str, out: &mut String) {
    for c in name.chars() {
        if !(c.is_alphanumeric() || c == '-' || c == '_') {
            out.push('\\');
        }
        out.push(c);
    }
}

fn push_quoted_value(value: &str, out: &mut String) {
    out.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        match &self.tag {
            Some(tag) => out.push_str(tag),
            None if self.attributes.is_empty() => out.push('*'),
            None => {}
        }
        for attr in &self.attributes {
            out.push('[');
            push_escaped_name(&attr.name, &mut out);
            if let Some(value) = &attr.value {
                out.push('=');
                push_quoted_value(value, &mut out);
            }
            out.push(']');
        }
        f.write_str(&out)
    }
}
