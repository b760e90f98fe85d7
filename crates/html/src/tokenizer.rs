//! Small, forgiving HTML tokenizer tuned for document heads.
//!
//! Tag names use the ASCII class `[A-Za-z0-9:_-]` and are lowercased. Attribute names accept
//! anything up to whitespace, `/`, `>`, `=` or a quote, and are lowercased as well; duplicate
//! attributes keep the first occurrence. `script`/`style` bodies are raw text and
//! `title`/`textarea` bodies are RCDATA (entities decoded, no child tags).
//!
//! Known limitations:
//! - No HTML5 parse-error recovery beyond skipping what cannot be read.
//! - Raw text close-tag scanning accepts only ASCII whitespace before `>`.
use crate::entities::decode_entities;
use crate::types::{Token, is_rawtext_element, is_rcdata_element, is_void_element};
use memchr::memchr;

const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";

fn starts_with_ignore_ascii_case_at(haystack: &[u8], start: usize, needle: &[u8]) -> bool {
    haystack.len() >= start + needle.len()
        && haystack[start..start + needle.len()].eq_ignore_ascii_case(needle)
}

fn is_tag_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':'
}

fn is_attribute_name_byte(b: u8) -> bool {
    !b.is_ascii_whitespace() && !matches!(b, b'/' | b'>' | b'=' | b'"' | b'\'' | b'<')
}

/// Finds `</name` followed by optional ASCII whitespace and `>`, case-insensitively.
/// Returns the byte range of the whole close tag inside `haystack`.
fn find_close_tag(haystack: &str, name: &str) -> Option<(usize, usize)> {
    let bytes = haystack.as_bytes();
    let name = name.as_bytes();
    let len = bytes.len();
    let mut i = 0;
    while i < len {
        i += memchr(b'<', &bytes[i..])?;
        let name_start = i + 2;
        if bytes.get(i + 1) == Some(&b'/')
            && starts_with_ignore_ascii_case_at(bytes, name_start, name)
        {
            let mut k = name_start + name.len();
            while k < len && bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if k < len && bytes[k] == b'>' {
                return Some((i, k + 1));
            }
        }
        i += 1;
    }
    None
}

pub fn tokenize(input: &str) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::new();
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut i = 0;

    // Slices are only cut at ASCII structural bytes, so every endpoint is a char boundary.
    while i < len {
        if bytes[i] != b'<' {
            let start = i;
            i = memchr(b'<', &bytes[i..]).map_or(len, |rel| i + rel);
            push_text(&mut out, decode_entities(&input[start..i]));
            continue;
        }

        if input[i..].starts_with(COMMENT_START) {
            let body_start = i + COMMENT_START.len();
            match input[body_start..].find(COMMENT_END) {
                Some(end) => {
                    out.push(Token::Comment(input[body_start..body_start + end].to_string()));
                    i = body_start + end + COMMENT_END.len();
                }
                None => {
                    out.push(Token::Comment(input[body_start..].to_string()));
                    i = len;
                }
            }
            continue;
        }

        if starts_with_ignore_ascii_case_at(bytes, i, b"<!doctype") {
            let body_start = i + "<!doctype".len();
            let end = memchr(b'>', &bytes[body_start..]).map_or(len, |rel| body_start + rel);
            out.push(Token::Doctype(input[body_start..end].trim().to_string()));
            i = (end + 1).min(len);
            continue;
        }

        let next = bytes.get(i + 1).copied();
        match next {
            Some(b'!') | Some(b'?') => {
                // Bogus comment: everything up to the next `>`.
                let body_start = i + 2;
                let end = memchr(b'>', &bytes[body_start..]).map_or(len, |rel| body_start + rel);
                out.push(Token::Comment(input[body_start..end].to_string()));
                i = (end + 1).min(len);
            }
            Some(b'/') => {
                let name_start = i + 2;
                let mut j = name_start;
                while j < len && is_tag_name_byte(bytes[j]) {
                    j += 1;
                }
                let name = input[name_start..j].to_ascii_lowercase();
                j = memchr(b'>', &bytes[j..]).map_or(len, |rel| j + rel + 1);
                if !name.is_empty() {
                    out.push(Token::EndTag(name));
                }
                i = j;
            }
            Some(b) if b.is_ascii_alphabetic() => {
                i = read_start_tag(input, i + 1, &mut out);
            }
            _ => {
                push_text(&mut out, "<".to_string());
                i += 1;
            }
        }
    }
    log::trace!(target: "html.tokenizer", "{} tokens from {len} bytes", out.len());
    out
}

fn push_text(out: &mut Vec<Token>, text: String) {
    if text.is_empty() {
        return;
    }
    if let Some(Token::Text(prev)) = out.last_mut() {
        prev.push_str(&text);
        return;
    }
    out.push(Token::Text(text));
}

/// Reads a start tag whose name begins at `start`, plus any raw text/RCDATA body.
/// Returns the position right after everything consumed.
fn read_start_tag(input: &str, start: usize, out: &mut Vec<Token>) -> usize {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut k = start;
    while k < len && is_tag_name_byte(bytes[k]) {
        k += 1;
    }
    let name = input[start..k].to_ascii_lowercase();
    let mut attributes: Vec<(String, Option<String>)> = Vec::new();
    let mut self_closing = false;

    loop {
        while k < len && bytes[k].is_ascii_whitespace() {
            k += 1;
        }
        if k >= len {
            break;
        }
        match bytes[k] {
            b'>' => {
                k += 1;
                break;
            }
            b'/' => {
                if bytes.get(k + 1) == Some(&b'>') {
                    self_closing = true;
                    k += 2;
                    break;
                }
                k += 1;
                continue;
            }
            _ => {}
        }

        let attr_start = k;
        while k < len && is_attribute_name_byte(bytes[k]) {
            k += 1;
        }
        if attr_start == k {
            // Stray quote, `=` or `<`: skip it.
            k += 1;
            continue;
        }
        let attr_name = input[attr_start..k].to_ascii_lowercase();

        while k < len && bytes[k].is_ascii_whitespace() {
            k += 1;
        }
        let mut value = None;
        if k < len && bytes[k] == b'=' {
            k += 1;
            while k < len && bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if k < len && (bytes[k] == b'"' || bytes[k] == b'\'') {
                let quote = bytes[k];
                let value_start = k + 1;
                let value_end =
                    memchr(quote, &bytes[value_start..]).map_or(len, |rel| value_start + rel);
                value = Some(decode_entities(&input[value_start..value_end]));
                k = (value_end + 1).min(len);
            } else {
                let value_start = k;
                while k < len && !bytes[k].is_ascii_whitespace() && bytes[k] != b'>' {
                    k += 1;
                }
                value = Some(decode_entities(&input[value_start..k]));
            }
        }

        if !attributes.iter().any(|(existing, _)| *existing == attr_name) {
            attributes.push((attr_name, value));
        }
    }

    if is_void_element(&name) {
        self_closing = true;
    }
    let raw_body = !self_closing && is_rawtext_element(&name);
    let rcdata_body = !self_closing && is_rcdata_element(&name);

    out.push(Token::StartTag {
        name: name.clone(),
        attributes,
        self_closing,
    });

    if !raw_body && !rcdata_body {
        return k;
    }

    let body = &input[k..];
    let (text_end, resume) = match find_close_tag(body, &name) {
        Some((close_start, close_end)) => (k + close_start, k + close_end),
        // An unterminated body runs to the end of input with an implied close tag.
        None => {
            log::trace!(
                target: "html.tokenizer",
                "unterminated <{name}> body runs to end of input"
            );
            (len, len)
        }
    };
    let text = &input[k..text_end];
    if raw_body {
        push_text(out, text.to_string());
    } else {
        push_text(out, decode_entities(text));
    }
    out.push(Token::EndTag(name));
    resume
}
