/// Decode the character references that show up in document heads.
///
/// Contract:
/// - A small named set is decoded (`&amp;`, `&lt;`, `&gt;`, `&quot;`, `&apos;`, `&nbsp;` and
///   a handful of typographic names), only when terminated by `;`.
/// - Numeric references decode when well-formed and terminated: `&#50;`, `&#x1F4A9;`.
/// - Anything else, including invalid scalar values, passes through unchanged.
pub(crate) fn decode_entities(s: &str) -> String {
    if memchr::memchr(b'&', s.as_bytes()).is_none() {
        return s.to_string();
    }

    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut copy_start = 0;
    let mut i = 0;

    while let Some(rel) = memchr::memchr(b'&', &bytes[i..]) {
        let amp = i + rel;
        out.push_str(&s[copy_start..amp]);
        match decode_reference(&s[amp + 1..]) {
            Some((ch, consumed)) => {
                out.push(ch);
                i = amp + 1 + consumed;
            }
            None => {
                out.push('&');
                i = amp + 1;
            }
        }
        copy_start = i;
    }
    out.push_str(&s[copy_start..]);
    out
}

const MAX_HEX_DIGITS: usize = 6;
const MAX_DEC_DIGITS: usize = 7;
const MAX_NAME_LEN: usize = 8;

/// `rest` starts right after `&`. Returns the decoded char and the bytes consumed,
/// including the terminating `;`.
fn decode_reference(rest: &str) -> Option<(char, usize)> {
    let bytes = rest.as_bytes();
    if bytes.first() == Some(&b'#') {
        let (is_hex, digits_start) = match bytes.get(1) {
            Some(b'x') | Some(b'X') => (true, 2),
            _ => (false, 1),
        };
        let max_digits = if is_hex { MAX_HEX_DIGITS } else { MAX_DEC_DIGITS };
        let mut j = digits_start;
        while j < bytes.len() && j - digits_start < max_digits {
            let ok = if is_hex {
                bytes[j].is_ascii_hexdigit()
            } else {
                bytes[j].is_ascii_digit()
            };
            if !ok {
                break;
            }
            j += 1;
        }
        if j == digits_start || bytes.get(j) != Some(&b';') {
            return None;
        }
        let radix = if is_hex { 16 } else { 10 };
        let value = u32::from_str_radix(&rest[digits_start..j], radix).ok()?;
        let ch = char::from_u32(value)?;
        return Some((ch, j + 1));
    }

    let end = bytes
        .iter()
        .take(MAX_NAME_LEN + 1)
        .position(|&b| b == b';')?;
    let ch = match &rest[..end] {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "copy" => '\u{a9}',
        "reg" => '\u{ae}',
        "trade" => '\u{2122}',
        "hellip" => '\u{2026}',
        "mdash" => '\u{2014}',
        "ndash" => '\u{2013}',
        "laquo" => '\u{ab}',
        "raquo" => '\u{bb}',
        "middot" => '\u{b7}',
        _ => return None,
    };
    Some((ch, end + 1))
}

/// Escape text content the way the HTML fragment serializer does.
pub(crate) fn escape_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

/// Escape an attribute value for a double-quoted serialization.
pub(crate) fn escape_attribute(value: &str, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_named_and_numeric_references() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&#50;&#x33;"), "23");
        assert_eq!(decode_entities("&lt;meta&gt;"), "<meta>");
        assert_eq!(decode_entities("x&nbsp;y"), "x\u{a0}y");
    }

    #[test]
    fn leaves_malformed_references_alone() {
        assert_eq!(decode_entities("&amp"), "&amp");
        assert_eq!(decode_entities("&unknown;"), "&unknown;");
        assert_eq!(decode_entities("&#;"), "&#;");
        assert_eq!(decode_entities("&#xD800;"), "&#xD800;");
        assert_eq!(decode_entities("& &&"), "& &&");
    }

    #[test]
    fn escaping_matches_fragment_serializer_rules() {
        let mut out = String::new();
        escape_text("a<b>&\u{a0}\"", &mut out);
        assert_eq!(out, "a&lt;b&gt;&amp;&nbsp;\"");

        let mut out = String::new();
        escape_attribute("say \"hi\" & <go>", &mut out);
        assert_eq!(out, "say &quot;hi&quot; &amp; <go>");
    }
}
