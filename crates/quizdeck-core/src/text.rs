//! HTML text helpers.
//!
//! Question banks embed HTML in stems, choices, and feedback. Rendering
//! needs the markup intact (tables in particular), so the normalizer only
//! decodes entities and trims; tag stripping exists for plain-text
//! previews.

/// Decode HTML entities in a string.
///
/// Handles the named entities that show up in exported question banks
/// (`&amp;` `&lt;` `&gt;` `&quot;` `&apos;` `&nbsp;`) plus numeric
/// `&#NNN;` / `&#xHH;` forms. Anything unrecognized passes through
/// verbatim.
pub fn decode_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        // Entity names are short; cap the scan so a stray '&' in a long
        // run of text stays O(1).
        let semi = tail
            .char_indices()
            .take(32)
            .find(|&(_, c)| c == ';')
            .map(|(i, _)| i);

        if let Some(end) = semi {
            if let Some(decoded) = decode_entity(&tail[1..end]) {
                out.push(decoded);
                rest = &tail[end + 1..];
                continue;
            }
        }

        out.push('&');
        rest = &tail[1..];
    }

    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Decode entities and trim, keeping all markup.
pub fn preserve_html(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    decode_entities(raw).trim().to_string()
}

/// Strip tags for plain-text rendering (previews, terminal output).
///
/// Tags are removed first, then entities decoded, matching how legacy
/// content was cleaned.
pub fn strip_tags(raw: &str) -> String {
    let mut text = String::with_capacity(raw.len());
    let mut in_tag = false;

    for c in raw.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }

    decode_entities(&text).trim().to_string()
}

/// Shorten a string to at most `max` characters, appending an ellipsis
/// when truncated.
pub fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let mut out: String = s.chars().take(max).collect();
        out.push('…');
        out
    } else {
        s.to_string()
    }
}
