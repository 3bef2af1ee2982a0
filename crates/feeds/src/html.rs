//! Minimal HTML scanning for vendor price tables.
//!
//! Tag names are matched ASCII case-insensitively and nested elements of the
//! same tag are balanced, which is all the two vendor tables need. Comments,
//! scripts and omitted end tags are not handled.
//!
//! [`elements`] returns only the outermost matches: a `<tr>` or `<td>` inside
//! an already matched element (a table nested in a cell) is part of that
//! element's `inner` and is not listed on its own. Rows and cells of a nested
//! table are therefore never mistaken for rows and cells of the price table.

/// One element found in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element<'a> {
    /// The opening tag including attributes, e.g. `<table class="x">`.
    pub open_tag: &'a str,
    /// Everything between the opening and the matching closing tag.
    pub inner: &'a str,
}

impl<'a> Element<'a> {
    pub fn attr(&self, name: &str) -> Option<String> {
        attr(self.open_tag, name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|v| v.split_ascii_whitespace().any(|c| c == class))
    }

    /// Text content with tags removed, entities decoded and whitespace collapsed.
    pub fn text(&self) -> String {
        text(self.inner)
    }
}

/// Find `pat` at or after `from` where the next byte ends a tag name.
fn find_tag(lc: &str, pat: &str, from: usize) -> Option<usize> {
    let bytes = lc.as_bytes();
    let mut at = from;
    while let Some(rel) = lc.get(at..)?.find(pat) {
        let pos = at + rel;
        let next = bytes.get(pos + pat.len());
        if matches!(next, Some(b'>' | b'/')) || next.is_some_and(|b| b.is_ascii_whitespace()) {
            return Some(pos);
        }
        at = pos + pat.len();
    }
    None
}

/// Locate the closing tag matching an element whose content starts at `from`.
/// Returns the byte range of the closing tag.
fn find_close(lc: &str, name: &str, from: usize) -> Option<(usize, usize)> {
    let open = format!("<{name}");
    let close = format!("</{name}");
    let mut depth = 0usize;
    let mut at = from;
    loop {
        let next_close = find_tag(lc, &close, at)?;
        match find_tag(lc, &open, at) {
            Some(o) if o < next_close => {
                depth += 1;
                at = o + open.len();
            }
            _ if depth == 0 => {
                let end = lc[next_close..].find('>')? + next_close + 1;
                return Some((next_close, end));
            }
            _ => {
                depth -= 1;
                at = next_close + close.len();
            }
        }
    }
}

fn element_at<'a>(html: &'a str, lc: &str, name: &str, start: usize) -> Option<(Element<'a>, usize)> {
    let open_end = lc[start..].find('>')? + start + 1;
    let (close_start, close_end) = find_close(lc, name, open_end)?;
    let element = Element {
        open_tag: &html[start..open_end],
        inner: &html[open_end..close_start],
    };
    Some((element, close_end))
}

/// All `name` elements in document order, not descending into a match.
pub fn elements<'a>(html: &'a str, name: &str) -> Vec<Element<'a>> {
    let lc = html.to_ascii_lowercase();
    let name = name.to_ascii_lowercase();
    let pat = format!("<{name}");
    let mut out = Vec::new();
    let mut at = 0;
    while let Some(start) = find_tag(&lc, &pat, at) {
        let Some((element, end)) = element_at(html, &lc, &name, start) else {
            break;
        };
        out.push(element);
        at = end;
    }
    out
}

/// First `name` element, if any.
pub fn first_element<'a>(html: &'a str, name: &str) -> Option<Element<'a>> {
    let lc = html.to_ascii_lowercase();
    let name = name.to_ascii_lowercase();
    let start = find_tag(&lc, &format!("<{name}"), 0)?;
    element_at(html, &lc, &name, start).map(|(element, _)| element)
}

/// First `name` element at any depth whose `class` list contains `class`.
pub fn find_by_class<'a>(html: &'a str, name: &str, class: &str) -> Option<Element<'a>> {
    let lc = html.to_ascii_lowercase();
    let name = name.to_ascii_lowercase();
    let pat = format!("<{name}");
    let mut at = 0;
    while let Some(start) = find_tag(&lc, &pat, at) {
        let open_end = lc[start..].find('>')? + start + 1;
        let open_tag = &html[start..open_end];
        if attr(open_tag, "class").is_some_and(|v| v.split_ascii_whitespace().any(|c| c == class)) {
            return element_at(html, &lc, &name, start).map(|(element, _)| element);
        }
        at = open_end;
    }
    None
}

/// Whether the fragment contains a `name` tag anywhere.
pub fn has_tag(html: &str, name: &str) -> bool {
    let lc = html.to_ascii_lowercase();
    find_tag(&lc, &format!("<{}", name.to_ascii_lowercase()), 0).is_some()
}

/// Read an attribute value from an opening tag. Quoted and bare values are supported.
pub fn attr(open_tag: &str, name: &str) -> Option<String> {
    let lc = open_tag.to_ascii_lowercase();
    let name = name.to_ascii_lowercase();
    let bytes = lc.as_bytes();
    let mut at = 0;
    while let Some(rel) = lc[at..].find(&name) {
        let pos = at + rel;
        at = pos + name.len();
        if pos == 0 || !bytes[pos - 1].is_ascii_whitespace() {
            continue;
        }
        let Some(after_eq) = lc[at..].trim_start().strip_prefix('=') else {
            continue;
        };
        let value_start = lc.len() - after_eq.trim_start().len();
        let raw = &open_tag[value_start..];
        let value = match raw.chars().next() {
            Some(quote @ ('"' | '\'')) => raw[1..].split(quote).next().unwrap_or_default(),
            _ => raw
                .split(|c: char| c.is_ascii_whitespace() || c == '>')
                .next()
                .unwrap_or_default()
                .trim_end_matches('/'),
        };
        return Some(value.to_string());
    }
    None
}

/// Remove all tags, decode entities, then collapse whitespace.
pub fn text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&decode_entities(&out))
}

/// Decode named entities common in price pages plus numeric references.
/// Unknown entities are left as written.
pub fn decode_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail
            .find(';')
            .filter(|&end| end <= 10)
            .and_then(|end| decode_entity(&tail[1..end]).map(|ch| (ch, end)));
        match decoded {
            Some((ch, end)) => {
                out.push(ch);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "nbsp" => Some(' '),
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Collapse runs of whitespace into a single space and trim.
pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
