//! Inline chat markup: code spans, bold, underline, italic and bare links.
//!
//! DESIGN
//! ======
//! Rules run in fixed precedence order: code > bold > underline > italic >
//! autolink. Every rule scans only the plain-text tokens left by the rules
//! before it, so text already claimed by a higher-precedence rule is never
//! re-read (bold `**` can't be picked up again as two italic `*`).
//! Unbalanced or empty delimiters stay literal.
//!
//! The output is a flat token list; spans do not nest. Renderers build
//! elements from tokens directly, so no HTML escaping happens here.

#[cfg(test)]
#[path = "markup_test.rs"]
mod markup_test;

/// Kind of an inline token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpanKind {
    Text,
    Code,
    Bold,
    Underline,
    Italic,
    Link,
}

/// One token of rendered markup. For [`SpanKind::Link`] `text` is the URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    pub kind: SpanKind,
    pub text: String,
}

impl Span {
    #[must_use]
    pub fn new(kind: SpanKind, text: impl Into<String>) -> Self {
        Self { kind, text: text.into() }
    }

    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(SpanKind::Text, text)
    }
}

#[derive(Clone, Copy)]
enum Rule {
    /// Content between a pair of `delim`, single line, non-empty, never
    /// containing `forbid`.
    Delimited { kind: SpanKind, delim: &'static str, forbid: Option<char> },
    Autolink,
}

const RULES: [Rule; 5] = [
    Rule::Delimited { kind: SpanKind::Code, delim: "`", forbid: Some('`') },
    Rule::Delimited { kind: SpanKind::Bold, delim: "**", forbid: None },
    Rule::Delimited { kind: SpanKind::Underline, delim: "__", forbid: None },
    Rule::Delimited { kind: SpanKind::Italic, delim: "*", forbid: Some('*') },
    Rule::Autolink,
];

const LINK_SCHEMES: [&str; 2] = ["http://", "https://"];
const LINK_TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')', '"', '\''];

/// Byte ranges of one rule match inside a text token.
struct Found {
    start: usize,
    content_start: usize,
    content_end: usize,
    end: usize,
}

/// Tokenize a message body.
#[must_use]
pub fn parse(body: &str) -> Vec<Span> {
    if body.is_empty() {
        return Vec::new();
    }
    let mut spans = vec![Span::text(body)];
    for rule in RULES {
        spans = apply_rule(spans, rule);
    }
    merge_text(spans)
}

/// Concatenate token text, dropping delimiters.
#[must_use]
pub fn plain_text(spans: &[Span]) -> String {
    spans.iter().map(|s| s.text.as_str()).collect()
}

/// Single-line, markup-free preview truncated to `max_chars` characters.
///
/// A trailing `…` marks truncation.
#[must_use]
pub fn preview(body: &str, max_chars: usize) -> String {
    let plain = plain_text(&parse(body));
    let collapsed = plain.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let mut out: String = collapsed.chars().take(max_chars).collect();
    out.truncate(out.trim_end().len());
    out.push('…');
    out
}

fn apply_rule(spans: Vec<Span>, rule: Rule) -> Vec<Span> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if span.kind == SpanKind::Text {
            split_text(&span.text, rule, &mut out);
        } else {
            out.push(span);
        }
    }
    out
}

fn split_text(text: &str, rule: Rule, out: &mut Vec<Span>) {
    let mut rest = text;
    while let Some(found) = find(rest, rule) {
        if found.start > 0 {
            out.push(Span::text(&rest[..found.start]));
        }
        out.push(Span::new(rule_kind(rule), &rest[found.content_start..found.content_end]));
        rest = &rest[found.end..];
    }
    if !rest.is_empty() {
        out.push(Span::text(rest));
    }
}

fn rule_kind(rule: Rule) -> SpanKind {
    match rule {
        Rule::Delimited { kind, .. } => kind,
        Rule::Autolink => SpanKind::Link,
    }
}

fn find(text: &str, rule: Rule) -> Option<Found> {
    match rule {
        Rule::Delimited { delim, forbid, .. } => find_delimited(text, delim, forbid),
        Rule::Autolink => find_link(text),
    }
}

fn find_delimited(text: &str, delim: &str, forbid: Option<char>) -> Option<Found> {
    let mut from = 0;
    while let Some(rel) = text[from..].find(delim) {
        let start = from + rel;
        let content_start = start + delim.len();
        if let Some(len) = closing_offset(&text[content_start..], delim, forbid) {
            let content_end = content_start + len;
            return Some(Found { start, content_start, content_end, end: content_end + delim.len() });
        }
        // Delimiters are ASCII, so stepping one byte stays on a char boundary.
        from = start + 1;
    }
    None
}

/// Offset of the first closing delimiter after at least one content char.
fn closing_offset(rest: &str, delim: &str, forbid: Option<char>) -> Option<usize> {
    for (idx, ch) in rest.char_indices() {
        if idx > 0 && rest[idx..].starts_with(delim) {
            return Some(idx);
        }
        if ch == '\n' || Some(ch) == forbid {
            return None;
        }
    }
    None
}

fn find_link(text: &str) -> Option<Found> {
    let mut from = 0;
    loop {
        let (start, scheme) = LINK_SCHEMES
            .iter()
            .filter_map(|scheme| text[from..].find(scheme).map(|rel| (from + rel, *scheme)))
            .min_by_key(|(start, _)| *start)?;

        let run_end = text[start..]
            .find(|c: char| c.is_whitespace() || c == '<' || c == '>')
            .map_or(text.len(), |rel| start + rel);
        let url = text[start..run_end].trim_end_matches(LINK_TRAILING_PUNCTUATION);
        if url.len() > scheme.len() {
            let end = start + url.len();
            return Some(Found { start, content_start: start, content_end: end, end });
        }
        from = start + scheme.len();
    }
}

fn merge_text(spans: Vec<Span>) -> Vec<Span> {
    let mut out: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        if span.kind == SpanKind::Text {
            if let Some(last) = out.last_mut().filter(|s| s.kind == SpanKind::Text) {
                last.text.push_str(&span.text);
                continue;
            }
        }
        out.push(span);
    }
    out
}
