//! Parser for the AI summary's markdown-like syntax.
//!
//! The backend's summarizer emits a small dialect: `#`-style headings,
//! `-`/`*` bullets, `1.` numbered items, paragraphs, and `**bold**` /
//! `*italic*` emphasis. We parse it into typed blocks so hosts can render
//! rich text without re-tokenizing strings, and so tests can assert on
//! structure instead of substrings.

/// An inline span within a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Bold(String),
    Italic(String),
}

/// One block of the rendered summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryBlock {
    /// `#`..`######` heading. `level` is the number of hash marks.
    Heading { level: u8, spans: Vec<Inline> },

    /// A list entry. `ordered` distinguishes `1.` items from bullets.
    ListItem { ordered: bool, spans: Vec<Inline> },

    /// Free text. Consecutive plain lines merge into one paragraph.
    Paragraph { spans: Vec<Inline> },
}

impl SummaryBlock {
    /// The block's text with emphasis markers resolved away.
    pub fn plain_text(&self) -> String {
        let spans = match self {
            Self::Heading { spans, .. } => spans,
            Self::ListItem { spans, .. } => spans,
            Self::Paragraph { spans } => spans,
        };
        spans
            .iter()
            .map(|span| match span {
                Inline::Text(s) | Inline::Bold(s) | Inline::Italic(s) => s.as_str(),
            })
            .collect()
    }
}

/// Parse a summary string into blocks.
///
/// Unrecognized constructs degrade to paragraphs; this never fails.
pub fn parse_summary(summary: &str) -> Vec<SummaryBlock> {
    let mut blocks = Vec::new();
    let mut paragraph: Vec<String> = Vec::new();

    for raw_line in summary.lines() {
        let line = raw_line.trim();

        if line.is_empty() {
            flush_paragraph(&mut blocks, &mut paragraph);
            continue;
        }

        if let Some((level, text)) = parse_heading(line) {
            flush_paragraph(&mut blocks, &mut paragraph);
            blocks.push(SummaryBlock::Heading {
                level,
                spans: parse_inlines(text),
            });
            continue;
        }

        if let Some((ordered, text)) = parse_list_item(line) {
            flush_paragraph(&mut blocks, &mut paragraph);
            blocks.push(SummaryBlock::ListItem {
                ordered,
                spans: parse_inlines(text),
            });
            continue;
        }

        paragraph.push(line.to_string());
    }

    flush_paragraph(&mut blocks, &mut paragraph);
    blocks
}

fn flush_paragraph(blocks: &mut Vec<SummaryBlock>, paragraph: &mut Vec<String>) {
    if paragraph.is_empty() {
        return;
    }
    let text = paragraph.join(" ");
    paragraph.clear();
    blocks.push(SummaryBlock::Paragraph {
        spans: parse_inlines(&text),
    });
}

fn parse_heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = &line[hashes..];
    rest.strip_prefix(' ').map(|text| (hashes as u8, text.trim()))
}

fn parse_list_item(line: &str) -> Option<(bool, &str)> {
    if let Some(text) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return Some((false, text.trim()));
    }

    let digits = line.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits > 0 {
        if let Some(text) = line[digits..].strip_prefix(". ") {
            return Some((true, text.trim()));
        }
    }

    None
}

/// Resolve `**bold**` and `*italic*` spans.
///
/// Unmatched markers are kept as literal text so a stray asterisk never
/// swallows the rest of the line.
fn parse_inlines(text: &str) -> Vec<Inline> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut rest = text;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("**") {
            if let Some(end) = after.find("**") {
                push_plain(&mut spans, &mut plain);
                spans.push(Inline::Bold(after[..end].to_string()));
                rest = &after[end + 2..];
                continue;
            }
        } else if let Some(after) = rest.strip_prefix('*') {
            if let Some(end) = after.find('*') {
                push_plain(&mut spans, &mut plain);
                spans.push(Inline::Italic(after[..end].to_string()));
                rest = &after[end + 1..];
                continue;
            }
        }

        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            plain.push(c);
        }
        rest = chars.as_str();
    }

    push_plain(&mut spans, &mut plain);
    spans
}

fn push_plain(spans: &mut Vec<Inline>, plain: &mut String) {
    if !plain.is_empty() {
        spans.push(Inline::Text(std::mem::take(plain)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_heading_and_bullets() {
        let blocks = parse_summary("# Summary\n- hello\n- world");
        assert_eq!(blocks.len(), 3);
        assert_eq!(
            blocks[0],
            SummaryBlock::Heading {
                level: 1,
                spans: vec![Inline::Text("Summary".into())],
            }
        );
        assert!(matches!(
            blocks[1],
            SummaryBlock::ListItem { ordered: false, .. }
        ));
        assert_eq!(blocks[2].plain_text(), "world");
    }

    #[test]
    fn consecutive_plain_lines_merge_into_one_paragraph() {
        let blocks = parse_summary("first line\nsecond line\n\nthird");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].plain_text(), "first line second line");
        assert_eq!(blocks[1].plain_text(), "third");
    }

    #[test]
    fn ordered_items_are_distinguished_from_bullets() {
        let blocks = parse_summary("1. first\n2. second\n* third");
        assert_eq!(
            blocks
                .iter()
                .map(|b| matches!(b, SummaryBlock::ListItem { ordered: true, .. }))
                .collect::<Vec<_>>(),
            vec![true, true, false]
        );
    }

    #[test]
    fn heading_requires_a_space_after_the_hashes() {
        let blocks = parse_summary("#NotAHeading");
        assert!(matches!(blocks[0], SummaryBlock::Paragraph { .. }));

        let blocks = parse_summary("####### seven");
        assert!(matches!(blocks[0], SummaryBlock::Paragraph { .. }));
    }

    #[test]
    fn resolves_bold_and_italic_spans() {
        let blocks = parse_summary("The **key point** is *subtle*.");
        let SummaryBlock::Paragraph { spans } = &blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(
            spans,
            &vec![
                Inline::Text("The ".into()),
                Inline::Bold("key point".into()),
                Inline::Text(" is ".into()),
                Inline::Italic("subtle".into()),
                Inline::Text(".".into()),
            ]
        );
    }

    #[test]
    fn unmatched_emphasis_markers_stay_literal() {
        let blocks = parse_summary("a * lonely star");
        assert_eq!(blocks[0].plain_text(), "a * lonely star");

        let blocks = parse_summary("dangling **bold");
        assert_eq!(blocks[0].plain_text(), "dangling **bold");
    }

    #[test]
    fn empty_summary_yields_no_blocks() {
        assert!(parse_summary("").is_empty());
        assert!(parse_summary("\n\n  \n").is_empty());
    }

    #[test]
    fn emphasis_inside_list_items_is_resolved() {
        let blocks = parse_summary("- **Action**: follow up");
        let SummaryBlock::ListItem { spans, .. } = &blocks[0] else {
            panic!("expected list item");
        };
        assert_eq!(spans[0], Inline::Bold("Action".into()));
        assert_eq!(blocks[0].plain_text(), "Action: follow up");
    }
}
