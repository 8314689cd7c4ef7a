//! キーワードのハイライト
//!
//! テキスト自体は変更せず、表示用に区切るだけです。
//! すべての Segment をつなげると元のテキストに戻ります。

use serde::Serialize;

use crate::search::Needle;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub matched: bool,
}

/// `text` を keyword の出現位置（大文字小文字を区別しない）で区切る
pub fn highlight<'a>(text: &'a str, keyword: &str) -> Vec<Segment<'a>> {
    let Some(needle) = Needle::new(keyword) else {
        return plain(text);
    };

    let mut segments = Vec::new();
    let mut cursor = 0;
    while let Some((start, end)) = needle.find_in(text, cursor) {
        if start > cursor {
            segments.push(Segment {
                text: &text[cursor..start],
                matched: false,
            });
        }
        segments.push(Segment {
            text: &text[start..end],
            matched: true,
        });
        cursor = end;
    }
    if cursor < text.len() {
        segments.push(Segment {
            text: &text[cursor..],
            matched: false,
        });
    }
    segments
}

fn plain(text: &str) -> Vec<Segment<'_>> {
    if text.is_empty() {
        Vec::new()
    } else {
        vec![Segment {
            text,
            matched: false,
        }]
    }
}

/// Renders segments with a marker around matches, e.g. `[[React]] app`.
pub fn render_marked(segments: &[Segment<'_>], open: &str, close: &str) -> String {
    segments
        .iter()
        .map(|segment| {
            if segment.matched {
                format!("{open}{}{close}", segment.text)
            } else {
                segment.text.to_string()
            }
        })
        .collect()
}
