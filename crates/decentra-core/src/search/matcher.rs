//! Case-insensitive substring matching shared by the filter and highlighter.
//!
//! 比較は小文字化した文字列同士で行い、ヒット位置は元テキストの文字境界へ
//! 戻します。小文字化でバイト長や文字数が変わる文字（`İ` → `i̇` など）は、
//! 展開の一部に触れただけでも元の 1 文字全体がマッチ範囲に入ります。

/// Lowercased needle, prepared once per search call.
#[derive(Debug, Clone)]
pub struct Needle {
    lowered: String,
}

impl Needle {
    /// Returns `None` for an empty needle (no constraint).
    pub fn new(raw: &str) -> Option<Self> {
        let lowered = lowercase(raw);
        if lowered.is_empty() {
            None
        } else {
            Some(Self { lowered })
        }
    }

    pub fn is_in(&self, haystack: &str) -> bool {
        lowercase(haystack).contains(self.lowered.as_str())
    }

    /// First match at or after byte offset `from`, as a byte range of `haystack`.
    pub fn find_in(&self, haystack: &str, from: usize) -> Option<(usize, usize)> {
        let rest = &haystack[from..];
        let mut lowered = String::with_capacity(rest.len());
        // lowered の各バイト → 元の文字の (start, end)
        let mut spans = Vec::with_capacity(rest.len());
        for (offset, c) in rest.char_indices() {
            let span = (from + offset, from + offset + c.len_utf8());
            for lower in c.to_lowercase() {
                lowered.push(lower);
                spans.extend(std::iter::repeat_n(span, lower.len_utf8()));
            }
        }

        let start = lowered.find(self.lowered.as_str())?;
        let last = start + self.lowered.len() - 1;
        Some((spans[start].0, spans[last].1))
    }
}

/// Char-wise lowercasing, so needle and haystack expand the same way.
fn lowercase(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    Needle::new(needle).is_none_or(|needle| needle.is_in(haystack))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Frontend React Development", "react", true)]
    #[case("Frontend React Development", "REACT", true)]
    #[case("Backend API", "api ", false)]
    #[case("Straße", "STRASSE", false)]
    #[case("ÜBER cool", "über", true)]
    #[case("anything", "", true)]
    #[case::dotted_capital_i("İstanbul", "i", true)]
    #[case::dotted_capital_i_word("İstanbul", "istanbul", false)]
    #[case::dotted_capital_i_expanded("İstanbul", "i\u{307}stan", true)]
    fn contains_is_case_insensitive(
        #[case] haystack: &str,
        #[case] needle: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(contains_ignore_case(haystack, needle), expected);
    }

    #[test]
    fn find_returns_byte_ranges_on_original_text() {
        let needle = Needle::new("über").unwrap();
        let text = "Das ÜBER-Ding";
        let (start, end) = needle.find_in(text, 0).unwrap();
        assert_eq!(&text[start..end], "ÜBER");
    }

    #[test]
    fn find_resumes_from_offset() {
        let needle = Needle::new("ab").unwrap();
        assert_eq!(needle.find_in("ab-AB", 0), Some((0, 2)));
        assert_eq!(needle.find_in("ab-AB", 2), Some((3, 5)));
        assert_eq!(needle.find_in("ab-AB", 5), None);
    }

    #[test]
    fn partial_expansion_covers_the_whole_original_char() {
        let needle = Needle::new("i").unwrap();
        let text = "Big İstanbul";
        assert_eq!(needle.find_in(text, 0), Some((1, 2)));
        let (start, end) = needle.find_in(text, 2).unwrap();
        assert_eq!(&text[start..end], "İ");
    }

    #[test]
    fn empty_needle_is_none() {
        assert!(Needle::new("").is_none());
    }
}
