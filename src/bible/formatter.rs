//! Reference formatting for the upstream Bible-text API.
//!
//! The API addresses passages by a single path segment. Most references are
//! sent with whitespace replaced by hyphens (`John-3:16`); single-chapter
//! books use `book+verse` with the chapter dropped (`jude+3`). Membership in
//! the single-chapter set is decided on the English book name even when the
//! Chinese name is sent.

use once_cell::sync::Lazy;
use regex::Regex;

use super::Language;
use super::books::{Reference, translate_book_name};

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Format `reference` as the path segment expected by the upstream API.
pub fn format_for_upstream_query(reference: &str, language: Language) -> String {
    let Some(parsed) = Reference::parse(reference) else {
        return hyphenate(reference);
    };

    match language {
        Language::Chinese => {
            let book = translate_book_name(&parsed.book);
            if parsed.is_single_chapter() {
                single_chapter_query(&book, &parsed.chapter_verse)
            } else {
                hyphenate(&format!("{} {}", book, parsed.chapter_verse))
            }
        }
        Language::English => {
            if parsed.is_single_chapter() {
                single_chapter_query(&parsed.book, &parsed.chapter_verse)
            } else {
                hyphenate(reference)
            }
        }
    }
}

fn hyphenate(s: &str) -> String {
    WHITESPACE.replace_all(s, "-").into_owned()
}

/// `Jude`, `1:3` -> `jude+3`
fn single_chapter_query(book: &str, chapter_verse: &str) -> String {
    let verse = chapter_verse
        .strip_prefix("1:")
        .or_else(|| chapter_verse.strip_prefix('1'))
        .unwrap_or(chapter_verse);
    format!("{}+{}", book.to_lowercase(), verse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_general() {
        assert_eq!(format_for_upstream_query("John 3:16", Language::English), "John-3:16");
        assert_eq!(
            format_for_upstream_query("1 Corinthians 13:4-7", Language::English),
            "1-Corinthians-13:4-7"
        );
    }

    #[test]
    fn test_chinese_general() {
        assert_eq!(format_for_upstream_query("John 3:16", Language::Chinese), "約翰福音-3:16");
        assert_eq!(format_for_upstream_query("Psalms 23:1", Language::Chinese), "詩篇-23:1");
    }

    #[test]
    fn test_single_chapter_english() {
        assert_eq!(format_for_upstream_query("Obadiah 1:5", Language::English), "obadiah+5");
        assert_eq!(format_for_upstream_query("Jude 1:24", Language::English), "jude+24");
        assert_eq!(format_for_upstream_query("3 John 1:4", Language::English), "3 john+4");
        // bare chapter prefix without colon
        assert_eq!(format_for_upstream_query("Philemon 1", Language::English), "philemon+");
    }

    #[test]
    fn test_single_chapter_chinese() {
        let expected = format!("{}+5", translate_book_name("Obadiah").to_lowercase());
        assert_eq!(format_for_upstream_query("Obadiah 1:5", Language::Chinese), expected);
        assert_eq!(format_for_upstream_query("Obadiah 1:5", Language::Chinese), "俄巴底亞書+5");
        assert_eq!(format_for_upstream_query("Philemon 1:6", Language::Chinese), "腓利門書+6");
    }

    #[test]
    fn test_single_chapter_checked_on_english_name() {
        // "2 John" is a single-chapter book; its Chinese lookup drops the ordinal
        assert_eq!(format_for_upstream_query("2 John 1:6", Language::Chinese), "約翰福音+6");
        // "John" is not single-chapter even though "2 John" maps onto it
        assert_eq!(format_for_upstream_query("John 1:6", Language::Chinese), "約翰福音-1:6");
    }

    #[test]
    fn test_unparseable_falls_back_to_hyphens() {
        assert_eq!(format_for_upstream_query("3:16", Language::English), "3:16");
        assert_eq!(format_for_upstream_query("  3:16   now", Language::Chinese), "-3:16-now");
        assert_eq!(format_for_upstream_query("", Language::English), "");
    }

    #[test]
    fn test_unknown_book_passes_through() {
        assert_eq!(format_for_upstream_query("Hezekiah 2:3", Language::Chinese), "Hezekiah-2:3");
    }
}
