//! Book-name translation between the English canonical names and the
//! Chinese (traditional) names used for display and for the CUV upstream.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// English canonical name -> Chinese name, in canonical order.
const BOOKS: [(&str, &str); 66] = [
    ("Genesis", "創世記"),
    ("Exodus", "出埃及記"),
    ("Leviticus", "利未記"),
    ("Numbers", "民數記"),
    ("Deuteronomy", "申命記"),
    ("Joshua", "約書亞記"),
    ("Judges", "士師記"),
    ("Ruth", "路得記"),
    ("1 Samuel", "撒母耳記上"),
    ("2 Samuel", "撒母耳記下"),
    ("1 Kings", "列王紀上"),
    ("2 Kings", "列王紀下"),
    ("1 Chronicles", "歷代志上"),
    ("2 Chronicles", "歷代志下"),
    ("Ezra", "以斯拉記"),
    ("Nehemiah", "尼希米記"),
    ("Esther", "以斯帖記"),
    ("Job", "約伯記"),
    ("Psalms", "詩篇"),
    ("Proverbs", "箴言"),
    ("Ecclesiastes", "傳道書"),
    ("Song of Songs", "雅歌"),
    ("Isaiah", "以賽亞書"),
    ("Jeremiah", "耶利米書"),
    ("Lamentations", "耶利米哀歌"),
    ("Ezekiel", "以西結書"),
    ("Daniel", "但以理書"),
    ("Hosea", "何西阿書"),
    ("Joel", "約珥書"),
    ("Amos", "阿摩司書"),
    ("Obadiah", "俄巴底亞書"),
    ("Jonah", "約拿書"),
    ("Micah", "彌迦書"),
    ("Nahum", "那鴻書"),
    ("Habakkuk", "哈巴谷書"),
    ("Zephaniah", "西番雅書"),
    ("Haggai", "哈該書"),
    ("Zechariah", "撒迦利亞書"),
    ("Malachi", "瑪拉基書"),
    ("Matthew", "馬太福音"),
    ("Mark", "馬可福音"),
    ("Luke", "路加福音"),
    ("John", "約翰福音"),
    ("Acts", "使徒行傳"),
    ("Romans", "羅馬書"),
    ("1 Corinthians", "哥林多前書"),
    ("2 Corinthians", "哥林多後書"),
    ("Galatians", "加拉太書"),
    ("Ephesians", "以弗所書"),
    ("Philippians", "腓立比書"),
    ("Colossians", "歌羅西書"),
    ("1 Thessalonians", "帖撒羅尼迦前書"),
    ("2 Thessalonians", "帖撒羅尼迦後書"),
    ("1 Timothy", "提摩太前書"),
    ("2 Timothy", "提摩太後書"),
    ("Titus", "提多書"),
    ("Philemon", "腓利門書"),
    ("Hebrews", "希伯來書"),
    ("James", "雅各書"),
    ("1 Peter", "彼得前書"),
    ("2 Peter", "彼得後書"),
    ("1 John", "約翰一書"),
    ("2 John", "約翰二書"),
    ("3 John", "約翰三書"),
    ("Jude", "猶大書"),
    ("Revelation", "啟示錄"),
];

/// Books with a single chapter. References into them are addressed
/// differently by the upstream API.
pub const SINGLE_CHAPTER_BOOKS: [&str; 5] = ["Obadiah", "Philemon", "2 John", "3 John", "Jude"];

static TRANSLATIONS: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| BOOKS.iter().copied().collect());

static REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9\s]*[A-Za-z]+)\s+(.+)$").expect("reference pattern is valid")
});

static LEADING_ORDINAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+\s*").expect("ordinal pattern is valid"));

/// A parsed verse reference such as `John 3:16`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Book token, e.g. `John` or `1 Corinthians`.
    pub book: String,
    /// Everything after the book, e.g. `3:16` or `1:5-7`.
    pub chapter_verse: String,
}

impl Reference {
    /// Split a reference at the boundary between the book name and the
    /// chapter/verse part.
    ///
    /// Returns `None` when the input does not look like `<book> <rest>`.
    pub fn parse(reference: &str) -> Option<Self> {
        let caps = REFERENCE.captures(reference)?;
        Some(Self {
            book: caps[1].trim().to_string(),
            chapter_verse: caps[2].to_string(),
        })
    }

    /// Whether the book has only one chapter.
    pub fn is_single_chapter(&self) -> bool {
        is_single_chapter(&self.book)
    }
}

/// Whether `book` (English canonical name) is a single-chapter book.
pub fn is_single_chapter(book: &str) -> bool {
    SINGLE_CHAPTER_BOOKS.contains(&book)
}

/// Direct table lookup, no normalization.
pub fn chinese_name(english: &str) -> Option<&'static str> {
    TRANSLATIONS.get(english).copied()
}

/// Translate a book name to Chinese.
///
/// A leading ordinal is dropped before the lookup (`2 John` is looked up as
/// `John`). Unknown names are returned unchanged.
pub fn translate_book_name(english: &str) -> String {
    let clean = LEADING_ORDINAL.replace(english, "");
    match chinese_name(&clean) {
        Some(name) => name.to_string(),
        None => english.to_string(),
    }
}

/// Translate a full reference for display, e.g. `John 3:16` -> `約翰福音 3:16`.
///
/// Unparseable references are returned unchanged.
pub fn translate_reference(reference: &str) -> String {
    let Some(parsed) = Reference::parse(reference) else {
        return reference.to_string();
    };

    let book = chinese_name(&parsed.book).unwrap_or(parsed.book.as_str());
    format!("{} {}", book, parsed.chapter_verse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_complete() {
        assert_eq!(TRANSLATIONS.len(), 66);
        for book in SINGLE_CHAPTER_BOOKS {
            assert!(chinese_name(book).is_some(), "{book} missing");
        }
    }

    #[test]
    fn test_parse_reference() {
        let r = Reference::parse("John 3:16").unwrap();
        assert_eq!(r.book, "John");
        assert_eq!(r.chapter_verse, "3:16");

        let r = Reference::parse("1 Corinthians 13:4-7").unwrap();
        assert_eq!(r.book, "1 Corinthians");
        assert_eq!(r.chapter_verse, "13:4-7");

        assert!(Reference::parse("John").is_none());
        assert!(Reference::parse("3:16").is_none());
        assert!(Reference::parse("").is_none());
    }

    #[test]
    fn test_parse_takes_single_word_book() {
        let r = Reference::parse("Song of Songs 2:1").unwrap();
        assert_eq!(r.book, "Song");
        assert_eq!(r.chapter_verse, "of Songs 2:1");
    }

    #[test]
    fn test_translate_book_name() {
        assert_eq!(translate_book_name("John"), "約翰福音");
        assert_eq!(translate_book_name("Psalms"), "詩篇");
        // ordinal is stripped before lookup
        assert_eq!(translate_book_name("2 John"), "約翰福音");
        assert_eq!(translate_book_name("1 Corinthians"), "1 Corinthians");
    }

    #[test]
    fn test_translate_book_name_is_total() {
        for input in ["", " ", "Unknown", "42", "約翰福音", "1 ", "john"] {
            assert_eq!(translate_book_name(input), input);
        }
    }

    #[test]
    fn test_translate_reference() {
        assert_eq!(translate_reference("John 3:16"), "約翰福音 3:16");
        assert_eq!(translate_reference("1 Corinthians 13:4"), "哥林多前書 13:4");
        assert_eq!(translate_reference("Jude 1:24"), "猶大書 1:24");
        assert_eq!(translate_reference("Hezekiah 1:1"), "Hezekiah 1:1");
        assert_eq!(translate_reference("not a reference"), "not a reference");
        assert_eq!(translate_reference("???"), "???");
    }
}
