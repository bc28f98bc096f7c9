// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Helpers for shipping Gettext translations to WordPress scripts.
//!
//! WordPress loads the translations used by JavaScript from JED JSON
//! files rather than from the compiled `.mo` catalogs used by PHP.
//! The functions here read the msgid/msgstr pairs out of a PO file
//! and the [`jed`] module wraps them in the document WordPress
//! expects.
//!
//! The PO reader is deliberately simple: it looks at line prefixes
//! only and silently drops anything it does not understand. Plural
//! forms and message contexts are not supported.

use anyhow::Context;
use indexmap::IndexMap;
use log::debug;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

pub mod jed;

/// Unescape the contents of a quoted PO string.
///
/// Three sequences are recognized and they are replaced one after
/// the other: `\n` becomes a newline, `\"` becomes a quote and `\\`
/// becomes a single backslash. Other escapes are left alone.
///
/// # Examples
///
/// ```
/// use po_to_jed::unescape;
///
/// assert_eq!(unescape(r"a\nb"), "a\nb");
/// assert_eq!(unescape(r#"say \"hi\""#), r#"say "hi""#);
/// assert_eq!(unescape(r"back\\slash"), r"back\slash");
/// ```
pub fn unescape(raw: &str) -> String {
    // The newline pass runs first, so an escaped backslash followed
    // by `n` turns into a backslash and a newline.
    raw.replace("\\n", "\n")
        .replace("\\\"", "\"")
        .replace("\\\\", "\\")
}

/// Translations read from a PO file.
///
/// Messages are kept in the order their msgid was first seen. When a
/// msgid is repeated, the last msgstr wins but the message keeps its
/// original position.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Catalog {
    messages: IndexMap<String, String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a translation, returning the msgstr it replaced (if any).
    pub fn insert(&mut self, msgid: String, msgstr: String) -> Option<String> {
        self.messages.insert(msgid, msgstr)
    }

    /// Look up the translation of `msgid`.
    pub fn get(&self, msgid: &str) -> Option<&str> {
        self.messages.get(msgid).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Iterate over `(msgid, msgstr)` pairs in catalog order.
    pub fn messages(&self) -> impl Iterator<Item = (&str, &str)> {
        self.messages
            .iter()
            .map(|(msgid, msgstr)| (msgid.as_str(), msgstr.as_str()))
    }
}

/// Value of a `msgid` or `msgstr` line.
///
/// Everything up to and including the opening quote is skipped: the
/// keyword is `keyword_len` characters long and followed by a space
/// and the quote.
fn field_value(line: &str, keyword_len: usize) -> String {
    let rest = match line.char_indices().nth(keyword_len + 2) {
        Some((idx, _)) => &line[idx..],
        None => "",
    };
    unescape(strip_quotes(rest))
}

/// Value of a continuation line such as `"more text"`.
fn continuation_value(line: &str) -> String {
    unescape(strip_quotes(line))
}

/// Trim whitespace, then every surrounding quote.
///
/// The ASCII information separators (U+001C to U+001F) are trimmed
/// along with the whitespace.
fn strip_quotes(value: &str) -> &str {
    value
        .trim_matches(|c: char| c.is_whitespace() || ('\x1c'..='\x1f').contains(&c))
        .trim_matches('"')
}

/// The field a continuation line is appended to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Msgid,
    Msgstr,
}

/// Extract the `(msgid, msgstr)` pair of a single block.
///
/// Returns `None` unless the block has both a `msgid` and a `msgstr`
/// line.
fn parse_block(block: &str) -> Option<(String, String)> {
    let mut msgid: Vec<String> = Vec::new();
    let mut msgstr: Vec<String> = Vec::new();
    let mut active = None;

    for line in block.split('\n') {
        if line.starts_with("msgid ") {
            msgid = vec![field_value(line, "msgid".len())];
            active = Some(Field::Msgid);
        } else if line.starts_with("msgstr ") {
            msgstr = vec![field_value(line, "msgstr".len())];
            active = Some(Field::Msgstr);
        } else if line.starts_with('"') {
            match active {
                Some(Field::Msgid) => msgid.push(continuation_value(line)),
                Some(Field::Msgstr) => msgstr.push(continuation_value(line)),
                None => {}
            }
        }
    }

    if msgid.is_empty() || msgstr.is_empty() {
        if !msgid.is_empty() || !msgstr.is_empty() {
            debug!("Dropping block without a msgid/msgstr pair: {block:?}");
        }
        return None;
    }

    Some((msgid.concat(), msgstr.concat()))
}

/// Parse the text of a PO file into a [`Catalog`].
///
/// The text is split into blocks on blank lines and each block
/// contributes at most one message. Blocks with an empty msgid, such
/// as the header, are skipped.
///
/// # Examples
///
/// ```
/// use po_to_jed::parse_catalog;
///
/// let catalog = parse_catalog(
///     "msgid \"Hello\"\n\
///      msgstr \"Bonjour\"\n\
///      \n\
///      msgid \"Bye\"\n\
///      msgstr \"Au revoir\"\n",
/// );
/// assert_eq!(
///     catalog.messages().collect::<Vec<_>>(),
///     vec![("Hello", "Bonjour"), ("Bye", "Au revoir")]
/// );
/// ```
pub fn parse_catalog(text: &str) -> Catalog {
    static RE: OnceLock<Regex> = OnceLock::new();
    let blank_lines = RE.get_or_init(|| Regex::new(r"\n\n+").expect("well-formed regex"));

    let mut catalog = Catalog::new();
    for block in blank_lines.split(text) {
        let Some((msgid, msgstr)) = parse_block(block) else {
            continue;
        };
        if msgid.is_empty() {
            continue;
        }
        if catalog.insert(msgid.clone(), msgstr).is_some() {
            debug!("Replacing earlier translation of {msgid:?}");
        }
    }
    catalog
}

/// Read and parse the PO file at `path`.
///
/// Windows (`\r\n`) and old Mac (`\r`) line endings are turned into
/// `\n` first. Fails if the file cannot be read or is not valid UTF-8.
pub fn read_catalog(path: &Path) -> anyhow::Result<Catalog> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read {}", path.display()))?;
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    Ok(parse_catalog(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use polib::message::Message;
    use polib::metadata::CatalogMetadata;
    use polib::po_file;
    use pretty_assertions::assert_eq;

    /// Parse `text`, assert the messages match `expected`.
    #[track_caller]
    fn assert_parse(text: &str, expected: &[(&str, &str)]) {
        assert_eq!(
            parse_catalog(text).messages().collect::<Vec<_>>(),
            expected.to_vec()
        );
    }

    #[test]
    fn unescape_newline() {
        assert_eq!(unescape("a\\nb"), "a\nb");
    }

    #[test]
    fn unescape_quotes() {
        assert_eq!(unescape("say \\\"hi\\\""), "say \"hi\"");
    }

    #[test]
    fn unescape_backslash() {
        assert_eq!(unescape("back\\\\slash"), "back\\slash");
    }

    #[test]
    fn unescape_escaped_backslash_before_n() {
        // The newline pass sees `\n` before the backslash pass runs.
        assert_eq!(unescape(r"C:\\new"), "C:\\\new");
    }

    #[test]
    fn unescape_unknown_escapes() {
        assert_eq!(unescape(r"tab\there"), r"tab\there");
    }

    #[test]
    fn parse_empty() {
        assert_parse("", &[]);
    }

    #[test]
    fn parse_simple() {
        assert_parse(
            "msgid \"Hello\"\n\
             msgstr \"Bonjour\"\n\
             \n\
             msgid \"Bye\"\n\
             msgstr \"Au revoir\"\n",
            &[("Hello", "Bonjour"), ("Bye", "Au revoir")],
        );
    }

    #[test]
    fn parse_skips_header() {
        assert_parse(
            "msgid \"\"\n\
             msgstr \"\"\n\
             \"Project-Id-Version: gutenblock-pro\\n\"\n\
             \"Language: en_US\\n\"\n\
             \n\
             msgid \"Hello\"\n\
             msgstr \"Hello\"\n",
            &[("Hello", "Hello")],
        );
    }

    #[test]
    fn parse_continuation_lines() {
        assert_parse(
            "msgid \"\"\n\
             \"First line\\n\"\n\
             \"second line\"\n\
             msgstr \"\"\n\
             \"Erste Zeile\\n\"\n\
             \"zweite Zeile\"\n",
            &[("First line\nsecond line", "Erste Zeile\nzweite Zeile")],
        );
    }

    #[test]
    fn parse_ignores_comments_and_flags() {
        assert_parse(
            "# Translator comment\n\
             #: src/blocks/material-icon/edit.js:42\n\
             #, javascript-format\n\
             msgctxt \"button\"\n\
             msgid \"Save\"\n\
             msgstr \"Speichern\"\n",
            &[("Save", "Speichern")],
        );
    }

    #[test]
    fn parse_duplicate_msgid_last_wins() {
        assert_parse(
            "msgid \"Hello\"\n\
             msgstr \"Bonjour\"\n\
             \n\
             msgid \"Other\"\n\
             msgstr \"Autre\"\n\
             \n\
             msgid \"Hello\"\n\
             msgstr \"Salut\"\n",
            &[("Hello", "Salut"), ("Other", "Autre")],
        );
    }

    #[test]
    fn parse_msgid_without_msgstr() {
        assert_parse(
            "msgid \"Orphan\"\n\
             \n\
             msgid \"Hello\"\n\
             msgstr \"Bonjour\"\n",
            &[("Hello", "Bonjour")],
        );
    }

    #[test]
    fn parse_msgstr_without_msgid() {
        assert_parse("msgstr \"Orphan\"\n", &[]);
    }

    #[test]
    fn parse_keeps_untranslated_messages() {
        assert_parse(
            "msgid \"Untranslated\"\n\
             msgstr \"\"\n",
            &[("Untranslated", "")],
        );
    }

    #[test]
    fn parse_multiple_blank_lines() {
        assert_parse(
            "msgid \"A\"\n\
             msgstr \"a\"\n\
             \n\
             \n\
             \n\
             msgid \"B\"\n\
             msgstr \"b\"",
            &[("A", "a"), ("B", "b")],
        );
    }

    #[test]
    fn parse_escaped_quotes() {
        assert_parse(
            "msgid \"Click \\\"Save\\\" now\"\n\
             msgstr \"Klicke jetzt \\\"Speichern\\\"\"\n",
            // A trailing escaped quote loses its quote character to
            // the quote stripping.
            &[("Click \"Save\" now", "Klicke jetzt \"Speichern\\")],
        );
    }

    #[test]
    fn parse_unicode() {
        assert_parse(
            "msgid \"Größe\"\n\
             msgstr \"Size 🦀\"\n",
            &[("Größe", "Size 🦀")],
        );
    }

    #[test]
    fn parse_last_msgid_in_block_wins() {
        assert_parse(
            "msgid \"First\"\n\
             msgid \"Second\"\n\
             msgstr \"Zweite\"\n",
            &[("Second", "Zweite")],
        );
    }

    #[test]
    fn parse_plural_entries_use_singular_only() {
        // `msgid_plural` and `msgstr[n]` lines are not recognized, so
        // the block has no msgstr and is dropped.
        assert_parse(
            "msgid \"%d item\"\n\
             msgid_plural \"%d items\"\n\
             msgstr[0] \"%d Element\"\n\
             msgstr[1] \"%d Elemente\"\n",
            &[],
        );
    }

    #[test]
    fn catalog_insert_returns_previous() {
        let mut catalog = Catalog::new();
        assert_eq!(catalog.insert("a".into(), "1".into()), None);
        assert_eq!(catalog.insert("a".into(), "2".into()), Some("1".into()));
        assert_eq!(catalog.get("a"), Some("2"));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn read_catalog_missing_file() {
        let tmpdir = tempfile::tempdir().unwrap();
        let err = read_catalog(&tmpdir.path().join("missing.po")).unwrap_err();
        assert!(err.to_string().contains("missing.po"));
    }

    #[test]
    fn parse_information_separators_are_whitespace() {
        assert_parse(
            "msgid \"A\"\x1f\n\
             msgstr \"a\"\x1c\n",
            &[("A", "a")],
        );
    }

    /// Write `contents` to a PO file and read it back.
    fn read_po_bytes(contents: &[u8]) -> anyhow::Result<Vec<(String, String)>> {
        let tmpdir = tempfile::tempdir()?;
        let path = tmpdir.path().join("messages.po");
        std::fs::write(&path, contents)?;
        Ok(read_catalog(&path)?
            .messages()
            .map(|(msgid, msgstr)| (String::from(msgid), String::from(msgstr)))
            .collect())
    }

    #[test]
    fn read_catalog_crlf_line_endings() -> anyhow::Result<()> {
        assert_eq!(
            read_po_bytes(
                b"msgid \"Hello\"\r\nmsgstr \"Bonjour\"\r\n\r\n\
                  msgid \"Bye\"\r\nmsgstr \"Au revoir\"\r\n"
            )?,
            vec![
                (String::from("Hello"), String::from("Bonjour")),
                (String::from("Bye"), String::from("Au revoir")),
            ]
        );
        Ok(())
    }

    #[test]
    fn read_catalog_cr_line_endings() -> anyhow::Result<()> {
        assert_eq!(
            read_po_bytes(
                b"msgid \"\"\rmsgstr \"\"\r\"Language: en_US\\n\"\r\r\
                  msgid \"Hello\"\rmsgstr \"\"\r\"Bon\"\r\"jour\"\r\r\
                  msgid \"Bye\"\rmsgstr \"Au revoir\"\r"
            )?,
            vec![
                (String::from("Hello"), String::from("Bonjour")),
                (String::from("Bye"), String::from("Au revoir")),
            ]
        );
        Ok(())
    }

    #[test]
    fn read_catalog_invalid_utf8() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let path = tmpdir.path().join("latin1.po");
        std::fs::write(&path, b"msgid \"Gr\xf6\xdfe\"\nmsgstr \"Size\"\n")?;
        assert!(read_catalog(&path).is_err());
        Ok(())
    }

    #[test]
    fn read_catalog_written_by_polib() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let path = tmpdir.path().join("gutenblock-pro-en_US.po");

        let mut metadata = CatalogMetadata::new();
        metadata.language = String::from("en_US");
        let mut catalog = polib::catalog::Catalog::new(metadata);
        for (msgid, msgstr) in [
            ("Add icon", "Icon hinzufügen"),
            ("Search icons", "Icons durchsuchen"),
            ("Line one\nLine two", "Zeile eins\nZeile zwei"),
        ] {
            let message = Message::build_singular()
                .with_source(String::from("src/index.js:1"))
                .with_msgid(String::from(msgid))
                .with_msgstr(String::from(msgstr))
                .done();
            catalog.append_or_update(message);
        }
        po_file::write(&catalog, &path)
            .with_context(|| format!("Could not write {}", path.display()))?;

        let catalog = read_catalog(&path)?;
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get("Add icon"), Some("Icon hinzufügen"));
        assert_eq!(catalog.get("Search icons"), Some("Icons durchsuchen"));
        assert_eq!(
            catalog.get("Line one\nLine two"),
            Some("Zeile eins\nZeile zwei")
        );
        Ok(())
    }
}
