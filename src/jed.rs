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

//! JED documents for `wp_set_script_translations`.
//!
//! WordPress looks for script translations in
//! `<domain>-<locale>-<md5>.json`, where the hash is computed from
//! the path of the script relative to the plugin directory. The
//! document holds a single domain whose `""` entry carries the
//! locale metadata; every other entry maps a msgid to its
//! translations.

use crate::Catalog;
use anyhow::Context;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_LANGUAGES_DIR: &str = "languages";
pub const DEFAULT_DOMAIN: &str = "gutenblock-pro";
pub const DEFAULT_LOCALE: &str = "en_US";
pub const DEFAULT_PLURAL_FORMS: &str = "nplurals=2; plural=(n != 1);";
/// `md5("build/index.js")`, the hash WordPress uses for the editor
/// script of the plugin.
pub const DEFAULT_DIGEST: &str = "dfbff627e6c248bcb3b61d7d06da9ca9";

/// Where to find the PO file and how to label the JED document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub languages_dir: PathBuf,
    pub domain: String,
    pub locale: String,
    pub plural_forms: String,
    pub digest: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            languages_dir: PathBuf::from(DEFAULT_LANGUAGES_DIR),
            domain: String::from(DEFAULT_DOMAIN),
            locale: String::from(DEFAULT_LOCALE),
            plural_forms: String::from(DEFAULT_PLURAL_FORMS),
            digest: String::from(DEFAULT_DIGEST),
        }
    }
}

impl Config {
    /// Path of the source catalog, e.g. `languages/gutenblock-pro-en_US.po`.
    pub fn po_path(&self) -> PathBuf {
        self.languages_dir.join(format!("{}-{}.po", self.domain, self.locale))
    }

    /// Path of the generated JED file.
    pub fn json_path(&self) -> PathBuf {
        self.languages_dir.join(format!(
            "{}-{}-{}.json",
            self.domain, self.locale, self.digest
        ))
    }
}

/// The `""` entry of a locale.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Header {
    pub domain: String,
    pub lang: String,
    pub plural_forms: String,
}

/// Header and messages of one domain.
///
/// Serialized as a single JSON object with the header under the
/// empty key, followed by the messages in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleData {
    pub header: Header,
    pub messages: IndexMap<String, Vec<String>>,
}

impl Serialize for LocaleData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.messages.len() + 1))?;
        map.serialize_entry("", &self.header)?;
        for (msgid, msgstrs) in &self.messages {
            map.serialize_entry(msgid, msgstrs)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct JedDocument {
    pub domain: String,
    pub locale_data: IndexMap<String, LocaleData>,
}

/// Wrap the messages of `catalog` in a JED document.
///
/// Each msgstr becomes a one-element list. Messages with an empty
/// msgid are left out since that key holds the header.
///
/// # Examples
///
/// ```
/// use po_to_jed::jed::{build_document, Config};
/// use po_to_jed::parse_catalog;
///
/// let catalog = parse_catalog("msgid \"Hello\"\nmsgstr \"Bonjour\"\n");
/// let document = build_document(&catalog, &Config::default());
/// let locale = &document.locale_data["gutenblock-pro"];
/// assert_eq!(locale.header.lang, "en_US");
/// assert_eq!(locale.messages["Hello"], vec![String::from("Bonjour")]);
/// ```
pub fn build_document(catalog: &Catalog, config: &Config) -> JedDocument {
    let header = Header {
        domain: config.domain.clone(),
        lang: config.locale.clone(),
        plural_forms: config.plural_forms.clone(),
    };
    let messages = catalog
        .messages()
        .filter(|(msgid, _)| !msgid.is_empty())
        .map(|(msgid, msgstr)| (String::from(msgid), vec![String::from(msgstr)]))
        .collect();

    let mut locale_data = IndexMap::new();
    locale_data.insert(config.domain.clone(), LocaleData { header, messages });
    JedDocument {
        domain: config.domain.clone(),
        locale_data,
    }
}

/// Write `document` as pretty-printed JSON to `path`.
///
/// The file is created or truncated; its directory must exist.
pub fn write_document(document: &JedDocument, path: &Path) -> anyhow::Result<()> {
    let file =
        File::create(path).with_context(|| format!("Could not create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, document)
        .with_context(|| format!("Could not write JED document to {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Could not write JED document to {}", path.display()))?;
    Ok(())
}
