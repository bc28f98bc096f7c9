use arbitrary::Arbitrary;
use po_to_jed::jed::Config;

/// Render translations as PO text, one block per message.
///
/// Only the escapes understood by the parser are produced.
pub fn create_po(translations: &[(&str, &str)]) -> String {
    let escape = |s: &str| {
        s.replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('\n', "\\n")
    };
    translations
        .iter()
        .map(|(msgid, msgstr)| {
            format!(
                "msgid \"{}\"\nmsgstr \"{}\"\n",
                escape(msgid),
                escape(msgstr)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Whether `value` reads back unchanged from the text of `create_po`.
///
/// Backslashes may decode differently, and the reader trims
/// whitespace and quotes around each value.
pub fn round_trips(value: &str) -> bool {
    !value.contains('\\')
        && value.trim_matches(|c: char| {
            c.is_whitespace() || ('\x1c'..='\x1f').contains(&c) || c == '"'
        }) == value
}

/// Wrapper for generating an arbitrary `Config`.
#[derive(Arbitrary, Debug)]
pub struct Settings {
    pub domain: String,
    pub locale: String,
    pub plural_forms: String,
}

impl From<Settings> for Config {
    fn from(settings: Settings) -> Config {
        Config {
            domain: settings.domain,
            locale: settings.locale,
            plural_forms: settings.plural_forms,
            ..Config::default()
        }
    }
}
