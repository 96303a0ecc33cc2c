//! Locale string catalogs.
//!
//! The built-in catalog ships inside the binary (`assets/strings.json`). A
//! strings file named in the configuration is merged over it, adding
//! languages or replacing existing ones. Lookups never fail: unknown
//! languages fall back to the default language's catalog.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::LocaleSettings;
use crate::error::{CardError, Result};
use crate::format::substitute_count;

const BUILTIN_STRINGS: &str = include_str!("../assets/strings.json");

/// Display strings for one language.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LocaleCatalog {
    pub header: String,
    pub button: String,
    /// Contains a `{{count}}` placeholder.
    pub online: String,
    /// Contains a `{{count}}` placeholder.
    pub members: String,
}

impl LocaleCatalog {
    pub fn online_text(&self, count: u64) -> String {
        substitute_count(&self.online, count)
    }

    pub fn members_text(&self, count: u64) -> String {
        substitute_count(&self.members, count)
    }
}

/// All known catalogs plus the fallback.
#[derive(Debug, Clone)]
pub struct Locales {
    catalogs: HashMap<String, LocaleCatalog>,
    fallback: LocaleCatalog,
}

impl Locales {
    /// Catalogs compiled into the binary, falling back to English.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_STRINGS, "en")
    }

    /// Parse a `{ "<lang>": { header, button, online, members }, ... }` table.
    pub fn from_json(json: &str, default_language: &str) -> Result<Self> {
        Self::with_fallback(parse_table(json, "strings table")?, default_language)
    }

    /// Built-in catalogs merged with the optional override file.
    pub fn load(settings: &LocaleSettings) -> Result<Self> {
        let mut catalogs = parse_table(BUILTIN_STRINGS, "built-in strings")?;

        if let Some(path) = &settings.strings_path {
            let raw = std::fs::read_to_string(path).map_err(|e| {
                CardError::Config(format!("cannot read strings '{}': {e}", path.display()))
            })?;
            let extra = parse_table(&raw, &path.display().to_string())?;
            info!(path = %path.display(), languages = extra.len(), "merged locale overrides");
            catalogs.extend(extra);
        }

        Self::with_fallback(catalogs, &settings.default_language)
    }

    fn with_fallback(
        catalogs: HashMap<String, LocaleCatalog>,
        default_language: &str,
    ) -> Result<Self> {
        let fallback = catalogs
            .get(&normalize(default_language))
            .cloned()
            .ok_or_else(|| {
                CardError::Config(format!("no catalog for default language '{default_language}'"))
            })?;
        Ok(Self { catalogs, fallback })
    }

    /// Catalog for `language`, trying the full tag, then its primary subtag,
    /// then the default language.
    pub fn resolve(&self, language: &str) -> &LocaleCatalog {
        let tag = normalize(language);
        if let Some(catalog) = self.catalogs.get(&tag) {
            return catalog;
        }
        if let Some((primary, _)) = tag.split_once('-') {
            if let Some(catalog) = self.catalogs.get(primary) {
                return catalog;
            }
        }
        debug!(language, "no catalog for language, using default");
        &self.fallback
    }

    /// Known language tags, sorted.
    pub fn languages(&self) -> Vec<&str> {
        let mut langs: Vec<&str> = self.catalogs.keys().map(String::as_str).collect();
        langs.sort_unstable();
        langs
    }
}

/// Parse a strings table, keyed by normalized language tag.
fn parse_table(json: &str, origin: &str) -> Result<HashMap<String, LocaleCatalog>> {
    let raw: HashMap<String, LocaleCatalog> = serde_json::from_str(json)
        .map_err(|e| CardError::Config(format!("invalid strings in {origin}: {e}")))?;
    Ok(raw
        .into_iter()
        .map(|(lang, catalog)| (normalize(&lang), catalog))
        .collect())
}

fn normalize(tag: &str) -> String {
    tag.trim().replace('_', "-").to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_english() {
        let locales = Locales::builtin().unwrap();
        let en = locales.resolve("en");
        assert_eq!(en.online, "{{count}} Online");
        assert_eq!(en.members, "{{count}} Members");
        assert_eq!(en.online_text(12345), "12,345 Online");
        assert_eq!(en.members_text(67890), "67,890 Members");
    }

    #[test]
    fn every_builtin_phrase_has_placeholder() {
        let locales = Locales::builtin().unwrap();
        for lang in locales.languages() {
            let c = locales.resolve(lang);
            assert!(c.online.contains("{{count}}"), "{lang} online");
            assert!(c.members.contains("{{count}}"), "{lang} members");
        }
    }

    #[test]
    fn unknown_language_falls_back() {
        let locales = Locales::builtin().unwrap();
        assert_eq!(locales.resolve("xx"), locales.resolve("en"));
        assert_eq!(locales.resolve(""), locales.resolve("en"));
    }

    #[test]
    fn region_and_case_are_normalized() {
        let locales = Locales::builtin().unwrap();
        assert_eq!(locales.resolve("pt_BR").button, "Entrar");
        assert_eq!(locales.resolve("DE").button, "Beitreten");
        assert_eq!(locales.resolve("de-AT").button, "Beitreten");
    }

    #[test]
    fn missing_default_is_config_error() {
        let json = r#"{"de": {"header": "h", "button": "b", "online": "{{count}}", "members": "{{count}}"}}"#;
        let err = Locales::from_json(json, "en").unwrap_err();
        assert!(matches!(err, CardError::Config(_)));
    }

    #[test]
    fn malformed_table_is_config_error_from_either_entry() {
        let err = Locales::from_json("{not json", "en").unwrap_err();
        assert!(matches!(err, CardError::Config(_)));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strings.json");
        std::fs::write(&path, "{not json").unwrap();
        let settings = LocaleSettings {
            default_language: "en".into(),
            strings_path: Some(path),
        };
        let err = Locales::load(&settings).unwrap_err();
        assert!(matches!(err, CardError::Config(_)));
    }

    #[test]
    fn override_file_is_merged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strings.json");
        std::fs::write(
            &path,
            r#"{"en": {"header": "Join us", "button": "Go", "online": "{{count}} here", "members": "{{count}} total"},
                "eo": {"header": "Aliĝu", "button": "Aliĝi", "online": "{{count}} enrete", "members": "{{count}} membroj"}}"#,
        )
        .unwrap();
        let settings = LocaleSettings {
            default_language: "en".into(),
            strings_path: Some(path),
        };
        let locales = Locales::load(&settings).unwrap();
        assert_eq!(locales.resolve("en").button, "Go");
        assert_eq!(locales.resolve("eo").button, "Aliĝi");
        assert_eq!(locales.resolve("de").button, "Beitreten");
        assert_eq!(locales.resolve("zz").button, "Go");
    }
}
