//! Locale bundles: the message tables behind the translator.
//!
//! A bundle is a flat TOML table mapping message keys to either a template
//! string or an ordered list of strings. The English and Spanish bundles are
//! compiled into the binary; further bundles can be read from a directory.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use hanguk_core::error::{HangukError, Result};

const EN_BUNDLE: &str = include_str!("../../locales/en.toml");
const ES_BUNDLE: &str = include_str!("../../locales/es.toml");

/// A single bundle entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Message {
    /// A template, possibly holding printf-style placeholders.
    Text(String),
    /// Candidate strings the caller picks from.
    List(Vec<String>),
}

/// All messages for one locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleBundle {
    messages: HashMap<String, Message>,
}

impl LocaleBundle {
    /// Parse a bundle from TOML source.
    pub fn from_toml(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| HangukError::Locale(e.to_string()))
    }

    pub fn get(&self, key: &str) -> Option<&Message> {
        self.messages.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, message: Message) {
        self.messages.insert(key.into(), message);
    }

    /// Overlay `other` onto this bundle; keys in `other` win.
    pub fn merge(&mut self, other: LocaleBundle) {
        self.messages.extend(other.messages);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Canonical form of a locale code: lowercase, `-` separated.
pub fn normalize_locale(locale: &str) -> String {
    locale.trim().replace('_', "-").to_ascii_lowercase()
}

/// Normalized lookup candidates for `locale`, most specific first.
///
/// `es-MX` yields `["es-mx", "es"]`; a bare language yields itself.
pub fn locale_candidates(locale: &str) -> Vec<String> {
    let exact = normalize_locale(locale);
    match exact.split_once('-') {
        Some((language, _)) => {
            let language = language.to_string();
            vec![exact, language]
        }
        None => vec![exact],
    }
}

/// The bundles shipped with the skill, keyed by normalized locale.
pub fn builtin_bundles() -> Result<HashMap<String, LocaleBundle>> {
    let mut bundles = HashMap::new();
    for (locale, source) in [("en", EN_BUNDLE), ("es", ES_BUNDLE)] {
        let bundle = LocaleBundle::from_toml(source)
            .map_err(|e| HangukError::Locale(format!("built-in {}: {}", locale, e)))?;
        bundles.insert(locale.to_string(), bundle);
    }
    Ok(bundles)
}

/// Read every `<locale>.toml` file in `dir`.
///
/// Files with another extension are ignored. The file stem is the locale code.
pub fn load_bundle_dir(dir: &Path) -> Result<HashMap<String, LocaleBundle>> {
    let mut bundles = HashMap::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("toml") {
            debug!(path = %path.display(), "Skipping non-bundle file");
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let source = std::fs::read_to_string(&path)?;
        let bundle = LocaleBundle::from_toml(&source)
            .map_err(|e| HangukError::Locale(format!("{}: {}", path.display(), e)))?;
        bundles.insert(normalize_locale(stem), bundle);
    }
    info!(dir = %dir.display(), count = bundles.len(), "Locale bundles loaded");
    Ok(bundles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hanguk_core::types::keys;

    #[test]
    fn test_builtin_bundles_parse() {
        let bundles = builtin_bundles().unwrap();
        assert_eq!(bundles.len(), 2);
        for locale in ["en", "es"] {
            let bundle = &bundles[locale];
            for key in keys::REQUIRED_TEXT {
                assert!(
                    matches!(bundle.get(key), Some(Message::Text(_))),
                    "{} lacks {}",
                    locale,
                    key
                );
            }
            match bundle.get(keys::KOREA_FACTS) {
                Some(Message::List(facts)) => assert_eq!(facts.len(), 11),
                other => panic!("{}: unexpected facts entry {:?}", locale, other),
            }
        }
    }

    #[test]
    fn test_builtin_english_welcome() {
        let bundles = builtin_bundles().unwrap();
        assert_eq!(
            bundles["en"].get(keys::WELCOME_MESSAGE),
            Some(&Message::Text(
                "Welcome Dey, you can say \"Tell me a fact about Korea\" or Help. Which would you like to try?"
                    .to_string()
            ))
        );
    }

    #[test]
    fn test_from_toml_rejects_nested_tables() {
        let err = LocaleBundle::from_toml("[section]\nkey = 1").unwrap_err();
        assert!(matches!(err, HangukError::Locale(_)));
    }

    #[test]
    fn test_merge_overrides() {
        let mut base = LocaleBundle::from_toml("A = \"one\"\nB = \"two\"").unwrap();
        let over = LocaleBundle::from_toml("B = \"deux\"\nC = [\"x\"]").unwrap();
        base.merge(over);
        assert_eq!(base.len(), 3);
        assert_eq!(base.get("B"), Some(&Message::Text("deux".to_string())));
        assert_eq!(base.get("C"), Some(&Message::List(vec!["x".to_string()])));
    }

    #[test]
    fn test_normalize_locale() {
        assert_eq!(normalize_locale("es-ES"), "es-es");
        assert_eq!(normalize_locale("pt_BR"), "pt-br");
        assert_eq!(normalize_locale(" EN "), "en");
    }

    #[test]
    fn test_locale_candidates() {
        assert_eq!(locale_candidates("es-MX"), vec!["es-mx", "es"]);
        assert_eq!(locale_candidates("en"), vec!["en"]);
        assert_eq!(locale_candidates("zh_Hant_TW"), vec!["zh-hant-tw", "zh"]);
    }

    #[test]
    fn test_load_bundle_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("fr_FR.toml"), "HELP_MESSAGE = \"Aide ?\"").unwrap();
        std::fs::write(dir.path().join("README.md"), "not a bundle").unwrap();

        let bundles = load_bundle_dir(dir.path()).unwrap();
        assert_eq!(bundles.len(), 1);
        assert_eq!(
            bundles["fr-fr"].get("HELP_MESSAGE"),
            Some(&Message::Text("Aide ?".to_string()))
        );
    }

    #[test]
    fn test_load_bundle_dir_reports_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("de.toml"), "HELP_MESSAGE = ").unwrap();
        let err = load_bundle_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains("de.toml"));
    }
}
