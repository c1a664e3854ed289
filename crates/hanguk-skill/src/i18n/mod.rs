//! Message resolution over immutable locale bundles.
//!
//! A [`Translator`] is built once at start-up and shared read-only across
//! requests. Lookups walk the chain exact locale, language subtag, fallback
//! locale. A key that is missing from the whole chain is a configuration
//! fault and is reported as [`TranslateError::MissingKey`].

pub mod bundle;
pub mod format;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use hanguk_core::config::LocalizationConfig;

pub use bundle::{LocaleBundle, Message};

use crate::error::{SkillError, TranslateError};
use bundle::{locale_candidates, normalize_locale};

/// Outcome of resolving one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved<'a> {
    /// A template with any arguments substituted.
    Text(String),
    /// A list entry, returned as stored.
    List(&'a [String]),
}

/// Read-only message tables for every supported locale.
#[derive(Debug, Clone)]
pub struct Translator {
    bundles: HashMap<String, LocaleBundle>,
    fallback: String,
}

impl Translator {
    /// Build a translator. `fallback` must name one of `bundles`.
    pub fn new(
        bundles: HashMap<String, LocaleBundle>,
        fallback: &str,
    ) -> Result<Self, TranslateError> {
        let bundles: HashMap<String, LocaleBundle> = bundles
            .into_iter()
            .map(|(locale, bundle)| (normalize_locale(&locale), bundle))
            .collect();
        let fallback = normalize_locale(fallback);
        if !bundles.contains_key(&fallback) {
            return Err(TranslateError::UnknownFallback(fallback));
        }
        Ok(Self { bundles, fallback })
    }

    /// Built-in bundles, overlaid with `bundle_dir` when configured.
    pub fn from_config(config: &LocalizationConfig) -> Result<Self, SkillError> {
        let mut bundles = bundle::builtin_bundles()?;
        if let Some(dir) = &config.bundle_dir {
            for (locale, extra) in bundle::load_bundle_dir(Path::new(dir))? {
                bundles.entry(locale).or_default().merge(extra);
            }
        }
        let translator = Self::new(bundles, &config.fallback_locale)?;
        tracing::info!(
            locales = ?translator.locales(),
            fallback = %translator.fallback,
            "Translator ready"
        );
        Ok(translator)
    }

    pub fn fallback_locale(&self) -> &str {
        &self.fallback
    }

    /// Locales with a bundle, sorted.
    pub fn locales(&self) -> Vec<&str> {
        let mut locales: Vec<&str> = self.bundles.keys().map(String::as_str).collect();
        locales.sort_unstable();
        locales
    }

    /// Look `key` up along the locale chain without formatting.
    pub fn lookup(&self, locale: &str, key: &str) -> Result<&Message, TranslateError> {
        self.chain(locale)
            .into_iter()
            .filter_map(|loc| self.bundles.get(&loc))
            .find_map(|bundle| bundle.get(key))
            .ok_or_else(|| TranslateError::MissingKey {
                locale: locale.to_string(),
                key: key.to_string(),
            })
    }

    /// Resolve `key` for `locale`, substituting `args` into text templates.
    pub fn resolve(
        &self,
        locale: &str,
        key: &str,
        args: &[&str],
    ) -> Result<Resolved<'_>, TranslateError> {
        Ok(match self.lookup(locale, key)? {
            Message::Text(template) => Resolved::Text(format::sprintf(template, args)),
            Message::List(items) => Resolved::List(items),
        })
    }

    /// Resolve a text message.
    pub fn text(&self, locale: &str, key: &str, args: &[&str]) -> Result<String, TranslateError> {
        match self.resolve(locale, key, args)? {
            Resolved::Text(text) => Ok(text),
            Resolved::List(_) => Err(TranslateError::NotText {
                key: key.to_string(),
            }),
        }
    }

    /// Resolve a list message.
    pub fn list(&self, locale: &str, key: &str) -> Result<&[String], TranslateError> {
        match self.lookup(locale, key)? {
            Message::List(items) => Ok(items),
            Message::Text(_) => Err(TranslateError::NotList {
                key: key.to_string(),
            }),
        }
    }

    /// The entry for `key` in the fallback bundle itself.
    pub fn fallback_message(&self, key: &str) -> Option<&Message> {
        self.bundles.get(&self.fallback).and_then(|b| b.get(key))
    }

    /// Bind this translator to one request's locale.
    pub fn bind(self: &Arc<Self>, locale: &str) -> Localizer {
        Localizer {
            translator: Arc::clone(self),
            locale: locale.to_string(),
        }
    }

    fn chain(&self, locale: &str) -> Vec<String> {
        let mut chain = locale_candidates(locale);
        if !chain.contains(&self.fallback) {
            chain.push(self.fallback.clone());
        }
        chain
    }
}

/// A translator bound to a single request locale.
#[derive(Debug, Clone)]
pub struct Localizer {
    translator: Arc<Translator>,
    locale: String,
}

impl Localizer {
    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn t(&self, key: &str) -> Result<String, TranslateError> {
        self.translator.text(&self.locale, key, &[])
    }

    pub fn t_args(&self, key: &str, args: &[&str]) -> Result<String, TranslateError> {
        self.translator.text(&self.locale, key, args)
    }

    pub fn list(&self, key: &str) -> Result<&[String], TranslateError> {
        self.translator.list(&self.locale, key)
    }
}
