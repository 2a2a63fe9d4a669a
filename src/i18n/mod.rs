//! Internationalization (i18n) support
//!
//! Ships with `pt-BR` and `en` strings; YAML files in the site's language
//! directory (`languages/<lang>.yml`) override or add languages.

use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const BUILTIN: [(&str, &str); 2] = [
    ("pt-BR", include_str!("pt-BR.yml")),
    ("en", include_str!("en.yml")),
];

/// Internationalization handler
#[derive(Debug, Clone)]
pub struct I18n {
    /// Current language
    language: String,
    /// Language data: lang -> key -> translation
    translations: HashMap<String, HashMap<String, String>>,
}

impl I18n {
    /// Create a handler with the built-in languages loaded
    pub fn new(language: &str) -> Self {
        let mut translations = HashMap::new();
        for (lang, source) in BUILTIN {
            match serde_yaml::from_str::<HashMap<String, String>>(source) {
                Ok(data) => {
                    translations.insert(lang.to_string(), data);
                }
                Err(e) => tracing::error!("Built-in language {} is invalid: {}", lang, e),
            }
        }

        Self {
            language: language.to_string(),
            translations,
        }
    }

    /// Load language files from a directory, merging over existing entries
    pub fn load_languages<P: AsRef<Path>>(&mut self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        if !dir.exists() {
            return Ok(());
        }

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let ext = path.extension().and_then(|e| e.to_str());
            if !path.is_file() || !matches!(ext, Some("yml") | Some("yaml")) {
                continue;
            }

            let Some(lang) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let content = fs::read_to_string(&path)?;
            match serde_yaml::from_str::<HashMap<String, String>>(&content) {
                Ok(data) => {
                    self.translations
                        .entry(lang.to_string())
                        .or_default()
                        .extend(data);
                    tracing::debug!("Loaded language file: {:?}", path);
                }
                Err(e) => {
                    tracing::warn!("Failed to parse language file {:?}: {}", path, e);
                }
            }
        }

        Ok(())
    }

    /// Get the current language
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Get a translation by key, falling back to English and then the key itself
    pub fn get(&self, key: &str) -> String {
        [self.language.as_str(), "en"]
            .iter()
            .find_map(|lang| self.translations.get(*lang)?.get(key))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Get a translation with `%s` replaced by `arg`
    pub fn format(&self, key: &str, arg: &str) -> String {
        self.get(key).replace("%s", arg)
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::new("en")
    }
}
