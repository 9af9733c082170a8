use tracing::{debug, warn};

use crate::datastore::DataStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Language {
        match self {
            Language::En => Language::Ar,
            Language::Ar => Language::En,
        }
    }

    /// Arabic text runs right-to-left; the renderer flips table alignment on
    /// this.
    #[must_use]
    pub fn is_rtl(self) -> bool {
        self == Language::Ar
    }

    pub(crate) fn parse(raw: &str) -> Option<Language> {
        match raw.trim() {
            "en" => Some(Language::En),
            "ar" => Some(Language::Ar),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub(crate) fn parse(raw: &str) -> Option<Theme> {
        match raw.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Preferences {
    pub language: Language,
    pub theme: Theme,
}

impl Preferences {
    /// Missing or unrecognized persisted values silently fall back to the
    /// defaults (`en`, `light`).
    #[tracing::instrument(skip(store))]
    pub fn load(store: &DataStore) -> anyhow::Result<Self> {
        let language = match store.load_language()? {
            Some(raw) => Language::parse(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "unrecognized language value; using default");
                Language::default()
            }),
            None => Language::default(),
        };

        let theme = match store.load_theme()? {
            Some(raw) => Theme::parse(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "unrecognized theme value; using default");
                Theme::default()
            }),
            None => Theme::default(),
        };

        debug!(language = language.as_str(), theme = theme.as_str(), "loaded preferences");
        Ok(Self { language, theme })
    }

    /// Both scalars are re-persisted after every toggle, as one operation.
    #[tracing::instrument(skip(self, store))]
    pub fn save(&self, store: &DataStore) -> anyhow::Result<()> {
        store.save_prefs(self.language.as_str(), self.theme.as_str())
    }

    pub fn toggle_language(&mut self, store: &DataStore) -> anyhow::Result<Language> {
        self.language = self.language.toggled();
        self.save(store)?;
        Ok(self.language)
    }

    pub fn toggle_theme(&mut self, store: &DataStore) -> anyhow::Result<Theme> {
        self.theme = self.theme.toggled();
        self.save(store)?;
        Ok(self.theme)
    }
}
