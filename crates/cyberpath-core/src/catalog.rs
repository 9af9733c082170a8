use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::Deserialize;

use crate::prefs::Language;
use crate::task::Category;

/// Career-path content table, one entry per category in both languages.
/// The content is static data, shipped as a JSON resource compiled into the
/// binary.
static CATALOG_JSON: &str = include_str!("../data/paths.json");

static CATALOG: LazyLock<BTreeMap<Category, LocalizedEntry>> = LazyLock::new(|| {
    serde_json::from_str(CATALOG_JSON).expect("embedded career path catalog is valid JSON")
});

#[derive(Debug, Clone, Deserialize)]
pub struct LocalizedEntry {
    pub en: PathEntry,
    pub ar: PathEntry,
}

impl LocalizedEntry {
    #[must_use]
    pub fn for_language(&self, language: Language) -> &PathEntry {
        match language {
            Language::En => &self.en,
            Language::Ar => &self.ar,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathEntry {
    pub label: String,
    pub title: String,
    pub overview: String,
    pub skills: Vec<Skill>,
    pub certifications: Vec<String>,
    pub tools: Vec<String>,
    pub learning_path: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Skill {
    pub name: String,
    pub level: SkillLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    #[must_use]
    pub fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (SkillLevel::Beginner, Language::En) => "beginner",
            (SkillLevel::Intermediate, Language::En) => "intermediate",
            (SkillLevel::Advanced, Language::En) => "advanced",
            (SkillLevel::Beginner, Language::Ar) => "مبتدئ",
            (SkillLevel::Intermediate, Language::Ar) => "متوسط",
            (SkillLevel::Advanced, Language::Ar) => "متقدم",
        }
    }
}

#[must_use]
pub fn catalog() -> &'static BTreeMap<Category, LocalizedEntry> {
    &CATALOG
}

#[must_use]
pub fn entry(category: Category) -> Option<&'static LocalizedEntry> {
    CATALOG.get(&category)
}

/// Short label for a category in the given language. A category without a
/// catalog entry falls back to its raw key.
#[must_use]
pub fn category_label(category: Category, language: Language) -> &'static str {
    entry(category)
        .map(|localized| localized.for_language(language).label.as_str())
        .unwrap_or_else(|| category.key())
}

#[cfg(test)]
mod tests {
    use super::{SkillLevel, catalog, category_label, entry};
    use crate::prefs::Language;
    use crate::task::Category;

    #[test]
    fn every_category_has_both_languages() {
        for category in Category::ALL {
            let localized = entry(category).expect("catalog entry");
            assert!(!localized.en.title.is_empty());
            assert!(!localized.ar.title.is_empty());
            assert!(!localized.en.skills.is_empty());
            assert_eq!(localized.en.skills.len(), localized.ar.skills.len());
            assert!(!localized.en.learning_path.is_empty());
        }
        assert_eq!(catalog().len(), Category::ALL.len());
    }

    #[test]
    fn labels_round_trip_across_language_toggle() {
        for category in Category::ALL {
            let before = category_label(category, Language::En);
            let arabic = category_label(category, Language::Ar);
            let after = category_label(category, Language::En);
            assert_ne!(before, arabic);
            assert_eq!(before, after);
        }
    }

    #[test]
    fn skill_levels_are_localized() {
        assert_eq!(SkillLevel::Beginner.label(Language::En), "beginner");
        assert_eq!(SkillLevel::Beginner.label(Language::Ar), "مبتدئ");
        assert_eq!(SkillLevel::Advanced.label(Language::Ar), "متقدم");
    }

    #[test]
    fn pentest_entry_matches_source_content() {
        let localized = entry(Category::Pentest).expect("pentest entry");
        assert_eq!(localized.en.label, "Penetration Testing");
        assert_eq!(localized.en.title, "Penetration Testing Career Path");
        assert!(
            localized
                .en
                .certifications
                .iter()
                .any(|cert| cert.contains("OSCP"))
        );
        assert_eq!(localized.ar.label, "اختبار الاختراق");
    }
}
