//! Thesaurus entries: the normalized shape of a thesaurus document.
//!
//! Thesaurus services answer with either a single object or an array of
//! objects, one per sense. Each sense carries a functional label (`fl`) and
//! groups of synonyms under `meta.syns`. Unknown words typically come back as
//! an array of plain-string suggestions instead. All of that is normalized
//! here, once, so the selector only ever sees a [`ThesaurusEntry`].

use crate::token::Category;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One sense of a word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenseRecord {
    /// Grammatical role of this sense (`fl` on the wire).
    pub functional_label: Option<String>,

    /// Ordered synonym groups (`meta.syns` on the wire).
    pub synonym_groups: Vec<Vec<String>>,
}

impl SenseRecord {
    pub fn new(label: impl Into<String>, groups: Vec<Vec<String>>) -> Self {
        Self {
            functional_label: Some(label.into()),
            synonym_groups: groups,
        }
    }

    /// Exact string match between the functional label and a category.
    pub fn matches(&self, category: Category) -> bool {
        self.functional_label.as_deref() == Some(category.as_str())
    }

    fn from_object(obj: &serde_json::Map<String, Value>) -> Self {
        let functional_label = obj.get("fl").and_then(Value::as_str).map(String::from);

        let synonym_groups = obj
            .get("meta")
            .and_then(|m| m.get("syns"))
            .and_then(Value::as_array)
            .map(|groups| {
                groups
                    .iter()
                    .filter_map(Value::as_array)
                    .map(|group| {
                        group
                            .iter()
                            .filter_map(|s| s.as_str().map(String::from))
                            .collect()
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            functional_label,
            synonym_groups,
        }
    }
}

/// Every sense known for a word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThesaurusEntry {
    pub senses: Vec<SenseRecord>,
}

impl ThesaurusEntry {
    pub fn new(senses: Vec<SenseRecord>) -> Self {
        Self { senses }
    }

    /// Normalize a decoded thesaurus document.
    ///
    /// Returns `None` when the document is neither an array nor an object.
    /// Array members that are not objects are dropped.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(Self {
                senses: items
                    .iter()
                    .filter_map(Value::as_object)
                    .map(SenseRecord::from_object)
                    .collect(),
            }),
            Value::Object(obj) => Some(Self {
                senses: vec![SenseRecord::from_object(obj)],
            }),
            _ => None,
        }
    }

    /// Decode and normalize a raw JSON document.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let value: Value = serde_json::from_str(raw).map_err(|e| e.to_string())?;
        Self::from_value(&value).ok_or_else(|| "expected a JSON array or object".to_string())
    }

    /// Senses whose functional label equals the category.
    pub fn senses_for(&self, category: Category) -> impl Iterator<Item = &SenseRecord> {
        self.senses.iter().filter(move |s| s.matches(category))
    }

    pub fn is_empty(&self) -> bool {
        self.senses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUICK: &str = r#"[
        {"meta": {"id": "quick", "syns": [["fast", "speedy"], ["rapid"]]}, "fl": "adjective"},
        {"meta": {"id": "quick", "syns": [["promptly"]]}, "fl": "adverb"}
    ]"#;

    #[test]
    fn parses_array_of_senses() {
        let entry = ThesaurusEntry::parse(QUICK).unwrap();
        assert_eq!(entry.senses.len(), 2);
        assert_eq!(entry.senses[0].functional_label.as_deref(), Some("adjective"));
        assert_eq!(
            entry.senses[0].synonym_groups,
            vec![vec!["fast".to_string(), "speedy".into()], vec!["rapid".into()]]
        );
    }

    #[test]
    fn single_object_is_wrapped() {
        let entry =
            ThesaurusEntry::parse(r#"{"fl": "noun", "meta": {"syns": [["hound"]]}}"#).unwrap();
        assert_eq!(entry.senses.len(), 1);
        assert!(entry.senses[0].matches(Category::Noun));
    }

    #[test]
    fn suggestion_strings_are_dropped() {
        let entry = ThesaurusEntry::parse(r#"["quack", "quirk"]"#).unwrap();
        assert!(entry.is_empty());
    }

    #[test]
    fn non_string_synonyms_are_dropped() {
        let entry =
            ThesaurusEntry::parse(r#"[{"fl": "verb", "meta": {"syns": [["run", 3, null], "x"]}}]"#)
                .unwrap();
        assert_eq!(entry.senses[0].synonym_groups, vec![vec!["run".to_string()]]);
    }

    #[test]
    fn missing_fields_default() {
        let entry = ThesaurusEntry::parse(r#"[{"hwi": {}}]"#).unwrap();
        assert_eq!(entry.senses[0], SenseRecord::default());
        assert!(!entry.senses[0].matches(Category::Other));
    }

    #[test]
    fn scalar_document_is_malformed() {
        assert!(ThesaurusEntry::parse("42").is_err());
        assert!(ThesaurusEntry::parse("{not json").is_err());
    }

    #[test]
    fn senses_for_filters_by_label() {
        let entry = ThesaurusEntry::parse(QUICK).unwrap();
        assert_eq!(entry.senses_for(Category::Adverb).count(), 1);
        assert_eq!(entry.senses_for(Category::Noun).count(), 0);
    }
}
