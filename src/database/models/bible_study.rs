//! Bible study model (`bibleStudies` collection).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Editable fields of a bible study session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BibleStudyInput {
    pub title: String,
    #[serde(default)]
    pub title_cn: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_cn: String,
    /// Passage studied, e.g. `Romans 8`
    #[serde(default)]
    pub passage: String,
    #[serde(default)]
    pub passage_cn: String,
    pub date: NaiveDate,
    /// Free-form start time as entered, e.g. `19:30`
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub location_cn: String,
}

impl BibleStudyInput {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("bible study title must not be empty".to_string()));
        }
        Ok(())
    }
}

/// A stored bible study session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BibleStudy {
    #[serde(default)]
    pub id: String,

    #[serde(flatten)]
    pub details: BibleStudyInput,
}

impl BibleStudy {
    pub fn new(id: impl Into<String>, details: BibleStudyInput) -> Self {
        Self {
            id: id.into(),
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flattened_shape() {
        let json = r#"{
            "id": "s1",
            "title": "Romans",
            "title_cn": "羅馬書",
            "passage": "Romans 8",
            "date": "2025-03-15",
            "time": "19:30"
        }"#;
        let study: BibleStudy = serde_json::from_str(json).unwrap();
        assert_eq!(study.id, "s1");
        assert_eq!(study.details.title_cn, "羅馬書");
        assert_eq!(study.details.location, "");

        let value = serde_json::to_value(&study).unwrap();
        assert_eq!(value["passage"], "Romans 8");
        assert_eq!(value["date"], "2025-03-15");
    }
}
