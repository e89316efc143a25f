//! Church event models (`events` collection).

use chrono::{DateTime, Utc};
use mongodb::bson;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// An event as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub name: String,
    pub description: String,
    pub name_cn: String,
    pub description_cn: String,
}

/// Stored form of an event.
///
/// The timestamp is a native BSON date so range filters compare instants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDocument {
    #[serde(default)]
    pub id: String,
    pub timestamp: bson::DateTime,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub name_cn: String,
    #[serde(default)]
    pub description_cn: String,
}

impl From<EventDocument> for EventRecord {
    fn from(doc: EventDocument) -> Self {
        Self {
            id: doc.id,
            timestamp: DateTime::from_timestamp_millis(doc.timestamp.timestamp_millis())
                .unwrap_or_default(),
            name: doc.name,
            description: doc.description,
            name_cn: doc.name_cn,
            description_cn: doc.description_cn,
        }
    }
}

impl From<&EventRecord> for EventDocument {
    fn from(event: &EventRecord) -> Self {
        Self {
            id: event.id.clone(),
            timestamp: bson::DateTime::from_millis(event.timestamp.timestamp_millis()),
            name: event.name.clone(),
            description: event.description.clone(),
            name_cn: event.name_cn.clone(),
            description_cn: event.description_cn.clone(),
        }
    }
}

/// Admin payload for creating or replacing an event.
#[derive(Debug, Clone, Deserialize)]
pub struct EventInput {
    pub timestamp: DateTime<Utc>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub name_cn: String,
    #[serde(default)]
    pub description_cn: String,
}

impl EventInput {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("event name must not be empty".to_string()));
        }
        Ok(())
    }
}

impl EventRecord {
    pub fn from_input(id: impl Into<String>, input: EventInput) -> Self {
        Self {
            id: id.into(),
            timestamp: input.timestamp,
            name: input.name,
            description: input.description,
            name_cn: input.name_cn,
            description_cn: input.description_cn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_document_conversion_keeps_millis() {
        let event = EventRecord {
            id: "e1".to_string(),
            timestamp: Utc.with_ymd_and_hms(2025, 3, 15, 10, 30, 0).unwrap(),
            name: "Bible Study".to_string(),
            description: String::new(),
            name_cn: "查经班".to_string(),
            description_cn: String::new(),
        };

        let back = EventRecord::from(EventDocument::from(&event));
        assert_eq!(back, event);
    }

    #[test]
    fn test_blank_name_rejected() {
        let input: EventInput =
            serde_json::from_str(r#"{"timestamp": "2025-03-15T10:00:00Z", "name": "  "}"#).unwrap();
        assert!(matches!(input.validate(), Err(AppError::Validation(_))));
    }
}
