use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::errors::{DecodeError, ValidationError};

pub const MOOD_RANGE: RangeInclusive<f64> = 0.0..=3.0;

/// Mood given to a day that has nothing written yet. Sits in the middle of the neutral band.
pub const DEFAULT_MOOD: f64 = 1.5;

/// What the user wrote for one day. Stored as JSON under the day's
/// [DateKey](super::date_key::DateKey).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub title: String,
    /// Older journals stored the body under `text`.
    #[serde(alias = "text")]
    pub body: String,
    pub mood: f64,
}

impl JournalEntry {
    pub fn new(title: impl Into<String>, body: impl Into<String>, mood: f64) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            mood,
        }
    }

    /// Blank entry presented for a day that has no entry yet.
    pub fn draft() -> Self {
        Self::new("", "", DEFAULT_MOOD)
    }

    /// Checks the content rules every stored entry obeys. The date rule lives in the store
    /// because it depends on the current day.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.is_empty() && self.body.is_empty() {
            return Err(ValidationError::EmptyEntry);
        }
        if !has_valid_mood(self.mood) {
            return Err(ValidationError::MoodOutOfRange(self.mood));
        }
        Ok(())
    }

    pub fn with_title(self, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..self
        }
    }

    pub fn with_body(self, body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..self
        }
    }

    pub fn with_mood(self, mood: f64) -> Self {
        Self { mood, ..self }
    }
}

/// NaN and infinities are never valid moods.
pub fn has_valid_mood(mood: f64) -> bool {
    MOOD_RANGE.contains(&mood)
}

/// Deterministic serialization of an entry: `{"title":..,"body":..,"mood":..}`.
pub fn encode(entry: &JournalEntry) -> String {
    serde_json::to_string(entry).expect("Journal entries always serialize")
}

/// Inverse of [encode]. Malformed JSON, missing fields and wrongly typed fields are all
/// [DecodeError]s; what to do with them is up to the caller.
pub fn decode(value: &str) -> Result<JournalEntry, DecodeError> {
    serde_json::from_str(value).map_err(DecodeError)
}

#[cfg(test)]
mod tests {
    use crate::journal::errors::ValidationError;

    use super::{decode, encode, JournalEntry, DEFAULT_MOOD};

    #[test]
    fn encoding_is_stable() {
        let entry = JournalEntry::new("A", "x", 0.5);
        assert_eq!(encode(&entry), r#"{"title":"A","body":"x","mood":0.5}"#);
        assert_eq!(encode(&entry), encode(&entry.clone()));
    }

    #[test]
    fn decodes_what_was_encoded() {
        let entry = JournalEntry::new("Rainy day", "Stayed in, read \"Dune\".\nGood.", 2.2);
        assert_eq!(decode(&encode(&entry)).unwrap(), entry);
    }

    #[test]
    fn decodes_legacy_text_field() {
        let entry = decode(r#"{"title":"B","text":"y","mood":2.5}"#).unwrap();
        assert_eq!(entry, JournalEntry::new("B", "y", 2.5));
    }

    #[test]
    fn integer_mood_is_a_number() {
        assert_eq!(decode(r#"{"title":"B","body":"y","mood":2}"#).unwrap().mood, 2.0);
    }

    #[test]
    fn rejects_malformed_values() {
        for value in [
            "",
            "not json",
            "{",
            "[]",
            r#"{"title":"A","body":"x"}"#,
            r#"{"body":"x","mood":1.0}"#,
            r#"{"title":"A","body":"x","mood":"high"}"#,
            r#"{"title":"A","body":"x","mood":null}"#,
            r#"{"title":5,"body":"x","mood":1.0}"#,
        ] {
            assert!(decode(value).is_err(), "{value:?} should not decode");
        }
    }

    #[test]
    fn validation() {
        assert!(JournalEntry::new("A", "", 0.0).validate().is_ok());
        assert!(JournalEntry::new("", "x", 3.0).validate().is_ok());
        assert!(matches!(
            JournalEntry::new("", "", 1.0).validate(),
            Err(ValidationError::EmptyEntry)
        ));
        for mood in [-0.1, 3.01, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                JournalEntry::new("A", "x", mood).validate(),
                Err(ValidationError::MoodOutOfRange(_))
            ));
        }
    }

    #[test]
    fn draft_is_blank_and_neutral() {
        let draft = JournalEntry::draft();
        assert!(draft.title.is_empty() && draft.body.is_empty());
        assert_eq!(draft.mood, DEFAULT_MOOD);
    }
}
