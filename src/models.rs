use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A stored credential record, keyed by a store-assigned id.
///
/// The `id` is allocated by the backend at creation time and never changes.
/// All other fields are free-form text, required at creation and editable
/// afterwards. Nothing about secret visibility is persisted here; the
/// reveal toggle lives in view state only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    #[serde(skip)]
    pub id: String,
    pub title: String,
    pub username: String,
    /// Stored as `password` on the wire.
    #[serde(rename = "password")]
    pub secret: String,
    pub url: String,
    pub note: String,
}

impl CredentialRecord {
    pub fn new(id: impl Into<String>, draft: CredentialDraft) -> Self {
        Self {
            id: id.into(),
            title: draft.title,
            username: draft.username,
            secret: draft.secret,
            url: draft.url,
            note: draft.note,
        }
    }
}

/// An unsaved credential: the add form, or the serialized body of a write.
///
/// The store assigns the id, so drafts never carry one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialDraft {
    pub title: String,
    pub username: String,
    #[serde(rename = "password")]
    pub secret: String,
    pub url: String,
    pub note: String,
}

impl CredentialDraft {
    /// Name of the first empty field, if any. All five fields are required.
    pub fn first_missing_field(&self) -> Option<&'static str> {
        if self.title.trim().is_empty() {
            Some("title")
        } else if self.username.trim().is_empty() {
            Some("username")
        } else if self.secret.trim().is_empty() {
            Some("password")
        } else if self.url.trim().is_empty() {
            Some("url")
        } else if self.note.trim().is_empty() {
            Some("note")
        } else {
            None
        }
    }

    pub fn is_complete(&self) -> bool {
        self.first_missing_field().is_none()
    }
}

impl From<CredentialRecord> for CredentialDraft {
    fn from(record: CredentialRecord) -> Self {
        Self {
            title: record.title,
            username: record.username,
            secret: record.secret,
            url: record.url,
            note: record.note,
        }
    }
}

/// Decode a snapshot payload (complete `id -> record` JSON object) into
/// records ordered by key.
///
/// The backend sends `null` for an empty collection; that decodes to an
/// empty vec. Keys are the record ids, so duplicates are impossible by
/// construction. Entries that fail to decode are skipped with a warning
/// rather than poisoning the whole snapshot.
pub fn decode_snapshot(value: &serde_json::Value) -> Vec<CredentialRecord> {
    let map: BTreeMap<String, serde_json::Value> = match value {
        serde_json::Value::Null => return Vec::new(),
        serde_json::Value::Object(entries) => entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
        other => {
            tracing::warn!("Snapshot payload is not an object: {}", other);
            return Vec::new();
        }
    };

    map.into_iter()
        .filter_map(|(id, body)| {
            match serde_json::from_value::<CredentialRecord>(body) {
                Ok(mut record) => {
                    record.id = id;
                    Some(record)
                }
                Err(e) => {
                    tracing::warn!("Skipping undecodable record {}: {}", id, e);
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn draft() -> CredentialDraft {
        CredentialDraft {
            title: "Mail".to_string(),
            username: "a@b.com".to_string(),
            secret: "x".to_string(),
            url: "mail.com".to_string(),
            note: "n".to_string(),
        }
    }

    #[test]
    fn test_complete_draft_has_no_missing_field() {
        assert!(draft().is_complete());
        assert_eq!(draft().first_missing_field(), None);
    }

    #[test]
    fn test_each_empty_field_is_reported() {
        let mut d = draft();
        d.title.clear();
        assert_eq!(d.first_missing_field(), Some("title"));

        let mut d = draft();
        d.username = "   ".to_string();
        assert_eq!(d.first_missing_field(), Some("username"));

        let mut d = draft();
        d.secret.clear();
        assert_eq!(d.first_missing_field(), Some("password"));

        let mut d = draft();
        d.url.clear();
        assert_eq!(d.first_missing_field(), Some("url"));

        let mut d = draft();
        d.note.clear();
        assert_eq!(d.first_missing_field(), Some("note"));
    }

    #[test]
    fn test_record_from_draft_carries_id() {
        let record = CredentialRecord::new("k1", draft());
        assert_eq!(record.id, "k1");
        assert_eq!(record.title, "Mail");
    }

    #[test]
    fn test_decode_snapshot_null_is_empty() {
        assert!(decode_snapshot(&json!(null)).is_empty());
    }

    #[test]
    fn test_decode_snapshot_assigns_key_as_id() {
        let payload = json!({
            "k1": {"title": "Mail", "username": "a@b.com", "password": "x", "url": "mail.com", "note": "n"},
            "k2": {"title": "Bank", "username": "me", "password": "y", "url": "bank.com", "note": "m"},
        });
        let records = decode_snapshot(&payload);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "k1");
        assert_eq!(records[1].id, "k2");
        assert_eq!(records[1].title, "Bank");
    }

    #[test]
    fn test_decode_snapshot_skips_bad_entries() {
        let payload = json!({
            "k1": {"title": "Mail", "username": "a@b.com", "password": "x", "url": "mail.com", "note": "n"},
            "k2": "not a record",
        });
        let records = decode_snapshot(&payload);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "k1");
    }

    #[test]
    fn test_draft_serializes_without_id() {
        let value = serde_json::to_value(draft()).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["title"], "Mail");
    }
}
