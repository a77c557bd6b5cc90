//! crates/material_tracker_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any physical store; all caller-facing
//! serialization uses camelCase field names.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One inventory entry describing a quantity of mined material received at a
/// location on a date. `id` is assigned exactly once, by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialRecord {
    pub id: i64,
    pub material_type: String,
    pub weight: f64,
    pub intake_date: NaiveDate,
    pub location: String,
    /// Optional free text; an empty string means "no description".
    #[serde(default)]
    pub description: String,
    /// Stamped by the store at creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Stamped by the local store on update; the remote store manages its own.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

/// The caller-provided payload for creating a record. The store assigns
/// identity and the creation timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialDraft {
    pub material_type: String,
    pub weight: f64,
    pub intake_date: NaiveDate,
    pub location: String,
    #[serde(default)]
    pub description: String,
}

/// A partial update. Only the fields present are merged onto the existing
/// record; `intake_date` is deliberately absent because it is not editable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MaterialPatch {
    /// True when the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.material_type.is_none()
            && self.weight.is_none()
            && self.location.is_none()
            && self.description.is_none()
    }
}

impl MaterialRecord {
    /// Merges the fields present in `patch` onto this record.
    pub fn apply_patch(&mut self, patch: &MaterialPatch) {
        if let Some(material_type) = &patch.material_type {
            self.material_type = material_type.clone();
        }
        if let Some(weight) = patch.weight {
            self.weight = weight;
        }
        if let Some(location) = &patch.location {
            self.location = location.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
    }
}

/// One entry of a UI selection list, as produced by the reference-data
/// catalogs (`displayName` is shown, `value` is stored).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectOption {
    pub display_name: String,
    pub value: String,
}

/// The record store's passive connectivity indicator. Purely informational;
/// it has no behavioral effect on callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStatus {
    pub initialized: bool,
    pub online: bool,
    pub table_name: String,
    pub has_credentials: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> MaterialRecord {
        MaterialRecord {
            id: 1,
            material_type: "cobre".to_string(),
            weight: 3.0,
            intake_date: NaiveDate::from_ymd_opt(2026, 8, 29).unwrap(),
            location: "Mina Norte".to_string(),
            description: "lote 1".to_string(),
            created_at: None,
            modified_at: None,
        }
    }

    #[test]
    fn patch_merges_only_present_fields() {
        let mut rec = record();
        rec.apply_patch(&MaterialPatch {
            weight: Some(4.0),
            ..Default::default()
        });
        assert_eq!(rec.weight, 4.0);
        assert_eq!(rec.material_type, "cobre");
        assert_eq!(rec.description, "lote 1");
    }

    #[test]
    fn record_serializes_with_camel_case_keys() {
        let value = serde_json::to_value(record()).unwrap();
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("materialType"));
        assert!(obj.contains_key("intakeDate"));
        assert_eq!(obj["intakeDate"], "2026-08-29");
    }

    #[test]
    fn empty_patch_serializes_to_empty_object() {
        let value = serde_json::to_value(MaterialPatch::default()).unwrap();
        assert_eq!(value, serde_json::json!({}));
    }
}
