//! services/api/src/adapters/remote.rs
//!
//! The remote store adapter, speaking the PostgREST-style contract of a
//! hosted Supabase table. Every request carries the API key twice (an
//! `apikey` header and a bearer token); every request and response body goes
//! through the camelCase/snake_case key conversion, writes included.

use async_trait::async_trait;
use material_tracker_core::casing::{keys_to_camel, keys_to_snake};
use material_tracker_core::domain::{MaterialDraft, MaterialPatch, MaterialRecord};
use material_tracker_core::ports::{
    ConnectivityProbe, MaterialBackend, PortError, PortResult, RemoteBackend,
};
use reqwest::{RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;

//=========================================================================================
// Wire Conversion Helpers
//=========================================================================================

/// Serializes a payload and rewrites its keys to the remote column casing.
fn wire_body<T: Serialize>(payload: &T) -> PortResult<Value> {
    let value = serde_json::to_value(payload).map_err(|e| PortError::Unexpected(e.to_string()))?;
    Ok(keys_to_snake(&value))
}

/// Rebuilds a domain record from one snake_cased response row.
fn record_from_wire(row: &Value) -> PortResult<MaterialRecord> {
    serde_json::from_value(keys_to_camel(row)).map_err(|e| PortError::Remote(e.to_string()))
}

fn records_from_wire(rows: &[Value]) -> PortResult<Vec<MaterialRecord>> {
    rows.iter().map(record_from_wire).collect()
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A remote store adapter that implements the `RemoteBackend` port against a
/// Supabase REST endpoint.
#[derive(Clone)]
pub struct SupabaseStore {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    table: String,
}

impl SupabaseStore {
    /// Creates a new `SupabaseStore`. The base URL is the project root, not
    /// the REST path (`https://<project>.supabase.co`).
    pub fn new(http: reqwest::Client, base_url: String, api_key: String, table: String) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            table,
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Parses a response that should carry an array of rows, checking the
    /// HTTP status first.
    async fn rows_from(response: Response) -> PortResult<Vec<Value>> {
        let status = response.status();
        if !status.is_success() {
            return Err(PortError::Remote(format!("unexpected status {}", status)));
        }
        response
            .json::<Vec<Value>>()
            .await
            .map_err(|e| PortError::Remote(e.to_string()))
    }
}

//=========================================================================================
// `MaterialBackend` Trait Implementation
//=========================================================================================

#[async_trait]
impl MaterialBackend for SupabaseStore {
    /// Returns every row, newest first (server-side `order=id.desc`).
    async fn list(&self) -> PortResult<Vec<MaterialRecord>> {
        let response = self
            .authed(self.http.get(self.table_url()))
            .query(&[("select", "*"), ("order", "id.desc")])
            .send()
            .await
            .map_err(|e| PortError::Remote(e.to_string()))?;
        let rows = Self::rows_from(response).await?;
        records_from_wire(&rows)
    }

    async fn create(&self, draft: MaterialDraft) -> PortResult<MaterialRecord> {
        let body = wire_body(&draft)?;
        let response = self
            .authed(self.http.post(self.table_url()))
            .header("Prefer", "return=representation")
            .json(&body)
            .send()
            .await
            .map_err(|e| PortError::Remote(e.to_string()))?;
        let rows = Self::rows_from(response).await?;
        rows.first()
            .ok_or_else(|| PortError::Remote("create returned no representation".to_string()))
            .and_then(record_from_wire)
    }

    async fn update(&self, id: i64, patch: MaterialPatch) -> PortResult<Option<MaterialRecord>> {
        let body = wire_body(&patch)?;
        let response = self
            .authed(self.http.patch(self.table_url()))
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .json(&body)
            .send()
            .await
            .map_err(|e| PortError::Remote(e.to_string()))?;
        // An equality filter that matches nothing yields an empty array.
        let rows = Self::rows_from(response).await?;
        rows.first().map(record_from_wire).transpose()
    }

    async fn delete(&self, id: i64) -> PortResult<bool> {
        let response = self
            .authed(self.http.delete(self.table_url()))
            .query(&[("id", format!("eq.{}", id))])
            .send()
            .await
            .map_err(|e| PortError::Remote(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            Ok(true)
        } else {
            Err(PortError::Remote(format!("unexpected status {}", status)))
        }
    }
}

//=========================================================================================
// `ConnectivityProbe` and `RemoteBackend` Trait Implementations
//=========================================================================================

#[async_trait]
impl ConnectivityProbe for SupabaseStore {
    /// A reachability check against the REST base path using the configured
    /// credentials.
    async fn probe(&self) -> PortResult<()> {
        let response = self
            .authed(self.http.get(format!("{}/rest/v1/", self.base_url)))
            .send()
            .await
            .map_err(|e| PortError::Remote(e.to_string()))?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(PortError::Remote(format!(
                "unexpected status {}",
                response.status()
            )))
        }
    }
}

#[async_trait]
impl RemoteBackend for SupabaseStore {
    /// Inserts a record that already carries its identity, used when local
    /// records are uploaded to the remote store.
    async fn insert(&self, record: &MaterialRecord) -> PortResult<MaterialRecord> {
        let body = wire_body(record)?;
        let response = self
            .authed(self.http.post(self.table_url()))
            .header("Prefer", "return=representation")
            .json(&body)
            .send()
            .await
            .map_err(|e| PortError::Remote(e.to_string()))?;
        let rows = Self::rows_from(response).await?;
        rows.first()
            .ok_or_else(|| PortError::Remote("insert returned no representation".to_string()))
            .and_then(record_from_wire)
    }
}

//=========================================================================================
// Tests
//=========================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn draft_bodies_use_remote_column_casing() {
        let draft = MaterialDraft {
            material_type: "oro".to_string(),
            weight: 12.5,
            intake_date: NaiveDate::from_ymd_opt(2026, 8, 29).unwrap(),
            location: "Mina Norte".to_string(),
            description: String::new(),
        };
        let body = wire_body(&draft).unwrap();
        assert_eq!(
            body,
            json!({
                "material_type": "oro",
                "weight": 12.5,
                "intake_date": "2026-08-29",
                "location": "Mina Norte",
                "description": ""
            })
        );
    }

    #[test]
    fn patch_bodies_apply_the_same_conversion_as_creates() {
        let patch = MaterialPatch {
            material_type: Some("plata".to_string()),
            weight: Some(4.0),
            ..Default::default()
        };
        let body = wire_body(&patch).unwrap();
        assert_eq!(body, json!({"material_type": "plata", "weight": 4.0}));
    }

    #[test]
    fn response_rows_convert_back_to_domain_records() {
        let row = json!({
            "id": 42,
            "material_type": "cobre",
            "weight": 3.0,
            "intake_date": "2026-08-29",
            "location": "Mina Sur",
            "description": "lote 1",
            "created_at": "2026-08-29T10:00:00Z"
        });
        let record = record_from_wire(&row).unwrap();
        assert_eq!(record.id, 42);
        assert_eq!(record.material_type, "cobre");
        assert_eq!(record.description, "lote 1");
        assert!(record.created_at.is_some());
        assert!(record.modified_at.is_none());
    }

    #[test]
    fn malformed_rows_surface_as_remote_errors() {
        let row = json!({"id": "not-a-number"});
        assert!(matches!(
            record_from_wire(&row),
            Err(PortError::Remote(_))
        ));
    }
}
