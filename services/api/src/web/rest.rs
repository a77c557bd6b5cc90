//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification. This is the seam a UI sits on:
//! handlers validate input, call the store façade, and return plain data.

use crate::web::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Utc;
use material_tracker_core::domain::{MaterialDraft, MaterialPatch, MaterialRecord, SelectOption};
use material_tracker_core::ports::Origin;
use material_tracker_core::validate::{validate_draft, validate_patch};
use material_tracker_core::view::render_table;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::{OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        list_materials_handler,
        create_material_handler,
        update_material_handler,
        delete_material_handler,
        sync_materials_handler,
        status_handler,
        reference_handler,
    ),
    components(
        schemas(
            MaterialDto,
            CreateMaterialRequest,
            UpdateMaterialRequest,
            MaterialResponse,
            ListMaterialsResponse,
            TableRowDto,
            DeleteResponse,
            SyncResponse,
            StatusResponse,
            SelectOptionDto,
            ReferenceResponse,
        )
    ),
    tags(
        (name = "Material Tracker API", description = "API endpoints for the mined-materials inventory tracker.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// A stored material record as returned to callers.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaterialDto {
    id: i64,
    material_type: String,
    weight: f64,
    /// ISO 8601 calendar date, `YYYY-MM-DD`.
    intake_date: String,
    location: String,
    description: String,
    created_at: Option<String>,
    modified_at: Option<String>,
}

impl From<MaterialRecord> for MaterialDto {
    fn from(record: MaterialRecord) -> Self {
        Self {
            id: record.id,
            material_type: record.material_type,
            weight: record.weight,
            intake_date: record.intake_date.to_string(),
            location: record.location,
            description: record.description,
            created_at: record.created_at.map(|t| t.to_rfc3339()),
            modified_at: record.modified_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// The creation payload. The intake date is stamped server-side to the
/// current day and is not accepted from the caller.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaterialRequest {
    material_type: String,
    weight: f64,
    location: String,
    description: Option<String>,
}

/// A partial update; absent fields are left untouched.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMaterialRequest {
    material_type: Option<String>,
    weight: Option<f64>,
    location: Option<String>,
    description: Option<String>,
}

/// A record plus the store that actually served the operation
/// (`remote`, `local`, or `fallback`).
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaterialResponse {
    origin: String,
    material: MaterialDto,
}

/// One display-ready table row.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableRowDto {
    id: i64,
    material_type: String,
    weight: String,
    intake_date: String,
    location: String,
    description: String,
}

/// The rendered table for the current record set and search query.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListMaterialsResponse {
    origin: String,
    rows: Vec<TableRowDto>,
    total_records: usize,
    total_weight: f64,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    origin: String,
    deleted: bool,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
    uploaded: usize,
}

/// The passive connectivity indicator.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    initialized: bool,
    online: bool,
    table_name: String,
    has_credentials: bool,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SelectOptionDto {
    display_name: String,
    value: String,
}

impl From<SelectOption> for SelectOptionDto {
    fn from(option: SelectOption) -> Self {
        Self {
            display_name: option.display_name,
            value: option.value,
        }
    }
}

/// Both UI selection lists, loaded from the external catalogs (or their
/// hardcoded fallbacks).
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceResponse {
    materials: Vec<SelectOptionDto>,
    locations: Vec<SelectOptionDto>,
}

#[derive(Deserialize)]
pub struct SearchParams {
    q: Option<String>,
}

fn origin_label(origin: &Origin) -> String {
    match origin {
        Origin::Remote => "remote",
        Origin::Local => "local",
        Origin::Fallback { .. } => "fallback",
    }
    .to_string()
}

fn internal_error(e: impl std::fmt::Display) -> (StatusCode, String) {
    error!("Store operation failed: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "The operation could not be completed".to_string(),
    )
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// List materials as a rendered table, optionally filtered.
///
/// The `q` parameter is a case-insensitive substring match over material
/// type, location, and description.
#[utoipa::path(
    get,
    path = "/materials",
    params(("q" = Option<String>, Query, description = "Search query over the text fields.")),
    responses(
        (status = 200, description = "The rendered table", body = ListMaterialsResponse)
    )
)]
pub async fn list_materials_handler(
    State(app_state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<ListMaterialsResponse> {
    let served = app_state.store.list().await;
    let view = render_table(&served.value, params.q.as_deref());
    Json(ListMaterialsResponse {
        origin: origin_label(&served.origin),
        rows: view
            .rows
            .into_iter()
            .map(|row| TableRowDto {
                id: row.id,
                material_type: row.material_type,
                weight: row.weight,
                intake_date: row.intake_date,
                location: row.location,
                description: row.description,
            })
            .collect(),
        total_records: view.total_records,
        total_weight: view.total_weight,
    })
}

/// Register a new material intake.
#[utoipa::path(
    post,
    path = "/materials",
    request_body = CreateMaterialRequest,
    responses(
        (status = 201, description = "Material created", body = MaterialResponse),
        (status = 422, description = "Validation failure"),
        (status = 500, description = "Both stores rejected the write")
    )
)]
pub async fn create_material_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<CreateMaterialRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let draft = MaterialDraft {
        material_type: payload.material_type,
        weight: payload.weight,
        // The intake date is always the creation day; not user-editable.
        intake_date: Utc::now().date_naive(),
        location: payload.location,
        description: payload.description.unwrap_or_default(),
    };
    validate_draft(&draft).map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    let served = app_state.store.create(draft).await.map_err(internal_error)?;
    Ok((
        StatusCode::CREATED,
        Json(MaterialResponse {
            origin: origin_label(&served.origin),
            material: served.value.into(),
        }),
    ))
}

/// Update an existing material record.
#[utoipa::path(
    patch,
    path = "/materials/{id}",
    params(("id" = i64, Path, description = "The record id.")),
    request_body = UpdateMaterialRequest,
    responses(
        (status = 200, description = "Material updated", body = MaterialResponse),
        (status = 404, description = "No record with that id"),
        (status = 422, description = "Validation failure")
    )
)]
pub async fn update_material_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateMaterialRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let patch = MaterialPatch {
        material_type: payload.material_type,
        weight: payload.weight,
        location: payload.location,
        description: payload.description,
    };
    validate_patch(&patch).map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    let served = app_state
        .store
        .update(id, patch)
        .await
        .map_err(internal_error)?;
    let origin = origin_label(&served.origin);
    match served.value {
        Some(record) => Ok(Json(MaterialResponse {
            origin,
            material: record.into(),
        })),
        None => Err((
            StatusCode::NOT_FOUND,
            format!("No material with id {}", id),
        )),
    }
}

/// Delete a material record.
///
/// Deleting an id the active store does not hold is not an error; the set is
/// left unchanged and success is still reported.
#[utoipa::path(
    delete,
    path = "/materials/{id}",
    params(("id" = i64, Path, description = "The record id.")),
    responses(
        (status = 200, description = "Deletion outcome", body = DeleteResponse)
    )
)]
pub async fn delete_material_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let served = app_state.store.delete(id).await.map_err(internal_error)?;
    Ok(Json(DeleteResponse {
        origin: origin_label(&served.origin),
        deleted: served.value,
    }))
}

/// Upload local-only records to the remote store.
#[utoipa::path(
    post,
    path = "/materials/sync",
    responses(
        (status = 200, description = "Number of records uploaded", body = SyncResponse)
    )
)]
pub async fn sync_materials_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let uploaded = app_state
        .store
        .sync_to_remote()
        .await
        .map_err(internal_error)?;
    Ok(Json(SyncResponse { uploaded }))
}

/// The store's passive connectivity indicator.
#[utoipa::path(
    get,
    path = "/status",
    responses((status = 200, description = "Store status", body = StatusResponse))
)]
pub async fn status_handler(State(app_state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let status = app_state.store.status();
    Json(StatusResponse {
        initialized: status.initialized,
        online: status.online,
        table_name: status.table_name,
        has_credentials: status.has_credentials,
    })
}

/// Both selection lists for the intake form.
///
/// The two catalogs are fetched concurrently; they share no state, so no
/// coordination is needed beyond joining the futures.
#[utoipa::path(
    get,
    path = "/reference",
    responses((status = 200, description = "Selection lists", body = ReferenceResponse))
)]
pub async fn reference_handler(State(app_state): State<Arc<AppState>>) -> Json<ReferenceResponse> {
    let (materials, locations) = tokio::join!(
        app_state.reference.load_materials(),
        app_state.reference.load_locations()
    );
    Json(ReferenceResponse {
        materials: materials.into_iter().map(Into::into).collect(),
        locations: locations.into_iter().map(Into::into).collect(),
    })
}
