//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{CatalogAdapter, FileSlot, LocalStore, SupabaseStore},
    config::Config,
    error::ApiError,
    store::MaterialStore,
    web::{
        create_material_handler, delete_material_handler, list_materials_handler,
        reference_handler, rest::ApiDoc, state::AppState, status_handler,
        sync_materials_handler, update_material_handler,
    },
};
use axum::{
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        Method,
    },
    routing::{get, post},
    Router,
};
use material_tracker_core::ports::RemoteBackend;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Build the Store Adapters & Initialize the Façade ---
    let http = reqwest::Client::new();

    let remote: Option<Arc<dyn RemoteBackend>> =
        match (&config.supabase_url, &config.supabase_key) {
            (Some(url), Some(key)) => Some(Arc::new(SupabaseStore::new(
                http.clone(),
                url.clone(),
                key.clone(),
                config.table_name.clone(),
            ))),
            _ => None,
        };

    let local = Arc::new(LocalStore::new(Arc::new(FileSlot::new(
        config.local_store_path.clone(),
    ))));

    let store = Arc::new(MaterialStore::new(
        remote,
        local,
        config.table_name.clone(),
    ));
    let online = store.initialize().await;
    info!(
        "Record store initialized ({})",
        if online { "online" } else { "offline" }
    );

    // --- 3. Initialize the Reference-Data Adapter ---
    let reference = Arc::new(CatalogAdapter::new(
        http,
        config.pokemon_api_url.clone(),
        config.countries_api_url.clone(),
    ));

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        store,
        reference,
        config: config.clone(),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, ACCEPT]);

    // --- 5. Create the Web Router ---
    let api_router = Router::new()
        .route(
            "/materials",
            get(list_materials_handler).post(create_material_handler),
        )
        .route(
            "/materials/{id}",
            axum::routing::patch(update_material_handler).delete(delete_material_handler),
        )
        .route("/materials/sync", post(sync_materials_handler))
        .route("/status", get(status_handler))
        .route("/reference", get(reference_handler))
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
