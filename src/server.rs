//! HTTP layer over the query façade.
//!
//! Thin plumbing: every route validates through [`ClusterService`] and
//! serializes whatever comes back. Client errors surface as 400/404 with a
//! `{"detail": ...}` body; the static word-cloud UI is mounted under `/ui`
//! with the index page at `/`.

#[cfg(feature = "http-server")]
pub async fn serve(settings: crate::Settings) -> anyhow::Result<()> {
    use std::sync::Arc;

    use axum::extract::{Path, State};
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use tower_http::cors::CorsLayer;
    use tower_http::services::{ServeDir, ServeFile};

    use crate::cache::ClusterCache;
    use crate::data::{DataFile, load_model};
    use crate::error::QueryError;
    use crate::service::ClusterService;

    crate::logging::init_with_config(&settings.logging);

    let data = DataFile::load(&settings.data_path)?;
    let (model, hymns) = load_model(data)?;
    let service = Arc::new(ClusterService::new(model, hymns, ClusterCache::new()));

    /// Wraps QueryError so the façade stays HTTP-agnostic.
    struct ApiError(QueryError);

    impl IntoResponse for ApiError {
        fn into_response(self) -> Response {
            let status = match self.0 {
                QueryError::InvalidRange => StatusCode::BAD_REQUEST,
                QueryError::HymnNotFound => StatusCode::NOT_FOUND,
            };
            let body = Json(serde_json::json!({ "detail": self.0.to_string() }));
            (status, body).into_response()
        }
    }

    async fn get_clusters(
        State(service): State<Arc<ClusterService>>,
        Path(sim): Path<f64>,
    ) -> Result<Response, ApiError> {
        let assignment = service.clusters(sim).map_err(ApiError)?;
        Ok(Json(&*assignment).into_response())
    }

    async fn get_hymn(
        State(service): State<Arc<ClusterService>>,
        Path(hymn_id): Path<String>,
    ) -> Result<Response, ApiError> {
        let record = service.hymn(&hymn_id).map_err(ApiError)?;
        Ok(Json(record).into_response())
    }

    async fn get_hymns_bulk(
        State(service): State<Arc<ClusterService>>,
        Json(hymn_ids): Json<Vec<String>>,
    ) -> Result<Response, ApiError> {
        let found = service
            .hymns_bulk(hymn_ids.iter().map(String::as_str))
            .map_err(ApiError)?;
        Ok(Json(found).into_response())
    }

    async fn health_check() -> &'static str {
        "OK"
    }

    let index_page = settings.server.ui_dir.join("index.html");
    let router = Router::new()
        .route("/clusters/{sim}", get(get_clusters))
        .route("/hymns/{hymn_id}", get(get_hymn))
        .route("/hymns/bulk", post(get_hymns_bulk))
        .route("/health", get(health_check))
        .nest_service("/ui", ServeDir::new(&settings.server.ui_dir))
        .route_service("/", ServeFile::new(index_page))
        .layer(CorsLayer::permissive())
        .with_state(service);

    async fn shutdown_signal() {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("[server] failed to listen for ctrl+c: {e}");
        }
    }

    let bind = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    crate::log_event!("server", "listening", "http://{bind}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    crate::log_event!("server", "shut down");
    Ok(())
}

#[cfg(not(feature = "http-server"))]
pub async fn serve(_settings: crate::Settings) -> anyhow::Result<()> {
    eprintln!("HTTP server support is not compiled in.");
    eprintln!("Please rebuild with: cargo build --features http-server");
    std::process::exit(1);
}
