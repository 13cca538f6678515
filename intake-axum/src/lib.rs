#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the intake-axum crate.
//! [intake_core]: https://docs.rs/intake_core/latest/intake_core/index.html
//! [intake_axum]: https://docs.rs/intake_axum/latest/intake_axum/index.html
#![doc = include_str!("../README.md")]

mod submission_routes;

use aide::{
    axum::{ApiRouter, routing::get},
    openapi::OpenApi,
};
use axum::Extension;
use intake_core::ports::Application;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

mod openapi;
use openapi::{api_docs, docs_routes};

pub mod config;
use config::AxumConfig;

/// Construct a full API router with the given state and config
pub fn router<T: ApiApplication>(state: T, config: AxumConfig) -> axum::Router {
    let mut api = OpenApi::default();
    let router = ApiRouter::new()
        .api_route("/health", get(submission_routes::health::<T>))
        .merge(submission_routes::router())
        .nest_api_service("/docs", docs_routes())
        .finish_api_with(&mut api, api_docs)
        .layer(Extension(Arc::new(api))) // Arc is very important here or you will face massive memory and performance issues
        .with_state(state);

    if config.allow_any_origin {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

/// Starts the HTTP server with the provided configuration
pub async fn start_server<T: ApiApplication>(
    config: AxumConfig,
    app: T,
) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    tracing::info!("Listening for requests on {}", listener.local_addr()?);

    let service = router(app, config);
    axum::serve(listener, service).await
}

/// Axum imposes all sorts of constraints on what can pass for state. This
/// trait, coupled with a blanket implementation, specifies it all upfront and
/// in one place.
pub trait ApiApplication: Clone + Send + Sync + 'static + Application {}

// this is the blanket implementation
impl<T> ApiApplication for T where T: Clone + Send + Sync + 'static + Application {}
