mod error;
mod handlers;

pub use error::{status_for, ApiError};

use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::context::RequestContext;
use crate::repository::ProgrammingLangRepository;
use crate::service::ProgrammingLangService;

/// Shared handler state: the service and the per-request deadline.
pub struct AppState<R> {
    service: Arc<ProgrammingLangService<R>>,
    request_timeout: Option<Duration>,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            request_timeout: self.request_timeout,
        }
    }
}

impl<R: ProgrammingLangRepository> AppState<R> {
    pub fn new(service: ProgrammingLangService<R>) -> Self {
        Self {
            service: Arc::new(service),
            request_timeout: None,
        }
    }

    /// Every request gets a context that expires after `timeout`. `None` disables the deadline.
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    fn request_context(&self) -> RequestContext {
        match self.request_timeout {
            Some(timeout) => RequestContext::with_timeout(timeout),
            None => RequestContext::background(),
        }
    }
}

pub fn create_router<R: ProgrammingLangRepository + 'static>(state: AppState<R>) -> Router {
    let api = Router::new()
        .route(
            "/langs",
            get(handlers::list_langs::<R>).post(handlers::create_lang::<R>),
        )
        .route(
            "/langs/{id}",
            get(handlers::get_lang::<R>)
                .put(handlers::update_lang::<R>)
                .delete(handlers::delete_lang::<R>),
        );

    Router::new()
        .nest("/v1", api)
        .route("/health", get(handlers::health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
