use std::{convert::Infallible, sync::Arc};

use axum::{
    Router,
    body::Body as AxumBody,
    extract::Request,
    http::{StatusCode, header},
    middleware,
    response::Response,
    routing::any,
};
use eyre::{Result, WrapErr};
use tower_http::trace::TraceLayer;

use crate::{
    adapters::middleware::{request_id_middleware, request_timing_middleware},
    core::{Resolution, ResolverStage},
};

/// HTTP handler that answers every request from a resolver chain
#[derive(Clone)]
pub struct RedirectHandler {
    chain: Arc<ResolverStage>,
}

impl RedirectHandler {
    pub fn new(chain: Arc<ResolverStage>) -> Self {
        Self { chain }
    }

    /// Resolve the raw request path and build the response.
    ///
    /// The path is taken exactly as received; percent-encoding is not decoded.
    pub fn handle_request(&self, req: &Request) -> Result<Response<AxumBody>> {
        let path = req.uri().path();

        match self.chain.resolve(path) {
            Resolution::Redirect { url, source } => {
                tracing::debug!(path, url, stage = %source, "Redirecting");
                Response::builder()
                    .status(StatusCode::PERMANENT_REDIRECT)
                    .header(header::LOCATION, url)
                    .body(AxumBody::empty())
                    .wrap_err_with(|| format!("Failed to build redirect response to {url}"))
            }
            Resolution::Terminal(terminal) => {
                tracing::debug!(path, "No redirect matched, serving default response");
                Response::builder()
                    .status(StatusCode::OK)
                    .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
                    .body(AxumBody::from(terminal.body().to_string()))
                    .wrap_err("Failed to build default response")
            }
        }
    }

    /// Router sending every path and method to this handler.
    pub fn into_router(self) -> Router {
        let handler = self;
        let route = any(move |req: Request| {
            let handler = handler.clone();
            async move {
                match handler.handle_request(&req) {
                    Ok(response) => Ok::<Response<AxumBody>, Infallible>(response),
                    Err(e) => {
                        tracing::error!("Request handling error: {:?}", e);
                        let error_response = Response::builder()
                            .status(StatusCode::INTERNAL_SERVER_ERROR)
                            .body(AxumBody::from("Internal Server Error"))
                            .unwrap_or_else(|_| {
                                Response::new(AxumBody::from("Internal Server Error"))
                            });
                        Ok(error_response)
                    }
                }
            }
        });

        Router::new()
            .route("/", route.clone())
            .route("/{*path}", route)
            .layer(middleware::from_fn(request_timing_middleware))
            .layer(middleware::from_fn(request_id_middleware))
            .layer(TraceLayer::new_for_http())
    }
}
