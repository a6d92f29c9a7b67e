use axum::Router;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::infrastructure::messaging::BackgroundProcessor;
use crate::presentation::http::{
    handlers::{DocumentHandler, SummaryHandler},
    routes::{document_routes, health_routes, summary_routes},
};

/// Request body cap: the 32 MiB upload limit plus headroom for multipart
/// framing. The upload use case enforces the exact file-size limit.
const BODY_LIMIT_BYTES: usize = 33 * 1024 * 1024;

pub struct HttpServer {
    document_handler: Arc<DocumentHandler>,
    summary_handler: Arc<SummaryHandler>,
    background_processor: Arc<BackgroundProcessor>,
    port: u16,
}

impl HttpServer {
    pub fn new(
        document_handler: Arc<DocumentHandler>,
        summary_handler: Arc<SummaryHandler>,
        background_processor: Arc<BackgroundProcessor>,
        port: Option<u16>,
    ) -> Self {
        Self {
            document_handler,
            summary_handler,
            background_processor,
            port: port.unwrap_or(3000),
        }
    }

    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let background_processor = self.background_processor.clone();
        tokio::spawn(async move {
            background_processor.start().await;
        });

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let app = Router::new()
            .merge(health_routes())
            .merge(document_routes(self.document_handler.clone()))
            .merge(summary_routes(self.summary_handler.clone()))
            .layer(cors)
            .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
            .layer(
                TraceLayer::new_for_http()
                    .on_request(
                        |request: &axum::http::Request<axum::body::Body>, _span: &tracing::Span| {
                            tracing::info!(
                                "Received request: {} {}",
                                request.method(),
                                request.uri()
                            );
                        },
                    )
                    .on_response(
                        |response: &axum::http::Response<axum::body::Body>,
                         latency: std::time::Duration,
                         _span: &tracing::Span| {
                            tracing::info!(
                                "Response: {} (took {} ms)",
                                response.status(),
                                latency.as_millis()
                            );
                        },
                    )
                    .on_failure(
                        |error: ServerErrorsFailureClass,
                         latency: std::time::Duration,
                         _span: &tracing::Span| {
                            tracing::error!(
                                "Request failed: {:?} (took {} ms)",
                                error,
                                latency.as_millis()
                            );
                        },
                    ),
            );

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", addr);
        axum::serve(listener, app).await?;

        Ok(())
    }
}
