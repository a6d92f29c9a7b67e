mod application;
mod domain;
mod infrastructure;
mod presentation;

use infrastructure::container::AppContainer;
use presentation::http::HttpServer;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let container = match AppContainer::new().await {
        Ok(container) => container,
        Err(e) => {
            tracing::error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok());

    let server = HttpServer::new(
        container.document_handler.clone(),
        container.summary_handler.clone(),
        container.background_processor.clone(),
        port,
    );

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
