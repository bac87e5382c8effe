use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use flight_server::config::ServerConfig;
use flight_server::network::load;
use flight_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ServerConfig::from_env().unwrap_or_else(|e| {
        error!("{e}");
        std::process::exit(2);
    });

    let network = load::from_paths(&config.airports_path, &config.flights_path)
        .unwrap_or_else(|e| {
            error!("Failed to load network: {e}");
            std::process::exit(1);
        });
    info!(
        locations = network.len(),
        connections = network.connection_count(),
        "Loaded network"
    );

    let app = create_router(AppState::new(network));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind listen address");
    info!(addr = %config.bind_addr, "Flight itinerary planner listening");
    info!("API Endpoints:");
    info!("  GET /health                       - Health check");
    info!("  GET /locations                    - All locations");
    info!("  GET /locations/:code/departures   - Connections leaving a location");
    info!("  GET /locations/:code/arrivals     - Connections arriving at a location");
    info!("  GET /connections                  - All connections");
    info!("  GET /itinerary?from=X&to=Y        - Shortest itinerary");

    axum::serve(listener, app).await.expect("Server error");
}
