//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use crate::domain::LocationCode;
use crate::planner::{Planner, SearchError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/locations", get(list_locations))
        .route("/locations/:code/departures", get(list_departures))
        .route("/locations/:code/arrivals", get(list_arrivals))
        .route("/connections", get(list_connections))
        .route("/itinerary", get(find_itinerary))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List every location.
async fn list_locations(State(state): State<AppState>) -> Json<LocationsResponse> {
    let locations = state
        .network
        .locations()
        .iter()
        .map(LocationResult::from_location)
        .collect();

    Json(LocationsResponse { locations })
}

/// List every connection.
async fn list_connections(State(state): State<AppState>) -> Json<ConnectionsResponse> {
    let connections = state
        .network
        .connections()
        .iter()
        .map(|c| ConnectionResult::from_connection(c))
        .collect();

    Json(ConnectionsResponse { connections })
}

/// Parse a location code from a request and check that it is known.
fn known_location(state: &AppState, raw: &str) -> Result<LocationCode, AppError> {
    let code = LocationCode::parse_normalized(raw).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    if state.network.location(&code).is_none() {
        return Err(AppError::NotFound {
            message: format!("Unknown location: {code}"),
        });
    }
    Ok(code)
}

/// Connections leaving a location.
async fn list_departures(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ConnectionsResponse>, AppError> {
    let code = known_location(&state, &code)?;

    let connections = state
        .network
        .departures_from(&code)
        .iter()
        .map(|c| ConnectionResult::from_connection(c))
        .collect();

    Ok(Json(ConnectionsResponse { connections }))
}

/// Connections arriving at a location.
async fn list_arrivals(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ConnectionsResponse>, AppError> {
    let code = known_location(&state, &code)?;

    let connections = state
        .network
        .arrivals_to(&code)
        .iter()
        .map(|c| ConnectionResult::from_connection(c))
        .collect();

    Ok(Json(ConnectionsResponse { connections }))
}

/// Find the shortest itinerary between two locations.
///
/// Codes that are well-formed but unknown give `found: false`, the same as
/// when no itinerary exists.
async fn find_itinerary(
    State(state): State<AppState>,
    query: Result<Query<ItineraryRequest>, QueryRejection>,
) -> Result<Json<ItineraryResponse>, AppError> {
    let Query(req) = query?;
    let origin = LocationCode::parse_normalized(&req.from).map_err(|e| AppError::BadRequest {
        message: format!("Invalid origin: {e}"),
    })?;
    let destination =
        LocationCode::parse_normalized(&req.to).map_err(|e| AppError::BadRequest {
            message: format!("Invalid destination: {e}"),
        })?;

    let planner = Planner::new(state.network.as_ref());
    let outcome = planner.search(&origin, &destination)?;

    debug!(
        %origin,
        %destination,
        found = outcome.itinerary.is_some(),
        settled = outcome.settled,
        candidates = outcome.candidates,
        "Itinerary request"
    );

    Ok(Json(ItineraryResponse::from_option(
        outcome.itinerary.as_ref(),
    )))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::MalformedTime(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::BadRequest {
            message: e.body_text(),
        }
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = match self {
            AppError::BadRequest { message }
            | AppError::NotFound { message }
            | AppError::Internal { message } => message,
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            debug!(%status, %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::load;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use tower_service::Service;

    const LOCATIONS: &str = "\
A,Alpha Field,Alpha,AA
B,Bravo Field,Bravo,BB
C,Charlie Field,Charlie,CC
D,Delta Field,Delta,DD
";

    const CONNECTIONS: &str = "\
A,B,08:00,09:00,60
B,C,09:30,10:30,60
A,C,08:00,12:00,240
";

    fn state_with(connections: &str) -> AppState {
        AppState::new(load::from_readers(LOCATIONS.as_bytes(), connections.as_bytes()).unwrap())
    }

    fn state() -> AppState {
        state_with(CONNECTIONS)
    }

    fn query(from: &str, to: &str) -> Result<Query<ItineraryRequest>, QueryRejection> {
        Ok(Query(ItineraryRequest {
            from: from.to_string(),
            to: to.to_string(),
        }))
    }

    /// Send a GET through the full router.
    async fn send_get(uri: &str) -> axum::response::Response {
        let mut app = create_router(state());
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        app.call(request).await.unwrap()
    }

    #[tokio::test]
    async fn health_is_ok() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn lists_locations_in_file_order() {
        let Json(response) = list_locations(State(state())).await;
        let codes: Vec<_> = response.locations.iter().map(|l| l.code.as_str()).collect();
        assert_eq!(codes, ["A", "B", "C", "D"]);
    }

    #[tokio::test]
    async fn lists_connections_with_assigned_ids() {
        let Json(response) = list_connections(State(state())).await;
        let ids: Vec<_> = response.connections.iter().map(|c| c.id).collect();
        assert_eq!(ids, [1001, 1002, 1003]);
    }

    #[tokio::test]
    async fn departures_and_arrivals() {
        let Json(departures) = list_departures(State(state()), Path("a".to_string()))
            .await
            .unwrap();
        let ids: Vec<_> = departures.connections.iter().map(|c| c.id).collect();
        assert_eq!(ids, [1001, 1003]);

        let Json(arrivals) = list_arrivals(State(state()), Path("C".to_string()))
            .await
            .unwrap();
        let ids: Vec<_> = arrivals.connections.iter().map(|c| c.id).collect();
        assert_eq!(ids, [1002, 1003]);
    }

    #[tokio::test]
    async fn unknown_location_is_not_found() {
        let err = list_departures(State(state()), Path("ZZZ".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_location_is_bad_request() {
        let err = list_arrivals(State(state()), Path("not-a-code".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn finds_itinerary() {
        let Json(response) = find_itinerary(State(state()), query("A", "c")).await.unwrap();

        assert!(response.found);
        let itinerary = response.itinerary.unwrap();
        assert_eq!(itinerary.total_minutes, 150);
        let ids: Vec<_> = itinerary.legs.iter().map(|c| c.id).collect();
        assert_eq!(ids, [1001, 1002]);
        assert_eq!(itinerary.layovers, [30]);
    }

    #[tokio::test]
    async fn unreachable_is_not_found_in_body() {
        let Json(response) = find_itinerary(State(state()), query("A", "D")).await.unwrap();
        assert!(!response.found);
        assert!(response.itinerary.is_none());

        let Json(response) = find_itinerary(State(state()), query("A", "ZZZ")).await.unwrap();
        assert!(!response.found);
    }

    #[tokio::test]
    async fn invalid_query_code_is_bad_request() {
        let err = find_itinerary(State(state()), query("A", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn malformed_time_is_internal_error() {
        let err = find_itinerary(State(state_with("A,B,8am,09:00,60\n")), query("A", "B"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Internal { .. }));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn missing_query_parameter_is_json_bad_request() {
        let response = send_get("/itinerary?from=A").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json["error"].as_str().unwrap().contains("to"));
    }

    #[tokio::test]
    async fn itinerary_through_router() {
        let response = send_get("/itinerary?from=a&to=c").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["found"], true);
        assert_eq!(json["itinerary"]["total_minutes"], 150);
    }
}
