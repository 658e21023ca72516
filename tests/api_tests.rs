use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use transit_agency::config::environment::EnvironmentConfig;
use transit_agency::middleware::actor::ACTOR_HEADER;
use transit_agency::routes::create_app;
use transit_agency::state::AppState;

async fn create_test_app(dir: &tempfile::TempDir) -> Router {
    let config = EnvironmentConfig {
        data_dir: dir.path().to_path_buf(),
        ..EnvironmentConfig::default()
    };
    let state = AppState::open(config).await.unwrap();
    create_app(state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>, actor: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(actor) = actor {
        builder = builder.header(ACTOR_HEADER, actor);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_station(app: &Router, name: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/stations",
        Some(json!({ "name": name, "city": "Lyon" })),
        Some("admin"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["id"].as_str().unwrap().to_string()
}

async fn create_coach_model(app: &Router) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/vehicle-models",
        Some(json!({
            "manufacturer": "Irisbus",
            "modelName": "Crossway",
            "fuelType": "diesel",
            "seatBitmask": "1101111011",
            "cellsPerRow": 5
        })),
        Some("admin"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["numberSeats"], 8);
    body["data"]["id"].as_str().unwrap().to_string()
}

async fn create_vehicle(app: &Router, owner: &str, model_id: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/vehicles",
        Some(json!({
            "immatriculation": "AB-123-CD",
            "permanentOwnerId": owner,
            "model": { "kind": "catalog", "value": model_id }
        })),
        Some("admin"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["resourceId"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_check() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_test_app(&dir).await;
    let (status, body) = send(&app, "GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_mutation_without_actor_is_unauthorized() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_test_app(&dir).await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/stations",
        Some(json!({ "name": "Part-Dieu", "city": "Lyon" })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_station_audit_is_stamped_with_actor() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_test_app(&dir).await;
    let id = create_station(&app, "Part-Dieu").await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/stations/{}", id),
        Some(json!({ "name": "Perrache", "city": "Lyon" })),
        Some("editor"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["audit"]["createdBy"], "admin");
    assert_eq!(body["data"]["audit"]["updatedBy"], "editor");
    assert_eq!(body["data"]["ownerId"], id);
}

#[tokio::test]
async fn test_trip_between_same_station_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_test_app(&dir).await;
    let station = create_station(&app, "Part-Dieu").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/trips",
        Some(json!({
            "fromStation": station,
            "toStation": station,
            "departureDateTime": (Utc::now() + Duration::days(1)).to_rfc3339(),
        })),
        Some("dispatcher"),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_TRIP");
}

#[tokio::test]
async fn test_arrival_equal_to_departure_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_test_app(&dir).await;
    let from = create_station(&app, "Part-Dieu").await;
    let to = create_station(&app, "Perrache").await;
    let departure = (Utc::now() + Duration::days(1)).to_rfc3339();

    let (status, body) = send(
        &app,
        "POST",
        "/api/trips",
        Some(json!({
            "fromStation": from,
            "toStation": to,
            "departureDateTime": departure,
        })),
        Some("dispatcher"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let trip_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/trips/{}/arrival", trip_id),
        Some(json!({ "arrivalDateTime": departure })),
        Some("dispatcher"),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_ARRIVAL");

    let (status, body) = send(&app, "GET", &format!("/api/trips/{}", trip_id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["arrivalDateTime"].is_null());
}

#[tokio::test]
async fn test_second_temporary_ownership_conflicts() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_test_app(&dir).await;
    let owner = create_station(&app, "Part-Dieu").await;
    let model = create_coach_model(&app).await;
    let vehicle = create_vehicle(&app, &owner, &model).await;

    let start = Utc::now() - Duration::hours(1);
    let window = json!({
        "ownerId": "station-b",
        "start": start.to_rfc3339(),
        "end": (start + Duration::days(2)).to_rfc3339(),
    });
    let uri = format!("/api/vehicles/{}/temporary-ownership", vehicle);

    let (status, _) = send(&app, "POST", &uri, Some(window.clone()), Some("admin")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", &format!("/api/vehicles/{}/owner", vehicle), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["effectiveOwnerId"], "station-b");
    assert_eq!(body["isTemporary"], true);

    let (status, body) = send(&app, "POST", &uri, Some(window), Some("admin")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INVALID_OWNERSHIP_WINDOW");

    let (status, _) = send(&app, "DELETE", &uri, None, Some("admin")).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", &format!("/api/vehicles/{}/owner", vehicle), None, None).await;
    assert_eq!(body["effectiveOwnerId"], owner);
}

#[tokio::test]
async fn test_vehicle_in_maintenance_cannot_join_trip() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_test_app(&dir).await;
    let from = create_station(&app, "Part-Dieu").await;
    let to = create_station(&app, "Perrache").await;
    let model = create_coach_model(&app).await;
    let vehicle = create_vehicle(&app, &from, &model).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/vehicles/{}/maintenance", vehicle),
        Some(json!({ "isUnderMaintenance": true })),
        Some("garage"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["maintenance"]["end"].is_null());

    let (status, body) = send(
        &app,
        "POST",
        "/api/trips",
        Some(json!({
            "fromStation": from,
            "toStation": to,
            "vehicles": [vehicle],
            "departureDateTime": (Utc::now() + Duration::days(1)).to_rfc3339(),
        })),
        Some("dispatcher"),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "RESOURCE_UNAVAILABLE");
}

#[tokio::test]
async fn test_trip_seat_accounting() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_test_app(&dir).await;
    let from = create_station(&app, "Part-Dieu").await;
    let to = create_station(&app, "Perrache").await;
    let model = create_coach_model(&app).await;
    let vehicle = create_vehicle(&app, &from, &model).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/trips",
        Some(json!({
            "fromStation": from,
            "toStation": to,
            "vehicles": [vehicle],
            "departureDateTime": (Utc::now() + Duration::days(1)).to_rfc3339(),
            "passengersCount": 10,
        })),
        Some("dispatcher"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let trip_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "GET", &format!("/api/trips/{}/seats", trip_id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["capacity"], 8);
    assert_eq!(body["passengers"], 10);
    assert_eq!(body["overbooked"], true);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/trips/{}/passengers", trip_id),
        Some(json!({ "passengersCount": -1 })),
        Some("dispatcher"),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "NEGATIVE_COUNT");
}

#[tokio::test]
async fn test_layout_edit_and_seat_map() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_test_app(&dir).await;
    let model = create_coach_model(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/vehicle-models/{}/layout/edit", model),
        Some(json!({ "op": "insertRow", "at": 1 })),
        Some("designer"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["seatBitmask"], "110111111111011");
    assert_eq!(body["data"]["numberSeats"], 13);

    let (status, body) = send(&app, "GET", &format!("/api/vehicle-models/{}/seats", model), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rows"], 3);
    assert_eq!(body["seatNumbers"][0], json!([1, 2, null, 3, 4]));
    assert_eq!(body["seatNumbers"][2], json!([10, 11, null, 12, 13]));
}

#[tokio::test]
async fn test_invalid_layout_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_test_app(&dir).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/vehicle-models",
        Some(json!({
            "manufacturer": "Irisbus",
            "modelName": "Crossway",
            "fuelType": "diesel",
            "seatBitmask": "11011",
            "cellsPerRow": 4
        })),
        Some("admin"),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_LAYOUT");
}

async fn create_trip(app: &Router, from: &str, to: &str, vehicles: Value, departure: chrono::DateTime<Utc>) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/trips",
        Some(json!({
            "fromStation": from,
            "toStation": to,
            "vehicles": vehicles,
            "departureDateTime": departure.to_rfc3339(),
        })),
        Some("dispatcher"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_trip_cannot_be_moved_into_vehicle_maintenance() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_test_app(&dir).await;
    let from = create_station(&app, "Part-Dieu").await;
    let to = create_station(&app, "Perrache").await;
    let model = create_coach_model(&app).await;
    let vehicle = create_vehicle(&app, &from, &model).await;
    let now = Utc::now();

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/vehicles/{}/maintenance", vehicle),
        Some(json!({
            "isUnderMaintenance": true,
            "start": (now + Duration::days(10)).to_rfc3339(),
            "end": (now + Duration::days(12)).to_rfc3339(),
        })),
        Some("garage"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let trip_id = create_trip(&app, &from, &to, json!([vehicle]), now + Duration::days(1)).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/trips/{}/departure", trip_id),
        Some(json!({ "departureDateTime": (now + Duration::days(11)).to_rfc3339() })),
        Some("dispatcher"),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "RESOURCE_UNAVAILABLE");

    let (_, body) = send(&app, "GET", &format!("/api/trips/{}", trip_id), None, None).await;
    let departure: chrono::DateTime<Utc> = body["departureDateTime"].as_str().unwrap().parse().unwrap();
    assert!(departure < now + Duration::days(2));

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/trips/{}/arrival", trip_id),
        Some(json!({ "arrivalDateTime": (now + Duration::days(10) + Duration::hours(1)).to_rfc3339() })),
        Some("dispatcher"),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "RESOURCE_UNAVAILABLE");

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/trips/{}/departure", trip_id),
        Some(json!({ "departureDateTime": (now + Duration::days(13)).to_rfc3339() })),
        Some("dispatcher"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_maintenance_cannot_overlap_assigned_trip() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_test_app(&dir).await;
    let from = create_station(&app, "Part-Dieu").await;
    let to = create_station(&app, "Perrache").await;
    let model = create_coach_model(&app).await;
    let vehicle = create_vehicle(&app, &from, &model).await;
    let now = Utc::now();
    create_trip(&app, &from, &to, json!([vehicle]), now + Duration::days(3)).await;

    let uri = format!("/api/vehicles/{}/maintenance", vehicle);
    let (status, body) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({
            "isUnderMaintenance": true,
            "start": (now + Duration::days(2)).to_rfc3339(),
            "end": (now + Duration::days(4)).to_rfc3339(),
        })),
        Some("garage"),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "RESOURCE_UNAVAILABLE");

    let (_, body) = send(&app, "GET", &format!("/api/vehicles/{}", vehicle), None, None).await;
    assert_eq!(body["isUnderMaintenance"], false);

    let (status, body) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({
            "isUnderMaintenance": true,
            "start": (now + Duration::days(5)).to_rfc3339(),
        })),
        Some("garage"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["isUnderMaintenance"], true);
    assert_eq!(body["data"]["currentOwnerId"], from);
}

#[tokio::test]
async fn test_passenger_count_above_range_is_a_validation_error() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_test_app(&dir).await;
    let from = create_station(&app, "Part-Dieu").await;
    let to = create_station(&app, "Perrache").await;
    let trip_id = create_trip(&app, &from, &to, json!([]), Utc::now() + Duration::days(1)).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/trips/{}/passengers", trip_id),
        Some(json!({ "passengersCount": 5_000_000_000i64 })),
        Some("dispatcher"),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_ownership_routes_return_vehicle_response() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_test_app(&dir).await;
    let owner = create_station(&app, "Part-Dieu").await;
    let model = create_coach_model(&app).await;
    let vehicle = create_vehicle(&app, &owner, &model).await;
    let start = Utc::now() - Duration::hours(1);

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/vehicles/{}/temporary-ownership", vehicle),
        Some(json!({
            "ownerId": "station-b",
            "start": start.to_rfc3339(),
            "end": (start + Duration::days(1)).to_rfc3339(),
        })),
        Some("admin"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["currentOwnerId"], "station-b");
    assert_eq!(body["data"]["isUnderMaintenance"], false);
    assert_eq!(body["data"]["immatriculation"], "AB-123-CD");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_keep_immatriculation_unique() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_test_app(&dir).await;
    let owner = create_station(&app, "Part-Dieu").await;
    let model = create_coach_model(&app).await;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let app = app.clone();
        let body = json!({
            "immatriculation": "zz-999-zz",
            "permanentOwnerId": owner,
            "model": { "kind": "catalog", "value": model }
        });
        handles.push(tokio::spawn(async move {
            send(&app, "POST", "/api/vehicles", Some(body), Some("admin")).await.0
        }));
    }

    let mut accepted = 0;
    for handle in handles {
        match handle.await.unwrap() {
            StatusCode::OK => accepted += 1,
            status => assert_eq!(status, StatusCode::CONFLICT),
        }
    }
    assert_eq!(accepted, 1);

    let (_, body) = send(&app, "GET", "/api/vehicles?filter=ZZ-999-ZZ", None, None).await;
    assert_eq!(body["totalCount"], 1);
}
