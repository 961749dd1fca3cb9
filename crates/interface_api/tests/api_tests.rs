//! End-to-end router tests
//!
//! The full router runs against the in-memory registry adapter, so every
//! test exercises extraction, validation, services, and the envelope
//! exactly as a live server would, without a database.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header::CONTENT_TYPE, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use domain_person::ports::mock::InMemoryRegistry;
use domain_person::{AddressService, PersonService};
use interface_api::{config::ApiConfig, create_router, AppState};

fn app() -> Router {
    app_with_config(ApiConfig::default())
}

fn app_with_config(config: ApiConfig) -> Router {
    let registry = Arc::new(InMemoryRegistry::new());
    let people = Arc::new(PersonService::new(registry.clone()));
    let addresses = Arc::new(AddressService::new(people.clone(), registry));
    create_router(AppState::new(people, addresses, config))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn person_body(name: &str) -> Value {
    json!({"fullName": name, "dateOfBirth": "01/07/1976"})
}

fn address_body(street: &str, main: bool) -> Value {
    json!({
        "street": street,
        "zipCode": "01310-100",
        "number": 1578,
        "city": "Sao Paulo",
        "state": "SP",
        "main": main
    })
}

async fn create_person(app: &Router, name: &str) -> String {
    let (status, body) = send(app, Method::POST, "/api/v1/person", Some(person_body(name))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["id"].as_str().unwrap().to_string()
}

async fn create_address(app: &Router, person_id: &str, street: &str, main: bool) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        &format!("/api/v1/address/person/{person_id}"),
        Some(address_body(street, main)),
    )
    .await
}

#[tokio::test]
async fn test_create_person_round_trips_wire_date() {
    let app = app();

    let (status, body) =
        send(&app, Method::POST, "/api/v1/person", Some(person_body("Ada Lovelace"))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["flag"], json!(true));
    assert_eq!(body["message"], json!("Created person success"));
    assert!(body["dateTime"].is_string());
    assert_eq!(body["data"]["fullName"], json!("Ada Lovelace"));
    assert_eq!(body["data"]["dateOfBirth"], json!("01/07/1976"));
    assert_eq!(body["data"]["mainAddress"], json!(null));

    let id = body["data"]["id"].as_str().unwrap();
    assert!(id.starts_with("PRS-"));

    let (status, body) = send(&app, Method::GET, &format!("/api/v1/person/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Find one person success"));
    assert_eq!(body["data"]["dateOfBirth"], json!("01/07/1976"));
}

#[tokio::test]
async fn test_missing_person_fields_return_validation_map() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/api/v1/person", Some(json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["flag"], json!(false));
    assert_eq!(
        body["message"],
        json!("Provided arguments are invalid, see data for details")
    );
    assert_eq!(body["data"]["fullName"], json!("Cannot be null or empty"));
    assert_eq!(body["data"]["dateOfBirth"], json!("Cannot be null or empty"));
}

#[tokio::test]
async fn test_iso_date_returns_fixed_format_message() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/person",
        Some(json!({"fullName": "Ada", "dateOfBirth": "1976-07-01"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["data"],
        json!("Invalid date format. Follow the following pattern: dd/MM/yyyy")
    );
}

#[tokio::test]
async fn test_unknown_person_is_enveloped_404() {
    let app = app();
    let id = core_kernel::PersonId::new_v7();

    let (status, body) = send(&app, Method::GET, &format!("/api/v1/person/{id}"), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["flag"], json!(false));
    assert_eq!(
        body["message"],
        json!(format!("Person with id {id} was not found"))
    );
    assert_eq!(body["data"], json!(null));
}

#[tokio::test]
async fn test_update_person_overwrites_and_keeps_addresses() {
    let app = app();
    let id = create_person(&app, "Ada Lovelace").await;
    create_address(&app, &id, "Paulista Avenue", true).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/person/{id}"),
        Some(json!({"fullName": "Ada King", "dateOfBirth": "10/12/1815"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Updated person success"));
    assert_eq!(body["data"]["fullName"], json!("Ada King"));
    assert_eq!(body["data"]["dateOfBirth"], json!("10/12/1815"));
    assert_eq!(body["data"]["mainAddress"]["street"], json!("Paulista Avenue"));
}

#[tokio::test]
async fn test_create_address_success_and_main_conflict() {
    let app = app();
    let id = create_person(&app, "Ada Lovelace").await;

    let (status, body) = create_address(&app, &id, "Paulista Avenue", true).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], json!("Created address success"));
    assert_eq!(body["data"]["main"], json!(true));
    assert_eq!(body["data"]["personId"], json!(id));
    assert!(body["data"]["id"].as_str().unwrap().starts_with("ADR-"));

    let (status, body) = create_address(&app, &id, "Faria Lima Avenue", true).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        json!(format!("Person with id {id} already have a main address"))
    );
    assert_eq!(body["data"], json!(null));

    // A non-main sibling is accepted
    let (status, _) = create_address(&app, &id, "Faria Lima Avenue", false).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_update_address_main_semantics() {
    let app = app();
    let person_id = create_person(&app, "Ada Lovelace").await;

    let (_, body) = create_address(&app, &person_id, "Paulista Avenue", true).await;
    let main_id = body["data"]["id"].as_str().unwrap().to_string();
    let (_, body) = create_address(&app, &person_id, "Faria Lima Avenue", false).await;
    let other_id = body["data"]["id"].as_str().unwrap().to_string();

    // Re-saving the main address as main is legal
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/address/{main_id}/person/{person_id}"),
        Some(address_body("Paulista Avenue", true)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Updated address success"));

    // Promoting another address while the main exists is not
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/address/{other_id}/person/{person_id}"),
        Some(address_body("Faria Lima Avenue", true)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        json!(format!("Person with id {person_id} already have a main address"))
    );
}

#[tokio::test]
async fn test_unknown_address_is_enveloped_404() {
    let app = app();
    let person_id = create_person(&app, "Ada Lovelace").await;
    let address_id = core_kernel::AddressId::new_v7();

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/v1/address/{address_id}/person/{person_id}"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["message"],
        json!(format!("Address with id {address_id} was not found"))
    );
}

#[tokio::test]
async fn test_listing_addresses_for_unknown_person_is_404() {
    let app = app();
    let id = core_kernel::PersonId::new_v7();

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/v1/address/person/{id}"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["message"],
        json!(format!("Person with id {id} was not found"))
    );
}

#[tokio::test]
async fn test_negative_number_returns_validation_map() {
    let app = app();
    let id = create_person(&app, "Ada Lovelace").await;

    let mut body = address_body("Paulista Avenue", false);
    body["number"] = json!(-1);

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/v1/address/person/{id}"),
        Some(body),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["number"], json!("Cannot be less than 1"));
}

#[tokio::test]
async fn test_person_pagination_is_five_per_page() {
    let app = app();
    for i in 0..7 {
        create_person(&app, &format!("Person {i}")).await;
    }

    let (status, body) = send(&app, Method::GET, "/api/v1/person?page=0", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Find all persons success"));
    assert_eq!(body["data"].as_array().unwrap().len(), 5);

    let (_, body) = send(&app, Method::GET, "/api/v1/person?page=1", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    // Without the query param the whole collection comes back
    let (_, body) = send(&app, Method::GET, "/api/v1/person", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn test_non_numeric_page_is_enveloped_400() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/v1/person?page=abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["flag"], json!(false));
    assert_eq!(
        body["message"],
        json!("Provided arguments are invalid, see data for details")
    );
    assert!(body["data"].is_string());
}

#[tokio::test]
async fn test_root_base_path_mounts_routes_at_root() {
    let config = ApiConfig {
        base_path: "/".to_string(),
        ..ApiConfig::default()
    };
    let app = app_with_config(config);

    let (status, body) =
        send(&app, Method::POST, "/person", Some(person_body("Ada Lovelace"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], json!("Created person success"));

    let (status, body) = send(&app, Method::GET, "/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("API endpoint not found"));
}

#[tokio::test]
async fn test_unknown_route_returns_enveloped_404() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/v1/nope", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["flag"], json!(false));
    assert_eq!(body["message"], json!("API endpoint not found"));
    assert_eq!(body["data"], json!(null));
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("healthy"));

    let (status, body) = send(&app, Method::GET, "/health/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ready"));
}
