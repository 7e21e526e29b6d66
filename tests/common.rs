#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, Response};
use figment::{
    Figment,
    providers::{Format, Yaml},
};
use serde_json::Value;
use whelps_shell::config::{ConfigV1, parse_config};
use whelps_shell::routes::create_router;
use whelps_shell::startup::build_state;
use whelps_shell::state::AppState;

pub const PROFILE: &str = r#"{"id": 21, "email": "jo@example.com", "first_name": "Jo",
                              "last_name": "Cruz", "age_group": "18-25"}"#;

pub const PETS: &str = r#"[
  {"id": 1, "name": "Mochi", "breed": "Persian", "age": "3 years", "gender": "Female",
   "size": "Small", "color": "White", "healthCondition": "Healthy", "image": "/images/mochi.jpg",
   "status": "Available", "type": "cat", "story": "Rescued from a storm drain."},
  {"id": 2, "name": "Bantay", "breed": "Aspin", "age": "5 years", "gender": "Male",
   "size": "Large", "color": "Brown", "healthCondition": "Neutered", "image": "/images/bantay.jpg",
   "status": "In Trial", "type": "dog", "story": "Guards the shelter gate."},
  {"id": 3, "name": "Kiko", "breed": "Shih Tzu", "age": "1 year", "gender": "Male",
   "size": "Small", "color": "Gold", "healthCondition": "Vaccinated", "image": "/images/kiko.jpg",
   "status": "Adopted", "type": "dog", "story": "Loves car rides."}
]"#;

/// Config pointing every external call at `api_url`, with storage in `storage_yaml`.
pub fn test_config(api_url: &str, storage_yaml: &str) -> ConfigV1 {
    let yaml = format!(
        r#"
version: "1.0.0"
bind_address: "127.0.0.1:0"
logging:
  level: "debug"
  format: "console"
storage:
{storage_yaml}
api:
  base_url: "{api_url}"
  pets_url: "{api_url}/api/pets"
  timeout_in_ms: 2000
  pets_cache_seconds: 0
"#
    );
    parse_config(Figment::new().merge(Yaml::string(&yaml))).expect("test config should parse")
}

pub fn memory_storage() -> &'static str {
    "  type: \"memory\""
}

pub fn build_app(config: ConfigV1) -> (Router, AppState) {
    let state = build_state(Arc::new(config)).expect("state should build");
    (create_router(state.clone()), state)
}

pub fn request(method: Method, path: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(path);
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .expect("failed to build request"),
        None => builder.body(Body::empty()).expect("failed to build request"),
    }
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
