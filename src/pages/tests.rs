use std::sync::Arc;

use axum::{
    body::Body,
    http::{
        header::{AUTHORIZATION, CONTENT_DISPOSITION, CONTENT_TYPE, COOKIE, SET_COOKIE},
        Request, StatusCode,
    },
    Router,
};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use crate::{
    app,
    config::{AuthConfig, Config},
    database::{MemoryStore, ReferralStore},
    libs::time::FixedClock,
    record::ReferralRecord,
    AppState,
};

const FORM: &str = "application/x-www-form-urlencoded";

fn test_app(store: Arc<MemoryStore>, today: NaiveDate) -> Router {
    let state = AppState::new(AuthConfig::default(), store, Arc::new(FixedClock(today))).unwrap();
    app(state, &Config::default())
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn row(candidate: &str, referrer: &str, location: &str, start: &str) -> ReferralRecord {
    ReferralRecord {
        candidate_name: candidate.to_string(),
        referrer_name: referrer.to_string(),
        role: "Engineer".to_string(),
        location: location.to_string(),
        submission_date: "2024-01-10".to_string(),
        start_date: start.to_string(),
        status: "Submitted".to_string(),
        bonus_30_paid: "No".to_string(),
        bonus_90_paid: "No".to_string(),
        ..Default::default()
    }
}

fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, FORM)
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn authed_get(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn login(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(form_post(
            "/login",
            "username=recruiter&password=password123",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["data"]["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn submit_stores_record_with_server_defaults() {
    let store = Arc::new(MemoryStore::default());
    let app = test_app(store.clone(), day(2024, 1, 10));

    let response = app
        .oneshot(form_post(
            "/submit",
            "candidate_name=Ann&referrer_name=Bob&role=Eng&location=NY&status=Hired&bonus_30_paid=Yes",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], 0);
    assert_eq!(json["data"]["submission_date"], "2024-01-10");

    let stored = store.scan_all().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].candidate_name, "Ann");
    assert_eq!(stored[0].location, "NY");
    assert_eq!(stored[0].submission_date, "2024-01-10");
    assert_eq!(stored[0].status, "Submitted");
    assert_eq!(stored[0].bonus_30_paid, "No");
    assert_eq!(stored[0].bonus_90_paid, "No");
    assert_eq!(stored[0].start_date, "");
}

#[tokio::test]
async fn submit_keeps_first_of_repeated_fields() {
    let store = Arc::new(MemoryStore::default());
    let app = test_app(store.clone(), day(2024, 1, 10));

    let response = app
        .oneshot(form_post(
            "/submit",
            "candidate_name=Ann&candidate_name=Zed&referrer_name=Bob",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let stored = store.scan_all().unwrap();
    assert_eq!(stored[0].candidate_name, "Ann");
    assert_eq!(stored[0].referrer_name, "Bob");
}

#[tokio::test]
async fn dashboard_requires_token() {
    let app = test_app(Arc::new(MemoryStore::default()), day(2024, 1, 10));
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/dashboard").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(authed_get("/dashboard", "not-a-token"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn bad_credentials_are_rejected() {
    let app = test_app(Arc::new(MemoryStore::default()), day(2024, 1, 10));
    let response = app
        .oneshot(form_post("/login", "username=recruiter&password=guess"))
        .await
        .unwrap();
    assert!(response.headers().get(SET_COOKIE).is_none());
    let json = body_json(response).await;
    assert_eq!(json["status"], 5);
    assert_eq!(json["data"], "Invalid credentials");
}

#[tokio::test]
async fn dashboard_filters_and_sorts() {
    let store = Arc::new(MemoryStore::with_records(vec![
        row("Zed", "Bob", "New York", ""),
        row("Ann", "Dee", "NYC", ""),
        row("Cid", "Gus", "Boston", ""),
    ]));
    let app = test_app(store, day(2024, 3, 5));
    let token = login(&app).await;

    let response = app
        .oneshot(authed_get(
            "/dashboard?location=NY&sort_by=candidate_name",
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let names: Vec<_> = json["data"]["referrals"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["candidate_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Ann", "Zed"]);
    assert_eq!(json["data"]["filters"]["location"], "ny");
}

#[tokio::test]
async fn login_cookie_authenticates_and_logout_clears_it() {
    let store = Arc::new(MemoryStore::with_records(vec![row("Ann", "Bob", "NY", "")]));
    let app = test_app(store, day(2024, 3, 5));

    let response = app
        .clone()
        .oneshot(form_post(
            "/login",
            "username=recruiter&password=password123",
        ))
        .await
        .unwrap();
    let cookie = response
        .headers()
        .get(SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("token="));

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/dashboard")
                .header(COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(form_post("/logout", "")).await.unwrap();
    let cleared = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cleared.contains("Max-Age=0"));
}

#[tokio::test]
async fn export_streams_csv_attachment() {
    let store = Arc::new(MemoryStore::with_records(vec![
        row("Ann", "Bob", "NY", "2024-01-01"),
        row("Cid", "Dee", "Boston", ""),
    ]));
    let app = test_app(store, day(2024, 3, 5));
    let token = login(&app).await;

    let response = app
        .oneshot(authed_get("/export?search=bob", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(CONTENT_TYPE).unwrap(),
        "text/csv; charset=utf-8"
    );
    assert_eq!(
        response.headers().get(CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=referrals_export.csv"
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    let lines: Vec<_> = text.split("\r\n").collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("candidate_name,referrer_name,role"));
    assert!(lines[1].starts_with("Ann,Bob,Engineer,NY"));
    assert_eq!(lines[2], "");
}

#[tokio::test]
async fn export_requires_token() {
    let app = test_app(Arc::new(MemoryStore::default()), day(2024, 3, 5));
    let response = app
        .oneshot(Request::builder().uri("/export").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn lookup_with_empty_query_returns_everything() {
    let store = Arc::new(MemoryStore::with_records(vec![
        row("A", "Bob", "NY", "2024-01-01"),
        row("B", "Dee", "NY", ""),
        row("C", "Gus", "NY", "2023-10-01"),
        row("D", "Hal", "NY", "soon"),
        row("E", "Ivy", "NY", "2024-03-01"),
    ]));
    let app = test_app(store, day(2024, 3, 5));

    let response = app
        .oneshot(form_post("/lookup", "referrer_name="))
        .await
        .unwrap();
    let json = body_json(response).await;
    let results = json["data"]["results"].as_array().unwrap();
    assert_eq!(results.len(), 5);
    assert_eq!(results[0]["eligible_30"], "Yes");
    assert_eq!(results[0]["eligible_90"], "No");
    assert_eq!(results[2]["eligible_90"], "Yes");
    assert_eq!(results[3]["eligible_30"], "Invalid Date");
    assert_eq!(results[4]["eligible_30"], "No");
}

#[tokio::test]
async fn lookup_page_starts_empty() {
    let app = test_app(
        Arc::new(MemoryStore::with_records(vec![row("A", "Bob", "NY", "")])),
        day(2024, 3, 5),
    );
    let response = app
        .oneshot(Request::builder().uri("/lookup").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["data"]["results"], serde_json::json!([]));
}
