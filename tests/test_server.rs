//! Integration test: web routes

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use churncast::config::AppConfig;
use churncast::server::{create_router, AppState};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt;

const CSV_HEADER: &str = "Tenure,CityTier,WarehouseToHome,HourSpendOnApp,NumberOfDeviceRegistered,SatisfactionScore,NumberOfAddress,Complain,OrderAmountHikeFromlastYear,CouponUsed,OrderCount,DaySinceLastOrder,CashbackAmount,Gender,PreferedOrderCat,MaritalStatus,PreferredLoginDevice,PreferredPaymentMode,Churn";

fn test_config(tag: &str) -> AppConfig {
    let base = std::env::temp_dir().join(format!("churncast-test-server-{tag}"));
    std::fs::create_dir_all(&base).ok();
    AppConfig {
        app_host: "127.0.0.1".to_string(),
        app_port: 0,
        data_path: base.join("churn.csv").to_string_lossy().into_owned(),
        models_dir: base.join("models").to_string_lossy().into_owned(),
        static_dir: base.join("static").to_string_lossy().into_owned(),
    }
}

/// Deterministic, cleanly separable dataset: churners have short tenure,
/// complaints, recent orders, and low cashback.
fn write_dataset(path: &str, rows: usize) {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for i in 0..rows {
        let churn = i % 2 == 0;
        let tenure = if churn {
            1.0 + (i % 5) as f64
        } else {
            20.0 + (i % 8) as f64
        };
        let complain = if churn { 1 } else { 0 };
        let days = if churn { 1.0 } else { 8.0 };
        let cashback = if churn { 120.0 } else { 220.0 };
        let gender = if i % 3 == 0 { "Male" } else { "Female" };
        let category = ["Fashion", "Grocery", "Mobile Phone"][i % 3];
        let label = if churn { 1 } else { 0 };
        out.push_str(&format!(
            "{tenure},1,12.0,2.5,3,3,2,{complain},14.0,2.0,4.0,{days},{cashback},{gender},{category},Single,Computer,UPI,{label}\n"
        ));
    }
    std::fs::create_dir_all(Path::new(path).parent().unwrap()).unwrap();
    std::fs::write(path, out).unwrap();
}

fn app(config: &AppConfig) -> axum::Router {
    create_router(Arc::new(AppState::new(config.clone())))
}

fn form_body(tenure: &str, complain: &str, days: &str, cashback: &str) -> String {
    [
        ("Tenure", tenure),
        ("CityTier", "1"),
        ("WarehouseToHome", "12.0"),
        ("HourSpendOnApp", "2.5"),
        ("NumberOfDeviceRegistered", "3"),
        ("SatisfactionScore", "3"),
        ("NumberOfAddress", "2"),
        ("Complain", complain),
        ("OrderAmountHikeFromlastYear", "14.0"),
        ("CouponUsed", "2.0"),
        ("OrderCount", "4.0"),
        ("DaySinceLastOrder", days),
        ("CashbackAmount", cashback),
        ("Gender", "Female"),
        ("PreferedOrderCat", "Fashion"),
        ("MaritalStatus", "Single"),
        ("PreferredLoginDevice", "Computer"),
        ("PreferredPaymentMode", "UPI"),
    ]
    .iter()
    .map(|(k, v)| format!("{k}={v}"))
    .collect::<Vec<_>>()
    .join("&")
}

fn churner_body() -> String {
    form_body("2.0", "1", "1.0", "120.0")
}

fn loyal_body() -> String {
    form_body("27.0", "0", "8.0", "220.0")
}

fn post_form(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_home_renders() {
    let config = test_config("home");
    let response = app(&config)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Rendering"));
    assert!(html.contains("name=\"Tenure\""));
}

#[tokio::test]
async fn test_predict_missing_field_returns_200_with_error() {
    let config = test_config("missing-field");
    let body = churner_body()
        .split('&')
        .filter(|pair| !pair.starts_with("Tenure="))
        .collect::<Vec<_>>()
        .join("&");

    let response = app(&config).oneshot(post_form(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Error during prediction"));
    assert!(html.contains("missing field Tenure"));
}

#[tokio::test]
async fn test_predict_non_numeric_field_returns_200_with_error() {
    let config = test_config("bad-number");
    let body = churner_body().replace("CityTier=1", "CityTier=abc");

    let response = app(&config).oneshot(post_form(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Error during prediction"));
    assert!(html.contains("invalid value for CityTier"));
}

#[tokio::test]
async fn test_predict_without_trained_model_returns_200_with_error() {
    let config = test_config("no-model");
    let response = app(&config)
        .oneshot(post_form(churner_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Error during prediction"));
    assert!(html.contains("no trained model"));
}

#[tokio::test]
async fn test_train_failure_is_rendered_with_200() {
    let config = test_config("train-missing-data");

    let response = app(&config)
        .oneshot(Request::builder().uri("/train").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Training failed"));
    assert!(html.contains("training data not found"));
}

#[tokio::test]
async fn test_train_then_predict_flow() {
    let config = test_config("full-flow");
    write_dataset(&config.data_path, 80);

    let response = app(&config)
        .oneshot(Request::builder().uri("/train").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("successfully"), "unexpected page: {html}");

    let response = app(&config)
        .oneshot(post_form(churner_body()))
        .await
        .unwrap();
    let html = body_text(response).await;
    assert!(html.contains("Prediction: 1"), "unexpected page: {html}");

    let response = app(&config).oneshot(post_form(loyal_body())).await.unwrap();
    let html = body_text(response).await;
    assert!(html.contains("Prediction: 0"), "unexpected page: {html}");
}

#[tokio::test]
async fn test_concurrent_predictions_are_independent() {
    let config = test_config("concurrent");
    write_dataset(&config.data_path, 80);

    let response = app(&config)
        .oneshot(Request::builder().uri("/train").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(body_text(response).await.contains("successfully"));

    let (churner, loyal) = tokio::join!(
        app(&config).oneshot(post_form(churner_body())),
        app(&config).oneshot(post_form(loyal_body())),
    );

    let churner_html = body_text(churner.unwrap()).await;
    let loyal_html = body_text(loyal.unwrap()).await;
    assert!(
        churner_html.contains("Prediction: 1"),
        "unexpected page: {churner_html}"
    );
    assert!(
        loyal_html.contains("Prediction: 0"),
        "unexpected page: {loyal_html}"
    );
}
