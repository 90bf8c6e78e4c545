// src/requests/tests/handlers_tests.rs

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header::CONTENT_TYPE, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::app::{build_router, build_state};
    use crate::common::ServerConfig;
    use crate::logging_middleware::REQUEST_ID_HEADER;

    fn app() -> Router {
        let state = build_state(ServerConfig::default()).expect("validators register");
        build_router(state)
    }

    async fn post_json(uri: &str, body: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_invalid_data_is_still_ok_response() {
        let (status, body) = post_json(
            "/Test/AddRequest",
            &json!({"num": 5, "name": "ab", "age": 25}).to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isValid"], false);
        assert_eq!(body["errorCount"], 2);
        assert_eq!(body["errorMessage"].as_array().unwrap().len(), 2);
        assert_eq!(body["errorMessage"][0]["propertyName"], "Num");
    }

    #[tokio::test]
    async fn test_pascal_case_body_is_validated() {
        let (status, body) = post_json(
            "/Test/AddRequest",
            &json!({"Num": 5, "Name": "ab", "Age": 25}).to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isValid"], false);
        assert_eq!(body["errorCount"], 2);
        assert_eq!(body["errorMessage"][0]["propertyName"], "Num");
        assert_eq!(body["errorMessage"][1]["propertyName"], "Age");
    }

    #[tokio::test]
    async fn test_valid_add_request() {
        let (status, body) = post_json(
            "/Test/AddRequest",
            &json!({"num": -1, "name": "abcdef", "age": 10}).to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"isValid": true, "errorCount": 0, "errorMessage": []})
        );
    }

    #[tokio::test]
    async fn test_direct_path_test_request() {
        let (status, body) = post_json(
            "/Test/TestRequest",
            &json!({"num": 0, "length": "a"}).to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isValid"], false);
        assert_eq!(body["errorCount"], 1);
        assert_eq!(body["errorMessage"][0]["propertyName"], "Length");
    }

    #[tokio::test]
    async fn test_unbound_type_surfaces_configuration_error() {
        let (status, body) = post_json("/Test/TestNoRequest", r#"{"num": 1}"#).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "VALIDATOR_NOT_REGISTERED");
        assert!(body.get("isValid").is_none());
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let (status, body) = post_json("/Test/TestRequest", r#"{"num": "zero"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(REQUEST_ID_HEADER, "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[REQUEST_ID_HEADER], "abc-123");
    }

    #[tokio::test]
    async fn test_request_id_generated_when_missing() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let id = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok());
    }

    #[tokio::test]
    async fn test_body_logging_layer_preserves_response() {
        let config = ServerConfig {
            log_bodies: true,
            ..ServerConfig::default()
        };
        let app = build_router(build_state(config).unwrap());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/Test/TestRequest")
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"num": -3, "length": "abc"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["isValid"], true);
    }
}
