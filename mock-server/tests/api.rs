use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, API_KEY};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn authed(uri: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header("user-key", API_KEY)
        .header("accept", "application/json")
        .body(String::new())
        .unwrap()
}

fn names(items: &[Value]) -> Vec<&str> {
    items.iter().map(|g| g["name"].as_str().unwrap()).collect()
}

// --- auth ---

#[tokio::test]
async fn missing_key_returns_401() {
    let resp = app()
        .oneshot(Request::builder().uri("/games").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_bytes(resp).await;
    assert!(!body.is_empty());
}

#[tokio::test]
async fn unknown_resource_returns_404() {
    let resp = app().oneshot(authed("/spaceships")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- list ---

#[tokio::test]
async fn list_without_params_returns_full_records() {
    let resp = app().oneshot(authed("/games")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let games: Vec<Value> = body_json(resp).await;
    assert_eq!(games.len(), 8);
    assert!(games[0].get("slug").is_some());
}

#[tokio::test]
async fn list_filters_orders_limits_and_projects() {
    let uri = "/games?fields=name&filter%5Bplatforms%5D%5Bin%5D=48&order=popularity%3Adesc&limit=3";
    let resp = app().oneshot(authed(uri)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let games: Vec<Value> = body_json(resp).await;
    assert_eq!(
        names(&games),
        vec!["Uncharted 4: A Thief's End", "Horizon Zero Dawn", "The Last of Us Remastered"]
    );
    assert!(games.iter().all(|g| g.as_object().unwrap().len() == 1));
}

#[tokio::test]
async fn list_applies_offset() {
    let uri = "/games?fields=id&order=id%3Aasc&offset=6";
    let resp = app().oneshot(authed(uri)).await.unwrap();

    let games: Vec<Value> = body_json(resp).await;
    let ids: Vec<u64> = games.iter().map(|g| g["id"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![7, 8]);
}

#[tokio::test]
async fn search_matches_name_case_insensitively() {
    let resp = app().oneshot(authed("/games?search=HALO&fields=name")).await.unwrap();

    let games: Vec<Value> = body_json(resp).await;
    assert_eq!(games.len(), 2);
}

#[tokio::test]
async fn unknown_operator_returns_400() {
    let resp = app()
        .oneshot(authed("/games?filter%5Bname%5D%5Blike%5D=halo"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- by id ---

#[tokio::test]
async fn get_by_ids_returns_matching_records() {
    let resp = app().oneshot(authed("/companies/70,421?fields=name")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let companies: Vec<Value> = body_json(resp).await;
    assert_eq!(names(&companies), vec!["Nintendo", "Naughty Dog"]);
}

#[tokio::test]
async fn get_unknown_id_returns_empty_array() {
    let resp = app().oneshot(authed("/games/999")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let games: Vec<Value> = body_json(resp).await;
    assert!(games.is_empty());
}

#[tokio::test]
async fn get_bad_id_returns_400() {
    let resp = app().oneshot(authed("/games/not-an-id")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- count ---

#[tokio::test]
async fn count_applies_filters() {
    use tower::Service;

    let mut app = app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authed("/games/count"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["count"], 8);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authed("/games/count?filter%5Bcover%5D%5Bexists%5D=1"))
        .await
        .unwrap();
    let body: Value = body_json(resp).await;
    assert_eq!(body["count"], 3);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authed("/games/count?filter%5Brating%5D%5Bgte%5D=90"))
        .await
        .unwrap();
    let body: Value = body_json(resp).await;
    assert_eq!(body["count"], 3);
}
