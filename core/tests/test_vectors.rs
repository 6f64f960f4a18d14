//! Verify build/parse functions against JSON test vectors stored in `test-vectors/`.
//!
//! Each query vector gives an option sequence and either the request it must
//! produce or the validation error it must raise. Each response vector gives
//! a simulated response and the decoded result or error. Query parameters
//! are compared after decoding so percent-encoding choices do not matter.

use igdb_core::{
    parse_count, parse_get, parse_list, ApiError, ClientConfig, Credentials, Game, HttpRequest,
    HttpResponse, IgdbClient, QueryOption, Resource,
};

const BASE_URL: &str = "http://localhost:3000";

fn client() -> IgdbClient {
    IgdbClient::new(ClientConfig::new(Credentials::new("test-key")).with_base_url(BASE_URL))
}

/// Name of the variant, for comparison with `expected_error`.
fn error_name(err: &ApiError) -> &'static str {
    match err {
        ApiError::InvalidLimit { .. } => "InvalidLimit",
        ApiError::InvalidOffset { .. } => "InvalidOffset",
        ApiError::InvalidOperator { .. } => "InvalidOperator",
        ApiError::InvalidOperandCount { .. } => "InvalidOperandCount",
        ApiError::IncompatibleOption { .. } => "IncompatibleOption",
        ApiError::EmptySearchTerm => "EmptySearchTerm",
        ApiError::ReservedCharacter { .. } => "ReservedCharacter",
        ApiError::Unauthorized { .. } => "Unauthorized",
        ApiError::NotFound { .. } => "NotFound",
        ApiError::RateLimited { .. } => "RateLimited",
        ApiError::ServerError { .. } => "ServerError",
        ApiError::MalformedResponse { .. } => "MalformedResponse",
        ApiError::EntityNotFound { .. } => "EntityNotFound",
        ApiError::AmbiguousResult { .. } => "AmbiguousResult",
        _ => "Other",
    }
}

fn split_url(req: &HttpRequest) -> (String, Vec<(String, String)>) {
    let url = url::Url::parse(&req.url).unwrap();
    let params = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    (url.path().to_string(), params)
}

fn simulated(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap(),
    )
}

// ---------------------------------------------------------------------------
// Query building
// ---------------------------------------------------------------------------

#[test]
fn query_test_vectors() {
    let raw = include_str!("../../test-vectors/queries.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let options: Vec<QueryOption> = serde_json::from_value(case["options"].clone()).unwrap();

        let result = match case["kind"].as_str().unwrap() {
            "list" => c.build_list(Resource::Games, &options),
            "search" => c.build_search(Resource::Games, &options),
            "count" => c.build_count(Resource::Games, &options),
            "get" => c.build_get(Resource::Games, case["id"].as_u64().unwrap(), &options),
            other => panic!("{name}: unknown kind {other}"),
        };

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            assert_eq!(error_name(&err), expected_error.as_str().unwrap(), "{name}: error");
            assert!(err.is_validation(), "{name}: should be a validation error");
            continue;
        }

        let req = result.unwrap();
        let expected = &case["expected_request"];
        let (path, params) = split_url(&req);
        assert_eq!(path, expected["path"].as_str().unwrap(), "{name}: path");

        let expected_params: Vec<(String, String)> =
            serde_json::from_value(expected["params"].clone()).unwrap();
        assert_eq!(params, expected_params, "{name}: params");
        assert_eq!(req.header("user-key"), Some("test-key"), "{name}: user-key");
    }
}

// ---------------------------------------------------------------------------
// Response decoding
// ---------------------------------------------------------------------------

#[test]
fn response_test_vectors() {
    let raw = include_str!("../../test-vectors/responses.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let response = simulated(case);
        let expected_error = case.get("expected_error").and_then(|e| e.as_str());

        match case["kind"].as_str().unwrap() {
            "list" => match (parse_list::<Game>(response), expected_error) {
                (Err(err), Some(expected)) => assert_eq!(error_name(&err), expected, "{name}"),
                (Ok(games), None) => {
                    let expected: Vec<Game> =
                        serde_json::from_value(case["expected_result"].clone()).unwrap();
                    assert_eq!(games, expected, "{name}: parsed result");
                }
                (result, _) => panic!("{name}: unexpected outcome {result:?}"),
            },
            "get" => {
                let id = case["id"].as_u64().unwrap();
                match (parse_get::<Game>(Resource::Games, id, response), expected_error) {
                    (Err(err), Some(expected)) => assert_eq!(error_name(&err), expected, "{name}"),
                    (Ok(game), None) => {
                        let expected: Game =
                            serde_json::from_value(case["expected_result"].clone()).unwrap();
                        assert_eq!(game, expected, "{name}: parsed result");
                    }
                    (result, _) => panic!("{name}: unexpected outcome {result:?}"),
                }
            }
            "count" => match (parse_count(response), expected_error) {
                (Err(err), Some(expected)) => assert_eq!(error_name(&err), expected, "{name}"),
                (Ok(count), None) => {
                    assert_eq!(count, case["expected_result"].as_u64().unwrap(), "{name}")
                }
                (result, _) => panic!("{name}: unexpected outcome {result:?}"),
            },
            other => panic!("{name}: unknown kind {other}"),
        }
    }
}
