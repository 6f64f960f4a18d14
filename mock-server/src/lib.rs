use std::{cmp::Ordering, collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;

/// Key the server accepts in the `user-key` header.
pub const API_KEY: &str = "test-key";

const DEFAULT_LIMIT: usize = 10;
const MAX_LIMIT: usize = 50;

pub type Catalog = Arc<HashMap<String, Vec<Value>>>;

type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

/// Fixture records served by [`app`].
pub fn seed() -> HashMap<String, Vec<Value>> {
    let games = vec![
        json!({"id": 1, "name": "Halo 5: Guardians", "slug": "halo-5-guardians", "popularity": 74.5, "rating": 81.2, "platforms": [49], "cover": {"image_id": "co1nmw", "width": 264, "height": 374}}),
        json!({"id": 2, "name": "Uncharted 4: A Thief's End", "slug": "uncharted-4", "popularity": 96.1, "rating": 92.7, "platforms": [48], "cover": {"image_id": "co1r7h", "width": 264, "height": 374}}),
        json!({"id": 3, "name": "Bloodborne", "slug": "bloodborne", "popularity": 88.0, "rating": 91.4, "platforms": [48]}),
        json!({"id": 4, "name": "The Last of Us Remastered", "slug": "the-last-of-us-remastered", "popularity": 90.3, "rating": 94.0, "platforms": [48]}),
        json!({"id": 5, "name": "Gears of War 4", "slug": "gears-of-war-4", "popularity": 61.7, "rating": 79.9, "platforms": [49, 6]}),
        json!({"id": 6, "name": "Horizon Zero Dawn", "slug": "horizon-zero-dawn", "popularity": 93.4, "rating": 89.1, "platforms": [48, 6], "cover": {"image_id": "co1idc", "width": 264, "height": 374}}),
        json!({"id": 7, "name": "Ratchet & Clank", "slug": "ratchet-clank", "popularity": 57.2, "rating": 84.5, "platforms": [48]}),
        json!({"id": 8, "name": "Halo: The Master Chief Collection", "slug": "halo-mcc", "popularity": 70.0, "rating": 85.5, "platforms": [49, 6]}),
    ];
    let companies = vec![
        json!({"id": 70, "name": "Nintendo", "slug": "nintendo", "country": 392}),
        json!({"id": 421, "name": "Naughty Dog", "slug": "naughty-dog", "country": 840, "parent": 10100}),
        json!({"id": 10100, "name": "Sony Interactive Entertainment", "slug": "sie", "country": 392}),
    ];
    let people = vec![
        json!({"id": 1, "name": "Hideo Kojima", "slug": "hideo-kojima", "country": 392}),
        json!({"id": 2, "name": "Amy Hennig", "slug": "amy-hennig", "country": 840}),
    ];
    let reviews = vec![
        json!({"id": 11, "title": "A fitting finale", "game": 2, "likes": 40, "views": 1200}),
        json!({"id": 12, "title": "Beautiful but slow", "game": 6, "likes": 12, "views": 800}),
    ];

    HashMap::from([
        ("games".to_string(), games),
        ("companies".to_string(), companies),
        ("people".to_string(), people),
        ("reviews".to_string(), reviews),
    ])
}

pub fn app() -> Router {
    app_with(seed())
}

pub fn app_with(data: HashMap<String, Vec<Value>>) -> Router {
    let catalog: Catalog = Arc::new(data);
    Router::new()
        .route("/{resource}", get(list_entities))
        .route("/{resource}/{target}", get(target_entities))
        .with_state(catalog)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "mock server listening");
    }
    axum::serve(listener, app()).await
}

async fn list_entities(
    State(catalog): State<Catalog>,
    Path(resource): Path<String>,
    headers: HeaderMap,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult {
    authorize(&headers)?;
    let records = records(&catalog, &resource)?;
    let params = Params::parse(pairs)?;
    Ok(Json(Value::Array(params.select(records))))
}

/// `/{resource}/count` or `/{resource}/{id},{id},...`.
async fn target_entities(
    State(catalog): State<Catalog>,
    Path((resource, target)): Path<(String, String)>,
    headers: HeaderMap,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult {
    authorize(&headers)?;
    let records = records(&catalog, &resource)?;
    let params = Params::parse(pairs)?;

    if target == "count" {
        let count = records.iter().filter(|r| params.matches(r)).count();
        return Ok(Json(json!({ "count": count })));
    }

    let ids = target
        .split(',')
        .map(str::parse::<u64>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| error(StatusCode::BAD_REQUEST, "invalid id list"))?;
    let selected: Vec<&Value> = records
        .into_iter()
        .filter(|r| r["id"].as_u64().is_some_and(|id| ids.contains(&id)))
        .collect();
    Ok(Json(Value::Array(params.select(selected))))
}

fn authorize(headers: &HeaderMap) -> Result<(), (StatusCode, Json<Value>)> {
    match headers.get("user-key").and_then(|v| v.to_str().ok()) {
        Some(API_KEY) => Ok(()),
        _ => Err(error(StatusCode::UNAUTHORIZED, "Authentication failed")),
    }
}

fn records<'a>(
    catalog: &'a Catalog,
    resource: &str,
) -> Result<Vec<&'a Value>, (StatusCode, Json<Value>)> {
    catalog
        .get(resource)
        .map(|records| records.iter().collect())
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "unknown resource"))
}

fn error(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "message": message })))
}

struct FilterParam {
    field: String,
    op: String,
    value: String,
}

#[derive(Default)]
struct Params {
    fields: Option<Vec<String>>,
    filters: Vec<FilterParam>,
    order: Option<(String, bool)>,
    limit: Option<usize>,
    offset: usize,
    search: Option<String>,
}

impl Params {
    fn parse(pairs: Vec<(String, String)>) -> Result<Self, (StatusCode, Json<Value>)> {
        let bad = |msg: &str| error(StatusCode::BAD_REQUEST, msg);
        let mut params = Params::default();
        for (key, value) in pairs {
            match key.as_str() {
                "fields" => params.fields = Some(value.split(',').map(str::to_string).collect()),
                "order" => {
                    let (field, dir) = value.split_once(':').unwrap_or((value.as_str(), "asc"));
                    let desc = match dir {
                        "asc" => false,
                        "desc" => true,
                        _ => return Err(bad("invalid order direction")),
                    };
                    params.order = Some((field.to_string(), desc));
                }
                "limit" => {
                    let limit: usize = value.parse().map_err(|_| bad("invalid limit"))?;
                    if !(1..=MAX_LIMIT).contains(&limit) {
                        return Err(bad("limit out of range"));
                    }
                    params.limit = Some(limit);
                }
                "offset" => params.offset = value.parse().map_err(|_| bad("invalid offset"))?,
                "search" => params.search = Some(value),
                _ => {
                    let (field, op) = parse_filter_key(&key).ok_or_else(|| bad("unknown parameter"))?;
                    params.filters.push(FilterParam { field, op, value });
                }
            }
        }
        Ok(params)
    }

    fn matches(&self, record: &Value) -> bool {
        let searched = self.search.as_ref().map_or(true, |term| {
            record["name"]
                .as_str()
                .is_some_and(|name| name.to_lowercase().contains(&term.to_lowercase()))
        });
        searched && self.filters.iter().all(|f| filter_matches(record, f))
    }

    /// Filters, orders, pages and projects `records`.
    fn select(&self, records: Vec<&Value>) -> Vec<Value> {
        let mut matched: Vec<&Value> = records.into_iter().filter(|r| self.matches(r)).collect();
        if let Some((field, desc)) = &self.order {
            matched.sort_by(|a, b| {
                let ord = compare(&a[field.as_str()], &b[field.as_str()]);
                if *desc {
                    ord.reverse()
                } else {
                    ord
                }
            });
        }
        matched
            .into_iter()
            .skip(self.offset)
            .take(self.limit.unwrap_or(DEFAULT_LIMIT))
            .map(|r| self.project(r))
            .collect()
    }

    fn project(&self, record: &Value) -> Value {
        match &self.fields {
            Some(fields) if !fields.iter().any(|f| f == "*") => {
                let mut out = Map::new();
                for field in fields {
                    if let Some(v) = record.get(field) {
                        out.insert(field.clone(), v.clone());
                    }
                }
                Value::Object(out)
            }
            _ => record.clone(),
        }
    }
}

/// Splits `filter[field][op]` into its parts.
fn parse_filter_key(key: &str) -> Option<(String, String)> {
    let rest = key.strip_prefix("filter[")?.strip_suffix(']')?;
    let (field, op) = rest.split_once("][")?;
    let known = [
        "eq", "not_eq", "gt", "gte", "lt", "lte", "in", "not_in", "exists", "not_exists",
    ];
    known
        .contains(&op)
        .then(|| (field.to_string(), op.to_string()))
}

fn filter_matches(record: &Value, filter: &FilterParam) -> bool {
    let value = record.get(&filter.field).filter(|v| !v.is_null());
    let candidates: Vec<&Value> = match value {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(v) => vec![v],
        None => Vec::new(),
    };
    let any_candidate = |pred: &dyn Fn(&Value) -> bool| candidates.iter().copied().any(|v| pred(v));
    let operand = filter.value.as_str();

    match filter.op.as_str() {
        "exists" => value.is_some(),
        "not_exists" => value.is_none(),
        "eq" => any_candidate(&|v| scalar_eq(v, operand)),
        "not_eq" => !any_candidate(&|v| scalar_eq(v, operand)),
        "in" => operand.split(',').any(|o| any_candidate(&|v| scalar_eq(v, o))),
        "not_in" => !operand.split(',').any(|o| any_candidate(&|v| scalar_eq(v, o))),
        op => {
            let Ok(bound) = operand.parse::<f64>() else {
                return false;
            };
            any_candidate(&|v| {
                v.as_f64().is_some_and(|n| match op {
                    "gt" => n > bound,
                    "gte" => n >= bound,
                    "lt" => n < bound,
                    "lte" => n <= bound,
                    _ => false,
                })
            })
        }
    }
}

fn scalar_eq(value: &Value, operand: &str) -> bool {
    match value {
        Value::String(s) => s == operand,
        Value::Number(n) => match (n.as_f64(), operand.parse::<f64>()) {
            (Some(a), Ok(b)) => a == b,
            _ => false,
        },
        Value::Bool(b) => operand == if *b { "true" } else { "false" },
        _ => false,
    }
}

/// Orders numbers numerically and strings lexically; missing values last.
fn compare(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Greater,
        (_, Value::Null) => Ordering::Less,
        _ => Ordering::Equal,
    }
}
