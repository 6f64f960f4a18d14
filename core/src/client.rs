//! Request construction, dispatch and response decoding.
//!
//! # Design
//! `IgdbClient` holds its configuration and a shared `Transport` and
//! carries no per-request state, so one instance can serve any number of
//! threads. Each operation is split into a `build_*` method that validates
//! options and produces an `HttpRequest`, and a `parse_*` function that
//! decodes an `HttpResponse`. [`Endpoint`](crate::endpoint::Endpoint) glues
//! the two halves together through the transport. Callers that run the
//! HTTP round-trip themselves can use the halves directly.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::config::ClientConfig;
use crate::endpoint::Endpoint;
use crate::error::{ApiError, Result};
use crate::http::{HttpRequest, HttpResponse};
use crate::options::QueryOption;
use crate::request::{OperationKind, RequestBuilder, ValidatedQuery};
use crate::resource::Resource;
use crate::transport::{Transport, UreqTransport};
use crate::types::{Character, Company, Franchise, Game, GameList, Person, Platform, Review};

/// Where a request lands under the resource path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target<'a> {
    Collection,
    Ids(&'a [u64]),
    Count,
}

/// Client for the IGDB REST API.
#[derive(Clone)]
pub struct IgdbClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for IgdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IgdbClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl IgdbClient {
    /// A client using the default blocking `ureq` transport.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }

    pub fn with_transport(config: ClientConfig, transport: impl Transport + 'static) -> Self {
        Self {
            config,
            transport: Arc::new(transport),
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ClientConfig::from_env()?))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn endpoint<T: DeserializeOwned>(&self, resource: Resource) -> Endpoint<'_, T> {
        Endpoint::new(self, resource)
    }

    pub fn games(&self) -> Endpoint<'_, Game> {
        self.endpoint(Resource::Games)
    }

    pub fn companies(&self) -> Endpoint<'_, Company> {
        self.endpoint(Resource::Companies)
    }

    pub fn people(&self) -> Endpoint<'_, Person> {
        self.endpoint(Resource::People)
    }

    pub fn reviews(&self) -> Endpoint<'_, Review> {
        self.endpoint(Resource::Reviews)
    }

    pub fn platforms(&self) -> Endpoint<'_, Platform> {
        self.endpoint(Resource::Platforms)
    }

    pub fn franchises(&self) -> Endpoint<'_, Franchise> {
        self.endpoint(Resource::Franchises)
    }

    pub fn characters(&self) -> Endpoint<'_, Character> {
        self.endpoint(Resource::Characters)
    }

    pub fn private_lists(&self) -> Endpoint<'_, GameList> {
        self.endpoint(Resource::PrivateLists)
    }

    pub fn build_list(&self, resource: Resource, options: &[QueryOption]) -> Result<HttpRequest> {
        let query = RequestBuilder::new(OperationKind::List).build(options)?;
        self.build_request(resource, Target::Collection, &query)
    }

    pub fn build_get(
        &self,
        resource: Resource,
        id: u64,
        options: &[QueryOption],
    ) -> Result<HttpRequest> {
        let query = RequestBuilder::new(OperationKind::Get).build(options)?;
        self.build_request(resource, Target::Ids(&[id]), &query)
    }

    /// Several entities by identifier in one request, decoded like a list.
    pub fn build_list_by_ids(
        &self,
        resource: Resource,
        ids: &[u64],
        options: &[QueryOption],
    ) -> Result<HttpRequest> {
        if ids.is_empty() {
            return Err(ApiError::EmptyField { what: "identifier list" });
        }
        let query = RequestBuilder::new(OperationKind::List).build(options)?;
        self.build_request(resource, Target::Ids(ids), &query)
    }

    pub fn build_search(&self, resource: Resource, options: &[QueryOption]) -> Result<HttpRequest> {
        let query = RequestBuilder::new(OperationKind::Search).build(options)?;
        self.build_request(resource, Target::Collection, &query)
    }

    pub fn build_count(&self, resource: Resource, options: &[QueryOption]) -> Result<HttpRequest> {
        let query = RequestBuilder::new(OperationKind::Count).build(options)?;
        self.build_request(resource, Target::Count, &query)
    }

    fn build_request(
        &self,
        resource: Resource,
        target: Target<'_>,
        query: &ValidatedQuery,
    ) -> Result<HttpRequest> {
        let credentials = self.config.credentials();
        let mut headers = vec![
            ("accept".to_string(), "application/json".to_string()),
            ("user-key".to_string(), credentials.api_key().to_string()),
        ];
        if resource.requires_token() {
            let token = credentials
                .access_token()
                .ok_or(ApiError::MissingAccessToken {
                    resource: resource.path(),
                })?;
            headers.push(("authorization".to_string(), format!("Bearer {token}")));
        }

        let path = match target {
            Target::Collection => format!("{}/{}", self.config.base_url(), resource.path()),
            Target::Ids(ids) => {
                let ids: Vec<String> = ids.iter().map(u64::to_string).collect();
                format!("{}/{}/{}", self.config.base_url(), resource.path(), ids.join(","))
            }
            Target::Count => format!("{}/{}/count", self.config.base_url(), resource.path()),
        };
        let mut url = Url::parse(&path)?;
        let params = query.params();
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }

        Ok(HttpRequest {
            url: url.into(),
            headers,
        })
    }

    /// Sends `request` through the transport. Transport failures are passed
    /// through; the response status is not inspected here.
    pub fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        self.transport.send(request).map_err(ApiError::Transport)
    }
}

/// Decodes a list or search response.
pub fn parse_list<T: DeserializeOwned>(response: HttpResponse) -> Result<Vec<T>> {
    check_status(&response)?;
    decode(&response.body)
}

/// Decodes a get-by-id response, which must hold exactly one entity.
pub fn parse_get<T: DeserializeOwned>(
    resource: Resource,
    id: u64,
    response: HttpResponse,
) -> Result<T> {
    let mut entities: Vec<T> = parse_list(response)?;
    match entities.len() {
        0 => Err(ApiError::EntityNotFound {
            resource: resource.path(),
            id: id.to_string(),
        }),
        1 => Ok(entities.remove(0)),
        count => Err(ApiError::AmbiguousResult {
            resource: resource.path(),
            id: id.to_string(),
            count,
        }),
    }
}

#[derive(Deserialize)]
struct CountBody {
    count: u64,
}

/// Decodes a count response of the form `{"count": <integer>}`.
pub fn parse_count(response: HttpResponse) -> Result<u64> {
    check_status(&response)?;
    decode::<CountBody>(&response.body).map(|body| body.count)
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| ApiError::MalformedResponse {
        reason: e.to_string(),
        body: body.to_string(),
    })
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }
    let status = response.status;
    let body = response.body.clone();
    tracing::warn!(status, "request rejected by server");
    Err(match status {
        401 | 403 => ApiError::Unauthorized { status, body },
        404 => ApiError::NotFound { status, body },
        429 => ApiError::RateLimited { status, body },
        _ => ApiError::ServerError { status, body },
    })
}
