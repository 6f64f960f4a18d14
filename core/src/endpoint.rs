//! Per-resource operations bound to a client.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::client::{parse_count, parse_get, parse_list, IgdbClient};
use crate::error::Result;
use crate::http::{HttpRequest, HttpResponse};
use crate::options::QueryOption;
use crate::request::OperationKind;
use crate::resource::Resource;

/// One resource of the API, decoding entities as `T`.
///
/// Obtained from [`IgdbClient::endpoint`] or one of the named accessors
/// such as [`IgdbClient::games`]. Every method validates its options before
/// touching the transport and makes exactly one HTTP call.
#[derive(Debug)]
pub struct Endpoint<'a, T> {
    client: &'a IgdbClient,
    resource: Resource,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for Endpoint<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Endpoint<'_, T> {}

impl<'a, T: DeserializeOwned> Endpoint<'a, T> {
    pub(crate) fn new(client: &'a IgdbClient, resource: Resource) -> Self {
        Self {
            client,
            resource,
            _entity: PhantomData,
        }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    /// Entities matching `options`, in server order. No match is an empty vec.
    pub fn list(&self, options: &[QueryOption]) -> Result<Vec<T>> {
        let request = self.client.build_list(self.resource, options)?;
        let entities: Vec<T> = parse_list(self.dispatch(OperationKind::List, &request)?)?;
        tracing::trace!(resource = %self.resource, count = entities.len(), "decoded list");
        Ok(entities)
    }

    /// Exactly one entity by identifier.
    pub fn get(&self, id: u64, options: &[QueryOption]) -> Result<T> {
        let request = self.client.build_get(self.resource, id, options)?;
        parse_get(self.resource, id, self.dispatch(OperationKind::Get, &request)?)
    }

    /// Several entities by identifier. Identifiers that match nothing are
    /// simply absent from the result.
    pub fn list_by_ids(&self, ids: &[u64], options: &[QueryOption]) -> Result<Vec<T>> {
        let request = self.client.build_list_by_ids(self.resource, ids, options)?;
        parse_list(self.dispatch(OperationKind::List, &request)?)
    }

    /// Free-text search. `options` must include a non-empty `set_search`.
    pub fn search(&self, options: &[QueryOption]) -> Result<Vec<T>> {
        let request = self.client.build_search(self.resource, options)?;
        let entities: Vec<T> = parse_list(self.dispatch(OperationKind::Search, &request)?)?;
        tracing::trace!(resource = %self.resource, count = entities.len(), "decoded search");
        Ok(entities)
    }

    /// Number of entities matching the filters in `options`.
    pub fn count(&self, options: &[QueryOption]) -> Result<u64> {
        let request = self.client.build_count(self.resource, options)?;
        parse_count(self.dispatch(OperationKind::Count, &request)?)
    }

    fn dispatch(&self, operation: OperationKind, request: &HttpRequest) -> Result<HttpResponse> {
        tracing::debug!(
            resource = %self.resource,
            %operation,
            url = %request.url,
            "dispatching request"
        );
        self.client.send(request)
    }
}
