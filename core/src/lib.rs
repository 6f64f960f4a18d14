//! Synchronous client for the IGDB REST API.
//!
//! # Overview
//! Queries are described with composable [`QueryOption`] values (field
//! selection, filters, ordering, paging, free-text search), validated and
//! serialized by a [`RequestBuilder`], sent through a [`Transport`] and
//! decoded into typed entities by an [`Endpoint`].
//!
//! ```no_run
//! use igdb_core::{compose_options, set_fields, set_filter, set_limit, set_order};
//! use igdb_core::{ClientConfig, Credentials, IgdbClient, Operator, SortDirection};
//!
//! # fn main() -> igdb_core::Result<()> {
//! let client = IgdbClient::new(ClientConfig::new(Credentials::new("my-key")));
//! let top = compose_options([
//!     set_limit(5),
//!     set_order("popularity", SortDirection::Desc),
//! ]);
//! let games = client.games().list(&[
//!     top,
//!     set_fields(["name"]),
//!     set_filter("platforms", Operator::In, ["48"]),
//! ])?;
//! # let _ = games;
//! # Ok(())
//! # }
//! ```
//!
//! # Design
//! - `IgdbClient` holds configuration and a shared transport only; it is
//!   `Send + Sync` and every call builds its own request configuration.
//! - Options are data, not closures, so merging rules live in a single
//!   interpreter ([`QueryOption::apply`]) and options can be logged,
//!   compared and loaded from JSON.
//! - Every operation is also split into `build_*` / `parse_*` halves for
//!   callers that run the HTTP round-trip themselves.
//! - No caching, retries or rate limiting: each failure reaches the caller.

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod filter;
pub mod http;
pub mod image;
pub mod options;
pub mod request;
pub mod resource;
pub mod transport;
pub mod types;

pub use client::{parse_count, parse_get, parse_list, IgdbClient};
pub use config::{ClientConfig, Credentials};
pub use endpoint::Endpoint;
pub use error::{ApiError, Result};
pub use filter::{Arity, Filter, Operator};
pub use http::{HttpRequest, HttpResponse};
pub use image::{image_url, image_url_named, Ratio, SizePreset};
pub use options::{
    compose_options, exists, not_exists, set_fields, set_filter, set_limit, set_offset,
    set_order, set_search, QueryOption, SortDirection,
};
pub use request::{OperationKind, RequestBuilder, RequestConfig, ValidatedQuery};
pub use resource::Resource;
pub use transport::{Transport, TransportError, UreqTransport};
pub use types::{Character, Company, Franchise, Game, GameList, Image, Person, Platform, Review};
