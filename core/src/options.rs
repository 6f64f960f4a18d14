//! Query options: reusable, declarative fragments of a request.
//!
//! # Design
//! An option is a plain value describing one mutation of a
//! [`RequestConfig`]. [`QueryOption::apply`] is the single interpreter for
//! all of them, so the merge rules live in one place:
//!
//! - `Fields` replaces the selection wholesale (last writer wins);
//! - `Filter` merges by `(field, operator)`: a repeated key keeps its
//!   original position and takes the new values, distinct keys are ANDed;
//! - `Order`, `Limit`, `Offset` and `Search` replace any previous value;
//! - `Compose` applies its children left to right.
//!
//! Options never validate limits or operation-kind compatibility
//! themselves. That happens once, after every option has been applied, in
//! [`RequestBuilder`](crate::request::RequestBuilder). Being plain data,
//! options are `Send + Sync`, comparable, loggable and serializable.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::filter::{Filter, Operator};
use crate::request::RequestConfig;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One mutation of a request configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "option", rename_all = "snake_case")]
pub enum QueryOption {
    Fields {
        names: Vec<String>,
    },
    Filter {
        field: String,
        operator: Operator,
        #[serde(default)]
        values: Vec<String>,
    },
    Order {
        field: String,
        #[serde(default)]
        direction: SortDirection,
    },
    Limit {
        limit: i64,
    },
    Offset {
        offset: i64,
    },
    Search {
        term: String,
    },
    Compose {
        options: Vec<QueryOption>,
    },
}

impl QueryOption {
    /// Applies this option to `config`.
    ///
    /// Fails when a filter's operand count does not match its operator, or
    /// when a field name or set value holds a character the wire syntax
    /// reserves.
    pub fn apply(&self, config: &mut RequestConfig) -> Result<()> {
        tracing::trace!(option = self.name(), "applying query option");
        match self {
            QueryOption::Fields { names } => config.set_fields(names)?,
            QueryOption::Filter {
                field,
                operator,
                values,
            } => {
                let filter = Filter::new(field.as_str(), *operator, values.iter().cloned())?;
                config.merge_filter(filter);
            }
            QueryOption::Order { field, direction } => config.set_sort(field, *direction),
            QueryOption::Limit { limit } => config.set_limit(*limit),
            QueryOption::Offset { offset } => config.set_offset(*offset),
            QueryOption::Search { term } => config.set_search(term),
            QueryOption::Compose { options } => {
                for option in options {
                    option.apply(config)?;
                }
            }
        }
        Ok(())
    }

    /// Short name of the option kind, as recorded in trace events.
    pub fn name(&self) -> &'static str {
        match self {
            QueryOption::Fields { .. } => "fields",
            QueryOption::Filter { .. } => "filter",
            QueryOption::Order { .. } => "order",
            QueryOption::Limit { .. } => "limit",
            QueryOption::Offset { .. } => "offset",
            QueryOption::Search { .. } => "search",
            QueryOption::Compose { .. } => "compose",
        }
    }
}

/// Selects the fields returned for each entity. Replaces any earlier selection.
pub fn set_fields<I, S>(names: I) -> QueryOption
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    QueryOption::Fields {
        names: names.into_iter().map(Into::into).collect(),
    }
}

/// Adds a filter, replacing an earlier one with the same field and operator.
pub fn set_filter<I, V>(field: impl Into<String>, operator: Operator, values: I) -> QueryOption
where
    I: IntoIterator<Item = V>,
    V: Into<String>,
{
    QueryOption::Filter {
        field: field.into(),
        operator,
        values: values.into_iter().map(Into::into).collect(),
    }
}

/// Shorthand for `set_filter(field, Operator::Exists, [])`.
pub fn exists(field: impl Into<String>) -> QueryOption {
    set_filter(field, Operator::Exists, Vec::<String>::new())
}

/// Shorthand for `set_filter(field, Operator::NotExists, [])`.
pub fn not_exists(field: impl Into<String>) -> QueryOption {
    set_filter(field, Operator::NotExists, Vec::<String>::new())
}

pub fn set_order(field: impl Into<String>, direction: SortDirection) -> QueryOption {
    QueryOption::Order {
        field: field.into(),
        direction,
    }
}

pub fn set_limit(limit: i64) -> QueryOption {
    QueryOption::Limit { limit }
}

pub fn set_offset(offset: i64) -> QueryOption {
    QueryOption::Offset { offset }
}

/// Sets the free-text term. Only search requests accept it.
pub fn set_search(term: impl Into<String>) -> QueryOption {
    QueryOption::Search { term: term.into() }
}

/// Bundles `options` into a single option that applies them in order.
pub fn compose_options<I>(options: I) -> QueryOption
where
    I: IntoIterator<Item = QueryOption>,
{
    QueryOption::Compose {
        options: options.into_iter().collect(),
    }
}
