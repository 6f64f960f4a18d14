//! Request configuration, validation and wire serialization.
//!
//! # Design
//! [`RequestBuilder::build`] runs the whole local half of the pipeline:
//! a fresh [`RequestConfig`] receives every option in order, the
//! operation kind's rules are checked, and the result is frozen into a
//! [`ValidatedQuery`] whose only job is to emit wire parameters. Nothing
//! here performs I/O, so every error it returns is a validation error.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::error::{ApiError, Result};
use crate::filter::{check_field_name, ConstraintKey, Filter};
use crate::options::{QueryOption, SortDirection};

pub const MIN_LIMIT: i64 = 1;
pub const MAX_LIMIT: i64 = 50;

/// The four request shapes the API supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    List,
    Get,
    Search,
    Count,
}

impl OperationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OperationKind::List => "list",
            OperationKind::Get => "get",
            OperationKind::Search => "search",
            OperationKind::Count => "count",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

/// Mutable accumulator that options are applied to.
///
/// `fields` is `None` until an option selects fields, which lets count
/// requests tell "never selected" apart from "selected nothing".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestConfig {
    fields: Option<Vec<String>>,
    filters: Vec<Filter>,
    filter_slots: HashMap<ConstraintKey, usize>,
    sort: Option<Sort>,
    limit: Option<i64>,
    offset: Option<i64>,
    search: Option<String>,
}

impl RequestConfig {
    pub fn fields(&self) -> Option<&[String]> {
        self.fields.as_deref()
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn sort(&self) -> Option<&Sort> {
        self.sort.as_ref()
    }

    pub fn limit(&self) -> Option<i64> {
        self.limit
    }

    pub fn offset(&self) -> Option<i64> {
        self.offset
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Replaces the selection. Blank names are dropped and repeats collapse
    /// to their first position. A name holding a reserved character fails.
    pub(crate) fn set_fields(&mut self, names: &[String]) -> Result<()> {
        let mut seen = HashSet::new();
        let mut fields = Vec::with_capacity(names.len());
        for name in names.iter().map(|name| name.trim()) {
            if name.is_empty() {
                continue;
            }
            check_field_name("field name", name)?;
            if seen.insert(name) {
                fields.push(name.to_string());
            }
        }
        self.fields = Some(fields);
        Ok(())
    }

    /// Appends `filter`, or overwrites the slot already holding its key.
    pub(crate) fn merge_filter(&mut self, filter: Filter) {
        match self.filter_slots.get(&filter.key()) {
            Some(&slot) => self.filters[slot] = filter,
            None => {
                self.filter_slots.insert(filter.key(), self.filters.len());
                self.filters.push(filter);
            }
        }
    }

    pub(crate) fn set_sort(&mut self, field: &str, direction: SortDirection) {
        self.sort = Some(Sort {
            field: field.to_string(),
            direction,
        });
    }

    pub(crate) fn set_limit(&mut self, limit: i64) {
        self.limit = Some(limit);
    }

    pub(crate) fn set_offset(&mut self, offset: i64) {
        self.offset = Some(offset);
    }

    pub(crate) fn set_search(&mut self, term: &str) {
        self.search = Some(term.to_string());
    }
}

/// Applies options for one operation kind and validates the outcome.
#[derive(Debug, Clone, Copy)]
pub struct RequestBuilder {
    kind: OperationKind,
}

impl RequestBuilder {
    pub fn new(kind: OperationKind) -> Self {
        Self { kind }
    }

    pub fn build(&self, options: &[QueryOption]) -> Result<ValidatedQuery> {
        let mut config = RequestConfig::default();
        for option in options {
            option.apply(&mut config)?;
        }
        self.validate(config)
    }

    fn validate(&self, config: RequestConfig) -> Result<ValidatedQuery> {
        let operation = self.kind.as_str();

        let fields = match (self.kind, config.fields) {
            (OperationKind::Count, Some(_)) => {
                return Err(ApiError::IncompatibleOption {
                    option: "fields",
                    operation,
                })
            }
            (OperationKind::Count, None) => Vec::new(),
            (_, Some(fields)) if !fields.is_empty() => fields,
            (_, _) => vec!["*".to_string()],
        };

        let search = match (self.kind, config.search) {
            (OperationKind::Search, Some(term)) if !term.trim().is_empty() => Some(term),
            (OperationKind::Search, _) => return Err(ApiError::EmptySearchTerm),
            (_, Some(_)) => {
                return Err(ApiError::IncompatibleOption {
                    option: "search",
                    operation,
                })
            }
            (_, None) => None,
        };

        let limit = match config.limit {
            Some(limit) if !(MIN_LIMIT..=MAX_LIMIT).contains(&limit) => {
                return Err(ApiError::InvalidLimit { limit })
            }
            Some(limit) => Some(limit as u8),
            None => None,
        };

        let offset = match config.offset {
            Some(offset) if offset < 0 => return Err(ApiError::InvalidOffset { offset }),
            Some(offset) => Some(offset as u64),
            None => None,
        };

        if let Some(sort) = &config.sort {
            if sort.field.trim().is_empty() {
                return Err(ApiError::EmptyField { what: "sort field" });
            }
            check_field_name("sort field", &sort.field)?;
        }

        Ok(ValidatedQuery {
            kind: self.kind,
            fields,
            filters: config.filters,
            sort: config.sort,
            limit,
            offset,
            search,
        })
    }
}

/// A frozen, validated request description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuery {
    kind: OperationKind,
    fields: Vec<String>,
    filters: Vec<Filter>,
    sort: Option<Sort>,
    limit: Option<u8>,
    offset: Option<u64>,
    search: Option<String>,
}

impl ValidatedQuery {
    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn sort(&self) -> Option<&Sort> {
        self.sort.as_ref()
    }

    pub fn limit(&self) -> Option<u8> {
        self.limit
    }

    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Wire parameters in emission order: fields, filters, order, limit,
    /// offset, search.
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(self.filters.len() + 5);
        if !self.fields.is_empty() {
            params.push(("fields".to_string(), self.fields.join(",")));
        }
        for filter in &self.filters {
            params.push((filter.param_name(), filter.param_value()));
        }
        if let Some(sort) = &self.sort {
            params.push(("order".to_string(), format!("{}:{}", sort.field, sort.direction)));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = self.offset {
            params.push(("offset".to_string(), offset.to_string()));
        }
        if let Some(search) = &self.search {
            params.push(("search".to_string(), search.clone()));
        }
        params
    }
}
