//! Filter constraints and their comparison operators.
//!
//! A [`Filter`] is one `field <operator> values` constraint. Each
//! [`Operator`] carries a fixed wire symbol and a fixed arity, and
//! [`Filter::new`] checks the operand count against that arity up front so
//! an ill-formed constraint never reaches serialization.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};

/// How many operands an operator takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// No operands (`exists`, `not_exists`).
    Nullary,
    /// Exactly one operand.
    Unary,
    /// One or more operands (`in`, `not_in`).
    Variadic,
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Nullary => count == 0,
            Arity::Unary => count == 1,
            Arity::Variadic => count >= 1,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Arity::Nullary => "no values",
            Arity::Unary => "exactly one value",
            Arity::Variadic => "at least one value",
        }
    }
}

/// Comparison operator for a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Eq,
    NotEq,
    Gt,
    Gte,
    Lt,
    Lte,
    /// Field matches any of the given values.
    In,
    /// Field matches none of the given values.
    NotIn,
    /// Field is present and not null.
    Exists,
    /// Field is absent or null.
    NotExists,
}

impl Operator {
    pub const ALL: [Operator; 10] = [
        Operator::Eq,
        Operator::NotEq,
        Operator::Gt,
        Operator::Gte,
        Operator::Lt,
        Operator::Lte,
        Operator::In,
        Operator::NotIn,
        Operator::Exists,
        Operator::NotExists,
    ];

    /// Symbol used inside the `filter[field][symbol]` parameter name.
    pub fn wire_symbol(self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::NotEq => "not_eq",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::In => "in",
            Operator::NotIn => "not_in",
            Operator::Exists => "exists",
            Operator::NotExists => "not_exists",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            Operator::Exists | Operator::NotExists => Arity::Nullary,
            Operator::In | Operator::NotIn => Arity::Variadic,
            _ => Arity::Unary,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_symbol())
    }
}

impl FromStr for Operator {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self> {
        Operator::ALL
            .into_iter()
            .find(|op| op.wire_symbol() == s)
            .ok_or_else(|| ApiError::InvalidOperator {
                field: String::new(),
                operator: s.to_string(),
            })
    }
}

/// Characters the wire syntax uses as delimiters around and between names.
pub const RESERVED_NAME_CHARS: [char; 4] = [',', '[', ']', ':'];

/// Separator between the values of a variadic operator.
pub const VALUE_SEPARATOR: char = ',';

/// Rejects a field name that would corrupt `fields`, `filter[..][..]` or
/// `order` parameters.
pub(crate) fn check_field_name(what: &'static str, name: &str) -> Result<()> {
    match name.chars().find(|c| RESERVED_NAME_CHARS.contains(c)) {
        Some(character) => Err(ApiError::ReservedCharacter {
            what,
            value: name.to_string(),
            character,
        }),
        None => Ok(()),
    }
}

/// Identity of a mergeable filter slot: two filters with the same key
/// describe the same constraint, and the later one replaces the earlier.
pub type ConstraintKey = (String, Operator);

/// A single validated constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Filter {
    field: String,
    operator: Operator,
    values: Vec<String>,
}

impl Filter {
    /// Builds a filter, checking the operand count against the operator.
    ///
    /// The field may not contain `,`, `[`, `]` or `:`, and values of `in` and
    /// `not_in` may not contain `,`, since each would be split on the wire.
    pub fn new<I, V>(field: impl Into<String>, operator: Operator, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let field = field.into();
        if field.trim().is_empty() {
            return Err(ApiError::EmptyField { what: "filter field" });
        }
        check_field_name("filter field", &field)?;
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        let arity = operator.arity();
        if !arity.accepts(values.len()) {
            return Err(ApiError::InvalidOperandCount {
                field,
                operator: operator.wire_symbol(),
                expected: arity.describe(),
                actual: values.len(),
            });
        }
        if arity == Arity::Variadic {
            if let Some(value) = values.iter().find(|v| v.contains(VALUE_SEPARATOR)) {
                return Err(ApiError::ReservedCharacter {
                    what: "filter value",
                    value: value.clone(),
                    character: VALUE_SEPARATOR,
                });
            }
        }
        Ok(Self {
            field,
            operator,
            values,
        })
    }

    /// Builds a filter from a textual operator symbol such as `"gte"`.
    pub fn parse<I, V>(field: impl Into<String>, operator: &str, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let field = field.into();
        let op = operator.parse::<Operator>().map_err(|_| ApiError::InvalidOperator {
            field: field.clone(),
            operator: operator.to_string(),
        })?;
        Self::new(field, op, values)
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn key(&self) -> ConstraintKey {
        (self.field.clone(), self.operator)
    }

    /// Wire parameter name, e.g. `filter[rating][gte]`.
    pub fn param_name(&self) -> String {
        format!("filter[{}][{}]", self.field, self.operator.wire_symbol())
    }

    /// Wire parameter value. Nullary operators send the sentinel `1`.
    pub fn param_value(&self) -> String {
        match self.operator.arity() {
            Arity::Nullary => "1".to_string(),
            Arity::Unary | Arity::Variadic => self.values.join(","),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_operator_has_a_distinct_symbol() {
        let mut symbols: Vec<_> = Operator::ALL.iter().map(|op| op.wire_symbol()).collect();
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), Operator::ALL.len());
    }

    #[test]
    fn symbols_parse_back_to_operators() {
        for op in Operator::ALL {
            assert_eq!(op.wire_symbol().parse::<Operator>().unwrap(), op);
        }
    }

    #[test]
    fn unknown_symbol_is_invalid_operator() {
        let err = Filter::parse("name", "like", ["zelda"]).unwrap_err();
        assert!(matches!(
            err,
            ApiError::InvalidOperator { ref field, ref operator } if field == "name" && operator == "like"
        ));
    }

    #[test]
    fn arity_matching_values_are_accepted() {
        assert!(Filter::new("rating", Operator::Gt, ["80"]).is_ok());
        assert!(Filter::new("platforms", Operator::In, ["48", "49", "6"]).is_ok());
        assert!(Filter::new("cover", Operator::Exists, Vec::<String>::new()).is_ok());
    }

    #[test]
    fn exists_with_values_is_rejected() {
        let err = Filter::new("cover", Operator::Exists, ["1"]).unwrap_err();
        assert!(matches!(err, ApiError::InvalidOperandCount { actual: 1, .. }));
    }

    #[test]
    fn in_set_without_values_is_rejected() {
        let err = Filter::new("platforms", Operator::In, Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, ApiError::InvalidOperandCount { actual: 0, .. }));
    }

    #[test]
    fn unary_with_two_values_is_rejected() {
        let err = Filter::new("rating", Operator::Eq, ["1", "2"]).unwrap_err();
        assert!(matches!(err, ApiError::InvalidOperandCount { operator: "eq", .. }));
    }

    #[test]
    fn empty_field_is_rejected() {
        let err = Filter::new(" ", Operator::Eq, ["1"]).unwrap_err();
        assert!(matches!(err, ApiError::EmptyField { .. }));
    }

    #[test]
    fn set_value_with_separator_is_rejected() {
        for op in [Operator::In, Operator::NotIn] {
            let err = Filter::new("name", op, ["Bloodborne,Gears of War 4"]).unwrap_err();
            assert!(matches!(
                err,
                ApiError::ReservedCharacter { what: "filter value", character: ',', .. }
            ));
        }
    }

    #[test]
    fn unary_value_may_contain_a_comma() {
        let f = Filter::new("name", Operator::Eq, ["Hello, World"]).unwrap();
        assert_eq!(f.param_value(), "Hello, World");
    }

    #[test]
    fn field_with_reserved_character_is_rejected() {
        for field in ["rating,name", "rating]", "[rating", "rating:asc"] {
            let err = Filter::new(field, Operator::Gt, ["80"]).unwrap_err();
            assert!(
                matches!(err, ApiError::ReservedCharacter { what: "filter field", .. }),
                "{field}"
            );
        }
        assert!(Filter::new("cover.url", Operator::Exists, Vec::<String>::new()).is_ok());
    }

    #[test]
    fn every_mismatched_arity_fails() {
        for op in Operator::ALL {
            let wrong: &[usize] = match op.arity() {
                Arity::Nullary => &[1, 2],
                Arity::Unary => &[0, 2, 3],
                Arity::Variadic => &[0],
            };
            for &count in wrong {
                let values = vec!["1"; count];
                let err = Filter::new("rating", op, values).unwrap_err();
                assert!(
                    matches!(err, ApiError::InvalidOperandCount { actual, .. } if actual == count),
                    "{op} with {count} value(s)"
                );
            }
        }
    }

    #[test]
    fn wire_form() {
        let f = Filter::new("platforms", Operator::In, ["48", "49"]).unwrap();
        assert_eq!(f.param_name(), "filter[platforms][in]");
        assert_eq!(f.param_value(), "48,49");

        let f = Filter::new("cover", Operator::NotExists, Vec::<String>::new()).unwrap();
        assert_eq!(f.param_name(), "filter[cover][not_exists]");
        assert_eq!(f.param_value(), "1");
    }
}
