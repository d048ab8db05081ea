//! Search Criteria
//!
//! A per-field mapping that describes an ad-hoc filter without hand-writing
//! the filter expression. Each entry is one of:
//!
//! - a scalar, meaning equality
//! - a list of scalars, meaning "equal to any of these"
//! - a set of explicit operator conditions, joined with `and`
//!
//! Entries keep their insertion order, which is also the order of the
//! compiled clauses.

use erp_core::{QueryError, QueryResult};
use serde_json::Value;

/// A scalar value in a filter expression
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Integer(i64),
    /// Integers above `i64::MAX`
    Unsigned(u64),
    Float(f64),
    Bool(bool),
    Null,
}

impl Literal {
    /// Render as a filter literal: strings single-quoted (embedded quotes
    /// doubled), everything else bare
    pub fn render(&self) -> String {
        match self {
            Self::String(s) => format!("'{}'", s.replace('\'', "''")),
            Self::Integer(i) => i.to_string(),
            Self::Unsigned(u) => u.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Null => "null".to_string(),
        }
    }

    /// The value as plain text, without quoting
    pub fn as_text(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            other => other.render(),
        }
    }

    /// Convert a JSON scalar
    pub fn from_json(field: &str, value: &Value) -> QueryResult<Self> {
        match value {
            Value::String(s) => Ok(Self::String(s.clone())),
            Value::Bool(b) => Ok(Self::Bool(*b)),
            Value::Null => Ok(Self::Null),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Self::Integer(i))
                } else if let Some(u) = n.as_u64() {
                    Ok(Self::Unsigned(u))
                } else if let Some(f) = n.as_f64() {
                    Ok(Self::Float(f))
                } else {
                    Err(QueryError::invalid_criteria(
                        field,
                        format!("number {} is out of range", n),
                    ))
                }
            }
            Value::Array(_) | Value::Object(_) => Err(QueryError::invalid_criteria(
                field,
                "expected a string, number, boolean or null",
            )),
        }
    }

    /// Infer a literal from untyped text: integers, floats and booleans stay
    /// bare, anything else becomes a string
    pub fn infer(raw: &str) -> Self {
        if let Ok(i) = raw.parse::<i64>() {
            return Self::Integer(i);
        }
        if let Ok(u) = raw.parse::<u64>() {
            return Self::Unsigned(u);
        }
        if let Ok(f) = raw.parse::<f64>() {
            if f.is_finite() {
                return Self::Float(f);
            }
        }
        match raw {
            "true" => Self::Bool(true),
            "false" => Self::Bool(false),
            "null" => Self::Null,
            _ => Self::String(raw.to_string()),
        }
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&String> for Literal {
    fn from(s: &String) -> Self {
        Self::String(s.clone())
    }
}

impl From<i64> for Literal {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for Literal {
    fn from(i: i32) -> Self {
        Self::Integer(i.into())
    }
}

impl From<u32> for Literal {
    fn from(i: u32) -> Self {
        Self::Integer(i.into())
    }
}

impl From<u64> for Literal {
    fn from(u: u64) -> Self {
        i64::try_from(u).map_or(Self::Unsigned(u), Self::Integer)
    }
}

/// Non-finite values are accepted here and rejected when compiled
impl From<f64> for Literal {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Relational operators accepted in an operator condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    /// Prefix match, the literal gets a trailing `*`
    Like,
    /// Equal to any of a list, compiled to a parenthesized `or` group
    In,
}

impl Operator {
    /// Parse an operator key
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "eq" => Some(Self::Eq),
            "ne" => Some(Self::Ne),
            "gt" => Some(Self::Gt),
            "gte" => Some(Self::Gte),
            "lt" => Some(Self::Lt),
            "lte" => Some(Self::Lte),
            "like" => Some(Self::Like),
            "in" => Some(Self::In),
            _ => None,
        }
    }

    /// Parse an operator key, failing loudly on anything unknown
    pub fn parse(field: &str, s: &str) -> QueryResult<Self> {
        Self::from_str(s).ok_or_else(|| QueryError::unsupported(field, s))
    }

    /// The keyword used in filter expressions
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Like => "like",
            Self::In => "in",
        }
    }
}

/// Right-hand side of a condition
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Single(Literal),
    List(Vec<Literal>),
}

/// One explicit operator condition on a field
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub operator: Operator,
    pub operand: Operand,
}

impl Condition {
    pub fn new(operator: Operator, value: impl Into<Literal>) -> Self {
        Self {
            operator,
            operand: Operand::Single(value.into()),
        }
    }

    pub fn eq(value: impl Into<Literal>) -> Self {
        Self::new(Operator::Eq, value)
    }

    pub fn like(value: impl Into<Literal>) -> Self {
        Self::new(Operator::Like, value)
    }

    pub fn gte(value: impl Into<Literal>) -> Self {
        Self::new(Operator::Gte, value)
    }

    pub fn lte(value: impl Into<Literal>) -> Self {
        Self::new(Operator::Lte, value)
    }

    pub fn is_in<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Literal>,
    {
        Self {
            operator: Operator::In,
            operand: Operand::List(values.into_iter().map(Into::into).collect()),
        }
    }
}

/// What a single criteria entry asks for
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    /// Scalar shorthand for equality
    Equals(Literal),
    /// Array shorthand: equal to any of the values
    AnyOf(Vec<Literal>),
    /// Explicit operators, all of which must hold
    Operators(Vec<Condition>),
}

impl Criterion {
    pub fn eq(value: impl Into<Literal>) -> Self {
        Self::Equals(value.into())
    }

    pub fn any_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Literal>,
    {
        Self::AnyOf(values.into_iter().map(Into::into).collect())
    }

    pub fn like(value: impl Into<Literal>) -> Self {
        Self::Operators(vec![Condition::like(value)])
    }

    /// Inclusive range
    pub fn between(min: impl Into<Literal>, max: impl Into<Literal>) -> Self {
        Self::Operators(vec![Condition::gte(min), Condition::lte(max)])
    }

    /// Start an operator criterion
    pub fn op(operator: Operator, value: impl Into<Literal>) -> Self {
        Self::Operators(vec![Condition::new(operator, value)])
    }

    /// Add another operator condition (builder pattern)
    pub fn and(self, operator: Operator, value: impl Into<Literal>) -> Self {
        let condition = Condition::new(operator, value);
        match self {
            Self::Operators(mut conditions) => {
                conditions.push(condition);
                Self::Operators(conditions)
            }
            Self::Equals(lit) => Self::Operators(vec![Condition::eq(lit), condition]),
            Self::AnyOf(values) => Self::Operators(vec![
                Condition {
                    operator: Operator::In,
                    operand: Operand::List(values),
                },
                condition,
            ]),
        }
    }

    /// Read one criteria entry from JSON
    pub fn from_json(field: &str, value: &Value) -> QueryResult<Self> {
        match value {
            Value::Array(items) => items
                .iter()
                .map(|v| Literal::from_json(field, v))
                .collect::<QueryResult<Vec<_>>>()
                .map(Self::AnyOf),
            Value::Object(ops) => {
                let mut conditions = Vec::with_capacity(ops.len());
                for (key, operand) in ops {
                    let operator = Operator::parse(field, key)?;
                    let operand = match operand {
                        Value::Array(items) => Operand::List(
                            items
                                .iter()
                                .map(|v| Literal::from_json(field, v))
                                .collect::<QueryResult<Vec<_>>>()?,
                        ),
                        scalar => Operand::Single(Literal::from_json(field, scalar)?),
                    };
                    conditions.push(Condition { operator, operand });
                }
                Ok(Self::Operators(conditions))
            }
            scalar => Literal::from_json(field, scalar).map(Self::Equals),
        }
    }
}

/// Ordered mapping from field name to criterion
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchCriteria {
    entries: Vec<(String, Criterion)>,
}

impl SearchCriteria {
    /// Create a new empty mapping
    pub fn new() -> Self {
        Self { entries: vec![] }
    }

    /// Set the criterion for a field; an existing entry is replaced in place
    pub fn insert(&mut self, field: impl Into<String>, criterion: Criterion) -> &mut Self {
        let field = field.into();
        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = criterion,
            None => self.entries.push((field, criterion)),
        }
        self
    }

    /// Set a criterion and return self (builder pattern)
    pub fn with(mut self, field: impl Into<String>, criterion: Criterion) -> Self {
        self.insert(field, criterion);
        self
    }

    /// Shorthand for an equality entry
    pub fn eq(self, field: impl Into<String>, value: impl Into<Literal>) -> Self {
        self.with(field, Criterion::eq(value))
    }

    /// Shorthand for a prefix-match entry
    pub fn like(self, field: impl Into<String>, value: impl Into<Literal>) -> Self {
        self.with(field, Criterion::like(value))
    }

    pub fn entries(&self) -> &[(String, Criterion)] {
        &self.entries
    }

    pub fn get(&self, field: &str) -> Option<&Criterion> {
        self.entries.iter().find(|(f, _)| f == field).map(|(_, c)| c)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Read a criteria mapping from a JSON object, keeping key order
    pub fn from_json(value: &Value) -> QueryResult<Self> {
        let object = value.as_object().ok_or_else(|| {
            QueryError::InvalidQueryOptions("search criteria must be a JSON object".to_string())
        })?;

        let mut criteria = Self::new();
        for (field, value) in object {
            criteria.insert(field.clone(), Criterion::from_json(field, value)?);
        }
        Ok(criteria)
    }
}

/// Map a criteria key to the field name used in filter expressions:
/// camelCase becomes UPPER_SNAKE_CASE, upper-case names pass through
pub fn filter_field_name(key: &str) -> String {
    let mut name = String::with_capacity(key.len() + 4);
    let mut prev: Option<char> = None;
    for ch in key.chars() {
        if ch.is_uppercase() {
            if let Some(p) = prev {
                if p.is_lowercase() || p.is_ascii_digit() {
                    name.push('_');
                }
            }
        }
        name.extend(ch.to_uppercase());
        prev = Some(ch);
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_literal_rendering() {
        assert_eq!(Literal::from("ABC").render(), "'ABC'");
        assert_eq!(Literal::from("O'Neil").render(), "'O''Neil'");
        assert_eq!(Literal::from(42).render(), "42");
        assert_eq!(Literal::from(1.5).render(), "1.5");
        assert_eq!(Literal::from(true).render(), "true");
        assert_eq!(Literal::Null.render(), "null");
        assert_eq!(Literal::from(7).as_text(), "7");
    }

    #[test]
    fn test_unsigned_literals() {
        let max = Literal::from_json("id", &json!(u64::MAX)).unwrap();
        assert_eq!(max, Literal::Unsigned(u64::MAX));
        assert_eq!(max.render(), "18446744073709551615");

        assert_eq!(Literal::from(5u64), Literal::Integer(5));
        assert_eq!(Literal::from(u64::MAX), Literal::Unsigned(u64::MAX));
        assert_eq!(Literal::infer("18446744073709551615"), Literal::Unsigned(u64::MAX));
    }

    #[test]
    fn test_literal_infer() {
        assert_eq!(Literal::infer("12"), Literal::Integer(12));
        assert_eq!(Literal::infer("-3"), Literal::Integer(-3));
        assert_eq!(Literal::infer("2.5"), Literal::Float(2.5));
        assert_eq!(Literal::infer("false"), Literal::Bool(false));
        assert_eq!(Literal::infer("AB-1"), Literal::String("AB-1".into()));
        assert_eq!(Literal::infer("inf"), Literal::String("inf".into()));
    }

    #[test]
    fn test_operator_parsing() {
        assert_eq!(Operator::from_str("gte"), Some(Operator::Gte));
        assert_eq!(Operator::from_str("like"), Some(Operator::Like));
        assert_eq!(Operator::from_str("between"), None);
        assert_eq!(
            Operator::parse("code", "startsWith"),
            Err(QueryError::unsupported("code", "startsWith"))
        );
    }

    #[test]
    fn test_field_names() {
        assert_eq!(filter_field_name("auxilCode"), "AUXIL_CODE");
        assert_eq!(filter_field_name("a"), "A");
        assert_eq!(filter_field_name("CODE"), "CODE");
        assert_eq!(filter_field_name("status"), "STATUS");
        assert_eq!(filter_field_name("docType2"), "DOC_TYPE2");
        assert_eq!(filter_field_name("line2Total"), "LINE2_TOTAL");
        assert_eq!(filter_field_name("CUSTOMER_CODE"), "CUSTOMER_CODE");
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let criteria = SearchCriteria::new()
            .eq("a", 1)
            .eq("b", 2)
            .eq("a", 3);

        assert_eq!(criteria.len(), 2);
        assert_eq!(criteria.entries()[0].0, "a");
        assert_eq!(criteria.get("a"), Some(&Criterion::eq(3)));
    }

    #[test]
    fn test_criterion_and_builder() {
        let range = Criterion::op(Operator::Gte, 1).and(Operator::Lte, 5);
        assert_eq!(range, Criterion::between(1, 5));

        let widened = Criterion::eq("X").and(Operator::Ne, "Y");
        assert_eq!(
            widened,
            Criterion::Operators(vec![Condition::eq("X"), Condition::new(Operator::Ne, "Y")])
        );
    }

    #[test]
    fn test_from_json() {
        let criteria = SearchCriteria::from_json(&json!({
            "code": {"like": "AB"},
            "status": [1, 2],
            "active": true,
            "total": {"gte": 10, "lte": 20.5},
            "kind": {"in": ["A", "B"]}
        }))
        .unwrap();

        let fields: Vec<&str> = criteria.entries().iter().map(|(f, _)| f.as_str()).collect();
        assert_eq!(fields, vec!["code", "status", "active", "total", "kind"]);
        assert_eq!(criteria.get("code"), Some(&Criterion::like("AB")));
        assert_eq!(criteria.get("status"), Some(&Criterion::any_of([1, 2])));
        assert_eq!(criteria.get("active"), Some(&Criterion::eq(true)));
        assert_eq!(criteria.get("total"), Some(&Criterion::between(10, 20.5)));
        assert_eq!(
            criteria.get("kind"),
            Some(&Criterion::Operators(vec![Condition::is_in(["A", "B"])]))
        );
    }

    #[test]
    fn test_from_json_unsupported_operator() {
        let err = SearchCriteria::from_json(&json!({"code": {"startsWith": "AB"}})).unwrap_err();
        assert_eq!(err, QueryError::unsupported("code", "startsWith"));
    }

    #[test]
    fn test_from_json_rejects_nesting() {
        assert!(SearchCriteria::from_json(&json!({"code": [{"eq": 1}]})).is_err());
        assert!(SearchCriteria::from_json(&json!({"code": {"eq": {"x": 1}}})).is_err());
        assert!(SearchCriteria::from_json(&json!(["code"])).is_err());
    }
}
