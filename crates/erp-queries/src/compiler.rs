//! Search criteria compilation
//!
//! Turns a [`SearchCriteria`] mapping into the filter expression carried by
//! the `q` query parameter, e.g. `CODE like 'AB*' and (STATUS eq 1 or STATUS eq 2)`.

use erp_core::{QueryError, QueryResult};

use crate::criteria::{filter_field_name, Condition, Criterion, Literal, Operand, Operator, SearchCriteria};

/// Compile criteria into one filter expression.
///
/// Clauses appear in insertion order joined with ` and `. An empty mapping
/// yields `None`, so callers can leave `q` out entirely.
pub fn compile(criteria: &SearchCriteria) -> QueryResult<Option<String>> {
    let clauses = criteria
        .entries()
        .iter()
        .map(|(field, criterion)| compile_criterion(field, criterion))
        .collect::<QueryResult<Vec<_>>>()?;

    Ok(and_all(&clauses))
}

/// Compile the clause for one criteria entry
pub fn compile_criterion(field: &str, criterion: &Criterion) -> QueryResult<String> {
    let column = filter_field_name(field);

    match criterion {
        Criterion::Equals(value) => comparison(field, &column, Operator::Eq, value),
        Criterion::AnyOf(values) => or_group(field, &column, values),
        Criterion::Operators(conditions) => {
            if conditions.is_empty() {
                return Err(QueryError::invalid_criteria(field, "no operators given"));
            }
            let clauses = conditions
                .iter()
                .map(|condition| render_condition(field, &column, condition))
                .collect::<QueryResult<Vec<_>>>()?;
            Ok(clauses.join(" and "))
        }
    }
}

/// Compile a single operator condition on one field
pub fn compile_condition(field: &str, condition: &Condition) -> QueryResult<String> {
    render_condition(field, &filter_field_name(field), condition)
}

/// Join ready-made conditions with ` and `, skipping blank ones.
/// Returns `None` when nothing is left.
pub fn and_all<S: AsRef<str>>(conditions: &[S]) -> Option<String> {
    let parts: Vec<&str> = conditions
        .iter()
        .map(|c| c.as_ref().trim())
        .filter(|c| !c.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" and "))
    }
}

fn render_condition(field: &str, column: &str, condition: &Condition) -> QueryResult<String> {
    match (condition.operator, &condition.operand) {
        (Operator::In, Operand::List(values)) => or_group(field, column, values),
        (Operator::In, Operand::Single(value)) => or_group(field, column, std::slice::from_ref(value)),
        (Operator::Like, Operand::Single(value)) => Ok(format!(
            "{} like {}",
            column,
            Literal::String(format!("{}*", value.as_text())).render()
        )),
        (operator, Operand::Single(value)) => comparison(field, column, operator, value),
        (operator, Operand::List(_)) => Err(QueryError::invalid_criteria(
            field,
            format!("operator '{}' expects a single value", operator.as_str()),
        )),
    }
}

fn comparison(field: &str, column: &str, operator: Operator, value: &Literal) -> QueryResult<String> {
    if let Literal::Float(f) = value {
        if !f.is_finite() {
            return Err(QueryError::invalid_criteria(field, format!("{} is not a valid number", f)));
        }
    }
    Ok(format!("{} {} {}", column, operator.as_str(), value.render()))
}

fn or_group(field: &str, column: &str, values: &[Literal]) -> QueryResult<String> {
    if values.is_empty() {
        return Err(QueryError::invalid_criteria(field, "value list is empty"));
    }

    let alternatives = values
        .iter()
        .map(|value| comparison(field, column, Operator::Eq, value))
        .collect::<QueryResult<Vec<_>>>()?;

    Ok(format!("({})", alternatives.join(" or ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn compiled(criteria: &SearchCriteria) -> String {
        compile(criteria).unwrap().unwrap()
    }

    #[test]
    fn test_empty_criteria() {
        assert_eq!(compile(&SearchCriteria::new()).unwrap(), None);
    }

    #[test]
    fn test_scalars_joined_in_order() {
        let criteria = SearchCriteria::new().eq("a", 1).eq("b", 2);
        assert_eq!(compiled(&criteria), "A eq 1 and B eq 2");

        let reversed = SearchCriteria::new().eq("b", 2).eq("a", 1);
        assert_eq!(compiled(&reversed), "B eq 2 and A eq 1");
    }

    #[test]
    fn test_string_and_bool_literals() {
        let criteria = SearchCriteria::new()
            .eq("code", "ABC")
            .eq("active", true)
            .eq("name", "D'Arcy");
        assert_eq!(
            compiled(&criteria),
            "CODE eq 'ABC' and ACTIVE eq true and NAME eq 'D''Arcy'"
        );
    }

    #[test]
    fn test_like_gets_trailing_wildcard() {
        let criteria = SearchCriteria::new().like("code", "AB");
        assert_eq!(compiled(&criteria), "CODE like 'AB*'");

        let numeric = SearchCriteria::new().like("number", 2024);
        assert_eq!(compiled(&numeric), "NUMBER like '2024*'");
    }

    #[test]
    fn test_in_operator() {
        let criteria = SearchCriteria::from_json(&json!({"status": {"in": [1, 2, 3]}})).unwrap();
        assert_eq!(
            compiled(&criteria),
            "(STATUS eq 1 or STATUS eq 2 or STATUS eq 3)"
        );
    }

    #[test]
    fn test_array_shorthand() {
        let criteria = SearchCriteria::new()
            .with("docType", Criterion::any_of(["FV", "PA"]))
            .eq("year", 2024);
        assert_eq!(
            compiled(&criteria),
            "(DOC_TYPE eq 'FV' or DOC_TYPE eq 'PA') and YEAR eq 2024"
        );
    }

    #[test]
    fn test_single_value_array_still_grouped() {
        let criteria = SearchCriteria::new().with("status", Criterion::any_of([4]));
        assert_eq!(compiled(&criteria), "(STATUS eq 4)");
    }

    #[test]
    fn test_range() {
        let criteria = SearchCriteria::new().with("total", Criterion::between(100, 200));
        assert_eq!(compiled(&criteria), "TOTAL gte 100 and TOTAL lte 200");
    }

    #[test]
    fn test_mixed_operators_and_in() {
        let criteria = SearchCriteria::from_json(&json!({
            "status": {"in": [1, 2], "ne": 3}
        }))
        .unwrap();
        assert_eq!(
            compiled(&criteria),
            "(STATUS eq 1 or STATUS eq 2) and STATUS ne 3"
        );
    }

    #[test]
    fn test_errors() {
        let empty_list = SearchCriteria::new().with("status", Criterion::AnyOf(vec![]));
        assert!(matches!(
            compile(&empty_list),
            Err(QueryError::InvalidCriteria { .. })
        ));

        let no_ops = SearchCriteria::new().with("status", Criterion::Operators(vec![]));
        assert!(matches!(
            compile(&no_ops),
            Err(QueryError::InvalidCriteria { .. })
        ));

        let list_for_eq = SearchCriteria::from_json(&json!({"code": {"eq": [1, 2]}})).unwrap();
        assert!(matches!(
            compile(&list_for_eq),
            Err(QueryError::InvalidCriteria { .. })
        ));
    }

    #[test]
    fn test_compile_condition() {
        assert_eq!(
            compile_condition("auxilCode", &Condition::like("test")).unwrap(),
            "AUXIL_CODE like 'test*'"
        );
        assert_eq!(
            compile_condition("status", &Condition::eq(1)).unwrap(),
            "STATUS eq 1"
        );
    }

    #[test]
    fn test_and_all() {
        assert_eq!(
            and_all(&["CODE eq 'ABC'", "STATUS eq 1"]).as_deref(),
            Some("CODE eq 'ABC' and STATUS eq 1")
        );
        assert_eq!(and_all(&["", "  ", "A eq 1"]).as_deref(), Some("A eq 1"));
        assert_eq!(and_all::<&str>(&[]), None);
    }

    #[test]
    fn test_non_finite_floats_rejected() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let criteria = SearchCriteria::new().eq("total", value);
            assert!(matches!(
                compile(&criteria),
                Err(QueryError::InvalidCriteria { .. })
            ));

            let listed = SearchCriteria::new().with("total", Criterion::any_of([1.5, value]));
            assert!(compile(&listed).is_err());
        }
    }

    #[test]
    fn test_large_unsigned_ids_keep_their_digits() {
        let criteria = SearchCriteria::from_json(&json!({"id": 18446744073709551615u64})).unwrap();
        assert_eq!(compiled(&criteria), "ID eq 18446744073709551615");
    }
}
