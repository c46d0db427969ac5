use chrono::NaiveDate;

use super::registry::Endpoint;
use super::schema::{FieldKind, FieldSpec, Lookup, resolve_filter_name};
use super::{FieldValue, FilterMap, Filterable};
use crate::error::{AppError, AppResult};

/// A filter value, already parsed to the field's kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Text(String),
    Integer(i64),
    Date(NaiveDate),
    Boolean(bool),
}

/// One `field__lookup = values` clause. Values are OR-ed.
#[derive(Debug, Clone, PartialEq)]
pub struct Criterion {
    pub field: &'static str,
    pub lookup: Lookup,
    pub operands: Vec<Operand>,
}

/// All clauses of a filter map. Clauses are AND-ed.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSet {
    pub endpoint: Endpoint,
    pub criteria: Vec<Criterion>,
}

impl FilterSet {
    /// Validates every filter name against the endpoint's schema and parses
    /// the values. Fails on the first unknown name or unparsable value.
    pub fn parse(endpoint: Endpoint, filters: &FilterMap) -> AppResult<Self> {
        let schema = endpoint.filter_schema();
        let mut criteria = Vec::with_capacity(filters.len());

        for (name, values) in filters {
            let (spec, lookup) = resolve_filter_name(schema, name).ok_or_else(|| {
                AppError::invalid_field(
                    name.clone(),
                    format!(
                        "Filter '{}' is not supported by the {} endpoint",
                        name,
                        endpoint.name()
                    ),
                )
            })?;
            criteria.push(Criterion::parse(spec, lookup, name, values)?);
        }

        Ok(Self { endpoint, criteria })
    }

    pub fn matches<T: Filterable>(&self, row: &T) -> bool {
        self.criteria
            .iter()
            .all(|criterion| criterion.matches(row.field_value(criterion.field)))
    }

    pub fn apply<T: Filterable>(&self, rows: Vec<T>) -> Vec<T> {
        rows.into_iter().filter(|row| self.matches(row)).collect()
    }
}

impl Criterion {
    fn parse(spec: &FieldSpec, lookup: Lookup, name: &str, values: &[String]) -> AppResult<Self> {
        let raw: Vec<&str> = if lookup == Lookup::In {
            values
                .iter()
                .flat_map(|value| value.split(','))
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .collect()
        } else {
            values.iter().map(String::as_str).collect()
        };

        if raw.is_empty() {
            return Err(AppError::invalid_field(
                name.to_string(),
                format!("Filter '{}' requires a value", name),
            ));
        }

        // isnull always takes a boolean, whatever the field kind
        let kind = if lookup == Lookup::IsNull {
            FieldKind::Boolean
        } else {
            spec.kind
        };

        let operands = raw
            .into_iter()
            .map(|value| {
                parse_operand(kind, value).ok_or_else(|| {
                    AppError::invalid_field(
                        name.to_string(),
                        format!("'{}' is not a valid value for filter '{}'", value, name),
                    )
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Self {
            field: spec.name,
            lookup,
            operands,
        })
    }

    pub fn matches(&self, value: FieldValue<'_>) -> bool {
        if self.lookup == Lookup::IsNull {
            return self
                .operands
                .iter()
                .any(|operand| *operand == Operand::Boolean(value.is_null()));
        }
        if value.is_null() {
            return false;
        }
        self.operands
            .iter()
            .any(|operand| compare(self.lookup, value, operand))
    }
}

fn parse_operand(kind: FieldKind, value: &str) -> Option<Operand> {
    match kind {
        FieldKind::Text => Some(Operand::Text(value.to_string())),
        FieldKind::Integer => value.trim().parse().ok().map(Operand::Integer),
        FieldKind::Date => NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
            .ok()
            .map(Operand::Date),
        FieldKind::Boolean => match value.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(Operand::Boolean(true)),
            "false" | "0" | "no" => Some(Operand::Boolean(false)),
            _ => None,
        },
    }
}

fn compare(lookup: Lookup, value: FieldValue<'_>, operand: &Operand) -> bool {
    match (value, operand) {
        (FieldValue::Text(Some(actual)), Operand::Text(expected)) => {
            compare_text(lookup, actual, expected)
        }
        (FieldValue::Integer(Some(actual)), Operand::Integer(expected)) => {
            compare_ordered(lookup, &actual, expected)
        }
        (FieldValue::Date(Some(actual)), Operand::Date(expected)) => {
            compare_ordered(lookup, &actual, expected)
        }
        (FieldValue::Boolean(Some(actual)), Operand::Boolean(expected)) => {
            lookup == Lookup::Exact && actual == *expected
        }
        _ => false,
    }
}

fn compare_text(lookup: Lookup, actual: &str, expected: &str) -> bool {
    match lookup {
        Lookup::Exact | Lookup::In => actual == expected,
        Lookup::IExact => actual.to_lowercase() == expected.to_lowercase(),
        Lookup::Contains => actual.contains(expected),
        Lookup::IContains => actual.to_lowercase().contains(&expected.to_lowercase()),
        Lookup::StartsWith => actual.starts_with(expected),
        Lookup::IStartsWith => actual.to_lowercase().starts_with(&expected.to_lowercase()),
        Lookup::EndsWith => actual.ends_with(expected),
        _ => false,
    }
}

fn compare_ordered<T: PartialOrd>(lookup: Lookup, actual: &T, expected: &T) -> bool {
    match lookup {
        Lookup::Exact | Lookup::In => actual == expected,
        Lookup::Gt => actual > expected,
        Lookup::Gte => actual >= expected,
        Lookup::Lt => actual < expected,
        Lookup::Lte => actual <= expected,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        position_number: &'static str,
        title: &'static str,
        grade: Option<&'static str>,
        post: Option<i64>,
        available: Option<bool>,
    }

    impl Filterable for Row {
        fn field_value(&self, field: &str) -> FieldValue<'_> {
            match field {
                "position_number" => FieldValue::Text(Some(self.position_number)),
                "title" => FieldValue::Text(Some(self.title)),
                "grade" => FieldValue::Text(self.grade),
                "post" => FieldValue::Integer(self.post),
                "is_available_in_current_bidcycle" => FieldValue::Boolean(self.available),
                _ => FieldValue::Missing,
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                position_number: "56001",
                title: "Political Officer",
                grade: Some("04"),
                post: Some(1),
                available: Some(true),
            },
            Row {
                position_number: "56002",
                title: "Consular Officer",
                grade: None,
                post: Some(2),
                available: Some(false),
            },
            Row {
                position_number: "10003",
                title: "Economic Officer",
                grade: Some("02"),
                post: None,
                available: None,
            },
        ]
    }

    fn filters(pairs: &[(&str, &[&str])]) -> FilterMap {
        pairs
            .iter()
            .map(|(k, vs)| (k.to_string(), vs.iter().map(|v| v.to_string()).collect()))
            .collect()
    }

    fn count(pairs: &[(&str, &[&str])]) -> usize {
        let set = FilterSet::parse(Endpoint::Position, &filters(pairs)).unwrap();
        set.apply(rows()).len()
    }

    #[test]
    fn startswith_matches_prefix() {
        assert_eq!(count(&[("position_number__startswith", &["56"])]), 2);
    }

    #[test]
    fn empty_filter_set_matches_everything() {
        assert_eq!(count(&[]), 3);
    }

    #[test]
    fn keys_are_anded_values_are_ored() {
        assert_eq!(
            count(&[("position_number__startswith", &["56"]), ("post", &["2"])]),
            1
        );
        assert_eq!(count(&[("post", &["1", "2"])]), 2);
        assert_eq!(count(&[("post__in", &["1,2"])]), 2);
    }

    #[test]
    fn case_insensitive_lookups() {
        assert_eq!(count(&[("title__icontains", &["officer"])]), 3);
        assert_eq!(count(&[("title__contains", &["officer"])]), 0);
        assert_eq!(count(&[("title__iexact", &["political officer"])]), 1);
    }

    #[test]
    fn nulls_never_match_comparisons_but_match_isnull() {
        assert_eq!(count(&[("post__gt", &["0"])]), 2);
        assert_eq!(count(&[("grade__isnull", &["true"])]), 1);
        assert_eq!(count(&[("grade__isnull", &["false"])]), 2);
    }

    #[test]
    fn availability_is_tri_state() {
        assert_eq!(count(&[("is_available_in_current_bidcycle", &["true"])]), 1);
        assert_eq!(count(&[("is_available_in_current_bidcycle", &["false"])]), 1);
    }

    #[test]
    fn unknown_filter_is_rejected_with_its_name() {
        let err = FilterSet::parse(Endpoint::Position, &filters(&[("differential_rate__gt", &["0"])]))
            .unwrap_err();
        match err {
            AppError::Validation { message, field } => {
                assert_eq!(field.as_deref(), Some("differential_rate__gt"));
                assert!(message.contains("differential_rate__gt"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn same_filter_is_valid_for_another_endpoint() {
        assert!(
            FilterSet::parse(Endpoint::OrgPost, &filters(&[("differential_rate__gt", &["0"])]))
                .is_ok()
        );
    }

    #[test]
    fn values_are_parsed_to_the_field_kind() {
        assert!(FilterSet::parse(Endpoint::Position, &filters(&[("post", &["abc"])])).is_err());
        assert!(
            FilterSet::parse(Endpoint::BidCycle, &filters(&[("cycle_start_date__gt", &["2017-13-01"])]))
                .is_err()
        );
        assert!(
            FilterSet::parse(Endpoint::Position, &filters(&[("is_available_in_current_bidcycle", &["maybe"])]))
                .is_err()
        );
        assert!(FilterSet::parse(Endpoint::Position, &filters(&[("title", &[])])).is_err());
    }
}
