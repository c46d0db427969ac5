//! Declarative collection filters.
//!
//! Filters arrive as `name -> [values]` maps, either from a list endpoint's
//! query string or from a stored saved search. Names follow the
//! `field__lookup` convention (`position_number__startswith`); a bare field
//! means `exact`. Each collection endpoint declares which fields and lookups
//! it accepts, so a filter map can be validated without touching the
//! database and then evaluated against loaded rows.

pub mod criteria;
pub mod registry;
pub mod schema;

use std::collections::BTreeMap;

use chrono::NaiveDate;

pub use criteria::{Criterion, FilterSet, Operand};
pub use registry::Endpoint;
pub use schema::{FieldKind, FieldSpec, Lookup};

/// Filter name to the list of raw values supplied for it.
pub type FilterMap = BTreeMap<String, Vec<String>>;

/// Query keys handled by pagination rather than filtering.
pub const RESERVED_QUERY_KEYS: [&str; 2] = ["page", "limit"];

/// The value a row holds for one filterable field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(Option<&'a str>),
    Integer(Option<i64>),
    Date(Option<NaiveDate>),
    Boolean(Option<bool>),
    Missing,
}

impl FieldValue<'_> {
    pub fn is_null(&self) -> bool {
        matches!(
            self,
            FieldValue::Text(None)
                | FieldValue::Integer(None)
                | FieldValue::Date(None)
                | FieldValue::Boolean(None)
                | FieldValue::Missing
        )
    }
}

/// Rows that can be matched against a [`FilterSet`].
pub trait Filterable {
    fn field_value(&self, field: &str) -> FieldValue<'_>;
}

/// Splits query pairs into a filter map, dropping pagination keys. Repeated
/// keys accumulate values.
pub fn filter_map_from_query(pairs: &[(String, String)]) -> FilterMap {
    let mut map = FilterMap::new();
    for (key, value) in pairs {
        if RESERVED_QUERY_KEYS.contains(&key.as_str()) {
            continue;
        }
        map.entry(key.clone()).or_default().push(value.clone());
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_pairs_group_and_skip_pagination() {
        let pairs = vec![
            ("title__contains".to_string(), "Officer".to_string()),
            ("page".to_string(), "2".to_string()),
            ("grade".to_string(), "04".to_string()),
            ("grade".to_string(), "05".to_string()),
        ];
        let map = filter_map_from_query(&pairs);
        assert_eq!(map.len(), 2);
        assert_eq!(map["grade"], vec!["04", "05"]);
        assert!(!map.contains_key("page"));
    }
}
