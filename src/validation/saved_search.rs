use crate::error::{AppError, AppResult};
use crate::filters::{Endpoint, FilterMap, FilterSet};

/// Resolves the endpoint and checks every filter against its schema.
pub fn validate_saved_search(endpoint: &str, filters: &FilterMap) -> AppResult<FilterSet> {
    let resolved = Endpoint::resolve(endpoint).ok_or_else(|| {
        AppError::invalid_field(
            "endpoint",
            format!("Endpoint {} is not a valid API path", endpoint),
        )
    })?;
    FilterSet::parse(resolved, filters)
}
