use serde_json::json;
use talentmap_backend::db::models::CreateSavedSearchRequest;
use talentmap_backend::error::AppError;
use talentmap_backend::filters::Endpoint;
use talentmap_backend::validation::saved_search::validate_saved_search;
use validator::Validate;

#[test]
fn request_filters_are_validated_against_their_endpoint() {
    let req: CreateSavedSearchRequest = serde_json::from_value(json!({
        "name": "Paris positions",
        "endpoint": "/api/v1/position/",
        "filters": {"position_number__startswith": ["56"], "grade__in": ["04,05"]},
    }))
    .unwrap();
    assert!(req.validate().is_ok());

    let set = validate_saved_search(&req.endpoint, &req.filters).unwrap();
    assert_eq!(set.endpoint, Endpoint::Position);
    assert_eq!(set.criteria.len(), 2);
}

#[test]
fn unknown_filter_is_reported_by_name() {
    let req: CreateSavedSearchRequest = serde_json::from_value(json!({
        "name": "Posts",
        "endpoint": "/api/v1/orgpost/",
        "filters": {"title__contains": ["Officer"]},
    }))
    .unwrap();

    match validate_saved_search(&req.endpoint, &req.filters) {
        Err(AppError::Validation { field, .. }) => {
            assert_eq!(field.as_deref(), Some("title__contains"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn empty_name_fails_request_validation() {
    let req: CreateSavedSearchRequest = serde_json::from_value(json!({
        "name": "",
        "endpoint": "/api/v1/position/",
    }))
    .unwrap();
    assert!(req.validate().is_err());
}
