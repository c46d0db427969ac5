use chrono::NaiveDate;
use talentmap_backend::db::models::{BidCycle, NewBidCycle, UpdateBidCycleRequest};
use talentmap_backend::error::AppError;
use talentmap_backend::validation::bidcycle::{validate_bidcycle, validate_cycle_dates};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn stored() -> BidCycle {
    BidCycle {
        id: 1,
        name: "Bidcycle 1".to_string(),
        cycle_start_date: date("2017-01-01"),
        cycle_end_date: date("2018-01-01"),
        active: false,
        created_at: chrono::Utc::now(),
        updated_at: chrono::Utc::now(),
        cycle_deadline_date: None,
    }
}

fn error_field(err: AppError) -> Option<String> {
    match err {
        AppError::Validation { field, .. } => field,
        other => panic!("expected a validation error, got {other:?}"),
    }
}

#[test]
fn end_before_start_is_rejected() {
    let err = validate_cycle_dates(date("2017-01-01"), None, date("1988-01-01")).unwrap_err();
    assert_eq!(error_field(err).as_deref(), Some("cycle_end_date"));
}

#[test]
fn deadline_outside_the_cycle_is_rejected() {
    let start = date("2017-01-01");
    let end = date("2018-01-01");
    assert!(validate_cycle_dates(start, Some(date("2016-12-31")), end).is_err());
    assert!(validate_cycle_dates(start, Some(date("2018-06-01")), end).is_err());
    assert!(validate_cycle_dates(start, Some(date("2017-06-01")), end).is_ok());
}

#[test]
fn patch_is_checked_against_stored_dates() {
    let patch: UpdateBidCycleRequest =
        serde_json::from_str(r#"{"cycle_end_date": "1988-01-01"}"#).unwrap();
    let merged = patch.merge_into(&stored());
    assert!(validate_bidcycle(&merged).is_err());

    let patch: UpdateBidCycleRequest =
        serde_json::from_str(r#"{"cycle_deadline_date": "2017-03-01"}"#).unwrap();
    assert!(validate_bidcycle(&patch.merge_into(&stored())).is_ok());
}

#[test]
fn blank_name_is_rejected() {
    let cycle = NewBidCycle {
        name: "  ".to_string(),
        cycle_start_date: date("2017-01-01"),
        cycle_deadline_date: None,
        cycle_end_date: date("2018-01-01"),
        active: true,
    };
    assert_eq!(error_field(validate_bidcycle(&cycle).unwrap_err()).as_deref(), Some("name"));
}
