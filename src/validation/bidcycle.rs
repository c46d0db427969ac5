use chrono::NaiveDate;

use crate::db::models::NewBidCycle;
use crate::error::{AppError, AppResult};

/// Dates must be strictly increasing: start, deadline (when set), end.
pub fn validate_cycle_dates(
    start: NaiveDate,
    deadline: Option<NaiveDate>,
    end: NaiveDate,
) -> AppResult<()> {
    match deadline {
        Some(deadline) => {
            if start >= deadline {
                return Err(AppError::invalid_field(
                    "cycle_deadline_date",
                    "Cycle start date must be before the cycle deadline",
                ));
            }
            if deadline >= end {
                return Err(AppError::invalid_field(
                    "cycle_deadline_date",
                    "Cycle deadline must be before the cycle end date",
                ));
            }
        }
        None => {
            if start >= end {
                return Err(AppError::invalid_field(
                    "cycle_end_date",
                    "Cycle start date must be before the cycle end date",
                ));
            }
        }
    }
    Ok(())
}

/// Checks a complete bid cycle state, fresh or merged from a patch.
pub fn validate_bidcycle(cycle: &NewBidCycle) -> AppResult<()> {
    if cycle.name.trim().is_empty() {
        return Err(AppError::invalid_field("name", "Name cannot be blank"));
    }
    validate_cycle_dates(
        cycle.cycle_start_date,
        cycle.cycle_deadline_date,
        cycle.cycle_end_date,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn ordered_dates_pass() {
        assert!(validate_cycle_dates(date("2017-01-01"), None, date("2018-01-01")).is_ok());
        assert!(
            validate_cycle_dates(date("2017-01-01"), Some(date("2017-06-01")), date("2018-01-01"))
                .is_ok()
        );
    }

    #[test]
    fn end_before_start_fails() {
        assert!(validate_cycle_dates(date("2017-01-01"), None, date("1988-01-01")).is_err());
        assert!(validate_cycle_dates(date("2017-01-01"), None, date("2017-01-01")).is_err());
    }

    #[test]
    fn deadline_outside_range_fails() {
        let start = date("2017-01-01");
        let end = date("2018-01-01");
        assert!(validate_cycle_dates(start, Some(date("1988-01-01")), end).is_err());
        assert!(validate_cycle_dates(start, Some(date("2099-01-01")), end).is_err());
        assert!(validate_cycle_dates(start, Some(start), end).is_err());
        assert!(validate_cycle_dates(start, Some(end), end).is_err());
    }

    #[test]
    fn blank_name_fails() {
        let cycle = NewBidCycle {
            name: "   ".to_string(),
            cycle_start_date: date("2017-01-01"),
            cycle_deadline_date: None,
            cycle_end_date: date("2018-01-01"),
            active: false,
        };
        match validate_bidcycle(&cycle) {
            Err(AppError::Validation { field, .. }) => assert_eq!(field.as_deref(), Some("name")),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
