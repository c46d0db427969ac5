use std::collections::HashSet;

use diesel::prelude::*;

use crate::{
    db::models::{Page, Position, PositionListing},
    db::repositories::{bidcycles::BidCyclesRepo, bids::BidsRepo, positions::PositionsRepo},
    error::{AppError, AppResult},
    filters::FilterSet,
};

/// Availability of positions in the current bid cycle.
///
/// A member of the current cycle is available unless one of its bids in that
/// cycle has reached a handshake. Positions outside the cycle have no
/// availability at all, so they match neither `true` nor `false` filters.
#[derive(Debug, Clone, Default)]
pub struct CurrentCycleAvailability {
    members: HashSet<i32>,
    blocked: HashSet<i32>,
}

impl CurrentCycleAvailability {
    pub fn new(members: impl IntoIterator<Item = i32>, blocked: impl IntoIterator<Item = i32>) -> Self {
        Self {
            members: members.into_iter().collect(),
            blocked: blocked.into_iter().collect(),
        }
    }

    pub fn load(conn: &mut PgConnection) -> AppResult<Self> {
        let Some(cycle) = BidCyclesRepo::find_current(conn)? else {
            return Ok(Self::default());
        };
        let members = BidCyclesRepo::position_ids(conn, cycle.id)?;
        let blocked = BidsRepo::blocked_position_ids(conn, cycle.id)?;
        Ok(Self::new(members, blocked))
    }

    pub fn of(&self, position_id: i32) -> Option<bool> {
        self.members
            .contains(&position_id)
            .then(|| !self.blocked.contains(&position_id))
    }
}

pub struct PositionsService;

impl PositionsService {
    fn listings(
        availability: &CurrentCycleAvailability,
        rows: Vec<(Position, Option<String>)>,
    ) -> Vec<PositionListing> {
        rows.into_iter()
            .map(|(position, post)| {
                let available = availability.of(position.id);
                PositionListing::new(position, post, available)
            })
            .collect()
    }

    /// Every position that satisfies `filters`.
    pub fn matching(conn: &mut PgConnection, filters: &FilterSet) -> AppResult<Vec<PositionListing>> {
        let availability = CurrentCycleAvailability::load(conn)?;
        let rows = PositionsRepo::list_with_post(conn)?;
        Ok(filters.apply(Self::listings(&availability, rows)))
    }

    pub fn list(
        conn: &mut PgConnection,
        filters: &FilterSet,
        page: i64,
        limit: i64,
    ) -> AppResult<Page<PositionListing>> {
        let matches = Self::matching(conn, filters)?;
        Ok(Page::from_vec(matches, page, limit))
    }

    pub fn get(conn: &mut PgConnection, position_id: i32) -> AppResult<PositionListing> {
        let (position, post) = PositionsRepo::find_with_post(conn, position_id)?
            .ok_or_else(|| AppError::not_found("position"))?;
        let availability = CurrentCycleAvailability::load(conn)?;
        let available = availability.of(position.id);
        Ok(PositionListing::new(position, post, available))
    }

    /// Members of one cycle, with availability relative to the current cycle.
    pub fn in_cycle(
        conn: &mut PgConnection,
        cycle_id: i32,
        page: i64,
        limit: i64,
    ) -> AppResult<Page<PositionListing>> {
        let availability = CurrentCycleAvailability::load(conn)?;
        let rows = BidCyclesRepo::positions(conn, cycle_id)?;
        Ok(Page::from_vec(Self::listings(&availability, rows), page, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn members_are_available_unless_blocked() {
        let availability = CurrentCycleAvailability::new([1, 2, 3], [2]);
        assert_eq!(availability.of(1), Some(true));
        assert_eq!(availability.of(2), Some(false));
        assert_eq!(availability.of(3), Some(true));
    }

    #[test]
    fn non_members_have_no_availability() {
        let availability = CurrentCycleAvailability::new([1], [4]);
        assert_eq!(availability.of(4), None);
        assert_eq!(CurrentCycleAvailability::default().of(1), None);
    }
}
