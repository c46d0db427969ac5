use diesel::prelude::*;

use crate::{
    db::enums::BidStatus,
    db::models::{Bid, CreateBidRequest, NewBid},
    db::repositories::{bidcycles::BidCyclesRepo, bids::BidsRepo, positions::PositionsRepo},
    error::{AppError, AppResult},
    services::context::RequestContext,
};

pub struct BidsService;

impl BidsService {
    pub fn list(conn: &mut PgConnection, ctx: &RequestContext) -> AppResult<Vec<Bid>> {
        Ok(BidsRepo::list_by_user(conn, ctx.profile_id)?)
    }

    /// New bids start as drafts and must target a position of the cycle.
    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: &CreateBidRequest,
    ) -> AppResult<Bid> {
        conn.transaction::<_, AppError, _>(|conn| {
            BidCyclesRepo::find_by_id(conn, req.bidcycle)?
                .ok_or_else(|| AppError::not_found("bid cycle"))?;
            if !PositionsRepo::exists(conn, req.position)? {
                return Err(AppError::not_found("position"));
            }
            if !BidCyclesRepo::has_position(conn, req.bidcycle, req.position)? {
                return Err(AppError::invalid_field(
                    "position",
                    format!(
                        "Position {} is not part of bid cycle {}",
                        req.position, req.bidcycle
                    ),
                ));
            }

            let bid = BidsRepo::insert(
                conn,
                &NewBid {
                    bidcycle_id: req.bidcycle,
                    position_id: req.position,
                    user_id: ctx.profile_id,
                    status: BidStatus::Draft,
                },
            )?;
            tracing::info!(bid_id = bid.id, bidcycle_id = bid.bidcycle_id, position_id = bid.position_id, "Bid created");
            Ok(bid)
        })
    }
}
