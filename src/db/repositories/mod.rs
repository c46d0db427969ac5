pub mod bidcycles;
pub mod bids;
pub mod languages;
pub mod org_posts;
pub mod positions;
pub mod profiles;
pub mod saved_searches;
pub mod sharables;
pub mod users;
