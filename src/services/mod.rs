pub mod auth_service;
pub mod bidcycles_service;
pub mod bids_service;
pub mod context;
pub mod org_posts_service;
pub mod positions_service;
pub mod profiles_service;
pub mod saved_searches_service;
pub mod sharing_service;

pub use auth_service::AuthService;
pub use bidcycles_service::BidCyclesService;
pub use bids_service::BidsService;
pub use org_posts_service::OrgPostsService;
pub use positions_service::PositionsService;
pub use profiles_service::ProfilesService;
pub use saved_searches_service::SavedSearchesService;
pub use sharing_service::SharingService;
