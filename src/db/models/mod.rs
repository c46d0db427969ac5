// Sub-modules organized by functional domain
pub mod api;
pub mod auth;
pub mod bid;
pub mod bidcycle;
pub mod language;
pub mod org_post;
pub mod position;
pub mod profile;
pub mod saved_search;
pub mod sharable;

// API response structures
pub use api::*;

// Authentication and user models
pub use auth::*;

// Bidding models
pub use bid::*;
pub use bidcycle::*;

// Catalogue models
pub use org_post::*;
pub use position::*;

// Profile models
pub use language::*;
pub use profile::*;
pub use saved_search::*;
pub use sharable::*;
