mod auth;
mod categories;
pub mod client;
pub mod errors;
pub mod events;
mod lookups;
pub mod normalize;
mod requests;
pub mod transport;
pub mod types;

pub use auth::{CURRENT_USER_PATH, FAMILY_STATUS_PATH, LOGOUT_PATH};
pub use categories::CATEGORIES_PATH;
pub use client::*;
pub use events::{SubscriptionId, UnauthorizedEvent, UnauthorizedEvents};
pub use lookups::{LOOKUPS_PATH, MARK_NOTIFICATION_READ_PATH, NOTIFICATIONS_PATH};
pub use normalize::{normalize_login_response, LoginPayload};
pub use requests::*;
pub use types::*;

#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod test_support;
