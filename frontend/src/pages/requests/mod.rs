pub mod create;
pub mod detail;
pub mod panel;
pub mod repository;
pub mod utils;
pub mod view_model;

#[cfg(target_arch = "wasm32")]
mod attachments;

pub use create::CreateRequestPage;
pub use detail::RequestDetailsPage;
pub use panel::RequestsPage;
