pub mod auth;
pub mod idle;
pub mod session;
