pub mod categories;
pub mod dashboard;
pub mod login;
pub mod profile;
pub mod register;
pub mod requests;
