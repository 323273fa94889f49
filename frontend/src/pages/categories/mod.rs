pub mod detail;
pub mod form;
pub mod panel;
pub mod repository;
pub mod utils;
pub mod view_model;

pub use detail::CategoryViewPage;
pub use form::{CategoryCreatePage, CategoryEditPage};
pub use panel::CategoriesPage;
