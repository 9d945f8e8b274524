//! Window pagination

pub mod paginator;

pub use paginator::WindowPaginator;
