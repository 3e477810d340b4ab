pub mod dashboard;
pub mod handlers;
pub mod store;
pub mod validation;
