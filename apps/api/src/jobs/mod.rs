pub mod catalog;
pub mod handlers;
pub mod ranking;
