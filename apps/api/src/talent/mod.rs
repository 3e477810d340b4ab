pub mod filter;
pub mod handlers;
