pub mod api;
pub mod backend;
pub mod error;
pub mod identity;
pub mod session;
pub mod views;
