// common/src/models/mod.rs
pub mod chat;

pub use chat::*;
