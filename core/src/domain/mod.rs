//! Domain model and pure business logic

pub mod entities;
pub mod hierarchy;
pub mod slug;
