//! User management service

mod service;

#[cfg(test)]
mod tests;

pub use service::{UserInput, UserService, UserUpdate};
