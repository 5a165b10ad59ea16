//! Category management service

mod service;

#[cfg(test)]
mod tests;

pub use service::{CategoryInput, CategoryService};
