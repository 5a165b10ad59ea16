//! Product management service

mod service;

#[cfg(test)]
mod tests;

pub use service::{ProductInput, ProductService, ProductWithCategory};
