//! Response shaping helpers

pub mod error;
