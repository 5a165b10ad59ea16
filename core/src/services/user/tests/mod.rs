//! Tests for the user service

#[cfg(test)]
mod service_tests;
