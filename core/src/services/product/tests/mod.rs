//! Tests for the product service
