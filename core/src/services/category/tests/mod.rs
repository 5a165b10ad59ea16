//! Tests for the category service
