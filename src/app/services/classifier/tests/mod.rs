//! Tests for the profile classifier
