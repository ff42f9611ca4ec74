//! Property-based tests for symbol mapping.
