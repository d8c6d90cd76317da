//! Property-based tests for canonicalization and hashing.
