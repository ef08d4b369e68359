//! Frame driver integration tests
