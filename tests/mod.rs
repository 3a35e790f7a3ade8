//! Integration tests for filmtui
//!
//! Tests are organized by component:
//! - api_test: Content API client tests
//! - app_test: View controller and routing tests
//! - ui_test: UI component tests
//! - e2e_test: End-to-end flow tests (Feed -> Select -> Route -> Detail)

// Note: Each test file is a separate integration test crate
// Tests are run individually by cargo, not via mod.rs
