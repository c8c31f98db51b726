//! Unit tests for the dbup CLI
//!
//! These tests use mocked dependencies and run fast without external I/O.

mod config_keys;
mod config_store;
mod deploy_service;
mod mocks;
mod property_tests;
