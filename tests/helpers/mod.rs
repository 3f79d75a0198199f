//! Shared fixtures and assertions for the integration tests.

pub mod document_helpers;
