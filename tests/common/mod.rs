//! Shared test utilities

#![allow(dead_code)]

pub mod fixtures;
pub mod mock_relay;
pub mod mock_verifier;
