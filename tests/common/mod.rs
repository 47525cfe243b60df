//! Common test utilities for aerowx.
//!
//! This module provides shared utilities for testing the aerowx server.

#![allow(dead_code)]

pub mod assertions;
pub mod http_client;
pub mod test_data;
