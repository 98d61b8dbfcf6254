//! Core library components.
//!
//! This module contains the reusable logic for secret synchronization,
//! encryption, remote access and configuration handling.

pub mod cipher;
pub mod config;
pub mod constants;
pub mod credential;
pub mod domain;
pub mod store;
pub mod sync;
pub mod types;
pub mod validation;
