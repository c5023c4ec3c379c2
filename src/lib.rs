//! Hyperliquid Bridge - Library Root
//!
//! Re-exports all modules for the binary and integration tests.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod usecases;
