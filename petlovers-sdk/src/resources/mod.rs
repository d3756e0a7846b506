//! SDK resource modules
//!
//! This module contains resource-specific clients for interacting with
//! different API endpoints.

pub mod pets;

pub use pets::PetsClient;
