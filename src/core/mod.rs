//! Core components of the `fincorr-rs` client.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`FcClient`] and its builder.
//! - The primary [`FcError`] type.
//! - The [`MetricSource`] seam that decouples analysis runs from the network.
//! - Internal networking and authentication logic.

/// The main client (`FcClient`), builder, and configuration.
pub mod client;
/// The primary error type (`FcError`) for the crate.
pub mod error;
/// Service traits for abstracting data retrieval.
pub mod services;
pub(crate) mod wire;

#[cfg(feature = "dataframe")]
pub mod dataframe;

pub(crate) mod net;

// convenient re-exports so most code can just `use crate::core::FcClient`
pub use client::{CacheMode, FcClient, FcClientBuilder, RetryConfig};
pub use error::FcError;
pub use services::MetricSource;
