//! Encore Core
//!
//! Platform-agnostic core types, traits, and error handling for Encore.
//!
//! This crate provides the building blocks shared by every Encore library
//! and by the presentation layer.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `TrackId`
//! - **Core Traits**: `KeyValueStore` (async string key-value persistence)
//! - **Error Handling**: Unified `EncoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use encore_core::types::{Track, TrackId};
//!
//! let track = Track::new(TrackId::new("1"), "Intro", "https://picsum.photos/200?random=7");
//! assert_eq!(track.title, "Intro");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{EncoreError, Result};
pub use traits::KeyValueStore;
pub use types::{Track, TrackId};
