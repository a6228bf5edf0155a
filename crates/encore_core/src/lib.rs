//! # ENCORE Core
//!
//! Collaborator primitives shared by every frame-driven component:
//! - [`Stopwatch`] over an injectable [`TimeSource`]
//! - [`RandomSource`] with a seeded ChaCha implementation
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use encore_core::{ManualTime, Stopwatch};
//!
//! let time = Arc::new(ManualTime::new());
//! let mut watch = Stopwatch::new(time.clone());
//! watch.start();
//! time.advance(Duration::from_millis(250));
//! assert_eq!(watch.elapsed_ms(), 250);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod random;
pub mod time;

pub use random::{shared, ConstantRandom, RandomSource, SeededRandom, SharedRandom};
pub use time::{ManualTime, MonotonicTime, Stopwatch, TimeSource};
