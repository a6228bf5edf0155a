//! # ENCORE UI Types
//!
//! Screen-space building blocks shared by menu elements:
//! - [`Rect`] with depth and rotation
//! - [`Color`] and the per-skin [`Palette`]
//! - [`SkinResolver`] for named textures and colors
//! - [`DrawBackend`] for textured quads, with [`CommandRecorder`] as the
//!   stock implementation
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      FRAME PIPELINE                       │
//! ├──────────────────────────────────────────────────────────┤
//! │  Element::draw → DrawBackend → RenderCommand → QuadVertex │
//! │        ↓               ↓                                  │
//! │  SkinResolver    CommandRecorder (batch, GPU upload)      │
//! └──────────────────────────────────────────────────────────┘
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod layout;
pub mod render;
pub mod screen;
pub mod skin;
pub mod style;

pub use layout::Rect;
pub use render::{CommandRecorder, DrawBackend, QuadVertex, RenderCommand};
pub use screen::{FixedScreen, ScreenMetrics};
pub use skin::{Skin, SkinResolver, TextureHandle};
pub use style::{Color, Palette, SkinColors};
