//! # ENCORE Effects
//!
//! Particle effects for menu and sing screens: twinkles, star bursts,
//! falling snow, note-hit flares and perfect-note stars.
//!
//! ## Architecture
//!
//! - [`ParticleKind`] selects a static behavior row (alpha, motion and size
//!   laws plus spawn ranges)
//! - [`Particle`] simulates one element from its own stopwatch
//! - [`ParticleEffect`] owns a bounded pool, spawns per the kind's cadence
//!   and draws through a [`encore_ui::DrawBackend`]
//! - [`ThemeDocument`] loads and saves effects as TOML theme elements
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use encore_core::{shared, ManualTime, SeededRandom};
//! use encore_effects::{EffectContext, EffectSettings, ParticleEffect, ParticleKind, TextureSource};
//! use encore_ui::{Color, CommandRecorder, FixedScreen, Rect, Skin, TextureHandle};
//!
//! let time = Arc::new(ManualTime::new());
//! let ctx = EffectContext::new(
//!     Arc::new(Skin::default()),
//!     shared(SeededRandom::from_seed(1)),
//!     time.clone(),
//!     Arc::new(FixedScreen::default()),
//! );
//! let mut effect = ParticleEffect::new(ctx, EffectSettings {
//!     capacity: 8,
//!     color: Color::WHITE,
//!     rect: Rect::new(0.0, 0.0, 200.0, 50.0),
//!     texture: TextureSource::Handle(TextureHandle::new(0)),
//!     size: 16.0,
//!     kind: ParticleKind::Twinkle,
//! });
//!
//! let mut recorder = CommandRecorder::new();
//! effect.draw(&mut recorder);
//! assert_eq!(recorder.command_count(), 8);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod context;
pub mod effect;
pub mod error;
pub mod kind;
pub mod particle;
pub mod spawn;
pub mod theme;

pub use context::EffectContext;
pub use effect::{EffectSettings, ParticleEffect};
pub use error::{ThemeError, ThemeResult};
pub use kind::{Cadence, KindBehavior, ParseKindError, ParticleKind};
pub use particle::{Particle, ParticleSpec, TextureSource};
pub use spawn::{RandomTerm, SpawnLaw, SpawnParams};
pub use theme::{EffectRecord, ElementReader, ThemeDocument};
