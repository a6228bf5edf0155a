//! Collaborators handed to every effect.

use encore_core::{shared, MonotonicTime, SeededRandom, SharedRandom, TimeSource};
use encore_ui::{FixedScreen, ScreenMetrics, SkinResolver};
use std::fmt;
use std::sync::Arc;

/// Skin, randomness, clock and screen shared by the effects of a screen.
///
/// Cloning is cheap; clones share every collaborator.
#[derive(Clone)]
pub struct EffectContext {
    /// Texture and color lookups.
    pub skin: Arc<dyn SkinResolver>,
    /// Spawn randomness.
    pub random: SharedRandom,
    /// Clock for particle and spawn stopwatches.
    pub time: Arc<dyn TimeSource>,
    /// Render surface size.
    pub screen: Arc<dyn ScreenMetrics>,
}

impl EffectContext {
    /// Bundles explicit collaborators.
    #[must_use]
    pub fn new(
        skin: Arc<dyn SkinResolver>,
        random: SharedRandom,
        time: Arc<dyn TimeSource>,
        screen: Arc<dyn ScreenMetrics>,
    ) -> Self {
        Self {
            skin,
            random,
            time,
            screen,
        }
    }

    /// Wall clock, clock-seeded randomness and the default screen size.
    #[must_use]
    pub fn with_defaults(skin: Arc<dyn SkinResolver>) -> Self {
        Self::new(
            skin,
            shared(SeededRandom::from_clock()),
            Arc::new(MonotonicTime::new()),
            Arc::new(FixedScreen::default()),
        )
    }
}

impl fmt::Debug for EffectContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectContext")
            .field("active_skin", &self.skin.active_skin())
            .field("render_width", &self.screen.render_width())
            .field("render_height", &self.screen.render_height())
            .finish_non_exhaustive()
    }
}
