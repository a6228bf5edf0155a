//! A single simulated particle.
//!
//! A particle owns a stopwatch and derives everything else from it: each
//! `update` reads the elapsed time and applies its kind's alpha, motion and
//! size laws. Pausing stops the stopwatch, so a paused particle is frozen in
//! place until resumed.

use crate::kind::{MotionFrame, ParticleKind, Velocity};
use encore_core::{RandomSource, Stopwatch, TimeSource};
use encore_ui::{Color, DrawBackend, Rect, SkinResolver, TextureHandle};
use std::sync::Arc;

/// Where a particle's texture comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureSource {
    /// Skin texture name, resolved on every draw.
    Named(Arc<str>),
    /// Texture already resolved by the host.
    Handle(TextureHandle),
}

impl TextureSource {
    /// Resolves the texture against a skin.
    #[must_use]
    pub fn resolve(&self, skin: &dyn SkinResolver) -> TextureHandle {
        match self {
            Self::Named(name) => skin.texture(name),
            Self::Handle(handle) => *handle,
        }
    }
}

impl Default for TextureSource {
    fn default() -> Self {
        Self::Handle(TextureHandle::INVALID)
    }
}

/// Spawn-time parameters of a particle.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleSpec {
    /// Behavior family.
    pub kind: ParticleKind,
    /// Texture to draw with.
    pub texture: TextureSource,
    /// Base color.
    pub color: Color,
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Draw depth.
    pub z: f32,
    /// Side length in pixels.
    pub size: f32,
    /// Lifetime in seconds; 0 never expires.
    pub max_age: f32,
    /// Horizontal speed in pixels per second.
    pub vx: f32,
    /// Vertical speed in pixels per second.
    pub vy: f32,
    /// Angular speed in revolutions per minute.
    pub vr: f32,
    /// Size-change period in seconds; 0 keeps the size constant.
    pub size_rate: f32,
}

/// One particle of an effect.
#[derive(Debug)]
pub struct Particle {
    kind: ParticleKind,
    texture: TextureSource,
    /// Top-left corner of the base-size square; motion laws move this.
    position: (f32, f32),
    /// Drawn bounds: the current size centered on the base-size square.
    rect: Rect,
    base_size: f32,
    color: Color,
    alpha: f32,
    secondary_alpha: f32,
    max_age: f32,
    age: f32,
    velocity: Velocity,
    vr: f32,
    rotation_offset: f32,
    size_rate: f32,
    last_time: f32,
    clock: Stopwatch,
    paused: bool,
}

impl Particle {
    /// Creates a particle. Its clock starts on the first [`Particle::update`].
    ///
    /// Draws the rotation offset from `random`. The particle is drawn
    /// unrotated until an update with non-zero angular speed applies it.
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(spec: ParticleSpec, random: &mut dyn RandomSource, time: Arc<dyn TimeSource>) -> Self {
        let rotation_offset = (random.uniform_f64() * 360.0) as f32;
        let rect = Rect::square(spec.x, spec.y, spec.size, spec.z);

        Self {
            kind: spec.kind,
            texture: spec.texture,
            position: (spec.x, spec.y),
            rect,
            base_size: spec.size,
            color: spec.color,
            alpha: 1.0,
            secondary_alpha: 1.0,
            max_age: spec.max_age,
            age: 0.0,
            velocity: Velocity {
                vx: spec.vx,
                vy: spec.vy,
            },
            vr: spec.vr,
            rotation_offset,
            size_rate: spec.size_rate,
            last_time: 0.0,
            clock: Stopwatch::new(time),
            paused: false,
        }
    }

    /// Advances the particle to the current clock time.
    ///
    /// Expired particles are left untouched.
    pub fn update(&mut self, render_height: f32) {
        if !self.is_alive() {
            return;
        }
        if !self.paused {
            self.clock.start();
        }

        let current_time = self.clock.elapsed_secs();
        let frame = MotionFrame {
            current_time,
            time_delta: current_time - self.last_time,
            render_height,
        };
        self.age = current_time;

        let behavior = self.kind.behavior();
        if self.max_age > 0.0 {
            self.alpha = (behavior.alpha)(self.age, self.max_age);
        }

        self.position = (behavior.motion)(self.position, self.velocity, self.base_size, &frame);
        let size = if self.size_rate == 0.0 {
            self.rect.width
        } else {
            (behavior.size)(current_time, self.size_rate, self.base_size)
        };
        self.place(size);

        if self.vr != 0.0 {
            let revolutions = current_time * self.vr / 60.0;
            self.rect.rotation = self.rotation_offset + 360.0 * (revolutions - revolutions.floor());
        }

        self.last_time = current_time;
    }

    fn place(&mut self, size: f32) {
        let mut bounds = Rect::square(self.position.0, self.position.1, self.base_size, self.rect.z);
        bounds.resize_centered(size);
        bounds.rotation = self.rect.rotation;
        self.rect = bounds;
    }

    /// Freezes the particle's clock.
    pub fn pause(&mut self) {
        self.paused = true;
        self.clock.stop();
    }

    /// Restarts the particle's clock where it stopped.
    pub fn resume(&mut self) {
        self.paused = false;
        self.clock.start();
    }

    /// Whether the particle is paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Draws the particle as one textured quad.
    pub fn draw(&self, backend: &mut dyn DrawBackend, skin: &dyn SkinResolver) {
        let texture = self.texture.resolve(skin);
        let color = self
            .color
            .with_alpha(self.color.a * self.secondary_alpha * self.alpha);
        backend.draw_textured_quad(texture, &self.rect, color);
    }

    /// `age < max_age`, or always for immortal particles.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.age < self.max_age || self.max_age == 0.0
    }

    /// Left edge of the base-size square.
    #[must_use]
    pub fn x(&self) -> f32 {
        self.position.0
    }

    /// Top edge of the base-size square.
    #[must_use]
    pub fn y(&self) -> f32 {
        self.position.1
    }

    /// Moves the particle, keeping its current size.
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.position = (x, y);
        self.place(self.rect.width);
    }

    /// Current side length.
    #[must_use]
    pub fn size(&self) -> f32 {
        self.rect.width
    }

    /// Side length at spawn.
    #[must_use]
    pub fn base_size(&self) -> f32 {
        self.base_size
    }

    /// Current alpha multiplier.
    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Overrides the alpha multiplier until the next update.
    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }

    /// Alpha imposed by the owning effect.
    #[must_use]
    pub fn secondary_alpha(&self) -> f32 {
        self.secondary_alpha
    }

    /// Sets the alpha imposed by the owning effect.
    pub fn set_secondary_alpha(&mut self, alpha: f32) {
        self.secondary_alpha = alpha;
    }

    /// Base color.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Replaces the base color.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Seconds since the clock started, as of the last update.
    #[must_use]
    pub fn age(&self) -> f32 {
        self.age
    }

    /// Lifetime in seconds.
    #[must_use]
    pub fn max_age(&self) -> f32 {
        self.max_age
    }

    /// Current bounds, depth and rotation.
    #[must_use]
    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    /// Rotation in degrees.
    #[must_use]
    pub fn angle(&self) -> f32 {
        self.rect.rotation
    }

    /// Behavior family.
    #[must_use]
    pub fn kind(&self) -> ParticleKind {
        self.kind
    }

    /// Texture source.
    #[must_use]
    pub fn texture(&self) -> &TextureSource {
        &self.texture
    }
}
