//! Particle emitters.
//!
//! A [`ParticleEffect`] owns a bounded pool of particles spawned inside its
//! rectangle. Each `update` decides whether to spawn (per the kind's
//! cadence), advances the live particles, drops the expired ones and tops
//! the pool up to capacity.

use crate::context::EffectContext;
use crate::error::{ThemeError, ThemeResult};
use crate::kind::{Cadence, ParticleKind};
use crate::particle::{Particle, ParticleSpec, TextureSource};
use crate::spawn::spawn_origin;
use crate::theme::{round2, EffectRecord, ElementReader, ThemeDocument};
use encore_core::Stopwatch;
use encore_ui::{Color, DrawBackend, Rect, TextureHandle};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Construction parameters of an effect built in code.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectSettings {
    /// Maximum number of live particles.
    pub capacity: usize,
    /// Base particle color.
    pub color: Color,
    /// Spawn region and depth.
    pub rect: Rect,
    /// Texture to draw particles with.
    pub texture: TextureSource,
    /// Base particle size in pixels.
    pub size: f32,
    /// Behavior family.
    pub kind: ParticleKind,
}

#[derive(Debug, Clone, Default)]
struct ThemeState {
    name: String,
    texture_name: Option<Arc<str>>,
    color_name: Option<String>,
    loaded: bool,
}

/// A particle emitter and its pool.
#[derive(Debug)]
pub struct ParticleEffect {
    ctx: EffectContext,
    theme: ThemeState,
    texture: TextureHandle,
    color: Color,
    rect: Rect,
    selected: bool,
    visible: bool,
    particles: Vec<Particle>,
    capacity: usize,
    base_size: f32,
    kind: ParticleKind,
    spawn_clock: Stopwatch,
    next_spawn_due: f32,
    alpha: f32,
}

impl ParticleEffect {
    /// Creates an empty effect to be filled by [`ParticleEffect::load_theme`].
    #[must_use]
    pub fn themed(ctx: EffectContext) -> Self {
        let spawn_clock = Stopwatch::new(Arc::clone(&ctx.time));
        Self {
            ctx,
            theme: ThemeState::default(),
            texture: TextureHandle::INVALID,
            color: Color::WHITE,
            rect: Rect::ZERO,
            selected: false,
            visible: true,
            particles: Vec::new(),
            capacity: 0,
            base_size: 0.0,
            kind: ParticleKind::default(),
            spawn_clock,
            next_spawn_due: 0.0,
            alpha: 1.0,
        }
    }

    /// Creates an effect from explicit settings.
    ///
    /// A named texture is only resolved by [`ParticleEffect::load_textures`];
    /// until then particles resolve the name themselves when drawn.
    #[must_use]
    pub fn new(ctx: EffectContext, settings: EffectSettings) -> Self {
        let mut effect = Self::themed(ctx);
        match settings.texture {
            TextureSource::Named(name) => effect.theme.texture_name = Some(name),
            TextureSource::Handle(handle) => effect.texture = handle,
        }
        effect.capacity = settings.capacity;
        effect.color = settings.color;
        effect.rect = settings.rect;
        effect.base_size = settings.size;
        effect.kind = settings.kind;
        effect.particles.reserve(settings.capacity);
        effect
    }

    /// Advances the effect by one frame.
    pub fn update(&mut self) {
        let spawn = if !self.spawn_clock.is_running() {
            self.spawn_clock.start();
            self.next_spawn_due = 0.0;
            true
        } else if self.next_spawn_due < 0.0 {
            true
        } else if self.spawn_clock.elapsed_secs() > self.next_spawn_due {
            self.spawn_clock.restart();
            true
        } else {
            false
        };

        let render_height = self.ctx.screen.render_height();
        self.particles.retain_mut(|particle| {
            particle.update(render_height);
            particle.is_alive()
        });

        let survivors = self.particles.len();
        if spawn {
            self.spawn_particles();
        }
        if self.kind.behavior().cadence == Cadence::Continuous {
            self.next_spawn_due = -1.0;
        }
        for particle in &mut self.particles[survivors..] {
            particle.update(render_height);
        }

        trace!(
            "{} effect '{}': {} live, {} spawned",
            self.kind,
            self.theme.name,
            self.particles.len(),
            self.particles.len() - survivors
        );
    }

    #[allow(clippy::cast_precision_loss)]
    fn spawn_particles(&mut self) {
        let behavior = self.kind.behavior();
        let mut random = self.ctx.random.lock();

        while self.particles.len() < self.capacity {
            let params = behavior.spawn.sample(self.base_size, &mut *random);
            self.next_spawn_due = 0.0;

            let (x, y) = spawn_origin(&self.rect, params.size, &mut *random);
            let texture = match &self.theme.texture_name {
                Some(name) => TextureSource::Named(Arc::clone(name)),
                None => TextureSource::Handle(self.texture),
            };
            let spec = ParticleSpec {
                kind: self.kind,
                texture,
                color: self.color,
                x,
                y,
                z: self.rect.z,
                size: params.size,
                max_age: params.lifetime,
                vx: params.vx,
                vy: params.vy,
                vr: params.vr,
                size_rate: params.size_rate,
            };
            self.particles
                .push(Particle::new(spec, &mut *random, Arc::clone(&self.ctx.time)));

            if behavior.cadence == Cadence::Trickle {
                self.next_spawn_due = params.lifetime / self.capacity as f32;
                break;
            }
        }
    }

    /// Pauses every live particle. The spawn clock keeps running.
    pub fn pause(&mut self) {
        for particle in &mut self.particles {
            particle.pause();
        }
    }

    /// Resumes every live particle.
    pub fn resume(&mut self) {
        for particle in &mut self.particles {
            particle.resume();
        }
    }

    /// Updates, then draws every particle with the effect's alpha applied.
    pub fn draw(&mut self, backend: &mut dyn DrawBackend) {
        self.update();
        let skin = self.ctx.skin.as_ref();
        for particle in &mut self.particles {
            particle.set_secondary_alpha(self.alpha);
            particle.draw(backend, skin);
        }
    }

    /// Drops the resolved texture.
    pub fn unload_textures(&mut self) {
        self.texture = TextureHandle::INVALID;
    }

    /// Resolves the theme's color and texture names through the skin.
    pub fn load_textures(&mut self) {
        let skin = self.ctx.skin.as_ref();
        if let Some(name) = &self.theme.color_name {
            let skin_index = skin.active_skin();
            match skin.color(name, skin_index) {
                Some(color) => self.color = color,
                None => warn!("color '{}' not found in skin {}", name, skin_index),
            }
        }
        if let Some(name) = &self.theme.texture_name {
            self.texture = skin.texture(name);
        }
    }

    /// Unloads and loads textures again, e.g. after a skin change.
    pub fn reload_textures(&mut self) {
        self.unload_textures();
        self.load_textures();
        debug!("reloaded textures of particle effect '{}'", self.theme.name);
    }

    /// Reads the element `<path>/<element>` from a theme.
    ///
    /// Every field is read even after a failure, so the effect keeps whatever
    /// was valid. On success the element name is recorded and textures are
    /// loaded.
    ///
    /// # Errors
    ///
    /// - [`ThemeError::MissingSection`] if the element table does not exist
    /// - [`ThemeError::Incomplete`] naming every missing or malformed field
    /// - [`ThemeError::UnknownColor`] if the named color is not in the palette
    pub fn load_theme(
        &mut self,
        doc: &ThemeDocument,
        path: &str,
        element: &str,
        skin_index: usize,
    ) -> ThemeResult<()> {
        self.theme.loaded = false;
        let result = self.read_element(doc, path, element, skin_index);

        match &result {
            Ok(()) => {
                self.theme.name = element.to_owned();
                self.theme.loaded = true;
                self.load_textures();
                debug!("loaded particle effect '{}' from '{}'", element, path);
            }
            Err(error) => warn!("failed to load particle effect '{}': {}", element, error),
        }
        result
    }

    fn read_element(
        &mut self,
        doc: &ThemeDocument,
        path: &str,
        element: &str,
        skin_index: usize,
    ) -> ThemeResult<()> {
        let element_path = format!("{path}/{element}");
        let table = doc
            .section(&element_path)
            .ok_or_else(|| ThemeError::MissingSection(element_path.clone()))?;
        let mut reader = ElementReader::new(table);

        if let Some(skin) = reader.string("Skin") {
            self.theme.texture_name = (!skin.is_empty()).then(|| Arc::from(skin));
        }
        if let Some(x) = reader.number("X") {
            self.rect.x = x;
        }
        if let Some(y) = reader.number("Y") {
            self.rect.y = y;
        }
        if let Some(z) = reader.number("Z") {
            self.rect.z = z;
        }
        if let Some(w) = reader.number("W") {
            self.rect.width = w;
        }
        if let Some(h) = reader.number("H") {
            self.rect.height = h;
        }

        let mut unknown_color = None;
        if reader.has("Color") {
            if let Some(name) = reader.string("Color") {
                match self.ctx.skin.color(&name, skin_index) {
                    Some(color) => self.color = color,
                    None => unknown_color = Some(name.clone()),
                }
                self.theme.color_name = Some(name);
            }
        } else {
            self.theme.color_name = None;
            let r = reader.number("R");
            let g = reader.number("G");
            let b = reader.number("B");
            let a = reader.number("A");
            if let (Some(r), Some(g), Some(b), Some(a)) = (r, g, b, a) {
                self.color = Color::rgba(r, g, b, a);
            }
        }

        if let Some(kind) = reader.kind("Type") {
            self.kind = kind;
        }
        if let Some(size) = reader.number("Size") {
            self.base_size = size;
        }
        if let Some(capacity) = reader.count("MaxNumber") {
            self.capacity = capacity;
        }

        reader.finish(element)?;
        match unknown_color {
            Some(name) => Err(ThemeError::UnknownColor { name, skin_index }),
            None => Ok(()),
        }
    }

    /// Writes the effect as `<path>/<theme name>`.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::NotLoaded`] unless a theme load succeeded, or
    /// the document error if the element cannot be written.
    #[allow(clippy::cast_possible_truncation)]
    pub fn save_theme(&self, doc: &mut ThemeDocument, path: &str) -> ThemeResult<()> {
        if !self.theme.loaded {
            return Err(ThemeError::NotLoaded);
        }

        let raw = |value: f32| self.theme.color_name.is_none().then(|| round2(value));
        let record = EffectRecord {
            skin: self.theme.texture_name.as_deref().unwrap_or_default().to_owned(),
            x: self.rect.x.round() as i64,
            y: self.rect.y.round() as i64,
            z: round2(self.rect.z),
            w: self.rect.width.round() as i64,
            h: self.rect.height.round() as i64,
            color: self.theme.color_name.clone(),
            r: raw(self.color.r),
            g: raw(self.color.g),
            b: raw(self.color.b),
            a: raw(self.color.a),
            kind: self.kind,
            size: round2(self.base_size),
            max_number: i64::try_from(self.capacity).unwrap_or(i64::MAX),
        };
        doc.write_element(path, &self.theme.name, &record)?;
        debug!("saved particle effect '{}' to '{}'", self.theme.name, path);
        Ok(())
    }

    /// Whether the effect still has work to show: live particles, or a spawn
    /// clock that has not started yet.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        !self.particles.is_empty() || !self.spawn_clock.is_running()
    }

    /// Element name of the loaded theme; empty before a successful load.
    #[must_use]
    pub fn theme_name(&self) -> &str {
        &self.theme.name
    }

    /// Whether the last theme load succeeded.
    #[must_use]
    pub fn is_theme_loaded(&self) -> bool {
        self.theme.loaded
    }

    /// Shifts the spawn region.
    pub fn move_element(&mut self, dx: f32, dy: f32) {
        self.rect.translate(dx, dy);
    }

    /// Grows the spawn region; width and height never drop below 1.
    pub fn resize_element(&mut self, dw: f32, dh: f32) {
        self.rect.width = (self.rect.width + dw).max(1.0);
        self.rect.height = (self.rect.height + dh).max(1.0);
    }

    /// Seconds until the next spawn; negative spawns on every update.
    #[must_use]
    pub fn next_spawn_due(&self) -> f32 {
        self.next_spawn_due
    }

    /// Number of live particles.
    #[must_use]
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Live particles in spawn order.
    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Maximum number of live particles.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Behavior family of spawned particles.
    #[must_use]
    pub fn kind(&self) -> ParticleKind {
        self.kind
    }

    /// Base particle size.
    #[must_use]
    pub fn base_size(&self) -> f32 {
        self.base_size
    }

    /// Spawn region.
    #[must_use]
    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    /// Base particle color.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Resolved texture.
    #[must_use]
    pub fn texture(&self) -> TextureHandle {
        self.texture
    }

    /// Skin texture name, if the effect uses one.
    #[must_use]
    pub fn texture_name(&self) -> Option<&str> {
        self.theme.texture_name.as_deref()
    }

    /// Palette color name, if the effect uses one.
    #[must_use]
    pub fn color_name(&self) -> Option<&str> {
        self.theme.color_name.as_deref()
    }

    /// Alpha applied to every particle on draw.
    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Sets the alpha applied to every particle on draw.
    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }

    /// Whether the effect is shown. Hosts skip drawing hidden effects.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Shows or hides the effect.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Whether the effect is selected in the theme editor.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Selects or deselects the effect.
    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}
