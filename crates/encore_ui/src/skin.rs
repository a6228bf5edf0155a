//! Skin resolution: texture names to handles, color names to values.

use crate::style::{Color, Palette};
use std::collections::HashMap;

/// Opaque texture handle owned by the drawing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(i32);

impl TextureHandle {
    /// The "no texture" sentinel. Backends draw nothing (or a placeholder) for it.
    pub const INVALID: Self = Self(-1);

    /// Wraps a backend texture id.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns the raw backend id.
    #[must_use]
    pub const fn id(self) -> i32 {
        self.0
    }

    /// Whether this handle refers to a texture.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 >= 0
    }
}

impl Default for TextureHandle {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Resolves theme names against the loaded skin.
pub trait SkinResolver: Send + Sync {
    /// Texture for a skin texture name, or [`TextureHandle::INVALID`].
    fn texture(&self, name: &str) -> TextureHandle;

    /// Palette color for a name in the given skin.
    fn color(&self, name: &str, skin_index: usize) -> Option<Color>;

    /// Skin currently selected by the player.
    fn active_skin(&self) -> usize {
        0
    }
}

/// In-memory skin: texture table plus palette.
#[derive(Debug, Clone, Default)]
pub struct Skin {
    textures: HashMap<String, TextureHandle>,
    palette: Palette,
    active: usize,
}

impl Skin {
    /// Creates a skin with no textures over the given palette.
    #[must_use]
    pub fn new(palette: Palette) -> Self {
        Self {
            textures: HashMap::new(),
            palette,
            active: 0,
        }
    }

    /// Builder form of [`Skin::insert_texture`].
    #[must_use]
    pub fn with_texture(mut self, name: impl Into<String>, handle: TextureHandle) -> Self {
        self.insert_texture(name, handle);
        self
    }

    /// Registers a texture under a skin name.
    pub fn insert_texture(&mut self, name: impl Into<String>, handle: TextureHandle) {
        self.textures.insert(name.into(), handle);
    }

    /// Selects the active skin.
    pub fn set_active_skin(&mut self, skin_index: usize) {
        self.active = skin_index;
    }

    /// The palette backing color lookups.
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Mutable access to the palette.
    pub fn palette_mut(&mut self) -> &mut Palette {
        &mut self.palette
    }
}

impl SkinResolver for Skin {
    fn texture(&self, name: &str) -> TextureHandle {
        match self.textures.get(name) {
            Some(handle) => *handle,
            None => {
                tracing::trace!("skin texture '{}' not found", name);
                TextureHandle::INVALID
            }
        }
    }

    fn color(&self, name: &str, skin_index: usize) -> Option<Color> {
        self.palette.get(name, skin_index)
    }

    fn active_skin(&self) -> usize {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_handle_sentinel() {
        assert!(!TextureHandle::INVALID.is_valid());
        assert!(!TextureHandle::default().is_valid());
        assert!(TextureHandle::new(0).is_valid());
        assert_eq!(TextureHandle::new(12).id(), 12);
    }

    #[test]
    fn test_skin_resolves_textures() {
        let skin = Skin::default().with_texture("Star", TextureHandle::new(4));
        assert_eq!(skin.texture("Star"), TextureHandle::new(4));
        assert_eq!(skin.texture("Missing"), TextureHandle::INVALID);
    }

    #[test]
    fn test_skin_resolves_colors_per_skin() {
        let mut palette = Palette::new();
        palette.insert(0, "Snow", Color::WHITE);
        palette.insert(1, "Snow", Color::BLACK);
        let mut skin = Skin::new(palette);

        assert_eq!(skin.color("Snow", 1), Some(Color::BLACK));
        assert_eq!(skin.active_skin(), 0);
        skin.set_active_skin(1);
        assert_eq!(skin.color("Snow", skin.active_skin()), Some(Color::BLACK));
        assert_eq!(skin.color("Rain", 0), None);
    }

    #[test]
    fn test_palette_edits_are_visible() {
        let mut skin = Skin::default();
        assert_eq!(skin.color("Ember", 0), None);

        skin.palette_mut().insert(0, "Ember", Color::rgb(1.0, 0.4, 0.1));
        assert_eq!(skin.palette().skin_count(), 1);
        assert_eq!(skin.color("Ember", 0), Some(Color::rgb(1.0, 0.4, 0.1)));
    }
}
