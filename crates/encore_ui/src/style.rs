//! Colors and per-skin palettes.
//!
//! Themes refer to colors by name ("Snow", "ButtonSelected", ...). A
//! [`Palette`] holds one name table per skin and is loaded once when the
//! theme is, so frame code only ever sees resolved [`Color`] values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Color {
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// Solid black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Solid white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from RGB values (0-1) with full alpha.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Returns a new color with different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Converts to array format.
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[f32; 4]> for Color {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self::rgba(r, g, b, a)
    }
}

impl From<Color> for [f32; 4] {
    fn from(color: Color) -> Self {
        color.to_array()
    }
}

/// Named colors of one skin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkinColors {
    /// Skin name as shown in the options screen.
    pub name: String,
    /// Color name to value.
    #[serde(default)]
    pub colors: BTreeMap<String, Color>,
}

/// Named colors for every skin of a theme.
///
/// ```toml
/// [[skins]]
/// name = "Classic"
/// [skins.colors]
/// Snow = [1.0, 1.0, 1.0, 0.8]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    /// Skins in theme order; the index is the skin index.
    #[serde(default)]
    pub skins: Vec<SkinColors>,
}

impl Palette {
    /// Creates an empty palette.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a palette from TOML.
    ///
    /// # Errors
    ///
    /// Returns the TOML error when the text is not a valid palette.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Looks up a named color in a skin.
    #[must_use]
    pub fn get(&self, name: &str, skin_index: usize) -> Option<Color> {
        self.skins.get(skin_index)?.colors.get(name).copied()
    }

    /// Adds or replaces a named color, creating skins up to `skin_index`.
    pub fn insert(&mut self, skin_index: usize, name: impl Into<String>, color: Color) {
        if self.skins.len() <= skin_index {
            self.skins.resize_with(skin_index + 1, SkinColors::default);
        }
        self.skins[skin_index].colors.insert(name.into(), color);
    }

    /// Number of skins.
    #[must_use]
    pub fn skin_count(&self) -> usize {
        self.skins.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_with_alpha() {
        let color = Color::rgb(0.2, 0.4, 0.6).with_alpha(0.5);
        assert_eq!(color.to_array(), [0.2, 0.4, 0.6, 0.5]);
    }

    #[test]
    fn test_palette_insert_and_get() {
        let mut palette = Palette::new();
        palette.insert(1, "Snow", Color::rgba(1.0, 1.0, 1.0, 0.8));

        assert_eq!(palette.skin_count(), 2);
        assert_eq!(palette.get("Snow", 1), Some(Color::rgba(1.0, 1.0, 1.0, 0.8)));
        assert_eq!(palette.get("Snow", 0), None);
        assert_eq!(palette.get("Snow", 5), None);
    }

    #[test]
    fn test_palette_from_toml() {
        let palette = Palette::from_toml_str(
            r#"
            [[skins]]
            name = "Classic"
            [skins.colors]
            Snow = [1.0, 1.0, 1.0, 0.8]
            Star = [1.0, 0.9, 0.2, 1.0]

            [[skins]]
            name = "Night"
            "#,
        )
        .unwrap();

        assert_eq!(palette.skin_count(), 2);
        assert_eq!(palette.skins[0].name, "Classic");
        assert_eq!(palette.get("Star", 0), Some(Color::rgba(1.0, 0.9, 0.2, 1.0)));
        assert_eq!(palette.get("Star", 1), None);
    }

    #[test]
    fn test_palette_rejects_short_color() {
        let result = Palette::from_toml_str(
            r#"
            [[skins]]
            name = "Broken"
            [skins.colors]
            Snow = [1.0, 1.0]
            "#,
        );
        assert!(result.is_err());
    }
}
