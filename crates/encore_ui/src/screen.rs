//! Render target size queries.

/// Size of the surface elements are laid out on.
pub trait ScreenMetrics: Send + Sync {
    /// Render width in pixels.
    fn render_width(&self) -> f32;

    /// Render height in pixels.
    fn render_height(&self) -> f32;
}

/// Screen with a fixed logical resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedScreen {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl FixedScreen {
    /// Creates a screen of the given size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for FixedScreen {
    /// The logical resolution themes are authored against.
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

impl ScreenMetrics for FixedScreen {
    fn render_width(&self) -> f32 {
        self.width
    }

    fn render_height(&self) -> f32 {
        self.height
    }
}
