//! Layout primitives for menu elements.

/// A rectangle in screen coordinates with draw depth and rotation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// X position (left edge).
    pub x: f32,
    /// Y position (top edge).
    pub y: f32,
    /// Draw depth. Smaller is nearer.
    pub z: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
    /// Rotation around the center, in degrees.
    pub rotation: f32,
}

impl Rect {
    /// A zero-sized rect at the origin.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        width: 0.0,
        height: 0.0,
        rotation: 0.0,
    };

    /// Creates a new unrotated rectangle at depth 0.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            width,
            height,
            rotation: 0.0,
        }
    }

    /// Creates a square of side `size` with its top-left corner at `(x, y)`.
    #[must_use]
    pub const fn square(x: f32, y: f32, size: f32, z: f32) -> Self {
        Self {
            x,
            y,
            z,
            width: size,
            height: size,
            rotation: 0.0,
        }
    }

    /// Returns the same rectangle at another depth.
    #[must_use]
    pub const fn with_depth(mut self, z: f32) -> Self {
        self.z = z;
        self
    }

    /// Returns the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns the center point.
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Returns true if the point is inside the (unrotated) rectangle.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Moves the rectangle by the given offsets.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }

    /// Resizes to a square of side `size`, keeping the center in place.
    pub fn resize_centered(&mut self, size: f32) {
        self.x += (self.width - size) / 2.0;
        self.y += (self.height - size) / 2.0;
        self.width = size;
        self.height = size;
    }
}
