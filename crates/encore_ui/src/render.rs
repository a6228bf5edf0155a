//! Draw seam and command recording.
//!
//! Elements draw through [`DrawBackend`]. [`CommandRecorder`] collects the
//! calls of a frame and expands them into vertices for GPU submission.

use crate::layout::Rect;
use crate::skin::TextureHandle;
use crate::style::Color;

/// Receives draw calls from menu elements.
pub trait DrawBackend {
    /// Draws `texture` stretched over `rect` (rotated by `rect.rotation`), tinted by `color`.
    fn draw_textured_quad(&mut self, texture: TextureHandle, rect: &Rect, color: Color);
}

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Textured quad.
    Texture {
        /// Texture to sample.
        texture: TextureHandle,
        /// Bounds, depth and rotation.
        bounds: Rect,
        /// Tint color.
        color: Color,
    },
}

impl RenderCommand {
    /// Expands the command into four corner vertices (TL, TR, BR, BL),
    /// rotated around the bounds' center.
    #[must_use]
    pub fn quad_vertices(&self) -> [QuadVertex; 4] {
        match self {
            Self::Texture { bounds, color, .. } => {
                let (cx, cy) = bounds.center();
                let (hw, hh) = (bounds.width * 0.5, bounds.height * 0.5);
                let (sin, cos) = bounds.rotation.to_radians().sin_cos();
                let color = color.to_array();
                let corner = |dx: f32, dy: f32, u: f32, v: f32| {
                    QuadVertex::new(
                        cx + dx * cos - dy * sin,
                        cy + dx * sin + dy * cos,
                        bounds.z,
                        u,
                        v,
                        color,
                    )
                };
                [
                    corner(-hw, -hh, 0.0, 0.0),
                    corner(hw, -hh, 1.0, 0.0),
                    corner(hw, hh, 1.0, 1.0),
                    corner(-hw, hh, 0.0, 1.0),
                ]
            }
        }
    }
}

/// Backend that records draw calls for later batching.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    commands: Vec<RenderCommand>,
}

impl CommandRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(256),
        }
    }

    /// Begins a new frame, dropping the previous frame's commands.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
    }

    /// Commands recorded since the last `begin_frame`.
    #[must_use]
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Returns the total command count.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Appends the vertices of every recorded command to `out`.
    ///
    /// Commands using [`TextureHandle::INVALID`] are skipped.
    pub fn write_vertices(&self, out: &mut Vec<QuadVertex>) {
        out.reserve(self.commands.len() * 4);
        for command in &self.commands {
            let RenderCommand::Texture { texture, .. } = command;
            if texture.is_valid() {
                out.extend_from_slice(&command.quad_vertices());
            }
        }
    }
}

impl DrawBackend for CommandRecorder {
    fn draw_textured_quad(&mut self, texture: TextureHandle, rect: &Rect, color: Color) {
        self.commands.push(RenderCommand::Texture {
            texture,
            bounds: *rect,
            color,
        });
    }
}

/// Vertex for quad rendering.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    /// Position (x, y, z).
    pub position: [f32; 3],
    /// UV coordinates.
    pub uv: [f32; 2],
    /// Color (RGBA).
    pub color: [f32; 4],
}

impl QuadVertex {
    /// Creates a new vertex.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32, u: f32, v: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y, z],
            uv: [u, v],
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_recorder_frame() {
        let mut recorder = CommandRecorder::new();
        recorder.draw_textured_quad(TextureHandle::new(1), &Rect::new(0.0, 0.0, 10.0, 10.0), Color::WHITE);
        assert_eq!(recorder.command_count(), 1);

        recorder.begin_frame();
        assert_eq!(recorder.command_count(), 0);
    }

    #[test]
    fn test_unrotated_quad_corners() {
        let command = RenderCommand::Texture {
            texture: TextureHandle::new(1),
            bounds: Rect::square(10.0, 20.0, 4.0, 0.5),
            color: Color::WHITE,
        };
        let [tl, tr, br, bl] = command.quad_vertices();
        assert_eq!(tl.position, [10.0, 20.0, 0.5]);
        assert_eq!(tr.position, [14.0, 20.0, 0.5]);
        assert_eq!(br.position, [14.0, 24.0, 0.5]);
        assert_eq!(bl.position, [10.0, 24.0, 0.5]);
        assert_eq!(br.uv, [1.0, 1.0]);
    }

    #[test]
    fn test_rotated_quad_stays_centered() {
        let mut bounds = Rect::square(0.0, 0.0, 2.0, 0.0);
        bounds.rotation = 90.0;
        let command = RenderCommand::Texture {
            texture: TextureHandle::new(1),
            bounds,
            color: Color::WHITE,
        };
        let [tl, ..] = command.quad_vertices();
        // Top-left corner rotated a quarter turn lands at the top-right.
        assert!(approx(tl.position[0], 2.0));
        assert!(approx(tl.position[1], 0.0));
    }

    #[test]
    fn test_write_vertices_skips_invalid_textures() {
        let mut recorder = CommandRecorder::new();
        let rect = Rect::new(0.0, 0.0, 1.0, 1.0);
        recorder.draw_textured_quad(TextureHandle::new(3), &rect, Color::WHITE);
        recorder.draw_textured_quad(TextureHandle::INVALID, &rect, Color::WHITE);

        let mut vertices = Vec::new();
        recorder.write_vertices(&mut vertices);
        assert_eq!(vertices.len(), 4);

        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 4 * std::mem::size_of::<QuadVertex>());
    }
}
