//! Randomized spawn parameters.
//!
//! Each particle kind owns a [`SpawnLaw`]: a declarative table of the ranges
//! its lifetime and velocities are drawn from. Draws happen in a fixed order
//! (size, lifetime, vx, vy, vr, then the spawn origin) so a seeded source
//! reproduces an effect exactly.

use encore_core::RandomSource;
use encore_ui::Rect;

/// One randomized scalar: `rand(bound) / divisor + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RandomTerm {
    /// Constant value; consumes no randomness.
    Fixed(f32),
    /// Integer draw in `[0, bound)`, divided and shifted.
    /// A negative divisor flips the range below the offset.
    Uniform {
        /// Exclusive upper bound of the integer draw.
        bound: i32,
        /// Divisor applied to the draw.
        divisor: f32,
        /// Added after division.
        offset: f32,
    },
}

impl RandomTerm {
    /// Shorthand for [`RandomTerm::Uniform`].
    #[must_use]
    pub const fn uniform(bound: i32, divisor: f32, offset: f32) -> Self {
        Self::Uniform {
            bound,
            divisor,
            offset,
        }
    }

    /// Draws a value.
    #[allow(clippy::cast_precision_loss)]
    pub fn sample(&self, random: &mut dyn RandomSource) -> f32 {
        match *self {
            Self::Fixed(value) => value,
            Self::Uniform {
                bound,
                divisor,
                offset,
            } => random.uniform_int(bound) as f32 / divisor + offset,
        }
    }

    /// Smallest value the term can produce.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn min(&self) -> f32 {
        match *self {
            Self::Fixed(value) => value,
            Self::Uniform {
                bound,
                divisor,
                offset,
            } => {
                let top = (bound.max(1) - 1) as f32 / divisor + offset;
                offset.min(top)
            }
        }
    }

    /// Largest value the term can produce.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn max(&self) -> f32 {
        match *self {
            Self::Fixed(value) => value,
            Self::Uniform {
                bound,
                divisor,
                offset,
            } => {
                let top = (bound.max(1) - 1) as f32 / divisor + offset;
                offset.max(top)
            }
        }
    }
}

/// Spawn ranges of one particle kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnLaw {
    /// Lifetime in seconds.
    pub lifetime: RandomTerm,
    /// Horizontal speed in pixels per second.
    pub vx: RandomTerm,
    /// Vertical speed in pixels per second.
    pub vy: RandomTerm,
    /// Adds `|vx|` to `vy`, so fast-drifting flakes also fall faster.
    pub vy_tracks_vx: bool,
    /// Angular speed in revolutions per minute.
    pub vr: RandomTerm,
}

/// Parameters drawn for one new particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnParams {
    /// Base size in pixels.
    pub size: f32,
    /// Max age in seconds.
    pub lifetime: f32,
    /// Horizontal speed.
    pub vx: f32,
    /// Vertical speed.
    pub vy: f32,
    /// Angular speed.
    pub vr: f32,
    /// Size-change period in seconds.
    pub size_rate: f32,
}

impl SpawnLaw {
    /// Draws spawn parameters around an effect's base particle size.
    ///
    /// Size is `rand(⌊base⌋ / 2) + base / 2`; the size-change period is
    /// always twice the lifetime.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn sample(&self, base_size: f32, random: &mut dyn RandomSource) -> SpawnParams {
        let size = random.uniform_int(base_size as i32 / 2) as f32 + base_size / 2.0;
        let lifetime = self.lifetime.sample(random);
        let vx = self.vx.sample(random);
        let mut vy = self.vy.sample(random);
        if self.vy_tracks_vx {
            vy += vx.abs();
        }
        let vr = self.vr.sample(random);

        SpawnParams {
            size,
            lifetime,
            vx,
            vy,
            vr,
            size_rate: lifetime * 2.0,
        }
    }
}

/// Picks a spawn origin inside `region`, inset by a quarter of the particle size.
///
/// The x range is `[region.x − size/4, region.x − size/4 + ⌊region.w − size/4⌋)`,
/// y likewise; a region smaller than the margin collapses to its corner.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn spawn_origin(region: &Rect, size: f32, random: &mut dyn RandomSource) -> (f32, f32) {
    let margin = size / 4.0;
    let w = ((region.width - margin) as i32).max(0);
    let h = ((region.height - margin) as i32).max(0);

    let x = random.uniform_int(w) as f32 + region.x - margin;
    let y = random.uniform_int(h) as f32 + region.y - margin;
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use encore_core::{ConstantRandom, SeededRandom};

    const LAW: SpawnLaw = SpawnLaw {
        lifetime: RandomTerm::uniform(500, 1000.0, 0.5),
        vx: RandomTerm::uniform(1000, -50.0, 10.0),
        vy: RandomTerm::uniform(1000, 50.0, 10.0),
        vy_tracks_vx: true,
        vr: RandomTerm::Fixed(3.0),
    };

    #[test]
    fn test_term_bounds() {
        let term = RandomTerm::uniform(10_000, -50.0, 100.0);
        assert!((term.max() - 100.0).abs() < 1e-4);
        assert!((term.min() - (-99.98)).abs() < 1e-3);

        let fixed = RandomTerm::Fixed(2.5);
        assert_eq!(fixed.min(), 2.5);
        assert_eq!(fixed.max(), 2.5);
    }

    #[test]
    fn test_fixed_term_consumes_no_randomness() {
        let mut a = SeededRandom::from_seed(11);
        let mut b = SeededRandom::from_seed(11);
        assert_eq!(RandomTerm::Fixed(0.0).sample(&mut a), 0.0);
        assert_eq!(a.uniform_int(1_000_000), b.uniform_int(1_000_000));
    }

    #[test]
    fn test_sample_at_lower_end() {
        let mut random = ConstantRandom::new(0.0);
        let params = LAW.sample(10.0, &mut random);

        assert_eq!(params.size, 5.0);
        assert_eq!(params.lifetime, 0.5);
        assert_eq!(params.vx, 10.0);
        // vy tracks |vx|
        assert_eq!(params.vy, 20.0);
        assert_eq!(params.vr, 3.0);
        assert_eq!(params.size_rate, 1.0);
    }

    #[test]
    fn test_sample_stays_in_range() {
        let mut random = SeededRandom::from_seed(5);
        for _ in 0..500 {
            let params = LAW.sample(21.0, &mut random);
            assert!(params.size >= 10.5 && params.size < 21.0);
            assert!(params.lifetime >= LAW.lifetime.min() && params.lifetime <= LAW.lifetime.max());
            assert!(params.vx >= LAW.vx.min() && params.vx <= LAW.vx.max());
            assert!(params.vy >= 10.0 + params.vx.abs());
        }
    }

    #[test]
    fn test_spawn_origin_margin() {
        let region = Rect::new(100.0, 50.0, 40.0, 20.0);
        let mut random = SeededRandom::from_seed(8);
        for _ in 0..200 {
            let (x, y) = spawn_origin(&region, 8.0, &mut random);
            assert!(x >= 98.0 && x < 98.0 + 38.0);
            assert!(y >= 48.0 && y < 48.0 + 18.0);
        }
    }

    #[test]
    fn test_spawn_origin_collapses_small_region() {
        let region = Rect::new(10.0, 10.0, 1.0, 1.0);
        let mut random = ConstantRandom::new(0.9);
        assert_eq!(spawn_origin(&region, 40.0, &mut random), (0.0, 0.0));
    }
}
