//! Particle kinds and their behavior laws.
//!
//! Every kind maps to one static [`KindBehavior`] row. The laws are plain
//! functions of time and spawn parameters, so a particle's appearance at any
//! instant depends only on its age and what it was spawned with.

use crate::spawn::{RandomTerm, SpawnLaw};
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI, TAU};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Visual behavior family of a particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Short sparkles that fly outward and fade.
    #[default]
    Twinkle,
    /// Slow stars released in bursts.
    Star,
    /// Swaying flakes that settle at the bottom of the screen.
    Snow,
    /// Fast sparks rising from a hit.
    Flare,
    /// Stationary spinning star shown on perfect notes.
    PerfNoteStar,
}

impl ParticleKind {
    /// All kinds in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Twinkle,
        Self::Star,
        Self::Snow,
        Self::Flare,
        Self::PerfNoteStar,
    ];

    /// Name used in theme files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Twinkle => "Twinkle",
            Self::Star => "Star",
            Self::Snow => "Snow",
            Self::Flare => "Flare",
            Self::PerfNoteStar => "PerfNoteStar",
        }
    }

    /// The behavior row of this kind.
    #[must_use]
    pub fn behavior(self) -> &'static KindBehavior {
        match self {
            Self::Twinkle => &TWINKLE,
            Self::Star => &STAR,
            Self::Snow => &SNOW,
            Self::Flare => &FLARE,
            Self::PerfNoteStar => &PERF_NOTE_STAR,
        }
    }
}

impl fmt::Display for ParticleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown particle kind name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown particle kind: {0}")]
pub struct ParseKindError(pub String);

impl FromStr for ParticleKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ParseKindError(s.to_owned()))
    }
}

/// Particle velocity in pixels per second.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocity {
    /// Horizontal speed.
    pub vx: f32,
    /// Vertical speed.
    pub vy: f32,
}

/// Per-update inputs to a motion law.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionFrame {
    /// Seconds since the particle's clock started.
    pub current_time: f32,
    /// Seconds since the previous update.
    pub time_delta: f32,
    /// Height of the render surface.
    pub render_height: f32,
}

/// How an effect admits new particles of a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// Fill the pool whenever the spawn interval has passed.
    Burst,
    /// One particle per `lifetime / capacity` seconds.
    Trickle,
    /// Refill the pool on every update.
    Continuous,
}

/// Alpha law: `(age, max_age) -> alpha`.
pub type AlphaLaw = fn(f32, f32) -> f32;
/// Motion law: `(position, velocity, base_size, frame) -> position`.
pub type MotionLaw = fn((f32, f32), Velocity, f32, &MotionFrame) -> (f32, f32);
/// Size law: `(time, size_rate, base_size) -> size`.
pub type SizeLaw = fn(f32, f32, f32) -> f32;

/// Static behavior of one particle kind.
#[derive(Debug, Clone, Copy)]
pub struct KindBehavior {
    /// Alpha over lifetime.
    pub alpha: AlphaLaw,
    /// Position step.
    pub motion: MotionLaw,
    /// Size over time.
    pub size: SizeLaw,
    /// Spawn admission.
    pub cadence: Cadence,
    /// Spawn parameter ranges.
    pub spawn: SpawnLaw,
}

/// `sqrt((sin(phase·2π − π/2) + 1) / 2)`: 0 at phase 0, 1 at phase ½.
#[must_use]
pub fn shimmer(phase: f32) -> f32 {
    ((phase.mul_add(TAU, -FRAC_PI_2).sin() + 1.0) / 2.0).sqrt()
}

/// Fades from 1 to 0 over the lifetime.
#[must_use]
pub fn linear_fade(age: f32, max_age: f32) -> f32 {
    1.0 - age / max_age
}

/// Fades in, peaks at half the lifetime and fades out.
#[must_use]
pub fn shimmer_fade(age: f32, max_age: f32) -> f32 {
    shimmer(age / max_age)
}

/// Straight-line motion.
#[must_use]
pub fn drift(position: (f32, f32), velocity: Velocity, _base_size: f32, frame: &MotionFrame) -> (f32, f32) {
    (
        velocity.vx.mul_add(frame.time_delta, position.0),
        velocity.vy.mul_add(frame.time_delta, position.1),
    )
}

/// Swaying fall that stops at `render_height − base_size·0.4`.
#[must_use]
pub fn snowfall(position: (f32, f32), velocity: Velocity, base_size: f32, frame: &MotionFrame) -> (f32, f32) {
    let floor = base_size.mul_add(-0.4, frame.render_height);
    let (mut x, mut y) = position;
    if y < floor {
        let sway = if velocity.vx == 0.0 {
            0.0
        } else {
            (frame.current_time / velocity.vx * PI).sin()
        };
        x += velocity.vx * frame.time_delta * (0.5 + sway);
        y += velocity.vy * frame.time_delta * (sway * sway / 2.0 + 0.5);
        y = y.min(floor);
    }
    (x, y)
}

/// Shrinks from the base size to 0 over one size period.
#[must_use]
pub fn linear_shrink(time: f32, size_rate: f32, base_size: f32) -> f32 {
    base_size * (1.0 - time / size_rate)
}

/// Grows and shrinks with the same curve as [`shimmer_fade`].
#[must_use]
pub fn shimmer_size(time: f32, size_rate: f32, base_size: f32) -> f32 {
    base_size * shimmer(time / size_rate)
}

static TWINKLE: KindBehavior = KindBehavior {
    alpha: linear_fade,
    motion: drift,
    size: linear_shrink,
    cadence: Cadence::Continuous,
    spawn: SpawnLaw {
        lifetime: RandomTerm::uniform(500, 1000.0, 0.5),
        vx: RandomTerm::uniform(10_000, -50.0, 100.0),
        vy: RandomTerm::uniform(10_000, -50.0, 100.0),
        vy_tracks_vx: false,
        vr: RandomTerm::uniform(500, -100.0, 2.5),
    },
};

static STAR: KindBehavior = KindBehavior {
    alpha: linear_fade,
    motion: drift,
    size: linear_shrink,
    cadence: Cadence::Burst,
    spawn: SpawnLaw {
        lifetime: RandomTerm::uniform(1000, 500.0, 0.2),
        vx: RandomTerm::uniform(1000, -50.0, 10.0),
        vy: RandomTerm::uniform(1000, -50.0, 10.0),
        vy_tracks_vx: false,
        vr: RandomTerm::uniform(500, -100.0, 2.5),
    },
};

static SNOW: KindBehavior = KindBehavior {
    alpha: shimmer_fade,
    motion: snowfall,
    size: shimmer_size,
    cadence: Cadence::Trickle,
    spawn: SpawnLaw {
        lifetime: RandomTerm::uniform(5000, 50.0, 10.0),
        vx: RandomTerm::uniform(1000, -50.0, 10.0),
        vy: RandomTerm::uniform(1000, 50.0, 10.0),
        vy_tracks_vx: true,
        vr: RandomTerm::uniform(200, -50.0, 2.0),
    },
};

static FLARE: KindBehavior = KindBehavior {
    alpha: linear_fade,
    motion: drift,
    size: linear_shrink,
    cadence: Cadence::Continuous,
    spawn: SpawnLaw {
        lifetime: RandomTerm::uniform(500, 1000.0, 0.1),
        vx: RandomTerm::uniform(2000, -50.0, 0.0),
        vy: RandomTerm::uniform(2000, -50.0, 20.0),
        vy_tracks_vx: false,
        vr: RandomTerm::uniform(2000, -50.0, 20.0),
    },
};

static PERF_NOTE_STAR: KindBehavior = KindBehavior {
    alpha: linear_fade,
    motion: drift,
    size: linear_shrink,
    cadence: Cadence::Continuous,
    spawn: SpawnLaw {
        lifetime: RandomTerm::uniform(1000, 500.0, 1.2),
        vx: RandomTerm::Fixed(0.0),
        vy: RandomTerm::Fixed(0.0),
        vy_tracks_vx: false,
        vr: RandomTerm::uniform(500, 50.0, 10.0),
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn frame(current_time: f32, time_delta: f32, render_height: f32) -> MotionFrame {
        MotionFrame {
            current_time,
            time_delta,
            render_height,
        }
    }

    #[test]
    fn test_kind_names_round_trip() {
        for kind in ParticleKind::ALL {
            assert_eq!(kind.to_string().parse::<ParticleKind>(), Ok(kind));
        }
        assert_eq!(
            "Rain".parse::<ParticleKind>(),
            Err(ParseKindError("Rain".to_owned()))
        );
    }

    #[test]
    fn test_alpha_at_spawn() {
        for kind in ParticleKind::ALL {
            let alpha = (kind.behavior().alpha)(0.0, 2.0);
            let expected = if kind == ParticleKind::Snow { 0.0 } else { 1.0 };
            assert!(approx(alpha, expected), "{kind}: {alpha}");
        }
    }

    #[test]
    fn test_linear_fade() {
        assert!(approx(linear_fade(1.0, 4.0), 0.75));
        assert!(approx(linear_fade(4.0, 4.0), 0.0));
    }

    #[test]
    fn test_shimmer_fade_peaks_mid_life() {
        assert!(approx(shimmer_fade(5.0, 10.0), 1.0));
        assert!(approx(shimmer_fade(10.0, 10.0), 0.0));
        assert!(approx(shimmer_fade(2.5, 10.0), 0.5_f32.sqrt()));
    }

    #[test]
    fn test_drift() {
        let velocity = Velocity { vx: 10.0, vy: -20.0 };
        let next = drift((1.0, 2.0), velocity, 8.0, &frame(1.0, 0.5, 100.0));
        assert!(approx(next.0, 6.0));
        assert!(approx(next.1, -8.0));
    }

    #[test]
    fn test_snowfall_without_sway() {
        let velocity = Velocity { vx: 0.0, vy: 40.0 };
        let next = snowfall((10.0, 0.0), velocity, 10.0, &frame(1.0, 0.5, 100.0));
        assert!(approx(next.0, 10.0));
        assert!(approx(next.1, 10.0));
    }

    #[test]
    fn test_snowfall_clamps_to_floor() {
        let velocity = Velocity { vx: 3.0, vy: 500.0 };
        let next = snowfall((0.0, 90.0), velocity, 10.0, &frame(0.7, 1.0, 100.0));
        assert_eq!(next.1, 96.0);

        // Settled flakes stay put.
        let settled = snowfall(next, velocity, 10.0, &frame(1.7, 1.0, 100.0));
        assert_eq!(settled, next);
    }

    #[test]
    fn test_size_laws() {
        assert!(approx(linear_shrink(0.0, 2.0, 10.0), 10.0));
        assert!(approx(linear_shrink(1.0, 2.0, 10.0), 5.0));
        assert!(approx(shimmer_size(0.0, 2.0, 10.0), 0.0));
        assert!(approx(shimmer_size(1.0, 2.0, 10.0), 10.0));
    }

    #[test]
    fn test_cadences() {
        assert_eq!(ParticleKind::Star.behavior().cadence, Cadence::Burst);
        assert_eq!(ParticleKind::Snow.behavior().cadence, Cadence::Trickle);
        for kind in [ParticleKind::Twinkle, ParticleKind::Flare, ParticleKind::PerfNoteStar] {
            assert_eq!(kind.behavior().cadence, Cadence::Continuous);
        }
    }

    #[test]
    fn test_spawn_tables() {
        let snow = ParticleKind::Snow.behavior().spawn;
        assert!(snow.vy_tracks_vx);
        assert!(approx(snow.lifetime.min(), 10.0));
        assert!(approx(snow.lifetime.max(), 109.98));

        let star = ParticleKind::PerfNoteStar.behavior().spawn;
        assert_eq!(star.vx, RandomTerm::Fixed(0.0));
        assert!(approx(star.vr.min(), 10.0));
    }

    #[test]
    fn test_spawn_table_extremes() {
        use encore_core::ConstantRandom;

        // (kind, [size, lifetime, vx, vy, vr] at the low end, same at the high end)
        let rows: [(ParticleKind, [f32; 5], [f32; 5]); 5] = [
            (ParticleKind::Twinkle, [5.0, 0.5, 100.0, 100.0, 2.5], [9.0, 0.999, -99.98, -99.98, -2.49]),
            (ParticleKind::Star, [5.0, 0.2, 10.0, 10.0, 2.5], [9.0, 2.198, -9.98, -9.98, -2.49]),
            (ParticleKind::Snow, [5.0, 10.0, 10.0, 20.0, 2.0], [9.0, 109.98, -9.98, 39.96, -1.98]),
            (ParticleKind::Flare, [5.0, 0.1, 0.0, 20.0, 20.0], [9.0, 0.599, -39.98, -19.98, -19.98]),
            (ParticleKind::PerfNoteStar, [5.0, 1.2, 0.0, 0.0, 10.0], [9.0, 3.198, 0.0, 0.0, 19.98]),
        ];
        assert_eq!(rows.len(), ParticleKind::ALL.len());

        for (kind, low, high) in rows {
            for (fraction, expected) in [(0.0, low), (1.0, high)] {
                let params = kind.behavior().spawn.sample(10.0, &mut ConstantRandom::new(fraction));
                let actual = [params.size, params.lifetime, params.vx, params.vy, params.vr];
                for (field, (a, e)) in ["size", "lifetime", "vx", "vy", "vr"].iter().zip(actual.iter().zip(expected)) {
                    assert!((a - e).abs() < 1e-3, "{kind} {field} at {fraction}: {a} != {e}");
                }
                assert!(approx(params.size_rate, params.lifetime * 2.0));
            }
        }
    }
}
