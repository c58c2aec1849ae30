//! Particle effect generators
//!
//! Each generator builds one full-viewport overlay layered behind the
//! content. Element parameters are drawn uniformly from fixed ranges using a
//! caller-supplied RNG, so a seeded [`StdRng`] reproduces the same overlay.

pub mod keyframes;
pub mod scene;

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub use keyframes::{FrameStyle, Keyframes, Length};
pub use scene::{Scene, Stylesheet};

use crate::theme::Rgb;

pub const RAIN_DROPS: usize = 40;
pub const SNOW_FLAKES: usize = 50;
pub const STARS: usize = 100;
pub const FOG_OPACITY: f32 = 0.8;

/// Decorative effect chosen by the presentation mapper.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    #[default]
    None,
    Rain,
    Snow,
    Fog,
    Stars,
}

impl ParticleKind {
    /// Class of the overlay container, `None` when no overlay is created.
    pub fn class_name(self) -> Option<&'static str> {
        match self {
            ParticleKind::None => None,
            ParticleKind::Rain => Some("rain-container"),
            ParticleKind::Snow => Some("snow-container"),
            ParticleKind::Fog => Some("fog-container"),
            ParticleKind::Stars => Some("stars-container"),
        }
    }
}

/// One animated element of an overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Horizontal position, percent of viewport width.
    pub left: f32,
    /// Resting vertical position.
    pub top: Length,
    /// Width in pixels.
    pub size: f32,
    /// Height in pixels.
    pub length: f32,
    /// Seconds per animation cycle.
    pub duration: f32,
    /// Seconds before the first cycle starts.
    pub delay: f32,
    /// Element opacity outside the animation.
    pub opacity: f32,
    pub color: Rgb,
    /// Alpha of the fill colour itself.
    pub fill_alpha: f32,
    pub animation: &'static Keyframes,
}

impl Particle {
    /// Style at `elapsed` since the overlay was created.
    ///
    /// Before the delay has passed the element shows its own base style.
    pub fn style_at(&self, elapsed: Duration, viewport_px: f32) -> FrameStyle {
        let base = FrameStyle::base(self.opacity);
        let running = elapsed.as_secs_f32() - self.delay;
        if running < 0.0 || self.duration <= 0.0 {
            return base;
        }
        let progress = (running / self.duration).fract();
        self.animation.sample(progress, viewport_px, base)
    }

    /// Vertical position of the element's top edge in pixels.
    pub fn y_at(&self, elapsed: Duration, viewport_px: f32) -> f32 {
        self.top.resolve(viewport_px) + self.style_at(elapsed, viewport_px).translate_y_px
    }
}

/// A full-viewport decorative layer.
#[derive(Clone, Debug, PartialEq)]
pub struct Overlay {
    pub kind: ParticleKind,
    pub elements: Vec<Particle>,
    /// Opacity of the whole layer.
    pub opacity: f32,
    /// Stacking order relative to content (`-1` draws behind it).
    pub z_index: i8,
    /// Overlays never receive input.
    pub interactive: bool,
}

impl Overlay {
    fn new(kind: ParticleKind, elements: Vec<Particle>, opacity: f32) -> Self {
        Self {
            kind,
            elements,
            opacity,
            z_index: -1,
            interactive: false,
        }
    }

    pub fn class_name(&self) -> &'static str {
        self.kind.class_name().unwrap_or("")
    }

    /// Keyframes used by the elements, deduplicated by name.
    pub fn animations(&self) -> Vec<&'static Keyframes> {
        let mut out: Vec<&'static Keyframes> = Vec::new();
        for particle in &self.elements {
            if !out.iter().any(|k| k.name == particle.animation.name) {
                out.push(particle.animation);
            }
        }
        out
    }

    pub fn is_animated(&self) -> bool {
        !self.elements.is_empty()
    }
}

/// Build the overlay for `kind`, or `None` for [`ParticleKind::None`].
pub fn generate(kind: ParticleKind, rng: &mut impl Rng) -> Option<Overlay> {
    match kind {
        ParticleKind::None => None,
        ParticleKind::Rain => Some(rain(rng)),
        ParticleKind::Snow => Some(snow(rng)),
        ParticleKind::Fog => Some(fog()),
        ParticleKind::Stars => Some(stars(rng)),
    }
}

pub fn rain(rng: &mut impl Rng) -> Overlay {
    let drops = (0..RAIN_DROPS)
        .map(|_| {
            let size = rng.gen_range(0.5..2.0);
            Particle {
                left: rng.gen_range(0.0..100.0),
                top: Length::Px(-20.0),
                size: 2.0,
                length: 8.0 * size,
                duration: rng.gen_range(0.5..1.5),
                delay: rng.gen_range(0.0..5.0),
                opacity: 1.0,
                color: Rgb(174, 194, 224),
                fill_alpha: 0.6,
                animation: &keyframes::RAIN,
            }
        })
        .collect();
    Overlay::new(ParticleKind::Rain, drops, 1.0)
}

pub fn snow(rng: &mut impl Rng) -> Overlay {
    let flakes = (0..SNOW_FLAKES)
        .map(|_| {
            let left = rng.gen_range(0.0..100.0);
            let size = rng.gen_range(1.0..4.0);
            Particle {
                left,
                top: Length::Px(-10.0),
                size,
                length: size,
                duration: rng.gen_range(3.0..8.0),
                delay: rng.gen_range(0.0..5.0),
                opacity: 0.8,
                color: Rgb(255, 255, 255),
                fill_alpha: 1.0,
                animation: &keyframes::SNOW,
            }
        })
        .collect();
    Overlay::new(ParticleKind::Snow, flakes, 1.0)
}

pub fn stars(rng: &mut impl Rng) -> Overlay {
    let points = (0..STARS)
        .map(|_| {
            let left = rng.gen_range(0.0..100.0);
            let top = rng.gen_range(0.0..100.0);
            let size = rng.gen_range(1.0..3.0);
            Particle {
                left,
                top: Length::Vh(top),
                size,
                length: size,
                duration: rng.gen_range(2.0..5.0),
                delay: 0.0,
                opacity: rng.gen_range(0.5..1.0),
                color: Rgb(255, 255, 255),
                fill_alpha: 1.0,
                animation: &keyframes::TWINKLE,
            }
        })
        .collect();
    Overlay::new(ParticleKind::Stars, points, 1.0)
}

/// Static textured layer with no elements.
pub fn fog() -> Overlay {
    Overlay::new(ParticleKind::Fog, Vec::new(), FOG_OPACITY)
}

/// Random source for the generators; entropy-seeded unless `seed` is given.
pub fn particle_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
