//! Animation keyframes for the particle overlays
//!
//! Definitions are process-wide and built once on first use. Sampling follows
//! the usual keyframe rules: every property is interpolated independently
//! between the nearest frames that set it, and a property missing from the
//! 0% or 100% frame falls back to the element's own value there.

use std::sync::LazyLock;

/// Vertical length, resolved against the viewport height in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    Px(f32),
    /// Percent of the viewport height.
    Vh(f32),
}

impl Length {
    pub fn resolve(self, viewport_px: f32) -> f32 {
        match self {
            Length::Px(px) => px,
            Length::Vh(vh) => vh / 100.0 * viewport_px,
        }
    }
}

/// Timing function applied within each keyframe interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Timing {
    Linear,
    EaseInOut,
}

impl Timing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Timing::Linear => t,
            Timing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
        }
    }
}

/// Evaluate a CSS cubic-bezier easing curve at `x`.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    let coord = |t: f32, p1: f32, p2: f32| {
        let u = 1.0 - t;
        3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
    };

    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    let mut t = x;
    for _ in 0..32 {
        let cx = coord(t, x1, x2);
        if (cx - x).abs() < 1e-5 {
            break;
        }
        if cx < x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) / 2.0;
    }
    coord(t, y1, y2)
}

/// One keyframe; `None` leaves the property to neighbouring frames.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Keyframe {
    /// Position in the cycle, `0.0..=1.0`.
    pub offset: f32,
    pub translate_y: Option<Length>,
    pub rotate: Option<f32>,
    pub scale: Option<f32>,
    pub opacity: Option<f32>,
}

impl Keyframe {
    fn at(offset: f32) -> Self {
        Self {
            offset,
            ..Self::default()
        }
    }

    fn translate_y(mut self, length: Length) -> Self {
        self.translate_y = Some(length);
        self
    }

    fn rotate(mut self, degrees: f32) -> Self {
        self.rotate = Some(degrees);
        self
    }

    fn scale(mut self, factor: f32) -> Self {
        self.scale = Some(factor);
        self
    }

    fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }
}

/// Animated style values at one point in time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStyle {
    pub translate_y_px: f32,
    pub rotate_deg: f32,
    pub scale: f32,
    pub opacity: f32,
}

impl FrameStyle {
    /// Style of an element with no animation applied.
    pub fn base(opacity: f32) -> Self {
        Self {
            translate_y_px: 0.0,
            rotate_deg: 0.0,
            scale: 1.0,
            opacity,
        }
    }
}

/// A named keyframe animation
#[derive(Clone, Debug, PartialEq)]
pub struct Keyframes {
    pub name: &'static str,
    pub timing: Timing,
    pub frames: Vec<Keyframe>,
}

impl Keyframes {
    /// Sample the animation at `progress` through the cycle.
    pub fn sample(&self, progress: f32, viewport_px: f32, base: FrameStyle) -> FrameStyle {
        let progress = progress.clamp(0.0, 1.0);

        FrameStyle {
            translate_y_px: self.track(progress, base.translate_y_px, &|f: &Keyframe| {
                f.translate_y.map(|l| l.resolve(viewport_px))
            }),
            rotate_deg: self.track(progress, base.rotate_deg, &|f: &Keyframe| f.rotate),
            scale: self.track(progress, base.scale, &|f: &Keyframe| f.scale),
            opacity: self.track(progress, base.opacity, &|f: &Keyframe| f.opacity),
        }
    }

    fn track(&self, progress: f32, fallback: f32, pick: &dyn Fn(&Keyframe) -> Option<f32>) -> f32 {
        let mut points: Vec<(f32, f32)> = self
            .frames
            .iter()
            .filter_map(|f| pick(f).map(|v| (f.offset, v)))
            .collect();

        if points.first().is_none_or(|&(offset, _)| offset > 0.0) {
            points.insert(0, (0.0, fallback));
        }
        if points.last().is_none_or(|&(offset, _)| offset < 1.0) {
            points.push((1.0, fallback));
        }

        for pair in points.windows(2) {
            let ((start, from), (end, to)) = (pair[0], pair[1]);
            if progress <= end {
                let span = end - start;
                let local = if span <= f32::EPSILON {
                    1.0
                } else {
                    (progress - start) / span
                };
                return from + (to - from) * self.timing.apply(local);
            }
        }
        points.last().map_or(fallback, |&(_, v)| v)
    }
}

/// Drops fall the full viewport, fading in then partly out.
pub static RAIN: LazyLock<Keyframes> = LazyLock::new(|| Keyframes {
    name: "rain",
    timing: Timing::Linear,
    frames: vec![
        Keyframe::at(0.0).translate_y(Length::Px(-20.0)).opacity(0.0),
        Keyframe::at(0.5).opacity(1.0),
        Keyframe::at(1.0).translate_y(Length::Vh(100.0)).opacity(0.3),
    ],
});

/// Flakes fall and spin one full turn.
pub static SNOW: LazyLock<Keyframes> = LazyLock::new(|| Keyframes {
    name: "snow",
    timing: Timing::Linear,
    frames: vec![
        Keyframe::at(0.0)
            .translate_y(Length::Px(-10.0))
            .rotate(0.0)
            .opacity(0.0),
        Keyframe::at(0.5).opacity(1.0),
        Keyframe::at(1.0)
            .translate_y(Length::Vh(100.0))
            .rotate(360.0)
            .opacity(0.3),
    ],
});

/// Stars pulse in brightness and size.
pub static TWINKLE: LazyLock<Keyframes> = LazyLock::new(|| Keyframes {
    name: "twinkle",
    timing: Timing::EaseInOut,
    frames: vec![
        Keyframe::at(0.0).opacity(0.2).scale(0.8),
        Keyframe::at(0.5).opacity(1.0).scale(1.2),
        Keyframe::at(1.0).opacity(0.2).scale(0.8),
    ],
});
