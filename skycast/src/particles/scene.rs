//! The page scene behind the screens
//!
//! Holds the page background, the foreground and accent overrides, at most one
//! particle overlay, and the stylesheet of registered keyframes. The scene
//! clock advances on every tick; overlays sample their animation from it.

use std::time::Duration;

use rand::Rng;
use tracing::debug;

use super::{Keyframes, Overlay, ParticleKind, generate};
use crate::theme::{Background, LIGHT_TEXT, Rgb, Theme};

/// Registered keyframe animations.
///
/// Survives `clear_effects`: once an animation is registered it stays.
#[derive(Clone, Debug, Default)]
pub struct Stylesheet {
    rules: Vec<&'static Keyframes>,
}

impl Stylesheet {
    /// Register `keyframes`; returns `false` and does nothing when a rule with
    /// the same name already exists.
    pub fn register(&mut self, keyframes: &'static Keyframes) -> bool {
        if self.contains(keyframes.name) {
            return false;
        }
        self.rules.push(keyframes);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.iter().any(|k| k.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&'static Keyframes> {
        self.rules.iter().copied().find(|k| k.name == name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
pub struct Scene {
    overlay: Option<Overlay>,
    stylesheet: Stylesheet,
    background: Option<Background>,
    foreground: Option<Rgb>,
    accent: Option<Rgb>,
    elapsed: Duration,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove any overlay and reset the foreground override.
    pub fn clear_effects(&mut self) {
        if let Some(overlay) = self.overlay.take() {
            debug!(overlay = overlay.class_name(), "Removed overlay");
        }
        self.foreground = None;
    }

    /// Replace the overlay with a fresh one for `kind`.
    ///
    /// Returns whether an overlay was created.
    pub fn apply(&mut self, kind: ParticleKind, rng: &mut impl Rng) -> bool {
        self.clear_effects();
        let Some(overlay) = generate(kind, rng) else {
            return false;
        };
        for keyframes in overlay.animations() {
            self.stylesheet.register(keyframes);
        }
        debug!(
            overlay = overlay.class_name(),
            elements = overlay.elements.len(),
            "Created overlay"
        );
        self.elapsed = Duration::ZERO;
        self.overlay = Some(overlay);
        true
    }

    /// Apply every scene-level part of a theme.
    pub fn apply_theme(&mut self, theme: &Theme, rng: &mut impl Rng) {
        self.apply(theme.particle, rng);
        self.background = Some(theme.background);
        self.accent = Some(theme.card().accent);
        if theme.light_text {
            self.foreground = Some(LIGHT_TEXT);
        }
    }

    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn stylesheet(&self) -> &Stylesheet {
        &self.stylesheet
    }

    pub fn background(&self) -> Option<Background> {
        self.background
    }

    pub fn foreground(&self) -> Option<Rgb> {
        self.foreground
    }

    /// Band accent of the last applied theme. Not reset by `clear_effects`.
    pub fn accent(&self) -> Option<Rgb> {
        self.accent
    }

    /// Time since the current overlay was created.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// An overlay with moving elements needs periodic redraws.
    pub fn is_animated(&self) -> bool {
        self.overlay.as_ref().is_some_and(Overlay::is_animated)
    }
}
