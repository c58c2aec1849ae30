//! Page background and particle overlay
//!
//! Drawn first, underneath every other component. The gradient is sampled
//! per cell; particles are placed in pixel space and mapped to cells, with a
//! terminal row counted as [`CELL_HEIGHT_PX`] pixels.

use ratatui::{Frame, buffer::Buffer, layout::Rect};

use super::Component;
use crate::action::Action;
use crate::particles::{FrameStyle, Overlay, Particle, ParticleKind, Scene};
use crate::theme::{Background, Rgb};

pub const CELL_HEIGHT_PX: f32 = 16.0;
/// Page colour before any result has been themed.
pub const PAGE_BACKGROUND: Rgb = Rgb::hex(0xf5f5f5);

const WHITE: Rgb = Rgb(255, 255, 255);
/// Opacity of the white fog texture inside its layer.
const FOG_TEXTURE_ALPHA: f32 = 0.4;

pub struct BackdropProps<'a> {
    pub scene: &'a Scene,
}

#[derive(Default)]
pub struct Backdrop;

impl Component<Action> for Backdrop {
    type Props<'a> = BackdropProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let scene = props.scene;
        let buf = frame.buffer_mut();
        let background = scene.background();

        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let color = page_color(background, area, x, y);
                buf[(x, y)].set_symbol(" ").set_bg(color.to_color());
            }
        }

        let Some(overlay) = scene.overlay() else {
            return;
        };
        match overlay.kind {
            ParticleKind::Fog => draw_fog(buf, area, background, overlay),
            ParticleKind::None => {}
            _ => draw_particles(buf, area, background, overlay, scene),
        }
    }
}

/// Page colour of the cell at `(x, y)` inside `area`.
pub fn page_color(background: Option<Background>, area: Rect, x: u16, y: u16) -> Rgb {
    match background {
        // rows are doubled so a cell is roughly square
        Some(bg) => bg.gradient().sample_at(
            (x - area.x) as f32 + 0.5,
            ((y - area.y) as f32 + 0.5) * 2.0,
            area.width as f32,
            area.height as f32 * 2.0,
        ),
        None => PAGE_BACKGROUND,
    }
}

fn draw_fog(buf: &mut Buffer, area: Rect, background: Option<Background>, overlay: &Overlay) {
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            let density = fog_density((x - area.x) as u32, (y - area.y) as u32);
            let under = page_color(background, area, x, y);
            let alpha = overlay.opacity * FOG_TEXTURE_ALPHA * density;
            let fogged = WHITE.over(under, alpha);

            let cell = &mut buf[(x, y)];
            cell.set_bg(fogged.to_color());
            if density > 0.7 {
                cell.set_symbol("░").set_fg(WHITE.over(fogged, 0.35).to_color());
            }
        }
    }
}

fn draw_particles(
    buf: &mut Buffer,
    area: Rect,
    background: Option<Background>,
    overlay: &Overlay,
    scene: &Scene,
) {
    let viewport_px = area.height as f32 * CELL_HEIGHT_PX;
    let elapsed = scene.elapsed();

    for particle in &overlay.elements {
        let style = particle.style_at(elapsed, viewport_px);
        let y_px = particle.top.resolve(viewport_px) + style.translate_y_px;
        if y_px < 0.0 || y_px >= viewport_px {
            continue;
        }

        let col = ((particle.left / 100.0) * area.width as f32) as u16;
        let row = (y_px / CELL_HEIGHT_PX) as u16;
        if col >= area.width || row >= area.height {
            continue;
        }

        let alpha = (style.opacity * particle.fill_alpha * overlay.opacity).clamp(0.0, 1.0);
        if alpha < 0.05 {
            continue;
        }

        let (x, y) = (area.x + col, area.y + row);
        let under = page_color(background, area, x, y);
        let fg = particle.color.over(under, alpha);
        buf[(x, y)]
            .set_symbol(glyph(overlay.kind, particle, &style))
            .set_fg(fg.to_color());
    }
}

/// Glyph for a particle at its current animated size.
pub fn glyph(kind: ParticleKind, particle: &Particle, style: &FrameStyle) -> &'static str {
    match kind {
        ParticleKind::Rain if particle.length < 8.0 => "╷",
        ParticleKind::Rain => "│",
        ParticleKind::Snow if particle.size >= 3.0 => "❄",
        ParticleKind::Snow if particle.size >= 2.0 => "•",
        ParticleKind::Snow => "·",
        ParticleKind::Stars => {
            let size = particle.size * style.scale;
            if size >= 2.5 {
                "✦"
            } else if size >= 1.5 {
                "✧"
            } else {
                "·"
            }
        }
        ParticleKind::Fog | ParticleKind::None => " ",
    }
}

/// Smooth, deterministic noise in `[0, 1)` for the fog texture.
///
/// Two octaves of bilinear value noise over an integer hash.
pub fn fog_density(x: u32, y: u32) -> f32 {
    let coarse = value_noise(x as f32 / 12.0, y as f32 / 4.0, 0);
    let fine = value_noise(x as f32 / 5.0, y as f32 / 2.0, 1);
    (coarse * 0.65 + fine * 0.35).clamp(0.0, 0.999)
}

fn value_noise(x: f32, y: f32, octave: u32) -> f32 {
    let (x0, y0) = (x.floor(), y.floor());
    let (fx, fy) = (smooth(x - x0), smooth(y - y0));
    let (ix, iy) = (x0 as u32, y0 as u32);

    let corner = |dx: u32, dy: u32| lattice(ix.wrapping_add(dx), iy.wrapping_add(dy), octave);
    let top = corner(0, 0) + (corner(1, 0) - corner(0, 0)) * fx;
    let bottom = corner(0, 1) + (corner(1, 1) - corner(0, 1)) * fx;
    top + (bottom - top) * fy
}

fn smooth(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

fn lattice(x: u32, y: u32, octave: u32) -> f32 {
    let mut h = x
        .wrapping_mul(0x27d4_eb2d)
        .wrapping_add(y.wrapping_mul(0x1656_67b1))
        .wrapping_add(octave.wrapping_mul(0x9e37_79b9));
    h ^= h >> 15;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    (h & 0xffff) as f32 / 65536.0
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ratatui::style::Color;

    use super::*;
    use crate::particles::particle_rng;
    use crate::testing::RenderHarness;
    use crate::theme;

    fn render_scene(harness: &mut RenderHarness, scene: &Scene) -> Buffer {
        harness.render(|frame| {
            let area = frame.area();
            Backdrop.render(frame, area, BackdropProps { scene });
        })
    }

    fn themed(temperature: f64, description: &str, hour: u32, seed: u64) -> Scene {
        let mut scene = Scene::new();
        scene.apply_theme(
            &theme::map(temperature, description, hour),
            &mut particle_rng(Some(seed)),
        );
        scene
    }

    #[test]
    fn test_unthemed_page_is_flat() {
        let mut harness = RenderHarness::new(20, 5);
        let buffer = render_scene(&mut harness, &Scene::new());
        assert_eq!(buffer[(0, 0)].bg, PAGE_BACKGROUND.to_color());
        assert_eq!(buffer[(19, 4)].bg, PAGE_BACKGROUND.to_color());
    }

    #[test]
    fn test_gradient_runs_top_to_bottom() {
        let mut harness = RenderHarness::new(20, 10);
        let scene = themed(12.0, "overcast clouds", 23, 1);
        let area = Rect::new(0, 0, 20, 10);

        let buffer = render_scene(&mut harness, &Scene::new());
        assert_eq!(buffer[(0, 0)].bg, PAGE_BACKGROUND.to_color());

        let rain = themed(12.0, "light rain", 12, 1);
        let buffer = render_scene(&mut harness, &rain);
        let top = page_color(rain.background(), area, 0, 0);
        let bottom = page_color(rain.background(), area, 0, 9);
        assert_ne!(top, bottom);
        assert_eq!(page_color(rain.background(), area, 3, 0), top);
        assert_eq!(buffer[(0, 0)].bg, top.to_color());

        // the diagonal night gradient changes along a row as well
        let left = page_color(scene.background(), area, 0, 5);
        let right = page_color(scene.background(), area, 19, 5);
        assert_ne!(left, right);
    }

    #[test]
    fn test_stars_draw_glyphs() {
        let mut harness = RenderHarness::new(60, 20);
        let mut scene = themed(-3.0, "clear sky", 22, 2);
        scene.advance(Duration::from_millis(1200));

        let output = crate::testing::buffer_to_string(&render_scene(&mut harness, &scene));
        assert!(output.contains('·') || output.contains('✧') || output.contains('✦'));
    }

    #[test]
    fn test_rain_hidden_before_drops_start() {
        let mut harness = RenderHarness::new(40, 12);
        let scene = themed(15.0, "light rain", 12, 3);

        // every drop rests above the viewport until its cycle moves it down
        let output = crate::testing::buffer_to_string(&render_scene(&mut harness, &scene));
        assert!(!output.contains('│') && !output.contains('╷'));
    }

    #[test]
    fn test_fog_lightens_page() {
        let mut harness = RenderHarness::new(30, 8);
        let scene = themed(8.0, "mist", 10, 4);
        let buffer = render_scene(&mut harness, &scene);
        let area = Rect::new(0, 0, 30, 8);

        let base = page_color(scene.background(), area, 5, 5);
        let Color::Rgb(r, _, _) = buffer[(5, 5)].bg else {
            panic!("fogged cells carry an rgb background");
        };
        assert!(r >= base.0);
    }

    #[test]
    fn test_fog_texture_is_deterministic() {
        assert_eq!(fog_density(3, 7), fog_density(3, 7));
        for x in 0..50 {
            for y in 0..20 {
                assert!((0.0..1.0).contains(&fog_density(x, y)));
            }
        }
    }

    #[test]
    fn test_star_glyph_tracks_scale() {
        let mut star = crate::particles::stars(&mut particle_rng(Some(4)))
            .elements
            .remove(0);
        star.size = 2.0;
        let small = FrameStyle {
            scale: 0.7,
            ..FrameStyle::base(1.0)
        };
        let large = FrameStyle {
            scale: 1.3,
            ..FrameStyle::base(1.0)
        };
        assert_eq!(glyph(ParticleKind::Stars, &star, &small), "·");
        assert_eq!(glyph(ParticleKind::Stars, &star, &large), "✦");
    }
}
