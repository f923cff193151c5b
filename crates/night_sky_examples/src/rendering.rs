use std::f32::consts::TAU;
use std::path::Path;

use glam::Vec2;
use image::{Rgb, RgbImage};
use night_sky::prelude::*;
use tracing_subscriber::EnvFilter;

const SKY_COLOR: [u8; 3] = [25, 20, 80];

/// Install a fmt subscriber honoring `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Output settings for [`render_sky_to_png`].
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output size in pixels; the world is scaled to fit.
    pub image_size: (u32, u32),
    /// Animation frame used for twinkle and swirl rotation.
    pub frame: f32,
    /// Draw the agent marker and reveal radius.
    pub show_agent: bool,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32)) -> Self {
        Self {
            image_size,
            frame: 0.0,
            show_agent: true,
        }
    }

    pub fn with_frame(mut self, frame: f32) -> Self {
        self.frame = frame;
        self
    }

    pub fn with_show_agent(mut self, show_agent: bool) -> Self {
        self.show_agent = show_agent;
        self
    }
}

struct Canvas {
    img: RgbImage,
    scale: Vec2,
}

impl Canvas {
    fn to_px(&self, p: Vec2) -> Vec2 {
        p * self.scale
    }

    fn blend(&mut self, x: i32, y: i32, color: [u8; 3], alpha: f32) {
        if x < 0 || y < 0 || x >= self.img.width() as i32 || y >= self.img.height() as i32 {
            return;
        }
        let a = alpha.clamp(0.0, 1.0);
        let px = self.img.get_pixel_mut(x as u32, y as u32);
        for c in 0..3 {
            let dst = px.0[c] as f32;
            px.0[c] = (dst + (color[c] as f32 - dst) * a).round() as u8;
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: [u8; 3], alpha: f32) {
        let c = self.to_px(center);
        let r = (radius * self.scale.x).max(0.5);
        let r2 = r * r;
        let (x0, x1) = ((c.x - r).floor() as i32, (c.x + r).ceil() as i32);
        let (y0, y1) = ((c.y - r).floor() as i32, (c.y + r).ceil() as i32);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - c.x;
                let dy = y as f32 + 0.5 - c.y;
                if dx * dx + dy * dy <= r2 {
                    self.blend(x, y, color, alpha);
                }
            }
        }
    }

    fn ring(&mut self, center: Vec2, radius: f32, color: [u8; 3], alpha: f32) {
        let c = self.to_px(center);
        let r = radius * self.scale.x;
        let steps = ((r * TAU).ceil() as usize).max(8);
        for i in 0..steps {
            let t = i as f32 / steps as f32 * TAU;
            let p = c + Vec2::new(t.cos(), t.sin()) * r;
            self.blend(p.x as i32, p.y as i32, color, alpha);
        }
    }
}

fn companion_style(kind: CompanionKind) -> ([u8; 3], f32, Option<[u8; 3]>) {
    match kind {
        CompanionKind::Moon => ([240, 235, 220], 20.0, None),
        CompanionKind::PurpleCloud => ([180, 150, 220], 22.0, None),
        CompanionKind::Venus => ([255, 250, 180], 15.0, Some([255, 250, 150])),
        CompanionKind::OrangeCloud => ([255, 180, 100], 20.0, None),
        CompanionKind::Neptune => ([120, 180, 255], 14.0, Some([100, 180, 255])),
    }
}

fn draw_companion(canvas: &mut Canvas, companion: &Companion) {
    let (color, radius, glow) = companion_style(companion.kind);
    if let Some(glow) = glow {
        canvas.fill_circle(companion.position, radius * 1.7, glow, 0.35);
    }
    match companion.kind {
        CompanionKind::Moon => {
            canvas.fill_circle(companion.position, radius, color, 1.0);
            canvas.fill_circle(
                companion.position + Vec2::new(10.0, 0.0),
                radius,
                SKY_COLOR,
                1.0,
            );
        }
        CompanionKind::PurpleCloud | CompanionKind::OrangeCloud => {
            for offset in [
                Vec2::new(-18.0, -8.0),
                Vec2::new(6.0, -18.0),
                Vec2::new(20.0, -4.0),
                Vec2::new(4.0, 10.0),
            ] {
                canvas.fill_circle(companion.position + offset, radius * 0.6, color, 0.6);
            }
        }
        CompanionKind::Venus | CompanionKind::Neptune => {
            canvas.fill_circle(companion.position, radius, color, 1.0);
        }
    }
}

/// Render one frame of `sky` to a PNG file.
///
/// Companions are drawn only for anchors that are currently near, matching what a live
/// host would show for the last [`NightSky::tick`].
pub fn render_sky_to_png(
    sky: &NightSky,
    agent: Option<Vec2>,
    rc: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let (w, h) = rc.image_size;
    anyhow::ensure!(w > 0 && h > 0, "image size must be > 0");

    let extent = sky.world_extent();
    let mut canvas = Canvas {
        img: RgbImage::from_pixel(w, h, Rgb(SKY_COLOR)),
        scale: Vec2::new(w as f32 / extent.x, h as f32 / extent.y),
    };
    let frame = rc.frame;

    for swirl in sky.swirls() {
        let angle = swirl.angle(frame);
        let mut t = 0.0;
        while t < TAU {
            let wind = (t / TAU * swirl.tightness).sin() * swirl.radius;
            let local = Vec2::new(t.cos(), t.sin()) * wind;
            let p = canvas.to_px(swirl.position + Vec2::from_angle(angle).rotate(local));
            canvas.blend(p.x as i32, p.y as i32, [255, 220, 100], swirl.opacity / 255.0);
            t += 0.15;
        }
    }

    for star in sky.stars() {
        let twinkle = star.twinkle(frame);
        canvas.fill_circle(star.position, star.glow_size * 0.5, [100, 150, 255], 0.12 * twinkle);
        canvas.fill_circle(
            star.position,
            star.size * 0.75,
            [255, 255, 255],
            star.brightness / 255.0 * twinkle,
        );
    }

    for companion in sky.visible_companions() {
        draw_companion(&mut canvas, companion);
    }

    for anchor in sky.anchors() {
        let twinkle = anchor.twinkle(frame);
        canvas.fill_circle(
            anchor.position,
            anchor.glow_size * 0.5,
            [255, 200, 100],
            0.16 * twinkle,
        );
        canvas.fill_circle(
            anchor.position,
            anchor.size * 0.75,
            [255, 240, 100],
            anchor.brightness / 255.0 * twinkle.max(0.35),
        );
        if sky.tracker().is_revealed(anchor.index) {
            canvas.ring(anchor.position, anchor.glow_size * 0.6, [255, 255, 200], 0.8);
        }
    }

    if let (true, Some(agent)) = (rc.show_agent, agent) {
        canvas.ring(agent, sky.tracker().radius(), [255, 255, 255], 0.5);
        canvas.fill_circle(agent, 6.0, [255, 255, 255], 1.0);
    }

    canvas.img.save(path)?;
    Ok(())
}
