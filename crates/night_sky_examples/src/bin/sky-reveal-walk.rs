use glam::Vec2;
use night_sky::prelude::*;
use night_sky_examples::{init_tracing, render_sky_to_png, RenderConfig};
use tracing::info;

/// Agent speed in world units per frame.
const AGENT_SPEED: f32 = 6.0;
const MAX_FRAMES: u32 = 5000;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Optional path to a `.sky.json` config; falls back to the bundled demo.
    let config = match std::env::args().nth(1) {
        Some(path) => SkyConfig::from_json_slice(&std::fs::read(path)?)?,
        None => SkyConfig::from_json_str(include_str!("../../assets/demo.sky.json"))?,
    };
    let lerp = config.camera.lerp;
    let mut sky = NightSky::from_config(config)?;

    // Visit every anchor top to bottom.
    let mut waypoints: Vec<Vec2> = sky.anchors().map(|a| a.position).collect();
    waypoints.sort_by(|a, b| a.y.total_cmp(&b.y));

    let extent = sky.world_extent();
    let mut agent = Vec2::new(extent.x * 0.5, 0.0);
    let mut camera = agent;
    let mut sink = FnSink::new(|event| match event {
        SkyEvent::AnchorRevealed { index } => info!("revealed anchor {}", index),
        SkyEvent::AnchorEntered { index } => info!("companion {} visible", index),
        SkyEvent::AnchorLeft { index } => info!("companion {} hidden", index),
        _ => {}
    });

    let mut frame = 0;
    for target in waypoints {
        while agent.distance(target) > 1.0 && frame < MAX_FRAMES {
            agent = agent.move_towards(target, AGENT_SPEED);
            camera = camera.lerp(agent, lerp);
            sky.tick_with_events(Some(agent), camera, &mut sink);

            if frame % 60 == 0 {
                info!("{}", sky.status_line(agent));
            }
            frame += 1;
        }
    }

    info!(
        "walk finished after {} frames: revealed {}/{}",
        frame,
        sky.tracker().revealed_count(),
        sky.pairs().len()
    );

    let rc = RenderConfig::new((1200, 800)).with_frame(frame as f32);
    render_sky_to_png(&sky, Some(agent), &rc, "sky-reveal-walk.png")?;

    Ok(())
}
