use night_sky::prelude::*;
use night_sky_examples::{init_tracing, render_sky_to_png, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Default world: 2400 x 1600, five anchors at least 300 apart.
    let config = SkyConfig::default();
    let mut rng = StdRng::seed_from_u64(2025);
    let mut sky = NightSky::new(config, &mut rng)?;

    // Stand on the third anchor so its companion shows up in the render.
    let agent = sky.pairs()[2].anchor.position;
    sky.tick(Some(agent), agent);

    for pair in sky.pairs() {
        println!(
            "anchor {} at ({:.0}, {:.0}) -> {}",
            pair.anchor.index, pair.anchor.position.x, pair.anchor.position.y, pair.companion.kind
        );
    }
    println!("{}", NightSky::TITLE);
    println!("{}", sky.status_line(agent));

    let rc = RenderConfig::new((1200, 800)).with_frame(30.0);
    let out = "sky-basic.png";
    render_sky_to_png(&sky, Some(agent), &rc, out)?;

    Ok(())
}
