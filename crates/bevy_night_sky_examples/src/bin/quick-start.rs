use std::f32::consts::TAU;

use bevy::prelude::*;
use bevy_night_sky::prelude::*;

/// Agent speed in world units per second.
const AGENT_SPEED: f32 = 320.0;

#[derive(Resource, Default)]
struct ConfigHandle(Handle<SkyConfigAsset>);

#[derive(Component)]
struct HudText;

/// The rendering camera. It follows the [`SkyCamera`] through [`to_view`].
#[derive(Component)]
struct ViewCamera;

/// Sky coordinates grow downwards while Bevy's world grows upwards. Agent and sky camera live
/// in sky coordinates; everything drawn goes through this.
fn to_view(p: Vec2) -> Vec2 {
    Vec2::new(p.x, -p.y)
}

fn main() {
    App::new()
        .init_resource::<ConfigHandle>()
        .insert_resource(ClearColor(Color::srgb_u8(25, 20, 80)))
        .add_plugins(DefaultPlugins)
        .add_plugins(NightSkyPlugin)
        .add_systems(Startup, setup)
        .add_systems(
            Update,
            (move_agent, follow_agent, draw_sky, update_hud, log_reveals),
        )
        .add_observer(log_ready)
        .run();
}

/// Loads the sky config, spawns camera, agent and HUD, and requests the sky.
fn setup(mut commands: Commands, assets: Res<AssetServer>, mut handle: ResMut<ConfigHandle>) {
    handle.0 = assets.load("demo.sky.json");

    let start = Vec2::new(1200.0, 800.0);
    commands.spawn((
        Camera2d,
        ViewCamera,
        Transform::from_translation(to_view(start).extend(0.0)),
    ));
    commands.spawn((SkyCamera, Transform::from_translation(start.extend(0.0))));
    commands.spawn((SkyAgent, Transform::from_xyz(1200.0, 100.0, 0.0)));
    commands.spawn((
        HudText,
        Text::new(""),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
    ));

    // The request waits until the asset has loaded.
    let sky = commands.spawn_empty().id();
    commands.trigger(SkyRequest::new(sky, handle.0.clone(), None));
}

/// Arrow keys or WASD move the agent.
fn move_agent(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut agent: Query<&mut Transform, With<SkyAgent>>,
) {
    let Ok(mut transform) = agent.single_mut() else {
        return;
    };

    let mut dir = Vec2::ZERO;
    if keys.any_pressed([KeyCode::ArrowLeft, KeyCode::KeyA]) {
        dir.x -= 1.0;
    }
    if keys.any_pressed([KeyCode::ArrowRight, KeyCode::KeyD]) {
        dir.x += 1.0;
    }
    if keys.any_pressed([KeyCode::ArrowUp, KeyCode::KeyW]) {
        dir.y -= 1.0;
    }
    if keys.any_pressed([KeyCode::ArrowDown, KeyCode::KeyS]) {
        dir.y += 1.0;
    }

    let step = dir.normalize_or_zero() * AGENT_SPEED * time.delta_secs();
    transform.translation += step.extend(0.0);
}

/// Eases the camera towards the agent using the configured lerp factor.
fn follow_agent(
    skies: Query<&Sky>,
    agent: Query<&Transform, (With<SkyAgent>, Without<SkyCamera>, Without<ViewCamera>)>,
    mut camera: Query<&mut Transform, (With<SkyCamera>, Without<ViewCamera>)>,
    mut view: Query<&mut Transform, (With<ViewCamera>, Without<SkyCamera>, Without<SkyAgent>)>,
) {
    let (Ok(agent), Ok(mut camera), Ok(mut view)) =
        (agent.single(), camera.single_mut(), view.single_mut())
    else {
        return;
    };
    let lerp = skies
        .iter()
        .next()
        .map(|sky| sky.0.config().camera.lerp)
        .unwrap_or(0.12);

    let target = agent.translation.truncate();
    let current = camera.translation.truncate();
    camera.translation = current.lerp(target, lerp).extend(camera.translation.z);
    view.translation = to_view(camera.translation.truncate()).extend(view.translation.z);
}

fn companion_color(kind: CompanionKind) -> Color {
    match kind {
        CompanionKind::Moon => Color::srgb_u8(240, 235, 220),
        CompanionKind::PurpleCloud => Color::srgba_u8(180, 150, 220, 200),
        CompanionKind::Venus => Color::srgb_u8(255, 250, 180),
        CompanionKind::OrangeCloud => Color::srgba_u8(255, 180, 100, 160),
        CompanionKind::Neptune => Color::srgb_u8(120, 180, 255),
    }
}

fn draw_sky(
    mut gizmos: Gizmos,
    time: Res<Time>,
    skies: Query<&Sky>,
    agent: Query<&GlobalTransform, With<SkyAgent>>,
) {
    let frame = time.elapsed_secs() * 60.0;

    for Sky(sky) in skies.iter() {
        for swirl in sky.swirls() {
            let turn = Vec2::from_angle(swirl.angle(frame));
            let points = (0..42).map(|i| {
                let t = i as f32 * 0.15;
                let wind = (t / TAU * swirl.tightness).sin() * swirl.radius;
                to_view(swirl.position + turn.rotate(Vec2::new(t.cos(), t.sin()) * wind))
            });
            gizmos.linestrip_2d(points, Color::srgba_u8(255, 220, 100, swirl.opacity as u8));
        }

        for star in sky.stars() {
            let alpha = star.brightness / 255.0 * star.twinkle(frame);
            gizmos.circle_2d(
                to_view(star.position),
                star.size * 0.5,
                Color::srgba(1.0, 1.0, 1.0, alpha),
            );
        }

        for companion in sky.visible_companions() {
            gizmos.circle_2d(to_view(companion.position), 20.0, companion_color(companion.kind));
        }

        for anchor in sky.anchors() {
            let alpha = 0.35 + 0.65 * anchor.twinkle(frame);
            gizmos.circle_2d(
                to_view(anchor.position),
                anchor.size,
                Color::srgba_u8(255, 240, 100, (alpha * 255.0) as u8),
            );
            if sky.tracker().is_revealed(anchor.index) {
                gizmos.circle_2d(
                    to_view(anchor.position),
                    anchor.glow_size,
                    Color::srgb_u8(255, 200, 100),
                );
            }
        }

        if let Ok(agent) = agent.single() {
            gizmos.circle_2d(
                to_view(agent.translation().truncate()),
                sky.tracker().radius(),
                Color::WHITE,
            );
        }
    }
}

fn update_hud(skies: Query<&SkyStatus>, mut hud: Query<&mut Text, With<HudText>>) {
    let (Some(status), Ok(mut text)) = (skies.iter().next(), hud.single_mut()) else {
        return;
    };
    let line = format!("{}\n{}", NightSky::TITLE, status.0);
    if text.0 != line {
        text.0 = line;
    }
}

fn log_reveals(mut messages: MessageReader<SkyRevealMessage>) {
    for message in messages.read() {
        info!("Sky {:?}: {:?}", message.sky, message.event);
    }
}

fn log_ready(ready: On<SkyReady>) {
    info!(
        "Night sky {} ready with {} anchors; walk onto a star to reveal its companion",
        ready.entity, ready.anchors
    );
}
