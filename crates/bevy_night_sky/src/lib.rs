//! Bevy plugin for night_sky providing config assets, components, messages and systems.
#![forbid(unsafe_code)]

use core::result::Result;

pub use assets::{SkyConfigAsset, SkyConfigAssetLoader};
use bevy::prelude::*;
pub use events::{MessageSink, SkyRevealMessage};
use night_sky::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

mod assets;
mod events;

/// Convenient re-exports for common types. Import with `use bevy_night_sky::prelude::*;`.
pub mod prelude {
    pub use night_sky::prelude::*;

    pub use crate::assets::{SkyConfigAsset, SkyConfigAssetLoader};
    pub use crate::events::{MessageSink, SkyRevealMessage};
    pub use crate::{
        build_sky, NightSkyPlugin, Sky, SkyAgent, SkyCamera, SkyReady, SkyRequest, SkyStatus,
    };
}

/// Bevy plugin providing assets, components, message types, and systems.
pub struct NightSkyPlugin;

/// The generated sky and its reveal state.
///
/// Sky coordinates are taken verbatim from world-space `x`/`y` of [`SkyAgent`] and
/// [`SkyCamera`] translations.
#[derive(Component, Debug, Clone)]
pub struct Sky(pub NightSky);

/// Marks the entity whose translation is the reveal agent. At most one is expected.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct SkyAgent;

/// Marks the camera whose translation is reported in [`SkyStatus`].
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct SkyCamera;

/// HUD status line refreshed every frame on each sky entity.
#[derive(Component, Debug, Default, Clone, PartialEq)]
pub struct SkyStatus(pub String);

/// A request to build a sky from a config asset on `entity`.
///
/// `seed` overrides the config seed; with neither set an unseeded source is used.
#[non_exhaustive]
#[derive(EntityEvent)]
pub struct SkyRequest {
    /// Entity that receives the [`Sky`] component.
    pub entity: Entity,
    /// Handle to the sky config asset.
    pub config: Handle<SkyConfigAsset>,
    pub seed: Option<u64>,
}

impl SkyRequest {
    pub fn new(entity: Entity, config: Handle<SkyConfigAsset>, seed: Option<u64>) -> Self {
        Self {
            entity,
            config,
            seed,
        }
    }
}

/// [`EntityEvent`] triggered once a requested sky has been built.
#[non_exhaustive]
#[derive(EntityEvent, Debug, Clone)]
pub struct SkyReady {
    pub entity: Entity,
    pub anchors: usize,
}

/// Request waiting for its config asset to finish loading.
#[derive(Component)]
struct PendingSky {
    config: Handle<SkyConfigAsset>,
    seed: Option<u64>,
}

impl Plugin for NightSkyPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<SkyRevealMessage>()
            .init_asset::<SkyConfigAsset>()
            .init_asset_loader::<SkyConfigAssetLoader>()
            .add_systems(Update, (build_pending_skies, update_night_skies).chain())
            .add_observer(queue_sky_request);
    }
}

fn queue_sky_request(request: On<SkyRequest>, mut commands: Commands) {
    commands.entity(request.entity).insert(PendingSky {
        config: request.config.clone(),
        seed: request.seed,
    });
}

/// Build the sky for `config`, preferring `seed` over the config seed.
pub fn build_sky(
    config: SkyConfig,
    seed: Option<u64>,
) -> Result<NightSky, night_sky::error::Error> {
    match seed.or(config.sky.seed) {
        Some(seed) => NightSky::new(config, &mut StdRng::seed_from_u64(seed)),
        None => NightSky::from_config(config),
    }
}

fn build_pending_skies(
    mut commands: Commands,
    assets: Res<Assets<SkyConfigAsset>>,
    pending: Query<(Entity, &PendingSky)>,
) {
    for (entity, request) in pending.iter() {
        let Some(asset) = assets.get(&request.config) else {
            continue;
        };

        commands.entity(entity).remove::<PendingSky>();
        match build_sky(asset.0.clone(), request.seed) {
            Ok(sky) => {
                let anchors = sky.pairs().len();
                info!("Night sky ready on {:?} with {} anchors", entity, anchors);
                commands
                    .entity(entity)
                    .insert((Sky(sky), SkyStatus::default()));
                commands.trigger(SkyReady { entity, anchors });
            }
            Err(err) => {
                warn!("Night sky for {:?} could not be built: {}", entity, err);
            }
        }
    }
}

/// Tick every sky with the current agent and camera positions.
pub fn update_night_skies(
    agents: Query<&GlobalTransform, With<SkyAgent>>,
    cameras: Query<&GlobalTransform, With<SkyCamera>>,
    mut skies: Query<(Entity, &mut Sky, Option<&mut SkyStatus>)>,
    mut messages: ResMut<Messages<SkyRevealMessage>>,
) {
    let agent = agents.single().ok().map(|t| t.translation().truncate());
    let camera = cameras
        .single()
        .map(|t| t.translation().truncate())
        .unwrap_or(Vec2::ZERO);

    for (entity, mut sky, status) in skies.iter_mut() {
        let mut sink = MessageSink::new(entity);
        sky.0.tick_with_events(agent, camera, &mut sink);
        for message in sink.pending {
            debug!("Sky {:?}: {:?}", entity, message.event);
            messages.write(message);
        }

        if let (Some(mut status), Some(agent)) = (status, agent) {
            let line = sky.0.status_line(agent);
            if status.0 != line {
                status.0 = line;
            }
        }
    }
}
