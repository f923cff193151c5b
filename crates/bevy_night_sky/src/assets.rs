use core::result::Result;

use bevy::asset::io::Reader;
use bevy::asset::{AssetLoader, LoadContext};
use bevy::prelude::*;
use bevy::reflect::TypePath;
use bevy::tasks::ConditionalSendFuture;
use night_sky::prelude::SkyConfig;

/// Asset wrapping a [`SkyConfig`] loaded from a `.sky.json` file.
#[derive(Asset, TypePath, Clone, Debug)]
pub struct SkyConfigAsset(pub SkyConfig);

impl From<SkyConfig> for SkyConfigAsset {
    fn from(value: SkyConfig) -> Self {
        Self(value)
    }
}

/// Asset loader for [`SkyConfigAsset`] reading JSON files with `.sky.json` extension.
#[derive(TypePath)]
pub struct SkyConfigAssetLoader;

impl AssetLoader for SkyConfigAssetLoader {
    type Asset = SkyConfigAsset;
    type Settings = ();
    type Error = anyhow::Error;

    fn extensions(&self) -> &[&str] {
        &["sky.json"]
    }

    fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _context: &mut LoadContext,
    ) -> impl ConditionalSendFuture<Output = Result<Self::Asset, Self::Error>> {
        Box::pin(async move {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes).await?;
            parse_sky_config(&bytes)
        })
    }
}

/// Parse and validate a `.sky.json` payload.
pub(crate) fn parse_sky_config(bytes: &[u8]) -> anyhow::Result<SkyConfigAsset> {
    let config = SkyConfig::from_json_slice(bytes)?;
    config.validate()?;
    Ok(SkyConfigAsset(config))
}

impl FromWorld for SkyConfigAssetLoader {
    fn from_world(_: &mut World) -> Self {
        SkyConfigAssetLoader
    }
}
