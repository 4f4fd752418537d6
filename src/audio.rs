use bevy::prelude::*;
use bevy::audio::{
    AudioPlayer,
    AudioSource,
    PlaybackSettings,
    SpatialScale,
    Volume,
};
use std::collections::HashMap;
use rand::RngExt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SfxKind {
    Fire,
    PlatformTread,
    Victory,
    Defeat,
}

#[derive(Clone, Copy, Debug, Message)]
pub struct PlaySfx {
    pub kind: SfxKind,
    pub pos: Vec3,
}

/// 1-or-many clips per kind; a random one plays per event.
#[derive(Resource, Default)]
pub struct SfxLibrary {
    pub map: HashMap<SfxKind, Vec<Handle<AudioSource>>>,
}

impl SfxLibrary {
    pub fn insert_one(&mut self, k: SfxKind, h: Handle<AudioSource>) {
        self.map.entry(k).or_default().push(h);
    }
}

pub fn setup_audio(mut commands: Commands, asset_server: Res<AssetServer>) {
    let mut lib = SfxLibrary::default();

    lib.insert_one(SfxKind::Fire, asset_server.load("sounds/sfx/fire_0.wav"));
    lib.insert_one(SfxKind::Fire, asset_server.load("sounds/sfx/fire_1.wav"));
    lib.insert_one(SfxKind::PlatformTread, asset_server.load("sounds/sfx/platform_tread.wav"));
    lib.insert_one(SfxKind::Victory, asset_server.load("sounds/sfx/victory.wav"));
    lib.insert_one(SfxKind::Defeat, asset_server.load("sounds/sfx/defeat.wav"));

    commands.insert_resource(lib);
}

pub fn play_sfx_events(
    lib: Res<SfxLibrary>,
    mut commands: Commands,
    mut ev: MessageReader<PlaySfx>,
) {
    for e in ev.read() {
        let Some(list) = lib.map.get(&e.kind) else {
            warn!("Missing SFX for {:?}", e.kind);
            continue;
        };
        if list.is_empty() {
            continue;
        }

        let i = rand::rng().random_range(0..list.len());
        let clip = list[i].clone();

        let settings = match e.kind {
            SfxKind::Fire => PlaybackSettings::DESPAWN
                .with_spatial(true)
                .with_spatial_scale(SpatialScale::new(0.12))
                .with_volume(Volume::Linear(1.1)),

            SfxKind::PlatformTread => PlaybackSettings::DESPAWN
                .with_spatial(true)
                .with_spatial_scale(SpatialScale::new(0.12))
                .with_volume(Volume::Linear(0.9)),

            // Jingles play flat, not positioned in the world.
            SfxKind::Victory | SfxKind::Defeat => PlaybackSettings::DESPAWN
                .with_volume(Volume::Linear(1.0)),
        };

        commands.spawn((
            Transform::from_translation(e.pos),
            AudioPlayer::new(clip),
            settings,
        ));
    }
}
