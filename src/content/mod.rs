//! Content domain: data-driven tuning loaded from assets/data.

mod data;
mod loader;


use bevy::prelude::*;
use std::path::Path;

pub use data::GameTuning;
pub use loader::{ContentLoadError, TUNING_PATH, load_tuning, parse_tuning};

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameTuning>()
            .add_systems(PreStartup, load_content);
    }
}

fn load_content(mut tuning: ResMut<GameTuning>) {
    let path = Path::new(TUNING_PATH);
    if !path.exists() {
        warn!("Tuning file {} not found, using built-in defaults", TUNING_PATH);
        return;
    }

    match load_tuning(path) {
        Ok(loaded) => {
            *tuning = loaded;
            info!(
                "Loaded tuning: {} platforms, {} initial enemies, {} lives",
                tuning.level.platforms.len(),
                tuning.spawning.initial.len(),
                tuning.session.lives
            );
        }
        Err(e) => error!("{}; using built-in defaults", e),
    }
}
