use compositions_core::{GameSettings, Level};

/// Source of per-level game rules.
pub trait SettingsProvider: Send + Sync {
    fn game_settings(&self, level: Level) -> GameSettings;
}

/// The built-in level table.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevelSettings;

impl SettingsProvider for LevelSettings {
    fn game_settings(&self, level: Level) -> GameSettings {
        GameSettings::for_level(level)
    }
}

/// Same settings for every level; handy for custom rounds and tests.
#[derive(Debug, Clone)]
pub struct FixedSettings {
    settings: GameSettings,
}

impl FixedSettings {
    #[must_use]
    pub fn new(settings: GameSettings) -> Self {
        Self { settings }
    }
}

impl SettingsProvider for FixedSettings {
    fn game_settings(&self, _level: Level) -> GameSettings {
        self.settings.clone()
    }
}
