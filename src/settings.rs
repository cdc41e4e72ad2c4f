//! Run settings
//!
//! Loaded from an optional JSON file; any missing field takes its default.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{SettingsError, SimError};
use crate::sim::{AgentSpec, ArenaLayout, Simulation, populate};

/// Per-ball parameters shared by every ball in a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallSettings {
    pub radius: f32,
    /// Distance moved per frame along x and y
    pub step: (f32, f32),
    /// Frames between random heading nudges
    pub move_limit: u32,
    /// Release point
    pub start: (f32, f32),
}

impl Default for BallSettings {
    fn default() -> Self {
        Self {
            radius: BALL_RADIUS,
            step: BALL_STEP,
            move_limit: MOVE_LIMIT,
            start: BALL_START,
        }
    }
}

impl BallSettings {
    pub fn spec(&self) -> AgentSpec {
        AgentSpec::new(
            crate::vec2(self.start),
            crate::vec2(self.step),
            self.radius,
            self.move_limit,
        )
    }
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub arena_width: f32,
    pub arena_height: f32,
    /// Balls released at the start of the run
    pub ball_count: usize,
    /// Target frames per second
    pub frame_rate: u32,
    /// RNG seed; a random one is drawn (and logged) when absent
    pub seed: Option<u64>,
    pub ball: BallSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            ball_count: BALL_COUNT,
            frame_rate: FRAME_RATE,
            seed: None,
            ball: BallSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.arena_width) || !positive(self.arena_height) {
            return Err(SettingsError::Invalid("arena dimensions must be positive"));
        }
        if self.frame_rate == 0 {
            return Err(SettingsError::Invalid("frame rate must be at least 1"));
        }
        if self.ball.move_limit == 0 {
            return Err(SettingsError::Invalid("move limit must be at least 1"));
        }
        if !positive(self.ball.radius) {
            return Err(SettingsError::Invalid("ball radius must be positive"));
        }
        if !Vec2::from(self.ball.step).cmpge(Vec2::ZERO).all() {
            return Err(SettingsError::Invalid("ball step must be non-negative"));
        }
        Ok(())
    }

    /// The seed this run will use
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Build the arena and release `ball_count` balls into it
    pub fn build_simulation(&self) -> Result<Simulation, SimError> {
        self.validate()?;
        let arena = ArenaLayout::build(self.arena_width, self.arena_height)?;
        let mut sim = Simulation::new(arena, self.resolve_seed());
        populate(&mut sim, self.ball.spec(), self.ball_count)?;
        Ok(sim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_run() {
        let s = Settings::default();
        assert_eq!((s.arena_width, s.arena_height), (1000.0, 1000.0));
        assert_eq!(s.ball_count, 25);
        assert_eq!(s.frame_rate, 45);
        assert_eq!(s.ball.radius, 12.0);
        assert_eq!(s.ball.step, (2.0, 2.0));
        assert_eq!(s.ball.move_limit, 25);
        assert_eq!(s.ball.start, (500.0, 500.0));
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s: Settings =
            serde_json::from_str(r#"{ "ball_count": 3, "seed": 9, "ball": { "radius": 6.0 } }"#)
                .unwrap();
        assert_eq!(s.ball_count, 3);
        assert_eq!(s.seed, Some(9));
        assert_eq!(s.ball.radius, 6.0);
        assert_eq!(s.ball.move_limit, 25);
        assert_eq!(s.arena_width, 1000.0);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let cases = [
            Settings {
                arena_width: 0.0,
                ..Default::default()
            },
            Settings {
                frame_rate: 0,
                ..Default::default()
            },
            Settings {
                ball: BallSettings {
                    move_limit: 0,
                    ..Default::default()
                },
                ..Default::default()
            },
            Settings {
                ball: BallSettings {
                    step: (1.0, -1.0),
                    ..Default::default()
                },
                ..Default::default()
            },
        ];
        for s in cases {
            assert!(matches!(s.validate(), Err(SettingsError::Invalid(_))), "{s:?}");
        }
    }

    #[test]
    fn test_build_simulation() {
        let settings = Settings {
            ball_count: 4,
            seed: Some(11),
            ..Default::default()
        };
        let sim = settings.build_simulation().unwrap();
        assert_eq!(sim.agents().len(), 4);
        assert_eq!(sim.seed(), 11);
        assert_eq!(sim.arena().walls().len(), WALL_COUNT);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir()
            .join(format!("maze-bounce-settings-{}.json", std::process::id()));
        let settings = Settings {
            ball_count: 7,
            seed: Some(1234),
            ..Default::default()
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let path =
            std::env::temp_dir().join(format!("maze-bounce-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();
        let result = Settings::load(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(SettingsError::Parse(_))));
    }
}
