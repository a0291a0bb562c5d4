//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level sketch configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Host viewport and input settings.
    pub viewport: ViewportConfig,
    /// Headless frame-loop settings.
    pub host: HostConfig,
    /// Orbit demo (seeker + follower) tuning.
    pub orbit: OrbitConfig,
    /// Fan demo spinner tuning.
    pub spinner: SpinnerConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Viewport configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewportConfig {
    /// Initial viewport width in logical pixels.
    pub width: u32,
    /// Initial viewport height in logical pixels.
    pub height: u32,
    /// Quiet period before a burst of resize events is applied.
    pub resize_debounce_ms: u64,
    /// Width changes at or below this many pixels are ignored.
    pub resize_threshold_px: u32,
}

/// Which demo controllers the host drives.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
pub enum DemoSelection {
    /// Seeker and follower around the planet.
    #[default]
    Orbit,
    /// Windmill spinner.
    Spinner,
    /// Both controllers, side by side.
    All,
}

/// Headless host loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HostConfig {
    /// Display refresh rate the host simulates.
    pub target_fps: u32,
    /// Number of display frames to run before exiting.
    pub frames: u64,
    /// Log transforms every N frames (0 disables periodic logging).
    pub log_every: u64,
    /// Pace frames against the wall clock instead of running flat out.
    pub realtime: bool,
    /// Demo controllers to drive.
    pub demo: DemoSelection,
}

/// How the seeker's reference heading evolves between frames.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
pub enum DirectionMode {
    /// The reference heading never changes: every frame turns from the
    /// initial heading toward the body center.
    #[default]
    Fixed,
    /// The reference heading tracks the previous frame, and the turn is
    /// composed onto the current orientation.
    Accumulate,
}

/// Orbit demo tuning. Angles are in degrees, distances in scene units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrbitConfig {
    /// Center of the celestial body.
    pub body_center: [f64; 3],
    /// Radius of the rendered planet sphere.
    pub earth_radius: f64,
    /// Radius of the seeker's great-circle walk.
    pub seeker_radius: f64,
    /// Nominal orbit shell of the follower; it is pinned at
    /// `follower_radius - clamp_epsilon`.
    pub follower_radius: f64,
    /// Angular frequency of the latitude oscillation (rad/s).
    pub frequency: f64,
    /// Peak latitude of the seeker, in degrees.
    pub amplitude: f64,
    /// Longitude added per frame, in degrees.
    pub speed: f64,
    /// Scale of both follower pulls (toward the center and the seeker).
    pub pull_strength: f64,
    /// Fraction of the remaining turn the seeker closes each frame.
    pub damping_step: f64,
    /// Inset of the follower below its nominal shell.
    pub clamp_epsilon: f64,
    /// Starting position of the follower.
    pub follower_start: [f64; 3],
    /// Seeker reference heading behavior.
    pub direction_mode: DirectionMode,
}

/// Fan demo tuning. Speeds are in radians per second.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpinnerConfig {
    /// Spin speed while the pointer is up.
    pub base_speed: f64,
    /// Spin speed while the pointer is held.
    pub boost_speed: f64,
    /// Angular frequency of the fan group's sway (rad/s).
    pub sway_frequency: f64,
    /// Peak sway yaw, in radians.
    pub sway_amplitude: f64,
    /// Number of wings evenly spaced around the hub.
    pub wing_count: u32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Write a JSON log file next to the console output in debug builds.
    pub file_logging: bool,
}

// --- Default implementations ---

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            resize_debounce_ms: 100,
            resize_threshold_px: 10,
        }
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            frames: 600,
            log_every: 60,
            realtime: false,
            demo: DemoSelection::Orbit,
        }
    }
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            body_center: [0.0, 0.0, 0.0],
            earth_radius: 5.0,
            seeker_radius: 8.0,
            follower_radius: 6.2,
            frequency: 0.75,
            amplitude: 60.0,
            speed: 1.0,
            pull_strength: 0.0085,
            damping_step: 0.5,
            clamp_epsilon: 0.2,
            follower_start: [0.0, 6.0, 0.0],
            direction_mode: DirectionMode::Fixed,
        }
    }
}

impl Default for SpinnerConfig {
    fn default() -> Self {
        Self {
            base_speed: 0.25,
            boost_speed: 10.0,
            sway_frequency: 0.75,
            sway_amplitude: 0.3,
            wing_count: 3,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            file_logging: true,
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("seeker_radius: 8.0"));
        assert!(ron_str.contains("pull_strength: 0.0085"));
        assert!(ron_str.contains("direction_mode: Fixed"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.orbit.direction_mode = DirectionMode::Accumulate;
        config.host.demo = DemoSelection::All;
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_orbit_defaults_match_demo() {
        let orbit = OrbitConfig::default();
        assert_eq!(orbit.amplitude, 60.0);
        assert_eq!(orbit.frequency, 0.75);
        assert_eq!(orbit.damping_step, 0.5);
        assert!(orbit.follower_radius - orbit.clamp_epsilon > orbit.earth_radius);
    }

    #[test]
    fn test_missing_field_uses_default() {
        let ron_str = "(orbit: (speed: 2.0))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.orbit.speed, 2.0);
        assert_eq!(config.orbit.seeker_radius, 8.0);
        assert_eq!(config.spinner, SpinnerConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.viewport.width = 1920;
        config.orbit.pull_strength = 0.01;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.spinner.boost_speed = 4.0;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().spinner.boost_speed, 4.0);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.ron"), "{{not valid}}").unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
