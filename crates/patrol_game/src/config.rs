//! Game configuration: screen size, tuning constants and the enemy roster.
//!
//! Everything the scene needs is passed in through `GameConfig`; nothing reads
//! global state. A config file may omit any tuning section and the enemy list,
//! in which case the variant's preset roster is used.

use patrol_core::input::KeyBindings;
use patrol_core::tween::{Ease, ScaleTween};
use serde::Deserialize;
use std::f32::consts::TAU;
use std::fs;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Deserialize, Clone)]
pub struct GameConfig {
    #[serde(default = "default_version")]
    pub version: String,
    pub screen: ScreenConfig,
    #[serde(default)]
    pub variant: SceneVariant,
    #[serde(default)]
    pub bindings: KeyBindings,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub starfield: StarfieldConfig,
    #[serde(default)]
    pub launch_tween: TweenConfig,
    #[serde(default)]
    pub enemies: Vec<EnemyConfig>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ScreenConfig {
    pub width: u32,
    pub height: u32,
}

/// Which of the two scene layouts to run.
///
/// - `Rotation`: steering also spins the player; one enemy; no collision.
/// - `Squadron`: strafe-only steering; two colour-cycling enemies; collision
///   against the player cancels its flight.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SceneVariant {
    #[default]
    Rotation,
    Squadron,
}

impl SceneVariant {
    pub fn rotates(self) -> bool {
        matches!(self, Self::Rotation)
    }

    pub fn collides(self) -> bool {
        matches!(self, Self::Squadron)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Rotation => "rotation",
            Self::Squadron => "squadron",
        }
    }
}

impl FromStr for SceneVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rotation" => Ok(Self::Rotation),
            "squadron" => Ok(Self::Squadron),
            other => Err(format!(
                "Unknown scene variant '{other}' (expected 'rotation' or 'squadron')"
            )),
        }
    }
}

impl std::fmt::Display for SceneVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    pub color: u32,
    /// Distance from the bottom edge to the dock position.
    pub dock_offset: f32,
    /// Pixels per frame, both for strafing and for upward flight.
    pub movement_speed: f32,
    /// Radians per millisecond of frame delta.
    pub rotation_speed: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 25.0,
            height: 25.0,
            color: 0xff0000,
            dock_offset: 50.0,
            movement_speed: 3.0,
            rotation_speed: TAU / 1000.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StarfieldConfig {
    pub texture: String,
    /// Pixel size of the background texture, supplied by whoever loads it.
    pub texture_width: u32,
    pub texture_height: u32,
    /// Added to the tile offset every frame.
    pub scroll_per_frame: f32,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            texture: "starfield".to_string(),
            texture_width: 640,
            texture_height: 480,
            scroll_per_frame: -4.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct TweenConfig {
    pub from: f32,
    pub to: f32,
    pub duration_ms: u64,
    pub ease: Ease,
}

impl TweenConfig {
    pub fn to_tween(self) -> ScaleTween {
        ScaleTween {
            from: self.from,
            to: self.to,
            duration_us: self.duration_ms.saturating_mul(1000),
            ease: self.ease,
        }
    }
}

impl Default for TweenConfig {
    fn default() -> Self {
        let launch = ScaleTween::LAUNCH;
        Self {
            from: launch.from,
            to: launch.to,
            duration_ms: launch.duration_us / 1000,
            ease: launch.ease,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct EnemyConfig {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: u32,
    /// Added to the fill colour every frame, wrapping.
    #[serde(default)]
    pub color_step: u32,
    /// Pixels per frame, leftward.
    pub speed: f32,
}

impl GameConfig {
    /// Single enemy, rotating player, no collision.
    pub fn rotation(width: u32, height: u32) -> Self {
        Self::preset(SceneVariant::Rotation, width, height)
    }

    /// Two colour-cycling enemies with collision.
    pub fn squadron(width: u32, height: u32) -> Self {
        Self::preset(SceneVariant::Squadron, width, height)
    }

    fn preset(variant: SceneVariant, width: u32, height: u32) -> Self {
        Self {
            version: default_version(),
            screen: ScreenConfig { width, height },
            variant,
            bindings: KeyBindings::default(),
            player: PlayerConfig::default(),
            starfield: StarfieldConfig::default(),
            launch_tween: TweenConfig::default(),
            enemies: preset_enemies(variant, width),
        }
    }

    pub fn launch_tween(&self) -> ScaleTween {
        self.launch_tween.to_tween()
    }
}

fn preset_enemies(variant: SceneVariant, screen_width: u32) -> Vec<EnemyConfig> {
    let w = screen_width as f32;
    let lead = EnemyConfig {
        x: w + 100.0,
        y: 100.0,
        width: 75.0,
        height: 50.0,
        color: 0xffffff,
        color_step: 0,
        speed: 1.5,
    };
    match variant {
        SceneVariant::Rotation => vec![lead],
        SceneVariant::Squadron => vec![
            EnemyConfig {
                color_step: 0x000101,
                ..lead
            },
            EnemyConfig {
                x: w + 300.0,
                y: 200.0,
                width: 75.0,
                height: 50.0,
                color: 0x00ffff,
                color_step: 0x010100,
                speed: 2.5,
            },
        ],
    }
}

pub fn load_config_from_path(path: &Path) -> Result<GameConfig, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    parse_config(&raw).map_err(|e| format!("{e} ({})", path.display()))
}

pub fn parse_config(raw: &str) -> Result<GameConfig, String> {
    let mut config: GameConfig =
        serde_json::from_str(raw).map_err(|e| format!("Failed to parse config JSON: {e}"))?;
    if config.enemies.is_empty() {
        log::info!(
            "Config declares no enemies; using the {} preset roster",
            config.variant
        );
        config.enemies = preset_enemies(config.variant, config.screen.width);
    }
    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &GameConfig) -> Result<(), String> {
    if config.version != "0.1" {
        return Err(format!(
            "Config validation failed: unsupported version '{}'",
            config.version
        ));
    }
    if config.screen.width == 0 || config.screen.height == 0 {
        return Err("Config validation failed: screen width and height must be > 0".to_string());
    }

    let player = &config.player;
    if !(player.width > 0.0 && player.height > 0.0) {
        return Err("Config validation failed: player size must be > 0".to_string());
    }
    if !(player.movement_speed >= 0.0
        && player.movement_speed.is_finite()
        && player.rotation_speed.is_finite())
    {
        return Err(
            "Config validation failed: player movement_speed must be >= 0 and rotation_speed finite"
                .to_string(),
        );
    }
    if config.starfield.texture_width == 0 || config.starfield.texture_height == 0 {
        return Err("Config validation failed: starfield texture size must be > 0".to_string());
    }
    if !config.starfield.scroll_per_frame.is_finite() {
        return Err("Config validation failed: starfield scroll_per_frame must be finite".to_string());
    }

    let tween = &config.launch_tween;
    if !(tween.from.is_finite() && tween.to.is_finite()) {
        return Err("Config validation failed: launch_tween from/to must be finite".to_string());
    }
    if tween.duration_ms.checked_mul(1000).is_none() {
        return Err(format!(
            "Config validation failed: launch_tween duration_ms {} is too large",
            tween.duration_ms
        ));
    }

    match (config.variant, config.enemies.len()) {
        (_, 0) => {
            return Err("Config validation failed: enemies list is empty".to_string());
        }
        (_, n) if n > 2 => {
            return Err(format!(
                "Config validation failed: at most 2 enemies are supported, got {n}"
            ));
        }
        (SceneVariant::Squadron, 1) => {
            return Err("Config validation failed: squadron variant needs 2 enemies".to_string());
        }
        _ => {}
    }

    for (i, enemy) in config.enemies.iter().enumerate() {
        if !(enemy.width > 0.0 && enemy.height > 0.0) {
            return Err(format!(
                "Config validation failed: enemy {i} size must be > 0"
            ));
        }
        if !(enemy.speed >= 0.0
            && enemy.speed.is_finite()
            && enemy.x.is_finite() && enemy.y.is_finite()) {
            return Err(format!(
                "Config validation failed: enemy {i} needs a finite position and speed >= 0"
            ));
        }
    }
    Ok(())
}

fn default_version() -> String {
    "0.1".to_string()
}
