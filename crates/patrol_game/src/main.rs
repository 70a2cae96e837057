//! Patrol -- headless runner for the play scene.
//!
//! Each frame goes through the same path a windowed host would take:
//!
//!   1. key state for the frame is written into `InputState`
//!   2. `FrameClock::advance()` -- cap and record the frame delta
//!   3. running effects tick, then the scene updates from the polled controls
//!   4. effect requests from the scene are handed to the `EffectPlayer`
//!   5. the scene draws into a `DrawList`, which is batched into a quad mesh
//!
//! Input comes from a JSON replay (or the built-in demo), so a run is fully
//! reproducible. Periodic stats and scene transitions go to the log.

mod collision;
mod config;
mod entities;
mod replay;
mod scene;

use std::path::PathBuf;

use config::{load_config_from_path, GameConfig, SceneVariant};
use patrol_core::input::{ControlState, InputState, KeyBindings};
use patrol_core::time::FrameClock;
use patrol_render::{build_frame_mesh, Camera2D, DrawList, EffectPlayer, FrameMesh, TextureSizes};
use replay::{load_replay_from_path, ReplaySequence};
use scene::{FrameReport, PlayScene, SceneEvent};

const DEFAULT_SCREEN_WIDTH: u32 = 640;
const DEFAULT_SCREEN_HEIGHT: u32 = 480;
const STATS_INTERVAL_FRAMES: u64 = 60;
const USAGE: &str =
    "usage: patrol_game [--config PATH | --variant rotation|squadron] [--replay PATH]";

#[derive(Debug, Default, PartialEq)]
struct Options {
    config_path: Option<PathBuf>,
    replay_path: Option<PathBuf>,
    variant: Option<SceneVariant>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct SessionStats {
    frames: u64,
    launches: u32,
    top_recycles: u32,
    collisions: u32,
    enemy_wraps: u32,
    hits_by_enemy: [u32; 2],
    wraps_by_enemy: [u32; 2],
}

impl SessionStats {
    fn record(&mut self, report: &FrameReport) {
        self.frames += 1;
        for event in &report.events {
            match event {
                SceneEvent::Launched => self.launches += 1,
                SceneEvent::ReachedTop => self.top_recycles += 1,
                SceneEvent::Collided { enemy } => {
                    self.collisions += 1;
                    if let Some(count) = self.hits_by_enemy.get_mut(*enemy) {
                        *count += 1;
                    }
                }
                SceneEvent::EnemyWrapped { enemy } => {
                    self.enemy_wraps += 1;
                    if let Some(count) = self.wraps_by_enemy.get_mut(*enemy) {
                        *count += 1;
                    }
                }
            }
        }
    }
}

/// Everything one run owns. Mirrors what a windowed host would keep alive
/// between frames, minus the window and GPU.
struct Session {
    scene: PlayScene,
    input: InputState,
    bindings: KeyBindings,
    clock: FrameClock,
    effects: EffectPlayer,
    draw_list: DrawList,
    textures: TextureSizes,
    camera: Camera2D,
    stats: SessionStats,
}

impl Session {
    fn new(config: &GameConfig) -> Self {
        let mut textures = TextureSizes::new();
        textures.insert(
            config.starfield.texture.clone(),
            (
                config.starfield.texture_width,
                config.starfield.texture_height,
            ),
        );

        let scene = PlayScene::create(config);
        let dock = scene.dock_position();
        log::info!("Player docked at ({:.1}, {:.1})", dock.x, dock.y);

        Self {
            scene,
            input: InputState::new(),
            bindings: config.bindings,
            clock: FrameClock::new(),
            effects: EffectPlayer::new(),
            draw_list: DrawList::new(),
            textures,
            camera: Camera2D::new(config.screen.width, config.screen.height),
            stats: SessionStats::default(),
        }
    }

    fn run_frame(&mut self, keys: ControlState, delta_ms: f32) -> FrameMesh {
        self.bindings.apply(keys, &mut self.input);
        let delta_ms = self.clock.advance(f64::from(delta_ms)) as f32;

        self.effects.tick(self.clock.delta_us());
        let controls = self.bindings.poll(&self.input);
        let report = self.scene.update(controls, delta_ms);
        for request in &report.effects {
            self.effects.play(request);
        }
        self.stats.record(&report);

        self.draw_list.clear();
        self.scene.draw(&mut self.draw_list);
        let mesh = build_frame_mesh(&self.draw_list, &self.effects, &self.textures, &self.camera);

        if self.clock.frame_count % STATS_INTERVAL_FRAMES == 0 {
            log::info!(
                "frame {} | {:.1} fps ({:.2}ms) | draws {} | binds {} | quads {} | effects {} | {:?} at ({:.1}, {:.1})",
                self.clock.frame_count,
                self.clock.smoothed_fps,
                self.clock.smoothed_frame_time_ms,
                mesh.draw_calls.len(),
                mesh.texture_binds(),
                mesh.quad_count(),
                self.effects.active_count(),
                self.scene.player.flight,
                self.scene.player.position.x,
                self.scene.player.position.y,
            );
        }

        self.input.end_frame();
        mesh
    }
}

fn parse_args<I>(args: I) -> Result<Options, String>
where
    I: IntoIterator<Item = String>,
{
    let mut options = Options::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        let mut value = |flag: &str| {
            args.next()
                .ok_or_else(|| format!("{flag} expects a value\n{USAGE}"))
        };
        match arg.as_str() {
            "--config" => options.config_path = Some(PathBuf::from(value("--config")?)),
            "--replay" => options.replay_path = Some(PathBuf::from(value("--replay")?)),
            "--variant" => options.variant = Some(value("--variant")?.parse()?),
            "-h" | "--help" => return Err(USAGE.to_string()),
            other => return Err(format!("Unknown argument '{other}'\n{USAGE}")),
        }
    }
    if options.config_path.is_some() && options.variant.is_some() {
        return Err(format!(
            "--variant cannot be combined with --config; set \"variant\" in the file\n{USAGE}"
        ));
    }
    Ok(options)
}

fn load_config(options: &Options) -> Result<GameConfig, String> {
    match &options.config_path {
        Some(path) => {
            let config = load_config_from_path(path)?;
            log::info!("Loaded config '{}'", path.display());
            Ok(config)
        }
        None => {
            let variant = options.variant.unwrap_or_default();
            log::info!("No config given, using the {variant} preset");
            Ok(match variant {
                SceneVariant::Rotation => {
                    GameConfig::rotation(DEFAULT_SCREEN_WIDTH, DEFAULT_SCREEN_HEIGHT)
                }
                SceneVariant::Squadron => {
                    GameConfig::squadron(DEFAULT_SCREEN_WIDTH, DEFAULT_SCREEN_HEIGHT)
                }
            })
        }
    }
}

fn load_replay(options: &Options) -> Result<ReplaySequence, String> {
    match &options.replay_path {
        Some(path) => {
            let replay = load_replay_from_path(path)?;
            log::info!(
                "Loaded replay '{}' ({} segments)",
                path.display(),
                replay.frames.len()
            );
            Ok(replay)
        }
        None => {
            log::info!("No replay given, running the built-in demo");
            Ok(ReplaySequence::demo())
        }
    }
}

fn run(options: &Options) -> Result<SessionStats, String> {
    let config = load_config(options)?;
    let replay = load_replay(options)?;

    let mut session = Session::new(&config);
    for keys in replay.expanded_controls() {
        session.run_frame(keys, replay.delta_ms);
    }
    Ok(session.stats)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Patrol starting...");

    let options = match parse_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(err) => {
            log::error!("{err}");
            std::process::exit(2);
        }
    };

    match run(&options) {
        Ok(stats) => {
            log::info!(
                "Run finished after {} frames: {} launches, {} top recycles, {} collisions {:?}, {} enemy wraps {:?}",
                stats.frames,
                stats.launches,
                stats.top_recycles,
                stats.collisions,
                stats.hits_by_enemy,
                stats.enemy_wraps,
                stats.wraps_by_enemy
            );
        }
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    }
}
