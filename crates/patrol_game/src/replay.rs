use patrol_core::input::ControlState;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    #[serde(default = "default_delta_ms")]
    pub delta_ms: f32,
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplayFrame {
    #[serde(default)]
    pub fire: bool,
    #[serde(default)]
    pub left: bool,
    #[serde(default)]
    pub right: bool,
    /// Frames to hold these keys for; 0 is treated as 1.
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl ReplayFrame {
    fn hold(controls: ControlState, repeat: u32) -> Self {
        Self {
            fire: controls.fire,
            left: controls.left,
            right: controls.right,
            repeat,
        }
    }
}

impl ReplaySequence {
    /// Built-in session used when no replay file is given: drift left, launch
    /// and fly off the top, drift right, then hold fire through two launches.
    pub fn demo() -> Self {
        let idle = ControlState::default();
        let left = ControlState {
            left: true,
            ..idle
        };
        let right = ControlState {
            right: true,
            ..idle
        };
        let fire = ControlState { fire: true, ..idle };
        Self {
            delta_ms: default_delta_ms(),
            frames: vec![
                ReplayFrame::hold(idle, 30),
                ReplayFrame::hold(left, 40),
                ReplayFrame::hold(fire, 1),
                ReplayFrame::hold(idle, 180),
                ReplayFrame::hold(right, 80),
                ReplayFrame::hold(fire, 320),
                ReplayFrame::hold(idle, 60),
            ],
        }
    }

    pub fn expanded_controls(&self) -> Vec<ControlState> {
        let mut out = Vec::new();
        for frame in &self.frames {
            for _ in 0..frame.repeat.max(1) {
                out.push(ControlState {
                    fire: frame.fire,
                    left: frame.left,
                    right: frame.right,
                });
            }
        }
        out
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplaySequence, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let replay: ReplaySequence = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse replay JSON {}: {e}", path.display()))?;
    validate_replay(&replay)?;
    Ok(replay)
}

fn validate_replay(replay: &ReplaySequence) -> Result<(), String> {
    if !(replay.delta_ms > 0.0 && replay.delta_ms.is_finite()) {
        return Err("Replay validation failed: delta_ms must be > 0".to_string());
    }
    if replay.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    Ok(())
}

const fn default_delta_ms() -> f32 {
    1000.0 / 60.0
}

const fn default_repeat() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::scene::{PlayScene, SceneEvent};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "patrol_replay_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn replay_file_parses_and_expands() {
        let path = temp_file_path("parse");
        fs::write(
            &path,
            r#"{
              "delta_ms": 16.0,
              "frames": [
                { "left": true, "repeat": 3 },
                { "fire": true },
                { "repeat": 0 }
              ]
            }"#,
        )
        .expect("write replay file");

        let replay = load_replay_from_path(&path).expect("replay should load");
        assert_eq!(replay.delta_ms, 16.0);
        let expanded = replay.expanded_controls();
        assert_eq!(expanded.len(), 5);
        assert!(expanded[0].left && !expanded[0].fire);
        assert!(expanded[3].fire);
        assert_eq!(expanded[4], ControlState::default());

        let _ = fs::remove_file(path);
    }

    #[test]
    fn replay_defaults_delta_to_sixty_hz() {
        let path = temp_file_path("default_dt");
        fs::write(&path, r#"{ "frames": [ { "right": true } ] }"#).expect("write replay file");
        let replay = load_replay_from_path(&path).expect("replay should load");
        assert!((replay.delta_ms - 1000.0 / 60.0).abs() < 1e-6);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn replay_rejects_empty_frames() {
        let path = temp_file_path("empty");
        fs::write(&path, r#"{ "delta_ms": 16.0, "frames": [] }"#).expect("write replay file");
        let err = load_replay_from_path(&path).expect_err("empty frames should fail");
        assert!(err.contains("frames list is empty"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn replay_rejects_zero_delta() {
        let path = temp_file_path("zero_dt");
        fs::write(&path, r#"{ "delta_ms": 0.0, "frames": [ {} ] }"#).expect("write replay file");
        let err = load_replay_from_path(&path).expect_err("zero delta should fail");
        assert!(err.contains("delta_ms"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn replay_run_is_deterministic() {
        let replay = ReplaySequence::demo();
        let controls = replay.expanded_controls();
        let config = GameConfig::squadron(640, 480);

        let mut run_a = PlayScene::create(&config);
        let mut run_b = PlayScene::create(&config);
        let mut events_a = Vec::new();
        let mut events_b = Vec::new();
        for c in &controls {
            events_a.extend(run_a.update(*c, replay.delta_ms).events);
        }
        for c in &controls {
            events_b.extend(run_b.update(*c, replay.delta_ms).events);
        }

        assert_eq!(events_a, events_b);
        assert_eq!(run_a.player.position, run_b.player.position);
        assert_eq!(run_a.player.rotation, run_b.player.rotation);
        assert_eq!(run_a.player.flight, run_b.player.flight);
        for (a, b) in run_a.enemies.iter().zip(&run_b.enemies) {
            assert_eq!(a.position, b.position);
            assert_eq!(a.color_offset, b.color_offset);
        }
    }

    #[test]
    fn demo_replay_launches_more_than_once() {
        let replay = ReplaySequence::demo();
        let mut scene = PlayScene::create(&GameConfig::rotation(640, 480));
        let mut launches = 0;
        for c in replay.expanded_controls() {
            if scene.update(c, replay.delta_ms).has(SceneEvent::Launched) {
                launches += 1;
            }
        }
        assert!(launches >= 3, "expected at least 3 launches, got {launches}");
    }
}
