//! Run configuration
//!
//! Settings come from defaults, an optional JSON blob in the
//! `BRICK_BLASTER_SETTINGS` environment variable, then `--key value`
//! arguments, in that order. Anything malformed is logged and ignored.

use serde::{Deserialize, Serialize};

use crate::consts::{BRICKS_SPEED_MAX, BRICKS_SPEED_MIN};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run seed; a clock-derived seed is used when absent
    pub seed: Option<u64>,
    /// Starting fall-speed level in [1, 5]
    pub bricks_speed: u8,
    /// Frames the headless demo runs before giving up
    pub frames: u32,
    /// Dump the final game state as JSON on exit
    pub dump_state: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            bricks_speed: BRICKS_SPEED_MIN,
            frames: 3600,
            dump_state: false,
        }
    }
}

impl Settings {
    /// Defaults overlaid with the environment blob and the given arguments
    pub fn load(args: impl Iterator<Item = String>) -> Self {
        let mut settings = match std::env::var("BRICK_BLASTER_SETTINGS") {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => settings,
                Err(err) => {
                    log::warn!("ignoring malformed BRICK_BLASTER_SETTINGS: {err}");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        };
        settings.apply_args(args);
        settings.clamp();
        settings
    }

    pub fn apply_args(&mut self, mut args: impl Iterator<Item = String>) {
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => {
                    if let Some(v) = args.next().and_then(|v| v.parse().ok()) {
                        self.seed = Some(v);
                    } else {
                        log::warn!("--seed needs an integer value");
                    }
                }
                "--speed" => {
                    if let Some(v) = args.next().and_then(|v| v.parse().ok()) {
                        self.bricks_speed = v;
                    } else {
                        log::warn!("--speed needs an integer value");
                    }
                }
                "--frames" => {
                    if let Some(v) = args.next().and_then(|v| v.parse().ok()) {
                        self.frames = v;
                    } else {
                        log::warn!("--frames needs an integer value");
                    }
                }
                "--dump-state" => self.dump_state = true,
                other => log::warn!("ignoring unknown argument {other:?}"),
            }
        }
    }

    fn clamp(&mut self) {
        self.bricks_speed = self.bricks_speed.clamp(BRICKS_SPEED_MIN, BRICKS_SPEED_MAX);
    }
}
