use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::{actions::ActionBindings, types::GestureLabel};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid config JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("`{field}` must be a finite number greater than zero, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("`{field}` must be at least {min}, got {value}")]
    TooSmall {
        field: &'static str,
        min: u64,
        value: u64,
    },
    #[error("`extend_threshold` ({extend}) must not be below `curl_threshold` ({curl})")]
    ThresholdOrder { curl: f64, extend: f64 },
    #[error("the `none` label cannot be bound to an action")]
    NoneBinding,
}

/// Thresholds and timing for the gesture engine. Every length threshold is
/// expressed in palm sizes (wrist to middle-finger knuckle), angles in
/// radians.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Thumb tip to index tip distance below which the hand is pinching.
    pub pinch_threshold: f64,
    /// Fingertip to palm-center distance below which a finger is folded.
    pub curl_threshold: f64,
    /// Fingertip to palm-center distance above which a finger is extended.
    pub extend_threshold: f64,
    /// Reach of the thumb tip along the thumb metacarpal axis.
    pub thumb_extend_threshold: f64,
    /// Vertical thumb tip offset from the wrist needed for thumbs up/down.
    pub thumb_vertical_threshold: f64,
    /// Minimum angle between adjacent fingertips for an open palm.
    pub palm_spread_angle: f64,
    /// Maximum tilt of the thumb away from vertical for thumbs up/down.
    pub rotation_angle_threshold: f64,
    pub swipe_norm_threshold: f64,
    pub swipe_window_ms: u64,
    pub swipe_history_len: usize,
    pub confirm_frames_pose: u32,
    pub confirm_frames_swipe: u32,
    pub cooldown_ms: u64,
    /// Per-label cooldowns. Entries from a config file are merged over the
    /// built-in ones (thumbs up/down at 600ms) instead of replacing them.
    #[serde(deserialize_with = "merge_cooldown_overrides")]
    pub cooldown_overrides_ms: HashMap<GestureLabel, u64>,
}

fn default_cooldown_overrides() -> HashMap<GestureLabel, u64> {
    [(GestureLabel::ThumbsUp, 600), (GestureLabel::ThumbsDown, 600)]
        .into_iter()
        .collect()
}

fn merge_cooldown_overrides<'de, D>(
    deserializer: D,
) -> Result<HashMap<GestureLabel, u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut overrides = default_cooldown_overrides();
    overrides.extend(HashMap::<GestureLabel, u64>::deserialize(deserializer)?);
    Ok(overrides)
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            pinch_threshold: 0.25,
            curl_threshold: 0.6,
            extend_threshold: 0.85,
            thumb_extend_threshold: 0.8,
            thumb_vertical_threshold: 0.5,
            palm_spread_angle: 0.15,
            rotation_angle_threshold: 1.0,
            swipe_norm_threshold: 1.0,
            swipe_window_ms: 400,
            swipe_history_len: 12,
            confirm_frames_pose: 3,
            confirm_frames_swipe: 1,
            cooldown_ms: 1_000,
            cooldown_overrides_ms: default_cooldown_overrides(),
        }
    }
}

impl GestureConfig {
    pub fn swipe_window(&self) -> Duration {
        Duration::from_millis(self.swipe_window_ms)
    }

    pub fn cooldown_duration(&self, label: GestureLabel) -> Duration {
        let ms = self
            .cooldown_overrides_ms
            .get(&label)
            .copied()
            .unwrap_or(self.cooldown_ms);
        Duration::from_millis(ms)
    }

    pub fn confirm_frames(&self, label: GestureLabel) -> u32 {
        if label.is_swipe() {
            self.confirm_frames_swipe
        } else {
            self.confirm_frames_pose
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("pinch_threshold", self.pinch_threshold),
            ("curl_threshold", self.curl_threshold),
            ("extend_threshold", self.extend_threshold),
            ("thumb_extend_threshold", self.thumb_extend_threshold),
            ("thumb_vertical_threshold", self.thumb_vertical_threshold),
            ("palm_spread_angle", self.palm_spread_angle),
            ("rotation_angle_threshold", self.rotation_angle_threshold),
            ("swipe_norm_threshold", self.swipe_norm_threshold),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if self.extend_threshold < self.curl_threshold {
            return Err(ConfigError::ThresholdOrder {
                curl: self.curl_threshold,
                extend: self.extend_threshold,
            });
        }

        let counts = [
            ("swipe_window_ms", 1, self.swipe_window_ms),
            ("swipe_history_len", 2, self.swipe_history_len as u64),
            ("confirm_frames_pose", 1, u64::from(self.confirm_frames_pose)),
            ("confirm_frames_swipe", 1, u64::from(self.confirm_frames_swipe)),
        ];
        for (field, min, value) in counts {
            if value < min {
                return Err(ConfigError::TooSmall { field, min, value });
            }
        }

        Ok(())
    }
}

/// Everything the command-line driver needs: engine thresholds plus the
/// gesture to media action table.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub gesture: GestureConfig,
    pub actions: ActionBindings,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gesture.validate()?;
        if self.actions.action_for(GestureLabel::None).is_some() {
            return Err(ConfigError::NoneBinding);
        }
        Ok(())
    }
}
