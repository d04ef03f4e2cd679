use std::{collections::HashMap, fmt};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::types::{GestureEvent, GestureLabel};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaAction {
    Play,
    Pause,
    PlayPause,
    NextTrack,
    PreviousTrack,
    VolumeUp,
    VolumeDown,
}

impl MediaAction {
    pub fn description(&self) -> &'static str {
        match self {
            MediaAction::Play => "play",
            MediaAction::Pause => "pause",
            MediaAction::PlayPause => "play/pause",
            MediaAction::NextTrack => "next track",
            MediaAction::PreviousTrack => "previous track",
            MediaAction::VolumeUp => "volume up",
            MediaAction::VolumeDown => "volume down",
        }
    }
}

impl fmt::Display for MediaAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Gesture to media action table. Labels without an entry are ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionBindings(HashMap<GestureLabel, MediaAction>);

impl Default for ActionBindings {
    fn default() -> Self {
        Self(
            [
                (GestureLabel::ThumbsUp, MediaAction::VolumeUp),
                (GestureLabel::ThumbsDown, MediaAction::VolumeDown),
                (GestureLabel::OpenPalm, MediaAction::Play),
                (GestureLabel::Pinch, MediaAction::Pause),
                (GestureLabel::SwipeRight, MediaAction::NextTrack),
                (GestureLabel::SwipeLeft, MediaAction::PreviousTrack),
            ]
            .into_iter()
            .collect(),
        )
    }
}

impl ActionBindings {
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    pub fn action_for(&self, label: GestureLabel) -> Option<MediaAction> {
        self.0.get(&label).copied()
    }

    /// Returns the previous binding for `label`, if any.
    pub fn bind(&mut self, label: GestureLabel, action: MediaAction) -> Option<MediaAction> {
        self.0.insert(label, action)
    }

    pub fn unbind(&mut self, label: GestureLabel) -> Option<MediaAction> {
        self.0.remove(&label)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Receives confirmed actions. Key injection lives behind this trait.
pub trait ActionDispatcher {
    fn dispatch(&mut self, action: MediaAction, event: &GestureEvent) -> Result<()>;
}

impl<F> ActionDispatcher for F
where
    F: FnMut(MediaAction, &GestureEvent) -> Result<()>,
{
    fn dispatch(&mut self, action: MediaAction, event: &GestureEvent) -> Result<()> {
        self(action, event)
    }
}

/// Logs every action instead of sending keys.
#[derive(Debug, Default)]
pub struct LogDispatcher {
    dispatched: usize,
}

impl LogDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatched(&self) -> usize {
        self.dispatched
    }
}

impl ActionDispatcher for LogDispatcher {
    fn dispatch(&mut self, action: MediaAction, event: &GestureEvent) -> Result<()> {
        self.dispatched += 1;
        log::info!("action: {action} ({})", event.display_text());
        Ok(())
    }
}
