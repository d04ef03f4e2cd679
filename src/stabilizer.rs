use std::{collections::HashMap, time::Instant};

use crate::{
    config::GestureConfig,
    types::{GestureEvent, GestureLabel},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LabelState {
    pub consecutive_count: u32,
    pub last_confirmed_at: Option<Instant>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StabilizerPhase {
    /// No candidate gesture.
    Idle,
    /// Candidate seen, not yet confirmed (or cooldown over).
    Accumulating,
    /// Candidate confirmed recently; repeats are suppressed.
    Cooldown,
}

/// Debounces the raw per-frame label stream into confirmed events.
///
/// A label is confirmed once it has been the raw label for its
/// `confirm_frames` consecutive frames and its cooldown has elapsed since
/// the previous confirmation of the same label. Confirming resets the run,
/// so a held gesture repeats at most once per cooldown.
pub struct TemporalStabilizer {
    config: GestureConfig,
    candidate: GestureLabel,
    states: HashMap<GestureLabel, LabelState>,
}

impl TemporalStabilizer {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            config: config.clone(),
            candidate: GestureLabel::None,
            states: HashMap::new(),
        }
    }

    pub fn feed(&mut self, label: GestureLabel, now: Instant) -> Option<GestureEvent> {
        if label != self.candidate {
            for state in self.states.values_mut() {
                state.consecutive_count = 0;
            }
            self.candidate = label;
        }

        if label.is_none() {
            return None;
        }

        let required = self.config.confirm_frames(label);
        let cooldown = self.config.cooldown_duration(label);
        let state = self.states.entry(label).or_default();
        state.consecutive_count = state.consecutive_count.saturating_add(1);

        if state.consecutive_count < required {
            return None;
        }
        if let Some(last) = state.last_confirmed_at {
            if now.saturating_duration_since(last) < cooldown {
                return None;
            }
        }

        log::debug!("confirmed {label} after {} frames", state.consecutive_count);
        state.last_confirmed_at = Some(now);
        state.consecutive_count = 0;

        Some(GestureEvent {
            label,
            confirmed_at: now,
        })
    }

    pub fn candidate(&self) -> GestureLabel {
        self.candidate
    }

    pub fn state(&self, label: GestureLabel) -> LabelState {
        self.states.get(&label).copied().unwrap_or_default()
    }

    pub fn phase(&self, now: Instant) -> StabilizerPhase {
        if self.candidate.is_none() {
            return StabilizerPhase::Idle;
        }
        let cooldown = self.config.cooldown_duration(self.candidate);
        match self.state(self.candidate).last_confirmed_at {
            Some(last) if now.saturating_duration_since(last) < cooldown => {
                StabilizerPhase::Cooldown
            }
            _ => StabilizerPhase::Accumulating,
        }
    }

    pub fn reset(&mut self) {
        self.candidate = GestureLabel::None;
        self.states.clear();
    }
}
