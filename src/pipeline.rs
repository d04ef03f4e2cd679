use std::{thread, time::Instant};

use anyhow::{Result, anyhow};
use crossbeam_channel::{Receiver, Sender};

use crate::{
    actions::{ActionBindings, ActionDispatcher, MediaAction},
    config::{AppConfig, GestureConfig},
    engine::GestureEngine,
    recording::RecordedFrame,
    types::{GestureEvent, HandObservation},
};

const FRAME_QUEUE: usize = 64;

/// One frame for the engine worker. `observation` is `None` when no hand was
/// detected.
#[derive(Clone, Debug)]
pub struct FrameInput {
    pub observation: Option<HandObservation>,
    pub timestamp: Instant,
}

impl FrameInput {
    pub fn from_recorded(frame: &RecordedFrame, base: Instant) -> Self {
        Self {
            observation: frame.observation(base),
            timestamp: frame.timestamp(base),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dispatched {
    pub event: GestureEvent,
    /// `None` when the gesture has no binding.
    pub action: Option<MediaAction>,
    pub delivered: bool,
}

#[derive(Debug, Default)]
pub struct ReplaySummary {
    pub frames: usize,
    pub dispatched: Vec<Dispatched>,
}

impl ReplaySummary {
    pub fn events(&self) -> usize {
        self.dispatched.len()
    }

    pub fn actions(&self) -> impl Iterator<Item = MediaAction> + '_ {
        self.dispatched
            .iter()
            .filter(|d| d.delivered)
            .filter_map(|d| d.action)
    }
}

fn run_worker_loop(
    mut engine: GestureEngine,
    frame_rx: Receiver<FrameInput>,
    event_tx: Sender<GestureEvent>,
) {
    let mut frames = 0usize;

    for input in frame_rx.iter() {
        frames += 1;
        let Some(event) = engine.process_frame_at(input.observation.as_ref(), input.timestamp)
        else {
            continue;
        };
        if event_tx.send(event).is_err() {
            log::debug!("event receiver dropped, stopping engine worker");
            break;
        }
    }

    log::info!("gesture engine worker stopped after {frames} frames");
}

/// Runs a [`GestureEngine`] on its own thread. Frames are processed in the
/// order received; the worker exits once the frame sender is dropped.
pub fn start_engine_worker(
    config: &GestureConfig,
    frame_rx: Receiver<FrameInput>,
    event_tx: Sender<GestureEvent>,
) -> thread::JoinHandle<()> {
    log::info!("starting gesture engine worker");
    let engine = GestureEngine::new(config);
    thread::spawn(move || run_worker_loop(engine, frame_rx, event_tx))
}

/// Drains `event_rx` until every sender is gone. A failing dispatcher is
/// logged and skipped.
pub fn run_dispatch_loop<D>(
    event_rx: &Receiver<GestureEvent>,
    bindings: &ActionBindings,
    dispatcher: &mut D,
) -> Vec<Dispatched>
where
    D: ActionDispatcher + ?Sized,
{
    let mut out = Vec::new();

    for event in event_rx.iter() {
        let action = bindings.action_for(event.label);
        let delivered = match action {
            Some(action) => match dispatcher.dispatch(action, &event) {
                Ok(()) => true,
                Err(err) => {
                    log::warn!("failed to dispatch {action} for {}: {err:?}", event.label);
                    false
                }
            },
            None => {
                log::debug!("no action bound to {}", event.label);
                false
            }
        };
        out.push(Dispatched {
            event,
            action,
            delivered,
        });
    }

    out
}

/// Feeds a recording through a fresh engine worker and dispatches every
/// confirmed gesture.
pub fn replay<D>(
    frames: &[RecordedFrame],
    config: &AppConfig,
    dispatcher: &mut D,
) -> Result<ReplaySummary>
where
    D: ActionDispatcher + ?Sized,
{
    let (frame_tx, frame_rx) = crossbeam_channel::bounded::<FrameInput>(FRAME_QUEUE);
    let (event_tx, event_rx) = crossbeam_channel::unbounded::<GestureEvent>();

    let worker = start_engine_worker(&config.gesture, frame_rx, event_tx);

    let base = Instant::now();
    let mut sent = 0usize;
    for frame in frames {
        if frame_tx.send(FrameInput::from_recorded(frame, base)).is_err() {
            log::warn!("engine worker exited early after {sent} frames");
            break;
        }
        sent += 1;
    }
    drop(frame_tx);

    let dispatched = run_dispatch_loop(&event_rx, &config.actions, dispatcher);
    worker
        .join()
        .map_err(|_| anyhow!("gesture engine worker panicked"))?;

    Ok(ReplaySummary {
        frames: sent,
        dispatched,
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use anyhow::bail;

    use super::*;
    use crate::{
        actions::LogDispatcher,
        fixtures::{self, Pose},
        recording::RecordedHand,
        types::{GestureLabel, Handedness},
    };

    fn recorded(pose: Option<Pose>, x: f64, t_ms: u64) -> RecordedFrame {
        RecordedFrame {
            t_ms,
            hand: pose.map(|pose| RecordedHand {
                handedness: Handedness::Right,
                landmarks: fixtures::landmarks(pose, (x, 0.8), 0.1),
            }),
        }
    }

    fn held(pose: Pose, count: u64, start_ms: u64) -> Vec<RecordedFrame> {
        (0..count)
            .map(|i| recorded(Some(pose), 0.5, start_ms + i * 33))
            .collect()
    }

    #[test]
    fn worker_processes_frames_in_order() {
        let (frame_tx, frame_rx) = crossbeam_channel::unbounded();
        let (event_tx, event_rx) = crossbeam_channel::unbounded();
        let worker = start_engine_worker(&GestureConfig::default(), frame_rx, event_tx);

        let start = Instant::now();
        for i in 0..4u32 {
            let timestamp = start + Duration::from_millis(33) * i;
            let observation = fixtures::observation(Pose::ThumbsUp, (0.5, 0.8), 0.1, timestamp);
            frame_tx
                .send(FrameInput {
                    observation: Some(observation),
                    timestamp,
                })
                .unwrap();
        }
        drop(frame_tx);
        worker.join().unwrap();

        let events: Vec<_> = event_rx.iter().collect();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].label, GestureLabel::ThumbsUp);
        assert_eq!(events[0].confirmed_at, start + Duration::from_millis(66));
    }

    #[test]
    fn worker_stops_when_events_are_unwanted() {
        let (frame_tx, frame_rx) = crossbeam_channel::unbounded();
        let (event_tx, event_rx) = crossbeam_channel::unbounded();
        drop(event_rx);
        let worker = start_engine_worker(
            &GestureConfig {
                confirm_frames_pose: 1,
                ..GestureConfig::default()
            },
            frame_rx,
            event_tx,
        );

        let start = Instant::now();
        let observation = fixtures::observation(Pose::OpenPalm, (0.5, 0.8), 0.1, start);
        frame_tx
            .send(FrameInput {
                observation: Some(observation),
                timestamp: start,
            })
            .unwrap();
        worker.join().unwrap();
    }

    #[test]
    fn replay_dispatches_bound_actions() {
        let mut frames = held(Pose::OpenPalm, 4, 0);
        frames.push(recorded(None, 0.5, 132));
        frames.extend(held(Pose::ThumbsDown, 4, 165));

        let mut dispatcher = LogDispatcher::new();
        let summary = replay(&frames, &AppConfig::default(), &mut dispatcher).unwrap();

        assert_eq!(summary.frames, 9);
        assert_eq!(
            summary.actions().collect::<Vec<_>>(),
            vec![MediaAction::Play, MediaAction::VolumeDown]
        );
        assert_eq!(dispatcher.dispatched(), 2);
    }

    #[test]
    fn unbound_gestures_are_reported_but_not_sent() {
        let mut config = AppConfig::default();
        config.actions.unbind(GestureLabel::OpenPalm);

        let mut sent = Vec::new();
        let mut dispatcher = |action: MediaAction, _: &GestureEvent| -> Result<()> {
            sent.push(action);
            Ok(())
        };
        let summary = replay(&held(Pose::OpenPalm, 4, 0), &config, &mut dispatcher).unwrap();

        assert_eq!(summary.events(), 1);
        assert_eq!(summary.dispatched[0].action, None);
        assert!(!summary.dispatched[0].delivered);
        assert!(sent.is_empty());
    }

    #[test]
    fn dispatch_failures_do_not_stop_the_loop() {
        let (event_tx, event_rx) = crossbeam_channel::unbounded();
        let start = Instant::now();
        for (i, label) in [GestureLabel::Pinch, GestureLabel::SwipeLeft].into_iter().enumerate() {
            event_tx
                .send(GestureEvent {
                    label,
                    confirmed_at: start + Duration::from_millis(100) * i as u32,
                })
                .unwrap();
        }
        drop(event_tx);

        let mut calls = 0;
        let mut dispatcher = |action: MediaAction, _: &GestureEvent| -> Result<()> {
            calls += 1;
            if action == MediaAction::Pause {
                bail!("media player not running");
            }
            Ok(())
        };
        let out = run_dispatch_loop(&event_rx, &ActionBindings::default(), &mut dispatcher);

        assert_eq!(calls, 2);
        assert_eq!(
            out.iter().map(|d| d.delivered).collect::<Vec<_>>(),
            vec![false, true]
        );
        assert_eq!(out[1].action, Some(MediaAction::PreviousTrack));
    }
}
