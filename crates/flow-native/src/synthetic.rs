//! Keyboard-driven stand-in for a camera hand tracker.
//!
//! A worker thread samples the current [`HandRig`] at the tracker rate and
//! ships full 21-landmark frames to the UI thread, so the session sees the
//! same callback shape a real detector would produce.

use flow_core::{DetectorControl, DetectorFrame, HandPose, Handedness};
use glam::Vec2;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

const FRAME_INTERVAL: Duration = Duration::from_millis(33);
const WARMUP: Duration = Duration::from_millis(600);
const SPREAD_STEP: f32 = 0.05;
const MAX_SPREAD: f32 = 0.9;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
    Open,
    Fist,
    Pinch,
    Count(u8),
}

/// What the pretend camera sees.
#[derive(Clone, Debug)]
pub struct HandRig {
    /// `None` is an empty frame.
    pub primary: Option<Gesture>,
    pub side: Handedness,
    /// Adds an open hand on the other side for two-hand scaling.
    pub second_hand: bool,
    /// Horizontal wrist distance when two hands are up.
    pub spread: f32,
    /// Next frame is reported as a detector error.
    pub fail_next: bool,
}

impl Default for HandRig {
    fn default() -> Self {
        Self {
            primary: None,
            side: Handedness::Right,
            second_hand: false,
            spread: 0.3,
            fail_next: false,
        }
    }
}

impl HandRig {
    pub fn widen(&mut self, steps: f32) {
        self.spread = (self.spread + steps * SPREAD_STEP).clamp(0.0, MAX_SPREAD);
    }

    pub fn flip_side(&mut self) {
        self.side = match self.side {
            Handedness::Left => Handedness::Right,
            _ => Handedness::Left,
        };
    }

    pub fn frame(&self) -> DetectorFrame {
        let Some(gesture) = self.primary else {
            return DetectorFrame::empty();
        };
        let center = Vec2::new(0.5, 0.6);
        let offset = Vec2::new(self.spread * 0.5, 0.0);
        let (primary_at, other_at) = match (self.second_hand, self.side) {
            (false, _) => (center, center),
            (true, Handedness::Left) => (center - offset, center + offset),
            (true, _) => (center + offset, center - offset),
        };
        let primary = match gesture {
            Gesture::Open => HandPose::open(primary_at, self.side),
            Gesture::Fist => HandPose::fist(primary_at, self.side),
            Gesture::Pinch => HandPose::pinch(primary_at, self.side),
            Gesture::Count(n) => HandPose::counting(n, primary_at, self.side),
        };
        let mut poses = vec![primary];
        if self.second_hand {
            let other_side = match self.side {
                Handedness::Left => Handedness::Right,
                _ => Handedness::Left,
            };
            // The detector reports the counting hand last.
            poses.insert(0, HandPose::open(other_at, other_side));
        }
        DetectorFrame::with_hands(poses.iter().map(HandPose::to_observation))
    }
}

pub enum TrackerEvent {
    Frame(DetectorFrame),
    Error(String),
}

pub struct SyntheticDetector {
    rig: Arc<Mutex<HandRig>>,
    stop: Arc<AtomicBool>,
    events: Receiver<TrackerEvent>,
    worker: Option<JoinHandle<()>>,
}

impl SyntheticDetector {
    pub fn spawn() -> anyhow::Result<Self> {
        let rig = Arc::new(Mutex::new(HandRig::default()));
        let stop = Arc::new(AtomicBool::new(false));
        let (tx, events) = mpsc::channel();
        let worker = {
            let rig = Arc::clone(&rig);
            let stop = Arc::clone(&stop);
            thread::Builder::new()
                .name("hand-tracker".into())
                .spawn(move || {
                    thread::sleep(WARMUP);
                    log::info!("[tracker] synthetic hand tracker running");
                    while !stop.load(Ordering::SeqCst) {
                        let event = match rig.lock() {
                            Ok(mut rig) if rig.fail_next => {
                                rig.fail_next = false;
                                TrackerEvent::Error("simulated tracking failure".into())
                            }
                            Ok(rig) => TrackerEvent::Frame(rig.frame()),
                            Err(_) => break,
                        };
                        if tx.send(event).is_err() {
                            break;
                        }
                        thread::sleep(FRAME_INTERVAL);
                    }
                    log::info!("[tracker] stopped");
                })?
        };
        Ok(Self {
            rig,
            stop,
            events,
            worker: Some(worker),
        })
    }

    /// Edit the rig the worker samples from.
    pub fn with_rig(&self, edit: impl FnOnce(&mut HandRig)) {
        match self.rig.lock() {
            Ok(mut rig) => edit(&mut rig),
            Err(_) => log::warn!("[tracker] rig lock poisoned; input ignored"),
        }
    }

    /// Next pending event without blocking.
    pub fn poll(&self) -> Option<TrackerEvent> {
        match self.events.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }
}

impl DetectorControl for SyntheticDetector {
    fn stop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("[tracker] worker panicked");
            }
        }
    }
}
