//! The kick voice, split into a render half and a control half.
//!
//! [`KickVoice::new`] returns a pair. The [`KickVoice`] is moved into the
//! audio callback and only ever touched there. The [`KickHandle`] stays on
//! the control thread: it owns the parameters, arms triggers, renders
//! previews and dispatches observer callbacks.
//!
//! ```text
//!   control thread                         audio thread
//!   ──────────────                         ────────────
//!   trigger()
//!     snapshot params
//!     build ArmedVoice ──KickCommand──►  render_block()
//!     fire on_started                       drain commands
//!                                           render, write history
//!   poll_events()     ◄──KickEvent───       voice done → Completed
//!     fire on_completed                     retrigger  → Discarded
//! ```
//!
//! Every accepted trigger comes back as exactly one event. The handle
//! refuses triggers while `event_capacity` voices are unaccounted for, so
//! the event queue always has room and the render side never has to drop
//! (and so free) a snapshot. The render side never allocates, frees, logs
//! or waits on anything but the short history lock.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use rtrb::{Consumer, Producer, PushError, RingBuffer};

use crate::{
    config::KickConfig,
    synth::{
        history::HistoryBuffer,
        message::{KickCommand, KickEvent},
        params::{KickParams, KickSettings},
        preview,
        voice::{ArmedVoice, VoiceCursor},
    },
    MAX_BLOCK_SIZE,
};

/// A voice in flight on the render side.
struct ActiveVoice {
    voice: ArmedVoice,
    cursor: VoiceCursor,
    snapshot: Vec<f32>,
}

impl ActiveVoice {
    /// Render into `out`. Returns true if the voice finished in this block,
    /// in which case the remainder of `out` is silence.
    fn render(&mut self, out: &mut [f32]) -> bool {
        for i in 0..out.len() {
            if self.voice.is_finished(&self.cursor) {
                out[i..].fill(0.0);
                return true;
            }

            let sample = self.voice.render_frame(&mut self.cursor);
            // Capacity was reserved at trigger time, capped at MAX_VOICE_FRAMES
            if self.snapshot.len() < self.snapshot.capacity() {
                self.snapshot.push(sample);
            }
            out[i] = sample;
        }
        false
    }
}

/// Render half of a kick voice. Lives in the audio callback.
pub struct KickVoice {
    commands: Consumer<KickCommand>,
    events: Producer<KickEvent>,
    active: Option<ActiveVoice>,
    history: Arc<HistoryBuffer>,
    playing: Arc<AtomicBool>,
    scratch: Vec<f32>,
}

impl KickVoice {
    /// Create a voice and its control handle.
    ///
    /// An unusable sample rate is not an error here: triggers become no-ops
    /// and previews come back empty.
    pub fn new(config: KickConfig) -> (KickVoice, KickHandle) {
        let event_capacity = config.event_capacity.max(1);
        let (command_tx, command_rx) = RingBuffer::<KickCommand>::new(config.command_capacity.max(1));
        let (event_tx, event_rx) = RingBuffer::<KickEvent>::new(event_capacity);

        let history = Arc::new(HistoryBuffer::new(config.history_len));
        let playing = Arc::new(AtomicBool::new(false));

        let voice = KickVoice {
            commands: command_rx,
            events: event_tx,
            active: None,
            history: Arc::clone(&history),
            playing: Arc::clone(&playing),
            scratch: vec![0.0; MAX_BLOCK_SIZE],
        };

        let handle = KickHandle {
            params: Arc::new(KickParams::new(config.settings)),
            history,
            commands: command_tx,
            events: event_rx,
            playing,
            in_flight: 0,
            max_in_flight: event_capacity,
            sample_rate: config.sample_rate,
            started_observers: Vec::new(),
            completed_observers: Vec::new(),
        };

        (voice, handle)
    }

    /// Render one host block of interleaved audio.
    ///
    /// Every channel of a frame receives the same mono sample. Samples past
    /// the last whole frame are zeroed. `channels == 0` renders nothing.
    pub fn render_block(&mut self, buffer: &mut [f32], channels: usize) {
        if channels == 0 {
            return;
        }

        self.drain_commands();

        let frames = buffer.len() / channels;
        let mut written = 0;

        while written < frames {
            let n = (frames - written).min(MAX_BLOCK_SIZE);
            let block = &mut self.scratch[..n];

            let finished = match self.active.as_mut() {
                Some(active) => active.render(block),
                None => {
                    block.fill(0.0);
                    false
                }
            };

            // Duplicate mono to all channels
            let out = &mut buffer[written * channels..(written + n) * channels];
            for (frame, &sample) in out.chunks_exact_mut(channels).zip(block.iter()) {
                frame.fill(sample);
            }

            self.history.write(block);

            if finished {
                self.finish();
            }

            written += n;
        }

        buffer[frames * channels..].fill(0.0);
    }

    /// True while a voice is sounding on the render side.
    pub fn is_playing(&self) -> bool {
        self.active.is_some()
    }

    pub fn history(&self) -> &Arc<HistoryBuffer> {
        &self.history
    }

    fn drain_commands(&mut self) {
        while let Ok(command) = self.commands.pop() {
            match command {
                KickCommand::Trigger { voice, snapshot } => self.start(voice, snapshot),
            }
        }
    }

    fn start(&mut self, voice: ArmedVoice, snapshot: Vec<f32>) {
        if let Some(previous) = self.active.take() {
            self.send(KickEvent::Discarded(previous.snapshot));
        }

        self.active = Some(ActiveVoice {
            voice,
            cursor: VoiceCursor::new(),
            snapshot,
        });
        self.history.reset_cursor();
        self.playing.store(true, Ordering::Release);
    }

    fn finish(&mut self) {
        if let Some(active) = self.active.take() {
            // A trigger queued behind this voice keeps the handle reporting busy
            if self.commands.is_empty() {
                self.playing.store(false, Ordering::Release);
            }
            self.send(KickEvent::Completed(active.snapshot));
        }
    }

    fn send(&mut self, event: KickEvent) {
        // Cannot fail while the handle caps in-flight voices at the queue
        // capacity. Should it ever, leak instead of freeing on this thread.
        let pushed = self.events.push(event);
        debug_assert!(pushed.is_ok(), "kick event queue overflow");
        if let Err(PushError::Full(event)) = pushed {
            std::mem::forget(event);
        }
    }
}

/// Control half of a kick voice. Lives on the UI / control thread.
pub struct KickHandle {
    params: Arc<KickParams>,
    history: Arc<HistoryBuffer>,
    commands: Producer<KickCommand>,
    events: Consumer<KickEvent>,
    playing: Arc<AtomicBool>,
    /// Accepted triggers whose event has not been polled yet.
    in_flight: usize,
    max_in_flight: usize,
    sample_rate: f32,
    started_observers: Vec<Box<dyn FnMut() + Send>>,
    completed_observers: Vec<Box<dyn FnMut(&[f32]) + Send>>,
}

impl KickHandle {
    /// Shared parameter store. Clone the `Arc` to edit from other threads.
    pub fn params(&self) -> &Arc<KickParams> {
        &self.params
    }

    /// Current parameter values.
    pub fn settings(&self) -> KickSettings {
        self.params.snapshot()
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Shared history ring, for readers on a third thread.
    pub fn history(&self) -> Arc<HistoryBuffer> {
        Arc::clone(&self.history)
    }

    /// Copy the newest rendered samples into `destination`, oldest first.
    pub fn copy_latest(&self, destination: &mut [f32]) -> usize {
        self.history.copy_latest(destination)
    }

    /// Arm a new voice from the current parameters.
    ///
    /// Any voice still sounding is cut off at the next block and its
    /// snapshot is discarded. Started observers run before this returns.
    /// Returns `false`, with no audible effect, when there is no usable
    /// sample rate, the render side has fallen too far behind, or
    /// `event_capacity` earlier voices are still waiting for `poll_events`.
    pub fn trigger(&mut self) -> bool {
        let settings = self.params.snapshot();
        let Some(voice) = ArmedVoice::new(&settings, self.sample_rate) else {
            tracing::debug!(sample_rate = self.sample_rate, "trigger deferred: no usable sample rate");
            return false;
        };

        if self.in_flight >= self.max_in_flight {
            tracing::warn!(
                in_flight = self.in_flight,
                "trigger dropped: poll_events has fallen behind"
            );
            return false;
        }

        let frames = voice.snapshot_len();
        let command = KickCommand::Trigger {
            voice,
            snapshot: Vec::with_capacity(frames),
        };
        if self.commands.push(command).is_err() {
            tracing::warn!("trigger dropped: command queue full");
            return false;
        }

        self.in_flight += 1;
        self.playing.store(true, Ordering::Release);
        for observer in &mut self.started_observers {
            observer();
        }
        tracing::debug!(frames, "kick armed");
        true
    }

    /// Whether a voice is armed or sounding.
    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Acquire)
    }

    /// Register a callback fired inside every successful `trigger()`.
    pub fn on_started(&mut self, observer: impl FnMut() + Send + 'static) {
        self.started_observers.push(Box::new(observer));
    }

    /// Register a callback fired from `poll_events()` once per voice that
    /// ran to completion, with every sample of that voice.
    pub fn on_completed(&mut self, observer: impl FnMut(&[f32]) + Send + 'static) {
        self.completed_observers.push(Box::new(observer));
    }

    /// Deliver pending render-side events. Returns how many completed
    /// voices were dispatched.
    pub fn poll_events(&mut self) -> usize {
        let mut delivered = 0;
        while let Ok(event) = self.events.pop() {
            self.in_flight = self.in_flight.saturating_sub(1);
            match event {
                KickEvent::Completed(samples) => {
                    for observer in &mut self.completed_observers {
                        observer(&samples);
                    }
                    delivered += 1;
                }
                KickEvent::Discarded(_) => {}
            }
        }
        delivered
    }

    /// Preview of the current parameters, resampled to `output_len` points.
    pub fn render_preview(&self, output_len: usize) -> Vec<f32> {
        preview::render_preview(&self.params.snapshot(), self.sample_rate, output_len)
    }

    /// The full voice the current parameters would produce.
    pub fn render_voice(&self) -> Vec<f32> {
        preview::render_voice(&self.params.snapshot(), self.sample_rate)
    }
}
