//! Frame driver
//!
//! Owns the single [`GameState`] and everything that mutates it: the spawn
//! interval timer, the seeded RNG, held input and the soundtrack. Browser
//! callbacks (animation frames, DOM events) hold the driver behind one
//! `Rc<RefCell<_>>` and run one at a time, so no further locking is needed.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::Soundtrack;
use crate::platform::{AssetGate, InputCommand, InputEvent, InputState};
use crate::sim::{GameEvent, GameState, spawn_rock, tick};
use crate::tuning::Tuning;
use crate::ui::GameOverLayout;

/// Longest frame delta fed to the spawn timer (a backgrounded tab must not
/// come back to a burst of rocks)
pub const MAX_FRAME_MS: f64 = 100.0;

/// Fixed-interval timer driven by variable frame deltas
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    interval_ms: f64,
    accumulator_ms: f64,
}

impl IntervalTimer {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: f64::from(interval_ms.max(1)),
            accumulator_ms: 0.0,
        }
    }

    /// Add elapsed time. Returns how many intervals completed.
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        self.accumulator_ms += elapsed_ms.max(0.0);
        let fired = (self.accumulator_ms / self.interval_ms).floor();
        self.accumulator_ms -= fired * self.interval_ms;
        fired as u32
    }
}

/// Game context: the state plus the collaborators that act on it
pub struct Driver {
    pub state: GameState,
    pub soundtrack: Soundtrack,
    tuning: Tuning,
    layout: GameOverLayout,
    input: InputState,
    assets: AssetGate,
    spawn_timer: IntervalTimer,
    rng: Pcg32,
}

impl Driver {
    pub fn new(tuning: Tuning, seed: u64, assets: AssetGate) -> Self {
        log::info!(
            "Driver created: field {}x{}, spawn every {} ms, seed {}",
            tuning.field_width,
            tuning.field_height,
            tuning.spawn_interval_ms,
            seed
        );
        Self {
            state: GameState::new(&tuning),
            soundtrack: Soundtrack::new(),
            layout: GameOverLayout::for_field(tuning.field_size()),
            input: InputState::new(),
            assets,
            spawn_timer: IntervalTimer::new(tuning.spawn_interval_ms),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn layout(&self) -> &GameOverLayout {
        &self.layout
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// Timers run only once every asset is in
    #[inline]
    pub fn is_running(&self) -> bool {
        self.assets.is_ready()
    }

    /// Forward an asset completion. Returns `true` when this call starts the game.
    pub fn mark_asset_loaded(&mut self, name: &str) -> bool {
        let started = self.assets.mark_loaded(name);
        if started {
            log::info!("All assets ready, starting timers");
        } else if !self.assets.is_ready() {
            let waiting: Vec<&str> = self.assets.pending().collect();
            log::info!("Loaded {}, still waiting on {:?}", name, waiting);
        }
        started
    }

    /// Whether taps on the field belong to the game (the restart screen)
    /// rather than to the page
    #[inline]
    pub fn captures_field_taps(&self) -> bool {
        self.state.is_game_over()
    }

    /// Handle one input event: unlock audio on gestures, update held flags,
    /// and restart when requested from the game-over screen.
    pub fn handle_input(&mut self, event: InputEvent) {
        if event.is_user_gesture() {
            self.soundtrack.on_user_gesture();
        }
        let command = self.input.apply(event, self.state.phase, &self.layout);
        if command == Some(InputCommand::Restart) {
            self.restart();
        }
    }

    /// Explicit restart. Only honoured while the game is over.
    pub fn restart(&mut self) -> bool {
        let restarted = self.state.restart(&self.tuning);
        if restarted {
            self.dispatch_events();
        }
        restarted
    }

    /// One rendered frame: due spawns, then one simulation tick.
    ///
    /// Returns the events emitted since the previous frame. Does nothing
    /// until the asset gate opens.
    pub fn frame(&mut self, elapsed_ms: f64) -> Vec<GameEvent> {
        if !self.is_running() {
            return Vec::new();
        }

        let elapsed_ms = elapsed_ms.clamp(0.0, MAX_FRAME_MS);
        for _ in 0..self.spawn_timer.advance(elapsed_ms) {
            spawn_rock(&mut self.state, &self.tuning, &mut self.rng);
        }

        tick(&mut self.state, &self.input.intent(), &self.tuning);
        self.dispatch_events()
    }

    /// Drain state events and let the soundtrack react to them
    fn dispatch_events(&mut self) -> Vec<GameEvent> {
        let events = self.state.drain_events();
        for event in &events {
            self.soundtrack.on_event(event);
        }
        events
    }
}
