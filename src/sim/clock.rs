//! Fixed timestep driver
//!
//! Decouples the simulations from the host's repaint timer. The browser loop,
//! the native demo and the tests all advance a game through the same
//! `Simulation::step` call.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// A game that advances in whole ticks
pub trait Simulation {
    /// Commands for a single tick. `Default` means "no input".
    type Input: Default + Clone;

    /// Advance by exactly one tick
    fn step(&mut self, input: &Self::Input);

    /// Forget one-shot commands (taps, lane changes) once a tick has seen
    /// them. Held modes survive.
    fn clear_one_shots(input: &mut Self::Input) {
        *input = Self::Input::default();
    }
}

/// Accumulates wall-clock time and converts it into whole ticks
#[derive(Debug, Clone)]
pub struct FixedStep {
    accumulator: f32,
    dt: f32,
    ticks: u64,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SIM_DT)
    }
}

impl FixedStep {
    pub fn new(dt: f32) -> Self {
        Self {
            accumulator: 0.0,
            dt,
            ticks: 0,
        }
    }

    /// Total ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Forget any banked time (after a restart or a hidden tab)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// Run as many ticks as `frame_dt` seconds cover.
    ///
    /// One-shot input is consumed by the first substep; later substeps of the
    /// same frame see it cleared. Returns the number of ticks run.
    pub fn advance<S: Simulation>(&mut self, sim: &mut S, input: &mut S::Input, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= self.dt && substeps < MAX_SUBSTEPS {
            let pending = input.clone();
            S::clear_one_shots(input);
            sim.step(&pending);
            self.accumulator -= self.dt;
            self.ticks += 1;
            substeps += 1;
        }

        // Drop whatever we could not catch up on
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(self.dt);
        }

        substeps
    }
}
