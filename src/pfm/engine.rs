// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pulse-frequency-modulation engine for the three shield axes.
//!
//! The engine is driven from two contexts:
//!
//! - the timer interrupt calls [`PulseEngine::tick`] at the configured tick rate;
//! - the command context reconfigures axes between ticks.
//!
//! Multi-field or multi-axis updates from the command context go through
//! [`PulseEngine::suspend`], which keeps `tick()` a no-op until the returned guard is dropped.
//!
//! ```ignore
//! let mut engine = engine.suspend();
//! for axis in (AxisMask::X | AxisMask::Z).axes() {
//!     engine.set_target_freq(axis, 800, true);
//! }
//! // guard dropped here, ticking resumes
//! ```

use core::ops::{Deref, DerefMut};

use crate::config::{AXIS_COUNT, DEFAULT_TICK_RATE};
use crate::pfm::axis::{Axis, AxisMask, AxisPins, AxisState, ControlMode, PinId};

/// Platform outputs the engine drives.
pub trait CncShield {
    /// Drive an output line.
    fn write_pin(&mut self, pin: PinId, high: bool);

    /// Enable or disable the stepper drivers.
    fn set_outputs_enabled(&mut self, enabled: bool);

    /// Program the tick timer for `hz` and return the rate actually achieved.
    fn apply_tick_rate(&mut self, hz: u16) -> u16;
}

/// Owns all axis state and the shield outputs.
pub struct PulseEngine<S: CncShield> {
    axes: [AxisState; AXIS_COUNT],
    tick_rate: u16,
    isr_suspended: bool,
    shield: S,
}

impl<S: CncShield> PulseEngine<S> {
    /// Create the engine with every axis stopped in frequency control.
    ///
    /// The tick timer is not touched; bring-up calls [`Self::set_tick_rate`] to start it.
    pub fn init(shield: S, pins: [AxisPins; AXIS_COUNT], initial_deltas: [i32; AXIS_COUNT]) -> Self {
        let axes = [
            AxisState::new(Axis::X, pins[0], initial_deltas[0]),
            AxisState::new(Axis::Y, pins[1], initial_deltas[1]),
            AxisState::new(Axis::Z, pins[2], initial_deltas[2]),
        ];

        Self {
            axes,
            tick_rate: DEFAULT_TICK_RATE,
            isr_suspended: false,
            shield,
        }
    }

    #[inline]
    pub fn axis(&self, axis: Axis) -> &AxisState {
        &self.axes[axis.index()]
    }

    #[inline]
    fn axis_mut(&mut self, axis: Axis) -> &mut AxisState {
        &mut self.axes[axis.index()]
    }

    /// Hold `freq` in `direction` until told otherwise.
    pub fn set_target_freq(&mut self, axis: Axis, freq: u16, direction: bool) {
        self.axis_mut(axis).set_target_freq(freq, direction);
    }

    /// Move toward `target_delta` at `freq`, stopping on arrival.
    ///
    /// When the axis already sits at `target_delta` it is stopped instead.
    pub fn set_target_delta(&mut self, axis: Axis, freq: u16, target_delta: i32) {
        self.axis_mut(axis).set_target_delta(freq, target_delta);
    }

    /// Overwrite the position counter. Call with the engine suspended.
    ///
    /// Direction is not recomputed: an axis in delta control keeps stepping the way it was
    /// heading, even if the new position lies past its target.
    pub fn set_delta_steps(&mut self, axis: Axis, value: i32) {
        self.axis_mut(axis).set_delta_steps(value);
    }

    #[inline]
    pub fn delta_steps(&self, axis: Axis) -> i32 {
        self.axis(axis).delta_steps()
    }

    #[inline]
    pub fn control_mode(&self, axis: Axis) -> ControlMode {
        self.axis(axis).control_mode()
    }

    #[inline]
    pub fn select_flag(&self, axis: Axis) -> AxisMask {
        self.axis(axis).select_flag()
    }

    #[inline]
    pub fn axis_count(&self) -> usize {
        AXIS_COUNT
    }

    /// Reprogram the tick timer. The stored rate is the one the platform achieved.
    pub fn set_tick_rate(&mut self, hz: u16) {
        self.tick_rate = self.shield.apply_tick_rate(hz);
    }

    #[inline]
    pub fn tick_rate(&self) -> u16 {
        self.tick_rate
    }

    /// Raw suspend flag; `tick()` is a no-op while it is set.
    #[inline]
    pub fn suspend_isr(&mut self, suspended: bool) {
        self.isr_suspended = suspended;
    }

    #[inline]
    pub fn is_suspended(&self) -> bool {
        self.isr_suspended
    }

    /// Suspend ticking until the guard is dropped.
    ///
    /// Dropping the guard always clears the suspend flag, including one set earlier by
    /// `DISABLE_CNC`. The shield outputs stay disabled in that case.
    pub fn suspend(&mut self) -> SuspendGuard<'_, S> {
        self.isr_suspended = true;
        SuspendGuard { engine: self }
    }

    pub fn enable_outputs(&mut self) {
        self.shield.set_outputs_enabled(true);
    }

    pub fn disable_outputs(&mut self) {
        self.shield.set_outputs_enabled(false);
    }

    #[inline]
    pub fn shield(&self) -> &S {
        &self.shield
    }

    /// Advance every axis by one tick. Called from the timer interrupt.
    ///
    /// Returns the axes that emitted a pulse.
    pub fn tick(&mut self) -> AxisMask {
        let mut pulsed = AxisMask::empty();
        if self.isr_suspended {
            return pulsed;
        }

        let tick_rate = self.tick_rate;
        for (state, axis) in self.axes.iter_mut().zip(Axis::ALL) {
            if let Some(pulse) = state.advance(tick_rate) {
                let pins = state.pins();
                self.shield.write_pin(pins.dir, pulse.forward);
                self.shield.write_pin(pins.step, pulse.step_level);
                pulsed |= axis.select_flag();
            }
        }

        pulsed
    }
}

/// Scoped critical section over the engine; see [`PulseEngine::suspend`].
pub struct SuspendGuard<'a, S: CncShield> {
    engine: &'a mut PulseEngine<S>,
}

impl<S: CncShield> Deref for SuspendGuard<'_, S> {
    type Target = PulseEngine<S>;

    fn deref(&self) -> &Self::Target {
        &*self.engine
    }
}

impl<S: CncShield> DerefMut for SuspendGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.engine
    }
}

impl<S: CncShield> Drop for SuspendGuard<'_, S> {
    fn drop(&mut self) {
        self.engine.isr_suspended = false;
    }
}
