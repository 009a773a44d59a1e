// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Per-axis runtime state of the pulse engine.

use bitflags::bitflags;

use crate::config::{AXIS_COUNT, INACTIVE_FREQ};

/// One of the three stepper axes driven by the shield.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in the fixed X, Y, Z iteration order.
    pub const ALL: [Axis; AXIS_COUNT] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Bit used for this axis in multi-axis commands.
    #[inline]
    pub const fn select_flag(self) -> AxisMask {
        match self {
            Axis::X => AxisMask::X,
            Axis::Y => AxisMask::Y,
            Axis::Z => AxisMask::Z,
        }
    }
}

bitflags! {
    /// Axis selection bitmask as carried on the wire.
    ///
    /// Unknown bits are retained but never match an axis.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AxisMask: u8 {
        const X = 0x01;
        const Y = 0x02;
        const Z = 0x04;
    }
}

impl AxisMask {
    /// Selected axes, in X, Y, Z order.
    pub fn axes(self) -> impl DoubleEndedIterator<Item = Axis> {
        Axis::ALL
            .into_iter()
            .filter(move |axis| self.contains(axis.select_flag()))
    }
}

/// Opaque handle to a physical output line, owned by the platform layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId(pub u8);

/// Step and direction lines for one axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AxisPins {
    pub step: PinId,
    pub dir: PinId,
}

/// How an axis decides its pulse rate and when to stop.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlMode {
    /// Hold `target_freq` and `direction` indefinitely.
    FrequencyControl,

    /// Step toward `target_delta`, stopping on arrival.
    DeltaControl,
}

/// Pin levels to drive after a pulse was scheduled on an axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Pulse {
    pub step_level: bool,
    pub forward: bool,
}

/// Runtime state of one axis.
#[derive(Clone, Debug)]
pub struct AxisState {
    pins: AxisPins,
    select_flag: AxisMask,

    /// Signed step position relative to initialization.
    delta_steps: i32,
    /// Pulses per second, `INACTIVE_FREQ` when idle.
    target_freq: u16,
    direction: bool,
    control_mode: ControlMode,
    target_delta: i32,

    /// Ticks elapsed since the last pulse.
    tick_counter: u16,
    step_level: bool,
}

impl AxisState {
    pub(crate) fn new(axis: Axis, pins: AxisPins, delta_steps: i32) -> Self {
        Self {
            pins,
            select_flag: axis.select_flag(),
            delta_steps,
            target_freq: INACTIVE_FREQ,
            direction: true,
            control_mode: ControlMode::FrequencyControl,
            target_delta: 0,
            tick_counter: 0,
            step_level: false,
        }
    }

    #[inline]
    pub fn pins(&self) -> AxisPins {
        self.pins
    }

    #[inline]
    pub fn select_flag(&self) -> AxisMask {
        self.select_flag
    }

    #[inline]
    pub fn delta_steps(&self) -> i32 {
        self.delta_steps
    }

    #[inline]
    pub fn target_freq(&self) -> u16 {
        self.target_freq
    }

    #[inline]
    pub fn direction(&self) -> bool {
        self.direction
    }

    #[inline]
    pub fn control_mode(&self) -> ControlMode {
        self.control_mode
    }

    #[inline]
    pub fn target_delta(&self) -> i32 {
        self.target_delta
    }

    #[inline]
    pub fn tick_counter(&self) -> u16 {
        self.tick_counter
    }

    /// Whether the axis is currently emitting pulses.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.target_freq != INACTIVE_FREQ
    }

    pub(crate) fn set_target_freq(&mut self, freq: u16, direction: bool) {
        self.control_mode = ControlMode::FrequencyControl;
        self.target_freq = sanitize(freq);
        self.direction = direction;
        self.tick_counter = 0;
    }

    pub(crate) fn set_target_delta(&mut self, freq: u16, target_delta: i32) {
        self.tick_counter = 0;

        if target_delta == self.delta_steps {
            self.stop();
            return;
        }

        self.control_mode = ControlMode::DeltaControl;
        self.target_delta = target_delta;
        self.target_freq = sanitize(freq);
        self.direction = target_delta > self.delta_steps;
    }

    /// Overwrites the position only; direction and target are left as they are.
    pub(crate) fn set_delta_steps(&mut self, value: i32) {
        self.delta_steps = value;
    }

    fn stop(&mut self) {
        self.target_freq = INACTIVE_FREQ;
        self.control_mode = ControlMode::FrequencyControl;
    }

    /// Advance this axis by one tick at `tick_rate`.
    ///
    /// Returns the pin levels to drive when a pulse is due. Constant time, no division when the
    /// axis is inactive.
    pub(crate) fn advance(&mut self, tick_rate: u16) -> Option<Pulse> {
        if !self.is_active() {
            return None;
        }

        self.tick_counter = self.tick_counter.saturating_add(1);
        let threshold = tick_rate / self.target_freq;
        if self.tick_counter < threshold {
            return None;
        }

        self.tick_counter = 0;
        self.step_level = !self.step_level;
        self.delta_steps = if self.direction {
            self.delta_steps.wrapping_add(1)
        } else {
            self.delta_steps.wrapping_sub(1)
        };

        if self.control_mode == ControlMode::DeltaControl && self.delta_steps == self.target_delta {
            self.stop();
        }

        Some(Pulse {
            step_level: self.step_level,
            forward: self.direction,
        })
    }
}

/// A literal 0 would divide by zero in `advance`; treat it as "off".
#[inline]
fn sanitize(freq: u16) -> u16 {
    if freq == 0 {
        INACTIVE_FREQ
    } else {
        freq
    }
}
