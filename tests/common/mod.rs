// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

#![allow(dead_code)]

use std::collections::HashMap;

use cnc_pfm::config::CNC_SHIELD_PINS;
use cnc_pfm::imu::{ImuFrame, ImuSource};
use cnc_pfm::pfm::{Axis, CncShield, ControlMode, PinId, PulseEngine};

/// Shield double that remembers every line it was asked to drive.
#[derive(Debug, Default)]
pub struct RecordingShield {
    pub writes: Vec<(PinId, bool)>,
    pub levels: HashMap<PinId, bool>,
    pub enabled: bool,
    /// When set, tick rates are rounded the way a timer clocked at this rate would round them.
    pub timer_clock_hz: Option<u32>,
    pub requested_rates: Vec<u16>,
}

impl RecordingShield {
    pub fn with_timer_clock(hz: u32) -> Self {
        Self {
            timer_clock_hz: Some(hz),
            ..Self::default()
        }
    }

    pub fn level(&self, pin: PinId) -> bool {
        self.levels.get(&pin).copied().unwrap_or(false)
    }

    /// Number of writes to `pin`.
    pub fn writes_to(&self, pin: PinId) -> usize {
        self.writes.iter().filter(|(p, _)| *p == pin).count()
    }
}

impl CncShield for RecordingShield {
    fn write_pin(&mut self, pin: PinId, high: bool) {
        self.writes.push((pin, high));
        self.levels.insert(pin, high);
    }

    fn set_outputs_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn apply_tick_rate(&mut self, hz: u16) -> u16 {
        self.requested_rates.push(hz);
        match self.timer_clock_hz {
            Some(clock) => {
                let reload = (clock / u32::from(hz.max(1))).max(1);
                (clock / reload).min(u32::from(u16::MAX)) as u16
            }
            None => hz,
        }
    }
}

/// IMU source returning the same frame every time.
#[derive(Debug, Default)]
pub struct FixedImu {
    pub frame: ImuFrame,
    pub reads: usize,
}

impl FixedImu {
    pub fn new(frame: ImuFrame) -> Self {
        Self { frame, reads: 0 }
    }
}

impl ImuSource for FixedImu {
    fn measurement(&mut self) -> ImuFrame {
        self.reads += 1;
        self.frame
    }
}

pub fn engine() -> PulseEngine<RecordingShield> {
    PulseEngine::init(RecordingShield::default(), CNC_SHIELD_PINS, [0; 3])
}

/// Comparable view of everything a command may change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub axes: Vec<(i32, u16, bool, ControlMode, i32, u16)>,
    pub tick_rate: u16,
    pub suspended: bool,
    pub enabled: bool,
}

pub fn snapshot(engine: &PulseEngine<RecordingShield>) -> Snapshot {
    Snapshot {
        axes: Axis::ALL
            .iter()
            .map(|&axis| {
                let s = engine.axis(axis);
                (
                    s.delta_steps(),
                    s.target_freq(),
                    s.direction(),
                    s.control_mode(),
                    s.target_delta(),
                    s.tick_counter(),
                )
            })
            .collect(),
        tick_rate: engine.tick_rate(),
        suspended: engine.is_suspended(),
        enabled: engine.shield().enabled,
    }
}

pub fn run_ticks<S: CncShield>(engine: &mut PulseEngine<S>, n: usize) {
    for _ in 0..n {
        engine.tick();
    }
}
