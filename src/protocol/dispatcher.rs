// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Command dispatcher.
//!
//! Each `(command, payload)` pair is fully decoded and validated before anything is applied, so a
//! rejected command leaves the engine untouched and produces an empty response. Only read-only
//! commands produce response bytes, so a response that does not fit is reported without any
//! state having changed.

use heapless::Vec;

use crate::config::MAX_RESPONSE;
use crate::imu::ImuSource;
use crate::pfm::{CncShield, PulseEngine};
use crate::protocol::codec::{push_i16_le, push_i32_le, push_u16_le};
use crate::protocol::error::DispatchError;
use crate::protocol::messages::Request;

/// Response buffer sized for the largest reply.
pub type Response = Vec<u8, MAX_RESPONSE>;

/// Applies host commands to the pulse engine.
///
/// Borrowed for the duration of one command; the caller decides how the engine is shared with
/// the timer interrupt.
pub struct CommandDispatcher<'a, S: CncShield, I: ImuSource> {
    engine: &'a mut PulseEngine<S>,
    imu: &'a mut I,
}

impl<'a, S: CncShield, I: ImuSource> CommandDispatcher<'a, S, I> {
    pub fn new(engine: &'a mut PulseEngine<S>, imu: &'a mut I) -> Self {
        Self { engine, imu }
    }

    /// Decode and execute one command, writing its response into `response`.
    ///
    /// `response` is cleared first and stays empty on failure.
    pub fn process<const N: usize>(
        &mut self,
        command: u8,
        payload: &[u8],
        response: &mut Vec<u8, N>,
    ) -> Result<(), DispatchError> {
        response.clear();

        Request::decode(command, payload)
            .and_then(|request| self.apply(command, request, response))
            .inspect_err(|_err| {
                response.clear();

                #[cfg(feature = "defmt")]
                defmt::warn!("dispatch: rejected: {}", _err);
            })
    }

    fn apply<const N: usize>(
        &mut self,
        command: u8,
        request: Request,
        response: &mut Vec<u8, N>,
    ) -> Result<(), DispatchError> {
        let fits = |pushed: bool| {
            if pushed {
                Ok(())
            } else {
                Err(DispatchError::ResponseOverflow { command })
            }
        };

        match request {
            Request::SetTargetFreq {
                axes,
                freq,
                direction,
            } => {
                let mut engine = self.engine.suspend();
                for axis in axes.axes() {
                    engine.set_target_freq(axis, freq, direction);
                }
            }

            Request::SetTargetDelta {
                axes,
                freq,
                target_delta,
            } => {
                let mut engine = self.engine.suspend();
                for axis in axes.axes() {
                    engine.set_target_delta(axis, freq, target_delta);
                }
            }

            Request::GetDeltaSteps { axes } => {
                // With several axes selected, the last one in X, Y, Z order wins.
                let value = axes
                    .axes()
                    .next_back()
                    .map(|axis| self.engine.delta_steps(axis))
                    .unwrap_or(0);
                fits(push_i32_le(response, value))?;
            }

            Request::GetImuMeasurement => {
                let frame = self.imu.measurement();
                for channel in frame.channels() {
                    fits(push_i16_le(response, channel))?;
                }
            }

            Request::SetIsrFreq { freq } => {
                self.engine.set_tick_rate(freq);

                #[cfg(feature = "defmt")]
                defmt::info!(
                    "dispatch: tick rate {=u16} Hz (requested {=u16})",
                    self.engine.tick_rate(),
                    freq
                );
            }

            Request::EnableCnc => {
                self.engine.enable_outputs();
                self.engine.suspend_isr(false);

                #[cfg(feature = "defmt")]
                defmt::info!("dispatch: shield enabled");
            }

            Request::DisableCnc => {
                self.engine.suspend_isr(true);
                self.engine.disable_outputs();

                #[cfg(feature = "defmt")]
                defmt::info!("dispatch: shield disabled");
            }

            Request::SetDeltaSteps { axes, value } => {
                let mut engine = self.engine.suspend();
                for axis in axes.axes() {
                    engine.set_delta_steps(axis, value);
                }
            }

            Request::GetIsrFreq => {
                fits(push_u16_le(response, self.engine.tick_rate()))?;
                fits(push_u16_le(response, 0))?;
            }
        }

        Ok(())
    }
}
