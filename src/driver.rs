//! The 16-bit PWM driver.

use embedded_hal::digital::PinState;

use crate::channel::{Channel, Half, Mode, Route};
use crate::configure::{configure_sub_channel, init_timers};
use crate::duty::{EncodedDuty, duty_to_ocr, encode};
use crate::fmt::{debug, info, trace};
use crate::pins::{Gpio, Pin};
use crate::registers::{AuxTimer, CompareOutput, SubChannel, Timer, TimerBus};
use crate::sync::synchronize;

/// 16-bit PWM on up to four channels.
///
/// Timer1 drives [`Channel::Ch0A`] (D9) and [`Channel::Ch0B`] (D10) on its own. In the
/// four-channel modes, [`Channel::Ch1A`] (D6 + D11) and [`Channel::Ch1B`] (D5 + D3)
/// are each built from a Timer0 and a Timer2 output feeding an external flip-flop.
///
/// # Example
///
/// ```rust
/// use pwm16::{Channel, Mode, Pwm16};
/// use pwm16::sim::{PinBank, RegisterFile};
///
/// let mut pwm = Pwm16::new(Mode::FourChannel, RegisterFile::new(), PinBank::new());
///
/// pwm.write(Channel::Ch0A, 0x8000); // half duty on D9
/// pwm.write(Channel::Ch1A, 0x1234); // flip-flop channel on D6/D11
/// pwm.write(Channel::Ch1B, 0x0000); // static low, latch cleared
/// ```
///
/// On hardware, pass the [`avr`](crate::avr) register and pin wrappers instead of the
/// simulator. Note that the four-channel modes reprogram Timer0, which most Arduino
/// style runtimes use for their millisecond timebase.
pub struct Pwm16<T: TimerBus, G: Gpio> {
    mode: Mode,
    timers: T,
    pins: G,
}

impl<T: TimerBus, G: Gpio> Pwm16<T, G> {
    /// Configure the timers for `mode` and synchronize them.
    ///
    /// The driver owns the timer registers and pins from here on, so the one-time
    /// setup cannot run twice on the same peripherals.
    pub fn new(mode: Mode, mut timers: T, pins: G) -> Self {
        info!("Pwm16::new: mode={}", mode);
        init_timers(&mut timers, mode);
        synchronize(&mut timers);
        Self { mode, timers, pins }
    }

    /// The mode chosen at construction.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// The timer registers, for inspection.
    #[must_use]
    pub const fn timers(&self) -> &T {
        &self.timers
    }

    /// The GPIO collaborator, for inspection.
    #[must_use]
    pub const fn pins(&self) -> &G {
        &self.pins
    }

    /// Give back the timer registers and pins. Outputs keep running as last written.
    pub fn release(self) -> (T, G) {
        (self.timers, self.pins)
    }

    /// Set the duty of `channel`: `0x0000` is fully off, `0xFFFF` fully on.
    ///
    /// Writing [`Channel::Ch1A`] or [`Channel::Ch1B`] in [`Mode::TwoChannel`] does
    /// nothing at all.
    pub fn write(&mut self, channel: Channel, code: u16) {
        if !channel.is_available(self.mode) {
            trace!("Pwm16::write: {} unused in {}", channel, self.mode);
            return;
        }

        for pin in channel.pins() {
            self.pins.set_output(pin);
        }

        let encoded = encode(code);
        trace!("Pwm16::write: {} code={=u16:#x} -> {}", channel, code, encoded);
        match (channel.route(), encoded) {
            (_, EncodedDuty::FullyOn) => self.drive_channel_static(channel, PinState::High),
            (_, EncodedDuty::FullyOff) => {
                self.drive_channel_static(channel, PinState::Low);
                self.clear_latch(channel);
            }
            (Route::Primary(sub), EncodedDuty::Pwm { .. }) => {
                configure_sub_channel(&mut self.timers, self.mode, Timer::Timer1, sub);
                self.timers.set_compare(Timer::Timer1, sub, code);
            }
            (Route::Auxiliary(sub), EncodedDuty::Pwm { high, low }) => {
                self.write_auxiliary(channel, sub, high, low);
            }
        }
    }

    /// Reset the external flip-flop of an auxiliary channel.
    ///
    /// Both halves are forced low, then the low half is given a rising edge. The high
    /// half's compare output configuration is restored afterwards; the low half is
    /// left driven high with its compare unit disconnected. Primary channels and
    /// channels unused in the current mode are ignored.
    pub fn clear_latch(&mut self, channel: Channel) {
        let Route::Auxiliary(sub) = channel.route() else {
            return;
        };
        if !channel.is_available(self.mode) {
            return;
        }

        let high = self.mode.aux_timer(Half::High);
        let low = self.mode.aux_timer(Half::Low);
        debug!("Pwm16::clear_latch: {} high={} low={}", channel, high, low);

        critical_section::with(|_| {
            let saved = self.timers.control_a(high.timer());
            self.drive_static(high.timer(), sub, channel.aux_pin(high), PinState::Low);
            self.drive_static(low.timer(), sub, channel.aux_pin(low), PinState::Low);
            self.drive_static(low.timer(), sub, channel.aux_pin(low), PinState::High);
            self.timers.set_control_a(high.timer(), saved);
        });
    }

    fn write_auxiliary(&mut self, channel: Channel, sub: SubChannel, high: u8, low: u8) {
        let bytes = AuxTimer::ALL.map(|aux| match self.mode.half_of(aux) {
            Half::High => (aux, high),
            Half::Low => (aux, low),
        });

        // Zero bytes first: the latch clear disconnects the low half, which the
        // configure pass below reconnects when that half still has a duty.
        let mut needs_clear = false;
        for (aux, byte) in bytes {
            if duty_to_ocr(byte).is_none() {
                self.drive_static(aux.timer(), sub, channel.aux_pin(aux), PinState::Low);
                needs_clear = true;
            }
        }
        if needs_clear {
            self.clear_latch(channel);
        }

        // Configure before writing compares, or a stale OCR shows for one period.
        for (aux, byte) in bytes {
            if duty_to_ocr(byte).is_some() {
                configure_sub_channel(&mut self.timers, self.mode, aux.timer(), sub);
            }
        }
        for (aux, byte) in bytes {
            if let Some(ocr) = duty_to_ocr(byte) {
                self.timers.set_compare(aux.timer(), sub, u16::from(ocr));
            }
        }
    }

    fn drive_channel_static(&mut self, channel: Channel, level: PinState) {
        match channel.route() {
            Route::Primary(sub) => {
                let [pin, _] = channel.pins();
                self.drive_static(Timer::Timer1, sub, pin, level);
            }
            Route::Auxiliary(sub) => {
                for aux in AuxTimer::ALL {
                    self.drive_static(aux.timer(), sub, channel.aux_pin(aux), level);
                }
            }
        }
    }

    /// Disconnect `sub` of `timer` from its pin and drive the pin to `level`.
    fn drive_static(&mut self, timer: Timer, sub: SubChannel, pin: Pin, level: PinState) {
        critical_section::with(|_| {
            self.timers.modify_control_a(timer, |control_a| {
                control_a.with_compare_output(sub, CompareOutput::Disconnected)
            });
            self.pins.set_level(pin, level);
        });
    }
}
