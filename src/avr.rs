//! [`TimerBus`] and [`Gpio`] over the ATmega328P/168 peripherals from `avr-device`.
//!
//! Timer1's compare, counter and ICR1 registers share one TEMP byte for 16-bit
//! access, so every 16-bit access runs in a critical section. Port read-modify-writes
//! do too, which saves and restores SREG around them.
#![expect(unsafe_code, reason = "raw bit writes to timer and port registers")]

#[cfg(feature = "atmega168")]
use avr_device::atmega168 as pac;
#[cfg(feature = "atmega328p")]
use avr_device::atmega328p as pac;
use embedded_hal::digital::PinState;

use crate::pins::{Gpio, Pin, Port};
use crate::registers::{ControlA, ControlB, Gtccr, SubChannel, Timer, TimerBus};

// ============================================================================
// Timers
// ============================================================================

/// Owned Timer/Counter0, 1 and 2.
pub struct AvrTimers {
    tc0: pac::TC0,
    tc1: pac::TC1,
    tc2: pac::TC2,
}

impl AvrTimers {
    /// Take ownership of the three timer peripherals.
    #[must_use]
    pub const fn new(tc0: pac::TC0, tc1: pac::TC1, tc2: pac::TC2) -> Self {
        Self { tc0, tc1, tc2 }
    }
}

impl TimerBus for AvrTimers {
    fn control_a(&self, timer: Timer) -> ControlA {
        ControlA::from_bits_retain(match timer {
            Timer::Timer0 => self.tc0.tccr0a.read().bits(),
            Timer::Timer1 => self.tc1.tccr1a.read().bits(),
            Timer::Timer2 => self.tc2.tccr2a.read().bits(),
        })
    }

    fn set_control_a(&mut self, timer: Timer, value: ControlA) {
        let bits = value.bits();
        match timer {
            Timer::Timer0 => self.tc0.tccr0a.write(|w| unsafe { w.bits(bits) }),
            Timer::Timer1 => self.tc1.tccr1a.write(|w| unsafe { w.bits(bits) }),
            Timer::Timer2 => self.tc2.tccr2a.write(|w| unsafe { w.bits(bits) }),
        }
    }

    fn control_b(&self, timer: Timer) -> ControlB {
        ControlB::from_bits_retain(match timer {
            Timer::Timer0 => self.tc0.tccr0b.read().bits(),
            Timer::Timer1 => self.tc1.tccr1b.read().bits(),
            Timer::Timer2 => self.tc2.tccr2b.read().bits(),
        })
    }

    fn set_control_b(&mut self, timer: Timer, value: ControlB) {
        let bits = value.bits();
        match timer {
            Timer::Timer0 => self.tc0.tccr0b.write(|w| unsafe { w.bits(bits) }),
            Timer::Timer1 => self.tc1.tccr1b.write(|w| unsafe { w.bits(bits) }),
            Timer::Timer2 => self.tc2.tccr2b.write(|w| unsafe { w.bits(bits) }),
        }
    }

    fn compare(&self, timer: Timer, sub: SubChannel) -> u16 {
        match (timer, sub) {
            (Timer::Timer0, SubChannel::A) => u16::from(self.tc0.ocr0a.read().bits()),
            (Timer::Timer0, SubChannel::B) => u16::from(self.tc0.ocr0b.read().bits()),
            (Timer::Timer2, SubChannel::A) => u16::from(self.tc2.ocr2a.read().bits()),
            (Timer::Timer2, SubChannel::B) => u16::from(self.tc2.ocr2b.read().bits()),
            (Timer::Timer1, SubChannel::A) => {
                critical_section::with(|_| self.tc1.ocr1a.read().bits())
            }
            (Timer::Timer1, SubChannel::B) => {
                critical_section::with(|_| self.tc1.ocr1b.read().bits())
            }
        }
    }

    fn set_compare(&mut self, timer: Timer, sub: SubChannel, value: u16) {
        let [_, low] = value.to_be_bytes();
        match (timer, sub) {
            (Timer::Timer0, SubChannel::A) => self.tc0.ocr0a.write(|w| unsafe { w.bits(low) }),
            (Timer::Timer0, SubChannel::B) => self.tc0.ocr0b.write(|w| unsafe { w.bits(low) }),
            (Timer::Timer2, SubChannel::A) => self.tc2.ocr2a.write(|w| unsafe { w.bits(low) }),
            (Timer::Timer2, SubChannel::B) => self.tc2.ocr2b.write(|w| unsafe { w.bits(low) }),
            (Timer::Timer1, SubChannel::A) => critical_section::with(|_| {
                self.tc1.ocr1a.write(|w| unsafe { w.bits(value) });
            }),
            (Timer::Timer1, SubChannel::B) => critical_section::with(|_| {
                self.tc1.ocr1b.write(|w| unsafe { w.bits(value) });
            }),
        }
    }

    fn counter(&self, timer: Timer) -> u16 {
        match timer {
            Timer::Timer0 => u16::from(self.tc0.tcnt0.read().bits()),
            Timer::Timer1 => critical_section::with(|_| self.tc1.tcnt1.read().bits()),
            Timer::Timer2 => u16::from(self.tc2.tcnt2.read().bits()),
        }
    }

    fn set_counter(&mut self, timer: Timer, value: u16) {
        let [_, low] = value.to_be_bytes();
        match timer {
            Timer::Timer0 => self.tc0.tcnt0.write(|w| unsafe { w.bits(low) }),
            Timer::Timer1 => critical_section::with(|_| {
                self.tc1.tcnt1.write(|w| unsafe { w.bits(value) });
            }),
            Timer::Timer2 => self.tc2.tcnt2.write(|w| unsafe { w.bits(low) }),
        }
    }

    fn top(&self) -> u16 {
        critical_section::with(|_| self.tc1.icr1.read().bits())
    }

    fn set_top(&mut self, value: u16) {
        critical_section::with(|_| {
            self.tc1.icr1.write(|w| unsafe { w.bits(value) });
        });
    }

    // GTCCR is mapped into the TC0 register block by the PAC.
    fn gtccr(&self) -> Gtccr {
        Gtccr::from_bits_retain(self.tc0.gtccr.read().bits())
    }

    fn set_gtccr(&mut self, value: Gtccr) {
        let bits = value.bits();
        self.tc0.gtccr.write(|w| unsafe { w.bits(bits) });
    }
}

// ============================================================================
// Pins
// ============================================================================

/// Owned PORTB and PORTD, driving D3, D5, D6 (PORTD) and D9, D10, D11 (PORTB).
pub struct AvrPins {
    portb: pac::PORTB,
    portd: pac::PORTD,
}

impl AvrPins {
    /// Take ownership of the two ports.
    #[must_use]
    pub const fn new(portb: pac::PORTB, portd: pac::PORTD) -> Self {
        Self { portb, portd }
    }
}

impl Gpio for AvrPins {
    fn set_output(&mut self, pin: Pin) {
        let mask = pin.mask();
        critical_section::with(|_| match pin.port() {
            Port::B => self
                .portb
                .ddrb
                .modify(|r, w| unsafe { w.bits(r.bits() | mask) }),
            Port::D => self
                .portd
                .ddrd
                .modify(|r, w| unsafe { w.bits(r.bits() | mask) }),
        });
    }

    fn set_level(&mut self, pin: Pin, level: PinState) {
        let mask = pin.mask();
        let apply = |bits: u8| match level {
            PinState::High => bits | mask,
            PinState::Low => bits & !mask,
        };
        critical_section::with(|_| match pin.port() {
            Port::B => self
                .portb
                .portb
                .modify(|r, w| unsafe { w.bits(apply(r.bits())) }),
            Port::D => self
                .portd
                .portd
                .modify(|r, w| unsafe { w.bits(apply(r.bits())) }),
        });
    }
}
