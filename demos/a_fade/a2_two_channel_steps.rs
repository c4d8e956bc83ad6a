#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

use core::convert::Infallible;

use avr_device::atmega328p::Peripherals;
use panic_halt as _;
use pwm16::{
    Channel, Mode, Pwm16, Result,
    avr::{AvrPins, AvrTimers},
};

#[avr_device::entry]
fn main() -> ! {
    let Some(dp) = Peripherals::take() else {
        panic!("peripherals already taken");
    };
    match inner_main(dp) {
        Ok(never) => match never {},
        Err(err) => panic!("{err}"),
    }
}

fn inner_main(dp: Peripherals) -> Result<Infallible> {
    let timers = AvrTimers::new(dp.TC0, dp.TC1, dp.TC2);
    let pins = AvrPins::new(dp.PORTB, dp.PORTD);
    // Timer0 keeps running untouched in this mode.
    let mut pwm = Pwm16::new(Mode::TwoChannel, timers, pins);

    // Step D9 through off, low duties, half, and fully on; D10 gets the inverse code.
    // Ch1A is unused in two-channel mode and the write is ignored.
    let steps = [0x0000, 0x0001, 0x00FF, 0x0100, 0x8000, 0xFFFE, 0xFFFF];
    loop {
        for code in steps {
            pwm.write(Channel::Ch0A, code);
            pwm.write(Channel::Ch0B, !code);
            pwm.write(Channel::Ch1A, code);
            spin(60_000);
        }
    }
}

fn spin(iterations: u16) {
    for _ in 0..iterations {
        avr_device::asm::nop();
    }
}
