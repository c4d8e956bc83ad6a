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

// 0 = two channels, 1 = four channels, 2 = four channels with Timer0 as the high half.
const MODE: u8 = 1;
const STEP: u16 = 0x0101;

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
    let mode = Mode::try_from(MODE)?;
    let timers = AvrTimers::new(dp.TC0, dp.TC1, dp.TC2);
    let pins = AvrPins::new(dp.PORTB, dp.PORTD);
    let mut pwm = Pwm16::new(mode, timers, pins);

    // Four ramps a quarter turn apart: D9, D10, D6/D11, D5/D3.
    let mut code: u16 = 0;
    loop {
        for (channel, offset) in Channel::ALL.into_iter().zip([0x0000, 0x4000, 0x8000, 0xC000]) {
            pwm.write(channel, code.wrapping_add(offset));
        }
        code = code.wrapping_add(STEP);
        spin(2_000);
    }
}

fn spin(iterations: u16) {
    for _ in 0..iterations {
        avr_device::asm::nop();
    }
}
