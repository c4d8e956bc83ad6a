//! One-shot phase alignment of all three timers.

use crate::fmt::info;
use crate::registers::{Gtccr, Timer, TimerBus};

/// Halt all timers, reset both prescalers and every counter, then release them together.
///
/// The whole sequence runs in one critical section: a tick between the halt and the
/// release would leave the timers out of phase. The previous interrupt state is
/// restored on return.
///
/// [`Pwm16::new`](crate::Pwm16::new) calls this exactly once, right after the timer
/// setup. Running it again while outputs are live glitches their phase.
pub fn synchronize<T: TimerBus>(timers: &mut T) {
    critical_section::with(|_| {
        // Timer2's asynchronous prescaler is reset too; it stays in step with the
        // shared Timer0/Timer1 prescaler once both are released.
        timers.set_gtccr(Gtccr::HALT_ALL);
        for timer in Timer::ALL {
            timers.set_counter(timer, 0);
        }
        timers.set_gtccr(Gtccr::empty());
    });
    info!("synchronize: timers released");
}
