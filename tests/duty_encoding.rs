#![allow(missing_docs)]
//! Host-level tests for the duty code encoder.

use pwm16::duty::{FULLY_OFF, FULLY_ON, duty_to_ocr};
use pwm16::{EncodedDuty, encode};

#[test]
fn zero_is_fully_off() {
    assert_eq!(encode(FULLY_OFF), EncodedDuty::FullyOff);
    assert_eq!(EncodedDuty::FullyOff.decode(), 0x0000);
}

#[test]
fn max_is_fully_on() {
    assert_eq!(encode(FULLY_ON), EncodedDuty::FullyOn);
    assert_eq!(EncodedDuty::FullyOn.decode(), 0xFFFF);
}

#[test]
fn every_intermediate_code_round_trips() {
    for code in 0x0001..=0xFFFE_u16 {
        let EncodedDuty::Pwm { high, low } = encode(code) else {
            panic!("code {code:#06x} should encode as PWM");
        };
        let adjusted = u32::from(high) * 256 + u32::from(low);
        assert_eq!(adjusted - 1, u32::from(code), "code {code:#06x}");
        assert_eq!(encode(code).decode(), code);
    }
}

#[test]
fn split_adds_one_before_splitting() {
    assert_eq!(encode(0x0001), EncodedDuty::Pwm { high: 0, low: 2 });
    assert_eq!(encode(0x0100), EncodedDuty::Pwm { high: 1, low: 1 });
    assert_eq!(encode(0x1234), EncodedDuty::Pwm { high: 0x12, low: 0x35 });
    assert_eq!(encode(0xFFFE), EncodedDuty::Pwm { high: 0xFF, low: 0xFF });
}

#[test]
fn boundary_codes_zero_the_low_byte() {
    for high in 0x00..=0xFE_u8 {
        let code = u16::from_be_bytes([high, 0xFF]);
        assert_eq!(
            encode(code),
            EncodedDuty::Pwm {
                high: high + 1,
                low: 0
            },
            "code {code:#06x}"
        );
    }
}

#[test]
fn codes_below_0x00ff_zero_the_high_byte() {
    for code in 0x0001..0x00FF_u16 {
        let EncodedDuty::Pwm { high, low } = encode(code) else {
            panic!("code {code:#06x} should encode as PWM");
        };
        assert_eq!(high, 0);
        assert_ne!(low, 0);
    }
}

#[test]
fn at_most_one_half_is_zero() {
    for code in 0x0001..=0xFFFE_u16 {
        if let EncodedDuty::Pwm { high, low } = encode(code) {
            assert!(high != 0 || low != 0, "code {code:#06x}");
        }
    }
}

#[test]
fn zero_byte_never_becomes_a_compare_value() {
    assert_eq!(duty_to_ocr(0), None);
    assert_eq!(duty_to_ocr(1), Some(0));
    assert_eq!(duty_to_ocr(0x80), Some(0x7F));
    assert_eq!(duty_to_ocr(0xFF), Some(0xFE));
}
