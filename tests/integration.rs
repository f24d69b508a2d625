//! Integration tests for hid-mouse host-testable logic.

use hid_mouse::hid::mouse::{MOUSE_REPORT_DESCRIPTOR, MOUSE_REPORT_SIZE};
use hid_mouse::hid::mouse_layout;
use hid_mouse::hid::report_protocol::InputLayout;
use hid_mouse::input::event::{KEY_0, KEY_1, KEY_2, KEY_3};
use hid_mouse::input::{InputEvent, MouseState, Outcome};

/// Decode one field from a report the way a host would, using the
/// descriptor's own layout.
fn read_signed(report: &[u8], bit_offset: u32, bit_size: u32) -> i32 {
    let start = (bit_offset / 8) as usize;
    match bit_size {
        8 => report[start] as i8 as i32,
        16 => i16::from_le_bytes([report[start], report[start + 1]]) as i32,
        other => panic!("unexpected field size {other}"),
    }
}

#[test]
fn event_sequence_is_readable_through_descriptor() {
    let layout = InputLayout::parse(MOUSE_REPORT_DESCRIPTOR).expect("descriptor parses");
    let mut state = MouseState::new();

    for event in [
        InputEvent::key(KEY_0, true),
        InputEvent::key(KEY_2, true),
        InputEvent::key(KEY_2, false),
        InputEvent::key(KEY_2, true),
        InputEvent::key(KEY_3, true),
    ] {
        state.apply(event);
    }

    let mut report = vec![0u8; layout.input_bytes()];
    assert_eq!(state.report().serialize(&mut report), MOUSE_REPORT_SIZE);

    let buttons = layout.buttons.unwrap();
    let left_bit = buttons.bit_offset;
    assert_eq!(report[(left_bit / 8) as usize] >> (left_bit % 8) & 1, 1);

    let x = layout.x.unwrap();
    let y = layout.y.unwrap();
    assert_eq!(read_signed(&report, x.bit_offset, x.bit_size), 20);
    assert_eq!(read_signed(&report, y.bit_offset, y.bit_size), 10);

    let wheel = layout.wheel.unwrap();
    assert_eq!(read_signed(&report, wheel.bit_offset, wheel.bit_size), 0);
}

#[test]
fn button_release_clears_bit_in_serialized_report() {
    let mut state = MouseState::new();
    state.apply(InputEvent::key(KEY_1, true));
    state.apply(InputEvent::key(KEY_0, true));
    state.apply(InputEvent::key(KEY_0, false));

    let mut report = [0u8; 64];
    state.report().serialize(&mut report);
    assert_eq!(report[0], 0b10);
}

#[test]
fn unrecognized_events_do_not_touch_report() {
    let mut state = MouseState::new();
    let outcome = state.apply(InputEvent::new(30, 1));
    assert_eq!(outcome, Outcome::Unrecognized);
    assert!(state.report().is_idle());
}

#[test]
fn descriptor_layout_is_stable() {
    let layout = mouse_layout().expect("descriptor parses");
    assert_eq!(layout.input_bytes(), MOUSE_REPORT_SIZE);
    assert!(layout.is_mouse);
}
