//! Unit tests for the mouse report and its descriptor.
//!
//! These tests run on the host (not embedded) and check that the bytes
//! `MouseReport::serialize` produces sit where the descriptor says.

use super::mouse::{
    MouseReport, BUTTON_LEFT, BUTTON_RIGHT, MOUSE_BUTTON_COUNT, MOUSE_HEADER_SIZE,
    MOUSE_REPORT_DESCRIPTOR, MOUSE_REPORT_SIZE,
};
use super::report_protocol::InputLayout;
use super::{check_layout, mouse_layout, Field, LayoutMismatch};

// ═══════════════════════════════════════════════════════════════════════════
// Descriptor Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn descriptor_declares_full_report_size() {
    let layout = mouse_layout().unwrap();
    assert_eq!(layout.input_bytes(), MOUSE_REPORT_SIZE);
    assert_eq!(layout.input_bits % 8, 0);
}

#[test]
fn descriptor_is_a_mouse_without_report_ids() {
    let layout = mouse_layout().unwrap();
    assert!(layout.is_mouse);
    assert!(!layout.uses_report_ids);
    assert_eq!(layout.output_bits, 0);
    assert_eq!(layout.feature_bits, 0);
}

#[test]
fn descriptor_button_field_matches_report() {
    let buttons = mouse_layout().unwrap().buttons.unwrap();
    assert_eq!(buttons.bit_offset, 0);
    assert_eq!(buttons.bit_size, 1);
    assert_eq!(buttons.count, MOUSE_BUTTON_COUNT as u32);
    assert_eq!((buttons.logical_min, buttons.logical_max), (0, 1));
    assert!(!buttons.relative);
}

#[test]
fn descriptor_axes_match_report() {
    let layout = mouse_layout().unwrap();
    let x = layout.x.unwrap();
    let y = layout.y.unwrap();
    let wheel = layout.wheel.unwrap();

    assert_eq!((x.byte_offset(), x.bit_size), (Some(2), 16));
    assert_eq!((y.byte_offset(), y.bit_size), (Some(4), 16));
    assert_eq!((wheel.byte_offset(), wheel.bit_size), (Some(6), 8));

    assert_eq!((x.logical_min, x.logical_max), (-32767, 32767));
    assert_eq!((wheel.logical_min, wheel.logical_max), (-127, 127));
    assert!(x.relative && y.relative && wheel.relative);
}

#[test]
fn descriptor_pan_matches_report() {
    let pan = mouse_layout().unwrap().pan.unwrap();
    assert_eq!((pan.byte_offset(), pan.bit_size), (Some(7), 8));
    assert_eq!(pan.count, 1);
    assert!(pan.relative);

    let mut report = MouseReport::empty();
    report.pan = -3;
    let mut buf = [0u8; MOUSE_REPORT_SIZE];
    report.serialize(&mut buf);
    assert_eq!(buf[7] as i8, -3);
}

#[test]
fn descriptor_vendor_block_follows_header() {
    let vendor = mouse_layout().unwrap().vendor.unwrap();
    assert_eq!(vendor.bit_offset, 64);
    assert_eq!(vendor.byte_offset(), Some(MOUSE_HEADER_SIZE));
    assert_eq!((vendor.bit_size, vendor.count), (8, 5));
    assert!(!vendor.relative);
}

#[test]
fn descriptor_layout_check_passes() {
    assert_eq!(check_layout(&mouse_layout().unwrap()), Ok(()));
}

#[test]
fn layout_check_reports_moved_field() {
    let mut layout = mouse_layout().unwrap();
    let mut pan = layout.pan.unwrap();
    pan.bit_offset = 60;
    layout.pan = Some(pan);
    assert_eq!(
        check_layout(&layout),
        Err(LayoutMismatch::Misplaced {
            field: Field::Pan,
            declared: None,
        })
    );

    layout.pan = None;
    assert_eq!(check_layout(&layout), Err(LayoutMismatch::Missing(Field::Pan)));
}

#[test]
fn layout_check_reports_short_report() {
    // Boot-protocol sized descriptor: buttons, X, Y only.
    let desc = [
        0x05, 0x01, 0x09, 0x02, 0xA1, 0x01, 0x05, 0x09, 0x19, 0x01, 0x29, 0x03, 0x15, 0x00,
        0x25, 0x01, 0x95, 0x03, 0x75, 0x01, 0x81, 0x02, 0x95, 0x01, 0x75, 0x05, 0x81, 0x01,
        0x05, 0x01, 0x09, 0x30, 0x09, 0x31, 0x15, 0x81, 0x25, 0x7F, 0x75, 0x08, 0x95, 0x02,
        0x81, 0x06, 0xC0,
    ];
    let layout = InputLayout::parse(&desc).unwrap();
    assert_eq!(
        check_layout(&layout),
        Err(LayoutMismatch::Size { declared: 3 })
    );
}

#[test]
fn descriptor_ends_with_end_collection() {
    assert_eq!(MOUSE_REPORT_DESCRIPTOR.first(), Some(&0x05));
    assert_eq!(MOUSE_REPORT_DESCRIPTOR.last(), Some(&0xC0));
}

// ═══════════════════════════════════════════════════════════════════════════
// Mouse Report Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn mouse_report_empty() {
    let report = MouseReport::empty();
    assert!(report.is_idle());
    assert_eq!(report, MouseReport::default());
}

#[test]
fn left_button_is_byte_0_bit_0() {
    let mut report = MouseReport::empty();
    report.set_button(BUTTON_LEFT, true);

    let mut buf = [0u8; MOUSE_REPORT_SIZE];
    report.serialize(&mut buf);
    assert_eq!(buf[0] & 0x01, 0x01);
    assert_eq!(buf[0] & 0x02, 0x00);

    report.set_button(BUTTON_LEFT, false);
    report.serialize(&mut buf);
    assert_eq!(buf[0] & 0x01, 0x00);
}

#[test]
fn right_button_is_byte_0_bit_1() {
    let mut report = MouseReport::empty();
    report.set_button(BUTTON_RIGHT, true);
    assert!(report.button(BUTTON_RIGHT));
    assert!(!report.button(BUTTON_LEFT));

    let mut buf = [0u8; MOUSE_HEADER_SIZE];
    report.serialize(&mut buf);
    assert_eq!(buf[0], 0x02);
    assert_eq!(buf[1], 0x00);
}

#[test]
fn high_buttons_land_in_byte_1() {
    let mut report = MouseReport::empty();
    report.set_button(15, true);
    let mut buf = [0u8; MOUSE_HEADER_SIZE];
    report.serialize(&mut buf);
    assert_eq!(buf[0], 0x00);
    assert_eq!(buf[1], 0x80);
}

#[test]
fn buttons_past_descriptor_count_are_ignored() {
    let mut report = MouseReport::empty();
    report.set_button(MOUSE_BUTTON_COUNT, true);
    assert!(report.is_idle());
    assert!(!report.button(MOUSE_BUTTON_COUNT));
}

#[test]
fn serialize_writes_signed_little_endian_axes() {
    let report = MouseReport {
        buttons: 0x0001,
        x: -2,
        y: 300,
        wheel: -1,
        pan: 5,
    };
    let mut buf = [0u8; MOUSE_HEADER_SIZE];
    let written = report.serialize(&mut buf);

    assert_eq!(written, MOUSE_HEADER_SIZE);
    assert_eq!(buf, [0x01, 0x00, 0xFE, 0xFF, 0x2C, 0x01, 0xFF, 0x05]);
}

#[test]
fn serialize_zero_fills_vendor_area() {
    let report = MouseReport {
        buttons: 0xFFFF,
        x: 10,
        y: 10,
        wheel: 1,
        pan: 1,
    };
    let mut buf = [0xAAu8; MOUSE_REPORT_SIZE];
    let written = report.serialize(&mut buf);

    assert_eq!(written, MOUSE_REPORT_SIZE);
    assert!(buf[MOUSE_HEADER_SIZE..].iter().all(|&b| b == 0));
}

#[test]
fn serialize_stops_at_report_size() {
    let report = MouseReport::empty();
    let mut buf = [0xAAu8; MOUSE_REPORT_SIZE + 4];
    let written = report.serialize(&mut buf);

    assert_eq!(written, MOUSE_REPORT_SIZE);
    assert_eq!(&buf[MOUSE_REPORT_SIZE..], &[0xAA; 4]);
}

#[test]
fn serialize_short_prefix_for_small_endpoints() {
    let report = MouseReport {
        buttons: 0x0003,
        ..MouseReport::empty()
    };
    let mut buf = [0xAAu8; 64];
    assert_eq!(report.serialize(&mut buf), 64);
    assert_eq!(buf[0], 0x03);
    assert!(buf[MOUSE_HEADER_SIZE..].iter().all(|&b| b == 0));
}

#[test]
fn serialize_buffer_too_small() {
    let report = MouseReport::empty();
    let mut buf = [0u8; MOUSE_HEADER_SIZE - 1];
    assert_eq!(report.serialize(&mut buf), 0);
}

#[test]
fn from_bytes_reads_header() {
    let data = [0x01, 0x00, 0x0A, 0x00, 0xF6, 0xFF, 0x00, 0x00, 0x00];
    let report = MouseReport::from_bytes(&data).unwrap();
    assert_eq!(report.buttons, 0x0001);
    assert_eq!(report.x, 10);
    assert_eq!(report.y, -10);
    assert!(MouseReport::from_bytes(&data[..4]).is_none());
}
