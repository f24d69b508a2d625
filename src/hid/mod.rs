//! HID mouse report layout and the descriptor that advertises it.

pub mod mouse;
pub mod report_protocol;

#[cfg(test)]
mod tests;

use mouse::{MOUSE_HEADER_SIZE, MOUSE_REPORT_SIZE};
use report_protocol::{FieldSpan, InputLayout, ParseError};

/// Walk `MOUSE_REPORT_DESCRIPTOR` and return the input layout it declares.
pub fn mouse_layout() -> Result<InputLayout, ParseError> {
    InputLayout::parse(mouse::MOUSE_REPORT_DESCRIPTOR)
}

/// Report fields `MouseReport::serialize` writes at fixed offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    Buttons,
    X,
    Y,
    Wheel,
    Pan,
    Vendor,
}

/// Where a descriptor disagrees with the serialized report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LayoutMismatch {
    /// Declared input report length differs from `MOUSE_REPORT_SIZE`.
    Size { declared: usize },
    /// Field not declared at all.
    Missing(Field),
    /// Field declared at another byte offset, or off a byte boundary.
    Misplaced { field: Field, declared: Option<usize> },
}

/// Check that `layout` puts every field where `MouseReport::serialize` does.
pub fn check_layout(layout: &InputLayout) -> Result<(), LayoutMismatch> {
    if layout.input_bytes() != MOUSE_REPORT_SIZE {
        return Err(LayoutMismatch::Size {
            declared: layout.input_bytes(),
        });
    }

    let expected: [(Field, Option<FieldSpan>, usize); 6] = [
        (Field::Buttons, layout.buttons, 0),
        (Field::X, layout.x, 2),
        (Field::Y, layout.y, 4),
        (Field::Wheel, layout.wheel, 6),
        (Field::Pan, layout.pan, 7),
        (Field::Vendor, layout.vendor, MOUSE_HEADER_SIZE),
    ];
    for (field, span, offset) in expected {
        let span = span.ok_or(LayoutMismatch::Missing(field))?;
        if span.byte_offset() != Some(offset) {
            return Err(LayoutMismatch::Misplaced {
                field,
                declared: span.byte_offset(),
            });
        }
    }
    Ok(())
}
