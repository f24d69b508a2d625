//! HID report descriptor walker.
//!
//! Walks a report descriptor item by item and works out the layout of
//! the input report it declares: total size, and where the pointer
//! fields (buttons, X, Y, wheel, pan) and the first vendor block sit
//! inside it. The firmware uses this to check that the report it
//! serializes is the report it describes to the host.
//!
//! ## HID Report Descriptor Structure
//!
//! A Report Descriptor is a sequence of short items. Each item starts
//! with a prefix byte `tttt ttss`:
//! - `tag` (4 bits) selects the item within its type
//! - `type` (2 bits): 0 = Main, 1 = Global, 2 = Local
//! - `size` (2 bits): 0, 1, 2 or 4 payload bytes (little-endian)
//!
//! Global items (Usage Page, Logical Min/Max, Report Size/Count/ID)
//! persist until changed. Local items (Usage, Usage Min/Max) apply to
//! the next Main item only.
//!
//! ## Limitations
//!
//! - Long items are skipped
//! - Delimiter tags are ignored
//! - Bit offsets restart at each Report ID; sizes are per report

use heapless::Vec;

const MAX_USAGES: usize = 16;
const MAX_GLOBAL_STACK: usize = 4;
/// Elements examined per Main item. Every field we locate sits among
/// the first elements of its item.
const MAX_ELEMENTS: u32 = 256;

/// AC Pan on the Consumer page.
const USAGE_AC_PAN: u16 = 0x0238;

/// Usage page codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UsagePage {
    /// Generic Desktop (mouse, keyboard, joystick).
    GenericDesktop,
    /// Button.
    Button,
    /// Consumer Control.
    Consumer,
    /// Vendor-defined (0xFF00..=0xFFFF).
    Vendor(u16),
    /// Unknown/unsupported.
    Unknown(u16),
}

impl From<u16> for UsagePage {
    fn from(code: u16) -> Self {
        match code {
            0x01 => UsagePage::GenericDesktop,
            0x09 => UsagePage::Button,
            0x0C => UsagePage::Consumer,
            0xFF00..=0xFFFF => UsagePage::Vendor(code),
            other => UsagePage::Unknown(other),
        }
    }
}

/// Generic Desktop usage codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DesktopUsage {
    Pointer,
    Mouse,
    X,
    Y,
    Wheel,
    Unknown(u16),
}

impl From<u16> for DesktopUsage {
    fn from(code: u16) -> Self {
        match code {
            0x01 => DesktopUsage::Pointer,
            0x02 => DesktopUsage::Mouse,
            0x30 => DesktopUsage::X,
            0x31 => DesktopUsage::Y,
            0x38 => DesktopUsage::Wheel,
            other => DesktopUsage::Unknown(other),
        }
    }
}

/// Why a descriptor could not be walked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// An item's payload runs past the end of the descriptor.
    Truncated { offset: usize },
    /// End Collection without a matching Collection, or a Collection
    /// left open at the end.
    UnbalancedCollection,
    /// More local usages before one Main item than we track.
    TooManyUsages,
    /// Push nested deeper than we track, or Pop with nothing pushed.
    GlobalStack,
    /// Report Size × Report Count, or the running report length, does
    /// not fit in 32 bits.
    Overflow { offset: usize },
}

/// Position of one field inside a report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FieldSpan {
    /// Offset of the first bit from the start of the report payload.
    pub bit_offset: u32,
    /// Bits per element.
    pub bit_size: u32,
    /// Number of elements.
    pub count: u32,
    pub logical_min: i32,
    pub logical_max: i32,
    /// Input flag bit 2: relative rather than absolute.
    pub relative: bool,
}

impl FieldSpan {
    /// Byte offset of the field, when it starts on a byte boundary.
    pub fn byte_offset(&self) -> Option<usize> {
        (self.bit_offset % 8 == 0).then_some((self.bit_offset / 8) as usize)
    }
}

/// What a report descriptor says about its input report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputLayout {
    /// Size of the largest input report, in bits, excluding any Report ID byte.
    pub input_bits: u32,
    /// Size of the largest output report, in bits.
    pub output_bits: u32,
    /// Size of the largest feature report, in bits.
    pub feature_bits: u32,
    /// Whether any Report ID item appears.
    pub uses_report_ids: bool,
    /// Whether a Mouse or Pointer application collection is declared.
    pub is_mouse: bool,
    pub buttons: Option<FieldSpan>,
    pub x: Option<FieldSpan>,
    pub y: Option<FieldSpan>,
    pub wheel: Option<FieldSpan>,
    /// Horizontal scroll (Consumer AC Pan).
    pub pan: Option<FieldSpan>,
    /// First input item on a vendor-defined page.
    pub vendor: Option<FieldSpan>,
}

impl InputLayout {
    /// Input report size in bytes, rounded up.
    pub fn input_bytes(&self) -> usize {
        self.input_bits.div_ceil(8) as usize
    }

    /// Walk a HID Report Descriptor.
    pub fn parse(data: &[u8]) -> Result<Self, ParseError> {
        let mut layout = InputLayout::default();
        let mut globals = Globals::default();
        let mut stack: Vec<Globals, MAX_GLOBAL_STACK> = Vec::new();
        let mut locals = Locals::default();
        let mut cursors = Cursors::default();
        let mut depth: u32 = 0;

        let mut i = 0;
        while i < data.len() {
            let prefix = data[i];

            // Long item: 0xFE, data size, long tag, data.
            if prefix == 0xFE {
                let Some(&len) = data.get(i + 1) else {
                    return Err(ParseError::Truncated { offset: i });
                };
                let next = i + 3 + len as usize;
                if next > data.len() {
                    return Err(ParseError::Truncated { offset: i });
                }
                i = next;
                continue;
            }

            let tag = prefix >> 4;
            let item_type = (prefix >> 2) & 0x03;
            let size = match prefix & 0x03 {
                0 => 0,
                1 => 1,
                2 => 2,
                _ => 4,
            };

            if i + 1 + size > data.len() {
                return Err(ParseError::Truncated { offset: i });
            }
            let payload = &data[i + 1..i + 1 + size];
            let value = unsigned(payload);

            match item_type {
                // Main items
                0 => {
                    match tag {
                        // Input
                        0x08 => {
                            let start = cursors.input;
                            cursors.input = advance(start, &globals, i)?;
                            layout.record_input(&globals, &locals, start, value);
                            layout.input_bits = layout.input_bits.max(cursors.input);
                        }
                        // Output
                        0x09 => {
                            cursors.output = advance(cursors.output, &globals, i)?;
                            layout.output_bits = layout.output_bits.max(cursors.output);
                        }
                        // Feature
                        0x0B => {
                            cursors.feature = advance(cursors.feature, &globals, i)?;
                            layout.feature_bits = layout.feature_bits.max(cursors.feature);
                        }
                        // Collection
                        0x0A => {
                            // Application collection
                            if value == 0x01 {
                                if let Some(&usage) = locals.usages.first() {
                                    let (page, id) = split_usage(usage);
                                    if UsagePage::from(page) == UsagePage::GenericDesktop
                                        && matches!(
                                            DesktopUsage::from(id),
                                            DesktopUsage::Mouse | DesktopUsage::Pointer
                                        )
                                    {
                                        layout.is_mouse = true;
                                    }
                                }
                            }
                            depth += 1;
                        }
                        // End Collection
                        0x0C => {
                            depth = depth
                                .checked_sub(1)
                                .ok_or(ParseError::UnbalancedCollection)?;
                        }
                        _ => {}
                    }
                    locals = Locals::default();
                }
                // Global items
                1 => match tag {
                    0x00 => globals.usage_page = value as u16,
                    0x01 => globals.logical_min = signed(payload),
                    0x02 => globals.logical_max = signed(payload),
                    0x07 => globals.report_size = value,
                    0x08 => {
                        layout.uses_report_ids = true;
                        cursors = Cursors::default();
                    }
                    0x09 => globals.report_count = value,
                    // Push
                    0x0A => stack.push(globals).map_err(|_| ParseError::GlobalStack)?,
                    // Pop
                    0x0B => globals = stack.pop().ok_or(ParseError::GlobalStack)?,
                    _ => {}
                },
                // Local items
                2 => match tag {
                    0x00 => {
                        let usage = extend_usage(globals.usage_page, value, size);
                        locals
                            .usages
                            .push(usage)
                            .map_err(|_| ParseError::TooManyUsages)?;
                    }
                    0x01 => locals.usage_min = Some(extend_usage(globals.usage_page, value, size)),
                    0x02 => locals.usage_max = Some(extend_usage(globals.usage_page, value, size)),
                    _ => {}
                },
                _ => {}
            }

            i += 1 + size;
        }

        if depth != 0 {
            return Err(ParseError::UnbalancedCollection);
        }
        Ok(layout)
    }

    /// Note the fields of one Input item. The caller has already checked
    /// that `start + report_size * report_count` fits in a `u32`.
    fn record_input(&mut self, globals: &Globals, locals: &Locals, start: u32, flags: u32) {
        let constant = flags & 0x01 != 0;
        let variable = flags & 0x02 != 0;
        if constant {
            return;
        }

        let relative = flags & 0x04 != 0;
        let span = |offset: u32, count: u32| FieldSpan {
            bit_offset: offset,
            bit_size: globals.report_size,
            count,
            logical_min: globals.logical_min,
            logical_max: globals.logical_max,
            relative,
        };

        // Vendor blocks are often arrays; record them either way.
        if self.vendor.is_none() {
            if let Some(usage) = locals.usage_at(0) {
                if matches!(UsagePage::from(split_usage(usage).0), UsagePage::Vendor(_)) {
                    self.vendor = Some(span(start, globals.report_count));
                }
            }
        }

        if !variable {
            return;
        }

        for n in 0..globals.report_count.min(MAX_ELEMENTS) {
            let Some(usage) = locals.usage_at(n) else {
                break;
            };
            let (page, id) = split_usage(usage);
            let offset = start + n * globals.report_size;
            match UsagePage::from(page) {
                UsagePage::Button => {
                    if self.buttons.is_none() {
                        self.buttons = Some(span(offset, globals.report_count - n));
                    }
                }
                UsagePage::GenericDesktop => match DesktopUsage::from(id) {
                    DesktopUsage::X if self.x.is_none() => self.x = Some(span(offset, 1)),
                    DesktopUsage::Y if self.y.is_none() => self.y = Some(span(offset, 1)),
                    DesktopUsage::Wheel if self.wheel.is_none() => {
                        self.wheel = Some(span(offset, 1))
                    }
                    _ => {}
                },
                UsagePage::Consumer if id == USAGE_AC_PAN && self.pan.is_none() => {
                    self.pan = Some(span(offset, 1))
                }
                _ => {}
            }
        }
    }
}

/// Move a report cursor past one Main item, or fail if it overflows.
fn advance(cursor: u32, globals: &Globals, offset: usize) -> Result<u32, ParseError> {
    globals
        .report_size
        .checked_mul(globals.report_count)
        .and_then(|bits| cursor.checked_add(bits))
        .ok_or(ParseError::Overflow { offset })
}

#[derive(Clone, Copy, Default)]
struct Globals {
    usage_page: u16,
    logical_min: i32,
    logical_max: i32,
    report_size: u32,
    report_count: u32,
}

#[derive(Default)]
struct Locals {
    usages: Vec<u32, MAX_USAGES>,
    usage_min: Option<u32>,
    usage_max: Option<u32>,
}

impl Locals {
    /// Usage for the `n`th element of a Main item. Explicit usages win;
    /// the last one repeats. Otherwise the Min/Max range is walked.
    fn usage_at(&self, n: u32) -> Option<u32> {
        if !self.usages.is_empty() {
            let idx = (n as usize).min(self.usages.len() - 1);
            return Some(self.usages[idx]);
        }
        match (self.usage_min, self.usage_max) {
            (Some(min), Some(max)) => Some(min.saturating_add(n).min(max)),
            (Some(min), None) => Some(min),
            _ => None,
        }
    }
}

#[derive(Default)]
struct Cursors {
    input: u32,
    output: u32,
    feature: u32,
}

fn unsigned(payload: &[u8]) -> u32 {
    match payload.len() {
        1 => payload[0] as u32,
        2 => u16::from_le_bytes([payload[0], payload[1]]) as u32,
        4 => u32::from_le_bytes([payload[0], payload[1], payload[2], payload[3]]),
        _ => 0,
    }
}

fn signed(payload: &[u8]) -> i32 {
    match payload.len() {
        1 => payload[0] as i8 as i32,
        2 => i16::from_le_bytes([payload[0], payload[1]]) as i32,
        4 => i32::from_le_bytes([payload[0], payload[1], payload[2], payload[3]]),
        _ => 0,
    }
}

/// A 4-byte usage carries its own page; shorter ones use the current page.
fn extend_usage(page: u16, value: u32, size: usize) -> u32 {
    if size == 4 {
        value
    } else {
        ((page as u32) << 16) | (value & 0xFFFF)
    }
}

fn split_usage(usage: u32) -> (u16, u16) {
    ((usage >> 16) as u16, usage as u16)
}
