//! Addressing field decoding.

use super::cursor::Cursor;
use super::frame_control::{AddressingMode, FrameControlRepr};
use super::Result;

/// An IEEE 802.15.4 device address.
///
/// Short and extended addresses are stored as values decoded from the
/// little-endian wire order, ready for comparison against PIB attributes.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum Address {
    #[default]
    Absent,
    Short(u16),
    Extended(u64),
}

impl Address {
    /// The broadcast address.
    pub const BROADCAST: Address = Address::Short(0xffff);

    /// Query whether the address is an unicast address.
    pub fn is_unicast(&self) -> bool {
        !self.is_broadcast()
    }

    /// Query whether this address is the broadcast address.
    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }

    /// Return the length of the address in octets.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        match self {
            Address::Absent => 0,
            Address::Short(_) => 2,
            Address::Extended(_) => 8,
        }
    }

    /// Return the addressing mode this address is carried with.
    pub fn mode(&self) -> AddressingMode {
        match self {
            Address::Absent => AddressingMode::Absent,
            Address::Short(_) => AddressingMode::Short,
            Address::Extended(_) => AddressingMode::Extended,
        }
    }
}

impl core::fmt::Display for Address {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Address::Absent => write!(f, "absent"),
            Address::Short(value) => write!(f, "{:04x}", value),
            Address::Extended(value) => write!(f, "{:016x}", value),
        }
    }
}

/// A by-value representation of the variable-length addressing block of a
/// frame header.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct AddressingFieldsRepr {
    /// Destination PAN identifier.
    pub dst_pan_id: Option<u16>,
    /// Destination address.
    pub dst_address: Address,
    /// Source PAN identifier.
    pub src_pan_id: Option<u16>,
    /// Source address.
    pub src_address: Address,
}

impl AddressingFieldsRepr {
    /// Decode the addressing block the cursor is positioned on.
    ///
    /// Destination fields come first. A source PAN id is only present on
    /// the wire when the PAN-ID-compression bit is clear; when elided it is
    /// taken over from the destination PAN id. A reserved addressing mode
    /// carries a PAN id but no address octets.
    pub fn parse(cursor: &mut Cursor<'_>, fc: &FrameControlRepr) -> Result<Self> {
        let mut fields = Self::default();

        if fc.dst_addressing_mode != AddressingMode::Absent {
            fields.dst_pan_id = Some(cursor.read_u16_le()?);
            fields.dst_address = match fc.dst_addressing_mode {
                AddressingMode::Short => Address::Short(cursor.read_u16_le()?),
                AddressingMode::Extended => Address::Extended(cursor.read_u64_le()?),
                _ => Address::Absent,
            };
        }

        if fc.src_addressing_mode != AddressingMode::Absent {
            if fc.pan_id_compression {
                fields.src_pan_id = fields.dst_pan_id;
            } else {
                fields.src_pan_id = Some(cursor.read_u16_le()?);
            }
            fields.src_address = match fc.src_addressing_mode {
                AddressingMode::Short => Address::Short(cursor.read_u16_le()?),
                AddressingMode::Extended => Address::Extended(cursor.read_u64_le()?),
                _ => Address::Absent,
            };
        }

        Ok(fields)
    }

    /// Length in octets of the addressing block described by the given
    /// Frame Control field.
    pub fn field_len(fc: &FrameControlRepr) -> usize {
        let mut len = 0;

        if fc.dst_addressing_mode != AddressingMode::Absent {
            len += 2 + fc.dst_addressing_mode.size();
        }

        if fc.src_addressing_mode != AddressingMode::Absent {
            if !fc.pan_id_compression {
                len += 2;
            }
            len += fc.src_addressing_mode.size();
        }

        len
    }
}
