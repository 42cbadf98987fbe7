//! Beacon payload fields.

use super::cursor::Cursor;
use super::mpdu::Span;
use super::Result;

/// The 16-bit Superframe Specification field of a beacon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct SuperframeSpecification(pub u16);

impl SuperframeSpecification {
    /// Return the beacon order field value.
    pub fn beacon_order(&self) -> u8 {
        (self.0 & 0x0f) as u8
    }

    /// Return the superframe order field value.
    pub fn superframe_order(&self) -> u8 {
        ((self.0 >> 4) & 0x0f) as u8
    }

    /// Return the final CAP slot field value.
    pub fn final_cap_slot(&self) -> u8 {
        ((self.0 >> 8) & 0x0f) as u8
    }

    /// Returns `true` when the battery life extension field is set.
    pub fn battery_life_extension(&self) -> bool {
        (self.0 >> 12) & 0b1 == 1
    }

    /// Returns `true` when the beacon is sent by the PAN coordinator.
    pub fn pan_coordinator(&self) -> bool {
        (self.0 >> 14) & 0b1 == 1
    }

    /// Returns `true` when the coordinator accepts association requests.
    pub fn association_permit(&self) -> bool {
        (self.0 >> 15) & 0b1 == 1
    }
}

/// The GTS Specification octet of a beacon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct GtsSpecification(pub u8);

impl GtsSpecification {
    /// GTS descriptor count.
    pub fn descriptor_count(&self) -> u8 {
        self.0 & 0x07
    }

    /// GTS is permitted.
    pub fn gts_permit(&self) -> bool {
        (self.0 >> 7) & 0b1 == 1
    }
}

/// The Pending Address Specification octet of a beacon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct PendingAddressSpecification(pub u8);

impl PendingAddressSpecification {
    /// Number of short addresses pending.
    pub fn short_pending(&self) -> u8 {
        self.0 & 0x07
    }

    /// Number of extended addresses pending.
    pub fn extended_pending(&self) -> u8 {
        (self.0 >> 4) & 0x07
    }
}

/// The parsed payload of a beacon frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct BeaconRepr {
    pub superframe_spec: SuperframeSpecification,
    pub gts_spec: GtsSpecification,
    pub pending_addr_spec: PendingAddressSpecification,
    /// The raw pending short/extended address list, when either count is
    /// nonzero.
    pub pending_addresses: Option<Span>,
    /// The beacon application payload; empty when the superframe and
    /// address fields fill the whole MAC payload.
    pub payload: Span,
}

impl BeaconRepr {
    /// Parse the beacon fields the cursor is positioned on. The cursor must
    /// end at the last MAC payload octet, so whatever follows the pending
    /// address list becomes the application payload.
    pub(crate) fn parse(cursor: &mut Cursor<'_>) -> Result<Self> {
        let superframe_spec = SuperframeSpecification(cursor.read_u16_le()?);

        let gts_spec = GtsSpecification(cursor.read_u8()?);
        // GTS direction and address list octets are skipped, not parsed.
        if gts_spec.descriptor_count() > 0 {
            cursor.skip(1 + gts_spec.descriptor_count() as usize)?;
        }

        let pending_addr_spec = PendingAddressSpecification(cursor.read_u8()?);
        let short = pending_addr_spec.short_pending() as usize;
        let extended = pending_addr_spec.extended_pending() as usize;
        let pending_addresses = if short > 0 || extended > 0 {
            let span = Span {
                offset: cursor.position(),
                len: short * 2 + extended * 8,
            };
            cursor.skip(span.len)?;
            Some(span)
        } else {
            None
        };

        let payload = Span {
            offset: cursor.position(),
            len: cursor.remaining(),
        };

        Ok(Self {
            superframe_spec,
            gts_spec,
            pending_addr_spec,
            pending_addresses,
            payload,
        })
    }
}
