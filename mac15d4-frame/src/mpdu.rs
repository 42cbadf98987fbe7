//! Full-MPDU parsing into a by-value record.

use super::addressing::AddressingFieldsRepr;
use super::beacon::BeaconRepr;
use super::command::{CommandId, CommandRepr};
use super::cursor::Cursor;
use super::frame_control::{FrameControlRepr, FrameType};
use super::{Error, Result};

/// Octets in the Frame Control field.
pub const FCF_LEN: usize = 2;
/// Octets in the sequence number field.
pub const SEQUENCE_NUMBER_LEN: usize = 1;
/// Octets in the Frame Check Sequence.
pub const FCS_LEN: usize = 2;
/// The largest MPDU a PHY service data unit can carry
/// (`aMaxPHYPacketSize`).
pub const MAX_PHY_PACKET_SIZE: usize = 127;
/// The largest MAC payload of a data frame
/// (`aMaxPHYPacketSize - aMinMPDUOverhead`).
pub const MAX_MAC_PAYLOAD_SIZE: usize = 118;

/// A region of the MPDU identified by offset and length.
///
/// Spans keep the parse record free of borrows, so the record can travel
/// together with ownership of the buffer it was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct Span {
    pub offset: usize,
    pub len: usize,
}

impl Span {
    /// Whether the region is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Resolve the span against the MPDU it was parsed from.
    pub fn of<'a>(&self, mpdu: &'a [u8]) -> &'a [u8] {
        &mpdu[self.offset..self.offset + self.len]
    }
}

/// The fixed part of the MAC header plus the derived payload geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct MpduHeader {
    pub frame_control: FrameControlRepr,
    pub sequence_number: u8,
    pub addressing: AddressingFieldsRepr,
    /// MPDU offset of the first MAC payload octet.
    pub payload_offset: usize,
    /// MAC payload length: the MPDU length minus frame control, sequence
    /// number, addressing fields and FCS.
    pub mac_payload_len: usize,
}

impl MpduHeader {
    /// Parse the MHR of an MPDU. The address field length is known after
    /// the addressing block is decoded, which makes the payload length a
    /// checked subtraction; a declared length too small for its own header
    /// and FCS fails here.
    pub fn parse(mpdu: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(mpdu);

        let frame_control = FrameControlRepr::parse(&mut cursor)?;
        let sequence_number = cursor.read_u8()?;
        let addressing = AddressingFieldsRepr::parse(&mut cursor, &frame_control)?;

        let payload_offset = cursor.position();
        let mac_payload_len = mpdu
            .len()
            .checked_sub(payload_offset + FCS_LEN)
            .ok_or(Error::UnexpectedEnd)?;

        Ok(Self {
            frame_control,
            sequence_number,
            addressing,
            payload_offset,
            mac_payload_len,
        })
    }
}

/// Type-specific view of the MAC payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum MacPayload {
    Beacon(BeaconRepr),
    Data(Span),
    Command(CommandRepr),
}

/// A fully parsed MPDU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct MpduRepr {
    pub frame_control: FrameControlRepr,
    pub sequence_number: u8,
    pub addressing: AddressingFieldsRepr,
    pub mac_payload_len: usize,
    pub payload: MacPayload,
}

impl MpduRepr {
    /// Parse an MPDU that carries no security header.
    pub fn parse(mpdu: &[u8]) -> Result<Self> {
        let header = MpduHeader::parse(mpdu)?;

        if header.frame_control.security_enabled {
            return Err(Error::UnsupportedSecurity);
        }

        Self::parse_payload(header, mpdu, 0)
    }

    /// Parse the MAC payload of an MPDU whose header has already been
    /// decoded. `payload_shift` skips octets an unsecuring step consumed
    /// at the start of the payload.
    ///
    /// The cursor is confined to the declared MAC payload, so no payload
    /// field can be read out of the FCS octets or past the frame.
    pub fn parse_payload(header: MpduHeader, mpdu: &[u8], payload_shift: usize) -> Result<Self> {
        let payload_end = header.payload_offset + header.mac_payload_len;
        let confined = mpdu.get(..payload_end).ok_or(Error::UnexpectedEnd)?;

        let mut cursor = Cursor::new(confined);
        cursor.skip(header.payload_offset + payload_shift)?;

        let mut mac_payload_len = header.mac_payload_len;
        let payload = match header.frame_control.frame_type {
            FrameType::Beacon => MacPayload::Beacon(BeaconRepr::parse(&mut cursor)?),
            FrameType::Data => {
                // A corrupted length field is clamped to the protocol
                // maximum instead of rejected.
                if mac_payload_len >= MAX_MAC_PAYLOAD_SIZE {
                    mac_payload_len = MAX_MAC_PAYLOAD_SIZE;
                }

                MacPayload::Data(Span {
                    offset: cursor.position(),
                    len: mac_payload_len.min(cursor.remaining()),
                })
            }
            FrameType::MacCommand => {
                MacPayload::Command(CommandRepr::parse(&mut cursor, &header.frame_control)?)
            }
            FrameType::Ack | FrameType::Reserved => return Err(Error::InvalidFrameType),
        };

        Ok(Self {
            frame_control: header.frame_control,
            sequence_number: header.sequence_number,
            addressing: header.addressing,
            mac_payload_len,
            payload,
        })
    }

    /// The command identifier, when this is a MAC command frame.
    pub fn command_id(&self) -> Option<CommandId> {
        match &self.payload {
            MacPayload::Command(command) => Some(command.id()),
            _ => None,
        }
    }
}
