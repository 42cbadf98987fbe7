//! Parsing of IEEE 802.15.4-2006 MPDUs into by-value records.
//!
//! The central type is [`MpduRepr`], a fully decoded frame: frame control,
//! sequence number, addressing fields and a type-specific payload
//! ([`MacPayload`]). Payload regions are kept as [`Span`]s (offset and
//! length within the MPDU) instead of borrowed slices, so the record can
//! travel together with ownership of the buffer it was parsed from.
//!
//! All field access goes through a bounds-checked [`Cursor`]; a frame
//! whose declared length cannot hold its own header fails with
//! [`Error::UnexpectedEnd`] instead of reading out of range.
//!
//! ## Reading a frame
//! ```
//! use mac15d4_frame::{Address, FrameType, MacPayload, MpduRepr};
//!
//! // Data frame: FCF, sequence number 1, dst PAN 0xabcd, dst 0xffff,
//! // src 0x1234 (PAN id compressed), four payload octets, FCS.
//! let mpdu = [
//!     0x61, 0x88, 0x01, 0xcd, 0xab, 0xff, 0xff, 0x34, 0x12, 0x2b, 0x00,
//!     0x00, 0x00, 0x00, 0x00,
//! ];
//!
//! let frame = MpduRepr::parse(&mpdu).unwrap();
//! assert_eq!(frame.frame_control.frame_type, FrameType::Data);
//! assert_eq!(frame.addressing.dst_pan_id, Some(0xabcd));
//! assert_eq!(frame.addressing.src_pan_id, Some(0xabcd));
//! assert_eq!(frame.addressing.src_address, Address::Short(0x1234));
//! assert_eq!(frame.mac_payload_len, 4);
//!
//! let MacPayload::Data(payload) = frame.payload else { unreachable!() };
//! assert_eq!(payload.of(&mpdu), &[0x2b, 0x00, 0x00, 0x00]);
//! ```
//!
//! Frames that carry a security header are parsed in two steps, so the
//! unsecuring machinery can sit between them: [`MpduHeader::parse`]
//! decodes the MHR and the payload geometry, and
//! [`MpduRepr::parse_payload`] finishes the frame after the unsecuring
//! step reports how many payload octets it consumed.
#![no_std]
#![deny(unsafe_code)]

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

#[cfg(test)]
mod tests;

mod addressing;
pub use addressing::*;

mod beacon;
pub use beacon::*;

mod command;
pub use command::*;

mod cursor;
pub use cursor::*;

mod fcs;
pub use fcs::*;

mod frame_control;
pub use frame_control::*;

mod mpdu;
pub use mpdu::*;

/// An error that can occur when parsing an IEEE 802.15.4 frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A field extends past the end of the buffer, or the declared MPDU
    /// length is smaller than the header it must carry.
    UnexpectedEnd,
    /// The frame type is an acknowledgment or a reserved value.
    InvalidFrameType,
    /// The MAC command identifier is not one defined by IEEE 802.15.4-2006.
    UnknownCommand(u8),
    /// The security-enabled bit is set but the frame cannot be unsecured.
    UnsupportedSecurity,
}

/// A type alias for `Result<T, mac15d4_frame::Error>`.
pub type Result<T> = core::result::Result<T, Error>;
