//! MAC command frame payloads.

use super::cursor::Cursor;
use super::frame_control::{FrameControlRepr, FrameVersion};
use super::{Error, Result};

/// IEEE 802.15.4-2006 MAC command identifiers.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum CommandId {
    AssociationRequest = 0x01,
    AssociationResponse = 0x02,
    DisassociationNotification = 0x03,
    DataRequest = 0x04,
    PanIdConflictNotification = 0x05,
    OrphanNotification = 0x06,
    BeaconRequest = 0x07,
    CoordinatorRealignment = 0x08,
}

impl TryFrom<u8> for CommandId {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Ok(match value {
            0x01 => Self::AssociationRequest,
            0x02 => Self::AssociationResponse,
            0x03 => Self::DisassociationNotification,
            0x04 => Self::DataRequest,
            0x05 => Self::PanIdConflictNotification,
            0x06 => Self::OrphanNotification,
            0x07 => Self::BeaconRequest,
            0x08 => Self::CoordinatorRealignment,
            _ => return Err(Error::UnknownCommand(value)),
        })
    }
}

/// The parsed payload of a MAC command frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum CommandRepr {
    AssociationRequest {
        capability_info: u8,
    },
    AssociationResponse {
        short_address: u16,
        status: u8,
    },
    DisassociationNotification {
        reason: u8,
    },
    DataRequest,
    PanIdConflictNotification,
    OrphanNotification,
    BeaconRequest,
    CoordinatorRealignment {
        pan_id: u16,
        coord_short_address: u16,
        logical_channel: u8,
        short_address: u16,
        /// Appended only on IEEE 802.15.4-2006 frames.
        channel_page: Option<u8>,
    },
}

impl CommandRepr {
    /// Return the identifier of this command.
    pub fn id(&self) -> CommandId {
        match self {
            Self::AssociationRequest { .. } => CommandId::AssociationRequest,
            Self::AssociationResponse { .. } => CommandId::AssociationResponse,
            Self::DisassociationNotification { .. } => CommandId::DisassociationNotification,
            Self::DataRequest => CommandId::DataRequest,
            Self::PanIdConflictNotification => CommandId::PanIdConflictNotification,
            Self::OrphanNotification => CommandId::OrphanNotification,
            Self::BeaconRequest => CommandId::BeaconRequest,
            Self::CoordinatorRealignment { .. } => CommandId::CoordinatorRealignment,
        }
    }

    pub(crate) fn parse(cursor: &mut Cursor<'_>, fc: &FrameControlRepr) -> Result<Self> {
        let id = CommandId::try_from(cursor.read_u8()?)?;

        Ok(match id {
            CommandId::AssociationRequest => Self::AssociationRequest {
                capability_info: cursor.read_u8()?,
            },
            CommandId::AssociationResponse => Self::AssociationResponse {
                short_address: cursor.read_u16_le()?,
                status: cursor.read_u8()?,
            },
            CommandId::DisassociationNotification => Self::DisassociationNotification {
                reason: cursor.read_u8()?,
            },
            CommandId::CoordinatorRealignment => {
                let pan_id = cursor.read_u16_le()?;
                let coord_short_address = cursor.read_u16_le()?;
                let logical_channel = cursor.read_u8()?;
                let short_address = cursor.read_u16_le()?;
                let channel_page = if fc.frame_version == FrameVersion::Ieee802154_2006 {
                    Some(cursor.read_u8()?)
                } else {
                    None
                };

                Self::CoordinatorRealignment {
                    pan_id,
                    coord_short_address,
                    logical_channel,
                    short_address,
                    channel_page,
                }
            }
            CommandId::DataRequest => Self::DataRequest,
            CommandId::PanIdConflictNotification => Self::PanIdConflictNotification,
            CommandId::OrphanNotification => Self::OrphanNotification,
            CommandId::BeaconRequest => Self::BeaconRequest,
        })
    }
}
