//! PAN-Id conflict detection and notification.
//!
//! Both detector variants run on received beacons whose superframe
//! specification carries the PAN-coordinator bit. The PAN coordinator
//! raises a synchronisation-loss event; a device associated through the
//! PAN coordinator reports the conflict to its parent with a notification
//! command frame.

use crate::frame::{compute_fcs, Address, CommandId, FrameControlRepr, FrameType, FrameVersion};
use crate::frame::{AddressingMode, MacPayload, MpduRepr, FCS_LEN};
use crate::phy::{CsmaMode, FramePool, RawFrame, TailWriter, Transmitter, TxRejected};

use super::capabilities::Capabilities;
use super::constants::NON_BEACON_ORDER;
use super::handlers::{ProtocolHandlers, SyncLossReason};
use super::state::{MacState, SyncState};
use super::timer::TimerService;
use super::MacCore;

/// Octets of a PAN-Id conflict notification MPDU: frame control, sequence
/// number, destination PAN id, two extended addresses, command id, FCS.
const CONFLICT_NOTIFICATION_LEN: usize = 2 + 1 + 2 + 8 + 8 + 1 + FCS_LEN;

impl<H, T, X, P> MacCore<H, T, X, P>
where
    H: ProtocolHandlers,
    T: TimerService,
    X: Transmitter,
    P: FramePool,
{
    /// Conflict detection on the PAN coordinator: a PAN-coordinator beacon
    /// carrying this PAN's identifier means another coordinator runs the
    /// same PAN.
    pub(crate) fn check_pan_id_conflict_as_pc(&mut self, frame: &MpduRepr, in_scan: bool) {
        let MacPayload::Beacon(beacon) = &frame.payload else {
            return;
        };
        if !beacon.superframe_spec.pan_coordinator() {
            return;
        }

        if self.conflicting_pan_id(frame, in_scan) {
            warn!("PAN-Id conflict detected as PAN coordinator");
            self.handlers.sync_loss(SyncLossReason::PanIdConflict);
        }
    }

    /// Conflict detection on a device associated through the PAN
    /// coordinator: a PAN-coordinator beacon with our PAN id from anyone
    /// but the parent is a conflict to report.
    pub(crate) fn check_pan_id_conflict_as_device(&mut self, frame: &MpduRepr, in_scan: bool) {
        let MacPayload::Beacon(beacon) = &frame.payload else {
            return;
        };
        if !beacon.superframe_spec.pan_coordinator() {
            return;
        }
        if !self.conflicting_pan_id(frame, in_scan) {
            return;
        }

        // Compare the address field the beacon actually carries; a beacon
        // without a source address cannot be attributed to the parent.
        let from_parent = match frame.addressing.src_address {
            Address::Short(address) => address == self.pib.coord_short_address,
            Address::Extended(address) => address == self.pib.coord_extended_address,
            Address::Absent => false,
        };

        if !from_parent {
            warn!("PAN-Id conflict detected, notifying coordinator");
            self.tx_pan_id_conflict_notification();
        }
    }

    fn conflicting_pan_id(&self, frame: &MpduRepr, in_scan: bool) -> bool {
        let Some(src_pan_id) = frame.addressing.src_pan_id else {
            return false;
        };

        (!in_scan && src_pan_id == self.pib.pan_id)
            || (self.caps.contains(Capabilities::SCAN)
                && src_pan_id == self.state.scan_origin_pan_id)
    }

    /// Build and submit the PAN-Id conflict notification to the parent.
    /// Reports failure on allocation failure or transmit rejection; no
    /// retry is attempted.
    pub(crate) fn tx_pan_id_conflict_notification(&mut self) -> bool {
        let Some(mut buffer) = self.pool.allocate() else {
            return false;
        };

        let sequence_number = self.pib.dsn;
        self.pib.dsn = self.pib.dsn.wrapping_add(1);

        build_conflict_notification(
            &mut buffer,
            self.pib.pan_id,
            self.pib.coord_extended_address,
            self.pib.extended_address,
            sequence_number,
        );

        let mode = self.command_csma_mode();
        match self.radio.submit(buffer, mode, true) {
            Ok(()) => {
                self.state.busy = true;
                true
            }
            Err(TxRejected(buffer)) => {
                self.pool.release(buffer);
                false
            }
        }
    }

    /// In a beacon-enabled network a command goes out with slotted CSMA-CA
    /// only while the device is in sync with its parent: synchronised
    /// before association, associated, or acting as a coordinator. In a
    /// nonbeacon network everything is unslotted.
    fn command_csma_mode(&self) -> CsmaMode {
        if !self.caps.contains(Capabilities::BEACON_NETWORK)
            || self.pib.beacon_order == NON_BEACON_ORDER
        {
            return CsmaMode::Unslotted;
        }

        let synced = (self.state.mac == MacState::Idle && self.state.sync == SyncState::BeforeAssoc)
            || self.state.mac == MacState::Associated
            || (self.caps.contains(Capabilities::COORDINATOR)
                && self.state.mac == MacState::Coordinator);

        if synced {
            CsmaMode::Slotted
        } else {
            CsmaMode::Unslotted
        }
    }
}

/// Assemble the notification back-to-front at the tail of the buffer:
/// command id, source address, destination address, destination PAN id,
/// sequence number, frame control, PHY length prefix. The FCS octets are
/// reserved first and filled once the rest of the MPDU is in place;
/// radios that insert the FCS in hardware overwrite them.
fn build_conflict_notification(
    buffer: &mut RawFrame,
    pan_id: u16,
    coord_extended_address: u64,
    extended_address: u64,
    sequence_number: u8,
) {
    let frame_control = FrameControlRepr {
        frame_type: FrameType::MacCommand,
        security_enabled: false,
        frame_pending: false,
        ack_request: true,
        pan_id_compression: true,
        frame_version: FrameVersion::Ieee802154_2003,
        dst_addressing_mode: AddressingMode::Extended,
        src_addressing_mode: AddressingMode::Extended,
    };

    let start = {
        let mut writer = TailWriter::new(buffer.full_buffer_mut());
        writer.reserve(FCS_LEN);
        writer.push_u8(CommandId::PanIdConflictNotification as u8);
        writer.push_u64_le(extended_address);
        writer.push_u64_le(coord_extended_address);
        writer.push_u16_le(pan_id);
        writer.push_u8(sequence_number);
        writer.push_u16_le(frame_control.into_bits());
        writer.push_u8(CONFLICT_NOTIFICATION_LEN as u8);
        writer.start()
    };
    buffer.set_offset(start);

    let content_len = 1 + CONFLICT_NOTIFICATION_LEN - FCS_LEN;
    let fcs = compute_fcs(&buffer.ppdu()[1..content_len]);
    buffer.ppdu_mut()[content_len..content_len + FCS_LEN].copy_from_slice(&fcs.to_le_bytes());
}
