//! Protocol action collaborators invoked by the dispatch matrix.

use crate::frame::{Address, AddressingMode, MpduHeader, MpduRepr, Span};
use crate::phy::RawFrame;

/// Reason reported with a synchronisation-loss event.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncLossReason {
    /// Another PAN coordinator beacons with this PAN's identifier.
    PanIdConflict,
    /// The coordinator realigned the PAN.
    Realignment,
    /// Too many consecutive beacons were missed.
    BeaconLost,
}

/// Data indication built for promiscuously received frames: the raw MPDU
/// with all addressing metadata zeroed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataIndication {
    pub sequence_number: u8,
    pub src_addr_mode: AddressingMode,
    pub src_pan_id: u16,
    pub src_address: Address,
    pub dst_addr_mode: AddressingMode,
    pub dst_pan_id: u16,
    pub dst_address: Address,
    /// The forwarded service data unit within the buffer's MPDU region.
    pub msdu: Span,
    pub link_quality: u8,
    pub timestamp: Option<u32>,
}

/// The protocol machinery behind the dispatch matrix.
///
/// A handler that is invoked with a buffer takes ownership of it. The
/// exchange behind each handler (responses, confirmations, state
/// transitions beyond the events below) happens outside this core; only
/// the call contract matters here.
pub trait ProtocolHandlers {
    /// An association request reached this coordinator.
    fn associate_request(&mut self, frame: &MpduRepr, buffer: RawFrame);
    /// The association response this device was polling for arrived.
    fn associate_response(&mut self, frame: &MpduRepr, buffer: RawFrame);
    fn disassociate_notification(&mut self, frame: &MpduRepr, buffer: RawFrame);
    /// A device polls for queued indirect data. Only invoked while the
    /// indirect queue is non-empty.
    fn data_request(&mut self, frame: &MpduRepr, buffer: RawFrame);
    fn beacon_request(&mut self, frame: &MpduRepr, buffer: RawFrame);
    fn orphan_notification(&mut self, frame: &MpduRepr, buffer: RawFrame);
    /// Realignment received in a steady or polling state.
    fn coord_realignment(&mut self, frame: &MpduRepr, buffer: RawFrame);
    /// Realignment that answers the running orphan scan.
    fn orphan_realignment(&mut self, frame: &MpduRepr, buffer: RawFrame);
    fn beacon_frame(&mut self, frame: &MpduRepr, buffer: RawFrame);
    fn data_frame(&mut self, frame: &MpduRepr, buffer: RawFrame);

    /// The outstanding poll is over, whatever frame ended it; invoked
    /// before that frame is routed.
    fn poll_complete(&mut self);
    /// A data request arrived with nothing queued for the poller; answer
    /// with an empty data frame.
    fn null_data_frame(&mut self);
    /// Whether the indirect transaction queue holds at least one frame.
    fn has_indirect_data(&self) -> bool;

    /// Promiscuous-mode delivery straight to the next higher layer.
    fn data_indication(&mut self, indication: DataIndication, buffer: RawFrame);

    /// Synchronisation was lost; fire-and-forget toward the state owner.
    fn sync_loss(&mut self, reason: SyncLossReason);
    /// The device fell back to the unassociated idle state and scans for
    /// networks again.
    fn idle_transition(&mut self);
    /// Nothing keeps the radio awake until the next tracked beacon.
    fn sleep_transition(&mut self);

    /// Remove the security header and authenticate the frame, returning
    /// how many payload octets the unsecuring consumed. The default build
    /// cannot unsecure anything.
    fn unsecure(&mut self, _header: &MpduHeader, _mpdu: &mut [u8]) -> Result<usize, ()> {
        Err(())
    }
}
