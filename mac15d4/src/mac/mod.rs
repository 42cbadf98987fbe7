//! MAC sublayer receive path.
//!
//! [`MacCore`] turns length-prefixed buffers handed up by the radio into
//! handler invocations: extract link quality, short-circuit promiscuous
//! mode, parse, defer requests while a transaction is outstanding, route
//! through the state dispatch matrix, and settle buffer ownership.
//! Exactly one of "a handler took the buffer" or "the buffer went back to
//! the pool" happens per frame.
//!
//! Everything runs to completion in the caller's context; the radio holds
//! the next frame back until the previous one's second pass returns, so
//! nothing here blocks, suspends or locks.

pub mod capabilities;
pub mod constants;
pub mod handlers;
pub mod pib;
pub mod routing;
pub mod state;
pub mod timer;

mod beacon_sync;
mod conflict;


use heapless::Deque;

use crate::frame::{
    Address, AddressingMode, CommandId, Error as FrameError, MacPayload, MpduHeader, MpduRepr,
    Span,
};
use crate::phy::{FramePool, RawFrame, Transmitter};

use capabilities::Capabilities;
use constants::RX_QUEUE_CAPACITY;
use handlers::{DataIndication, ProtocolHandlers, SyncLossReason};
use pib::Pib;
use routing::{route, FrameKind, Route, RoutingKey, Verdict};
use state::{DeviceState, PollState};
use timer::{TimerId, TimerService};

/// The receive-path core: parser, state dispatch matrix and PAN-Id
/// conflict detector, wired to their external collaborators.
pub struct MacCore<H, T, X, P> {
    /// PAN Information Base.
    pub pib: Pib,
    /// Operating state the dispatch matrix routes on.
    pub state: DeviceState,
    /// Protocol paths this device services.
    pub caps: Capabilities,
    /// Protocol machinery behind the dispatch matrix.
    pub handlers: H,
    /// External timer service.
    pub timers: T,
    /// Transmit pipeline.
    pub radio: X,
    /// Pool the receive buffers return to.
    pub pool: P,
    queue: Deque<RawFrame, RX_QUEUE_CAPACITY>,
}

impl<H, T, X, P> MacCore<H, T, X, P>
where
    H: ProtocolHandlers,
    T: TimerService,
    X: Transmitter,
    P: FramePool,
{
    /// Creates a new [`MacCore`] in the unassociated idle state.
    pub fn new(handlers: H, timers: T, radio: X, pool: P) -> Self {
        Self {
            pib: Pib::default(),
            state: DeviceState::default(),
            caps: Capabilities::default(),
            handlers,
            timers,
            radio,
            pool,
            queue: Deque::new(),
        }
    }

    /// Append a received buffer to the ingestion queue. A buffer that no
    /// longer fits goes back to the pool, as if the radio had run out of
    /// buffers.
    pub fn enqueue(&mut self, frame: RawFrame) {
        if let Err(frame) = self.queue.push_back(frame) {
            warn!("rx queue full, dropping frame");
            self.pool.release(frame);
        }
    }

    /// Frames waiting in the ingestion queue.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Process the frame at the head of the ingestion queue. Returns
    /// `false` when the queue is empty.
    pub fn process_next(&mut self) -> bool {
        match self.queue.pop_front() {
            Some(frame) => {
                self.process(frame);
                true
            }
            None => false,
        }
    }

    /// Second-pass processing of one received buffer.
    pub fn process(&mut self, mut buffer: RawFrame) {
        // Link quality comes first: promiscuous forwarding needs it even
        // when nothing else of the frame is trusted.
        let link_quality = buffer.lqi();

        if self.pib.promiscuous_mode {
            self.promiscuous_indication(buffer, link_quality);
            return;
        }

        let frame = match self.parse(&mut buffer) {
            Ok(frame) => frame,
            Err(_) => {
                debug!("rx: dropping malformed frame");
                self.pool.release(buffer);
                return;
            }
        };

        // While a transaction is outstanding, the two request commands
        // that demand a response go to the back of the queue instead of
        // being dropped; they parse again on their next turn.
        if self.state.busy && self.should_defer(&frame) {
            debug!("rx: busy, deferring request command");
            self.enqueue(buffer);
            return;
        }

        let key = self.routing_key(&frame);
        let route = route(&key, self.caps);

        if let Some(buffer) = self.execute(route, &frame, buffer) {
            self.pool.release(buffer);
        }
    }

    fn parse(&mut self, buffer: &mut RawFrame) -> Result<MpduRepr, FrameError> {
        let header = {
            let mpdu = buffer.mpdu().ok_or(FrameError::UnexpectedEnd)?;
            MpduHeader::parse(mpdu)?
        };

        let payload_shift = if header.frame_control.security_enabled {
            if !self.caps.contains(Capabilities::SECURITY) {
                return Err(FrameError::UnsupportedSecurity);
            }
            let mpdu = buffer.mpdu_mut().ok_or(FrameError::UnexpectedEnd)?;
            self.handlers
                .unsecure(&header, mpdu)
                .map_err(|()| FrameError::UnsupportedSecurity)?
        } else {
            0
        };

        let mpdu = buffer.mpdu().ok_or(FrameError::UnexpectedEnd)?;
        MpduRepr::parse_payload(header, mpdu, payload_shift)
    }

    fn should_defer(&self, frame: &MpduRepr) -> bool {
        matches!(
            frame.command_id(),
            Some(CommandId::DataRequest | CommandId::BeaconRequest)
        )
    }

    fn routing_key(&self, frame: &MpduRepr) -> RoutingKey {
        let kind = match &frame.payload {
            MacPayload::Beacon(_) => FrameKind::Beacon,
            MacPayload::Data(_) => FrameKind::Data,
            MacPayload::Command(command) => FrameKind::Command(command.id()),
        };

        RoutingKey {
            poll: self.state.poll,
            scan: self.state.scan,
            mac: self.state.mac,
            beacon_from_parent: kind == FrameKind::Beacon && self.beacon_from_parent(frame),
            associated_pan_coord: self.pib.associated_pan_coord,
            indirect_pending: self.handlers.has_indirect_data(),
            kind,
        }
    }

    /// Whether a beacon originates from the recorded parent: same PAN id,
    /// and the recorded coordinator address for the addressing mode the
    /// beacon carries.
    fn beacon_from_parent(&self, frame: &MpduRepr) -> bool {
        if frame.addressing.src_pan_id != Some(self.pib.pan_id) {
            return false;
        }

        match frame.addressing.src_address {
            Address::Short(address) => address == self.pib.coord_short_address,
            Address::Extended(address) => address == self.pib.coord_extended_address,
            Address::Absent => false,
        }
    }

    /// Execute a routing decision. Returns the buffer when no handler
    /// consumed it.
    fn execute(&mut self, route: Route, frame: &MpduRepr, buffer: RawFrame) -> Option<RawFrame> {
        if route.finalize_poll {
            // The poll that was waiting for this frame is over, whatever
            // the frame turned out to be.
            self.handlers.poll_complete();
            self.state.poll = PollState::Idle;
        }

        match route.verdict {
            Verdict::AssociateRequest => {
                self.handlers.associate_request(frame, buffer);
                None
            }
            Verdict::AssociateResponse => {
                self.timers.stop(TimerId::PollWait);
                debug_assert!(!self.timers.is_running(TimerId::PollWait));
                self.handlers.associate_response(frame, buffer);
                None
            }
            Verdict::DisassociateNotification { idle_transition } => {
                self.handlers.disassociate_notification(frame, buffer);
                if idle_transition {
                    self.handlers.idle_transition();
                }
                None
            }
            Verdict::DataRequest => {
                self.handlers.data_request(frame, buffer);
                None
            }
            Verdict::NullDataResponse => {
                self.handlers.null_data_frame();
                Some(buffer)
            }
            Verdict::BeaconRequest => {
                self.handlers.beacon_request(frame, buffer);
                None
            }
            Verdict::OrphanNotification => {
                self.handlers.orphan_notification(frame, buffer);
                None
            }
            Verdict::CoordRealignment => {
                self.handlers.coord_realignment(frame, buffer);
                None
            }
            Verdict::OrphanRealignment => {
                self.timers.stop(TimerId::ScanDuration);
                self.handlers.orphan_realignment(frame, buffer);
                None
            }
            Verdict::ScanBeacon {
                check_as_pc,
                check_as_device,
            } => {
                if check_as_pc {
                    self.check_pan_id_conflict_as_pc(frame, true);
                }
                if check_as_device {
                    self.check_pan_id_conflict_as_device(frame, true);
                }
                self.handlers.beacon_frame(frame, buffer);
                None
            }
            Verdict::SteadyBeacon {
                check_as_pc,
                check_as_device,
                track,
            } => {
                if check_as_pc {
                    self.check_pan_id_conflict_as_pc(frame, false);
                }
                if check_as_device {
                    self.check_pan_id_conflict_as_device(frame, false);
                }
                if track {
                    self.track_parent_beacon(frame, buffer)
                } else {
                    Some(buffer)
                }
            }
            Verdict::DataFrame => {
                self.handlers.data_frame(frame, buffer);
                None
            }
            Verdict::SyncLossPanIdConflict => {
                self.handlers.sync_loss(SyncLossReason::PanIdConflict);
                Some(buffer)
            }
            Verdict::Ignore => Some(buffer),
            Verdict::Unmatched => {
                debug_assert!(false, "no route for received frame in current state");
                error!("rx: frame without a route in the current state");
                Some(buffer)
            }
        }
    }

    fn promiscuous_indication(&mut self, buffer: RawFrame, link_quality: u8) {
        // The indication forwards the raw MPDU; nothing of the frame is
        // validated, and the addressing metadata is zeroed.
        let msdu = Span {
            offset: 0,
            len: buffer.mpdu().map(|mpdu| mpdu.len()).unwrap_or(0),
        };

        let indication = DataIndication {
            sequence_number: 0,
            src_addr_mode: AddressingMode::Absent,
            src_pan_id: 0,
            src_address: Address::Absent,
            dst_addr_mode: AddressingMode::Absent,
            dst_pan_id: 0,
            dst_address: Address::Absent,
            msdu,
            link_quality,
            timestamp: buffer.timestamp,
        };

        self.handlers.data_indication(indication, buffer);
    }
}
