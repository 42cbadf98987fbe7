//! The state dispatch matrix as one pure, total routing function.
//!
//! [`route`] maps the tuple (poll state, scan state, MAC state, frame
//! kind) to exactly one [`Verdict`]. Nothing in here touches device state
//! or invokes a handler, so every reachable and unreachable combination
//! can be enumerated and tested without wiring up a device.

use crate::frame::CommandId;

use super::capabilities::Capabilities;
use super::state::{MacState, PollState, ScanState};

/// Frame classification the matrix routes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Beacon,
    Data,
    Command(CommandId),
}

/// Inputs of one routing decision.
#[derive(Debug, Clone, Copy)]
pub struct RoutingKey {
    pub poll: PollState,
    pub scan: ScanState,
    pub mac: MacState,
    /// The beacon's source matches the recorded parent, PAN id and
    /// mode-aware address. Meaningful for beacon frames only.
    pub beacon_from_parent: bool,
    /// The device is associated through the PAN coordinator itself.
    pub associated_pan_coord: bool,
    /// The indirect transaction queue is non-empty.
    pub indirect_pending: bool,
    pub kind: FrameKind,
}

/// What the dispatcher must do with a routed frame. Every variant either
/// consumes the buffer through exactly one handler or leaves it with the
/// dispatcher, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    AssociateRequest,
    /// Stop the poll-wait timer, then hand over to the
    /// association-response handler.
    AssociateResponse,
    /// Hand over to the disassociation handler, optionally requesting the
    /// idle transition afterwards.
    DisassociateNotification { idle_transition: bool },
    /// Hand over to the data-request handler; only routed while the
    /// indirect queue is non-empty.
    DataRequest,
    /// Nothing is queued for the poller: trigger an empty data frame
    /// instead of consuming the request.
    NullDataResponse,
    BeaconRequest,
    OrphanNotification,
    CoordRealignment,
    /// Stop the scan-duration timer, then hand over to the
    /// orphan-realignment handler.
    OrphanRealignment,
    /// Beacon received mid active/passive scan: run the selected conflict
    /// checks, then hand over to the beacon handler.
    ScanBeacon { check_as_pc: bool, check_as_device: bool },
    /// Beacon received in a steady state: run the selected conflict
    /// checks. `track` selects the parent-beacon bookkeeping, which alone
    /// may consume the frame.
    SteadyBeacon {
        check_as_pc: bool,
        check_as_device: bool,
        track: bool,
    },
    DataFrame,
    /// A PAN-Id conflict notification reached the PAN coordinator: raise
    /// sync-loss without consuming the frame.
    SyncLossPanIdConflict,
    /// Intentionally not consumed.
    Ignore,
    /// No rule covers this combination; a routing inconsistency.
    Unmatched,
}

/// One routed frame: whether the outstanding poll finishes first, and the
/// verdict to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub finalize_poll: bool,
    pub verdict: Verdict,
}

impl Route {
    fn plain(verdict: Verdict) -> Self {
        Self {
            finalize_poll: false,
            verdict,
        }
    }

    fn after_poll(verdict: Verdict) -> Self {
        Self {
            finalize_poll: true,
            verdict,
        }
    }
}

/// Route one parsed frame against the device state.
pub fn route(key: &RoutingKey, caps: Capabilities) -> Route {
    match key.poll {
        PollState::ExplicitPoll | PollState::ImplicitPoll
            if caps.contains(Capabilities::POLLING) =>
        {
            Route::after_poll(route_polling(key, caps))
        }
        PollState::AwaitAssocResponse if caps.contains(Capabilities::ASSOCIATION_INITIATOR) => {
            Route::plain(route_awaiting_association(key))
        }
        PollState::Idle => Route::plain(match key.scan {
            ScanState::Idle => route_steady(key, caps),
            _ if caps.contains(Capabilities::SCAN) => route_scanning(key, caps),
            _ => Verdict::Ignore,
        }),
        _ => Route::plain(Verdict::Unmatched),
    }
}

/// Wait-for-data after an explicit or implicit poll.
fn route_polling(key: &RoutingKey, caps: Capabilities) -> Verdict {
    match key.kind {
        FrameKind::Command(command) => match command {
            CommandId::AssociationRequest
                if caps.contains(Capabilities::ASSOCIATION_RESPONDER) =>
            {
                Verdict::AssociateRequest
            }
            CommandId::DisassociationNotification
                if caps.contains(Capabilities::DISASSOCIATION) =>
            {
                // The device scans for networks again afterwards.
                Verdict::DisassociateNotification {
                    idle_transition: true,
                }
            }
            CommandId::DataRequest => {
                if !caps.contains(Capabilities::INDIRECT_DATA) {
                    Verdict::Ignore
                } else if key.indirect_pending {
                    Verdict::DataRequest
                } else {
                    Verdict::NullDataResponse
                }
            }
            CommandId::PanIdConflictNotification => Verdict::Ignore,
            CommandId::OrphanNotification if caps.contains(Capabilities::ORPHAN_RESPONDER) => {
                Verdict::OrphanNotification
            }
            CommandId::BeaconRequest if caps.contains(Capabilities::COORDINATOR) => {
                // Only a coordinator both polls and answers beacon
                // requests: the PAN coordinator never polls, end devices
                // never answer.
                if key.mac == MacState::Coordinator {
                    Verdict::BeaconRequest
                } else {
                    Verdict::Ignore
                }
            }
            CommandId::CoordinatorRealignment if caps.contains(Capabilities::REALIGNMENT) => {
                Verdict::CoordRealignment
            }
            _ => Verdict::Unmatched,
        },
        FrameKind::Data => Verdict::DataFrame,
        FrameKind::Beacon => Verdict::Ignore,
    }
}

/// Waiting for the response to an association request; only that response
/// or a data frame is expected.
fn route_awaiting_association(key: &RoutingKey) -> Verdict {
    match key.kind {
        FrameKind::Command(CommandId::AssociationResponse) => Verdict::AssociateResponse,
        FrameKind::Data => Verdict::DataFrame,
        _ => Verdict::Ignore,
    }
}

/// A scan is running.
fn route_scanning(key: &RoutingKey, caps: Capabilities) -> Verdict {
    match key.scan {
        // Everything received during an energy-detect measurement is
        // ignored.
        ScanState::EnergyDetect => Verdict::Ignore,
        ScanState::Active | ScanState::Passive => match key.kind {
            FrameKind::Beacon => Verdict::ScanBeacon {
                check_as_pc: caps.contains(Capabilities::PAN_ID_CONFLICT_PC)
                    && key.mac == MacState::PanCoordinator,
                check_as_device: caps.contains(Capabilities::PAN_ID_CONFLICT_DEVICE)
                    && key.associated_pan_coord
                    && matches!(key.mac, MacState::Associated | MacState::Coordinator),
            },
            _ => Verdict::Ignore,
        },
        ScanState::Orphan => match key.kind {
            FrameKind::Command(CommandId::CoordinatorRealignment) => Verdict::OrphanRealignment,
            _ => Verdict::Ignore,
        },
        // Not reachable through route().
        ScanState::Idle => Verdict::Unmatched,
    }
}

/// Neither polling nor scanning: route on the steady MAC state.
fn route_steady(key: &RoutingKey, caps: Capabilities) -> Verdict {
    match key.mac {
        MacState::PanCoordinator if caps.contains(Capabilities::COORDINATOR) => {
            route_pan_coordinator(key, caps)
        }
        MacState::PanCoordinator => Verdict::Unmatched,
        MacState::Idle | MacState::Associated | MacState::Coordinator => {
            route_in_network(key, caps)
        }
    }
}

fn route_pan_coordinator(key: &RoutingKey, caps: Capabilities) -> Verdict {
    match key.kind {
        FrameKind::Command(command) => match command {
            CommandId::AssociationRequest
                if caps.contains(Capabilities::ASSOCIATION_RESPONDER) =>
            {
                Verdict::AssociateRequest
            }
            CommandId::DisassociationNotification
                if caps.contains(Capabilities::DISASSOCIATION) =>
            {
                Verdict::DisassociateNotification {
                    idle_transition: false,
                }
            }
            CommandId::DataRequest if caps.contains(Capabilities::INDIRECT_DATA) => {
                if key.indirect_pending {
                    Verdict::DataRequest
                } else {
                    Verdict::NullDataResponse
                }
            }
            CommandId::OrphanNotification if caps.contains(Capabilities::ORPHAN_RESPONDER) => {
                Verdict::OrphanNotification
            }
            CommandId::BeaconRequest => Verdict::BeaconRequest,
            CommandId::PanIdConflictNotification
                if caps.contains(Capabilities::PAN_ID_CONFLICT_PC) =>
            {
                Verdict::SyncLossPanIdConflict
            }
            _ => Verdict::Ignore,
        },
        FrameKind::Data => Verdict::DataFrame,
        FrameKind::Beacon => {
            if caps.contains(Capabilities::PAN_ID_CONFLICT_PC) {
                Verdict::SteadyBeacon {
                    check_as_pc: true,
                    check_as_device: false,
                    track: false,
                }
            } else {
                Verdict::Ignore
            }
        }
    }
}

/// Idle, associated or coordinator: the common in-network states.
fn route_in_network(key: &RoutingKey, caps: Capabilities) -> Verdict {
    match key.kind {
        FrameKind::Beacon => Verdict::SteadyBeacon {
            check_as_pc: false,
            check_as_device: caps.contains(Capabilities::PAN_ID_CONFLICT_DEVICE)
                && key.associated_pan_coord
                && key.mac != MacState::Idle,
            track: caps.contains(Capabilities::BEACON_SYNC) && key.beacon_from_parent,
        },
        FrameKind::Command(command) => match command {
            CommandId::DisassociationNotification
                if caps.contains(Capabilities::DISASSOCIATION) =>
            {
                Verdict::DisassociateNotification {
                    idle_transition: key.mac == MacState::Associated,
                }
            }
            CommandId::CoordinatorRealignment if caps.contains(Capabilities::REALIGNMENT) => {
                Verdict::CoordRealignment
            }
            CommandId::BeaconRequest if caps.contains(Capabilities::COORDINATOR) => {
                // Coordinators answer beacon requests; end devices do not.
                if key.mac == MacState::Coordinator {
                    Verdict::BeaconRequest
                } else {
                    Verdict::Ignore
                }
            }
            CommandId::AssociationRequest
                if caps.contains(Capabilities::ASSOCIATION_RESPONDER) =>
            {
                Verdict::AssociateRequest
            }
            CommandId::DataRequest if caps.contains(Capabilities::INDIRECT_DATA) => {
                if key.indirect_pending {
                    Verdict::DataRequest
                } else {
                    Verdict::NullDataResponse
                }
            }
            CommandId::OrphanNotification if caps.contains(Capabilities::ORPHAN_RESPONDER) => {
                Verdict::OrphanNotification
            }
            _ => Verdict::Ignore,
        },
        FrameKind::Data => Verdict::DataFrame,
    }
}
