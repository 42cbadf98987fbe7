use crate::tests::{encode_mpdu, frame_control};
use crate::*;

fn command_addressing() -> [u8; 4] {
    // Destination PAN id 0xabcd, destination short address 0x0000.
    [0xcd, 0xab, 0x00, 0x00]
}

#[test]
fn parse_association_request() {
    let mut fc = frame_control(
        FrameType::MacCommand,
        AddressingMode::Short,
        AddressingMode::Extended,
        true,
    );
    fc.ack_request = true;

    let mut addressing = command_addressing().to_vec();
    addressing.extend_from_slice(&0xc7d9_b514_004b_1200_u64.to_le_bytes());

    let mpdu = encode_mpdu(fc, 0x11, &addressing, &[0x01, 0x8e]);
    let frame = MpduRepr::parse(&mpdu).unwrap();

    assert_eq!(frame.command_id(), Some(CommandId::AssociationRequest));
    assert_eq!(
        frame.addressing.src_address,
        Address::Extended(0xc7d9_b514_004b_1200)
    );
    assert_eq!(frame.addressing.src_pan_id, Some(0xabcd));
    assert_eq!(
        frame.payload,
        MacPayload::Command(CommandRepr::AssociationRequest {
            capability_info: 0x8e
        })
    );
}

#[test]
fn parse_association_response() {
    let fc = frame_control(
        FrameType::MacCommand,
        AddressingMode::Extended,
        AddressingMode::Extended,
        true,
    );

    let mut addressing = 0xabcd_u16.to_le_bytes().to_vec();
    addressing.extend_from_slice(&0x0102030405060708_u64.to_le_bytes());
    addressing.extend_from_slice(&0x1112131415161718_u64.to_le_bytes());

    let mpdu = encode_mpdu(fc, 0x12, &addressing, &[0x02, 0x34, 0x12, 0x00]);
    let frame = MpduRepr::parse(&mpdu).unwrap();

    assert_eq!(
        frame.payload,
        MacPayload::Command(CommandRepr::AssociationResponse {
            short_address: 0x1234,
            status: 0x00,
        })
    );
}

#[test]
fn parse_disassociation_notification() {
    let fc = frame_control(
        FrameType::MacCommand,
        AddressingMode::Short,
        AddressingMode::Short,
        true,
    );

    let mut addressing = command_addressing().to_vec();
    addressing.extend_from_slice(&0x1122_u16.to_le_bytes());

    let mpdu = encode_mpdu(fc, 0x13, &addressing, &[0x03, 0x02]);
    let frame = MpduRepr::parse(&mpdu).unwrap();

    assert_eq!(
        frame.payload,
        MacPayload::Command(CommandRepr::DisassociationNotification { reason: 0x02 })
    );
}

#[test]
fn parse_coordinator_realignment() {
    let payload = [0x08, 0x34, 0x12, 0x01, 0x00, 0x0f, 0xfe, 0xff];

    // A 2003-version frame carries no channel page.
    let fc = frame_control(
        FrameType::MacCommand,
        AddressingMode::Short,
        AddressingMode::Short,
        true,
    );
    let mut addressing = command_addressing().to_vec();
    addressing.extend_from_slice(&0x1122_u16.to_le_bytes());

    let mpdu = encode_mpdu(fc, 0x14, &addressing, &payload);
    let frame = MpduRepr::parse(&mpdu).unwrap();
    assert_eq!(
        frame.payload,
        MacPayload::Command(CommandRepr::CoordinatorRealignment {
            pan_id: 0x1234,
            coord_short_address: 0x0001,
            logical_channel: 0x0f,
            short_address: 0xfffe,
            channel_page: None,
        })
    );

    // The 2006 frame version appends the channel page.
    let mut fc = fc;
    fc.frame_version = FrameVersion::Ieee802154_2006;
    let mut payload = payload.to_vec();
    payload.push(0x02);

    let mpdu = encode_mpdu(fc, 0x15, &addressing, &payload);
    let frame = MpduRepr::parse(&mpdu).unwrap();
    assert_eq!(
        frame.payload,
        MacPayload::Command(CommandRepr::CoordinatorRealignment {
            pan_id: 0x1234,
            coord_short_address: 0x0001,
            logical_channel: 0x0f,
            short_address: 0xfffe,
            channel_page: Some(0x02),
        })
    );
}

#[test]
fn parse_bare_commands() {
    let fc = frame_control(
        FrameType::MacCommand,
        AddressingMode::Short,
        AddressingMode::Short,
        true,
    );
    let mut addressing = command_addressing().to_vec();
    addressing.extend_from_slice(&0x1122_u16.to_le_bytes());

    for (id, expected) in [
        (0x04, CommandRepr::DataRequest),
        (0x05, CommandRepr::PanIdConflictNotification),
        (0x06, CommandRepr::OrphanNotification),
        (0x07, CommandRepr::BeaconRequest),
    ] {
        let mpdu = encode_mpdu(fc, 0x16, &addressing, &[id]);
        let frame = MpduRepr::parse(&mpdu).unwrap();
        assert_eq!(frame.payload, MacPayload::Command(expected));
    }
}

#[test]
fn unknown_command_fails() {
    let fc = frame_control(
        FrameType::MacCommand,
        AddressingMode::Short,
        AddressingMode::Short,
        true,
    );
    let mut addressing = command_addressing().to_vec();
    addressing.extend_from_slice(&0x1122_u16.to_le_bytes());

    let mpdu = encode_mpdu(fc, 0x17, &addressing, &[0x0a]);
    assert_eq!(MpduRepr::parse(&mpdu), Err(Error::UnknownCommand(0x0a)));
}

#[test]
fn truncated_command_fields_fail() {
    let fc = frame_control(
        FrameType::MacCommand,
        AddressingMode::Short,
        AddressingMode::Short,
        true,
    );
    let mut addressing = command_addressing().to_vec();
    addressing.extend_from_slice(&0x1122_u16.to_le_bytes());

    // An association response with only one of its four payload octets:
    // the remaining fields may not be read out of the FCS.
    let mpdu = encode_mpdu(fc, 0x18, &addressing, &[0x02, 0x34]);
    assert_eq!(MpduRepr::parse(&mpdu), Err(Error::UnexpectedEnd));
}
