use crate::tests::{encode_mpdu, frame_control};
use crate::*;

#[test]
fn parse_data_frame() {
    let mpdu = [
        0x41, 0xd8, // frame control
        0x01, // sequence number
        0xcd, 0xab, // destination PAN id
        0xff, 0xff, // destination address (broadcast)
        0xc7, 0xd9, 0xb5, 0x14, 0x00, 0x4b, 0x12, 0x00, // source extended address
        0x2b, 0x00, 0x00, 0x00, // payload
        0x00, 0x00, // FCS
    ];

    let frame = MpduRepr::parse(&mpdu).unwrap();

    assert_eq!(frame.frame_control.frame_type, FrameType::Data);
    assert!(frame.frame_control.pan_id_compression);
    assert_eq!(
        frame.frame_control.dst_addressing_mode,
        AddressingMode::Short
    );
    assert_eq!(
        frame.frame_control.src_addressing_mode,
        AddressingMode::Extended
    );
    assert_eq!(frame.sequence_number, 1);

    assert_eq!(frame.addressing.dst_pan_id, Some(0xabcd));
    assert_eq!(frame.addressing.dst_address, Address::BROADCAST);
    assert_eq!(frame.addressing.src_pan_id, Some(0xabcd));
    assert_eq!(
        frame.addressing.src_address,
        Address::Extended(0x0012_4b00_14b5_d9c7)
    );

    assert_eq!(frame.mac_payload_len, 4);
    let MacPayload::Data(payload) = frame.payload else {
        unreachable!()
    };
    assert_eq!(payload.of(&mpdu), &[0x2b, 0x00, 0x00, 0x00]);
}

#[test]
fn parse_empty_data_frame() {
    let fc = frame_control(
        FrameType::Data,
        AddressingMode::Short,
        AddressingMode::Short,
        true,
    );

    let mut addressing = 0xabcd_u16.to_le_bytes().to_vec();
    addressing.extend_from_slice(&0x1122_u16.to_le_bytes());
    addressing.extend_from_slice(&0x3344_u16.to_le_bytes());

    let mpdu = encode_mpdu(fc, 0x05, &addressing, &[]);
    let frame = MpduRepr::parse(&mpdu).unwrap();

    assert_eq!(frame.mac_payload_len, 0);
    let MacPayload::Data(payload) = frame.payload else {
        unreachable!()
    };
    assert!(payload.is_empty());
}

#[test]
fn oversized_payload_is_clamped() {
    // 119 declared payload octets exceed the largest MAC payload a data
    // frame can carry; the length is clamped, not rejected.
    let fc = frame_control(
        FrameType::Data,
        AddressingMode::Absent,
        AddressingMode::Absent,
        false,
    );

    let mpdu = encode_mpdu(fc, 0x09, &[], &[0x5a; 119]);
    let frame = MpduRepr::parse(&mpdu).unwrap();

    assert_eq!(frame.mac_payload_len, MAX_MAC_PAYLOAD_SIZE);
    let MacPayload::Data(payload) = frame.payload else {
        unreachable!()
    };
    assert_eq!(payload.len, MAX_MAC_PAYLOAD_SIZE);
    assert_eq!(payload.offset, 3);
}

#[test]
fn ack_and_reserved_frame_types_fail() {
    let ack = [0x02, 0x00, 0x05, 0x00, 0x00];
    assert_eq!(MpduRepr::parse(&ack), Err(Error::InvalidFrameType));

    let reserved = [0x04, 0x00, 0x05, 0x00, 0x00];
    assert_eq!(MpduRepr::parse(&reserved), Err(Error::InvalidFrameType));
}

#[test]
fn security_bit_rejected_without_unsecuring() {
    let mut fc = frame_control(
        FrameType::Data,
        AddressingMode::Absent,
        AddressingMode::Absent,
        false,
    );
    fc.security_enabled = true;

    let mpdu = encode_mpdu(fc, 0x01, &[], &[0xaa; 4]);
    assert_eq!(MpduRepr::parse(&mpdu), Err(Error::UnsupportedSecurity));
}
