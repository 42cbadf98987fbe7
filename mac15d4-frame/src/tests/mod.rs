use super::*;

use std::vec::Vec;

mod parsing;

/// Assemble an MPDU image: FCF, sequence number, pre-encoded addressing
/// fields, MAC payload, and a zeroed FCS (the FCS is not validated on the
/// receive path).
fn encode_mpdu(fc: FrameControlRepr, seq: u8, addressing: &[u8], payload: &[u8]) -> Vec<u8> {
    let mut mpdu = fc.into_bits().to_le_bytes().to_vec();
    mpdu.push(seq);
    mpdu.extend_from_slice(addressing);
    mpdu.extend_from_slice(payload);
    mpdu.extend_from_slice(&[0x00; 2]);
    mpdu
}

fn frame_control(
    frame_type: FrameType,
    dst: AddressingMode,
    src: AddressingMode,
    compression: bool,
) -> FrameControlRepr {
    FrameControlRepr {
        frame_type,
        security_enabled: false,
        frame_pending: false,
        ack_request: false,
        pan_id_compression: compression,
        frame_version: FrameVersion::Ieee802154_2003,
        dst_addressing_mode: dst,
        src_addressing_mode: src,
    }
}

#[test]
fn mac_payload_length_law() {
    let modes = [
        AddressingMode::Absent,
        AddressingMode::Short,
        AddressingMode::Extended,
    ];

    for dst in modes {
        for src in modes {
            for compression in [false, true] {
                let fc = frame_control(FrameType::Data, dst, src, compression);

                let mut addressing = Vec::new();
                let mut expected_len = 0;

                if dst != AddressingMode::Absent {
                    addressing.extend_from_slice(&0xabcd_u16.to_le_bytes());
                    expected_len += 2 + dst.size();
                    match dst {
                        AddressingMode::Short => {
                            addressing.extend_from_slice(&0x1122_u16.to_le_bytes())
                        }
                        AddressingMode::Extended => {
                            addressing.extend_from_slice(&0x0102030405060708_u64.to_le_bytes())
                        }
                        _ => (),
                    }
                }

                if src != AddressingMode::Absent {
                    if !compression {
                        addressing.extend_from_slice(&0xbeef_u16.to_le_bytes());
                        expected_len += 2;
                    }
                    expected_len += src.size();
                    match src {
                        AddressingMode::Short => {
                            addressing.extend_from_slice(&0x3344_u16.to_le_bytes())
                        }
                        AddressingMode::Extended => {
                            addressing.extend_from_slice(&0x1112131415161718_u64.to_le_bytes())
                        }
                        _ => (),
                    }
                }

                let mpdu = encode_mpdu(fc, 0x42, &addressing, &[0xaa; 5]);
                let frame = MpduRepr::parse(&mpdu).unwrap();

                assert_eq!(AddressingFieldsRepr::field_len(&fc), expected_len);
                assert_eq!(frame.mac_payload_len, mpdu.len() - 2 - 1 - expected_len - 2);
                assert_eq!(frame.mac_payload_len, 5);
                assert_eq!(frame.sequence_number, 0x42);

                if src != AddressingMode::Absent {
                    if compression {
                        // The elided source PAN id mirrors the destination.
                        assert_eq!(frame.addressing.src_pan_id, frame.addressing.dst_pan_id);
                    } else {
                        assert_eq!(frame.addressing.src_pan_id, Some(0xbeef));
                    }
                }
            }
        }
    }
}

#[test]
fn declared_length_underflow_fails() {
    let fc = frame_control(
        FrameType::Data,
        AddressingMode::Short,
        AddressingMode::Short,
        false,
    );

    let mut addressing = Vec::new();
    addressing.extend_from_slice(&0xabcd_u16.to_le_bytes());
    addressing.extend_from_slice(&0x1122_u16.to_le_bytes());
    addressing.extend_from_slice(&0xbeef_u16.to_le_bytes());
    addressing.extend_from_slice(&0x3344_u16.to_le_bytes());

    // The smallest valid frame for this header: no payload at all.
    let mpdu = encode_mpdu(fc, 0x01, &addressing, &[]);
    assert!(MpduRepr::parse(&mpdu).is_ok());

    for len in 0..mpdu.len() {
        assert!(
            MpduRepr::parse(&mpdu[..len]).is_err(),
            "declared length {len} must fail parsing"
        );
    }
}
