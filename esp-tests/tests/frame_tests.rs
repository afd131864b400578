//! Integration tests for the serial frame codec
//!
//! Boundary cases mirror what the host-side speed test sends over the
//! wire: maximum payload 8189, length fields whose raw bytes collide
//! with the markers, and payloads full of reserved byte values.

use esp_core::frame::{
    END_MARKER, FrameDecoder, FrameError, FrameKind, MAX_FRAME_LEN, MAX_PAYLOAD_LEN, SPECIAL_BYTE,
    START_MARKER, encode_frame, encode_notice,
};
use heapless::Vec;

/// Feeds bytes expecting no decode errors; returns the completed kinds
fn feed<const CAP: usize>(decoder: &mut FrameDecoder<CAP>, bytes: &[u8]) -> std::vec::Vec<FrameKind> {
    let mut kinds = std::vec::Vec::new();
    for &byte in bytes {
        if let Some(kind) = decoder.push(byte).expect("unexpected decode error") {
            kinds.push(kind);
        }
    }
    kinds
}

// ============================================================================
// Tests: encoding
// ============================================================================

#[test]
fn test_encode_plain_payload_layout() {
    let mut out: Vec<u8, 64> = Vec::new();
    encode_frame(b"abcde", &mut out).unwrap();

    // Length field counts the payload plus its own two bytes
    assert_eq!(&out[..], &[254, 0, 7, b'a', b'b', b'c', b'd', b'e', 255]);
}

#[test]
fn test_encode_empty_payload() {
    let mut out: Vec<u8, 8> = Vec::new();
    encode_frame(&[], &mut out).unwrap();
    assert_eq!(&out[..], &[START_MARKER, 0, 2, END_MARKER]);
}

#[test]
fn test_encode_stuffs_all_reserved_bytes() {
    let mut out: Vec<u8, 16> = Vec::new();
    encode_frame(&[SPECIAL_BYTE, START_MARKER, END_MARKER], &mut out).unwrap();
    assert_eq!(
        &out[..],
        &[254, 0, 5, 253, 0, 253, 1, 253, 2, 255]
    );
}

#[test]
fn test_encode_rejects_oversized_payload() {
    let payload = vec![1u8; MAX_PAYLOAD_LEN + 1];
    let mut out: Vec<u8, MAX_FRAME_LEN> = Vec::new();
    assert_eq!(
        encode_frame(&payload, &mut out),
        Err(FrameError::PayloadTooLarge)
    );
}

#[test]
fn test_encode_overflow_on_small_buffer() {
    let mut out: Vec<u8, 4> = Vec::new();
    assert_eq!(encode_frame(b"abcde", &mut out), Err(FrameError::Overflow));
}

// ============================================================================
// Tests: roundtrips
// ============================================================================

#[test]
fn test_roundtrip_simple_payload() {
    let mut out: Vec<u8, 64> = Vec::new();
    encode_frame(b"zxcv1234", &mut out).unwrap();

    let mut decoder: FrameDecoder<64> = FrameDecoder::new();
    assert_eq!(feed(&mut decoder, &out), vec![FrameKind::Data]);
    assert_eq!(decoder.payload(), b"zxcv1234");
}

#[test]
fn test_roundtrip_reserved_bytes_payload() {
    // Every reserved byte value mixed into one frame
    let payload = [b'b', 16, 32, 253, 255, 254, 253, 0];
    let mut out: Vec<u8, 64> = Vec::new();
    encode_frame(&payload, &mut out).unwrap();

    let mut decoder: FrameDecoder<64> = FrameDecoder::new();
    assert_eq!(feed(&mut decoder, &out), vec![FrameKind::Data]);
    assert_eq!(decoder.payload(), &payload);
}

#[test]
fn test_roundtrip_length_field_low_byte_equals_end_marker() {
    // 509 payload bytes -> field 511 = 0x01FF, raw low byte == END_MARKER
    let payload = vec![1u8; 509];
    let mut out: Vec<u8, 2048> = Vec::new();
    encode_frame(&payload, &mut out).unwrap();
    assert_eq!(out[1], 0x01);
    assert_eq!(out[2], END_MARKER);

    let mut decoder: FrameDecoder<1024> = FrameDecoder::new();
    assert_eq!(feed(&mut decoder, &out), vec![FrameKind::Data]);
    assert_eq!(decoder.payload(), &payload[..]);
}

#[test]
fn test_roundtrip_length_field_low_byte_equals_start_marker() {
    // 508 payload bytes -> field 510 = 0x01FE, raw low byte == START_MARKER
    let payload = vec![7u8; 508];
    let mut out: Vec<u8, 2048> = Vec::new();
    encode_frame(&payload, &mut out).unwrap();
    assert_eq!(out[2], START_MARKER);

    let mut decoder: FrameDecoder<1024> = FrameDecoder::new();
    assert_eq!(feed(&mut decoder, &out), vec![FrameKind::Data]);
    assert_eq!(decoder.payload(), &payload[..]);
}

#[test]
fn test_roundtrip_maximum_payload_all_reserved() {
    // 8189 bytes of 255: every byte stuffed, the encoded frame hits
    // MAX_FRAME_LEN exactly
    let payload = vec![255u8; MAX_PAYLOAD_LEN];
    let mut out: Vec<u8, MAX_FRAME_LEN> = Vec::new();
    encode_frame(&payload, &mut out).unwrap();
    assert_eq!(out.len(), MAX_FRAME_LEN);

    let mut decoder: FrameDecoder<MAX_PAYLOAD_LEN> = FrameDecoder::new();
    assert_eq!(feed(&mut decoder, &out), vec![FrameKind::Data]);
    assert_eq!(decoder.payload(), &payload[..]);
}

#[test]
fn test_back_to_back_frames() {
    let mut first: Vec<u8, 64> = Vec::new();
    let mut second: Vec<u8, 64> = Vec::new();
    encode_frame(b"abcde", &mut first).unwrap();
    encode_frame(b"fghijk", &mut second).unwrap();

    let mut stream = first.to_vec();
    stream.extend_from_slice(&second);

    let mut decoder: FrameDecoder<64> = FrameDecoder::new();
    let mut payloads = std::vec::Vec::new();
    for &byte in &stream {
        if decoder.push(byte).unwrap().is_some() {
            payloads.push(decoder.payload().to_vec());
        }
    }
    assert_eq!(payloads, vec![b"abcde".to_vec(), b"fghijk".to_vec()]);
}

// ============================================================================
// Tests: notice frames
// ============================================================================

#[test]
fn test_notice_has_zero_length_field() {
    let mut out: Vec<u8, 64> = Vec::new();
    encode_notice("Link ready", &mut out).unwrap();
    assert_eq!(out[0], START_MARKER);
    assert_eq!(&out[1..3], &[0, 0]);
    assert_eq!(*out.last().unwrap(), END_MARKER);
}

#[test]
fn test_notice_roundtrip() {
    let mut out: Vec<u8, 128> = Vec::new();
    encode_notice("Num. of data bytes exceeds buffer size", &mut out).unwrap();

    let mut decoder: FrameDecoder<128> = FrameDecoder::new();
    assert_eq!(feed(&mut decoder, &out), vec![FrameKind::Notice]);
    assert_eq!(decoder.payload(), b"Num. of data bytes exceeds buffer size");
}

// ============================================================================
// Tests: decoder robustness
// ============================================================================

#[test]
fn test_noise_between_frames_is_ignored() {
    let mut out: Vec<u8, 64> = Vec::new();
    encode_frame(b"abc", &mut out).unwrap();

    let mut stream = vec![0u8, 17, 99]; // leftover garbage before the frame
    stream.extend_from_slice(&out);

    let mut decoder: FrameDecoder<64> = FrameDecoder::new();
    assert_eq!(feed(&mut decoder, &stream), vec![FrameKind::Data]);
    assert_eq!(decoder.payload(), b"abc");
}

#[test]
fn test_decoder_rejects_announced_oversize() {
    // Field 8192 announces 8190 payload bytes, one over the maximum
    let mut decoder: FrameDecoder<MAX_PAYLOAD_LEN> = FrameDecoder::new();
    assert_eq!(decoder.push(START_MARKER), Ok(None));
    assert_eq!(decoder.push(0x20), Ok(None));
    assert_eq!(decoder.push(0x00), Err(FrameError::PayloadTooLarge));
}

#[test]
fn test_decoder_reports_small_capacity_as_overflow() {
    // Announced 100 payload bytes against a 16-byte decoder
    let mut decoder: FrameDecoder<16> = FrameDecoder::new();
    assert_eq!(decoder.push(START_MARKER), Ok(None));
    assert_eq!(decoder.push(0x00), Ok(None));
    assert_eq!(decoder.push(102), Err(FrameError::Overflow));
}

#[test]
fn test_early_end_marker_is_truncated() {
    // Frame announces 3 payload bytes but ends after one
    let mut decoder: FrameDecoder<64> = FrameDecoder::new();
    assert_eq!(decoder.push(START_MARKER), Ok(None));
    assert_eq!(decoder.push(0), Ok(None));
    assert_eq!(decoder.push(5), Ok(None));
    assert_eq!(decoder.push(42), Ok(None));
    assert_eq!(decoder.push(END_MARKER), Err(FrameError::Truncated));
}

#[test]
fn test_restart_mid_frame_resynchronizes() {
    let mut decoder: FrameDecoder<64> = FrameDecoder::new();

    // Frame announces 3 payload bytes, then a new frame starts instead
    assert_eq!(decoder.push(START_MARKER), Ok(None));
    assert_eq!(decoder.push(0), Ok(None));
    assert_eq!(decoder.push(5), Ok(None));
    assert_eq!(decoder.push(1), Ok(None));
    assert_eq!(decoder.push(START_MARKER), Err(FrameError::Truncated));

    // The start marker already opened the next frame
    assert_eq!(decoder.push(0), Ok(None));
    assert_eq!(decoder.push(4), Ok(None));
    assert_eq!(decoder.push(9), Ok(None));
    assert_eq!(decoder.push(9), Ok(None));
    assert_eq!(decoder.push(END_MARKER), Ok(Some(FrameKind::Data)));
    assert_eq!(decoder.payload(), &[9, 9]);
}

#[test]
fn test_bad_trailer_byte_is_malformed() {
    let mut decoder: FrameDecoder<64> = FrameDecoder::new();
    assert_eq!(decoder.push(START_MARKER), Ok(None));
    assert_eq!(decoder.push(0), Ok(None));
    assert_eq!(decoder.push(3), Ok(None));
    assert_eq!(decoder.push(42), Ok(None));
    // Payload complete, but the closing marker is missing
    assert_eq!(decoder.push(0), Err(FrameError::Malformed));
}

#[test]
fn test_escape_pair_out_of_range_is_malformed() {
    let mut decoder: FrameDecoder<64> = FrameDecoder::new();
    assert_eq!(decoder.push(START_MARKER), Ok(None));
    assert_eq!(decoder.push(0), Ok(None));
    assert_eq!(decoder.push(3), Ok(None));
    assert_eq!(decoder.push(SPECIAL_BYTE), Ok(None));
    // 253 + 200 does not fit a byte
    assert_eq!(decoder.push(200), Err(FrameError::Malformed));
}

#[test]
fn test_invalid_length_field_is_malformed() {
    // Field value 1 cannot exist: the field counts its own two bytes
    let mut decoder: FrameDecoder<64> = FrameDecoder::new();
    assert_eq!(decoder.push(START_MARKER), Ok(None));
    assert_eq!(decoder.push(0), Ok(None));
    assert_eq!(decoder.push(1), Err(FrameError::Malformed));
}

#[test]
fn test_decoder_recovers_after_error() {
    let mut decoder: FrameDecoder<64> = FrameDecoder::new();

    // Broken frame
    assert_eq!(decoder.push(START_MARKER), Ok(None));
    assert_eq!(decoder.push(0), Ok(None));
    assert_eq!(decoder.push(1), Err(FrameError::Malformed));

    // Clean frame decodes normally afterwards
    let mut out: Vec<u8, 64> = Vec::new();
    encode_frame(b"ok", &mut out).unwrap();
    assert_eq!(feed(&mut decoder, &out), vec![FrameKind::Data]);
    assert_eq!(decoder.payload(), b"ok");
}

#[test]
fn test_empty_data_frame_roundtrip() {
    let mut decoder: FrameDecoder<64> = FrameDecoder::new();
    assert_eq!(
        feed(&mut decoder, &[START_MARKER, 0, 2, END_MARKER]),
        vec![FrameKind::Data]
    );
    assert!(decoder.payload().is_empty());
}
