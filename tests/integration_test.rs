// End-to-end tests over synthetic streams built with test_utils

use png_splice::{test_utils::*, Criticality, Error, PngStream};

#[test]
fn walk_reports_chunks_in_stream_order() {
    // signature + tEXt("Hello") + IEND, per the format example
    let stream = minimal_png();
    let png = PngStream::new(&stream).expect("valid stream");

    let records: Vec<_> = png
        .chunks()
        .collect::<png_splice::Result<Vec<_>>>()
        .expect("well-formed chunks");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].chunk.type_str(), "tEXt");
    assert_eq!(records[0].chunk.criticality(), Criticality::Ancillary);
    assert_eq!(records[0].chunk.data(), b"\x48\x65\x6C\x6C\x6F");
    assert_eq!(records[1].chunk.type_str(), "IEND");
    assert_eq!(records[1].chunk.criticality(), Criticality::Critical);
}

#[test]
fn invalid_signature_is_fatal() {
    let err = PngStream::new(&[0u8; 16]).unwrap_err();
    assert!(matches!(err, Error::InvalidSignature { .. }));
}

#[test]
fn insert_then_rewalk_sees_new_chunk() {
    let stream = build_stream(&[(*b"tEXt", b"first"), (*b"tIME", b"second!")]);
    let png = PngStream::new(&stream).unwrap();

    // Insert between the two existing chunks
    let second_offset = png.chunks().nth(1).unwrap().unwrap().offset;
    let out = png.insert_chunk(second_offset, *b"teSt", b"spliced").unwrap();

    let png = PngStream::new(&out).unwrap();
    let types: Vec<String> = png
        .chunks()
        .map(|r| r.unwrap().chunk.type_str())
        .collect();
    assert_eq!(types, ["tEXt", "teSt", "tIME", "IEND"]);
}

#[test]
fn encode_then_decode_round_trips_a_hidden_payload() {
    let stream = minimal_png();
    let payload = b"attack at dawn";
    let key = b"correct horse";

    // Hide the payload in a ciphered chunk after the signature
    let png = PngStream::new(&stream).unwrap();
    let hidden = png.insert_ciphered(8, *b"teSt", payload, key).unwrap();
    assert_eq!(hidden.len(), stream.len() + 12 + payload.len());

    // The payload must not appear in the clear
    assert!(!hidden.windows(payload.len()).any(|w| w == &payload[..]));

    // Deciphering the chunk in place restores the cleartext on-stream
    let png = PngStream::new(&hidden).unwrap();
    let target = png.chunks().next().unwrap().unwrap();
    assert_eq!(target.chunk.type_str(), "teSt");

    let revealed = png.replace_ciphered(target.offset, key).unwrap();
    assert_eq!(revealed.len(), hidden.len());

    let png = PngStream::new(&revealed).unwrap();
    let chunk = png.chunks().next().unwrap().unwrap().chunk;
    assert_eq!(chunk.data(), payload);
    assert_eq!(chunk.crc(), png_splice::compute_crc(b"teSt", payload));
}

#[test]
fn decode_mode_consumes_exactly_the_original_chunk_span() {
    // Three chunks; rewrite the middle one and verify its neighbors' bytes
    let stream = build_stream(&[
        (*b"tEXt", b"before"),
        (*b"teSt", b"\x01\x02\x03\x04"),
        (*b"tIME", b"after"),
    ]);
    let png = PngStream::new(&stream).unwrap();
    let records: Vec<_> = png.chunks().map(|r| r.unwrap()).collect();
    let middle = &records[1];
    let after = &records[2];

    let out = png.replace_ciphered(middle.offset, b"zz").unwrap();
    assert_eq!(out.len(), stream.len());

    // Everything before the middle chunk's data and from the next chunk on
    // is byte-identical
    let untouched_head = middle.offset as usize + 8;
    assert_eq!(&out[..untouched_head], &stream[..untouched_head]);
    assert_eq!(
        &out[after.offset as usize..],
        &stream[after.offset as usize..]
    );
}

#[test]
fn walker_surfaces_truncation_instead_of_aborting() {
    let mut stream = minimal_png();
    stream.truncate(stream.len() - 3); // chop into IEND's CRC

    let png = PngStream::new(&stream).unwrap();
    let results: Vec<_> = png.chunks().collect();

    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(Error::Truncated { .. })));
}

#[test]
fn report_values_match_wire_layout() {
    let stream = build_stream(&[(*b"teSt", b"xyz")]);
    let png = PngStream::new(&stream).unwrap();
    let record = png.chunks().next().unwrap().unwrap();

    assert_eq!(record.index, 1);
    assert_eq!(record.offset, 8);
    assert_eq!(record.chunk.length(), 3);
    assert_eq!(record.chunk.type_value(), u32::from_be_bytes(*b"teSt"));
    assert_eq!(
        record.chunk.crc(),
        png_splice::compute_crc(b"teSt", b"xyz")
    );
}
