//! Round-trip and layout tests for the embedding encoder.
//!
//! Every blob produced here is decoded per the container contract: a
//! little-endian `int32` prefix, then either verbatim bytes (`N == 0`) or a
//! raw-deflate stream whose inflated output has exactly `N` bytes.

use std::io::Read;

use flate2::read::DeflateDecoder;
use srcembed::prelude::*;

/// Decode a blob per the external contract, independent of the crate's accessors.
fn decode_blob(blob: &EmbeddedBlob) -> Vec<u8> {
    let bytes = blob.as_bytes();
    assert!(bytes.len() >= 4, "blob must carry a 4-byte prefix");

    let n = i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    assert!(n >= 0, "negative format indicators are reserved");

    if n == 0 {
        return bytes[4..].to_vec();
    }

    let mut decoder = DeflateDecoder::new(&bytes[4..]);
    let mut inflated = Vec::new();
    decoder.read_to_end(&mut inflated).unwrap();
    assert_eq!(inflated.len(), n as usize, "prefix must equal inflated length");
    inflated
}

#[test]
fn round_trip_verbatim_and_compressed() {
    let encoder = EmbeddingEncoder::new();
    let inputs: Vec<Vec<u8>> = vec![
        Vec::new(),
        b"tiny".to_vec(),
        vec![b'a'; COMPRESSION_THRESHOLD - 1],
        vec![b'a'; COMPRESSION_THRESHOLD],
        "using System;\nclass Program { static void Main() { } }\n"
            .repeat(64)
            .into_bytes(),
        (0..100_000u32).map(|i| (i % 256) as u8).collect(),
    ];

    for raw in inputs {
        let (_, blob) = encoder.encode_bytes(&raw, ChecksumAlgorithm::Sha256).unwrap();
        assert_eq!(decode_blob(&blob), raw);
    }
}

#[test]
fn threshold_boundary_is_exact() {
    let encoder = EmbeddingEncoder::new();

    let below = vec![b'x'; COMPRESSION_THRESHOLD - 1];
    let (_, blob) = encoder.encode_bytes(&below, ChecksumAlgorithm::Sha1).unwrap();
    assert_eq!(blob.format_indicator(), 0, "threshold - 1 is never compressed");

    let at = vec![b'x'; COMPRESSION_THRESHOLD];
    let (_, blob) = encoder.encode_bytes(&at, ChecksumAlgorithm::Sha1).unwrap();
    assert_eq!(
        blob.format_indicator() as usize,
        COMPRESSION_THRESHOLD,
        "compression is attempted at exactly the threshold"
    );
}

#[test]
fn empty_document_embeds_as_four_zero_bytes() {
    let encoder = EmbeddingEncoder::new();
    let (checksum, blob) = encoder.encode_bytes(b"", ChecksumAlgorithm::Sha256).unwrap();

    assert_eq!(blob.as_bytes(), &[0u8, 0, 0, 0]);
    assert_eq!(checksum, ChecksumAlgorithm::Sha256.digest(b""));
}

#[test]
fn checksum_covers_raw_bytes_never_blob() {
    let encoder = EmbeddingEncoder::new();
    let raw = "// checksum subject\n".repeat(50).into_bytes();

    let (checksum, blob) = encoder.encode_bytes(&raw, ChecksumAlgorithm::Sha1).unwrap();

    assert!(blob.is_compressed());
    assert_eq!(checksum, ChecksumAlgorithm::Sha1.digest(&raw));
    assert_ne!(checksum, ChecksumAlgorithm::Sha1.digest(blob.as_bytes()));
}

#[test]
fn bom_is_part_of_the_payload_and_checksum() {
    let encoder = EmbeddingEncoder::new();
    let mut raw = vec![0xEF, 0xBB, 0xBF];
    raw.extend_from_slice(b"class C { }");

    let (checksum, blob) = encoder.encode_bytes(&raw, ChecksumAlgorithm::Sha256).unwrap();

    assert_eq!(decode_blob(&blob)[..3], [0xEF, 0xBB, 0xBF]);
    assert_eq!(checksum, ChecksumAlgorithm::Sha256.digest(&raw));
}

#[test]
fn streaming_source_of_unknown_size_round_trips() {
    let encoder = EmbeddingEncoder::new();
    let raw = "// generated code line\n".repeat(10_000).into_bytes();

    let (checksum, blob) = encoder
        .encode_stream(raw.as_slice(), ChecksumAlgorithm::Sha256)
        .unwrap();

    assert_eq!(blob.format_indicator() as usize, raw.len());
    assert_eq!(decode_blob(&blob), raw);
    assert_eq!(checksum, ChecksumAlgorithm::Sha256.digest(&raw));
}

#[test]
fn oversized_stream_is_rejected_without_a_blob() {
    // A reader that claims to produce more than i32::MAX bytes without
    // allocating them: repeats a static block forever until the limit trips.
    struct Endless;
    impl Read for Endless {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            for b in buf.iter_mut() {
                *b = 0x5A;
            }
            Ok(buf.len())
        }
    }

    let encoder = EmbeddingEncoder::new();
    let err = encoder
        .encode_stream(Endless, ChecksumAlgorithm::Sha1)
        .unwrap_err();
    assert!(matches!(err, Error::InputTooLarge { .. }));
}

#[test]
fn records_carry_stable_algorithm_ids() {
    let documents = vec![
        SourceDocument::new(
            "/src/legacy.cs",
            b"class Legacy { }".to_vec(),
            Some(TextEncoding::Utf8),
            ChecksumAlgorithm::Sha1,
        ),
        SourceDocument::new(
            "/src/modern.cs",
            b"class Modern { }".to_vec(),
            Some(TextEncoding::Utf8),
            ChecksumAlgorithm::Sha256,
        ),
    ];

    let pipeline = EmbeddingPipeline::new();
    let outcome = pipeline
        .embed_documents(&documents, &EmbedSelectionSpec::all(), None, None)
        .unwrap();

    assert_eq!(
        outcome.records[0].checksum_algorithm_id(),
        ChecksumAlgorithm::Sha1.guid_bytes()
    );
    assert_eq!(
        outcome.records[1].checksum_algorithm_id(),
        ChecksumAlgorithm::Sha256.guid_bytes()
    );
    assert_ne!(
        outcome.records[0].checksum_algorithm_id(),
        outcome.records[1].checksum_algorithm_id()
    );
}

#[test]
fn parallel_phase_is_deterministic_and_correct() {
    let documents: Vec<SourceDocument> = (0..200)
        .map(|i| {
            SourceDocument::new(
                format!("/src/file{i:03}.cs"),
                format!("// document {i}\n").repeat(i % 40 + 1).into_bytes(),
                Some(TextEncoding::Utf8),
                ChecksumAlgorithm::Sha256,
            )
        })
        .collect();

    let pipeline = EmbeddingPipeline::new();
    let first = pipeline
        .embed_documents(&documents, &EmbedSelectionSpec::all(), None, None)
        .unwrap();
    let second = pipeline
        .embed_documents(&documents, &EmbedSelectionSpec::all(), None, None)
        .unwrap();

    assert_eq!(first.records.len(), documents.len());
    for (index, record) in first.records.iter().enumerate() {
        assert_eq!(record.path(), documents[index].path);
        assert_eq!(decode_blob(record.blob().unwrap()), documents[index].content);
        assert_eq!(record.checksum(), second.records[index].checksum());
    }
}
