use bytes::{Buf, BufMut, BytesMut};

use crate::encoding::armor::{armor, armored_len, unarmor, EncodedBuffer};
use crate::encoding::encoding_error::DecodeError;
use crate::encoding::worker_tag::WorkerTag;

/// Announces how many records a worker is about to send, so the receiving side knows how many
///  to wait for.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct MetadataRecord {
    pub worker: WorkerTag,
    pub message_count: i32,
}

/// ```ascii
/// 0: worker tag (u8)
/// 1: message count (i32 LE)
/// ```
pub const METADATA_RAW_LEN: usize = 1 + size_of::<i32>();

pub const METADATA_ENCODED_LEN: usize = armored_len(METADATA_RAW_LEN);

/// Every (tag, count) combination is representable, so this can not fail
pub fn encode_metadata(worker: WorkerTag, message_count: i32) -> EncodedBuffer {
    let mut buf = BytesMut::with_capacity(METADATA_RAW_LEN);
    buf.put_u8(worker.id());
    buf.put_i32_le(message_count);
    armor(&buf)
}

pub fn decode_metadata(armored: &[u8]) -> Result<MetadataRecord, DecodeError> {
    let raw = unarmor(armored, METADATA_RAW_LEN)?;
    let mut buf = raw.as_slice();

    let worker = WorkerTag::from_id(buf.get_u8())?;
    let message_count = buf.get_i32_le();

    Ok(MetadataRecord { worker, message_count })
}

#[cfg(test)]
mod test {
    use rstest::rstest;
    use super::*;

    #[rstest]
    #[case::zero(WorkerTag::Communications, 0)]
    #[case::typical(WorkerTag::Geolocation, 12)]
    #[case::negative(WorkerTag::DataMerge, -1)]
    #[case::min(WorkerTag::ClusterEstimation, i32::MIN)]
    #[case::max(WorkerTag::VideoInput, i32::MAX)]
    fn test_round_trip(#[case] worker: WorkerTag, #[case] message_count: i32) {
        let encoded = encode_metadata(worker, message_count);
        assert_eq!(encoded.len(), METADATA_ENCODED_LEN);
        assert_eq!(decode_metadata(encoded.as_bytes()).unwrap(), MetadataRecord { worker, message_count });
    }

    #[rstest]
    #[case::communications_one(WorkerTag::Communications, 1, "AgEAAAA=")]
    #[case::geolocation_minus_one(WorkerTag::Geolocation, -1, "Bv////8=")]
    fn test_wire_format(#[case] worker: WorkerTag, #[case] message_count: i32, #[case] expected: &str) {
        assert_eq!(encode_metadata(worker, message_count).as_str(), expected);
    }

    #[rstest]
    #[case::zero(0)]
    #[case::eight(8)]
    #[case::max(255)]
    fn test_decode_invalid_tag(#[case] tag: u8) {
        let armored = armor(&[tag, 1, 0, 0, 0]);
        assert_eq!(decode_metadata(armored.as_bytes()), Err(DecodeError::InvalidTag(tag)));
    }

    #[rstest]
    #[case::tag_only(1)]
    #[case::one_short(4)]
    #[case::one_long(6)]
    #[case::position_sized(25)]
    fn test_decode_length_mismatch(#[case] raw_len: usize) {
        let armored = armor(&vec![2u8; raw_len]);
        assert_eq!(
            decode_metadata(armored.as_bytes()),
            Err(DecodeError::LengthMismatch { expected: METADATA_RAW_LEN, actual: raw_len }),
        );
    }

    #[rstest]
    #[case::illegal_character(b"AgEA$AA=")]
    #[case::bad_padding(b"AgEAAAA")]
    fn test_decode_malformed(#[case] armored: &[u8]) {
        assert!(matches!(decode_metadata(armored), Err(DecodeError::Malformed(_))));
    }

    #[test]
    fn test_decode_status_text_with_terminator() {
        assert_eq!(
            decode_metadata(b"AgEAAAA=\0").unwrap(),
            MetadataRecord { worker: WorkerTag::Communications, message_count: 1 },
        );
    }
}
