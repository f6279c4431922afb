use bytes::{Buf, BufMut, BytesMut};

use crate::encoding::armor::{armor, armored_len, unarmor, EncodedBuffer};
use crate::encoding::encoding_error::{DecodeError, EncodeError};
use crate::encoding::worker_tag::WorkerTag;

/// A position in global (WGS 84) coordinates, altitude in meters.
///
/// Range validation is the business of whoever creates the position; the codec only insists on
///  finite values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalPosition {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl GlobalPosition {
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> GlobalPosition {
        GlobalPosition { latitude, longitude, altitude }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionRecord {
    pub worker: WorkerTag,
    pub position: GlobalPosition,
}

/// ```ascii
///  0: worker tag (u8)
///  1: latitude (f64 LE)
///  9: longitude (f64 LE)
/// 17: altitude (f64 LE)
/// ```
pub const POSITION_RAW_LEN: usize = 1 + 3 * size_of::<f64>();

/// Number of bytes a receiver must collect for one position record
pub const POSITION_ENCODED_LEN: usize = armored_len(POSITION_RAW_LEN);

pub fn encode_position(worker: WorkerTag, position: GlobalPosition) -> Result<EncodedBuffer, EncodeError> {
    check_finite("latitude", position.latitude)?;
    check_finite("longitude", position.longitude)?;
    check_finite("altitude", position.altitude)?;

    let mut buf = BytesMut::with_capacity(POSITION_RAW_LEN);
    buf.put_u8(worker.id());
    buf.put_f64_le(position.latitude);
    buf.put_f64_le(position.longitude);
    buf.put_f64_le(position.altitude);

    Ok(armor(&buf))
}

pub fn decode_position(armored: &[u8]) -> Result<PositionRecord, DecodeError> {
    let raw = unarmor(armored, POSITION_RAW_LEN)?;
    let mut buf = raw.as_slice();

    let worker = WorkerTag::from_id(buf.get_u8())?;
    let latitude = buf.get_f64_le();
    let longitude = buf.get_f64_le();
    let altitude = buf.get_f64_le();

    Ok(PositionRecord {
        worker,
        position: GlobalPosition { latitude, longitude, altitude },
    })
}

fn check_finite(field: &'static str, value: f64) -> Result<(), EncodeError> {
    if value.is_finite() {
        Ok(())
    }
    else {
        Err(EncodeError::NonFiniteCoordinate { field, value })
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;
    use super::*;

    #[rstest]
    #[case::waterloo(WorkerTag::Geolocation, 43.4723, -80.5449, 336.0)]
    #[case::zeros(WorkerTag::ClusterEstimation, 0.0, 0.0, 0.0)]
    #[case::negative_zeros(WorkerTag::DataMerge, -0.0, -0.0, -0.0)]
    #[case::negative(WorkerTag::DetectTarget, -89.999999, -179.999999, -412.5)]
    #[case::subnormal(WorkerTag::FlightInterface, f64::MIN_POSITIVE / 2.0, -f64::from_bits(1), 5e-324)]
    #[case::extremes(WorkerTag::VideoInput, f64::MAX, f64::MIN, f64::EPSILON)]
    fn test_round_trip(#[case] worker: WorkerTag, #[case] latitude: f64, #[case] longitude: f64, #[case] altitude: f64) {
        let encoded = encode_position(worker, GlobalPosition::new(latitude, longitude, altitude)).unwrap();
        assert_eq!(encoded.len(), POSITION_ENCODED_LEN);

        let decoded = decode_position(encoded.as_bytes()).unwrap();
        assert_eq!(decoded.worker, worker);
        assert_eq!(decoded.position.latitude.to_bits(), latitude.to_bits());
        assert_eq!(decoded.position.longitude.to_bits(), longitude.to_bits());
        assert_eq!(decoded.position.altitude.to_bits(), altitude.to_bits());
    }

    #[test]
    fn test_round_trip_all_tags() {
        for worker in WorkerTag::ALL {
            let position = GlobalPosition::new(1.5, -2.25, 100.0);
            let encoded = encode_position(worker, position).unwrap();
            assert_eq!(decode_position(encoded.as_bytes()).unwrap(), PositionRecord { worker, position });
        }
    }

    #[test]
    fn test_layout() {
        let encoded = encode_position(WorkerTag::Communications, GlobalPosition::new(1.0, 2.0, -1.0)).unwrap();
        let raw = unarmor(encoded.as_bytes(), POSITION_RAW_LEN).unwrap();

        let mut expected = vec![2u8];
        expected.extend_from_slice(&1.0f64.to_le_bytes());
        expected.extend_from_slice(&2.0f64.to_le_bytes());
        expected.extend_from_slice(&(-1.0f64).to_le_bytes());
        assert_eq!(raw, expected);
    }

    #[rstest]
    #[case::nan_latitude(f64::NAN, 0.0, 0.0, "latitude")]
    #[case::inf_longitude(0.0, f64::INFINITY, 0.0, "longitude")]
    #[case::neg_inf_altitude(0.0, 0.0, f64::NEG_INFINITY, "altitude")]
    fn test_encode_non_finite(#[case] latitude: f64, #[case] longitude: f64, #[case] altitude: f64, #[case] expected_field: &str) {
        match encode_position(WorkerTag::Geolocation, GlobalPosition::new(latitude, longitude, altitude)) {
            Err(EncodeError::NonFiniteCoordinate { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("expected non-finite error, got {:?}", other),
        }
    }

    #[rstest]
    #[case::zero(0)]
    #[case::eight(8)]
    #[case::max(255)]
    fn test_decode_invalid_tag(#[case] tag: u8) {
        let mut raw = vec![tag];
        raw.extend_from_slice(&[0u8; 24]);
        let armored = armor(&raw);

        assert_eq!(decode_position(armored.as_bytes()), Err(DecodeError::InvalidTag(tag)));
    }

    #[rstest]
    #[case::metadata_sized(5)]
    #[case::one_short(24)]
    #[case::one_long(26)]
    #[case::empty(0)]
    fn test_decode_length_mismatch(#[case] raw_len: usize) {
        let armored = armor(&vec![1u8; raw_len]);
        assert_eq!(
            decode_position(armored.as_bytes()),
            Err(DecodeError::LengthMismatch { expected: POSITION_RAW_LEN, actual: raw_len }),
        );
    }

    #[test]
    fn test_decode_malformed() {
        let mut armored = encode_position(WorkerTag::Geolocation, GlobalPosition::new(1.0, 2.0, 3.0))
            .unwrap()
            .as_bytes()
            .to_vec();
        armored[3] = b'!';

        assert!(matches!(decode_position(&armored), Err(DecodeError::Malformed(_))));
    }

    #[test]
    fn test_decode_nul_padded_status_text() {
        let encoded = encode_position(WorkerTag::Geolocation, GlobalPosition::new(43.0, -80.0, 300.0)).unwrap();
        let mut status_text = [0u8; 50];
        status_text[..encoded.len()].copy_from_slice(encoded.as_bytes());

        let decoded = decode_position(&status_text).unwrap();
        assert_eq!(decoded.position, GlobalPosition::new(43.0, -80.0, 300.0));
    }
}
