//! Fixed-layout binary records for telemetry, armored for text-only channels.
//!
//! There is no version byte or length prefix: both ends are built against the same layouts, and
//!  the record kind (and therefore the length) is agreed upon out of band.

pub mod armor;
pub mod encoding_error;
pub mod metadata_record;
pub mod position_record;
pub mod worker_tag;

pub use armor::EncodedBuffer;
pub use encoding_error::{DecodeError, EncodeError, InvalidTagError};
pub use metadata_record::{decode_metadata, encode_metadata, MetadataRecord, METADATA_ENCODED_LEN};
pub use position_record::{decode_position, encode_position, GlobalPosition, PositionRecord, POSITION_ENCODED_LEN};
pub use worker_tag::WorkerTag;
