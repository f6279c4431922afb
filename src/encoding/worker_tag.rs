use std::fmt::{Display, Formatter};

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::encoding::encoding_error::InvalidTagError;

/// Identifies the worker (i.e. the logical subsystem of the airside pipeline) that produced a
///  record. The tag is sent as the first byte of every encoded record so the ground side can
///  attribute it.
///
/// The set of tags is closed: ids outside of 1..=7 are rejected when decoding rather than mapped
///  to some fallback.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, TryFromPrimitive, IntoPrimitive)]
pub enum WorkerTag {
    ClusterEstimation = 1,
    Communications = 2,
    DataMerge = 3,
    DetectTarget = 4,
    FlightInterface = 5,
    Geolocation = 6,
    VideoInput = 7,
}

impl WorkerTag {
    pub const ALL: [WorkerTag; 7] = [
        WorkerTag::ClusterEstimation,
        WorkerTag::Communications,
        WorkerTag::DataMerge,
        WorkerTag::DetectTarget,
        WorkerTag::FlightInterface,
        WorkerTag::Geolocation,
        WorkerTag::VideoInput,
    ];

    pub fn from_id(id: u8) -> Result<WorkerTag, InvalidTagError> {
        WorkerTag::try_from_primitive(id)
            .map_err(|e| InvalidTagError(e.number))
    }

    pub fn id(self) -> u8 {
        self.into()
    }

    pub fn name(self) -> &'static str {
        match self {
            WorkerTag::ClusterEstimation => "cluster_estimation_worker",
            WorkerTag::Communications => "communications_worker",
            WorkerTag::DataMerge => "data_merge_worker",
            WorkerTag::DetectTarget => "detect_target_worker",
            WorkerTag::FlightInterface => "flight_interface_worker",
            WorkerTag::Geolocation => "geolocation_worker",
            WorkerTag::VideoInput => "video_input_worker",
        }
    }
}

impl Display for WorkerTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
