//! Progress events for the host application's notification layer.

/// Stages of the creation flow, in the order they occur. The host maps these
/// to whatever user feedback it renders (toasts in the reference app).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    UploadingImage,
    ImageUploaded,
    BuildingTransaction,
    AwaitingSignature,
    Submitting,
    Confirmed,
}

impl Progress {
    pub fn as_str(&self) -> &'static str {
        match self {
            Progress::UploadingImage => "uploading_image",
            Progress::ImageUploaded => "image_uploaded",
            Progress::BuildingTransaction => "building_transaction",
            Progress::AwaitingSignature => "awaiting_signature",
            Progress::Submitting => "submitting",
            Progress::Confirmed => "confirmed",
        }
    }
}

/// Stateless callback the flow notifies as it advances.
pub trait ProgressSink {
    fn progress(&self, stage: Progress);
}

/// Sink that drops every event.
pub struct NullSink;

impl ProgressSink for NullSink {
    fn progress(&self, _stage: Progress) {}
}
