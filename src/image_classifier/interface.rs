use crate::report::ClassificationReport;
use crate::upload::UploadCandidate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifyError {
    /// Transport-level failure, no response obtained.
    #[error("{message}")]
    Network { message: String },
    /// The service answered with an error, or with a non-success status.
    #[error("{message}")]
    Service { message: String },
    /// Success status, but the body does not validate as a report.
    #[error("malformed classifier response: {reason}")]
    MalformedResponse { reason: String },
}

pub trait ImageClassifier: Send + Sync {
    fn classify(&self, candidate: &UploadCandidate)
        -> Result<ClassificationReport, ClassifyError>;
}
