use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageBufferError {
    #[error("Size of buffer doesn't match to image dimensions")]
    InvalidBufferSize,
    #[error("Size of chroma plane doesn't match to subsample ratio")]
    InvalidChromaPlaneSize,
}

/// Panic captured inside one of the convolution workers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("worker #{worker} failed: {message}")]
pub struct WorkerFault {
    /// Index of the worker in its dispatch round.
    pub worker: usize,
    pub message: String,
}

impl WorkerFault {
    pub(crate) fn new(worker: usize, message: impl Into<String>) -> Self {
        Self {
            worker,
            message: message.into(),
        }
    }
}

/// Resizing was aborted because at least one worker has failed.
///
/// The text of the error is a comma-separated list of distinct
/// messages of all failed workers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", join_distinct_messages(.faults))]
pub struct ResizeError {
    faults: Vec<WorkerFault>,
}

impl ResizeError {
    pub(crate) fn new(faults: Vec<WorkerFault>) -> Self {
        debug_assert!(!faults.is_empty());
        Self { faults }
    }

    /// All captured faults in order of worker indexes.
    pub fn faults(&self) -> &[WorkerFault] {
        &self.faults
    }

    /// Distinct messages of failed workers.
    pub fn messages(&self) -> Vec<&str> {
        distinct_messages(&self.faults)
    }
}

fn distinct_messages(faults: &[WorkerFault]) -> Vec<&str> {
    let mut res: Vec<&str> = Vec::with_capacity(faults.len());
    for fault in faults {
        if !res.contains(&fault.message.as_str()) {
            res.push(&fault.message);
        }
    }
    res
}

fn join_distinct_messages(faults: &[WorkerFault]) -> String {
    distinct_messages(faults).join(", ")
}
