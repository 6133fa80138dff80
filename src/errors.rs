use thiserror::Error;

/// Information you get from a collector when its sink fails before the producer was drained.
///
/// Collectors stop pulling items at the first failure; nothing is retried. `written` counts the units that
/// reached the sink before the failure: bytes for the joining collectors, items for channel senders.
///
/// `E` is the error type of the sink.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("the sink failed after {written} units were written")]
pub struct SinkError<E> {
    /// How many units were written successfully.
    pub written: u64,
    /// Why did the sink stop accepting units?
    #[source]
    pub reason: E,
}

impl<E> SinkError<E> {
    /// Consumes `self` and returns `self.reason`, effectively discarding `self.written`.
    pub fn into_reason(self) -> E {
        self.reason
    }
}
