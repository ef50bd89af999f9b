use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid HTTP method '{value}'. Use GET, POST, PUT, PATCH, DELETE, or HEAD.")]
    InvalidMethod { value: String },
    #[error("Repeat count must be >= 1.")]
    RepeatCountZero,
    #[error("Invalid repeat count '{value}': {source}")]
    InvalidRepeatCount {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Invalid delay '{value}': {source}")]
    InvalidDelay {
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },
    #[error("Delay must be >= 0.")]
    DelayNegative,
    #[error("Slot {slot} is already sending.")]
    SlotBusy { slot: usize },
    #[error("Unknown slot {slot}.")]
    UnknownSlot { slot: usize },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
