use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("phone number too long: {len} characters (max {max})")]
    NumberTooLong { len: usize, max: usize },
}
