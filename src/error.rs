use std::collections::TryReserveError;
use std::error;
use std::fmt;
use std::result;

/// Errors surfaced by the collections in this crate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A keyed lookup that requires the key to be present did not find it.
    KeyNotFound,
    /// Memory for a new node could not be reserved. The collection is left unchanged.
    AllocationFailure(TryReserveError),
}

impl From<TryReserveError> for Error {
    fn from(err: TryReserveError) -> Error {
        Error::AllocationFailure(err)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::KeyNotFound => None,
            Error::AllocationFailure(error) => Some(error),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::KeyNotFound => write!(f, "key is not found in the map"),
            Error::AllocationFailure(error) => write!(f, "failed to allocate a node: {}", error),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::Error;
    use std::error::Error as StdError;

    #[test]
    fn test_display_key_not_found() {
        assert_eq!(Error::KeyNotFound.to_string(), "key is not found in the map");
        assert!(Error::KeyNotFound.source().is_none());
    }

    #[test]
    fn test_allocation_failure_source() {
        let err = Vec::<u64>::new().try_reserve(usize::max_value()).unwrap_err();
        let err = Error::from(err);
        assert!(err.to_string().starts_with("failed to allocate a node"));
        assert!(err.source().is_some());
    }
}
