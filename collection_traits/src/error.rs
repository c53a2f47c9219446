use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    #[error("index {} is out of range for length {}", .index, .len)]
    IndexOutOfRange { index: usize, len: usize },
    /// A cursor was advanced past its last element.
    #[error("no more elements")]
    NoSuchElement,
    /// A strict accessor was called on a container with no elements.
    #[error("container is empty")]
    EmptyContainer,
    #[error("cursor has no current element; move the cursor first")]
    InvalidCursorState,
    #[error(
        "container was structurally modified while a cursor was live (cursor saw modification {}, container is at {})",
        .expected,
        .found
    )]
    ConcurrentStructuralChange { expected: u64, found: u64 },
    #[error("`{}` is not supported on an immutable container", .operation)]
    UnsupportedOperation { operation: &'static str },
}

impl CollectionError {
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    pub fn unsupported(operation: &'static str) -> Self {
        Self::UnsupportedOperation { operation }
    }
}

pub type Result<T, E = CollectionError> = std::result::Result<T, E>;
