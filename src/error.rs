use core::alloc::Layout;

/// Errors reported by the fallible [`LongMap`](crate::LongMap) operations.
///
/// Lookups never fail; a missing key is `None`. These errors only come from
/// growing the slot array or from rejected construction parameters. When an
/// operation returns one of them the map is left exactly as it was before the
/// call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The next capacity does not fit in `usize`, in `i64`, or in a valid
    /// allocation layout.
    #[error("capacity overflow while growing the slot array")]
    CapacityOverflow,

    /// The allocator returned an error for the new slot array.
    #[error("memory allocation of {} bytes failed", .layout.size())]
    AllocError {
        /// The layout of the allocation request that failed.
        layout: Layout,
    },

    /// A [`Config`](crate::Config) parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
