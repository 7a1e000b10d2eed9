// Page size used when expanding a container node in the tree view.
// A listing that comes back exactly this long is treated as truncated.
pub const PAGE_LIMIT: usize = 100;

// Well-known container header keys (Swift naming convention).
pub const OBJECT_COUNT_HEADER: &str = "x-container-object-count";
pub const BYTES_USED_HEADER: &str = "x-container-bytes-used";
