/// Read-only snapshot of a container, as last reported by the store.
///
/// `bytes` and `count` come from the listing that produced the snapshot and
/// may be stale relative to the live store; nothing mutates them locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub name: String,
    pub bytes: u64,
    pub count: u64,
}

/// Immutable snapshot of a single object inside a container.
///
/// `name` is container-relative (no leading container segment).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerObject {
    pub name: String,
    pub bytes: u64,
}
