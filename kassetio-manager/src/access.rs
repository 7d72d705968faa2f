//! Access-mode discriminators passed with every manager query.
//!
//! The mode tells the backend what the host intends to do with the result,
//! which can change the answer entirely (e.g. a `ManagerDriven` resolve
//! yields a write destination, a `Read` resolve yields existing content).

/// Intent of a management-policy query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyAccess {
    Read,
    Write,
}

/// Intent of a resolve query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveAccess {
    /// Existing entity data.
    Read,
    /// Data the manager wants the host to use for an in-flight publish
    /// (e.g. a staging path chosen by the backend).
    ManagerDriven,
}

/// Intent of a preflight/register call. Publishing is always a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishAccess {
    Write,
}

/// Intent of a relationship query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationsAccess {
    Read,
    /// The host wants references it can publish to.
    Write,
}

/// Intent of an entity-traits query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityTraitsAccess {
    Read,
}
