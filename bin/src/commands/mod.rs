//! CLI command implementations.

pub(crate) mod convert;
pub(crate) mod dedup;
pub(crate) mod indicator;
pub(crate) mod partition;
pub(crate) mod stats;
