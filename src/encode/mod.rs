//! Export: PNG encoding and the sinks finished frames are written to.

pub(crate) mod png;
pub(crate) mod sink;
