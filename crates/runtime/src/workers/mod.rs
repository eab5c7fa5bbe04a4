//! Background workers orchestrated by the runtime.
//!
//! Workers are internal to the crate; external callers interact with them via
//! [`crate::api::RuntimeHandle`].

mod encounter;

pub(crate) use encounter::{Command, EncounterWorker};
