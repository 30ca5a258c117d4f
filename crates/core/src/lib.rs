//! Ready-gated face detection over a pluggable detector provider.
//!
//! A provider is acquired once per process session (model download, runtime
//! construction) behind an explicit readiness lifecycle; afterwards
//! [`session::detection_session::DetectionSession::detect_faces`] answers per-frame queries
//! without ever panicking or returning an error.

pub mod detection;
pub mod session;
pub mod shared;
pub mod source;
