//! Backend implementations without real device I/O.
//!
//! [`StubBackend`] is the backend the platform ships with. [`RecordingBackend`]
//! is a test double that records calls and can be scripted from its handle.

pub mod recording;
pub mod stub;

// Re-export commonly used types
pub use recording::{RecordedWrite, RecordingBackend, RecordingBackendHandle};
pub use stub::StubBackend;
