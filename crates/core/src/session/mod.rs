pub mod detection_session;
pub mod detector_cell;
pub mod frame_source_registry;
pub mod initializer;
pub mod session_clock;
