pub mod image_frame_source;
