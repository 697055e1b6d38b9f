pub mod capture_engine;
pub mod file_picker;
pub mod modal_filter;
pub mod movie_writer;
pub mod session_delegate;
pub mod window_toolkit;
