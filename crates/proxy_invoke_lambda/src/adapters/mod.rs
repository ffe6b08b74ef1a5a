pub mod context;
pub mod stream_handler;
