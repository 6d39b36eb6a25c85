pub mod frame_loop;
pub mod host;
pub mod listener;
pub mod session;
