pub mod app;
pub mod detail;
pub mod timeline;
