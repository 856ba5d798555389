pub mod config;
pub mod inspector;

pub use config::{DebugConfig, ScreenshotFormat};
pub use inspector::{CaptureError, CaptureReport, PageInspector, PageSnapshot};
