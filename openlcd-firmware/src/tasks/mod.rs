//! Embassy tasks

mod display;

pub use display::{display_task, Lcd};
