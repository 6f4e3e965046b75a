// src/progress.rs
use std::path::PathBuf;

use crate::error::Error;

/// Progress reporting for a run over several pages.
/// The CLI implements this to print status lines.
pub trait Progress {
    /// Called at the start with the number of pages.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One page produced its decks and summary.
    fn item_done(&mut self, _url: &str, _files: &[PathBuf]) {}

    /// One page was abandoned; the run goes on.
    fn item_failed(&mut self, _url: &str, _err: &Error) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
