//! Watcher core: pure payload validation, status translation, and loop state.
mod item;
mod state;
mod translate;
mod validate;

pub use item::{ReviewStatus, TrackedItem};
pub use state::WatchState;
pub use translate::{translate, TranslateError};
pub use validate::{validate, ValidateError, ValidatedBatch};
