pub mod catalog;
pub mod classify;
pub mod locale;
pub mod models;

pub use catalog::{respond, TriageEngine};
pub use classify::classify;
pub use locale::{ui_strings, UiStrings};
pub use models::*;
