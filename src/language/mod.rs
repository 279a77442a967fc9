// Types representing normalized programs and the patterns they are matched
// against

mod error;
mod pattern;
mod types;

// Re-export all public symbols
pub use error::*;
pub use pattern::*;
pub use types::*;
