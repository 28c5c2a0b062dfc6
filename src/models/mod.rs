pub mod prompt;
pub mod theme;

pub use prompt::{PromptFields, PromptRecord, PLACEHOLDER_IMAGE};
pub use theme::Theme;
