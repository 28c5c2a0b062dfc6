//! A local prompt gallery.
//!
//! At startup a static seed catalog is merged with locally saved prompts
//! (local wins by title). Reads go through the pure functions in [`query`];
//! writes go through [`Gallery`], which validates input and rewrites the saved
//! collection after every change.

pub mod config;
pub mod error;
pub mod gallery;
pub mod merge;
pub mod models;
pub mod query;
pub mod seed;
pub mod storage;
pub mod store;

pub use config::GalleryConfig;
pub use error::{GalleryError, Result};
pub use gallery::Gallery;
pub use models::{PromptFields, PromptRecord, Theme};
