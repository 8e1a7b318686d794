//! Semantic region editing for GAN-generated images.
//!
//! A client selects a region of a generated image and asks for a
//! semantic feature (a building, grass, ...) to be removed from it. This
//! crate turns that selection into work for a remote generation service:
//! the mask becomes a base64 PNG, the feature's per-unit relevance
//! rankings pick the units to ablate, the quantile level table supplies
//! the ablation values, and the regenerated image comes back as a data
//! URI that is decoded and saved as a JPEG.
//!
//! The remote service is reached through the [`remote::GanServer`] trait,
//! so everything up to the HTTP layer runs against an in-memory stand-in
//! in tests.

pub mod catalog;
pub mod editor;
pub mod error;
pub mod intervention;
pub mod mask;
pub mod ranking;
pub mod remote;

pub use editor::{Editor, EditorConfig};
pub use error::{EditError, Result};
pub use mask::SelectionMask;
