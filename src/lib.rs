//! Headless canvas edits: extend an image downward or black out its
//! bottom-right corner. Codecs are delegated to the `image` crate.

pub mod canvas;
pub mod cli;
pub mod error;
pub mod io;
pub mod logger;
pub mod ops;

pub use canvas::{Anchor, Region};
pub use error::{Error, Result};
