pub mod config;
pub mod error;
pub mod io;
pub mod normalize;
pub mod pipeline;
pub mod prune;
pub mod relocate;
pub mod scan;
pub mod strip;

pub use error::{Result, SvgflatError};
