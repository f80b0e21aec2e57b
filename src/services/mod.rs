//! Business services for the directory API

mod directory;

pub use directory::{DirectoryError, DirectoryService};
