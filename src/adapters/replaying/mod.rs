//! Replaying adapters that serve recorded interactions.

pub mod filesystem;

pub use filesystem::ReplayingFileSystem;
