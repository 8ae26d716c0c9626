//! Port traits defining external boundaries.
//!
//! The reader core takes its inputs as parsed documents; everything that
//! reaches the disk goes through these traits. Implementations live in
//! `src/adapters/`.

pub mod filesystem;

pub use filesystem::FileSystem;
