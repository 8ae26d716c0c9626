//! Adapters implementing the port traits.
//!
//! `live` talks to the real disk, `memory` keeps files in a map, `recording`
//! wraps another adapter and captures every call to a cassette, `replaying`
//! serves calls back from one.

pub mod live;
pub mod memory;
pub mod recording;
pub mod replaying;
