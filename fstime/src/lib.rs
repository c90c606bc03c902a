//! # fstime
//!
//! Measures what it costs to read file modification and access times
//! through different host mechanisms, and checks that the mechanisms agree
//! with each other.
//!
//! ```ascii
//!   bench ──▶ traversal ──▶ listing (one directory level at a time)
//!     │            └──────▶ query   (independent re-query, optional)
//!     └──────▶ query        (flat list of paths)
//! ```
//!
//! - `timestamp`: nanosecond `Timestamp` with its three sentinel values.
//! - `format`: strftime patterns extended with `%[N]`, and durations.
//! - `entry`: the `EntryTime` pair and the cross-check rule.
//! - `query` / `listing`: the host mechanisms, behind one trait each.
//! - `traversal`: the depth-first, cross-checking walk.
//! - `bench`: the timing harness.
pub mod bench;
pub mod entry;
pub mod error;
pub mod format;
pub mod listing;
pub mod query;
pub mod timestamp;
pub mod traversal;

pub use entry::EntryTime;
pub use error::{Error, Result};
pub use timestamp::Timestamp;
