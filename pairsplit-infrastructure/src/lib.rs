#![warn(clippy::uninlined_format_args)]

pub mod snapshot_file;
pub mod store;

pub use snapshot_file::{SnapshotLoadError, load_snapshot, parse_snapshot};
pub use store::InMemoryPairStore;
