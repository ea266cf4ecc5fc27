//! IO modules - operator console and replication output
//!
//! - `menu` - Interactive text menu over any reader/writer pair
//! - `report` - Plain-text status, report, statistics and history views
//! - `replication` - Occupancy snapshots to file (JSONL format)

pub mod menu;
pub mod replication;
pub mod report;

pub use menu::Menu;
pub use replication::DataReplicator;
