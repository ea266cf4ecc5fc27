//! Occupancy replication - writes occupancy snapshots to file
//!
//! Each change is written as one JSON object per line (JSONL) to the file
//! specified in config, so a downstream reader can rebuild the occupied list.

use crate::domain::types::SlotId;
use crate::infra::clock::Clock;
use crate::services::observers::{OccupiedSlot, ParkingObserver};
use anyhow::Context;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Serialize)]
struct ReplicatedSlot<'a> {
    slot: SlotId,
    plate: &'a str,
    owner: &'a str,
    entry: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize)]
struct OccupancySnapshot<'a> {
    id: String,
    ts: NaiveDateTime,
    occupied: Vec<ReplicatedSlot<'a>>,
}

/// Observer that appends every occupancy snapshot to a JSONL file
pub struct DataReplicator {
    file_path: String,
    clock: Arc<dyn Clock>,
    written: u64,
}

impl DataReplicator {
    pub fn new(file_path: &str, clock: Arc<dyn Clock>) -> Self {
        info!(file_path = %file_path, "replicator_initialized");
        Self { file_path: file_path.to_string(), clock, written: 0 }
    }

    /// Snapshots written since creation
    pub fn written(&self) -> u64 {
        self.written
    }

    fn append_line(&self, line: &str) -> std::io::Result<()> {
        let path = Path::new(&self.file_path);

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;

        writeln!(file, "{}", line)?;
        debug!(file = %self.file_path, bytes = %line.len(), "replication_written");

        Ok(())
    }
}

impl ParkingObserver for DataReplicator {
    fn name(&self) -> &str {
        "data_replicator"
    }

    fn on_occupancy_change(&mut self, occupied: &[OccupiedSlot<'_>]) -> anyhow::Result<()> {
        let snapshot = OccupancySnapshot {
            id: crate::domain::history::new_uuid_v7(),
            ts: self.clock.now(),
            occupied: occupied
                .iter()
                .map(|o| ReplicatedSlot {
                    slot: o.slot,
                    plate: o.vehicle.plate().as_str(),
                    owner: o.vehicle.owner(),
                    entry: o.vehicle.entry_time(),
                })
                .collect(),
        };
        let line = serde_json::to_string(&snapshot).context("Failed to encode snapshot")?;

        self.append_line(&line)
            .with_context(|| format!("Failed to append to {}", self.file_path))?;
        self.written += 1;
        info!(occupied = %occupied.len(), snapshot_id = %snapshot.id, "occupancy_replicated");
        Ok(())
    }
}
