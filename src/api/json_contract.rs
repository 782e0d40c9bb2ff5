use serde::{Deserialize, Serialize};

use crate::core::Block;
use crate::error::{TimeblockError, TimeblockResult};

use super::SchedulerSnapshot;

pub const SCHEDULER_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: SchedulerSnapshot,
}

impl SchedulerSnapshot {
    pub fn to_json_pretty(&self) -> TimeblockResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            TimeblockError::InvalidData(format!("failed to serialize snapshot json: {e}"))
        })
    }

    pub fn to_json_contract_v1_pretty(&self) -> TimeblockResult<String> {
        let payload = SchedulerSnapshotJsonContractV1 {
            schema_version: SCHEDULER_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            TimeblockError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> TimeblockResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<SchedulerSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: SchedulerSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            TimeblockError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != SCHEDULER_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(TimeblockError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

/// Serializes blocks in the host exchange shape
/// (`{id, trackId, start, end, title, desc, linkedType?, linkedId?}`).
pub fn blocks_to_json(blocks: &[Block]) -> TimeblockResult<String> {
    serde_json::to_string(blocks)
        .map_err(|e| TimeblockError::InvalidData(format!("failed to serialize blocks json: {e}")))
}

/// Parses blocks and checks `end > start` on each.
pub fn blocks_from_json(input: &str) -> TimeblockResult<Vec<Block>> {
    let blocks: Vec<Block> = serde_json::from_str(input)
        .map_err(|e| TimeblockError::InvalidData(format!("failed to parse blocks json: {e}")))?;
    for block in &blocks {
        block.validate_times()?;
    }
    Ok(blocks)
}
