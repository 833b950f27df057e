//! Normalized snapshots of the pilot-order table.
//!
//! The source occasionally emits more than one row for the same vessel while a
//! movement transitions; [`Snapshot::normalize`] collapses those rows so that
//! every vessel appears at most once, which is a precondition for meaningful
//! diffing.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use crate::types::{PilotOrder, VesselKey};

/// A normalized snapshot: at most one record per vessel, in first-appearance
/// order of the raw record sequence.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    keys: Vec<VesselKey>,
    orders: HashMap<VesselKey, PilotOrder>,
}

impl Snapshot {
    /// Creates an empty snapshot.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Collapses a raw record sequence into a normalized snapshot.
    ///
    /// Records whose name yields an empty key are discarded. When several
    /// records share a key, the one with the earliest order time at or after
    /// `now` wins; if no record of the group has such an order time, the whole
    /// group is dropped for this cycle. Records with an unparseable order time
    /// are skipped from duplicate resolution with a warning but never abort
    /// the batch.
    pub fn normalize(records: Vec<PilotOrder>, now: NaiveDateTime) -> Self {
        let mut key_order: Vec<VesselKey> = Vec::new();
        let mut groups: HashMap<VesselKey, Vec<PilotOrder>> = HashMap::new();

        for record in records {
            let key = record.key();
            if key.is_empty() {
                debug!("discarding record without a vessel identity");
                continue;
            }

            let group = groups.entry(key.clone()).or_default();
            if group.is_empty() {
                key_order.push(key);
            }
            group.push(record);
        }

        let mut snapshot = Snapshot::empty();
        for key in key_order {
            let Some(group) = groups.remove(&key) else {
                continue;
            };

            let resolved = if group.len() == 1 {
                group.into_iter().next()
            } else {
                resolve_duplicates(&key, group, now)
            };

            if let Some(record) = resolved {
                snapshot.orders.insert(key.clone(), record);
                snapshot.keys.push(key);
            }
        }

        snapshot
    }

    /// Returns the record for the given vessel, if present.
    pub fn get(&self, key: &VesselKey) -> Option<&PilotOrder> {
        self.orders.get(key)
    }

    /// Returns whether the snapshot contains the given vessel.
    pub fn contains(&self, key: &VesselKey) -> bool {
        self.orders.contains_key(key)
    }

    /// Number of vessels in the snapshot.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns whether the snapshot holds no vessels.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterates vessels in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&VesselKey, &PilotOrder)> {
        self.keys
            .iter()
            .filter_map(|key| self.orders.get(key).map(|order| (key, order)))
    }

    /// Returns the records in insertion order.
    pub fn records(&self) -> Vec<PilotOrder> {
        self.iter().map(|(_, order)| order.clone()).collect()
    }
}

/// Picks the winning record among duplicate rows for one vessel.
fn resolve_duplicates(
    key: &VesselKey,
    group: Vec<PilotOrder>,
    now: NaiveDateTime,
) -> Option<PilotOrder> {
    let upcoming = group.into_iter().filter_map(|record| {
        match record.parsed_order_time() {
            Some(order_time) if order_time >= now => Some((order_time, record)),
            Some(_) => None,
            None => {
                if record.has_order_time() {
                    warn!(
                        vessel = %key,
                        order_time = %record.order_time,
                        "skipping duplicate row with unparseable order time"
                    );
                }
                None
            }
        }
    });

    let winner = upcoming.min_by_key(|(order_time, _)| *order_time);
    if winner.is_none() {
        debug!(vessel = %key, "dropping vessel: no duplicate row has an upcoming order time");
    }

    winner.map(|(_, record)| record)
}
