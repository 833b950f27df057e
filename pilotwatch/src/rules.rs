//! Rule-based filtering of vessel diffs.
//!
//! Not every field-level difference is worth a notification: movements far in
//! the future churn constantly and some entry points are outside the area of
//! interest. [`RuleFilter`] applies the suppression rules in a fixed order and
//! keeps only the diffs an operator should hear about.

use std::collections::HashSet;

use chrono::{Duration, NaiveDateTime};
use tracing::debug;

use pilotwatch_config::shared::RulesConfig;

use crate::bail;
use crate::error::{ErrorKind, PilotResult};
use crate::snapshot::Snapshot;
use crate::types::{OrderField, VesselChange, VesselDiff, VesselType};

/// Compiled form of [`RulesConfig`], with field names resolved and windows
/// converted to durations.
#[derive(Debug, Clone)]
pub struct RuleFilter {
    relevant_fields: HashSet<OrderField>,
    inbound_lookahead: Duration,
    outbound_lookahead: Duration,
    default_lookahead: Option<Duration>,
    excluded_entry_points: Vec<String>,
}

impl RuleFilter {
    /// Compiles the rule configuration, rejecting unknown field names.
    pub fn from_config(config: &RulesConfig) -> PilotResult<Self> {
        let mut relevant_fields = HashSet::new();
        for name in &config.relevant_fields {
            let Some(field) = OrderField::from_name(name) else {
                bail!(
                    ErrorKind::ConfigError,
                    "unknown relevant field in rule configuration",
                    format!("field name: {name}")
                );
            };
            relevant_fields.insert(field);
        }

        Ok(Self {
            relevant_fields,
            inbound_lookahead: Duration::hours(config.inbound_lookahead_hours),
            outbound_lookahead: Duration::hours(config.outbound_lookahead_hours),
            default_lookahead: config.default_lookahead_hours.map(Duration::hours),
            excluded_entry_points: config
                .excluded_entry_points
                .iter()
                .map(|entry| entry.to_lowercase())
                .collect(),
        })
    }

    /// Lookahead window for inbound movements.
    pub fn inbound_window(&self) -> Duration {
        self.inbound_lookahead
    }

    /// Lookahead window for outbound movements.
    pub fn outbound_window(&self) -> Duration {
        self.outbound_lookahead
    }

    /// Decides whether a diff should be reported.
    ///
    /// Guards run in a fixed order and short-circuit on the first suppression:
    /// a record without an order time is never reported; at least one changed
    /// field must be relevant; the movement must fall inside its type's
    /// lookahead window; the entry point must not be excluded. A timestamp
    /// that fails to parse leaves the window guard inert rather than
    /// suppressing the diff.
    pub fn is_reportable(
        &self,
        diff: &VesselDiff,
        baseline: &Snapshot,
        current: &Snapshot,
        now: NaiveDateTime,
    ) -> bool {
        let Some(record) = current.get(&diff.key) else {
            return false;
        };

        if !record.has_order_time() {
            debug!(vessel = %diff.key, "suppressing diff: record has no order time");
            return false;
        }

        if !diff
            .fields
            .iter()
            .any(|delta| self.relevant_fields.contains(&delta.field))
        {
            debug!(vessel = %diff.key, "suppressing diff: no relevant field changed");
            return false;
        }

        match record.vessel_type {
            VesselType::Inbound => {
                if diff.fields.len() == 1 && diff.contains(OrderField::EtaEtd) {
                    debug!(vessel = %diff.key, "suppressing inbound diff: only the eta changed");
                    return false;
                }

                let baseline_order_time = baseline
                    .get(&diff.key)
                    .and_then(|previous| previous.parsed_order_time());
                if let Some(order_time) = baseline_order_time
                    && order_time > now + self.inbound_lookahead
                {
                    debug!(vessel = %diff.key, "suppressing inbound diff: outside lookahead window");
                    return false;
                }
            }
            VesselType::Outbound => {
                if let Some(order_time) = record.parsed_order_time()
                    && order_time > now + self.outbound_lookahead
                {
                    debug!(vessel = %diff.key, "suppressing outbound diff: outside lookahead window");
                    return false;
                }
            }
            VesselType::Shifting | VesselType::Other(_) => {
                if let Some(lookahead) = self.default_lookahead
                    && let Some(order_time) = record.parsed_order_time()
                    && order_time > now + lookahead
                {
                    debug!(vessel = %diff.key, "suppressing diff: outside default lookahead window");
                    return false;
                }
            }
        }

        let entry_point = record.entry_point.to_lowercase();
        if self
            .excluded_entry_points
            .iter()
            .any(|excluded| entry_point.contains(excluded))
        {
            debug!(vessel = %diff.key, entry_point = %record.entry_point, "suppressing diff: excluded entry point");
            return false;
        }

        true
    }
}

/// Diffs the two snapshots and keeps the changes that pass the rule filter,
/// enriched with the current record for reporting.
pub fn reportable_changes(
    filter: &RuleFilter,
    baseline: &Snapshot,
    current: &Snapshot,
    now: NaiveDateTime,
) -> Vec<VesselChange> {
    crate::diff::diff_snapshots(baseline, current)
        .into_iter()
        .filter(|diff| filter.is_reportable(diff, baseline, current, now))
        .filter_map(|diff| {
            current.get(&diff.key).map(|record| VesselChange {
                key: diff.key,
                vessel_type: record.vessel_type.clone(),
                fields: diff.fields,
                current: record.clone(),
            })
        })
        .collect()
}
