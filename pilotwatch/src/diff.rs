//! Field-level comparison between two normalized snapshots.

use crate::snapshot::Snapshot;
use crate::types::{FieldDelta, OrderField, VesselDiff};

/// Compares the current snapshot against the baseline and returns one diff per
/// vessel with at least one changed field.
///
/// Only vessels present in both snapshots are compared: newly appeared vessels
/// have no baseline to diff against and vessels that disappeared are not
/// reported. Diffs are returned in the current snapshot's insertion order,
/// fields within a diff in [`OrderField::ALL`] order.
pub fn diff_snapshots(baseline: &Snapshot, current: &Snapshot) -> Vec<VesselDiff> {
    let mut diffs = Vec::new();

    for (key, record) in current.iter() {
        let Some(previous) = baseline.get(key) else {
            continue;
        };

        let fields: Vec<FieldDelta> = OrderField::ALL
            .into_iter()
            .filter(|&field| previous.field(field) != record.field(field))
            .map(|field| FieldDelta {
                field,
                old: previous.field(field).to_string(),
                new: record.field(field).to_string(),
            })
            .collect();

        if !fields.is_empty() {
            diffs.push(VesselDiff {
                key: key.clone(),
                fields,
            });
        }
    }

    diffs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PilotOrder, VesselType};
    use chrono::NaiveDate;

    fn noon() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn order(name: &str, order_time: &str, pilot: &str) -> PilotOrder {
        PilotOrder {
            vessel_type: VesselType::Inbound,
            vessel_name: name.to_string(),
            order_time: order_time.to_string(),
            eta_etd: String::new(),
            rta: String::new(),
            pilot: pilot.to_string(),
            entry_point: String::new(),
        }
    }

    fn snapshot(records: Vec<PilotOrder>) -> Snapshot {
        Snapshot::normalize(records, noon())
    }

    #[test]
    fn identical_snapshots_produce_no_diffs() {
        let baseline = snapshot(vec![order("ALFA", "10/06/25 18:00", "Mertens")]);
        let current = snapshot(vec![order("ALFA", "10/06/25 18:00", "Mertens")]);

        assert!(diff_snapshots(&baseline, &current).is_empty());
    }

    #[test]
    fn changed_fields_are_listed_in_comparison_order() {
        let baseline = snapshot(vec![order("ALFA", "10/06/25 18:00", "")]);
        let current = snapshot(vec![order("ALFA", "10/06/25 20:00", "Mertens")]);

        let diffs = diff_snapshots(&baseline, &current);
        assert_eq!(diffs.len(), 1);

        let fields: Vec<OrderField> = diffs[0].fields.iter().map(|delta| delta.field).collect();
        assert_eq!(fields, vec![OrderField::OrderTime, OrderField::Pilot]);

        let pilot = diffs[0].get(OrderField::Pilot).unwrap();
        assert_eq!(pilot.old, "");
        assert_eq!(pilot.new, "Mertens");
    }

    #[test]
    fn newly_appeared_vessels_are_not_diffed() {
        let baseline = snapshot(vec![order("ALFA", "10/06/25 18:00", "")]);
        let current = snapshot(vec![
            order("ALFA", "10/06/25 18:00", ""),
            order("BRAVO", "10/06/25 19:00", ""),
        ]);

        assert!(diff_snapshots(&baseline, &current).is_empty());
    }

    #[test]
    fn disappeared_vessels_are_not_diffed() {
        let baseline = snapshot(vec![
            order("ALFA", "10/06/25 18:00", ""),
            order("BRAVO", "10/06/25 19:00", ""),
        ]);
        let current = snapshot(vec![order("ALFA", "10/06/25 18:00", "")]);

        assert!(diff_snapshots(&baseline, &current).is_empty());
    }

    #[test]
    fn empty_baseline_yields_no_diffs() {
        let current = snapshot(vec![order("ALFA", "10/06/25 18:00", "")]);
        assert!(diff_snapshots(&Snapshot::empty(), &current).is_empty());
    }
}
