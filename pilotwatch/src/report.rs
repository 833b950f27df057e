//! Rendering of change reports and snapshot overviews.
//!
//! Everything here is deterministic text assembly: grouping by category,
//! fixed field order, stable section headers. The notifier decides where the
//! text goes; this module only decides what it says.

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

use crate::snapshot::Snapshot;
use crate::types::{OrderField, PilotOrder, VesselCategory, VesselChange, VesselType};

/// Rendered changes of one reporting category.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CategoryReport {
    /// Lowercase category name.
    pub category: String,
    /// One rendered description per changed vessel.
    pub changes: Vec<String>,
}

/// Groups changes by reporting category, in fixed category order.
///
/// Categories without changes are omitted.
pub fn group_changes(changes: &[VesselChange]) -> Vec<CategoryReport> {
    VesselCategory::ALL
        .into_iter()
        .filter_map(|category| {
            let rendered: Vec<String> = changes
                .iter()
                .filter(|change| change.vessel_type.category() == category)
                .map(render_change)
                .collect();

            (!rendered.is_empty()).then(|| CategoryReport {
                category: category.name().to_string(),
                changes: rendered,
            })
        })
        .collect()
}

/// Renders one vessel change: the changed fields with old and new values,
/// followed by the full current record.
pub fn render_change(change: &VesselChange) -> String {
    let mut lines = vec![format!("Change for '{}':", change.key)];
    for delta in &change.fields {
        lines.push(format!(
            "   - {}: '{}' -> '{}'",
            delta.field.label(),
            delta.old,
            delta.new
        ));
    }
    lines.push(format!("   Current: {}", render_record(&change.current)));
    lines.join("\n")
}

/// Renders a full record as a single line, fields in fixed order.
pub fn render_record(record: &PilotOrder) -> String {
    OrderField::ALL
        .into_iter()
        .map(|field| format!("{} '{}'", field.label(), record.field(field)))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Renders the grouped report as plain text with one section per category.
pub fn render_report(reports: &[CategoryReport]) -> String {
    let mut sections = Vec::new();
    for report in reports {
        let mut section = format!("--- {} ---\n", report.category.to_uppercase());
        section.push_str(&report.changes.join("\n\n"));
        sections.push(section);
    }
    sections.join("\n\n")
}

/// Builds the notification subject for a set of reportable changes.
///
/// A single change names the vessel, its type tag, and the most specific
/// description available; several changes collapse into a count with the
/// first vessel's name.
pub fn notification_subject(changes: &[VesselChange]) -> String {
    match changes {
        [] => "LIS update".to_string(),
        [change] => {
            let tag = change.vessel_type.subject_tag();
            let pilot_assigned = change
                .fields
                .iter()
                .any(|delta| delta.field == OrderField::Pilot && delta.old.is_empty() && !delta.new.is_empty());

            let what = if pilot_assigned {
                "pilot assigned".to_string()
            } else if let [delta] = change.fields.as_slice() {
                format!("{} -> {}", delta.field.label(), delta.new)
            } else {
                "details changed".to_string()
            };

            format!("LIS update: {} {tag} {what}", change.key)
        }
        [first, ..] => {
            format!("LIS update: {} changes (first: {})", changes.len(), first.key)
        }
    }
}

/// One vessel line of a snapshot overview.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OverviewEntry {
    /// Canonical vessel name.
    pub vessel: String,
    /// Raw order time of the record.
    pub order_time: String,
}

/// Snapshot overview: upcoming movements partitioned by direction.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct Overview {
    /// Inbound movements with an order time within the inbound window around
    /// `now`, past and future.
    pub inbound: Vec<OverviewEntry>,
    /// Outbound movements with an order time between `now` and the end of the
    /// outbound window.
    pub outbound: Vec<OverviewEntry>,
}

/// Partitions an unfiltered snapshot into overview windows.
///
/// The same thresholds the rule filter uses for suppression act here as
/// inclusion windows: inbound within `inbound_window` on either side of `now`,
/// outbound from `now` up to `outbound_window` ahead. Records without a
/// parseable order time are skipped.
pub fn snapshot_overview(
    snapshot: &Snapshot,
    now: NaiveDateTime,
    inbound_window: Duration,
    outbound_window: Duration,
) -> Overview {
    let mut overview = Overview::default();

    for (key, record) in snapshot.iter() {
        let Some(order_time) = record.parsed_order_time() else {
            continue;
        };

        let entry = OverviewEntry {
            vessel: key.to_string(),
            order_time: record.order_time.clone(),
        };

        match record.vessel_type {
            VesselType::Inbound
                if now - inbound_window <= order_time && order_time <= now + inbound_window =>
            {
                overview.inbound.push(entry);
            }
            VesselType::Outbound if now <= order_time && order_time <= now + outbound_window => {
                overview.outbound.push(entry);
            }
            _ => {}
        }
    }

    overview
}

/// Renders the overview as plain text, one section per direction.
pub fn render_overview(
    overview: &Overview,
    inbound_window: Duration,
    outbound_window: Duration,
) -> String {
    let mut body = format!(
        "--- INBOUND (-{h}h to +{h}h) ---\n",
        h = inbound_window.num_hours()
    );
    body.push_str(&render_overview_section(&overview.inbound));

    body.push_str(&format!(
        "\n--- OUTBOUND (next {}h) ---\n",
        outbound_window.num_hours()
    ));
    body.push_str(&render_overview_section(&overview.outbound));

    body
}

fn render_overview_section(entries: &[OverviewEntry]) -> String {
    if entries.is_empty() {
        return "None.\n".to_string();
    }

    entries
        .iter()
        .map(|entry| format!("- {:<30} | Order time: {}\n", entry.vessel, entry.order_time))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FieldDelta, PilotOrder, VesselKey};
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn order(vessel_type: &str, name: &str, order_time: &str) -> PilotOrder {
        PilotOrder {
            vessel_type: VesselType::from_tag(vessel_type),
            vessel_name: name.to_string(),
            order_time: order_time.to_string(),
            eta_etd: String::new(),
            rta: String::new(),
            pilot: String::new(),
            entry_point: String::new(),
        }
    }

    fn change(vessel_type: &str, name: &str, fields: Vec<FieldDelta>) -> VesselChange {
        let current = order(vessel_type, name, "10/06/25 14:00");
        VesselChange {
            key: VesselKey::from_raw(name),
            vessel_type: current.vessel_type.clone(),
            fields,
            current,
        }
    }

    fn delta(field: OrderField, old: &str, new: &str) -> FieldDelta {
        FieldDelta {
            field,
            old: old.to_string(),
            new: new.to_string(),
        }
    }

    #[test]
    fn changes_group_by_category_in_fixed_order() {
        let changes = vec![
            change("V", "CHARLIE", vec![delta(OrderField::Pilot, "", "Claes")]),
            change("I", "ALFA", vec![delta(OrderField::Pilot, "", "Mertens")]),
            change("I", "BRAVO", vec![delta(OrderField::Pilot, "", "Peeters")]),
        ];

        let reports = group_changes(&changes);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].category, "inbound");
        assert_eq!(reports[0].changes.len(), 2);
        assert_eq!(reports[1].category, "shifting");
    }

    #[test]
    fn rendered_change_lists_deltas_and_current_record() {
        let change = change(
            "I",
            "ALFA (d)",
            vec![delta(OrderField::OrderTime, "10/06/25 12:00", "10/06/25 14:00")],
        );

        let text = render_change(&change);
        assert!(text.starts_with("Change for 'ALFA':\n"));
        assert!(text.contains("   - Order time: '10/06/25 12:00' -> '10/06/25 14:00'"));
        assert!(text.contains("Current: Type 'I' | Order time '10/06/25 14:00'"));
    }

    #[test]
    fn report_sections_carry_category_headers() {
        let changes = vec![change("U", "ALFA", vec![delta(OrderField::Pilot, "", "Mertens")])];
        let text = render_report(&group_changes(&changes));
        assert!(text.starts_with("--- OUTBOUND ---\n"));
    }

    #[test]
    fn subject_for_pilot_assignment() {
        let changes = vec![change("I", "ALFA", vec![delta(OrderField::Pilot, "", "Mertens")])];
        assert_eq!(
            notification_subject(&changes),
            "LIS update: ALFA [IN] pilot assigned"
        );
    }

    #[test]
    fn subject_for_single_field_change() {
        let changes = vec![change(
            "U",
            "ALFA",
            vec![delta(OrderField::OrderTime, "10/06/25 12:00", "10/06/25 14:00")],
        )];
        assert_eq!(
            notification_subject(&changes),
            "LIS update: ALFA [UIT] Order time -> 10/06/25 14:00"
        );
    }

    #[test]
    fn subject_for_multi_field_change() {
        let changes = vec![change(
            "V",
            "ALFA",
            vec![
                delta(OrderField::OrderTime, "10/06/25 12:00", "10/06/25 14:00"),
                delta(OrderField::EtaEtd, "", "10/06/25 16:00"),
            ],
        )];
        assert_eq!(
            notification_subject(&changes),
            "LIS update: ALFA [SHIFT] details changed"
        );
    }

    #[test]
    fn subject_for_multiple_changes_counts_them() {
        let changes = vec![
            change("I", "ALFA", vec![delta(OrderField::Pilot, "", "Mertens")]),
            change("U", "BRAVO", vec![delta(OrderField::Pilot, "", "Claes")]),
        ];
        assert_eq!(
            notification_subject(&changes),
            "LIS update: 2 changes (first: ALFA)"
        );
    }

    #[test]
    fn overview_partitions_by_direction_and_window() {
        let snapshot = Snapshot::normalize(
            vec![
                order("I", "RECENT IN", "10/06/25 06:00"),
                order("I", "FAR IN", "11/06/25 06:00"),
                order("U", "SOON OUT", "10/06/25 20:00"),
                order("U", "PAST OUT", "10/06/25 10:00"),
                order("V", "SHIFTER", "10/06/25 13:00"),
                order("I", "NO TIME", ""),
            ],
            noon(),
        );

        let overview =
            snapshot_overview(&snapshot, noon(), Duration::hours(8), Duration::hours(16));

        let inbound: Vec<&str> = overview.inbound.iter().map(|e| e.vessel.as_str()).collect();
        let outbound: Vec<&str> = overview.outbound.iter().map(|e| e.vessel.as_str()).collect();
        assert_eq!(inbound, vec!["RECENT IN"]);
        assert_eq!(outbound, vec!["SOON OUT"]);
    }

    #[test]
    fn overview_windows_include_their_edges() {
        // With `noon` at 12:00 the inbound window is [04:00, 20:00] and the
        // outbound window is [12:00, 04:00 next day], both ends inclusive.
        let snapshot = Snapshot::normalize(
            vec![
                order("I", "IN LOWER EDGE", "10/06/25 04:00"),
                order("I", "IN UPPER EDGE", "10/06/25 20:00"),
                order("I", "IN JUST BEFORE", "10/06/25 03:59"),
                order("I", "IN JUST AFTER", "10/06/25 20:01"),
                order("U", "OUT LOWER EDGE", "10/06/25 12:00"),
                order("U", "OUT UPPER EDGE", "11/06/25 04:00"),
                order("U", "OUT JUST BEFORE", "10/06/25 11:59"),
                order("U", "OUT JUST AFTER", "11/06/25 04:01"),
            ],
            noon(),
        );

        let overview =
            snapshot_overview(&snapshot, noon(), Duration::hours(8), Duration::hours(16));

        let inbound: Vec<&str> = overview.inbound.iter().map(|e| e.vessel.as_str()).collect();
        let outbound: Vec<&str> = overview.outbound.iter().map(|e| e.vessel.as_str()).collect();
        assert_eq!(inbound, vec!["IN LOWER EDGE", "IN UPPER EDGE"]);
        assert_eq!(outbound, vec!["OUT LOWER EDGE", "OUT UPPER EDGE"]);
    }

    #[test]
    fn rendered_overview_marks_empty_sections() {
        let text = render_overview(&Overview::default(), Duration::hours(8), Duration::hours(16));
        assert!(text.contains("--- INBOUND (-8h to +8h) ---\nNone.\n"));
        assert!(text.contains("--- OUTBOUND (next 16h) ---\nNone.\n"));
    }
}
