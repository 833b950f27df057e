use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::types::vessel::VesselKey;

/// Timestamp format used by the pilotage system for order times,
/// e.g. `10/06/25 18:00`.
pub const ORDER_TIME_FORMAT: &str = "%d/%m/%y %H:%M";

/// Movement type of a vessel as reported by the source.
///
/// The source encodes the type as a single-letter tag; anything outside the
/// known tags is preserved verbatim in [`VesselType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VesselType {
    /// Inbound movement (`I`).
    Inbound,
    /// Outbound movement (`U`).
    Outbound,
    /// Shifting movement within the port area (`V`).
    Shifting,
    /// Any other tag, preserved as observed.
    Other(String),
}

impl VesselType {
    /// Parses a vessel type from the source tag.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "I" => VesselType::Inbound,
            "U" => VesselType::Outbound,
            "V" => VesselType::Shifting,
            other => VesselType::Other(other.to_string()),
        }
    }

    /// Returns the source tag for this vessel type.
    pub fn tag(&self) -> &str {
        match self {
            VesselType::Inbound => "I",
            VesselType::Outbound => "U",
            VesselType::Shifting => "V",
            VesselType::Other(tag) => tag,
        }
    }

    /// Returns the bracketed tag used in notification subjects.
    pub fn subject_tag(&self) -> String {
        match self {
            VesselType::Inbound => "[IN]".to_string(),
            VesselType::Outbound => "[UIT]".to_string(),
            VesselType::Shifting => "[SHIFT]".to_string(),
            VesselType::Other(tag) => format!("[{tag}]"),
        }
    }

    /// Returns the reporting category this vessel type belongs to.
    pub fn category(&self) -> VesselCategory {
        match self {
            VesselType::Inbound => VesselCategory::Inbound,
            VesselType::Outbound => VesselCategory::Outbound,
            VesselType::Shifting => VesselCategory::Shifting,
            VesselType::Other(_) => VesselCategory::Other,
        }
    }
}

impl From<String> for VesselType {
    fn from(tag: String) -> Self {
        VesselType::from_tag(&tag)
    }
}

impl From<VesselType> for String {
    fn from(vessel_type: VesselType) -> Self {
        vessel_type.tag().to_string()
    }
}

/// Reporting category used to group changes and overview entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VesselCategory {
    Inbound,
    Outbound,
    Shifting,
    Other,
}

impl VesselCategory {
    /// All categories in fixed reporting order.
    pub const ALL: [VesselCategory; 4] = [
        VesselCategory::Inbound,
        VesselCategory::Outbound,
        VesselCategory::Shifting,
        VesselCategory::Other,
    ];

    /// Returns the lowercase name used in structured output.
    pub fn name(self) -> &'static str {
        match self {
            VesselCategory::Inbound => "inbound",
            VesselCategory::Outbound => "outbound",
            VesselCategory::Shifting => "shifting",
            VesselCategory::Other => "other",
        }
    }
}

/// One comparable field of a pilot-order record.
///
/// [`OrderField::ALL`] fixes the order in which fields are compared and
/// rendered; it matches the column order of the source table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderField {
    VesselType,
    OrderTime,
    EtaEtd,
    Rta,
    Pilot,
    VesselName,
    EntryPoint,
}

impl OrderField {
    /// All fields in fixed comparison and rendering order.
    pub const ALL: [OrderField; 7] = [
        OrderField::VesselType,
        OrderField::OrderTime,
        OrderField::EtaEtd,
        OrderField::Rta,
        OrderField::Pilot,
        OrderField::VesselName,
        OrderField::EntryPoint,
    ];

    /// Returns the snake_case name used in configuration.
    pub fn name(self) -> &'static str {
        match self {
            OrderField::VesselType => "vessel_type",
            OrderField::OrderTime => "order_time",
            OrderField::EtaEtd => "eta_etd",
            OrderField::Rta => "rta",
            OrderField::Pilot => "pilot",
            OrderField::VesselName => "vessel_name",
            OrderField::EntryPoint => "entry_point",
        }
    }

    /// Returns the human-readable label used in rendered reports.
    pub fn label(self) -> &'static str {
        match self {
            OrderField::VesselType => "Type",
            OrderField::OrderTime => "Order time",
            OrderField::EtaEtd => "ETA/ETD",
            OrderField::Rta => "RTA",
            OrderField::Pilot => "Pilot",
            OrderField::VesselName => "Vessel",
            OrderField::EntryPoint => "Entry point",
        }
    }

    /// Resolves a field from its configuration name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }
}

/// One row of the source dataset at one point in time.
///
/// All text fields are kept as observed; `vessel_name` may still carry the
/// duplicate marker and `order_time` is the raw source string, parsed on
/// demand through [`PilotOrder::parsed_order_time`]. Unknown fields are
/// rejected at the adapter boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PilotOrder {
    /// Movement type tag.
    pub vessel_type: VesselType,
    /// Vessel name as observed, possibly carrying a duplicate marker.
    pub vessel_name: String,
    /// Order time in [`ORDER_TIME_FORMAT`], may be empty.
    #[serde(default)]
    pub order_time: String,
    /// Estimated time of arrival or departure, free text.
    #[serde(default)]
    pub eta_etd: String,
    /// Requested time of arrival, free text.
    #[serde(default)]
    pub rta: String,
    /// Assigned pilot, free text; empty while unassigned.
    #[serde(default)]
    pub pilot: String,
    /// Geographic entry point of the movement.
    #[serde(default)]
    pub entry_point: String,
}

impl PilotOrder {
    /// Returns the canonical vessel identity for this record.
    pub fn key(&self) -> VesselKey {
        VesselKey::from_raw(&self.vessel_name)
    }

    /// Returns the value of the given field as text.
    pub fn field(&self, field: OrderField) -> &str {
        match field {
            OrderField::VesselType => self.vessel_type.tag(),
            OrderField::OrderTime => &self.order_time,
            OrderField::EtaEtd => &self.eta_etd,
            OrderField::Rta => &self.rta,
            OrderField::Pilot => &self.pilot,
            OrderField::VesselName => &self.vessel_name,
            OrderField::EntryPoint => &self.entry_point,
        }
    }

    /// Returns whether an order time is present at all.
    pub fn has_order_time(&self) -> bool {
        !self.order_time.trim().is_empty()
    }

    /// Parses the order time, returning `None` when it is absent or does not
    /// match [`ORDER_TIME_FORMAT`].
    pub fn parsed_order_time(&self) -> Option<NaiveDateTime> {
        let raw = self.order_time.trim();
        if raw.is_empty() {
            return None;
        }

        NaiveDateTime::parse_from_str(raw, ORDER_TIME_FORMAT).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn vessel_type_round_trips_through_tags() {
        assert_eq!(VesselType::from_tag("I"), VesselType::Inbound);
        assert_eq!(VesselType::from_tag("U"), VesselType::Outbound);
        assert_eq!(VesselType::from_tag("V"), VesselType::Shifting);
        assert_eq!(
            VesselType::from_tag("K"),
            VesselType::Other("K".to_string())
        );
        assert_eq!(VesselType::Outbound.tag(), "U");
    }

    #[test]
    fn order_time_parses_source_format() {
        let order = order("I", "ALFA", "10/06/25 18:00");
        let parsed = order.parsed_order_time().unwrap();
        assert_eq!(parsed.format(ORDER_TIME_FORMAT).to_string(), "10/06/25 18:00");
    }

    #[test]
    fn unparseable_order_time_yields_none() {
        assert!(order("I", "ALFA", "tomorrow").parsed_order_time().is_none());
        assert!(order("I", "ALFA", "  ").parsed_order_time().is_none());
    }

    #[test]
    fn unknown_record_fields_are_rejected() {
        let raw = r#"{"vessel_type":"I","vessel_name":"ALFA","berth":"K104"}"#;
        let result: Result<PilotOrder, _> = serde_json::from_str(raw);
        assert!(result.is_err());
    }

    #[test]
    fn record_deserializes_with_missing_optional_fields() {
        let raw = r#"{"vessel_type":"U","vessel_name":"BRAVO"}"#;
        let order: PilotOrder = serde_json::from_str(raw).unwrap();
        assert_eq!(order.vessel_type, VesselType::Outbound);
        assert!(order.order_time.is_empty());
    }
}
