use crate::types::order::{OrderField, PilotOrder, VesselType};
use crate::types::vessel::VesselKey;

/// One field-level difference between the baseline and current record of a
/// vessel.
///
/// Both sides are text; an absent old value is represented by the empty
/// string, never by omission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDelta {
    /// The field that changed.
    pub field: OrderField,
    /// Value in the baseline record.
    pub old: String,
    /// Value in the current record.
    pub new: String,
}

/// All field-level differences of one vessel between two snapshots.
///
/// Only produced when at least one field differs; never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VesselDiff {
    /// Canonical identity of the vessel.
    pub key: VesselKey,
    /// Changed fields, in fixed comparison order.
    pub fields: Vec<FieldDelta>,
}

impl VesselDiff {
    /// Returns the delta for the given field, if it changed.
    pub fn get(&self, field: OrderField) -> Option<&FieldDelta> {
        self.fields.iter().find(|delta| delta.field == field)
    }

    /// Returns whether the given field changed.
    pub fn contains(&self, field: OrderField) -> bool {
        self.get(field).is_some()
    }
}

/// A vessel diff that survived the rule filter, ready for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VesselChange {
    /// Canonical identity of the vessel.
    pub key: VesselKey,
    /// Movement type of the current record.
    pub vessel_type: VesselType,
    /// Changed fields, in fixed comparison order.
    pub fields: Vec<FieldDelta>,
    /// Full current record of the vessel.
    pub current: PilotOrder,
}
