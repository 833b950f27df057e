use serde::Deserialize;

use crate::shared::ValidationError;

/// Configuration for the change-report rule filter.
///
/// The guard chain itself is fixed; this type only carries the thresholds, the
/// excluded entry-point tokens, and the set of fields whose changes are worth
/// reporting. Consolidating these here keeps every deployment on the same
/// filtering logic instead of re-deriving it per installation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RulesConfig {
    /// Look-ahead window, in hours, past which changes to inbound orders are
    /// considered premature and suppressed.
    #[serde(default = "default_inbound_lookahead_hours")]
    pub inbound_lookahead_hours: i64,
    /// Look-ahead window, in hours, past which changes to outbound orders are
    /// suppressed.
    #[serde(default = "default_outbound_lookahead_hours")]
    pub outbound_lookahead_hours: i64,
    /// Optional look-ahead window, in hours, applied to vessel types without a
    /// dedicated window (shifting and unknown types). `None` disables the
    /// guard for those types.
    #[serde(default)]
    pub default_lookahead_hours: Option<i64>,
    /// Entry-point tokens that suppress a change when the current record's
    /// entry point contains one of them, compared case-insensitively.
    #[serde(default = "default_excluded_entry_points")]
    pub excluded_entry_points: Vec<String>,
    /// Names of the record fields whose changes are relevant. A change set
    /// that touches none of these fields is treated as noise.
    #[serde(default = "default_relevant_fields")]
    pub relevant_fields: Vec<String>,
}

impl RulesConfig {
    /// Default inbound look-ahead window in hours.
    pub const DEFAULT_INBOUND_LOOKAHEAD_HOURS: i64 = 8;

    /// Default outbound look-ahead window in hours.
    pub const DEFAULT_OUTBOUND_LOOKAHEAD_HOURS: i64 = 16;

    /// Default excluded entry-point tokens.
    pub const DEFAULT_EXCLUDED_ENTRY_POINTS: &[&str] = &["zeebrugge"];

    /// Default relevant field names.
    pub const DEFAULT_RELEVANT_FIELDS: &[&str] = &["order_time", "eta_etd", "pilot"];

    /// Validates rule thresholds and the relevant-field set.
    ///
    /// Field names are validated against the record shape by the core crate
    /// when the filter is built; here only structural constraints are checked.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.inbound_lookahead_hours <= 0 {
            return Err(ValidationError::InvalidFieldValue {
                field: "rules.inbound_lookahead_hours".to_string(),
                constraint: "must be greater than 0".to_string(),
            });
        }

        if self.outbound_lookahead_hours <= 0 {
            return Err(ValidationError::InvalidFieldValue {
                field: "rules.outbound_lookahead_hours".to_string(),
                constraint: "must be greater than 0".to_string(),
            });
        }

        if let Some(hours) = self.default_lookahead_hours
            && hours <= 0
        {
            return Err(ValidationError::InvalidFieldValue {
                field: "rules.default_lookahead_hours".to_string(),
                constraint: "must be greater than 0 when set".to_string(),
            });
        }

        if self.relevant_fields.is_empty() {
            return Err(ValidationError::MissingField {
                field: "rules.relevant_fields".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            inbound_lookahead_hours: default_inbound_lookahead_hours(),
            outbound_lookahead_hours: default_outbound_lookahead_hours(),
            default_lookahead_hours: None,
            excluded_entry_points: default_excluded_entry_points(),
            relevant_fields: default_relevant_fields(),
        }
    }
}

fn default_inbound_lookahead_hours() -> i64 {
    RulesConfig::DEFAULT_INBOUND_LOOKAHEAD_HOURS
}

fn default_outbound_lookahead_hours() -> i64 {
    RulesConfig::DEFAULT_OUTBOUND_LOOKAHEAD_HOURS
}

fn default_excluded_entry_points() -> Vec<String> {
    RulesConfig::DEFAULT_EXCLUDED_ENTRY_POINTS
        .iter()
        .map(|token| token.to_string())
        .collect()
}

fn default_relevant_fields() -> Vec<String> {
    RulesConfig::DEFAULT_RELEVANT_FIELDS
        .iter()
        .map(|field| field.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = RulesConfig::default();
        assert_eq!(config.inbound_lookahead_hours, 8);
        assert_eq!(config.outbound_lookahead_hours, 16);
        assert_eq!(config.default_lookahead_hours, None);
        assert_eq!(config.excluded_entry_points, vec!["zeebrugge"]);
        config.validate().unwrap();
    }

    #[test]
    fn empty_relevant_fields_are_rejected() {
        let config = RulesConfig {
            relevant_fields: vec![],
            ..RulesConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_default_lookahead_is_rejected() {
        let config = RulesConfig {
            default_lookahead_hours: Some(0),
            ..RulesConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
