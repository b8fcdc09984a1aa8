// Data contracts for the lab API. Field names mirror the backend's
// camelCase wire format; all date fields are date-only (no time-of-day,
// no timezone), encoded through the `date_only` serde module below.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

/// Serde adapter for the API's fixed `YYYY-MM-DD` date encoding.
///
/// The backend contract is date-only: any locale-sensitive or
/// timestamp-carrying format would be rejected, so every date field in
/// every model goes through this module. Absent values are skipped at
/// the field level (`skip_serializing_if`) rather than sent as null.
pub mod date_only {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    /// Parse a `YYYY-MM-DD` string into a date.
    pub fn parse(s: &str) -> Result<NaiveDate, chrono::ParseError> {
        NaiveDate::parse_from_str(s, FORMAT)
    }

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_str(&d.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        // An explicit JSON null decodes to an absent value, same as a
        // missing field.
        match Option::<String>::deserialize(deserializer)? {
            Some(s) => parse(&s).map(Some).map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

/// Demographic record posted alongside an uploaded sample. Only
/// `sampleName` is required; every other field is omitted from the
/// serialized payload when absent (the backend treats null and missing
/// differently, so we never emit explicit nulls).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DemographicCreateRequest {
    pub sample_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pregnant: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrent_bv: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrent_candidia: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrent_trich: Option<bool>,
    /// Patient surname.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "date_only")]
    pub dob: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physician: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub npi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub practice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physician_city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physician_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physician_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "date_only")]
    pub collected: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "date_only")]
    pub received: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "date_only")]
    pub reported: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specimen: Option<String>,
}

/// Response from the demographics endpoint: the server-assigned record id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DemographicSaveResponse {
    pub id: Uuid,
}

impl fmt::Display for DemographicSaveResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DemographicSaveResponse {}", self.id)
    }
}

/// Result of a file upload: the server-assigned batch id plus the set of
/// unique sample names it parsed out of the file. Membership is unique,
/// ordering is not guaranteed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatchUploadResult {
    pub batch_id: Uuid,
    pub sample_names: HashSet<String>,
}

impl fmt::Display for BatchUploadResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "batchId {} ids {}", self.batch_id, self.sample_names.len())
    }
}

/// Knobs for report generation. The serde defaults match `Default`, so a
/// partial JSON document and an unset field end up with the same values.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct InterpretationOptions {
    pub group_id: i32,
    pub qc_group_id: i32,
    pub include_charts: bool,
    /// Panel names to include in the report; empty means all.
    pub panels: HashSet<String>,
}

impl Default for InterpretationOptions {
    fn default() -> Self {
        InterpretationOptions {
            group_id: 2,
            qc_group_id: 1,
            include_charts: false,
            panels: HashSet::new(),
        }
    }
}

/// Flags attached to an interpretation. Their shape is defined by the
/// server, not this client, so entries stay as raw JSON values.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct FlagSet {
    #[serde(default)]
    pub global_flags: Vec<serde_json::Value>,
    #[serde(default)]
    pub assay_flags: Vec<serde_json::Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct InterpretationResponse {
    pub id: Uuid,
    pub flags: FlagSet,
}
