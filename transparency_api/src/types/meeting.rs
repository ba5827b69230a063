//! Diplomatic meetings and the per-pair relationship summaries derived from them.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::CountryCode;

pub type MeetingID = String;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Meeting {
    pub id: MeetingID,

    pub date: NaiveDate,

    /// Participating country codes; always at least two.
    pub countries: Vec<CountryCode>,

    #[serde(rename = "type")]
    pub meeting_type: MeetingType,

    pub topic: String,

    pub leaders: Vec<String>,
}

impl Meeting {
    /// True when `code` is one of the participants (exact, case-sensitive).
    pub fn involves(&self, code: &str) -> bool {
        self.countries.iter().any(|c| c == code)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MeetingType {
    Bilateral,
    Multilateral,
}
impl std::fmt::Display for MeetingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                MeetingType::Bilateral => "bilateral",
                MeetingType::Multilateral => "multilateral",
            }
        )
    }
}
impl FromStr for MeetingType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bilateral" => Ok(MeetingType::Bilateral),
            "multilateral" => Ok(MeetingType::Multilateral),
            _ => Err(()),
        }
    }
}

/// Summary of diplomatic contact between two countries.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Relationship {
    pub meeting_count: u32,

    /// Normalized strength score in `[0, 1]`.
    pub relationship_strength: f64,

    pub common_topics: Vec<String>,

    #[serde(default)]
    pub last_meeting: Option<NaiveDate>,
}

/// Relationships keyed by `"<codeA>-<codeB>"`.
pub type Relationships = BTreeMap<String, Relationship>;
