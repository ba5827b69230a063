use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GovernmentContract {
    pub id: String,

    pub title: String,

    pub status: ContractStatus,

    pub amount: f64,

    pub currency: String,

    /// Procurement transparency rating (0-10), when assessed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transparency_score: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    Ongoing,
    Completed,
    Cancelled,
}
impl std::fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ContractStatus::Ongoing => "ongoing",
                ContractStatus::Completed => "completed",
                ContractStatus::Cancelled => "cancelled",
            }
        )
    }
}
impl FromStr for ContractStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ongoing" => Ok(ContractStatus::Ongoing),
            "completed" => Ok(ContractStatus::Completed),
            "cancelled" => Ok(ContractStatus::Cancelled),
            _ => Err(()),
        }
    }
}
