use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A party event record as stored by the data service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    pub id: i64,
    pub name: String,
    pub date: DateTime<Utc>,
    pub description: String,
    pub location: String,
}

/// A guest eligible to attend parties (read-only from this client)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    pub id: i64,
    pub name: String,
}

/// Join record linking a guest's attendance response to a party
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rsvp {
    pub id: i64,
    pub event_id: i64,
    pub guest_id: i64,
}

/// Payload for creating a party; the date is already normalized to a
/// canonical UTC timestamp before this struct is built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewParty {
    pub name: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub location: String,
}
