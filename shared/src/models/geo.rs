//! Geography wire records of the external lookup API
//!
//! Tolerant of extra fields, the upstream payloads carry more than we read.

use serde::{Deserialize, Serialize};

/// Country record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: i64,
    pub name: String,
    pub iso2: String,
}

/// State record within a country
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryState {
    pub id: i64,
    pub name: String,
    pub iso2: String,
}

/// City record within a state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: i64,
    pub name: String,
}
