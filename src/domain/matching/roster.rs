//! Roster - the therapist list, loaded from JSON.
//!
//! Loading is lenient: a record that cannot form a profile is skipped with a
//! warning and recorded as a [`SkippedRecord`]. Only a document that is not a
//! JSON array fails outright.

use serde::Deserialize;
use std::collections::HashSet;
use thiserror::Error;

use super::therapist::{Availability, Modality, TherapistProfile};
use crate::domain::foundation::{DomainError, ErrorCode, TherapistId, ValidationError};

/// Errors that make the whole roster unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("Roster is not valid JSON: {0}")]
    Parse(String),

    #[error("Roster must be a JSON array of therapist records")]
    NotAnArray,
}

impl From<RosterError> for DomainError {
    fn from(err: RosterError) -> Self {
        DomainError::new(ErrorCode::MalformedRoster, err.to_string())
    }
}

/// A record dropped during loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub index: usize,
    pub reason: String,
}

/// Wire shape of one roster entry.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TherapistRecord {
    id: String,
    name: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    specialties: Option<Vec<String>>,
    #[serde(default)]
    communities: Vec<String>,
    #[serde(default)]
    approaches: Vec<String>,
    #[serde(default)]
    gender: Option<String>,
    modality: Modality,
    #[serde(default)]
    availability: Availability,
    #[serde(default, alias = "photo", alias = "image")]
    photo_filename: String,
}

impl TryFrom<TherapistRecord> for TherapistProfile {
    type Error = ValidationError;

    fn try_from(record: TherapistRecord) -> Result<Self, Self::Error> {
        let id = TherapistId::new(record.id)?;
        let mut profile = TherapistProfile::new(id, record.name, record.modality, record.photo_filename)?
            .with_specialties(record.specialties.unwrap_or_default())
            .with_communities(record.communities)
            .with_approaches(record.approaches)
            .with_availability(record.availability);
        if let Some(title) = record.title.filter(|t| !t.trim().is_empty()) {
            profile = profile.with_title(title.trim());
        }
        if let Some(gender) = record.gender.filter(|g| !g.trim().is_empty()) {
            profile = profile.with_gender(gender.trim());
        }
        Ok(profile)
    }
}

/// Ordered list of therapist profiles with unique ids.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    profiles: Vec<TherapistProfile>,
    skipped: Vec<SkippedRecord>,
}

impl Roster {
    /// Builds a roster from profiles; later duplicates of an id are dropped.
    pub fn new(profiles: Vec<TherapistProfile>) -> Self {
        let mut roster = Self::default();
        for (index, profile) in profiles.into_iter().enumerate() {
            roster.push(index, profile);
        }
        roster
    }

    /// Parses a JSON array of therapist records.
    pub fn from_json_str(json: &str) -> Result<Self, RosterError> {
        let document: serde_json::Value =
            serde_json::from_str(json).map_err(|e| RosterError::Parse(e.to_string()))?;
        let records = match document {
            serde_json::Value::Array(records) => records,
            _ => return Err(RosterError::NotAnArray),
        };

        let mut roster = Self::default();
        for (index, raw) in records.into_iter().enumerate() {
            let parsed = serde_json::from_value::<TherapistRecord>(raw)
                .map_err(|e| e.to_string())
                .and_then(|record| TherapistProfile::try_from(record).map_err(|e| e.to_string()));

            match parsed {
                Ok(profile) => roster.push(index, profile),
                Err(reason) => roster.skip(index, reason),
            }
        }

        tracing::debug!(
            loaded = roster.profiles.len(),
            skipped = roster.skipped.len(),
            "Roster loaded"
        );
        Ok(roster)
    }

    fn push(&mut self, index: usize, profile: TherapistProfile) {
        if self.profiles.iter().any(|p| p.id() == profile.id()) {
            self.skip(index, format!("duplicate therapist id '{}'", profile.id()));
            return;
        }
        if profile.specialties().is_empty() {
            tracing::warn!(therapist_id = %profile.id(), "Therapist has no specialties");
        }
        self.profiles.push(profile);
    }

    fn skip(&mut self, index: usize, reason: String) {
        tracing::warn!(index, reason = %reason, "Skipping malformed therapist record");
        self.skipped.push(SkippedRecord { index, reason });
    }

    pub fn profiles(&self) -> &[TherapistProfile] {
        &self.profiles
    }

    pub fn get(&self, id: &TherapistId) -> Option<&TherapistProfile> {
        self.profiles.iter().find(|p| p.id() == id)
    }

    pub fn skipped(&self) -> &[SkippedRecord] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Every distinct specialty tag on the roster, in first-seen order.
    pub fn specialty_vocabulary(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.profiles
            .iter()
            .flat_map(|p| p.specialties())
            .filter(|s| seen.insert(super::therapist::tag_key(s)))
            .map(String::as_str)
            .collect()
    }
}
