//! TherapistProfile - static reference data describing one therapist.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{TherapistId, ValidationError};

/// How a therapist (or user) attends sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    Online,
    InPerson,
    Either,
}

impl Modality {
    /// True if a therapist offering `self` can serve a user who wants `wanted`.
    pub fn satisfies(&self, wanted: Modality) -> bool {
        matches!(
            (self, wanted),
            (_, Modality::Either)
                | (Modality::Either, _)
                | (Modality::Online, Modality::Online)
                | (Modality::InPerson, Modality::InPerson)
        )
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Modality::Online => "online",
            Modality::InPerson => "in_person",
            Modality::Either => "either",
        };
        write!(f, "{}", s)
    }
}

/// How soon a therapist can take a new client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    /// Has openings this week.
    Immediate,
    /// Openings within a few weeks.
    #[default]
    WithinWeeks,
    /// Waitlist only.
    Waitlist,
}

/// One therapist on the roster.
///
/// List fields keep declaration order (used for display) with duplicates
/// removed case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TherapistProfile {
    id: TherapistId,
    name: String,
    title: Option<String>,
    specialties: Vec<String>,
    communities: Vec<String>,
    approaches: Vec<String>,
    gender: Option<String>,
    modality: Modality,
    availability: Availability,
    photo_filename: String,
}

impl TherapistProfile {
    /// Creates a profile with the required fields; lists start empty.
    pub fn new(
        id: TherapistId,
        name: impl Into<String>,
        modality: Modality,
        photo_filename: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        Ok(Self {
            id,
            name,
            title: None,
            specialties: Vec::new(),
            communities: Vec::new(),
            approaches: Vec::new(),
            gender: None,
            modality,
            availability: Availability::default(),
            photo_filename: photo_filename.into().trim().to_string(),
        })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_specialties<I, S>(mut self, specialties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.specialties = dedupe(specialties);
        self
    }

    pub fn with_communities<I, S>(mut self, communities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.communities = dedupe(communities);
        self
    }

    pub fn with_approaches<I, S>(mut self, approaches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.approaches = dedupe(approaches);
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &TherapistId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn specialties(&self) -> &[String] {
        &self.specialties
    }

    pub fn communities(&self) -> &[String] {
        &self.communities
    }

    pub fn approaches(&self) -> &[String] {
        &self.approaches
    }

    pub fn gender(&self) -> Option<&str> {
        self.gender.as_deref()
    }

    pub fn modality(&self) -> Modality {
        self.modality
    }

    pub fn availability(&self) -> Availability {
        self.availability
    }

    pub fn photo_filename(&self) -> &str {
        &self.photo_filename
    }
}

/// Case-insensitive comparison key for tags.
pub(crate) fn tag_key(tag: &str) -> String {
    tag.trim().to_lowercase()
}

fn dedupe<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .map(|s| s.into().trim().to_string())
        .filter(|s| !s.is_empty() && seen.insert(tag_key(s)))
        .collect()
}
