//! ResultsPresenter - turns ranked candidates into display cards.

use serde::{Deserialize, Serialize};

use crate::domain::assets::{AssetPathResolver, RuntimeEnvironment};
use crate::domain::foundation::TherapistId;
use crate::domain::matching::Candidate;

/// Presentation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenterConfig {
    /// Specialty tags shown per card before collapsing into "+N more".
    pub visible_tag_count: usize,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            visible_tag_count: 3,
        }
    }
}

/// One therapist card on the results page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TherapistCard {
    pub therapist_id: TherapistId,
    pub name: String,
    pub title: Option<String>,
    pub photo_url: String,
    pub specialty_tags: Vec<String>,
    pub overflow_count: usize,
    /// `"+N more"`; absent when nothing overflows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overflow_label: Option<String>,
    pub score: u32,
}

/// What the results page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "cards", rename_all = "snake_case")]
pub enum ResultsView {
    Matches(Vec<TherapistCard>),
    NoMatch,
}

impl ResultsView {
    pub fn cards(&self) -> &[TherapistCard] {
        match self {
            ResultsView::Matches(cards) => cards,
            ResultsView::NoMatch => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ResultsView::NoMatch)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResultsPresenter {
    resolver: AssetPathResolver,
    config: PresenterConfig,
}

impl ResultsPresenter {
    pub fn new(resolver: AssetPathResolver, config: PresenterConfig) -> Self {
        Self { resolver, config }
    }

    /// Builds the results view. An empty candidate list yields `NoMatch`.
    pub fn present(&self, candidates: &[Candidate], env: &RuntimeEnvironment) -> ResultsView {
        if candidates.is_empty() {
            return ResultsView::NoMatch;
        }
        ResultsView::Matches(candidates.iter().map(|c| self.card(c, env)).collect())
    }

    /// Builds one card.
    ///
    /// Tags come from the matched specialties; when nothing matched (no
    /// concerns were given) the profile's own specialties are shown.
    pub fn card(&self, candidate: &Candidate, env: &RuntimeEnvironment) -> TherapistCard {
        let profile = &candidate.profile;
        let source = if candidate.matched_specialties.is_empty() {
            profile.specialties()
        } else {
            candidate.matched_specialties.as_slice()
        };

        let k = self.config.visible_tag_count;
        let specialty_tags: Vec<String> = source.iter().take(k).cloned().collect();
        let overflow_count = source.len().saturating_sub(k);

        TherapistCard {
            therapist_id: profile.id().clone(),
            name: profile.name().to_string(),
            title: profile.title().map(str::to_string),
            photo_url: self.resolver.resolve(profile.photo_filename(), env),
            specialty_tags,
            overflow_count,
            overflow_label: (overflow_count > 0).then(|| format!("+{} more", overflow_count)),
            score: candidate.score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::matching::{Modality, TherapistProfile};

    fn candidate(matched: &[&str], specialties: &[&str]) -> Candidate {
        let profile = TherapistProfile::new(
            TherapistId::new("adam").unwrap(),
            "Adam Forman",
            Modality::Either,
            "adam.jpg",
        )
        .unwrap()
        .with_specialties(specialties.iter().copied());
        Candidate {
            profile,
            score: 10,
            matched_specialties: matched.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn overflow_label_counts_hidden_tags() {
        let presenter = ResultsPresenter::default();
        let c = candidate(&["A", "B", "C", "D", "E"], &["A", "B", "C", "D", "E"]);

        let card = presenter.card(&c, &RuntimeEnvironment::local_file());

        assert_eq!(card.specialty_tags, vec!["A", "B", "C"]);
        assert_eq!(card.overflow_count, 2);
        assert_eq!(card.overflow_label.as_deref(), Some("+2 more"));
    }

    #[test]
    fn no_label_when_everything_fits() {
        let presenter = ResultsPresenter::default();
        let card = presenter.card(&candidate(&["A", "B"], &["A", "B"]), &RuntimeEnvironment::local_file());
        assert_eq!(card.overflow_count, 0);
        assert!(card.overflow_label.is_none());
    }

    #[test]
    fn falls_back_to_profile_specialties_when_nothing_matched() {
        let presenter = ResultsPresenter::default();
        let card = presenter.card(&candidate(&[], &["Grief", "Stress"]), &RuntimeEnvironment::local_file());
        assert_eq!(card.specialty_tags, vec!["Grief", "Stress"]);
    }

    #[test]
    fn photo_url_follows_environment() {
        let presenter = ResultsPresenter::default();
        let c = candidate(&["A"], &["A"]);

        let local = presenter.card(&c, &RuntimeEnvironment::local_file());
        assert_eq!(local.photo_url, "images/resized/adam.jpg");

        let hosted = presenter.card(&c, &RuntimeEnvironment::hosted("unisonmentalhealth.com"));
        assert_eq!(
            hosted.photo_url,
            "https://unisonmentalhealth.com/therapair-widget/images/adam.jpeg"
        );
    }

    #[test]
    fn empty_candidates_present_no_match() {
        let view = ResultsPresenter::default().present(&[], &RuntimeEnvironment::local_file());
        assert_eq!(view, ResultsView::NoMatch);
        assert!(view.cards().is_empty());
    }

    #[test]
    fn custom_visible_tag_count() {
        let presenter = ResultsPresenter::new(
            AssetPathResolver::default(),
            PresenterConfig {
                visible_tag_count: 1,
            },
        );
        let card = presenter.card(&candidate(&["A", "B"], &["A", "B"]), &RuntimeEnvironment::local_file());
        assert_eq!(card.overflow_label.as_deref(), Some("+1 more"));
    }
}
