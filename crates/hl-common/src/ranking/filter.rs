use crate::{Candidate, CandidateStatus};

/// Criteria for narrowing a candidate list; empty/absent fields match
/// everything.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    /// Every listed skill must be contained (case-insensitively) in at
    /// least one of the candidate's declared skills.
    pub skills: Vec<String>,
    pub min_experience: Option<u32>,
    /// Substring match against the candidate's location.
    pub location: Option<String>,
    pub statuses: Vec<CandidateStatus>,
}

impl FilterCriteria {
    pub fn matches(&self, candidate: &Candidate) -> bool {
        let matches_skills = self.skills.iter().all(|wanted| {
            let wanted = wanted.to_lowercase();
            candidate
                .skills
                .iter()
                .any(|skill| skill.to_lowercase().contains(&wanted))
        });

        let matches_experience = self
            .min_experience
            .map_or(true, |min| candidate.experience >= min);

        let matches_location = self.location.as_deref().map_or(true, |location| {
            candidate
                .location
                .to_lowercase()
                .contains(&location.to_lowercase())
        });

        let matches_status =
            self.statuses.is_empty() || self.statuses.contains(&candidate.status);

        matches_skills && matches_experience && matches_location && matches_status
    }
}

/// Order-preserving filter over a candidate snapshot.
pub fn filter_candidates<'a>(
    candidates: &'a [Candidate],
    criteria: &FilterCriteria,
) -> Vec<&'a Candidate> {
    candidates
        .iter()
        .filter(|candidate| criteria.matches(candidate))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CandidateSource;
    use chrono::Utc;

    fn candidate(name: &str, skills: &[&str], experience: u32, location: &str) -> Candidate {
        Candidate {
            id: name.to_lowercase(),
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: None,
            location: location.into(),
            source: CandidateSource::Other,
            resume_url: None,
            linkedin_url: None,
            github_url: None,
            status: CandidateStatus::Screening,
            vacancy_id: None,
            skills: skills.iter().map(|s| s.to_string()).collect(),
            experience,
            assessment: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn all_requested_skills_must_match() {
        let pool = vec![
            candidate("Ada", &["React", "TypeScript"], 6, "Berlin"),
            candidate("Ben", &["React"], 6, "Berlin"),
        ];
        let criteria = FilterCriteria {
            skills: vec!["react".into(), "typescript".into()],
            ..FilterCriteria::default()
        };

        let kept = filter_candidates(&pool, &criteria);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "Ada");
    }

    #[test]
    fn experience_and_location_filters_combine() {
        let pool = vec![
            candidate("Ada", &["React"], 6, "Berlin, Germany"),
            candidate("Ben", &["React"], 2, "Berlin, Germany"),
            candidate("Cy", &["React"], 6, "Paris, France"),
        ];
        let criteria = FilterCriteria {
            min_experience: Some(4),
            location: Some("berlin".into()),
            ..FilterCriteria::default()
        };

        let kept = filter_candidates(&pool, &criteria);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "Ada");
    }

    #[test]
    fn status_filter_uses_membership() {
        let mut hired = candidate("Ada", &[], 1, "x");
        hired.status = CandidateStatus::Hired;
        let pool = vec![hired, candidate("Ben", &[], 1, "x")];

        let criteria = FilterCriteria {
            statuses: vec![CandidateStatus::Hired, CandidateStatus::OfferSent],
            ..FilterCriteria::default()
        };

        let kept = filter_candidates(&pool, &criteria);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "Ada");
    }

    #[test]
    fn empty_criteria_keep_everything_in_order() {
        let pool = vec![
            candidate("Ada", &[], 0, "x"),
            candidate("Ben", &[], 0, "x"),
        ];
        let kept = filter_candidates(&pool, &FilterCriteria::default());
        let names: Vec<_> = kept.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Ada", "Ben"]);
    }
}
