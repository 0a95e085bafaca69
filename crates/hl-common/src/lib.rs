pub mod analysis;
pub mod assessment;
pub mod logging;
pub mod ranking;
pub mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use assessment::{Assessment, SkillAssessment};

/// Pipeline stage a candidate is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    New,
    Screening,
    AiInterview,
    HrReview,
    TeamInterview,
    OfferSent,
    Hired,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSource {
    Internal,
    Linkedin,
    Github,
    Referral,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VacancyStatus {
    Active,
    Paused,
    Closed,
}

// Commonly used data models for ranking and filtering functions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: String,
    pub source: CandidateSource,
    pub resume_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub status: CandidateStatus,
    pub vacancy_id: Option<String>,
    pub skills: Vec<String>,
    /// Declared years of professional experience.
    pub experience: u32,
    /// Structured AI assessment, present once a resume or interview has
    /// been analyzed. Candidates without one are skipped by ranking.
    pub assessment: Option<Assessment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vacancy {
    pub id: String,
    pub title: String,
    pub department: String,
    pub location: String,
    pub employment_type: String,
    pub salary: String,
    pub description: String,
    /// Free-text requirement lines, e.g. "5+ years React experience".
    pub requirements: Vec<String>,
    pub applicants: u32,
    pub status: VacancyStatus,
    pub posted_at: DateTime<Utc>,
}
