//! Typed assessment built once at the ingestion boundary.
//!
//! The external completion service replies either with the structured JSON
//! shape the resume-analysis prompt asks for, or (older prompts) with a
//! loosely formatted text report. Both are converted into a validated
//! [`Assessment`] here; nothing downstream ever re-parses raw model output.
//!
//! All numeric fields are canonical 0.0..=1.0. Models emit 0-100; values are
//! divided by 100 and clamped exactly once, during construction.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("model reply is not valid assessment JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("model reply contains no recognizable assessment sections")]
    Unrecognized,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillAssessment {
    pub skill: String,
    /// 0.0..=1.0
    pub score: f64,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfessionalInfo {
    pub years_of_experience: Option<u32>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub current_role: Option<String>,
    pub education: Option<String>,
}

/// Resume/interview details the model extracted alongside its scores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedInfo {
    pub personal: PersonalInfo,
    pub professional: ProfessionalInfo,
}

/// Structured result of an AI-driven resume or interview analysis.
///
/// Scores are 0.0..=1.0 after normalization. Missing fields in the model
/// reply default to 0 / empty rather than failing the whole ingestion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// Overall score.
    pub score: f64,
    pub skills: Vec<SkillAssessment>,
    pub experience_relevance: f64,
    pub culture_fit: f64,
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub red_flags: Vec<String>,
    #[serde(default)]
    pub extracted: Option<ExtractedInfo>,
}

impl Assessment {
    /// Build an assessment from a raw completion-service reply.
    ///
    /// A reply that looks like JSON (after stripping an optional markdown
    /// code fence) must parse as the structured shape; anything else goes
    /// through the legacy free-text section parser.
    pub fn from_model_reply(reply: &str) -> Result<Assessment, AssessmentError> {
        let body = strip_code_fence(reply.trim());

        if body.starts_with('{') {
            let raw: RawReply = serde_json::from_str(body)?;
            return Ok(raw.into());
        }

        parse_sections(reply)
    }
}

/// Map a model-emitted score onto the canonical unit scale.
/// 0-100 values are divided by 100; values already in 0..=1 pass through.
fn normalize_unit(value: f64) -> f64 {
    let value = if value > 1.0 { value / 100.0 } else { value };
    value.clamp(0.0, 1.0)
}

fn strip_code_fence(reply: &str) -> &str {
    let Some(rest) = reply.strip_prefix("```") else {
        return reply;
    };
    // Fence may carry a language tag ("```json").
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    rest.trim().trim_end_matches("```").trim()
}

// === Structured JSON reply ===

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReply {
    #[serde(default)]
    personal_info: PersonalInfo,
    #[serde(default)]
    professional_info: ProfessionalInfo,
    #[serde(default)]
    analysis: RawAnalysis,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnalysis {
    #[serde(default)]
    overall_score: f64,
    #[serde(default)]
    skills_match: Vec<RawSkill>,
    #[serde(default)]
    experience_relevance: f64,
    #[serde(default)]
    culture_fit: f64,
    #[serde(default)]
    recommendations: Vec<String>,
    #[serde(default)]
    red_flags: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSkill {
    #[serde(default)]
    skill: String,
    #[serde(default)]
    score: f64,
    #[serde(default)]
    notes: String,
}

impl From<RawReply> for Assessment {
    fn from(raw: RawReply) -> Self {
        Assessment {
            score: normalize_unit(raw.analysis.overall_score),
            skills: raw
                .analysis
                .skills_match
                .into_iter()
                .map(|s| SkillAssessment {
                    skill: s.skill,
                    score: normalize_unit(s.score),
                    notes: s.notes,
                })
                .collect(),
            experience_relevance: normalize_unit(raw.analysis.experience_relevance),
            culture_fit: normalize_unit(raw.analysis.culture_fit),
            recommendations: raw.analysis.recommendations,
            red_flags: raw.analysis.red_flags,
            extracted: Some(ExtractedInfo {
                personal: raw.personal_info,
                professional: raw.professional_info,
            }),
        }
    }
}

// === Free-text fallback ===

static INT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());
static BULLET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(?:[-•*]|\d+[.)])\s*").unwrap());

/// Per-skill score when the text report lists skills without numbers.
const FALLBACK_SKILL_SCORE: f64 = 0.85;
/// Culture fit is rarely present in text reports; assume slightly positive.
const FALLBACK_CULTURE_FIT: f64 = 0.75;

fn bullet_lines(section: &str) -> Vec<String> {
    section
        .lines()
        .skip(1)
        .map(|line| BULLET_RE.replace(line, "").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

fn parse_sections(reply: &str) -> Result<Assessment, AssessmentError> {
    let mut assessment = Assessment {
        culture_fit: FALLBACK_CULTURE_FIT,
        ..Assessment::default()
    };
    let mut score_seen = false;

    for section in reply.split("\n\n") {
        let lower = section.to_lowercase();

        if !score_seen && lower.contains("score") {
            if let Some(m) = INT_RE.find(section) {
                if let Ok(value) = m.as_str().parse::<f64>() {
                    assessment.score = normalize_unit(value);
                    score_seen = true;
                }
            }
        }

        if lower.contains("experience relevance") {
            if let Some(m) = INT_RE.find(section) {
                if let Ok(value) = m.as_str().parse::<f64>() {
                    assessment.experience_relevance = normalize_unit(value);
                }
            }
        }

        if lower.contains("skills assessment") || lower.contains("skills:") {
            for skill in bullet_lines(section) {
                assessment.skills.push(SkillAssessment {
                    skill,
                    score: FALLBACK_SKILL_SCORE,
                    notes: String::new(),
                });
            }
        }

        if lower.contains("strength") {
            assessment.recommendations.extend(bullet_lines(section));
        }

        if lower.contains("areas for improvement") || lower.contains("concern") {
            assessment.red_flags.extend(bullet_lines(section));
        }
    }

    if !score_seen && assessment.skills.is_empty() && assessment.recommendations.is_empty() {
        return Err(AssessmentError::Unrecognized);
    }

    Ok(assessment)
}
