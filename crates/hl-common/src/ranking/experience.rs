use once_cell::sync::Lazy;
use regex::Regex;

// "5 years", "3-5 years", "5+ years" inside a free-text requirement line.
static YEARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)(?:-(\d+))?\s*\+?\s*years?").unwrap());

/// Fallback when no requirement line carries a parsable year range.
pub const DEFAULT_RANGE: ExperienceRange = ExperienceRange { min: 2, max: 8 };

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExperienceRange {
    pub min: u32,
    pub max: u32,
}

/// Scan requirement lines in order and take the first year pattern found.
/// A single bound ("5+ years") widens to `min..=min+6`.
pub fn extract_experience_range(requirements: &[String]) -> Option<ExperienceRange> {
    for requirement in requirements {
        let Some(caps) = YEARS_RE.captures(requirement) else {
            continue;
        };
        let Ok(min) = caps[1].parse::<u32>() else {
            continue;
        };
        let max = caps
            .get(2)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or_else(|| min.saturating_add(6));
        return Some(ExperienceRange { min, max });
    }
    None
}

/// Score declared experience against the target range.
///
/// Under-qualification is penalized linearly (a zero-experience candidate
/// scores 0), being in range scores 1.0, and over-qualification decays
/// mildly with a floor of 0.8.
pub fn experience_score(years: u32, range: ExperienceRange) -> f64 {
    let years = years as f64;
    let min = range.min as f64;
    let max = range.max as f64;

    if years < min {
        (years / min * 0.7).max(0.0)
    } else if years <= max {
        1.0
    } else {
        (1.0 - (years - max) / 10.0).max(0.8)
    }
}
