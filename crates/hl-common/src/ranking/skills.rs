use crate::assessment::SkillAssessment;

/// Average assessed score over the requirements that matched any skill.
///
/// A requirement matches the first skill whose name contains the whole
/// requirement line as a case-insensitive substring; requirements that
/// never literally appear inside a skill name ("5+ years React
/// experience") match nothing. Zero matches yield 0.0.
pub fn skills_match_score(skills: &[SkillAssessment], requirements: &[String]) -> f64 {
    let mut total = 0.0;
    let mut matched = 0u32;

    for requirement in requirements {
        let needle = requirement.to_lowercase();
        if let Some(hit) = skills
            .iter()
            .find(|entry| entry.skill.to_lowercase().contains(&needle))
        {
            total += hit.score;
            matched += 1;
        }
    }

    if matched > 0 {
        total / matched as f64
    } else {
        0.0
    }
}
