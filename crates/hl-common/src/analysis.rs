//! Prompt construction and the completion-service seam.
//!
//! The actual LLM HTTP client lives outside this crate; callers inject
//! anything implementing [`CompletionService`] (a production backend, a
//! recorded stub in tests). The analyzer only builds prompts, forwards them,
//! and hands the reply to the assessment ingestion boundary.

use std::fmt::Write as _;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::assessment::{Assessment, AssessmentError};
use crate::{Candidate, Vacancy};

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion backend unavailable: {0}")]
    Unavailable(String),
    #[error("completion request failed: {0}")]
    Request(String),
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Completion(#[from] CompletionError),
    #[error(transparent)]
    Assessment(#[from] AssessmentError),
}

/// Chat-completion backend: prompt in, reply text out.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

/// Prompt asking the model to analyze a resume and reply with the
/// structured JSON shape `Assessment::from_model_reply` expects.
pub fn resume_analysis_prompt(resume_text: &str, vacancy: Option<&Vacancy>) -> String {
    let mut prompt = String::from(
        "Analyze this candidate's resume and extract the following information \
         in a structured format.\n\nResume:\n",
    );
    prompt.push_str(resume_text);

    if let Some(vacancy) = vacancy {
        let _ = write!(
            prompt,
            "\n\nTarget position: {}\nRequirements:\n{}",
            vacancy.title,
            vacancy.requirements.join("\n")
        );
    }

    prompt.push_str(
        "\n\nReply with JSON only, in this exact shape:\n\
         {\n\
         \x20 \"personalInfo\": { \"name\": \"...\", \"email\": \"...\", \"phone\": \"...\", \"location\": \"...\" },\n\
         \x20 \"professionalInfo\": { \"yearsOfExperience\": number, \"skills\": [\"...\"], \"currentRole\": \"...\", \"education\": \"...\" },\n\
         \x20 \"analysis\": {\n\
         \x20   \"overallScore\": number (0-100),\n\
         \x20   \"skillsMatch\": [ { \"skill\": \"...\", \"score\": number (0-100), \"notes\": \"...\" } ],\n\
         \x20   \"experienceRelevance\": number (0-100),\n\
         \x20   \"cultureFit\": number (0-100),\n\
         \x20   \"recommendations\": [\"...\"],\n\
         \x20   \"redFlags\": [\"...\"]\n\
         \x20 }\n\
         }\n\
         Do not invent data that is not present in the resume.",
    );

    prompt
}

/// Prompt asking for a narrative fit analysis of one candidate against a
/// vacancy. The reply is free text for display, not ingested as an
/// assessment.
pub fn candidate_fit_prompt(candidate: &Candidate, vacancy: &Vacancy) -> String {
    format!(
        "Analyze this candidate's fit for the position:\n\n\
         Position: {}\nRequirements:\n{}\n\n\
         Candidate:\nName: {}\nExperience: {} years\nSkills: {}\nLocation: {}\n\n\
         Provide a detailed analysis of:\n\
         1. Skills match (%)\n\
         2. Experience relevance\n\
         3. Location compatibility\n\
         4. Overall fit score\n\
         5. Recommendations",
        vacancy.title,
        vacancy.requirements.join("\n"),
        candidate.name,
        candidate.experience,
        candidate.skills.join(", "),
        candidate.location,
    )
}

/// One turn of an interview conversation, as submitted by the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// System prompt framing the model as a technical interviewer for one
/// candidate and vacancy.
pub fn interview_system_prompt(candidate: &Candidate, vacancy: &Vacancy) -> String {
    format!(
        "You are an AI interviewer conducting a technical interview for the {} position.\n\n\
         Candidate profile:\nName: {}\nExperience: {} years\nSkills: {}\n\n\
         Job Requirements:\n{}\n\n\
         Your task:\n\
         1. Assess the candidate's technical skills\n\
         2. Evaluate their experience\n\
         3. Determine culture fit\n\
         4. Ask relevant follow-up questions\n\
         5. Provide constructive feedback\n\n\
         Keep responses professional and concise.",
        vacancy.title,
        candidate.name,
        candidate.experience,
        candidate.skills.join(", "),
        vacancy.requirements.join("\n"),
    )
}

/// Prompt asking for a structured assessment of a finished interview
/// conversation. The reply is a sectioned text report, which the
/// assessment ingestion boundary parses.
pub fn interview_analysis_prompt(vacancy: &Vacancy, conversation: &[ChatMessage]) -> String {
    let mut prompt = format!(
        "Analyze this interview conversation for the {} position.\n\
         Provide a structured assessment of:\n\
         1. Technical competency (0-100)\n\
         2. Communication skills (0-100)\n\
         3. Problem-solving ability (0-100)\n\
         4. Cultural fit (0-100)\n\
         5. Key strengths\n\
         6. Areas for improvement\n\
         7. Recommendation (proceed/review/reject)\n\n\
         Conversation:\n",
        vacancy.title,
    );
    for message in conversation {
        let _ = writeln!(prompt, "{}: {}", message.role, message.content);
    }
    prompt
}

/// Runs resume analysis against an injected completion backend and turns
/// the reply into a typed [`Assessment`].
#[derive(Clone)]
pub struct ResumeAnalyzer {
    service: Arc<dyn CompletionService>,
}

impl ResumeAnalyzer {
    pub fn new(service: Arc<dyn CompletionService>) -> Self {
        Self { service }
    }

    pub async fn analyze_resume(
        &self,
        resume_text: &str,
        vacancy: Option<&Vacancy>,
    ) -> Result<Assessment, AnalysisError> {
        let prompt = resume_analysis_prompt(resume_text, vacancy);
        debug!(prompt_len = prompt.len(), "requesting resume analysis");

        let reply = self.service.complete(&prompt).await?;
        Ok(Assessment::from_model_reply(&reply)?)
    }
}

/// Drives an interview conversation against an injected completion
/// backend: one reply per candidate message, and a typed assessment of
/// the whole transcript at the end.
#[derive(Clone)]
pub struct InterviewSimulator {
    service: Arc<dyn CompletionService>,
}

impl InterviewSimulator {
    pub fn new(service: Arc<dyn CompletionService>) -> Self {
        Self { service }
    }

    /// Interviewer reply to one candidate message. The system framing is
    /// prepended to every turn; the backend is stateless.
    pub async fn reply(
        &self,
        candidate: &Candidate,
        vacancy: &Vacancy,
        message: &str,
    ) -> Result<String, CompletionError> {
        let prompt = format!(
            "{}\n\nCandidate: {}",
            interview_system_prompt(candidate, vacancy),
            message
        );
        debug!(prompt_len = prompt.len(), "requesting interview reply");
        self.service.complete(&prompt).await
    }

    pub async fn analyze(
        &self,
        vacancy: &Vacancy,
        conversation: &[ChatMessage],
    ) -> Result<Assessment, AnalysisError> {
        let prompt = interview_analysis_prompt(vacancy, conversation);
        debug!(
            prompt_len = prompt.len(),
            turns = conversation.len(),
            "requesting interview analysis"
        );

        let reply = self.service.complete(&prompt).await?;
        Ok(Assessment::from_model_reply(&reply)?)
    }
}
