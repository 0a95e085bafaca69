//! In-memory repositories for candidates and vacancies.
//!
//! Explicit stores handed to whoever needs them; nothing reaches into
//! ambient global state, and the ranking engine only ever sees snapshots
//! taken from here. Records live for the process lifetime only.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use ulid::Ulid;

use crate::assessment::Assessment;
use crate::{Candidate, CandidateSource, CandidateStatus, Vacancy, VacancyStatus};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("candidate not found: {0}")]
    CandidateNotFound(String),
    #[error("vacancy not found: {0}")]
    VacancyNotFound(String),
}

/// Fields a caller supplies when creating a candidate; id and timestamps
/// are assigned by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCandidate {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub location: String,
    pub source: CandidateSource,
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub vacancy_id: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: u32,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub status: Option<CandidateStatus>,
    pub vacancy_id: Option<String>,
    pub skills: Option<Vec<String>>,
    pub experience: Option<u32>,
}

#[derive(Debug, Default)]
pub struct CandidateStore {
    inner: RwLock<HashMap<String, Candidate>>,
}

impl CandidateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, new: NewCandidate) -> Candidate {
        let now = Utc::now();
        let candidate = Candidate {
            id: Ulid::new().to_string(),
            name: new.name,
            email: new.email,
            phone: new.phone,
            location: new.location,
            source: new.source,
            resume_url: new.resume_url,
            linkedin_url: new.linkedin_url,
            github_url: new.github_url,
            status: CandidateStatus::New,
            vacancy_id: new.vacancy_id,
            skills: new.skills,
            experience: new.experience,
            assessment: None,
            created_at: now,
            updated_at: now,
        };

        self.write().insert(candidate.id.clone(), candidate.clone());
        candidate
    }

    pub fn get(&self, id: &str) -> Option<Candidate> {
        self.read().get(id).cloned()
    }

    /// All candidates, newest first. ULIDs are time-ordered, so the id is
    /// a stable tie-breaker for records created in the same instant.
    pub fn list(&self) -> Vec<Candidate> {
        let mut all: Vec<Candidate> = self.read().values().cloned().collect();
        all.sort_by(|a, b| b.id.cmp(&a.id));
        all
    }

    pub fn update(&self, id: &str, update: CandidateUpdate) -> Result<Candidate, StoreError> {
        let mut inner = self.write();
        let candidate = inner
            .get_mut(id)
            .ok_or_else(|| StoreError::CandidateNotFound(id.to_string()))?;

        if let Some(name) = update.name {
            candidate.name = name;
        }
        if let Some(email) = update.email {
            candidate.email = email;
        }
        if let Some(phone) = update.phone {
            candidate.phone = Some(phone);
        }
        if let Some(location) = update.location {
            candidate.location = location;
        }
        if let Some(status) = update.status {
            candidate.status = status;
        }
        if let Some(vacancy_id) = update.vacancy_id {
            candidate.vacancy_id = Some(vacancy_id);
        }
        if let Some(skills) = update.skills {
            candidate.skills = skills;
        }
        if let Some(experience) = update.experience {
            candidate.experience = experience;
        }
        candidate.updated_at = Utc::now();

        Ok(candidate.clone())
    }

    /// Attach (or replace) the typed assessment produced at the ingestion
    /// boundary.
    pub fn set_assessment(
        &self,
        id: &str,
        assessment: Assessment,
    ) -> Result<Candidate, StoreError> {
        let mut inner = self.write();
        let candidate = inner
            .get_mut(id)
            .ok_or_else(|| StoreError::CandidateNotFound(id.to_string()))?;

        candidate.assessment = Some(assessment);
        candidate.updated_at = Utc::now();
        Ok(candidate.clone())
    }

    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.write()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::CandidateNotFound(id.to_string()))
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Candidate>> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Candidate>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewVacancy {
    pub title: String,
    pub department: String,
    pub location: String,
    pub employment_type: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VacancyUpdate {
    pub title: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<String>,
    pub salary: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub status: Option<VacancyStatus>,
}

#[derive(Debug, Default)]
pub struct VacancyStore {
    inner: RwLock<HashMap<String, Vacancy>>,
}

impl VacancyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, new: NewVacancy) -> Vacancy {
        let vacancy = Vacancy {
            id: Ulid::new().to_string(),
            title: new.title,
            department: new.department,
            location: new.location,
            employment_type: new.employment_type,
            salary: new.salary,
            description: new.description,
            requirements: new.requirements,
            applicants: 0,
            status: VacancyStatus::Active,
            posted_at: Utc::now(),
        };

        self.write().insert(vacancy.id.clone(), vacancy.clone());
        vacancy
    }

    pub fn get(&self, id: &str) -> Option<Vacancy> {
        self.read().get(id).cloned()
    }

    pub fn list(&self) -> Vec<Vacancy> {
        let mut all: Vec<Vacancy> = self.read().values().cloned().collect();
        all.sort_by(|a, b| b.id.cmp(&a.id));
        all
    }

    pub fn update(&self, id: &str, update: VacancyUpdate) -> Result<Vacancy, StoreError> {
        let mut inner = self.write();
        let vacancy = inner
            .get_mut(id)
            .ok_or_else(|| StoreError::VacancyNotFound(id.to_string()))?;

        if let Some(title) = update.title {
            vacancy.title = title;
        }
        if let Some(department) = update.department {
            vacancy.department = department;
        }
        if let Some(location) = update.location {
            vacancy.location = location;
        }
        if let Some(employment_type) = update.employment_type {
            vacancy.employment_type = employment_type;
        }
        if let Some(salary) = update.salary {
            vacancy.salary = salary;
        }
        if let Some(description) = update.description {
            vacancy.description = description;
        }
        if let Some(requirements) = update.requirements {
            vacancy.requirements = requirements;
        }
        if let Some(status) = update.status {
            vacancy.status = status;
        }

        Ok(vacancy.clone())
    }

    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.write()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::VacancyNotFound(id.to_string()))
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Vacancy>> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Vacancy>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_candidate(name: &str) -> NewCandidate {
        NewCandidate {
            name: name.into(),
            email: format!("{name}@example.com"),
            phone: None,
            location: "Remote".into(),
            source: CandidateSource::Referral,
            resume_url: None,
            linkedin_url: None,
            github_url: None,
            vacancy_id: None,
            skills: vec!["Rust".into()],
            experience: 3,
        }
    }

    #[test]
    fn insert_assigns_id_status_and_timestamps() {
        let store = CandidateStore::new();
        let candidate = store.insert(new_candidate("ada"));

        assert_eq!(candidate.id.len(), 26); // ULID
        assert_eq!(candidate.status, CandidateStatus::New);
        assert_eq!(store.get(&candidate.id), Some(candidate));
    }

    #[test]
    fn update_touches_only_given_fields() {
        let store = CandidateStore::new();
        let created = store.insert(new_candidate("ada"));

        let updated = store
            .update(
                &created.id,
                CandidateUpdate {
                    status: Some(CandidateStatus::Screening),
                    experience: Some(7),
                    ..CandidateUpdate::default()
                },
            )
            .unwrap();

        assert_eq!(updated.status, CandidateStatus::Screening);
        assert_eq!(updated.experience, 7);
        assert_eq!(updated.name, "ada");
        assert!(updated.updated_at >= created.updated_at);
    }

    #[test]
    fn set_assessment_attaches_typed_record() {
        let store = CandidateStore::new();
        let created = store.insert(new_candidate("ada"));
        assert!(created.assessment.is_none());

        let updated = store
            .set_assessment(
                &created.id,
                Assessment {
                    score: 0.9,
                    ..Assessment::default()
                },
            )
            .unwrap();
        assert_eq!(updated.assessment.unwrap().score, 0.9);
    }

    #[test]
    fn missing_ids_surface_not_found() {
        let store = CandidateStore::new();
        assert!(matches!(
            store.update("nope", CandidateUpdate::default()),
            Err(StoreError::CandidateNotFound(_))
        ));
        assert!(matches!(
            store.delete("nope"),
            Err(StoreError::CandidateNotFound(_))
        ));
    }

    #[test]
    fn list_returns_newest_first() {
        let store = VacancyStore::new();
        let first = store.insert(NewVacancy {
            title: "Backend Engineer".into(),
            department: "Engineering".into(),
            location: "Remote".into(),
            employment_type: "Full-time".into(),
            salary: String::new(),
            description: String::new(),
            requirements: vec![],
        });
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = store.insert(NewVacancy {
            title: "Product Manager".into(),
            department: "Product".into(),
            location: "Remote".into(),
            employment_type: "Full-time".into(),
            salary: String::new(),
            description: String::new(),
            requirements: vec![],
        });

        let listed = store.list();
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
    }
}
