//! Doctor name to identifier resolution shared by the hospital tools.

use thiserror::Error;

use crate::clients::HospitalClient;
use crate::core::error::UpstreamError;
use crate::domain::Doctor;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Doctor '{query}' not found. Available doctors: {}", .candidates.join(", "))]
    NotFound {
        query: String,
        candidates: Vec<String>,
    },
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// First doctor whose name contains `query`, case-insensitively, in list order.
pub fn find_doctor<'a>(doctors: &'a [Doctor], query: &str) -> Option<&'a Doctor> {
    let needle = query.to_lowercase();
    doctors
        .iter()
        .find(|d| d.name.to_lowercase().contains(&needle))
}

#[derive(Clone)]
pub struct DoctorResolver {
    client: HospitalClient,
}

impl DoctorResolver {
    pub fn new(client: HospitalClient) -> Self {
        Self { client }
    }

    /// Fetch the directory and pick the first match. `tool` labels the request.
    pub async fn resolve(&self, tool: &str, query: &str) -> Result<Doctor, ResolveError> {
        let doctors = self.client.list_doctors(tool).await?;
        let Some(doctor) = find_doctor(&doctors, query) else {
            return Err(ResolveError::NotFound {
                query: query.to_string(),
                candidates: doctors.into_iter().map(|d| d.name).collect(),
            });
        };
        let needle = query.to_lowercase();
        let matches = doctors
            .iter()
            .filter(|d| d.name.to_lowercase().contains(&needle))
            .count();
        if matches > 1 {
            tracing::warn!(
                tool,
                query,
                matches,
                chosen = %doctor.name,
                "doctor name is ambiguous; using first match"
            );
        }
        Ok(doctor.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> Vec<Doctor> {
        vec![
            Doctor { id: 1, name: "Dr. Alice Smith".into(), specialty: Some("Cardiology".into()) },
            Doctor { id: 2, name: "Dr. Bob Smithson".into(), specialty: Some("Neurology".into()) },
            Doctor { id: 3, name: "Dr. Carol Jones".into(), specialty: Some("Pediatrics".into()) },
        ]
    }

    #[test]
    fn substring_match_is_case_insensitive_and_first_wins() {
        let doctors = directory();
        assert_eq!(find_doctor(&doctors, "smith").map(|d| d.id), Some(1));
        assert_eq!(find_doctor(&doctors, "SMITHSON").map(|d| d.id), Some(2));
        assert_eq!(find_doctor(&doctors, "dr. carol").map(|d| d.id), Some(3));
    }

    #[test]
    fn no_match_returns_none() {
        assert!(find_doctor(&directory(), "Who").is_none());
        assert!(find_doctor(&[], "Smith").is_none());
    }

    #[test]
    fn not_found_lists_every_candidate() {
        let err = ResolveError::NotFound {
            query: "Who".into(),
            candidates: vec!["Dr. A".into(), "Dr. B".into()],
        };
        assert_eq!(err.to_string(), "Doctor 'Who' not found. Available doctors: Dr. A, Dr. B");
    }
}
