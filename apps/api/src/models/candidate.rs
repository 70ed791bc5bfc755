use serde::{Deserialize, Serialize};

use crate::models::dossier::{Experience, Formation, Logiciel};

/// Candidate profile as edited in the front-end, used for presentation emails.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateData {
    pub title: String,
    pub experience_years: i64,
    pub prenom: String,
    pub age: i64,
    pub languages: String,
    pub mobility: String,
    pub availability: String,
    pub permis_b: String,
    pub formations: Vec<Formation>,
    pub experiences: Vec<Experience>,
    pub logiciels: Vec<Logiciel>,
    pub hobbies: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_candidate_data_deserializes() {
        let data: CandidateData =
            serde_json::from_str(r#"{"title": "Data Engineer", "experience_years": 6}"#).unwrap();
        assert_eq!(data.title, "Data Engineer");
        assert_eq!(data.experience_years, 6);
        assert_eq!(data.age, 0);
        assert!(data.experiences.is_empty());
    }
}
