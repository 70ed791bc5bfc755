use serde::{Deserialize, Deserializer, Serialize};

/// Deserializes `null` the same way as an absent field: to the type's default.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Formation {
    #[serde(default, deserialize_with = "nullable")]
    pub date_debut: String,
    #[serde(default, deserialize_with = "nullable")]
    pub date_fin: String,
    #[serde(default, deserialize_with = "nullable")]
    pub diplome: String,
    #[serde(default, deserialize_with = "nullable")]
    pub ecole_cursus: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    #[serde(default, deserialize_with = "nullable")]
    pub entreprise: String,
    #[serde(rename = "durée", default, deserialize_with = "nullable")]
    pub duree: String,
    #[serde(default, deserialize_with = "nullable")]
    pub poste: String,
    #[serde(default, deserialize_with = "nullable")]
    pub contexte: String,
    #[serde(default, deserialize_with = "nullable")]
    pub projet: String,
    #[serde(default, deserialize_with = "nullable")]
    pub logiciels: Vec<String>,
    #[serde(rename = "réalisations", default, deserialize_with = "nullable")]
    pub realisations: Vec<String>,
    #[serde(rename = "AI_suggest", default, deserialize_with = "nullable")]
    pub ai_suggest: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Logiciel {
    #[serde(default, deserialize_with = "nullable")]
    pub logiciel: String,
    #[serde(default, deserialize_with = "nullable")]
    pub level: String,
    #[serde(default, deserialize_with = "nullable")]
    pub temps_utilisation: String,
}

/// Structured competence portfolio built from a CV.
///
/// Every field is optional on input: missing or `null` values become empty
/// strings and lists, so a partial dossier always deserializes. Unknown keys
/// are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompetenceDossier {
    #[serde(default, deserialize_with = "nullable")]
    pub prenom: String,
    #[serde(default, deserialize_with = "nullable")]
    pub age: String,
    #[serde(default, deserialize_with = "nullable")]
    pub poste: String,
    #[serde(default, deserialize_with = "nullable")]
    pub diplome: String,
    #[serde(rename = "expérience", default, deserialize_with = "nullable")]
    pub experience: String,
    #[serde(rename = "mobilité", default, deserialize_with = "nullable")]
    pub mobilite: String,
    #[serde(rename = "disponibilité", default, deserialize_with = "nullable")]
    pub disponibilite: String,
    #[serde(rename = "permis_B", default, deserialize_with = "nullable")]
    pub permis_b: String,
    #[serde(default, deserialize_with = "nullable")]
    pub hobbies: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub formations: Vec<Formation>,
    #[serde(rename = "expériences", default, deserialize_with = "nullable")]
    pub experiences: Vec<Experience>,
    #[serde(default, deserialize_with = "nullable")]
    pub logiciels: Vec<Logiciel>,
}

impl CompetenceDossier {
    /// Sanitizes a loosely-typed dossier by round-tripping it through the
    /// typed structure. Fails only when a present value has the wrong JSON type.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_object_gives_zero_values() {
        let dossier = CompetenceDossier::from_value(json!({})).unwrap();
        assert_eq!(dossier, CompetenceDossier::default());
        assert_eq!(dossier.prenom, "");
        assert!(dossier.experiences.is_empty());
    }

    #[test]
    fn test_missing_nested_fields_resolve_to_defaults() {
        let dossier = CompetenceDossier::from_value(json!({
            "prenom": "Léa",
            "expériences": [{"entreprise": "Airbus"}],
            "formations": [{"diplome": "MSc"}],
            "logiciels": [{"logiciel": "CATIA"}]
        }))
        .unwrap();

        assert_eq!(dossier.prenom, "Léa");
        assert_eq!(dossier.experiences[0].entreprise, "Airbus");
        assert_eq!(dossier.experiences[0].duree, "");
        assert!(dossier.experiences[0].realisations.is_empty());
        assert!(dossier.experiences[0].ai_suggest.is_empty());
        assert_eq!(dossier.formations[0].ecole_cursus, "");
        assert_eq!(dossier.logiciels[0].level, "");
    }

    #[test]
    fn test_null_values_resolve_to_defaults() {
        let dossier = CompetenceDossier::from_value(json!({
            "age": null,
            "hobbies": null,
            "expériences": [{"logiciels": null, "poste": null}]
        }))
        .unwrap();
        assert_eq!(dossier.age, "");
        assert!(dossier.hobbies.is_empty());
        assert!(dossier.experiences[0].logiciels.is_empty());
    }

    #[test]
    fn test_unknown_keys_are_dropped() {
        let dossier = CompetenceDossier::from_value(json!({
            "prenom": "Tom",
            "couleur_preferee": "bleu"
        }))
        .unwrap();
        let out = serde_json::to_value(&dossier).unwrap();
        assert!(out.get("couleur_preferee").is_none());
        assert_eq!(out["prenom"], "Tom");
    }

    #[test]
    fn test_serializes_with_accented_keys() {
        let out = serde_json::to_value(CompetenceDossier::default()).unwrap();
        for key in ["expérience", "mobilité", "disponibilité", "permis_B", "expériences"] {
            assert!(out.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(out["expériences"], json!([]));
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        assert!(CompetenceDossier::from_value(json!({"hobbies": "lecture"})).is_err());
    }
}
