// Prompt templates for the completion provider.
// Placeholders use `{name}` and are filled with `str::replace`.

/// CV structuring prompt. The key names are consumed by the dossier editor
/// and the export worker, so they must stay exactly as written.
pub const CV_STRUCTURING_PROMPT: &str = r#"Analyse le dictionnaire JSON issu de l'extraction de CV fourni en entrée et extrais toutes les informations pertinentes sous la forme d'un dictionnaire structuré, enregistrable en JSON, selon le modèle suivant :

NE MODIFIE SURTOUT PAS LES CLÉS DE CE DICTIONNAIRE, ELLES SONT UTILISÉES PAR LA SUITE.

{
  "prenom": "",
  "age": "Si l'âge n'est pas explicite, l'estimer à partir de la date de naissance si elle est disponible.",
  "poste": "",
  "diplome": "Formation principale (école d'ingénieur, de commerce ou M2)",
  "expérience": "Ne compter que les expériences pertinentes, en cumulant leurs durées.",
  "mobilité": "Zone géographique recherchée si elle est précisée.",
  "disponibilité": "",
  "permis_B": "",
  "hobbies": ["Liste des centres d'intérêt"],
  "formations": [
    {
      "date_debut": "",
      "date_fin": "",
      "diplome": "",
      "ecole_cursus": ""
    }
  ],
  "expériences": [
    {
      "entreprise": "",
      "durée": "",
      "poste": "",
      "contexte": "Résumer l'expérience en une phrase présentant le projet réalisé.",
      "projet": "Développer autant que possible les objectifs et projets de cette expérience, sous forme de titre, sans faire apparaître le nom du candidat.",
      "logiciels": [""],
      "réalisations": ["Missions réalisées, reformulées avec un maximum de détails."],
      "AI_suggest": ["Éléments pertinents déductibles mais absents du CV, propres à chaque expérience et sans redondance. Ne pas en ajouter systématiquement."]
    }
  ],
  "logiciels": [
    {
      "logiciel": "",
      "level": "Niveau estimé parmi : Débutant, Intermédiaire, Avancé, Expert.",
      "temps_utilisation": "Durée d'utilisation estimée en mois."
    }
  ]
}

NB : Ne fais pas apparaître le type de contrat (Stage, Alternance, CDI, CDD...) dans les expériences.

Ajoute autant d'informations que possible en analysant le CV et en déduisant les éléments implicites, comme le ferait un expert RH.

La sortie doit respecter EXACTEMENT le modèle ci-dessus. Si une information est absente et ne peut pas être estimée, laisse le champ vide (chaîne vide "").

Voici le JSON d'extraction à analyser :

{extraction_json}

Réponds UNIQUEMENT avec le JSON structuré, sans texte avant ou après.
"#;

pub const PRESENTATION_EMAIL_SYSTEM: &str = "Tu es un expert en recrutement et en rédaction d'emails professionnels. \
    Tu écris des emails de présentation de candidats destinés aux entreprises.";

pub const PRESENTATION_EMAIL_PROMPT: &str = r#"Tu dois écrire un email professionnel pour présenter un candidat à des entreprises.

**DONNÉES DU CANDIDAT :**
{candidate_data}

**BESOIN DE L'ENTREPRISE (si fourni) :**
{need}

**INSTRUCTIONS :**
1. Écris un email professionnel et engageant qui met en avant les points forts du candidat
2. Si un besoin est fourni, identifie et souligne les points communs entre le profil du candidat et les exigences du poste
3. Structure l'email avec :
   - Un objet percutant
   - Une introduction personnalisée
   - Les compétences clés du candidat
   - Les expériences pertinentes
   - Les points de correspondance avec le besoin (si applicable)
   - Une conclusion qui incite à l'action
4. Sois précis et appuie-toi sur des réalisations concrètes du candidat
5. Adapte le ton au niveau d'expérience et au secteur

**FORMAT DE SORTIE :**
Commence directement par "Objet: [objet de l'email]" suivi du contenu de l'email.
"#;
