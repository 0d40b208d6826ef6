//! Marketing claim detection
//!
//! A claim is active when any of its keywords occurs in the page corpus:
//! visible text, raw ingredient text and image metadata (alt, title, src).

use serde::{Deserialize, Serialize};

/// Column key, human label and lowercase keyword substrings of one claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimDefinition {
    pub key: String,
    pub label: String,
    pub keywords: Vec<String>,
}

impl ClaimDefinition {
    pub fn new(key: &str, label: &str, keywords: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// `corpus` must already be lowercase.
    pub fn is_active(&self, corpus: &str) -> bool {
        self.keywords
            .iter()
            .any(|kw| !kw.is_empty() && corpus.contains(&kw.to_lowercase()))
    }
}

/// Claim flags in configuration order plus the sorted label summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimReport {
    pub flags: Vec<(String, bool)>,
    pub summary: String,
}

impl ClaimReport {
    pub fn is_active(&self, key: &str) -> bool {
        self.flags.iter().any(|(k, active)| k == key && *active)
    }
}

/// The claim table used when no configuration overrides it.
pub fn default_claims() -> Vec<ClaimDefinition> {
    vec![
        ClaimDefinition::new(
            "claim_sem_sulfato",
            "Sem sulfato",
            &["sem sulfato", "sem sulfatos", "sem sal", "sulfate free", "sulfate-free"],
        ),
        ClaimDefinition::new(
            "claim_sem_parabenos",
            "Sem parabenos",
            &[
                "sem parabenos",
                "sem parabeno",
                "livre de parabenos",
                "paraben free",
                "paraben-free",
            ],
        ),
        ClaimDefinition::new("claim_vegano", "Vegano", &["vegano", "vegana", "vegan"]),
        ClaimDefinition::new("claim_organico", "Orgânico", &["orgânico", "organico", "organic"]),
        ClaimDefinition::new(
            "claim_natural",
            "Natural",
            &["natural", "ingredientes naturais", "origem natural"],
        ),
        ClaimDefinition::new(
            "claim_hipoalergenico",
            "Hipoalergênico",
            &["hipoalergênico", "hipoalergenico"],
        ),
        ClaimDefinition::new("claim_peta", "PETA", &["peta"]),
        ClaimDefinition::new(
            "claim_cruelty_free",
            "Cruelty-free",
            &[
                "cruelty free",
                "cruelty-free",
                "não testado em animais",
                "nao testado em animais",
            ],
        ),
        ClaimDefinition::new(
            "claim_fragrance_free",
            "Fragrance-free",
            &["fragrance free", "sem fragrância", "sem fragrancia", "sem perfume"],
        ),
        ClaimDefinition::new(
            "claim_silicone_free",
            "Silicone-free",
            &["silicone free", "sem silicone", "livre de silicones"],
        ),
        ClaimDefinition::new(
            "claim_oftalmologicamente_testado",
            "Oftalmologicamente testado",
            &["oftalmologicamente testado"],
        ),
        ClaimDefinition::new(
            "claim_dermatologicamente_testado",
            "Dermatologicamente testado",
            &["dermatologicamente testado"],
        ),
        ClaimDefinition::new(
            "claim_filtro_uv",
            "Filtro UV",
            &[
                "filtro uv",
                "proteção uv",
                "protecao uv",
                "protetor solar para cabelos",
                "proteção solar",
                "protecao solar",
                "uva/uvb",
            ],
        ),
        ClaimDefinition::new(
            "claim_protecao_termica",
            "Proteção térmica",
            &[
                "proteção térmica",
                "protecao termica",
                "protetor térmico",
                "protetor termico",
                "thermal protection",
            ],
        ),
        ClaimDefinition::new("claim_low_poo", "Low Poo", &["low poo", "low-poo"]),
        ClaimDefinition::new("claim_no_poo", "No Poo", &["no poo", "no-poo"]),
    ]
}

/// Lowercase corpus: page text, then one line per image metadata value.
pub fn build_corpus<S: AsRef<str>>(page_text: &str, image_metadata: &[S]) -> String {
    let mut corpus = page_text.to_lowercase();
    corpus.push('\n');
    let bits: Vec<String> = image_metadata
        .iter()
        .map(|bit| bit.as_ref().to_lowercase())
        .collect();
    corpus.push_str(&bits.join("\n"));
    corpus
}

pub fn detect_claims(claims: &[ClaimDefinition], corpus: &str) -> ClaimReport {
    let corpus = corpus.to_lowercase();
    let mut active_labels = Vec::new();

    let flags = claims
        .iter()
        .map(|claim| {
            let active = claim.is_active(&corpus);
            if active {
                active_labels.push(claim.label.clone());
            }
            (claim.key.clone(), active)
        })
        .collect();

    active_labels.sort();

    ClaimReport {
        flags,
        summary: active_labels.join(", "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::image_metadata;
    use scraper::Html;

    #[test]
    fn test_detect_claims_case_insensitive() {
        let report = detect_claims(&default_claims(), "Fórmula VEGANA e Sem Sulfato");

        assert!(report.is_active("claim_vegano"));
        assert!(report.is_active("claim_sem_sulfato"));
        assert!(!report.is_active("claim_peta"));
        assert_eq!(report.summary, "Sem sulfato, Vegano");
    }

    #[test]
    fn test_claim_only_in_image_alt() {
        let html = r#"
        <html><body>
            <p>Shampoo para todos os tipos de cabelo.</p>
            <img src="/img/frasco.jpg" alt="Selo Cruelty Free">
        </body></html>
        "#;
        let document = Html::parse_document(html);
        let corpus = build_corpus("Shampoo para todos os tipos de cabelo.", &image_metadata(&document));

        let report = detect_claims(&default_claims(), &corpus);
        assert!(report.is_active("claim_cruelty_free"));
        assert_eq!(report.summary, "Cruelty-free");
    }

    #[test]
    fn test_claim_in_image_src() {
        let corpus = build_corpus("", &["https://cdn.example.com/selo-low-poo.png"]);
        let report = detect_claims(&default_claims(), &corpus);
        assert!(report.is_active("claim_low_poo"));
    }

    #[test]
    fn test_no_claims() {
        let report = detect_claims(&default_claims(), "apenas um texto qualquer");
        assert_eq!(report.flags.len(), default_claims().len());
        assert!(report.flags.iter().all(|(_, active)| !active));
        assert_eq!(report.summary, "");
    }

    #[test]
    fn test_custom_claim_table() {
        let claims = vec![ClaimDefinition::new("claim_curly", "Curly", &["CACHOS"])];
        let report = detect_claims(&claims, "Ativador de cachos");
        assert_eq!(report.flags, vec![("claim_curly".to_string(), true)]);
        assert_eq!(report.summary, "Curly");
    }
}
