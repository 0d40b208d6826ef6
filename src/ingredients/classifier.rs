//! Hair-care schedule (H/N/R) classification and fine-hair scoring.

use serde::Serialize;

use super::knowledge::{
    matches_any, AMINO_ACIDS, HUMECTANTS, OILS_HEAVY, OILS_LIGHT, PROTEINS, SILICONES_HEAVY,
    SILICONES_VOLATILE,
};
use super::IngredientList;

/// Positions that take part in scoring
pub const SCORED_POSITIONS: usize = 10;

/// Two axes closer than this are reported together, e.g. "H+N"
const MIX_MARGIN: f64 = 0.15;

pub const UNDEFINED_PHASE: &str = "Undefined";

/// Linear decay from 1.0 at position 0 to 0.0 at position 10.
pub fn position_weight(position: usize) -> f64 {
    (1.0 - 0.1 * position as f64).max(0.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScheduleAxis {
    Hydration,
    Nutrition,
    Reconstruction,
}

impl ScheduleAxis {
    /// Declared order; also the tie-break order between equal scores.
    pub const ALL: [ScheduleAxis; 3] = [
        ScheduleAxis::Hydration,
        ScheduleAxis::Nutrition,
        ScheduleAxis::Reconstruction,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ScheduleAxis::Hydration => "H",
            ScheduleAxis::Nutrition => "N",
            ScheduleAxis::Reconstruction => "R",
        }
    }

    fn matches(self, ingredient: &str) -> bool {
        match self {
            ScheduleAxis::Hydration => HUMECTANTS.matches(ingredient),
            ScheduleAxis::Nutrition => matches_any(&[&OILS_LIGHT, &OILS_HEAVY], ingredient),
            ScheduleAxis::Reconstruction => matches_any(&[&PROTEINS, &AMINO_ACIDS], ingredient),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScheduleScores {
    pub hydration: f64,
    pub nutrition: f64,
    pub reconstruction: f64,
}

impl ScheduleScores {
    pub fn get(&self, axis: ScheduleAxis) -> f64 {
        match axis {
            ScheduleAxis::Hydration => self.hydration,
            ScheduleAxis::Nutrition => self.nutrition,
            ScheduleAxis::Reconstruction => self.reconstruction,
        }
    }

    fn add(&mut self, axis: ScheduleAxis, weight: f64) {
        match axis {
            ScheduleAxis::Hydration => self.hydration += weight,
            ScheduleAxis::Nutrition => self.nutrition += weight,
            ScheduleAxis::Reconstruction => self.reconstruction += weight,
        }
    }

    fn total(&self) -> f64 {
        self.hydration + self.nutrition + self.reconstruction
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleClassification {
    /// "H", "N", "R", a mix such as "H+R", or "Undefined"
    pub phase: String,
    /// Normalized by the total, two decimals
    pub scores: ScheduleScores,
}

/// Weighted H/N/R credit over the scored prefix. A single ingredient may
/// credit several axes.
pub fn classify_schedule(ingredients: &IngredientList) -> ScheduleClassification {
    let mut raw = ScheduleScores::default();
    for (weight, ingredient) in ingredients.weighted() {
        for axis in ScheduleAxis::ALL {
            if axis.matches(ingredient) {
                raw.add(axis, weight);
            }
        }
    }

    let total = raw.total();
    if total <= 0.0 {
        return ScheduleClassification {
            phase: UNDEFINED_PHASE.to_string(),
            scores: ScheduleScores::default(),
        };
    }

    let scores = ScheduleScores {
        hydration: round2(raw.hydration / total),
        nutrition: round2(raw.nutrition / total),
        reconstruction: round2(raw.reconstruction / total),
    };

    // Stable sort keeps the declared axis order between equal scores.
    let mut ranked = ScheduleAxis::ALL;
    ranked.sort_by(|a, b| scores.get(*b).total_cmp(&scores.get(*a)));

    let (top, second) = (ranked[0], ranked[1]);
    let phase = if round2(scores.get(top) - scores.get(second)) < MIX_MARGIN {
        format!("{}+{}", top.label(), second.label())
    } else {
        top.label().to_string()
    };

    ScheduleClassification { phase, scores }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FineHairLabel {
    Yes,
    Maybe,
    No,
}

impl FineHairLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            FineHairLabel::Yes => "Yes",
            FineHairLabel::Maybe => "Maybe",
            FineHairLabel::No => "No",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FineHairAssessment {
    /// Two decimals
    pub score: f64,
    pub label: FineHairLabel,
}

/// Suitability for fine hair: light oils, humectants, proteins and volatile
/// silicones help, heavy oils and silicones weigh hair down.
pub fn score_fine_hair(ingredients: &IngredientList, product_category: &str) -> FineHairAssessment {
    let mut heavy = 0u32;
    let mut light = 0u32;
    let mut humectant = 0u32;
    let mut protein = 0u32;
    let mut volatile = 0u32;

    for ingredient in ingredients.as_slice().iter().take(SCORED_POSITIONS) {
        if matches_any(&[&OILS_HEAVY, &SILICONES_HEAVY], ingredient) {
            heavy += 1;
        }
        if OILS_LIGHT.matches(ingredient) {
            light += 1;
        }
        if HUMECTANTS.matches(ingredient) {
            humectant += 1;
        }
        if matches_any(&[&PROTEINS, &AMINO_ACIDS], ingredient) {
            protein += 1;
        }
        if SILICONES_VOLATILE.matches(ingredient) {
            volatile += 1;
        }
    }

    let mut score = 0.8 * f64::from(light)
        + 0.6 * f64::from(humectant)
        + 0.7 * f64::from(protein)
        + 0.5 * f64::from(volatile)
        - 1.2 * f64::from(heavy);

    let category = product_category.to_lowercase();
    if ["mask", "máscara", "mascara"].iter().any(|m| category.contains(m)) {
        score -= 0.5;
    }
    if category.contains("spray") {
        score += 0.5;
    }
    if category.contains("leave-in") {
        score += 0.2;
    }

    let label = if score >= 2.0 {
        FineHairLabel::Yes
    } else if score >= 0.5 {
        FineHairLabel::Maybe
    } else {
        FineHairLabel::No
    };

    FineHairAssessment {
        score: round2(score),
        label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn list(items: &[&str]) -> IngredientList {
        items.iter().copied().collect()
    }

    #[test]
    fn test_no_matches_is_undefined() {
        let result = classify_schedule(&list(&["aqua", "cetearyl alcohol", "parfum"]));
        assert_eq!(result.phase, "Undefined");
        assert_eq!(result.scores, ScheduleScores::default());
    }

    #[test]
    fn test_empty_list_is_undefined() {
        let result = classify_schedule(&IngredientList::default());
        assert_eq!(result.phase, UNDEFINED_PHASE);
    }

    #[test]
    fn test_one_ingredient_per_axis() {
        let result = classify_schedule(&list(&["glycerin", "argania spinosa kernel oil", "keratin"]));
        // 1.0 + 0.9 + 0.8 = 2.7
        assert_eq!(result.scores.hydration, 0.37);
        assert_eq!(result.scores.nutrition, 0.33);
        assert_eq!(result.scores.reconstruction, 0.3);
        assert_eq!(result.phase, "H+N");
    }

    #[test]
    fn test_silicone_gives_no_nutrition_credit() {
        let result = classify_schedule(&list(&["glycerin", "dimethicone", "keratin"]));
        let s = result.scores;
        assert_eq!(s.nutrition, 0.0);
        assert!((s.hydration + s.nutrition + s.reconstruction - 1.0).abs() < 0.011);
        assert_eq!(result.phase, "H+R");
    }

    #[test]
    fn test_dominant_axis() {
        let result = classify_schedule(&list(&[
            "aqua",
            "cocos nucifera oil",
            "butyrospermum parkii butter",
            "glycerin",
        ]));
        // N: 0.9 + 0.8, H: 0.7
        assert_eq!(result.phase, "N");
        assert_eq!(result.scores.nutrition, 0.71);
        assert_eq!(result.scores.hydration, 0.29);
    }

    #[test]
    fn test_exact_tie_uses_declared_order() {
        // "bamboo extract" credits both H (extract) and R (bamboo extract)
        let result = classify_schedule(&list(&["bamboo extract"]));
        assert_eq!(result.scores.hydration, 0.5);
        assert_eq!(result.scores.reconstruction, 0.5);
        assert_eq!(result.phase, "H+R");
    }

    #[test]
    fn test_positions_beyond_ten_ignored() {
        let mut items = vec!["aqua"; 10];
        items.push("keratin");
        let result = classify_schedule(&list(&items));
        assert_eq!(result.phase, UNDEFINED_PHASE);
    }

    #[test]
    fn test_fine_hair_light_formula() {
        let result = score_fine_hair(
            &list(&["aqua", "glycerin", "argan oil", "hydrolyzed keratin"]),
            "Spray",
        );
        // 0.6 + 0.8 + 0.7 + 0.5
        assert_eq!(result.score, 2.6);
        assert_eq!(result.label, FineHairLabel::Yes);
    }

    #[test]
    fn test_fine_hair_heavy_mask() {
        let result = score_fine_hair(
            &list(&["aqua", "petrolatum", "shea butter", "dimethicone"]),
            "Mask",
        );
        assert_eq!(result.score, -4.1);
        assert_eq!(result.label, FineHairLabel::No);
    }

    #[test]
    fn test_fine_hair_maybe() {
        let result = score_fine_hair(&list(&["aqua", "panthenol"]), "Leave-in");
        assert_eq!(result.score, 0.8);
        assert_eq!(result.label, FineHairLabel::Maybe);
    }

    const FILLERS: &[&str] = &["aqua", "cetearyl alcohol", "parfum", "citric acid"];

    proptest! {
        #[test]
        fn prop_fine_hair_non_increasing_in_heavy(
            fillers in prop::collection::vec(prop::sample::select(FILLERS), 0..5),
            heavy in 0usize..4,
        ) {
            let mut base: Vec<&str> = fillers.clone();
            base.extend(std::iter::repeat("coconut oil").take(heavy));
            let mut more = base.clone();
            more.push("coconut oil");

            let before = score_fine_hair(&list(&base), "Shampoo").score;
            let after = score_fine_hair(&list(&more), "Shampoo").score;
            prop_assert!(after <= before);
        }

        #[test]
        fn prop_fine_hair_non_decreasing_in_light(
            fillers in prop::collection::vec(prop::sample::select(FILLERS), 0..5),
            light in 0usize..4,
        ) {
            let mut base: Vec<&str> = fillers.clone();
            base.extend(std::iter::repeat("jojoba").take(light));
            let mut more = base.clone();
            more.push("jojoba");

            let before = score_fine_hair(&list(&base), "Shampoo").score;
            let after = score_fine_hair(&list(&more), "Shampoo").score;
            prop_assert!(after >= before);
        }

        #[test]
        fn prop_semicolons_and_case_do_not_matter(
            tokens in prop::collection::vec("[a-z]{1,8}( [a-z]{1,8})?", 1..8),
        ) {
            let upper: Vec<String> = tokens.iter().map(|t| t.to_uppercase()).collect();
            let semicolon = IngredientList::parse(&upper.join("; "));
            let comma = IngredientList::parse(&tokens.join(", "));
            prop_assert_eq!(semicolon, comma);
        }
    }
}
