//! Ingredient categories used by the classifier.
//!
//! Membership is substring containment: "hydrolyzed keratin" belongs to
//! PROTEINS because it contains "keratin".

/// Named set of lowercase substrings
#[derive(Debug, Clone, Copy)]
pub struct CategorySet {
    pub name: &'static str,
    pub terms: &'static [&'static str],
}

impl CategorySet {
    /// `ingredient` is expected lowercase, as produced by `IngredientList::parse`.
    pub fn matches(&self, ingredient: &str) -> bool {
        self.terms.iter().any(|term| ingredient.contains(term))
    }
}

/// True when any of `sets` matches the ingredient.
pub fn matches_any(sets: &[&CategorySet], ingredient: &str) -> bool {
    sets.iter().any(|set| set.matches(ingredient))
}

pub const HUMECTANTS: CategorySet = CategorySet {
    name: "humectants",
    terms: &[
        "glycerin",
        "glicerina",
        "propylenglycol",
        "propylene glycol",
        "sodium pca",
        "sodium lactate",
        "panthenol",
        "d-panthenol",
        "aloe barbadensis leaf juice",
        "aloe vera",
        "babosa",
        "hyaluronic acid",
        "sodium hyaluronate",
        "acido hialuronico",
        "extract",
        "extrato",
    ],
};

pub const OILS_LIGHT: CategorySet = CategorySet {
    name: "light oils",
    terms: &[
        "argania spinosa kernel oil",
        "argan",
        "simmondsia chinensis seed oil",
        "jojoba",
        "vitis vinifera seed oil",
        "semente de uva",
        "macadamia integrifolia seed oil",
        "macadamia",
        "helianthus annuus seed oil",
        "girassol",
        "prunus amygdalus dulcis oil",
        "amendoas doces",
        "amêndoas doces",
    ],
};

pub const OILS_HEAVY: CategorySet = CategorySet {
    name: "heavy oils",
    terms: &[
        "cocos nucifera oil",
        "coconut oil",
        "oleo de coco",
        "óleo de coco",
        "ricinus communis seed oil",
        "castor oil",
        "oleo de ricino",
        "óleo de rícino",
        "butyrospermum parkii butter",
        "shea butter",
        "manteiga de karite",
        "manteiga de karité",
        "theobroma cacao seed butter",
        "cocoa butter",
        "manteiga de cacau",
        "petrolatum",
        "mineral oil",
        "paraffinum liquidum",
        "oleo mineral",
        "óleo mineral",
        "murumuru",
        "persea gratissima",
        "avocado oil",
        "abacate",
    ],
};

pub const PROTEINS: CategorySet = CategorySet {
    name: "proteins",
    terms: &[
        "hydrolyzed keratin",
        "keratin",
        "queratina",
        "hydrolyzed collagen",
        "collagen",
        "colageno",
        "colágeno",
        "hydrolyzed wheat protein",
        "proteina do trigo",
        "hydrolyzed soy protein",
        "proteina da soja",
        "hydrolyzed rice protein",
        "proteina do arroz",
        "bamboo extract",
        "bambusa vulgaris extract",
        "bambu",
    ],
};

pub const AMINO_ACIDS: CategorySet = CategorySet {
    name: "amino acids",
    terms: &[
        "arginine",
        "arginina",
        "lysine",
        "lisina",
        "proline",
        "prolina",
        "serine",
        "serina",
        "cysteine",
        "cisteina",
        "cisteína",
        "glycine",
        "glicina",
        "tyrosine",
        "tirosina",
    ],
};

pub const SILICONES_HEAVY: CategorySet = CategorySet {
    name: "heavy silicones",
    terms: &["dimethicone", "amodimethicone", "simethicone"],
};

pub const SILICONES_VOLATILE: CategorySet = CategorySet {
    name: "volatile silicones",
    terms: &["cyclopentasiloxane", "cyclohexasiloxane"],
};
