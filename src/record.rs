//! The flat per-product record handed to the exporters

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::claims::ClaimReport;
use crate::ingredients::{FineHairAssessment, IngredientList, ScheduleClassification};

/// One parsed product page. Built once, never updated.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub source_url: String,
    pub brand: String,
    pub product_name: String,
    pub product_type: String,
    pub description: String,
    pub hair_type_declared: String,
    pub usage_instructions: String,
    pub ingredients_raw: String,
    pub ingredients: IngredientList,
    pub image_front_url: String,
    pub image_back_url: String,
    pub ph: Option<f64>,
    pub target_audience: String,
    pub schedule: ScheduleClassification,
    pub fine_hair: FineHairAssessment,
    pub claims: ClaimReport,
    /// Name of the site strategy that produced the record
    pub parser: String,
}

impl ProductRecord {
    /// Column name and value pairs in export order.
    pub fn columns(&self) -> Vec<(String, Value)> {
        let text = |s: &str| Value::String(s.to_string());
        let number = |n: f64| serde_json::Number::from_f64(n).map_or(Value::Null, Value::Number);

        let mut cols = vec![
            ("source_url".to_string(), text(&self.source_url)),
            ("brand".to_string(), text(&self.brand)),
            ("product_name".to_string(), text(&self.product_name)),
            ("product_type".to_string(), text(&self.product_type)),
            ("description".to_string(), text(&self.description)),
            ("function_objective".to_string(), text(&self.description)),
            ("hair_type_declared".to_string(), text(&self.hair_type_declared)),
            ("usage_instructions".to_string(), text(&self.usage_instructions)),
            ("ingredients_raw".to_string(), text(&self.ingredients_raw)),
            ("ingredients_list".to_string(), Value::String(self.ingredients.joined())),
            ("image_front_url".to_string(), text(&self.image_front_url)),
            ("image_back_url".to_string(), text(&self.image_back_url)),
            ("ph".to_string(), self.ph.map_or(Value::Null, number)),
            ("target_audience".to_string(), text(&self.target_audience)),
            ("schedule_phase".to_string(), text(&self.schedule.phase)),
            ("schedule_score_h".to_string(), number(self.schedule.scores.hydration)),
            ("schedule_score_n".to_string(), number(self.schedule.scores.nutrition)),
            ("schedule_score_r".to_string(), number(self.schedule.scores.reconstruction)),
            ("fine_hair_suitability".to_string(), text(self.fine_hair.label.as_str())),
            ("fine_hair_score".to_string(), number(self.fine_hair.score)),
        ];

        for (key, active) in &self.claims.flags {
            cols.push((key.clone(), Value::Bool(*active)));
        }
        cols.push(("claims_list".to_string(), text(&self.claims.summary)));
        cols.push(("parser".to_string(), text(&self.parser)));
        cols
    }
}

impl Serialize for ProductRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let cols = self.columns();
        let mut map = serializer.serialize_map(Some(cols.len()))?;
        for (key, value) in &cols {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
