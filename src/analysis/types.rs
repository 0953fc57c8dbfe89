use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageType {
    Scratch,
    Dent,
    Crack,
    Rust,
    Broken,
    #[default]
    #[serde(other)]
    Unknown,
}

impl DamageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DamageType::Scratch => "scratch",
            DamageType::Dent => "dent",
            DamageType::Crack => "crack",
            DamageType::Rust => "rust",
            DamageType::Broken => "broken",
            DamageType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single classified damage as reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageRecord {
    #[serde(rename = "type", default)]
    pub damage_type: DamageType,
    #[serde(default)]
    pub severity: Severity,
    /// Classifier confidence in `[0, 1]`.
    #[serde(default)]
    pub confidence: f64,
    /// Share of the image covered by the damage, in percent.
    #[serde(default)]
    pub area_percentage: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostAnalysis {
    #[serde(default)]
    pub labor_cost: f64,
    #[serde(default)]
    pub parts_cost: f64,
    #[serde(default)]
    pub additional_cost: f64,
    #[serde(default)]
    pub total_cost: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub classified_damages: Vec<DamageRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_analysis: Option<CostAnalysis>,
}

impl AnalysisResult {
    pub fn has_damage(&self) -> bool {
        !self.classified_damages.is_empty()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<DamageRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<DamageRecord>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_result_deserializes() {
        let json = r#"{
            "classified_damages": [
                {"type": "dent", "severity": "high", "confidence": 0.9,
                 "area_percentage": 3.2, "estimated_cost": 850.0}
            ],
            "cost_analysis": {"labor_cost": 510.0, "parts_cost": 255.0,
                              "additional_cost": 85.0, "total_cost": 850.0}
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.classified_damages.len(), 1);
        let damage = &result.classified_damages[0];
        assert_eq!(damage.damage_type, DamageType::Dent);
        assert_eq!(damage.severity, Severity::High);
        assert_eq!(damage.estimated_cost, Some(850.0));
        assert_eq!(result.cost_analysis.unwrap().total_cost, 850.0);
    }

    #[test]
    fn test_missing_fields_fall_back_to_unknown() {
        let json = r#"{"classified_damages": [{"type": "dent-ish"}, {}]}"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.classified_damages[0].damage_type, DamageType::Unknown);
        assert_eq!(result.classified_damages[1].damage_type, DamageType::Unknown);
        assert_eq!(result.classified_damages[1].severity, Severity::Unknown);
        assert_eq!(result.classified_damages[1].confidence, 0.0);
        assert_eq!(result.classified_damages[1].estimated_cost, None);
        assert!(result.cost_analysis.is_none());
    }

    #[test]
    fn test_null_or_absent_damages_mean_no_damage() {
        let absent: AnalysisResult = serde_json::from_str("{}").unwrap();
        let null: AnalysisResult = serde_json::from_str(r#"{"classified_damages": null}"#).unwrap();
        assert!(!absent.has_damage());
        assert!(!null.has_damage());
    }

    #[test]
    fn test_display_uses_lowercase_names() {
        assert_eq!(DamageType::Rust.to_string(), "rust");
        assert_eq!(Severity::Medium.to_string(), "medium");
    }
}
