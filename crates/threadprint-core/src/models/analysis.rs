//! Material analysis entities produced by the vision agent.

use serde::{Deserialize, Serialize};

/// How far a garment's weight fractions may drift from 1.0 before a
/// warning is recorded. Model output is untrusted, so violations are
/// soft warnings rather than errors.
pub const FRACTION_TOLERANCE: f64 = 0.05;

/// One constituent material of a garment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialShare {
    /// Material name (e.g., "cotton", "polyester")
    pub material_name: String,

    /// Relative share of the garment's weight, in [0, 1]
    pub weight_fraction: f64,

    /// Estimated absolute weight of this share, when the model gives one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_grams: Option<f64>,
}

/// Per-garment material breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GarmentMaterial {
    /// One distinct clothing item identified in the photo
    pub garment_name: String,

    /// Materials in the order the model listed them
    pub materials: Vec<MaterialShare>,

    /// The model's confidence in this breakdown, in [0, 1]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl GarmentMaterial {
    /// Sum of the weight fractions across all listed materials.
    pub fn fraction_sum(&self) -> f64 {
        self.materials.iter().map(|m| m.weight_fraction).sum()
    }
}

/// Structured output of the material analysis stage. Immutable once
/// returned; downstream stages only read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MaterialAnalysisResult {
    /// Garments in the order the model identified them (may be empty)
    pub garments: Vec<GarmentMaterial>,

    /// Free-text summary of the overall scene, when the model gives one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl MaterialAnalysisResult {
    /// Names of all garments, in result order.
    pub fn garment_names(&self) -> Vec<String> {
        self.garments.iter().map(|g| g.garment_name.clone()).collect()
    }

    /// Distinct material names across all garments, in first-seen order.
    pub fn material_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for garment in &self.garments {
            for share in &garment.materials {
                if !names.iter().any(|n| n == &share.material_name) {
                    names.push(share.material_name.clone());
                }
            }
        }
        names
    }

    /// One warning message per garment whose fractions do not sum to
    /// roughly 1.0. An empty vec means every garment is within tolerance.
    pub fn fraction_warnings(&self) -> Vec<String> {
        self.garments
            .iter()
            .filter_map(|garment| {
                let sum = garment.fraction_sum();
                if (sum - 1.0).abs() > FRACTION_TOLERANCE {
                    Some(format!(
                        "weight fractions for '{}' sum to {:.2}, expected ~1.0",
                        garment.garment_name, sum
                    ))
                } else {
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn garment(name: &str, fractions: &[(&str, f64)]) -> GarmentMaterial {
        GarmentMaterial {
            garment_name: name.to_string(),
            materials: fractions
                .iter()
                .map(|(material, fraction)| MaterialShare {
                    material_name: material.to_string(),
                    weight_fraction: *fraction,
                    weight_grams: None,
                })
                .collect(),
            confidence: None,
        }
    }

    #[test]
    fn test_fraction_sum_within_tolerance_is_clean() {
        let result = MaterialAnalysisResult {
            garments: vec![garment("denim jacket", &[("cotton", 0.7), ("polyester", 0.3)])],
            notes: None,
        };
        assert!(result.fraction_warnings().is_empty());
    }

    #[test]
    fn test_fraction_sum_half_produces_warning() {
        let result = MaterialAnalysisResult {
            garments: vec![garment("scarf", &[("wool", 0.5)])],
            notes: None,
        };
        let warnings = result.fraction_warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("scarf"));
        assert!(warnings[0].contains("0.50"));
    }

    #[test]
    fn test_garment_with_no_materials_warns() {
        let result = MaterialAnalysisResult {
            garments: vec![garment("mystery item", &[])],
            notes: None,
        };
        assert_eq!(result.fraction_warnings().len(), 1);
    }

    #[test]
    fn test_material_names_deduplicate_in_order() {
        let result = MaterialAnalysisResult {
            garments: vec![
                garment("jacket", &[("cotton", 0.7), ("polyester", 0.3)]),
                garment("shirt", &[("cotton", 1.0)]),
            ],
            notes: None,
        };
        assert_eq!(result.material_names(), vec!["cotton", "polyester"]);
    }
}
