//! Sustainability impact entities produced by the estimation agent.

use serde::{Deserialize, Serialize};

/// Estimated production footprint for one garment. All metrics are
/// non-negative; the estimator rejects responses that violate that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SustainabilityEstimate {
    /// Matches a `garment_name` from the material analysis
    pub garment_name: String,

    /// Water consumption in liters
    pub water_liters: f64,

    /// Carbon emissions in kilograms of CO2 equivalent
    pub carbon_kg_co2e: f64,

    /// Energy consumption in kilowatt hours
    pub energy_kwh: f64,

    /// Short justification of the estimation approach
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basis_notes: Option<String>,
}
