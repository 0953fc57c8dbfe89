use std::path::Path;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::analysis::backend::DamageBackend;
use crate::analysis::types::{AnalysisResult, CostAnalysis, DamageRecord, DamageType, Severity};
use crate::error::AppError;

const DAMAGE_TYPES: [DamageType; 4] = [
    DamageType::Scratch,
    DamageType::Dent,
    DamageType::Crack,
    DamageType::Rust,
];
const SEVERITIES: [Severity; 3] = [Severity::Low, Severity::Medium, Severity::High];

const LABOR_SHARE: f64 = 0.6;
const PARTS_SHARE: f64 = 0.3;

/// Simulated backend that ignores the image and invents plausible damages.
pub struct DemoBackend {
    rng: Mutex<StdRng>,
}

impl DemoBackend {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn random_damage(rng: &mut StdRng) -> DamageRecord {
        DamageRecord {
            damage_type: *DAMAGE_TYPES.choose(rng).unwrap_or(&DamageType::Unknown),
            severity: *SEVERITIES.choose(rng).unwrap_or(&Severity::Unknown),
            confidence: rng.random_range(0.6..=0.95),
            area_percentage: rng.random_range(0.5..=5.0),
            estimated_cost: Some(rng.random_range(100.0..=2000.0)),
        }
    }

    fn split_costs(total_cost: f64) -> CostAnalysis {
        let labor_cost = total_cost * LABOR_SHARE;
        let parts_cost = total_cost * PARTS_SHARE;
        // The remainder keeps the three parts summing to the total exactly.
        let additional_cost = total_cost - (labor_cost + parts_cost);
        CostAnalysis {
            labor_cost,
            parts_cost,
            additional_cost,
            total_cost,
        }
    }
}

impl Default for DemoBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DamageBackend for DemoBackend {
    fn analyze_car_damage(&self, image_path: &Path) -> Result<AnalysisResult, AppError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| AppError::Backend("demo backend random source is poisoned".to_string()))?;

        let count = rng.random_range(1..=4);
        let classified_damages: Vec<DamageRecord> =
            (0..count).map(|_| Self::random_damage(&mut rng)).collect();
        let total_cost: f64 = classified_damages
            .iter()
            .filter_map(|damage| damage.estimated_cost)
            .sum();

        debug!(
            "Simulated {} damages for {} (total ${:.2})",
            count,
            image_path.display(),
            total_cost
        );

        Ok(AnalysisResult {
            classified_damages,
            cost_analysis: Some(Self::split_costs(total_cost)),
        })
    }

    fn name(&self) -> &'static str {
        "DemoBackend"
    }

    fn is_simulated(&self) -> bool {
        true
    }
}
