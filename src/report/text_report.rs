use std::fmt::Write;

use indexmap::IndexMap;

use crate::analysis::types::{CostAnalysis, DamageRecord, DamageType, Severity};

pub const NO_DAMAGE_MESSAGE: &str = "No significant damage detected in the image.";

pub const HIGH_SEVERITY_NOTE: &str = "High severity damages detected - immediate repair recommended";
pub const RUST_NOTE: &str = "Rust detected - treat immediately to prevent spreading";
pub const CRACK_NOTE: &str = "Cracks found - structural integrity may be compromised";
pub const COMPREHENSIVE_NOTE: &str = "Multiple damages - consider comprehensive repair package";

const COMPREHENSIVE_THRESHOLD: usize = 5;

/// Builds the multi-line damage report.
///
/// Currency is printed with two decimals and percentages with one. With no
/// damages the report is just [`NO_DAMAGE_MESSAGE`].
pub fn render_report(damages: &[DamageRecord], cost_analysis: Option<&CostAnalysis>) -> String {
    if damages.is_empty() {
        return NO_DAMAGE_MESSAGE.to_string();
    }

    let mut report = String::new();
    write_header(&mut report);
    write_summary(&mut report, damages);
    write_damage_list(&mut report, damages);
    if let Some(costs) = cost_analysis {
        write_cost_analysis(&mut report, costs);
    }
    write_recommendations(&mut report, damages);
    report
}

/// Recommendation lines that apply to these damages, in report order.
pub fn recommendations(damages: &[DamageRecord]) -> Vec<&'static str> {
    let mut notes = Vec::new();
    if damages.iter().any(|d| d.severity == Severity::High) {
        notes.push(HIGH_SEVERITY_NOTE);
    }
    if damages.iter().any(|d| d.damage_type == DamageType::Rust) {
        notes.push(RUST_NOTE);
    }
    if damages.iter().any(|d| d.damage_type == DamageType::Crack) {
        notes.push(CRACK_NOTE);
    }
    if damages.len() > COMPREHENSIVE_THRESHOLD {
        notes.push(COMPREHENSIVE_NOTE);
    }
    notes
}

fn write_header(report: &mut String) {
    report.push_str("CAR DAMAGE ANALYSIS REPORT\n");
    report.push_str(&"=".repeat(50));
    report.push_str("\n\n");
}

fn write_summary(report: &mut String, damages: &[DamageRecord]) {
    let mut type_counts: IndexMap<DamageType, usize> = IndexMap::new();
    let mut severity_counts: IndexMap<Severity, usize> = IndexMap::new();
    for damage in damages {
        *type_counts.entry(damage.damage_type).or_default() += 1;
        *severity_counts.entry(damage.severity).or_default() += 1;
    }

    let types: Vec<&str> = type_counts.keys().map(DamageType::as_str).collect();
    let severities: Vec<String> = severity_counts
        .iter()
        .map(|(severity, count)| format!("{}: {}", severity, count))
        .collect();

    report.push_str("SUMMARY:\n");
    let _ = writeln!(report, "• Total damages detected: {}", damages.len());
    let _ = writeln!(report, "• Damage types found: {}", types.join(", "));
    let _ = writeln!(report, "• Severity distribution: {}", severities.join(", "));
    report.push('\n');
}

fn write_damage_list(report: &mut String, damages: &[DamageRecord]) {
    report.push_str("DETAILED DAMAGE LIST:\n");
    report.push_str(&"-".repeat(30));
    report.push('\n');

    for (index, damage) in damages.iter().enumerate() {
        let _ = writeln!(report, "{}. {}", index + 1, damage.damage_type.as_str().to_uppercase());
        let _ = writeln!(report, "   Severity: {}", damage.severity);
        let _ = writeln!(report, "   Confidence: {:.1}%", damage.confidence * 100.0);
        let _ = writeln!(report, "   Area: {:.1}% of image", damage.area_percentage);
        if let Some(cost) = damage.estimated_cost {
            let _ = writeln!(report, "   Estimated Cost: ${:.2}", cost);
        }
        report.push('\n');
    }
}

fn write_cost_analysis(report: &mut String, costs: &CostAnalysis) {
    report.push_str("COST ANALYSIS:\n");
    report.push_str(&"-".repeat(20));
    report.push('\n');
    let _ = writeln!(report, "Labor Cost: ${:.2}", costs.labor_cost);
    let _ = writeln!(report, "Parts Cost: ${:.2}", costs.parts_cost);
    let _ = writeln!(report, "Additional Fees: ${:.2}", costs.additional_cost);
    let _ = writeln!(report, "TOTAL: ${:.2}", costs.total_cost);
    report.push('\n');
}

fn write_recommendations(report: &mut String, damages: &[DamageRecord]) {
    report.push_str("RECOMMENDATIONS:\n");
    report.push_str(&"-".repeat(20));
    report.push('\n');
    for note in recommendations(damages) {
        report.push_str(note);
        report.push('\n');
    }
}
