use crate::analysis::types::CostAnalysis;

pub const COST_UNAVAILABLE_MESSAGE: &str = "Cost estimation not available";

pub fn render_cost_summary(cost_analysis: Option<&CostAnalysis>) -> String {
    match cost_analysis {
        Some(costs) => format!("Total Estimated Repair Cost: ${:.2}", costs.total_cost),
        None => COST_UNAVAILABLE_MESSAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_is_rounded_to_cents() {
        let costs = CostAnalysis {
            total_cost: 1234.5678,
            ..CostAnalysis::default()
        };
        assert_eq!(
            render_cost_summary(Some(&costs)),
            "Total Estimated Repair Cost: $1234.57"
        );
    }

    #[test]
    fn test_whole_amounts_keep_two_decimals() {
        let costs = CostAnalysis {
            total_cost: 900.0,
            ..CostAnalysis::default()
        };
        assert_eq!(
            render_cost_summary(Some(&costs)),
            "Total Estimated Repair Cost: $900.00"
        );
    }

    #[test]
    fn test_missing_costs() {
        assert_eq!(render_cost_summary(None), COST_UNAVAILABLE_MESSAGE);
    }
}
