use crate::core::errors::FimdefestaError;
use crate::core::models::Group;
use crate::core::services::GroupSummaryResponse;
use serde_json::{Value, json};
use tracing::debug;

// Generates Chart.js configuration for visualizing a group's bill summary
pub struct Visualization;

impl Visualization {
    /// Generates a Chart.js bar chart configuration of per-participant totals.
    ///
    /// # Arguments
    /// * `group` - The group the summary belongs to.
    /// * `summary` - A freshly computed summary for that group.
    ///
    /// # Returns
    /// A JSON Value containing the Chart.js configuration, or an error if the
    /// group has no participants to chart.
    pub fn generate_summary_chart(group: &Group, summary: &GroupSummaryResponse) -> Result<Value, FimdefestaError> {
        debug!(
            "Generating summary chart for group {} with {} participants",
            group.id,
            summary.participant_totals().len()
        );

        if summary.participant_totals().is_empty() {
            return Err(FimdefestaError::NoTotalsAvailable);
        }

        let labels: Vec<String> = summary.participant_totals().iter().map(|t| t.name.clone()).collect();
        // Two-decimal presentation happens here, not in the engine.
        let data: Vec<f64> = summary
            .participant_totals()
            .iter()
            .map(|t| (t.amount * 100.0).round() / 100.0)
            .collect();

        // Generate dynamic colors to support any number of participants
        let base_colors = vec![
            (75, 192, 192),  // Teal
            (255, 99, 132),  // Red
            (54, 162, 235),  // Blue
            (255, 206, 86),  // Yellow
            (153, 102, 255), // Purple
        ];
        let mut background_colors = Vec::new();
        let mut border_colors = Vec::new();
        for i in 0..labels.len() {
            let (r, g, b) = base_colors[i % base_colors.len()];
            background_colors.push(format!("rgba({}, {}, {}, 0.6)", r, g, b));
            border_colors.push(format!("rgba({}, {}, {}, 1)", r, g, b));
        }

        let chart_config = json!({
            "type": "bar",
            "data": {
                "labels": labels,
                "datasets": [{
                    "label": "Amount Owed",
                    "data": data,
                    "backgroundColor": background_colors,
                    "borderColor": border_colors,
                    "borderWidth": 1
                }]
            },
            "options": {
                "scales": {
                    "y": {
                        "beginAtZero": true,
                        "title": {
                            "display": true,
                            "text": "Amount (R$)"
                        }
                    },
                    "x": {
                        "title": {
                            "display": true,
                            "text": "Participants"
                        }
                    }
                },
                "plugins": {
                    "title": {
                        "display": true,
                        "text": format!("Bill for {}: R$ {:.2}", group.name, summary.grand_total())
                    }
                }
            }
        });

        debug!("Generated Chart.js configuration for group {}", group.id);
        Ok(chart_config)
    }
}
