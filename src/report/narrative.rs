//! Static narrative text shown next to the charts.
//!
//! None of this depends on the loaded data.

pub const INTRODUCTION_HEADING: &str = "Introduction";

pub const INTRODUCTION: &str = "This application analyzes analyst forecast behavior and accuracy for \
Apple (AAPL) stock using the IBES dataset. The goal is to understand the relationship between \
forecasted and actual earnings per share (EPS), identify patterns in forecast errors, and evaluate \
the accuracy of different forecasting agents (Estimators/Analysts).";

pub const EXPLORATION_HEADING: &str = "Data Exploration";

pub const EXPLORATION: &str =
    "Explore the distribution of forecasted and actual EPS, and the relationship between them.";

pub const INSIGHTS_HEADING: &str = "Insights";

pub const INSIGHTS_LEAD: &str = "Based on the analysis:";

pub const INSIGHTS: [&str; 4] = [
    "Both forecasted ('VALUE') and actual ('ACTUAL') EPS distributions are skewed with a concentration \
at lower values and a tail towards higher values.",
    "Box plots reveal the presence of significant outliers in both forecasted and actual EPS, indicating \
instances of extreme earnings or forecasts.",
    "The scatter plot shows a positive relationship between forecasted and actual EPS, but with \
considerable spread, suggesting that forecasts are not always perfectly accurate.",
    "The correlation heatmap shows the relationships between numerical variables, highlighting the \
positive correlation between 'VALUE' and 'ACTUAL'.",
];

pub const RECOMMENDATIONS_HEADING: &str = "Recommendations";

/// `(headline, detail)` pairs.
pub const RECOMMENDATIONS: [(&str, &str); 3] = [
    (
        "Focus on Agents with Lower MAE",
        "Agents with lower Mean Absolute Error (MAE) are more accurate. Identifying these agents and \
potentially understanding their forecasting methodologies could be beneficial.",
    ),
    (
        "Investigate Outliers",
        "Further analysis of instances with large forecast errors (outliers) could reveal specific events \
or circumstances that led to significant discrepancies between forecasts and actuals.",
    ),
    (
        "Analyze by Forecast Period (FPI)",
        "Explore if forecast accuracy varies significantly based on the forecast period (FPI). \
Longer-term forecasts might inherently have higher errors.",
    ),
];

/// Insights section as plain text (heading excluded).
pub fn insights_text() -> String {
    let mut out = String::new();
    out.push_str(INSIGHTS_LEAD);
    out.push('\n');
    for item in INSIGHTS {
        out.push_str(&format!("- {item}\n"));
    }
    out
}

/// Recommendations section as plain text (heading excluded).
pub fn recommendations_text() -> String {
    RECOMMENDATIONS
        .iter()
        .map(|(head, detail)| format!("- {head}: {detail}\n"))
        .collect()
}
