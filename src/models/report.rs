use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_sale_amount: f64,
    pub sold_count: u64,
    pub not_sold_count: u64,
}

/// One price bucket of the bar chart, e.g. `{"range": "101-200", "count": 4}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramEntry {
    pub range: String,
    pub count: u64,
}

/// One slice of the pie chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedReport {
    pub statistics: Statistics,
    pub histogram: Vec<HistogramEntry>,
    pub category: Vec<CategoryCount>,
}
