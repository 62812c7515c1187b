//! Analytics datasets for the reports tab.

use crate::presentation::Trend;
use crate::ParseEnumError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reporting window selector
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReportPeriod {
    #[serde(rename = "24h")]
    Day,
    #[default]
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
}

impl ReportPeriod {
    pub const fn all() -> [ReportPeriod; 4] {
        [
            ReportPeriod::Day,
            ReportPeriod::Week,
            ReportPeriod::Month,
            ReportPeriod::Quarter,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportPeriod::Day => "24h",
            ReportPeriod::Week => "7d",
            ReportPeriod::Month => "30d",
            ReportPeriod::Quarter => "90d",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportPeriod::Day => "Last 24h",
            ReportPeriod::Week => "Last 7 days",
            ReportPeriod::Month => "Last 30 days",
            ReportPeriod::Quarter => "Last 90 days",
        }
    }

    pub fn hours(&self) -> u32 {
        match self {
            ReportPeriod::Day => 24,
            ReportPeriod::Week => 7 * 24,
            ReportPeriod::Month => 30 * 24,
            ReportPeriod::Quarter => 90 * 24,
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportPeriod {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ReportPeriod::all()
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| ParseEnumError::new("report period", s))
    }
}

/// One day of the risk trend chart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RiskTrendPoint {
    pub date: String,
    pub high_risk: u32,
    pub medium_risk: u32,
    pub low_risk: u32,
    pub total: u32,
}

impl RiskTrendPoint {
    fn new(date: &str, high_risk: u32, medium_risk: u32, low_risk: u32) -> Self {
        Self {
            date: date.to_string(),
            high_risk,
            medium_risk,
            low_risk,
            total: high_risk + medium_risk + low_risk,
        }
    }
}

pub fn risk_trend() -> Vec<RiskTrendPoint> {
    vec![
        RiskTrendPoint::new("Jan 1", 12, 28, 156),
        RiskTrendPoint::new("Jan 2", 8, 34, 189),
        RiskTrendPoint::new("Jan 3", 15, 42, 203),
        RiskTrendPoint::new("Jan 4", 23, 38, 178),
        RiskTrendPoint::new("Jan 5", 18, 45, 234),
        RiskTrendPoint::new("Jan 6", 11, 29, 198),
        RiskTrendPoint::new("Jan 7", 19, 52, 267),
    ]
}

/// Transaction volume in a four-hour bucket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VolumeBucket {
    pub hour: String,
    pub volume: u32,
    pub suspicious: u32,
}

impl VolumeBucket {
    /// Share of the bucket's volume that was suspicious, 0.0 for an empty bucket
    pub fn suspicious_ratio(&self) -> f64 {
        if self.volume == 0 {
            0.0
        } else {
            f64::from(self.suspicious) / f64::from(self.volume)
        }
    }
}

pub fn hourly_volume() -> Vec<VolumeBucket> {
    [
        ("00:00", 45, 2),
        ("04:00", 23, 1),
        ("08:00", 189, 8),
        ("12:00", 267, 12),
        ("16:00", 234, 15),
        ("20:00", 156, 6),
    ]
    .into_iter()
    .map(|(hour, volume, suspicious)| VolumeBucket {
        hour: hour.to_string(),
        volume,
        suspicious,
    })
    .collect()
}

/// Region classification used by the geographic chart
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum RegionRiskTier {
    Normal,
    Watch,
    Elevated,
}

impl RegionRiskTier {
    pub fn of(risk_score: u8) -> Self {
        match risk_score {
            70.. => RegionRiskTier::Elevated,
            40..=69 => RegionRiskTier::Watch,
            _ => RegionRiskTier::Normal,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RegionRiskTier::Normal => "Normal",
            RegionRiskTier::Watch => "Watch",
            RegionRiskTier::Elevated => "Elevated",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegionRisk {
    pub region: String,
    pub transactions: u32,
    pub risk_score: u8,
    /// Chart swatch, `#rrggbb`
    pub color: String,
}

impl RegionRisk {
    pub fn tier(&self) -> RegionRiskTier {
        RegionRiskTier::of(self.risk_score)
    }
}

pub fn geographic_risk() -> Vec<RegionRisk> {
    [
        ("North America", 1247, 23, "#10b981"),
        ("Europe", 892, 34, "#3b82f6"),
        ("Asia Pacific", 634, 45, "#8b5cf6"),
        ("Latin America", 423, 67, "#f59e0b"),
        ("Africa", 156, 89, "#ef4444"),
        ("Middle East", 89, 78, "#ec4899"),
    ]
    .into_iter()
    .map(|(region, transactions, risk_score, color)| RegionRisk {
        region: region.to_string(),
        transactions,
        risk_score,
        color: color.to_string(),
    })
    .collect()
}

/// Regions at or above `tier`, riskiest first
pub fn regions_at_least(regions: &[RegionRisk], tier: RegionRiskTier) -> Vec<&RegionRisk> {
    let mut found: Vec<&RegionRisk> = regions.iter().filter(|r| r.tier() >= tier).collect();
    found.sort_by(|a, b| b.risk_score.cmp(&a.risk_score));
    found
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlertTypeShare {
    #[serde(rename = "type")]
    pub kind: String,
    pub count: u32,
    pub percentage: u8,
}

pub fn alert_type_distribution() -> Vec<AlertTypeShare> {
    [
        ("High Risk Transaction", 45, 32),
        ("Unusual Location", 38, 27),
        ("Velocity Check", 29, 21),
        ("Merchant Risk", 18, 13),
        ("Pattern Anomaly", 10, 7),
    ]
    .into_iter()
    .map(|(kind, count, percentage)| AlertTypeShare {
        kind: kind.to_string(),
        count,
        percentage,
    })
    .collect()
}

/// Model quality metric card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelMetric {
    pub metric: String,
    pub value: f64,
    pub trend: Trend,
    pub change: String,
}

impl ModelMetric {
    pub fn title(&self) -> String {
        format!("AI {}", self.metric)
    }

    pub fn caption(&self) -> String {
        format!("{} from last period", self.change)
    }
}

pub fn model_performance() -> Vec<ModelMetric> {
    [
        ("Accuracy", 94.2, Trend::Up, "+2.1%"),
        ("Precision", 91.8, Trend::Up, "+1.5%"),
        ("Recall", 89.3, Trend::Down, "-0.8%"),
        ("F1 Score", 90.5, Trend::Up, "+0.9%"),
    ]
    .into_iter()
    .map(|(metric, value, trend, change)| ModelMetric {
        metric: metric.to_string(),
        value,
        trend,
        change: change.to_string(),
    })
    .collect()
}

/// Everything the reports tab draws for one period
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyticsReport {
    pub period: ReportPeriod,
    pub risk_trend: Vec<RiskTrendPoint>,
    pub hourly_volume: Vec<VolumeBucket>,
    pub geographic_risk: Vec<RegionRisk>,
    pub alert_types: Vec<AlertTypeShare>,
    pub model_performance: Vec<ModelMetric>,
}

impl AnalyticsReport {
    /// The datasets are static; `period` only labels the export
    pub fn for_period(period: ReportPeriod) -> Self {
        log::debug!("building analytics report for {period}");
        Self {
            period,
            risk_trend: risk_trend(),
            hourly_volume: hourly_volume(),
            geographic_risk: geographic_risk(),
            alert_types: alert_type_distribution(),
            model_performance: model_performance(),
        }
    }

    pub fn total_volume(&self) -> u32 {
        self.hourly_volume.iter().map(|b| b.volume).sum()
    }

    pub fn total_suspicious(&self) -> u32 {
        self.hourly_volume.iter().map(|b| b.suspicious).sum()
    }

    /// Export as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
