use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for submitted reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportId(pub String);

/// Identity string of the citizen who filed a report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CitizenId(pub String);

/// Issue classes recognized by the intake pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    Pothole,
    Garbage,
    BrokenStreetlight,
    Waterlogging,
    Other,
}

impl IssueCategory {
    pub const fn known() -> [Self; 4] {
        [
            Self::Pothole,
            Self::Garbage,
            Self::BrokenStreetlight,
            Self::Waterlogging,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pothole => "Pothole",
            Self::Garbage => "Garbage",
            Self::BrokenStreetlight => "Broken Streetlight",
            Self::Waterlogging => "Waterlogging",
            Self::Other => "Other",
        }
    }

    /// Unrecognized labels fold into `Other` rather than failing intake.
    pub fn from_label(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "pothole" => Self::Pothole,
            "garbage" => Self::Garbage,
            "broken_streetlight" | "broken streetlight" | "streetlight" => Self::BrokenStreetlight,
            "waterlogging" => Self::Waterlogging,
            _ => Self::Other,
        }
    }
}

/// Lifecycle state tracked for every report.
///
/// Status advances `Pending -> Verified -> InProgress -> Resolved`, or
/// diverges to the terminal `Flagged` from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pending,
    Verified,
    InProgress,
    Resolved,
    Flagged,
}

impl ReportStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::Flagged => "flagged",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "verified" => Some(Self::Verified),
            "in_progress" | "in progress" => Some(Self::InProgress),
            "resolved" => Some(Self::Resolved),
            "flagged" => Some(Self::Flagged),
            _ => None,
        }
    }

    /// Active reports are the ones still competing for triage attention.
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Resolved | Self::Flagged)
    }
}

/// Reward-eligible lifecycle points, each granted at most once per report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardStage {
    Reported,
    Verified,
    Resolved,
}

impl RewardStage {
    pub const fn ordered() -> [Self; 3] {
        [Self::Reported, Self::Verified, Self::Resolved]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Reported => "reported",
            Self::Verified => "verified",
            Self::Resolved => "resolved",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "reported" => Some(Self::Reported),
            "verified" => Some(Self::Verified),
            "resolved" => Some(Self::Resolved),
            _ => None,
        }
    }

    /// Fixed reward table. Amounts are policy constants, not computed.
    pub const fn reward(self) -> u32 {
        match self {
            Self::Reported => 10,
            Self::Verified => 15,
            Self::Resolved => 25,
        }
    }

    /// The stage a status transition attempts to award, if any.
    ///
    /// Creation awards `Reported` separately; Pending, InProgress, and
    /// Flagged unlock nothing.
    pub const fn unlocked_by(status: ReportStatus) -> Option<Self> {
        match status {
            ReportStatus::Verified => Some(Self::Verified),
            ReportStatus::Resolved => Some(Self::Resolved),
            ReportStatus::Pending | ReportStatus::InProgress | ReportStatus::Flagged => None,
        }
    }
}

/// Per-stage one-time award flags.
///
/// Flags only ever flip false -> true; the all-false default doubles as the
/// repair value for persisted records missing the substructure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardedStages {
    #[serde(default)]
    pub reported: bool,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub resolved: bool,
}

impl AwardedStages {
    pub const fn stage(self, stage: RewardStage) -> bool {
        match stage {
            RewardStage::Reported => self.reported,
            RewardStage::Verified => self.verified,
            RewardStage::Resolved => self.resolved,
        }
    }

    pub fn mark(&mut self, stage: RewardStage) {
        match stage {
            RewardStage::Reported => self.reported = true,
            RewardStage::Verified => self.verified = true,
            RewardStage::Resolved => self.resolved = true,
        }
    }
}

/// Display bands derived from the 0-100 severity scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityBand {
    Low,
    Medium,
    High,
}

impl SeverityBand {
    pub const fn from_severity(severity: u8) -> Self {
        match severity {
            0..=33 => Self::Low,
            34..=66 => Self::Medium,
            _ => Self::High,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Rank value carried by reports outside the active triage set.
pub const UNRANKED: u32 = u32::MAX;

pub(crate) const fn unranked() -> u32 {
    UNRANKED
}

/// One citizen-submitted civic issue record. The canonical collection of
/// these is the sole source of truth; everything else is derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    pub created_at: DateTime<Utc>,
    pub reporter: CitizenId,
    pub category: IssueCategory,
    pub severity: u8,
    pub risk_score: u8,
    #[serde(default)]
    pub location_query: String,
    #[serde(default)]
    pub location_text: String,
    pub status: ReportStatus,
    #[serde(default = "unranked")]
    pub priority_rank: u32,
    #[serde(default)]
    pub image_name: String,
    #[serde(default)]
    pub awarded: AwardedStages,
}

impl Report {
    pub const fn severity_band(&self) -> SeverityBand {
        SeverityBand::from_severity(self.severity)
    }

    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// Inbound submission payload captured from the reporting surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDraft {
    pub reporter: CitizenId,
    pub category: IssueCategory,
    pub severity: u8,
    pub location_query: String,
    #[serde(default)]
    pub location_text: String,
    #[serde(default)]
    pub image_name: String,
}
