//! The structured document produced by an extraction run.
//!
//! A watershed plan breaks down into eight fixed sections (the "categories"
//! over which evaluation matching and metrics are computed independently),
//! plus a summary block with per-section counts and a completion rate.
//!
//! Wire format is camelCase JSON, matching the extraction service contract.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the fixed structured-document sections.
///
/// Matching and metrics in the evaluation model are computed per category;
/// the order of `ALL` is the canonical presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Goals,
    Practices,
    ImplementationActivities,
    MonitoringParameters,
    OutreachActivities,
    GeographicAreas,
    Contacts,
    Organizations,
}

impl Category {
    /// All categories in canonical order.
    pub const ALL: [Category; 8] = [
        Category::Goals,
        Category::Practices,
        Category::ImplementationActivities,
        Category::MonitoringParameters,
        Category::OutreachActivities,
        Category::GeographicAreas,
        Category::Contacts,
        Category::Organizations,
    ];

    /// Stable wire identifier for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Goals => "goals",
            Category::Practices => "practices",
            Category::ImplementationActivities => "implementation_activities",
            Category::MonitoringParameters => "monitoring_parameters",
            Category::OutreachActivities => "outreach_activities",
            Category::GeographicAreas => "geographic_areas",
            Category::Contacts => "contacts",
            Category::Organizations => "organizations",
        }
    }

    /// Human-readable label for presentation.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Goals => "Goals",
            Category::Practices => "Best Management Practices",
            Category::ImplementationActivities => "Implementation Activities",
            Category::MonitoringParameters => "Monitoring Parameters",
            Category::OutreachActivities => "Outreach Activities",
            Category::GeographicAreas => "Geographic Areas",
            Category::Contacts => "Contacts",
            Category::Organizations => "Organizations",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A water-quality or watershed-management goal stated in the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub description: String,

    /// Target timeframe, if the plan states one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
}

/// A best management practice (BMP) the plan commits to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Practice {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A concrete implementation activity with an optional owner and schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImplementationActivity {
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsible_party: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
}

/// A water-quality parameter the plan monitors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringParameter {
    pub parameter: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_value: Option<String>,
}

/// An education or outreach activity and its intended audience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutreachActivity {
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
}

/// A geographic area covered by the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeographicArea {
    pub name: String,

    /// Hydrologic unit code, when the plan provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub huc_code: Option<String>,
}

/// A named contact person in the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// An organization involved in the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Per-section counts plus a completion rate, displayed alongside results.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_goals: usize,
    pub total_practices: usize,
    pub total_implementation_activities: usize,
    pub total_monitoring_parameters: usize,
    pub total_outreach_activities: usize,
    pub total_geographic_areas: usize,
    pub total_contacts: usize,
    pub total_organizations: usize,

    /// Fraction of sections with at least one extracted item, in [0,1].
    pub completion_rate: f64,
}

/// The structured result of one extraction run.
///
/// Owned by the orchestrator once received; immutable after assignment. A new
/// extraction fully replaces the document, it never patches one in place.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedDocument {
    #[serde(default)]
    pub goals: Vec<Goal>,

    #[serde(default)]
    pub practices: Vec<Practice>,

    #[serde(default)]
    pub implementation_activities: Vec<ImplementationActivity>,

    #[serde(default)]
    pub monitoring_parameters: Vec<MonitoringParameter>,

    #[serde(default)]
    pub outreach_activities: Vec<OutreachActivity>,

    #[serde(default)]
    pub geographic_areas: Vec<GeographicArea>,

    #[serde(default)]
    pub contacts: Vec<Contact>,

    #[serde(default)]
    pub organizations: Vec<Organization>,

    #[serde(default)]
    pub report_summary: ReportSummary,
}

impl ExtractedDocument {
    /// Number of extracted items in the given category.
    pub fn section_count(&self, category: Category) -> usize {
        match category {
            Category::Goals => self.goals.len(),
            Category::Practices => self.practices.len(),
            Category::ImplementationActivities => self.implementation_activities.len(),
            Category::MonitoringParameters => self.monitoring_parameters.len(),
            Category::OutreachActivities => self.outreach_activities.len(),
            Category::GeographicAreas => self.geographic_areas.len(),
            Category::Contacts => self.contacts.len(),
            Category::Organizations => self.organizations.len(),
        }
    }

    /// Calculate the summary block from the current section contents.
    pub fn calculate_summary(&self) -> ReportSummary {
        let populated = Category::ALL
            .iter()
            .filter(|c| self.section_count(**c) > 0)
            .count();

        ReportSummary {
            total_goals: self.goals.len(),
            total_practices: self.practices.len(),
            total_implementation_activities: self.implementation_activities.len(),
            total_monitoring_parameters: self.monitoring_parameters.len(),
            total_outreach_activities: self.outreach_activities.len(),
            total_geographic_areas: self.geographic_areas.len(),
            total_contacts: self.contacts.len(),
            total_organizations: self.organizations.len(),
            completion_rate: populated as f64 / Category::ALL.len() as f64,
        }
    }

    /// Recompute and assign the summary block.
    pub fn update_summary(&mut self) {
        self.report_summary = self.calculate_summary();
    }
}
