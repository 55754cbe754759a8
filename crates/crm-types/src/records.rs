//! Report record types and their descriptors.
//!
//! Every struct here mirrors one collection populated by the upstream
//! CRM sync pipeline. Deals and leads are raw records; the remaining three
//! are rollups computed by the pipeline and only surfaced by this service.
//!
//! Numeric fields use [`serde_json::Number`] so a value stored as an integer
//! is emitted as an integer and a stored double keeps its fractional form.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use ts_rs::TS;

use crate::descriptor::{Entity, EntityDescriptor, FieldDefault, FieldKind, FieldSpec};

// ---------------------------------------------------------------------------
// deals
// ---------------------------------------------------------------------------

/// Status assigned to a deal whose document carries none.
pub const DEFAULT_DEAL_STATUS: &str = "open";

/// A single CRM deal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Deal {
    /// Deal name.
    pub title: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub description: Option<String>,
    /// Deal value.
    #[ts(as = "f64")]
    pub amount: Number,
    /// Pipeline status.
    pub status: String,
}

impl Entity for Deal {
    const DESCRIPTOR: EntityDescriptor = EntityDescriptor {
        name: "Deal",
        collection: "deals",
        fields: &[
            FieldSpec::required("title", FieldKind::String),
            FieldSpec::optional("description", FieldKind::String),
            FieldSpec::required("amount", FieldKind::Number),
            FieldSpec::required("status", FieldKind::String)
                .with_default(FieldDefault::Str(DEFAULT_DEAL_STATUS)),
        ],
    };
}

// ---------------------------------------------------------------------------
// leads
// ---------------------------------------------------------------------------

/// A CRM contact in the lead stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Lead {
    /// CRM-side contact identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub id: Option<String>,
    /// Contact email.
    pub email: String,
    /// Given name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub first_name: Option<String>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub full_name: Option<String>,
    /// Family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub last_name: Option<String>,
    /// Lead status label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub lead_status: Option<String>,
    /// Numeric code of `lead_status`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional, as = "Option<f64>")]
    pub lead_status_id: Option<Number>,
}

impl Entity for Lead {
    const DESCRIPTOR: EntityDescriptor = EntityDescriptor {
        name: "Lead",
        collection: "leads",
        fields: &[
            FieldSpec::optional("id", FieldKind::String),
            FieldSpec::required("email", FieldKind::String),
            FieldSpec::optional("first_name", FieldKind::String),
            FieldSpec::optional("full_name", FieldKind::String),
            FieldSpec::optional("last_name", FieldKind::String),
            FieldSpec::optional("lead_status", FieldKind::String),
            FieldSpec::optional("lead_status_id", FieldKind::Number),
        ],
    };
}

// ---------------------------------------------------------------------------
// total_deals
// ---------------------------------------------------------------------------

/// Deal amount and count rolled up per deal stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TotalDeals {
    /// Deal stage the rollup groups by.
    pub id: String,
    /// Summed deal amount.
    #[ts(as = "f64")]
    pub amount: Number,
    /// Number of deals.
    #[ts(as = "f64")]
    pub total: Number,
}

impl Entity for TotalDeals {
    const DESCRIPTOR: EntityDescriptor = EntityDescriptor {
        name: "TotalDeals",
        collection: "total_deals",
        fields: &[
            FieldSpec::required("id", FieldKind::String),
            FieldSpec::required("amount", FieldKind::Number),
            FieldSpec::required("total", FieldKind::Number),
        ],
    };
}

// ---------------------------------------------------------------------------
// resume_close_deals
// ---------------------------------------------------------------------------

/// Closed deals rolled up per (year, month, stage).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ResumeCloseDeals {
    /// Calendar month, 1-12.
    #[ts(as = "f64")]
    pub month: Number,
    /// Deal stage.
    pub deal_stage: String,
    /// Calendar year.
    #[ts(as = "f64")]
    pub year: Number,
    /// Summed deal amount.
    #[ts(as = "f64")]
    pub amount: Number,
    /// Number of deals.
    #[ts(as = "f64")]
    pub count: Number,
}

impl Entity for ResumeCloseDeals {
    const DESCRIPTOR: EntityDescriptor = EntityDescriptor {
        name: "ResumeCloseDeals",
        collection: "resume_close_deals",
        fields: &[
            FieldSpec::required("month", FieldKind::Number),
            FieldSpec::required("deal_stage", FieldKind::String),
            FieldSpec::required("year", FieldKind::Number),
            FieldSpec::required("amount", FieldKind::Number),
            FieldSpec::required("count", FieldKind::Number),
        ],
    };
}

// ---------------------------------------------------------------------------
// resume_lead_status
// ---------------------------------------------------------------------------

/// Lead count rolled up per lead status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ResumeLead {
    /// Lead status code.
    #[ts(as = "f64")]
    pub id: Number,
    /// Lead status label.
    pub status: String,
    /// Number of leads with this status.
    #[ts(as = "f64")]
    pub total: Number,
}

impl Entity for ResumeLead {
    const DESCRIPTOR: EntityDescriptor = EntityDescriptor {
        name: "ResumeLead",
        collection: "resume_lead_status",
        fields: &[
            FieldSpec::required("id", FieldKind::Number),
            FieldSpec::required("status", FieldKind::String),
            FieldSpec::required("total", FieldKind::Number),
        ],
    };
}

/// Descriptors of every record type exposed by the API.
pub const ALL_DESCRIPTORS: &[EntityDescriptor] = &[
    Deal::DESCRIPTOR,
    Lead::DESCRIPTOR,
    TotalDeals::DESCRIPTOR,
    ResumeCloseDeals::DESCRIPTOR,
    ResumeLead::DESCRIPTOR,
];
