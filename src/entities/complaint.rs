//! Guest complaints and their follow-up

use crate::core::{FieldValue, Record, SortKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

crate::categorical_enum! {
    pub enum ComplaintCategory {
        Room => "room", "Room Issues",
        Service => "service", "Service",
        Food => "food", "Food & Beverage",
        Noise => "noise", "Noise",
        Cleanliness => "cleanliness", "Cleanliness",
        Amenities => "amenities", "Amenities",
        Billing => "billing", "Billing",
        Staff => "staff", "Staff",
        Other => "other", "Other",
    }
}

crate::categorical_enum! {
    pub enum ComplaintPriority {
        Low => "low", "Low",
        Medium => "medium", "Medium",
        High => "high", "High",
        Urgent => "urgent", "Urgent",
    }
}

crate::categorical_enum! {
    pub enum ComplaintStatus {
        Open => "open", "Open",
        InProgress => "in_progress", "In Progress",
        Resolved => "resolved", "Resolved",
        Closed => "closed", "Closed",
        Escalated => "escalated", "Escalated",
    }
}

crate::record_fields! {
    /// Sortable and filterable complaint fields
    pub enum ComplaintField for "complaints" {
        ComplaintNumber => "complaint_number": Text,
        GuestName => "guest_name": Text,
        GuestEmail => "guest_email": Text,
        Subject => "subject": Text,
        Description => "description": Text,
        Category => "category": Categorical(ComplaintCategory::ALL),
        Priority => "priority": Categorical(ComplaintPriority::ALL),
        Status => "status": Categorical(ComplaintStatus::ALL),
        Department => "department": Categorical,
        CreatedAt => "created_at": Date,
        UpdatedAt => "updated_at": Date,
        IncidentDate => "incident_date": Date,
        CompensationAmount => "compensation_amount": Number,
        SatisfactionRating => "satisfaction_rating": Number,
    }
}

/// A staff response recorded on a complaint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplaintResponse {
    pub id: u64,
    pub responder_name: String,
    pub responder_role: String,
    pub response_text: String,
    pub response_date: DateTime<Utc>,
    pub action_taken: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Complaint {
    pub id: u64,
    pub complaint_number: String,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
    pub guest_room: Option<String>,
    pub reservation_number: Option<String>,
    pub category: ComplaintCategory,
    pub priority: ComplaintPriority,
    pub status: ComplaintStatus,
    pub subject: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub assigned_to: String,
    pub department: String,
    /// Rating from 1 to 5 given once resolved
    pub satisfaction_rating: Option<u32>,
    pub compensation_offered: Option<String>,
    pub compensation_amount: Option<i64>,
    pub follow_up_required: bool,
    pub follow_up_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub responses: Vec<ComplaintResponse>,
    #[serde(default)]
    pub attachments: Vec<String>,
    pub location: Option<String>,
    pub incident_date: Option<DateTime<Utc>>,
}

impl Complaint {
    /// Whether the complaint still needs work
    pub fn is_active(&self) -> bool {
        matches!(
            self.status,
            ComplaintStatus::Open | ComplaintStatus::InProgress | ComplaintStatus::Escalated
        )
    }

    pub fn is_urgent(&self) -> bool {
        self.priority == ComplaintPriority::Urgent
    }

    /// Most recent staff response
    pub fn latest_response(&self) -> Option<&ComplaintResponse> {
        self.responses.iter().max_by_key(|response| response.response_date)
    }
}

impl Record for Complaint {
    type Field = ComplaintField;

    fn id(&self) -> u64 {
        self.id
    }

    fn value(&self, field: ComplaintField) -> FieldValue {
        match field {
            ComplaintField::ComplaintNumber => self.complaint_number.as_str().into(),
            ComplaintField::GuestName => self.guest_name.as_str().into(),
            ComplaintField::GuestEmail => self.guest_email.as_str().into(),
            ComplaintField::Subject => self.subject.as_str().into(),
            ComplaintField::Description => self.description.as_str().into(),
            ComplaintField::Category => self.category.into(),
            ComplaintField::Priority => self.priority.into(),
            ComplaintField::Status => self.status.into(),
            ComplaintField::Department => self.department.as_str().into(),
            ComplaintField::CreatedAt => self.created_at.into(),
            ComplaintField::UpdatedAt => self.updated_at.into(),
            ComplaintField::IncidentDate => self.incident_date.into(),
            ComplaintField::CompensationAmount => self.compensation_amount.into(),
            ComplaintField::SatisfactionRating => self.satisfaction_rating.into(),
        }
    }

    /// Also scans the description, so a term found only in the complaint body matches
    fn search_fields() -> &'static [ComplaintField] {
        &[
            ComplaintField::ComplaintNumber,
            ComplaintField::GuestName,
            ComplaintField::GuestEmail,
            ComplaintField::Subject,
            ComplaintField::Description,
        ]
    }

    fn default_sort() -> SortKey<ComplaintField> {
        SortKey::desc(ComplaintField::CreatedAt)
    }
}
