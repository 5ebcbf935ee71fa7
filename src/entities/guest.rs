//! Guest profiles with loyalty membership and stay history

use crate::core::{FieldValue, Record, SortKey};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

crate::categorical_enum! {
    /// Loyalty program tier
    pub enum RewardTier {
        Bronze => "Bronze", "Bronze",
        Silver => "Silver", "Silver",
        Gold => "Gold", "Gold",
        Platinum => "Platinum", "Platinum",
        Diamond => "Diamond", "Diamond",
    }
}

crate::categorical_enum! {
    pub enum StayStatus {
        Completed => "completed", "Completed",
        Cancelled => "cancelled", "Cancelled",
        NoShow => "no_show", "No Show",
    }
}

crate::record_fields! {
    /// Sortable and filterable guest fields
    pub enum GuestField for "guests" {
        FullName => "full_name": Text,
        Email => "email": Text,
        Phone => "phone": Text,
        Nationality => "nationality": Text,
        VipStatus => "vip_status": Boolean,
        /// Loyalty tier, absent for non-members
        Tier => "tier": Categorical(RewardTier::ALL),
        TotalStays => "total_stays": Number,
        TotalNights => "total_nights": Number,
        TotalSpent => "total_spent": Number,
        AvgRating => "avg_rating": Number,
        LastStay => "last_stay": Date,
        CreatedAt => "created_at": Date,
        HasAllergies => "has_allergies": Boolean,
        Blacklisted => "blacklisted": Boolean,
    }
}

/// Loyalty program membership
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rewards {
    pub program_name: String,
    pub member_number: String,
    pub tier_level: RewardTier,
    pub points_balance: u64,
    pub points_lifetime: u64,
    #[serde(default)]
    pub tier_benefits: Vec<String>,
    /// Points still needed to reach the next tier
    pub next_tier_required: u64,
    pub points_expiring: u64,
    pub expiry_date: NaiveDate,
    pub join_date: NaiveDate,
}

/// One past stay of a guest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StayRecord {
    pub id: u64,
    pub reservation_number: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub nights: u32,
    pub room_type: String,
    pub room_number: String,
    pub total_amount: i64,
    pub points_earned: u64,
    pub rating: Option<u32>,
    pub review: Option<String>,
    pub status: StayStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    pub id: u64,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub nationality: String,
    pub address: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub id_number: String,
    pub id_type: String,
    pub vip_status: bool,
    #[serde(default)]
    pub preferences: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub created_at: DateTime<Utc>,
    pub last_stay: DateTime<Utc>,
    pub total_stays: u32,
    pub total_nights: u32,
    pub total_spent: i64,
    pub avg_rating: f64,
    pub rewards: Option<Rewards>,
    #[serde(default)]
    pub recent_stays: Vec<StayRecord>,
    #[serde(default)]
    pub notes: String,
    pub blacklisted: bool,
    pub favorite_room_type: Option<String>,
    pub preferred_floor: Option<u32>,
    pub marketing_consent: bool,
}

impl Guest {
    pub fn tier(&self) -> Option<RewardTier> {
        self.rewards.as_ref().map(|rewards| rewards.tier_level)
    }

    pub fn has_allergies(&self) -> bool {
        !self.allergies.is_empty()
    }

    /// Stays that were actually completed
    pub fn completed_stays(&self) -> impl Iterator<Item = &StayRecord> {
        self.recent_stays
            .iter()
            .filter(|stay| stay.status == StayStatus::Completed)
    }
}

impl Record for Guest {
    type Field = GuestField;

    fn id(&self) -> u64 {
        self.id
    }

    fn value(&self, field: GuestField) -> FieldValue {
        match field {
            GuestField::FullName => self.full_name.as_str().into(),
            GuestField::Email => self.email.as_str().into(),
            GuestField::Phone => self.phone.as_str().into(),
            GuestField::Nationality => self.nationality.as_str().into(),
            GuestField::VipStatus => self.vip_status.into(),
            GuestField::Tier => self.tier().into(),
            GuestField::TotalStays => self.total_stays.into(),
            GuestField::TotalNights => self.total_nights.into(),
            GuestField::TotalSpent => self.total_spent.into(),
            GuestField::AvgRating => self.avg_rating.into(),
            GuestField::LastStay => self.last_stay.into(),
            GuestField::CreatedAt => self.created_at.into(),
            GuestField::HasAllergies => self.has_allergies().into(),
            GuestField::Blacklisted => self.blacklisted.into(),
        }
    }

    fn search_fields() -> &'static [GuestField] {
        &[GuestField::FullName, GuestField::Email, GuestField::Phone]
    }

    fn default_sort() -> SortKey<GuestField> {
        SortKey::asc(GuestField::FullName)
    }
}
