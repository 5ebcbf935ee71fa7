//! Reservations listed on the bookings page

use crate::core::{FieldValue, Record, SortKey};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

crate::categorical_enum! {
    /// Lifecycle status of a reservation
    pub enum ReservationStatus {
        Confirmed => "CONFIRMED", "Confirmed",
        CheckedIn => "CHECKED_IN", "Checked In",
        CheckedOut => "CHECKED_OUT", "Checked Out",
        Pending => "PENDING", "Pending",
        Cancelled => "CANCELLED", "Cancelled",
        NoShow => "NO_SHOW", "No Show",
    }
}

crate::categorical_enum! {
    /// Channel the reservation was made through
    pub enum BookingSource {
        Direct => "DIRECT", "Direct",
        Ota => "OTA", "OTA",
        Website => "WEBSITE", "Website",
        Phone => "PHONE", "Phone",
        WalkIn => "WALK_IN", "Walk-in",
    }
}

crate::record_fields! {
    /// Sortable and filterable reservation fields
    pub enum ReservationField for "reservations" {
        ReservationNumber => "reservation_number": Text,
        GuestName => "guest_name": Text,
        GuestEmail => "guest_email": Text,
        CheckInDate => "check_in_date": Date,
        CheckOutDate => "check_out_date": Date,
        Nights => "nights": Number,
        Adults => "adults": Number,
        Children => "children": Number,
        TotalAmount => "total_amount": Number,
        CreatedAt => "created_at": Date,
        /// Number of the first reserved room
        RoomNumber => "room_number": Text,
        Status => "status": Categorical(ReservationStatus::ALL),
        BookingSource => "booking_source": Categorical(BookingSource::ALL),
    }
}

/// Contact details of the booking guest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestSummary {
    pub id: u64,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub nationality: String,
}

/// A room held by a reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservedRoom {
    pub id: u64,
    pub room_number: String,
    pub room_type_name: String,
    /// Nightly rate
    pub rate: i64,
    pub total_amount: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: u64,
    pub reservation_number: String,
    pub guest_name: String,
    pub guest_details: GuestSummary,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub nights: u32,
    pub adults: u32,
    pub children: u32,
    pub status: ReservationStatus,
    pub booking_source: BookingSource,
    pub total_rooms: u32,
    pub total_amount: i64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub rooms: Vec<ReservedRoom>,
    #[serde(default)]
    pub special_requests: String,
    pub can_cancel: bool,
}

impl Reservation {
    /// Number of the first reserved room, if any
    pub fn room_number(&self) -> Option<&str> {
        self.rooms.first().map(|room| room.room_number.as_str())
    }

    pub fn guest_email(&self) -> &str {
        &self.guest_details.email
    }

    /// Total number of guests staying
    pub fn party_size(&self) -> u32 {
        self.adults + self.children
    }

    /// Whether the reservation overlaps the night of `date`
    pub fn occupies(&self, date: NaiveDate) -> bool {
        self.check_in_date <= date && date < self.check_out_date
    }
}

impl Record for Reservation {
    type Field = ReservationField;

    fn id(&self) -> u64 {
        self.id
    }

    fn value(&self, field: ReservationField) -> FieldValue {
        match field {
            ReservationField::ReservationNumber => self.reservation_number.as_str().into(),
            ReservationField::GuestName => self.guest_name.as_str().into(),
            ReservationField::GuestEmail => self.guest_email().into(),
            ReservationField::CheckInDate => self.check_in_date.into(),
            ReservationField::CheckOutDate => self.check_out_date.into(),
            ReservationField::Nights => self.nights.into(),
            ReservationField::Adults => self.adults.into(),
            ReservationField::Children => self.children.into(),
            ReservationField::TotalAmount => self.total_amount.into(),
            ReservationField::CreatedAt => self.created_at.into(),
            ReservationField::RoomNumber => self.room_number().into(),
            ReservationField::Status => self.status.into(),
            ReservationField::BookingSource => self.booking_source.into(),
        }
    }

    fn search_fields() -> &'static [ReservationField] {
        &[
            ReservationField::ReservationNumber,
            ReservationField::GuestName,
            ReservationField::GuestEmail,
        ]
    }

    fn default_sort() -> SortKey<ReservationField> {
        SortKey::desc(ReservationField::CreatedAt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FieldKind, RecordField};
    use crate::entities::fixtures::mock_reservations;

    #[test]
    fn test_status_wire_names() {
        let status: ReservationStatus = serde_json::from_str("\"CHECKED_IN\"").unwrap();
        assert_eq!(status, ReservationStatus::CheckedIn);
        assert_eq!(status.label(), "Checked In");
        assert_eq!(
            serde_json::to_string(&BookingSource::WalkIn).unwrap(),
            "\"WALK_IN\""
        );
    }

    #[test]
    fn test_field_declarations() {
        assert_eq!(
            ReservationField::parse("total_amount"),
            Ok(ReservationField::TotalAmount)
        );
        assert_eq!(ReservationField::Status.kind(), FieldKind::Categorical);
        assert!(ReservationField::Status.choices().contains(&"NO_SHOW"));
        assert!(ReservationField::parse("status_display").is_err());
    }

    #[test]
    fn test_values() {
        let reservations = mock_reservations().unwrap();
        let first = &reservations[0];

        assert_eq!(
            first.value(ReservationField::GuestEmail),
            FieldValue::from("john.smith@email.com")
        );
        assert_eq!(
            first.value(ReservationField::RoomNumber),
            FieldValue::from("101")
        );
        assert_eq!(
            first.value(ReservationField::Status),
            FieldValue::from("CONFIRMED")
        );
        assert_eq!(
            first.value(ReservationField::TotalAmount),
            FieldValue::Integer(6_750_000)
        );
    }

    #[test]
    fn test_room_number_absent_without_rooms() {
        let mut reservation = mock_reservations().unwrap().remove(0);
        reservation.rooms.clear();
        assert!(reservation.value(ReservationField::RoomNumber).is_null());
    }

    #[test]
    fn test_occupies() {
        let reservation = mock_reservations().unwrap().remove(0);
        let day = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();

        assert!(reservation.occupies(day("2025-08-26")));
        assert!(reservation.occupies(day("2025-08-28")));
        assert!(!reservation.occupies(day("2025-08-29")));
        assert_eq!(reservation.party_size(), 2);
    }
}
