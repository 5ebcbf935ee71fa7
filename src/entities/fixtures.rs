//! Sample records shipped with the dashboard

use crate::core::{Result, ViewError};
use crate::entities::{Complaint, Guest, Reservation};
use serde::de::DeserializeOwned;

const RESERVATIONS: &str = include_str!("../../fixtures/reservations.json");
const COMPLAINTS: &str = include_str!("../../fixtures/complaints.json");
const GUESTS: &str = include_str!("../../fixtures/guests.json");

fn decode<T: DeserializeOwned>(resource: &str, raw: &str) -> Result<Vec<T>> {
    serde_json::from_str(raw)
        .map_err(|e| ViewError::Load(format!("invalid {} fixture: {}", resource, e)))
}

/// The 13 sample reservations of the bookings page
pub fn mock_reservations() -> Result<Vec<Reservation>> {
    decode("reservations", RESERVATIONS)
}

/// The 5 sample complaints, with their responses
pub fn mock_complaints() -> Result<Vec<Complaint>> {
    decode("complaints", COMPLAINTS)
}

/// The 3 sample guests, with rewards and recent stays
pub fn mock_guests() -> Result<Vec<Guest>> {
    decode("guests", GUESTS)
}
