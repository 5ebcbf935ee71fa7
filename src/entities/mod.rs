//! Record types of the dashboard views

pub mod macros;

pub mod complaint;
pub mod fixtures;
pub mod guest;
pub mod reservation;

pub use complaint::{
    Complaint, ComplaintCategory, ComplaintField, ComplaintPriority, ComplaintResponse,
    ComplaintStatus,
};
pub use fixtures::{mock_complaints, mock_guests, mock_reservations};
pub use guest::{Guest, GuestField, RewardTier, Rewards, StayRecord, StayStatus};
pub use reservation::{
    BookingSource, GuestSummary, Reservation, ReservationField, ReservationStatus, ReservedRoom,
};
