use crate::error::BookingResult;
use crate::types::{
    BlockedTime, Booking, BookingStatus, Catalog, NewBlockedTime, NewBooking, TimeSlot,
};
use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

/// Storage contract shared by the in-memory and database backends.
///
/// `reserve_and_book` is the one operation with a real correctness
/// contract: the conflict re-check, the slot get-or-create and the
/// booking insert happen as a single atomic unit, so that of N
/// concurrent attempts on the same (date, start_time) exactly one
/// succeeds and the rest fail with `SlotUnavailable`.
pub trait BookingBackend: Clone + Send + Sync + 'static {
    fn reserve_and_book(&self, new_booking: NewBooking) -> BookingResult<Booking>;

    /// Idempotent get-or-create on (date, start_time); an existing slot
    /// is returned unchanged.
    fn reserve_slot(
        &self,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> BookingResult<TimeSlot>;

    /// Start times of non-cancelled bookings on the date. Cancelled
    /// bookings are invisible here, which is what frees their slot.
    fn booked_times(&self, date: NaiveDate) -> BookingResult<Vec<NaiveTime>>;

    fn blocked_times_on(&self, date: NaiveDate) -> BookingResult<Vec<BlockedTime>>;

    fn bookings(&self) -> BookingResult<Vec<Booking>>;

    fn transition_booking(&self, id: Uuid, target: BookingStatus) -> BookingResult<Booking>;

    fn add_blocked_time(&self, new_blocked_time: NewBlockedTime) -> BookingResult<BlockedTime>;

    fn blocked_times(&self) -> BookingResult<Vec<BlockedTime>>;

    fn remove_blocked_time(&self, id: Uuid) -> BookingResult<()>;

    fn catalog(&self) -> BookingResult<Catalog>;
}
