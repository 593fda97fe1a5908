use crate::types::Booking;
use tracing::info;

/// Boundary to the email collaborator. Invoked by the HTTP layer after
/// a booking committed, never inside the reservation transaction; a
/// failing notifier must not undo a booking, so the contract returns
/// nothing.
pub trait Notifier: Send + Sync + 'static {
    fn booking_created(&self, booking: &Booking);
}

/// Stand-in delivery that records the event in the log stream.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn booking_created(&self, booking: &Booking) {
        info!(
            booking_id = %booking.id,
            customer_email = %booking.customer_email,
            date = %booking.date,
            start_time = %booking.start_time.format(crate::types::hhmm::FORMAT),
            total_price_cents = booking.total_price_cents,
            "booking confirmation queued"
        );
    }
}
