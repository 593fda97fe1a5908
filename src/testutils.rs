use crate::backend::BookingBackend;
use crate::configuration::Configuration;
use crate::error::{BookingError, BookingResult};
use crate::local_bookings::example_catalog;
use crate::notification::Notifier;
use crate::types::{
    BlockedTime, Booking, BookingStatus, Catalog, NewBlockedTime, NewBooking, TimeSlot,
};
use chrono::{NaiveDate, NaiveTime, Utc};
use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc, Mutex,
};
use uuid::Uuid;

pub struct MockBookingBackendInner {
    pub success: AtomicBool,
    pub failure: Mutex<BookingError>,
    pub calls_to_reserve_and_book: AtomicU64,
    pub calls_to_reserve_slot: AtomicU64,
    pub calls_to_booked_times: AtomicU64,
    pub calls_to_blocked_times_on: AtomicU64,
    pub calls_to_bookings: AtomicU64,
    pub calls_to_transition_booking: AtomicU64,
    pub calls_to_add_blocked_time: AtomicU64,
    pub calls_to_blocked_times: AtomicU64,
    pub calls_to_remove_blocked_time: AtomicU64,
    pub calls_to_catalog: AtomicU64,
    pub booked: Mutex<Vec<NaiveTime>>,
    pub blocked: Mutex<Vec<BlockedTime>>,
    pub bookings: Mutex<Vec<Booking>>,
    pub catalog: Mutex<Catalog>,
}

#[derive(Clone)]
pub struct MockBookingBackend(pub Arc<MockBookingBackendInner>);

impl MockBookingBackend {
    pub fn new() -> Self {
        Self(Arc::new(MockBookingBackendInner {
            success: AtomicBool::new(true),
            failure: Mutex::new(BookingError::SlotUnavailable),
            calls_to_reserve_and_book: AtomicU64::default(),
            calls_to_reserve_slot: AtomicU64::default(),
            calls_to_booked_times: AtomicU64::default(),
            calls_to_blocked_times_on: AtomicU64::default(),
            calls_to_bookings: AtomicU64::default(),
            calls_to_transition_booking: AtomicU64::default(),
            calls_to_add_blocked_time: AtomicU64::default(),
            calls_to_blocked_times: AtomicU64::default(),
            calls_to_remove_blocked_time: AtomicU64::default(),
            calls_to_catalog: AtomicU64::default(),
            booked: Mutex::default(),
            blocked: Mutex::default(),
            bookings: Mutex::default(),
            catalog: Mutex::new(example_catalog()),
        }))
    }

    pub fn fail_with(&self, failure: BookingError) {
        self.0.success.store(false, Ordering::SeqCst);
        *self.0.failure.lock().unwrap() = failure;
    }

    fn result(&self) -> BookingResult<()> {
        if self.0.success.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(self.0.failure.lock().unwrap().clone())
        }
    }
}

pub fn example_booking(date: NaiveDate, start_time: NaiveTime, status: BookingStatus) -> Booking {
    let now = Utc::now();
    Booking {
        id: Uuid::new_v4(),
        package_id: Uuid::new_v4(),
        sub_package_id: Some(Uuid::new_v4()),
        vehicle_type: crate::types::VehicleType::Sedan,
        date,
        start_time,
        time_slot_id: Uuid::new_v4(),
        status,
        add_on_ids: vec![],
        customer_name: "Ada Lovelace".into(),
        customer_email: "ada@example.com".into(),
        customer_phone: "+43 660 1234567".into(),
        notes: None,
        total_price_cents: 7_500,
        created_at: now,
        updated_at: now,
    }
}

fn booking_from(new_booking: NewBooking) -> Booking {
    let now = Utc::now();
    Booking {
        id: Uuid::new_v4(),
        package_id: new_booking.package_id,
        sub_package_id: new_booking.sub_package_id,
        vehicle_type: new_booking.vehicle_type,
        date: new_booking.date,
        start_time: new_booking.start_time,
        time_slot_id: Uuid::new_v4(),
        status: BookingStatus::Pending,
        add_on_ids: new_booking.add_on_ids,
        customer_name: new_booking.customer_name,
        customer_email: new_booking.customer_email,
        customer_phone: new_booking.customer_phone,
        notes: new_booking.notes,
        total_price_cents: new_booking.total_price_cents,
        created_at: now,
        updated_at: now,
    }
}

impl BookingBackend for MockBookingBackend {
    fn reserve_and_book(&self, new_booking: NewBooking) -> BookingResult<Booking> {
        self.0
            .calls_to_reserve_and_book
            .fetch_add(1, Ordering::SeqCst);
        self.result()?;
        Ok(booking_from(new_booking))
    }

    fn reserve_slot(
        &self,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> BookingResult<TimeSlot> {
        self.0.calls_to_reserve_slot.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        Ok(TimeSlot {
            id: Uuid::new_v4(),
            date,
            start_time,
            end_time,
            is_active: true,
        })
    }

    fn booked_times(&self, _date: NaiveDate) -> BookingResult<Vec<NaiveTime>> {
        self.0.calls_to_booked_times.fetch_add(1, Ordering::SeqCst);
        Ok(self.0.booked.lock().unwrap().clone())
    }

    fn blocked_times_on(&self, _date: NaiveDate) -> BookingResult<Vec<BlockedTime>> {
        self.0
            .calls_to_blocked_times_on
            .fetch_add(1, Ordering::SeqCst);
        Ok(self.0.blocked.lock().unwrap().clone())
    }

    fn bookings(&self) -> BookingResult<Vec<Booking>> {
        self.0.calls_to_bookings.fetch_add(1, Ordering::SeqCst);
        Ok(self.0.bookings.lock().unwrap().clone())
    }

    fn transition_booking(&self, id: Uuid, target: BookingStatus) -> BookingResult<Booking> {
        self.0
            .calls_to_transition_booking
            .fetch_add(1, Ordering::SeqCst);
        self.result()?;
        let mut booking = example_booking(
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            target,
        );
        booking.id = id;
        Ok(booking)
    }

    fn add_blocked_time(&self, new_blocked_time: NewBlockedTime) -> BookingResult<BlockedTime> {
        self.0
            .calls_to_add_blocked_time
            .fetch_add(1, Ordering::SeqCst);
        self.result()?;
        Ok(BlockedTime {
            id: Uuid::new_v4(),
            date: Some(new_blocked_time.date),
            start_time: new_blocked_time.start_time,
            end_time: new_blocked_time.end_time,
            is_full_day: new_blocked_time.is_full_day,
            reason: new_blocked_time.reason,
            created_at: Utc::now(),
        })
    }

    fn blocked_times(&self) -> BookingResult<Vec<BlockedTime>> {
        self.0.calls_to_blocked_times.fetch_add(1, Ordering::SeqCst);
        Ok(self.0.blocked.lock().unwrap().clone())
    }

    fn remove_blocked_time(&self, _id: Uuid) -> BookingResult<()> {
        self.0
            .calls_to_remove_blocked_time
            .fetch_add(1, Ordering::SeqCst);
        self.result()
    }

    fn catalog(&self) -> BookingResult<Catalog> {
        self.0.calls_to_catalog.fetch_add(1, Ordering::SeqCst);
        Ok(self.0.catalog.lock().unwrap().clone())
    }
}

#[derive(Clone)]
pub struct TestConfiguration;

impl Configuration for TestConfiguration {
    fn password(&self) -> String {
        "123".into()
    }

    fn port(&self) -> String {
        "0".into()
    }

    fn database_url(&self) -> Option<String> {
        None
    }

    fn opening_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(9, 0, 0).unwrap()
    }

    fn closing_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(17, 0, 0).unwrap()
    }

    fn slot_minutes(&self) -> u32 {
        30
    }
}

#[derive(Clone, Default)]
pub struct CountingNotifier(pub Arc<AtomicU64>);

impl CountingNotifier {
    pub fn notifications(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

impl Notifier for CountingNotifier {
    fn booking_created(&self, _booking: &Booking) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}
