use crate::backend::BookingBackend;
use crate::error::{BookingError, BookingResult};
use crate::types::{
    AddOn, BlockedTime, Booking, BookingStatus, Catalog, NewBlockedTime, NewBooking, Package,
    Price, SubPackage, TimeSlot, VehicleType,
};
use chrono::{NaiveDate, NaiveTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Catalog the in-memory backend starts with when no database is
/// configured, so the booking flow works out of the box.
pub fn example_catalog() -> Catalog {
    let mut catalog = Catalog::default();

    let package_definitions = [
        ("Exterior Detail", "Hand wash, clay bar and paint sealant", 7_500),
        ("Interior Detail", "Vacuum, steam clean and conditioning", 9_000),
        ("Full Detail", "Complete interior and exterior treatment", 15_000),
    ];
    for (name, description, base_cents) in package_definitions {
        let package_id = Uuid::new_v4();
        catalog.packages.push(Package {
            id: package_id,
            name: name.into(),
            description: description.into(),
        });
        for (tier, surcharge_cents) in [("Standard", 0), ("Premium", 4_000)] {
            let sub_package_id = Uuid::new_v4();
            catalog.sub_packages.push(SubPackage {
                id: sub_package_id,
                package_id,
                name: tier.into(),
                description: format!("{tier} tier of {name}"),
            });
            for (index, vehicle_type) in VehicleType::ALL.into_iter().enumerate() {
                catalog.prices.push(Price {
                    id: Uuid::new_v4(),
                    sub_package_id,
                    vehicle_type,
                    amount_cents: base_cents + surcharge_cents + 1_500 * index as i32,
                });
            }
        }
    }

    for (name, price_cents) in [
        ("Engine Bay Cleaning", 3_500),
        ("Pet Hair Removal", 2_500),
        ("Headlight Restoration", 4_500),
    ] {
        catalog.add_ons.push(AddOn {
            id: Uuid::new_v4(),
            name: name.into(),
            price_cents,
        });
    }

    catalog
}

#[derive(Debug, Default)]
struct Store {
    time_slots: HashMap<Uuid, TimeSlot>,
    bookings: HashMap<Uuid, Booking>,
    blocked_times: HashMap<Uuid, BlockedTime>,
    catalog: Catalog,
}

/// In-memory backend. One mutex guards the whole store, so every
/// operation observes and mutates a consistent snapshot; holding the
/// guard across check-reserve-insert is what makes `reserve_and_book`
/// atomic here.
#[derive(Debug, Clone, Default)]
pub struct LocalBookings {
    store: Arc<Mutex<Store>>,
}

impl LocalBookings {
    pub fn insert_example_catalog(&self) {
        let mut store = self.store.lock().unwrap();
        store.catalog = example_catalog();
    }

    fn reserve_slot_locked(
        store: &mut Store,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> TimeSlot {
        if let Some(slot) = store
            .time_slots
            .values()
            .find(|slot| slot.date == date && slot.start_time == start_time)
        {
            return slot.clone();
        }
        let id = Uuid::new_v4();
        let slot = TimeSlot {
            id,
            date,
            start_time,
            end_time,
            is_active: true,
        };
        store.time_slots.insert(id, slot.clone());
        slot
    }
}

impl BookingBackend for LocalBookings {
    fn reserve_and_book(&self, new_booking: NewBooking) -> BookingResult<Booking> {
        let mut store = self.store.lock().unwrap();

        let conflict = store.bookings.values().any(|booking| {
            booking.date == new_booking.date
                && booking.start_time == new_booking.start_time
                && booking.status != BookingStatus::Cancelled
        });
        if conflict {
            return Err(BookingError::SlotUnavailable);
        }

        let slot = Self::reserve_slot_locked(
            &mut store,
            new_booking.date,
            new_booking.start_time,
            new_booking.end_time,
        );

        let now = Utc::now();
        let booking = Booking {
            id: Uuid::new_v4(),
            package_id: new_booking.package_id,
            sub_package_id: new_booking.sub_package_id,
            vehicle_type: new_booking.vehicle_type,
            date: new_booking.date,
            start_time: new_booking.start_time,
            time_slot_id: slot.id,
            status: BookingStatus::Pending,
            add_on_ids: new_booking.add_on_ids,
            customer_name: new_booking.customer_name,
            customer_email: new_booking.customer_email,
            customer_phone: new_booking.customer_phone,
            notes: new_booking.notes,
            total_price_cents: new_booking.total_price_cents,
            created_at: now,
            updated_at: now,
        };
        store.bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    fn reserve_slot(
        &self,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> BookingResult<TimeSlot> {
        let mut store = self.store.lock().unwrap();
        Ok(Self::reserve_slot_locked(
            &mut store, date, start_time, end_time,
        ))
    }

    fn booked_times(&self, date: NaiveDate) -> BookingResult<Vec<NaiveTime>> {
        let store = self.store.lock().unwrap();
        let mut times: Vec<NaiveTime> = store
            .bookings
            .values()
            .filter(|booking| booking.date == date && booking.status != BookingStatus::Cancelled)
            .map(|booking| booking.start_time)
            .collect();
        times.sort_unstable();
        Ok(times)
    }

    fn blocked_times_on(&self, date: NaiveDate) -> BookingResult<Vec<BlockedTime>> {
        let store = self.store.lock().unwrap();
        Ok(store
            .blocked_times
            .values()
            .filter(|blocked_time| blocked_time.date == Some(date))
            .cloned()
            .collect())
    }

    fn bookings(&self) -> BookingResult<Vec<Booking>> {
        let store = self.store.lock().unwrap();
        let mut bookings: Vec<Booking> = store.bookings.values().cloned().collect();
        bookings.sort_unstable_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bookings)
    }

    fn transition_booking(&self, id: Uuid, target: BookingStatus) -> BookingResult<Booking> {
        let mut store = self.store.lock().unwrap();
        let booking = store
            .bookings
            .get_mut(&id)
            .ok_or(BookingError::NotFound("booking"))?;
        if !booking.status.can_transition_to(target) {
            return Err(BookingError::InvalidTransition {
                from: booking.status,
                to: target,
            });
        }
        booking.status = target;
        booking.updated_at = Utc::now();
        Ok(booking.clone())
    }

    fn add_blocked_time(&self, new_blocked_time: NewBlockedTime) -> BookingResult<BlockedTime> {
        let mut store = self.store.lock().unwrap();
        let id = Uuid::new_v4();
        // full-day blocks carry no time range
        let (start_time, end_time) = if new_blocked_time.is_full_day {
            (None, None)
        } else {
            (new_blocked_time.start_time, new_blocked_time.end_time)
        };
        let blocked_time = BlockedTime {
            id,
            date: Some(new_blocked_time.date),
            start_time,
            end_time,
            is_full_day: new_blocked_time.is_full_day,
            reason: new_blocked_time.reason,
            created_at: Utc::now(),
        };
        store.blocked_times.insert(id, blocked_time.clone());
        Ok(blocked_time)
    }

    fn blocked_times(&self) -> BookingResult<Vec<BlockedTime>> {
        let store = self.store.lock().unwrap();
        let mut blocked_times: Vec<BlockedTime> = store.blocked_times.values().cloned().collect();
        blocked_times.sort_unstable_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(blocked_times)
    }

    fn remove_blocked_time(&self, id: Uuid) -> BookingResult<()> {
        let mut store = self.store.lock().unwrap();
        if store.blocked_times.remove(&id).is_none() {
            return Err(BookingError::NotFound("blocked time"));
        }
        Ok(())
    }

    fn catalog(&self) -> BookingResult<Catalog> {
        let store = self.store.lock().unwrap();
        Ok(store.catalog.clone())
    }
}
