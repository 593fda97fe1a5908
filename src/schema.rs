diesel::table! {
    time_slots (id) {
        id -> Uuid,
        date -> Date,
        start_time -> Time,
        end_time -> Time,
        is_active -> Bool,
    }
}

diesel::table! {
    bookings (id) {
        id -> Uuid,
        package_id -> Uuid,
        sub_package_id -> Nullable<Uuid>,
        vehicle_type -> Text,
        date -> Date,
        start_time -> Time,
        time_slot_id -> Uuid,
        status -> Text,
        customer_name -> Text,
        customer_email -> Text,
        customer_phone -> Text,
        notes -> Nullable<Text>,
        total_price_cents -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    booking_add_ons (booking_id, add_on_id) {
        booking_id -> Uuid,
        add_on_id -> Uuid,
    }
}

diesel::table! {
    blocked_times (id) {
        id -> Uuid,
        date -> Nullable<Date>,
        start_time -> Nullable<Time>,
        end_time -> Nullable<Time>,
        is_full_day -> Bool,
        reason -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    packages (id) {
        id -> Uuid,
        name -> Text,
        description -> Text,
    }
}

diesel::table! {
    sub_packages (id) {
        id -> Uuid,
        package_id -> Uuid,
        name -> Text,
        description -> Text,
    }
}

diesel::table! {
    add_ons (id) {
        id -> Uuid,
        name -> Text,
        price_cents -> Int4,
    }
}

diesel::table! {
    prices (id) {
        id -> Uuid,
        sub_package_id -> Uuid,
        vehicle_type -> Text,
        amount_cents -> Int4,
    }
}

diesel::joinable!(bookings -> time_slots (time_slot_id));
diesel::joinable!(booking_add_ons -> bookings (booking_id));
diesel::joinable!(booking_add_ons -> add_ons (add_on_id));
diesel::joinable!(sub_packages -> packages (package_id));
diesel::joinable!(prices -> sub_packages (sub_package_id));

diesel::allow_tables_to_appear_in_same_query!(
    time_slots,
    bookings,
    booking_add_ons,
    blocked_times,
    packages,
    sub_packages,
    add_ons,
    prices,
);
