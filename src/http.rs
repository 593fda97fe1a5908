use crate::availability::{day_availability, Slot, SlotGrid};
use crate::backend::BookingBackend;
use crate::configuration::Configuration;
use crate::error::BookingError;
use crate::notification::Notifier;
use crate::pricing;
use crate::types::{hhmm, hhmm_option, BlockedTime, Booking, BookingStatus, Catalog, NewBlockedTime, NewBooking, TimeSlot, VehicleType};
use axum::extract::{Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_valid::Valid;
use chrono::{Local, NaiveDate, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::error;
use uuid::Uuid;
use validator::{Validate, ValidationError};

lazy_static! {
    static ref PHONE_PATTERN: Regex = Regex::new(r"^\+?[0-9][0-9 ()\-/]{5,19}$").unwrap();
}

#[derive(Clone)]
pub struct AppState<T: BookingBackend, C: Configuration> {
    backend: T,
    configuration: C,
    notifier: Arc<dyn Notifier>,
}

#[derive(Debug, Deserialize)]
struct AvailabilityQuery {
    date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = validate_appointment_in_future))]
struct BookingRequest {
    package_id: Uuid,
    sub_package_id: Uuid,
    vehicle_type: VehicleType,
    date: NaiveDate,
    #[serde(with = "hhmm")]
    start_time: NaiveTime,
    #[serde(default)]
    add_on_ids: Vec<Uuid>,
    #[validate(length(min = 1, max = 120))]
    customer_name: String,
    #[validate(email)]
    customer_email: String,
    #[validate(regex(path = *PHONE_PATTERN))]
    customer_phone: String,
    notes: Option<String>,
}

fn validate_appointment_in_future(request: &BookingRequest) -> Result<(), ValidationError> {
    // local wall-clock time; the business works in one time zone
    if request.date.and_time(request.start_time) <= Local::now().naive_local() {
        return Err(ValidationError::new("appointment_in_past"));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TransitionRequest {
    id: Uuid,
    status: BookingStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = validate_block_shape))]
struct BlockedTimeRequest {
    date: NaiveDate,
    #[serde(default, with = "hhmm_option")]
    start_time: Option<NaiveTime>,
    #[serde(default, with = "hhmm_option")]
    end_time: Option<NaiveTime>,
    #[serde(default)]
    is_full_day: bool,
    reason: Option<String>,
}

fn validate_block_shape(request: &BlockedTimeRequest) -> Result<(), ValidationError> {
    if request.is_full_day {
        return Ok(());
    }
    match (request.start_time, request.end_time) {
        (Some(from), Some(until)) if from < until => Ok(()),
        _ => Err(ValidationError::new("partial_block_needs_ordered_range")),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RemoveBlockedTimeRequest {
    id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = validate_slot_range))]
struct AddTimeSlotRequest {
    date: NaiveDate,
    #[serde(with = "hhmm")]
    start_time: NaiveTime,
    #[serde(with = "hhmm")]
    end_time: NaiveTime,
}

fn validate_slot_range(request: &AddTimeSlotRequest) -> Result<(), ValidationError> {
    if request.start_time >= request.end_time {
        return Err(ValidationError::new("slot_range_out_of_order"));
    }
    Ok(())
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let status = match &self {
            BookingError::SlotUnavailable | BookingError::InvalidTransition { .. } => {
                StatusCode::CONFLICT
            }
            BookingError::Validation(_) => StatusCode::BAD_REQUEST,
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(err = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub fn create_app<T: BookingBackend, C: Configuration>(
    backend: T,
    configuration: C,
    notifier: Arc<dyn Notifier>,
) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let password = configuration.password();

    let public = Router::new()
        .route("/availability", get(get_availability::<T, C>))
        .route("/catalog", get(get_catalog::<T, C>))
        .route("/book", post(book_appointment::<T, C>));

    let admin = Router::new()
        .route("/admin/bookings", get(get_bookings::<T, C>))
        .route(
            "/admin/bookings/transition",
            post(transition_booking::<T, C>),
        )
        .route(
            "/admin/blocked_times",
            get(get_blocked_times::<T, C>).post(add_blocked_time::<T, C>),
        )
        .route(
            "/admin/blocked_times/remove",
            post(remove_blocked_time::<T, C>),
        )
        .route("/admin/slots", post(add_time_slot::<T, C>))
        .route_layer(middleware::from_fn(move |request: Request, next: Next| {
            let password = password.clone();
            async move { admin_auth(&password, request, next).await }
        }));

    Router::new()
        .merge(public)
        .merge(admin)
        .with_state(AppState {
            backend,
            configuration,
            notifier,
        })
        .layer(cors)
}

async fn admin_auth(
    password: &str,
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    match request.headers().get("x-admin-password") {
        Some(header) if header.to_str().unwrap_or("") == password => Ok(next.run(request).await),
        Some(_) => Err((StatusCode::UNAUTHORIZED, "Unauthorized".to_string())),
        None => Err((StatusCode::UNAUTHORIZED, "Missing credentials".to_string())),
    }
}

fn slot_grid<C: Configuration>(configuration: &C) -> SlotGrid {
    SlotGrid {
        opening: configuration.opening_time(),
        closing: configuration.closing_time(),
        slot_minutes: configuration.slot_minutes(),
    }
}

async fn get_availability<T: BookingBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Vec<Slot>>, BookingError> {
    let taken = state.backend.booked_times(query.date)?;
    let blocks = state.backend.blocked_times_on(query.date)?;
    Ok(Json(day_availability(
        &slot_grid(&state.configuration),
        &taken,
        &blocks,
    )))
}

async fn get_catalog<T: BookingBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
) -> Result<Json<Catalog>, BookingError> {
    Ok(Json(state.backend.catalog()?))
}

async fn book_appointment<T: BookingBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
    Valid(Json(request)): Valid<Json<BookingRequest>>,
) -> Result<Json<Booking>, BookingError> {
    let grid = slot_grid(&state.configuration);
    if !grid.contains(request.start_time) {
        return Err(BookingError::Validation(
            "requested time is outside the bookable grid".into(),
        ));
    }

    // The total is computed here from catalog rows, not taken from the
    // client.
    let catalog = state.backend.catalog()?;
    let quote = pricing::quote(
        &catalog,
        request.package_id,
        request.sub_package_id,
        request.vehicle_type,
        &request.add_on_ids,
    )?;

    let booking = state.backend.reserve_and_book(NewBooking {
        package_id: request.package_id,
        sub_package_id: Some(request.sub_package_id),
        vehicle_type: request.vehicle_type,
        date: request.date,
        start_time: request.start_time,
        end_time: grid.end_of(request.start_time),
        add_on_ids: request.add_on_ids,
        customer_name: request.customer_name,
        customer_email: request.customer_email,
        customer_phone: request.customer_phone,
        notes: request.notes,
        total_price_cents: quote.total_cents(),
    })?;

    // Notification happens after the booking committed; its outcome
    // can't undo the booking.
    state.notifier.booking_created(&booking);

    Ok(Json(booking))
}

async fn get_bookings<T: BookingBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
) -> Result<Json<Vec<Booking>>, BookingError> {
    Ok(Json(state.backend.bookings()?))
}

async fn transition_booking<T: BookingBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
    Json(request): Json<TransitionRequest>,
) -> Result<Json<Booking>, BookingError> {
    Ok(Json(
        state
            .backend
            .transition_booking(request.id, request.status)?,
    ))
}

async fn get_blocked_times<T: BookingBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
) -> Result<Json<Vec<BlockedTime>>, BookingError> {
    Ok(Json(state.backend.blocked_times()?))
}

async fn add_blocked_time<T: BookingBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
    Valid(Json(request)): Valid<Json<BlockedTimeRequest>>,
) -> Result<Json<BlockedTime>, BookingError> {
    Ok(Json(state.backend.add_blocked_time(NewBlockedTime {
        date: request.date,
        start_time: request.start_time,
        end_time: request.end_time,
        is_full_day: request.is_full_day,
        reason: request.reason,
    })?))
}

async fn remove_blocked_time<T: BookingBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
    Json(request): Json<RemoveBlockedTimeRequest>,
) -> Result<StatusCode, BookingError> {
    state.backend.remove_blocked_time(request.id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn add_time_slot<T: BookingBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
    Valid(Json(request)): Valid<Json<AddTimeSlotRequest>>,
) -> Result<Json<TimeSlot>, BookingError> {
    Ok(Json(state.backend.reserve_slot(
        request.date,
        request.start_time,
        request.end_time,
    )?))
}
