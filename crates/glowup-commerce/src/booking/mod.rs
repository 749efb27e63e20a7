//! Appointment booking.
//!
//! A booking form is validated field by field into a [`BookingRequest`],
//! which is then confirmed locally. Nothing is submitted anywhere; the
//! confirmation only tells the customer they will be contacted.

mod request;

pub use request::{
    BookingConfirmation, BookingErrors, BookingField, BookingForm, BookingRequest, FieldError,
    BOOKING_FOLLOW_UP, CLOSING_TIME, MSG_BOOKING_CONFIRMED, OPENING_TIME, SLOT_MINUTES,
};
