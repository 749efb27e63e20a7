//! Booking form validation and confirmation.

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Months, NaiveDate, NaiveTime, Timelike, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::catalog::{find_service, Service};
use crate::error::CommerceError;
use crate::notify::{Notification, Notifier};

pub const MSG_BOOKING_CONFIRMED: &str = "Booking confirmed!";

/// Shown under every booking confirmation.
pub const BOOKING_FOLLOW_UP: &str =
    "We will confirm your appointment shortly via email or phone.";

/// First bookable slot.
pub const OPENING_TIME: &str = "09:00";
/// Last bookable slot.
pub const CLOSING_TIME: &str = "19:00";
/// Slots start on these minute boundaries.
pub const SLOT_MINUTES: u32 = 30;

const OPENS_AT_MINUTE: u32 = 9 * 60;
const CLOSES_AT_MINUTE: u32 = 19 * 60;

/// Furthest ahead an appointment can be booked.
const BOOKING_HORIZON_MONTHS: u32 = 3;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"));

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+]?[(]?[0-9]{3}[)]?[-\s.]?[0-9]{3}[-\s.]?[0-9]{4,6}$").expect("Invalid regex")
});

/// Fields of the booking form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingField {
    Name,
    Email,
    Phone,
    Service,
    Date,
    Time,
}

impl BookingField {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingField::Name => "name",
            BookingField::Email => "email",
            BookingField::Phone => "phone",
            BookingField::Service => "service",
            BookingField::Date => "date",
            BookingField::Time => "time",
        }
    }
}

impl fmt::Display for BookingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why one field was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: BookingField,
    pub message: String,
}

impl FieldError {
    fn new(field: BookingField, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every rejected field of one form, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingErrors(pub Vec<FieldError>);

impl BookingErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Error for `field`, if it was rejected.
    pub fn get(&self, field: BookingField) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }
}

impl fmt::Display for BookingErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, error) in self.0.iter().enumerate() {
            if n > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

/// Raw booking form input, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingForm {
    pub name: String,
    pub email: String,
    /// Optional.
    pub phone: String,
    /// Service name from the price list.
    pub service: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// `HH:MM`, 24-hour.
    pub time: String,
    /// Optional.
    pub notes: String,
}

/// A booking whose every field has been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    name: String,
    email: String,
    phone: Option<String>,
    service: &'static Service,
    date: NaiveDate,
    time: NaiveTime,
    notes: Option<String>,
}

impl BookingRequest {
    /// Validate `form` against the calendar day `today`.
    ///
    /// Every field is checked and all problems are reported together.
    pub fn new(form: &BookingForm, today: NaiveDate) -> Result<Self, CommerceError> {
        let mut errors = Vec::new();

        let name = collect(
            required(BookingField::Name, &form.name).map(str::to_string),
            &mut errors,
        );
        let email = collect(parse_email(&form.email), &mut errors);
        let phone = collect(parse_phone(&form.phone), &mut errors);
        let service = collect(parse_service(&form.service), &mut errors);
        let date = collect(parse_date(&form.date, today), &mut errors);
        let time = collect(parse_time(&form.time), &mut errors);

        match (name, email, phone, service, date, time) {
            (Some(name), Some(email), Some(phone), Some(service), Some(date), Some(time)) => {
                Ok(Self {
                    name,
                    email,
                    phone,
                    service,
                    date,
                    time,
                    notes: optional(&form.notes).map(str::to_string),
                })
            }
            _ => Err(CommerceError::InvalidBooking(BookingErrors(errors))),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn service(&self) -> &'static Service {
        self.service
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Accept the booking and announce it.
    pub fn confirm(self, notifier: &impl Notifier) -> BookingConfirmation {
        tracing::info!(
            service = self.service.name,
            date = %self.date,
            time = %self.time.format("%H:%M"),
            "booking confirmed"
        );
        notifier.notify(Notification::success(MSG_BOOKING_CONFIRMED));

        BookingConfirmation {
            name: self.name,
            service: self.service.name.to_string(),
            date: self.date,
            time: self.time,
            confirmed_at: Utc::now(),
        }
    }
}

/// What the customer is shown once a booking is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub name: String,
    pub service: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub confirmed_at: DateTime<Utc>,
}

impl BookingConfirmation {
    /// Long date, e.g. "Monday, June 2, 2025".
    pub fn formatted_date(&self) -> String {
        self.date.format("%A, %B %-d, %Y").to_string()
    }

    /// 24-hour time, e.g. "14:30".
    pub fn formatted_time(&self) -> String {
        self.time.format("%H:%M").to_string()
    }
}

fn collect<T>(result: Result<T, FieldError>, errors: &mut Vec<FieldError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            errors.push(e);
            None
        }
    }
}

fn optional(value: &str) -> Option<&str> {
    Some(value.trim()).filter(|v| !v.is_empty())
}

fn required(field: BookingField, value: &str) -> Result<&str, FieldError> {
    optional(value).ok_or_else(|| FieldError::new(field, "This field is required"))
}

fn parse_email(value: &str) -> Result<String, FieldError> {
    let email = required(BookingField::Email, value)?;
    if !EMAIL_RE.is_match(email) {
        return Err(FieldError::new(
            BookingField::Email,
            "Please enter a valid email address",
        ));
    }
    Ok(email.to_string())
}

fn parse_phone(value: &str) -> Result<Option<String>, FieldError> {
    match optional(value) {
        None => Ok(None),
        Some(phone) if PHONE_RE.is_match(phone) => Ok(Some(phone.to_string())),
        Some(_) => Err(FieldError::new(
            BookingField::Phone,
            "Please enter a valid phone number",
        )),
    }
}

fn parse_service(value: &str) -> Result<&'static Service, FieldError> {
    let name = required(BookingField::Service, value)?;
    find_service(name)
        .ok_or_else(|| FieldError::new(BookingField::Service, "Please select a service"))
}

fn parse_date(value: &str, today: NaiveDate) -> Result<NaiveDate, FieldError> {
    let text = required(BookingField::Date, value)?;
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| FieldError::new(BookingField::Date, "Please enter a valid date"))?;

    if date < today {
        return Err(FieldError::new(
            BookingField::Date,
            "Please select a future date",
        ));
    }
    let last = today
        .checked_add_months(Months::new(BOOKING_HORIZON_MONTHS))
        .unwrap_or(NaiveDate::MAX);
    if date > last {
        return Err(FieldError::new(
            BookingField::Date,
            "Please select a date within the next three months",
        ));
    }
    Ok(date)
}

fn parse_time(value: &str) -> Result<NaiveTime, FieldError> {
    let text = required(BookingField::Time, value)?;
    let time = NaiveTime::parse_from_str(text, "%H:%M")
        .map_err(|_| FieldError::new(BookingField::Time, "Please enter a valid time"))?;

    let minute = time.hour() * 60 + time.minute();
    if !(OPENS_AT_MINUTE..=CLOSES_AT_MINUTE).contains(&minute) {
        return Err(FieldError::new(
            BookingField::Time,
            &format!("Please select a time between {OPENING_TIME} and {CLOSING_TIME}"),
        ));
    }
    if time.minute() % SLOT_MINUTES != 0 {
        return Err(FieldError::new(
            BookingField::Time,
            "Please select a time on the hour or half hour",
        ));
    }
    Ok(time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{NotificationKind, ToastQueue};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 30).unwrap()
    }

    fn form() -> BookingForm {
        BookingForm {
            name: "Ana Ruiz".to_string(),
            email: "ana@example.com".to_string(),
            phone: "(555) 123-4567".to_string(),
            service: "Facial Treatment".to_string(),
            date: "2025-06-02".to_string(),
            time: "14:30".to_string(),
            notes: String::new(),
        }
    }

    fn rejected(form: &BookingForm) -> BookingErrors {
        match BookingRequest::new(form, today()) {
            Err(CommerceError::InvalidBooking(errors)) => errors,
            other => panic!("expected InvalidBooking, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_form() {
        let request = BookingRequest::new(&form(), today()).unwrap();
        assert_eq!(request.name(), "Ana Ruiz");
        assert_eq!(request.service().price_cents, 4000);
        assert_eq!(request.phone(), Some("(555) 123-4567"));
        assert_eq!(request.notes(), None);
    }

    #[test]
    fn test_all_missing_fields_reported() {
        let errors = rejected(&BookingForm::default());
        let fields: Vec<BookingField> = errors.errors().iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            [
                BookingField::Name,
                BookingField::Email,
                BookingField::Service,
                BookingField::Date,
                BookingField::Time
            ]
        );
        assert!(errors
            .errors()
            .iter()
            .all(|e| e.message == "This field is required"));
    }

    #[test]
    fn test_email_and_phone_format() {
        let mut bad = form();
        bad.email = "ana@example".to_string();
        bad.phone = "12345".to_string();
        let errors = rejected(&bad);
        assert_eq!(
            errors.get(BookingField::Email).unwrap().message,
            "Please enter a valid email address"
        );
        assert_eq!(
            errors.get(BookingField::Phone).unwrap().message,
            "Please enter a valid phone number"
        );

        let mut ok = form();
        ok.phone = "+555.123.456789".to_string();
        assert!(BookingRequest::new(&ok, today()).is_ok());
        ok.phone = "  ".to_string();
        assert_eq!(BookingRequest::new(&ok, today()).unwrap().phone(), None);
    }

    #[test]
    fn test_date_window() {
        let mut f = form();
        for (date, ok) in [
            ("2025-05-29", false),
            ("2025-05-30", true),
            ("2025-08-30", true),
            ("2025-08-31", false),
            ("2025-13-01", false),
        ] {
            f.date = date.to_string();
            assert_eq!(BookingRequest::new(&f, today()).is_ok(), ok, "{date}");
        }

        f.date = "2025-05-01".to_string();
        assert_eq!(
            rejected(&f).get(BookingField::Date).unwrap().message,
            "Please select a future date"
        );
    }

    #[test]
    fn test_time_slots() {
        let mut f = form();
        for (time, ok) in [
            ("09:00", true),
            ("19:00", true),
            ("08:30", false),
            ("19:30", false),
            ("10:15", false),
            ("noon", false),
        ] {
            f.time = time.to_string();
            assert_eq!(BookingRequest::new(&f, today()).is_ok(), ok, "{time}");
        }
    }

    #[test]
    fn test_unknown_service() {
        let mut f = form();
        f.service = "Tattoo".to_string();
        assert_eq!(
            rejected(&f).get(BookingField::Service).unwrap().message,
            "Please select a service"
        );
    }

    #[test]
    fn test_confirm_notifies() {
        let toasts = ToastQueue::new();
        let confirmation = BookingRequest::new(&form(), today()).unwrap().confirm(&toasts);

        assert_eq!(confirmation.service, "Facial Treatment");
        assert_eq!(confirmation.formatted_date(), "Monday, June 2, 2025");
        assert_eq!(confirmation.formatted_time(), "14:30");
        let last = toasts.last().unwrap();
        assert_eq!(last.kind, NotificationKind::Success);
        assert_eq!(last.message, MSG_BOOKING_CONFIRMED);
    }

    #[test]
    fn test_error_display() {
        let mut f = form();
        f.name = String::new();
        f.time = "08:00".to_string();
        assert_eq!(
            rejected(&f).to_string(),
            "name: This field is required; time: Please select a time between 09:00 and 19:00"
        );
    }
}
