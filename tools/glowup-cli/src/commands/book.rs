//! Book an appointment.

use anyhow::{bail, Result};
use glowup_commerce::booking::{BookingForm, BookingRequest, BOOKING_FOLLOW_UP};
use glowup_commerce::CommerceError;

use super::BookArgs;
use crate::context::Context;

/// Run the book command.
pub async fn run(args: BookArgs, ctx: &Context) -> Result<()> {
    let no_delay = args.no_delay;
    let form = form_from_args(args);
    let today = chrono::Local::now().date_naive();

    let request = match BookingRequest::new(&form, today) {
        Ok(request) => request,
        Err(CommerceError::InvalidBooking(errors)) => {
            for error in errors.errors() {
                ctx.output.error(&error.to_string());
            }
            bail!("Booking has {} invalid field(s)", errors.errors().len());
        }
        Err(e) => return Err(e.into()),
    };

    let delay = ctx.config.booking.processing_delay();
    if !no_delay && !delay.is_zero() {
        let pb = ctx.output.spinner("Processing...");
        tokio::time::sleep(delay).await;
        pb.finish_and_clear();
    }

    let confirmation = request.confirm(&ctx.toasts);
    ctx.flush_toasts();

    if ctx.output.is_json() {
        ctx.output.json(&confirmation);
        return Ok(());
    }

    ctx.output.header("Booking Confirmation");
    ctx.output.info("Thank you for your booking!");
    ctx.output.kv("Name", &confirmation.name);
    ctx.output.kv("Service", &confirmation.service);
    ctx.output.kv("Date", &confirmation.formatted_date());
    ctx.output.kv("Time", &confirmation.formatted_time());
    println!();
    ctx.output.info(BOOKING_FOLLOW_UP);

    Ok(())
}

fn form_from_args(args: BookArgs) -> BookingForm {
    BookingForm {
        name: args.name,
        email: args.email,
        phone: args.phone,
        service: args.service,
        date: args.date,
        time: args.time,
        notes: args.notes,
    }
}
