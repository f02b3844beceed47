//! ICS generation for seminar calendar exports.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use icalendar::{Calendar, Component, EventLike, Property, ValueType};

use crate::error::DateParseError;
use crate::seminar::Seminar;

/// Length assumed for timed seminars; the API carries no end time.
const DEFAULT_LENGTH_MINUTES: i64 = 60;

enum Start {
    AllDay(NaiveDate),
    Timed(DateTime<Utc>),
}

/// Generate .ics content holding one VEVENT for the seminar.
pub fn generate_ics(seminar: &Seminar) -> Result<String, DateParseError> {
    let mut cal = Calendar::new();

    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&format!("seminar-{}@seminars", seminar.id));
    ics_event.summary(&seminar.title);
    ics_event.add_property("DTSTAMP", Utc::now().format("%Y%m%dT%H%M%SZ").to_string());

    match seminar_start(seminar)? {
        Start::AllDay(date) => {
            add_date_property(&mut ics_event, "DTSTART", date);
            add_date_property(&mut ics_event, "DTEND", date + Duration::days(1));
        }
        Start::Timed(start) => {
            let end = start + Duration::minutes(DEFAULT_LENGTH_MINUTES);
            ics_event.add_property("DTSTART", start.format("%Y%m%dT%H%M%SZ").to_string());
            ics_event.add_property("DTEND", end.format("%Y%m%dT%H%M%SZ").to_string());
        }
    }

    if !seminar.location.is_empty() {
        ics_event.location(&seminar.location);
    }

    let description = html_to_text(&seminar.content);
    if !description.is_empty() {
        ics_event.description(&description);
    }

    cal.push(ics_event.done());
    let cal = cal.done();

    Ok(cal.to_string())
}

fn seminar_start(seminar: &Seminar) -> Result<Start, DateParseError> {
    let at = seminar.scheduled_at()?;

    // A full date-time in `date` wins over the display-only `time` field
    if seminar.date.contains('T') {
        return Ok(Start::Timed(at));
    }

    let date = at.date_naive();
    let time = ["%H:%M:%S", "%H:%M"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(seminar.time.trim(), fmt).ok());

    Ok(match time {
        Some(t) => Start::Timed(date.and_time(t).and_utc()),
        None => Start::AllDay(date),
    })
}

fn add_date_property(ics_event: &mut icalendar::Event, name: &str, date: NaiveDate) {
    let mut prop = Property::new(name, date.format("%Y%m%d").to_string());
    prop.append_parameter(ValueType::Date);
    ics_event.append_property(prop);
}

/// Wide enough that paragraphs are never wrapped.
const TEXT_WIDTH: usize = 10_000;

/// Render the rich-text body as plain text, decoding entities.
/// Falls back to the raw markup if it cannot be parsed.
pub(crate) fn html_to_text(html: &str) -> String {
    let text = html2text::config::plain_no_decorate().string_from_read(html.as_bytes(), TEXT_WIDTH);
    match text {
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "could not convert seminar content to text");
            html.trim().to_string()
        }
    }
}
