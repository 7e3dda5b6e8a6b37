use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::{OffsetDateTime, Weekday};
use validator::{Validate, ValidationError};

use crate::booking::slots::{InvalidTimeFormat, TimeOfDay};

/// Fixed English weekday names, keys of the persisted opening-hours map.
/// Derived from the proleptic Gregorian calendar, never from a locale, so
/// slot computation is deterministic across environments.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "Monday",
        Weekday::Tuesday => "Tuesday",
        Weekday::Wednesday => "Wednesday",
        Weekday::Thursday => "Thursday",
        Weekday::Friday => "Friday",
        Weekday::Saturday => "Saturday",
        Weekday::Sunday => "Sunday",
    }
}

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// One weekday's opening window, kept as raw labels so a profile saved with
/// blank times reads back unchanged. Blank-on-both-sides means closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    pub opening: String,
    pub closing: String,
}

impl DayHours {
    pub fn new(opening: impl Into<String>, closing: impl Into<String>) -> Self {
        Self {
            opening: opening.into(),
            closing: closing.into(),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.opening.is_empty() && self.closing.is_empty()
    }

    /// Parse the window into slot labels.
    pub fn window(&self) -> Result<(TimeOfDay, TimeOfDay), InvalidTimeFormat> {
        Ok((self.opening.parse()?, self.closing.parse()?))
    }
}

/// Weekly opening hours keyed by weekday name; a missing day is closed.
/// Serialized shape: `{"Monday": {"opening": "09:00", "closing": "17:00"}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BusinessHours(BTreeMap<String, DayHours>);

impl BusinessHours {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, weekday: Weekday, hours: DayHours) {
        self.0.insert(weekday_name(weekday).to_string(), hours);
    }

    pub fn for_weekday(&self, weekday: Weekday) -> Option<&DayHours> {
        self.0.get(weekday_name(weekday))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DayHours)> {
        self.0.iter().map(|(day, hours)| (day.as_str(), hours))
    }
}

fn hours_error(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

pub fn validate_opening_hours(hours: &BusinessHours) -> Result<(), ValidationError> {
    for (day, day_hours) in hours.iter() {
        if !WEEKDAY_NAMES.contains(&day) {
            return Err(hours_error(
                "unknown_weekday",
                format!("{day} is not a weekday name"),
            ));
        }
        if day_hours.is_closed() {
            continue;
        }
        let (opening, closing) = day_hours.window().map_err(|_| {
            hours_error(
                "invalid_time",
                format!("{day} opening and closing times must be HH:MM"),
            )
        })?;
        if opening >= closing {
            return Err(hours_error(
                "inverted_hours",
                format!("{day} opening time must be before closing time"),
            ));
        }
    }
    Ok(())
}

/// A barber business account, the original app's `business_accounts` node.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Business {
    pub id: Uuid,
    pub owner_user_id: Uuid,
    pub shop_name: String,
    pub address: String,
    pub cover_image_url: Option<String>,
    #[sqlx(json)]
    pub opening_hours: BusinessHours,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Listing card data for the browse screen.
#[derive(Debug, Clone, Serialize)]
pub struct BarberSummary {
    pub id: Uuid,
    pub shop_name: String,
    pub address: String,
    pub cover_image_url: Option<String>,
}

impl From<Business> for BarberSummary {
    fn from(business: Business) -> Self {
        Self {
            id: business.id,
            shop_name: business.shop_name,
            address: business.address,
            cover_image_url: business.cover_image_url,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBusinessProfile {
    #[validate(length(min = 1, message = "Shop name is required"))]
    pub shop_name: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    pub cover_image_url: Option<String>,
    #[serde(default)]
    #[validate(custom(function = validate_opening_hours))]
    pub opening_hours: BusinessHours,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_names_are_fixed() {
        assert_eq!(weekday_name(Weekday::Monday), "Monday");
        assert_eq!(weekday_name(Weekday::Sunday), "Sunday");
    }

    #[test]
    fn hours_round_trip_the_persisted_shape() {
        let raw = r#"{"Monday":{"opening":"09:00","closing":"17:00"},"Saturday":{"opening":"","closing":""}}"#;
        let hours: BusinessHours = serde_json::from_str(raw).unwrap();

        let monday = hours.for_weekday(Weekday::Monday).unwrap();
        assert_eq!(monday.window().unwrap().0.to_string(), "09:00");
        assert!(hours.for_weekday(Weekday::Saturday).unwrap().is_closed());
        assert!(hours.for_weekday(Weekday::Tuesday).is_none());

        assert_eq!(serde_json::to_string(&hours).unwrap(), raw);
    }

    #[test]
    fn validation_rejects_inverted_hours() {
        let mut hours = BusinessHours::new();
        hours.set(Weekday::Monday, DayHours::new("17:00", "09:00"));
        let err = validate_opening_hours(&hours).unwrap_err();
        assert_eq!(err.code, "inverted_hours");
    }

    #[test]
    fn validation_rejects_unknown_day_and_bad_labels() {
        let raw = r#"{"Funday":{"opening":"09:00","closing":"17:00"}}"#;
        let hours: BusinessHours = serde_json::from_str(raw).unwrap();
        assert_eq!(validate_opening_hours(&hours).unwrap_err().code, "unknown_weekday");

        let mut hours = BusinessHours::new();
        hours.set(Weekday::Friday, DayHours::new("nine", "17:00"));
        assert_eq!(validate_opening_hours(&hours).unwrap_err().code, "invalid_time");
    }

    #[test]
    fn closed_days_pass_validation() {
        let mut hours = BusinessHours::new();
        hours.set(Weekday::Sunday, DayHours::new("", ""));
        assert!(validate_opening_hours(&hours).is_ok());
    }
}
