use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef};
use sqlx::Postgres;
use thiserror::Error;

/// Default width of a bookable slot, in minutes. Overridable via
/// `BOOKING_SLOT_MINUTES` (see `config::BookingConfig`).
pub const DEFAULT_SLOT_MINUTES: u16 = 30;

const MINUTES_PER_DAY: u16 = 24 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid time label {0:?}, expected HH:MM")]
pub struct InvalidTimeFormat(pub String);

/// A slot start label: a local time-of-day with minute precision, rendered
/// as `HH:MM`. Stored as minutes since midnight so slot arithmetic cannot
/// wrap past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    minutes: u16,
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8) -> Result<Self, InvalidTimeFormat> {
        if hour > 23 || minute > 59 {
            return Err(InvalidTimeFormat(format!("{hour:02}:{minute:02}")));
        }
        Ok(Self {
            minutes: u16::from(hour) * 60 + u16::from(minute),
        })
    }

    pub fn hour(self) -> u8 {
        (self.minutes / 60) as u8
    }

    pub fn minute(self) -> u8 {
        (self.minutes % 60) as u8
    }

    /// The label `minutes` later, or `None` if that would cross midnight.
    fn advanced_by(self, minutes: u16) -> Option<Self> {
        let next = self.minutes.checked_add(minutes)?;
        if next >= MINUTES_PER_DAY {
            return None;
        }
        Some(Self { minutes: next })
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = InvalidTimeFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidTimeFormat(s.to_string());
        let (hour, minute) = s.split_once(':').ok_or_else(invalid)?;
        if hour.len() != 2 || minute.len() != 2 {
            return Err(invalid());
        }
        let hour: u8 = hour.parse().map_err(|_| invalid())?;
        let minute: u8 = minute.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

// Persisted as TEXT so the stored shape matches the wire label.
impl sqlx::Type<Postgres> for TimeOfDay {
    fn type_info() -> PgTypeInfo {
        <&str as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <&str as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'q> sqlx::Encode<'q, Postgres> for TimeOfDay {
    fn encode_by_ref(
        &self,
        buf: &mut PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, BoxDynError> {
        <String as sqlx::Encode<'q, Postgres>>::encode_by_ref(&self.to_string(), buf)
    }
}

impl<'r> sqlx::Decode<'r, Postgres> for TimeOfDay {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        let raw = <&str as sqlx::Decode<'r, Postgres>>::decode(value)?;
        Ok(raw.parse::<TimeOfDay>()?)
    }
}

/// Generate the ordered slot start labels for one opening window.
///
/// Slots begin at `opening` and step by `slot_minutes`; a label is emitted
/// only when the full slot fits before `closing`. Empty when the window is
/// inverted, empty, or too short for a single slot.
pub fn generate_slots(opening: TimeOfDay, closing: TimeOfDay, slot_minutes: u16) -> Vec<TimeOfDay> {
    if slot_minutes == 0 || opening >= closing {
        return Vec::new();
    }

    let mut slots = Vec::new();
    let mut current = opening;
    loop {
        let Some(end) = current.advanced_by(slot_minutes) else {
            // Slot would run past midnight, so it cannot fit before closing.
            break;
        };
        if end > closing {
            break;
        }
        slots.push(current);
        current = end;
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(label: &str) -> TimeOfDay {
        label.parse().unwrap()
    }

    fn labels(slots: &[TimeOfDay]) -> Vec<String> {
        slots.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn parses_and_renders_labels() {
        assert_eq!(t("09:00").to_string(), "09:00");
        assert_eq!(t("00:00").to_string(), "00:00");
        assert_eq!(t("23:59").to_string(), "23:59");
    }

    #[test]
    fn rejects_malformed_labels() {
        for raw in ["", "9:00", "09:0", "09-00", "24:00", "09:60", "ab:cd", "09:00:00"] {
            assert_eq!(
                raw.parse::<TimeOfDay>(),
                Err(InvalidTimeFormat(raw.to_string())),
                "{raw:?} should not parse"
            );
        }
    }

    #[test]
    fn generates_half_hour_slots() {
        let slots = generate_slots(t("09:00"), t("10:00"), 30);
        assert_eq!(labels(&slots), ["09:00", "09:30"]);
    }

    #[test]
    fn empty_window_yields_no_slots() {
        assert!(generate_slots(t("09:00"), t("09:00"), 30).is_empty());
        assert!(generate_slots(t("10:00"), t("09:00"), 30).is_empty());
    }

    #[test]
    fn partial_slot_does_not_fit() {
        // 09:00-09:29 cannot hold a full 30-minute slot.
        assert!(generate_slots(t("09:00"), t("09:29"), 30).is_empty());
        // 09:30 fits exactly against closing.
        let slots = generate_slots(t("09:00"), t("10:00"), 30);
        assert_eq!(slots.last(), Some(&t("09:30")));
    }

    #[test]
    fn slot_width_is_configurable() {
        let slots = generate_slots(t("09:00"), t("10:00"), 15);
        assert_eq!(labels(&slots), ["09:00", "09:15", "09:30", "09:45"]);
    }

    #[test]
    fn zero_width_slots_generate_nothing() {
        assert!(generate_slots(t("09:00"), t("17:00"), 0).is_empty());
    }

    #[test]
    fn slots_are_strictly_increasing_and_evenly_spaced() {
        let slots = generate_slots(t("08:15"), t("18:45"), 30);
        assert_eq!(slots.first(), Some(&t("08:15")));
        for pair in slots.windows(2) {
            let gap = (u16::from(pair[1].hour()) * 60 + u16::from(pair[1].minute()))
                - (u16::from(pair[0].hour()) * 60 + u16::from(pair[0].minute()));
            assert_eq!(gap, 30);
        }
        assert!(slots.last().unwrap() < &t("18:45"));
    }

    #[test]
    fn late_window_stops_at_midnight() {
        let slots = generate_slots(t("23:00"), t("23:59"), 30);
        assert_eq!(labels(&slots), ["23:00"]);
    }
}
