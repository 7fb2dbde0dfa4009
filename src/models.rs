use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::extract::JsonFields;

/// Identifier given to every created event
pub const NEW_EVENT_ID: &str = "new-event-id";

/// Identifier given to every recorded energy level
pub const NEW_ENERGY_ID: &str = "new-energy-id";

/// A scheduled item belonging to a calendar
///
/// Timestamps keep the offset the client sent them with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Event {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_zero_time")]
    pub start_date: DateTime<FixedOffset>,
    #[serde(deserialize_with = "null_as_zero_time")]
    pub end_date: DateTime<FixedOffset>,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    /// Owning calendar, not checked against the known calendars
    #[serde(deserialize_with = "null_as_default")]
    pub calendar_id: String,
}

impl Default for Event {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            description: String::new(),
            start_date: zero_time(),
            end_date: zero_time(),
            location: String::new(),
            calendar_id: String::new(),
        }
    }
}

impl JsonFields for Event {
    const FIELDS: &'static [&'static str] = &[
        "id",
        "title",
        "description",
        "startDate",
        "endDate",
        "location",
        "calendarId",
    ];
}

/// A named, colored grouping of events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calendar {
    pub id: String,
    pub title: String,
    pub color: String,
    pub source: String,
}

/// A self-reported energy entry for a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnergyLevel {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// Free-text label such as "High" or "Low"
    #[serde(deserialize_with = "null_as_default")]
    pub level: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_zero_time")]
    pub timestamp: DateTime<FixedOffset>,
    #[serde(deserialize_with = "null_as_default")]
    pub user_id: String,
}

impl Default for EnergyLevel {
    fn default() -> Self {
        Self {
            id: String::new(),
            level: String::new(),
            description: String::new(),
            timestamp: zero_time(),
            user_id: String::new(),
        }
    }
}

impl JsonFields for EnergyLevel {
    const FIELDS: &'static [&'static str] =
        &["id", "level", "description", "timestamp", "userId"];
}

/// A suggestion based on the user's energy levels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
}

/// Timestamp of a field the client never set: `0001-01-01T00:00:00Z`
pub fn zero_time() -> DateTime<FixedOffset> {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .unwrap_or_default()
        .and_time(NaiveTime::MIN)
        .and_utc()
        .fixed_offset()
}

/// Decode `null` the same way as an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_zero_time<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_else(zero_time))
}

/// The two calendars every client sees
pub fn mock_calendars() -> Vec<Calendar> {
    vec![
        Calendar {
            id: "1".to_string(),
            title: "Personal".to_string(),
            color: "#4CAF50".to_string(),
            source: "Local".to_string(),
        },
        Calendar {
            id: "2".to_string(),
            title: "Work".to_string(),
            color: "#2196F3".to_string(),
            source: "Local".to_string(),
        },
    ]
}

/// A single meeting starting two hours after `now`
pub fn mock_events(now: DateTime<Utc>) -> Vec<Event> {
    vec![Event {
        id: "1".to_string(),
        title: "Team Meeting".to_string(),
        description: "Weekly sync".to_string(),
        start_date: (now + Duration::hours(2)).fixed_offset(),
        end_date: (now + Duration::hours(3)).fixed_offset(),
        location: "Conference Room".to_string(),
        calendar_id: "1".to_string(),
    }]
}

/// A single energy entry recorded two hours before `now`
pub fn mock_energy_levels(now: DateTime<Utc>) -> Vec<EnergyLevel> {
    vec![EnergyLevel {
        id: "1".to_string(),
        level: "High".to_string(),
        description: "Feeling productive".to_string(),
        timestamp: (now - Duration::hours(2)).fixed_offset(),
        user_id: "user1".to_string(),
    }]
}

pub fn mock_recommendations() -> Vec<Recommendation> {
    vec![Recommendation {
        title: "Take a Break".to_string(),
        description:
            "Your energy levels typically dip around this time. Consider a 15-minute walk."
                .to_string(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn event_uses_camel_case_keys() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap();
        let value = serde_json::to_value(&mock_events(now)[0]).unwrap();

        assert_eq!(value["calendarId"], "1");
        assert_eq!(value["startDate"], "2025-03-01T12:00:00Z");
        assert_eq!(value["endDate"], "2025-03-01T13:00:00Z");
        assert!(value.get("calendar_id").is_none());
    }

    #[test]
    fn missing_and_null_fields_decode_to_defaults() {
        let event: Event = serde_json::from_value(json!({
            "title": "Lunch",
            "description": null,
            "endDate": null,
        }))
        .unwrap();

        assert_eq!(event.title, "Lunch");
        assert_eq!(event.description, "");
        assert_eq!(event.start_date, zero_time());
        assert_eq!(event.end_date, zero_time());
    }

    #[test]
    fn zero_time_is_year_one() {
        let value = serde_json::to_value(Event::default()).unwrap();
        assert_eq!(value["startDate"], "0001-01-01T00:00:00Z");

        let value = serde_json::to_value(EnergyLevel::default()).unwrap();
        assert_eq!(value["timestamp"], "0001-01-01T00:00:00Z");
    }

    #[test]
    fn offsets_survive_a_decode_and_encode() {
        let event: Event = serde_json::from_value(json!({
            "startDate": "2025-05-02T09:00:00+02:00",
            "endDate": "2025-05-02T10:30:00-05:00",
        }))
        .unwrap();

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["startDate"], "2025-05-02T09:00:00+02:00");
        assert_eq!(value["endDate"], "2025-05-02T10:30:00-05:00");
    }

    #[test]
    fn wrong_field_type_fails_to_decode() {
        let result: Result<EnergyLevel, _> = serde_json::from_value(json!({ "level": 5 }));
        assert!(result.is_err());

        let result: Result<Event, _> = serde_json::from_value(json!({ "startDate": "tomorrow" }));
        assert!(result.is_err());
    }

    #[test]
    fn energy_fixture_is_in_the_past() {
        let now = Utc::now();
        let levels = mock_energy_levels(now);

        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0].user_id, "user1");
        assert!(levels[0].timestamp < now.fixed_offset());
    }

    #[test]
    fn calendars_are_fixed() {
        let ids: Vec<_> = mock_calendars().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }
}
