// Franjas horarias semanales: día + hora de inicio/fin en formato "HH:MM".
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// Días lectivos del calendario (semana de domingo a jueves).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
}

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Sunday => "Sunday",
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
        }
    }
}

impl FromStr for Weekday {
    type Err = ScheduleError;

    // acepta el nombre completo o la abreviatura de 3 letras, sin distinguir mayúsculas
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sunday" | "sun" => Ok(Weekday::Sunday),
            "monday" | "mon" => Ok(Weekday::Monday),
            "tuesday" | "tue" => Ok(Weekday::Tuesday),
            "wednesday" | "wed" => Ok(Weekday::Wednesday),
            "thursday" | "thu" => Ok(Weekday::Thursday),
            _ => Err(ScheduleError::InvalidDay(s.to_string())),
        }
    }
}

impl TryFrom<String> for Weekday {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Weekday> for String {
    fn from(d: Weekday) -> Self {
        d.as_str().to_string()
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hora del día en minutos desde medianoche (0..1440).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    pub fn from_hm(hour: u16, minute: u16) -> Result<Self, ScheduleError> {
        if hour > 23 || minute > 59 {
            return Err(ScheduleError::InvalidTime(format!("{}:{:02}", hour, minute)));
        }
        Ok(ClockTime(hour * 60 + minute))
    }

    pub fn minutes(&self) -> u16 {
        self.0
    }

    pub fn hour(&self) -> u16 {
        self.0 / 60
    }

    pub fn minute(&self) -> u16 {
        self.0 % 60
    }
}

impl FromStr for ClockTime {
    type Err = ScheduleError;

    /// "8:05", "08:05" y "23:59" son válidos; "24:00", "8:5" o "0805" no.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ScheduleError::InvalidTime(s.to_string());
        let (hh, mm) = s.trim().split_once(':').ok_or_else(invalid)?;
        if hh.is_empty() || hh.len() > 2 || mm.len() != 2 {
            return Err(invalid());
        }
        if !hh.chars().chain(mm.chars()).all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let hour = hh.parse::<u16>().map_err(|_| invalid())?;
        let minute = mm.parse::<u16>().map_err(|_| invalid())?;
        ClockTime::from_hm(hour, minute).map_err(|_| invalid())
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(t: ClockTime) -> Self {
        t.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Bloque semanal recurrente de una sección. Invariante: `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawMeetingTime", into = "RawMeetingTime")]
pub struct MeetingTime {
    pub day: Weekday,
    pub start: ClockTime,
    pub end: ClockTime,
}

impl MeetingTime {
    pub fn new(day: Weekday, start: ClockTime, end: ClockTime) -> Result<Self, ScheduleError> {
        if start >= end {
            return Err(ScheduleError::EmptyMeeting { start: start.to_string(), end: end.to_string() });
        }
        Ok(MeetingTime { day, start, end })
    }

    /// Atajo para construir desde cadenas, p.ej. `("Monday", "09:00", "09:50")`.
    pub fn parse(day: &str, start: &str, end: &str) -> Result<Self, ScheduleError> {
        MeetingTime::new(day.parse()?, start.parse()?, end.parse()?)
    }

    /// Solapamiento semiabierto en el mismo día; tocarse en el borde no cuenta.
    pub fn overlaps(&self, other: &MeetingTime) -> bool {
        self.day == other.day && self.start < other.end && other.start < self.end
    }
}

/// Forma en el JSON: `{"day": "Sunday", "start_time": "08:00", "end_time": "09:15"}`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawMeetingTime {
    day: String,
    start_time: String,
    end_time: String,
}

impl TryFrom<RawMeetingTime> for MeetingTime {
    type Error = ScheduleError;

    fn try_from(raw: RawMeetingTime) -> Result<Self, Self::Error> {
        MeetingTime::parse(&raw.day, &raw.start_time, &raw.end_time)
    }
}

impl From<MeetingTime> for RawMeetingTime {
    fn from(m: MeetingTime) -> Self {
        RawMeetingTime {
            day: m.day.to_string(),
            start_time: m.start.to_string(),
            end_time: m.end.to_string(),
        }
    }
}
