use serde::{Deserialize, Serialize};

/// Opening hours for a single weekday.
///
/// Times are stored as "HH:MM" strings exactly as the dashboard sends them;
/// they are display data, not instants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub closed: bool,
    #[serde(default)]
    pub open: String,
    #[serde(default)]
    pub close: String,
}

impl DaySchedule {
    pub fn closed_all_day() -> Self {
        Self {
            closed: true,
            open: String::new(),
            close: String::new(),
        }
    }

    pub fn open_between(open: &str, close: &str) -> Self {
        Self {
            closed: false,
            open: open.to_string(),
            close: close.to_string(),
        }
    }
}

impl Default for DaySchedule {
    fn default() -> Self {
        Self::closed_all_day()
    }
}

/// Weekly opening hours of a commerce
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WeekSchedule {
    pub monday: DaySchedule,
    pub tuesday: DaySchedule,
    pub wednesday: DaySchedule,
    pub thursday: DaySchedule,
    pub friday: DaySchedule,
    pub saturday: DaySchedule,
    pub sunday: DaySchedule,
}

impl WeekSchedule {
    /// Iterate days in week order with their Spanish display names
    /// (the assistant answers customers in Spanish)
    pub fn days(&self) -> [(&'static str, &DaySchedule); 7] {
        [
            ("lunes", &self.monday),
            ("martes", &self.tuesday),
            ("miércoles", &self.wednesday),
            ("jueves", &self.thursday),
            ("viernes", &self.friday),
            ("sábado", &self.saturday),
            ("domingo", &self.sunday),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn week_schedule_roundtrips_through_json() {
        let mut week = WeekSchedule::default();
        week.monday = DaySchedule::open_between("09:00", "18:00");

        let json = serde_json::to_string(&week).unwrap();
        let back: WeekSchedule = serde_json::from_str(&json).unwrap();
        assert_eq!(back.monday.open, "09:00");
        assert!(back.sunday.closed);
    }
}
