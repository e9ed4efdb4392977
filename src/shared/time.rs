use std::fmt::Display;

pub const SECONDS_PER_MINUTE: u32 = 60;
pub const MINUTES_PER_DAY: u32 = 24 * 60;
pub const MAX_MINUTES: u32 = u32::MAX / SECONDS_PER_MINUTE;

/// Seconds since the start of the service day.
/// Values past 24:00:00 express trips that run over midnight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(u32);

impl Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hms_string())
    }
}

impl Time {
    /// Overflows past `MAX_MINUTES`, see `checked_from_minutes`.
    pub const fn from_minutes(minutes: u32) -> Self {
        Self(minutes * SECONDS_PER_MINUTE)
    }

    /// `None` when the minutes do not fit into a service day of `u32` seconds.
    pub const fn checked_from_minutes(minutes: u32) -> Option<Self> {
        match minutes.checked_mul(SECONDS_PER_MINUTE) {
            Some(seconds) => Some(Self(seconds)),
            None => None,
        }
    }

    /// Whole minutes, seconds are truncated.
    pub const fn as_minutes(&self) -> u32 {
        self.0 / SECONDS_PER_MINUTE
    }

    pub fn to_hms_string(&self) -> String {
        let h = self.0 / 3600;
        let m = (self.0 % 3600) / 60;
        let s = self.0 % 60;
        format!("{:02}:{:02}:{:02}", h, m, s)
    }

    /// Parses a wall clock `HH:MM`, hours must be below 24.
    pub fn from_hm(time: &str) -> Option<Self> {
        let mut split = time.split(':');
        let hours = parse_field(split.next()?, 23)?;
        let minutes = parse_field(split.next()?, 59)?;
        if split.next().is_some() {
            return None;
        }
        Some(Self(hours * 3600 + minutes * 60))
    }
}

fn parse_field(field: &str, max: u32) -> Option<u32> {
    let field = field.trim();
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u32 = field.parse().ok()?;
    (value <= max).then_some(value)
}

#[test]
fn hms_string_test() {
    assert_eq!(Time::from_minutes(0).to_hms_string(), "00:00:00");
    assert_eq!(Time::from_minutes(750).to_hms_string(), "12:30:00");
}

#[test]
fn hms_string_past_midnight_test() {
    assert_eq!(Time::from_minutes(57 * 60 + 50).to_hms_string(), "57:50:00");
}

#[test]
fn checked_minutes_test() {
    assert_eq!(
        Time::checked_from_minutes(MAX_MINUTES).map(|time| time.as_minutes()),
        Some(MAX_MINUTES)
    );
    assert!(Time::checked_from_minutes(MAX_MINUTES + 1).is_none());
}

#[test]
fn valid_clock_test() {
    assert_eq!(Time::from_hm("21:32").unwrap().as_minutes(), 1292);
}

#[test]
fn invalid_clock_test() {
    assert!(Time::from_hm("24:00").is_none());
    assert!(Time::from_hm("12:60").is_none());
    assert!(Time::from_hm("-1:30").is_none());
    assert!(Time::from_hm("12:30:00").is_none());
    assert!(Time::from_hm("12:3a").is_none());
}
