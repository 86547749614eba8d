//! Fuente de tiempo inyectable.
//!
//! Los steps no leen el reloj global: el timestamp les llega como parámetro a
//! través de `injection::ClockInjector`, que consulta un `Clock`.

use std::fmt::Debug;

use chrono::{DateTime, SecondsFormat, Utc};

pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// Reloj de pared.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Reloj detenido en un instante (tests, replays reproducibles).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Parsea un instante RFC 3339.
    pub fn parse(rfc3339: &str) -> Result<Self, chrono::ParseError> {
        Ok(Self(DateTime::parse_from_rfc3339(rfc3339)?.with_timezone(&Utc)))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Formato ISO-8601 usado en los payloads: UTC, milisegundos, sufijo `Z`.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_formats_with_millis_and_z() {
        let c = FixedClock::parse("2024-05-01T10:20:30+02:00").unwrap();
        assert_eq!(format_timestamp(c.now()), "2024-05-01T08:20:30.000Z");
    }

    #[test]
    fn system_clock_output_parses_back() {
        let s = format_timestamp(SystemClock.now());
        assert!(DateTime::parse_from_rfc3339(&s).is_ok());
    }
}
