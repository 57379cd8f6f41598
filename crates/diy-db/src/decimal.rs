//! Fixed-point values for `DECIMAL(7,2)` columns.
//!
//! Hours and costs carry two fractional digits. [`Decimal`] keeps them as an
//! integer count of hundredths so arithmetic and comparisons are exact, and
//! converts to and from SQLite's numeric storage at the column boundary.

use diy_common::{Error, Result};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A signed decimal with exactly two fractional digits and at most seven
/// significant digits, i.e. the range `-99999.99 ..= 99999.99`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decimal(i64);

impl Decimal {
    /// Largest magnitude representable by `DECIMAL(7,2)`, in hundredths.
    pub const MAX_HUNDREDTHS: i64 = 9_999_999;

    /// Build a value from a count of hundredths (`1250` is `12.50`).
    pub fn from_hundredths(hundredths: i64) -> Result<Self> {
        if hundredths.unsigned_abs() > Self::MAX_HUNDREDTHS as u64 {
            return Err(Error::invalid_input(format!(
                "decimal out of range for DECIMAL(7,2): {} hundredths",
                hundredths
            )));
        }
        Ok(Self(hundredths))
    }

    /// Round a float to the nearest hundredth.
    pub fn from_f64(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(Error::invalid_input(format!("not a finite decimal: {value}")));
        }
        let scaled = (value * 100.0).round();
        if scaled.abs() > Self::MAX_HUNDREDTHS as f64 {
            return Err(Error::invalid_input(format!(
                "decimal out of range for DECIMAL(7,2): {value}"
            )));
        }
        Ok(Self(scaled as i64))
    }

    pub fn hundredths(self) -> i64 {
        self.0
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl FromStr for Decimal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::invalid_input(format!("invalid decimal: {s:?}"));

        let trimmed = s.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let (whole, frac) = match unsigned.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (unsigned, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if unsigned.contains('.') && frac.is_empty() {
            return Err(invalid());
        }
        if frac.len() > 2 {
            return Err(Error::invalid_input(format!(
                "decimal has more than two fractional digits: {s:?}"
            )));
        }
        if !whole.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let whole_value: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let frac_value: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => frac.parse().map_err(|_| invalid())?,
        };

        let hundredths = whole_value
            .checked_mul(100)
            .and_then(|v| v.checked_add(frac_value))
            .ok_or_else(invalid)?;

        Self::from_hundredths(if negative { -hundredths } else { hundredths })
    }
}

impl ToSql for Decimal {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_f64()))
    }
}

impl FromSql for Decimal {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Integer(i) => i
                .checked_mul(100)
                .and_then(|h| Decimal::from_hundredths(h).ok())
                .ok_or(FromSqlError::OutOfRange(i)),
            ValueRef::Real(f) => Decimal::from_f64(f).map_err(|e| FromSqlError::Other(Box::new(e))),
            ValueRef::Text(bytes) => std::str::from_utf8(bytes)
                .map_err(|e| FromSqlError::Other(Box::new(e)))?
                .parse()
                .map_err(|e: Error| FromSqlError::Other(Box::new(e))),
            _ => Err(FromSqlError::InvalidType),
        }
    }
}

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Accepts `"4.50"` as well as the numbers `4.5` and `4`.
impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(DecimalVisitor)
    }
}

struct DecimalVisitor;

impl<'de> Visitor<'de> for DecimalVisitor {
    type Value = Decimal;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal with at most two fractional digits")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Decimal, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Decimal, E> {
        v.checked_mul(100)
            .ok_or_else(|| E::custom(format!("decimal out of range: {v}")))
            .and_then(|h| Decimal::from_hundredths(h).map_err(E::custom))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Decimal, E> {
        let v = i64::try_from(v).map_err(|_| E::custom(format!("decimal out of range: {v}")))?;
        self.visit_i64(v)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Decimal, E> {
        Decimal::from_f64(v).map_err(E::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(dec("12.50").to_string(), "12.50");
        assert_eq!(dec("12.5").to_string(), "12.50");
        assert_eq!(dec("12").to_string(), "12.00");
        assert_eq!(dec(".75").to_string(), "0.75");
        assert_eq!(dec("-3.05").to_string(), "-3.05");
        assert_eq!(dec("+4").to_string(), "4.00");
        assert_eq!(dec(" 99999.99 ").hundredths(), Decimal::MAX_HUNDREDTHS);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", ".", "-", "12.", "1.234", "abc", "1.2x", "1,5", "--1"] {
            let err = bad.parse::<Decimal>().unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert!("100000".parse::<Decimal>().is_err());
        assert!("-100000.00".parse::<Decimal>().is_err());
        assert!("99999999999999999999".parse::<Decimal>().is_err());
    }

    #[test]
    fn test_from_f64_rounds_to_hundredths() {
        assert_eq!(Decimal::from_f64(1.005).unwrap().hundredths(), 100);
        assert_eq!(Decimal::from_f64(2.499).unwrap(), dec("2.50"));
        assert!(Decimal::from_f64(f64::NAN).is_err());
        assert!(Decimal::from_f64(123456.0).is_err());
    }

    #[test]
    fn test_sqlite_storage_is_exact() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (v DECIMAL(7,2))").unwrap();

        for value in ["0.10", "12.00", "99999.99", "-0.01", "7.35"] {
            conn.execute("DELETE FROM t", []).unwrap();
            conn.execute("INSERT INTO t (v) VALUES (?1)", [dec(value)])
                .unwrap();
            let back: Decimal = conn.query_row("SELECT v FROM t", [], |row| row.get(0)).unwrap();
            assert_eq!(back, dec(value));
        }
    }

    #[test]
    fn test_reads_text_and_rejects_blobs() {
        let conn = Connection::open_in_memory().unwrap();
        let from_text: Decimal = conn.query_row("SELECT '4.20'", [], |row| row.get(0)).unwrap();
        assert_eq!(from_text, dec("4.20"));

        let blob: rusqlite::Result<Decimal> = conn.query_row("SELECT x'00'", [], |row| row.get(0));
        assert!(blob.is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&dec("8.25")).unwrap();
        assert_eq!(json, "\"8.25\"");
        let back: Decimal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dec("8.25"));
        assert!(serde_json::from_str::<Decimal>("\"8.255\"").is_err());
    }

    #[test]
    fn test_deserialize_from_numbers() {
        assert_eq!(serde_json::from_str::<Decimal>("4.5").unwrap(), dec("4.50"));
        assert_eq!(serde_json::from_str::<Decimal>("12").unwrap(), dec("12.00"));
        assert_eq!(serde_json::from_str::<Decimal>("-3").unwrap(), dec("-3.00"));
        assert!(serde_json::from_str::<Decimal>("100000").is_err());
        assert!(serde_json::from_str::<Decimal>("true").is_err());
    }
}
