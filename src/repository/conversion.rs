use poise::serenity_prelude::UserId;
use thiserror::Error;
use time::{format_description::well_known::Iso8601, OffsetDateTime};

use crate::models::{types::UtcDateTime, Rating, VouchId};

pub trait DBConvertible: Sized {
    type DBType;

    fn to_db(&self) -> Result<Self::DBType, DBToConversionError>;

    fn from_db(value: &Self::DBType) -> Result<Self, DBFromConversionError>;
}

#[derive(Debug, Error)]
pub enum DBFromConversionError {
    #[error("Failed to parse datetime: {0}")]
    DateTime(#[from] time::error::Parse),
    #[error("Invalid number: {0}")]
    InvalidNumber(i64),
}

#[derive(Debug, Error)]
pub enum DBToConversionError {
    #[error("Failed to format datetime")]
    DateTime(#[from] time::error::Format),
}

// Fixed-width ISO 8601 keeps `ORDER BY created_at` chronological.
impl DBConvertible for UtcDateTime {
    type DBType = String;

    fn to_db(&self) -> Result<Self::DBType, DBToConversionError> {
        let string = OffsetDateTime::from(*self).format(&Iso8601::DEFAULT)?;
        Ok(string)
    }

    fn from_db(db_value: &Self::DBType) -> Result<Self, DBFromConversionError> {
        let datetime = OffsetDateTime::parse(db_value, &Iso8601::DEFAULT)?;
        Ok(UtcDateTime::from(datetime))
    }
}

impl DBConvertible for VouchId {
    type DBType = i64;

    fn to_db(&self) -> Result<Self::DBType, DBToConversionError> {
        Ok(self.0 as _)
    }

    fn from_db(value: &Self::DBType) -> Result<Self, DBFromConversionError> {
        if *value > 0 {
            Ok(VouchId(*value as _))
        } else {
            Err(DBFromConversionError::InvalidNumber(*value))
        }
    }
}

impl DBConvertible for UserId {
    type DBType = i64;

    fn to_db(&self) -> Result<Self::DBType, DBToConversionError> {
        Ok(self.get() as _)
    }

    fn from_db(value: &Self::DBType) -> Result<Self, DBFromConversionError> {
        // Snowflakes are stored as their i64 bit pattern; zero is never a valid id.
        match *value as u64 {
            0 => Err(DBFromConversionError::InvalidNumber(*value)),
            id => Ok(UserId::new(id)),
        }
    }
}

impl DBConvertible for Rating {
    type DBType = i64;

    fn to_db(&self) -> Result<Self::DBType, DBToConversionError> {
        Ok(self.get() as _)
    }

    fn from_db(value: &Self::DBType) -> Result<Self, DBFromConversionError> {
        u8::try_from(*value)
            .ok()
            .and_then(Rating::new)
            .ok_or(DBFromConversionError::InvalidNumber(*value))
    }
}

#[cfg(test)]
mod tests {
    use poise::serenity_prelude::UserId;
    use test_log::test;
    use time::macros::datetime;

    use super::{DBConvertible, DBFromConversionError};
    use crate::models::{types::UtcDateTime, Rating};

    #[test]
    fn datetime_survives_the_database() {
        let value = UtcDateTime::from(datetime!(2024-05-17 08:30:15.123 UTC));
        let stored = value.to_db().unwrap();
        assert_eq!(UtcDateTime::from_db(&stored).unwrap(), value);
    }

    #[test]
    fn stored_datetimes_sort_as_strings() {
        let earlier = UtcDateTime::from(datetime!(2024-05-17 08:30:15 UTC))
            .to_db()
            .unwrap();
        let later = UtcDateTime::from(datetime!(2024-11-02 00:00:00.5 UTC))
            .to_db()
            .unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn large_snowflakes() {
        let user = UserId::new(u64::MAX - 7);
        let stored = user.to_db().unwrap();
        assert_eq!(UserId::from_db(&stored).unwrap(), user);
    }

    #[test]
    fn zero_user_id_is_rejected() {
        assert!(matches!(
            UserId::from_db(&0),
            Err(DBFromConversionError::InvalidNumber(0))
        ));
    }

    #[test]
    fn out_of_range_ratings_are_rejected() {
        assert!(Rating::from_db(&0).is_err());
        assert!(Rating::from_db(&6).is_err());
        assert!(Rating::from_db(&-3).is_err());
        assert_eq!(Rating::from_db(&4).unwrap().get(), 4);
    }
}
