use std::fmt::Display;

use poise::serenity_prelude::UserId;

use super::types::UtcDateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VouchId(pub u64);

/// A star rating, always within `1..=5`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Option<Rating> {
        (Self::MIN..=Self::MAX)
            .contains(&value)
            .then_some(Rating(value))
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vouch {
    pub id: VouchId,
    pub voucher: UserId,
    pub target: UserId,
    pub rating: Rating,
    pub comment: String,
    pub voucher_tag: String,
    pub target_tag: String,
    pub created_at: UtcDateTime,
}

#[derive(Debug)]
pub struct NewVouch {
    pub voucher: UserId,
    pub target: UserId,
    pub rating: Rating,
    pub comment: String,
    pub voucher_tag: String,
    pub target_tag: String,
    pub created_at: UtcDateTime,
}
