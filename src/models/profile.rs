use poise::serenity_prelude::UserId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UserProfile {
    pub user: UserId,
    pub balance: i64,
}
