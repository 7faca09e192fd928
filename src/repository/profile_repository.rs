use poise::serenity_prelude::UserId;
use sqlx::{query, query_as, FromRow, Pool, Sqlite};

use crate::{models::UserProfile, repository::conversion::DBConvertible};

use super::conversion::{DBFromConversionError, DBToConversionError};

pub struct ProfileRepository {
    pool: Pool<Sqlite>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum WithdrawResult {
    Withdrawn(UserProfile),
    /// The user does not have enough money; `balance` is 0 for users without a profile.
    InsufficientFunds { balance: i64 },
}

impl ProfileRepository {
    pub fn new(pool: Pool<Sqlite>) -> ProfileRepository {
        ProfileRepository { pool }
    }

    /// Returns the user's profile, creating an empty one if there is none yet.
    pub async fn get_or_create(&self, user: UserId) -> Result<UserProfile, anyhow::Error> {
        let mut transaction = self.pool.begin().await?;

        let profile = {
            let user = user.to_db()?;

            query(
                r#"
                    INSERT INTO user_profiles (user_id, balance)
                    VALUES ($1, 0)
                    ON CONFLICT (user_id) DO NOTHING
                "#,
            )
            .bind(user)
            .execute(&mut *transaction)
            .await?;

            query_as::<_, SqlUserProfile>(
                r#"
                    SELECT user_id, balance FROM user_profiles
                    WHERE user_id = $1
                "#,
            )
            .bind(user)
            .fetch_one(&mut *transaction)
            .await?
        };

        transaction.commit().await?;

        Ok(UserProfile::from_db(&profile)?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn add_balance(
        &self,
        user: UserId,
        amount: i64,
    ) -> Result<UserProfile, anyhow::Error> {
        let mut transaction = self.pool.begin().await?;

        let profile = {
            let user = user.to_db()?;

            query_as::<_, SqlUserProfile>(
                r#"
                    INSERT INTO user_profiles (user_id, balance)
                    VALUES ($1, $2)
                    ON CONFLICT (user_id) DO UPDATE SET balance = balance + excluded.balance
                    RETURNING user_id, balance
                "#,
            )
            .bind(user)
            .bind(amount)
            .fetch_one(&mut *transaction)
            .await?
        };

        transaction.commit().await?;

        Ok(UserProfile::from_db(&profile)?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn withdraw(
        &self,
        user: UserId,
        amount: i64,
    ) -> Result<WithdrawResult, anyhow::Error> {
        let mut transaction = self.pool.begin().await?;

        let user = user.to_db()?;

        let updated = query_as::<_, SqlUserProfile>(
            r#"
                UPDATE user_profiles
                SET balance = balance - $2
                WHERE user_id = $1 AND balance >= $2
                RETURNING user_id, balance
            "#,
        )
        .bind(user)
        .bind(amount)
        .fetch_optional(&mut *transaction)
        .await?;

        let result = match updated {
            Some(profile) => WithdrawResult::Withdrawn(UserProfile::from_db(&profile)?),
            None => {
                let current = query_as::<_, SqlUserProfile>(
                    r#"
                        SELECT user_id, balance FROM user_profiles
                        WHERE user_id = $1
                    "#,
                )
                .bind(user)
                .fetch_optional(&mut *transaction)
                .await?;

                WithdrawResult::InsufficientFunds {
                    balance: current.map(|p| p.balance).unwrap_or(0),
                }
            }
        };

        transaction.commit().await?;

        Ok(result)
    }
}

#[derive(Debug, FromRow)]
pub struct SqlUserProfile {
    user_id: i64,
    balance: i64,
}

impl DBConvertible for UserProfile {
    type DBType = SqlUserProfile;

    fn to_db(&self) -> Result<Self::DBType, DBToConversionError> {
        Ok(SqlUserProfile {
            user_id: self.user.to_db()?,
            balance: self.balance,
        })
    }

    fn from_db(value: &Self::DBType) -> Result<Self, DBFromConversionError> {
        Ok(UserProfile {
            user: UserId::from_db(&value.user_id)?,
            balance: value.balance,
        })
    }
}

#[cfg(test)]
mod tests {
    use poise::serenity_prelude::UserId;
    use test_log::test;

    use super::{ProfileRepository, WithdrawResult};
    use crate::{models::UserProfile, repository::memory_pool};

    const USER: UserId = UserId::new(42);

    #[test(tokio::test)]
    async fn new_profiles_start_empty() {
        let repository = ProfileRepository::new(memory_pool().await);

        let profile = repository.get_or_create(USER).await.unwrap();
        assert_eq!(profile, UserProfile { user: USER, balance: 0 });

        // A second read must not reset anything.
        repository.add_balance(USER, 10).await.unwrap();
        assert_eq!(repository.get_or_create(USER).await.unwrap().balance, 10);
    }

    #[test(tokio::test)]
    async fn adding_accumulates() {
        let repository = ProfileRepository::new(memory_pool().await);

        assert_eq!(repository.add_balance(USER, 25).await.unwrap().balance, 25);
        assert_eq!(repository.add_balance(USER, 17).await.unwrap().balance, 42);
    }

    #[test(tokio::test)]
    async fn withdrawing() {
        let repository = ProfileRepository::new(memory_pool().await);
        repository.add_balance(USER, 50).await.unwrap();

        assert_eq!(
            repository.withdraw(USER, 20).await.unwrap(),
            WithdrawResult::Withdrawn(UserProfile { user: USER, balance: 30 })
        );
        assert_eq!(
            repository.withdraw(USER, 30).await.unwrap(),
            WithdrawResult::Withdrawn(UserProfile { user: USER, balance: 0 })
        );
    }

    #[test(tokio::test)]
    async fn overdraft_is_refused() {
        let repository = ProfileRepository::new(memory_pool().await);
        repository.add_balance(USER, 5).await.unwrap();

        assert_eq!(
            repository.withdraw(USER, 6).await.unwrap(),
            WithdrawResult::InsufficientFunds { balance: 5 }
        );
        assert_eq!(repository.get_or_create(USER).await.unwrap().balance, 5);
    }

    #[test(tokio::test)]
    async fn withdrawing_from_missing_profile() {
        let repository = ProfileRepository::new(memory_pool().await);

        assert_eq!(
            repository.withdraw(USER, 1).await.unwrap(),
            WithdrawResult::InsufficientFunds { balance: 0 }
        );
    }
}
