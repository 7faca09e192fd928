use poise::serenity_prelude::UserId;
use sqlx::{query_as, FromRow, Pool, Sqlite};
use tracing::debug;

use crate::{
    models::{types::UtcDateTime, NewVouch, Rating, Vouch, VouchId},
    repository::conversion::DBConvertible,
};

use super::conversion::{DBFromConversionError, DBToConversionError};

pub struct VouchRepository {
    pool: Pool<Sqlite>,
}

#[derive(Debug)]
pub enum AddVouchResult {
    Added(Vouch),
    /// The voucher has already vouched for the target; nothing was written.
    AlreadyVouched(Vouch),
}

impl VouchRepository {
    pub fn new(pool: Pool<Sqlite>) -> VouchRepository {
        VouchRepository { pool }
    }

    /// All vouches received by `target`, newest first.
    #[tracing::instrument(skip(self))]
    pub async fn list_by_target(&self, target: UserId) -> Result<Vec<Vouch>, anyhow::Error> {
        let mut transaction = self.pool.begin().await?;

        let rows = {
            let target = target.to_db()?;

            query_as::<_, SqlVouch>(
                r#"
                    SELECT * FROM vouches
                    WHERE target_user_id = $1
                    ORDER BY created_at DESC, id ASC
                "#,
            )
            .bind(target)
            .fetch_all(&mut *transaction)
            .await?
        };

        transaction.commit().await?;

        debug!("Found {} vouches", rows.len());

        Ok(rows
            .iter()
            .map(Vouch::from_db)
            .collect::<Result<Vec<_>, _>>()?)
    }

    pub async fn find_existing(
        &self,
        voucher: UserId,
        target: UserId,
    ) -> Result<Option<Vouch>, anyhow::Error> {
        let mut transaction = self.pool.begin().await?;

        let existing = {
            let voucher = voucher.to_db()?;
            let target = target.to_db()?;

            query_as::<_, SqlVouch>(
                r#"
                    SELECT * FROM vouches
                    WHERE voucher_id = $1 AND target_user_id = $2
                    LIMIT 1
                "#,
            )
            .bind(voucher)
            .bind(target)
            .fetch_optional(&mut *transaction)
            .await?
        };

        transaction.commit().await?;

        match existing {
            Some(existing) => Ok(Some(Vouch::from_db(&existing)?)),
            None => Ok(None),
        }
    }

    /// Inserts the vouch unless the voucher has already vouched for the same target.
    #[tracing::instrument(skip_all, fields(voucher = %vouch.voucher, target = %vouch.target))]
    pub async fn add_vouch(&self, vouch: &NewVouch) -> Result<AddVouchResult, anyhow::Error> {
        let mut transaction = self.pool.begin().await?;

        let voucher = vouch.voucher.to_db()?;
        let target = vouch.target.to_db()?;

        let existing = query_as::<_, SqlVouch>(
            r#"
                SELECT * FROM vouches
                WHERE voucher_id = $1 AND target_user_id = $2
                LIMIT 1
            "#,
        )
        .bind(voucher)
        .bind(target)
        .fetch_optional(&mut *transaction)
        .await?;

        if let Some(existing) = existing {
            transaction.rollback().await?;
            return Ok(AddVouchResult::AlreadyVouched(Vouch::from_db(&existing)?));
        }

        let added = {
            let rating = vouch.rating.to_db()?;
            let created_at = vouch.created_at.to_db()?;

            query_as::<_, SqlVouch>(
                r#"
                    INSERT INTO vouches (
                        voucher_id,
                        target_user_id,
                        rating,
                        comment,
                        voucher_tag,
                        target_tag,
                        created_at)
                    VALUES ($1, $2, $3, $4, $5, $6, $7)
                    RETURNING *
                "#,
            )
            .bind(voucher)
            .bind(target)
            .bind(rating)
            .bind(&vouch.comment)
            .bind(&vouch.voucher_tag)
            .bind(&vouch.target_tag)
            .bind(created_at)
            .fetch_one(&mut *transaction)
            .await?
        };

        transaction.commit().await?;

        Ok(AddVouchResult::Added(Vouch::from_db(&added)?))
    }
}

#[derive(Debug, FromRow)]
pub struct SqlVouch {
    id: i64,
    voucher_id: i64,
    target_user_id: i64,
    rating: i64,
    comment: String,
    voucher_tag: String,
    target_tag: String,
    created_at: String,
}

impl DBConvertible for Vouch {
    type DBType = SqlVouch;

    fn to_db(&self) -> Result<Self::DBType, DBToConversionError> {
        Ok(SqlVouch {
            id: self.id.to_db()?,
            voucher_id: self.voucher.to_db()?,
            target_user_id: self.target.to_db()?,
            rating: self.rating.to_db()?,
            comment: self.comment.clone(),
            voucher_tag: self.voucher_tag.clone(),
            target_tag: self.target_tag.clone(),
            created_at: self.created_at.to_db()?,
        })
    }

    fn from_db(value: &Self::DBType) -> Result<Self, DBFromConversionError> {
        Ok(Vouch {
            id: VouchId::from_db(&value.id)?,
            voucher: UserId::from_db(&value.voucher_id)?,
            target: UserId::from_db(&value.target_user_id)?,
            rating: Rating::from_db(&value.rating)?,
            comment: value.comment.clone(),
            voucher_tag: value.voucher_tag.clone(),
            target_tag: value.target_tag.clone(),
            created_at: UtcDateTime::from_db(&value.created_at)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use poise::serenity_prelude::UserId;
    use test_log::test;
    use time::{macros::datetime, Duration};

    use super::{AddVouchResult, VouchRepository};
    use crate::{
        models::{types::UtcDateTime, NewVouch, Rating},
        repository::memory_pool,
    };

    const ALICE: UserId = UserId::new(1001);
    const BOB: UserId = UserId::new(1002);
    const CAROL: UserId = UserId::new(1003);

    fn new_vouch(voucher: UserId, target: UserId, minutes: i64) -> NewVouch {
        NewVouch {
            voucher,
            target,
            rating: Rating::new(4).unwrap(),
            comment: format!("vouch from {voucher}"),
            voucher_tag: format!("user{voucher}"),
            target_tag: format!("user{target}"),
            created_at: UtcDateTime::from(datetime!(2024-06-01 12:00 UTC))
                + Duration::minutes(minutes),
        }
    }

    #[test(tokio::test)]
    async fn empty_listing() {
        let repository = VouchRepository::new(memory_pool().await);
        assert!(repository.list_by_target(BOB).await.unwrap().is_empty());
    }

    #[test(tokio::test)]
    async fn add_and_find() {
        let repository = VouchRepository::new(memory_pool().await);

        let added = match repository.add_vouch(&new_vouch(ALICE, BOB, 0)).await.unwrap() {
            AddVouchResult::Added(vouch) => vouch,
            other => panic!("Expected the vouch to be added, got {other:?}"),
        };

        assert_eq!(added.voucher, ALICE);
        assert_eq!(added.target, BOB);
        assert_eq!(added.rating.get(), 4);

        let found = repository.find_existing(ALICE, BOB).await.unwrap();
        assert_eq!(found, Some(added));
        assert_eq!(repository.find_existing(BOB, ALICE).await.unwrap(), None);
    }

    #[test(tokio::test)]
    async fn duplicate_pair_is_rejected() {
        let repository = VouchRepository::new(memory_pool().await);

        repository.add_vouch(&new_vouch(ALICE, BOB, 0)).await.unwrap();
        let second = repository.add_vouch(&new_vouch(ALICE, BOB, 5)).await.unwrap();

        assert!(matches!(second, AddVouchResult::AlreadyVouched(ref v) if v.voucher == ALICE));

        let for_pair = repository
            .list_by_target(BOB)
            .await
            .unwrap()
            .into_iter()
            .filter(|v| v.voucher == ALICE)
            .count();
        assert_eq!(for_pair, 1);
    }

    #[test(tokio::test)]
    async fn pairs_are_ordered() {
        let repository = VouchRepository::new(memory_pool().await);

        repository.add_vouch(&new_vouch(ALICE, BOB, 0)).await.unwrap();
        let reverse = repository.add_vouch(&new_vouch(BOB, ALICE, 1)).await.unwrap();

        assert!(matches!(reverse, AddVouchResult::Added(_)));
    }

    #[test(tokio::test)]
    async fn listing_is_newest_first() {
        let repository = VouchRepository::new(memory_pool().await);

        repository.add_vouch(&new_vouch(ALICE, BOB, 0)).await.unwrap();
        repository.add_vouch(&new_vouch(CAROL, BOB, 30)).await.unwrap();
        repository.add_vouch(&new_vouch(CAROL, ALICE, 60)).await.unwrap();

        let vouchers: Vec<UserId> = repository
            .list_by_target(BOB)
            .await
            .unwrap()
            .iter()
            .map(|v| v.voucher)
            .collect();

        assert_eq!(vouchers, vec![CAROL, ALICE]);
    }

    #[test(tokio::test)]
    async fn ties_keep_insertion_order() {
        let repository = VouchRepository::new(memory_pool().await);

        repository.add_vouch(&new_vouch(ALICE, BOB, 0)).await.unwrap();
        repository.add_vouch(&new_vouch(CAROL, BOB, 0)).await.unwrap();

        let vouchers: Vec<UserId> = repository
            .list_by_target(BOB)
            .await
            .unwrap()
            .iter()
            .map(|v| v.voucher)
            .collect();

        assert_eq!(vouchers, vec![ALICE, CAROL]);
    }
}
