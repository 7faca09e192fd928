//! Pure rendering of a vouch listing into display blocks.
//!
//! Nothing here touches Discord: the blocks are turned into embeds by [`super::embeds`], so the
//! same page can be rendered again after navigation or expiry with identical results.

use std::fmt::Display;

use poise::serenity_prelude::UserId;

use crate::{
    models::{types::UtcDateTime, Rating, Vouch},
    utils::{
        formatting::{mention, rating_stars, stars},
        timestamp, TimestampStyle,
    },
};

pub const PAGE_SIZE: usize = 3;

/// Who the listing is about, captured once when the listing is requested.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingSubject {
    pub user: UserId,
    pub display_name: String,
    pub avatar_url: String,
    pub is_requester: bool,
    pub listed_at: UtcDateTime,
}

/// A snapshot of every vouch a user has received, newest first.
#[derive(Clone, Debug)]
pub struct VouchListing {
    pub subject: ListingSubject,
    pub vouches: Vec<Vouch>,
}

impl VouchListing {
    pub fn total_pages(&self) -> usize {
        total_pages(self.vouches.len())
    }
}

pub fn total_pages(vouch_count: usize) -> usize {
    vouch_count.div_ceil(PAGE_SIZE)
}

/// Mean rating kept in tenths, so `4.5` is stored as `45`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AverageRating {
    tenths: u32,
}

impl AverageRating {
    /// `None` for an empty slice, the average of nothing is not defined.
    pub fn of(vouches: &[Vouch]) -> Option<AverageRating> {
        if vouches.is_empty() {
            return None;
        }

        let count = vouches.len() as u64;
        let sum: u64 = vouches.iter().map(|v| v.rating.get() as u64).sum();

        // Round half up: floor(sum * 10 / count + 1/2).
        let tenths = (sum * 20 + count) / (count * 2);

        Some(AverageRating {
            tenths: tenths as u32,
        })
    }

    pub fn tenths(&self) -> u32 {
        self.tenths
    }

    /// The one-decimal average rounded to a whole star, `.5` going up.
    pub fn rounded_stars(&self) -> u8 {
        ((self.tenths + 5) / 10) as u8
    }
}

impl Display for AverageRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.tenths / 10, self.tenths % 10)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderedListing {
    Empty(EmptyBlock),
    Page(RenderedPage),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmptyBlock {
    pub title: String,
    pub description: String,
    pub avatar_url: String,
    pub listed_at: UtcDateTime,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedPage {
    pub summary: SummaryBlock,
    pub entries: Vec<VouchBlock>,
    pub footer: Option<FooterBlock>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryBlock {
    pub title: String,
    pub avatar_url: String,
    pub total: usize,
    pub average: AverageRating,
    pub listed_at: UtcDateTime,
}

impl SummaryBlock {
    pub fn average_line(&self) -> String {
        format!(
            "{} ({}/5)",
            stars(self.average.rounded_stars()),
            self.average
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VouchBlock {
    pub number: usize,
    pub title: String,
    pub rating: Rating,
    pub comment: String,
    pub reviewer: UserId,
    pub created_at: UtcDateTime,
}

impl VouchBlock {
    pub fn rating_line(&self) -> String {
        rating_stars(self.rating)
    }

    pub fn reviewer_line(&self) -> String {
        mention(self.reviewer)
    }

    pub fn date_line(&self) -> String {
        timestamp(self.created_at, TimestampStyle::RelativeTime)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FooterBlock {
    /// 1-based.
    pub page: usize,
    pub total_pages: usize,
    pub shown: usize,
}

impl Display for FooterBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Page {} of {} • Showing {} vouches",
            self.page, self.total_pages, self.shown
        )
    }
}

/// Renders page `page` (0-based) of the listing. Pages past the end render as the last page.
pub fn render(listing: &VouchListing, page: usize) -> RenderedListing {
    let subject = &listing.subject;

    let Some(average) = AverageRating::of(&listing.vouches) else {
        let description = if subject.is_requester {
            "You haven't received any vouches yet.".to_string()
        } else {
            format!("{} hasn't received any vouches yet.", mention(subject.user))
        };

        return RenderedListing::Empty(EmptyBlock {
            title: "📝 No Vouches Found".to_string(),
            description,
            avatar_url: subject.avatar_url.clone(),
            listed_at: subject.listed_at,
        });
    };

    let total_pages = listing.total_pages();
    let page = page.min(total_pages - 1);
    let start = page * PAGE_SIZE;
    let end = (start + PAGE_SIZE).min(listing.vouches.len());

    let entries: Vec<VouchBlock> = listing.vouches[start..end]
        .iter()
        .enumerate()
        .map(|(index, vouch)| VouchBlock {
            number: start + index + 1,
            title: format!(
                "{}'s Review #{}",
                subject.display_name,
                start + index + 1
            ),
            rating: vouch.rating,
            comment: vouch.comment.clone(),
            reviewer: vouch.voucher,
            created_at: vouch.created_at,
        })
        .collect();

    let footer = (total_pages > 1).then_some(FooterBlock {
        page: page + 1,
        total_pages,
        shown: entries.len(),
    });

    RenderedListing::Page(RenderedPage {
        summary: SummaryBlock {
            title: format!("📋 Vouches for {}", subject.display_name),
            avatar_url: subject.avatar_url.clone(),
            total: listing.vouches.len(),
            average,
            listed_at: subject.listed_at,
        },
        entries,
        footer,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use poise::serenity_prelude::UserId;
    use test_log::test;
    use time::{macros::datetime, Duration};

    use super::*;
    use crate::models::VouchId;

    pub const TARGET: UserId = UserId::new(500);

    pub fn vouch_with_rating(n: u64, rating: u8) -> Vouch {
        Vouch {
            id: VouchId(n),
            voucher: UserId::new(1000 + n),
            target: TARGET,
            rating: Rating::new(rating).unwrap(),
            comment: format!("comment {n}"),
            voucher_tag: format!("voucher{n}"),
            target_tag: "target".to_string(),
            created_at: UtcDateTime::from(datetime!(2024-06-01 12:00 UTC))
                + Duration::hours(-(n as i64)),
        }
    }

    pub fn listing(count: u64) -> VouchListing {
        listing_with_ratings(&vec![5; count as usize])
    }

    pub fn listing_with_ratings(ratings: &[u8]) -> VouchListing {
        VouchListing {
            subject: ListingSubject {
                user: TARGET,
                display_name: "Target".to_string(),
                avatar_url: "https://cdn.discordapp.com/embed/avatars/0.png".to_string(),
                is_requester: false,
                listed_at: UtcDateTime::from(datetime!(2024-06-02 00:00 UTC)),
            },
            vouches: ratings
                .iter()
                .enumerate()
                .map(|(i, r)| vouch_with_rating(i as u64 + 1, *r))
                .collect(),
        }
    }

    fn page(listing: &VouchListing, page: usize) -> RenderedPage {
        match render(listing, page) {
            RenderedListing::Page(page) => page,
            RenderedListing::Empty(_) => panic!("Expected a page"),
        }
    }

    #[test]
    fn page_sizes() {
        for count in 1..=10 {
            let listing = listing(count);
            let count = count as usize;
            for p in 0..listing.total_pages() {
                assert_eq!(
                    page(&listing, p).entries.len(),
                    PAGE_SIZE.min(count - p * PAGE_SIZE),
                    "count {count}, page {p}"
                );
            }
        }
    }

    #[test]
    fn pages_cover_the_listing_in_order() {
        let listing = listing(8);
        let numbers: Vec<usize> = (0..listing.total_pages())
            .flat_map(|p| page(&listing, p).entries)
            .map(|entry| entry.number)
            .collect();
        assert_eq!(numbers, (1..=8).collect::<Vec<_>>());

        let reviewers: Vec<UserId> = (0..listing.total_pages())
            .flat_map(|p| page(&listing, p).entries)
            .map(|entry| entry.reviewer)
            .collect();
        let expected: Vec<UserId> = listing.vouches.iter().map(|v| v.voucher).collect();
        assert_eq!(reviewers, expected);
    }

    #[test]
    fn seven_vouches() {
        let listing = listing(7);
        assert_eq!(listing.total_pages(), 3);

        let sizes: Vec<usize> = (0..3).map(|p| page(&listing, p).entries.len()).collect();
        assert_eq!(sizes, vec![3, 3, 1]);

        let footer = page(&listing, 2).footer.expect("Multi-page listings have a footer");
        assert_eq!(footer.to_string(), "Page 3 of 3 • Showing 1 vouches");
    }

    #[test]
    fn single_page_has_no_footer() {
        let rendered = page(&listing(3), 0);
        assert_eq!(rendered.entries.len(), 3);
        assert_eq!(rendered.footer, None);
    }

    #[test]
    fn average_of_five_four_three() {
        let rendered = page(&listing_with_ratings(&[5, 4, 3]), 0);
        assert_eq!(rendered.summary.total, 3);
        assert_eq!(rendered.summary.average.to_string(), "4.0");
        assert_eq!(rendered.summary.average_line(), "⭐⭐⭐⭐☆ (4.0/5)");
    }

    #[test]
    fn average_rounds_half_up() {
        // 4.5 exactly: five stars, not four.
        let average = AverageRating::of(&listing_with_ratings(&[5, 4]).vouches).unwrap();
        assert_eq!(average.to_string(), "4.5");
        assert_eq!(average.rounded_stars(), 5);

        // 89 / 20 = 4.45 rounds to 4.5 at one decimal.
        let mut ratings = vec![4; 20];
        ratings[..9].fill(5);
        let average = AverageRating::of(&listing_with_ratings(&ratings).vouches).unwrap();
        assert_eq!(average.to_string(), "4.5");

        // 5 / 3 = 1.666...
        let average = AverageRating::of(&listing_with_ratings(&[1, 2, 2]).vouches).unwrap();
        assert_eq!(average.to_string(), "1.7");
        assert_eq!(average.rounded_stars(), 2);
    }

    #[test]
    fn average_of_nothing_is_undefined() {
        assert_eq!(AverageRating::of(&[]), None);
    }

    #[test]
    fn empty_listing_short_circuits() {
        let mut listing = listing(0);
        assert_eq!(listing.total_pages(), 0);

        match render(&listing, 0) {
            RenderedListing::Empty(block) => {
                assert_eq!(block.title, "📝 No Vouches Found");
                assert_eq!(block.description, "<@500> hasn't received any vouches yet.");
            }
            other => panic!("Expected the empty block, got {other:?}"),
        }

        listing.subject.is_requester = true;
        match render(&listing, 0) {
            RenderedListing::Empty(block) => {
                assert_eq!(block.description, "You haven't received any vouches yet.")
            }
            other => panic!("Expected the empty block, got {other:?}"),
        }
    }

    #[test]
    fn vouch_block_content() {
        let listing = listing_with_ratings(&[5, 5, 5, 2]);
        let entry = &page(&listing, 1).entries[0];

        assert_eq!(entry.number, 4);
        assert_eq!(entry.title, "Target's Review #4");
        assert_eq!(entry.rating_line(), "⭐⭐☆☆☆ (2/5)");
        assert_eq!(entry.comment, "comment 4");
        assert_eq!(entry.reviewer_line(), "<@1004>");
        assert_eq!(
            entry.date_line(),
            format!("<t:{}:R>", listing.vouches[3].created_at.unix_timestamp())
        );
    }

    #[test]
    fn rendering_is_repeatable() {
        let listing = listing(5);
        assert_eq!(render(&listing, 1), render(&listing, 1));
    }

    #[test]
    fn out_of_range_page_is_clamped() {
        let listing = listing(4);
        assert_eq!(render(&listing, 9), render(&listing, 1));
    }
}
