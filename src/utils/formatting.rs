use poise::serenity_prelude::{Mentionable, UserId};

use crate::models::Rating;

const FILLED_STAR: char = '⭐';
const EMPTY_STAR: char = '☆';

/// `filled` gold stars padded with hollow ones up to five.
pub fn stars(filled: u8) -> String {
    let filled = filled.min(Rating::MAX);
    let mut out = String::new();
    out.extend(std::iter::repeat(FILLED_STAR).take(filled as usize));
    out.extend(std::iter::repeat(EMPTY_STAR).take((Rating::MAX - filled) as usize));
    out
}

pub fn rating_stars(rating: Rating) -> String {
    format!("{} ({rating}/5)", stars(rating.get()))
}

pub fn mention(user: UserId) -> String {
    user.mention().to_string()
}
