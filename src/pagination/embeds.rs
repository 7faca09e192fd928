use poise::serenity_prelude::{Colour, CreateEmbed, Timestamp};

use super::render::{EmptyBlock, FooterBlock, RenderedListing, RenderedPage, SummaryBlock, VouchBlock};
use crate::models::types::UtcDateTime;

const SUMMARY_COLOUR: Colour = Colour(0x0099ff);
const VOUCH_COLOUR: Colour = Colour(0x4caf50);
const FOOTER_COLOUR: Colour = Colour(0x666666);
const EMPTY_COLOUR: Colour = Colour(0xffaa00);

pub fn listing_embeds(listing: &RenderedListing) -> Vec<CreateEmbed> {
    match listing {
        RenderedListing::Empty(block) => vec![empty_embed(block)],
        RenderedListing::Page(page) => page_embeds(page),
    }
}

pub fn page_embeds(page: &RenderedPage) -> Vec<CreateEmbed> {
    let mut embeds = Vec::with_capacity(page.entries.len() + 2);

    embeds.push(summary_embed(&page.summary));
    embeds.extend(page.entries.iter().map(vouch_embed));
    embeds.extend(page.footer.iter().map(footer_embed));

    embeds
}

fn empty_embed(block: &EmptyBlock) -> CreateEmbed {
    with_timestamp(
        CreateEmbed::new()
            .colour(EMPTY_COLOUR)
            .title(&block.title)
            .thumbnail(&block.avatar_url)
            .description(&block.description),
        block.listed_at,
    )
}

fn summary_embed(block: &SummaryBlock) -> CreateEmbed {
    with_timestamp(
        CreateEmbed::new()
            .colour(SUMMARY_COLOUR)
            .title(&block.title)
            .thumbnail(&block.avatar_url)
            .field("Total Vouches", block.total.to_string(), true)
            .field("Average Rating", block.average_line(), true),
        block.listed_at,
    )
}

fn vouch_embed(block: &VouchBlock) -> CreateEmbed {
    CreateEmbed::new()
        .colour(VOUCH_COLOUR)
        .title(&block.title)
        .field("Rating", block.rating_line(), false)
        .field("Comment", &block.comment, false)
        .field("Reviewed by", block.reviewer_line(), true)
        .field("Date", block.date_line(), true)
}

fn footer_embed(block: &FooterBlock) -> CreateEmbed {
    CreateEmbed::new()
        .colour(FOOTER_COLOUR)
        .description(format!("📄 {block}"))
}

pub fn with_timestamp(embed: CreateEmbed, datetime: UtcDateTime) -> CreateEmbed {
    match Timestamp::from_unix_timestamp(datetime.unix_timestamp()) {
        Ok(timestamp) => embed.timestamp(timestamp),
        Err(_) => embed,
    }
}
