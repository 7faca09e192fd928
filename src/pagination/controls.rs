use poise::serenity_prelude::{ButtonStyle, CreateActionRow, CreateButton};
use strum::{AsRefStr, EnumString};

/// A navigation button press, identified by the button's custom id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString, AsRefStr)]
pub enum NavAction {
    #[strum(serialize = "vouches_prev")]
    Prev,
    #[strum(serialize = "vouches_next")]
    Next,
}

/// Which navigation buttons are usable on the current page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavControls {
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

impl NavControls {
    pub fn for_page(page: usize, total_pages: usize) -> NavControls {
        NavControls {
            prev_enabled: page > 0,
            next_enabled: page + 1 < total_pages,
        }
    }

    pub fn action_row(&self) -> CreateActionRow {
        CreateActionRow::Buttons(vec![
            CreateButton::new(NavAction::Prev.as_ref())
                .label("◀ Previous")
                .style(ButtonStyle::Secondary)
                .disabled(!self.prev_enabled),
            CreateButton::new(NavAction::Next.as_ref())
                .label("Next ▶")
                .style(ButtonStyle::Secondary)
                .disabled(!self.next_enabled),
        ])
    }
}
