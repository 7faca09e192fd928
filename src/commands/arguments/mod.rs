use super::CommandError;

mod rating_choice;
mod vouch_comment;

pub use rating_choice::RatingChoice;
pub use vouch_comment::VouchComment;

pub fn invalid_argument(message: String) -> CommandError {
    CommandError::User { message }
}
