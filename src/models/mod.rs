mod profile;
mod vouch;

pub mod types;

pub use profile::UserProfile;
pub use vouch::{NewVouch, Rating, Vouch, VouchId};
