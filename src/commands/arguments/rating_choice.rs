use crate::models::Rating;

#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum RatingChoice {
    #[name = "⭐ (1 star)"]
    One,
    #[name = "⭐⭐ (2 stars)"]
    Two,
    #[name = "⭐⭐⭐ (3 stars)"]
    Three,
    #[name = "⭐⭐⭐⭐ (4 stars)"]
    Four,
    #[name = "⭐⭐⭐⭐⭐ (5 stars)"]
    Five,
}

impl RatingChoice {
    pub fn rating(self) -> Rating {
        let value = match self {
            RatingChoice::One => 1,
            RatingChoice::Two => 2,
            RatingChoice::Three => 3,
            RatingChoice::Four => 4,
            RatingChoice::Five => 5,
        };
        Rating::new(value).expect("Every choice is within the rating range")
    }
}

#[cfg(test)]
mod tests {
    use super::RatingChoice;

    #[test]
    fn choices_map_to_ratings() {
        assert_eq!(RatingChoice::One.rating().get(), 1);
        assert_eq!(RatingChoice::Three.rating().get(), 3);
        assert_eq!(RatingChoice::Five.rating().get(), 5);
    }
}
