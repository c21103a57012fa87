use std::fmt::{self, Display, Formatter};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Highest rating shown when rendering stars.
pub const MAX_RATING: u8 = 5;

/// A single logged listen of an album.
///
/// This is a structural record only. None of the fields are validated: `year` and
/// `listen_date` are kept as the text the user entered, and `rating` is not range checked.
/// Every field is required, both when building the struct and when deserializing it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: u32,
    /// Album title
    pub title: String,
    pub artist: String,
    /// Release year as free-form text
    pub year: String,
    pub genre: String,
    /// Rating out of five by convention
    pub rating: u8,
    /// Date of the listen, usually `YYYY-MM-DD`
    pub listen_date: String,
    pub review: String,
    pub favorite_song: String,
}

impl Entry {
    /// Create an [`Entry`] with the given id and every other field empty.
    pub fn with_id(id: u32) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// The release year, if `year` holds a plain integer.
    pub fn release_year(&self) -> Option<i32> {
        self.year.trim().parse().ok()
    }

    /// The listen date, if `listen_date` is a `YYYY-MM-DD` date.
    pub fn listened_on(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.listen_date.trim(), "%Y-%m-%d").ok()
    }

    /// The rating as filled and empty stars, clamped to [`MAX_RATING`].
    pub fn stars(&self) -> String {
        let filled = usize::from(self.rating.min(MAX_RATING));
        let empty = usize::from(MAX_RATING) - filled;

        format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
    }

    /// The stars followed by the stored rating, so out of range values stay visible.
    pub fn rating_label(&self) -> String {
        format!("{} ({})", self.stars(), self.rating)
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Entry [id={}, title={}, artist={}, year={}, rating={}, listenDate={}, review={}, favoriteSong={}]",
            self.id,
            self.title,
            self.artist,
            self.year,
            self.rating,
            self.listen_date,
            self.review,
            self.favorite_song
        )
    }
}
