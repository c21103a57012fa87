use getset::Getters;

use crate::Entry;

/// Owns a single [`Entry`] for a view to display.
///
/// The entry is fixed at construction and can only be read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct EntryHolder {
    #[getset(get = "pub")]
    entry: Entry,
}

impl EntryHolder {
    pub fn new() -> Self {
        Self {
            entry: Entry {
                id: 1,
                title: "The Dark Side of the Moon".into(),
                artist: "Pink Floyd".into(),
                year: "1973".into(),
                genre: "Progressive Rock".into(),
                rating: 5,
                listen_date: "1973-03-01".into(),
                review: "A masterpiece of an album. It is a must-listen for any music lover."
                    .into(),
                favorite_song: "Time".into(),
            },
        }
    }
}

impl Default for EntryHolder {
    fn default() -> Self {
        Self::new()
    }
}
