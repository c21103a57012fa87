use iced::{
    Element,
    widget::{column, container, row, text},
};
use tracklog_lib::EntryHolder;

/// Displays the entry owned by an [`EntryHolder`].
///
/// The card only reads the entry, so it has no messages of its own and can be embedded in any
/// parent view.
#[derive(Debug, Default)]
pub struct EntryCard {
    holder: EntryHolder,
}

impl EntryCard {
    pub fn new() -> Self {
        Self {
            holder: EntryHolder::new(),
        }
    }

    pub fn holder(&self) -> &EntryHolder {
        &self.holder
    }

    pub fn view<'a, Message: 'a>(&'a self) -> Element<'a, Message> {
        let entry = self.holder.entry();

        container(
            column![
                text(entry.title.as_str()).size(24),
                text(format!("{} ({})", entry.artist, entry.year)),
                field("Genre", &entry.genre),
                field("Rating", entry.rating_label()),
                field("Listened", &entry.listen_date),
                field("Favorite song", &entry.favorite_song),
                text(entry.review.as_str()),
            ]
            .spacing(6),
        )
        .padding(20)
        .style(container::rounded_box)
        .into()
    }
}

fn field<'a, Message: 'a>(label: &'a str, value: impl ToString) -> Element<'a, Message> {
    row![text(label).width(120), text(value.to_string())].into()
}
