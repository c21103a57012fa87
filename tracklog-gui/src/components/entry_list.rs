use iced::{
    Element, Length, Task,
    widget::{Column, button, column, container, row, scrollable, space, text, text_input},
};
use tokio::task::spawn_blocking;
use tracing::{debug, error};
use tracklog_lib::{Entry, Repository};

#[derive(Debug, Clone)]
pub enum Message {
    /// Result of the load started as `generation`
    Loaded {
        generation: u64,
        result: Result<Vec<Entry>, String>,
    },
    FilterChanged(String),
    DeletePressed(u32),
    Deleted(Result<bool, String>),
}

#[derive(Debug)]
pub enum State {
    Loading,
    Error(String),
    Loaded(Vec<Entry>),
}

/// Lists the entries stored in the [`Repository`], filtered by title.
///
/// Every load is tagged with a generation. Only the reply to the most recent load is applied,
/// so a slow query for an old filter can't overwrite the results for the current one.
pub struct EntryList {
    repo: Option<Repository>,
    state: State,
    filter: String,
    generation: u64,
    /// Last failed action, shown above the list
    notice: Option<String>,
}

impl EntryList {
    pub fn new(repo: Repository) -> (Self, Task<Message>) {
        let mut list = Self {
            repo: Some(repo),
            state: State::Loading,
            filter: String::new(),
            generation: 0,
            notice: None,
        };
        let task = list.refresh();

        (list, task)
    }

    /// A list that could not open its repository.
    pub fn failed(reason: String) -> Self {
        Self {
            repo: None,
            state: State::Error(reason),
            filter: String::new(),
            generation: 0,
            notice: None,
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Loaded { generation, .. } if generation != self.generation => {
                debug!("Dropping entries from stale load {generation}");
                Task::none()
            }
            Message::Loaded { result, .. } => {
                self.state = match result {
                    Ok(entries) => State::Loaded(entries),
                    Err(err) => {
                        error!("{err}");
                        State::Error(err)
                    }
                };
                Task::none()
            }
            Message::FilterChanged(filter) => {
                self.filter = filter;
                self.refresh()
            }
            Message::DeletePressed(id) => {
                let Some(repo) = self.repo.clone() else {
                    return Task::none();
                };

                Task::perform(
                    async move {
                        spawn_blocking(move || repo.delete_entry(id))
                            .await
                            .map_err(|err| err.to_string())
                            .and_then(|result| result.map_err(|err| err.to_string()))
                    },
                    Message::Deleted,
                )
            }
            Message::Deleted(Ok(_)) => {
                self.notice = None;
                self.refresh()
            }
            Message::Deleted(Err(err)) => {
                error!("Failed to delete entry: {err}");
                self.notice = Some(format!("Could not delete entry: {err}"));
                self.refresh()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let body: Element<'_, Message> = match &self.state {
            State::Loading => text("Loading entries...").into(),
            State::Error(e) => text(format!("Could not load entries: {e}")).into(),
            State::Loaded(entries) => {
                let rows = entries.iter().map(entry_row);
                scrollable(Column::with_children(rows))
                    .width(Length::Fill)
                    .into()
            }
        };

        // The filter stays available in every state so a failed load can be retried
        let mut content = column![
            text_input("Filter by title", &self.filter).on_input(Message::FilterChanged),
        ]
        .spacing(12);
        if let Some(notice) = &self.notice {
            content = content.push(text(notice.as_str()));
        }

        content.push(body).into()
    }

    /// Start a new load for the current filter. Replies to earlier loads are ignored.
    pub fn refresh(&mut self) -> Task<Message> {
        let Some(repo) = &self.repo else {
            return Task::none();
        };
        self.generation = self.generation.wrapping_add(1);

        load_entries(repo, &self.filter, self.generation)
    }
}

fn load_entries(repo: &Repository, filter: &str, generation: u64) -> Task<Message> {
    let repo = repo.clone();
    let filter = filter.to_owned();

    Task::perform(
        async move {
            spawn_blocking(move || repo.find_entries(&filter))
                .await
                .map_err(|err| err.to_string())
        },
        move |result| Message::Loaded { generation, result },
    )
}

fn entry_row<'a>(entry: &Entry) -> Element<'a, Message> {
    container(
        row![
            text(format!("{} - {}", entry.title, entry.artist)),
            space::horizontal(),
            text(entry.rating_label()),
            button("Delete").on_press(Message::DeletePressed(entry.id)),
        ]
        .spacing(12)
        .padding(12),
    )
    .width(Length::Fill)
    .style(container::bordered_box)
    .into()
}
