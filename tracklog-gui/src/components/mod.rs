use std::sync::Arc;

use iced::{
    Element,
    Length::Fill,
    Task, Theme,
    widget::{column, pick_list, row, space, text},
};
use parking_lot::RwLock;
use strum::IntoEnumIterator;
use tracing::{error, warn};
use tracklog_lib::Repository;

use crate::{
    components::{
        entry_card::EntryCard,
        entry_list::EntryList,
    },
    config::{self, Cfg, GuiConfig},
};

pub mod entry_card;
pub mod entry_list;

#[derive(Debug, Clone)]
pub enum Message {
    ThemeSelected(config::Theme),
    // Components
    EntryList(entry_list::Message),
}

pub struct App {
    cfg: Cfg,
    title: String,
    theme: Theme,
    // Components
    entry_card: EntryCard,
    entry_list: EntryList,
}

impl App {
    pub fn new() -> (Self, Task<Message>) {
        let cfg = Arc::new(RwLock::new(GuiConfig::load()));
        let theme = cfg.read().theme();

        let (entry_list, entry_list_task) = match Repository::new() {
            Ok(repo) => EntryList::new(repo),
            Err(err) => {
                error!("Failed to open the entry repository: {err}");
                (EntryList::failed(err.to_string()), Task::none())
            }
        };

        (
            Self {
                cfg,
                title: "Tracklog".into(),
                theme,
                entry_card: EntryCard::new(),
                entry_list,
            },
            entry_list_task.map(Message::EntryList),
        )
    }

    // Update application state based on messages passed by view()
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ThemeSelected(theme) => {
                self.theme = (&theme).into();

                let mut cfg = self.cfg.write();
                cfg.theme = theme;
                if let Err(err) = cfg.save() {
                    warn!("Failed to save GUI configuration: {err}");
                }

                Task::none()
            }
            // Redirect messages to relevant child components
            Message::EntryList(msg) => self.entry_list.update(msg).map(Message::EntryList),
        }
    }

    // Render the application and pass along messages from components to update()
    pub fn view(&self) -> Element<'_, Message> {
        column![
            // Top bar
            row![
                text("Featured album"),
                space::horizontal(),
                pick_list(
                    config::Theme::iter().collect::<Vec<_>>(),
                    Some(self.cfg.read().theme),
                    Message::ThemeSelected
                ),
            ],
            self.entry_card.view(),
            self.entry_list.view().map(Message::EntryList),
        ]
        .spacing(20)
        .padding(20)
        .height(Fill)
        .into()
    }

    pub fn title(&self) -> String {
        self.title.clone()
    }

    pub fn theme(&self) -> Theme {
        self.theme.clone()
    }
}
