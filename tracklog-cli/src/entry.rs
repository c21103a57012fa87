use chrono::Local;
use clap::{Args, Subcommand};
use sysexits::ExitCode;
use tracklog_lib::{Entry, Repository};

use crate::output;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List all entries
    List,
    /// Find entries whose title contains some text
    Search { text: String },
    /// Show a single entry
    Show { id: u32 },
    /// Log a new entry
    Add {
        title: String,
        artist: String,
        #[command(flatten)]
        details: Details,
    },
    /// Change fields of an existing entry
    Edit {
        id: u32,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        artist: Option<String>,
        #[command(flatten)]
        details: Details,
    },
    /// Delete an entry
    Delete { id: u32 },
}

/// Optional entry fields shared by `add` and `edit`.
#[derive(Args, Debug, Clone, Default)]
pub struct Details {
    /// Release year
    #[arg(long)]
    year: Option<String>,
    #[arg(long)]
    genre: Option<String>,
    /// Rating out of 5
    #[arg(short, long)]
    rating: Option<u8>,
    /// Date you listened, defaults to today when adding
    #[arg(long)]
    listen_date: Option<String>,
    #[arg(long)]
    review: Option<String>,
    #[arg(long)]
    favorite_song: Option<String>,
}

impl Details {
    /// Overwrite the fields of `entry` that were given on the command line.
    fn apply(self, entry: &mut Entry) {
        let Self {
            year,
            genre,
            rating,
            listen_date,
            review,
            favorite_song,
        } = self;

        if let Some(year) = year {
            entry.year = year;
        }
        if let Some(genre) = genre {
            entry.genre = genre;
        }
        if let Some(rating) = rating {
            entry.rating = rating;
        }
        if let Some(listen_date) = listen_date {
            entry.listen_date = listen_date;
        }
        if let Some(review) = review {
            entry.review = review;
        }
        if let Some(favorite_song) = favorite_song {
            entry.favorite_song = favorite_song;
        }
    }
}

pub fn handle(repo: &Repository, cmd: &Command) -> ExitCode {
    match cmd.clone() {
        Command::List => {
            for entry in repo.entries() {
                output::summary(&entry);
            }
            ExitCode::Ok
        }
        Command::Search { text } => {
            let entries = repo.find_entries(&text);
            if entries.is_empty() {
                eprintln!("No entries match '{text}'");
                return ExitCode::DataErr;
            }
            for entry in entries {
                output::summary(&entry);
            }
            ExitCode::Ok
        }
        Command::Show { id } => match repo.entry(id) {
            Some(entry) => {
                output::detail(&entry);
                ExitCode::Ok
            }
            None => output::not_found(id),
        },
        Command::Add {
            title,
            artist,
            details,
        } => {
            let entry = new_entry(title, artist, details);
            match repo.create_entry(entry) {
                Ok(created) => {
                    output::detail(&created);
                    ExitCode::Ok
                }
                Err(err) => output::failure(&err),
            }
        }
        Command::Edit {
            id,
            title,
            artist,
            details,
        } => {
            let Some(mut entry) = repo.entry(id) else {
                return output::not_found(id);
            };

            if let Some(title) = title {
                entry.title = title;
            }
            if let Some(artist) = artist {
                entry.artist = artist;
            }
            details.apply(&mut entry);

            match repo.update_entry(entry) {
                Ok(Some(updated)) => {
                    output::detail(&updated);
                    ExitCode::Ok
                }
                Ok(None) => output::not_found(id),
                Err(err) => output::failure(&err),
            }
        }
        Command::Delete { id } => match repo.delete_entry(id) {
            Ok(true) => ExitCode::Ok,
            Ok(false) => output::not_found(id),
            Err(err) => output::failure(&err),
        },
    }
}

fn new_entry(title: String, artist: String, details: Details) -> Entry {
    let mut entry = Entry {
        title,
        artist,
        listen_date: Local::now().date_naive().format("%Y-%m-%d").to_string(),
        ..Default::default()
    };
    details.apply(&mut entry);

    entry
}
