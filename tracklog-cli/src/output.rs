use colored::Colorize;
use sysexits::ExitCode;
use tracklog_lib::{Entry, Error};

/// Print a one line summary of an entry.
pub fn summary(entry: &Entry) {
    println!(
        "{:>4}  {} {} {}  {}",
        entry.id.to_string().bold(),
        entry.title.bold(),
        "by".dimmed(),
        entry.artist,
        entry.rating_label().yellow()
    );
}

/// Print every field of an entry.
pub fn detail(entry: &Entry) {
    println!("{} {}", entry.title.bold(), format!("#{}", entry.id).dimmed());
    field("Artist", &entry.artist);
    field("Year", &entry.year);
    field("Genre", &entry.genre);
    field("Rating", &entry.rating_label());
    field("Listened", &entry.listen_date);
    field("Favorite", &entry.favorite_song);

    if !entry.review.is_empty() {
        println!();
        println!("{}", entry.review);
    }
}

fn field(label: &str, value: &str) {
    println!("  {:<10}{}", label.dimmed(), value);
}

pub fn not_found(id: u32) -> ExitCode {
    eprintln!("{} no entry with id {id}", "error:".red().bold());
    ExitCode::DataErr
}

pub fn failure(err: &Error) -> ExitCode {
    eprintln!("{} {err}", "error:".red().bold());

    match err {
        Error::Io { .. } => ExitCode::IoErr,
        Error::Json { .. } | Error::IdsExhausted | Error::IdTaken(_) => ExitCode::DataErr,
        Error::ConfigWrite(_) | Error::NoHomeDir => ExitCode::Config,
    }
}

#[cfg(test)]
mod test {
    use std::{fs, io};

    use tracklog_lib::Repository;

    use super::*;

    #[test]
    fn test_failure_codes() {
        let io_err = Error::Io {
            path: "entries.json".into(),
            source: io::Error::other("disk on fire"),
        };
        assert_eq!(failure(&io_err), ExitCode::IoErr);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.json");
        fs::write(&path, "{ not json").unwrap();
        let json_err = Repository::open(&path).unwrap_err();
        assert!(matches!(json_err, Error::Json { .. }));
        assert_eq!(failure(&json_err), ExitCode::DataErr);

        assert_eq!(failure(&Error::IdsExhausted), ExitCode::DataErr);
        assert_eq!(failure(&Error::NoHomeDir), ExitCode::Config);
    }

    #[test]
    fn test_not_found_code() {
        assert_eq!(not_found(7), ExitCode::DataErr);
    }
}
