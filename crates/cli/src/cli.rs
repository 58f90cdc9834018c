use bibliotheca_core::Format;
use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Bibliotheca: manage a small library stored as JSON and XML
#[derive(Parser, Debug)]
#[command(name = "bibliotheca")]
#[command(version)]
#[command(about = "Manage a small library stored as JSON and XML")]
pub struct Cli {
    /// Directory holding `data.json` and `data.xml`
    #[arg(long, env = "BIBLIOTHECA_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Format to load the library from (`json` or `xml`)
    #[arg(long, env = "BIBLIOTHECA_FORMAT", default_value_t = Format::Json)]
    pub format: Format,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print collection counts and the availability of every book
    Summary,
    /// Load the library and rewrite both data files from it
    Convert,
    /// Check a librarian access code
    VerifyCode {
        code: u32,
    },
    /// A reader takes a book
    Lend(Loan),
    /// A reader brings a book back
    Return(Loan),
    /// Move a book to another rack and shelf
    Relocate {
        #[arg(long)]
        isbn: String,
        #[arg(long)]
        rack: String,
        #[arg(long)]
        shelf: String,
    },
    /// Remove a book that is neither on loan nor under discussion
    DeleteBook {
        #[arg(long)]
        isbn: String,
    },
    /// Book a seat in a reading room
    Reserve {
        #[arg(long)]
        room: String,
        #[arg(long)]
        seat: u32,
        /// Start of the booking, e.g. `2025-03-14T10:00`
        #[arg(long, value_parser = parse_datetime)]
        at: NaiveDateTime,
        #[command(flatten)]
        reader: ReaderName,
    },
    /// Leave or replace a reader's review of the library
    Review {
        #[command(flatten)]
        reader: ReaderName,
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,
        text: String,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct Loan {
    #[arg(long)]
    pub isbn: String,
    #[command(flatten)]
    pub reader: ReaderName,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ReaderName {
    /// Reader's first name
    #[arg(long = "first")]
    pub first_name: String,
    /// Reader's last name
    #[arg(long = "last")]
    pub last_name: String,
}

fn parse_datetime(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M"))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "Tests are predefined and guaranteed to be Some/Ok"
)]
mod tests {
    use super::*;
    use clap::CommandFactory as _;
    use pretty_assertions::assert_eq;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_reserve_with_flattened_reader() {
        let cli = Cli::try_parse_from([
            "bibliotheca",
            "--format",
            "xml",
            "reserve",
            "--room",
            "Main hall",
            "--seat",
            "3",
            "--at",
            "2025-03-14T10:00",
            "--first",
            "Ana",
            "--last",
            "Petrova",
        ])
        .unwrap();

        assert_eq!(cli.format, Format::Xml);
        assert_eq!(
            cli.command,
            Command::Reserve {
                room: "Main hall".to_owned(),
                seat: 3,
                at: parse_datetime("2025-03-14T10:00:00").unwrap(),
                reader: ReaderName {
                    first_name: "Ana".to_owned(),
                    last_name: "Petrova".to_owned(),
                },
            }
        );
    }

    #[test]
    fn rejects_out_of_range_rating() {
        let parsed = Cli::try_parse_from([
            "bibliotheca", "review", "--first", "Ana", "--last", "Petrova", "--rating", "6",
            "Nice",
        ]);
        assert!(parsed.is_err());
    }
}
