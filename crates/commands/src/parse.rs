use core::str::FromStr;

use thiserror::Error;

/// A parsed chat command. Positions are 1-based, as shown in lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClubCommand {
    Start,
    Help,
    /// The n-th upcoming session (`/next` means 1).
    Next(u32),
    Register,
    Deregister,
    AddBook { author: String, title: String },
    ListHosts,
    ListBooks,
    DeleteBook(usize),
    MyNextBook(usize),
    SetQueue(Vec<usize>),
    GetQueue,
    SetStart(usize),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("not a command")]
    NotACommand,

    #[error("unknown command /{0}")]
    Unknown(String),

    #[error("wrong format, use: {usage}")]
    BadArguments { usage: &'static str },
}

/// Command names with their usage lines, in help order.
pub const COMMANDS: &[(&str, &str)] = &[
    ("help", "/help - show available commands"),
    ("start", "/start - set up the club for this chat"),
    ("next", "/next [n] - show the next (or n-th) club session"),
    ("register", "/register - register yourself as a participant"),
    ("deregister", "/deregister - remove yourself from the participants"),
    ("book", "/book <author>/<title> - add a book"),
    ("list_hosts", "/list_hosts - numbered list of participants"),
    ("list_books", "/list_books - numbered list of books"),
    ("delete_book", "/delete_book <book number> - delete a book"),
    ("my_next_book", "/my_next_book <book number> - choose the book you will present"),
    ("set_queue", "/set_queue <participant numbers, comma separated> - set the host queue"),
    ("get_queue", "/get_queue - show the host queue"),
    (
        "set_start",
        "/set_start <participant number> - make a queued participant host the current month",
    ),
];

fn usage(name: &str) -> &'static str {
    COMMANDS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, usage)| *usage)
        .unwrap_or("/help")
}

fn bad(name: &str) -> ParseError {
    ParseError::BadArguments { usage: usage(name) }
}

fn position(name: &str, raw: &str) -> Result<usize, ParseError> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(bad(name)),
    }
}

fn no_arguments(name: &str, args: &str, command: ClubCommand) -> Result<ClubCommand, ParseError> {
    if args.is_empty() { Ok(command) } else { Err(bad(name)) }
}

impl FromStr for ClubCommand {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        let body = text.strip_prefix('/').ok_or(ParseError::NotACommand)?;
        let (head, args) = match body.split_once(char::is_whitespace) {
            Some((head, args)) => (head, args.trim()),
            None => (body, ""),
        };
        // Group chats address bots as `/command@botname`.
        let name = head.split_once('@').map_or(head, |(name, _)| name);

        match name {
            "start" => no_arguments(name, args, ClubCommand::Start),
            "help" => no_arguments(name, args, ClubCommand::Help),
            "register" => no_arguments(name, args, ClubCommand::Register),
            "deregister" => no_arguments(name, args, ClubCommand::Deregister),
            "list_hosts" => no_arguments(name, args, ClubCommand::ListHosts),
            "list_books" => no_arguments(name, args, ClubCommand::ListBooks),
            "get_queue" => no_arguments(name, args, ClubCommand::GetQueue),
            "next" if args.is_empty() => Ok(ClubCommand::Next(1)),
            "next" => match args.parse::<u32>() {
                Ok(n) if n >= 1 => Ok(ClubCommand::Next(n)),
                _ => Err(bad(name)),
            },
            "book" => {
                let (author, title) = args.split_once('/').ok_or_else(|| bad(name))?;
                let (author, title) = (author.trim(), title.trim());
                if author.is_empty() || title.is_empty() {
                    return Err(bad(name));
                }
                Ok(ClubCommand::AddBook {
                    author: author.to_string(),
                    title: title.to_string(),
                })
            }
            "delete_book" => Ok(ClubCommand::DeleteBook(position(name, args)?)),
            "my_next_book" => Ok(ClubCommand::MyNextBook(position(name, args)?)),
            "set_start" => Ok(ClubCommand::SetStart(position(name, args)?)),
            "set_queue" => {
                if args.is_empty() {
                    return Err(bad(name));
                }
                let positions = args
                    .split(',')
                    .map(|raw| position(name, raw))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(ClubCommand::SetQueue(positions))
            }
            other => Err(ParseError::Unknown(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<ClubCommand, ParseError> {
        text.parse()
    }

    #[test]
    fn parses_argument_free_commands() {
        assert_eq!(parse("/start"), Ok(ClubCommand::Start));
        assert_eq!(parse("/help"), Ok(ClubCommand::Help));
        assert_eq!(parse("/register"), Ok(ClubCommand::Register));
        assert_eq!(parse("/deregister"), Ok(ClubCommand::Deregister));
        assert_eq!(parse("/list_hosts"), Ok(ClubCommand::ListHosts));
        assert_eq!(parse("/list_books"), Ok(ClubCommand::ListBooks));
        assert_eq!(parse("  /get_queue  "), Ok(ClubCommand::GetQueue));
    }

    #[test]
    fn strips_bot_mention() {
        assert_eq!(parse("/next@bookclub_bot"), Ok(ClubCommand::Next(1)));
        assert_eq!(parse("/next@bookclub_bot 3"), Ok(ClubCommand::Next(3)));
    }

    #[test]
    fn next_takes_an_optional_positive_count() {
        assert_eq!(parse("/next"), Ok(ClubCommand::Next(1)));
        assert_eq!(parse("/next 4"), Ok(ClubCommand::Next(4)));
        assert!(matches!(parse("/next 0"), Err(ParseError::BadArguments { .. })));
        assert!(matches!(parse("/next soon"), Err(ParseError::BadArguments { .. })));
    }

    #[test]
    fn book_splits_author_and_title_on_first_slash() {
        assert_eq!(
            parse("/book  Ursula K. Le Guin / The Lathe of Heaven "),
            Ok(ClubCommand::AddBook {
                author: "Ursula K. Le Guin".into(),
                title: "The Lathe of Heaven".into(),
            })
        );
        assert_eq!(
            parse("/book Lem/Solaris/annotated"),
            Ok(ClubCommand::AddBook {
                author: "Lem".into(),
                title: "Solaris/annotated".into(),
            })
        );
    }

    #[test]
    fn book_requires_both_parts() {
        assert!(matches!(parse("/book Solaris"), Err(ParseError::BadArguments { .. })));
        assert!(matches!(parse("/book /Solaris"), Err(ParseError::BadArguments { .. })));
        assert!(matches!(parse("/book"), Err(ParseError::BadArguments { .. })));
    }

    #[test]
    fn positions_are_one_based() {
        assert_eq!(parse("/delete_book 2"), Ok(ClubCommand::DeleteBook(2)));
        assert_eq!(parse("/my_next_book 1"), Ok(ClubCommand::MyNextBook(1)));
        assert_eq!(parse("/set_start 3"), Ok(ClubCommand::SetStart(3)));
        assert!(matches!(parse("/delete_book 0"), Err(ParseError::BadArguments { .. })));
        assert!(matches!(parse("/my_next_book"), Err(ParseError::BadArguments { .. })));
    }

    #[test]
    fn set_queue_reads_comma_separated_positions() {
        assert_eq!(parse("/set_queue 2, 1,3"), Ok(ClubCommand::SetQueue(vec![2, 1, 3])));
        assert!(matches!(parse("/set_queue"), Err(ParseError::BadArguments { .. })));
        assert!(matches!(parse("/set_queue 1,,2"), Err(ParseError::BadArguments { .. })));
    }

    #[test]
    fn rejects_unknown_and_non_commands() {
        assert_eq!(parse("hello"), Err(ParseError::NotACommand));
        assert_eq!(parse("/dance"), Err(ParseError::Unknown("dance".into())));
        assert!(matches!(parse("/help me"), Err(ParseError::BadArguments { .. })));
    }

    #[test]
    fn bad_arguments_carry_the_usage_line() {
        assert_eq!(
            parse("/delete_book x"),
            Err(ParseError::BadArguments {
                usage: "/delete_book <book number> - delete a book"
            })
        );
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: parsing never panics on arbitrary input.
            #[test]
            fn parse_is_total(text in ".{0,64}") {
                let _ = parse(&text);
            }

            /// Property: any comma list of positive positions parses back to itself.
            #[test]
            fn set_queue_keeps_order(positions in proptest::collection::vec(1usize..100, 1..10)) {
                let text = format!(
                    "/set_queue {}",
                    positions.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(",")
                );
                prop_assert_eq!(parse(&text), Ok(ClubCommand::SetQueue(positions)));
            }
        }
    }
}
