//! Line-oriented local transport for the club command layer.
//!
//! Stands in for a chat platform: every input line is one message from the
//! current participant in the configured community.

use std::io::{BufRead, Write};

use anyhow::Context;
use chrono::{DateTime, Utc};

use bookclub_commands::{CommandHandler, CommandRequest, render_error};
use bookclub_core::{CommunityKey, ParticipantId};
use bookclub_infra::ClubStore;

/// Who is speaking, switchable with `:as <id> <name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Speaker {
    pub id: ParticipantId,
    pub name: String,
}

/// Parse a `:as <id> <name>` line. Returns `None` for ordinary messages.
pub fn parse_speaker_switch(line: &str) -> Option<Result<Speaker, String>> {
    let rest = line.trim().strip_prefix(":as")?;
    let mut parts = rest.trim().splitn(2, char::is_whitespace);
    let id = match parts.next().filter(|s| !s.is_empty()).map(str::parse::<ParticipantId>) {
        Some(Ok(id)) => id,
        _ => return Some(Err("usage: :as <participant id> <name>".to_string())),
    };
    let name = parts.next().map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Some(Err("usage: :as <participant id> <name>".to_string()));
    }
    Some(Ok(Speaker {
        id,
        name: name.to_string(),
    }))
}

/// Feed every line of `input` to `handler` and write the replies to `output`.
pub fn run<S, R, W>(
    handler: &CommandHandler<S>,
    community: CommunityKey,
    mut speaker: Speaker,
    input: R,
    mut output: W,
    clock: impl Fn() -> DateTime<Utc>,
) -> anyhow::Result<()>
where
    S: ClubStore,
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line.context("failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }

        let reply = match parse_speaker_switch(&line) {
            Some(Ok(next)) => {
                tracing::debug!("speaker switched to {} ({})", next.name, next.id);
                speaker = next;
                format!("Now speaking as {} ({}).", speaker.name, speaker.id)
            }
            Some(Err(usage)) => usage,
            None => {
                let request = CommandRequest {
                    community,
                    sender: speaker.id,
                    sender_name: speaker.name.clone(),
                    text: line,
                };
                match handler.handle(&request, clock()) {
                    Ok(reply) => reply.to_string(),
                    Err(e) => render_error(&e),
                }
            }
        };

        writeln!(output, "{reply}").context("failed to write reply")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::Arc;

    use super::*;
    use bookclub_infra::{ClubService, InMemoryClubStore};
    use chrono::TimeZone;

    #[test]
    fn speaker_switch_parses_id_and_name() {
        let speaker = parse_speaker_switch(":as 42 Ana Maria").unwrap().unwrap();
        assert_eq!(speaker.id, ParticipantId::new(42));
        assert_eq!(speaker.name, "Ana Maria");

        assert!(parse_speaker_switch("/register").is_none());
        assert!(parse_speaker_switch(":as x Ana").unwrap().is_err());
        assert!(parse_speaker_switch(":as 42").unwrap().is_err());
    }

    #[test]
    fn run_answers_each_line() {
        let handler = CommandHandler::new(ClubService::new(Arc::new(InMemoryClubStore::new())));
        let input = Cursor::new("/register\n:as 2 bea\n/register\n\n/set_queue 1,2\n/next 2\n");
        let mut output = Vec::new();
        let speaker = Speaker {
            id: ParticipantId::new(1),
            name: "ana".to_string(),
        };
        let clock = || Utc.with_ymd_and_hms(2024, 11, 1, 8, 0, 0).unwrap();

        run(&handler, CommunityKey::new(7), speaker, input, &mut output, clock).unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Done!",
                "Now speaking as bea (2).",
                "Done!",
                "Done!",
                "Club session #2: 2024-12-10, host: bea.",
            ]
        );
    }
}
