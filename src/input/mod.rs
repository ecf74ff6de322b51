//! Logical input consumed by the session
//!
//! The window layer owns real keyboard capture; the engine only sees a
//! pressed-key set plus discrete fire/ability actions. The binary feeds
//! these from a tiny stdin line protocol, one whitespace-separated token
//! per action: `+w`/`-w` (and `s`/`a`/`d`) press or release a movement
//! key, `f`/`fire` shoots, `e`/`ability` triggers the special.

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

/// Movement keys held between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKey {
    Up,
    Down,
    Left,
    Right,
}

/// One discrete input change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Pressed(MoveKey),
    Released(MoveKey),
    Fire,
    Ability,
}

/// Parse one line of the stdin harness into input events
pub fn parse_line(line: &str) -> Vec<InputEvent> {
    line.split_whitespace().filter_map(parse_token).collect()
}

fn parse_token(token: &str) -> Option<InputEvent> {
    match token {
        "f" | "fire" => return Some(InputEvent::Fire),
        "e" | "ability" => return Some(InputEvent::Ability),
        _ => {}
    }

    if let Some(rest) = token.strip_prefix('+') {
        return move_key(rest).map(InputEvent::Pressed);
    }
    if let Some(rest) = token.strip_prefix('-') {
        return move_key(rest).map(InputEvent::Released);
    }
    None
}

fn move_key(name: &str) -> Option<MoveKey> {
    match name {
        "w" => Some(MoveKey::Up),
        "s" => Some(MoveKey::Down),
        "a" => Some(MoveKey::Left),
        "d" => Some(MoveKey::Right),
        _ => None,
    }
}

/// Spawn the stdin reader task and return its event queue
pub fn spawn_stdin_input() -> mpsc::UnboundedReceiver<InputEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            for event in parse_line(&line) {
                if tx.send(event).is_err() {
                    return;
                }
            }
        }
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_map_to_events() {
        assert_eq!(
            parse_line("+w -a f e"),
            vec![
                InputEvent::Pressed(MoveKey::Up),
                InputEvent::Released(MoveKey::Left),
                InputEvent::Fire,
                InputEvent::Ability,
            ]
        );
    }

    #[test]
    fn junk_tokens_are_ignored() {
        assert_eq!(parse_line("+q jump ++w ä"), vec![]);
        assert_eq!(parse_line(""), vec![]);
    }
}
