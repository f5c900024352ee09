//! Player commands and play results shared by the session, strategies and
//! the binaries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One input-driven command against a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action_type", rename_all = "snake_case")]
pub enum PlayerAction {
    /// Place the current piece with its center on `(q, r)`.
    Place { q: i32, r: i32 },
    Undo,
    Redo,
    /// Step to the next (`1`) or previous (`-1`) unplaced piece.
    Cycle { direction: i8 },
    Select { piece_index: usize },
    /// Reveal the current piece's solution position; counts toward hints.
    Hint,
    Restart,
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerAction::Place { q, r } => write!(f, "place {q} {r}"),
            PlayerAction::Undo => f.write_str("undo"),
            PlayerAction::Redo => f.write_str("redo"),
            PlayerAction::Cycle { direction } if *direction < 0 => f.write_str("prev"),
            PlayerAction::Cycle { .. } => f.write_str("next"),
            PlayerAction::Select { piece_index } => write!(f, "select {piece_index}"),
            PlayerAction::Hint => f.write_str("hint"),
            PlayerAction::Restart => f.write_str("restart"),
        }
    }
}

/// Parses the line commands accepted by the `hex-flip` binary, e.g.
/// `place 1 -2`, `undo`, `next`, `select 3`.
impl FromStr for PlayerAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let command = parts.next().ok_or_else(|| "Empty command".to_string())?;
        let mut int_arg = |name: &str| -> Result<i64, String> {
            let raw = parts
                .next()
                .ok_or_else(|| format!("Missing argument <{name}> for '{command}'"))?;
            raw.parse::<i64>()
                .map_err(|e| format!("Invalid <{name}> '{raw}': {e}"))
        };

        let action = match command.to_ascii_lowercase().as_str() {
            "place" | "p" => {
                let q = int_arg("q")?;
                let r = int_arg("r")?;
                PlayerAction::Place {
                    q: q as i32,
                    r: r as i32,
                }
            }
            "undo" | "u" => PlayerAction::Undo,
            "redo" => PlayerAction::Redo,
            "next" | "n" => PlayerAction::Cycle { direction: 1 },
            "prev" => PlayerAction::Cycle { direction: -1 },
            "select" | "s" => {
                let index = int_arg("index")?;
                if index < 0 {
                    return Err(format!("Invalid <index> '{index}': must not be negative"));
                }
                PlayerAction::Select {
                    piece_index: index as usize,
                }
            }
            "hint" | "h" => PlayerAction::Hint,
            "restart" => PlayerAction::Restart,
            other => return Err(format!("Unknown command: {other}")),
        };
        Ok(action)
    }
}

/// Outcome of playing one level to the end or to the step limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayResult {
    pub solved: bool,
    /// Actions the strategy issued, including failed ones.
    pub steps: usize,
    pub move_count: usize,
    pub undo_count: u32,
    pub hint_count: u32,
    /// Pieces the generator could not place, which therefore have no hint.
    pub unhinted_pieces: usize,
    pub duration_ms: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_place() {
        assert_eq!(
            "place 1 -2".parse::<PlayerAction>(),
            Ok(PlayerAction::Place { q: 1, r: -2 })
        );
        assert_eq!("P 0 0".parse(), Ok(PlayerAction::Place { q: 0, r: 0 }));
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!("undo".parse(), Ok(PlayerAction::Undo));
        assert_eq!("redo".parse(), Ok(PlayerAction::Redo));
        assert_eq!("next".parse(), Ok(PlayerAction::Cycle { direction: 1 }));
        assert_eq!("prev".parse(), Ok(PlayerAction::Cycle { direction: -1 }));
        assert_eq!("hint".parse(), Ok(PlayerAction::Hint));
        assert_eq!("restart".parse(), Ok(PlayerAction::Restart));
        assert_eq!("select 4".parse(), Ok(PlayerAction::Select { piece_index: 4 }));
    }

    #[test]
    fn test_parse_errors() {
        assert!("".parse::<PlayerAction>().is_err());
        assert!("place 1".parse::<PlayerAction>().is_err());
        assert!("place a b".parse::<PlayerAction>().is_err());
        assert!("select -1".parse::<PlayerAction>().is_err());
        assert!("jump".parse::<PlayerAction>().is_err());
    }

    #[test]
    fn test_display_parses_back() {
        let actions = [
            PlayerAction::Place { q: -3, r: 2 },
            PlayerAction::Cycle { direction: -1 },
            PlayerAction::Select { piece_index: 7 },
            PlayerAction::Restart,
        ];
        for action in actions {
            assert_eq!(action.to_string().parse::<PlayerAction>(), Ok(action));
        }
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(PlayerAction::Place { q: 2, r: -1 }).unwrap();
        assert_eq!(json, serde_json::json!({"action_type": "place", "q": 2, "r": -1}));
        let undo: PlayerAction = serde_json::from_value(serde_json::json!({"action_type": "undo"})).unwrap();
        assert_eq!(undo, PlayerAction::Undo);
    }
}
