//! Edge tokens: one frame's worth of button transitions
//!
//! Grammar: `-` (hold, no edges) or `atom ('+' atom)*` where an atom is a
//! button symbol optionally prefixed with `!`.
//!
//! | symbol | button |
//! |--------|--------|
//! | `<` `>` `^` `v` | Left, Right, Up, Down |
//! | `Y` `B` `X` `A` `L` `R` | action buttons |
//!
//! A bare directional symbol presses, a bare action symbol toggles against
//! the held state, and `!` always releases.

use crate::protocol::buttons::{Button, Buttons, toggle};

const HOLD: &str = "-";

/// A single button transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Press(Button),
    Release(Button),
    Toggle(Button),
}

impl Edge {
    fn parse(atom: &str) -> Option<Edge> {
        let (release, symbol) = match atom.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, atom),
        };
        let button = match symbol {
            "<" => Button::Left,
            ">" => Button::Right,
            "^" => Button::Up,
            "v" => Button::Down,
            "Y" => Button::Y,
            "B" => Button::B,
            "X" => Button::X,
            "A" => Button::A,
            "L" => Button::L,
            "R" => Button::R,
            _ => return None,
        };
        Some(if release {
            Edge::Release(button)
        } else if button.is_directional() {
            Edge::Press(button)
        } else {
            Edge::Toggle(button)
        })
    }

    fn apply(self, frame: Buttons, held: &Buttons) -> Buttons {
        match self {
            Edge::Press(button) => {
                let mut next = frame;
                next.set(button, true);
                next
            }
            Edge::Release(button) => {
                let mut next = frame;
                next.set(button, false);
                next
            }
            Edge::Toggle(button) => toggle(frame, held, button),
        }
    }
}

/// All edges emitted on one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeToken {
    edges: Vec<Edge>,
}

impl EdgeToken {
    /// Parse a token, returning `None` for anything outside the grammar
    pub fn parse(symbol: &str) -> Option<EdgeToken> {
        let edges = if symbol == HOLD {
            Vec::new()
        } else {
            symbol
                .split('+')
                .map(Edge::parse)
                .collect::<Option<Vec<_>>>()?
        };
        Some(EdgeToken { edges })
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn is_hold(&self) -> bool {
        self.edges.is_empty()
    }

    /// Apply every edge in order; `held` is what the game reports this tick
    pub fn apply(&self, frame: Buttons, held: &Buttons) -> Buttons {
        self.edges
            .iter()
            .fold(frame, |acc, edge| edge.apply(acc, held))
    }
}
