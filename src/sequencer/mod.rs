//! Command sequencer - expands a macro-action into one frame of button edges per tick
//!
//! ```text
//!   advance(Some(macro))          advance(_) x N              advance(_)
//! IDLE ────────────────────▶ ARMED ───────────────▶ tokens drained ──────────▶ IDLE
//!  progress = 0              progress = 1           progress = N + 1          completed = true
//! ```
//!
//! The arming call consumes no token, so a macro of N tokens keeps the
//! sequencer busy for the arming call plus N + 1 further calls. Press/release
//! pairs reach the game at fixed frame offsets from the decision tick, which
//! is what the game's combo parser keys on.

pub mod catalog;
pub mod token;

use std::collections::VecDeque;

use tracing::debug;

use crate::protocol::buttons::Buttons;

pub use catalog::{ACTION_COUNT, ActionCatalog, MacroAction, STANDARD_MACROS};
pub use token::{Edge, EdgeToken};

#[derive(Debug, Clone)]
enum Step {
    Emit(EdgeToken),
    Finish,
}

/// Result of one sequencer tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advance {
    /// Buttons to assert this frame
    pub frame: Buttons,
    /// The running macro finished on this call
    pub completed: bool,
}

/// Per-player sequencer state
#[derive(Debug, Clone, Default)]
pub struct CommandSequencer {
    progress: usize,
    pending: VecDeque<Step>,
    loaded_len: usize,
    frame: Buttons,
    current: Option<String>,
}

impl CommandSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by exactly one frame.
    ///
    /// `action` is only consulted while idle; `held` is the button set the
    /// game reports for this player and is the reference for toggles.
    pub fn advance(&mut self, action: Option<&MacroAction>, held: &Buttons) -> Advance {
        let completed = match self.pending.pop_front() {
            None => {
                if let Some(action) = action {
                    self.arm(action);
                }
                false
            }
            Some(Step::Emit(token)) => {
                self.frame = token.apply(self.frame, held);
                self.progress += 1;
                false
            }
            Some(Step::Finish) => {
                debug_assert_eq!(self.progress - 1, self.loaded_len);
                if let Some(name) = self.current.take() {
                    debug!("Macro {} complete after {} frames", name, self.progress);
                }
                self.progress = 0;
                self.loaded_len = 0;
                true
            }
        };

        Advance {
            frame: self.frame,
            completed,
        }
    }

    fn arm(&mut self, action: &MacroAction) {
        self.pending = action
            .tokens()
            .iter()
            .cloned()
            .map(Step::Emit)
            .chain(std::iter::once(Step::Finish))
            .collect();
        self.loaded_len = action.len();
        self.progress = 1;
        self.current = Some(action.name().to_string());
    }

    /// Drop any running macro and release every button
    pub fn reset(&mut self) {
        self.progress = 0;
        self.pending.clear();
        self.loaded_len = 0;
        self.frame = Buttons::neutral();
        self.current = None;
    }

    pub fn is_idle(&self) -> bool {
        self.progress == 0
    }

    pub fn progress(&self) -> usize {
        self.progress
    }

    /// Steps still queued, including the final completion step
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn frame(&self) -> Buttons {
        self.frame
    }

    pub fn current_action(&self) -> Option<&str> {
        self.current.as_deref()
    }
}
