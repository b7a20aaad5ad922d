//! Fixed catalog of macro-actions the policy chooses between

use super::token::EdgeToken;
use crate::error::{Error, Result};

/// Number of macro-actions in the standard catalog (policy output width)
pub const ACTION_COUNT: usize = 5;

/// Token definitions for the standard catalog, indexed by action id
pub const STANDARD_MACROS: [(&str, &[&str]); ACTION_COUNT] = [
    ("move-left", &["<", "<", "!<"]),
    ("move-right", &[">", ">", "!>"]),
    ("attack", &["v+R", "v+R", "!v+!R"]),
    (
        "special-combo",
        &[
            "<", "-", "!<", "v+<", "-", "!v+!<", "v", "-", "!v", "v+>", "-", "!v+!>", ">+Y", "-",
            "!>+!Y",
        ],
    ),
    ("spin-combo", &["<+^+B", "<+^+B", "!<+!^+!B"]),
];

/// A named, validated token sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroAction {
    name: String,
    tokens: Vec<EdgeToken>,
}

impl MacroAction {
    /// Build a macro, rejecting empty sequences and tokens outside the grammar
    pub fn new(name: &str, symbols: &[&str]) -> Result<Self> {
        if symbols.is_empty() {
            return Err(Error::EmptyMacro {
                action: name.to_string(),
            });
        }
        let tokens = symbols
            .iter()
            .map(|symbol| {
                EdgeToken::parse(symbol).ok_or_else(|| Error::UnknownToken {
                    action: name.to_string(),
                    token: symbol.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            name: name.to_string(),
            tokens,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tokens(&self) -> &[EdgeToken] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Ordered set of macro-actions; the index is the policy's action id
#[derive(Debug, Clone)]
pub struct ActionCatalog {
    actions: Vec<MacroAction>,
}

impl ActionCatalog {
    pub fn from_definitions(definitions: &[(&str, &[&str])]) -> Result<Self> {
        if definitions.is_empty() {
            return Err(Error::InvalidConfiguration {
                message: "action catalog is empty".to_string(),
            });
        }
        let actions = definitions
            .iter()
            .map(|(name, symbols)| MacroAction::new(name, symbols))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { actions })
    }

    /// The five built-in macros
    pub fn standard() -> Result<Self> {
        Self::from_definitions(&STANDARD_MACROS)
    }

    pub fn get(&self, index: usize) -> Result<&MacroAction> {
        self.actions.get(index).ok_or(Error::ActionOutOfRange {
            index,
            size: self.actions.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MacroAction> {
        self.actions.iter()
    }
}
