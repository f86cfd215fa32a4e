//! Error types for token operations.
//!
//! Every error aborts the whole call with no partial state mutation: checks
//! happen before the first write on each path.

use thiserror::Error;

/// Failures surfaced by ledger, transfer and administration operations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// A transfer exceeds the sender's funds.
    #[error("insufficient balance: have {available}, need {requested}")]
    InsufficientBalance {
        /// The sender's current balance.
        available: u128,
        /// The amount the transfer asked for.
        requested: u128,
    },

    /// A delegated transfer exceeds the granted allowance.
    #[error("insufficient allowance: granted {allowed}, need {requested}")]
    InsufficientAllowance {
        /// The spender's current allowance.
        allowed: u128,
        /// The amount the delegated transfer asked for.
        requested: u128,
    },

    /// A non-owner invoked an administration operation.
    #[error("caller is not the contract owner")]
    Unauthorized,

    /// An administration operation supplied a nonsensical value; state was
    /// not touched.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result alias for token operations.
pub type TokenResult<T> = Result<T, TokenError>;
