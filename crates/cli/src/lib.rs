//! Command line access to the Hisab ledger.

pub mod args;
pub mod commands;
pub mod error;
pub mod export;
pub mod logging;
