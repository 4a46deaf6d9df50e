//! Expose the pnparse command line definition, so build tasks can generate
//! completions and manpages from it.
pub mod cli;
