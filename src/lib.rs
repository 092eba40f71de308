//! JUVO library exports for testing

use clap::ValueEnum;

pub mod advice;
pub mod core;
pub mod tui;
pub mod voice;

#[cfg(test)]
pub mod test_support;

/// Where menus and advice come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum AdviceBackend {
    #[default]
    Local,
    Remote,
}

/// Which simulator page opens first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Page {
    #[default]
    Ussd,
    Voice,
}
