//! Command-line surface for the `folio` binary.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::content::Portfolio;
use crate::error::Result;
use crate::state::nav::LayoutMode;

/// Personal portfolio rendered as a reactive terminal application.
#[derive(Debug, Parser)]
#[command(name = "folio", version, about)]
pub struct Cli {
    /// Load the portfolio from a TOML document instead of the built-in one.
    #[arg(long, value_name = "FILE")]
    pub content: Option<PathBuf>,

    /// Navigation layout.
    #[arg(long, value_enum, default_value_t = LayoutArg::Tabs)]
    pub layout: LayoutArg,

    /// Start in the light theme.
    #[arg(long)]
    pub light: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    /// One panel at a time, explicit tab selection.
    Tabs,
    /// All sections stacked into one scrollable document.
    Scroll,
}

impl From<LayoutArg> for LayoutMode {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Tabs => LayoutMode::Tabs,
            LayoutArg::Scroll => LayoutMode::Scroll,
        }
    }
}

impl Cli {
    /// Resolve the portfolio document: the given file, or the built-in.
    pub fn load_portfolio(&self) -> Result<Portfolio> {
        match &self.content {
            Some(path) => Portfolio::load(path),
            None => Ok(Portfolio::builtin()),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["folio"]);
        assert_eq!(cli.layout, LayoutArg::Tabs);
        assert!(!cli.light);
        assert!(cli.content.is_none());
    }

    #[test]
    fn test_layout_flag() {
        let cli = Cli::parse_from(["folio", "--layout", "scroll"]);
        assert_eq!(LayoutMode::from(cli.layout), LayoutMode::Scroll);
    }

    #[test]
    fn test_missing_content_file_is_an_error() {
        let cli = Cli::parse_from(["folio", "--content", "/nonexistent/site.toml"]);
        assert!(cli.load_portfolio().is_err());
    }
}
