//! The standard layouts.
//!
//! 1. [`stack`] -- a vertical or horizontal stack of children
//! 2. [`tab_bar`] -- one tab per child, configured from the child's meta
//! 3. [`scroll`] -- a scrolling container around a single child
//!
//! Each layout reads its configuration by materializing a typed config
//! ([`StackConfig`], [`TabBarConfig`], [`TabConfig`]) from the component's
//! metadata.

mod scroll;
mod stack;
mod tab_bar;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use scroll::scroll;
pub use stack::{stack, StackConfig};
pub use tab_bar::{tab_bar, TabBarConfig, TabConfig};

/// Layout axis of a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    #[default]
    Vertical,
}

impl Orientation {
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "horizontal" => Ok(Orientation::Horizontal),
            "vertical" => Ok(Orientation::Vertical),
            other => Err(format!("unknown orientation '{}'", other)),
        }
    }
}
