//! CLI command implementations.
//!
//! This module contains the implementations for the various CLI subcommands:
//! - `render` - Render the visited-country map to PNG
//! - `bounds` - Print the map extent of a dataset
//! - `add` / `remove` / `list` - Manage a user's visited countries

pub mod bounds;
pub mod common;
pub mod countries;
pub mod render;

pub use bounds::{BoundsArgs, cmd_bounds};
pub use common::{CliError, Config};
pub use countries::{CountryArgs, ListArgs, cmd_add, cmd_list, cmd_remove};
pub use render::{RenderArgs, cmd_render};
