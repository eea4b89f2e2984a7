/*
 * Copyright 2025 James Carl
 * AGPL-3.0-only or AGPL-3.0-or-later
 *
 * This file is part of Command Cad.
 *
 * Command CAD is free software: you can redistribute it and/or modify it under the terms of
 * the GNU Affero General Public License as published by the Free Software Foundation, either
 * version 3 of the License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY;
 * without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
 * See the GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License along with this
 * program. If not, see <https://www.gnu.org/licenses/>.
 */

use std::{fmt::Display, path::PathBuf, str::FromStr};

use clap::{
    builder::{PossibleValuesParser, TypedValueParser},
    Parser, Subcommand,
};

#[derive(Parser)]
#[command(name = "kcast")]
#[command(bin_name = "kcast")]
#[command(version, about)]
/// Call methods on kernel objects loaded from a scene file.
pub struct Arguments {
    /// Log more detail. Can be repeated.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    Cast(CastArgs),
    ListTypes(ListTypesArgs),
}

#[derive(Clone, Copy, Debug, Default)]
pub enum OutputFormat {
    Yaml,
    #[default]
    Json,
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yaml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format `{}`", s)),
        }
    }
}

fn output_format_parser() -> impl TypedValueParser<Value = OutputFormat> {
    PossibleValuesParser::new(["json", "yaml"]).try_map(|s| s.parse::<OutputFormat>())
}

#[derive(clap::Args)]
/// Wrap an item from a scene and call a method on it.
pub struct CastArgs {
    /// Path to a Yaml or Json scene file
    pub scene: PathBuf,

    /// Name of the item within the scene
    pub item: String,

    /// Method to call on the item
    #[arg(long, default_value = "cast")]
    pub method: String,

    /// The format to output the result in
    #[arg(long, default_value_t = OutputFormat::default(), value_parser = output_format_parser())]
    pub output_format: OutputFormat,

    /// Arguments to be passed to the method, as Json or Yaml
    #[arg(last = true)]
    pub arguments: Vec<String>,
}

#[derive(clap::Args)]
/// List every kernel type tag and what it can be cast to.
pub struct ListTypesArgs {
    #[arg(long, default_value_t = OutputFormat::default(), value_parser = output_format_parser())]
    pub output_format: OutputFormat,
}
