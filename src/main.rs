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

use std::{cell::RefCell, io::Write};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use serde::Serialize;

use kernel_cast::{
    kernel::SpaceType,
    runtime::{
        cast::CastTarget, ExecutionContext, LogMessage, Object, RuntimeLog, SerializableValue,
        StackTrace, StandardLog,
    },
    scene::Scene,
};

mod arguments;

use arguments::{Arguments, CastArgs, Command, ListTypesArgs, OutputFormat};

fn main() {
    let arguments = Arguments::parse();

    if let Err(error) = stderrlog::new()
        .verbosity(arguments.verbose as usize + 1)
        .init()
    {
        eprintln!("Failed to initialize logging: {}", error);
    }

    let result = match arguments.command {
        Command::Cast(cast_args) => cast(cast_args),
        Command::ListTypes(list_args) => list_types(list_args),
    };

    if let Err(error) = result {
        log::error!("{:?}", error);
    }
}

fn write_output(value: &impl Serialize, format: OutputFormat) -> Result<()> {
    let mut output = std::io::stdout();

    match format {
        OutputFormat::Yaml => {
            serde_yaml::to_writer(&mut output, value).context("Failed to serialize results")?
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut output, value).context("Failed to serialize results")?
        }
    };

    writeln!(&mut output)?;

    Ok(())
}

fn parse_argument(argument: &str) -> Result<SerializableValue> {
    match serde_json::from_str(argument) {
        Ok(value) => Ok(value),
        Err(json_error) => match serde_yaml::from_str(argument) {
            Ok(value) => Ok(value),
            Err(yaml_error) => Err(anyhow!(
                "Could not parse as Json or Yaml.\nJson Error: {:?}\n Yaml Error: {:?}",
                json_error,
                yaml_error
            )),
        },
    }
}

fn cast(cast_args: CastArgs) -> Result<()> {
    let scene = Scene::load(&cast_args.scene)?;
    let item = scene.wrap(&cast_args.item)?;

    let runtime_log: RefCell<Vec<LogMessage>> = RefCell::new(Vec::new());
    let stack_trace = StackTrace::top("kcast");
    let context = ExecutionContext::new(&runtime_log, &stack_trace);

    let mut unpacked_arguments = Vec::with_capacity(cast_args.arguments.len());

    for (index, argument) in cast_args.arguments.iter().enumerate() {
        let argument = parse_argument(argument)
            .and_then(|argument| {
                argument
                    .into_value(context.stack_trace)
                    .map_err(|error| anyhow!("{}", error))
            })
            .with_context(|| format!("Failed to parse method argument {}", index))?;

        unpacked_arguments.push(argument);
    }

    let result = item.call_method(&context, &cast_args.method, unpacked_arguments);

    for message in runtime_log.take() {
        StandardLog.push_message(message);
    }

    match result {
        Ok(value) => {
            let value = value
                .export(&context)
                .map_err(|error| anyhow!("{}", error))
                .context("Failed to export result")?;
            write_output(&value, cast_args.output_format)?;
        }
        Err(error) => {
            log::error!("{}", error);
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct TypeDescription {
    name: &'static str,
    tag: u32,
    family: SpaceType,
    cast_to: Option<&'static str>,
}

fn list_types(list_args: ListTypesArgs) -> Result<()> {
    let types: Vec<TypeDescription> = SpaceType::ALL
        .iter()
        .map(|ty| TypeDescription {
            name: ty.name(),
            tag: u32::from(*ty),
            family: ty.family(),
            cast_to: CastTarget::for_type(*ty).map(CastTarget::name),
        })
        .collect();

    write_output(&types, list_args.output_format)
}
