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

use std::{borrow::Cow, fmt::Display};

use enum_downcast::AsVariant;

use crate::runtime::{
    errors::{ExpressionResult, Raise as _},
    logging::StackTrace,
};

use super::{StaticTypeName, Value};

#[derive(Debug, Eq, PartialEq)]
pub struct ArityError {
    pub expected: usize,
    pub got: usize,
}

impl std::error::Error for ArityError {}

impl Display for ArityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let plural = if self.expected == 1 { "" } else { "s" };
        write!(
            f,
            "Expecting {} parameter{}, got {}",
            self.expected, plural, self.got
        )
    }
}

#[derive(Debug, Eq, PartialEq)]
pub struct ArgumentTypeError {
    pub index: usize,
    pub expected: Cow<'static, str>,
    pub got: Cow<'static, str>,
}

impl std::error::Error for ArgumentTypeError {}

impl Display for ArgumentTypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Parameter {} must be a {}, got {}",
            self.index, self.expected, self.got
        )
    }
}

/// Unpacks the arguments of a method call into a tuple of concrete values.
pub trait UnpackArguments: Sized {
    fn unpack_arguments(stack_trace: &StackTrace, arguments: Vec<Value>)
        -> ExpressionResult<Self>;
}

macro_rules! unpack_arguments {
    ($count:literal; $($member:ident),*) => {
        impl<$($member),*> UnpackArguments for ($($member,)*)
        where
            $($member: StaticTypeName + Clone, Value: AsVariant<$member>,)*
        {
            #[allow(non_snake_case, unused_mut, unused_variables, unused_assignments)]
            fn unpack_arguments(
                stack_trace: &StackTrace,
                arguments: Vec<Value>,
            ) -> ExpressionResult<Self> {
                let [$($member),*]: [Value; $count] =
                    arguments.try_into().map_err(|arguments: Vec<Value>| {
                        ArityError {
                            expected: $count,
                            got: arguments.len(),
                        }
                        .to_error(stack_trace)
                    })?;

                let mut index = 0;
                Ok(($({
                    let argument = $member.argument_ref::<$member>(index, stack_trace)?.clone();
                    index += 1;
                    argument
                },)*))
            }
        }
    };
}

unpack_arguments!(0;);
unpack_arguments!(1; A);
unpack_arguments!(2; A, B);
