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

use std::{any::Any, fmt::Display};

use super::logging::StackPoint;

pub type ExpressionResult<R> = std::result::Result<R, Error>;

#[derive(Debug)]
pub struct Error {
    pub ty: Box<dyn ErrorType>,
    pub trace: Vec<StackPoint>,
}

impl Error {
    /// Recovers the concrete error type, if it is `E`.
    pub fn downcast_ref<E: ErrorType>(&self) -> Option<&E> {
        (*self.ty).as_any().downcast_ref()
    }

    pub fn is<E: ErrorType>(&self) -> bool {
        self.downcast_ref::<E>().is_some()
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.ty)?;
        writeln!(f, "Backtrace:")?;
        for layer in self.trace.iter() {
            writeln!(f, "\t{}", layer)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {}

/// A generic error that will just display a static message.
#[derive(Debug, Eq, PartialEq)]
pub struct StrError(pub &'static str);

impl std::error::Error for StrError {}

impl Display for StrError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub trait ErrorType: std::error::Error + Any {
    fn as_any(&self) -> &dyn Any;
}

impl<E> ErrorType for E
where
    E: std::error::Error + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub trait Raise {
    fn to_error<'s>(self, stack_trace: impl IntoIterator<Item = &'s StackPoint>) -> Error;
}

impl<E: ErrorType> Raise for E {
    fn to_error<'s>(self, stack_trace: impl IntoIterator<Item = &'s StackPoint>) -> Error {
        Error {
            ty: Box::new(self),
            trace: stack_trace.into_iter().cloned().collect(),
        }
    }
}
