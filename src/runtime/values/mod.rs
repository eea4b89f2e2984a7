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

use enum_dispatch::enum_dispatch;
use enum_downcast::{AsVariant, EnumDowncast};

use super::{
    errors::{ExpressionResult, Raise as _},
    logging::{StackPoint, StackTrace},
    ExecutionContext,
};

mod arguments;
pub use arguments::{ArgumentTypeError, ArityError, UnpackArguments};

mod boolean;
pub use boolean::Boolean;

mod items;
pub use items::{wrap_item, Curve3D, Item, Mesh, Solid, SpaceInstance, SpaceItem};

mod none;
pub use none::NoneType;

mod number;
pub use number::{from_count, to_type_identifier, Number, RawNumber, ResultIsNanError, UnwrapNotNan};

mod serializable;
pub use serializable::SerializableValue;

mod string;
pub use string::IString;

pub trait StaticTypeName {
    /// Provides the type name without having an instance of the object.
    /// This is used for formatting error messages when failing to cast to an expected type.
    fn static_type_name() -> &'static str;
}

#[derive(Debug, Eq, PartialEq)]
pub struct MissingMethodError {
    pub type_name: Cow<'static, str>,
    pub method: String,
}

impl std::error::Error for MissingMethodError {}

impl Display for MissingMethodError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Type `{}` does not have a method named `{}`",
            self.type_name, self.method
        )
    }
}

#[enum_dispatch]
pub trait Object: StaticTypeName + Sized {
    fn type_name(&self) -> Cow<'static, str> {
        Self::static_type_name().into()
    }

    fn method_call(
        &self,
        context: &ExecutionContext,
        method: &str,
        _arguments: Vec<Value>,
    ) -> ExpressionResult<Value> {
        Err(MissingMethodError {
            type_name: self.type_name(),
            method: method.to_string(),
        }
        .to_error(context.stack_trace))
    }

    fn export(&self, context: &ExecutionContext) -> ExpressionResult<SerializableValue>;
}

#[enum_dispatch(Object)]
#[derive(Debug, Clone, PartialEq, EnumDowncast)]
pub enum Value {
    NoneType,
    Boolean,
    Number,
    String(IString),
    SpaceItem,
    Item,
    Mesh,
    Solid,
    SpaceInstance,
    Curve3D,
}

impl StaticTypeName for Value {
    fn static_type_name() -> &'static str {
        "Value"
    }
}

#[derive(Debug, Eq, PartialEq)]
pub struct DowncastError {
    pub expected: Cow<'static, str>,
    pub got: Cow<'static, str>,
}

impl std::error::Error for DowncastError {}

impl Display for DowncastError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Expected type `{}`, got `{}`", self.expected, self.got)
    }
}

impl Value {
    /// Calls a method on this value, adding the call to the stack trace.
    pub fn call_method(
        &self,
        context: &ExecutionContext,
        method: &str,
        arguments: Vec<Value>,
    ) -> ExpressionResult<Value> {
        context.trace_scope(StackPoint::method(self.type_name(), method), |context| {
            self.method_call(context, method, arguments)
        })
    }

    pub fn downcast_ref<T>(&self, stack_trace: &StackTrace) -> ExpressionResult<&T>
    where
        T: StaticTypeName,
        Self: AsVariant<T>,
    {
        if let Some(value) = self.enum_downcast_ref() {
            Ok(value)
        } else {
            Err(DowncastError {
                expected: T::static_type_name().into(),
                got: self.type_name(),
            }
            .to_error(stack_trace))
        }
    }

    /// Like [Value::downcast_ref], but reports the failure as a bad function argument.
    pub fn argument_ref<T>(&self, index: usize, stack_trace: &StackTrace) -> ExpressionResult<&T>
    where
        T: StaticTypeName,
        Self: AsVariant<T>,
    {
        if let Some(value) = self.enum_downcast_ref() {
            Ok(value)
        } else {
            Err(ArgumentTypeError {
                index,
                expected: T::static_type_name().into(),
                got: self.type_name(),
            }
            .to_error(stack_trace))
        }
    }
}
