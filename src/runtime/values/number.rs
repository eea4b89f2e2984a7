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

use std::fmt::Display;

use ordered_float::{FloatIsNan, NotNan};

use crate::runtime::{
    errors::{ExpressionResult, Raise as _},
    logging::StackTrace,
    ExecutionContext,
};

use super::{serializable::SerializableValue, ArgumentTypeError, Object, StaticTypeName, Value};

pub type RawNumber = f64;
pub type Number = NotNan<RawNumber>;

#[derive(Debug, Eq, PartialEq)]
pub struct ResultIsNanError;

impl std::error::Error for ResultIsNanError {}

impl Display for ResultIsNanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Result is NaN")
    }
}

pub trait UnwrapNotNan: Sized {
    fn unwrap_not_nan_raw(self, stack_trace: &StackTrace) -> ExpressionResult<Number>;

    fn unwrap_not_nan(self, stack_trace: &StackTrace) -> ExpressionResult<Value> {
        self.unwrap_not_nan_raw(stack_trace).map(|number| number.into())
    }
}

impl UnwrapNotNan for Result<Number, FloatIsNan> {
    fn unwrap_not_nan_raw(self, stack_trace: &StackTrace) -> ExpressionResult<Number> {
        match self {
            Ok(number) => Ok(number),
            Err(_float_is_nan) => Err(ResultIsNanError.to_error(stack_trace)),
        }
    }
}

/// Counts reported by the kernel become numbers in the runtime.
pub fn from_count(count: usize, stack_trace: &StackTrace) -> ExpressionResult<Value> {
    NotNan::new(count as RawNumber).unwrap_not_nan(stack_trace)
}

/// Reads a numeric argument as a 32 bit type identifier.
///
/// Negative, fractional and out of range numbers are rejected rather than truncated.
pub fn to_type_identifier(
    number: &Number,
    index: usize,
    stack_trace: &StackTrace,
) -> ExpressionResult<u32> {
    let raw = number.into_inner();

    if raw.fract() == 0.0 && raw >= 0.0 && raw <= u32::MAX as RawNumber {
        Ok(raw as u32)
    } else {
        Err(ArgumentTypeError {
            index,
            expected: "unsigned 32-bit integer".into(),
            got: raw.to_string().into(),
        }
        .to_error(stack_trace))
    }
}

impl Object for Number {
    fn export(&self, _context: &ExecutionContext) -> ExpressionResult<SerializableValue> {
        Ok(SerializableValue::Number(self.into_inner()))
    }
}

impl StaticTypeName for Number {
    fn static_type_name() -> &'static str {
        "Number"
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn number(raw: RawNumber) -> Number {
        NotNan::new(raw).unwrap()
    }

    #[test]
    fn type_identifiers() {
        let stack_trace = StackTrace::test();

        assert_eq!(to_type_identifier(&number(405.0), 0, &stack_trace).unwrap(), 405);
        assert_eq!(to_type_identifier(&number(0.0), 0, &stack_trace).unwrap(), 0);
        assert_eq!(
            to_type_identifier(&number(u32::MAX as RawNumber), 0, &stack_trace).unwrap(),
            u32::MAX
        );
    }

    #[test]
    fn bad_type_identifiers() {
        let stack_trace = StackTrace::test();

        for raw in [-1.0, 405.5, u32::MAX as RawNumber + 1.0, RawNumber::INFINITY] {
            let error = to_type_identifier(&number(raw), 0, &stack_trace).unwrap_err();
            assert_eq!(
                error.downcast_ref::<ArgumentTypeError>(),
                Some(&ArgumentTypeError {
                    index: 0,
                    expected: "unsigned 32-bit integer".into(),
                    got: raw.to_string().into(),
                })
            );
        }
    }

    #[test]
    fn nan_is_an_error() {
        let stack_trace = StackTrace::test();
        let error = NotNan::new(RawNumber::NAN)
            .unwrap_not_nan(&stack_trace)
            .unwrap_err();

        assert!(error.is::<ResultIsNanError>());
    }
}
