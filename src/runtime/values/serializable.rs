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

use ordered_float::NotNan;
use serde::{Deserialize, Serialize};

use crate::{
    kernel::SpaceType,
    runtime::{
        errors::{ExpressionResult, Raise as _, StrError},
        logging::StackTrace,
    },
};

use super::{Boolean, IString, NoneType, UnwrapNotNan, Value};

/// The form values take when they cross into or out of the runtime.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SerializableValue {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    #[serde(skip_deserializing)]
    Item {
        #[serde(rename = "type")]
        ty: String,
        is_a: SpaceType,
        family: SpaceType,
        use_count: usize,
    },
}

impl SerializableValue {
    pub fn into_value(self, stack_trace: &StackTrace) -> ExpressionResult<Value> {
        match self {
            Self::Null => Ok(NoneType.into()),
            Self::Boolean(value) => Ok(Boolean(value).into()),
            Self::Number(value) => NotNan::new(value).unwrap_not_nan(stack_trace),
            Self::String(value) => Ok(IString::from(value).into()),
            Self::Item { .. } => Err(StrError(
                "Kernel items can only come from the kernel, they cannot be deserialized",
            )
            .to_error(stack_trace)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn deserialize() {
        assert_eq!(
            serde_json::from_str::<SerializableValue>("null").unwrap(),
            SerializableValue::Null
        );
        assert_eq!(
            serde_yaml::from_str::<SerializableValue>("true").unwrap(),
            SerializableValue::Boolean(true)
        );
        assert_eq!(
            serde_json::from_str::<SerializableValue>("405").unwrap(),
            SerializableValue::Number(405.0)
        );
        assert_eq!(
            serde_yaml::from_str::<SerializableValue>("1.5").unwrap(),
            SerializableValue::Number(1.5)
        );
        assert_eq!(
            serde_json::from_str::<SerializableValue>("\"Solid\"").unwrap(),
            SerializableValue::String("Solid".into())
        );
    }

    #[test]
    fn items_cannot_be_deserialized() {
        assert!(serde_json::from_str::<SerializableValue>(
            r#"{"type": "Solid", "is_a": "Solid", "family": "Item", "use_count": 1}"#
        )
        .is_err());
    }

    #[test]
    fn serialize_item() {
        let item = SerializableValue::Item {
            ty: "Solid".into(),
            is_a: SpaceType::Solid,
            family: SpaceType::Item,
            use_count: 2,
        };

        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            serde_json::json!({
                "type": "Solid",
                "is_a": "Solid",
                "family": "Item",
                "use_count": 2,
            })
        );
    }

    #[test]
    fn into_value() {
        let stack_trace = StackTrace::test();

        assert_eq!(
            SerializableValue::Null.into_value(&stack_trace).unwrap(),
            NoneType.into()
        );
        assert_eq!(
            SerializableValue::String("hello".into())
                .into_value(&stack_trace)
                .unwrap(),
            IString::from("hello").into()
        );
        assert_eq!(
            SerializableValue::Number(202.0)
                .into_value(&stack_trace)
                .unwrap(),
            Value::from(NotNan::new(202.0).unwrap())
        );

        let error = SerializableValue::Item {
            ty: "Solid".into(),
            is_a: SpaceType::Solid,
            family: SpaceType::Item,
            use_count: 0,
        }
        .into_value(&stack_trace)
        .unwrap_err();
        assert!(error.is::<StrError>());
    }
}
