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

use compact_str::CompactString;

use crate::runtime::{errors::ExpressionResult, ExecutionContext};

use super::{serializable::SerializableValue, Object, StaticTypeName};

#[derive(Debug, Hash, Clone, Eq, PartialEq)]
pub struct IString(pub CompactString);

impl Object for IString {
    fn export(&self, _context: &ExecutionContext) -> ExpressionResult<SerializableValue> {
        Ok(SerializableValue::String(self.0.to_string()))
    }
}

impl StaticTypeName for IString {
    fn static_type_name() -> &'static str {
        "String"
    }
}

impl From<&str> for IString {
    fn from(value: &str) -> Self {
        Self(CompactString::from(value))
    }
}

impl From<String> for IString {
    fn from(value: String) -> Self {
        Self(CompactString::from(value))
    }
}

impl Display for IString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
