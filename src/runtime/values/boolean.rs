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

use crate::runtime::{errors::ExpressionResult, ExecutionContext};

use super::{serializable::SerializableValue, Object, StaticTypeName};

#[derive(Debug, Hash, Clone, Copy, Eq, PartialEq)]
pub struct Boolean(pub bool);

impl Object for Boolean {
    fn export(&self, _context: &ExecutionContext) -> ExpressionResult<SerializableValue> {
        Ok(SerializableValue::Boolean(self.0))
    }
}

impl StaticTypeName for Boolean {
    fn static_type_name() -> &'static str {
        "Boolean"
    }
}

impl From<bool> for Boolean {
    fn from(value: bool) -> Self {
        Self(value)
    }
}
