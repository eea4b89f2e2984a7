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

/// The absence of a value, such as an instance that places nothing.
#[derive(Debug, Hash, Clone, Copy, Eq, PartialEq)]
pub struct NoneType;

impl Object for NoneType {
    fn export(&self, _context: &ExecutionContext) -> ExpressionResult<SerializableValue> {
        Ok(SerializableValue::Null)
    }
}

impl StaticTypeName for NoneType {
    fn static_type_name() -> &'static str {
        "None"
    }
}
