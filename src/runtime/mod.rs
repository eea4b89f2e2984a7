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

//! The values a script sees when it touches kernel objects, and the protocol for calling
//! methods on them.

pub mod cast;
pub mod errors;
pub mod logging;
pub mod values;

pub use errors::{Error, ExpressionResult, Raise};
pub use logging::{LogLevel, LogMessage, RuntimeLog, StackPoint, StackTrace, StandardLog};
pub use values::{Object, SerializableValue, Value};

pub struct ExecutionContext<'c> {
    pub log: &'c dyn RuntimeLog,
    pub stack_trace: &'c StackTrace<'c>,
}

impl<'c> ExecutionContext<'c> {
    pub fn new(log: &'c dyn RuntimeLog, stack_trace: &'c StackTrace<'c>) -> Self {
        Self { log, stack_trace }
    }

    pub fn trace_scope<R>(
        &self,
        reference: impl Into<StackPoint>,
        code: impl FnOnce(&ExecutionContext) -> R,
    ) -> R {
        self.stack_trace.trace_scope(reference, |stack_trace| {
            let context = ExecutionContext {
                log: self.log,
                stack_trace: &stack_trace,
            };

            code(&context)
        })
    }

    pub fn push_message(
        &self,
        level: LogLevel,
        message: impl Into<std::borrow::Cow<'static, str>>,
    ) {
        self.log.push_message(LogMessage {
            origin: self.stack_trace.bottom().clone(),
            level,
            message: message.into(),
        });
    }
}

#[cfg(test)]
pub(crate) fn test_context<R>(
    code: impl FnOnce(&ExecutionContext, &std::cell::RefCell<Vec<LogMessage>>) -> R,
) -> R {
    let log = std::cell::RefCell::new(Vec::<LogMessage>::new());
    let stack_trace = StackTrace::test();
    let context = ExecutionContext::new(&log, &stack_trace);

    code(&context, &log)
}
