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

use std::{borrow::Cow, cell::RefCell, fmt::Display};

pub trait RuntimeLog: std::fmt::Debug {
    fn push_message(&self, message: LogMessage);
}

impl RuntimeLog for RefCell<Vec<LogMessage>> {
    fn push_message(&self, message: LogMessage) {
        self.borrow_mut().push(message);
    }
}

/// Forwards runtime messages straight to the process logger.
#[derive(Debug, Default)]
pub struct StandardLog;

impl RuntimeLog for StandardLog {
    fn push_message(&self, message: LogMessage) {
        match message.level {
            LogLevel::Info => log::info!("{}", message),
            LogLevel::Warning => log::warn!("{}", message),
        }
    }
}

/// Where in the embedding runtime something happened.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct StackPoint(pub Cow<'static, str>);

impl StackPoint {
    pub fn method(type_name: impl Display, method: impl Display) -> Self {
        Self(format!("{}.{}", type_name, method).into())
    }
}

impl From<&'static str> for StackPoint {
    fn from(value: &'static str) -> Self {
        Self(value.into())
    }
}

impl From<String> for StackPoint {
    fn from(value: String) -> Self {
        Self(value.into())
    }
}

impl Display for StackPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct StackTrace<'p> {
    parent: Option<&'p StackTrace<'p>>,
    reference: StackPoint,
}

impl<'p> Display for StackTrace<'p> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(parent) = self.parent {
            write!(f, "{parent}")?;
        }

        writeln!(f, "{}", self.reference)
    }
}

impl StackTrace<'static> {
    pub fn top(reference: impl Into<StackPoint>) -> Self {
        Self {
            parent: None,
            reference: reference.into(),
        }
    }

    #[cfg(test)]
    pub(crate) fn test() -> Self {
        Self::top("test")
    }
}

impl<'p> StackTrace<'p> {
    pub fn trace_scope<F, R>(&'p self, reference: impl Into<StackPoint>, code: F) -> R
    where
        F: FnOnce(StackTrace<'p>) -> R,
    {
        let scope = Self {
            parent: Some(self),
            reference: reference.into(),
        };

        code(scope)
    }

    pub fn bottom(&self) -> &StackPoint {
        &self.reference
    }

    pub fn iter(&'p self) -> StackTraceIter<'p> {
        StackTraceIter {
            current: Some(self),
        }
    }
}

impl<'p> IntoIterator for &'p StackTrace<'p> {
    type Item = &'p StackPoint;
    type IntoIter = StackTraceIter<'p>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct StackTraceIter<'p> {
    current: Option<&'p StackTrace<'p>>,
}

impl<'p> Iterator for StackTraceIter<'p> {
    type Item = &'p StackPoint;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.current.take();
        if let Some(next) = next {
            self.current = next.parent;
        }
        next.map(|next| &next.reference)
    }
}

#[derive(Debug)]
pub struct LogMessage {
    pub origin: StackPoint,
    pub level: LogLevel,
    pub message: Cow<'static, str>,
}

impl std::fmt::Display for LogMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.origin, self.message)
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum LogLevel {
    Info,
    Warning,
}
