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

//! The capabilities this crate needs from the geometry kernel.
//!
//! Kernel objects carry their own intrusive use count. Memory is owned through [Rc], but
//! the kernel decides an object's lifetime from its use count, so every runtime value that
//! holds a kernel object must hold exactly one counted reference to it.

use std::{fmt::Debug, ops::Deref, rc::Rc};

pub use space_types::{SpaceType, UnknownSpaceType};

pub mod memory;

pub trait RefCounted {
    /// Returns the use count after the increment.
    fn add_ref(&self) -> usize;

    /// Returns the use count after the decrement.
    fn release(&self) -> usize;

    fn use_count(&self) -> usize;
}

/// Any object that lives in 3D space.
///
/// The `into_*` methods are the kernel's checked downcasts. They return `None` when the
/// object is not of the requested kind.
pub trait SpaceItem: RefCounted + Debug {
    /// The concrete type of this object.
    fn is_a(&self) -> SpaceType;

    /// The family the concrete type belongs to.
    fn family(&self) -> SpaceType;

    fn into_space_item(self: Rc<Self>) -> Rc<dyn SpaceItem>;

    fn into_mesh(self: Rc<Self>) -> Option<Rc<dyn Mesh>> {
        None
    }

    fn into_solid(self: Rc<Self>) -> Option<Rc<dyn Solid>> {
        None
    }

    fn into_space_instance(self: Rc<Self>) -> Option<Rc<dyn SpaceInstance>> {
        None
    }

    fn into_curve(self: Rc<Self>) -> Option<Rc<dyn Curve3D>> {
        None
    }
}

pub trait Mesh: SpaceItem {
    fn grid_count(&self) -> usize;
}

pub trait Solid: SpaceItem {
    fn face_count(&self) -> usize;
}

pub trait SpaceInstance: SpaceItem {
    /// The item placed by this instance, if it has one.
    fn space_item(&self) -> Option<Rc<dyn SpaceItem>>;
}

pub trait Curve3D: SpaceItem {
    fn is_closed(&self) -> bool;
}

/// One counted reference to a kernel object.
///
/// Creating or cloning a [KernelRef] increments the kernel's use count, and dropping it
/// decrements the count again.
pub struct KernelRef<T: ?Sized + RefCounted> {
    object: Rc<T>,
}

impl<T: ?Sized + RefCounted> KernelRef<T> {
    pub fn acquire(object: Rc<T>) -> Self {
        object.add_ref();
        Self { object }
    }

    pub fn object(&self) -> &Rc<T> {
        &self.object
    }
}

impl<T: ?Sized + SpaceItem> KernelRef<T> {
    /// The same object, viewed as a generic space item. This does not count a new reference.
    pub fn to_space_item(&self) -> Rc<dyn SpaceItem> {
        self.object.clone().into_space_item()
    }
}

impl<T: ?Sized + RefCounted> Clone for KernelRef<T> {
    fn clone(&self) -> Self {
        Self::acquire(self.object.clone())
    }
}

impl<T: ?Sized + RefCounted> Drop for KernelRef<T> {
    fn drop(&mut self) {
        self.object.release();
    }
}

impl<T: ?Sized + RefCounted> Deref for KernelRef<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.object
    }
}

impl<T: ?Sized + RefCounted> PartialEq for KernelRef<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.object, &other.object)
    }
}

impl<T: ?Sized + RefCounted> Eq for KernelRef<T> {}

impl<T: ?Sized + RefCounted + Debug> Debug for KernelRef<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KernelRef")
            .field("object", &self.object)
            .field("use_count", &self.object.use_count())
            .finish()
    }
}

/// A counted reference that has not been given an owner yet.
///
/// The reference is released when the guard is dropped, unless [RefGuard::commit] moved it
/// into a [KernelRef] first.
pub struct RefGuard<T: ?Sized + RefCounted> {
    object: Option<Rc<T>>,
}

impl<T: ?Sized + RefCounted> RefGuard<T> {
    pub fn acquire(object: Rc<T>) -> Self {
        object.add_ref();
        Self {
            object: Some(object),
        }
    }

    /// Narrows the object and hands the counted reference over to the narrowed handle.
    /// If the narrowing fails, the reference is released.
    pub fn commit<U, N>(mut self, narrow: N) -> Option<KernelRef<U>>
    where
        U: ?Sized + RefCounted,
        N: FnOnce(Rc<T>) -> Option<Rc<U>>,
    {
        let object = narrow(self.object.clone()?)?;

        // The count now belongs to the new handle.
        self.object = None;
        Some(KernelRef { object })
    }
}

impl<T: ?Sized + RefCounted> Drop for RefGuard<T> {
    fn drop(&mut self) {
        if let Some(object) = self.object.take() {
            object.release();
        }
    }
}
