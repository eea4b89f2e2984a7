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

//! A kernel that lives entirely in memory.
//!
//! It carries only what the runtime can observe: identity, a use count, and the handful of
//! facts the typed wrappers expose. It stands in for the real kernel in tests and in the
//! command line host.

use std::{cell::Cell, rc::Rc};

use super::{Curve3D, Mesh, RefCounted, Solid, SpaceInstance, SpaceItem, SpaceType};

#[derive(Debug)]
pub struct MemoryItem {
    is_a: SpaceType,
    family: SpaceType,
    use_count: Cell<usize>,
    face_count: usize,
    grid_count: usize,
    closed: bool,
    instance_of: Option<Rc<MemoryItem>>,
}

impl MemoryItem {
    pub fn new(is_a: SpaceType) -> Rc<Self> {
        Self::builder(is_a).build()
    }

    pub fn builder(is_a: SpaceType) -> MemoryItemBuilder {
        MemoryItemBuilder {
            is_a,
            family: is_a.family(),
            face_count: 0,
            grid_count: 0,
            closed: false,
            instance_of: None,
        }
    }

    /// Narrowing only succeeds when the object really is of the requested kind, even if
    /// the reported family says otherwise.
    fn narrows_to(&self, ty: SpaceType) -> bool {
        self.is_a == ty
    }
}

pub struct MemoryItemBuilder {
    is_a: SpaceType,
    family: SpaceType,
    face_count: usize,
    grid_count: usize,
    closed: bool,
    instance_of: Option<Rc<MemoryItem>>,
}

impl MemoryItemBuilder {
    /// Overrides the reported family. A mismatched family makes for an inconsistent kernel
    /// object.
    pub fn family(mut self, family: SpaceType) -> Self {
        self.family = family;
        self
    }

    pub fn face_count(mut self, face_count: usize) -> Self {
        self.face_count = face_count;
        self
    }

    pub fn grid_count(mut self, grid_count: usize) -> Self {
        self.grid_count = grid_count;
        self
    }

    pub fn closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    pub fn instance_of(mut self, item: Rc<MemoryItem>) -> Self {
        self.instance_of = Some(item);
        self
    }

    pub fn build(self) -> Rc<MemoryItem> {
        Rc::new(MemoryItem {
            is_a: self.is_a,
            family: self.family,
            use_count: Cell::new(0),
            face_count: self.face_count,
            grid_count: self.grid_count,
            closed: self.closed,
            instance_of: self.instance_of,
        })
    }
}

impl RefCounted for MemoryItem {
    fn add_ref(&self) -> usize {
        let count = self.use_count.get() + 1;
        self.use_count.set(count);
        count
    }

    fn release(&self) -> usize {
        match self.use_count.get().checked_sub(1) {
            Some(count) => {
                self.use_count.set(count);
                count
            }
            None => {
                log::error!("Released a {} that holds no references", self.is_a);
                0
            }
        }
    }

    fn use_count(&self) -> usize {
        self.use_count.get()
    }
}

impl SpaceItem for MemoryItem {
    fn is_a(&self) -> SpaceType {
        self.is_a
    }

    fn family(&self) -> SpaceType {
        self.family
    }

    fn into_space_item(self: Rc<Self>) -> Rc<dyn SpaceItem> {
        self
    }

    fn into_mesh(self: Rc<Self>) -> Option<Rc<dyn Mesh>> {
        if self.narrows_to(SpaceType::Mesh) {
            Some(self)
        } else {
            None
        }
    }

    fn into_solid(self: Rc<Self>) -> Option<Rc<dyn Solid>> {
        if self.narrows_to(SpaceType::Solid) {
            Some(self)
        } else {
            None
        }
    }

    fn into_space_instance(self: Rc<Self>) -> Option<Rc<dyn SpaceInstance>> {
        if self.narrows_to(SpaceType::SpaceInstance) {
            Some(self)
        } else {
            None
        }
    }

    fn into_curve(self: Rc<Self>) -> Option<Rc<dyn Curve3D>> {
        if self.is_a.is_curve() {
            Some(self)
        } else {
            None
        }
    }
}

impl Mesh for MemoryItem {
    fn grid_count(&self) -> usize {
        self.grid_count
    }
}

impl Solid for MemoryItem {
    fn face_count(&self) -> usize {
        self.face_count
    }
}

impl SpaceInstance for MemoryItem {
    fn space_item(&self) -> Option<Rc<dyn SpaceItem>> {
        self.instance_of
            .clone()
            .map(|item| -> Rc<dyn SpaceItem> { item })
    }
}

impl Curve3D for MemoryItem {
    fn is_closed(&self) -> bool {
        self.closed
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reported_identity() {
        let line = MemoryItem::new(SpaceType::Line3D);
        assert_eq!(line.is_a(), SpaceType::Line3D);
        assert_eq!(line.family(), SpaceType::Curve3D);

        let odd = MemoryItem::builder(SpaceType::Solid)
            .family(SpaceType::Curve3D)
            .build();
        assert_eq!(odd.is_a(), SpaceType::Solid);
        assert_eq!(odd.family(), SpaceType::Curve3D);
    }

    #[test]
    fn use_count() {
        let item = MemoryItem::new(SpaceType::Mesh);
        assert_eq!(item.add_ref(), 1);
        assert_eq!(item.add_ref(), 2);
        assert_eq!(item.release(), 1);
        assert_eq!(item.release(), 0);
        assert_eq!(item.use_count(), 0);
    }

    #[test]
    fn over_release_saturates() {
        let item = MemoryItem::new(SpaceType::Mesh);
        assert_eq!(item.release(), 0);
        assert_eq!(item.use_count(), 0);
    }

    #[test]
    fn narrowing() {
        let solid = MemoryItem::builder(SpaceType::Solid).face_count(6).build();
        assert_eq!(solid.clone().into_solid().unwrap().face_count(), 6);
        assert!(solid.clone().into_mesh().is_none());
        assert!(solid.clone().into_curve().is_none());
        assert!(solid.into_space_instance().is_none());

        let nurbs = MemoryItem::builder(SpaceType::Nurbs3D).closed(true).build();
        assert!(nurbs.clone().into_curve().unwrap().is_closed());
        assert!(nurbs.into_solid().is_none());
    }

    #[test]
    fn narrowing_ignores_reported_family() {
        let liar = MemoryItem::builder(SpaceType::Point3D)
            .family(SpaceType::Curve3D)
            .build();

        assert!(liar.into_curve().is_none());
    }

    #[test]
    fn instance_target() {
        let solid = MemoryItem::new(SpaceType::Solid);
        let instance = MemoryItem::builder(SpaceType::SpaceInstance)
            .instance_of(solid.clone())
            .build();

        let placed = instance.into_space_instance().unwrap().space_item();
        assert_eq!(placed.unwrap().is_a(), SpaceType::Solid);

        // Reading the target does not count a reference.
        assert_eq!(solid.use_count(), 0);

        let empty = MemoryItem::new(SpaceType::SpaceInstance);
        assert!(empty.space_item().is_none());
    }
}
