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

//! Runtime wrappers around kernel objects.
//!
//! Every wrapper owns exactly one counted reference to its kernel object. Cloning a
//! wrapper counts another reference and dropping it releases one.

use std::{borrow::Cow, rc::Rc};

use ordered_float::NotNan;

use crate::{
    kernel::{
        self, Curve3D as _, KernelRef, Mesh as _, RefCounted as _, Solid as _,
        SpaceInstance as _, SpaceItem as KernelSpaceItem, SpaceType,
    },
    runtime::{
        cast::cast,
        errors::{ExpressionResult, Raise as _},
        logging::StackTrace,
        ExecutionContext,
    },
};

use super::{
    from_count, serializable::SerializableValue, Boolean, MissingMethodError, NoneType, Object,
    RawNumber, StaticTypeName, UnpackArguments, UnwrapNotNan, Value,
};

macro_rules! kernel_wrapper {
    ($name:ident, $kernel:ident) => {
        #[derive(Clone, PartialEq)]
        pub struct $name {
            pub handle: KernelRef<dyn kernel::$kernel>,
        }

        impl From<KernelRef<dyn kernel::$kernel>> for $name {
            fn from(handle: KernelRef<dyn kernel::$kernel>) -> Self {
                Self { handle }
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("is_a", &self.handle.is_a())
                    .field("family", &self.handle.family())
                    .field("use_count", &self.handle.use_count())
                    .finish()
            }
        }

        impl StaticTypeName for $name {
            fn static_type_name() -> &'static str {
                stringify!($name)
            }
        }
    };
}

kernel_wrapper!(SpaceItem, SpaceItem);
kernel_wrapper!(Item, SpaceItem);
kernel_wrapper!(Mesh, Mesh);
kernel_wrapper!(Solid, Solid);
kernel_wrapper!(SpaceInstance, SpaceInstance);
kernel_wrapper!(Curve3D, Curve3D);

/// Wraps a kernel object whose concrete type has not been narrowed yet.
///
/// Objects of the item family become an [Item], everything else becomes a [SpaceItem].
/// The wrapper counts its own reference.
pub fn wrap_item(item: Rc<dyn KernelSpaceItem>) -> Value {
    let handle = KernelRef::acquire(item);

    if handle.family() == SpaceType::Item {
        Item::from(handle).into()
    } else {
        SpaceItem::from(handle).into()
    }
}

fn from_tag(ty: SpaceType, stack_trace: &StackTrace) -> ExpressionResult<Value> {
    NotNan::new(RawNumber::from(u32::from(ty))).unwrap_not_nan(stack_trace)
}

/// Methods every kernel object supports, no matter how far it has been narrowed.
fn item_method_call<T>(
    handle: &KernelRef<T>,
    type_name: Cow<'static, str>,
    context: &ExecutionContext,
    method: &str,
    arguments: Vec<Value>,
) -> ExpressionResult<Value>
where
    T: ?Sized + KernelSpaceItem,
{
    match method {
        "cast" => cast(context, &handle.to_space_item(), arguments),
        "is_a" => {
            <()>::unpack_arguments(context.stack_trace, arguments)?;
            from_tag(handle.is_a(), context.stack_trace)
        }
        "family" => {
            <()>::unpack_arguments(context.stack_trace, arguments)?;
            from_tag(handle.family(), context.stack_trace)
        }
        "use_count" => {
            <()>::unpack_arguments(context.stack_trace, arguments)?;
            from_count(handle.use_count(), context.stack_trace)
        }
        _ => Err(MissingMethodError {
            type_name,
            method: method.to_string(),
        }
        .to_error(context.stack_trace)),
    }
}

fn export_item<T>(handle: &KernelRef<T>, type_name: Cow<'static, str>) -> SerializableValue
where
    T: ?Sized + KernelSpaceItem,
{
    SerializableValue::Item {
        ty: type_name.into_owned(),
        is_a: handle.is_a(),
        family: handle.family(),
        use_count: handle.use_count(),
    }
}

impl Object for SpaceItem {
    fn method_call(
        &self,
        context: &ExecutionContext,
        method: &str,
        arguments: Vec<Value>,
    ) -> ExpressionResult<Value> {
        item_method_call(&self.handle, self.type_name(), context, method, arguments)
    }

    fn export(&self, _context: &ExecutionContext) -> ExpressionResult<SerializableValue> {
        Ok(export_item(&self.handle, self.type_name()))
    }
}

impl Object for Item {
    fn method_call(
        &self,
        context: &ExecutionContext,
        method: &str,
        arguments: Vec<Value>,
    ) -> ExpressionResult<Value> {
        item_method_call(&self.handle, self.type_name(), context, method, arguments)
    }

    fn export(&self, _context: &ExecutionContext) -> ExpressionResult<SerializableValue> {
        Ok(export_item(&self.handle, self.type_name()))
    }
}

impl Object for Mesh {
    fn method_call(
        &self,
        context: &ExecutionContext,
        method: &str,
        arguments: Vec<Value>,
    ) -> ExpressionResult<Value> {
        match method {
            "grid_count" => {
                <()>::unpack_arguments(context.stack_trace, arguments)?;
                from_count(self.handle.grid_count(), context.stack_trace)
            }
            _ => item_method_call(&self.handle, self.type_name(), context, method, arguments),
        }
    }

    fn export(&self, _context: &ExecutionContext) -> ExpressionResult<SerializableValue> {
        Ok(export_item(&self.handle, self.type_name()))
    }
}

impl Object for Solid {
    fn method_call(
        &self,
        context: &ExecutionContext,
        method: &str,
        arguments: Vec<Value>,
    ) -> ExpressionResult<Value> {
        match method {
            "face_count" => {
                <()>::unpack_arguments(context.stack_trace, arguments)?;
                from_count(self.handle.face_count(), context.stack_trace)
            }
            _ => item_method_call(&self.handle, self.type_name(), context, method, arguments),
        }
    }

    fn export(&self, _context: &ExecutionContext) -> ExpressionResult<SerializableValue> {
        Ok(export_item(&self.handle, self.type_name()))
    }
}

impl Object for SpaceInstance {
    fn method_call(
        &self,
        context: &ExecutionContext,
        method: &str,
        arguments: Vec<Value>,
    ) -> ExpressionResult<Value> {
        match method {
            "space_item" => {
                <()>::unpack_arguments(context.stack_trace, arguments)?;
                Ok(self
                    .handle
                    .space_item()
                    .map(wrap_item)
                    .unwrap_or(NoneType.into()))
            }
            _ => item_method_call(&self.handle, self.type_name(), context, method, arguments),
        }
    }

    fn export(&self, _context: &ExecutionContext) -> ExpressionResult<SerializableValue> {
        Ok(export_item(&self.handle, self.type_name()))
    }
}

impl Object for Curve3D {
    fn method_call(
        &self,
        context: &ExecutionContext,
        method: &str,
        arguments: Vec<Value>,
    ) -> ExpressionResult<Value> {
        match method {
            "is_closed" => {
                <()>::unpack_arguments(context.stack_trace, arguments)?;
                Ok(Boolean(self.handle.is_closed()).into())
            }
            _ => item_method_call(&self.handle, self.type_name(), context, method, arguments),
        }
    }

    fn export(&self, _context: &ExecutionContext) -> ExpressionResult<SerializableValue> {
        Ok(export_item(&self.handle, self.type_name()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        kernel::{memory::MemoryItem, RefCounted},
        runtime::{test_context, values::ArityError},
    };

    fn number(raw: RawNumber) -> Value {
        NotNan::new(raw).unwrap().into()
    }

    #[test]
    fn solid_methods() {
        test_context(|context, _log| {
            let item = MemoryItem::builder(SpaceType::Solid).face_count(6).build();
            let generic: Rc<dyn KernelSpaceItem> = item.clone();
            let solid: Value =
                Solid::from(KernelRef::acquire(generic.into_solid().unwrap())).into();

            assert_eq!(
                solid.call_method(context, "face_count", Vec::new()).unwrap(),
                number(6.0)
            );
            assert_eq!(
                solid.call_method(context, "is_a", Vec::new()).unwrap(),
                number(405.0)
            );
            assert_eq!(
                solid.call_method(context, "family", Vec::new()).unwrap(),
                number(401.0)
            );
            assert_eq!(
                solid.call_method(context, "use_count", Vec::new()).unwrap(),
                number(1.0)
            );
        });
    }

    #[test]
    fn query_arity() {
        test_context(|context, _log| {
            let solid = wrap_item(MemoryItem::new(SpaceType::Solid));
            let error = solid
                .call_method(context, "is_a", vec![number(1.0)])
                .unwrap_err();

            assert_eq!(
                error.downcast_ref::<ArityError>(),
                Some(&ArityError {
                    expected: 0,
                    got: 1
                })
            );
        });
    }

    #[test]
    fn missing_method() {
        test_context(|context, _log| {
            let item = MemoryItem::new(SpaceType::Mesh);
            let generic: Rc<dyn KernelSpaceItem> = item;
            let mesh: Value = Mesh::from(KernelRef::acquire(generic.into_mesh().unwrap())).into();

            let error = mesh
                .call_method(context, "face_count", Vec::new())
                .unwrap_err();
            assert_eq!(
                error.downcast_ref::<MissingMethodError>(),
                Some(&MissingMethodError {
                    type_name: "Mesh".into(),
                    method: "face_count".into()
                })
            );
        });
    }

    #[test]
    fn curve_is_closed() {
        test_context(|context, _log| {
            let item = MemoryItem::builder(SpaceType::Contour3D).closed(true).build();
            let generic: Rc<dyn KernelSpaceItem> = item;
            let curve: Value =
                Curve3D::from(KernelRef::acquire(generic.into_curve().unwrap())).into();

            assert_eq!(
                curve.call_method(context, "is_closed", Vec::new()).unwrap(),
                Boolean(true).into()
            );
        });
    }

    #[test]
    fn instance_space_item() {
        test_context(|context, _log| {
            let target = MemoryItem::new(SpaceType::Solid);
            let item = MemoryItem::builder(SpaceType::SpaceInstance)
                .instance_of(target.clone())
                .build();
            let generic: Rc<dyn KernelSpaceItem> = item;
            let instance: Value = SpaceInstance::from(KernelRef::acquire(
                generic.into_space_instance().unwrap(),
            ))
            .into();

            let placed = instance
                .call_method(context, "space_item", Vec::new())
                .unwrap();
            assert!(placed.downcast_ref::<Item>(context.stack_trace).is_ok());
            assert_eq!(target.use_count(), 1);

            drop(placed);
            assert_eq!(target.use_count(), 0);
        });
    }

    #[test]
    fn empty_instance() {
        test_context(|context, _log| {
            let item = MemoryItem::new(SpaceType::SpaceInstance);
            let generic: Rc<dyn KernelSpaceItem> = item;
            let instance: Value = SpaceInstance::from(KernelRef::acquire(
                generic.into_space_instance().unwrap(),
            ))
            .into();

            assert_eq!(
                instance
                    .call_method(context, "space_item", Vec::new())
                    .unwrap(),
                NoneType.into()
            );
        });
    }

    #[test]
    fn export() {
        test_context(|context, _log| {
            let item = MemoryItem::new(SpaceType::Assembly);
            let value = wrap_item(item.clone());

            assert_eq!(
                value.export(context).unwrap(),
                SerializableValue::Item {
                    ty: "Item".into(),
                    is_a: SpaceType::Assembly,
                    family: SpaceType::Item,
                    use_count: 1,
                }
            );

            drop(value);
            assert_eq!(item.use_count(), 0);
        });
    }
}
