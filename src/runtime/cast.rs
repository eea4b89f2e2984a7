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

//! Turning a generic kernel object into the typed wrapper for its concrete type.

use std::{fmt::Display, rc::Rc};

use crate::kernel::{RefGuard, SpaceItem as KernelSpaceItem, SpaceType};

use super::{
    errors::{ExpressionResult, Raise as _},
    logging::LogLevel,
    values::{to_type_identifier, Curve3D, Mesh, Number, Solid, SpaceInstance, UnpackArguments},
    ExecutionContext, Value,
};

/// The typed wrappers a cast can produce.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CastTarget {
    Mesh,
    Solid,
    SpaceInstance,
    Curve3D,
}

impl CastTarget {
    /// Every kernel tag must be listed here, so a new tag can't be added without deciding
    /// what it casts to.
    pub const fn for_type(ty: SpaceType) -> Option<Self> {
        match ty {
            SpaceType::Mesh => Some(Self::Mesh),
            SpaceType::Solid => Some(Self::Solid),
            SpaceType::SpaceInstance => Some(Self::SpaceInstance),
            SpaceType::Curve3D
            | SpaceType::Line3D
            | SpaceType::LineSegment3D
            | SpaceType::Arc3D
            | SpaceType::PolyCurve3D
            | SpaceType::Polyline3D
            | SpaceType::Nurbs3D
            | SpaceType::Bezier3D
            | SpaceType::CubicSpline3D
            | SpaceType::Contour3D
            | SpaceType::ContourOnSurface
            | SpaceType::ContourOnPlane
            | SpaceType::SurfaceCurve
            | SpaceType::TrimmedCurve3D
            | SpaceType::PlaneCurve => Some(Self::Curve3D),
            SpaceType::Undefined
            | SpaceType::SpaceItem
            | SpaceType::Point3D
            | SpaceType::Surface
            | SpaceType::Plane
            | SpaceType::CylinderSurface
            | SpaceType::ConeSurface
            | SpaceType::SphereSurface
            | SpaceType::TorusSurface
            | SpaceType::SplineSurface
            | SpaceType::Item
            | SpaceType::AssistedItem
            | SpaceType::PointFrame
            | SpaceType::WireFrame
            | SpaceType::Instance
            | SpaceType::Assembly
            | SpaceType::PlaneInstance
            | SpaceType::Collection => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Mesh => "Mesh",
            Self::Solid => "Solid",
            Self::SpaceInstance => "SpaceInstance",
            Self::Curve3D => "Curve3D",
        }
    }
}

impl Display for CastTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Eq, PartialEq)]
pub struct CastMismatchError {
    pub is_a: SpaceType,
    pub family: SpaceType,
    pub requested: u32,
}

impl std::error::Error for CastMismatchError {}

impl Display for CastMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Operation Cast failed: object is a {} with family {} but trying to cast to ",
            self.is_a, self.family
        )?;

        match SpaceType::try_from(self.requested) {
            Ok(requested) => write!(f, "{}", requested),
            Err(_) => write!(f, "{}", self.requested),
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
pub struct UnsupportedCastError {
    pub requested: SpaceType,
}

impl std::error::Error for UnsupportedCastError {}

impl Display for UnsupportedCastError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Operation Cast failed: casting to {} is not supported",
            self.requested
        )
    }
}

/// The kernel reported a matching type but refused to narrow the object to it.
#[derive(Debug, Eq, PartialEq)]
pub struct NarrowingError {
    pub is_a: SpaceType,
    pub target: CastTarget,
}

impl std::error::Error for NarrowingError {}

impl Display for NarrowingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Operation Cast failed: kernel reported a {} but it could not be narrowed to {}",
            self.is_a, self.target
        )
    }
}

/// Casts a kernel object to the typed wrapper for the requested type.
///
/// The requested type must be the object's concrete type or its family. On success the
/// returned wrapper owns one new counted reference to the object. On failure the use count
/// is left as it was.
pub fn cast(
    context: &ExecutionContext,
    item: &Rc<dyn KernelSpaceItem>,
    arguments: Vec<Value>,
) -> ExpressionResult<Value> {
    let (requested,) = <(Number,)>::unpack_arguments(context.stack_trace, arguments)?;
    let requested = to_type_identifier(&requested, 0, context.stack_trace)?;

    let is_a = item.is_a();
    let family = item.family();

    let requested = match SpaceType::try_from(requested) {
        Ok(ty) if ty == is_a || ty == family => ty,
        _ => {
            return Err(CastMismatchError {
                is_a,
                family,
                requested,
            }
            .to_error(context.stack_trace))
        }
    };

    // Released again when the guard drops, unless a wrapper takes it over.
    let guard = RefGuard::acquire(item.clone());

    let Some(target) = CastTarget::for_type(requested) else {
        return Err(UnsupportedCastError { requested }.to_error(context.stack_trace));
    };

    let value: Option<Value> = match target {
        CastTarget::Mesh => guard
            .commit(KernelSpaceItem::into_mesh)
            .map(|handle| Mesh::from(handle).into()),
        CastTarget::Solid => guard
            .commit(KernelSpaceItem::into_solid)
            .map(|handle| Solid::from(handle).into()),
        CastTarget::SpaceInstance => guard
            .commit(KernelSpaceItem::into_space_instance)
            .map(|handle| SpaceInstance::from(handle).into()),
        CastTarget::Curve3D => guard
            .commit(KernelSpaceItem::into_curve)
            .map(|handle| Curve3D::from(handle).into()),
    };

    match value {
        Some(value) => {
            log::debug!("Cast {} to {}", is_a, target);

            if is_a.family() != family {
                context.push_message(
                    LogLevel::Warning,
                    format!(
                        "Kernel reports {} as a member of family {}, but it belongs to {}",
                        is_a,
                        family,
                        is_a.family()
                    ),
                );
            }

            Ok(value)
        }
        None => {
            log::warn!(
                "Kernel object reported as {} in family {} could not be narrowed to {}",
                is_a,
                family,
                target
            );

            Err(NarrowingError { is_a, target }.to_error(context.stack_trace))
        }
    }
}
