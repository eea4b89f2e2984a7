use paste::paste;
use serde::{Deserialize, Serialize};

/// A tag that does not belong to the kernel's type enumeration.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct UnknownSpaceType(pub u32);

impl std::fmt::Display for UnknownSpaceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{}` is not a known space type", self.0)
    }
}

impl std::error::Error for UnknownSpaceType {}

macro_rules! space_types {
    ($($name:ident = $value:literal in $family:ident),* $(,)?) => {
        /// Runtime type tags reported by the geometry kernel for its space items.
        ///
        /// Every tag belongs to exactly one family. Family roots are their own family.
        #[derive(Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
        #[repr(u32)]
        pub enum SpaceType {
            $($name = $value),*
        }

        impl SpaceType {
            pub const ALL: &'static [SpaceType] = &[$(SpaceType::$name),*];

            pub const fn family(self) -> SpaceType {
                match self {
                    $(Self::$name => Self::$family),*
                }
            }

            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$name => stringify!($name)),*
                }
            }
        }

        impl TryFrom<u32> for SpaceType {
            type Error = UnknownSpaceType;

            fn try_from(value: u32) -> Result<Self, Self::Error> {
                match value {
                    $($value => Ok(Self::$name),)*
                    unknown => Err(UnknownSpaceType(unknown)),
                }
            }
        }
    };
}

space_types! {
    Undefined = 0 in Undefined,
    SpaceItem = 1 in SpaceItem,

    Point3D = 101 in Point3D,

    Curve3D = 201 in Curve3D,
    Line3D = 202 in Curve3D,
    LineSegment3D = 203 in Curve3D,
    Arc3D = 204 in Curve3D,
    PolyCurve3D = 205 in Curve3D,
    Polyline3D = 206 in Curve3D,
    Nurbs3D = 207 in Curve3D,
    Bezier3D = 208 in Curve3D,
    CubicSpline3D = 209 in Curve3D,
    Contour3D = 210 in Curve3D,
    ContourOnSurface = 211 in Curve3D,
    ContourOnPlane = 212 in Curve3D,
    SurfaceCurve = 213 in Curve3D,
    TrimmedCurve3D = 214 in Curve3D,
    PlaneCurve = 215 in Curve3D,

    Surface = 301 in Surface,
    Plane = 302 in Surface,
    CylinderSurface = 303 in Surface,
    ConeSurface = 304 in Surface,
    SphereSurface = 305 in Surface,
    TorusSurface = 306 in Surface,
    SplineSurface = 307 in Surface,

    Item = 401 in Item,
    AssistedItem = 402 in Item,
    PointFrame = 403 in Item,
    WireFrame = 404 in Item,
    Solid = 405 in Item,
    Instance = 406 in Item,
    Assembly = 407 in Item,
    Mesh = 408 in Item,
    SpaceInstance = 409 in Item,
    PlaneInstance = 410 in Item,
    Collection = 411 in Item,
}

macro_rules! family_predicate {
    ($family:ident, $name:ident) => {
        paste! {
            pub const fn [< is_ $name >] (self) -> bool {
                matches!(self.family(), Self::$family)
            }
        }
    };
}

impl SpaceType {
    family_predicate!(Point3D, point);
    family_predicate!(Curve3D, curve);
    family_predicate!(Surface, surface);
    family_predicate!(Item, item);

    /// True for the tags that name a family rather than a concrete type.
    pub fn is_family(self) -> bool {
        self.family() == self
    }
}

impl From<SpaceType> for u32 {
    fn from(value: SpaceType) -> Self {
        value as u32
    }
}

impl std::fmt::Display for SpaceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_trip_all_tags() {
        for ty in SpaceType::ALL.iter().copied() {
            assert_eq!(SpaceType::try_from(u32::from(ty)), Ok(ty));
        }
    }

    #[test]
    fn unknown_tag() {
        assert_eq!(SpaceType::try_from(9999), Err(UnknownSpaceType(9999)));
        assert_eq!(SpaceType::try_from(200), Err(UnknownSpaceType(200)));
    }

    #[test]
    fn families() {
        assert_eq!(SpaceType::Solid.family(), SpaceType::Item);
        assert_eq!(SpaceType::Mesh.family(), SpaceType::Item);
        assert_eq!(SpaceType::Line3D.family(), SpaceType::Curve3D);
        assert_eq!(SpaceType::Plane.family(), SpaceType::Surface);
        assert_eq!(SpaceType::Point3D.family(), SpaceType::Point3D);

        assert!(SpaceType::Contour3D.is_curve());
        assert!(!SpaceType::Contour3D.is_item());
        assert!(SpaceType::Assembly.is_item());
        assert!(SpaceType::SphereSurface.is_surface());
        assert!(SpaceType::Point3D.is_point());
    }

    #[test]
    fn family_roots() {
        let roots: Vec<SpaceType> = SpaceType::ALL
            .iter()
            .copied()
            .filter(|ty| ty.is_family())
            .collect();

        assert_eq!(
            roots,
            vec![
                SpaceType::Undefined,
                SpaceType::SpaceItem,
                SpaceType::Point3D,
                SpaceType::Curve3D,
                SpaceType::Surface,
                SpaceType::Item,
            ]
        );
    }

    #[test]
    fn display_name() {
        assert_eq!(SpaceType::SpaceInstance.to_string(), "SpaceInstance");
        assert_eq!(format!("{}", SpaceType::Curve3D), "Curve3D");
    }

    #[test]
    fn serialize_by_name() {
        assert_eq!(
            serde_json::to_string(&SpaceType::Solid).unwrap(),
            "\"Solid\""
        );
        assert_eq!(
            serde_yaml::from_str::<SpaceType>("Nurbs3D").unwrap(),
            SpaceType::Nurbs3D
        );
    }
}
