//! Enumerations of the spatial package and their wire tokens.
//!
//! Tokens are case-sensitive. Variants use Rust naming; the token is the
//! exact text read and written, e.g. `DataKind::Uint8` is `uint8`.

use crate::model::Token;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

macro_rules! wire_tokens {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $token:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $token)] $variant),+
        }

        impl Token for $name {
            const KIND: &'static str = stringify!($name);
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $token),+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_tokens!(
    /// Coordinate system of a geometry.
    GeometryKind { Cartesian => "cartesian" }
);

wire_tokens!(
    /// Axis a coordinate component describes.
    CoordinateKind {
        CartesianX => "cartesianX",
        CartesianY => "cartesianY",
        CartesianZ => "cartesianZ",
    }
);

wire_tokens!(
    /// Numeric type of sampled or array data.
    DataKind {
        Uint8 => "uint8",
        Uint16 => "uint16",
        Uint32 => "uint32",
        Float => "float",
        Double => "double",
    }
);

wire_tokens!(
    InterpolationKind {
        NearestNeighbor => "nearestNeighbor",
        Linear => "linear",
    }
);

wire_tokens!(
    CompressionKind {
        Uncompressed => "uncompressed",
        Deflated => "deflated",
        Base64 => "base64",
    }
);

wire_tokens!(
    /// Set operation combining CSG nodes.
    SetOperation {
        Union => "union",
        Intersection => "intersection",
        Difference => "difference",
    }
);

wire_tokens!(
    PrimitiveKind {
        Sphere => "sphere",
        Cube => "cube",
        Cylinder => "cylinder",
        Cone => "cone",
        Circle => "circle",
        Square => "square",
    }
);

wire_tokens!(
    FunctionKind { Layered => "layered" }
);

wire_tokens!(
    DiffusionKind {
        Isotropic => "isotropic",
        Anisotropic => "anisotropic",
        Tensor => "tensor",
    }
);

wire_tokens!(
    /// Boundary condition type; tokens follow the package's mixed casing.
    BoundaryKind {
        RobinValueCoefficient => "Robin_valueCoefficient",
        RobinInwardNormalGradientCoefficient => "Robin_inwardNormalGradientCoefficient",
        RobinSum => "Robin_sum",
        Neumann => "Neumann",
        Dirichlet => "Dirichlet",
    }
);

wire_tokens!(
    PolygonKind {
        Triangle => "triangle",
        Quadrilateral => "quadrilateral",
    }
);
