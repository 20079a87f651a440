//! Index types for mesh elements.
//!
//! Vertices, half-edges, faces, and undirected edges are identified by their
//! position in the arrays owned by the mesh. The wrappers here keep those four
//! index spaces apart at compile time. They are generic over the underlying
//! integer type so that small meshes can use `u16` and very large ones `u64`.
//!
//! The all-ones value of the underlying integer is reserved as the invalid
//! sentinel. A boundary half-edge carries an invalid [`FaceId`], and a
//! directed-edge lookup that finds nothing returns an invalid [`HalfEdgeId`].

use std::fmt::{self, Debug};
use std::hash::Hash;

/// Trait for types that can be used as mesh indices.
///
/// Implemented for `u16`, `u32`, and `u64`.
pub trait MeshIndex:
    Copy + Clone + Eq + PartialEq + Ord + PartialOrd + Hash + Debug + Send + Sync + 'static
{
    /// The maximum valid index value.
    const MAX: Self;

    /// A sentinel value representing an invalid/null index.
    const INVALID: Self;

    /// Width of the underlying integer in bits.
    const BITS: u32;

    /// Convert from usize, returning `None` if the value does not fit below
    /// the sentinel.
    fn try_from_usize(v: usize) -> Option<Self>;

    /// Convert to usize.
    fn to_usize(self) -> usize;

    /// Convert from usize.
    ///
    /// # Panics
    /// Panics if the value is too large for this index type. The builder
    /// checks capacities up front, so indices created from a built mesh never
    /// hit this.
    #[inline]
    fn from_usize(v: usize) -> Self {
        match Self::try_from_usize(v) {
            Some(i) => i,
            None => panic!("index {} too large for a {}-bit mesh index", v, Self::BITS),
        }
    }

    /// Check if this is a valid (non-sentinel) index.
    #[inline]
    fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

macro_rules! impl_mesh_index {
    ($t:ty) => {
        impl MeshIndex for $t {
            const MAX: Self = <$t>::MAX - 1;
            const INVALID: Self = <$t>::MAX;
            const BITS: u32 = <$t>::BITS;

            #[inline]
            fn try_from_usize(v: usize) -> Option<Self> {
                <$t>::try_from(v).ok().filter(|&i| i <= Self::MAX)
            }

            #[inline]
            fn to_usize(self) -> usize {
                self as usize
            }
        }
    };
}

impl_mesh_index!(u16);
impl_mesh_index!(u32);
impl_mesh_index!(u64);

/// A type-safe vertex index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct VertexId<I: MeshIndex = u32>(I);

/// A type-safe half-edge index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct HalfEdgeId<I: MeshIndex = u32>(I);

/// A type-safe face index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct FaceId<I: MeshIndex = u32>(I);

/// A type-safe index of an undirected edge.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct EdgeId<I: MeshIndex = u32>(I);

macro_rules! impl_index_type {
    ($name:ident, $display:literal) => {
        impl<I: MeshIndex> $name<I> {
            /// Create a new index from a raw value.
            #[inline]
            pub fn new(index: usize) -> Self {
                Self(I::from_usize(index))
            }

            /// Create an invalid/null index.
            #[inline]
            pub fn invalid() -> Self {
                Self(I::INVALID)
            }

            /// Get the raw index value.
            #[inline]
            pub fn index(self) -> usize {
                self.0.to_usize()
            }

            /// Get the raw value of the underlying type.
            #[inline]
            pub fn raw(self) -> I {
                self.0
            }

            /// Check if this is a valid (non-null) index.
            #[inline]
            pub fn is_valid(self) -> bool {
                self.0.is_valid()
            }
        }

        impl<I: MeshIndex> Debug for $name<I> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}({})", $display, self.index())
                } else {
                    write!(f, "{}(INVALID)", $display)
                }
            }
        }

        impl<I: MeshIndex> Default for $name<I> {
            fn default() -> Self {
                Self::invalid()
            }
        }

        impl<I: MeshIndex> From<usize> for $name<I> {
            fn from(v: usize) -> Self {
                Self::new(v)
            }
        }
    };
}

impl_index_type!(VertexId, "V");
impl_index_type!(HalfEdgeId, "HE");
impl_index_type!(FaceId, "F");
impl_index_type!(EdgeId, "E");

/// Check that `count` elements can be addressed with index type `I`.
pub(crate) fn check_capacity<I: MeshIndex>(what: &'static str, count: usize) -> crate::Result<()> {
    // The largest index used is count - 1, but a count equal to the sentinel
    // would make the next push collide with it.
    if count > 0 && I::try_from_usize(count - 1).is_none() {
        return Err(crate::MeshError::IndexOverflow {
            what,
            count,
            bits: I::BITS,
        });
    }
    Ok(())
}
