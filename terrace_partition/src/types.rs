// Copyright 2025 the Terrace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the partition tree: node identifiers, split parameters,
//! and traversal orders.

use terrace_lattice::LatticeSize;

/// Identifier for a node in a [`SpaceTree`](crate::SpaceTree) (generational).
///
/// Slots freed by [`SpaceTree::remove_children`](crate::SpaceTree::remove_children)
/// are reused with a higher generation, so an id that outlived its node is
/// reported as dead rather than aliasing a newer node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Direction of the cut that divides a node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SplitAxis {
    /// A vertical line; children are left and right.
    Vertical,
    /// A horizontal line; children are top and bottom.
    Horizontal,
}

/// Order in which a walk visits nodes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TraversalOrder {
    /// Node, then first subtree, then second subtree.
    PreOrder,
    /// First subtree, then node, then second subtree.
    InOrder,
    /// First subtree, then second subtree, then node.
    PostOrder,
    /// Breadth first, shallowest level first, first child before second.
    LevelOrder,
    /// The exact reverse of [`TraversalOrder::LevelOrder`]: deepest nodes
    /// first, root last.
    InvertedLevelOrder,
}

/// Parameters for [`SpaceTree::split_recursive`](crate::SpaceTree::split_recursive)
/// and [`SpaceTree::generate`](crate::SpaceTree::generate).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SplitParams {
    /// Nodes at this level or deeper are never split.
    pub level_max: u32,
    /// Smallest child extent along the split axis.
    pub min_size: LatticeSize,
    /// Nodes that fit within this size are left alone.
    pub max_size: LatticeSize,
    /// Aspect ratio at which the split axis stops being a coin flip.
    pub max_ratio: f64,
}

impl SplitParams {
    /// Bundle split parameters.
    pub const fn new(
        level_max: u32,
        min_size: LatticeSize,
        max_size: LatticeSize,
        max_ratio: f64,
    ) -> Self {
        Self {
            level_max,
            min_size,
            max_size,
            max_ratio,
        }
    }

    /// Check that the parameters describe a satisfiable partition.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.min_size.is_empty() {
            return Err(ParamsError::MinSize(self.min_size));
        }
        if !self.min_size.fits_within(self.max_size) {
            return Err(ParamsError::MaxSize {
                min: self.min_size,
                max: self.max_size,
            });
        }
        if self.max_ratio.is_nan() || self.max_ratio < 1.0 {
            return Err(ParamsError::Ratio(self.max_ratio));
        }
        Ok(())
    }
}

/// Why a [`SplitParams`] was refused.
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum ParamsError {
    /// Minimum extents must be positive.
    #[error("minimum size {0:?} must be positive in both dimensions")]
    MinSize(LatticeSize),
    /// The maximum is smaller than the minimum in some dimension.
    #[error("maximum size {max:?} is smaller than minimum size {min:?}")]
    MaxSize {
        /// Requested minimum.
        min: LatticeSize,
        /// Requested maximum.
        max: LatticeSize,
    },
    /// The ratio must be at least one.
    #[error("max ratio {0} must be at least 1")]
    Ratio(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_validation() {
        let ok = SplitParams::new(4, LatticeSize::splat(2), LatticeSize::splat(8), 1.5);
        assert_eq!(ok.validate(), Ok(()));

        let zero_min = SplitParams {
            min_size: LatticeSize::new(0, 2),
            ..ok
        };
        assert_eq!(
            zero_min.validate(),
            Err(ParamsError::MinSize(LatticeSize::new(0, 2)))
        );

        let small_max = SplitParams {
            max_size: LatticeSize::new(8, 1),
            ..ok
        };
        assert!(matches!(
            small_max.validate(),
            Err(ParamsError::MaxSize { .. })
        ));

        for ratio in [0.5, f64::NAN] {
            let bad = SplitParams {
                max_ratio: ratio,
                ..ok
            };
            assert!(matches!(bad.validate(), Err(ParamsError::Ratio(_))));
        }
    }
}
