// Copyright 2025 the Terrace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`PhysicsWorld`] backed by `rapier2d` body and collider sets.

use alloc::vec::Vec;

use kurbo::Point;
use rapier2d::prelude::{
    ColliderBuilder, ColliderSet, Real, RigidBodyBuilder, RigidBodyHandle, RigidBodySet, Vector,
};

use crate::world::{FixtureMaterial, PhysicsWorld};

/// Static bodies and colliders ready to be handed to a rapier pipeline.
#[derive(Default)]
pub struct RapierWorld {
    /// Every body created through [`PhysicsWorld::create_static_body`].
    pub bodies: RigidBodySet,
    /// Every fixture attached to those bodies.
    pub colliders: ColliderSet,
}

impl core::fmt::Debug for RapierWorld {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RapierWorld")
            .field("bodies", &self.bodies.len())
            .field("colliders", &self.colliders.len())
            .finish()
    }
}

impl RapierWorld {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "rapier2d is built with f32 reals; the precision loss is accepted"
)]
fn real(v: f64) -> Real {
    v as Real
}

fn apply(builder: ColliderBuilder, material: FixtureMaterial) -> ColliderBuilder {
    builder
        .density(real(material.density))
        .friction(real(material.friction))
        .restitution(real(material.restitution))
}

impl PhysicsWorld for RapierWorld {
    type Body = RigidBodyHandle;

    fn create_static_body(&mut self, position: Point) -> RigidBodyHandle {
        let body = RigidBodyBuilder::fixed()
            .translation(Vector::new(real(position.x), real(position.y)))
            .build();
        self.bodies.insert(body)
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "collider index buffers are u32; boundary polylines stay far below that"
    )]
    fn attach_chain(
        &mut self,
        body: RigidBodyHandle,
        points: &[Point],
        closed: bool,
        material: FixtureMaterial,
    ) {
        if points.len() < 2 {
            return;
        }
        let vertices: Vec<_> = points
            .iter()
            .map(|p| rapier2d::math::Point::new(real(p.x), real(p.y)))
            .collect();
        let n = vertices.len() as u32;
        let mut indices: Vec<[u32; 2]> = (0..n - 1).map(|i| [i, i + 1]).collect();
        if closed && n >= 3 {
            indices.push([n - 1, 0]);
        }
        let collider = apply(ColliderBuilder::polyline(vertices, Some(indices)), material);
        self.colliders
            .insert_with_parent(collider, body, &mut self.bodies);
    }

    fn attach_circle(&mut self, body: RigidBodyHandle, radius: f64, material: FixtureMaterial) {
        let collider = apply(ColliderBuilder::ball(real(radius)), material);
        self.colliders
            .insert_with_parent(collider, body, &mut self.bodies);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{CollisionBuilder, CollisionConfig};
    use crate::map::{MapObject, ObjectLayer, TileLayer};
    use alloc::vec;
    use terrace_lattice::LatticeSize;

    #[test]
    fn builder_populates_rapier_sets() {
        let mut tiles = vec![1; 15];
        tiles[2 * 3 + 1] = 0;
        let layer = TileLayer::staggered(
            "ground",
            LatticeSize::new(3, 5),
            LatticeSize::new(64, 32),
            tiles,
        );
        let rocks = ObjectLayer::new("rocks", vec![MapObject::new("rock", Point::new(50.0, 50.0))]);

        let mut world = RapierWorld::new();
        let summary = CollisionBuilder::new(CollisionConfig::default())
            .build(&mut world, &layer, &[rocks])
            .unwrap();

        assert_eq!(summary.loops, 1);
        assert_eq!(world.bodies.len(), 2);
        assert_eq!(world.colliders.len(), 2);
        assert!(world.bodies.iter().all(|(_, b)| b.is_fixed()));
    }
}
