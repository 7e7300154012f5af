// Copyright 2025 the Terrace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The physics world seam.

use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::Point;

/// Surface properties of a fixture.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixtureMaterial {
    /// Mass per unit area.
    pub density: f64,
    /// Coulomb friction coefficient.
    pub friction: f64,
    /// Bounciness in `[0, 1]`.
    pub restitution: f64,
}

impl Default for FixtureMaterial {
    fn default() -> Self {
        Self {
            density: 1.0,
            friction: 0.0,
            restitution: 0.0,
        }
    }
}

/// A physics engine that can hold static collision geometry.
///
/// Coordinates are already in physics units when they reach the world.
pub trait PhysicsWorld {
    /// Handle of a body created by this world.
    type Body: Copy + Debug;

    /// Create a static (immovable) body at `position`.
    fn create_static_body(&mut self, position: Point) -> Self::Body;

    /// Attach a polyline fixture to `body`, in body-local coordinates.
    ///
    /// When `closed` is set the last point connects back to the first.
    fn attach_chain(
        &mut self,
        body: Self::Body,
        points: &[Point],
        closed: bool,
        material: FixtureMaterial,
    );

    /// Attach a circle fixture centred on `body`.
    fn attach_circle(&mut self, body: Self::Body, radius: f64, material: FixtureMaterial);
}

/// One call recorded by a [`CommandLog`].
#[derive(Clone, Debug, PartialEq)]
pub enum PhysicsCommand {
    /// [`PhysicsWorld::create_static_body`].
    CreateStaticBody {
        /// Handle returned to the caller.
        body: usize,
        /// Body position.
        position: Point,
    },
    /// [`PhysicsWorld::attach_chain`].
    AttachChain {
        /// Target body.
        body: usize,
        /// Body-local points.
        points: Vec<Point>,
        /// Loop or open chain.
        closed: bool,
        /// Surface properties.
        material: FixtureMaterial,
    },
    /// [`PhysicsWorld::attach_circle`].
    AttachCircle {
        /// Target body.
        body: usize,
        /// Circle radius.
        radius: f64,
        /// Surface properties.
        material: FixtureMaterial,
    },
}

/// A [`PhysicsWorld`] that only records what it is asked to do.
///
/// Bodies are numbered from zero in creation order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommandLog {
    commands: Vec<PhysicsCommand>,
    bodies: usize,
}

impl CommandLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded call, in order.
    pub fn commands(&self) -> &[PhysicsCommand] {
        &self.commands
    }

    /// Number of bodies created.
    pub fn body_count(&self) -> usize {
        self.bodies
    }

    /// Chain fixtures as `(body, points, closed)`.
    pub fn chains(&self) -> impl Iterator<Item = (usize, &[Point], bool)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            PhysicsCommand::AttachChain {
                body,
                points,
                closed,
                ..
            } => Some((*body, points.as_slice(), *closed)),
            _ => None,
        })
    }

    /// Circle fixtures as `(body position, radius)`.
    pub fn circles(&self) -> impl Iterator<Item = (Point, f64)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            PhysicsCommand::AttachCircle { body, radius, .. } => {
                self.position(*body).map(|p| (p, *radius))
            }
            _ => None,
        })
    }

    /// Position a body was created at.
    pub fn position(&self, body: usize) -> Option<Point> {
        self.commands.iter().find_map(|c| match c {
            PhysicsCommand::CreateStaticBody { body: b, position } if *b == body => {
                Some(*position)
            }
            _ => None,
        })
    }
}

impl PhysicsWorld for CommandLog {
    type Body = usize;

    fn create_static_body(&mut self, position: Point) -> usize {
        let body = self.bodies;
        self.bodies += 1;
        self.commands
            .push(PhysicsCommand::CreateStaticBody { body, position });
        body
    }

    fn attach_chain(
        &mut self,
        body: usize,
        points: &[Point],
        closed: bool,
        material: FixtureMaterial,
    ) {
        self.commands.push(PhysicsCommand::AttachChain {
            body,
            points: points.to_vec(),
            closed,
            material,
        });
    }

    fn attach_circle(&mut self, body: usize, radius: f64, material: FixtureMaterial) {
        self.commands.push(PhysicsCommand::AttachCircle {
            body,
            radius,
            material,
        });
    }
}
