// Copyright 2025 the Terrace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Terrain collision building.

use alloc::vec::Vec;

use kurbo::Point;
use terrace_boundary::{BranchPolicy, ExtractOptions, Extractor, Polyline};

use crate::error::{InvalidInput, TerrainError};
use crate::grid::{CellGrid, StaggeredGeometry, boundary_segments};
use crate::map::{ObjectLayer, TileLayer};
use crate::world::{FixtureMaterial, PhysicsWorld};

/// Tunables for [`CollisionBuilder`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CollisionConfig {
    /// Physics units per pixel.
    pub physics_scale: f64,
    /// Douglas–Peucker tolerance in pixels; `0` only drops collinear vertices.
    pub simplify_epsilon: f64,
    /// Radius of obstacle circles in pixels.
    pub obstacle_radius: f64,
    /// Surface properties of every fixture.
    pub material: FixtureMaterial,
    /// Handling of boundary vertices shared by more than two edges.
    pub branch_policy: BranchPolicy,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            physics_scale: 0.02,
            simplify_epsilon: 1.0,
            obstacle_radius: 16.0,
            material: FixtureMaterial::default(),
            branch_policy: BranchPolicy::default(),
        }
    }
}

impl CollisionConfig {
    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), InvalidInput> {
        let checks = [
            ("physics_scale", self.physics_scale, false),
            ("simplify_epsilon", self.simplify_epsilon, true),
            ("obstacle_radius", self.obstacle_radius, false),
            ("density", self.material.density, true),
            ("friction", self.material.friction, true),
            ("restitution", self.material.restitution, true),
        ];
        for (name, value, zero_ok) in checks {
            let ok = value.is_finite() && (value > 0.0 || (zero_ok && value == 0.0));
            if !ok {
                return Err(InvalidInput::Config { name, value });
            }
        }
        Ok(())
    }
}

/// What a [`CollisionBuilder::build`] call registered.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CollisionSummary {
    /// Boundary segments traced from the grid.
    pub segments: usize,
    /// Closed fixtures attached.
    pub loops: usize,
    /// Open fixtures attached.
    pub chains: usize,
    /// Obstacle circles attached.
    pub obstacles: usize,
    /// Polylines dropped for having too few vertices after simplification.
    pub skipped: usize,
}

/// Turns a staggered tile layer into static physics geometry.
///
/// Void cells (tile id `0`) are walled off from land cells: every diamond
/// side between a void cell and a land neighbour becomes part of a boundary
/// polyline, and each polyline becomes one fixture on a single static body
/// at the origin. Objects of the obstacle layers become circles.
///
/// ## Example
///
/// ```rust
/// use terrace_lattice::LatticeSize;
/// use terrace_terrain::{CollisionBuilder, CollisionConfig, CommandLog, TileLayer};
///
/// // A 3x5 map of land with one void cell in the middle.
/// let mut tiles = vec![1; 15];
/// tiles[2 * 3 + 1] = 0;
/// let layer = TileLayer::staggered("ground", LatticeSize::new(3, 5), LatticeSize::new(64, 32), tiles);
///
/// let mut world = CommandLog::new();
/// let summary = CollisionBuilder::new(CollisionConfig::default())
///     .build(&mut world, &layer, &[])
///     .unwrap();
/// assert_eq!(summary.segments, 4);
/// assert_eq!(summary.loops, 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CollisionBuilder {
    config: CollisionConfig,
}

impl CollisionBuilder {
    /// Create a builder.
    pub fn new(config: CollisionConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Boundary polylines of `layer` in pixel coordinates, simplified.
    pub fn polylines(&self, layer: &TileLayer) -> Result<Vec<Polyline>, TerrainError> {
        self.config.validate()?;
        self.trace(layer).map(|(_, lines)| lines)
    }

    fn trace(&self, layer: &TileLayer) -> Result<(usize, Vec<Polyline>), TerrainError> {
        let grid = CellGrid::from_layer(layer)?;
        let segments = boundary_segments(&grid, &StaggeredGeometry::new(layer.tile_size));
        let count = segments.len();
        let options = ExtractOptions::default()
            .branch_policy(self.config.branch_policy)
            .simplify(self.config.simplify_epsilon);
        let lines = Extractor::new(options).extract(segments)?;
        tracing::debug!(
            layer = %layer.name,
            voids = grid.void_count(),
            segments = count,
            polylines = lines.len(),
            "traced terrain boundary"
        );
        Ok((count, lines))
    }

    /// Register the terrain boundary of `layer` and the objects of
    /// `obstacle_layers` in `world`.
    ///
    /// All input is validated before the world is touched, so an error
    /// leaves it unchanged.
    pub fn build<W: PhysicsWorld>(
        &self,
        world: &mut W,
        layer: &TileLayer,
        obstacle_layers: &[ObjectLayer],
    ) -> Result<CollisionSummary, TerrainError> {
        self.config.validate()?;
        let (segments, lines) = self.trace(layer)?;
        let scale = self.config.physics_scale;
        let material = self.config.material;

        let mut summary = CollisionSummary {
            segments,
            ..CollisionSummary::default()
        };

        let ground = world.create_static_body(Point::ORIGIN);
        for line in &lines {
            if line.is_degenerate() {
                tracing::warn!(
                    kind = ?line.kind,
                    points = line.len(),
                    "skipping degenerate boundary polyline"
                );
                summary.skipped += 1;
                continue;
            }
            let points: Vec<Point> = line
                .points
                .iter()
                .map(|&p| (p.to_vec2() * scale).to_point())
                .collect();
            world.attach_chain(ground, &points, line.is_loop(), material);
            if line.is_loop() {
                summary.loops += 1;
            } else {
                summary.chains += 1;
            }
        }

        let radius = self.config.obstacle_radius * scale;
        for object in obstacle_layers.iter().flat_map(|l| &l.objects) {
            let position = (object.position.to_vec2() * scale).to_point();
            let body = world.create_static_body(position);
            world.attach_circle(body, radius, material);
            tracing::trace!(name = %object.name, x = position.x, y = position.y, "obstacle");
            summary.obstacles += 1;
        }

        tracing::debug!(
            loops = summary.loops,
            chains = summary.chains,
            obstacles = summary.obstacles,
            skipped = summary.skipped,
            "registered terrain collision"
        );
        Ok(summary)
    }
}
