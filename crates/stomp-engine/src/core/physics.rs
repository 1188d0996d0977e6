use glam::Vec2;
use rapier2d::prelude::*;

use crate::api::types::EntityId;

/// Pixels per physics unit. Positions and extents cross the proxy in pixels;
/// velocities, impulses and forces stay in physics units.
pub const WORLD_SCALE: f32 = 30.0;

// ---------------------------------------------------------------------------
// Conversion helpers: glam ↔ nalgebra, pixels ↔ physics units
// ---------------------------------------------------------------------------

fn vec2_to_na(v: Vec2) -> nalgebra::Vector2<f32> {
    nalgebra::Vector2::new(v.x, v.y)
}

fn na_to_vec2(v: &nalgebra::Vector2<f32>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

fn px_to_world(v: Vec2) -> nalgebra::Vector2<f32> {
    vec2_to_na(v / WORLD_SCALE)
}

fn world_to_px(v: &nalgebra::Vector2<f32>) -> Vec2 {
    na_to_vec2(v) * WORLD_SCALE
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// The kind of rigid body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Never moves (ground, platforms, blocks).
    Static,
    /// Integrated by the engine, affected by gravity and contacts.
    Dynamic,
    /// Moved only by its velocity; gravity does not apply.
    Kinematic,
}

impl BodyKind {
    fn to_rapier(self) -> RigidBodyType {
        match self {
            BodyKind::Static => RigidBodyType::Fixed,
            BodyKind::Dynamic => RigidBodyType::Dynamic,
            BodyKind::Kinematic => RigidBodyType::KinematicVelocityBased,
        }
    }
}

/// Builder describing a box-shaped body before creation.
/// Position and half extents are in pixels.
#[derive(Debug, Clone, Copy)]
pub struct BodySpec {
    pub kind: BodyKind,
    pub position: Vec2,
    pub half_extents: Vec2,
    pub velocity: Vec2,
    pub friction: f32,
    pub density: f32,
    pub fixed_rotation: bool,
    /// `false` installs an empty collision filter: the body is still
    /// integrated but touches nothing.
    pub interacts: bool,
}

impl BodySpec {
    pub fn new(kind: BodyKind, position: Vec2, half_extents: Vec2) -> Self {
        Self {
            kind,
            position,
            half_extents,
            velocity: Vec2::ZERO,
            friction: 0.3,
            density: 1.0,
            fixed_rotation: true,
            interacts: true,
        }
    }

    pub fn dynamic(position: Vec2, half_extents: Vec2) -> Self {
        Self::new(BodyKind::Dynamic, position, half_extents)
    }

    pub fn fixed(position: Vec2, half_extents: Vec2) -> Self {
        Self::new(BodyKind::Static, position, half_extents)
    }

    pub fn kinematic(position: Vec2, half_extents: Vec2) -> Self {
        Self::new(BodyKind::Kinematic, position, half_extents)
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.velocity = vel;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn with_interaction(mut self, interacts: bool) -> Self {
        self.interacts = interacts;
        self
    }
}

/// Handle pair referencing Rapier internals. May outlive the body it names;
/// every `PhysicsWorld` query treats a stale handle as a no-op.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsBody {
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
}

// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// Wraps all Rapier2D boilerplate into a single, easy-to-use struct.
pub struct PhysicsWorld {
    gravity: nalgebra::Vector2<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    /// Create a new physics world. Gravity is in physics units, Y-down
    /// (e.g. `Vec2::new(0.0, 9.8)`).
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity: vec2_to_na(gravity),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Set the integration timestep.
    pub fn set_dt(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
    }

    /// Gravity in physics units.
    pub fn gravity(&self) -> Vec2 {
        na_to_vec2(&self.gravity)
    }

    /// Create a rigid body with a box collider and return its handles.
    /// The EntityId is stored in the body's `user_data`.
    pub fn create_body(&mut self, entity_id: EntityId, spec: &BodySpec) -> PhysicsBody {
        let rb = RigidBodyBuilder::new(spec.kind.to_rapier())
            .translation(px_to_world(spec.position))
            .linvel(vec2_to_na(spec.velocity))
            .locked_axes(if spec.fixed_rotation {
                LockedAxes::ROTATION_LOCKED
            } else {
                LockedAxes::empty()
            })
            .user_data(entity_id.0 as u128)
            .build();

        let body_handle = self.bodies.insert(rb);

        let half = spec.half_extents / WORLD_SCALE;
        let groups = if spec.interacts {
            InteractionGroups::all()
        } else {
            InteractionGroups::none()
        };
        let collider = ColliderBuilder::cuboid(half.x, half.y)
            .friction(spec.friction)
            .density(spec.density)
            .collision_groups(groups)
            .solver_groups(groups)
            .build();

        let collider_handle =
            self.colliders
                .insert_with_parent(collider, body_handle, &mut self.bodies);

        PhysicsBody {
            body_handle,
            collider_handle,
        }
    }

    /// Remove a body and all its colliders. Removing a stale handle is a no-op.
    pub fn destroy_body(&mut self, body: &PhysicsBody) {
        self.bodies.remove(
            body.body_handle,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Whether the handle still names a live body.
    pub fn is_valid(&self, body: &PhysicsBody) -> bool {
        self.bodies.contains(body.body_handle)
    }

    /// Advance the simulation by one integration step.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );

        // Forces are one-shot: whatever was applied before this step is spent.
        for (_, rb) in self.bodies.iter_mut() {
            rb.reset_forces(false);
        }
    }

    /// Apply a force to a body for the next step only.
    pub fn apply_force(&mut self, body: &PhysicsBody, force: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.add_force(vec2_to_na(force), true);
        }
    }

    /// Apply an instantaneous impulse to a body.
    pub fn apply_impulse(&mut self, body: &PhysicsBody, impulse: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.apply_impulse(vec2_to_na(impulse), true);
        }
    }

    /// Set the linear velocity of a body directly.
    pub fn set_velocity(&mut self, body: &PhysicsBody, vel: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_linvel(vec2_to_na(vel), true);
        }
    }

    /// Get the current linear velocity of a body.
    pub fn velocity(&self, body: &PhysicsBody) -> Option<Vec2> {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_to_vec2(rb.linvel()))
    }

    /// Get the current position of a body, in pixels.
    pub fn position(&self, body: &PhysicsBody) -> Option<Vec2> {
        self.bodies
            .get(body.body_handle)
            .map(|rb| world_to_px(rb.translation()))
    }

    /// Change the kind of an existing body in place.
    pub fn set_body_kind(&mut self, body: &PhysicsBody, kind: BodyKind) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_body_type(kind.to_rapier(), true);
        }
    }

    /// Switch a body's collider between full interaction and the null
    /// collision filter without replacing the body.
    pub fn set_interaction(&mut self, body: &PhysicsBody, interacts: bool) {
        let groups = if interacts {
            InteractionGroups::all()
        } else {
            InteractionGroups::none()
        };
        if let Some(collider) = self.colliders.get_mut(body.collider_handle) {
            collider.set_collision_groups(groups);
            collider.set_solver_groups(groups);
        }
    }

    /// Current kind of a body, if it still exists.
    pub fn body_kind(&self, body: &PhysicsBody) -> Option<BodyKind> {
        self.bodies.get(body.body_handle).map(|rb| match rb.body_type() {
            RigidBodyType::Fixed => BodyKind::Static,
            RigidBodyType::Dynamic => BodyKind::Dynamic,
            RigidBodyType::KinematicPositionBased | RigidBodyType::KinematicVelocityBased => {
                BodyKind::Kinematic
            }
        })
    }

    /// Mass of a body, zero for a stale handle.
    pub fn mass(&self, body: &PhysicsBody) -> f32 {
        self.bodies
            .get(body.body_handle)
            .map(|rb| rb.mass())
            .unwrap_or(0.0)
    }

    /// Number of rigid bodies in the simulation.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn small_box() -> Vec2 {
        Vec2::new(8.0, 8.0)
    }

    #[test]
    fn create_and_destroy_body() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let body = world.create_body(EntityId(1), &BodySpec::dynamic(Vec2::ZERO, small_box()));
        assert_eq!(world.body_count(), 1);
        assert!(world.is_valid(&body));
        world.destroy_body(&body);
        assert_eq!(world.body_count(), 0);
        assert!(!world.is_valid(&body));
    }

    #[test]
    fn stale_handle_queries_are_no_ops() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let body = world.create_body(EntityId(1), &BodySpec::dynamic(Vec2::ZERO, small_box()));
        world.destroy_body(&body);

        // None of these may panic
        world.destroy_body(&body);
        world.set_velocity(&body, Vec2::new(1.0, 0.0));
        world.apply_impulse(&body, Vec2::new(1.0, 0.0));
        world.apply_force(&body, Vec2::new(1.0, 0.0));
        world.set_body_kind(&body, BodyKind::Kinematic);
        assert_eq!(world.velocity(&body), None);
        assert_eq!(world.position(&body), None);
        assert_eq!(world.mass(&body), 0.0);
    }

    #[test]
    fn gravity_pulls_dynamic_body_down() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, 9.8));
        world.set_dt(1.0 / 60.0);
        let body = world.create_body(EntityId(1), &BodySpec::dynamic(Vec2::ZERO, small_box()));

        for _ in 0..10 {
            world.step();
        }
        let pos = world.position(&body).unwrap();
        assert!(pos.y > 0.0, "Body should fall: y={}", pos.y);
    }

    #[test]
    fn kinematic_body_ignores_gravity() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, 9.8));
        world.set_dt(1.0 / 60.0);
        let body = world.create_body(
            EntityId(1),
            &BodySpec::kinematic(Vec2::new(100.0, 100.0), small_box())
                .with_velocity(Vec2::new(8.0, 0.0)),
        );

        for _ in 0..30 {
            world.step();
        }
        let pos = world.position(&body).unwrap();
        assert!((pos.y - 100.0).abs() < 0.001, "Kinematic body fell: y={}", pos.y);
        assert!(pos.x > 100.0, "Kinematic body should move along x: x={}", pos.x);
    }

    #[test]
    fn positions_round_trip_through_world_scale() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let body = world.create_body(
            EntityId(1),
            &BodySpec::fixed(Vec2::new(300.0, 450.0), small_box()),
        );
        let pos = world.position(&body).unwrap();
        assert!((pos.x - 300.0).abs() < 0.01);
        assert!((pos.y - 450.0).abs() < 0.01);
    }

    #[test]
    fn set_velocity_directly() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let body = world.create_body(EntityId(1), &BodySpec::dynamic(Vec2::ZERO, small_box()));

        world.set_velocity(&body, Vec2::new(1.5, -3.0));
        let vel = world.velocity(&body).unwrap();
        assert!((vel.x - 1.5).abs() < 0.001);
        assert!((vel.y - (-3.0)).abs() < 0.001);
    }

    #[test]
    fn body_kind_can_be_changed() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let body = world.create_body(EntityId(1), &BodySpec::dynamic(Vec2::ZERO, small_box()));
        assert_eq!(world.body_kind(&body), Some(BodyKind::Dynamic));
        world.set_body_kind(&body, BodyKind::Kinematic);
        assert_eq!(world.body_kind(&body), Some(BodyKind::Kinematic));
    }

    #[test]
    fn non_interacting_body_falls_through_ground() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, 9.8));
        world.set_dt(1.0 / 60.0);
        let _ground = world.create_body(
            EntityId(1),
            &BodySpec::fixed(Vec2::new(0.0, 100.0), Vec2::new(500.0, 10.0)),
        );
        let ghost = world.create_body(
            EntityId(2),
            &BodySpec::dynamic(Vec2::new(0.0, 60.0), small_box()).with_interaction(false),
        );

        for _ in 0..120 {
            world.step();
        }
        let pos = world.position(&ghost).unwrap();
        assert!(pos.y > 120.0, "Ghost body should pass through ground: y={}", pos.y);
    }

    #[test]
    fn interaction_can_be_cleared_in_place() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, 9.8));
        world.set_dt(1.0 / 60.0);
        world.create_body(
            EntityId(1),
            &BodySpec::fixed(Vec2::new(0.0, 100.0), Vec2::new(500.0, 10.0)),
        );
        let body = world.create_body(EntityId(2), &BodySpec::dynamic(Vec2::new(0.0, 60.0), small_box()));
        world.set_interaction(&body, false);

        for _ in 0..120 {
            world.step();
        }
        assert!(world.is_valid(&body), "Toggling interaction must keep the same body");
        let pos = world.position(&body).unwrap();
        assert!(pos.y > 120.0, "Body should pass through ground: y={}", pos.y);
    }

    #[test]
    fn builder_pattern() {
        let spec = BodySpec::dynamic(Vec2::new(10.0, 20.0), small_box())
            .with_velocity(Vec2::new(1.0, 2.0))
            .with_friction(0.0)
            .with_density(2.0)
            .with_interaction(false);

        assert_eq!(spec.kind, BodyKind::Dynamic);
        assert_eq!(spec.position, Vec2::new(10.0, 20.0));
        assert_eq!(spec.velocity, Vec2::new(1.0, 2.0));
        assert!(spec.friction.abs() < 0.001);
        assert!((spec.density - 2.0).abs() < 0.001);
        assert!(spec.fixed_rotation);
        assert!(!spec.interacts);
    }
}
