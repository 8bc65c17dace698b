//! Bevy integration.
//!
//! [`TraversalPlugin`] keeps the level's paths in a [`PathRegistry`]
//! resource and advances every [`Traverser`] entity once per `Update`, using
//! the entity's `Transform` as the motor. Entities carrying a
//! [`ColliderBox`] take part in the collision guard and occlude look-at
//! queries. Everything the machines report is re-emitted as
//! [`TraversalNotice`] events.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::{debug, info, warn};

use crate::collision::Aabb;
use crate::graph::PathGraph;
use crate::input::InputSnapshot;
use crate::interaction::PathRaycaster;
use crate::machine::{MachineConfig, TraversalEvent, TraversalPhase, TraversalStateMachine};
use crate::motor::{ColliderId, Motor, Overlap, StaticCollider};
use crate::path::PathId;
use crate::scenario::discover_by_look_at;

/// Paths shared by every traverser in the world.
#[derive(Resource, Debug, Default)]
pub struct PathRegistry(pub PathGraph);

/// Axis-aligned box collider centred on the entity's translation.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ColliderBox {
    /// Half the box size along each axis.
    pub half_extents: Vec3,
    /// Path this collider belongs to; such overlaps never block that path.
    pub owner: Option<PathId>,
}

impl ColliderBox {
    /// Box owned by no path.
    #[must_use]
    pub const fn new(half_extents: Vec3) -> Self {
        Self {
            half_extents,
            owner: None,
        }
    }

    /// Mark the box as part of `path`'s own geometry.
    #[must_use]
    pub const fn owned_by(mut self, path: PathId) -> Self {
        self.owner = Some(path);
        self
    }

    fn to_static(self, entity: Entity, transform: &Transform) -> StaticCollider {
        StaticCollider {
            id: ColliderId(entity.to_bits()),
            bounds: Aabb::from_center_half_extents(transform.translation, self.half_extents),
            owner: self.owner,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SolverFlags {
    capsule_collisions: bool,
    movement_solving: bool,
    ground_solving: bool,
}

impl Default for SolverFlags {
    fn default() -> Self {
        Self {
            capsule_collisions: true,
            movement_solving: true,
            ground_solving: true,
        }
    }
}

/// An actor that can ride paths.
#[derive(Component, Debug)]
pub struct Traverser {
    machine: TraversalStateMachine,
    input: InputSnapshot,
    requested: Option<PathId>,
    auto_enter: bool,
    radius: f32,
    grounded: bool,
    flags: SolverFlags,
    exit_velocity: Vec3,
}

impl Traverser {
    /// Traverser with a collision sphere of `radius`.
    #[must_use]
    pub fn new(config: MachineConfig, radius: f32) -> Self {
        Self {
            machine: TraversalStateMachine::new(config),
            input: InputSnapshot::default(),
            requested: None,
            auto_enter: false,
            radius,
            grounded: true,
            flags: SolverFlags::default(),
            exit_velocity: Vec3::ZERO,
        }
    }

    /// Let look-at discovery enter paths whenever the actor is free.
    #[must_use]
    pub const fn with_auto_enter(mut self, auto_enter: bool) -> Self {
        self.auto_enter = auto_enter;
        self
    }

    /// Enter `path` on the next update.
    pub const fn request_entry(&mut self, path: PathId) {
        self.requested = Some(path);
    }

    /// Input for the next update. A jump is consumed by that update.
    pub const fn set_input(&mut self, input: InputSnapshot) {
        self.input = input;
    }

    /// Report whether locomotion has the actor on the ground.
    pub const fn set_grounded(&mut self, grounded: bool) {
        self.grounded = grounded;
    }

    /// Phase of the actor's machine.
    #[must_use]
    pub fn phase(&self) -> TraversalPhase {
        self.machine.phase()
    }

    /// Path the actor is on, if any.
    #[must_use]
    pub fn active_path(&self) -> Option<PathId> {
        self.machine.active_path()
    }

    /// Velocity handed back by the most recent exit.
    #[must_use]
    pub const fn exit_velocity(&self) -> Vec3 {
        self.exit_velocity
    }

    /// Whether locomotion currently owns collision solving.
    #[must_use]
    pub const fn solving_enabled(&self) -> bool {
        self.flags.capsule_collisions && self.flags.movement_solving && self.flags.ground_solving
    }
}

/// Motor view over an entity's `Transform` for the duration of one update.
struct TransformMotor<'a> {
    transform: &'a mut Transform,
    initial_position: Vec3,
    radius: f32,
    grounded: bool,
    flags: &'a mut SolverFlags,
    colliders: &'a [StaticCollider],
}

impl Motor for TransformMotor<'_> {
    fn transient_position(&self) -> Vec3 {
        self.transform.translation
    }

    fn transient_rotation(&self) -> Quat {
        self.transform.rotation
    }

    fn initial_simulation_position(&self) -> Vec3 {
        self.initial_position
    }

    fn character_up(&self) -> Vec3 {
        self.transform.rotation * Vec3::Y
    }

    fn is_stable_on_ground(&self) -> bool {
        self.grounded && self.flags.ground_solving
    }

    fn set_position(&mut self, position: Vec3) {
        self.transform.translation = position;
        self.initial_position = position;
    }

    fn set_transient_position(&mut self, position: Vec3) {
        self.transform.translation = position;
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.transform.rotation = rotation;
    }

    fn collisions_overlap(&self, position: Vec3, _rotation: Quat) -> Vec<Overlap> {
        self.colliders
            .iter()
            .filter(|collider| collider.bounds.intersects_sphere(position, self.radius))
            .map(|collider| Overlap {
                collider: collider.id,
                owner: collider.owner,
            })
            .collect()
    }

    fn set_capsule_collisions(&mut self, enabled: bool) {
        self.flags.capsule_collisions = enabled;
    }

    fn set_movement_collision_solving(&mut self, enabled: bool) {
        self.flags.movement_solving = enabled;
    }

    fn set_ground_solving(&mut self, enabled: bool) {
        self.flags.ground_solving = enabled;
    }

    fn is_alive(&self) -> bool {
        true
    }
}

/// A traversal event raised by one entity's machine.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct TraversalNotice {
    /// Entity whose machine raised the event.
    pub entity: Entity,
    /// What happened.
    pub event: TraversalEvent,
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn log_traversal_notice(notice: On<TraversalNotice>) {
    let TraversalNotice { entity, event } = notice.event();
    match event {
        TraversalEvent::Aborted { reason } => warn!("{entity}: traversal aborted ({reason:?})"),
        TraversalEvent::Entered { path } => info!("{entity}: entered {path}"),
        TraversalEvent::Exited { path, velocity } => {
            info!("{entity}: exited {path} with velocity {velocity}");
        }
        _ => debug!("{entity}: {event:?}"),
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
fn tick_traversers(
    mut commands: Commands,
    time: Res<Time>,
    mut registry: ResMut<PathRegistry>,
    mut traversers: Query<(Entity, &mut Traverser, &mut Transform), Without<ColliderBox>>,
    colliders: Query<(Entity, &Transform, &ColliderBox), Without<Traverser>>,
) {
    let dt = time.delta_secs();
    let blockers: Vec<StaticCollider> = colliders
        .iter()
        .map(|(entity, transform, collider)| collider.to_static(entity, transform))
        .collect();
    let graph = &mut registry.0;

    for (entity, mut handle, mut transform) in &mut traversers {
        let traverser = &mut *handle;
        let raycaster = PathRaycaster::new(graph).with_blockers(blockers.iter().copied());
        let initial_position = transform.translation;
        let mut motor = TransformMotor {
            transform: &mut transform,
            initial_position,
            radius: traverser.radius,
            grounded: traverser.grounded,
            flags: &mut traverser.flags,
            colliders: &blockers,
        };

        let mut entry = traverser.requested.take();
        if entry.is_none()
            && traverser.auto_enter
            && traverser.machine.phase() == TraversalPhase::None
        {
            entry = discover_by_look_at(
                graph,
                &raycaster,
                &motor,
                &traverser.input,
                traverser.machine.config().traversable_layers,
            )
            .map(|decision| decision.path);
        }
        if let Some(path) = entry {
            if let Err(error) = traverser.machine.change_path(graph, &mut motor, path) {
                warn!("{entity}: cannot enter {path}: {error}");
            }
        }

        traverser.machine.set_inputs(graph, traverser.input);
        traverser.input.jump_performed = false;
        let report = traverser.machine.tick(graph, &mut motor, &raycaster, dt);
        if report.ended() {
            traverser.exit_velocity = report.velocity;
        }
        for event in report.events {
            commands.trigger(TraversalNotice { entity, event });
        }
    }
}

/// Installs the path registry, the traversal system and notice logging.
#[derive(Debug, Default)]
pub struct TraversalPlugin;

impl Plugin for TraversalPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PathRegistry>();
        app.add_observer(log_traversal_notice);
        app.add_systems(Update, tick_traversers);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::curve::Curve;
    use crate::path::{BoundaryBehaviour, Path};
    use crate::transform::WorldTransform;
    use bevy::time::TimeUpdateStrategy;

    #[derive(Resource, Default)]
    struct Seen(Vec<TraversalEvent>);

    fn rail() -> Path {
        let curve = Curve::from_points([Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0)], false)
            .expect("valid curve");
        Path::new(PathId(1), vec![curve], WorldTransform::IDENTITY)
            .expect("valid path")
            .with_boundary(BoundaryBehaviour::Exit)
    }

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, TraversalPlugin));
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)));
        app.insert_resource(PathRegistry(
            PathGraph::from_paths([rail()]).expect("valid graph"),
        ));
        app.init_resource::<Seen>();
        app.add_observer(|notice: On<TraversalNotice>, mut seen: ResMut<Seen>| {
            seen.0.push(notice.event().event);
        });
        app
    }

    fn spawn_traverser(app: &mut App, at: Vec3) -> Entity {
        let mut traverser = Traverser::new(MachineConfig::default(), 0.4);
        traverser.request_entry(PathId(1));
        app.world_mut()
            .spawn((traverser, Transform::from_translation(at)))
            .id()
    }

    fn traverser(app: &App, entity: Entity) -> &Traverser {
        app.world().get::<Traverser>(entity).expect("traverser")
    }

    #[test]
    fn requested_entry_anchors_onto_the_path() {
        let mut app = app();
        let entity = spawn_traverser(&mut app, Vec3::new(1.0, 1.0, 5.0));
        for _ in 0..15 {
            app.update();
        }
        assert_eq!(traverser(&app, entity).phase(), TraversalPhase::Traversing);
        assert!(!traverser(&app, entity).solving_enabled());
        let transform = app.world().get::<Transform>(entity).expect("transform");
        assert!(transform.translation.distance(Vec3::new(0.0, 0.0, 5.0)) < 1e-3);
        let seen = &app.world().resource::<Seen>().0;
        assert_eq!(seen.first(), Some(&TraversalEvent::Entered { path: PathId(1) }));
        assert!(seen.contains(&TraversalEvent::AnchorComplete { path: PathId(1) }));
    }

    #[test]
    fn forward_input_rides_to_the_exit() {
        let mut app = app();
        let entity = spawn_traverser(&mut app, Vec3::new(0.0, 0.0, 8.0));
        for _ in 0..15 {
            app.update();
        }
        for _ in 0..10 {
            app.world_mut()
                .get_mut::<Traverser>(entity)
                .expect("traverser")
                .set_input(InputSnapshot::from_camera(Vec3::Z, Vec3::Z));
            app.update();
        }
        assert_eq!(traverser(&app, entity).phase(), TraversalPhase::None);
        assert!(traverser(&app, entity).solving_enabled());
        assert!(app
            .world()
            .resource::<Seen>()
            .0
            .iter()
            .any(|event| matches!(event, TraversalEvent::Exited { path: PathId(1), .. })));
    }

    #[test]
    fn unknown_entry_request_is_ignored() {
        let mut app = app();
        let mut traverser_component = Traverser::new(MachineConfig::default(), 0.4);
        traverser_component.request_entry(PathId(9));
        let entity = app
            .world_mut()
            .spawn((traverser_component, Transform::default()))
            .id();
        app.update();
        assert_eq!(traverser(&app, entity).phase(), TraversalPhase::None);
        assert!(app.world().resource::<Seen>().0.is_empty());
    }
}
