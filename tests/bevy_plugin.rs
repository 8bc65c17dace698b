//! `TraversalPlugin` drives traverser entities through their `Transform`
//! and honours collider boxes.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use railwalk::{
    BoundaryBehaviour, ColliderBox, InputSnapshot, MachineConfig, PathGraph, PathId,
    PathRegistry, TraversalPhase, TraversalPlugin, Traverser,
};
use test_utils::rail_along_z;

fn app_with_rail() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins).add_plugins(TraversalPlugin);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)));
    let rail = rail_along_z(1, 0.0, 10.0).with_boundary(BoundaryBehaviour::Stay);
    app.insert_resource(PathRegistry(
        PathGraph::from_paths([rail]).expect("valid graph"),
    ));
    app
}

fn ride_forward(app: &mut App, collider: ColliderBox) -> Entity {
    app.world_mut()
        .spawn((collider, Transform::from_xyz(0.0, 0.0, 8.0)));
    let mut traverser = Traverser::new(MachineConfig::default(), 0.4);
    traverser.request_entry(PathId(1));
    let entity = app
        .world_mut()
        .spawn((traverser, Transform::from_xyz(0.0, 0.0, 5.0)))
        .id();
    for _ in 0..12 {
        app.update();
    }
    for _ in 0..20 {
        app.world_mut()
            .get_mut::<Traverser>(entity)
            .expect("traverser")
            .set_input(InputSnapshot::from_camera(Vec3::Z, Vec3::Z));
        app.update();
    }
    entity
}

fn translation(app: &App, entity: Entity) -> Vec3 {
    app.world()
        .get::<Transform>(entity)
        .expect("transform")
        .translation
}

#[test]
fn foreign_collider_stops_progress() {
    let mut app = app_with_rail();
    let entity = ride_forward(&mut app, ColliderBox::new(Vec3::splat(0.5)));

    let z = translation(&app, entity).z;
    assert!(z > 6.5 && z < 7.1, "expected to stop short of the box, got z = {z}");
    let traverser = app.world().get::<Traverser>(entity).expect("traverser");
    assert_eq!(traverser.phase(), TraversalPhase::Traversing);
}

#[test]
fn collider_owned_by_the_path_is_ignored() {
    let mut app = app_with_rail();
    let entity = ride_forward(
        &mut app,
        ColliderBox::new(Vec3::splat(0.5)).owned_by(PathId(1)),
    );

    assert!(translation(&app, entity).distance(Vec3::new(0.0, 0.0, 10.0)) < 1e-3);
}
