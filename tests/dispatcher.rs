//! A hand-off is dispatched only when the path allows interaction, the jump
//! was pressed and the camera looks at another path.

mod common;

use common::{character_at, MockScene};
use glam::Vec3;
use railwalk::transition::has_traversal_interaction;
use railwalk::{
    InputSnapshot, LayerMask, LookAtHit, PathId, PathSettings, TraversalData, LOOK_AT_DISTANCE,
};
use rstest::rstest;
use test_utils::{graph_of, rail_along_z};

#[rstest]
#[case::all_conditions(true, true, Some(LookAtHit::Path(PathId(2))), true)]
#[case::interaction_disabled(false, true, Some(LookAtHit::Path(PathId(2))), false)]
#[case::no_jump(true, false, Some(LookAtHit::Path(PathId(2))), false)]
#[case::looking_at_nothing(true, true, None, false)]
#[case::looking_at_a_wall(true, true, Some(LookAtHit::Collider(railwalk::ColliderId(5))), false)]
#[case::looking_at_own_path(true, true, Some(LookAtHit::Path(PathId(1))), false)]
fn dispatch_requires_every_condition(
    #[case] allow_interaction: bool,
    #[case] jump: bool,
    #[case] hit: Option<LookAtHit>,
    #[case] fires: bool,
) {
    let from = rail_along_z(1, 0.0, 10.0).with_settings(PathSettings {
        allow_traversal_interaction: allow_interaction,
        interaction_range: 2.5,
        ..PathSettings::default()
    });
    let mut graph = graph_of([from, rail_along_z(2, 4.0, 10.0)]);
    let mut scene = MockScene::new();
    scene
        .expect_look_at()
        .withf(|query| {
            query.range == LOOK_AT_DISTANCE
                && query.radius == 2.5
                && query.exclude == vec![PathId(1)]
        })
        .times(usize::from(allow_interaction && jump))
        .return_const(hit);
    let motor = character_at(Vec3::new(0.0, 0.0, 5.0));
    let input = InputSnapshot::from_camera(Vec3::ZERO, Vec3::X)
        .with_camera(Vec3::new(0.0, 1.0, 5.0), Vec3::X)
        .with_jump(jump);

    let result = has_traversal_interaction(
        &mut graph,
        PathId(1),
        &TraversalData::at(0.5),
        &input,
        &scene,
        &motor,
        LayerMask::TRAVERSABLE,
    );

    assert_eq!(result.is_some(), fires);
    if let Some(result) = result {
        assert_eq!(result.from_path, PathId(1));
        assert_eq!(result.to_path, PathId(2));
        assert!(result.to_data.position.distance(Vec3::new(4.0, 0.0, 5.0)) < 1e-2);
    }
}
