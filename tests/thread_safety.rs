//! Compile-time guarantees that traversal state can live in ECS storage and
//! that the collaborator traits stay object safe.

use railwalk::scenario::EntranceScenario;
use railwalk::transition::{InteractionResult, TransitionFactory, TransitionStrategy};
use railwalk::{
    InteractionQuery, KinematicMotor, LevelConfig, Motor, Path, PathGraph, PathRaycaster,
    TraversalStateMachine, Traverser,
};
use static_assertions::{assert_impl_all, assert_obj_safe};

assert_impl_all!(Path: Send, Sync);
assert_impl_all!(PathGraph: Send, Sync);
assert_impl_all!(TraversalStateMachine: Send, Sync);
assert_impl_all!(InteractionResult: Send, Sync);
assert_impl_all!(Traverser: Send, Sync);
assert_impl_all!(KinematicMotor: Send, Sync, Clone);
assert_impl_all!(PathRaycaster: Send, Sync, Clone);
assert_impl_all!(LevelConfig: Send, Sync, Clone);

assert_obj_safe!(Motor, InteractionQuery, EntranceScenario, TransitionFactory, TransitionStrategy);
