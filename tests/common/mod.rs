//! Mock collaborators shared by the integration tests.

use glam::{Quat, Vec3};
use mockall::mock;
use railwalk::{InteractionQuery, LookAtHit, LookAtQuery, Motor, Overlap};

mock! {
    /// Character controller whose every call is scripted.
    pub Character {}

    impl Motor for Character {
        fn transient_position(&self) -> Vec3;
        fn transient_rotation(&self) -> Quat;
        fn initial_simulation_position(&self) -> Vec3;
        fn character_up(&self) -> Vec3;
        fn is_stable_on_ground(&self) -> bool;
        fn set_position(&mut self, position: Vec3);
        fn set_transient_position(&mut self, position: Vec3);
        fn set_rotation(&mut self, rotation: Quat);
        fn collisions_overlap(&self, position: Vec3, rotation: Quat) -> Vec<Overlap>;
        fn set_capsule_collisions(&mut self, enabled: bool);
        fn set_movement_collision_solving(&mut self, enabled: bool);
        fn set_ground_solving(&mut self, enabled: bool);
        fn is_alive(&self) -> bool;
    }
}

mock! {
    /// Scene answering look-at queries from a script.
    pub Scene {}

    impl InteractionQuery for Scene {
        fn look_at(&self, query: &LookAtQuery) -> Option<LookAtHit>;
    }
}

/// Character standing at `position` with an identity rotation.
pub fn character_at(position: Vec3) -> MockCharacter {
    let mut character = MockCharacter::new();
    character.expect_transient_position().return_const(position);
    character
        .expect_transient_rotation()
        .return_const(Quat::IDENTITY);
    character
}
