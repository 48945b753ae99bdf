use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::simulation::scenario::Scenario;
use crate::visualization::{cursor_position, to_world};

/// Drawn radius of a rope particle
const PARTICLE_RADIUS: f32 = 5.0;

/// Left press grabs, release drops, right click deletes, P toggles a pin
pub fn rope_input(
    mut scenario: ResMut<Scenario>,
    mouse: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    if mouse.just_released(MouseButton::Left) {
        scenario.springs.end_drag();
    }

    let Some(cursor) = cursor_position(&windows) else {
        return;
    };
    let radius = scenario.pick_radius;

    if mouse.just_pressed(MouseButton::Left) {
        scenario.springs.begin_drag(&cursor, radius);
    }

    if mouse.just_pressed(MouseButton::Right) {
        if let Some(h) = scenario.springs.pick(&cursor, radius) {
            scenario.springs.remove_particle(h);
        }
    }

    if keys.just_pressed(KeyCode::KeyP) {
        if let Some(h) = scenario.springs.pick(&cursor, radius) {
            let pinned = scenario.springs.toggle_pin(h);
            log::info!("particle {} pinned: {:?}", h.index(), pinned);
        }
    }
}

/// Runs after the physics step so the grabbed particle ends the frame under
/// the cursor
pub fn rope_follow_cursor(mut scenario: ResMut<Scenario>, windows: Query<&Window, With<PrimaryWindow>>) {
    if scenario.springs.dragged.is_none() {
        return;
    }
    if let Some(cursor) = cursor_position(&windows) {
        scenario.springs.drag_to(cursor);
    }
}

pub fn draw_rope(scenario: Res<Scenario>, mut gizmos: Gizmos) {
    let params = &scenario.parameters;

    for (a, b) in scenario.springs.segments() {
        gizmos.line_2d(to_world(&a, params), to_world(&b, params), Color::WHITE);
    }

    for p in scenario.springs.particles.values() {
        let color = if p.pinned {
            Color::srgb(1.0, 0.0, 0.0)
        } else {
            Color::srgb(0.0, 0.0, 1.0)
        };
        gizmos.circle_2d(to_world(&p.x, params), PARTICLE_RADIUS, color);
    }
}
