use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::simulation::scenario::Scenario;
use crate::visualization::{cursor_position, to_color, to_world};

/// -1, 0 or +1 depending on which of the two keys is held; `neg` wins
fn axis(keys: &ButtonInput<KeyCode>, neg: KeyCode, pos: KeyCode) -> f64 {
    if keys.pressed(neg) {
        -1.0
    } else if keys.pressed(pos) {
        1.0
    } else {
        0.0
    }
}

/// Left click moves the attraction target, right click recolors particles
/// under the cursor, arrow keys blow wind
pub fn particle_input(
    mut scenario: ResMut<Scenario>,
    mouse: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    if let Some(cursor) = cursor_position(&windows) {
        if mouse.just_pressed(MouseButton::Left) {
            scenario.set_particle_target(cursor);
        }
        if mouse.just_pressed(MouseButton::Right) {
            let changed = scenario.recolor_particles_near(&cursor);
            log::debug!("recolored {} particles", changed);
        }
    }

    // screen y grows downward, so Up is negative
    let wx = axis(&keys, KeyCode::ArrowLeft, KeyCode::ArrowRight);
    let wy = axis(&keys, KeyCode::ArrowUp, KeyCode::ArrowDown);
    scenario.set_wind(wx, wy);
}

pub fn draw_particles(scenario: Res<Scenario>, mut gizmos: Gizmos) {
    let params = &scenario.parameters;

    for e in &scenario.emitters {
        for p in &e.particles {
            gizmos.circle_2d(to_world(&p.x, params), p.size as f32, to_color(p.color));
        }
    }

    if let Some(snow) = &scenario.snow {
        let flake = Color::srgba_u8(255, 255, 255, 200);
        for f in &snow.flakes {
            gizmos.circle_2d(to_world(&f.x, params), f.size as f32, flake);
        }
    }
}
