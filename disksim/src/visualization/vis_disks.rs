use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::window::PrimaryWindow;

use crate::simulation::scenario::Scenario;
use crate::visualization::{cursor_position, to_color, to_world};

#[derive(Component)]
pub struct BodyIndex(pub usize);

#[derive(Component)]
pub struct AttractorIndex(pub usize);

/// Drawn radius of an attraction point marker
const MARKER_RADIUS: f32 = 5.0;

pub fn setup_disks(
    mut commands: Commands,
    scenario: Res<Scenario>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let params = &scenario.parameters;

    for (i, body) in scenario.system.bodies.iter().enumerate() {
        commands.spawn((
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(meshes.add(Circle::new(body.radius as f32))),
                material: materials.add(ColorMaterial::from(to_color(body.color))),
                transform: Transform::from_translation(to_world(&body.x, params).extend(0.0)),
                ..Default::default()
            },
            BodyIndex(i),
        ));
    }

    // obstacles sit behind the disks and never move
    for o in &scenario.obstacles {
        commands.spawn(MaterialMesh2dBundle {
            mesh: Mesh2dHandle(meshes.add(Circle::new(o.radius as f32))),
            material: materials.add(ColorMaterial::from(Color::srgb(0.35, 0.35, 0.4))),
            transform: Transform::from_translation(to_world(&o.center, params).extend(-1.0)),
            ..Default::default()
        });
    }
}

/// Left click appends an attraction point at the cursor
pub fn disk_input(
    mut scenario: ResMut<Scenario>,
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    if let Some(cursor) = cursor_position(&windows) {
        scenario.add_attraction_point(cursor);
    }
}

/// Spawn a red marker for every attraction point that does not have one yet
pub fn spawn_attractor_markers(
    mut commands: Commands,
    scenario: Res<Scenario>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut spawned: Local<usize>,
) {
    let points = &scenario.system.attractors;
    if *spawned >= points.len() {
        return;
    }

    let mesh = Mesh2dHandle(meshes.add(Circle::new(MARKER_RADIUS)));
    let material = materials.add(ColorMaterial::from(Color::srgb(1.0, 0.0, 0.0)));
    for (i, p) in points.iter().enumerate().skip(*spawned) {
        commands.spawn((
            MaterialMesh2dBundle {
                mesh: mesh.clone(),
                material: material.clone(),
                transform: Transform::from_translation(to_world(&p.x, &scenario.parameters).extend(1.0)),
                ..Default::default()
            },
            AttractorIndex(i),
        ));
    }
    *spawned = points.len();
}

pub fn sync_disks(scenario: Res<Scenario>, mut query: Query<(&BodyIndex, &mut Transform)>) {
    for (BodyIndex(i), mut transform) in &mut query {
        if let Some(b) = scenario.system.bodies.get(*i) {
            let p = to_world(&b.x, &scenario.parameters);
            transform.translation.x = p.x;
            transform.translation.y = p.y;
        }
    }
}
