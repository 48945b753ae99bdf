//! Bevy window for the animations
//!
//! The simulation works in window pixels (origin top-left, y down); the 2D
//! camera is centered with y up, so everything drawn goes through
//! [`to_world`].

use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResolution};

use crate::simulation::engine::Mode;
use crate::simulation::params::Parameters;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::{NVec2, Rgba};

pub mod vis_disks;
pub mod vis_rope;
pub mod vis_particles;
pub mod hud;

pub fn run_window(scenario: Scenario) {
    let mode = scenario.engine.mode;
    let width = scenario.parameters.width as f32;
    let height = scenario.parameters.height as f32;
    log::info!("run_window: starting {:?} viewer ({}x{})", mode, width, height);

    let title = match mode {
        Mode::Disks => "Disk simulation",
        Mode::Rope => "Spring rope",
        Mode::Particles => "Particle system",
    };

    let mut app = App::new();
    app.insert_resource(scenario)
        .insert_resource(ClearColor(Color::BLACK))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: title.into(),
                resolution: WindowResolution::new(width, height),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .add_systems(Startup, (setup_camera, vis_disks::setup_disks, hud::setup_hud))
        .add_systems(
            Update,
            (
                vis_disks::disk_input.run_if(in_mode(Mode::Disks)),
                vis_rope::rope_input.run_if(in_mode(Mode::Rope)),
                vis_particles::particle_input.run_if(in_mode(Mode::Particles)),
                physics_step_system,
                vis_rope::rope_follow_cursor.run_if(in_mode(Mode::Rope)),
                vis_disks::spawn_attractor_markers,
                vis_disks::sync_disks,
                vis_rope::draw_rope,
                vis_particles::draw_particles,
                hud::update_hud,
            )
                .chain(),
        );
    app.run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2dBundle::default());
}

fn physics_step_system(mut scenario: ResMut<Scenario>) {
    let report = scenario.step();
    if report.collisions > 0 {
        log::trace!("step {}: {} collisions", scenario.steps, report.collisions);
    }
}

/// Run condition: the scenario is in `mode`
fn in_mode(mode: Mode) -> impl Fn(Res<Scenario>) -> bool + Clone {
    move |scenario: Res<Scenario>| scenario.engine.mode == mode
}

/// Simulation pixels -> camera world coordinates
pub fn to_world(x: &NVec2, params: &Parameters) -> Vec2 {
    Vec2::new(
        x.x as f32 - params.width as f32 / 2.0,
        params.height as f32 / 2.0 - x.y as f32,
    )
}

pub fn to_color(c: Rgba) -> Color {
    Color::srgba_u8(c[0], c[1], c[2], c[3])
}

/// Cursor in simulation pixels, if it is over the window
pub fn cursor_position(windows: &Query<&Window, With<PrimaryWindow>>) -> Option<NVec2> {
    let window = windows.get_single().ok()?;
    let p = window.cursor_position()?;
    Some(NVec2::new(p.x as f64, p.y as f64))
}
