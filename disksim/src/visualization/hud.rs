//! Status text in the top-left corner
//!
//! Uses the scenario's font when one is configured (checked for existence
//! before the window opens), Bevy's built-in font otherwise.

use bevy::prelude::*;

use crate::simulation::scenario::Scenario;

#[derive(Component)]
pub struct HudText;

pub fn setup_hud(mut commands: Commands, asset_server: Res<AssetServer>, scenario: Res<Scenario>) {
    let font: Handle<Font> = scenario
        .engine
        .font
        .as_ref()
        .map(|path| asset_server.load(path.clone()))
        .unwrap_or_default();

    commands.spawn((
        TextBundle::from_section(
            scenario.status_line(),
            TextStyle {
                font,
                font_size: 16.0,
                color: Color::WHITE,
            },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Px(6.0),
            left: Val::Px(8.0),
            ..default()
        }),
        HudText,
    ));
}

pub fn update_hud(scenario: Res<Scenario>, mut query: Query<&mut Text, With<HudText>>) {
    for mut text in &mut query {
        text.sections[0].value = scenario.status_line();
    }
}
