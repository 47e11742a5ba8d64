//! Trajectory replay viewer
//!
//! Plays a finished run back as a 2D animation (x/y plane) that lasts the
//! configured animation duration. Each body is a circle sized by its radius
//! relative to the largest body and drawn in its own color.

use bevy::log::LogPlugin;
use bevy::math::primitives::Circle;
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};

use crate::simulation::trajectory::Trajectory;

/// Half the visible width in screen units; the widest excursion maps here
const VIEW_HALF_EXTENT: f64 = 400.0;

/// Marker radius range in screen units
const MAX_MARKER: f32 = 12.0;
const MIN_MARKER: f32 = 2.0;

/// Component tagging each marker with its track index in the trajectory
#[derive(Component)]
struct TrackIndex(pub usize);

#[derive(Resource)]
struct Replay {
    trajectory: Trajectory,
    frame_interval: f32, // real seconds per recorded step
    scale: f64,          // screen units per meter
    elapsed: f32,
}

impl Replay {
    fn frame(&self) -> usize {
        // no repeat: hold the last frame once the replay is over
        let last = self.trajectory.len().saturating_sub(1);
        ((self.elapsed / self.frame_interval) as usize).min(last)
    }
}

/// Open a window and replay `trajectory` over `animation_duration` seconds
pub fn run_replay(trajectory: Trajectory, animation_duration: f64) {
    if trajectory.is_empty() {
        tracing::warn!("trajectory is empty, nothing to replay");
        return;
    }

    let frames = trajectory.len();
    // at least one millisecond per frame
    let frame_interval = (animation_duration / frames as f64).max(1e-3) as f32;

    let extent = trajectory.extent();
    let scale = if extent > 0.0 { VIEW_HALF_EXTENT / extent } else { 1.0 };

    tracing::info!(frames, bodies = trajectory.body_count(), frame_interval, "starting replay");

    App::new()
        .insert_resource(Replay {
            trajectory,
            frame_interval,
            scale,
            elapsed: 0.0,
        })
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "orbitsim".into(),
                        ..Default::default()
                    }),
                    ..Default::default()
                })
                // tracing is already installed by the binary
                .disable::<LogPlugin>(),
        )
        .add_systems(Startup, setup_markers_system)
        .add_systems(Update, advance_replay_system)
        .run();
}

fn setup_markers_system(mut commands: Commands, replay: Res<Replay>, mut meshes: ResMut<Assets<Mesh>>, mut materials: ResMut<Assets<ColorMaterial>>) {
    commands.spawn(Camera2dBundle::default());

    let max_radius = replay.trajectory.max_radius();

    for (i, track) in replay.trajectory.tracks().iter().enumerate() {
        let Some(first) = track.samples.first() else {
            continue;
        };

        let relative = if max_radius > 0.0 { (first.radius / max_radius) as f32 } else { 1.0 };
        let radius_screen = (MAX_MARKER * relative).max(MIN_MARKER);
        let color = Color::srgb_u8(first.color.0, first.color.1, first.color.2);

        commands.spawn((
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(meshes.add(Circle::new(radius_screen))),
                material: materials.add(ColorMaterial::from(color)),
                transform: Transform::from_xyz(
                    (first.x.x * replay.scale) as f32,
                    (first.x.y * replay.scale) as f32,
                    i as f32, // later bodies draw on top
                ),
                ..Default::default()
            },
            TrackIndex(i),
        ));
    }
}

fn advance_replay_system(time: Res<Time>, mut replay: ResMut<Replay>, mut query: Query<(&TrackIndex, &mut Transform)>) {
    replay.elapsed += time.delta_seconds();
    let frame = replay.frame();

    for (TrackIndex(i), mut transform) in &mut query {
        if let Some(s) = replay.trajectory.tracks().get(*i).and_then(|t| t.samples.get(frame)) {
            transform.translation.x = (s.x.x * replay.scale) as f32;
            transform.translation.y = (s.x.y * replay.scale) as f32;
        }
    }
}
