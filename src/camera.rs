use bevy::camera::ScalingMode;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ClockCamera>()
            .add_systems(Startup, setup_camera);
    }
}

#[derive(Resource, Debug, Clone, Copy)]
pub struct ClockCamera {
    /// World units visible vertically, independent of window size
    pub viewport_height: f32,
    /// Distance from the camera to the clock plane
    pub distance: f32,
}

impl Default for ClockCamera {
    fn default() -> Self {
        Self {
            viewport_height: 8.0,
            distance: 10.0,
        }
    }
}

#[derive(Component)]
pub struct MainCamera;

/// Setup an orthographic camera looking at the XY plane
///
/// Coordinate System (right-handed, Y-up):
/// ```text
///        Y (up on screen)
///        ↑
///        |
///        +---→ X (right on screen)
///       /
///      ↙ Z (towards the viewer)
/// ```
///
/// The clock lives in the z ≈ 0 plane; the camera sits on +Z looking back at
/// the origin.
fn setup_camera(mut commands: Commands, clock_camera: Res<ClockCamera>) {
    let projection = Projection::Orthographic(OrthographicProjection {
        scaling_mode: ScalingMode::FixedVertical {
            viewport_height: clock_camera.viewport_height,
        },
        near: 0.0,
        far: clock_camera.distance * 2.0,
        ..OrthographicProjection::default_3d()
    });
    commands.spawn((
        Camera3d::default(),
        projection,
        // Particle colors come straight from the panel; skip tonemapping
        Tonemapping::None,
        Transform::from_xyz(0.0, 0.0, clock_camera.distance).looking_at(Vec3::ZERO, Vec3::Y),
        MainCamera,
    ));
}
