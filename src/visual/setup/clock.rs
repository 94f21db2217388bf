use bevy::camera::visibility::NoFrustumCulling;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::clock::layout::{Cell, CellKind, centering_offset, layout_cells};
use crate::clock::{ClockController, ClockSettings, SystemClock, WallClock};
use crate::visual::glyphs::GlyphTextures;
use crate::visual::material::{ParticleDigitMaterial, ParticleDigitUniform};
use crate::visual::particles::ParticleGrid;
use crate::visual::resize::ResizeDebouncer;

/// Depth step between draw-order neighbours so blending sorts predictably
const DRAW_ORDER_DEPTH: f32 = 0.001;

/// Marker for the entity that carries the clock's scale and centering
#[derive(Component)]
pub struct ClockRoot;

/// Which controller object an entity renders
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockObject {
    Digit(usize),
    Colon(usize),
}

/// Laid-out cells, kept for re-centering on resize
#[derive(Resource, Debug, Clone)]
pub struct ClockLayout {
    pub cells: Vec<Cell>,
}

/// Wall clock the ticker reads
#[derive(Resource)]
pub struct ClockSource(pub Box<dyn WallClock>);

impl Default for ClockSource {
    fn default() -> Self {
        Self(Box::new(SystemClock))
    }
}

/// Repeating timer that polls the wall clock
#[derive(Resource, Debug)]
pub struct ClockTicker(pub Timer);

/// Build the particle clock into the primary window.
///
/// Does nothing if there is no primary window to draw into.
#[allow(clippy::too_many_arguments)]
pub fn spawn_clock(
    mut commands: Commands,
    windows: Query<&Window, With<PrimaryWindow>>,
    settings: Res<ClockSettings>,
    source: Res<ClockSource>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut images: ResMut<Assets<Image>>,
    mut materials: ResMut<Assets<ParticleDigitMaterial>>,
    mut clear_color: ResMut<ClearColor>,
) {
    let Ok(window) = windows.single() else {
        debug!("No primary window, particle clock not mounted");
        return;
    };

    info!("🕒 Spawning particle clock...");

    let metrics = settings.layout.metrics();
    let cells = layout_cells(&metrics);

    let mut controller = ClockController::new(&settings);
    let scale = controller.on_resize(window.width());

    let [r, g, b] = controller.style().background.0;
    clear_color.0 = Color::srgb_u8(r, g, b);

    let colon_ratio = metrics.colon_width / metrics.digit_width.max(f32::EPSILON);
    let glyphs = GlyphTextures::from_settings(&settings.glyphs, colon_ratio, &mut images, &asset_server);

    let particles = settings.particles;
    let mut rng = StdRng::seed_from_u64(particles.seed);
    let colon_columns = ((particles.columns as f32 * colon_ratio).round() as u32).max(1);

    let digit_grid = ParticleGrid::new(
        particles.columns,
        particles.rows,
        metrics.digit_width,
        metrics.glyph_height,
        particles.jitter,
        &mut rng,
    );
    let colon_grid = ParticleGrid::new(
        colon_columns,
        particles.rows,
        metrics.colon_width,
        metrics.glyph_height,
        particles.jitter,
        &mut rng,
    );
    debug!(
        "Particles per digit: {}, per colon: {}",
        digit_grid.particle_count(),
        colon_grid.particle_count()
    );
    let digit_mesh = meshes.add(digit_grid.into_mesh());
    let colon_mesh = meshes.add(colon_grid.into_mesh());

    let root = commands
        .spawn((
            Transform::from_xyz(centering_offset(&cells, scale), 0.0, 0.0)
                .with_scale(Vec3::splat(scale)),
            Visibility::default(),
            ClockRoot,
            Name::new("Particle Clock"),
        ))
        .id();

    for cell in &cells {
        match cell.kind {
            CellKind::Digit(position) => {
                for index in [position * 2, position * 2 + 1] {
                    let material = materials.add(ParticleDigitMaterial {
                        data: ParticleDigitUniform::from(&controller.slots()[index].uniforms),
                        glyph: Handle::default(),
                    });
                    commands.spawn((
                        Mesh3d(digit_mesh.clone()),
                        MeshMaterial3d(material),
                        Transform::from_xyz(cell.center_x, 0.0, index as f32 * DRAW_ORDER_DEPTH),
                        Visibility::Hidden,
                        NoFrustumCulling,
                        ClockObject::Digit(index),
                        ChildOf(root),
                        Name::new(format!("Digit Slot {index}")),
                    ));
                }
            }
            CellKind::Colon(index) => {
                let material = materials.add(ParticleDigitMaterial {
                    data: ParticleDigitUniform::from(&controller.colons()[index].uniforms),
                    glyph: glyphs.colon.clone(),
                });
                commands.spawn((
                    Mesh3d(colon_mesh.clone()),
                    MeshMaterial3d(material),
                    Transform::from_xyz(cell.center_x, 0.0, 0.0),
                    Visibility::Hidden,
                    NoFrustumCulling,
                    ClockObject::Colon(index),
                    ChildOf(root),
                    Name::new(format!("Colon {index}")),
                ));
            }
        }
    }

    // First tick runs right away against the sentinel, revealing every digit
    let transitions = controller.update_displayed_time(source.0.now());
    info!(
        "Clock showing {} ({} digit transitions), scale={scale:.3}",
        controller.displayed(),
        transitions.len()
    );

    commands.insert_resource(ClockTicker(Timer::from_seconds(
        settings.timing.tick_interval,
        TimerMode::Repeating,
    )));
    commands.insert_resource(ResizeDebouncer::new(settings.timing.resize_debounce));
    commands.insert_resource(ClockLayout { cells });
    commands.insert_resource(glyphs);
    commands.insert_resource(controller);

    info!("✨ Particle clock spawned!");
}

/// Remove everything `spawn_clock` created
pub fn teardown_clock(mut commands: Commands, roots: Query<Entity, With<ClockRoot>>) {
    for root in &roots {
        commands.entity(root).despawn();
    }
    commands.remove_resource::<ClockController>();
    commands.remove_resource::<ClockTicker>();
    commands.remove_resource::<ResizeDebouncer>();
    commands.remove_resource::<ClockLayout>();
    commands.remove_resource::<GlyphTextures>();
    info!("Particle clock torn down");
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::clock::time_string::{ClockTime, FixedClock};

    /// Headless app with just the resources `spawn_clock` reads
    pub(crate) fn clock_app(settings: ClockSettings, with_window: bool) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Mesh>()
            .init_asset::<Image>()
            .init_asset::<ParticleDigitMaterial>()
            .init_resource::<ClearColor>()
            .insert_resource(settings)
            .insert_resource(ClockSource(Box::new(FixedClock(ClockTime::new(19, 9, 59)))))
            .add_systems(Startup, spawn_clock);
        if with_window {
            app.world_mut().spawn((Window::default(), PrimaryWindow));
        }
        app
    }

    #[test]
    fn test_no_window_mounts_nothing() {
        let mut app = clock_app(ClockSettings::default(), false);
        app.update();

        let world = app.world_mut();
        assert!(!world.contains_resource::<ClockController>());
        assert!(!world.contains_resource::<ClockTicker>());
        let roots = world.query_filtered::<Entity, With<ClockRoot>>().iter(world).count();
        assert_eq!(roots, 0);
    }

    #[test]
    fn test_spawns_every_object_under_a_centered_root() {
        let mut app = clock_app(ClockSettings::default(), true);
        app.update();

        let world = app.world_mut();
        let objects: Vec<ClockObject> = world.query::<&ClockObject>().iter(world).copied().collect();
        let digits = objects.iter().filter(|o| matches!(o, ClockObject::Digit(_))).count();
        let colons = objects.iter().filter(|o| matches!(o, ClockObject::Colon(_))).count();
        assert_eq!(digits, 12);
        assert_eq!(colons, 2);

        let width = world
            .query_filtered::<&Window, With<PrimaryWindow>>()
            .single(world)
            .unwrap()
            .width();
        let controller = world.resource::<ClockController>();
        let scale = controller.scale();
        assert_eq!(scale, ClockSettings::default().layout.scale_rule().scale_for_width(width));
        // Cold start moves all six positions, nines included
        assert_eq!(controller.displayed(), "190959");
        assert_eq!(controller.pending_reveals().len(), 6);

        let cells = world.resource::<ClockLayout>().cells.clone();
        let root = *world
            .query_filtered::<&Transform, With<ClockRoot>>()
            .single(world)
            .unwrap();
        assert_eq!(root.scale, Vec3::splat(scale));
        assert!((root.translation.x - centering_offset(&cells, scale)).abs() < 1e-6);

        // Centered: the scaled layout spans symmetrically around x = 0
        let (lo, hi) = crate::clock::layout::horizontal_bounds(&cells);
        let left = root.translation.x + lo * scale;
        let right = root.translation.x + hi * scale;
        assert!((left + right).abs() < 1e-4, "left {} right {}", left, right);
    }
}
