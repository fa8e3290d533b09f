//! Headless scene viewer
//!
//! Loads a scene file and a viewer configuration, then runs a fixed-step
//! frame loop: scripted camera input, animation update, bounding pass and a
//! culled draw into a recording pipeline. Frame statistics are logged every
//! `report_interval` frames.
//!
//! Usage: `scene_viewer [scene.ron] [viewer.toml]`

use scene_engine::config::{Config, ConfigError, ViewerConfig};
use scene_engine::foundation::logging;
use scene_engine::foundation::math::Vec3;
use scene_engine::foundation::time::{FrameClock, Stopwatch};
use scene_engine::input::{CameraController, InputManager, KeyCode, MouseButton};
use scene_engine::render::{DrawFlags, Mesh, MeshError, MeshLibrary, MeshSource, RecordingPipeline};
use scene_engine::scene::{FrameStats, Scene, SceneDescription, SceneError};

const DEFAULT_SCENE: &str = "scenes/solar_system.ron";
const DEFAULT_CONFIG: &str = "viewer.toml";

/// Errors that stop the viewer
#[derive(Debug, thiserror::Error)]
enum ViewerError {
    #[error("Failed to load {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: ConfigError,
    },

    #[error("Invalid viewer configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to build scene: {0}")]
    Scene(#[from] SceneError),
}

/// Stands in for a model loader: every path resolves to a unit octahedron
struct PlaceholderMeshSource;

impl MeshSource for PlaceholderMeshSource {
    fn load(&mut self, path: &str) -> Result<Mesh, MeshError> {
        log::debug!("Generating placeholder mesh for {}", path);
        let positions = vec![
            Vec3::x(),
            -Vec3::x(),
            Vec3::y(),
            -Vec3::y(),
            Vec3::z(),
            -Vec3::z(),
        ];
        let normals = positions.clone();
        let indices = vec![
            0, 2, 4, 4, 2, 1, 1, 2, 5, 5, 2, 0, //
            4, 3, 0, 1, 3, 4, 5, 3, 1, 0, 3, 5,
        ];
        Mesh::new(path, positions, normals, indices)
    }
}

/// One scripted input change applied at the start of a frame
enum ScriptedInput {
    Key(KeyCode, bool),
    Button(MouseButton, bool),
    Cursor(f64, f64),
}

/// Camera tour: zoom in, orbit left, drag upward, back off
const SCRIPT: &[(u64, ScriptedInput)] = &[
    (30, ScriptedInput::Key(KeyCode::Z, true)),
    (90, ScriptedInput::Key(KeyCode::Z, false)),
    (120, ScriptedInput::Key(KeyCode::Left, true)),
    (240, ScriptedInput::Key(KeyCode::Left, false)),
    (260, ScriptedInput::Cursor(640.0, 360.0)),
    (261, ScriptedInput::Button(MouseButton::Left, true)),
    (270, ScriptedInput::Cursor(640.0, 300.0)),
    (280, ScriptedInput::Cursor(660.0, 260.0)),
    (281, ScriptedInput::Button(MouseButton::Left, false)),
    (400, ScriptedInput::Key(KeyCode::X, true)),
    (460, ScriptedInput::Key(KeyCode::X, false)),
];

struct ViewerApp {
    config: ViewerConfig,
    scene: Scene,
    pipeline: RecordingPipeline,
    controller: CameraController,
    input: InputManager,
    clock: FrameClock,
    flags: DrawFlags,
}

impl ViewerApp {
    fn new(config: ViewerConfig, scene_path: &str) -> Result<Self, ViewerError> {
        config.validate().map_err(ViewerError::InvalidConfig)?;

        let mut description = SceneDescription::load_from_file(scene_path).map_err(|source| ViewerError::Config {
            path: scene_path.to_string(),
            source,
        })?;
        // The viewer's window wins over the one in the scene file
        description.window = config.window;

        let mut meshes = MeshLibrary::new(Box::new(PlaceholderMeshSource));
        let scene = description.build(&mut meshes, config.camera_limits)?;
        log::info!("Loaded {} ({} distinct meshes)", scene_path, meshes.len());

        Ok(Self {
            controller: CameraController::new(config.camera_controls),
            input: InputManager::new(),
            clock: FrameClock::fixed(config.time_step),
            flags: config.overlays.draw_flags(),
            pipeline: RecordingPipeline::new(),
            scene,
            config,
        })
    }

    fn run(&mut self) {
        log::info!(
            "Running {} frames at {:.4}s per step with {:?}",
            self.config.frames,
            self.config.time_step,
            self.flags
        );
        let stopwatch = Stopwatch::start_new();
        let mut totals = FrameStats::default();

        for _ in 0..self.config.frames {
            let dt = self.clock.tick();
            self.apply_script(self.clock.frame_count());

            self.controller.update(&mut self.input, self.scene.camera_mut(), dt);
            self.scene.update(self.clock.total_time());
            let stats = self.scene.draw(&mut self.pipeline, self.flags);

            totals.entities_drawn += stats.entities_drawn;
            totals.entities_total += stats.entities_total;
            if self.config.report_interval > 0 && self.clock.frame_count() % u64::from(self.config.report_interval) == 0 {
                self.report(&stats);
            }
        }

        log::info!(
            "Finished {} frames in {:.1}ms wall time, {} of {} entity draws culled",
            self.clock.frame_count(),
            stopwatch.elapsed_millis(),
            totals.entities_culled(),
            totals.entities_total
        );
    }

    fn apply_script(&mut self, frame: u64) {
        for (_, event) in SCRIPT.iter().filter(|(at, _)| *at == frame) {
            match *event {
                ScriptedInput::Key(key, pressed) => self.input.handle_key_input(key, pressed),
                ScriptedInput::Button(button, pressed) => self.input.handle_mouse_button(button, pressed),
                ScriptedInput::Cursor(x, y) => self.input.handle_mouse_move(x, y),
            }
        }
    }

    fn report(&self, stats: &FrameStats) {
        let camera = self.scene.camera();
        let position = camera.position();
        log::info!(
            "t={:.2}s {} camera at ({:.2}, {:.2}, {:.2}): drew {}/{} entities, {} commands, {} triangles so far",
            self.clock.total_time(),
            camera.kind_name(),
            position.x,
            position.y,
            position.z,
            stats.entities_drawn,
            stats.entities_total,
            self.pipeline.commands().len(),
            self.pipeline.triangles_submitted()
        );
        if let Some(bounds) = self.scene.bounds() {
            log::debug!("Scene bounds: center {:?}, radius {:.2}", bounds.center, bounds.radius);
        }
    }
}

fn main() {
    let mut args = std::env::args().skip(1);
    let scene_path = args.next().unwrap_or_else(|| DEFAULT_SCENE.to_string());
    let config_path = args.next().unwrap_or_else(|| DEFAULT_CONFIG.to_string());

    let config = match ViewerConfig::load_or_default(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {config_path}: {e}");
            std::process::exit(1);
        }
    };
    logging::init(&config.log_level);

    match ViewerApp::new(config, &scene_path) {
        Ok(mut app) => app.run(),
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}
