use cubesheet::cube_lut::CubeLut;
use cubesheet::file_handler;
use cubesheet::map_builder::build_map_image;
use cubesheet::rgb_cube::{Step, SUPPORTED_STEPS};
use eframe::{egui, App, NativeOptions};
use egui::IconData;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::{mpsc, Arc, Mutex},
    thread,
};

/// Application configuration, loaded from `config.toml`.
#[derive(Deserialize)]
struct Config {
    input: InputPaths,
    map: MapConfig,
}

/// Where photos come from and where graded results go.
#[derive(Deserialize)]
struct InputPaths {
    /// Directory containing photos to be graded
    image_dir: PathBuf,
    /// Directory where graded photos will be saved
    output: PathBuf,
}

/// Map image settings.
#[derive(Deserialize)]
struct MapConfig {
    /// File name of the map image selected at startup
    selected: String,
    /// Step preselected in the map generator
    default_step: u16,
}

/// Reads the application configuration from `config.toml`.
///
/// # Panics
/// Panics if `config.toml` cannot be read or parsed; the file ships with
/// the tool, so a missing one means a broken installation.
fn read_config() -> Config {
    let toml_str = fs::read_to_string("config.toml").expect("Failed to read config.toml");
    toml::from_str(&toml_str).expect("Failed to parse config.toml")
}

/// Loads the window icon, if the asset is present.
fn load_icon(path: &str) -> Option<IconData> {
    let img = image::open(path).ok()?.into_rgba8();
    let (width, height) = img.dimensions();
    Some(IconData {
        rgba: img.into_raw(),
        width,
        height,
    })
}

/// Lists the `.png` map images available in `map_dir`, sorted by name.
fn list_maps(map_dir: &Path) -> Vec<String> {
    let mut entries = Vec::new();
    if let Ok(read_dir) = fs::read_dir(map_dir) {
        for entry in read_dir.flatten() {
            let path = entry.path();
            if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
                if ext.eq_ignore_ascii_case("png") {
                    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                        entries.push(name.to_string());
                    }
                }
            }
        }
    }
    entries.sort();
    entries
}

/// GUI state for the cubesheet tool: paths, the discovered map images, and
/// the handle to whichever worker thread is currently running.
struct CubesheetApp {
    /// Directory containing photos to be graded
    image_input_dir: PathBuf,
    /// Directory where graded photos will be saved
    output_dir: PathBuf,
    /// Directory containing map images
    map_dir: PathBuf,
    /// Discovered map image file names
    available_maps: Vec<String>,
    /// Map image currently selected for grading
    current_map: String,
    /// Step currently selected in the map generator
    build_step: u16,
    /// Thread-safe log shown in the GUI
    status_log: Arc<Mutex<Vec<String>>>,
    /// Whether a worker thread is currently running
    is_busy: bool,
    /// Completion signal from the worker thread
    completion_rx: Option<mpsc::Receiver<()>>,
}

impl CubesheetApp {
    fn new() -> Self {
        let cfg = read_config();
        let map_dir = PathBuf::from("assets/maps");

        if !map_dir.exists() {
            if let Err(e) = fs::create_dir_all(&map_dir) {
                eprintln!(
                    "Warning: failed to create map directory at {}: {}",
                    map_dir.display(),
                    e
                );
            }
        }

        let maps = list_maps(&map_dir);
        CubesheetApp {
            image_input_dir: cfg.input.image_dir,
            output_dir: cfg.input.output,
            map_dir,
            available_maps: maps,
            current_map: cfg.map.selected,
            build_step: cfg.map.default_step,
            status_log: Arc::new(Mutex::new(Vec::new())),
            is_busy: false,
            completion_rx: None,
        }
    }

    /// Starts a worker that builds the map image for the selected step and
    /// saves it into the map directory.
    fn spawn_map_builder(&mut self) {
        let map_dir = self.map_dir.clone();
        let raw_step = self.build_step;
        let log_arc = self.status_log.clone();

        let (sender, receiver) = mpsc::channel::<()>();
        self.completion_rx = Some(receiver);
        self.is_busy = true;

        thread::spawn(move || {
            let log = |msg: String| {
                if let Ok(mut entries) = log_arc.lock() {
                    entries.push(msg);
                }
            };

            log(format!("Building map image for step {raw_step}..."));
            match Step::new(raw_step).and_then(build_map_image) {
                Ok(map) => {
                    let name = format!("cube-step{raw_step}.png");
                    let path = map_dir.join(&name);
                    log(format!(
                        "Built {}x{} map for step {raw_step}.",
                        map.width(),
                        map.height()
                    ));
                    match map.save(&path) {
                        Ok(()) => log(format!("Saved {}", path.display())),
                        Err(e) => log(format!("Error saving {}: {}", path.display(), e)),
                    }
                }
                Err(e) => log(format!("Error building map for step {raw_step}: {e}")),
            }

            let _ = sender.send(());
        });
    }

    /// Starts a worker that grades every photo in the input directory
    /// through the selected map image.
    fn spawn_grader(&mut self) {
        let map_path = self.map_dir.join(&self.current_map);
        let input_dir = self.image_input_dir.clone();
        let output_dir = self.output_dir.clone();
        let log_arc = self.status_log.clone();

        let (sender, receiver) = mpsc::channel::<()>();
        self.completion_rx = Some(receiver);
        self.is_busy = true;

        thread::spawn(move || {
            let log = |msg: String| {
                if let Ok(mut entries) = log_arc.lock() {
                    entries.push(msg);
                }
            };

            log(format!("Loading map image {}", map_path.display()));
            let lut = image::open(&map_path)
                .map_err(|e| e.to_string())
                .and_then(|img| CubeLut::from_image(&img.to_rgb8()).map_err(|e| e.to_string()));

            match lut {
                Ok(lut) => {
                    log(format!(
                        "Reconstructed {0}x{0}x{0} lookup cube.",
                        lut.edge()
                    ));
                    file_handler::process_images(&input_dir, &output_dir, &lut, log_arc.clone());
                }
                Err(e) => log(format!("Error loading map {}: {}", map_path.display(), e)),
            }

            let _ = sender.send(());
        });
    }
}

impl Default for CubesheetApp {
    fn default() -> Self {
        CubesheetApp::new()
    }
}

impl App for CubesheetApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check whether the worker thread has finished.
        if self.is_busy {
            if let Some(receiver) = &self.completion_rx {
                if matches!(
                    receiver.try_recv(),
                    Ok(()) | Err(mpsc::TryRecvError::Disconnected)
                ) {
                    self.is_busy = false;
                    self.completion_rx = None;
                    // A build may have added a map image.
                    self.available_maps = list_maps(&self.map_dir);
                }
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Cubesheet");

            // Map generation
            ui.horizontal(|ui| {
                ui.label("Step:");
                egui::ComboBox::from_label("step")
                    .selected_text(self.build_step.to_string())
                    .show_ui(ui, |ui| {
                        for step in SUPPORTED_STEPS {
                            ui.selectable_value(&mut self.build_step, step, step.to_string());
                        }
                    });
                if !self.is_busy && ui.button("Generate map image").clicked() {
                    self.spawn_map_builder();
                }
            });

            ui.separator();

            // Photo grading
            ui.horizontal(|ui| {
                ui.label("Map image:");
                egui::ComboBox::from_label("map")
                    .selected_text(&self.current_map)
                    .show_ui(ui, |ui| {
                        for map in &self.available_maps {
                            ui.selectable_value(&mut self.current_map, map.clone(), map);
                        }
                    });
            });

            if self.is_busy {
                ui.label("Working... please wait.");
            } else if ui.button("Grade photos").clicked() {
                self.spawn_grader();
            }

            // Status log
            ui.separator();
            ui.label("Log:");
            egui::ScrollArea::vertical().show(ui, |ui| {
                if let Ok(entries) = self.status_log.lock() {
                    for entry in entries.iter() {
                        ui.label(entry);
                    }
                }
            });
        });

        // Keep the UI responsive while a worker is running.
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

fn main() -> eframe::Result<()> {
    let mut native_options = NativeOptions::default();
    if let Some(icon) = load_icon("assets/icon.png") {
        native_options.viewport = native_options.viewport.with_icon(Arc::new(icon));
    }
    eframe::run_native(
        "Cubesheet",
        native_options,
        Box::new(|_cc| Ok(Box::new(CubesheetApp::default()))),
    )
}
