//! Interactive viewer for the simulator
//!
//! Draws the simulation snapshot every frame, routes clicks and the pause
//! key into the core's input queue, shows the property editor while paused,
//! and reloads the scene file when it changes on disk.

use eframe::egui;
use gravsim_core::{
    Body, BoundaryPolicy, Edit, EntityId, EntityKind, InputEvent, InputQueue, PointerButton,
    PressLatch, RenderSnapshot, Simulation,
};
use notify::{Event, RecommendedWatcher, Watcher};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Instant;

const REGULAR_MASS_RANGE: std::ops::RangeInclusive<f32> = 0.1..=1e6;
const HEAVY_MASS_RANGE: std::ops::RangeInclusive<f32> = 1.0..=1000.0;
const RADIUS_RANGE: std::ops::RangeInclusive<f32> = 0.01..=0.5;

pub fn run(scene: Option<PathBuf>, no_boundary: bool) -> Result<(), Box<dyn std::error::Error>> {
    // Fail early on a bad scene instead of opening an empty window
    let (sim, walls) = crate::load_simulation(scene.as_deref(), no_boundary)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title("Gravity Sim"),
        ..Default::default()
    };

    eframe::run_native(
        "Gravity Sim",
        options,
        Box::new(move |_cc| Ok(Box::new(ViewerApp::new(sim, walls, scene, no_boundary)))),
    )
    .map_err(|e| e.to_string())?;

    Ok(())
}

/// Maps normalized device coordinates onto the canvas rectangle
struct Viewport {
    rect: egui::Rect,
}

impl Viewport {
    fn to_screen(&self, p: glam::Vec2) -> egui::Pos2 {
        self.rect.center()
            + egui::vec2(p.x * self.rect.width() * 0.5, -p.y * self.rect.height() * 0.5)
    }

    fn to_ndc(&self, pos: egui::Pos2) -> glam::Vec2 {
        let x = (pos.x - self.rect.left()) / self.rect.width() * 2.0 - 1.0;
        let y = -((pos.y - self.rect.top()) / self.rect.height() * 2.0 - 1.0);
        glam::Vec2::new(x, y)
    }

    /// Radii are in NDC units of the vertical axis
    fn radius_px(&self, r: f32) -> f32 {
        r * self.rect.height() * 0.5
    }
}

fn color32(c: [f32; 3]) -> egui::Color32 {
    egui::Rgba::from_rgb(c[0], c[1], c[2]).into()
}

pub struct ViewerApp {
    sim: Simulation,
    /// Policy restored when the walls are switched back on
    walls: BoundaryPolicy,
    scene_path: Option<PathBuf>,
    no_boundary: bool,
    input: InputQueue,
    pause_latch: PressLatch,
    last_load_error: Option<String>,
    #[allow(dead_code)] // Kept alive to maintain file watching
    file_watcher: Option<RecommendedWatcher>,
    file_receiver: mpsc::Receiver<notify::Result<Event>>,
    needs_reload: bool,
}

impl ViewerApp {
    fn new(
        sim: Simulation,
        walls: BoundaryPolicy,
        scene_path: Option<PathBuf>,
        no_boundary: bool,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })
        .ok();

        if let (Some(w), Some(path)) = (watcher.as_mut(), scene_path.as_ref()) {
            if let Err(e) = w.watch(path, notify::RecursiveMode::NonRecursive) {
                log::warn!("not watching {}: {}", path.display(), e);
            }
        }

        Self {
            sim,
            walls,
            scene_path,
            no_boundary,
            input: InputQueue::new(),
            pause_latch: PressLatch::new(),
            last_load_error: None,
            file_watcher: watcher,
            file_receiver: rx,
            needs_reload: false,
        }
    }

    fn reload_scene(&mut self) {
        match crate::load_simulation(self.scene_path.as_deref(), self.no_boundary) {
            Ok((mut sim, walls)) => {
                sim.set_paused(self.sim.is_paused());
                sim.clock_mut().time_scale = self.sim.clock().time_scale;
                self.sim = sim;
                self.walls = walls;
                self.last_load_error = None;
            }
            Err(e) => {
                log::error!("scene reload failed: {}", e);
                self.last_load_error = Some(e.to_string());
            }
        }
    }

    fn check_file_changes(&mut self) {
        while let Ok(event) = self.file_receiver.try_recv() {
            match event {
                Ok(Event {
                    kind: notify::EventKind::Modify(_),
                    paths,
                    ..
                }) => {
                    if let Some(path) = &self.scene_path {
                        if paths.iter().any(|p| p.ends_with(path) || path.ends_with(p)) {
                            self.needs_reload = true;
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => log::warn!("file watcher error: {}", e),
            }
        }

        if self.needs_reload {
            self.reload_scene();
            self.needs_reload = false;
        }
    }

    fn collect_keys(&mut self, ctx: &egui::Context) {
        let space_down =
            !ctx.wants_keyboard_input() && ctx.input(|i| i.key_down(egui::Key::Space));
        if self.pause_latch.update(space_down) {
            self.input.push(InputEvent::TogglePause);
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let label = if self.sim.is_paused() { "▶ Play" } else { "⏸ Pause" };
            if ui.button(label).clicked() {
                self.input.push(InputEvent::TogglePause);
            }

            ui.separator();

            ui.label("Speed:");
            ui.add(egui::Slider::new(&mut self.sim.clock_mut().time_scale, 0.1..=10.0));

            ui.separator();

            let mut walls = self.sim.boundary().is_enabled();
            if ui.checkbox(&mut walls, "Walls").changed() {
                self.sim.set_boundary(if walls {
                    self.walls
                } else {
                    BoundaryPolicy::Open
                });
            }

            ui.separator();

            let store = self.sim.store();
            ui.label(format!(
                "Bodies: {}  Black holes: {}",
                store.regular().len(),
                store.heavy().len()
            ));
        });
    }

    fn canvas(&mut self, ui: &mut egui::Ui, snapshot: &RenderSnapshot) {
        let rect = ui.max_rect();
        let view = Viewport { rect };
        let response = ui.interact(rect, ui.id().with("canvas"), egui::Sense::click());

        if let Some(pos) = response.interact_pointer_pos() {
            let ctrl = ui.input(|i| i.modifiers.ctrl);
            let button = if response.secondary_clicked() {
                Some(PointerButton::Secondary)
            } else if response.middle_clicked() {
                Some(PointerButton::Middle)
            } else if response.clicked() {
                Some(PointerButton::Primary)
            } else {
                None
            };
            if let Some(button) = button {
                self.input.push(InputEvent::Pointer {
                    button,
                    pos: view.to_ndc(pos),
                    ctrl,
                });
            }
        }

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(13, 13, 13));

        for item in &snapshot.items {
            let center = view.to_screen(item.pos);
            let radius = view.radius_px(item.radius);

            match item.id.kind {
                EntityKind::Regular => {
                    painter.circle_filled(center, radius, color32(item.color));
                }
                EntityKind::Heavy => {
                    // Halo, then the event horizon
                    painter.circle_filled(center, radius * 1.5, color32(item.color));
                    painter.circle_filled(center, radius, egui::Color32::BLACK);
                }
            }

            if snapshot.selection == Some(item.id) {
                painter.circle_stroke(
                    center,
                    radius + 3.0,
                    egui::Stroke::new(1.5, egui::Color32::YELLOW),
                );
            }
        }

        if snapshot.paused {
            painter.text(
                rect.left_top() + egui::vec2(8.0, 8.0),
                egui::Align2::LEFT_TOP,
                "PAUSED",
                egui::FontId::proportional(16.0),
                egui::Color32::LIGHT_GRAY,
            );
        }
    }

    /// Property editor for the selected entity; edits are queued, not applied
    fn editor(&mut self, ctx: &egui::Context) {
        if !self.sim.is_paused() {
            return;
        }
        let (Some(id), Some(original)) = (self.sim.selection(), self.sim.selected_body().cloned())
        else {
            return;
        };

        let mut draft = original.clone();
        let mut delete = false;
        let title = match id.kind {
            EntityKind::Regular => "Edit Planet",
            EntityKind::Heavy => "Edit Black Hole",
        };

        let mut touched = false;
        egui::Window::new(title).show(ctx, |ui| {
            touched = edit_fields(ui, id, &mut draft);
            ui.separator();
            let label = match id.kind {
                EntityKind::Regular => "Delete Planet",
                EntityKind::Heavy => "Delete Black Hole",
            };
            delete = ui.button(label).clicked();
        });

        for edit in draft_edits(&original, &draft, touched) {
            if let Err(e) = self.sim.edit(edit) {
                log::warn!("edit rejected: {}", e);
            }
        }
        if delete {
            if let Err(e) = self.sim.delete_selected() {
                log::warn!("delete rejected: {}", e);
            }
        }
    }
}

/// Draw the editor widgets over `body`; true if the user changed any of them
///
/// Sliders don't clamp to their range, so a value outside it is shown as is
/// and only rewritten when the user drags it.
fn edit_fields(ui: &mut egui::Ui, id: EntityId, body: &mut Body) -> bool {
    let mut changed = ui.checkbox(&mut body.fixed, "Static").changed();

    let (range, text) = match id.kind {
        EntityKind::Regular => (REGULAR_MASS_RANGE, "Mass (kg)"),
        EntityKind::Heavy => (HEAVY_MASS_RANGE, "Mass (in solar masses)"),
    };
    changed |= ui
        .add(
            egui::Slider::new(&mut body.mass, range)
                .logarithmic(true)
                .clamp_to_range(false)
                .text(text),
        )
        .changed();
    changed |= ui
        .add(
            egui::Slider::new(&mut body.radius, RADIUS_RANGE)
                .clamp_to_range(false)
                .text("Radius"),
        )
        .changed();

    ui.horizontal(|ui| {
        ui.label("Position");
        changed |= ui.add(egui::DragValue::new(&mut body.pos.x).speed(0.01)).changed();
        changed |= ui.add(egui::DragValue::new(&mut body.pos.y).speed(0.01)).changed();
    });
    ui.horizontal(|ui| {
        ui.label("Velocity");
        changed |= ui.add(egui::DragValue::new(&mut body.vel.x).speed(0.01)).changed();
        changed |= ui.add(egui::DragValue::new(&mut body.vel.y).speed(0.01)).changed();
    });
    ui.horizontal(|ui| {
        ui.label("Color");
        changed |= ui.color_edit_button_rgb(&mut body.color).changed();
    });
    changed
}

/// Edits to submit for this frame's draft
///
/// Nothing is submitted unless the user touched a widget, so a draft that
/// differs only by widget display rounding never reaches the store.
fn draft_edits(before: &Body, after: &Body, touched: bool) -> Vec<Edit> {
    if touched {
        diff(before, after)
    } else {
        Vec::new()
    }
}

/// Field-level edits turning `before` into `after`
fn diff(before: &Body, after: &Body) -> Vec<Edit> {
    let mut edits = Vec::new();
    if before.fixed != after.fixed {
        edits.push(Edit::Fixed(after.fixed));
    }
    if before.mass != after.mass {
        edits.push(Edit::Mass(after.mass));
    }
    if before.radius != after.radius {
        edits.push(Edit::Radius(after.radius));
    }
    if before.pos != after.pos {
        edits.push(Edit::Position(after.pos));
    }
    if before.vel != after.vel {
        edits.push(Edit::Velocity(after.vel));
    }
    if before.color != after.color {
        edits.push(Edit::Color(after.color));
    }
    edits
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_file_changes();
        self.collect_keys(ctx);

        // Input gathered during the previous frame, then the physics step
        let events = self.input.drain();
        self.sim.handle_input(events);
        self.sim.frame(Instant::now());
        let snapshot = self.sim.snapshot();

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            self.controls(ui);
        });

        if let Some(error) = self.last_load_error.clone() {
            egui::TopBottomPanel::bottom("errors").show(ctx, |ui| {
                ui.set_max_height(100.0);
                ui.label(egui::RichText::new(format!("Error: {}", error)).color(egui::Color32::RED));
            });
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.canvas(ui, &snapshot);
            });

        self.editor(ctx);

        ctx.request_repaint();
    }
}
