//! Interactive viewer for the cantilever.
//!
//! Each frame samples keys and the pointer into a [`FrameInput`], advances
//! the simulation with it, then draws the resulting [`FrameView`].

use cantilever_core::{format_sim_error, Command, FrameInput, FrameView, SimConfig, Simulation};
use eframe::egui;
use glam::Vec2;

const KEY_COMMANDS: [(egui::Key, Command); 6] = [
    (egui::Key::R, Command::Reset),
    (egui::Key::Num0, Command::IncreaseStiffness),
    (egui::Key::Num9, Command::DecreaseStiffness),
    (egui::Key::Space, Command::TogglePause),
    (egui::Key::D, Command::ToggleDamping),
    (egui::Key::P, Command::RunOnce),
];

/// Open the viewer window and block until it closes.
pub fn launch(config: SimConfig) -> Result<(), Box<dyn std::error::Error>> {
    let sim = Simulation::new(config)?;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([800.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native(
        "mass-spring system",
        options,
        Box::new(|_cc| Ok(Box::new(ViewerApp::new(sim)))),
    )?;
    Ok(())
}

/// Maps the unit square (y up) onto the largest square that fits the canvas
#[derive(Debug, Clone, Copy)]
struct WorldFrame {
    origin: egui::Pos2,
    side: f32,
}

impl WorldFrame {
    fn fit(rect: egui::Rect) -> Self {
        let side = rect.width().min(rect.height());
        let center = rect.center();
        Self {
            origin: egui::pos2(center.x - side / 2.0, center.y + side / 2.0),
            side,
        }
    }

    fn to_screen(&self, p: Vec2) -> egui::Pos2 {
        egui::pos2(self.origin.x + p.x * self.side, self.origin.y - p.y * self.side)
    }

    fn to_world(&self, p: egui::Pos2) -> Vec2 {
        Vec2::new(
            (p.x - self.origin.x) / self.side,
            (self.origin.y - p.y) / self.side,
        )
    }
}

pub struct ViewerApp {
    sim: Simulation,
    last_error: Option<String>,
}

impl ViewerApp {
    pub fn new(sim: Simulation) -> Self {
        Self {
            sim,
            last_error: None,
        }
    }

    fn sample_input(ctx: &egui::Context, response: &egui::Response, frame: WorldFrame) -> FrameInput {
        let mut input = FrameInput::new();
        ctx.input(|i| {
            for (key, command) in KEY_COMMANDS {
                if i.key_pressed(key) {
                    input.commands.push(command);
                }
            }
            if i.pointer.primary_down() {
                input.pointer = i
                    .pointer
                    .interact_pos()
                    .filter(|pos| response.rect.contains(*pos))
                    .map(|pos| frame.to_world(pos));
            }
        });
        input
    }

    fn advance(&mut self, input: &FrameInput) {
        if input.commands.contains(&Command::Reset) {
            self.last_error = None;
        }
        if let Err(e) = self.sim.advance(input) {
            ftlog::error!("{}", e);
            self.last_error = Some(format_sim_error(&e));
            self.sim.set_paused(true);
        }
    }

    fn draw(painter: &egui::Painter, frame: WorldFrame, view: &FrameView<'_>) {
        let spring = egui::Stroke::new(1.0, egui::Color32::from_rgb(0xFF, 0xFF, 0x00));
        for [a, b] in view.edges {
            painter.line_segment(
                [
                    frame.to_screen(view.positions[*a]),
                    frame.to_screen(view.positions[*b]),
                ],
                spring,
            );
        }

        painter.line_segment(
            [
                frame.to_screen(Vec2::new(view.wall_x, 0.0)),
                frame.to_screen(Vec2::new(view.wall_x, 1.0)),
            ],
            egui::Stroke::new(4.0, egui::Color32::WHITE),
        );

        if let Some(pick) = view.pick {
            painter.circle_filled(
                frame.to_screen(pick.center),
                pick.radius * frame.side,
                egui::Color32::from_rgb(0xFF, 0x88, 0x88),
            );
        }

        let lines = [
            format!("9/0: (-/+) Young's Modulus {:.1}", view.stiffness),
            format!("D: Damping {}", if view.damping { "On" } else { "Off" }),
            format!("Space: {}", if view.paused { "Paused" } else { "Running" }),
            format!("Energy {:.3}", view.energy.total()),
        ];
        for (row, line) in lines.iter().enumerate() {
            painter.text(
                frame.to_screen(Vec2::new(0.6, 0.9 - 0.025 * row as f32)),
                egui::Align2::LEFT_TOP,
                line,
                egui::FontId::default(),
                egui::Color32::WHITE,
            );
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        // Bottom panel for faults
        if let Some(ref error) = self.last_error {
            egui::TopBottomPanel::bottom("errors").show(ctx, |ui| {
                ui.label(egui::RichText::new(error).color(egui::Color32::RED));
            });
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
                let frame = WorldFrame::fit(response.rect);

                let input = Self::sample_input(ctx, &response, frame);
                self.advance(&input);
                Self::draw(&painter, frame, &self.sim.view());
            });

        // Keep animating so key presses and drags are seen every frame
        ctx.request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_frame_round_trip() {
        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(800.0, 600.0));
        let frame = WorldFrame::fit(rect);
        let p = Vec2::new(0.25, 0.75);
        let back = frame.to_world(frame.to_screen(p));
        assert!((back - p).length() < 1e-5);
        // y up: world origin is the bottom-left of the square
        assert_eq!(frame.to_screen(Vec2::ZERO), egui::pos2(100.0, 600.0));
    }
}
