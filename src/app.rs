use std::sync::Arc;
use std::time::Duration;
use eframe::egui::{self, Align2, Button, RichText, ScrollArea, ViewportCommand};
use eframe::Frame;

use super::config::Config;
use super::lifelog::LifeLog;
use super::logsource::{BufferSource, CommandSource, LogSource};
use super::screen::ScreenId;
use super::session::Session;
use super::store::StatusStore;

pub const APP_NAME: &str = "Triptych";

pub const APP_HEADER_PADDING: f32 = 12.0;
const LOG_PANEL_MAX_HEIGHT: f32 = 320.0;

/// What the user clicked this frame; applied after the UI closures so the
/// session isn't mutated while it's being rendered.
enum Action {
    Navigate(ScreenId),
    OpenDialog,
    CloseDialog,
    Finish,
}

/// Application root: owns the session and renders whichever screen is on
/// top of the back stack.
pub struct App {
    session: Session,
    banner: String,
}

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config, store: Arc<dyn StatusStore>) -> Self {
        let log = Arc::new(LifeLog::new(config.log_capacity));
        let source: Arc<dyn LogSource> = match &config.log_command {
            Some(command) => Arc::new(CommandSource::from_command_line(command)),
            None => Arc::new(BufferSource::new(log.clone())),
        };

        // Pollers queue a refresh signal, then wake the frame loop.
        let ctx = cc.egui_ctx.clone();
        let waker = Arc::new(move || ctx.request_repaint());

        let mut session = Session::new(
            store,
            log,
            source,
            Duration::from_millis(config.poll_interval_ms),
            waker,
        );
        // Entered via the launcher: no caller tag, screen A.
        session.launch_root(ScreenId::A);

        Self {
            session,
            banner: format!("Welcome to {} ver. {}", APP_NAME, env!("CARGO_PKG_VERSION")),
        }
    }

    fn apply(&mut self, action: Action, ctx: &egui::Context) {
        match action {
            Action::Navigate(to) => self.session.navigate(to),
            Action::OpenDialog => self.session.open_dialog(),
            Action::CloseDialog => self.session.close_dialog(),
            Action::Finish => {
                if !self.session.finish() {
                    ctx.send_viewport_cmd(ViewportCommand::Close);
                }
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        ctx.set_pixels_per_point(1.2);
        self.session.pump();

        let mut action: Option<Action> = None;
        let dialog_open = self.session.dialog_open();

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(screen) = self.session.active() else {
                ui.label("No screen on the stack.");
                return;
            };

            ui.heading(format!("Screen {}", screen.id));
            ui.add_space(APP_HEADER_PADDING);

            // Everything below is inert while the dialog is up.
            ui.add_enabled_ui(!dialog_open, |ui| {
                ui.horizontal(|ui| {
                    for target in screen.id.others() {
                        let label = RichText::new(format!("Start {target}")).strong();
                        if ui.add(Button::new(label).fill(screen.id.accent())).clicked() {
                            action = Some(Action::Navigate(target));
                        }
                    }
                    if ui.button("Open dialog").clicked() {
                        action = Some(Action::OpenDialog);
                    }
                    if ui.button(format!("Finish {}", screen.id)).clicked() {
                        action = Some(Action::Finish);
                    }
                });
            });

            ui.separator();
            ui.heading("Screen states");
            ui.label(&screen.status_text);

            ui.separator();
            ui.heading("Lifecycle log");
            ScrollArea::vertical()
                .id_salt("lifecycle_log_scroll")
                .max_height(LOG_PANEL_MAX_HEIGHT)
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    ui.label(RichText::new(&screen.log_text).monospace());
                });

            ui.separator();
            ui.label(&self.banner);
        });

        if dialog_open {
            egui::Window::new("Dialog")
                .collapsible(false)
                .resizable(false)
                .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label("The screen underneath is paused.");
                    if ui.button("Close").clicked() {
                        action = Some(Action::CloseDialog);
                    }
                });
        }

        if let Some(action) = action {
            self.apply(action, ctx);
        }
    }
}
