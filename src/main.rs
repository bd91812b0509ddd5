use anyhow::{anyhow, Result};
use clap::Parser;
use crossbeam_channel::{unbounded, Receiver};
use eframe::Frame;
use egui::{Context, SidePanel, TopBottomPanel, ViewportCommand};
use simple_logger::SimpleLogger;
use sinusoidal_wave_generator::config::AppConfig;
use sinusoidal_wave_generator::dialogs::{self, SaveTarget, StatusMessage};
use sinusoidal_wave_generator::export;
use sinusoidal_wave_generator::menu_bar::{self, MenuAction};
use sinusoidal_wave_generator::parameter_form::{FormAction, ParameterForm};
use sinusoidal_wave_generator::wave_plotter::{PlotOutcome, WavePlotter};
use sinusoidal_wave_generator::WaveformSampler;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Interactive damped sine wave plotter
#[derive(Parser, Debug)]
#[command(name = "sinusoidal-wave-generator")]
#[command(about = "Plot a damped, phase delayed sine wave and export it", long_about = None)]
struct Args {
    /// Configuration file (YAML)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Overrides the configured log level (error, warn, info, debug, trace)
    #[arg(short = 'l', long = "log-level")]
    log_level: Option<String>,
}

#[derive(Debug, Clone, Copy)]
enum WaveEvent {
    EquationChanged,
}

struct App {
    sampler: WaveformSampler,
    plotter: WavePlotter,
    form: ParameterForm,
    events: Receiver<WaveEvent>,
    status: Option<StatusMessage>,
    export_error: Option<String>,
    raise_error: bool,
}

impl App {
    fn new(config: &AppConfig) -> Self {
        let mut sampler = WaveformSampler::new();

        let (sender, events) = unbounded();
        sampler.on_change(move |_| {
            // The receiver lives as long as the app
            let _ = sender.send(WaveEvent::EquationChanged);
        });

        let mut plotter = WavePlotter::new("Equation", config.plot.style(), config.plot.size());
        plotter.load_series(sampler.samples());

        let form = ParameterForm::new(
            sampler.parameters(),
            plotter.style(),
            plotter.size(),
            config.max_samples,
        );

        App {
            sampler,
            plotter,
            form,
            events,
            status: None,
            export_error: None,
            raise_error: false,
        }
    }

    fn handle_form_action(&mut self, action: FormAction) {
        match action {
            FormAction::Parameter(edit) => {
                if let Err(e) = self.form.submit(&mut self.sampler, edit) {
                    self.status = Some(StatusMessage::new(format!("Change refused: {}", e)));
                }
            }
            FormAction::PlotSize(size) => self.plotter.set_size(size),
            FormAction::LineStyle(line_style) => self.plotter.set_line_style(line_style),
            FormAction::Color(color) => self.plotter.set_color(color),
        }
    }

    fn handle_menu_action(&mut self, ctx: &Context, action: MenuAction) {
        match action {
            MenuAction::SaveImage => {
                if let Some(path) = dialogs::pick_save_file(SaveTarget::Image) {
                    self.save_image(&path);
                }
            }
            MenuAction::ExportSamples => {
                if let Some(path) = dialogs::pick_save_file(SaveTarget::Samples) {
                    self.export_samples(&path);
                }
            }
            MenuAction::Exit => ctx.send_viewport_cmd(ViewportCommand::Close),
        }
    }

    fn save_image(&mut self, path: &Path) {
        let [width, height] = self.plotter.size();
        let result = export::save_png(
            path,
            self.plotter.series(),
            &self.plotter.style(),
            (width as u32, height as u32),
        );

        match result {
            Ok(()) => {
                self.status = Some(StatusMessage::new(format!("Graph saved to {}", path.display())));
            }
            Err(e) => {
                log::error!("Saving graph to {} failed: {}", path.display(), e);
                self.status = Some(StatusMessage::new(format!(
                    "Error trying to save graph to {}",
                    path.display()
                )));
                self.report_error(e.to_string());
            }
        }
    }

    fn export_samples(&mut self, path: &Path) {
        match export::save_csv(path, self.sampler.samples()) {
            Ok(()) => {
                self.status = Some(StatusMessage::new(format!("Samples saved to {}", path.display())));
            }
            Err(e) => {
                log::error!("Exporting samples to {} failed: {}", path.display(), e);
                self.status = Some(StatusMessage::new(format!(
                    "Error trying to save samples to {}",
                    path.display()
                )));
                self.report_error(e.to_string());
            }
        }
    }

    fn report_error(&mut self, message: String) {
        self.export_error = Some(message);
        self.raise_error = true;
    }

    /// Reloads the plot and the form once per frame if the equation changed.
    fn drain_events(&mut self) {
        let mut changed = false;
        for event in self.events.try_iter() {
            match event {
                WaveEvent::EquationChanged => changed = true,
            }
        }

        if changed {
            self.plotter.load_series(self.sampler.samples());
            self.form.refresh(self.sampler.parameters());
        }
    }

    fn render_status_bar(&mut self, ctx: &Context) {
        if self
            .status
            .as_ref()
            .is_some_and(|status| status.is_expired(Instant::now()))
        {
            self.status = None;
        }

        TopBottomPanel::bottom("status_bar").show(ctx, |ui| match &self.status {
            Some(status) => status.render(ui),
            None => {
                ui.label("");
            }
        });

        if self.status.is_some() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }

    fn render_error_dialog(&mut self, ctx: &Context) {
        if let Some(message) = &self.export_error {
            let dialog = dialogs::error_dialog(ctx, "export_error", message);
            if self.raise_error {
                dialog.open();
                self.raise_error = false;
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        let menu_action = menu_bar::render(
            ctx,
            &mut self.form.show_advanced,
            &mut self.form.show_visualization,
        );

        let mut form_actions = vec![];
        SidePanel::left("parameters").resizable(false).show(ctx, |ui| {
            form_actions = self.form.render(ui);
        });

        for action in form_actions {
            self.handle_form_action(action);
        }

        if let Some(action) = menu_action {
            self.handle_menu_action(ctx, action);
        }

        self.drain_events();
        self.render_status_bar(ctx);

        if self.plotter.render(ctx) == PlotOutcome::EscapeUnhandled {
            ctx.send_viewport_cmd(ViewportCommand::Close);
        }

        self.render_error_dialog(ctx);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    if let Some(level) = args.log_level {
        config.log_level = level;
        config.validate()?;
    }

    SimpleLogger::new().with_level(config.level_filter()?).init()?;
    log::info!("Starting with {:?}", config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height]),
        ..Default::default()
    };

    eframe::run_native(
        "Sinusoidal Wave Generator",
        options,
        Box::new(move |_cc| Ok(Box::new(App::new(&config)))),
    )
    .map_err(|e| anyhow!("Failed to run the user interface: {}", e))
}
