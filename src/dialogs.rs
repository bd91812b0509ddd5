use eframe::epaint::Color32;
use egui::{Align, Context, RichText, Ui};
use egui_modal::{Icon, Modal, ModalStyle};
use rfd::FileDialog;
use std::path::PathBuf;
use std::time::{Duration, Instant};

const STATUS_TIMEOUT: Duration = Duration::from_secs(5);

/// What a save dialog is asking for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveTarget {
    Image,
    Samples,
}

impl SaveTarget {
    fn filter(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            SaveTarget::Image => ("Images", &["png"]),
            SaveTarget::Samples => ("Samples", &["csv"]),
        }
    }

    fn default_file_name(&self) -> &'static str {
        match self {
            SaveTarget::Image => "equation.png",
            SaveTarget::Samples => "equation.csv",
        }
    }

    /// Appends the expected extension when the user left it out.
    pub fn with_extension(&self, path: PathBuf) -> PathBuf {
        let (_, extensions) = self.filter();
        if path.extension().is_some() {
            path
        } else {
            path.with_extension(extensions[0])
        }
    }
}

/// Opens the native save dialog in the executable's directory.
pub fn pick_save_file(target: SaveTarget) -> Option<PathBuf> {
    let (name, extensions) = target.filter();

    let mut dialog = FileDialog::new()
        .set_title("Save to file")
        .add_filter(name, extensions)
        .set_file_name(target.default_file_name());

    if let Some(directory) = std::env::current_exe().ok().and_then(|exe| exe.parent().map(PathBuf::from)) {
        dialog = dialog.set_directory(directory);
    }

    dialog.save_file().map(|path| target.with_extension(path))
}

/// A message shown in the status bar until it expires.
#[derive(Clone, Debug)]
pub struct StatusMessage {
    text: String,
    expires_at: Instant,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>) -> Self {
        StatusMessage {
            text: text.into(),
            expires_at: Instant::now() + STATUS_TIMEOUT,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    pub fn render(&self, ui: &mut Ui) {
        ui.label(RichText::new(&self.text).small());
    }
}

/// Builds and shows the modal used to report a failure. Call `open()` on the
/// result to raise it.
pub fn error_dialog(ctx: &Context, id: &str, message: &str) -> Modal {
    let style = ModalStyle {
        body_margin: 30.0,
        frame_margin: 0.0,
        icon_margin: 10.0,
        icon_size: 40.0,
        error_icon_color: Color32::RED,
        warning_icon_color: Color32::YELLOW,
        body_alignment: Align::Center,
        ..Default::default()
    };

    let dialog = Modal::new(ctx, id).with_style(&style);

    dialog.show(|ui| {
        dialog.title(ui, "Save to file");
        dialog.frame(ui, |ui| {
            dialog.body_and_icon(ui, message, Icon::Error);
        });
        dialog.buttons(ui, |ui| {
            if dialog.button(ui, "Ok").clicked() {
                dialog.close();
            }
        });
    });

    dialog
}
