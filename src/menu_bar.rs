use egui::{menu, Context, TopBottomPanel};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    SaveImage,
    ExportSamples,
    Exit,
}

/// Draws File and View menus. The View toggles are bound straight to the
/// form's group visibility flags.
pub fn render(ctx: &Context, show_advanced: &mut bool, show_visualization: &mut bool) -> Option<MenuAction> {
    let mut action = None;

    TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Save to file...").clicked() {
                    action = Some(MenuAction::SaveImage);
                    ui.close_menu();
                }
                if ui.button("Export samples...").clicked() {
                    action = Some(MenuAction::ExportSamples);
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Exit").clicked() {
                    action = Some(MenuAction::Exit);
                    ui.close_menu();
                }
            });

            ui.menu_button("View", |ui| {
                ui.checkbox(show_advanced, "Advanced features");
                ui.checkbox(show_visualization, "Visualization features");
            });
        });
    });

    action
}
