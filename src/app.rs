use eframe::egui::{self, Align, Color32, Layout, RichText, Ui};

use crate::state::AppState;
use crate::ui::{charts, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: AppState,
}

impl LaunchDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: dropdown + payload range ----
        egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: records in view ----
        if self.state.store.is_some() {
            egui::TopBottomPanel::bottom("records_panel")
                .default_height(180.0)
                .resizable(true)
                .show(ctx, |ui| {
                    table::records_table(ui, &self.state);
                });
        }

        // ---- Central panel: pie over scatter ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard(ui, &self.state);
        });
    }
}

fn dashboard(ui: &mut Ui, state: &AppState) {
    ui.with_layout(Layout::top_down(Align::Center), |ui: &mut Ui| {
        ui.label(
            RichText::new("SpaceX Launch Records Dashboard")
                .size(28.0)
                .color(Color32::from_rgb(0x50, 0x3D, 0x36)),
        );
    });
    ui.separator();

    if state.store.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a launch table to begin  (File → Open…)");
        });
        return;
    }

    // Two stacked charts share what is left, minus their title rows.
    let chart_height = ((ui.available_height() - 60.0) / 2.0).max(120.0);
    charts::success_pie(ui, state, chart_height);
    ui.add_space(8.0);
    charts::payload_scatter(ui, state, chart_height);
}
