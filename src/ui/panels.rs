use eframe::egui::{self, Color32, RichText, Slider, Ui};

use crate::data::model::SiteSelector;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – site dropdown and payload range
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    let Some(store) = &state.store else {
        ui.label("No dataset loaded.");
        return;
    };
    let sites = store.distinct_sites().to_vec();
    let (min_payload, max_payload) = (store.min_payload_kg(), store.max_payload_kg());

    // ---- Site dropdown ----
    ui.strong("Launch Site");
    egui::ComboBox::from_id_salt("site_dropdown")
        .width(ui.available_width())
        .selected_text(state.selector.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut state.selector, SiteSelector::AllSites, "All Sites");
            for site in &sites {
                let choice = SiteSelector::Site(site.clone());
                ui.selectable_value(&mut state.selector, choice, site.as_str());
            }
        });
    ui.add_space(8.0);

    // ---- Payload range ----
    ui.strong("Payload range (Kg):");
    let bounds = state.slider;
    let mut low = state.range.low;
    let mut high = state.range.high;
    if ui
        .add(Slider::new(&mut low, bounds.min..=bounds.max).step_by(bounds.step).text("from"))
        .changed()
    {
        state.set_range_low(low);
    }
    if ui
        .add(Slider::new(&mut high, bounds.min..=bounds.max).step_by(bounds.step).text("to"))
        .changed()
    {
        state.set_range_high(high);
    }
    if ui.small_button("Reset to data range").clicked() {
        state.set_range_low(min_payload);
        state.set_range_high(max_payload);
    }
    if state.selector == SiteSelector::AllSites {
        ui.label(RichText::new("The range applies to a single site only.").weak());
    }
    ui.separator();

    ui.label(format!("Payload in data: {min_payload:.0} – {max_payload:.0} kg"));

    // Recompute charts after any control change.
    state.refresh();
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.store.is_some();
            if ui.add_enabled(can_export, egui::Button::new("Export view…")).clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(store) = &state.store {
            ui.label(format!(
                "{} launches from {} sites, {} in view",
                store.len(),
                store.distinct_sites().len(),
                state.points.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(store) => {
                log::info!(
                    "Loaded {} launch records from {} with sites {:?}",
                    store.len(),
                    path.display(),
                    store.distinct_sites()
                );
                state.set_store(store);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export current view")
        .set_file_name("launch_view.json")
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        match state.write_snapshot(&path) {
            Ok(()) => log::info!("Exported view to {}", path.display()),
            Err(e) => {
                log::error!("Failed to export view: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
