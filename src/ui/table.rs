use eframe::egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::{FAILURE_COLOR, SUCCESS_COLOR};
use crate::data::summary::{FAILURE_LABEL, SUCCESS_LABEL};
use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Bottom panel – the records behind the scatter chart
// ---------------------------------------------------------------------------

pub fn records_table(ui: &mut Ui, state: &AppState) {
    ui.strong(format!("Records in view ({})", state.points.len()));

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Payload Mass (kg)");
            });
            header.col(|ui| {
                ui.strong("Outcome");
            });
            header.col(|ui| {
                ui.strong("Booster Version Category");
            });
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, state.points.len(), |mut row| {
                let p = &state.points[row.index()];
                row.col(|ui| {
                    ui.label(format!("{:.1}", p.payload_mass_kg));
                });
                row.col(|ui| {
                    let (text, color): (&str, Color32) = if p.outcome {
                        (SUCCESS_LABEL, SUCCESS_COLOR)
                    } else {
                        (FAILURE_LABEL, FAILURE_COLOR)
                    };
                    ui.label(RichText::new(text).color(color));
                });
                row.col(|ui| {
                    ui.label(p.booster_version_category.as_str());
                });
            });
        });
}
