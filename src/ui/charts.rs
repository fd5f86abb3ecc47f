use std::f64::consts::TAU;

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::color::{outcome_color, ColorMap};
use crate::data::model::{CategoryBreakdown, SiteSelector};
use crate::state::AppState;

/// Largest angle drawn as one polygon; keeps every piece convex.
const MAX_WEDGE_ANGLE: f64 = TAU / 8.0;
/// Arc resolution.
const SEGMENTS_PER_TURN: f64 = 96.0;

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

pub fn pie_title(selector: &SiteSelector) -> String {
    match selector {
        SiteSelector::AllSites => "Successful Launches of all Sites".to_string(),
        SiteSelector::Site(name) => format!("{name} Site Success Breakdown"),
    }
}

/// Outline points of the unit-circle wedge between two fractions of a turn.
///
/// Slices start at twelve o'clock and run clockwise. Wide slices are split
/// into several convex pieces.
pub fn wedge_polygons(start: f64, end: f64) -> Vec<Vec<[f64; 2]>> {
    let angle_at = |fraction: f64| TAU / 4.0 - fraction * TAU;
    let sweep = (end - start) * TAU;
    if sweep <= 0.0 {
        return Vec::new();
    }

    let pieces = (sweep / MAX_WEDGE_ANGLE).ceil() as usize;
    let step = (end - start) / pieces as f64;

    (0..pieces)
        .map(|k| {
            let a0 = start + step * k as f64;
            let a1 = a0 + step;
            let segments = ((a1 - a0) * SEGMENTS_PER_TURN).ceil().max(1.0) as usize;
            let mut outline = Vec::with_capacity(segments + 2);
            outline.push([0.0, 0.0]);
            for s in 0..=segments {
                let theta = angle_at(a0 + (a1 - a0) * s as f64 / segments as f64);
                outline.push([theta.cos(), theta.sin()]);
            }
            outline
        })
        .collect()
}

/// Slice colour: outcome colours in a single-site pie, site colours otherwise.
fn slice_color(selector: &SiteSelector, site_colors: Option<&ColorMap>, label: &str) -> Color32 {
    let outcome = match selector {
        SiteSelector::Site(_) => outcome_color(label),
        SiteSelector::AllSites => None,
    };
    outcome
        .or_else(|| site_colors.map(|cm| cm.color_for(label)))
        .unwrap_or(Color32::GRAY)
}

/// Render the success breakdown as a pie.
pub fn success_pie(ui: &mut Ui, state: &AppState, height: f32) {
    ui.label(RichText::new(pie_title(&state.selector)).strong());

    let breakdown: &CategoryBreakdown = &state.breakdown;
    let total: usize = breakdown.iter().map(|s| s.count).sum();
    if total == 0 {
        ui.label("No launches to show.");
        return;
    }

    let colors = state.site_colors.as_ref();

    Plot::new("success_pie")
        .height(height)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.1)
        .include_x(1.1)
        .include_y(-1.1)
        .include_y(1.1)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            let mut start = 0.0;
            for slice in breakdown {
                let fraction = slice.count as f64 / total as f64;
                let end = start + fraction;
                let color = slice_color(&state.selector, colors, &slice.label);
                let name = format!("{} ({})", slice.label, slice.count);

                for outline in wedge_polygons(start, end) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::new(outline))
                            .name(&name)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, Color32::WHITE)),
                    );
                }

                if fraction > 0.0 {
                    let mid = TAU / 4.0 - (start + fraction / 2.0) * TAU;
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(0.6 * mid.cos(), 0.6 * mid.sin()),
                            RichText::new(format!("{:.1}%", fraction * 100.0))
                                .color(Color32::WHITE),
                        ),
                    );
                }
                start = end;
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

/// Payload mass vs. outcome, one series per booster category.
pub fn payload_scatter(ui: &mut Ui, state: &AppState, height: f32) {
    let Some(store) = &state.store else {
        return;
    };
    ui.label(RichText::new("Correlation between Payload and Success").strong());

    let colors = state.booster_colors.as_ref();

    Plot::new("payload_scatter")
        .height(height)
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("class")
        .include_x(state.slider.min)
        .include_x(state.slider.max)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for category in store.booster_categories() {
                let series: Vec<[f64; 2]> = state
                    .points
                    .iter()
                    .filter(|p| &p.booster_version_category == category)
                    .map(|p| [p.payload_mass_kg, if p.outcome { 1.0 } else { 0.0 }])
                    .collect();
                if series.is_empty() {
                    continue;
                }
                let color = colors.map_or(Color32::LIGHT_BLUE, |cm| cm.color_for(category));

                plot_ui.points(
                    Points::new(PlotPoints::new(series))
                        .name(category)
                        .color(color)
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(4.0),
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pie_titles() {
        assert_eq!(pie_title(&SiteSelector::AllSites), "Successful Launches of all Sites");
        assert_eq!(
            pie_title(&SiteSelector::Site("CCAFS LC-40".into())),
            "CCAFS LC-40 Site Success Breakdown"
        );
    }

    #[test]
    fn test_outcome_colors_only_in_single_site_pie() {
        use crate::color::{generate_palette, FAILURE_COLOR, SUCCESS_COLOR};

        let sites = ["Success".to_string(), "KSC LC-39A".to_string()];
        let cm = ColorMap::new(&sites);
        let palette = generate_palette(2);

        let all = SiteSelector::AllSites;
        assert_eq!(slice_color(&all, Some(&cm), "Success"), palette[0]);
        assert_ne!(slice_color(&all, Some(&cm), "Success"), SUCCESS_COLOR);
        assert_eq!(slice_color(&all, Some(&cm), "KSC LC-39A"), palette[1]);

        let one = SiteSelector::Site("Success".into());
        assert_eq!(slice_color(&one, Some(&cm), "Success"), SUCCESS_COLOR);
        assert_eq!(slice_color(&one, None, "Failure"), FAILURE_COLOR);
        assert_eq!(slice_color(&all, None, "Failure"), Color32::GRAY);
    }

    #[test]
    fn test_empty_wedge_has_no_polygons() {
        assert!(wedge_polygons(0.3, 0.3).is_empty());
    }

    #[test]
    fn test_full_turn_split_into_convex_pieces() {
        let pieces = wedge_polygons(0.0, 1.0);
        assert_eq!(pieces.len(), 8);
        for outline in &pieces {
            assert_eq!(outline[0], [0.0, 0.0]);
            for p in &outline[1..] {
                let r = (p[0] * p[0] + p[1] * p[1]).sqrt();
                assert!((r - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_first_wedge_starts_at_twelve_and_runs_clockwise() {
        let pieces = wedge_polygons(0.0, 0.1);
        assert_eq!(pieces.len(), 1);
        let outline = &pieces[0];
        let first = outline[1];
        assert!(first[0].abs() < 1e-9 && (first[1] - 1.0).abs() < 1e-9);
        let last = outline[outline.len() - 1];
        assert!(last[0] > 0.0, "clockwise from the top moves right");
    }
}
