use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, Plot};

use sales_lens::data::aggregate::AggregationResult;
use sales_lens::fmt;
use sales_lens::state::AppState;

const CHART_HEIGHT: f32 = 260.0;
const AGE_BAR_COLOR: Color32 = Color32::from_rgb(70, 130, 180);

// ---------------------------------------------------------------------------
// Metrics and charts (central panel, top half)
// ---------------------------------------------------------------------------

/// Render the summary metrics and the two breakdown charts.
pub fn summary_view(ui: &mut Ui, state: &AppState) {
    if state.table.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view transactions  (File → Open…)");
        });
        return;
    }

    let summary = &state.summary;

    ui.horizontal(|ui: &mut Ui| {
        metric(
            ui,
            &format!("Total Sales ({})", state.currency),
            &fmt::amount(summary.total_sales),
        );
        ui.add_space(48.0);
        metric(
            ui,
            "Number of Transactions",
            &summary.transaction_count.to_string(),
        );
    });
    ui.separator();

    ui.columns(2, |cols: &mut [Ui]| {
        cols[0].strong("Sales by Category");
        category_chart(&mut cols[0], state);

        cols[1].strong("Sales by Age Group");
        age_chart(&mut cols[1], summary, &state.currency);
    });
}

fn metric(ui: &mut Ui, label: &str, value: &str) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(label);
        ui.label(RichText::new(value).size(28.0).strong());
    });
}

fn no_data(ui: &mut Ui) {
    ui.allocate_ui([ui.available_width(), CHART_HEIGHT].into(), |ui: &mut Ui| {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No data for selected filters");
        });
    });
}

// ---------------------------------------------------------------------------
// Bar charts
// ---------------------------------------------------------------------------

fn category_chart(ui: &mut Ui, state: &AppState) {
    let summary = &state.summary;
    if summary.is_empty() {
        no_data(ui);
        return;
    }

    let bars: Vec<Bar> = summary
        .sales_by_category
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let color = state
                .category_colors
                .as_ref()
                .map_or(AGE_BAR_COLOR, |cm| cm.color_for(&c.category));
            Bar::new(i as f64, c.total)
                .name(&c.category)
                .fill(color)
                .width(0.7)
        })
        .collect();
    let labels: Vec<String> = summary
        .sales_by_category
        .iter()
        .map(|c| c.category.clone())
        .collect();

    bar_plot(ui, "sales_by_category", bars, labels, &state.currency);
}

fn age_chart(ui: &mut Ui, summary: &AggregationResult, currency: &str) {
    if summary.is_empty() {
        no_data(ui);
        return;
    }

    let bars: Vec<Bar> = summary
        .sales_by_age_group
        .iter()
        .enumerate()
        .map(|(i, g)| {
            Bar::new(i as f64, g.total)
                .name(g.bucket.label())
                .fill(AGE_BAR_COLOR)
                .width(0.7)
        })
        .collect();
    let labels = summary
        .sales_by_age_group
        .iter()
        .map(|g| g.bucket.label().to_string())
        .collect();

    bar_plot(ui, "sales_by_age_group", bars, labels, currency);
}

/// Static bar plot with one labelled tick per bar.
fn bar_plot(ui: &mut Ui, id: &str, bars: Vec<Bar>, labels: Vec<String>, currency: &str) {
    Plot::new(id)
        .height(CHART_HEIGHT)
        .y_axis_label(format!("Sales ({currency})"))
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}
