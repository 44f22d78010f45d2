use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Align2, Color32, FontId, Mesh, Pos2, RichText, Sense, Shape, Ui, vec2};
use egui_plot::{Bar, BarChart, GridMark, Plot};

use crate::color::ColorMap;
use crate::data::stats::{Histogram, JobTitleMean, ShareSlice};
use crate::format::{format_count, format_usd};

/// Shown instead of a chart when no record passes the filters.
pub const NO_DATA: &str = "Nenhum dado disponível para o gráfico.";

const CHART_HEIGHT: f32 = 320.0;
const BAR_COLOR: Color32 = Color32::from_rgb(99, 110, 250);

fn chart_title(ui: &mut Ui, title: &str) {
    ui.label(RichText::new(title).strong().size(16.0));
}

fn placeholder(ui: &mut Ui) {
    ui.label(NO_DATA);
}

// ---------------------------------------------------------------------------
// Top job titles (horizontal bars)
// ---------------------------------------------------------------------------

/// Horizontal bars, one per job title, largest mean at the top.
pub fn top_job_titles_chart(ui: &mut Ui, top: &[JobTitleMean]) {
    chart_title(ui, "Top 10 Cargos por Salário Médio");
    if top.is_empty() {
        placeholder(ui);
        return;
    }

    let names: Vec<String> = top.iter().map(|t| t.job_title.clone()).collect();
    let bars: Vec<Bar> = top
        .iter()
        .enumerate()
        .map(|(i, t)| {
            Bar::new(i as f64, t.mean_salary)
                .name(format!(
                    "{}: {} ({} registros)",
                    t.job_title,
                    format_usd(t.mean_salary),
                    format_count(t.count)
                ))
                .width(0.7)
                .fill(BAR_COLOR)
        })
        .collect();

    Plot::new("top_job_titles")
        .height(CHART_HEIGHT)
        .x_axis_label("Salário Médio anual (USD)")
        .x_axis_formatter(|mark: GridMark, _range| format_usd(mark.value))
        .y_axis_formatter(move |mark: GridMark, _range| category_label(&names, mark.value))
        .y_grid_spacer(egui_plot::uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal().name("Cargo"));
        });
}

/// Label for an integer grid position, blank between categories.
fn category_label(names: &[String], position: f64) -> String {
    let rounded = position.round();
    if (position - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    names.get(rounded as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Salary histogram
// ---------------------------------------------------------------------------

pub fn salary_histogram_chart(ui: &mut Ui, histogram: &Histogram) {
    chart_title(ui, "Distribuição de Salários anuais");
    if histogram.is_empty() {
        placeholder(ui);
        return;
    }

    let bars: Vec<Bar> = histogram
        .bins
        .iter()
        .map(|bin| {
            Bar::new(bin.center(), bin.count as f64)
                .width(bin.width())
                .name(format!(
                    "{} – {}: {}",
                    format_usd(bin.lower),
                    format_usd(bin.upper),
                    format_count(bin.count)
                ))
                .fill(BAR_COLOR)
        })
        .collect();

    Plot::new("salary_histogram")
        .height(CHART_HEIGHT)
        .x_axis_label("Salário Anual (USD)")
        .x_axis_formatter(|mark: GridMark, _range| format_usd(mark.value))
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Registros"));
        });
}

// ---------------------------------------------------------------------------
// Remote-work donut
// ---------------------------------------------------------------------------

/// Ring chart of work-arrangement proportions, annotated with label and percent.
pub fn remote_donut_chart(ui: &mut Ui, shares: &[ShareSlice], colors: &ColorMap) {
    chart_title(ui, "Proporção dos tipos de trabalho");
    if shares.is_empty() {
        placeholder(ui);
        return;
    }

    let size = vec2(ui.available_width(), CHART_HEIGHT);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let rect = response.rect;
    let center = rect.center();
    let outer = (rect.width().min(rect.height()) / 2.0 - 8.0).max(16.0);
    let inner = outer * 0.5;

    for (slice, (start, end)) in shares.iter().zip(slice_angles(shares)) {
        if end <= start {
            continue;
        }
        let color = colors.color_for(&slice.label);
        painter.add(ring_segment(center, inner, outer, start, end, color));

        let mid = (start + end) / 2.0;
        let pos = center + vec2(mid.cos(), mid.sin()) * (inner + outer) / 2.0;
        painter.text(
            pos,
            Align2::CENTER_CENTER,
            format!("{}\n{:.1}%", slice.label, slice.percent),
            FontId::proportional(13.0),
            Color32::WHITE,
        );
    }
}

/// Legend for the donut: colour swatch, label, count and percent.
pub fn remote_legend(ui: &mut Ui, shares: &[ShareSlice], colors: &ColorMap) {
    if shares.is_empty() {
        return;
    }
    ui.add_space(24.0);
    for slice in shares {
        ui.horizontal(|ui: &mut Ui| {
            let (swatch, _) = ui.allocate_exact_size(vec2(12.0, 12.0), Sense::hover());
            ui.painter().rect_filled(swatch, 2.0, colors.color_for(&slice.label));
            ui.label(format!(
                "{}: {} ({:.1}%)",
                slice.label,
                format_count(slice.count),
                slice.percent
            ));
        });
    }
}

/// Start/end angle of each slice, clockwise from twelve o'clock.
fn slice_angles(shares: &[ShareSlice]) -> Vec<(f32, f32)> {
    let mut start = -FRAC_PI_2;
    shares
        .iter()
        .map(|s| {
            let end = start + TAU * (s.percent as f32 / 100.0);
            let span = (start, end);
            start = end;
            span
        })
        .collect()
}

/// Filled annulus sector between `start` and `end` radians.
fn ring_segment(
    center: Pos2,
    inner: f32,
    outer: f32,
    start: f32,
    end: f32,
    color: Color32,
) -> Shape {
    let steps = ((end - start) / 0.05).ceil().max(1.0) as u32;
    let mut mesh = Mesh::default();
    for i in 0..=steps {
        let a = start + (end - start) * i as f32 / steps as f32;
        let dir = vec2(a.cos(), a.sin());
        mesh.colored_vertex(center + dir * inner, color);
        mesh.colored_vertex(center + dir * outer, color);
    }
    for i in 0..steps {
        let k = 2 * i;
        mesh.add_triangle(k, k + 1, k + 2);
        mesh.add_triangle(k + 1, k + 3, k + 2);
    }
    Shape::mesh(mesh)
}

/// Frame shared by the chart cells.
pub fn chart_cell(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui)) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_width(ui.available_width());
        add_contents(ui);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slice(label: &str, percent: f64) -> ShareSlice {
        ShareSlice {
            label: label.to_string(),
            count: 1,
            percent,
        }
    }

    #[test]
    fn slices_cover_the_full_circle() {
        let angles = slice_angles(&[
            slice("remoto", 50.0),
            slice("hibrido", 30.0),
            slice("presencial", 20.0),
        ]);
        assert_eq!(angles.len(), 3);
        assert_eq!(angles[0].0, -FRAC_PI_2);
        assert_eq!(angles[0].1, angles[1].0);
        assert!((angles[2].1 - (-FRAC_PI_2 + TAU)).abs() < 1e-4);
    }

    #[test]
    fn ring_segment_mesh_is_two_triangles_per_step() {
        let Shape::Mesh(mesh) = ring_segment(Pos2::ZERO, 5.0, 10.0, 0.0, 0.5, Color32::RED) else {
            panic!("expected a mesh");
        };
        assert_eq!(mesh.vertices.len(), 22);
        assert_eq!(mesh.indices.len(), 10 * 6);
    }

    #[test]
    fn category_labels_only_on_integer_positions() {
        let names = vec!["Analyst".to_string(), "Engineer".to_string()];
        assert_eq!(category_label(&names, 1.0), "Engineer");
        assert_eq!(category_label(&names, 0.5), "");
        assert_eq!(category_label(&names, -1.0), "");
        assert_eq!(category_label(&names, 2.0), "");
    }
}
