use eframe::egui::{self, RichText, Ui};

use crate::data::stats::Metrics;
use crate::format::{format_count, format_usd};

/// Four metric cards side by side.
pub fn metrics_row(ui: &mut Ui, metrics: &Metrics) {
    ui.columns(4, |cols: &mut [Ui]| {
        metric_card(&mut cols[0], "Salário Médio", &format_usd(metrics.mean_salary));
        metric_card(&mut cols[1], "Salário Máximo", &format_usd(metrics.max_salary));
        metric_card(&mut cols[2], "Total de Registros", &format_count(metrics.record_count));
        metric_card(&mut cols[3], "Cargo Mais Frequente", &metrics.most_frequent_job_title);
    });
}

fn metric_card(ui: &mut Ui, label: &str, value: &str) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new(label).small().weak());
        ui.label(RichText::new(value).size(26.0).strong());
    });
}
