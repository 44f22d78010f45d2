use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{charts, metrics, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SalaryDashboardApp {
    pub state: AppState,
}

impl SalaryDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for SalaryDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| dashboard(ui, &self.state));
        });
    }
}

fn dashboard(ui: &mut Ui, state: &AppState) {
    let summary = &state.summary;

    ui.heading(RichText::new("Dashboard de Salários").size(28.0));
    ui.label(
        "Análise de salários por ano, senioridade, tipo de contratação e tamanho da empresa.",
    );
    ui.add_space(8.0);

    ui.heading("Métricas Principais (Salário anual em USD)");
    metrics::metrics_row(ui, &summary.metrics);
    ui.separator();

    ui.heading("Gráficos");
    ui.columns(2, |cols: &mut [Ui]| {
        charts::chart_cell(&mut cols[0], |ui| {
            charts::top_job_titles_chart(ui, &summary.top_job_titles);
        });
        charts::chart_cell(&mut cols[1], |ui| {
            charts::salary_histogram_chart(ui, &summary.histogram);
        });
    });
    ui.columns(2, |cols: &mut [Ui]| {
        charts::chart_cell(&mut cols[0], |ui| {
            charts::remote_donut_chart(ui, &summary.remote_shares, &state.color_map);
        });
        charts::remote_legend(&mut cols[1], &summary.remote_shares, &state.color_map);
    });

    ui.add_space(8.0);
    egui::CollapsingHeader::new(RichText::new("Dados filtrados").strong())
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            table::data_preview(ui, &state.view());
        });
}
