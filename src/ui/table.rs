use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::{FilteredView, REQUIRED_COLUMNS};
use crate::format::format_usd;

const ROW_HEIGHT: f32 = 18.0;

/// Striped preview of the filtered rows. Rows are virtualised so large
/// tables stay cheap to draw.
pub fn data_preview(ui: &mut Ui, view: &FilteredView<'_>) {
    let records = view.records();

    let mut table = TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(320.0);
    for _ in REQUIRED_COLUMNS {
        table = table.column(Column::auto().at_least(60.0));
    }

    table
        .header(20.0, |mut header| {
            for name in REQUIRED_COLUMNS {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, records.len(), |mut row| {
                let rec = records[row.index()];
                row.col(|ui: &mut Ui| {
                    ui.label(rec.year.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(rec.seniority.as_str());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(rec.contract.as_str());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(rec.company_size.as_str());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(rec.remote.as_str());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(rec.job_title.as_str());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format_usd(rec.salary_usd));
                });
            });
        });
}
