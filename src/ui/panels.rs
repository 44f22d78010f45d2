use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::config::DataSource;
use crate::data::model::FilterColumn;
use crate::format::format_count;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filtros");
    ui.separator();

    if state.dataset.is_empty() {
        ui.label("Nenhum registro carregado.");
        return;
    }

    let unique = state.dataset.distinct_values.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for col in FilterColumn::ALL {
                let Some(all_values) = unique.get(&col) else {
                    continue;
                };

                // Show count of selected / total in the header
                let n_selected = state.filters.get(&col).map_or(0, |s| s.len());
                let n_total = all_values.len();
                let header_text = format!("{}  ({n_selected}/{n_total})", col.label());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(col.column_name())
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("Todos").clicked() {
                                state.select_all(col);
                            }
                            if ui.small_button("Nenhum").clicked() {
                                state.select_none(col);
                            }
                        });

                        for val in all_values {
                            let mut checked = state
                                .filters
                                .get(&col)
                                .is_some_and(|selected| selected.contains(val));
                            if ui.checkbox(&mut checked, val.to_string()).changed() {
                                state.toggle_filter_value(col, val);
                            }
                        }
                    });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Arquivo", |ui: &mut Ui| {
            if ui.button("Abrir…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Recarregar").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} registros carregados, {} visíveis",
            format_count(state.dataset.len()),
            format_count(state.visible_indices.len())
        ))
        .on_hover_text(state.source.to_string());

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Abrir dados de salários")
        .add_filter("Arquivos suportados", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load(DataSource::File(path));
    }
}
