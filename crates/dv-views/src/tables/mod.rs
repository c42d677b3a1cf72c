//! Summary table view

pub mod sync;

pub use sync::{CellClass, TableColumn, TableDiff, TableRow, TableSync};

use egui::Ui;
use egui_extras::{Column, TableBuilder};

/// Configuration for the summary table
#[derive(Debug, Clone)]
pub struct SummaryTableConfig {
    pub striped_rows: bool,
    pub resizable_columns: bool,
    pub column_width: f32,
}

impl Default for SummaryTableConfig {
    fn default() -> Self {
        Self {
            striped_rows: true,
            resizable_columns: true,
            column_width: 140.0,
        }
    }
}

/// Draws the rows a [`TableSync`] currently holds
#[derive(Default)]
pub struct SummaryTableView {
    pub config: SummaryTableConfig,
}

impl SummaryTableView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&self, ui: &mut Ui, table: &TableSync) {
        let text_height = egui::TextStyle::Body.resolve(ui.style()).size * 1.5;
        let columns = table.columns();

        let mut builder = TableBuilder::new(ui)
            .striped(self.config.striped_rows)
            .resizable(self.config.resizable_columns)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .min_scrolled_height(0.0)
            .vscroll(false);

        for _ in columns {
            builder = builder.column(
                Column::initial(self.config.column_width)
                    .at_least(60.0)
                    .clip(true)
                    .resizable(self.config.resizable_columns),
            );
        }

        builder
            .header(20.0, |mut header| {
                for col in columns {
                    header.col(|ui| {
                        let response = ui.strong(&col.head);
                        response.context_menu(|ui| {
                            if ui.button("📋 Copy Column Name").clicked() {
                                ui.output_mut(|o| o.copied_text = col.key.clone());
                                ui.close_menu();
                            }
                        });
                    });
                }
            })
            .body(|mut body| {
                for row in table.rows() {
                    body.row(text_height, |mut cells| {
                        for (col, text) in columns.iter().zip(&row.cells) {
                            cells.col(|ui| match col.class {
                                CellClass::Title => {
                                    ui.label(text);
                                }
                                CellClass::Num => {
                                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                        ui.monospace(text);
                                    });
                                }
                            });
                        }
                    });
                }
            });
    }
}
