use eframe::egui::{ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::TitleTable;

/// Rows shown by the preview.
const PREVIEW_ROWS: usize = 20;
const MAX_CELL_CHARS: usize = 60;

fn shorten(text: String) -> String {
    if text.chars().count() <= MAX_CELL_CHARS {
        return text;
    }
    let mut short: String = text.chars().take(MAX_CELL_CHARS - 1).collect();
    short.push('…');
    short
}

/// First rows of the cleaned table, one column per header entry.
pub fn preview(ui: &mut Ui, table: &TitleTable) {
    let rows = &table.records[..table.len().min(PREVIEW_ROWS)];

    ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .vscroll(false)
            .columns(Column::auto().at_least(60.0).clip(true), table.column_names.len())
            .header(20.0, |mut header| {
                for name in &table.column_names {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, rows.len(), |mut row| {
                    let record = &rows[row.index()];
                    for name in &table.column_names {
                        row.col(|ui: &mut Ui| {
                            let cell = record.get(name);
                            if cell.is_null() {
                                ui.weak("null");
                            } else {
                                ui.label(shorten(cell.to_string()));
                            }
                        });
                    }
                });
            });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_cells_are_shortened() {
        assert_eq!(shorten("Heat".into()), "Heat");
        let long = "x".repeat(100);
        let short = shorten(long);
        assert_eq!(short.chars().count(), MAX_CELL_CHARS);
        assert!(short.ends_with('…'));
    }
}
