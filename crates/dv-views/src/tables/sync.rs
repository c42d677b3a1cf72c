//! Table sync: keeps the summary table's rows in step with the selection

use std::cmp::Ordering;

use ahash::AHashMap;
use dv_core::{Dataset, PlotConfig, Record, RecordId};
use tracing::debug;

/// Styling class of a table column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellClass {
    Title,
    Num,
}

impl CellClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            CellClass::Title => "title",
            CellClass::Num => "num",
        }
    }
}

/// A summary table column
#[derive(Debug, Clone, PartialEq)]
pub struct TableColumn {
    pub head: String,
    pub class: CellClass,
    pub key: String,
}

impl TableColumn {
    pub fn new(key: impl Into<String>, class: CellClass) -> Self {
        let key = key.into();
        Self {
            head: key.clone(),
            class,
            key,
        }
    }

    /// Columns for the event-log dataset
    pub fn event_log() -> Vec<Self> {
        vec![
            Self::new("time", CellClass::Title),
            Self::new("event_type", CellClass::Num),
            Self::new("cpu_id", CellClass::Num),
            Self::new("disk_usage", CellClass::Num),
            Self::new("memory_usage", CellClass::Num),
        ]
    }
}

/// One displayed row, keyed by the record it shows
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub key: RecordId,
    pub cells: Vec<String>,
}

/// Row-level changes made by one [`TableSync::update`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableDiff {
    pub entered: Vec<RecordId>,
    pub exited: Vec<RecordId>,
    /// Rows kept but shown at a different position
    pub moved: Vec<RecordId>,
}

impl TableDiff {
    pub fn is_empty(&self) -> bool {
        self.entered.is_empty() && self.exited.is_empty() && self.moved.is_empty()
    }
}

/// Projects the selection onto the top rows by the sort key
pub struct TableSync {
    columns: Vec<TableColumn>,
    sort_key: String,
    limit: usize,
    rows: Vec<TableRow>,
}

impl TableSync {
    pub fn new(columns: Vec<TableColumn>, config: &PlotConfig) -> Self {
        Self {
            columns,
            sort_key: config.sort_key.clone(),
            limit: config.table_rows,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[TableColumn] {
        &self.columns
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Drop every row. Record keys are only meaningful within one dataset,
    /// so this must run before the first update against a new one.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// The first `limit` selected records ordered by the sort key ascending.
    ///
    /// Absent sort values go last; ties keep selection order.
    pub fn top_records(&self, dataset: &Dataset, selection: &[RecordId]) -> Vec<RecordId> {
        let mut ranked: Vec<(RecordId, &Record)> = selection
            .iter()
            .filter_map(|&id| dataset.get(id).map(|r| (id, r)))
            .collect();

        ranked.sort_by(|(_, a), (_, b)| match (a.get(&self.sort_key), b.get(&self.sort_key)) {
            (Some(x), Some(y)) => x.total_cmp(y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        ranked.into_iter().take(self.limit).map(|(id, _)| id).collect()
    }

    /// Reconcile the displayed rows with `selection`.
    ///
    /// Rows are matched by record key: kept rows reuse their cells, only
    /// entering rows are built and exiting rows dropped.
    pub fn update(&mut self, dataset: &Dataset, selection: &[RecordId]) -> TableDiff {
        let top = self.top_records(dataset, selection);

        let mut previous: AHashMap<RecordId, (usize, TableRow)> = self
            .rows
            .drain(..)
            .enumerate()
            .map(|(position, row)| (row.key, (position, row)))
            .collect();

        let mut diff = TableDiff::default();
        let mut rows = Vec::with_capacity(top.len());

        for (position, key) in top.iter().copied().enumerate() {
            match previous.remove(&key) {
                Some((old_position, row)) => {
                    if old_position != position {
                        diff.moved.push(key);
                    }
                    rows.push(row);
                }
                None => {
                    diff.entered.push(key);
                    rows.push(self.build_row(dataset, key));
                }
            }
        }

        let mut exited: Vec<RecordId> = previous.into_keys().collect();
        exited.sort_unstable();
        diff.exited = exited;

        debug!(
            "Table sync: {} rows (+{} -{} ~{})",
            rows.len(),
            diff.entered.len(),
            diff.exited.len(),
            diff.moved.len()
        );
        self.rows = rows;
        diff
    }

    fn build_row(&self, dataset: &Dataset, key: RecordId) -> TableRow {
        let record = dataset.get(key);
        let cells = self
            .columns
            .iter()
            .map(|col| {
                record
                    .and_then(|r| r.get(&col.key))
                    .map(|v| v.to_string())
                    .unwrap_or_default()
            })
            .collect();
        TableRow { key, cells }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(event_types: &[f64]) -> Dataset {
        Dataset::new(
            event_types
                .iter()
                .map(|&e| Record::new().with("time", e * 10.0).with("event_type", e))
                .collect(),
        )
    }

    fn sync() -> TableSync {
        TableSync::new(TableColumn::event_log(), &PlotConfig::default())
    }

    #[test]
    fn test_top_five_ascending() {
        let data = dataset(&[6.0, 3.0, 1.0, 5.0, 2.0, 4.0]);
        let mut table = sync();
        table.update(&data, &data.all_ids());

        let shown: Vec<&str> = table.rows().iter().map(|r| r.cells[1].as_str()).collect();
        assert_eq!(shown, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_empty_selection_renders_no_rows() {
        let data = dataset(&[1.0, 2.0]);
        let mut table = sync();
        table.update(&data, &data.all_ids());
        let diff = table.update(&data, &[]);
        assert!(table.rows().is_empty());
        assert_eq!(diff.exited, vec![0, 1]);
    }

    #[test]
    fn test_absent_sort_values_go_last() {
        let data = Dataset::new(vec![
            Record::new().with_absent("event_type"),
            Record::new().with("event_type", 9.0),
        ]);
        let table = sync();
        assert_eq!(table.top_records(&data, &[0, 1]), vec![1, 0]);
    }

    #[test]
    fn test_keyed_diff() {
        let data = dataset(&[1.0, 2.0, 3.0]);
        let mut table = sync();

        let first = table.update(&data, &[0, 1]);
        assert_eq!(first.entered, vec![0, 1]);

        let second = table.update(&data, &[1, 2]);
        assert_eq!(second.entered, vec![2]);
        assert_eq!(second.exited, vec![0]);
        assert_eq!(second.moved, vec![1]);

        let third = table.update(&data, &[1, 2]);
        assert!(third.is_empty());
    }

    #[test]
    fn test_absent_cells_render_empty() {
        let data = Dataset::new(vec![Record::new().with("event_type", 1.0)]);
        let mut table = sync();
        table.update(&data, &[0]);
        assert_eq!(table.rows()[0].cells[0], "");
        assert_eq!(table.rows()[0].cells[1], "1");
        assert_eq!(table.columns()[0].class.as_str(), "title");
    }

    #[test]
    fn test_clear_rebuilds_rows_for_a_new_dataset() {
        let mut table = sync();
        table.update(&dataset(&[1.0]), &[0]);
        assert_eq!(table.rows()[0].cells[1], "1");

        table.clear();
        assert!(table.rows().is_empty());

        let diff = table.update(&dataset(&[7.0]), &[0]);
        assert_eq!(diff.entered, vec![0]);
        assert_eq!(table.rows()[0].cells[1], "7");
    }
}
