//! Filter, sort, and selection engine behind every obligation list view.
//!
//! Filters match the *rendered* cells (formatted amount, formatted date,
//! localized status label), so what the user types is matched against what
//! the user sees. The view is a derived snapshot; callers rebuild it after
//! every filter, sort, selection, or collection change and push it to their
//! sink.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::cascade::CascadeDeleter;
use crate::domain::{Obligation, ObligationKind};
use crate::errors::CoreResult;
use crate::format::{self, LocaleConfig};
use crate::status::ObligationStatus;
use crate::store::{Directory, LedgerStore, ObligationStore};

/// Closed set of sortable columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    DueDate,
    Value,
    Counterparty,
    Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Closed set of filterable columns, one free-text predicate each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Counterparty,
    Category,
    Value,
    DueDate,
    Status,
    Schedule,
}

/// One rendered list row. Raw value and due date ride along for sorting;
/// everything user-visible is already formatted.
#[derive(Debug, Clone)]
pub struct ObligationRow {
    pub id: Uuid,
    pub kind: ObligationKind,
    pub counterparty: String,
    pub category: String,
    pub value: String,
    pub due_date: String,
    pub status: ObligationStatus,
    pub status_label: &'static str,
    pub schedule: &'static str,
    pub selected: bool,
    raw_value: Decimal,
    raw_due: NaiveDate,
}

impl ObligationRow {
    fn cell(&self, field: FilterField) -> &str {
        match field {
            FilterField::Counterparty => &self.counterparty,
            FilterField::Category => &self.category,
            FilterField::Value => &self.value,
            FilterField::DueDate => &self.due_date,
            FilterField::Status => self.status_label,
            FilterField::Schedule => self.schedule,
        }
    }
}

/// Filtered, sorted snapshot handed to the consumer.
#[derive(Debug, Clone, Default)]
pub struct ListView {
    pub rows: Vec<ObligationRow>,
}

impl ListView {
    pub fn ids(&self) -> Vec<Uuid> {
        self.rows.iter().map(|row| row.id).collect()
    }
}

pub struct ListQueryEngine {
    locale: LocaleConfig,
    filters: HashMap<FilterField, String>,
    sort_field: SortField,
    sort_direction: SortDirection,
    selected: BTreeSet<Uuid>,
}

impl Default for ListQueryEngine {
    fn default() -> Self {
        Self::new(LocaleConfig::default())
    }
}

impl ListQueryEngine {
    pub fn new(locale: LocaleConfig) -> Self {
        Self {
            locale,
            filters: HashMap::new(),
            sort_field: SortField::DueDate,
            sort_direction: SortDirection::Asc,
            selected: BTreeSet::new(),
        }
    }

    /// Sets a column's free-text filter. Empty or blank text clears it.
    pub fn set_filter(&mut self, field: FilterField, text: impl Into<String>) {
        let text = text.into();
        if text.trim().is_empty() {
            self.filters.remove(&field);
        } else {
            self.filters.insert(field, text);
        }
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// Sorts by `field`. A repeated click on the active field flips the
    /// direction; a new field starts ascending.
    pub fn sort_by(&mut self, field: SortField) {
        if self.sort_field == field {
            self.sort_direction = match self.sort_direction {
                SortDirection::Asc => SortDirection::Desc,
                SortDirection::Desc => SortDirection::Asc,
            };
        } else {
            self.sort_field = field;
            self.sort_direction = SortDirection::Asc;
        }
    }

    pub fn sort(&self) -> (SortField, SortDirection) {
        (self.sort_field, self.sort_direction)
    }

    /// Flips one obligation's selection membership.
    pub fn toggle_one(&mut self, id: Uuid) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// All-or-nothing selection over the rows currently visible in `view`:
    /// selects them all unless every one is already selected, in which case
    /// they are deselected. Rows hidden by filters keep whatever selection
    /// state they had; filtering alone never drops a selection.
    pub fn toggle_all(&mut self, view: &ListView) {
        let visible = view.ids();
        let all_selected =
            !visible.is_empty() && visible.iter().all(|id| self.selected.contains(id));
        if all_selected {
            for id in &visible {
                self.selected.remove(id);
            }
        } else {
            self.selected.extend(visible);
        }
    }

    pub fn is_selected(&self, id: Uuid) -> bool {
        self.selected.contains(&id)
    }

    pub fn selected_ids(&self) -> Vec<Uuid> {
        self.selected.iter().copied().collect()
    }

    /// Recomputes the derived view from the current collection.
    pub fn view(
        &self,
        obligations: &[Obligation],
        directory: &dyn Directory,
        today: NaiveDate,
    ) -> ListView {
        let mut rows: Vec<ObligationRow> = obligations
            .iter()
            .map(|o| self.render_row(o, directory, today))
            .filter(|row| self.passes_filters(row))
            .collect();
        rows.sort_by(|a, b| self.compare(a, b));
        ListView { rows }
    }

    /// Deletes every selected obligation sequentially through the cascade
    /// path, then clears the selection. `confirmed` is the caller's
    /// confirmation dialog outcome; without it nothing runs.
    ///
    /// A failure mid-batch stops the run: earlier deletions stay applied and
    /// are dropped from the selection, the remainder keeps its selection and
    /// is left unprocessed.
    pub fn bulk_delete(
        &mut self,
        obligations: &mut dyn ObligationStore,
        ledger: &mut dyn LedgerStore,
        confirmed: bool,
    ) -> CoreResult<usize> {
        if !confirmed {
            return Ok(0);
        }
        let targets: Vec<Uuid> = self.selected.iter().copied().collect();
        let mut removed = 0;
        for id in targets {
            if CascadeDeleter::delete(obligations, ledger, id)? {
                removed += 1;
            }
            self.selected.remove(&id);
        }
        debug!(removed, "bulk delete finished");
        Ok(removed)
    }

    fn render_row(
        &self,
        obligation: &Obligation,
        directory: &dyn Directory,
        today: NaiveDate,
    ) -> ObligationRow {
        let status = ObligationStatus::of(obligation, today);
        ObligationRow {
            id: obligation.id,
            kind: obligation.kind,
            counterparty: directory.counterparty_name(obligation.counterparty_id),
            category: directory.category_name(obligation.category_id),
            value: format::format_amount(obligation.value, &self.locale),
            due_date: format::format_date(obligation.due_date),
            status,
            status_label: status.label(obligation.kind),
            schedule: format::schedule_label(&obligation.schedule),
            selected: self.selected.contains(&obligation.id),
            raw_value: obligation.value,
            raw_due: obligation.due_date,
        }
    }

    fn passes_filters(&self, row: &ObligationRow) -> bool {
        self.filters.iter().all(|(field, needle)| {
            let haystack = row.cell(*field).to_lowercase();
            haystack.contains(&needle.to_lowercase())
        })
    }

    fn compare(&self, a: &ObligationRow, b: &ObligationRow) -> std::cmp::Ordering {
        let ordering = match self.sort_field {
            SortField::DueDate => a.raw_due.cmp(&b.raw_due),
            SortField::Value => a.raw_value.cmp(&b.raw_value),
            SortField::Counterparty => compare_names(&a.counterparty, &b.counterparty),
            SortField::Category => compare_names(&a.category, &b.category),
        };
        match self.sort_direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Case-folded name comparison standing in for locale collation.
fn compare_names(a: &str, b: &str) -> std::cmp::Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
