//! Contact picking for the first wizard step.

use std::collections::HashSet;

use splitpay_types::Participant;
use tracing::debug;

use crate::error::{SplitPayError, SplitPayResult};

/// Which of the listed contacts are part of the split.
#[derive(Debug, Clone, Default)]
pub struct ContactSelection {
    rows: Vec<Participant>,
    selected: HashSet<String>,
}

impl ContactSelection {
    pub fn new(rows: Vec<Participant>) -> Self {
        Self { rows, selected: HashSet::new() }
    }

    pub fn rows(&self) -> &[Participant] {
        &self.rows
    }

    /// Replaces the listed contacts, keeping selections that are still listed.
    pub fn set_rows(&mut self, rows: Vec<Participant>) {
        self.rows = rows;
        let listed: HashSet<&str> = self.rows.iter().map(|r| r.id.as_str()).collect();
        self.selected.retain(|id| listed.contains(id.as_str()));
    }

    pub fn select_one(&mut self, contact_id: &str) -> SplitPayResult<()> {
        self.ensure_listed(contact_id)?;
        self.selected.insert(contact_id.to_string());
        Ok(())
    }

    pub fn deselect_one(&mut self, contact_id: &str) -> SplitPayResult<()> {
        self.ensure_listed(contact_id)?;
        self.selected.remove(contact_id);
        Ok(())
    }

    /// Flips one contact and returns whether it is now selected.
    pub fn toggle(&mut self, contact_id: &str) -> SplitPayResult<bool> {
        if self.is_selected(contact_id) {
            self.deselect_one(contact_id)?;
            Ok(false)
        } else {
            self.select_one(contact_id)?;
            Ok(true)
        }
    }

    pub fn select_all(&mut self) {
        self.selected = self.rows.iter().map(|r| r.id.clone()).collect();
    }

    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }

    /// Replaces the selection with exactly `ids`. Fails without changing anything
    /// if one of them is not listed.
    pub fn replace(&mut self, ids: &[String]) -> SplitPayResult<()> {
        for id in ids {
            self.ensure_listed(id)?;
        }
        self.selected = ids.iter().cloned().collect();
        debug!(selected = self.selected.len(), "Replaced contact selection");
        Ok(())
    }

    pub fn is_selected(&self, contact_id: &str) -> bool {
        self.selected.contains(contact_id)
    }

    /// Selected contacts, in row order.
    pub fn selected(&self) -> Vec<Participant> {
        self.rows.iter().filter(|r| self.selected.contains(&r.id)).cloned().collect()
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_all_selected(&self) -> bool {
        !self.rows.is_empty() && self.selected.len() == self.rows.len()
    }

    /// Some, but not all, contacts are selected.
    pub fn is_partially_selected(&self) -> bool {
        !self.selected.is_empty() && self.selected.len() < self.rows.len()
    }

    fn ensure_listed(&self, contact_id: &str) -> SplitPayResult<()> {
        if self.rows.iter().any(|r| r.id == contact_id) {
            Ok(())
        } else {
            Err(SplitPayError::UnknownContact { contact_id: contact_id.to_string() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Participant> {
        vec![
            Participant::new("1", "Ana"),
            Participant::new("2", "Luis"),
            Participant::new("3", "Andrés"),
        ]
    }

    #[test]
    fn selection_follows_row_order() {
        let mut selection = ContactSelection::new(rows());
        selection.select_one("3").unwrap();
        selection.select_one("1").unwrap();

        let names: Vec<_> = selection.selected().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Ana", "Andrés"]);
        assert!(selection.is_partially_selected());
        assert!(!selection.is_all_selected());
    }

    #[test]
    fn toggle_and_bulk_actions() {
        let mut selection = ContactSelection::new(rows());
        assert!(selection.toggle("2").unwrap());
        assert!(!selection.toggle("2").unwrap());

        selection.select_all();
        assert!(selection.is_all_selected());
        assert!(!selection.is_partially_selected());

        selection.deselect_all();
        assert_eq!(selection.selected_count(), 0);
    }

    #[test]
    fn unknown_contact_is_rejected() {
        let mut selection = ContactSelection::new(rows());
        assert!(matches!(
            selection.select_one("9"),
            Err(SplitPayError::UnknownContact { .. })
        ));
        assert!(selection.replace(&["1".to_string(), "9".to_string()]).is_err());
        assert_eq!(selection.selected_count(), 0);
    }

    #[test]
    fn replacing_rows_drops_missing_selections() {
        let mut selection = ContactSelection::new(rows());
        selection.select_all();
        selection.set_rows(vec![Participant::new("2", "Luis")]);
        assert_eq!(selection.selected_count(), 1);
        assert!(selection.is_all_selected());
    }
}
