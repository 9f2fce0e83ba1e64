//! Модель выбора строк списка
//!
//! Выбор живёт в пределах загруженной страницы: "выбрать все" отмечает
//! только строки текущей страницы, при переходе на другую страницу
//! выбор сужается до загруженных строк.

use contracts::domain::common::Identified;
use std::collections::HashSet;

/// Режим выбора строк
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    None,
    Single,
    #[default]
    Multiple,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionModel {
    mode: SelectionMode,
    selected: HashSet<String>,
}

impl SelectionModel {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: HashSet::new(),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn toggle(&mut self, id: &str, selected: bool) {
        match self.mode {
            SelectionMode::None => {}
            SelectionMode::Single => {
                if selected {
                    self.selected.clear();
                    self.selected.insert(id.to_string());
                } else {
                    self.selected.remove(id);
                }
            }
            SelectionMode::Multiple => {
                if selected {
                    self.selected.insert(id.to_string());
                } else {
                    self.selected.remove(id);
                }
            }
        }
    }

    /// Выбрать все строки текущей страницы (или снять выбор)
    pub fn select_all<T: Identified>(&mut self, selected: bool, loaded: &[T]) {
        if !selected {
            self.selected.clear();
            return;
        }
        match self.mode {
            SelectionMode::Multiple => {
                self.selected = loaded.iter().map(Identified::id).collect();
            }
            // В одиночном режиме "все" не имеет смысла
            SelectionMode::Single | SelectionMode::None => {}
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Оставить только ID, присутствующие среди загруженных строк
    pub fn retain_loaded<T: Identified>(&mut self, loaded: &[T]) {
        let loaded: HashSet<String> = loaded.iter().map(Identified::id).collect();
        self.selected.retain(|id| loaded.contains(id));
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Выбранные ID в стабильном порядке
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Загруженные строки, отмеченные в выборе (в порядке загрузки)
    pub fn selected_items<T: Identified + Clone>(&self, loaded: &[T]) -> Vec<T> {
        loaded
            .iter()
            .filter(|item| self.selected.contains(&item.id()))
            .cloned()
            .collect()
    }

    pub fn all_selected<T: Identified>(&self, loaded: &[T]) -> bool {
        !loaded.is_empty() && loaded.iter().all(|item| self.selected.contains(&item.id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_multiple_toggle() {
        let mut sel = SelectionModel::new(SelectionMode::Multiple);
        sel.toggle("a", true);
        sel.toggle("b", true);
        sel.toggle("a", false);
        assert_eq!(sel.ids(), vec!["b".to_string()]);
    }

    #[test]
    fn test_single_mode_never_exceeds_one() {
        let mut sel = SelectionModel::new(SelectionMode::Single);
        let sequence = [
            ("a", true),
            ("b", true),
            ("c", true),
            ("c", false),
            ("a", true),
            ("b", false),
            ("d", true),
        ];
        for (id, selected) in sequence {
            sel.toggle(id, selected);
            assert!(sel.len() <= 1);
        }
        assert_eq!(sel.ids(), vec!["d".to_string()]);

        sel.select_all(true, &rows(&["x", "y"]));
        assert!(sel.len() <= 1);
    }

    #[test]
    fn test_none_mode_stays_empty() {
        let mut sel = SelectionModel::new(SelectionMode::None);
        sel.toggle("a", true);
        sel.select_all(true, &rows(&["a", "b"]));
        assert!(sel.is_empty());
    }

    #[test]
    fn test_select_all_is_page_scoped() {
        let page = rows(&["a", "b", "c"]);
        let mut sel = SelectionModel::default();
        sel.select_all(true, &page);
        assert_eq!(sel.len(), 3);
        assert!(sel.all_selected(&page));

        sel.select_all(false, &page);
        assert!(sel.is_empty());
        assert!(!sel.all_selected(&page));
    }

    #[test]
    fn test_selected_items_follow_loaded_order() {
        let page = rows(&["c", "a", "b"]);
        let mut sel = SelectionModel::default();
        sel.toggle("b", true);
        sel.toggle("c", true);
        sel.toggle("zzz", true);
        assert_eq!(sel.selected_items(&page), rows(&["c", "b"]));

        sel.retain_loaded(&page);
        assert_eq!(sel.ids(), rows(&["b", "c"]));
    }
}
