//! Picker trait definition

/// Keyboard highlight over a list of items.
///
/// The highlight is independent of what is checked: it only marks the row
/// that `Space` would toggle.
///
/// # Example
///
/// ```ignore
/// struct Rows {
///     items: Vec<Item>,
///     highlighted: usize,
/// }
///
/// impl Picker for Rows {
///     type Item = Item;
///
///     fn items(&self) -> &[Item] {
///         &self.items
///     }
///
///     fn selected_index(&self) -> usize {
///         self.highlighted
///     }
///
///     fn set_selected_index(&mut self, index: usize) {
///         self.highlighted = index;
///     }
/// }
/// ```
pub trait Picker {
    type Item;

    fn items(&self) -> &[Self::Item];

    /// Index of the highlighted row
    fn selected_index(&self) -> usize;

    fn set_selected_index(&mut self, index: usize);

    /// Move the highlight down (wraps around)
    fn select_next(&mut self) {
        let len = self.items().len();
        if len > 0 {
            self.set_selected_index((self.selected_index() + 1) % len);
        }
    }

    /// Move the highlight up (wraps around)
    fn select_prev(&mut self) {
        let len = self.items().len();
        if len > 0 {
            let prev = self.selected_index().checked_sub(1).unwrap_or(len - 1);
            self.set_selected_index(prev.min(len - 1));
        }
    }

    /// The highlighted item, if the list is non-empty
    fn selected_item(&self) -> Option<&Self::Item> {
        self.items().get(self.selected_index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Rows {
        items: Vec<&'static str>,
        highlighted: usize,
    }

    impl Picker for Rows {
        type Item = &'static str;

        fn items(&self) -> &[&'static str] {
            &self.items
        }

        fn selected_index(&self) -> usize {
            self.highlighted
        }

        fn set_selected_index(&mut self, index: usize) {
            self.highlighted = index;
        }
    }

    #[test]
    fn test_navigation_wraps() {
        let mut rows = Rows { items: vec!["a", "b", "c"], highlighted: 0 };
        rows.select_prev();
        assert_eq!(rows.selected_item(), Some(&"c"));
        rows.select_next();
        assert_eq!(rows.selected_item(), Some(&"a"));
    }

    #[test]
    fn test_empty_list_is_noop() {
        let mut rows = Rows { items: vec![], highlighted: 0 };
        rows.select_next();
        rows.select_prev();
        assert_eq!(rows.selected_index(), 0);
        assert_eq!(rows.selected_item(), None);
    }
}
