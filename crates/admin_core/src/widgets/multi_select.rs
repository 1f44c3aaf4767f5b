//! Pointer-driven multi-select: a toggleable surface showing chips for the
//! current selection, and an option panel while open.

use shared::catalog::SelectOption;

/// Where a click landed. Each click is delivered to exactly one target, so a
/// chip's remove button never also toggles the surface underneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiSelectClick<'a, V> {
    Surface,
    Option(&'a V),
    RemoveChip(&'a V),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiSelect<V> {
    options: Vec<SelectOption<V>>,
    placeholder: &'static str,
    open: bool,
}

impl<V: Clone + PartialEq> MultiSelect<V> {
    pub fn new(options: Vec<SelectOption<V>>, placeholder: &'static str) -> Self {
        Self {
            options,
            placeholder,
            open: false,
        }
    }

    pub fn options(&self) -> &[SelectOption<V>] {
        &self.options
    }

    pub fn set_options(&mut self, options: Vec<SelectOption<V>>) {
        self.options = options;
    }

    pub fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Applies one click to the control and the selection it edits.
    pub fn click(&mut self, target: MultiSelectClick<'_, V>, selection: &mut Vec<V>) {
        match target {
            MultiSelectClick::Surface => self.open = !self.open,
            MultiSelectClick::Option(value) => {
                if self.open {
                    toggle_selection(selection, value);
                }
            }
            MultiSelectClick::RemoveChip(value) => selection.retain(|selected| selected != value),
        }
    }

    /// Selected options in options-list order, regardless of pick order.
    pub fn chips<'a>(&'a self, selection: &[V]) -> Vec<&'a SelectOption<V>> {
        self.options
            .iter()
            .filter(|option| selection.contains(&option.value))
            .collect()
    }

    pub fn is_selected(&self, value: &V, selection: &[V]) -> bool {
        selection.contains(value)
    }
}

/// Appends `value` if absent, removes it if present. Remaining entries keep
/// their order.
pub fn toggle_selection<V: Clone + PartialEq>(selection: &mut Vec<V>, value: &V) {
    if let Some(position) = selection.iter().position(|selected| selected == value) {
        selection.remove(position);
    } else {
        selection.push(value.clone());
    }
}

#[cfg(test)]
#[path = "tests/multi_select_tests.rs"]
mod tests;
