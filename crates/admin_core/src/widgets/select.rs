use shared::catalog::SelectOption;

/// Single-choice picker over a fixed or looked-up option list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select<V> {
    options: Vec<SelectOption<V>>,
    placeholder: &'static str,
}

impl<V: Clone + PartialEq> Select<V> {
    pub fn new(options: Vec<SelectOption<V>>, placeholder: &'static str) -> Self {
        Self {
            options,
            placeholder,
        }
    }

    pub fn options(&self) -> &[SelectOption<V>] {
        &self.options
    }

    pub fn set_options(&mut self, options: Vec<SelectOption<V>>) {
        self.options = options;
    }

    /// Label for the current value; the placeholder when nothing matches.
    pub fn selected_label(&self, value: Option<&V>) -> &str {
        value
            .and_then(|value| self.options.iter().find(|option| &option.value == value))
            .map(|option| option.label.as_str())
            .unwrap_or(self.placeholder)
    }
}
