//! Transport-agnostic inline menus: a [`Keyboard`] is rows of labelled buttons,
//! each carrying an opaque callback payload. The Telegram adapter maps it to an
//! inline keyboard markup.

/// One button: visible label plus the payload delivered back on press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub payload: String,
}

/// Row-oriented keyboard builder. `text` appends to the current row, `row`
/// ends it; the break is applied lazily so trailing `row` calls never leave an
/// empty row behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyboard {
    rows: Vec<Vec<Button>>,
    break_next: bool,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a button to the current row (or opens a new one after `row`).
    pub fn text(mut self, label: impl Into<String>, payload: impl Into<String>) -> Self {
        let button = Button {
            label: label.into(),
            payload: payload.into(),
        };
        if self.break_next || self.rows.is_empty() {
            self.rows.push(Vec::new());
            self.break_next = false;
        }
        if let Some(row) = self.rows.last_mut() {
            row.push(button);
        }
        self
    }

    /// Ends the current row; the next `text` starts a new one.
    pub fn row(mut self) -> Self {
        self.break_next = true;
        self
    }

    pub fn rows(&self) -> &[Vec<Button>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_appends_to_current_row() {
        let kb = Keyboard::new().text("A", "a").text("B", "b");
        assert_eq!(kb.rows().len(), 1);
        assert_eq!(kb.rows()[0].len(), 2);
        assert_eq!(kb.rows()[0][1].payload, "b");
    }

    #[test]
    fn test_row_starts_new_row() {
        let kb = Keyboard::new().text("A", "a").row().text("B", "b");
        assert_eq!(kb.rows().len(), 2);
        assert_eq!(kb.rows()[1][0].label, "B");
    }

    #[test]
    fn test_trailing_row_leaves_no_empty_row() {
        let kb = Keyboard::new().text("A", "a").row();
        assert_eq!(kb.rows().len(), 1);
    }

    #[test]
    fn test_leading_and_double_row_are_noops() {
        let kb = Keyboard::new().row().text("A", "a").row().row().text("B", "b");
        assert_eq!(kb.rows().len(), 2);
    }

    #[test]
    fn test_empty_keyboard() {
        assert!(Keyboard::new().is_empty());
        assert!(!Keyboard::new().text("A", "a").is_empty());
    }
}
