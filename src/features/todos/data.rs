use thiserror::Error;

/// Stable identifier assigned to a todo item when it is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u64);

impl ItemId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[cfg(test)]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Individual todo item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub id: ItemId,
    text: String,
    pub is_done: bool,
}

impl TodoItem {
    pub(crate) fn new(id: ItemId, text: String) -> Self {
        Self {
            id,
            text,
            is_done: false,
        }
    }

    /// Item text, fixed at creation
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Compares text and done flag only, ignoring the id
    pub fn same_value(&self, other: &TodoItem) -> bool {
        self.text == other.text && self.is_done == other.is_done
    }
}

/// Add-item dialog sub-state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Closed,
    Open {
        draft_text: String,
        validation_error: bool,
    },
}

impl DialogState {
    pub fn is_open(&self) -> bool {
        matches!(self, DialogState::Open { .. })
    }
}

/// Errors returned by controller transitions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    #[error("Todo cannot be empty")]
    EmptyDraft,
    #[error("the add dialog is not open")]
    DialogClosed,
}
