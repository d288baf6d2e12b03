use tokio::sync::watch;
use tracing::{debug, info, trace};

use super::data::{DialogState, ItemId, TodoError, TodoItem};

/// Owns the todo list and the add-dialog state.
///
/// Every transition runs to completion synchronously. After a transition that
/// changed state, the revision published on the watch channel is bumped so the
/// rendering side knows it has to redraw.
pub struct TodoListController {
    items: Vec<TodoItem>,
    dialog: DialogState,
    next_id: u64,
    revision_tx: watch::Sender<u64>,
}

impl Default for TodoListController {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoListController {
    /// Empty list, dialog closed
    pub fn new() -> Self {
        let (revision_tx, _) = watch::channel(0);
        Self {
            items: Vec::new(),
            dialog: DialogState::Closed,
            next_id: 1,
            revision_tx,
        }
    }

    /// Receiver that observes a new revision after each state change
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision_tx.subscribe()
    }

    /// Current revision number
    #[cfg(test)]
    pub fn revision(&self) -> u64 {
        *self.revision_tx.borrow()
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    #[cfg(test)]
    pub fn get(&self, id: ItemId) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn done_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_done).count()
    }

    #[cfg(test)]
    pub fn dialog(&self) -> &DialogState {
        &self.dialog
    }

    pub fn dialog_open(&self) -> bool {
        self.dialog.is_open()
    }

    /// Draft text, empty while the dialog is closed
    pub fn draft_text(&self) -> &str {
        match &self.dialog {
            DialogState::Open { draft_text, .. } => draft_text,
            DialogState::Closed => "",
        }
    }

    pub fn validation_error(&self) -> bool {
        matches!(
            self.dialog,
            DialogState::Open {
                validation_error: true,
                ..
            }
        )
    }

    /// Show the add dialog with an empty draft. Keeps the draft if already open.
    pub fn open_add_dialog(&mut self) {
        if self.dialog.is_open() {
            trace!("add dialog already open");
            return;
        }

        self.dialog = DialogState::Open {
            draft_text: String::new(),
            validation_error: false,
        };
        debug!("add dialog opened");
        self.notify();
    }

    /// Close the dialog, discarding the draft and any validation error
    pub fn cancel_add_dialog(&mut self) {
        if !self.dialog.is_open() {
            return;
        }

        self.dialog = DialogState::Closed;
        debug!("add dialog cancelled");
        self.notify();
    }

    /// Replace the draft. The validation flag is left as is.
    pub fn update_draft_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        match &mut self.dialog {
            DialogState::Open { draft_text, .. } => {
                if *draft_text == text {
                    return;
                }
                *draft_text = text;
            }
            DialogState::Closed => {
                trace!("draft update ignored, dialog closed");
                return;
            }
        }
        self.notify();
    }

    pub fn clear_draft_text(&mut self) {
        self.update_draft_text(String::new());
    }

    /// Validate the draft and append it as a new item.
    ///
    /// An empty draft sets the validation flag and leaves the dialog open.
    pub fn submit_add_dialog(&mut self) -> Result<ItemId, TodoError> {
        let DialogState::Open {
            draft_text,
            validation_error,
        } = &mut self.dialog
        else {
            return Err(TodoError::DialogClosed);
        };

        if draft_text.is_empty() {
            if !*validation_error {
                *validation_error = true;
                self.notify();
            }
            debug!("rejected empty draft");
            return Err(TodoError::EmptyDraft);
        }

        let text = std::mem::take(draft_text);
        self.dialog = DialogState::Closed;

        let id = ItemId::new(self.next_id);
        self.next_id += 1;
        info!(%id, text = %text, "todo added");
        self.items.push(TodoItem::new(id, text));
        self.notify();

        Ok(id)
    }

    /// Flip the done flag of the item with the same id as `item`
    pub fn toggle_done(&mut self, item: &TodoItem) -> bool {
        let Some(target) = self.items.iter_mut().find(|it| it.id == item.id) else {
            debug!(id = %item.id, "toggle for unknown item");
            return false;
        };

        target.is_done = !target.is_done;
        info!(id = %target.id, done = target.is_done, "todo toggled");
        self.notify();
        true
    }

    /// Flip every item whose text and done flag equal `item`'s.
    ///
    /// Duplicates are indistinguishable here, so all of them change together.
    pub fn toggle_done_matching(&mut self, item: &TodoItem) -> usize {
        let mut flipped = 0;
        for target in self.items.iter_mut().filter(|it| it.same_value(item)) {
            target.is_done = !target.is_done;
            flipped += 1;
        }

        if flipped > 0 {
            info!(text = %item.text(), flipped, "todos toggled by value");
            self.notify();
        }
        flipped
    }

    fn notify(&self) {
        self.revision_tx.send_modify(|revision| *revision += 1);
    }
}
