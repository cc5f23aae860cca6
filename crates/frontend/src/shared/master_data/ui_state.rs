//! Drawer/dialog/selection state of one master-data page.

/// Which overlay is open, if any.
///
/// The delete dialog carries the entity it confirms, so "delete dialog open
/// without a selection" cannot be represented.
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay<E> {
    None,
    /// Create (`None`) or edit (`Some`) drawer
    Drawer(Option<E>),
    DeleteDialog(E),
    BulkUploadDialog,
}

/// Per-page UI state, created with the page and passed down explicitly
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleUiState<E> {
    overlay: Overlay<E>,
}

impl<E> Default for ModuleUiState<E> {
    fn default() -> Self {
        Self {
            overlay: Overlay::None,
        }
    }
}

impl<E: Clone> ModuleUiState<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overlay(&self) -> &Overlay<E> {
        &self.overlay
    }

    pub fn selected(&self) -> Option<&E> {
        match &self.overlay {
            Overlay::Drawer(selected) => selected.as_ref(),
            Overlay::DeleteDialog(entity) => Some(entity),
            Overlay::None | Overlay::BulkUploadDialog => None,
        }
    }

    pub fn is_drawer_open(&self) -> bool {
        matches!(self.overlay, Overlay::Drawer(_))
    }

    pub fn is_delete_dialog_open(&self) -> bool {
        matches!(self.overlay, Overlay::DeleteDialog(_))
    }

    pub fn is_bulk_upload_open(&self) -> bool {
        matches!(self.overlay, Overlay::BulkUploadDialog)
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.overlay, Overlay::Drawer(Some(_)))
    }

    pub fn open_create(&mut self) {
        self.overlay = Overlay::Drawer(None);
    }

    pub fn open_edit(&mut self, entity: E) {
        self.overlay = Overlay::Drawer(Some(entity));
    }

    pub fn open_delete(&mut self, entity: E) {
        self.overlay = Overlay::DeleteDialog(entity);
    }

    pub fn open_bulk_upload(&mut self) {
        self.overlay = Overlay::BulkUploadDialog;
    }

    /// Closing any overlay also clears the selection
    pub fn close(&mut self) {
        self.overlay = Overlay::None;
    }
}
