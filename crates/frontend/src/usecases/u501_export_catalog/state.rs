use leptos::prelude::*;

/// Tracks whether products changed since the last catalog export
#[derive(Clone, Copy)]
pub struct ProductEditState {
    pub edited: RwSignal<bool>,
}

impl ProductEditState {
    pub fn new() -> Self {
        Self {
            edited: RwSignal::new(false),
        }
    }

    pub fn mark_edited(&self) {
        self.edited.set(true);
    }

    pub fn reset(&self) {
        self.edited.set(false);
    }

    pub fn is_edited(&self) -> bool {
        self.edited.get()
    }
}

pub fn use_edit_state() -> ProductEditState {
    use_context::<ProductEditState>().expect("ProductEditState context not found")
}
