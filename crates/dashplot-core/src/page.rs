// File: crates/dashplot-core/src/page.rs
// Summary: Mount-point abstraction charts append into, plus an in-memory stack implementation.

use std::cell::RefCell;

use crate::surface::SharedSurface;

/// Where a chart surface (or a fallback note) gets appended.
pub trait MountPoint {
    fn append_surface(&self, surface: SharedSurface);
    fn append_note(&self, text: &str);
}

/// Something appended to a [`Stack`].
#[derive(Clone)]
pub enum MountedItem {
    Surface(SharedSurface),
    Note(String),
}

/// Ordered, append-only container.
#[derive(Default)]
pub struct Stack {
    items: RefCell<Vec<MountedItem>>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    pub fn items(&self) -> Vec<MountedItem> {
        self.items.borrow().clone()
    }

    pub fn surfaces(&self) -> Vec<SharedSurface> {
        self.items
            .borrow()
            .iter()
            .filter_map(|it| match it {
                MountedItem::Surface(s) => Some(s.clone()),
                MountedItem::Note(_) => None,
            })
            .collect()
    }

    pub fn notes(&self) -> Vec<String> {
        self.items
            .borrow()
            .iter()
            .filter_map(|it| match it {
                MountedItem::Note(n) => Some(n.clone()),
                MountedItem::Surface(_) => None,
            })
            .collect()
    }
}

impl MountPoint for Stack {
    fn append_surface(&self, surface: SharedSurface) {
        self.items.borrow_mut().push(MountedItem::Surface(surface));
    }

    fn append_note(&self, text: &str) {
        self.items.borrow_mut().push(MountedItem::Note(text.to_string()));
    }
}
