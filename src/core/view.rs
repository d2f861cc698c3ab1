//! View capability and the non-owning document binding

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::core::document::TextDocument;

/// Non-owning binding from a view to a document.
///
/// The handle never keeps a document alive. After the owning container
/// replaces its document, any handle bound before the replacement upgrades
/// to `None`; views receive a fresh handle through `set_document` as part of
/// the replacement, so a live view is never left pointing at a freed
/// document.
pub struct DocHandle<D> {
    inner: Weak<RefCell<D>>,
}

impl<D> DocHandle<D> {
    /// Create a handle bound to `doc`
    pub fn bind(doc: &Rc<RefCell<D>>) -> Self {
        Self {
            inner: Rc::downgrade(doc),
        }
    }

    /// Create a handle bound to nothing
    pub fn unbound() -> Self {
        Self { inner: Weak::new() }
    }

    /// Get the bound document, if it is still the live one
    pub fn upgrade(&self) -> Option<Rc<RefCell<D>>> {
        self.inner.upgrade()
    }

    /// Whether the handle currently resolves to a live document
    pub fn is_bound(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

impl<D> Clone for DocHandle<D> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<D> Default for DocHandle<D> {
    fn default() -> Self {
        Self::unbound()
    }
}

/// Capability contract for a renderer bound to a document.
///
/// `set_document` is called on every document replacement and must tolerate
/// arbitrarily many rebinds over the view's lifetime. `render_scene` reads
/// the bound document and writes into the context; it must not mutate the
/// document. The context type is the implementation's own choice and is
/// passed through unexamined by everything else.
pub trait View<D>: Default {
    type Context;

    /// Rebind the view to a new document
    fn set_document(&mut self, doc: DocHandle<D>);

    /// Draw the bound document into the context
    fn render_scene(&mut self, _ctx: &mut Self::Context) {}
}

/// A view that renders nothing; for headless use of the container
pub struct NullView<D> {
    doc: DocHandle<D>,
}

impl<D> Default for NullView<D> {
    fn default() -> Self {
        Self {
            doc: DocHandle::unbound(),
        }
    }
}

impl<D> NullView<D> {
    /// The current document binding
    pub fn document(&self) -> &DocHandle<D> {
        &self.doc
    }
}

impl<D> View<D> for NullView<D> {
    type Context = ();

    fn set_document(&mut self, doc: DocHandle<D>) {
        self.doc = doc;
    }
}

/// Renders a text document's lines into an output buffer
#[derive(Default)]
pub struct ConsoleView {
    doc: DocHandle<TextDocument>,
}

impl ConsoleView {
    /// The current document binding
    pub fn document(&self) -> &DocHandle<TextDocument> {
        &self.doc
    }
}

impl View<TextDocument> for ConsoleView {
    type Context = Vec<String>;

    fn set_document(&mut self, doc: DocHandle<TextDocument>) {
        self.doc = doc;
    }

    fn render_scene(&mut self, out: &mut Vec<String>) {
        if let Some(doc) = self.doc.upgrade() {
            for line in doc.borrow().content().lines() {
                out.push(line.to_string());
            }
        }
    }
}
