//! Document lifecycle container

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use crate::core::document::Document;
use crate::core::error::{IoError, Result};
use crate::core::view::{DocHandle, View};

/// Name given to documents created without one
pub const UNTITLED: &str = "untitled";

/// Substring of `path` after the last `\`, else after the last `/`,
/// else the whole string.
///
/// Both separators are recognized on every platform, so a path recorded
/// on one system displays the same on another.
pub fn display_name(path: &str) -> &str {
    match path.rfind('\\').or_else(|| path.rfind('/')) {
        Some(pos) => &path[pos + 1..],
        None => path,
    }
}

/// Object-safe lifecycle surface of a container.
///
/// Lets a caller drive containers with different document and view types
/// through one `Box<dyn DocumentLifecycle>`.
pub trait DocumentLifecycle {
    /// Full path last associated with the document
    fn file_path(&self) -> &str;
    /// Display name derived from the full path
    fn file_name(&self) -> &str;
    /// Load a document from `path`
    fn open_document(&mut self, path: &str) -> Result<()>;
    /// Persist the document to `path`, or to the current path if `None`
    fn save_document(&mut self, path: Option<&str>) -> Result<()>;
    /// Whether the content has a known on-disk file
    fn file_exists(&self) -> bool;
    /// Whether the content has changes not yet persisted
    fn is_modified(&self) -> bool;
}

/// Owns one document and one view bound to it, and coordinates the
/// new/open/save lifecycle against a backing file.
///
/// The container holds the only strong reference to its document; the view
/// is handed a weak [`DocHandle`] and is rebound on every replacement. A
/// document always exists after construction, so save can never observe an
/// empty slot. Open is transactional: the candidate document reads the file
/// before any container state is touched, so a failed open leaves the
/// current document, path, and flags exactly as they were.
///
/// Not synchronized; callers needing concurrent access must serialize
/// externally.
pub struct DocumentContainer<D: Document, V: View<D>> {
    document: Rc<RefCell<D>>,
    view: V,
    file_name: String,
    file_exists: bool,
    modified: bool,
    update_hook: Option<Box<dyn FnMut()>>,
}

impl<D: Document, V: View<D>> DocumentContainer<D, V> {
    /// Create a container with a fresh default document, not tied to a path
    pub fn new() -> Self {
        let document = Rc::new(RefCell::new(D::default()));
        let mut view = V::default();
        view.set_document(DocHandle::bind(&document));

        Self {
            document,
            view,
            file_name: String::new(),
            file_exists: false,
            modified: false,
            update_hook: None,
        }
    }

    /// Replace the document with a fresh one.
    ///
    /// The new document is named `name` (default `"untitled"`), marked
    /// modified and without a backing file. The old document is released
    /// and the view rebound.
    pub fn new_document(&mut self, name: Option<&str>) {
        let document = Rc::new(RefCell::new(D::default()));
        self.view.set_document(DocHandle::bind(&document));
        self.document = document;
        self.file_name = name.unwrap_or(UNTITLED).to_string();
        self.modified = true;
        self.file_exists = false;
        self.update_views();
    }

    /// Load a document from `path`.
    ///
    /// A candidate document reads the file first; only on success does it
    /// replace the current one. On failure the candidate is discarded, the
    /// container is untouched and the error is passed through.
    pub fn open_document(&mut self, path: &str) -> Result<()> {
        let mut candidate = D::default();
        candidate.read_file(path)?;

        let document = Rc::new(RefCell::new(candidate));
        self.view.set_document(DocHandle::bind(&document));
        self.document = document;
        self.file_name = path.to_string();
        self.modified = false;
        self.file_exists = true;
        self.update_views();
        Ok(())
    }

    /// Persist the document to `path`, or to the current path if `None`.
    ///
    /// Returns [`IoError::NoBackingPath`] when neither is available. On
    /// failure the path and flags are untouched and the error is passed
    /// through. Does not notify views: the document's identity is
    /// unchanged.
    pub fn save_document(&mut self, path: Option<&str>) -> Result<()> {
        let target = match path {
            Some(p) => p.to_string(),
            None => self.file_name.clone(),
        };
        if target.is_empty() {
            return Err(IoError::NoBackingPath);
        }

        self.document.borrow().write_file(&target)?;
        self.file_name = target;
        self.modified = false;
        self.file_exists = true;
        Ok(())
    }

    /// Full path last associated with the document; empty if none
    pub fn file_path(&self) -> &str {
        &self.file_name
    }

    /// Display name derived from the full path
    pub fn file_name(&self) -> &str {
        display_name(&self.file_name)
    }

    /// Whether the content has a known on-disk file
    pub fn file_exists(&self) -> bool {
        self.file_exists
    }

    /// Whether the content has changes not yet persisted
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Record whether the in-memory content diverges from the backing file
    pub fn set_modified(&mut self, modified: bool) {
        self.modified = modified;
    }

    /// Borrow the current document
    ///
    /// Panics if the document is mutably borrowed.
    pub fn document(&self) -> Ref<'_, D> {
        self.document.borrow()
    }

    /// Mutably borrow the current document
    ///
    /// Panics if the document is already borrowed. Callers that change
    /// content should record it with [`set_modified`](Self::set_modified).
    pub fn document_mut(&self) -> RefMut<'_, D> {
        self.document.borrow_mut()
    }

    /// The owned view
    pub fn view(&self) -> &V {
        &self.view
    }

    /// The owned view, mutably
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Install the hook run after every identity-changing mutation
    pub fn set_update_hook(&mut self, hook: impl FnMut() + 'static) {
        self.update_hook = Some(Box::new(hook));
    }

    /// Run the update hook, if one is installed
    pub fn update_views(&mut self) {
        if let Some(hook) = self.update_hook.as_mut() {
            hook();
        }
    }
}

impl<D: Document, V: View<D>> Default for DocumentContainer<D, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Document, V: View<D>> DocumentLifecycle for DocumentContainer<D, V> {
    fn file_path(&self) -> &str {
        Self::file_path(self)
    }

    fn file_name(&self) -> &str {
        Self::file_name(self)
    }

    fn open_document(&mut self, path: &str) -> Result<()> {
        Self::open_document(self, path)
    }

    fn save_document(&mut self, path: Option<&str>) -> Result<()> {
        Self::save_document(self, path)
    }

    fn file_exists(&self) -> bool {
        Self::file_exists(self)
    }

    fn is_modified(&self) -> bool {
        Self::is_modified(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::document::TextDocument;
    use crate::core::view::NullView;
    use std::cell::Cell;

    type TextContainer = DocumentContainer<TextDocument, NullView<TextDocument>>;

    fn write_fixture(dir: &tempfile::TempDir, name: &str, content: &str) -> String {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_new_container_state() {
        let container = TextContainer::new();
        assert_eq!(container.file_path(), "");
        assert!(!container.file_exists());
        assert!(!container.is_modified());
        assert!(container.document().is_empty());

        // view bound to the owned document from the start
        let bound = container.view().document().upgrade().unwrap();
        assert!(Rc::ptr_eq(&bound, &container.document));
    }

    #[test]
    fn test_new_document_state() {
        let mut container = TextContainer::new();
        container.new_document(None);
        assert_eq!(container.file_path(), UNTITLED);
        assert!(container.is_modified());
        assert!(!container.file_exists());

        container.new_document(Some("draft.txt"));
        assert_eq!(container.file_path(), "draft.txt");
        assert!(container.is_modified());
        assert!(!container.file_exists());
    }

    #[test]
    fn test_open_document_success() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "in.txt", "content\n");

        let mut container = TextContainer::new();
        container.open_document(&path).unwrap();

        assert_eq!(container.file_path(), path);
        assert!(container.file_exists());
        assert!(!container.is_modified());
        assert_eq!(container.document().content(), "content\n");

        let bound = container.view().document().upgrade().unwrap();
        assert!(Rc::ptr_eq(&bound, &container.document));
    }

    #[test]
    fn test_failed_open_preserves_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "in.txt", "kept\n");

        let mut container = TextContainer::new();
        container.open_document(&path).unwrap();
        container.set_modified(true);
        let before = container.view().document().upgrade().unwrap();

        let err = container.open_document("/no/such/missing.txt").unwrap_err();
        assert!(matches!(err, IoError::NotFound(_)));

        // same document instance, same path, same flags
        let after = container.view().document().upgrade().unwrap();
        assert!(Rc::ptr_eq(&before, &after));
        assert_eq!(container.file_path(), path);
        assert!(container.file_exists());
        assert!(container.is_modified());
        assert_eq!(container.document().content(), "kept\n");
    }

    #[test]
    fn test_stale_handle_dies_on_replacement() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "next.txt", "next\n");

        let mut container = TextContainer::new();
        let stale = container.view().document().clone();
        assert!(stale.is_bound());

        container.open_document(&path).unwrap();
        assert!(!stale.is_bound());
        assert!(container.view().document().is_bound());
    }

    #[test]
    fn test_save_uses_current_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "doc.txt", "v1\n");

        let mut container = TextContainer::new();
        container.open_document(&path).unwrap();
        container.document_mut().set_content("v2\n".to_string());
        container.set_modified(true);

        container.save_document(None).unwrap();
        assert_eq!(container.file_path(), path);
        assert!(!container.is_modified());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "v2\n");
    }

    #[test]
    fn test_save_as_updates_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "doc.txt", "data\n");
        let copy = dir.path().join("copy.txt");
        let copy_str = copy.to_str().unwrap();

        let mut container = TextContainer::new();
        container.open_document(&path).unwrap();
        container.set_modified(true);

        container.save_document(Some(copy_str)).unwrap();
        assert_eq!(container.file_path(), copy_str);
        assert!(!container.is_modified());
        assert!(container.file_exists());
        assert_eq!(std::fs::read_to_string(&copy).unwrap(), "data\n");
    }

    #[test]
    fn test_save_without_any_path() {
        let mut container = TextContainer::new();
        let err = container.save_document(None).unwrap_err();
        assert!(matches!(err, IoError::NoBackingPath));
        assert!(!container.file_exists());
    }

    #[test]
    fn test_failed_save_preserves_state() {
        let mut container = TextContainer::new();
        container.new_document(Some("draft.txt"));

        let err = container
            .save_document(Some("/no/such/dir/out.txt"))
            .unwrap_err();
        assert!(matches!(err, IoError::NotFound(_)));
        assert_eq!(container.file_path(), "draft.txt");
        assert!(container.is_modified());
        assert!(!container.file_exists());
    }

    #[test]
    fn test_display_name_separators() {
        assert_eq!(display_name("a/b\\c.txt"), "c.txt");
        assert_eq!(display_name("plain.txt"), "plain.txt");
        assert_eq!(display_name("dir/file"), "file");

        let mut container = TextContainer::new();
        container.new_document(Some("notes/today.txt"));
        assert_eq!(container.file_name(), "today.txt");
        assert_eq!(container.file_path(), "notes/today.txt");
    }

    #[test]
    fn test_update_hook_fires_on_identity_change_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "in.txt", "x\n");
        let out = dir.path().join("out.txt");

        let fired = Rc::new(Cell::new(0usize));
        let counter = Rc::clone(&fired);

        let mut container = TextContainer::new();
        container.set_update_hook(move || counter.set(counter.get() + 1));

        container.new_document(None);
        assert_eq!(fired.get(), 1);

        container.open_document(&path).unwrap();
        assert_eq!(fired.get(), 2);

        container.save_document(Some(out.to_str().unwrap())).unwrap();
        assert_eq!(fired.get(), 2);

        let _ = container.open_document("/no/such/missing.txt");
        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn test_lifecycle_trait_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "dyn.txt", "via trait\n");

        let mut container: Box<dyn DocumentLifecycle> = Box::new(TextContainer::new());
        container.open_document(&path).unwrap();
        assert_eq!(container.file_name(), "dyn.txt");
        assert!(container.file_exists());
        assert!(!container.is_modified());
    }

    #[test]
    fn test_lifecycle_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.txt");
        let out_str = out.to_str().unwrap();

        let mut container = TextContainer::new();

        container.new_document(None);
        assert!(container.is_modified());
        assert!(!container.file_exists());
        assert_eq!(container.file_path(), "untitled");

        container.save_document(Some(out_str)).unwrap();
        assert!(!container.is_modified());
        assert!(container.file_exists());
        assert_eq!(container.file_path(), out_str);

        let err = container.open_document("/no/such/missing.txt").unwrap_err();
        assert!(matches!(err, IoError::NotFound(_)));
        assert!(!container.is_modified());
        assert!(container.file_exists());
        assert_eq!(container.file_path(), out_str);
    }
}
