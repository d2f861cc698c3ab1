//! Line-oriented shell over one document container

use std::io::{self, BufRead, Write};

use anyhow::Result;

use crate::core::config::AppConfig;
use crate::core::container::DocumentContainer;
use crate::core::document::TextDocument;
use crate::core::view::{ConsoleView, View};

/// Interactive shell owning one document slot.
///
/// Commands are dispatched through [`execute`](Self::execute), which returns
/// the output lines for the caller to print. Document errors are reported as
/// output, not propagated; the shell keeps running.
pub struct DocShell {
    /// The managed document and its view
    container: DocumentContainer<TextDocument, ConsoleView>,
    /// Shell configuration
    config: AppConfig,
    /// Input history
    input_history: Vec<String>,
}

impl Default for DocShell {
    fn default() -> Self {
        Self::new()
    }
}

impl DocShell {
    /// Create a shell, loading config from disk or using defaults
    pub fn new() -> Self {
        let config = AppConfig::load().unwrap_or_default();
        Self::with_config(config)
    }

    /// Create a shell with an explicit configuration
    pub fn with_config(config: AppConfig) -> Self {
        let mut container = DocumentContainer::new();
        container.set_update_hook(|| tracing::debug!("Document changed, views refreshed"));
        container.new_document(None);

        Self {
            container,
            config,
            input_history: Vec::new(),
        }
    }

    /// The managed container
    pub fn container(&self) -> &DocumentContainer<TextDocument, ConsoleView> {
        &self.container
    }

    /// Get command history
    #[allow(dead_code)]
    pub fn history(&self) -> &[String] {
        &self.input_history
    }

    /// Execute one command line and return its output lines
    pub fn execute(&mut self, line: &str) -> Vec<String> {
        let line = line.trim();
        if line.is_empty() {
            return Vec::new();
        }
        self.input_history.push(line.to_string());

        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };

        match cmd {
            "new" | "new!" => self.cmd_new(rest, cmd.ends_with('!')),
            "open" | "open!" => self.cmd_open(rest, cmd.ends_with('!')),
            "save" => self.cmd_save(rest),
            "append" => self.cmd_append(rest),
            "clear" => self.cmd_clear(),
            "show" => self.render(),
            "status" => self.status_lines(),
            "recent" => self.recent_lines(),
            "help" => Self::help_lines(),
            _ => vec![format!("unknown command: {} (try help)", cmd)],
        }
    }

    /// Run the stdin command loop; persists config on exit
    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        loop {
            write!(stdout, "{}> ", self.prompt())?;
            stdout.flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                break;
            }
            let line = line.trim();
            if matches!(line, "quit" | "exit" | "q") {
                break;
            }

            for out in self.execute(line) {
                writeln!(stdout, "{}", out)?;
            }
        }

        if let Err(e) = self.config.save() {
            tracing::error!("Failed to save config: {}", e);
        }
        Ok(())
    }

    /// Prompt text: display name plus a marker for unsaved changes
    fn prompt(&self) -> String {
        let name = if self.container.file_path().is_empty() {
            "(no file)"
        } else {
            self.container.file_name()
        };
        let marker = if self.container.is_modified() { "*" } else { "" };
        format!("{}{}", name, marker)
    }

    /// Unsaved content that a replacement would throw away
    fn unsaved_changes(&self) -> bool {
        self.config.shell.confirm_discard
            && self.container.is_modified()
            && !self.container.document().is_empty()
    }

    fn cmd_new(&mut self, name: &str, force: bool) -> Vec<String> {
        if self.unsaved_changes() && !force {
            return vec!["unsaved changes; use new! to discard them".to_string()];
        }
        let name = if name.is_empty() { None } else { Some(name) };
        self.container.new_document(name);
        vec![format!("new document: {}", self.container.file_name())]
    }

    fn cmd_open(&mut self, path: &str, force: bool) -> Vec<String> {
        if path.is_empty() {
            return vec!["usage: open <path>".to_string()];
        }
        if self.unsaved_changes() && !force {
            return vec!["unsaved changes; use open! to discard them".to_string()];
        }
        match self.container.open_document(path) {
            Ok(()) => {
                self.config.add_recent_file(path.to_string());
                vec![format!(
                    "opened {} ({} lines)",
                    self.container.file_name(),
                    self.container.document().line_count()
                )]
            }
            Err(e) => {
                tracing::error!("Failed to open document: {}", e);
                vec![format!("open failed: {}", e)]
            }
        }
    }

    fn cmd_save(&mut self, path: &str) -> Vec<String> {
        let path = if path.is_empty() { None } else { Some(path) };
        match self.container.save_document(path) {
            Ok(()) => {
                self.config
                    .add_recent_file(self.container.file_path().to_string());
                vec![format!("saved {}", self.container.file_path())]
            }
            Err(e) => {
                tracing::error!("Failed to save document: {}", e);
                vec![format!("save failed: {}", e)]
            }
        }
    }

    fn cmd_append(&mut self, text: &str) -> Vec<String> {
        self.container.document_mut().append_line(text);
        self.container.set_modified(true);
        Vec::new()
    }

    fn cmd_clear(&mut self) -> Vec<String> {
        let changed = self.container.document_mut().set_content(String::new());
        if changed {
            self.container.set_modified(true);
        }
        Vec::new()
    }

    fn render(&mut self) -> Vec<String> {
        let mut out = Vec::new();
        self.container.view_mut().render_scene(&mut out);
        out
    }

    fn status_lines(&self) -> Vec<String> {
        let path = self.container.file_path();
        vec![
            format!(
                "file:     {}",
                if path.is_empty() {
                    "(none)"
                } else {
                    self.container.file_name()
                }
            ),
            format!("path:     {}", if path.is_empty() { "(none)" } else { path }),
            format!("exists:   {}", self.container.file_exists()),
            format!("modified: {}", self.container.is_modified()),
            format!("lines:    {}", self.container.document().line_count()),
        ]
    }

    fn recent_lines(&self) -> Vec<String> {
        if self.config.recent_files.is_empty() {
            return vec!["no recent files".to_string()];
        }
        self.config.recent_files.clone()
    }

    fn help_lines() -> Vec<String> {
        [
            "new [name]     start a fresh document (new! discards unsaved changes)",
            "open <path>    load a document (open! discards unsaved changes)",
            "save [path]    write the document back, or to a new path",
            "append <text>  add a line to the document",
            "clear          empty the document",
            "show           render the document",
            "status         file name, path and flags",
            "recent         recently opened files",
            "quit           exit",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }
}
