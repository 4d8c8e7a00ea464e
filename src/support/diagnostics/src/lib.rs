mod error;
mod location;
mod show;
mod warning;

#[cfg(test)]
mod tests;

use core::fmt::Debug;
pub use error::ErrorDiagnostic;
pub use location::Location;
use parking_lot::Mutex;
pub use show::Show;
pub use warning::WarningDiagnostic;

pub trait Diagnostic: Show + Send + Sync {}

#[derive(Clone, Debug)]
pub struct DiagnosticFlags {
    pub print_without_collecting: bool,
    pub warn_padded_field: bool,
    pub warn_padded_bitfield: bool,
    pub warn_padded_record: bool,
    pub warn_unnecessary_pack: bool,
}

impl DiagnosticFlags {
    /// Collects every warning the layout builder knows about
    pub fn all_collected() -> Self {
        Self {
            print_without_collecting: false,
            warn_padded_field: true,
            warn_padded_bitfield: true,
            warn_padded_record: true,
            warn_unnecessary_pack: true,
        }
    }
}

impl Default for DiagnosticFlags {
    fn default() -> Self {
        Self {
            print_without_collecting: false,
            warn_padded_field: false,
            warn_padded_bitfield: false,
            warn_padded_record: false,
            warn_unnecessary_pack: true,
        }
    }
}

pub struct Diagnostics {
    diagnostics: Mutex<Vec<Box<dyn Diagnostic>>>,
    flags: DiagnosticFlags,
}

impl Debug for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagnostics").finish_non_exhaustive()
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(DiagnosticFlags::default())
    }
}

impl Diagnostics {
    pub fn new(flags: DiagnosticFlags) -> Self {
        Self {
            diagnostics: Mutex::new(Vec::new()),
            flags,
        }
    }

    pub fn flags(&self) -> &DiagnosticFlags {
        &self.flags
    }

    pub fn push(&self, diagnostic: impl Diagnostic + 'static) {
        if self.flags.print_without_collecting {
            self.print(&diagnostic);
        } else {
            self.diagnostics.lock().push(Box::new(diagnostic));
        }
    }

    pub fn len(&self) -> usize {
        self.diagnostics.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Renders every collected diagnostic without color
    pub fn messages(&self) -> Vec<String> {
        colored::control::set_override(false);

        let messages = self
            .diagnostics
            .lock()
            .iter()
            .map(|diagnostic| {
                let mut message = String::new();
                let _ = diagnostic.show(&mut message);
                message
            })
            .collect();

        colored::control::unset_override();
        messages
    }

    pub fn print_all(&self) {
        for diagnostic in self.diagnostics.lock().iter() {
            self.print(&**diagnostic);
        }
    }

    pub fn print(&self, diagnostic: &dyn Diagnostic) {
        let mut message = String::new();

        if diagnostic.show(&mut message).is_ok() {
            eprintln!("{message}");
        }
    }
}
