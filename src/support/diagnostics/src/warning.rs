use crate::{Diagnostic, Location, show::Show};
use colored::Colorize;

pub struct WarningDiagnostic {
    message: String,
    location: Option<Location>,
}

impl WarningDiagnostic {
    pub fn new(message: impl ToString, location: Location) -> Self {
        Self {
            message: message.to_string(),
            location: Some(location),
        }
    }

    pub fn plain(message: impl ToString) -> Self {
        Self {
            message: message.to_string(),
            location: None,
        }
    }
}

impl Show for WarningDiagnostic {
    fn show(&self, w: &mut dyn std::fmt::Write) -> std::fmt::Result {
        if let Some(location) = &self.location {
            write!(
                w,
                "{}: {} {}",
                location,
                "warning:".yellow().bold(),
                self.message,
            )
        } else {
            write!(w, "{} {}", "warning:".yellow().bold(), self.message)
        }
    }
}

impl Diagnostic for WarningDiagnostic {}
