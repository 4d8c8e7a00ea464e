use crate::{Diagnostic, Location, Show};
use colored::Colorize;

#[derive(Debug)]
pub struct ErrorDiagnostic {
    message: String,
    location: Option<Location>,
}

impl ErrorDiagnostic {
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

impl Show for ErrorDiagnostic {
    fn show(&self, w: &mut dyn std::fmt::Write) -> std::fmt::Result {
        if let Some(location) = &self.location {
            write!(
                w,
                "{}: {} {}",
                location,
                "error:".red().bold(),
                self.message
            )
        } else {
            write!(w, "{} {}", "error:".red().bold(), self.message)
        }
    }
}

impl Diagnostic for ErrorDiagnostic {}
