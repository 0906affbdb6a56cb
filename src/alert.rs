//! Alert partials for displaying success and error messages to users.
//!
//! Alerts are rendered into the `#alert-container` element via the HTMX
//! response-targets extension, so mutating endpoints can surface problems
//! without a full page reload.

use maud::{Markup, Render, html};

/// Alert message types for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertType {
    Success,
    Error,
}

/// Renders alert messages with appropriate styling
#[derive(Debug, Clone)]
pub struct AlertTemplate<'a> {
    pub alert_type: AlertType,
    pub message: &'a str,
    pub details: &'a str,
}

impl<'a> AlertTemplate<'a> {
    /// Create a new success alert
    pub fn success(message: &'a str, details: &'a str) -> Self {
        Self {
            alert_type: AlertType::Success,
            message,
            details,
        }
    }

    /// Create a new error alert
    pub fn error(message: &'a str, details: &'a str) -> Self {
        Self {
            alert_type: AlertType::Error,
            message,
            details,
        }
    }

    pub fn into_html(self) -> Markup {
        let (container_style, heading_style) = match self.alert_type {
            AlertType::Success => (
                "p-4 mb-4 rounded-lg bg-green-50 dark:bg-gray-800",
                "text-sm font-semibold text-green-800 dark:text-green-400",
            ),
            AlertType::Error => (
                "p-4 mb-4 rounded-lg bg-red-50 dark:bg-gray-800",
                "text-sm font-semibold text-red-800 dark:text-red-400",
            ),
        };

        html!(
            div
                class=(container_style)
                role="alert"
            {
                p class=(heading_style) { (self.message) }

                @if !self.details.is_empty() {
                    p class="text-sm text-gray-700 dark:text-gray-300" { (self.details) }
                }
            }
        )
    }
}

impl Render for AlertTemplate<'_> {
    fn render(&self) -> Markup {
        self.clone().into_html()
    }
}
