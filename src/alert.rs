//! Error alerts that htmx swaps into the page's alert container.

use maud::{Markup, html};

/// An error message shown to the user after a failed request.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    /// The headline of the alert.
    pub message: String,
    /// Extra information, e.g. how to fix the problem.
    pub details: String,
}

impl Alert {
    /// Render the alert as an HTML fragment with a dismiss button.
    pub fn into_html(self) -> Markup {
        // Template adapted from https://flowbite.com/docs/components/alerts/
        html!(
            div
                role="alert"
                class="flex items-start p-4 mb-4 text-sm text-red-800 rounded-lg
                    bg-red-50 dark:bg-gray-800 dark:text-red-400 shadow"
            {
                div class="flex-1"
                {
                    p class="font-medium" { (self.message) }

                    @if !self.details.is_empty() {
                        p { (self.details) }
                    }
                }

                button
                    type="button"
                    aria-label="Dismiss"
                    class="ms-3 text-red-500 hover:text-red-700 bg-transparent border-none cursor-pointer"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "✕"
                }
            }
        )
    }
}
