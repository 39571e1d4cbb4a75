//! Console output for the bump workflow.
//!
//! Success output goes to stdout, warnings and errors to stderr.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::descriptor::FieldUpdate;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Print the new value of each rewritten version field, one per line.
pub fn display_field_updates(updates: &[FieldUpdate]) {
    for update in updates {
        println!("{}", format_field_update(update));
    }
}

/// Render a field update as `<Field> = <value>`.
pub fn format_field_update(update: &FieldUpdate) -> String {
    format!("{} = {}", update.field, style(&update.value).bold())
}
