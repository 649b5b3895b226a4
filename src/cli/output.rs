//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::Subscription;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print "{label}: {value}" with the value in bold cyan.
pub fn labeled(label: &str, value: &str) {
    println!("{label}: {}", style(value).cyan().bold());
}

/// Print a table of subscriptions (Name, Subscription ID, Tenant ID).
pub fn print_subscriptions_table(subscriptions: &[Subscription]) {
    if subscriptions.is_empty() {
        info("No subscriptions found");
        tip("Run `az login` to sign in.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Subscription name", "Subscription ID", "Tenant ID"]);

    for s in subscriptions {
        table.add_row(vec![
            s.display_name.clone(),
            s.id.clone(),
            s.tenant_id.clone(),
        ]);
    }

    println!("{table}");
}
