use colored::*;

pub const TOTAL_WIDTH: usize = 64;

pub fn header(msg: &str) {
    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = console::measure_text_width(&formatted);

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: String = format!(
        "{}{}{}",
        "─".repeat(left).bright_black(),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right).bright_black()
    );

    println!("{}", line);
}

pub fn separator() {
    println!("{}", "═".repeat(TOTAL_WIDTH).bright_black());
}

/// The operator-facing confirmation line after a successful publish.
pub fn confirmation(msg: &str) {
    println!("{}", msg.green());
}

pub fn body(report: &str) {
    println!("{}", report);
}
