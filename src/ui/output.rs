use crate::output::is_quiet;
use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;

pub fn header(text: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::RECEIPT, text.style(theme().header.clone()));
}

pub fn status(icon: &str, label: &str, value: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}: {}", icon, label.style(theme().dim.clone()), value);
}

pub fn success(label: &str) {
    println!("{} {}", Icons::CHECK, label.style(theme().success.clone()));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().warn.clone()));
}

pub fn info(label: &str, value: &str) {
    println!(
        "{} {}: {}",
        Icons::INFO.style(theme().info.clone()),
        label.style(theme().dim.clone()),
        value
    );
}

pub fn section(title: &str) {
    println!();
    println!("━{}━", title.style(theme().header.clone()));
}

pub fn empty(label: &str) {
    println!("{} {}", Icons::EMPTY, label.style(theme().muted.clone()));
}

pub fn dim(text: &str) -> String {
    text.style(theme().dim.clone()).to_string()
}

pub fn file_new(name: &str) -> String {
    format!(
        "{} {}",
        Icons::NEW.style(theme().success.clone()),
        name.style(theme().filename.clone())
    )
}

pub fn file_skipped(name: &str) -> String {
    format!("{} {}", Icons::SKIP, name.style(theme().muted.clone()))
}

pub fn file_failed(name: &str, error: &str) -> String {
    format!(
        "{} {} {}",
        Icons::CROSS.style(theme().error.clone()),
        name.style(theme().filename.clone()),
        error.style(theme().dim.clone())
    )
}

pub fn summary_row(label: &str, value: &str) {
    println!("  {} {}", label.style(theme().dim.clone()), value);
}
