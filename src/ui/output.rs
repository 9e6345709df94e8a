use crate::dog::Dog;
use crate::output::is_quiet;
use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;

/// Decorative lines are dropped when quiet; results and diagnostics never are.
fn gate(quiet: bool, line: String) -> Option<String> {
    if quiet { None } else { Some(line) }
}

fn print_decorative(line: String) {
    if let Some(line) = gate(is_quiet(), line) {
        println!("{}", line);
    }
}

pub fn header(text: &str) {
    print_decorative(format!("{} {}", Icons::PAW, text.style(theme().header.clone())));
}

pub fn success(label: &str) {
    print_decorative(format!("{} {}", Icons::CHECK, label.style(theme().success.clone())));
}

/// Status line without a trailing value, e.g. an empty listing
pub fn notice(icon: &str, label: &str) {
    print_decorative(format!("{} {}", icon, label.style(theme().dim.clone())));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, label.style(theme().error.clone()));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().warn.clone()));
}

pub fn info(label: &str, value: &str) {
    print_decorative(format!(
        "{} {}: {}",
        Icons::INFO.style(theme().info.clone()),
        label.style(theme().dim.clone()),
        value
    ));
}

pub fn section(title: &str) {
    print_decorative(format!("\n━{}━", title.style(theme().header.clone())));
}

pub fn summary_row(label: &str, value: &str) {
    println!("  {} {}", label.style(theme().dim.clone()), value);
}

/// One-line rendering of a dog: `🐕 #1 Teddy (cockapoo)`
pub fn dog_line(dog: &Dog) {
    let id = dog
        .id()
        .map(|id| format!("#{}", id))
        .unwrap_or_else(|| "#new".to_string());
    println!(
        "{} {} {} {}",
        Icons::DOG,
        id.style(theme().dim.clone()),
        dog.name.style(theme().name.clone()),
        format!("({})", dog.breed).style(theme().dim.clone())
    );
    if let Some(color) = &dog.color {
        summary_row("color:", color);
    }
    if let Some(instagram) = &dog.instagram {
        summary_row("instagram:", instagram);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_drops_lines_when_quiet() {
        assert_eq!(gate(true, "✅ saved".to_string()), None);
        assert_eq!(gate(false, "✅ saved".to_string()).as_deref(), Some("✅ saved"));
    }
}
