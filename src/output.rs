use owo_colors::OwoColorize;

/// Small wrapper around stdout/stderr printing to provide consistent, colored
/// user-facing messages. Colors are enabled only when output is a TTY.
fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if is_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// Print a plain user-facing line (no prefix).
pub fn print_user(msg: &str) {
    println!("{}", msg);
}

/// Section banner: a title framed by 60-column rules.
pub fn print_banner(title: &str) {
    let rule = "=".repeat(60);
    if is_tty() {
        println!("\n{}\n{}\n{}", rule.cyan(), format!("{title:^60}").bold(), rule.cyan());
    } else {
        println!("\n{rule}\n{title:^60}\n{rule}");
    }
}

/// Message in one of the chat theme colors.
pub fn print_themed(speaker: &str, msg: &str, color: owo_colors::AnsiColors) {
    if is_tty() {
        println!("{} {}", format!("{speaker}:").color(color).bold(), msg);
    } else {
        println!("{speaker}: {msg}");
    }
}

/// Shorten `s` to `max` characters, appending "..." when cut.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max).collect();
        format!("{head}...")
    }
}
