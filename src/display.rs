use anyhow::Result;
use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::models::CourseRecord;

const SEPARATOR: &str = "------------------------------";

pub fn print_banner() {
    println!("{}", "Udemy Coupons!".bright_magenta().bold());
    println!();
}

pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub fn prompt_search_term() -> Result<String> {
    let term: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("What course do you wanna search?")
        .allow_empty(true)
        .interact_text()?;
    Ok(term)
}

pub fn print_results(records: &[&CourseRecord]) {
    println!("{}", SEPARATOR);
    for record in records {
        println!(" ");
        println!(
            "{} {}",
            "Name:".on_magenta(),
            record.title.as_deref().unwrap_or_default()
        );
        println!(" ");
        println!("{} {}", "Coupon Code:".on_cyan(), record.link);
        println!(" ");
        println!("{} {}", "Category:".on_green(), record.category_label());
        println!(" ");
        println!("{}", SEPARATOR);
    }
    println!("{}", summary_line(records.len()).bold());
}

fn summary_line(matches: usize) -> String {
    match matches {
        0 => "No matching coupons found".to_string(),
        1 => "1 matching coupon".to_string(),
        n => format!("{} matching coupons", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_pluralizes() {
        assert_eq!(summary_line(0), "No matching coupons found");
        assert_eq!(summary_line(1), "1 matching coupon");
        assert_eq!(summary_line(12), "12 matching coupons");
    }
}
