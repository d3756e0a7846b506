//! Output formatting for CLI

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, Table};
use petlovers_core::form::plain_text;
use petlovers_core::{FetchError, Pet};

/// Shown once the server reports no further page
pub const END_OF_RESULTS: &str = "No More Pets Card to Show";

/// Shown while a continuation page is in flight
pub const LOADING_MORE: &str = "Loading more pets...";

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
    /// Compact format (single line per item)
    Compact,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Compact => write!(f, "compact"),
        }
    }
}

/// Output writer that handles different formats
pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, no_color: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Whether prompts and spinners make sense for this format
    pub fn is_interactive(&self) -> bool {
        self.format == OutputFormat::Table
    }

    /// Write a batch of pet cards
    pub fn write_cards(&self, pets: &[Pet]) -> Result<()> {
        match self.format {
            OutputFormat::Table => {
                if !pets.is_empty() {
                    println!("{}", card_table(pets));
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(pets)?);
            }
            OutputFormat::Compact => {
                for pet in pets {
                    println!(
                        "{}\t{}\t{}\t{}\t{}",
                        pet.id,
                        pet.pet_name,
                        format_age(pet.pet_age),
                        pet.pet_category,
                        pet.pet_location
                    );
                }
            }
        }
        Ok(())
    }

    /// Write a single pet in detail
    pub fn write_pet(&self, pet: &Pet) -> Result<()> {
        match self.format {
            OutputFormat::Table => display_pet(pet),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(pet)?),
            OutputFormat::Compact => self.write_cards(std::slice::from_ref(pet))?,
        }
        Ok(())
    }

    /// Write the end-of-results marker
    pub fn end_of_results(&self) {
        if self.format == OutputFormat::Table {
            println!("\n{}", END_OF_RESULTS.dimmed().italic());
        }
    }

    pub fn fetch_failed(&self, error: &FetchError) {
        let message = match error {
            FetchError::Transport(msg) => format!("Could not reach the server: {}", msg),
            FetchError::Server { status, message } => {
                format!("The server rejected the request ({}): {}", status, message)
            }
        };
        self.error(&message);
    }

    /// Write a success message
    pub fn success(&self, message: &str) {
        if self.format == OutputFormat::Table {
            println!("{} {}", "✓".green(), message);
        } else {
            eprintln!("{}", message);
        }
    }

    /// Write an error message
    pub fn error(&self, message: &str) {
        if self.format == OutputFormat::Table {
            eprintln!("{} {}", "✗".red(), message);
        } else {
            eprintln!("Error: {}", message);
        }
    }

    /// Write a warning message
    pub fn warning(&self, message: &str) {
        if self.format == OutputFormat::Table {
            eprintln!("{} {}", "⚠".yellow(), message);
        } else {
            eprintln!("Warning: {}", message);
        }
    }

    /// Write an info message
    pub fn info(&self, message: &str) {
        if self.format == OutputFormat::Table {
            println!("{} {}", "ℹ".blue(), message);
        } else {
            eprintln!("{}", message);
        }
    }

    /// Start a spinner for long operations
    pub fn spinner(&self, message: &str) -> Option<indicatif::ProgressBar> {
        if self.format != OutputFormat::Table {
            return None;
        }
        let pb = indicatif::ProgressBar::new_spinner();
        if let Ok(style) = indicatif::ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        Some(pb)
    }
}

fn styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS);
    table
}

fn card_header() -> Vec<Cell> {
    ["ID", "Name", "Age", "Category", "Location", "About"]
        .into_iter()
        .map(|h| Cell::new(h).fg(Color::Cyan))
        .collect()
}

fn card_table(pets: &[Pet]) -> Table {
    let mut table = styled_table();
    table.set_header(card_header());
    for pet in pets {
        table.add_row(vec![
            Cell::new(pet.id.as_str()),
            Cell::new(&pet.pet_name),
            Cell::new(format_age(pet.pet_age)),
            Cell::new(pet.pet_category.as_str()),
            Cell::new(&pet.pet_location),
            Cell::new(truncate(&pet.short_description, 40)),
        ]);
    }
    table
}

fn display_pet(pet: &Pet) {
    print_section(&pet.pet_name);
    print_field("ID", pet.id.as_str());
    print_field("Age", &format_age(pet.pet_age));
    print_field("Category", pet.pet_category.as_str());
    print_field("Location", &pet.pet_location);
    print_optional_field("Image", pet.pet_image.as_deref());
    if pet.adopted {
        print_field("Status", "adopted");
    }
    print_field("Summary", &pet.short_description);

    let details = plain_text(&pet.long_description);
    if !details.is_empty() {
        print_section("About");
        for line in details.lines() {
            println!("  {}", line);
        }
    }
}

/// Print a key-value pair in detail format
pub fn print_field(key: &str, value: &str) {
    println!("  {}: {}", key.cyan(), value);
}

/// Print an optional key-value pair
pub fn print_optional_field(key: &str, value: Option<&str>) {
    if let Some(v) = value {
        print_field(key, v);
    }
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// Render an age given in months, e.g. "2 yrs 3 mos"
pub fn format_age(months: u32) -> String {
    let (years, rest) = (months / 12, months % 12);
    let unit = |n: u32, one: &str, many: &str| format!("{} {}", n, if n == 1 { one } else { many });
    match (years, rest) {
        (0, m) => unit(m, "mo", "mos"),
        (y, 0) => unit(y, "yr", "yrs"),
        (y, m) => format!("{} {}", unit(y, "yr", "yrs"), unit(m, "mo", "mos")),
    }
}

/// Truncate to at most `max` characters, appending an ellipsis when cut
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
