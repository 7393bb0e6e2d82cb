use clap::Args;
use folio_core::{Portfolio, SectionContent};

use super::{open_session, OutputFormat};
use crate::config::Config;

#[derive(Args)]
pub struct ShowCommand {
    /// Portfolio slug
    pub slug: String,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl ShowCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let session = open_session(config, &self.slug).await?;
        let portfolio = session.document();

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&portfolio)?);
            }
            OutputFormat::Text => print_portfolio(&portfolio),
        }
        Ok(())
    }
}

fn print_portfolio(portfolio: &Portfolio) {
    println!("Portfolio: {}", portfolio.slug);
    if let Some(id) = &portfolio.id {
        println!("ID: {}", id);
    } else {
        println!("ID: (not saved yet)");
    }
    println!("Visibility: {}", portfolio.visibility);
    println!("Layout: {}", portfolio.layout);
    println!("Theme: {}", portfolio.theme.name);

    let hero = &portfolio.hero;
    let fields = [
        ("title", &hero.title),
        ("subtitle", &hero.subtitle),
        ("description", &hero.description),
        ("image", &hero.image),
        ("avatar", &hero.avatar),
        ("ctaText", &hero.cta_text),
        ("ctaLink", &hero.cta_link),
    ];
    println!("\nHero:");
    for (name, value) in fields {
        match value {
            Some(v) if !v.is_empty() => println!("  {}: {}", name, v),
            Some(_) => {}
            None => println!("  {}: (null)", name),
        }
    }

    if portfolio.sections.is_empty() {
        println!("\nNo sections");
        return;
    }

    println!(
        "\n{:<5}  {:<28}  {:<13}  {:<7}  TITLE",
        "ORDER", "ID", "TYPE", "ENABLED"
    );
    println!("{}", "-".repeat(80));
    for section in &portfolio.sections {
        println!(
            "{:<5}  {:<28}  {:<13}  {:<7}  {}{}",
            section.order,
            section.id,
            section.kind.as_str(),
            if section.enabled { "yes" } else { "no" },
            section.title,
            content_summary(&section.content)
        );
    }
    println!("\nTotal: {} section(s)", portfolio.sections.len());
}

fn content_summary(content: &SectionContent) -> String {
    match content {
        SectionContent::List(items) if !items.is_empty() => format!(" ({} item(s))", items.len()),
        SectionContent::Text(text) if !text.is_empty() => format!(" ({} chars)", text.chars().count()),
        _ => String::new(),
    }
}
