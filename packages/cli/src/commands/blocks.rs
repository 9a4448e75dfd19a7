use anyhow::Result;
use colored::Colorize;
use mailframe_document::{schema, BlockType};

/// Print every block type with its content and style fields
pub fn blocks() -> Result<()> {
    println!("{}", "🧱 Block types".bright_blue().bold());
    println!();

    for block_type in BlockType::ALL {
        let schema = schema(block_type);
        let content: Vec<&str> = schema.content.keys().map(String::as_str).collect();
        let styles: Vec<&str> = schema.styles.keys().map(String::as_str).collect();

        println!("  {} {}", block_type.as_str().green().bold(), format!("({})", schema.label).dimmed());
        println!("    content: {}", content.join(", "));
        println!("    styles:  {}", styles.join(", "));
        if !schema.media_fields.is_empty() {
            println!("    media:   {}", schema.media_fields.join(", ").cyan());
        }
    }

    Ok(())
}
