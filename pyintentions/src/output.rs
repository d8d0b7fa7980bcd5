use crate::intentions::{Intention, IntentionMetadata, Offer};
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use std::io::Write;

/// Helper to create a styled table
fn create_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers);
    table
}

/// Print the offers available at a cursor, as a table or as JSON.
///
/// # Errors
///
/// Returns an error if writing to the output or serializing fails.
pub fn print_offers(
    writer: &mut impl Write,
    location: &str,
    offers: &[Offer],
    json: bool,
) -> anyhow::Result<()> {
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(offers)?)?;
        return Ok(());
    }
    if offers.is_empty() {
        writeln!(
            writer,
            "{} {}",
            "No intentions available at".yellow(),
            location.bold()
        )?;
        return Ok(());
    }

    writeln!(writer, "\n{}", format!("Intentions at {location}").bold().underline())?;
    let mut table = create_table(vec!["Id", "Intention"]);
    for offer in offers {
        table.add_row(vec![
            Cell::new(offer.id).add_attribute(Attribute::Dim),
            Cell::new(&offer.label).add_attribute(Attribute::Bold),
        ]);
    }
    writeln!(writer, "{table}")?;
    Ok(())
}

/// Print the intention catalogue.
///
/// # Errors
///
/// Returns an error if writing to the output or serializing fails.
pub fn print_catalogue(
    writer: &mut impl Write,
    intentions: &[Box<dyn Intention>],
    json: bool,
) -> anyhow::Result<()> {
    let metadata: Vec<IntentionMetadata> =
        intentions.iter().map(|intention| intention.metadata()).collect();
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&metadata)?)?;
        return Ok(());
    }

    let mut table = create_table(vec!["Id", "Intention"]);
    for entry in &metadata {
        table.add_row(vec![
            Cell::new(entry.id).add_attribute(Attribute::Bold),
            Cell::new(entry.family),
        ]);
    }
    writeln!(writer, "{table}")?;
    Ok(())
}

/// Print the confirmation after writing a rewritten file.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_applied(writer: &mut impl Write, id: &str, path: &str) -> std::io::Result<()> {
    writeln!(
        writer,
        "{} {} {}",
        "[OK] Applied".green(),
        id.bold(),
        format!("to {path}").dimmed()
    )
}
