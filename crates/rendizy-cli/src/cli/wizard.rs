//! Wizard subcommands.

use anyhow::{Result, anyhow};
use clap::Subcommand;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use rendizy_core::wizard::{PROPERTY_WIZARD, effective_validation};
use rendizy_types::wizard::{Modality, StepValidation};

#[derive(Subcommand)]
pub enum WizardCommand {
    /// Show every wizard step with its validation level.
    Steps {
        /// Property modality (repeatable): short_term_rental, residential_rental, buy_sell.
        #[arg(long = "modality", short = 'm')]
        modalities: Vec<String>,
    },
}

pub fn handle_wizard_command(cmd: WizardCommand, json: bool) -> Result<()> {
    match cmd {
        WizardCommand::Steps { modalities } => {
            let modalities = parse_modalities(&modalities)?;
            list_steps(&modalities, json)
        }
    }
}

fn parse_modalities(raw: &[String]) -> Result<Vec<Modality>> {
    raw.iter()
        .map(|m| m.parse::<Modality>().map_err(|e| anyhow!(e)))
        .collect()
}

fn validation_cell(validation: StepValidation) -> Cell {
    let color = match validation {
        StepValidation::Required => Color::Red,
        StepValidation::Recommended => Color::Yellow,
        StepValidation::Optional => Color::DarkGrey,
    };
    Cell::new(validation.to_string()).fg(color)
}

fn list_steps(modalities: &[Modality], json: bool) -> Result<()> {
    if json {
        let blocks: Vec<_> = PROPERTY_WIZARD
            .iter()
            .map(|block| {
                let steps: Vec<_> = block
                    .steps
                    .iter()
                    .map(|step| {
                        serde_json::json!({
                            "id": step.id,
                            "title": step.title,
                            "validation": effective_validation(step, modalities),
                        })
                    })
                    .collect();
                serde_json::json!({ "id": block.id, "title": block.title, "steps": steps })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "blocks": blocks }))?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("#").fg(Color::White),
        Cell::new("Block").fg(Color::White),
        Cell::new("Step").fg(Color::White),
        Cell::new("Title").fg(Color::White),
        Cell::new("Validation").fg(Color::White),
    ]);

    let mut number = 0;
    for block in PROPERTY_WIZARD {
        for step in block.steps {
            number += 1;
            table.add_row(vec![
                Cell::new(number),
                Cell::new(block.title),
                Cell::new(step.id).fg(Color::Cyan),
                Cell::new(step.title),
                validation_cell(effective_validation(step, modalities)),
            ]);
        }
    }

    println!();
    println!("  {} ({} steps)", style("Property wizard").bold(), number);
    println!();
    println!("{table}");
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_modalities() {
        let parsed = parse_modalities(&["short_term_rental".to_string()]).unwrap();
        assert_eq!(parsed, vec![Modality::ShortTermRental]);
        assert!(parse_modalities(&["hotel".to_string()]).is_err());
        assert!(parse_modalities(&[]).unwrap().is_empty());
    }
}
