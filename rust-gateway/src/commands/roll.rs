//! The `roll` command: roll dice from a roll20-style formula.
//!
//! The actual dice engine is a placeholder; it understands plain `NdM`
//! formulas and nothing else. Formula errors are reported to the user as a
//! normal reply, never as a request failure.

use rand::Rng;

use crate::commands::definition::{
    CommandDefinition, CommandOptionDefinition, OPTION_TYPE_STRING,
};
use crate::commands::CommandHandler;
use crate::interaction::response::ResponseData;

/// Command schema for registration, localizations included.
pub fn definition() -> CommandDefinition {
    let mut definition = CommandDefinition::new(
        "roll",
        "Roll some dice according to a roll20 style dice formula",
    );

    definition.name_localizations = Some(
        [("fr", "lancer"), ("es", "tirar"), ("de", "würfeln")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    );
    definition.description_localizations = Some(
        [
            ("fr", "Lancer des dés selon une formule de dés de style roll20"),
            ("es", "Tira unos dados según una fórmula de dados de estilo roll20"),
            ("de", "Würfeln Sie einige Würfel nach einer Roll20-Stil-Würfelformel"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect(),
    );
    definition.options = vec![CommandOptionDefinition {
        kind: OPTION_TYPE_STRING,
        name: "dice".to_string(),
        description: "The dice formula to roll".to_string(),
        required: true,
        // TODO: autocomplete from the user's prior rolls once storage lands
        autocomplete: false,
    }];

    definition
}

/// Build the roll handler.
pub fn handler() -> CommandHandler {
    Box::new(|options| {
        let formula = options
            .iter()
            .find(|o| o.name == "dice")
            .and_then(|o| o.as_str())
            .unwrap_or("");

        ResponseData::message(roll_formula(formula))
    })
}

/// Maximum dice per roll and faces per die accepted by the placeholder.
const MAX_COUNT: u64 = 100;
const MAX_SIDES: u64 = 1000;

/// Evaluate a plain `NdM` formula, e.g. `2d6`.
fn roll_formula(formula: &str) -> String {
    let Some((count, sides)) = parse_formula(formula) else {
        return format!(
            "I could not read `{}` as a dice formula. Try something like `2d6`.",
            formula
        );
    };

    let mut rng = rand::thread_rng();
    let rolls: Vec<u64> = (0..count).map(|_| rng.gen_range(1..=sides)).collect();
    let total: u64 = rolls.iter().sum();

    let rolls_text = rolls
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    format!("Rolling {}: {} (total {})", formula.trim(), rolls_text, total)
}

/// Parse `NdM` into (count, sides). Count defaults to 1 when omitted.
fn parse_formula(formula: &str) -> Option<(u64, u64)> {
    let formula = formula.trim().to_lowercase();
    let (count, sides) = formula.split_once('d')?;

    let count: u64 = if count.is_empty() { 1 } else { count.parse().ok()? };
    let sides: u64 = sides.parse().ok()?;

    if count == 0 || count > MAX_COUNT || sides < 2 || sides > MAX_SIDES {
        return None;
    }

    Some((count, sides))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::types::CommandOption;

    fn dice_option(value: &str) -> CommandOption {
        serde_json::from_value(serde_json::json!({
            "name": "dice",
            "type": 3,
            "value": value,
        }))
        .unwrap()
    }

    #[test]
    fn test_parse_formula() {
        assert_eq!(parse_formula("2d6"), Some((2, 6)));
        assert_eq!(parse_formula("d20"), Some((1, 20)));
        assert_eq!(parse_formula(" 3D8 "), Some((3, 8)));
        assert_eq!(parse_formula("0d6"), None);
        assert_eq!(parse_formula("2d1"), None);
        assert_eq!(parse_formula("101d6"), None);
        assert_eq!(parse_formula("banana"), None);
        assert_eq!(parse_formula(""), None);
    }

    #[test]
    fn test_roll_totals_stay_in_range() {
        for _ in 0..50 {
            let text = roll_formula("3d6");
            let total: u64 = text
                .rsplit_once("(total ")
                .and_then(|(_, t)| t.trim_end_matches(')').parse().ok())
                .unwrap();
            assert!((3..=18).contains(&total), "total {} out of range", total);
        }
    }

    #[test]
    fn test_handler_reads_dice_option() {
        let handle = handler();
        let data = handle(&[dice_option("2d6")]);
        let content = data.content.unwrap();
        assert!(content.starts_with("Rolling 2d6:"));
        assert_eq!(data.flags, None);
    }

    #[test]
    fn test_handler_reports_bad_formula_as_message() {
        let handle = handler();
        let data = handle(&[dice_option("nonsense")]);
        assert!(data.content.unwrap().contains("could not read"));
    }

    #[test]
    fn test_handler_without_option() {
        let handle = handler();
        let data = handle(&[]);
        assert!(data.content.is_some());
    }

    #[test]
    fn test_definition_carries_localizations() {
        let definition = definition();
        let names = definition.name_localizations.unwrap();
        assert_eq!(names.get("fr").map(String::as_str), Some("lancer"));
        assert_eq!(names.get("de").map(String::as_str), Some("würfeln"));
        assert_eq!(definition.options.len(), 1);
        assert!(definition.options[0].required);
    }
}
