//! Check command - validate fields without sending

use crate::cli::FieldArgs;
use crate::cli::style::{Stylize, field_mark};
use anstream::{eprintln, println};
use contact_relay::config::ContactConfig;
use contact_relay::error::Result;
use contact_relay::types::{Field, FieldState};
use contact_relay::validate::field_problem;

/// Validate each field that was provided
///
/// Returns `true` when every provided field is valid.
pub async fn run_check(config: &ContactConfig, fields: FieldArgs) -> Result<bool> {
    let provided: Vec<Field> = [
        (Field::Name, fields.name.is_some()),
        (Field::Email, fields.email.is_some()),
        (Field::Message, fields.message.is_some()),
        (Field::File, fields.file.is_some()),
    ]
    .into_iter()
    .filter_map(|(field, given)| given.then_some(field))
    .collect();

    if provided.is_empty() {
        println!("{}", "Nothing to check".muted());
        println!(
            "{}",
            "Pass --name, --email, --message or --file".muted()
        );
        return Ok(true);
    }

    let request = fields.into_request(config.max_attachment_bytes).await?;
    let mut all_valid = true;

    for field in provided {
        match field_problem(field, &request, config.max_attachment_bytes) {
            None => println!("{} {}", field_mark(FieldState::Valid), field.accent()),
            Some(problem) => {
                all_valid = false;
                eprintln!(
                    "{} {}: {}",
                    field_mark(FieldState::Invalid),
                    field.accent().for_stderr(),
                    problem.error()
                );
            }
        }
    }

    Ok(all_valid)
}
