//! Send command - submit the contact form to the relay

use crate::cli::style::{Stylize, arrow, outcome_mark};
use crate::cli::{CliView, FieldArgs};
use anstream::{eprintln, println};
use contact_relay::config::ContactConfig;
use contact_relay::error::{Error, Result};
use contact_relay::relay::{HttpRelay, Payload};
use contact_relay::submit::{ContactForm, SubmissionPipeline, preview_submission};
use contact_relay::types::{Field, SubmissionRequest, SubmissionResult};
use contact_relay::verify::create_verifier;
use dialoguer::Input;
use std::sync::Arc;
use tracing::debug;

/// Options for `contact send`
#[derive(Debug, Clone, Default)]
pub struct SendArgs {
    /// Form fields
    pub fields: FieldArgs,
    /// Validate and show the payload without sending
    pub dry_run: bool,
    /// Prompt for missing text fields
    pub interactive: bool,
}

/// Run the send command
///
/// Returns `true` when the relay accepted the message (or the dry run
/// validated).
pub async fn run_send(config: ContactConfig, args: SendArgs) -> Result<bool> {
    let mut fields = args.fields;
    if args.interactive {
        prompt_missing(&mut fields)?;
    }
    let request = fields.into_request(config.max_attachment_bytes).await?;

    if args.dry_run {
        return report_dry_run(&config, &request);
    }

    let verifier = create_verifier(&config)?;
    let relay = Arc::new(HttpRelay::new(
        config.endpoint.clone(),
        config.request_timeout,
    )?);
    let view = Arc::new(CliView::new(config.fallback_email.clone()));
    let pipeline = SubmissionPipeline::new(config, verifier, relay);

    let shutdown = pipeline.shutdown_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("interrupt received, abandoning verification wait");
            shutdown.cancel();
        }
    });

    let form = ContactForm::new(pipeline, view);
    form.set_field(Field::Name, request.name);
    form.set_field(Field::Email, request.email);
    form.set_field(Field::Message, request.message);
    if let Some(attachment) = request.attachment {
        form.attach(attachment);
    }

    match form.submit().await {
        Some(SubmissionResult::Accepted) => Ok(true),
        Some(SubmissionResult::TransportFailure { detail }) => {
            eprintln!("  {} {}", "relay said:".muted().for_stderr(), detail);
            Ok(false)
        }
        Some(SubmissionResult::Rejected { .. }) | None => Ok(false),
    }
}

fn prompt_missing(fields: &mut FieldArgs) -> Result<()> {
    for (label, slot) in [
        ("Name", &mut fields.name),
        ("Email", &mut fields.email),
        ("Message", &mut fields.message),
    ] {
        if slot.is_none() {
            let value = Input::<String>::new()
                .with_prompt(label)
                .allow_empty(true)
                .interact_text()
                .map_err(|e| Error::Io(std::io::Error::other(e.to_string())))?;
            *slot = Some(value);
        }
    }
    Ok(())
}

fn report_dry_run(config: &ContactConfig, request: &SubmissionRequest) -> Result<bool> {
    let payload = match preview_submission(config, request) {
        Ok(payload) => payload,
        Err(Error::Validation(reason)) => {
            eprintln!("{} {}", outcome_mark(false), reason.error());
            return Ok(false);
        }
        Err(e) => return Err(e),
    };

    println!("{}", "Dry run - nothing will be sent".warn().for_stdout());
    println!("{} POST {}", arrow(), config.endpoint.accent());
    println!("  {} {}", "encoding:".muted(), payload);

    match &payload {
        Payload::UrlEncoded(body) => println!("  {} {}", "body:".muted(), body),
        Payload::Json(body) => println!("  {} {} bytes", "body:".muted(), body.len()),
        Payload::Multipart { fields, file } => {
            for (key, _) in fields {
                println!("  {} {}", "part:".muted(), key.accent());
            }
            println!(
                "  {} file ({}, {}, {} bytes)",
                "part:".muted(),
                file.file_name,
                file.mime_type,
                file.size_bytes
            );
        }
    }

    Ok(true)
}
