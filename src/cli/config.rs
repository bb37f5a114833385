//! Config command - show the resolved configuration

use crate::cli::style::{Stream, Stylize, arrow, hyperlink, setting_key, source_tag};
use anstream::println;
use contact_relay::config::{ConfigSource, LoadedConfig};

/// Print each setting and where it came from
pub fn run_config(loaded: &LoadedConfig) {
    let config = &loaded.config;
    let source_of = |key: &str| {
        loaded
            .sources
            .iter()
            .find(|(k, _)| *k == key)
            .map_or(ConfigSource::Default, |(_, source)| *source)
    };

    println!("{}", "Contact relay configuration".emphasis());
    println!();

    let endpoint = hyperlink(Stream::Stdout, &config.endpoint, &config.endpoint);
    let rows: [(&str, String); 5] = [
        ("endpoint", endpoint),
        ("site_key", config.site_key.clone()),
        ("fallback_email", config.fallback_email.clone()),
        ("encoding", config.encoding.to_string()),
        (
            "verify_command",
            config
                .verify_command
                .clone()
                .unwrap_or_else(|| "(none)".to_string()),
        ),
    ];

    for (key, value) in rows {
        println!(
            "  {} {} {}  {}",
            setting_key(key),
            arrow(),
            value,
            source_tag(source_of(key))
        );
    }

    let token = if config.verify_token.is_some() {
        "(set)"
    } else {
        "(none)"
    };
    println!(
        "  {} {} {}  {}",
        setting_key("verify_token"),
        arrow(),
        token,
        source_tag(source_of("verify_token"))
    );

    println!();
    match &loaded.file {
        Some(path) if loaded.file_found => {
            println!("{} {}", "Config file:".muted(), path.display());
        }
        Some(path) => println!(
            "{} {} {}",
            "Config file:".muted(),
            path.display(),
            "(not found)".muted()
        ),
        None => println!("{}", "No config directory on this platform".muted()),
    }
}
