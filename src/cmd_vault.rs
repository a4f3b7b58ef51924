//! Vault management subcommands.

use std::path::Path;

use keyhold_config::Config;
use keyhold_core::{generate, is_weak, GeneratorOptions, PausedSites, VaultService};
use keyhold_protocols::{CredentialRecord, PausedFeature};

use crate::cli::{Commands, FeatureArg};
use crate::server::open_store;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Handle every subcommand except `serve`.
pub(crate) async fn handle_vault_command(command: Commands, config: &Config) -> CmdResult {
    let store = open_store(config);
    let vault = VaultService::new(store.clone());
    let paused = PausedSites::new(store);

    match command {
        Commands::Serve => Ok(()),
        Commands::List {
            filter,
            weak,
            reveal,
            format,
        } => list(&vault, filter.as_deref().unwrap_or(""), weak, reveal, &format).await,
        Commands::Add {
            site,
            username,
            password,
        } => {
            let password = password.unwrap_or_else(|| generate(&generator_options(config)));
            let record = vault.add(&site, &username, &password).await?;
            println!("Added {} ({})", record.site, record.id);
            Ok(())
        }
        Commands::Edit {
            id,
            site,
            username,
            password,
        } => edit(&vault, &id, site, username, password).await,
        Commands::Remove { id } => {
            let removed = vault.remove(&id).await?;
            println!("Removed {} for {}", removed.username, removed.site);
            Ok(())
        }
        Commands::Export { output } => export(&vault, output.as_deref()).await,
        Commands::Import { file } => {
            let text = tokio::fs::read_to_string(&file).await?;
            let imported = vault.import_csv(&text).await?;
            println!("Imported {} logins from {}", imported, file.display());
            Ok(())
        }
        Commands::Generate {
            length,
            no_letters,
            no_digits,
            no_symbols,
        } => {
            let mut options = generator_options(config);
            if let Some(length) = length {
                options.length = length;
            }
            options.letters &= !no_letters;
            options.digits &= !no_digits;
            options.symbols &= !no_symbols;
            println!("{}", generate(&options));
            Ok(())
        }
        Commands::Pause { feature, hostname } => {
            toggle(&paused, feature.into(), &hostname, true).await
        }
        Commands::Resume { feature, hostname } => {
            toggle(&paused, feature.into(), &hostname, false).await
        }
        Commands::Paused { feature } => show_paused(&paused, feature).await,
    }
}

fn generator_options(config: &Config) -> GeneratorOptions {
    GeneratorOptions {
        length: config.generator.length,
        letters: config.generator.letters,
        digits: config.generator.digits,
        symbols: config.generator.symbols,
    }
}

fn masked(password: &str, reveal: bool) -> String {
    if reveal {
        password.to_string()
    } else {
        "*".repeat(password.chars().count().min(12))
    }
}

async fn list(vault: &VaultService, term: &str, weak: bool, reveal: bool, format: &str) -> CmdResult {
    let records = vault.filter(term, weak).await?;

    if records.is_empty() {
        println!("No logins found.");
        return Ok(());
    }

    match format {
        "json" => {
            let shown: Vec<CredentialRecord> = records
                .into_iter()
                .map(|mut record| {
                    record.password = masked(&record.password, reveal);
                    record
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&shown)?);
        }
        _ => {
            println!("{:<38} {:<28} {:<28} {}", "ID", "SITE", "USERNAME", "PASSWORD");
            println!("{}", "-".repeat(110));
            for record in records {
                let weak_mark = if is_weak(&record.password) { " (weak)" } else { "" };
                println!(
                    "{:<38} {:<28} {:<28} {}{}",
                    record.id,
                    record.site,
                    record.username,
                    masked(&record.password, reveal),
                    weak_mark
                );
            }
        }
    }

    Ok(())
}

async fn edit(
    vault: &VaultService,
    id: &str,
    site: Option<String>,
    username: Option<String>,
    password: Option<String>,
) -> CmdResult {
    let current = vault
        .list()
        .await?
        .into_iter()
        .find(|record| record.id == id)
        .ok_or_else(|| keyhold_core::VaultError::NotFound(id.to_string()))?;

    let updated = vault
        .update(
            id,
            site.as_deref().unwrap_or(&current.site),
            username.as_deref().unwrap_or(&current.username),
            password.as_deref().unwrap_or(&current.password),
        )
        .await?;
    println!("Updated {} for {}", updated.username, updated.site);
    Ok(())
}

async fn export(vault: &VaultService, output: Option<&Path>) -> CmdResult {
    let csv = vault.export_csv().await?;
    match output {
        Some(path) => {
            tokio::fs::write(path, &csv).await?;
            eprintln!("Exported to {}", path.display());
        }
        None => println!("{}", csv),
    }
    Ok(())
}

async fn toggle(paused: &PausedSites, feature: PausedFeature, hostname: &str, pause: bool) -> CmdResult {
    let changed = paused.set_paused(feature, hostname, pause).await?;
    let state = if pause { "paused" } else { "active" };
    if changed {
        println!("{} is now {} on {}", feature.as_str(), state, hostname);
    } else {
        println!("{} was already {} on {}", feature.as_str(), state, hostname);
    }
    Ok(())
}

async fn show_paused(paused: &PausedSites, feature: Option<FeatureArg>) -> CmdResult {
    let features = match feature {
        Some(feature) => vec![PausedFeature::from(feature)],
        None => vec![PausedFeature::Autofill, PausedFeature::AutoLogin],
    };

    for feature in features {
        let sites = paused.list(feature).await?;
        println!("{}:", feature.as_str());
        if sites.is_empty() {
            println!("  (none)");
        }
        for site in sites {
            println!("  {}", site);
        }
    }
    Ok(())
}
