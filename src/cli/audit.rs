use anyhow::Result;
use chrono::Local;

use crate::config::Config;
use crate::lighthouse::{audit_url, AuditRequest};

/// Flags of the `audit` command, resolved into an explicit struct.
pub struct AuditOptions {
    pub urls: Vec<String>,
    pub names: Vec<String>,
    pub form_factor: Option<String>,
    pub docker_links: Vec<String>,
}

/// Audit every URL in turn, writing one report file per URL.
///
/// URLs without a matching `--name` get a generated
/// `YYYYmmdd-HHMMSS-<form-factor>-<index>` name.
pub fn audit(options: &AuditOptions) -> Result<()> {
    if options.urls.is_empty() {
        anyhow::bail!("please specify at least one URL to audit using the --url/-u flag");
    }

    // Missing or invalid rc-file falls back to defaults
    let config = Config::load().unwrap_or_default();
    let form_factor = options
        .form_factor
        .clone()
        .unwrap_or_else(|| config.form_factor.clone());

    let mut names = options.names.clone();
    for (index, url) in options.urls.iter().enumerate() {
        if names.len() <= index {
            names.push(generated_name(&form_factor, index));
        }

        audit_url(&AuditRequest {
            url,
            name: &names[index],
            form_factor: &form_factor,
            docker_links: &options.docker_links,
            image: &config.lighthouse_image,
        })?;
    }

    Ok(())
}

fn generated_name(form_factor: &str, index: usize) -> String {
    format!(
        "{}-{}-{}",
        Local::now().format("%Y%m%d-%H%M%S"),
        form_factor,
        index + 1
    )
}
