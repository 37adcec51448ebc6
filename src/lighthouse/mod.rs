//! Running the containerized Lighthouse tool against a URL.

use std::path::PathBuf;
use std::process::Command;

use anyhow::{Context, Result};
use colored::Colorize;

/// Container image used when the rc-file does not override it.
pub const DEFAULT_IMAGE: &str = "ghcr.io/lightkeeper-tools/lighthouse:latest";

/// Everything needed to produce one report file.
#[derive(Debug, Clone)]
pub struct AuditRequest<'a> {
    pub url: &'a str,
    /// Output file name without the `.json` suffix.
    pub name: &'a str,
    /// `desktop` or `mobile`; anything else runs as desktop.
    pub form_factor: &'a str,
    /// `--link` values for reaching containers by name.
    pub docker_links: &'a [String],
    pub image: &'a str,
}

/// Build the docker argv for one audit run.
///
/// Split out from [`audit_url`] so the exact command line is testable
/// without docker. `workdir` is bind-mounted as the container's working
/// directory and receives the report file; `shm_dir` backs /dev/shm so
/// Chrome has enough shared memory.
pub fn docker_args(request: &AuditRequest<'_>, workdir: &str, shm_dir: &str) -> Vec<String> {
    let form_factor = match request.form_factor {
        "mobile" => "mobile",
        _ => "desktop",
    };

    let mut args = vec![
        "run".to_string(),
        "--rm".to_string(),
        "--tty".to_string(),
        format!("-v={}:/workdir", workdir),
        format!("-v={}:/dev/shm", shm_dir),
        "-w=/workdir".to_string(),
    ];
    for link in request.docker_links {
        args.push(format!("--link={}", link));
    }
    args.extend([
        request.image.to_string(),
        "lighthouse".to_string(),
        "--quiet".to_string(),
        "--no-enable-error-reporting".to_string(),
        "--output=json".to_string(),
        "--chrome-flags=--no-sandbox --headless".to_string(),
        format!("--emulated-form-factor={}", form_factor),
        format!("--output-path=/workdir/{}.json", request.name),
        request.url.to_string(),
    ]);

    args
}

/// Audit one URL and return the path of the report file written into the
/// current working directory. The subprocess's stderr is printed when it
/// fails; the failure is not retried.
pub fn audit_url(request: &AuditRequest<'_>) -> Result<PathBuf> {
    println!(
        "{}\n  URL:         {}\n  Form factor: {}\n  Output file: {}.json",
        "Creating Lighthouse report".green().bold(),
        request.url,
        request.form_factor,
        request.name
    );

    let workdir = std::env::current_dir().context("Failed to get current directory")?;
    // Dropped (and removed) once the container run is over.
    let shm_dir = tempfile::tempdir().context("Failed to create scratch directory")?;

    let args = docker_args(
        request,
        &workdir.display().to_string(),
        &shm_dir.path().display().to_string(),
    );

    let output = Command::new("docker")
        .args(&args)
        .output()
        .context("Failed to run 'docker'. Is docker installed?")?;

    if !output.status.success() {
        eprintln!("{}", String::from_utf8_lossy(&output.stderr));
        anyhow::bail!("lighthouse run for {} failed", request.url);
    }

    Ok(PathBuf::from(format!("{}.json", request.name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request<'a>(form_factor: &'a str, links: &'a [String]) -> AuditRequest<'a> {
        AuditRequest {
            url: "https://example.com/",
            name: "example",
            form_factor,
            docker_links: links,
            image: DEFAULT_IMAGE,
        }
    }

    #[test]
    fn docker_args_carry_mounts_image_and_url() {
        let args = docker_args(&request("desktop", &[]), "/work", "/tmp/shm");

        assert_eq!(args[0], "run");
        assert!(args.contains(&"-v=/work:/workdir".to_string()));
        assert!(args.contains(&"-v=/tmp/shm:/dev/shm".to_string()));
        assert!(args.contains(&DEFAULT_IMAGE.to_string()));
        assert!(args.contains(&"--emulated-form-factor=desktop".to_string()));
        assert!(args.contains(&"--output-path=/workdir/example.json".to_string()));
        assert_eq!(args.last().unwrap(), "https://example.com/");
    }

    #[test]
    fn unknown_form_factor_runs_as_desktop() {
        let args = docker_args(&request("toaster", &[]), "/work", "/shm");
        assert!(args.contains(&"--emulated-form-factor=desktop".to_string()));

        let args = docker_args(&request("mobile", &[]), "/work", "/shm");
        assert!(args.contains(&"--emulated-form-factor=mobile".to_string()));
    }

    #[test]
    fn docker_links_come_before_the_image() {
        let links = vec!["app:app".to_string(), "db:db".to_string()];
        let args = docker_args(&request("desktop", &links), "/work", "/shm");

        let link_pos = args.iter().position(|a| a == "--link=app:app").unwrap();
        let image_pos = args.iter().position(|a| a == DEFAULT_IMAGE).unwrap();
        assert!(link_pos < image_pos);
        assert!(args.contains(&"--link=db:db".to_string()));
    }
}
