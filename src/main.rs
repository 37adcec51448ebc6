use anyhow::Result;
use clap::Parser;
use lightkeeper::cli::{self, Cli, Commands};
use lightkeeper::github::CommentTarget;

fn main() -> Result<()> {
    let cli_args = Cli::parse();

    match cli_args.command {
        Commands::View { input, omit_done } => {
            cli::view(&input, omit_done)?;
        }
        Commands::Compare {
            input,
            input_label,
            github_owner,
            github_repo,
            github_issue,
            github_token,
        } => {
            let options = cli::CompareOptions {
                inputs: input,
                labels: input_label,
                github: CommentTarget::from_flags(
                    github_owner,
                    github_repo,
                    github_issue,
                    github_token,
                ),
            };
            cli::compare(&options)?;
        }
        Commands::Audit {
            url,
            name,
            form_factor,
            docker_link,
        } => {
            let options = cli::AuditOptions {
                urls: url,
                names: name,
                form_factor,
                docker_links: docker_link,
            };
            cli::audit(&options)?;
        }
    }

    Ok(())
}
