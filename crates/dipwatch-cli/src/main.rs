mod cli;
mod error;

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use dipwatch_core::{
    default_registry, render_markdown, HttpClient, Pipeline, ReqwestHttpClient, WebhookNotifier,
};

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();

    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());
    let pipeline =
        Pipeline::new(Arc::clone(&http)).with_quote_timeout_ms(cli.quote_timeout_ms);

    let registry = default_registry();
    let outcome = pipeline.run(&registry).await;

    for warning in &outcome.warnings {
        eprintln!("warning: {warning}");
    }

    let endpoint = if cli.print_only {
        None
    } else {
        resolve_endpoint(cli.webhook_url.as_deref())
    };

    let notifier = WebhookNotifier::new(http, endpoint);
    let content = render_markdown(&outcome.report);
    notifier.deliver(&content).await?;

    Ok(ExitCode::SUCCESS)
}

/// Flag first, then the prefixed env var, then the legacy one. Blank values
/// count as unset so an empty scheduler secret degrades to print-only.
fn resolve_endpoint(flag: Option<&str>) -> Option<String> {
    let non_blank = |value: String| (!value.trim().is_empty()).then_some(value);

    flag.map(str::to_owned)
        .and_then(non_blank)
        .or_else(|| env::var("DIPWATCH_WEBHOOK_URL").ok().and_then(non_blank))
        .or_else(|| env::var("WECHAT_WEBHOOK_URL").ok().and_then(non_blank))
}
