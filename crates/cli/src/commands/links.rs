//! Link generation - the per-file loop
//!
//! Scans the configured directory, maps each matching file into the Dropbox
//! namespace and resolves its shared link. Files are handled one at a time;
//! a failure is reported on that file's line and the loop moves on.

use sharelink_core::config::MISSING_TOKEN_MESSAGE;
use sharelink_core::{
    find_files, map_to_provider, resolve_link, LinkReport, LinkSource, Result, Settings,
    ShareProvider,
};

use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// Counts for one run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub created: usize,
    pub existing: usize,
    pub failed: usize,
}

impl Summary {
    fn record(&mut self, report: &LinkReport) {
        self.total += 1;
        match report.source {
            Some(LinkSource::Created) => self.created += 1,
            Some(LinkSource::Existing) => self.existing += 1,
            None => self.failed += 1,
        }
    }
}

/// Resolve links for every matching file, handing each report to `emit`
///
/// Only an unreadable scan directory aborts the run.
pub async fn generate_links<P>(
    settings: &Settings,
    provider: &P,
    mut emit: impl FnMut(&LinkReport),
) -> Result<Summary>
where
    P: ShareProvider + ?Sized,
{
    let files = find_files(settings.local_dir(), &settings.extensions)?;
    tracing::info!(
        count = files.len(),
        dir = %settings.local_dir().display(),
        "Found matching files"
    );

    let mut summary = Summary::default();
    for local_path in files {
        let provider_path = map_to_provider(&local_path, &settings.dropbox_root);
        let result = resolve_link(provider, &provider_path).await;
        if let Err(e) = &result {
            tracing::debug!(path = %local_path.display(), error = %e, "Link resolution failed");
        }

        let report = LinkReport::from_result(&local_path, provider_path, &result);
        summary.record(&report);
        emit(&report);
    }

    Ok(summary)
}

/// Validate settings, connect, and run the loop
///
/// Without a token the run prints one warning and stops successfully before
/// `connect` is called, so nothing reaches the provider.
pub async fn run<P, F>(settings: &Settings, connect: F, formatter: &Formatter) -> ExitCode
where
    P: ShareProvider,
    F: FnOnce(&Settings) -> Result<P>,
{
    if !settings.has_token() {
        formatter.warning(MISSING_TOKEN_MESSAGE);
        return ExitCode::Success;
    }

    if let Err(e) = settings.validate() {
        formatter.error(&e.to_string());
        return ExitCode::from_error(&e);
    }

    let provider = match connect(settings) {
        Ok(p) => p,
        Err(e) => {
            formatter.error(&format!("Failed to create Dropbox client: {e}"));
            return ExitCode::from_error(&e);
        }
    };

    match generate_links(settings, &provider, |report| formatter.report(report)).await {
        Ok(summary) => {
            tracing::info!(
                total = summary.total,
                created = summary.created,
                existing = summary.existing,
                failed = summary.failed,
                "Finished"
            );
            if summary.failed > 0 {
                formatter.warning(&format!(
                    "Completed with errors: {} succeeded, {} failed",
                    summary.total - summary.failed,
                    summary.failed
                ));
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!(
                "Failed to read directory {}: {e}",
                settings.local_dir().display()
            ));
            ExitCode::GeneralError
        }
    }
}
