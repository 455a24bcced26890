use crate::domain::model::RepoReport;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output_path: String,
    /// Reports in input order, degenerate ones included.
    pub reports: Vec<RepoReport>,
    /// Labels of the repositories whose analysis failed.
    pub degenerate: Vec<String>,
}

impl RunSummary {
    pub fn analyzed(&self) -> usize {
        self.reports.len() - self.degenerate.len()
    }
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("Loading repository list...");
        let fetched = self.pipeline.extract().await?;
        tracing::info!("Fetched pull requests for {} repositories", fetched.len());

        let outcomes = self.pipeline.transform(fetched).await?;

        let reports: Vec<RepoReport> = outcomes.iter().map(|o| o.report().clone()).collect();
        let degenerate: Vec<String> = outcomes
            .iter()
            .filter(|o| o.is_degenerate())
            .map(|o| o.report().repo.clone())
            .collect();

        tracing::info!("Writing results...");
        let output_path = self.pipeline.load(outcomes).await?;

        let summary = RunSummary {
            output_path,
            reports,
            degenerate,
        };

        tracing::info!(
            repositories = summary.reports.len(),
            analyzed = summary.analyzed(),
            failed = summary.degenerate.len(),
            "Results saved to {}",
            summary.output_path
        );

        Ok(summary)
    }
}
