//! Generate static files

use anyhow::Result;
use std::time::Instant;

use crate::generator::{GenerateSummary, Generator};
use crate::Landing;

/// Render every published page into the public directory
pub async fn run(app: &Landing) -> Result<GenerateSummary> {
    let start = Instant::now();

    let loader = app.loader()?;
    let generator = Generator::new(app)?;
    let summary = generator.generate(&loader).await?;

    if summary.fallback_pages > 0 {
        tracing::warn!(
            "{} of {} pages were rendered from fallback content",
            summary.fallback_pages,
            summary.pages
        );
    }
    tracing::info!("Generated in {:.2}s", start.elapsed().as_secs_f64());

    Ok(summary)
}
