//! Render a single page to stdout

use anyhow::Result;

use crate::generator::Generator;
use crate::Landing;

/// Render one page; `None` renders the default page
pub async fn run(app: &Landing, slug: Option<&str>) -> Result<String> {
    let loader = app.loader()?;
    let generator = Generator::new(app)?;

    let slug = slug.unwrap_or_else(|| loader.default_slug()).to_string();
    let page = loader.load(&slug).await;
    tracing::info!("Rendering '{}' ({})", page.slug, page.origin);

    generator.render_page(&page)
}
