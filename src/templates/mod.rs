//! Built-in landing page templates using the Tera template engine
//!
//! Templates are embedded directly in the binary; a site needs no theme
//! directory to render.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::PageView;

/// Template renderer with the embedded landing templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Content comes from the CMS; everything not marked safe is escaped
        tera.autoescape_on(vec![".html"]);
        tera.set_escape_fn(crate::helpers::html_escape);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("landing/layout.html")),
            ("page.html", include_str!("landing/page.html")),
            // Partials
            (
                "partials/head.html",
                include_str!("landing/partials/head.html"),
            ),
            (
                "partials/blocks.html",
                include_str!("landing/partials/blocks.html"),
            ),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// Render a landing page
    pub fn render_page(&self, site: &SiteData, data: &PageData<'_>) -> Result<String> {
        let mut context = Context::from_serialize(data)?;
        context.insert("site", site);
        self.render("page.html", &context)
    }
}

/// Site-wide values exposed to templates as `site`
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub brand: String,
    pub language: String,
    pub url: String,
}

impl SiteData {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            brand: config.brand.clone(),
            language: config.language.clone(),
            url: config.url.clone(),
        }
    }
}

/// Per-page values for `page.html`
#[derive(Debug, Clone, Serialize)]
pub struct PageData<'a> {
    pub slug: &'a str,
    /// Pre-rendered, already escaped head tags
    pub head_tags: String,
    pub schema: String,
    pub favicon: String,
    pub stylesheet: String,
    pub current_year: String,
    pub origin: &'a str,
    pub page: &'a PageView,
}
