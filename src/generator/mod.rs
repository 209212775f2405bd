//! Generator module - renders landing pages to HTML and writes static sites

use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::cms::{ContentOrigin, LoadedPage, PageLoader};
use crate::content::{Dispatcher, PageView};
use crate::helpers::{css, favicon_tag, full_url_for, page_path};
use crate::seo::{self, PageMetadata, SitemapUrl};
use crate::templates::{PageData, SiteData, TemplateRenderer};
use crate::Landing;

/// Counts reported after a site is generated
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerateSummary {
    pub pages: usize,
    pub fallback_pages: usize,
    pub not_found_pages: usize,
    pub assets: usize,
}

/// Page renderer and static site writer
pub struct Generator {
    app: Landing,
    renderer: TemplateRenderer,
    dispatcher: Dispatcher,
    site: SiteData,
}

impl Generator {
    pub fn new(app: &Landing) -> Result<Self> {
        Ok(Self {
            app: app.clone(),
            renderer: TemplateRenderer::new()?,
            dispatcher: Dispatcher::new(&app.config),
            site: SiteData::new(&app.config),
        })
    }

    /// Render a loaded page to a complete HTML document
    ///
    /// A page without a record renders its chrome with the site's default
    /// metadata and no content blocks.
    pub fn render_page(&self, page: &LoadedPage) -> Result<String> {
        let config = &self.app.config;
        let path = page_path(&page.slug, &config.cms.default_slug);
        let record = page.record.as_deref();

        let metadata = PageMetadata::new(config, record, &path);
        let view = record
            .map(|record| self.dispatcher.dispatch(&record.blocks))
            .unwrap_or_default();
        tracing::debug!(
            "Rendering '{}': {} navbars, {} heroes, {} sections",
            page.slug,
            view.navbars.len(),
            view.heroes.len(),
            view.sections.len()
        );

        self.render_view(&page.slug, page.origin, &metadata, &view)
    }

    fn render_view(
        &self,
        slug: &str,
        origin: ContentOrigin,
        metadata: &PageMetadata,
        view: &PageView,
    ) -> Result<String> {
        let config = &self.app.config;
        let data = PageData {
            slug,
            head_tags: metadata.to_html(),
            schema: seo::schema::organization_tag(config),
            favicon: favicon_tag(config, &config.logo),
            stylesheet: css(config, "site"),
            current_year: Utc::now().year().to_string(),
            origin: origin.as_str(),
            page: view,
        };

        self.renderer
            .render_page(&self.site, &data)
            .with_context(|| format!("Failed to render page '{}'", slug))
    }

    /// Generate the whole site into the public directory
    pub async fn generate(&self, loader: &PageLoader) -> Result<GenerateSummary> {
        let public_dir = &self.app.public_dir;
        fs::create_dir_all(public_dir)
            .with_context(|| format!("Failed to create {:?}", public_dir))?;

        let mut summary = GenerateSummary {
            assets: self.copy_static_assets()?,
            ..GenerateSummary::default()
        };

        let default_slug = loader.default_slug().to_string();
        let slugs = publishable_slugs(&default_slug, loader.slugs().await);

        let mut listed = Vec::with_capacity(slugs.len());

        for slug in &slugs {
            let page = loader.load(slug).await;
            let html = self.render_page(&page)?;

            let path = page_path(slug, &default_slug);
            let dest = public_dir.join(path.trim_matches('/')).join("index.html");
            write_file(&dest, &html)?;

            summary.pages += 1;
            match page.origin {
                ContentOrigin::Fallback => summary.fallback_pages += 1,
                ContentOrigin::NotFound => summary.not_found_pages += 1,
                ContentOrigin::Cms => {}
            }
            if page.origin != ContentOrigin::NotFound {
                listed.push(slug.clone());
            }
        }

        write_file(&public_dir.join("sitemap.xml"), &self.sitemap(&listed))?;
        write_file(
            &public_dir.join("robots.txt"),
            &seo::robots::render(&self.app.config),
        )?;

        tracing::info!(
            "Generated {} pages ({} from fallback) and {} assets",
            summary.pages,
            summary.fallback_pages,
            summary.assets
        );

        Ok(summary)
    }

    /// Sitemap document for the given slugs
    pub fn sitemap(&self, slugs: &[String]) -> String {
        let config = &self.app.config;
        let now = Utc::now();
        let urls: Vec<SitemapUrl> = slugs
            .iter()
            .map(|slug| {
                let path = page_path(slug, &config.cms.default_slug);
                SitemapUrl::page(full_url_for(config, &path), path == "/", now)
            })
            .collect();
        seo::sitemap::render(&urls)
    }

    /// Copy static assets (stylesheets, images) to the public directory
    fn copy_static_assets(&self) -> Result<usize> {
        let static_dir = &self.app.static_dir;
        if !static_dir.is_dir() {
            tracing::debug!("No static directory at {:?}", static_dir);
            return Ok(0);
        }

        let mut copied = 0;
        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(static_dir)?;
            let dest = self.app.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)
                .with_context(|| format!("Failed to copy {:?} to {:?}", path, dest))?;
            copied += 1;
        }

        Ok(copied)
    }
}

/// The default slug first, then every other usable slug once
pub fn publishable_slugs(default_slug: &str, slugs: Vec<String>) -> Vec<String> {
    let mut result = vec![default_slug.to_string()];
    let mut seen: HashSet<String> = result.iter().cloned().collect();

    for slug in slugs {
        if slug::slugify(&slug) != slug {
            tracing::warn!("Skipping slug '{}': not usable as a path", slug);
            continue;
        }
        if seen.insert(slug.clone()) {
            result.push(slug);
        }
    }

    result
}

fn write_file(dest: &Path, content: &str) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(dest, content).with_context(|| format!("Failed to write {:?}", dest))
}
