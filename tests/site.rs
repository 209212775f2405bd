
use landing_rs::config::{CmsConfig, SiteConfig};
use landing_rs::server::{self, CONTENT_SOURCE_HEADER};
use landing_rs::Landing;
use mock_cms::{empty_listing, fixture, requested_slug, MockCms, MockReply, MOCK_TOKEN};
use std::fs;
use std::path::Path;

fn site(dir: &Path, cms: CmsConfig) -> Landing {
    let static_dir = dir.join("static/css");
    fs::create_dir_all(&static_dir).unwrap();
    fs::write(static_dir.join("site.css"), "body { margin: 0; }").unwrap();

    let config = SiteConfig {
        url: "https://example.com".to_string(),
        cms,
        ..SiteConfig::default()
    };
    Landing::with_config(dir, config)
}

/// Mock CMS knowing `home` (also served as the default page) but not `pricing`
async fn cms_with_pages() -> MockCms {
    MockCms::start(|query| {
        if query.starts_with("fields[0]=slug") {
            return MockReply::ok(fixture("slugs.json"));
        }
        match requested_slug(query) {
            Some("landing-page") | Some("home") => MockReply::ok(fixture("home_current.json")),
            _ => MockReply::ok(empty_listing()),
        }
    })
    .await
    .unwrap()
}

fn online(cms: &MockCms) -> CmsConfig {
    CmsConfig {
        url: cms.base_url().to_string(),
        token: Some(MOCK_TOKEN.to_string()),
        timeout_ms: 2_000,
        ..CmsConfig::default()
    }
}

#[tokio::test]
async fn test_generate_without_cms_uses_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let app = site(dir.path(), CmsConfig::default());

    let summary = app.generate().await.unwrap();
    assert_eq!(summary.pages, 5);
    assert_eq!(summary.fallback_pages, 5);
    assert_eq!(summary.not_found_pages, 0);
    assert_eq!(summary.assets, 1);

    let public = dir.path().join("public");
    let index = fs::read_to_string(public.join("index.html")).unwrap();
    assert!(index.contains("<title>Acme Software - Custom Software Development</title>"));
    assert!(index.contains(r#"data-content-source="fallback""#));
    for slug in ["home", "pricing", "about", "services"] {
        assert!(public.join(slug).join("index.html").is_file(), "{}", slug);
    }
    assert!(!public.join("landing-page").exists());
    assert!(public.join("css/site.css").is_file());

    let sitemap = fs::read_to_string(public.join("sitemap.xml")).unwrap();
    assert!(sitemap.contains("<loc>https://example.com/</loc>"));
    assert!(sitemap.contains("<loc>https://example.com/services/</loc>"));

    let robots = fs::read_to_string(public.join("robots.txt")).unwrap();
    assert!(robots.contains("Sitemap: https://example.com/sitemap.xml"));

    app.clean().unwrap();
    assert!(!public.exists());
}

#[tokio::test]
async fn test_generate_from_cms() {
    let cms = cms_with_pages().await;
    let dir = tempfile::tempdir().unwrap();
    let app = site(dir.path(), online(&cms));

    let summary = app.generate().await.unwrap();
    assert_eq!(summary.pages, 3);
    assert_eq!(summary.fallback_pages, 0);
    assert_eq!(summary.not_found_pages, 1);

    let public = dir.path().join("public");
    let home = fs::read_to_string(public.join("home/index.html")).unwrap();
    assert!(home.contains("<title>Home | Example Co</title>"));
    assert!(home.contains(r#"data-content-source="cms""#));
    assert!(home.contains("Build faster"));
    assert!(home.contains("<p>Honest pricing.</p>"));
    assert!(home.contains(&format!("{}/uploads/og_home.png", cms.base_url())));
    assert!(!home.contains("Not rendered"));

    let sitemap = fs::read_to_string(public.join("sitemap.xml")).unwrap();
    assert!(sitemap.contains("<loc>https://example.com/home/</loc>"));
    assert!(!sitemap.contains("/pricing/"));
}

#[tokio::test]
async fn test_server_reports_content_source() {
    let cms = cms_with_pages().await;
    let dir = tempfile::tempdir().unwrap();
    let app = site(dir.path(), online(&cms));

    let router = server::router(&app).unwrap();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let http = reqwest::Client::new();
    let get = |path: &str| http.get(format!("{}{}", base, path)).send();

    let index = get("/").await.unwrap();
    assert_eq!(index.status(), 200);
    assert_eq!(index.headers()[CONTENT_SOURCE_HEADER], "cms");
    assert!(index.text().await.unwrap().contains("Build faster"));

    let missing = get("/pricing").await.unwrap();
    assert_eq!(missing.status(), 404);
    assert_eq!(missing.headers()[CONTENT_SOURCE_HEADER], "not-found");

    let robots = get("/robots.txt").await.unwrap();
    assert_eq!(robots.status(), 200);
    assert!(robots.text().await.unwrap().starts_with("User-agent: *"));

    let sitemap = get("/sitemap.xml").await.unwrap().text().await.unwrap();
    assert!(sitemap.contains("<loc>https://example.com/pricing/</loc>"));

    let css = get("/css/site.css").await.unwrap();
    assert_eq!(css.status(), 200);
    assert_eq!(css.text().await.unwrap(), "body { margin: 0; }");

    handle.abort();
}

#[tokio::test]
async fn test_server_without_token_serves_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let app = site(dir.path(), CmsConfig::default());

    let router = server::router(&app).unwrap();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let response = reqwest::get(format!("{}/pricing", base)).await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()[CONTENT_SOURCE_HEADER], "fallback");
    let html = response.text().await.unwrap();
    assert!(html.contains(r#"<link rel="canonical" href="https://example.com/pricing/">"#));

    handle.abort();
}
