
use landing_rs::cms::{CmsClient, ContentOrigin, FetchError, FetchedPage, PageLoader};
use landing_rs::config::{CmsConfig, SiteConfig};
use landing_rs::content::{ContentBlock, Dispatcher};
use mock_cms::{empty_listing, fixture, requested_slug, MockCms, MockReply, MOCK_TOKEN};
use std::path::Path;
use std::time::Duration;

fn cms_config(url: &str) -> CmsConfig {
    CmsConfig {
        url: url.to_string(),
        token: Some(MOCK_TOKEN.to_string()),
        timeout_ms: 2_000,
        revalidate_secs: 0,
        populate_variants: vec![
            "populate=one".to_string(),
            "populate=two".to_string(),
            "populate=three".to_string(),
        ],
        ..CmsConfig::default()
    }
}

fn loader(config: &CmsConfig) -> PageLoader {
    PageLoader::new(config, Path::new(".")).unwrap()
}

#[tokio::test]
async fn test_first_successful_variant_wins() {
    let cms = MockCms::start(|query| {
        if query.contains("populate=one") {
            MockReply::status(400)
        } else {
            MockReply::ok(fixture("home_current.json"))
        }
    })
    .await
    .unwrap();

    let client = CmsClient::new(&cms_config(cms.base_url())).unwrap();
    let page = client.fetch_page("home").await.unwrap();

    let FetchedPage::Found(record) = page else {
        panic!("expected a page");
    };
    assert_eq!(record.slug, "home");
    assert_eq!(cms.hits(), 2);

    let queries = cms.queries();
    assert!(queries[0].ends_with("&populate=one"));
    assert!(queries[1].ends_with("&populate=two"));
    assert_eq!(requested_slug(&queries[1]), Some("home"));
}

#[tokio::test]
async fn test_legacy_and_current_shapes_render_the_same() {
    let current = MockCms::start(|_| MockReply::ok(fixture("home_current.json")))
        .await
        .unwrap();
    let legacy = MockCms::start(|_| MockReply::ok(fixture("home_legacy.json")))
        .await
        .unwrap();

    let current_page = CmsClient::new(&cms_config(current.base_url()))
        .unwrap()
        .fetch_page("home")
        .await
        .unwrap();
    let legacy_page = CmsClient::new(&cms_config(legacy.base_url()))
        .unwrap()
        .fetch_page("home")
        .await
        .unwrap();

    let (FetchedPage::Found(mut a), FetchedPage::Found(mut b)) = (current_page, legacy_page) else {
        panic!("expected both pages");
    };

    // media URLs point at two different mock ports
    assert_eq!(
        a.og_image.as_ref().map(|i| i.src.clone()),
        Some(format!("{}/uploads/og_home.png", current.base_url()))
    );
    a.og_image = None;
    b.og_image = None;
    for block in a.blocks.iter_mut().chain(b.blocks.iter_mut()) {
        if let ContentBlock::Body(body) = block {
            body.image = None;
        }
    }
    assert_eq!(a, b);

    let dispatcher = Dispatcher::new(&SiteConfig::default());
    let view = dispatcher.dispatch(&a.blocks);
    assert_eq!(view.navbars.len(), 1);
    assert_eq!(view.heroes.len(), 1);
    assert_eq!(view.sections.len(), 1);
    assert_eq!(view.sections[0].description, "Fast delivery.\n\nHonest pricing.");
}

#[tokio::test]
async fn test_relative_media_is_absolutized() {
    let cms = MockCms::start(|_| MockReply::ok(fixture("home_legacy.json")))
        .await
        .unwrap();

    let client = CmsClient::new(&cms_config(cms.base_url())).unwrap();
    let FetchedPage::Found(record) = client.fetch_page("home").await.unwrap() else {
        panic!("expected a page");
    };

    let image = record
        .blocks
        .iter()
        .find_map(|block| match block {
            ContentBlock::Body(body) => body.image.clone(),
            _ => None,
        })
        .unwrap();
    assert_eq!(image.src, format!("{}/uploads/why_us.png", cms.base_url()));
    assert_eq!(image.alt, "Team at work");
    assert_eq!((image.width, image.height), (800, 600));
}

#[tokio::test]
async fn test_empty_result_is_not_found() {
    let cms = MockCms::start(|_| MockReply::ok(empty_listing())).await.unwrap();
    let config = cms_config(cms.base_url());

    let client = CmsClient::new(&config).unwrap();
    assert_eq!(client.fetch_page("missing").await.unwrap(), FetchedPage::NotFound);
    assert_eq!(cms.hits(), 1);

    let page = loader(&config).load("missing").await;
    assert_eq!(page.origin, ContentOrigin::NotFound);
    assert!(page.record.is_none());
}

#[tokio::test]
async fn test_all_variants_failing_falls_back() {
    let cms = MockCms::start(|_| MockReply::status(500)).await.unwrap();
    let config = cms_config(cms.base_url());

    let client = CmsClient::new(&config).unwrap();
    match client.fetch_page("home").await {
        Err(FetchError::Exhausted { attempts, last }) => {
            assert_eq!(attempts, 3);
            assert!(matches!(*last, FetchError::Status { attempt: 3, status: 500, .. }));
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(cms.hits(), 3);

    let page = loader(&config).load("home").await;
    assert_eq!(page.origin, ContentOrigin::Fallback);
    let record = page.record.unwrap();
    assert_eq!(
        record.meta_title(),
        "Acme Software - Custom Software Development"
    );
}

#[tokio::test]
async fn test_wrong_token_falls_back() {
    let cms = MockCms::start(|_| MockReply::ok(fixture("home_current.json")))
        .await
        .unwrap();
    let config = CmsConfig {
        token: Some("not-the-token".to_string()),
        ..cms_config(cms.base_url())
    };

    let page = loader(&config).load("home").await;
    assert_eq!(page.origin, ContentOrigin::Fallback);
    assert_eq!(cms.hits(), 3);
}

#[tokio::test]
async fn test_slow_cms_times_out() {
    let cms = MockCms::start(|_| {
        MockReply::ok(fixture("home_current.json")).delayed(Duration::from_millis(800))
    })
    .await
    .unwrap();
    let config = CmsConfig {
        timeout_ms: 100,
        populate_variants: vec!["populate=one".to_string(), String::new()],
        ..cms_config(cms.base_url())
    };

    let client = CmsClient::new(&config).unwrap();
    let err = client.fetch_page("home").await.unwrap_err();
    assert_eq!(err.kind(), "timeout");
    assert!(matches!(err, FetchError::Exhausted { attempts: 2, .. }));

    let page = loader(&config).load("home").await;
    assert_eq!(page.origin, ContentOrigin::Fallback);
}

#[tokio::test]
async fn test_unreachable_cms_falls_back() {
    // reserve a port, then release it so nothing is listening
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = cms_config(&format!("http://{}", addr));
    let client = CmsClient::new(&config).unwrap();
    let err = client.fetch_page("home").await.unwrap_err();
    assert_eq!(err.kind(), "network");

    let page = loader(&config).load("home").await;
    assert_eq!(page.origin, ContentOrigin::Fallback);
}

#[tokio::test]
async fn test_malformed_body_stops_the_walk() {
    let cms = MockCms::start(|_| MockReply::ok("<html>maintenance</html>"))
        .await
        .unwrap();
    let config = cms_config(cms.base_url());

    let client = CmsClient::new(&config).unwrap();
    let err = client.fetch_page("home").await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)));
    assert_eq!(err.kind(), "malformed-response");
    assert_eq!(cms.hits(), 1);
}

#[tokio::test]
async fn test_responses_are_cached_within_revalidate_window() {
    let cms = MockCms::start(|_| MockReply::ok(fixture("home_current.json")))
        .await
        .unwrap();
    let config = CmsConfig {
        revalidate_secs: 60,
        ..cms_config(cms.base_url())
    };

    let client = CmsClient::new(&config).unwrap();
    let first = client.fetch_page("home").await.unwrap();
    let second = client.fetch_page("home").await.unwrap();
    assert_eq!(first, second);
    assert_eq!(cms.hits(), 1);

    client.fetch_page("pricing").await.unwrap();
    assert_eq!(cms.hits(), 2);
}

#[tokio::test]
async fn test_slug_listing() {
    let cms = MockCms::start(|query| {
        if query.starts_with("fields[0]=slug") {
            MockReply::ok(fixture("slugs.json"))
        } else {
            MockReply::status(404)
        }
    })
    .await
    .unwrap();
    let config = cms_config(cms.base_url());

    let client = CmsClient::new(&config).unwrap();
    assert_eq!(client.fetch_slugs().await.unwrap(), vec!["home", "pricing"]);
    assert_eq!(loader(&config).slugs().await, vec!["home", "pricing"]);
}

#[tokio::test]
async fn test_slug_listing_failure_uses_fallback_slugs() {
    let cms = MockCms::start(|_| MockReply::status(503)).await.unwrap();
    let config = cms_config(cms.base_url());

    let slugs = loader(&config).slugs().await;
    assert_eq!(slugs, CmsConfig::default().fallback_slugs);
}

#[tokio::test]
async fn test_unknown_slugs_are_not_cached() {
    let cms = MockCms::start(|query| match requested_slug(query) {
        Some("home") => MockReply::ok(fixture("home_current.json")),
        _ => MockReply::ok(empty_listing()),
    })
    .await
    .unwrap();
    let config = CmsConfig {
        revalidate_secs: 60,
        ..cms_config(cms.base_url())
    };

    let client = CmsClient::new(&config).unwrap();
    for i in 0..50 {
        let page = client.fetch_page(&format!("random-{}", i)).await.unwrap();
        assert_eq!(page, FetchedPage::NotFound);
    }
    assert!(client.cache().is_empty());

    client.fetch_page("home").await.unwrap();
    assert_eq!(client.cache().len(), 1);

    // unknown slugs are asked for again
    client.fetch_page("random-0").await.unwrap();
    assert_eq!(cms.hits(), 52);
}
