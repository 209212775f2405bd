//! Content dispatcher
//!
//! Splits a page's block sequence into navigation, hero and body buckets
//! (stable, by tag) and resolves every optional field to its display value.

use super::media::Image;
use super::page::{BodyBlock, ContentBlock, CtaButton, HeroBlock, NavBlock, NavEntry};
use super::view::{
    Alignment, Background, ButtonVariant, ButtonView, CategoryView, ContainerSize, HeadingLevel,
    HeroView, ImageSide, LinkView, LogoView, NavEntryView, NavbarView, PageView, SectionView,
};
use crate::config::SiteConfig;
use crate::helpers::is_safe_link;

pub const DEFAULT_HERO_TITLE: &str = "Default title";
pub const DEFAULT_HERO_DESCRIPTION: &str = "Default description";
pub const DEFAULT_HERO_IMAGE_ALT: &str = "Hero image";
pub const DEFAULT_SECTION_TITLE: &str = "Section title";
pub const DEFAULT_LOGO_WIDTH: u32 = 120;
pub const DEFAULT_LOGO_HEIGHT: u32 = 40;

/// (key, label, href) of the menu used when a navbar has no entries
const DEFAULT_MENU: [(&str, &str, &str); 5] = [
    ("home", "Home", "#home"),
    ("solutions", "Solutions", "#solutions"),
    ("prices", "Pricing", "#prices"),
    ("resources", "Resources", "#resources"),
    ("about", "About", "#about"),
];

/// Blocks grouped by kind, in source order
#[derive(Debug, Default)]
pub struct Partition<'a> {
    pub navigation: Vec<&'a NavBlock>,
    pub hero: Vec<&'a HeroBlock>,
    pub body: Vec<&'a BodyBlock>,
}

/// Stable partition by tag; unrecognized blocks are dropped
pub fn partition(blocks: &[ContentBlock]) -> Partition<'_> {
    let mut parts = Partition::default();

    for block in blocks {
        match block {
            ContentBlock::Navigation(nav) => parts.navigation.push(nav),
            ContentBlock::Hero(hero) => parts.hero.push(hero),
            ContentBlock::Body(body) => parts.body.push(body),
            ContentBlock::Unrecognized { component, id } => {
                tracing::debug!("Dropping unrecognized block {}#{}", component, id);
            }
        }
    }

    parts
}

/// Maps blocks onto views using site-level defaults
#[derive(Debug, Clone)]
pub struct Dispatcher {
    brand: String,
    logo: String,
}

impl Dispatcher {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            brand: config.brand.clone(),
            logo: config.logo.clone(),
        }
    }

    /// Resolve a block sequence into the three display buckets
    pub fn dispatch(&self, blocks: &[ContentBlock]) -> PageView {
        let parts = partition(blocks);

        PageView {
            navbars: parts.navigation.iter().map(|nav| self.navbar(nav)).collect(),
            heroes: parts
                .hero
                .iter()
                .enumerate()
                .map(|(index, hero)| hero_view(index, hero))
                .collect(),
            sections: parts.body.iter().map(|body| section_view(body)).collect(),
        }
    }

    fn navbar(&self, nav: &NavBlock) -> NavbarView {
        let logo = LogoView {
            src: nav
                .logo
                .as_ref()
                .map(|image| image.src.clone())
                .unwrap_or_else(|| self.logo.clone()),
            alt: non_empty(nav.logo_alt.as_deref()).unwrap_or(&self.brand).to_string(),
            href: link(non_empty(nav.logo_href.as_deref()).unwrap_or("/")),
            width: nav.logo_width.filter(|w| *w > 0).unwrap_or(DEFAULT_LOGO_WIDTH),
            height: nav.logo_height.filter(|h| *h > 0).unwrap_or(DEFAULT_LOGO_HEIGHT),
        };

        let entries = if nav.nav_items.is_empty() {
            default_menu()
        } else {
            nav.nav_items.iter().enumerate().map(|(i, e)| nav_entry(i, e)).collect()
        };

        let buttons = match nav.buttons() {
            [] => vec![default_contact_button()],
            buttons => buttons.iter().enumerate().map(|(i, b)| button(i, b)).collect(),
        };

        NavbarView {
            key: nav.id,
            logo,
            entries,
            buttons,
            background: Background::parse(nav.background_color.as_deref()),
        }
    }
}

fn hero_view(index: usize, hero: &HeroBlock) -> HeroView {
    // The first hero is the page's landing anchor
    let anchor = if index == 0 {
        "home".to_string()
    } else {
        format!("hero-{}", hero.id)
    };

    let heading = match &hero.seo {
        Some(seo) if !seo.h1 => HeadingLevel::H2,
        _ => HeadingLevel::H1,
    };

    HeroView {
        key: hero.id,
        anchor,
        title: non_empty(hero.title.as_deref())
            .unwrap_or(DEFAULT_HERO_TITLE)
            .to_string(),
        subtitle: non_empty(hero.subtitle.as_deref()).map(str::to_string),
        description: non_empty(hero.description.as_deref())
            .unwrap_or(DEFAULT_HERO_DESCRIPTION)
            .to_string(),
        buttons: hero
            .cta_buttons
            .iter()
            .enumerate()
            .map(|(i, b)| button(i, b))
            .collect(),
        background_image: hero.background_image.as_ref().map(|image| image.src.clone()),
        background: Background::parse(hero.background_color.as_deref()),
        alignment: Alignment::parse(hero.text_alignment.as_deref()),
        bottom_image: hero.bottom_image.clone().map(|mut image| {
            if image.alt.is_empty() || image.is_placeholder() {
                image.alt = DEFAULT_HERO_IMAGE_ALT.to_string();
            }
            image
        }),
        heading,
        keywords: hero
            .seo
            .as_ref()
            .map(|seo| seo.keywords.clone())
            .unwrap_or_default(),
    }
}

fn section_view(body: &BodyBlock) -> SectionView {
    let description = body.description_text();
    let paragraphs = description
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    SectionView {
        key: body.id,
        anchor: format!("section-{}", body.id),
        title: non_empty(body.title.as_deref())
            .unwrap_or(DEFAULT_SECTION_TITLE)
            .to_string(),
        subtitle: non_empty(body.subtitle.as_deref()).map(str::to_string),
        description,
        paragraphs,
        button: body.cta_button.as_ref().map(|b| button(0, b)),
        image: body.image.clone().unwrap_or_else(Image::placeholder),
        side: match body.image_position.as_deref() {
            Some("left") => ImageSide::Left,
            _ => ImageSide::Right,
        },
        background: Background::parse(body.background_color.as_deref()),
        container: ContainerSize::parse(body.container_size.as_deref()),
        heading: HeadingLevel::parse_section(body.seo_heading_level.as_deref()),
    }
}

fn nav_entry(index: usize, entry: &NavEntry) -> NavEntryView {
    match entry {
        NavEntry::Link { key, label, href } => NavEntryView::Link {
            key: key.clone().unwrap_or_else(|| format!("nav-{}", index)),
            label: label.clone(),
            href: link(non_empty(href.as_deref()).unwrap_or("#")),
        },
        NavEntry::Dropdown {
            key,
            label,
            categories,
            footer_actions,
        } => NavEntryView::Dropdown {
            key: key.clone().unwrap_or_else(|| format!("nav-{}", index)),
            label: label.clone(),
            categories: categories
                .iter()
                .map(|category| CategoryView {
                    title: category.title.clone(),
                    items: category
                        .items
                        .iter()
                        .map(|item| LinkView {
                            label: item.title.clone(),
                            description: item.description.clone(),
                            href: link(&item.href),
                            icon: item.icon.clone(),
                        })
                        .collect(),
                })
                .collect(),
            footer_actions: footer_actions
                .iter()
                .map(|action| LinkView {
                    label: action.label.clone(),
                    description: None,
                    href: link(&action.href),
                    icon: action.icon.clone(),
                })
                .collect(),
        },
    }
}

fn button(index: usize, button: &CtaButton) -> ButtonView {
    ButtonView {
        key: button
            .key
            .clone()
            .unwrap_or_else(|| format!("button-{}", index)),
        label: button.label.clone(),
        href: link(&button.href),
        variant: ButtonVariant::parse(button.variant.as_deref()),
        new_tab: button.open_in_new_tab,
    }
}

fn default_menu() -> Vec<NavEntryView> {
    DEFAULT_MENU
        .iter()
        .map(|(key, label, href)| NavEntryView::Link {
            key: key.to_string(),
            label: label.to_string(),
            href: href.to_string(),
        })
        .collect()
}

fn default_contact_button() -> ButtonView {
    ButtonView {
        key: "default-cta".to_string(),
        label: "Contact".to_string(),
        href: "#contact".to_string(),
        variant: ButtonVariant::Default,
        new_tab: false,
    }
}

/// CMS links with a disallowed scheme become an inert anchor
fn link(href: &str) -> String {
    if is_safe_link(href) {
        href.to_string()
    } else {
        tracing::warn!("Dropping link with disallowed scheme: {:?}", href);
        "#".to_string()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::media::PLACEHOLDER_SRC;
    use crate::content::page::{HeroSeo, PageRecord};
    use serde_json::json;

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(&SiteConfig::default())
    }

    fn blocks(raw: serde_json::Value) -> Vec<ContentBlock> {
        PageRecord::from_attributes(1, &json!({ "dynamicZone": raw }))
            .unwrap()
            .blocks
    }

    #[test]
    fn test_partition_is_stable() {
        let blocks = blocks(json!([
            {"__component": "sections.hero", "id": 1},
            {"__component": "layout.navbar", "id": 2},
            {"__component": "sections.content", "id": 3},
            {"__component": "sections.content", "id": 4}
        ]));

        let parts = partition(&blocks);
        assert_eq!(parts.navigation.iter().map(|b| b.id).collect::<Vec<_>>(), vec![2]);
        assert_eq!(parts.hero.iter().map(|b| b.id).collect::<Vec<_>>(), vec![1]);
        assert_eq!(parts.body.iter().map(|b| b.id).collect::<Vec<_>>(), vec![3, 4]);
    }

    #[test]
    fn test_unknown_tag_excluded() {
        let blocks = blocks(json!([
            {"__component": "sections.unknown", "id": 1, "title": "Nope"},
            {"__component": "sections.content", "id": 2}
        ]));
        assert_eq!(blocks.len(), 2);

        let view = dispatcher().dispatch(&blocks);
        assert!(view.navbars.is_empty());
        assert!(view.heroes.is_empty());
        assert_eq!(view.sections.len(), 1);
        assert_eq!(view.sections[0].key, 2);
    }

    #[test]
    fn test_body_defaults() {
        let blocks = blocks(json!([{"__component": "sections.content", "id": 5}]));
        let view = dispatcher().dispatch(&blocks);
        let section = &view.sections[0];

        assert_eq!(section.title, DEFAULT_SECTION_TITLE);
        assert_eq!(section.image.src, PLACEHOLDER_SRC);
        assert_eq!(section.image.width, 600);
        assert_eq!(section.image.height, 400);
        assert_eq!(section.side, ImageSide::Right);
        assert_eq!(section.container, ContainerSize::Lg);
        assert_eq!(section.background, Background::White);
        assert_eq!(section.heading, HeadingLevel::H2);
        assert_eq!(section.anchor, "section-5");
        assert!(section.button.is_none());
    }

    #[test]
    fn test_body_fields() {
        let blocks = blocks(json!([{
            "__component": "sections.content",
            "id": 6,
            "title": "Web",
            "content": [{"type": "paragraph", "children": [{"text": "One"}]},
                        {"type": "paragraph", "children": [{"text": "Two"}]}],
            "imagePosition": "left",
            "containerSize": "xl",
            "backgroundColor": "gray",
            "seoHeadingLevel": "h3",
            "ctaButton": {"ctaButtonId": "more", "label": "More", "href": "#more", "variant": "outline"}
        }]));
        let section = &dispatcher().dispatch(&blocks).sections[0];

        assert_eq!(section.description, "One\n\nTwo");
        assert_eq!(section.paragraphs, vec!["One", "Two"]);
        assert_eq!(section.side, ImageSide::Left);
        assert_eq!(section.container, ContainerSize::Xl);
        assert_eq!(section.background, Background::Gray);
        assert_eq!(section.heading, HeadingLevel::H3);
        let button = section.button.as_ref().unwrap();
        assert_eq!(button.key, "more");
        assert_eq!(button.variant, ButtonVariant::Outline);
    }

    #[test]
    fn test_hero_defaults_and_heading() {
        let mut hero = HeroBlock {
            id: 1,
            ..HeroBlock::default()
        };
        let view = hero_view(0, &hero);
        assert_eq!(view.title, DEFAULT_HERO_TITLE);
        assert_eq!(view.description, DEFAULT_HERO_DESCRIPTION);
        assert_eq!(view.alignment, Alignment::Center);
        assert_eq!(view.background, Background::White);
        assert_eq!(view.heading, HeadingLevel::H1);
        assert_eq!(view.anchor, "home");

        hero.seo = Some(HeroSeo::default());
        let view = hero_view(1, &hero);
        assert_eq!(view.heading, HeadingLevel::H2);
        assert_eq!(view.anchor, "hero-1");
    }

    #[test]
    fn test_navbar_defaults() {
        let blocks = blocks(json!([{"__component": "layout.navbar", "id": 1}]));
        let navbar = &dispatcher().dispatch(&blocks).navbars[0];

        assert_eq!(navbar.entries.len(), 5);
        assert_eq!(navbar.buttons.len(), 1);
        assert_eq!(navbar.buttons[0].label, "Contact");
        assert_eq!(navbar.buttons[0].href, "#contact");
        assert_eq!(navbar.background, Background::White);
        assert_eq!(navbar.logo.src, "/logo.svg");
        assert_eq!(navbar.logo.alt, "Acme Software");
        assert_eq!(navbar.logo.width, 120);
    }

    #[test]
    fn test_dispatch_is_idempotent() {
        let blocks = blocks(json!([
            {"__component": "layout.navbar", "id": 1},
            {"__component": "sections.hero", "id": 2, "title": "Hi"}
        ]));
        let d = dispatcher();
        assert_eq!(d.dispatch(&blocks), d.dispatch(&blocks));
        assert!(d.dispatch(&[]).is_empty());
    }

    #[test]
    fn test_disallowed_link_schemes_become_anchors() {
        let blocks = blocks(json!([
            {"__component": "layout.navbar", "id": 1, "logoHref": "javascript:void(0)",
             "navItems": [
                {"label": "Bad", "href": "javascript:alert(1)"},
                {"label": "Menu", "hasDropdown": true,
                 "dropdownCategories": [{"title": "A", "items": [
                    {"title": "Data", "href": "data:text/html,x"},
                    {"title": "Docs", "href": "https://docs.example.com"}
                 ]}],
                 "dropdownFooterActions": [{"label": "Mail", "href": "mailto:hi@example.com"}]}
             ],
             "ctaButtons": [{"label": "Go", "href": " JavaScript:alert(1)"}]},
            {"__component": "sections.content", "id": 2,
             "ctaButton": {"label": "More", "href": "/more"}}
        ]));
        let view = dispatcher().dispatch(&blocks);
        let navbar = &view.navbars[0];

        assert_eq!(navbar.logo.href, "#");
        assert_eq!(navbar.buttons[0].href, "#");
        let NavEntryView::Link { href, .. } = &navbar.entries[0] else {
            panic!("expected a link");
        };
        assert_eq!(href, "#");
        let NavEntryView::Dropdown { categories, footer_actions, .. } = &navbar.entries[1] else {
            panic!("expected a dropdown");
        };
        assert_eq!(categories[0].items[0].href, "#");
        assert_eq!(categories[0].items[1].href, "https://docs.example.com");
        assert_eq!(footer_actions[0].href, "mailto:hi@example.com");
        assert_eq!(view.sections[0].button.as_ref().unwrap().href, "/more");
    }
}
