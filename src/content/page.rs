//! Page record and content block models

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::de::{self, id_string, numeric_id};
use super::media::{self, Image};
use super::richtext::RichText;

/// Discriminant of navigation blocks
pub const NAVBAR_COMPONENT: &str = "layout.navbar";
/// Discriminant of hero blocks
pub const HERO_COMPONENT: &str = "sections.hero";
/// Discriminant of body content blocks
pub const CONTENT_COMPONENT: &str = "sections.content";

/// Why a raw block was rejected
#[derive(Error, Debug)]
pub enum BlockError {
    #[error("block has no component tag")]
    MissingTag,

    #[error("block {component} has no numeric id")]
    MissingId { component: String },

    #[error("block {component}#{id} has invalid fields: {source}")]
    InvalidFields {
        component: String,
        id: i64,
        #[source]
        source: serde_json::Error,
    },
}

/// The canonical representation of one landing page
#[derive(Debug, Clone, PartialEq)]
pub struct PageRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub slug: String,
    pub seo: PageSeo,
    pub og_image: Option<Image>,
    pub blocks: Vec<ContentBlock>,
}

/// Page level SEO fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageSeo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Vec<String>,
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct PageAttributes {
    title: Option<String>,
    description: Option<String>,
    slug: Option<String>,
    seo_title: Option<String>,
    seo_description: Option<String>,
    #[serde(deserialize_with = "de::null_default")]
    seo_keywords: Vec<String>,
    #[serde(deserialize_with = "media::deserialize_image")]
    og_image: Option<Image>,
    #[serde(deserialize_with = "de::list_or_empty")]
    dynamic_zone: Vec<Value>,
}

impl PageRecord {
    /// Build a record from the page's attribute object
    ///
    /// Invalid blocks are logged and skipped; they never fail the page.
    pub fn from_attributes(id: i64, attributes: &Value) -> Result<Self, serde_json::Error> {
        let attrs = PageAttributes::deserialize(attributes)?;

        let mut blocks = Vec::with_capacity(attrs.dynamic_zone.len());
        for raw in &attrs.dynamic_zone {
            match ContentBlock::from_value(raw) {
                Ok(block) => blocks.push(block),
                Err(e) => tracing::warn!("Skipping content block: {}", e),
            }
        }

        Ok(Self {
            id,
            title: attrs.title.unwrap_or_default(),
            description: attrs.description.unwrap_or_default(),
            slug: attrs.slug.unwrap_or_default(),
            seo: PageSeo {
                title: attrs.seo_title.filter(|s| !s.is_empty()),
                description: attrs.seo_description.filter(|s| !s.is_empty()),
                keywords: attrs.seo_keywords,
            },
            og_image: attrs.og_image,
            blocks,
        })
    }

    /// A record with no content blocks
    pub fn empty(slug: &str) -> Self {
        Self {
            id: 0,
            title: String::new(),
            description: String::new(),
            slug: slug.to_string(),
            seo: PageSeo::default(),
            og_image: None,
            blocks: Vec::new(),
        }
    }

    /// Make every CMS-relative media URL absolute
    pub fn absolutize_media(&mut self, base_url: &str) {
        let fix = |image: &mut Option<Image>| {
            if let Some(image) = image {
                image.absolutize(base_url);
            }
        };

        fix(&mut self.og_image);
        for block in &mut self.blocks {
            match block {
                ContentBlock::Navigation(nav) => fix(&mut nav.logo),
                ContentBlock::Hero(hero) => {
                    fix(&mut hero.background_image);
                    fix(&mut hero.bottom_image);
                }
                ContentBlock::Body(body) => fix(&mut body.image),
                ContentBlock::Unrecognized { .. } => {}
            }
        }
    }

    /// The title used for metadata
    pub fn meta_title(&self) -> &str {
        self.seo.title.as_deref().unwrap_or(&self.title)
    }

    /// The description used for metadata
    pub fn meta_description(&self) -> &str {
        self.seo.description.as_deref().unwrap_or(&self.description)
    }
}

/// One tagged unit of a page's content sequence
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    Navigation(NavBlock),
    Hero(HeroBlock),
    Body(BodyBlock),
    /// A well-formed block with a tag this site does not render
    Unrecognized { component: String, id: i64 },
}

impl ContentBlock {
    /// Recognize a raw dynamic-zone entry
    pub fn from_value(value: &Value) -> Result<Self, BlockError> {
        let component = value
            .get("__component")
            .and_then(Value::as_str)
            .ok_or(BlockError::MissingTag)?
            .to_string();

        let id = value
            .get("id")
            .and_then(numeric_id)
            .ok_or_else(|| BlockError::MissingId {
                component: component.clone(),
            })?;

        let invalid = |source| BlockError::InvalidFields {
            component: component.clone(),
            id,
            source,
        };

        let block = match component.as_str() {
            NAVBAR_COMPONENT => {
                ContentBlock::Navigation(NavBlock { id, ..NavBlock::deserialize(value).map_err(invalid)? })
            }
            HERO_COMPONENT => {
                ContentBlock::Hero(HeroBlock { id, ..HeroBlock::deserialize(value).map_err(invalid)? })
            }
            CONTENT_COMPONENT => {
                ContentBlock::Body(BodyBlock { id, ..BodyBlock::deserialize(value).map_err(invalid)? })
            }
            _ => ContentBlock::Unrecognized {
                component: component.clone(),
                id,
            },
        };

        Ok(block)
    }

    pub fn id(&self) -> i64 {
        match self {
            ContentBlock::Navigation(b) => b.id,
            ContentBlock::Hero(b) => b.id,
            ContentBlock::Body(b) => b.id,
            ContentBlock::Unrecognized { id, .. } => *id,
        }
    }

    pub fn component(&self) -> &str {
        match self {
            ContentBlock::Navigation(_) => NAVBAR_COMPONENT,
            ContentBlock::Hero(_) => HERO_COMPONENT,
            ContentBlock::Body(_) => CONTENT_COMPONENT,
            ContentBlock::Unrecognized { component, .. } => component,
        }
    }
}

/// Navigation bar
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavBlock {
    #[serde(skip)]
    pub id: i64,
    #[serde(deserialize_with = "media::deserialize_image")]
    pub logo: Option<Image>,
    pub logo_alt: Option<String>,
    pub logo_href: Option<String>,
    pub logo_width: Option<u32>,
    pub logo_height: Option<u32>,
    #[serde(deserialize_with = "de::list_or_empty")]
    pub nav_items: Vec<NavEntry>,
    #[serde(deserialize_with = "de::list_or_empty")]
    pub cta_buttons: Vec<CtaButton>,
    /// Older schemas used a singular field name for the button list
    #[serde(rename = "ctaButton", deserialize_with = "de::list_or_empty")]
    pub legacy_cta_buttons: Vec<CtaButton>,
    pub background_color: Option<String>,
}

impl NavBlock {
    /// Buttons from whichever field the schema populated
    pub fn buttons(&self) -> &[CtaButton] {
        if self.cta_buttons.is_empty() {
            &self.legacy_cta_buttons
        } else {
            &self.cta_buttons
        }
    }
}

/// A navigation menu entry
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawNavEntry")]
pub enum NavEntry {
    Link {
        key: Option<String>,
        label: String,
        href: Option<String>,
    },
    Dropdown {
        key: Option<String>,
        label: String,
        categories: Vec<DropdownCategory>,
        footer_actions: Vec<FooterAction>,
    },
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct RawNavEntry {
    nav_item_id: Option<String>,
    id: Value,
    #[serde(deserialize_with = "de::null_default")]
    label: String,
    href: Option<String>,
    #[serde(deserialize_with = "de::null_default")]
    has_dropdown: bool,
    #[serde(deserialize_with = "de::list_or_empty")]
    dropdown_categories: Vec<DropdownCategory>,
    #[serde(deserialize_with = "de::list_or_empty")]
    dropdown_footer_actions: Vec<FooterAction>,
}

impl From<RawNavEntry> for NavEntry {
    fn from(raw: RawNavEntry) -> Self {
        let key = raw.nav_item_id.or_else(|| id_string(&raw.id));
        if raw.has_dropdown {
            NavEntry::Dropdown {
                key,
                label: raw.label,
                categories: raw.dropdown_categories,
                footer_actions: raw.dropdown_footer_actions,
            }
        } else {
            NavEntry::Link {
                key,
                label: raw.label,
                href: raw.href,
            }
        }
    }
}

/// A titled column inside a dropdown
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DropdownCategory {
    #[serde(rename = "categoryId")]
    pub key: Option<String>,
    #[serde(deserialize_with = "de::null_default")]
    pub title: String,
    #[serde(deserialize_with = "de::list_or_empty")]
    pub items: Vec<DropdownItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DropdownItem {
    #[serde(rename = "dropdownItemId")]
    pub key: Option<String>,
    #[serde(deserialize_with = "de::null_default")]
    pub title: String,
    pub description: Option<String>,
    #[serde(deserialize_with = "de::null_default")]
    pub href: String,
    pub icon: Option<String>,
}

/// An action link in a dropdown's footer row
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FooterAction {
    #[serde(rename = "footerActionId")]
    pub key: Option<String>,
    #[serde(deserialize_with = "de::null_default")]
    pub label: String,
    #[serde(deserialize_with = "de::null_default")]
    pub href: String,
    pub icon: Option<String>,
}

/// A call-to-action button
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RawCtaButton")]
pub struct CtaButton {
    pub key: Option<String>,
    pub label: String,
    pub href: String,
    pub variant: Option<String>,
    pub open_in_new_tab: bool,
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct RawCtaButton {
    cta_button_id: Option<String>,
    id: Value,
    #[serde(deserialize_with = "de::null_default")]
    label: String,
    #[serde(deserialize_with = "de::null_default")]
    href: String,
    variant: Option<String>,
    #[serde(deserialize_with = "de::null_default")]
    open_in_new_tab: bool,
}

impl From<RawCtaButton> for CtaButton {
    fn from(raw: RawCtaButton) -> Self {
        Self {
            key: raw.cta_button_id.or_else(|| id_string(&raw.id)),
            label: raw.label,
            href: raw.href,
            variant: raw.variant,
            open_in_new_tab: raw.open_in_new_tab,
        }
    }
}

/// Hero banner
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroBlock {
    #[serde(skip)]
    pub id: i64,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "de::list_or_empty")]
    pub cta_buttons: Vec<CtaButton>,
    #[serde(deserialize_with = "media::deserialize_image")]
    pub background_image: Option<Image>,
    pub background_color: Option<String>,
    pub text_alignment: Option<String>,
    #[serde(deserialize_with = "media::deserialize_image")]
    pub bottom_image: Option<Image>,
    pub seo: Option<HeroSeo>,
}

/// SEO hint attached to a hero
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct HeroSeo {
    #[serde(deserialize_with = "de::null_default")]
    pub h1: bool,
    #[serde(deserialize_with = "de::null_default")]
    pub keywords: Vec<String>,
}

/// Body content section
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BodyBlock {
    #[serde(skip)]
    pub id: i64,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<RichText>,
    /// Block-editor field; preferred over `description` when present
    pub content: Option<RichText>,
    pub cta_button: Option<CtaButton>,
    #[serde(deserialize_with = "media::deserialize_image")]
    pub image: Option<Image>,
    pub image_position: Option<String>,
    pub background_color: Option<String>,
    pub container_size: Option<String>,
    pub seo_heading_level: Option<String>,
}

impl BodyBlock {
    /// The description reduced to plain text
    pub fn description_text(&self) -> String {
        [&self.content, &self.description]
            .into_iter()
            .flatten()
            .find(|text| !text.is_blank())
            .map(RichText::to_plain_text)
            .unwrap_or_default()
    }
}
