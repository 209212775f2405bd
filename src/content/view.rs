//! Presentational units handed to the templates

use serde::Serialize;

use super::media::Image;

/// A fully resolved page body
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageView {
    pub navbars: Vec<NavbarView>,
    pub heroes: Vec<HeroView>,
    pub sections: Vec<SectionView>,
}

impl PageView {
    pub fn is_empty(&self) -> bool {
        self.navbars.is_empty() && self.heroes.is_empty() && self.sections.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavbarView {
    pub key: i64,
    pub logo: LogoView,
    pub entries: Vec<NavEntryView>,
    pub buttons: Vec<ButtonView>,
    pub background: Background,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogoView {
    pub src: String,
    pub alt: String,
    pub href: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavEntryView {
    Link {
        key: String,
        label: String,
        href: String,
    },
    Dropdown {
        key: String,
        label: String,
        categories: Vec<CategoryView>,
        footer_actions: Vec<LinkView>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryView {
    pub title: String,
    pub items: Vec<LinkView>,
}

/// A link with optional description and icon name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkView {
    pub label: String,
    pub description: Option<String>,
    pub href: String,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ButtonView {
    pub key: String,
    pub label: String,
    pub href: String,
    pub variant: ButtonVariant,
    pub new_tab: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroView {
    pub key: i64,
    pub anchor: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: String,
    pub buttons: Vec<ButtonView>,
    pub background_image: Option<String>,
    pub background: Background,
    pub alignment: Alignment,
    pub bottom_image: Option<Image>,
    pub heading: HeadingLevel,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionView {
    pub key: i64,
    pub anchor: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: String,
    /// Description split on line breaks, blank lines removed
    pub paragraphs: Vec<String>,
    pub button: Option<ButtonView>,
    pub image: Image,
    pub side: ImageSide,
    pub background: Background,
    pub container: ContainerSize,
    pub heading: HeadingLevel,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    #[default]
    White,
    Gray,
    Blue,
    Gradient,
    Transparent,
}

impl Background {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("gray") => Background::Gray,
            Some("blue") => Background::Blue,
            Some("gradient") => Background::Gradient,
            Some("transparent") => Background::Transparent,
            _ => Background::White,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

impl Alignment {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("left") => Alignment::Left,
            Some("right") => Alignment::Right,
            _ => Alignment::Center,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    #[default]
    Default,
    Outline,
    Ghost,
}

impl ButtonVariant {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("outline") => ButtonVariant::Outline,
            Some("ghost") => ButtonVariant::Ghost,
            _ => ButtonVariant::Default,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSide {
    Left,
    #[default]
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerSize {
    Sm,
    Md,
    #[default]
    Lg,
    Xl,
}

impl ContainerSize {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("sm") => ContainerSize::Sm,
            Some("md") => ContainerSize::Md,
            Some("xl") => ContainerSize::Xl,
            _ => ContainerSize::Lg,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
}

impl HeadingLevel {
    /// Section headings; the page heading is reserved for heroes
    pub fn parse_section(value: Option<&str>) -> Self {
        match value {
            Some("h3") => HeadingLevel::H3,
            Some("h4") => HeadingLevel::H4,
            _ => HeadingLevel::H2,
        }
    }
}
