//! Content module - page records, content blocks and their dispatch to views

mod de;
pub mod dispatch;
pub mod media;
mod page;
pub mod richtext;
pub mod view;

pub use dispatch::{partition, Dispatcher, Partition};
pub use media::Image;
pub use page::{
    BlockError, BodyBlock, ContentBlock, CtaButton, DropdownCategory, DropdownItem, FooterAction,
    HeroBlock, HeroSeo, NavBlock, NavEntry, PageRecord, PageSeo, CONTENT_COMPONENT,
    HERO_COMPONENT, NAVBAR_COMPONENT,
};
pub use richtext::RichText;
pub use view::PageView;
