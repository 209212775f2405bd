//! List site information

use anyhow::Result;

use crate::content::{partition, ContentBlock};
use crate::Landing;

/// Print slugs, populate variants or the default page's blocks
pub async fn run(app: &Landing, kind: &str) -> Result<()> {
    let loader = app.loader()?;

    match kind {
        "page" | "pages" => {
            let slugs = loader.slugs().await;
            println!("Pages ({}):", slugs.len());
            for slug in slugs {
                println!("  {}", slug);
            }
        }
        "variant" | "variants" => {
            let variants = loader.client().variants();
            println!("Populate variants ({}):", variants.len());
            for variant in variants {
                println!("  {}. {}", variant.attempt, variant.label());
            }
        }
        "block" | "blocks" => {
            let page = loader.load(loader.default_slug()).await;
            println!("Blocks of '{}' ({}):", page.slug, page.origin);

            let Some(record) = page.record else {
                println!("  (no page)");
                return Ok(());
            };
            for block in &record.blocks {
                println!("  {}", describe(block));
            }

            let parts = partition(&record.blocks);
            println!(
                "Rendered: {} navigation, {} hero, {} body",
                parts.navigation.len(),
                parts.hero.len(),
                parts.body.len()
            );
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: pages, variants, blocks", kind);
        }
    }

    Ok(())
}

fn describe(block: &ContentBlock) -> String {
    let title = match block {
        ContentBlock::Hero(hero) => hero.title.as_deref(),
        ContentBlock::Body(body) => body.title.as_deref(),
        ContentBlock::Navigation(_) => None,
        ContentBlock::Unrecognized { .. } => Some("(not rendered)"),
    };

    match title {
        Some(title) => format!("{}#{} {}", block.component(), block.id(), title),
        None => format!("{}#{}", block.component(), block.id()),
    }
}
