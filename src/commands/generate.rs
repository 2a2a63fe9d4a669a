//! Generate static files

use anyhow::Result;

use crate::generator::Generator;
use crate::Blog;

/// Export the whole site into the public directory
pub async fn run(blog: &Blog) -> Result<()> {
    let start = std::time::Instant::now();

    let generator = Generator::new(blog)?;
    let summary = generator.generate().await?;

    tracing::info!(
        "Generated {} listing pages, {} posts and {} assets in {:.2}s",
        summary.listing_pages,
        summary.posts,
        summary.assets,
        start.elapsed().as_secs_f64()
    );

    Ok(())
}
