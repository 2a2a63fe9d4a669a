//! List the posts of the first page

use anyhow::Result;

use crate::helpers;
use crate::Blog;

/// Print the first page of posts as the home page would show them
pub async fn run(blog: &Blog) -> Result<()> {
    let client = blog.client()?;
    let page = client.first_page().await?;
    let locale = helpers::locale_for(&blog.config.language);

    println!("Posts ({}):", page.results.len());
    for post in &page.results {
        let date = helpers::publication_date(post.first_publication_date.as_deref(), locale)
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {} - {} by {} [{}]",
            date,
            post.data.title,
            post.data.author,
            post.uid.as_deref().unwrap_or("no uid")
        );
    }

    if page.next_page.is_some() {
        println!("More posts available.");
    }

    Ok(())
}
