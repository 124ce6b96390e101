use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;

use super::title::rewrite_title;
use super::{escape_markup, write_output, RenderError};
use crate::core::config::MirrorConfig;
use crate::core::storage::models::{PostRecord, StoredPost};

const PAGE_TITLE: &str = "소담의 AI Mind";
const PAGE_DESCRIPTION: &str = "소담의 AI Mind: 네이버 블로그의 핵심 인공지능 인사이트를 보관합니다.";
const PAGE_SUBTITLE: &str = "킹콩노트 - 네이버 블로그";
const ARCHIVE_NAME: &str = "Sony's AI Mind Archive (Seoul Proxy)";
const AUTHOR_BIO: &str = "Tech-Legal Specialist | NY-Qualified Attorney | Seoul, Korea. 인공지능과 비즈니스의 융합을 연구하며 전문적인 기술-법률적 통찰을 기록합니다.";
const COPYRIGHT_YEAR: &str = "2026";
const ORIGIN_BLOG_HOST: &str = "https://blog.naver.com";

#[derive(Debug, Serialize)]
struct BlogLd<'a> {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "@type")]
    kind: &'static str,
    name: &'static str,
    url: &'a str,
    #[serde(rename = "blogPost")]
    blog_post: Vec<BlogPostingLd<'a>>,
}

#[derive(Debug, Serialize)]
struct BlogPostingLd<'a> {
    #[serde(rename = "@type")]
    kind: &'static str,
    headline: &'a str,
    url: &'a str,
    #[serde(rename = "datePublished")]
    date_published: &'a str,
    author: PersonLd<'a>,
}

#[derive(Debug, Serialize)]
struct PersonLd<'a> {
    #[serde(rename = "@type")]
    kind: &'static str,
    name: &'a str,
}

/// Newest first; equal dates fall back to the id, also descending.
pub fn sorted_posts(record: &PostRecord) -> Vec<(&str, &StoredPost)> {
    let mut posts: Vec<(&str, &StoredPost)> = record
        .iter()
        .map(|(id, post)| (id.as_str(), post))
        .collect();
    posts.sort_by(|(left_id, left), (right_id, right)| {
        right
            .effective_date()
            .cmp(left.effective_date())
            .then_with(|| right_id.cmp(left_id))
    });
    posts
}

pub fn render_page(record: &PostRecord, config: &MirrorConfig) -> Result<String, RenderError> {
    let posts = sorted_posts(record);

    let mut cards = String::new();
    let mut postings = Vec::with_capacity(posts.len());
    for (_, post) in &posts {
        let link = escape_markup(&post.link);
        let _ = write!(
            cards,
            r#"
        <article class="post-card">
            <div class="post-date">{date}</div>
            <h2 class="post-title"><a href="{link}" target="_blank">{title}</a></h2>
            <link rel="canonical" href="{link}">
        </article>
        "#,
            date = escape_markup(&post.date),
            title = escape_markup(&rewrite_title(&post.title)),
        );

        postings.push(BlogPostingLd {
            kind: "BlogPosting",
            headline: &post.title,
            url: &post.link,
            date_published: post.effective_date(),
            author: PersonLd {
                kind: "Person",
                name: &config.blog_id,
            },
        });
    }

    let json_ld = structured_data(&BlogLd {
        context: "https://schema.org",
        kind: "Blog",
        name: ARCHIVE_NAME,
        url: &config.site_url,
        blog_post: postings,
    })?;
    let blog_id = escape_markup(&config.blog_id);

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="ko">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{PAGE_TITLE}</title>
    <meta name="description" content="{PAGE_DESCRIPTION}">
    <link rel="stylesheet" href="assets/style.css">
    <script type="application/ld+json">
{json_ld}
    </script>
</head>
<body>
    <header>
        <div class="container">
            <h1>{PAGE_TITLE}</h1>
            <p class="subtitle">{PAGE_SUBTITLE}</p>
        </div>
    </header>
    <main class="container">
        <div class="post-grid">
            {cards}
        </div>
    </main>
    <footer>
        <div class="container">
            <p class="author-bio">{AUTHOR_BIO}</p>
            <p>&copy; {COPYRIGHT_YEAR} {blog_id}. All rights reserved. <a href="{ORIGIN_BLOG_HOST}/{blog_id}">원본 블로그 바로가기</a></p>
        </div>
    </footer>
</body>
</html>
"#
    ))
}

pub fn write_page(
    record: &PostRecord,
    config: &MirrorConfig,
    path: &Path,
) -> Result<(), RenderError> {
    let html = render_page(record, config)?;
    write_output(path, &html)?;
    tracing::debug!(path = %path.display(), posts = record.len(), "page written");
    Ok(())
}

/// Pretty JSON for an inline `<script>` block; `</` is escaped so a title cannot close it.
fn structured_data(value: &impl Serialize) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string_pretty(value)?;
    Ok(json.replace("</", "<\\/"))
}
