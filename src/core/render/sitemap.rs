//! Sitemap generation.
//!
//! Only the site root is listed. Individual posts live on the mirrored blog,
//! so the record is accepted but does not contribute entries yet.

use std::path::Path;

use chrono::{Local, NaiveDate};

use super::{escape_markup, write_output, RenderError};
use crate::core::storage::models::PostRecord;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const ROOT_PRIORITY: &str = "1.0";

pub fn render_sitemap(_record: &PostRecord, site_url: &str, today: NaiveDate) -> String {
    let mut xml = String::with_capacity(256);

    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"");
    xml.push_str(SITEMAP_NS);
    xml.push_str("\">\n");
    xml.push_str("    <url>\n        <loc>");
    xml.push_str(&escape_markup(site_url));
    xml.push_str("</loc>\n        <lastmod>");
    xml.push_str(&today.format("%Y-%m-%d").to_string());
    xml.push_str("</lastmod>\n        <priority>");
    xml.push_str(ROOT_PRIORITY);
    xml.push_str("</priority>\n    </url>\n</urlset>");
    xml
}

pub fn write_sitemap(
    record: &PostRecord,
    site_url: &str,
    path: &Path,
) -> Result<(), RenderError> {
    let xml = render_sitemap(record, site_url, Local::now().date_naive());
    write_output(path, &xml)?;
    tracing::debug!(path = %path.display(), "sitemap written");
    Ok(())
}
