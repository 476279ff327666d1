//! Regenerates the taxonomy asset from the arXiv category page.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::path::Path;

use super::{Field, TaxonomyCategory, TaxonomyError};
use crate::utils::HttpClient;

/// Page listing every arXiv category
pub const TAXONOMY_PAGE_URL: &str = "https://arxiv.org/category_taxonomy";

/// Leading `h2` headings on the page that are not subject fields
const NON_FIELD_HEADINGS: usize = 3;

fn selector(css: &str) -> Result<Selector, TaxonomyError> {
    Selector::parse(css).map_err(|e| TaxonomyError::Layout(format!("selector {}: {:?}", css, e)))
}

fn first_text(el: ElementRef<'_>) -> String {
    el.text().next().unwrap_or_default().trim().to_string()
}

/// Extract the taxonomy from the category page HTML
///
/// Field titles come from the `h2` headings after the introductory ones and
/// pair up in order with the `.accordion-body` blocks. Each `.columns.divided`
/// row holds one category: an `h4` of the form `tag (Label)` and a
/// description paragraph.
pub fn extract_taxonomy(html: &str) -> Result<Vec<Field>, TaxonomyError> {
    let document = Html::parse_document(html);
    let h2 = selector("h2")?;
    let body = selector(".accordion-body")?;
    let row = selector(".columns.divided")?;
    let h4 = selector("h4")?;
    let paragraph = selector(".column:not(.is-one-fifth) p")?;
    let tag_line = Regex::new(r"^([^\s(]+)\s+\(([^)]+)\)")
        .map_err(|e| TaxonomyError::Layout(e.to_string()))?;

    let headings: Vec<String> = document
        .select(&h2)
        .skip(NON_FIELD_HEADINGS)
        .map(first_text)
        .collect();

    let mut fields = Vec::new();
    for (i, section) in document.select(&body).enumerate() {
        let title = headings.get(i).cloned().ok_or_else(|| {
            TaxonomyError::Layout(format!("no heading for field section {}", i + 1))
        })?;

        let mut categories = Vec::new();
        for category in section.select(&row) {
            let line = category
                .select(&h4)
                .next()
                .map(|el| el.text().collect::<String>())
                .unwrap_or_default();
            let line = line.trim();
            let (tag, label) = match tag_line.captures(line) {
                Some(caps) => (caps[1].to_string(), caps[2].to_string()),
                None => {
                    tracing::warn!("Unrecognized category heading: {:?}", line);
                    (String::new(), String::new())
                }
            };
            let description = category
                .select(&paragraph)
                .next()
                .map(|p| p.text().collect::<String>().trim().to_string())
                .unwrap_or_default();

            categories.push(TaxonomyCategory {
                tag,
                label,
                description,
            });
        }

        fields.push(Field { title, categories });
    }

    Ok(fields)
}

/// Fetch the category page, extract the taxonomy and write it as JSON
pub async fn scrape_taxonomy(
    client: &HttpClient,
    output: &Path,
) -> Result<Vec<Field>, TaxonomyError> {
    tracing::info!("Fetching arXiv category taxonomy from {}", TAXONOMY_PAGE_URL);

    let response = client
        .get(TAXONOMY_PAGE_URL)
        .send()
        .await
        .map_err(|e| TaxonomyError::Fetch(e.to_string()))?;
    if !response.status().is_success() {
        return Err(TaxonomyError::Fetch(format!("HTTP error: {}", response.status())));
    }
    let html = response
        .text()
        .await
        .map_err(|e| TaxonomyError::Fetch(e.to_string()))?;

    let fields = extract_taxonomy(&html)?;
    let json = serde_json::to_string(&fields).map_err(|e| TaxonomyError::Json(e.to_string()))?;
    std::fs::write(output, json)?;

    tracing::info!(
        fields = fields.len(),
        "Wrote taxonomy to {}",
        output.display()
    );
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
<h2>Category Taxonomy</h2>
<h2>Classification guide</h2>
<h2>Group Name</h2>
<h2>Computer Science</h2>
<h2>Physics</h2>
<div class="accordion-body">
  <div class="columns divided">
    <div class="column is-one-fifth"><h4>cs.AI <span>(Artificial Intelligence)</span></h4></div>
    <div class="column"><p>Covers all areas of AI except Vision, Robotics.</p></div>
  </div>
  <div class="columns divided">
    <div class="column is-one-fifth"><h4>cs.CL <span>(Computation and Language)</span></h4></div>
    <div class="column"><p>Covers natural language processing.</p></div>
  </div>
</div>
<div class="accordion-body">
  <div class="columns divided">
    <div class="column is-one-fifth"><h4>hep-th <span>(High Energy Physics - Theory)</span></h4></div>
    <div class="column"><p>Formal aspects of quantum field theory.</p><p>Ignored.</p></div>
  </div>
</div>
</body></html>"#;

    #[test]
    fn test_extract_taxonomy() {
        let fields = extract_taxonomy(PAGE).unwrap();
        assert_eq!(fields.len(), 2);

        assert_eq!(fields[0].title, "Computer Science");
        assert_eq!(fields[0].categories.len(), 2);
        assert_eq!(
            fields[0].categories[0],
            TaxonomyCategory {
                tag: "cs.AI".to_string(),
                label: "Artificial Intelligence".to_string(),
                description: "Covers all areas of AI except Vision, Robotics.".to_string(),
            }
        );

        assert_eq!(fields[1].title, "Physics");
        assert_eq!(fields[1].categories[0].tag, "hep-th");
        assert_eq!(fields[1].categories[0].label, "High Energy Physics - Theory");
        assert_eq!(
            fields[1].categories[0].description,
            "Formal aspects of quantum field theory."
        );
    }

    #[test]
    fn test_missing_heading_is_layout_error() {
        let page = r#"<h2>a</h2><h2>b</h2><h2>c</h2>
<div class="accordion-body"></div>"#;
        assert!(matches!(
            extract_taxonomy(page),
            Err(TaxonomyError::Layout(_))
        ));
    }
}
