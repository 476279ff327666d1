//! Atom feed parsing for arXiv API responses.
//!
//! Uses quick-xml events rather than a generic feed parser because the useful
//! metadata lives in the `arxiv:` extension namespace (`primary_category`,
//! `comment`, `journal_ref`, `doi`, `affiliation`).

use chrono::{DateTime, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::models::{Author, CatalogRecord, Category, Link};
use crate::sources::SourceError;

/// Fields accumulated while inside an `<entry>`
#[derive(Debug, Default)]
struct EntryBuilder {
    id: String,
    title: String,
    published: String,
    updated: String,
    summary: String,
    authors: Vec<Author>,
    categories: Vec<Category>,
    primary_category: Option<Category>,
    links: Vec<Link>,
    comment: String,
    journal_reference: String,
    doi: String,
}

impl EntryBuilder {
    /// Finish the entry; `None` when it has no usable publication timestamp
    fn build(self) -> Result<Option<CatalogRecord>, SourceError> {
        if self.id.contains("/api/errors") {
            return Err(SourceError::Api(collapse_whitespace(&self.summary)));
        }

        let id = self
            .id
            .rsplit_once("/abs/")
            .map(|(_, id)| id.to_string())
            .unwrap_or_else(|| self.id.clone());

        let Some(published) = parse_timestamp("published", &self.published) else {
            tracing::warn!(id = %id, "Skipping entry without a valid published timestamp");
            return Ok(None);
        };
        let updated = if self.updated.is_empty() {
            published
        } else {
            parse_timestamp("updated", &self.updated).unwrap_or(published)
        };

        let abstract_url = self
            .links
            .iter()
            .find(|l| l.rel == "alternate")
            .map(|l| l.href.clone())
            .unwrap_or_else(|| self.id.clone());
        let pdf_url = self
            .links
            .iter()
            .find(|l| l.title == "pdf")
            .map(|l| l.href.clone())
            .unwrap_or_default();

        let primary_category = self
            .primary_category
            .or_else(|| self.categories.first().cloned())
            .unwrap_or_default();

        let mut record = CatalogRecord::new(id, collapse_whitespace(&self.title), published);
        record.updated = updated;
        record.summary = self.summary.trim().to_string();
        record.authors = self.authors;
        record.categories = self.categories;
        record.primary_category = primary_category;
        record.links = self.links;
        record.comment = collapse_whitespace(&self.comment);
        record.journal_reference = collapse_whitespace(&self.journal_reference);
        record.doi = self.doi.trim().to_string();
        record.abstract_url = abstract_url;
        record.pdf_url = pdf_url;
        Ok(Some(record))
    }
}

/// Parse an arXiv Atom response into catalog records, preserving feed order
///
/// An arXiv error entry (malformed query, bad id) fails the whole parse with
/// [`SourceError::Api`] carrying the message arXiv reported.
pub fn parse_feed(xml: &str) -> Result<Vec<CatalogRecord>, SourceError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut records = Vec::new();
    let mut entry: Option<EntryBuilder> = None;
    let mut author: Option<Author> = None;
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                text.clear();
                match e.local_name().as_ref() {
                    b"entry" => entry = Some(EntryBuilder::default()),
                    b"author" if entry.is_some() => author = Some(Author::default()),
                    _ => {
                        if let Some(entry) = entry.as_mut() {
                            read_attributes(&e, entry)?;
                        }
                    }
                }
            }
            Ok(Event::Empty(e)) => {
                if let Some(entry) = entry.as_mut() {
                    read_attributes(&e, entry)?;
                }
            }
            Ok(Event::Text(t)) => {
                let value = t.unescape().map_err(|e| SourceError::Parse(e.to_string()))?;
                text.push_str(&value);
            }
            Ok(Event::CData(c)) => {
                text.push_str(&String::from_utf8_lossy(&c.into_inner()));
            }
            Ok(Event::End(e)) => {
                let Some(current) = entry.as_mut() else {
                    continue;
                };
                let value = std::mem::take(&mut text);

                if let Some(a) = author.as_mut() {
                    match e.local_name().as_ref() {
                        b"name" => a.name = value.trim().to_string(),
                        b"affiliation" => a.affiliations.push(value.trim().to_string()),
                        b"author" => {
                            if let Some(a) = author.take() {
                                current.authors.push(a);
                            }
                        }
                        _ => {}
                    }
                    continue;
                }

                match e.local_name().as_ref() {
                    b"id" => current.id = value.trim().to_string(),
                    b"title" => current.title = value,
                    b"summary" => current.summary = value,
                    b"published" => current.published = value.trim().to_string(),
                    b"updated" => current.updated = value.trim().to_string(),
                    b"comment" => current.comment = value,
                    b"journal_ref" => current.journal_reference = value,
                    b"doi" => current.doi = value,
                    b"entry" => {
                        if let Some(record) = entry.take().map(EntryBuilder::build).transpose()?.flatten() {
                            records.push(record);
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(SourceError::Parse(format!(
                    "XML parsing error at position {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
        }
    }

    Ok(records)
}

/// Collect `category`, `primary_category` and `link` attributes
fn read_attributes(e: &BytesStart<'_>, entry: &mut EntryBuilder) -> Result<(), SourceError> {
    match e.local_name().as_ref() {
        b"category" => {
            let term = attribute(e, b"term")?;
            if !term.is_empty() {
                entry.categories.push(Category {
                    term,
                    scheme: attribute(e, b"scheme")?,
                });
            }
        }
        b"primary_category" => {
            entry.primary_category = Some(Category {
                term: attribute(e, b"term")?,
                scheme: attribute(e, b"scheme")?,
            });
        }
        b"link" => {
            entry.links.push(Link {
                href: attribute(e, b"href")?,
                rel: attribute(e, b"rel")?,
                content_type: attribute(e, b"type")?,
                title: attribute(e, b"title")?,
            });
        }
        _ => {}
    }
    Ok(())
}

/// Value of the attribute with local name `key`, or an empty string
fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Result<String, SourceError> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| SourceError::Parse(format!("Bad attribute: {}", err)))?;
        if attr.key.local_name().as_ref() == key {
            let value = attr
                .unescape_value()
                .map_err(|err| SourceError::Parse(format!("Bad attribute value: {}", err)))?;
            return Ok(value.into_owned());
        }
    }
    Ok(String::new())
}

/// RFC 3339 timestamp in UTC, logging and returning `None` when unparsable
fn parse_timestamp(field: &str, value: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            tracing::warn!("Invalid {} timestamp {:?}: {}", field, value, e);
            None
        }
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
