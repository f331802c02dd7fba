//! Agrupamento de citações por documento.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::{non_blank, SourceCitation};

/// Citações de um mesmo documento, consolidadas
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSources {
    /// Título do documento
    pub document_title: String,
    /// Referências de página ordenadas (`page 3 (Intro, Results)`)
    pub page_references: Vec<String>,
    /// Citação combinada (`Title, page 3, page 5`)
    pub citation_string: String,
    /// Trechos não vazios, na ordem de entrada
    pub quotes: Vec<String>,
}

/// Agrupa citações por título de documento, na ordem em que cada documento
/// aparece pela primeira vez.
///
/// Citações sem título são ignoradas. Páginas ausentes não geram referência.
pub fn group_sources_by_document(sources: &[SourceCitation], page_label: &str) -> Vec<DocumentSources> {
    let mut order: Vec<&str> = Vec::new();
    let mut by_document: BTreeMap<&str, Vec<&SourceCitation>> = BTreeMap::new();

    for source in sources {
        let Some(title) = non_blank(source.document_title.as_deref()) else {
            log::debug!("[group_sources] Skipping citation without document title");
            continue;
        };
        let title = title.trim();
        let entry = by_document.entry(title).or_default();
        if entry.is_empty() {
            order.push(title);
        }
        entry.push(source);
    }

    order
        .into_iter()
        .map(|title| {
            let citations = &by_document[title];

            let mut pages: BTreeMap<u32, Vec<&str>> = BTreeMap::new();
            for citation in citations {
                if let Some(page) = citation.page() {
                    let sections = pages.entry(page).or_default();
                    if let Some(section) = non_blank(citation.section_title.as_deref()) {
                        if !sections.contains(&section) {
                            sections.push(section);
                        }
                    }
                }
            }

            let page_references: Vec<String> = pages
                .into_iter()
                .map(|(page, sections)| {
                    if sections.is_empty() {
                        format!("{} {}", page_label, page)
                    } else {
                        format!("{} {} ({})", page_label, page, sections.join(", "))
                    }
                })
                .collect();

            let citation_string = if page_references.is_empty() {
                title.to_string()
            } else {
                format!("{}, {}", title, page_references.join(", "))
            };

            let quotes = citations
                .iter()
                .filter_map(|c| c.excerpt())
                .map(str::to_string)
                .collect();

            DocumentSources {
                document_title: title.to_string(),
                page_references,
                citation_string,
                quotes,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_by_document_in_first_seen_order() {
        let sources = vec![
            SourceCitation::new("Zeta Report").with_page(5).with_quote("z5"),
            SourceCitation::new("Alpha Report").with_page(2),
            SourceCitation::new("Zeta Report").with_page(3).with_section("Intro"),
            SourceCitation::new("Zeta Report").with_page(3).with_section("Results"),
        ];

        let grouped = group_sources_by_document(&sources, "page");
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].document_title, "Zeta Report");
        assert_eq!(
            grouped[0].page_references,
            vec!["page 3 (Intro, Results)".to_string(), "page 5".to_string()]
        );
        assert_eq!(
            grouped[0].citation_string,
            "Zeta Report, page 3 (Intro, Results), page 5"
        );
        assert_eq!(grouped[0].quotes, vec!["z5".to_string()]);
        assert_eq!(grouped[1].citation_string, "Alpha Report, page 2");
    }

    #[test]
    fn test_titles_are_grouped_after_trim() {
        let sources = vec![
            SourceCitation::new("Doc ").with_page(1),
            SourceCitation::new("  Doc").with_page(2),
        ];
        let grouped = group_sources_by_document(&sources, "page");
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].document_title, "Doc");
        assert_eq!(grouped[0].citation_string, "Doc, page 1, page 2");
    }

    #[test]
    fn test_untitled_sources_are_skipped() {
        let sources = vec![SourceCitation::default().with_page(1)];
        assert!(group_sources_by_document(&sources, "page").is_empty());
    }

    #[test]
    fn test_document_without_pages() {
        let grouped = group_sources_by_document(&[SourceCitation::new("Memo")], "page");
        assert_eq!(grouped[0].citation_string, "Memo");
        assert!(grouped[0].page_references.is_empty());
    }
}
