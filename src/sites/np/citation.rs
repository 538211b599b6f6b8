use crate::cite::{assemble, Citation, CitationInput, CitationParts};
use crate::model::Article;
use crate::options::DateFormat;

use super::SITE;

fn describe(article: &Article) -> String {
    let mut out = match &article.title {
        Some(title) => format!("\"{}\", {}", title, article.published.format(DateFormat::Long)),
        None => article.published.format(DateFormat::Long),
    };
    if let Some(page) = &article.page {
        out.push_str(&format!(", page {}", page));
    }
    out
}

fn fields(article: &Article) -> Vec<(String, String)> {
    let mut fields = Vec::new();
    if let Some(title) = &article.title {
        fields.push(("Article title".to_string(), title.clone()));
    }
    fields.push(("Newspaper".to_string(), article.newspaper.clone()));
    fields.push(("Publication date".to_string(), article.published.to_string()));
    if let Some(location) = &article.location {
        fields.push(("Location".to_string(), location.to_string()));
    }
    if let Some(page) = &article.page {
        fields.push(("Page".to_string(), page.clone()));
    }
    fields
}

pub fn build_citation(input: &CitationInput) -> Citation {
    let article = input.data.article.as_ref();
    let title = match article {
        Some(Article {
            newspaper,
            location: Some(location),
            ..
        }) => format!("{} ({})", newspaper, location),
        Some(article) => article.newspaper.clone(),
        None => SITE.name.to_string(),
    };
    let parts = CitationParts {
        title,
        website: SITE.name,
        link_text: "clipping".to_string(),
        data_string: article.map(describe),
        data_fields: article.map(fields).unwrap_or_default(),
        source_reference: None,
    };
    assemble(input, SITE.data_style_key, parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cite::{CitationType, DataFragment};
    use crate::model::{EventDate, GeneralizedData, Place, RecordType, SourceType};
    use crate::options::CitationOptions;

    fn article() -> GeneralizedData {
        let mut data = GeneralizedData::new(
            "np",
            "https://www.newspapers.com/article/the-guardian-pavey-wedding/12345678/",
            SourceType::Article,
            RecordType::Newspaper,
        );
        data.article = EventDate::parse("Fri, Jan 16, 1914").map(|published| Article {
            newspaper: "The Guardian".into(),
            title: Some("Pavey wedding".into()),
            page: Some("5".into()),
            location: Place::normalize("London, England"),
            published,
        });
        data
    }

    fn cite(style: &str) -> Citation {
        let data = article();
        let options = CitationOptions::resolve([("citation_np_dataStyle", style)]).unwrap();
        build_citation(&CitationInput {
            data: &data,
            options: &options,
            table: None,
            citation_type: CitationType::Inline,
        })
    }

    #[test]
    fn string_style() {
        assert_eq!(
            cite("string").text,
            "<ref>'''The Guardian (London, England)'''<br/> ''Newspapers.com'' \
             [https://www.newspapers.com/article/the-guardian-pavey-wedding/12345678/ clipping], \
             \"Pavey wedding\", 16 January 1914, page 5</ref>"
        );
    }

    #[test]
    fn list_style() {
        let citation = cite("list");
        let Some(DataFragment::List(items)) = citation.data else {
            panic!("expected a list");
        };
        assert_eq!(items[0], "Article title: Pavey wedding");
        assert_eq!(items.len(), 5);
        assert!(citation.text.contains("\n* Page: 5"));
    }
}
