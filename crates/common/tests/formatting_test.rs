//! End-to-end checks of the formatting engine through its public API

use answerforge_common::formatting::{AnswerFormatOptions, AnswerFormatOptionsUpdate, AnswerFormatter};
use answerforge_common::models::{Citation, GeneratedAnswer, Importance, SectionType};

const MIXED: &str = "Retrieval-augmented generation is important for grounded answers [1].\n\n\
Here is an example:\n\n\
```python\nprint(\"hello [2]\") # a < b\n```\n\n\
| Column 1 | Column 2 |\n|----------|----------|\n| Cell 1 | Cell 2 |\n\n\
- First point [2]\n- Second point with **bold** text\n\n\
> However, Vector Databases remain critical [3].\n\n\
Finally, see [99] for details on <tags> & entities.";

fn citation(id: &str, title: &str) -> Citation {
    Citation {
        id: id.to_string(),
        document_id: format!("doc-{}", id),
        document_title: title.to_string(),
        excerpt: "excerpt".to_string(),
        confidence: 0.9,
        ..Default::default()
    }
}

fn mixed_answer() -> GeneratedAnswer {
    GeneratedAnswer::new(
        MIXED,
        vec![
            citation("c1", "RAG Survey"),
            citation("c2", "Python Docs"),
            citation("c3", "Vector DB Guide"),
        ],
    )
}

fn formatter_with(update: AnswerFormatOptionsUpdate) -> AnswerFormatter {
    let mut formatter = AnswerFormatter::default();
    formatter.update_options(update);
    formatter
}

fn has_numeric_marker(text: &str) -> bool {
    text.match_indices('[').any(|(start, _)| {
        let rest = &text[start + 1..];
        let digits = rest.chars().take_while(char::is_ascii_digit).count();
        digits > 0 && rest[digits..].starts_with(']')
    })
}

fn squash(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

#[test]
fn scenario_simple_paragraph() {
    let formatted = AnswerFormatter::default().format_answer(&GeneratedAnswer::new(
        "This is a simple paragraph. It contains basic information.",
        vec![],
    ));

    assert_eq!(formatted.structured_data.sections[0].section_type, SectionType::Paragraph);
}

#[test]
fn scenario_bullet_list() {
    let formatted = AnswerFormatter::default().format_answer(&GeneratedAnswer::new(
        "- First point\n- Second point\n- Third point",
        vec![],
    ));

    let sections = &formatted.structured_data.sections;
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].section_type, SectionType::List);
    assert!(formatted.html.contains("<ul"));
}

#[test]
fn scenario_code_block_after_intro() {
    let formatted = AnswerFormatter::default().format_answer(&GeneratedAnswer::new(
        "Here is an example:\n```javascript\nfunction example(){return \"Hello\";}\n```",
        vec![],
    ));

    let sections = &formatted.structured_data.sections;
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].section_type, SectionType::Paragraph);
    assert_eq!(sections[1].section_type, SectionType::Code);
    assert_eq!(sections[1].index, 1);
    assert!(formatted.html.contains("language-javascript"));
}

#[test]
fn scenario_quote() {
    let formatted = AnswerFormatter::default().format_answer(&GeneratedAnswer::new(
        "> This is a quote from an expert.",
        vec![],
    ));

    assert_eq!(formatted.structured_data.sections[0].section_type, SectionType::Quote);
    assert!(formatted.html.contains("<blockquote"));
}

#[test]
fn scenario_table() {
    let formatted = AnswerFormatter::default().format_answer(&GeneratedAnswer::new(
        "| Column 1 | Column 2 |\n|----------|----------|\n| Cell 1 | Cell 2 |",
        vec![],
    ));

    assert_eq!(formatted.structured_data.sections[0].section_type, SectionType::Table);
    assert!(formatted.html.contains("<table"));
    assert!(formatted.html.contains("Cell 2"));
}

#[test]
fn scenario_missing_citation() {
    let formatted = AnswerFormatter::default().format_answer(&GeneratedAnswer::new(
        "Reference to missing citation [99].",
        vec![],
    ));

    assert!(formatted.html.contains("citation-missing"));
    assert!(formatted.html.contains("data-citation-index=\"99\""));
    assert!(!formatted.html.contains("data-citation-id"));
}

#[test]
fn scenario_update_keeps_other_options() {
    let mut formatter = AnswerFormatter::new(AnswerFormatOptions {
        highlight_key_terms: true,
        max_line_length: 72,
        ..Default::default()
    });

    formatter.update_options(AnswerFormatOptionsUpdate {
        include_citations: Some(false),
        ..Default::default()
    });

    let options = formatter.options();
    assert!(!options.include_citations);
    assert!(options.highlight_key_terms);
    assert_eq!(options.max_line_length, 72);
    assert!(options.enable_markdown && options.enable_tables && options.enable_lists);
}

#[test]
fn first_section_is_high_importance() {
    let inputs = [
        "plain words",
        "- a\n- b",
        "```\ncode\n```",
        "> quoted",
        "| a | b |\n|---|---|\n| 1 | 2 |",
        MIXED,
    ];

    for content in inputs {
        let formatted = AnswerFormatter::default().format_answer(&GeneratedAnswer::new(content, vec![]));
        let sections = &formatted.structured_data.sections;
        assert!(!sections.is_empty(), "no sections for {:?}", content);
        assert_eq!(sections[0].importance, Importance::High, "content {:?}", content);
    }
}

#[test]
fn plain_text_has_no_markup_or_markers() {
    let updates = [
        AnswerFormatOptionsUpdate::default(),
        AnswerFormatOptionsUpdate {
            include_citations: Some(false),
            ..Default::default()
        },
        AnswerFormatOptionsUpdate {
            enable_markdown: Some(false),
            max_line_length: Some(20),
            ..Default::default()
        },
    ];

    for update in updates {
        let formatted = formatter_with(update).format_answer(&mixed_answer());
        assert!(!formatted.plain_text.contains('<'), "{}", formatted.plain_text);
        assert!(!has_numeric_marker(&formatted.plain_text), "{}", formatted.plain_text);
        assert!(squash(&formatted.plain_text).contains("Secondpointwithboldtext"));
    }
}

#[test]
fn citations_disabled_leaves_no_links_or_markers() {
    let formatted = formatter_with(AnswerFormatOptionsUpdate {
        include_citations: Some(false),
        ..Default::default()
    })
    .format_answer(&mixed_answer());

    assert!(!formatted.html.contains("data-citation-id"));
    assert!(!formatted.html.contains("citation-missing"));
    assert!(!has_numeric_marker(&formatted.html));
}

#[test]
fn citations_enabled_link_resolved_markers() {
    let formatted = AnswerFormatter::default().format_answer(&mixed_answer());

    assert!(formatted.html.contains("data-citation-id=\"c1\""));
    assert!(formatted.html.contains("data-citation-id=\"c3\""));
    assert!(formatted.html.contains("citation-missing"));

    let first = &formatted.structured_data.sections[0];
    assert_eq!(first.citation_ids, vec!["c1".to_string()]);
}

#[test]
fn citations_disabled_covers_fence_tags() {
    let formatted = formatter_with(AnswerFormatOptionsUpdate {
        include_citations: Some(false),
        ..Default::default()
    })
    .format_answer(&GeneratedAnswer::new("```[1]\nlet x = 1; [2]\n```", vec![]));

    assert_eq!(formatted.structured_data.sections[0].section_type, SectionType::Code);
    assert!(!formatted.html.contains("language-"));
    assert!(!has_numeric_marker(&formatted.html));
}

#[test]
fn tables_disabled_degrade_to_text() {
    let formatted = formatter_with(AnswerFormatOptionsUpdate {
        enable_tables: Some(false),
        ..Default::default()
    })
    .format_answer(&mixed_answer());

    assert!(!formatted.html.contains("<table"));
    assert!(formatted.html.contains("Cell 1"));

    let table = formatted
        .structured_data
        .sections
        .iter()
        .find(|s| s.section_type == SectionType::Table)
        .expect("table section is still classified");
    assert!(table.rendered_html.starts_with("<p"));
}

#[test]
fn highlighting_marks_key_terms() {
    let formatted = formatter_with(AnswerFormatOptionsUpdate {
        highlight_key_terms: Some(true),
        ..Default::default()
    })
    .format_answer(&mixed_answer());

    assert!(formatted.html.contains("<mark"));
    assert!(formatted.html.contains(">important</mark>"));

    let plain = AnswerFormatter::default().format_answer(&mixed_answer());
    assert!(!plain.html.contains("<mark"));
}

#[test]
fn highlighted_topics_never_split_entities() {
    let formatted = formatter_with(AnswerFormatOptionsUpdate {
        highlight_key_terms: Some(true),
        ..Default::default()
    })
    .format_answer(&GeneratedAnswer::new(
        "Google serves AMP pages & caches them. LT and GT matter when a < b > c.",
        vec![],
    ));

    assert!(formatted.structured_data.related_topics.iter().any(|t| t == "AMP"));
    assert!(formatted.html.contains("<mark class=\"key-term\">AMP</mark> pages &amp; caches"));
    assert!(formatted.html.contains("a &lt; b &gt; c."));
}

#[test]
fn html_escapes_source_text() {
    let formatted = AnswerFormatter::default().format_answer(&mixed_answer());

    assert!(formatted.html.contains("&lt;tags&gt; &amp; entities"));
    assert!(formatted.html.contains("a &lt; b"));
    assert!(!formatted.html.contains("<tags>"));
}

#[test]
fn raw_text_round_trips_modulo_whitespace() {
    for content in [MIXED, "one\n\n\n\ntwo", "- a\n  continued\n- b\n\n```\nx\n\ny\n```"] {
        let formatted = AnswerFormatter::default().format_answer(&GeneratedAnswer::new(content, vec![]));
        let joined: String = formatted
            .structured_data
            .sections
            .iter()
            .map(|s| s.raw_text.as_str())
            .collect();

        assert_eq!(squash(&joined), squash(content));
    }
}

#[test]
fn formatting_is_idempotent() {
    let formatter = formatter_with(AnswerFormatOptionsUpdate {
        highlight_key_terms: Some(true),
        ..Default::default()
    });
    let answer = mixed_answer();

    let first = formatter.format_answer(&answer);
    let second = formatter.format_answer(&answer);

    assert_eq!(first, second);
}

#[test]
fn mobile_mode_drops_section_attributes() {
    let formatted = formatter_with(AnswerFormatOptionsUpdate {
        mobile_optimized: Some(true),
        ..Default::default()
    })
    .format_answer(&mixed_answer());

    assert!(formatted.html.contains("formatted-answer--mobile"));
    assert!(!formatted.html.contains("data-section-index"));
}

#[test]
fn extraction_and_reading_stats() {
    let formatted = AnswerFormatter::default().format_answer(&mixed_answer());
    let data = &formatted.structured_data;

    assert!(!data.key_points.is_empty());
    assert!(data.key_points.len() <= 5);
    assert!(data.related_topics.iter().any(|t| t == "Vector Databases"));
    assert!(!data.summary.is_empty());
    assert!(!data.summary.contains('<'));

    assert!(formatted.word_count > 20);
    assert_eq!(formatted.reading_time, 1);
}

#[test]
fn answer_json_with_null_content_formats() {
    let answer: GeneratedAnswer = serde_json::from_str(
        r#"{"id": "a1", "content": null, "citations": [], "confidence": 0.5}"#,
    )
    .unwrap();

    let formatted = AnswerFormatter::default().format_answer(&answer);
    assert_eq!(formatted.structured_data.sections.len(), 1);
    assert_eq!(formatted.word_count, 0);
}
