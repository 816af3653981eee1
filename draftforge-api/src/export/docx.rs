/// Word document writer
///
/// Renders a project as a `.docx`: one top-level title heading from the
/// project title, then for each section a level-1 heading and the content
/// as body paragraphs (one per line). A section with empty content still
/// produces an empty paragraph; the section is present in the document,
/// just blank.

use super::ExportError;
use docx_rs::{Docx, Paragraph, Run, Style, StyleType};
use draftforge_shared::models::section::Section;
use std::io::{Seek, Write};

/// Writes the document to any seekable writer.
///
/// # Errors
///
/// Returns `ExportError::Docx` if packing the document fails.
pub fn write_docx<W: Write + Seek>(
    writer: W,
    title: &str,
    sections: &[Section],
) -> Result<(), ExportError> {
    let mut docx = Docx::new()
        .add_style(
            Style::new("Title", StyleType::Paragraph)
                .name("Title")
                .size(56)
                .bold(),
        )
        .add_style(
            Style::new("Heading1", StyleType::Paragraph)
                .name("Heading 1")
                .size(32)
                .bold(),
        )
        .add_paragraph(
            Paragraph::new()
                .style("Title")
                .add_run(Run::new().add_text(title)),
        );

    for section in sections {
        docx = docx.add_paragraph(
            Paragraph::new()
                .style("Heading1")
                .add_run(Run::new().add_text(section.title.as_str())),
        );

        if section.content.is_empty() {
            // Keep the empty body visible as a blank paragraph rather than
            // dropping it.
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text("")));
        } else {
            for line in section.content.split('\n') {
                docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(line)));
            }
        }
    }

    docx.build()
        .pack(writer)
        .map_err(|e| ExportError::Docx(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};
    use std::io::Cursor;

    fn section(title: &str, content: &str) -> Section {
        Section {
            id: 1,
            project_id: 1,
            title: title.to_string(),
            content: content.to_string(),
            comment: None,
            liked: None,
            created_at: Utc::now(),
        }
    }

    /// Flattens the document back into (paragraph count, full text).
    fn render(bytes: &[u8]) -> (usize, String) {
        let docx = read_docx(bytes).expect("Should read generated docx");

        let mut paragraphs = 0;
        let mut text = String::new();
        for child in docx.document.children.iter() {
            if let DocumentChild::Paragraph(p) = child {
                paragraphs += 1;
                for pc in p.children.iter() {
                    if let ParagraphChild::Run(run) = pc {
                        for rc in run.children.iter() {
                            if let RunChild::Text(t) = rc {
                                text.push_str(&t.text);
                            }
                        }
                        text.push('\n');
                    }
                }
            }
        }
        (paragraphs, text)
    }

    #[test]
    fn test_docx_contains_title_and_sections() {
        let sections = vec![section("A", "x"), section("B", "")];
        let mut buf = Cursor::new(Vec::new());

        write_docx(&mut buf, "My Report", &sections).expect("Export should succeed");

        let (paragraphs, text) = render(buf.get_ref());

        // Title + (heading + one body paragraph) per section.
        assert_eq!(paragraphs, 5);
        assert!(text.contains("My Report"));
        assert!(text.contains("A"));
        assert!(text.contains("x"));
        assert!(text.contains("B"));
    }

    #[test]
    fn test_docx_multiline_content_splits_paragraphs() {
        let sections = vec![section("Body", "first line\nsecond line")];
        let mut buf = Cursor::new(Vec::new());

        write_docx(&mut buf, "Doc", &sections).expect("Export should succeed");

        let (paragraphs, text) = render(buf.get_ref());

        // Title + heading + two body paragraphs.
        assert_eq!(paragraphs, 4);
        assert!(text.contains("first line"));
        assert!(text.contains("second line"));
    }

    #[test]
    fn test_docx_empty_outline_still_has_title() {
        let mut buf = Cursor::new(Vec::new());
        write_docx(&mut buf, "Empty", &[]).expect("Export should succeed");

        let (paragraphs, text) = render(buf.get_ref());
        assert_eq!(paragraphs, 1);
        assert!(text.contains("Empty"));
    }
}
