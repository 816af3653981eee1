/// Document export adapters
///
/// Serializes a project's sections into a downloadable office file:
///
/// - [`docx`]: Word document: a top-level title heading, then one level-1
///   heading plus content paragraphs per section
/// - [`pptx`]: PowerPoint deck: one title-and-body slide per section
///
/// Both writers are pure transformations over the persisted rows; the one
/// side effect is the file write. Unlike the generation adapter, export
/// failures propagate to the caller; a failed file write has no meaningful
/// fallback.
///
/// # File naming
///
/// Export paths are keyed by project id so that two projects with the same
/// title can never overwrite each other; the sanitized title rides along as
/// a readable slug: `{id}-{slug}.{docx|pptx}` under the configured export
/// directory.

pub mod docx;
pub mod pptx;

use draftforge_shared::models::{
    project::{DocType, Project},
    section::Section,
};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

/// Error type for export operations
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Filesystem failure (directory creation, file write)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// docx assembly failed
    #[error("Failed to assemble docx: {0}")]
    Docx(String),

    /// pptx package assembly failed
    #[error("Failed to assemble pptx: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Exports a project's sections to a file in the export directory.
///
/// Dispatches on the project's `doc_type` and returns the written path.
///
/// # Errors
///
/// Propagates any filesystem or assembly error; there is no fallback.
pub fn export_project(
    dir: &Path,
    project: &Project,
    sections: &[Section],
) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir)?;

    let path = dir.join(export_file_name(project));
    let file = File::create(&path)?;

    match project.doc_type {
        DocType::Docx => docx::write_docx(file, &project.title, sections)?,
        DocType::Pptx => pptx::write_pptx(file, sections)?,
    }

    info!(
        project_id = project.id,
        path = %path.display(),
        sections = sections.len(),
        "Exported project"
    );

    Ok(path)
}

/// Builds the export file name for a project: `{id}-{slug}.{ext}`.
pub fn export_file_name(project: &Project) -> String {
    format!(
        "{}-{}.{}",
        project.id,
        title_slug(&project.title),
        project.doc_type.as_str()
    )
}

/// Sanitizes a title for use in a file name.
///
/// Lowercases and maps every non-alphanumeric rune to `_`; an empty result
/// becomes "untitled".
fn title_slug(title: &str) -> String {
    let slug: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();

    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn project(id: i64, title: &str, doc_type: DocType) -> Project {
        Project {
            id,
            user_id: 1,
            title: title.to_string(),
            doc_type,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_title_slug() {
        assert_eq!(title_slug("Quarterly Report"), "quarterly_report");
        assert_eq!(title_slug("Q3 2025: Plan / Review"), "q3_2025__plan___review");
        assert_eq!(title_slug(""), "untitled");
        assert_eq!(title_slug("!!!"), "___");
    }

    #[test]
    fn test_export_file_name_is_keyed_by_id() {
        let a = project(1, "Same Title", DocType::Docx);
        let b = project(2, "Same Title", DocType::Docx);

        assert_eq!(export_file_name(&a), "1-same_title.docx");
        assert_eq!(export_file_name(&b), "2-same_title.docx");
        assert_ne!(export_file_name(&a), export_file_name(&b));
    }

    #[test]
    fn test_export_file_name_extension_follows_doc_type() {
        let deck = project(3, "Pitch", DocType::Pptx);
        assert_eq!(export_file_name(&deck), "3-pitch.pptx");
    }
}
