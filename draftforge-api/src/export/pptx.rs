/// PowerPoint deck writer
///
/// Assembles a minimal OOXML presentation package by hand and zips it: the
/// fixed boilerplate parts (content types, presentation, slide master,
/// layout, theme, relationships) plus one generated slide per section.
///
/// Each slide uses the fixed title-and-body layout: the title placeholder
/// carries the section title, the body placeholder the section content. A
/// section with empty content still gets its body run, with an empty text
/// element; the slide is present, just blank.

use super::ExportError;
use draftforge_shared::models::section::Section;
use std::io::{Seek, Write};
use zip::{write::FileOptions, ZipWriter};

const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n";

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";

const REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_SLIDE_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
const REL_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
const REL_SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const REL_THEME: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";

/// Writes the deck to any seekable writer.
///
/// # Errors
///
/// Returns an error if writing any package part fails.
pub fn write_pptx<W: Write + Seek>(writer: W, sections: &[Section]) -> Result<(), ExportError> {
    let mut zip = ZipWriter::new(writer);
    let options: FileOptions = FileOptions::default();

    let part = |zip: &mut ZipWriter<W>, name: &str, content: &str| -> Result<(), ExportError> {
        zip.start_file(name, options)?;
        zip.write_all(content.as_bytes())?;
        Ok(())
    };

    part(&mut zip, "[Content_Types].xml", &content_types(sections.len()))?;
    part(&mut zip, "_rels/.rels", &root_rels())?;
    part(&mut zip, "ppt/presentation.xml", &presentation(sections.len()))?;
    part(
        &mut zip,
        "ppt/_rels/presentation.xml.rels",
        &presentation_rels(sections.len()),
    )?;
    part(&mut zip, "ppt/slideMasters/slideMaster1.xml", &slide_master())?;
    part(
        &mut zip,
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        &slide_master_rels(),
    )?;
    part(&mut zip, "ppt/slideLayouts/slideLayout1.xml", &slide_layout())?;
    part(
        &mut zip,
        "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
        &slide_layout_rels(),
    )?;
    part(&mut zip, "ppt/theme/theme1.xml", &theme())?;

    for (i, section) in sections.iter().enumerate() {
        let n = i + 1;
        part(
            &mut zip,
            &format!("ppt/slides/slide{}.xml", n),
            &slide(&section.title, &section.content),
        )?;
        part(
            &mut zip,
            &format!("ppt/slides/_rels/slide{}.xml.rels", n),
            &slide_rels(),
        )?;
    }

    zip.finish()?;
    Ok(())
}

/// Escapes text for embedding in XML content or attribute values.
fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn content_types(slide_count: usize) -> String {
    let mut overrides = String::new();
    for n in 1..=slide_count {
        overrides.push_str(&format!(
            "<Override PartName=\"/ppt/slides/slide{}.xml\" \
             ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slide+xml\"/>",
            n
        ));
    }

    format!(
        "{}<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
         <Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
         <Default Extension=\"xml\" ContentType=\"application/xml\"/>\
         <Override PartName=\"/ppt/presentation.xml\" \
          ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml\"/>\
         <Override PartName=\"/ppt/slideMasters/slideMaster1.xml\" \
          ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml\"/>\
         <Override PartName=\"/ppt/slideLayouts/slideLayout1.xml\" \
          ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml\"/>\
         <Override PartName=\"/ppt/theme/theme1.xml\" \
          ContentType=\"application/vnd.openxmlformats-officedocument.theme+xml\"/>\
         {}</Types>",
        XML_HEADER, overrides
    )
}

fn root_rels() -> String {
    format!(
        "{}<Relationships xmlns=\"{}\">\
         <Relationship Id=\"rId1\" Type=\"{}\" Target=\"ppt/presentation.xml\"/>\
         </Relationships>",
        XML_HEADER, REL_NS, REL_OFFICE_DOCUMENT
    )
}

fn presentation(slide_count: usize) -> String {
    // rId1 is the slide master; slides start at rId2.
    let mut slide_ids = String::new();
    for n in 1..=slide_count {
        slide_ids.push_str(&format!(
            "<p:sldId id=\"{}\" r:id=\"rId{}\"/>",
            255 + n,
            n + 1
        ));
    }

    format!(
        "{}<p:presentation xmlns:a=\"{}\" xmlns:r=\"{}\" xmlns:p=\"{}\">\
         <p:sldMasterIdLst><p:sldMasterId id=\"2147483648\" r:id=\"rId1\"/></p:sldMasterIdLst>\
         <p:sldIdLst>{}</p:sldIdLst>\
         <p:sldSz cx=\"9144000\" cy=\"6858000\"/>\
         <p:notesSz cx=\"6858000\" cy=\"9144000\"/>\
         </p:presentation>",
        XML_HEADER, NS_A, NS_R, NS_P, slide_ids
    )
}

fn presentation_rels(slide_count: usize) -> String {
    let mut rels = format!(
        "<Relationship Id=\"rId1\" Type=\"{}\" Target=\"slideMasters/slideMaster1.xml\"/>",
        REL_SLIDE_MASTER
    );
    for n in 1..=slide_count {
        rels.push_str(&format!(
            "<Relationship Id=\"rId{}\" Type=\"{}\" Target=\"slides/slide{}.xml\"/>",
            n + 1,
            REL_SLIDE,
            n
        ));
    }

    format!(
        "{}<Relationships xmlns=\"{}\">{}</Relationships>",
        XML_HEADER, REL_NS, rels
    )
}

/// The empty shape-tree skeleton shared by master, layout, and slides.
fn empty_sp_tree(extra_shapes: &str) -> String {
    format!(
        "<p:spTree>\
         <p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>\
         <p:grpSpPr/>{}</p:spTree>",
        extra_shapes
    )
}

fn slide_master() -> String {
    format!(
        "{}<p:sldMaster xmlns:a=\"{}\" xmlns:r=\"{}\" xmlns:p=\"{}\">\
         <p:cSld>{}</p:cSld>\
         <p:clrMap bg1=\"lt1\" tx1=\"dk1\" bg2=\"lt2\" tx2=\"dk2\" \
          accent1=\"accent1\" accent2=\"accent2\" accent3=\"accent3\" accent4=\"accent4\" \
          accent5=\"accent5\" accent6=\"accent6\" hlink=\"hlink\" folHlink=\"folHlink\"/>\
         <p:sldLayoutIdLst><p:sldLayoutId id=\"2147483649\" r:id=\"rId1\"/></p:sldLayoutIdLst>\
         </p:sldMaster>",
        XML_HEADER,
        NS_A,
        NS_R,
        NS_P,
        empty_sp_tree("")
    )
}

fn slide_master_rels() -> String {
    format!(
        "{}<Relationships xmlns=\"{}\">\
         <Relationship Id=\"rId1\" Type=\"{}\" Target=\"../slideLayouts/slideLayout1.xml\"/>\
         <Relationship Id=\"rId2\" Type=\"{}\" Target=\"../theme/theme1.xml\"/>\
         </Relationships>",
        XML_HEADER, REL_NS, REL_SLIDE_LAYOUT, REL_THEME
    )
}

fn slide_layout() -> String {
    format!(
        "{}<p:sldLayout xmlns:a=\"{}\" xmlns:r=\"{}\" xmlns:p=\"{}\" type=\"tx\">\
         <p:cSld name=\"Title and Content\">{}</p:cSld>\
         <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>\
         </p:sldLayout>",
        XML_HEADER,
        NS_A,
        NS_R,
        NS_P,
        empty_sp_tree("")
    )
}

fn slide_layout_rels() -> String {
    format!(
        "{}<Relationships xmlns=\"{}\">\
         <Relationship Id=\"rId1\" Type=\"{}\" Target=\"../slideMasters/slideMaster1.xml\"/>\
         </Relationships>",
        XML_HEADER, REL_NS, REL_SLIDE_MASTER
    )
}

fn slide(title: &str, content: &str) -> String {
    let title_shape = format!(
        "<p:sp>\
         <p:nvSpPr><p:cNvPr id=\"2\" name=\"Title 1\"/>\
         <p:cNvSpPr><a:spLocks noGrp=\"1\"/></p:cNvSpPr>\
         <p:nvPr><p:ph type=\"title\"/></p:nvPr></p:nvSpPr>\
         <p:spPr><a:xfrm><a:off x=\"457200\" y=\"274638\"/><a:ext cx=\"8229600\" cy=\"1143000\"/></a:xfrm></p:spPr>\
         <p:txBody><a:bodyPr/><a:lstStyle/>\
         <a:p><a:r><a:rPr lang=\"en-US\" sz=\"3600\" b=\"1\"/><a:t>{}</a:t></a:r></a:p>\
         </p:txBody></p:sp>",
        xml_escape(title)
    );

    // One paragraph per content line; empty content keeps a single empty run
    // so the body placeholder is rendered rather than omitted.
    let body_paragraphs: String = if content.is_empty() {
        "<a:p><a:r><a:rPr lang=\"en-US\"/><a:t></a:t></a:r></a:p>".to_string()
    } else {
        content
            .split('\n')
            .map(|line| {
                format!(
                    "<a:p><a:r><a:rPr lang=\"en-US\"/><a:t>{}</a:t></a:r></a:p>",
                    xml_escape(line)
                )
            })
            .collect()
    };

    let body_shape = format!(
        "<p:sp>\
         <p:nvSpPr><p:cNvPr id=\"3\" name=\"Content 2\"/>\
         <p:cNvSpPr><a:spLocks noGrp=\"1\"/></p:cNvSpPr>\
         <p:nvPr><p:ph type=\"body\" idx=\"1\"/></p:nvPr></p:nvSpPr>\
         <p:spPr><a:xfrm><a:off x=\"457200\" y=\"1600200\"/><a:ext cx=\"8229600\" cy=\"4525963\"/></a:xfrm></p:spPr>\
         <p:txBody><a:bodyPr/><a:lstStyle/>{}</p:txBody></p:sp>",
        body_paragraphs
    );

    format!(
        "{}<p:sld xmlns:a=\"{}\" xmlns:r=\"{}\" xmlns:p=\"{}\">\
         <p:cSld>{}</p:cSld>\
         <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>\
         </p:sld>",
        XML_HEADER,
        NS_A,
        NS_R,
        NS_P,
        empty_sp_tree(&format!("{}{}", title_shape, body_shape))
    )
}

fn slide_rels() -> String {
    format!(
        "{}<Relationships xmlns=\"{}\">\
         <Relationship Id=\"rId1\" Type=\"{}\" Target=\"../slideLayouts/slideLayout1.xml\"/>\
         </Relationships>",
        XML_HEADER, REL_NS, REL_SLIDE_LAYOUT
    )
}

fn theme() -> String {
    format!(
        "{}<a:theme xmlns:a=\"{}\" name=\"Office Theme\">\
         <a:themeElements>\
         <a:clrScheme name=\"Office\">\
         <a:dk1><a:sysClr val=\"windowText\" lastClr=\"000000\"/></a:dk1>\
         <a:lt1><a:sysClr val=\"window\" lastClr=\"FFFFFF\"/></a:lt1>\
         <a:dk2><a:srgbClr val=\"44546A\"/></a:dk2>\
         <a:lt2><a:srgbClr val=\"E7E6E6\"/></a:lt2>\
         <a:accent1><a:srgbClr val=\"4472C4\"/></a:accent1>\
         <a:accent2><a:srgbClr val=\"ED7D31\"/></a:accent2>\
         <a:accent3><a:srgbClr val=\"A5A5A5\"/></a:accent3>\
         <a:accent4><a:srgbClr val=\"FFC000\"/></a:accent4>\
         <a:accent5><a:srgbClr val=\"5B9BD5\"/></a:accent5>\
         <a:accent6><a:srgbClr val=\"70AD47\"/></a:accent6>\
         <a:hlink><a:srgbClr val=\"0563C1\"/></a:hlink>\
         <a:folHlink><a:srgbClr val=\"954F72\"/></a:folHlink>\
         </a:clrScheme>\
         <a:fontScheme name=\"Office\">\
         <a:majorFont><a:latin typeface=\"Calibri Light\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:majorFont>\
         <a:minorFont><a:latin typeface=\"Calibri\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:minorFont>\
         </a:fontScheme>\
         <a:fmtScheme name=\"Office\">\
         <a:fillStyleLst>\
         <a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
         <a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
         <a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
         </a:fillStyleLst>\
         <a:lnStyleLst>\
         <a:ln w=\"6350\"><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln>\
         <a:ln w=\"12700\"><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln>\
         <a:ln w=\"19050\"><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln>\
         </a:lnStyleLst>\
         <a:effectStyleLst>\
         <a:effectStyle><a:effectLst/></a:effectStyle>\
         <a:effectStyle><a:effectLst/></a:effectStyle>\
         <a:effectStyle><a:effectLst/></a:effectStyle>\
         </a:effectStyleLst>\
         <a:bgFillStyleLst>\
         <a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
         <a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
         <a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
         </a:bgFillStyleLst>\
         </a:fmtScheme>\
         </a:themeElements>\
         </a:theme>",
        XML_HEADER, NS_A
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

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

    fn write_to_archive(sections: &[Section]) -> ZipArchive<Cursor<Vec<u8>>> {
        let mut buf = Cursor::new(Vec::new());
        write_pptx(&mut buf, sections).expect("Export should succeed");
        buf.set_position(0);
        ZipArchive::new(buf).expect("Should read generated pptx")
    }

    fn read_part(archive: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
        let mut part = archive.by_name(name).expect("Part should exist");
        let mut content = String::new();
        part.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_pptx_one_slide_per_section() {
        let sections = vec![section("A", "x"), section("B", "")];
        let mut archive = write_to_archive(&sections);

        assert!(archive.by_name("ppt/slides/slide1.xml").is_ok());
        assert!(archive.by_name("ppt/slides/slide2.xml").is_ok());
        assert!(archive.by_name("ppt/slides/slide3.xml").is_err());
    }

    #[test]
    fn test_pptx_slide_carries_title_and_body() {
        let sections = vec![section("A", "x"), section("B", "")];
        let mut archive = write_to_archive(&sections);

        let slide1 = read_part(&mut archive, "ppt/slides/slide1.xml");
        assert!(slide1.contains("<a:t>A</a:t>"));
        assert!(slide1.contains("<a:t>x</a:t>"));
        assert!(slide1.contains("<p:ph type=\"title\"/>"));
        assert!(slide1.contains("<p:ph type=\"body\" idx=\"1\"/>"));

        // Empty content renders as an empty text element, not an omitted one.
        let slide2 = read_part(&mut archive, "ppt/slides/slide2.xml");
        assert!(slide2.contains("<a:t>B</a:t>"));
        assert!(slide2.contains("<a:t></a:t>"));
    }

    #[test]
    fn test_pptx_package_boilerplate_present() {
        let mut archive = write_to_archive(&[section("Only", "slide")]);

        for name in [
            "[Content_Types].xml",
            "_rels/.rels",
            "ppt/presentation.xml",
            "ppt/_rels/presentation.xml.rels",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideLayouts/slideLayout1.xml",
            "ppt/theme/theme1.xml",
        ] {
            assert!(archive.by_name(name).is_ok(), "Missing part: {}", name);
        }

        let content_types = read_part(&mut archive, "[Content_Types].xml");
        assert!(content_types.contains("/ppt/slides/slide1.xml"));

        let presentation = read_part(&mut archive, "ppt/presentation.xml");
        assert!(presentation.contains("<p:sldId id=\"256\" r:id=\"rId2\"/>"));
    }

    #[test]
    fn test_pptx_escapes_markup_in_text() {
        let mut archive = write_to_archive(&[section("R&D <plan>", "a < b \"quoted\"")]);

        let slide = read_part(&mut archive, "ppt/slides/slide1.xml");
        assert!(slide.contains("R&amp;D &lt;plan&gt;"));
        assert!(slide.contains("a &lt; b &quot;quoted&quot;"));
        assert!(!slide.contains("R&D"));
    }

    #[test]
    fn test_pptx_multiline_body() {
        let mut archive = write_to_archive(&[section("T", "one\ntwo")]);

        let slide = read_part(&mut archive, "ppt/slides/slide1.xml");
        assert!(slide.contains("<a:t>one</a:t>"));
        assert!(slide.contains("<a:t>two</a:t>"));
    }

    #[test]
    fn test_xml_escape() {
        assert_eq!(xml_escape("plain"), "plain");
        assert_eq!(xml_escape("a&b"), "a&amp;b");
        assert_eq!(xml_escape("<tag>"), "&lt;tag&gt;");
        assert_eq!(xml_escape("'\""), "&apos;&quot;");
    }
}
