use crate::error::RenderError;
use crate::fonts::{self, GlyphUsage};
use crate::page::PageContext;
use crate::traits::{DocumentInfo, DocumentRenderer};
use decl_layout::{FaceKey, FontFace, FontSet, LaidOutPage};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use std::collections::BTreeMap;

/// An in-memory PDF renderer using the `lopdf` library.
///
/// Pages are added as they are rendered; font objects are written in
/// [`finish`](DocumentRenderer::finish), once every glyph in use is known.
pub struct LopdfRenderer<'a> {
    fonts: &'a FontSet,
    document: Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    page_ids: Vec<ObjectId>,
    font_ids: BTreeMap<FaceKey, ObjectId>,
    glyph_usage: BTreeMap<FaceKey, GlyphUsage>,
    info: Option<DocumentInfo>,
}

impl<'a> LopdfRenderer<'a> {
    pub fn new(fonts: &'a FontSet) -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        let resources_id = document.new_object_id();

        Self {
            fonts,
            document,
            pages_id,
            resources_id,
            page_ids: Vec::new(),
            font_ids: BTreeMap::new(),
            glyph_usage: BTreeMap::new(),
            info: None,
        }
    }

    /// Renders every page and returns the serialized document.
    pub fn render_document(
        mut self,
        info: &DocumentInfo,
        pages: &[LaidOutPage],
    ) -> Result<Vec<u8>, RenderError> {
        self.begin_document(info)?;
        for page in pages {
            self.render_page(page)?;
        }
        self.finish()
    }

    fn reserve_font(&mut self, key: FaceKey) {
        if !self.font_ids.contains_key(&key) {
            let id = self.document.new_object_id();
            self.font_ids.insert(key, id);
        }
    }

    fn write_fonts(&mut self) -> Result<Dictionary, RenderError> {
        let mut font_dict = Dictionary::new();
        for (&key, &font_id) in &self.font_ids {
            match self.fonts.face(key) {
                FontFace::Builtin(font) => {
                    self.document
                        .objects
                        .insert(font_id, Object::Dictionary(fonts::builtin_font_dict(*font)));
                }
                FontFace::Embedded(font) => {
                    let empty = GlyphUsage::new();
                    let usage = self.glyph_usage.get(&key).unwrap_or(&empty);
                    fonts::write_embedded_font(&mut self.document, font_id, font, usage)?;
                }
            }
            font_dict.set(fonts::resource_name(key), font_id);
        }
        Ok(font_dict)
    }

    fn write_info(&mut self) -> Option<ObjectId> {
        let info = self.info.as_ref()?;
        let creation_date = chrono::Utc::now().format("D:%Y%m%d%H%M%SZ").to_string();
        let info_dict = dictionary! {
            "Title" => fonts::text_string(&info.title),
            "Producer" => fonts::text_string(&info.producer),
            "CreationDate" => Object::string_literal(creation_date),
        };
        Some(self.document.add_object(info_dict))
    }
}

impl DocumentRenderer for LopdfRenderer<'_> {
    fn begin_document(&mut self, info: &DocumentInfo) -> Result<(), RenderError> {
        if self.info.is_some() {
            return Err(RenderError::Other("Document already started".into()));
        }

        // The root Pages object. Kids and Count are filled in by finish().
        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![],
            "Count" => 0,
        };
        self.document
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        let catalog_dict = dictionary! { "Type" => "Catalog", "Pages" => self.pages_id };
        let catalog_id = self.document.add_object(catalog_dict);
        self.document.trailer.set("Root", catalog_id);

        self.info = Some(info.clone());
        log::debug!("Started PDF document '{}'", info.title);
        Ok(())
    }

    fn render_page(&mut self, page: &LaidOutPage) -> Result<(), RenderError> {
        if self.info.is_none() {
            return Err(RenderError::Other("Document not started".into()));
        }

        for run in &page.runs {
            self.reserve_font(run.face);
        }

        let mut page_ctx = PageContext::new(self.fonts, &mut self.glyph_usage, page.height);
        for run in &page.runs {
            page_ctx.draw_run(run)?;
        }
        let content = page_ctx.finish();

        let compressed_content = fonts::deflate(&content.encode()?)?;
        let content_stream = Stream::new(dictionary! {"Filter" => "FlateDecode"}, compressed_content);
        let content_id = self.document.add_object(content_stream);

        let page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), page.width.into(), page.height.into()],
            "Contents" => content_id,
            "Resources" => self.resources_id,
        };
        let page_id = self.document.add_object(page_dict);
        self.page_ids.push(page_id);
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<u8>, RenderError> {
        if self.info.is_none() {
            return Err(RenderError::Other("Document not started".into()));
        }

        let font_dict = self.write_fonts()?;
        let resources_dict = dictionary! { "Font" => font_dict };
        self.document
            .objects
            .insert(self.resources_id, Object::Dictionary(resources_dict));

        if let Some(Object::Dictionary(pages_dict)) = self.document.objects.get_mut(&self.pages_id) {
            let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::from(*id)).collect();
            pages_dict.set("Kids", kids);
            pages_dict.set("Count", self.page_ids.len() as i32);
        }

        if let Some(info_id) = self.write_info() {
            self.document.trailer.set("Info", info_id);
        }

        let mut buffer = Vec::new();
        self.document.save_to(&mut buffer)?;
        log::debug!(
            "Serialized {} page(s) into {} bytes",
            self.page_ids.len(),
            buffer.len()
        );
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use decl_layout::{DocumentBlock, LayoutEngine};
    use decl_style::catalog::{StyleCatalog, StyleName};
    use decl_style::dimension::PageLayout;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn render(blocks: &[DocumentBlock]) -> Document {
        init_logging();
        let fonts = FontSet::builtin();
        let catalog = StyleCatalog::standard();
        let pages = LayoutEngine::new(&fonts, &catalog, PageLayout::default())
            .layout(blocks)
            .unwrap();
        let bytes = LopdfRenderer::new(&fonts)
            .render_document(&DocumentInfo::new("Test document"), &pages)
            .unwrap();
        Document::load_mem(&bytes).unwrap()
    }

    fn base_fonts(doc: &Document) -> Vec<String> {
        let mut names: Vec<String> = doc
            .objects
            .values()
            .filter_map(|obj| obj.as_dict().ok())
            .filter(|dict| matches!(dict.get(b"Type").and_then(Object::as_name), Ok(b"Font")))
            .filter_map(|dict| dict.get(b"BaseFont").and_then(Object::as_name).ok())
            .map(|name| String::from_utf8_lossy(name).to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_renders_loadable_document() {
        let doc = render(&[DocumentBlock::paragraph(StyleName::BodyLeft, "Hello PDF")]);
        assert_eq!(doc.get_pages().len(), 1);
        let text = doc.extract_text(&[1]).unwrap();
        assert!(text.contains("Hello PDF"), "extracted: {:?}", text);
    }

    #[test]
    fn test_only_used_faces_are_written() {
        let doc = render(&[DocumentBlock::paragraph(
            StyleName::BodyLeft,
            "<b>Bold</b> and plain",
        )]);
        assert_eq!(base_fonts(&doc), vec!["Helvetica", "Helvetica-Bold"]);
    }

    #[test]
    fn test_info_dictionary() {
        let doc = render(&[]);
        let info_id = doc.trailer.get(b"Info").unwrap().as_reference().unwrap();
        let info = doc.get_dictionary(info_id).unwrap();
        assert_eq!(info.get(b"Title").unwrap().as_str().unwrap(), b"Test document");
        assert!(info.has(b"CreationDate"));
        assert!(info.has(b"Producer"));
    }

    #[test]
    fn test_empty_layout_still_has_a_page() {
        let doc = render(&[]);
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_render_page_before_begin_is_an_error() {
        let fonts = FontSet::builtin();
        let mut renderer = LopdfRenderer::new(&fonts);
        let page = LaidOutPage::new(100.0, 100.0);
        assert!(matches!(renderer.render_page(&page), Err(RenderError::Other(_))));
    }
}
