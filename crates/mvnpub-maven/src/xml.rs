//! Small indented XML writer shared by the POM and maven-metadata emitters.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use mvnpub_util::errors::MvnpubError;

pub(crate) struct XmlDoc {
    writer: Writer<Vec<u8>>,
}

impl XmlDoc {
    pub(crate) fn new() -> Result<Self, MvnpubError> {
        let mut doc = Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', 2),
        };
        doc.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        Ok(doc)
    }

    pub(crate) fn open(&mut self, tag: &str) -> Result<(), MvnpubError> {
        self.event(Event::Start(BytesStart::new(tag)))
    }

    pub(crate) fn open_with(
        &mut self,
        tag: &str,
        attrs: &[(&str, &str)],
    ) -> Result<(), MvnpubError> {
        let start = BytesStart::new(tag).with_attributes(attrs.iter().copied());
        self.event(Event::Start(start))
    }

    pub(crate) fn close(&mut self, tag: &str) -> Result<(), MvnpubError> {
        self.event(Event::End(BytesEnd::new(tag)))
    }

    /// `<tag>value</tag>`, with `value` escaped.
    pub(crate) fn text(&mut self, tag: &str, value: &str) -> Result<(), MvnpubError> {
        self.open(tag)?;
        self.event(Event::Text(BytesText::new(value)))?;
        self.close(tag)
    }

    pub(crate) fn finish(self) -> String {
        let mut out = String::from_utf8_lossy(&self.writer.into_inner()).into_owned();
        out.push('\n');
        out
    }

    fn event(&mut self, event: Event<'_>) -> Result<(), MvnpubError> {
        self.writer
            .write_event(event)
            .map_err(|e| MvnpubError::Generic {
                message: format!("Failed to write XML: {e}"),
            })
    }
}
