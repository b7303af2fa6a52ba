//! Streaming reader for the metadata document.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{BuildMetadata, LibraryEntry, MetadataError, VersionEntry};

const LIBRARY: &[u8] = b"Library";
const VERSION: &[u8] = b"Version";
const PUBLIC_DEFINITIONS: &[u8] = b"PublicDefinitions";
const DEFINITION: &[u8] = b"Definition";

/// Depths of the interesting elements, counting the root as 0.
const LIBRARY_DEPTH: usize = 1;
const VERSION_DEPTH: usize = 2;
const BLOCK_DEPTH: usize = 3;
const DEFINITION_DEPTH: usize = 4;

/// State of the `<PublicDefinitions>` element currently open, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Closed,
    /// First block of the current version; its definitions count.
    Active,
    /// A later block of the same version; ignored.
    Ignored,
}

struct DocumentBuilder {
    libraries: Vec<LibraryEntry>,
    /// Names of the currently open elements, root first.
    open: Vec<Vec<u8>>,
    seen_root: bool,
    block: Block,
    version_has_block: bool,
    definition: Option<String>,
}

impl DocumentBuilder {
    fn new() -> Self {
        DocumentBuilder {
            libraries: Vec::new(),
            open: Vec::new(),
            seen_root: false,
            block: Block::Closed,
            version_has_block: false,
            definition: None,
        }
    }

    fn in_path(&self, expected: &[&[u8]]) -> bool {
        self.open.len() == expected.len() + 1
            && self.open[1..]
                .iter()
                .zip(expected)
                .all(|(open, want)| open.as_slice() == *want)
    }

    fn start(&mut self, element: &BytesStart<'_>) -> Result<(), MetadataError> {
        let name = element.name();
        let name = name.as_ref();

        match self.open.len() {
            0 => {
                if self.seen_root {
                    return Err(parse_error("more than one root element"));
                }
                self.seen_root = true;
            }
            LIBRARY_DEPTH if name == LIBRARY => {
                self.libraries.push(LibraryEntry {
                    name: attribute(element, "name")?,
                    versions: Vec::new(),
                });
            }
            VERSION_DEPTH if name == VERSION && self.in_path(&[LIBRARY]) => {
                if let Some(library) = self.libraries.last_mut() {
                    library.versions.push(VersionEntry {
                        number: attribute(element, "number")?,
                        definitions: Vec::new(),
                    });
                }
                self.version_has_block = false;
            }
            BLOCK_DEPTH if name == PUBLIC_DEFINITIONS && self.in_path(&[LIBRARY, VERSION]) => {
                self.block = if self.version_has_block {
                    Block::Ignored
                } else {
                    Block::Active
                };
                self.version_has_block = true;
            }
            DEFINITION_DEPTH
                if name == DEFINITION
                    && self.block == Block::Active
                    && self.in_path(&[LIBRARY, VERSION, PUBLIC_DEFINITIONS]) =>
            {
                self.definition = Some(String::new());
            }
            _ => {}
        }

        Ok(())
    }

    /// Called after the element at `self.open.len()` has been closed.
    fn end(&mut self) {
        match self.open.len() {
            DEFINITION_DEPTH => self.finish_definition(),
            BLOCK_DEPTH => self.block = Block::Closed,
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(definition) = self.definition.as_mut() {
            definition.push_str(text);
        }
    }

    fn finish_definition(&mut self) {
        let Some(definition) = self.definition.take() else {
            return;
        };
        let definition = definition.trim();
        if definition.is_empty() {
            return;
        }
        if let Some(version) = self
            .libraries
            .last_mut()
            .and_then(|lib| lib.versions.last_mut())
        {
            version.definitions.push(definition.to_string());
        }
    }
}

pub(super) fn parse_document(xml: &str) -> Result<BuildMetadata, MetadataError> {
    let mut reader = Reader::from_str(xml);
    let mut builder = DocumentBuilder::new();

    loop {
        let event = reader.read_event().map_err(|e| {
            parse_error(format!("{} (at byte {})", e, reader.buffer_position()))
        })?;

        match event {
            Event::Start(element) => {
                builder.start(&element)?;
                builder.open.push(element.name().as_ref().to_vec());
            }
            Event::Empty(element) => {
                builder.start(&element)?;
                builder.open.push(element.name().as_ref().to_vec());
                builder.open.pop();
                builder.end();
            }
            Event::End(_) => {
                builder.open.pop();
                builder.end();
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|e| parse_error(e.to_string()))?;
                builder.text(&text);
            }
            Event::CData(data) => {
                let data = data.into_inner();
                builder.text(&String::from_utf8_lossy(&data));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !builder.open.is_empty() {
        return Err(parse_error("unexpected end of document"));
    }
    if !builder.seen_root {
        return Err(MetadataError::MissingRoot);
    }

    Ok(BuildMetadata {
        libraries: builder.libraries,
    })
}

fn attribute(element: &BytesStart<'_>, name: &str) -> Result<Option<String>, MetadataError> {
    match element.try_get_attribute(name) {
        Ok(Some(attr)) => attr
            .unescape_value()
            .map(|value| Some(value.into_owned()))
            .map_err(|e| parse_error(e.to_string())),
        Ok(None) => Ok(None),
        Err(e) => Err(parse_error(e.to_string())),
    }
}

fn parse_error(message: impl Into<String>) -> MetadataError {
    MetadataError::Parse {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_document() {
        let xml = r#"<?xml version='1.0' encoding='utf-8'?>
<BuildMetadata>
  <Library name="zlib">
    <Version number="1.2">
      <PublicDefinitions>
        <Definition>ZLIB_STATIC</Definition>
        <Definition>  ZLIB_CONST  </Definition>
      </PublicDefinitions>
    </Version>
    <Version number="1.3" />
  </Library>
  <Library name="stb" />
</BuildMetadata>"#;

        let metadata = parse_document(xml).unwrap();
        assert_eq!(metadata.libraries.len(), 2);

        let zlib = &metadata.libraries[0];
        assert_eq!(zlib.name.as_deref(), Some("zlib"));
        assert_eq!(zlib.versions.len(), 2);
        assert_eq!(zlib.versions[0].definitions, vec!["ZLIB_STATIC", "ZLIB_CONST"]);
        assert!(zlib.versions[1].definitions.is_empty());

        assert_eq!(metadata.libraries[1].name.as_deref(), Some("stb"));
    }

    #[test]
    fn test_any_root_name() {
        let xml = r#"<Root><Library name="a"><Version number="1"/></Library></Root>"#;
        let metadata = parse_document(xml).unwrap();
        assert!(metadata.definitions("a", "1").is_some());
    }

    #[test]
    fn test_skips_empty_definitions() {
        let xml = r#"<Root>
  <Library name="a">
    <Version number="1">
      <PublicDefinitions>
        <Definition>   </Definition>
        <Definition/>
        <Definition>A=1</Definition>
      </PublicDefinitions>
    </Version>
  </Library>
</Root>"#;
        let metadata = parse_document(xml).unwrap();
        assert_eq!(metadata.definitions("a", "1").unwrap(), ["A=1".to_string()]);
    }

    #[test]
    fn test_unescapes_text_and_cdata() {
        let xml = r#"<Root><Library name="a&amp;b"><Version number="1"><PublicDefinitions>
<Definition>MSG=&quot;hi&quot;</Definition>
<Definition><![CDATA[CMP=(1<2)]]></Definition>
</PublicDefinitions></Version></Library></Root>"#;
        let metadata = parse_document(xml).unwrap();
        assert_eq!(
            metadata.definitions("a&b", "1").unwrap(),
            ["MSG=\"hi\"".to_string(), "CMP=(1<2)".to_string()]
        );
    }

    #[test]
    fn test_only_first_definitions_block_counts() {
        let xml = r#"<Root><Library name="a"><Version number="1">
<PublicDefinitions><Definition>FIRST</Definition></PublicDefinitions>
<PublicDefinitions><Definition>SECOND</Definition></PublicDefinitions>
</Version></Library></Root>"#;
        let metadata = parse_document(xml).unwrap();
        assert_eq!(metadata.definitions("a", "1").unwrap(), ["FIRST".to_string()]);
    }

    #[test]
    fn test_ignores_misplaced_elements() {
        let xml = r#"<Root>
  <Version number="1"><PublicDefinitions><Definition>STRAY</Definition></PublicDefinitions></Version>
  <Group><Library name="nested"/></Group>
  <Library><Version number="1"><PublicDefinitions><Definition>UNNAMED</Definition></PublicDefinitions></Version></Library>
</Root>"#;
        let metadata = parse_document(xml).unwrap();
        assert_eq!(metadata.libraries.len(), 1);
        assert!(metadata.libraries[0].name.is_none());
        assert!(metadata.library("nested").is_none());
    }

    #[test]
    fn test_rejects_malformed_documents() {
        assert!(matches!(
            parse_document("<Root><Library></Root>"),
            Err(MetadataError::Parse { .. })
        ));
        assert!(matches!(
            parse_document("<Root><Library name=\"a\">"),
            Err(MetadataError::Parse { .. })
        ));
        assert!(matches!(parse_document(""), Err(MetadataError::MissingRoot)));
    }
}
