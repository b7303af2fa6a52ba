//! Serializer for the metadata document.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::{BuildMetadata, MetadataError};

/// Root element written by this crate. Readers accept any root name.
pub const ROOT_ELEMENT: &str = "BuildMetadata";

pub(super) fn write_document(metadata: &BuildMetadata) -> Result<String, MetadataError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    emit(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    emit(&mut writer, Event::Start(BytesStart::new(ROOT_ELEMENT)))?;

    for library in &metadata.libraries {
        let mut start = BytesStart::new("Library");
        if let Some(name) = &library.name {
            start.push_attribute(("name", name.as_str()));
        }

        if library.versions.is_empty() {
            emit(&mut writer, Event::Empty(start))?;
            continue;
        }
        emit(&mut writer, Event::Start(start))?;

        for version in &library.versions {
            let mut start = BytesStart::new("Version");
            if let Some(number) = &version.number {
                start.push_attribute(("number", number.as_str()));
            }

            if version.definitions.is_empty() {
                emit(&mut writer, Event::Empty(start))?;
                continue;
            }
            emit(&mut writer, Event::Start(start))?;
            emit(&mut writer, Event::Start(BytesStart::new("PublicDefinitions")))?;

            for definition in &version.definitions {
                emit(&mut writer, Event::Start(BytesStart::new("Definition")))?;
                emit(&mut writer, Event::Text(BytesText::new(definition)))?;
                emit(&mut writer, Event::End(BytesEnd::new("Definition")))?;
            }

            emit(&mut writer, Event::End(BytesEnd::new("PublicDefinitions")))?;
            emit(&mut writer, Event::End(BytesEnd::new("Version")))?;
        }

        emit(&mut writer, Event::End(BytesEnd::new("Library")))?;
    }

    emit(&mut writer, Event::End(BytesEnd::new(ROOT_ELEMENT)))?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).map_err(|e| MetadataError::Write {
        message: e.to_string(),
    })
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), MetadataError> {
    writer.write_event(event).map_err(|e| MetadataError::Write {
        message: e.to_string(),
    })
}
