// @file: placemark_engine/src/kml/writer.rs
// @description: Renders a document to indented KML text and writes it atomically.
// @author: V5 Helper.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::core::error::{ConvertError, Result};
use crate::kml::document::KmlDocument;

const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";


//
// PUBLIC INTERFACE
//

// Full in-memory render. Text content and attribute values are escaped
// for the five reserved XML characters by the event writer.
pub fn render(document: &KmlDocument) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(render_err)?;

    let mut kml = BytesStart::new("kml");
    kml.push_attribute(("xmlns", KML_NAMESPACE));
    writer.write_event(Event::Start(kml)).map_err(render_err)?;

    writer
        .write_event(Event::Start(BytesStart::new("Document")))
        .map_err(render_err)?;
    write_text_element(&mut writer, "name", document.title())?;

    for placemark in document.placemarks() {
        writer
            .write_event(Event::Start(BytesStart::new("Placemark")))
            .map_err(render_err)?;

        write_text_element(&mut writer, "name", &placemark.name)?;

        if let Some(description) = &placemark.description {
            write_text_element(&mut writer, "description", description)?;
        }

        if !placemark.extended.is_empty() {
            writer
                .write_event(Event::Start(BytesStart::new("ExtendedData")))
                .map_err(render_err)?;
            for (key, value) in &placemark.extended {
                let mut data = BytesStart::new("Data");
                data.push_attribute(("name", key.as_str()));
                writer.write_event(Event::Start(data)).map_err(render_err)?;
                write_text_element(&mut writer, "value", value)?;
                writer
                    .write_event(Event::End(BytesEnd::new("Data")))
                    .map_err(render_err)?;
            }
            writer
                .write_event(Event::End(BytesEnd::new("ExtendedData")))
                .map_err(render_err)?;
        }

        // Geometry last: lon,lat,0 is the external-format ordering.
        writer
            .write_event(Event::Start(BytesStart::new("Point")))
            .map_err(render_err)?;
        write_text_element(&mut writer, "coordinates", &placemark.coordinate_string())?;
        writer
            .write_event(Event::End(BytesEnd::new("Point")))
            .map_err(render_err)?;

        writer
            .write_event(Event::End(BytesEnd::new("Placemark")))
            .map_err(render_err)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("Document")))
        .map_err(render_err)?;
    writer
        .write_event(Event::End(BytesEnd::new("kml")))
        .map_err(render_err)?;

    let mut rendered = String::from_utf8(writer.into_inner())
        .map_err(|e| ConvertError::Output(format!("rendered KML is not valid UTF-8: {}", e)))?;
    rendered.push('\n');
    Ok(rendered)
}

// Render fully before touching the filesystem so a failed render cannot
// leave a partial file behind.
pub fn write_file(document: &KmlDocument, path: &Path) -> Result<()> {
    let rendered = render(document)?;
    fs::write(path, rendered)
        .map_err(|e| ConvertError::Output(format!("cannot write {}: {}", path.display(), e)))
}


//
// INTERNAL HELPERS
//

fn write_text_element<W: Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(tag)))
        .map_err(render_err)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(render_err)?;
    writer
        .write_event(Event::End(BytesEnd::new(tag)))
        .map_err(render_err)?;
    Ok(())
}

fn render_err<E: std::fmt::Display>(e: E) -> ConvertError {
    ConvertError::Output(format!("KML render failed: {}", e))
}
