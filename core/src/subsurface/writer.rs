use crate::subsurface::models::{ComputerDive, Dive, DiveLog, Location, Sample};
use crate::subsurface::types::{Element, Node};
use quick_xml::events::{BytesText, Event};
use quick_xml::writer::ElementWriter;
use quick_xml::{Result, Writer};
use std::io::Write;

trait OptionalAttribute {
    fn with_optional_attribute(self, name: &str, value: Option<&str>) -> Self;
}

impl<W> OptionalAttribute for ElementWriter<'_, W> {
    fn with_optional_attribute(self, name: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.with_attribute((name, value)),
            None => self,
        }
    }
}

fn write_text<W: Write>(writer: &mut Writer<W>, name: &str, text: Option<&str>) -> Result<()> {
    if let Some(text) = text {
        writer
            .create_element(name)
            .write_text_content(BytesText::new(text))?;
    }
    Ok(())
}

pub(super) fn write_divelog<W: Write>(writer: &mut Writer<W>, log: &DiveLog) -> Result<()> {
    let element = writer
        .create_element("divelog")
        .with_optional_attribute("program", log.program.as_deref())
        .with_optional_attribute("version", log.version.as_deref());

    if log.settings.is_none() && log.dives.is_none() {
        element.write_empty()?;
        return Ok(());
    }

    element.write_inner_content::<_, quick_xml::Error>(|writer| {
        if let Some(settings) = &log.settings {
            write_element(writer, "settings", settings)?;
        }
        if let Some(dives) = &log.dives {
            let container = writer.create_element("dives");
            if dives.dives.is_empty() {
                container.write_empty()?;
            } else {
                container.write_inner_content(|writer| {
                    dives
                        .dives
                        .iter()
                        .try_for_each(|dive| write_dive(writer, dive))
                })?;
            }
        }
        Ok(())
    })?;

    Ok(())
}

fn write_element<W: Write>(writer: &mut Writer<W>, name: &str, element: &Element) -> Result<()> {
    let start = writer.create_element(name).with_attributes(
        element
            .attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str())),
    );

    if element.children().next().is_none() {
        match element.nodes.is_empty() {
            true => start.write_empty()?,
            false => start.write_text_content(BytesText::new(&element.text()))?,
        };
        return Ok(());
    }

    start.write_inner_content(|writer| {
        element.nodes.iter().try_for_each(|node| match node {
            Node::Text(text) => writer.write_event(Event::Text(BytesText::new(text))),
            Node::Element(name, child) => write_element(writer, name, child),
        })
    })?;

    Ok(())
}

fn write_dive<W: Write>(writer: &mut Writer<W>, dive: &Dive) -> Result<()> {
    let number = dive.number.map(|n| n.to_string());
    let rating = dive.rating.map(|n| n.to_string());
    let visibility = dive.visibility.map(|n| n.to_string());

    let element = writer
        .create_element("dive")
        .with_optional_attribute("number", number.as_deref())
        .with_optional_attribute("date", dive.date.as_deref())
        .with_optional_attribute("time", dive.time.as_deref())
        .with_optional_attribute("duration", dive.raw_duration.as_deref())
        .with_optional_attribute("rating", rating.as_deref())
        .with_optional_attribute("visibility", visibility.as_deref());

    let has_content = dive.location.is_some()
        || !dive.computers.is_empty()
        || dive.notes.is_some()
        || dive.suit.is_some()
        || dive.buddy.is_some();

    if !has_content {
        element.write_empty()?;
        return Ok(());
    }

    element.write_inner_content(|writer| {
        if let Some(location) = &dive.location {
            write_location(writer, location)?;
        }
        for computer in &dive.computers {
            write_computer(writer, computer)?;
        }
        write_text(writer, "notes", dive.notes.as_deref())?;
        write_text(writer, "suit", dive.suit.as_deref())?;
        write_text(writer, "buddy", dive.buddy.as_deref())
    })?;

    Ok(())
}

fn write_location<W: Write>(writer: &mut Writer<W>, location: &Location) -> Result<()> {
    writer
        .create_element("location")
        .with_optional_attribute("gps", location.gps.as_deref())
        .write_text_content(BytesText::new(&location.name))?;
    Ok(())
}

fn write_computer<W: Write>(writer: &mut Writer<W>, computer: &ComputerDive) -> Result<()> {
    let element = writer
        .create_element("divecomputer")
        .with_attribute(("model", computer.model.as_str()))
        .with_attribute(("deviceid", computer.device_id.as_str()))
        .with_attribute(("diveid", computer.dive_id.as_str()))
        .with_optional_attribute("date", computer.date.as_deref())
        .with_optional_attribute("time", computer.time.as_deref());

    let has_content = computer.note.is_some()
        || computer.depth.is_some()
        || computer.temperature.is_some()
        || !computer.samples.is_empty();

    if !has_content {
        element.write_empty()?;
        return Ok(());
    }

    element.write_inner_content(|writer| {
        write_text(writer, "notes", computer.note.as_deref())?;
        if let Some(depth) = &computer.depth {
            writer
                .create_element("depth")
                .with_optional_attribute("max", depth.max.as_deref())
                .with_optional_attribute("mean", depth.mean.as_deref())
                .write_empty()?;
        }
        if let Some(temperature) = &computer.temperature {
            writer
                .create_element("temperature")
                .with_optional_attribute("water", temperature.water.as_deref())
                .write_empty()?;
        }
        computer
            .samples
            .iter()
            .try_for_each(|sample| write_sample(writer, sample))
    })?;

    Ok(())
}

fn write_sample<W: Write>(writer: &mut Writer<W>, sample: &Sample) -> Result<()> {
    writer
        .create_element("sample")
        .with_optional_attribute("time", sample.time.as_deref())
        .with_optional_attribute("depth", sample.depth.as_deref())
        .with_optional_attribute("temp", sample.temp.as_deref())
        .write_empty()?;
    Ok(())
}
