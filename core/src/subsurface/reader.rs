use crate::errors::DecodeError;
use crate::subsurface::models::{
    ComputerDive, DepthStatistics, Dive, DiveLog, Dives, Location, Sample, Temperature,
};
use crate::subsurface::types::{Element, Node};
use quick_xml::Reader;
use quick_xml::errors::IllFormedError;
use quick_xml::events::{BytesStart, Event};
use std::io::BufRead;
use std::num::ParseIntError;
use std::str::FromStr;

type Result<T> = std::result::Result<T, DecodeError>;

/// An element whose start tag has been read
struct Child {
    start: BytesStart<'static>,
    empty: bool,
}

impl Child {
    fn name(&self) -> &[u8] {
        self.start.name().0
    }
}

enum Content {
    Child(Child),
    Text(String),
}

fn number<T: FromStr<Err = ParseIntError>>(name: &str, value: String) -> Result<T> {
    match value.parse() {
        Ok(number) => Ok(number),
        Err(source) => Err(DecodeError::InvalidNumber {
            name: name.to_owned(),
            value,
            source,
        }),
    }
}

/// Pull parser for Subsurface XML
///
/// Text is read without trimming, so notes and names keep their surrounding
/// whitespace and line breaks. Whitespace between structural elements is
/// ignored. Unknown elements and attributes are skipped.
pub(super) struct DiveLogReader<R> {
    reader: Reader<R>,
    buf: Vec<u8>,
}

impl<R: BufRead> DiveLogReader<R> {
    pub(super) fn new(input: R) -> Self {
        Self {
            reader: Reader::from_reader(input),
            buf: Vec::new(),
        }
    }

    fn next_event(&mut self) -> Result<Event<'static>> {
        let event = self.reader.read_event_into(&mut self.buf)?.into_owned();
        self.buf.clear();
        Ok(event)
    }

    /// Next child element or run of text inside `parent`, `None` once its end
    /// tag has been consumed
    fn next_content(&mut self, parent: &Child) -> Result<Option<Content>> {
        if parent.empty {
            return Ok(None);
        }

        loop {
            let content = match self.next_event()? {
                Event::Start(start) => Content::Child(Child {
                    start,
                    empty: false,
                }),
                Event::Empty(start) => Content::Child(Child { start, empty: true }),
                Event::Text(text) => Content::Text(text.unescape()?.into_owned()),
                Event::CData(data) => {
                    Content::Text(self.reader.decoder().decode(&data)?.into_owned())
                }
                Event::End(_) => return Ok(None),
                Event::Eof => {
                    let name = String::from_utf8_lossy(parent.name()).into_owned();
                    return Err(quick_xml::Error::from(IllFormedError::MissingEndTag(name)).into());
                }
                _ => continue,
            };
            return Ok(Some(content));
        }
    }

    fn skip(&mut self, element: &Child) -> Result<()> {
        while let Some(content) = self.next_content(element)? {
            if let Content::Child(child) = content {
                self.skip(&child)?;
            }
        }
        Ok(())
    }

    /// Character data directly inside `element`, exactly as written
    fn read_text(&mut self, element: &Child) -> Result<String> {
        let mut text = String::new();
        while let Some(content) = self.next_content(element)? {
            match content {
                Content::Text(value) => text.push_str(&value),
                Content::Child(child) => self.skip(&child)?,
            }
        }
        Ok(text)
    }

    fn attributes(&self, element: &Child) -> Result<Vec<(String, String)>> {
        let decoder = self.reader.decoder();
        element
            .start
            .attributes()
            .map(|attribute| -> quick_xml::Result<(String, String)> {
                let attribute = attribute?;
                let key = decoder.decode(attribute.key.as_ref())?.into_owned();
                let value = attribute.unescape_value()?.into_owned();
                Ok((key, value))
            })
            .collect::<quick_xml::Result<Vec<_>>>()
            .map_err(DecodeError::from)
    }

    pub(super) fn read_divelog(&mut self) -> Result<DiveLog> {
        let root = loop {
            match self.next_event()? {
                Event::Start(start) => {
                    break Child {
                        start,
                        empty: false,
                    };
                }
                Event::Empty(start) => break Child { start, empty: true },
                Event::Eof => return Err(DecodeError::MissingRoot),
                _ => continue,
            }
        };

        let mut log = DiveLog::default();
        for (name, value) in self.attributes(&root)? {
            match name.as_str() {
                "program" => log.program = Some(value),
                "version" => log.version = Some(value),
                _ => {}
            }
        }

        while let Some(content) = self.next_content(&root)? {
            let Content::Child(child) = content else {
                continue;
            };
            match child.name() {
                b"settings" => log.settings = Some(self.read_element(&child)?),
                b"dives" => {
                    let dives = self.read_dives(&child)?;
                    log.dives
                        .get_or_insert_with(Dives::default)
                        .dives
                        .extend(dives);
                }
                _ => self.skip(&child)?,
            }
        }

        Ok(log)
    }

    fn read_element(&mut self, element: &Child) -> Result<Element> {
        let mut result = Element {
            attributes: self.attributes(element)?,
            nodes: Vec::new(),
        };

        while let Some(content) = self.next_content(element)? {
            match content {
                Content::Text(text) => result.push_text(&text),
                Content::Child(child) => {
                    let name = self.reader.decoder().decode(child.name())?.into_owned();
                    let nested = self.read_element(&child)?;
                    result.nodes.push(Node::Element(name, nested));
                }
            }
        }

        result.strip_indentation();
        Ok(result)
    }

    fn read_dives(&mut self, element: &Child) -> Result<Vec<Dive>> {
        let mut dives = Vec::new();
        while let Some(content) = self.next_content(element)? {
            let Content::Child(child) = content else {
                continue;
            };
            match child.name() {
                b"dive" => dives.push(self.read_dive(&child)?),
                _ => self.skip(&child)?,
            }
        }
        Ok(dives)
    }

    fn read_dive(&mut self, element: &Child) -> Result<Dive> {
        let mut dive = Dive::default();
        for (name, value) in self.attributes(element)? {
            match name.as_str() {
                "number" => dive.number = Some(number(&name, value)?),
                "date" => dive.date = Some(value),
                "time" => dive.time = Some(value),
                "duration" => dive.raw_duration = Some(value),
                "rating" => dive.rating = Some(number(&name, value)?),
                "visibility" => dive.visibility = Some(number(&name, value)?),
                _ => {}
            }
        }

        while let Some(content) = self.next_content(element)? {
            let Content::Child(child) = content else {
                continue;
            };
            match child.name() {
                b"location" => dive.location = Some(self.read_location(&child)?),
                b"divecomputer" => dive.computers.push(self.read_computer(&child)?),
                b"notes" => dive.notes = Some(self.read_text(&child)?),
                b"suit" => dive.suit = Some(self.read_text(&child)?),
                b"buddy" => dive.buddy = Some(self.read_text(&child)?),
                _ => self.skip(&child)?,
            }
        }

        Ok(dive)
    }

    fn read_location(&mut self, element: &Child) -> Result<Location> {
        let gps = self
            .attributes(element)?
            .into_iter()
            .filter(|(name, _)| name == "gps")
            .map(|(_, value)| value)
            .last();

        Ok(Location {
            gps,
            name: self.read_text(element)?,
        })
    }

    fn read_computer(&mut self, element: &Child) -> Result<ComputerDive> {
        let mut computer = ComputerDive::default();
        for (name, value) in self.attributes(element)? {
            match name.as_str() {
                "model" => computer.model = value,
                "deviceid" => computer.device_id = value,
                "diveid" => computer.dive_id = value,
                "date" => computer.date = Some(value),
                "time" => computer.time = Some(value),
                _ => {}
            }
        }

        while let Some(content) = self.next_content(element)? {
            let Content::Child(child) = content else {
                continue;
            };
            match child.name() {
                b"notes" => computer.note = Some(self.read_text(&child)?),
                b"depth" => {
                    let mut depth = DepthStatistics::default();
                    for (name, value) in self.attributes(&child)? {
                        match name.as_str() {
                            "max" => depth.max = Some(value),
                            "mean" => depth.mean = Some(value),
                            _ => {}
                        }
                    }
                    self.skip(&child)?;
                    computer.depth = Some(depth);
                }
                b"temperature" => {
                    let water = self
                        .attributes(&child)?
                        .into_iter()
                        .filter(|(name, _)| name == "water")
                        .map(|(_, value)| value)
                        .last();
                    self.skip(&child)?;
                    computer.temperature = Some(Temperature { water });
                }
                b"sample" => {
                    let mut sample = Sample::default();
                    for (name, value) in self.attributes(&child)? {
                        match name.as_str() {
                            "time" => sample.time = Some(value),
                            "depth" => sample.depth = Some(value),
                            "temp" => sample.temp = Some(value),
                            _ => {}
                        }
                    }
                    self.skip(&child)?;
                    computer.samples.push(sample);
                }
                _ => self.skip(&child)?,
            }
        }

        Ok(computer)
    }
}
