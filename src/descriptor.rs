//! Project descriptor discovery and version-field rewriting.
//!
//! The descriptor is an MSBuild-style XML project file. Two fields are
//! maintained, both as direct children of any `PropertyGroup` element:
//! `ApplicationDisplayVersion` (dotted `major.minor.patch`) and
//! `ApplicationVersion` (the major component alone).

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;
use tracing::debug;

use crate::domain::Version;
use crate::error::{ChefError, Result};

const PROPERTY_GROUP: &[u8] = b"PropertyGroup";

/// A version element inside a `PropertyGroup`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionField {
    DisplayVersion,
    ApplicationVersion,
}

impl VersionField {
    /// XML element name of the field
    pub fn element_name(&self) -> &'static str {
        match self {
            VersionField::DisplayVersion => "ApplicationDisplayVersion",
            VersionField::ApplicationVersion => "ApplicationVersion",
        }
    }

    fn from_element_name(name: &[u8]) -> Option<Self> {
        match name {
            b"ApplicationDisplayVersion" => Some(VersionField::DisplayVersion),
            b"ApplicationVersion" => Some(VersionField::ApplicationVersion),
            _ => None,
        }
    }

    /// Text this field takes for `version`
    pub fn value_for(&self, version: Version) -> String {
        match self {
            VersionField::DisplayVersion => version.to_string(),
            VersionField::ApplicationVersion => version.major.to_string(),
        }
    }
}

impl fmt::Display for VersionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_name())
    }
}

/// One element whose text was replaced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldUpdate {
    pub field: VersionField,
    pub value: String,
}

/// Result of scanning a directory for descriptors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    /// The descriptor that will be rewritten
    pub path: PathBuf,
    /// Other matching files, ignored
    pub ignored: Vec<PathBuf>,
}

/// Find the project descriptor among the immediate entries of `dir`.
///
/// Entries are visited in file-name order and the first regular file whose
/// name ends with `suffix` wins.
pub fn locate(dir: &Path, suffix: &str) -> Result<Located> {
    let mut matches = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let matches_suffix = entry
            .file_name()
            .to_str()
            .map(|name| name.ends_with(suffix))
            .unwrap_or(false);

        if matches_suffix && entry.file_type()?.is_file() {
            matches.push(entry.path());
        }
    }

    matches.sort();
    let mut matches = matches.into_iter();

    match matches.next() {
        Some(path) => {
            debug!(path = %path.display(), "located project descriptor");
            Ok(Located {
                path,
                ignored: matches.collect(),
            })
        }
        None => Err(ChefError::DescriptorNotFound {
            dir: dir.to_path_buf(),
            suffix: suffix.to_string(),
        }),
    }
}

/// An open element and which version fields it has already had rewritten
struct Frame {
    name: Vec<u8>,
    display_version_set: bool,
    application_version_set: bool,
}

impl Frame {
    fn new(name: &[u8]) -> Self {
        Frame {
            name: name.to_vec(),
            display_version_set: false,
            application_version_set: false,
        }
    }

    /// Claim `field` for this group; only the first matching child is rewritten
    fn claim(&mut self, field: VersionField) -> bool {
        if self.name != PROPERTY_GROUP {
            return false;
        }

        let slot = match field {
            VersionField::DisplayVersion => &mut self.display_version_set,
            VersionField::ApplicationVersion => &mut self.application_version_set,
        };

        if *slot {
            false
        } else {
            *slot = true;
            true
        }
    }
}

fn write_event<'a>(writer: &mut Writer<Vec<u8>>, event: impl Into<Event<'a>>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| ChefError::Io(std::io::Error::other(e.to_string())))
}

/// Rewrite the version fields of every `PropertyGroup` in `text`.
///
/// `PropertyGroup` elements are matched at any depth; the fields must be
/// direct children. Content outside the rewritten elements is passed
/// through unchanged. Returns the new document and the fields that changed,
/// in document order.
pub fn update_version_fields(text: &str, version: Version) -> Result<(String, Vec<FieldUpdate>)> {
    let mut reader = Reader::from_str(text);
    let mut writer = Writer::new(Vec::with_capacity(text.len()));

    let mut stack: Vec<Frame> = Vec::new();
    // Depth of the field element currently being rewritten.
    let mut rewriting: Option<usize> = None;
    let mut seen_root = false;
    let mut updates = Vec::new();

    loop {
        let event = reader.read_event().map_err(|e| {
            ChefError::malformed(format!("at byte {}: {}", reader.error_position(), e))
        })?;

        match event {
            Event::Start(start) => {
                check_attributes(&start)?;
                if stack.is_empty() {
                    if seen_root {
                        return Err(ChefError::malformed("multiple root elements"));
                    }
                    seen_root = true;
                }

                let field = claim_field(&mut stack, start.local_name().as_ref());
                stack.push(Frame::new(start.local_name().as_ref()));
                write_event(&mut writer, Event::Start(start))?;

                if let Some(field) = field {
                    let value = field.value_for(version);
                    write_event(&mut writer, Event::Text(BytesText::new(&value)))?;
                    updates.push(FieldUpdate { field, value });
                    rewriting = Some(stack.len());
                }
            }
            Event::Empty(start) => {
                check_attributes(&start)?;
                if stack.is_empty() {
                    if seen_root {
                        return Err(ChefError::malformed("multiple root elements"));
                    }
                    seen_root = true;
                }

                let field = claim_field(&mut stack, start.local_name().as_ref());
                match field {
                    Some(field) => {
                        let value = field.value_for(version);
                        let end = start.to_end().into_owned();
                        write_event(&mut writer, Event::Start(start))?;
                        write_event(&mut writer, Event::Text(BytesText::new(&value)))?;
                        write_event(&mut writer, Event::End(end))?;
                        updates.push(FieldUpdate { field, value });
                    }
                    None => write_event(&mut writer, Event::Empty(start))?,
                }
            }
            Event::End(end) => {
                if rewriting == Some(stack.len()) {
                    rewriting = None;
                }
                let frame = stack.pop().ok_or_else(|| {
                    ChefError::malformed(format!(
                        "unexpected closing tag </{}>",
                        String::from_utf8_lossy(end.name().as_ref())
                    ))
                })?;
                if frame.name != end.local_name().as_ref() {
                    return Err(ChefError::malformed(format!(
                        "closing tag </{}> does not match <{}>",
                        String::from_utf8_lossy(end.name().as_ref()),
                        String::from_utf8_lossy(&frame.name)
                    )));
                }
                write_event(&mut writer, Event::End(end))?;
            }
            Event::Text(content) => {
                content
                    .unescape()
                    .map_err(|e| ChefError::malformed(format!("in text: {}", e)))?;
                if stack.is_empty() && !content.iter().all(u8::is_ascii_whitespace) {
                    return Err(ChefError::malformed("text outside the root element"));
                }
                if rewriting != Some(stack.len()) {
                    write_event(&mut writer, Event::Text(content))?;
                }
            }
            Event::CData(content) => {
                if stack.is_empty() {
                    return Err(ChefError::malformed("CDATA outside the root element"));
                }
                if rewriting != Some(stack.len()) {
                    write_event(&mut writer, Event::CData(content))?;
                }
            }
            Event::Eof => break,
            other => write_event(&mut writer, other)?,
        }
    }

    if let Some(open) = stack.last() {
        return Err(ChefError::malformed(format!(
            "unclosed element <{}>",
            String::from_utf8_lossy(&open.name)
        )));
    }
    if !seen_root {
        return Err(ChefError::malformed("no root element"));
    }

    let output = String::from_utf8(writer.into_inner())
        .map_err(|e| ChefError::malformed(format!("rewritten document is not UTF-8: {}", e)))?;
    Ok((output, updates))
}

/// Attributes must be unique, have quoted values and use known entities
fn check_attributes(start: &BytesStart) -> Result<()> {
    let element = || String::from_utf8_lossy(start.name().as_ref()).into_owned();

    let mut attributes = start.attributes();
    attributes.with_checks(true);
    for attribute in attributes {
        let attribute = attribute
            .map_err(|e| ChefError::malformed(format!("in <{}>: {}", element(), e)))?;
        attribute
            .unescape_value()
            .map_err(|e| ChefError::malformed(format!("in <{}>: {}", element(), e)))?;
    }
    Ok(())
}

/// Field named `name` if its parent is a `PropertyGroup` that hasn't had it set yet
fn claim_field(stack: &mut [Frame], name: &[u8]) -> Option<VersionField> {
    let field = VersionField::from_element_name(name)?;
    let parent = stack.last_mut()?;
    parent.claim(field).then_some(field)
}

/// Overwrite `path` with `text`. No backup is kept.
pub fn persist(text: &str, path: &Path) -> Result<()> {
    fs::write(path, text)?;
    debug!(path = %path.display(), bytes = text.len(), "wrote project descriptor");
    Ok(())
}
