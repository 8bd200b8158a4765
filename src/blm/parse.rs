use crate::blm::record::{BlmDocument, BlmHeader, Record};
use anyhow::{Context, bail};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

const HEADER: &str = "#HEADER#";
const DEFINITION: &str = "#DEFINITION#";
const DATA: &str = "#DATA#";
const END: &str = "#END#";

/// Read and parse a BLM file from disk.
pub fn read_file(path: &Path) -> anyhow::Result<BlmDocument> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read BLM file {}", path.display()))?;
    parse_str(&text).with_context(|| format!("parse BLM file {}", path.display()))
}

/// Parse BLM text into a header plus records.
///
/// Expected layout:
/// #HEADER#
/// Version : 3
/// EOF : '^'
/// EOR : '~'
/// #DEFINITION#
/// AGENT_REF^ADDRESS_1^...^~
/// #DATA#
/// ref^1 High Street^...^~
/// #END#
pub fn parse_str(text: &str) -> anyhow::Result<BlmDocument> {
    let sections = split_sections(text)?;
    let header = parse_header(sections.header)?;
    let fields = parse_definition(sections.definition, &header)?;
    let records = parse_data(sections.data, &header, &fields)?;

    if let Some(expected) = header.property_count {
        if expected != records.len() {
            warn!(
                expected,
                found = records.len(),
                "BLM header property count does not match data rows"
            );
        }
    }

    debug!(
        version = %header.version,
        fields = fields.len(),
        records = records.len(),
        "parsed BLM feed"
    );

    Ok(BlmDocument {
        header,
        fields,
        records,
    })
}

struct Sections<'a> {
    header: &'a str,
    definition: &'a str,
    data: &'a str,
}

fn split_sections(text: &str) -> anyhow::Result<Sections<'_>> {
    // ASCII uppercasing keeps byte offsets valid for slicing `text`.
    let upper = text.to_ascii_uppercase();
    let find = |marker: &str| {
        upper
            .find(marker)
            .with_context(|| format!("BLM parse error: missing {} section", marker))
    };

    let header = find(HEADER)?;
    let definition = find(DEFINITION)?;
    let data = find(DATA)?;
    let end = find(END)?;

    if !(header < definition && definition < data && data < end) {
        bail!(
            "BLM parse error: sections out of order, expected {} {} {} {}",
            HEADER,
            DEFINITION,
            DATA,
            END
        );
    }

    Ok(Sections {
        header: &text[header + HEADER.len()..definition],
        definition: &text[definition + DEFINITION.len()..data],
        data: &text[data + DATA.len()..end],
    })
}

fn parse_header(section: &str) -> anyhow::Result<BlmHeader> {
    // Key may contain spaces ("Property Count"); value is the rest of the line.
    const HEADER_LINE_RE: &str = r#"^\s*([^:]+?)\s*:\s*(.*?)\s*$"#;
    let re = Regex::new(HEADER_LINE_RE)?;

    // Line numbers count from the first line after the marker.
    let section = section.trim_start_matches(['\r', '\n']);

    let mut entries: BTreeMap<String, String> = BTreeMap::new();
    for (lineno, line) in section.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let caps = match re.captures(line) {
            Some(c) => c,
            None => {
                bail!(
                    "BLM parse error: header line {}: cannot parse {:?}",
                    lineno + 1,
                    line
                );
            }
        };

        let key = caps[1].to_ascii_uppercase();
        let value = unquote(&caps[2]).to_string();
        if entries.insert(key, value).is_some() {
            bail!(
                "BLM parse error: header line {}: duplicate key {:?}",
                lineno + 1,
                &caps[1]
            );
        }
    }

    let version = entries
        .remove("VERSION")
        .filter(|v| !v.is_empty())
        .context("BLM parse error: header has no Version")?;
    if !version.starts_with('3') {
        bail!("BLM parse error: unsupported version {:?}, only V3 is supported", version);
    }

    let field_delimiter = delimiter(&entries, "EOF")?;
    let record_delimiter = delimiter(&entries, "EOR")?;
    if field_delimiter == record_delimiter {
        bail!(
            "BLM parse error: EOF and EOR must differ, both are {:?}",
            field_delimiter
        );
    }

    let property_count = match entries.get("PROPERTY COUNT").map(String::as_str) {
        None | Some("") => None,
        Some(raw) => Some(raw.parse::<usize>().with_context(|| {
            format!("BLM parse error: bad Property Count {:?}", raw)
        })?),
    };

    let generated_date = entries
        .get("GENERATED DATE")
        .filter(|v| !v.is_empty())
        .cloned();

    Ok(BlmHeader {
        version,
        field_delimiter,
        record_delimiter,
        property_count,
        generated_date,
    })
}

fn delimiter(entries: &BTreeMap<String, String>, key: &str) -> anyhow::Result<char> {
    let raw = entries
        .get(key)
        .with_context(|| format!("BLM parse error: header has no {}", key))?;
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => bail!(
            "BLM parse error: {} must be a single character, got {:?}",
            key,
            raw
        ),
    }
}

/// Strip one pair of matching single or double quotes.
fn unquote(value: &str) -> &str {
    for q in ['\'', '"'] {
        if value.len() >= 2 && value.starts_with(q) && value.ends_with(q) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

fn parse_definition(section: &str, header: &BlmHeader) -> anyhow::Result<Vec<String>> {
    let section = section.trim_start();
    let row = match section.find(header.record_delimiter) {
        Some(i) => &section[..i],
        None => bail!(
            "BLM parse error: definition row is not terminated by {:?}",
            header.record_delimiter
        ),
    };
    let row = row.trim_end();
    let row = row.strip_suffix(header.field_delimiter).unwrap_or(row);

    if row.trim().is_empty() {
        bail!("BLM parse error: definition row is empty");
    }

    let mut seen = BTreeSet::new();
    let mut fields = Vec::new();
    for (idx, name) in row.split(header.field_delimiter).enumerate() {
        let name = name.trim();
        if name.is_empty() {
            bail!("BLM parse error: empty field name at position {}", idx + 1);
        }
        if !seen.insert(name) {
            bail!("BLM parse error: duplicate field name {}", name);
        }
        fields.push(name.to_string());
    }

    Ok(fields)
}

fn parse_data(
    section: &str,
    header: &BlmHeader,
    fields: &[String],
) -> anyhow::Result<Vec<Record>> {
    let mut out = Vec::new();

    let rows = section
        .split(header.record_delimiter)
        .filter(|chunk| !chunk.trim().is_empty());

    for (idx, chunk) in rows.enumerate() {
        let row = chunk.trim_matches(['\r', '\n']);
        let row = row.strip_suffix(header.field_delimiter).unwrap_or(row);

        let values: Vec<&str> = row.split(header.field_delimiter).collect();
        if values.len() != fields.len() {
            bail!(
                "BLM parse error: record {} has {} values, definition has {} fields",
                idx + 1,
                values.len(),
                fields.len()
            );
        }

        let record: Record = fields
            .iter()
            .cloned()
            .zip(values.into_iter().map(str::to_string))
            .collect();
        out.push(record);
    }

    Ok(out)
}
