//! Date parsing against a fixed, ordered list of layouts.
//!
//! Layouts are written with reference components: `2006` is a four digit
//! year, `06` a two digit year, `01`/`1` the month (two digits / one or two
//! digits) and `02`/`2` the day. Everything else is matched literally.
//!
//! When no layout is given the list is tried top to bottom and the first
//! layout that parses wins. Month-first layouts precede their day-first
//! twins, so `03-04-2020` is always the 4th of March.

// used for the parsed dates
use chrono::NaiveDate;
// each layout is matched by a regular expression compiled once
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

use crate::datatype::Timestamp;
use crate::error::{FieldkitError, Result};
use crate::optional::contains;

/// The supported layouts, in the order they are tried.
pub const DATE_LAYOUTS: [&str; 20] = [
    // dashed full year
    "2006-01-02",
    "2006-02-01",
    "01-02-2006",
    "02-01-2006",
    // forward-slashed full year
    "2006/01/02",
    "2006/02/01",
    "01/02/2006",
    "02/01/2006",
    // forward-slashed single digit day and month
    "1/2/2006",
    "2/1/2006",
    "2006/1/2",
    "2006/2/1",
    // 2-digit dashed year
    "06-01-02",
    "06-02-01",
    "01-02-06",
    "02-01-06",
    // 2-digit forward-slashed year
    "06/01/02",
    "06/02/01",
    "01/02/06",
    "02/01/06",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Component {
    Year,
    ShortYear,
    Month,
    Day,
}

#[derive(Debug)]
struct CompiledLayout {
    layout: &'static str,
    matcher: Regex,
    components: Vec<Component>,
}

impl CompiledLayout {
    fn compile(layout: &'static str) -> Self {
        let (pattern, components) = translate(layout);
        CompiledLayout {
            layout,
            matcher: Regex::new(&pattern).expect("date layout translates to a valid pattern"),
            components,
        }
    }
    fn parse(&self, text: &str) -> Option<Timestamp> {
        let captures = self.matcher.captures(text)?;
        let (mut year, mut month, mut day) = (0i32, 0u32, 0u32);
        for (i, component) in self.components.iter().enumerate() {
            let digits = captures.get(i + 1)?.as_str();
            match component {
                Component::Year => year = digits.parse().ok()?,
                Component::ShortYear => {
                    let yy: i32 = digits.parse().ok()?;
                    year = if yy >= 69 { 1900 + yy } else { 2000 + yy };
                }
                Component::Month => month = digits.parse().ok()?,
                Component::Day => day = digits.parse().ok()?,
            }
        }
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        Some(date.and_hms_opt(0, 0, 0)?.and_utc())
    }
}

// Turns a layout into an anchored pattern with one capture group per component.
fn translate(layout: &str) -> (String, Vec<Component>) {
    let mut pattern = String::from("^");
    let mut components = Vec::new();
    let mut rest = layout;
    while !rest.is_empty() {
        let (component, width, digits) = if rest.starts_with("2006") {
            (Some(Component::Year), 4, r"(\d{4})")
        } else if rest.starts_with("01") {
            (Some(Component::Month), 2, r"(\d{2})")
        } else if rest.starts_with("02") {
            (Some(Component::Day), 2, r"(\d{2})")
        } else if rest.starts_with("06") {
            (Some(Component::ShortYear), 2, r"(\d{2})")
        } else if rest.starts_with('1') {
            (Some(Component::Month), 1, r"(\d{1,2})")
        } else if rest.starts_with('2') {
            (Some(Component::Day), 1, r"(\d{1,2})")
        } else {
            (None, 0, "")
        };
        match component {
            Some(component) => {
                components.push(component);
                pattern.push_str(digits);
                rest = &rest[width..];
            }
            None => {
                let mut chars = rest.chars();
                if let Some(c) = chars.next() {
                    pattern.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
                }
                rest = chars.as_str();
            }
        }
    }
    pattern.push('$');
    (pattern, components)
}

lazy_static! {
    static ref COMPILED_LAYOUTS: Vec<CompiledLayout> =
        DATE_LAYOUTS.iter().map(|layout| CompiledLayout::compile(layout)).collect();
}

/// Parses `text` as a date, returning the UTC midnight of that date together
/// with the layout that matched.
///
/// With an explicit `layout` only that layout is tried, and it must be one of
/// [`DATE_LAYOUTS`]. Without one, every layout is tried in order.
pub fn parse_date(text: &str, layout: Option<&str>) -> Result<(Timestamp, &'static str)> {
    if text.is_empty() {
        return Err(FieldkitError::InvalidInput);
    }
    if let Some(layout) = layout {
        if !contains(&layout, &DATE_LAYOUTS) {
            return Err(FieldkitError::LayoutNotSupported(layout.to_owned()));
        }
        let compiled = COMPILED_LAYOUTS
            .iter()
            .find(|compiled| compiled.layout == layout)
            .ok_or_else(|| FieldkitError::LayoutNotSupported(layout.to_owned()))?;
        return compiled
            .parse(text)
            .map(|timestamp| (timestamp, compiled.layout))
            .ok_or_else(|| FieldkitError::LayoutMismatch {
                layout: layout.to_owned(),
                input: text.to_owned(),
            });
    }
    for compiled in COMPILED_LAYOUTS.iter() {
        match compiled.parse(text) {
            Some(timestamp) => {
                debug!(input = text, layout = compiled.layout, "date parsed");
                return Ok((timestamp, compiled.layout));
            }
            None => trace!(input = text, layout = compiled.layout, "layout did not match"),
        }
    }
    Err(FieldkitError::DateParsingFailed)
}
