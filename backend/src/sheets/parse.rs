use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::AppError;
use crate::models::Course;

const COURSE_NAME_ALIASES: &[&str] = &["course_name", "Course Name", "name"];
const DESCRIPTION_ALIASES: &[&str] = &["description", "Description"];
const LINK_ALIASES: &[&str] = &["link", "Link", "url"];
const DATETIME_ALIASES: &[&str] = &["datetime", "date", "Date"];

type Row<'a> = HashMap<&'a str, &'a str>;

/// Parses a sheet CSV export into courses.
///
/// Every data row consumes an id (`row position + 1`) even when it is dropped,
/// so ids line up with the sheet rather than with the output.
pub fn parse_courses(body: &[u8]) -> Result<Vec<Course>, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body);

    let headers = reader
        .headers()
        .map_err(|e| AppError::MalformedSource(format!("failed to read header row: {}", e)))?
        .clone();

    let fetched_at = Utc::now();
    let mut courses = Vec::new();

    for (i, result) in reader.records().enumerate() {
        let record = result
            .map_err(|e| AppError::MalformedSource(format!("failed to read row {}: {}", i + 1, e)))?;

        // Later duplicate headers overwrite earlier ones.
        let row: Row = headers.iter().zip(record.iter()).collect();

        match course_from_row(&row, i + 1, fetched_at) {
            Some(course) => courses.push(course),
            None => debug!("dropping sheet row {}: missing name, description or link", i + 1),
        }
    }

    Ok(courses)
}

fn course_from_row(row: &Row, position: usize, fetched_at: DateTime<Utc>) -> Option<Course> {
    let course_name = resolve(row, COURSE_NAME_ALIASES).filter(|v| !v.is_empty())?;
    let description = resolve(row, DESCRIPTION_ALIASES).filter(|v| !v.is_empty())?;
    let link = resolve(row, LINK_ALIASES).filter(|v| !v.is_empty())?;
    let datetime = resolve(row, DATETIME_ALIASES).filter(|v| !v.is_empty());

    Some(Course {
        id: position.to_string(),
        course_name: course_name.to_string(),
        description: description.to_string(),
        link: link.to_string(),
        datetime: datetime.map(str::to_string),
        last_updated: fetched_at,
    })
}

/// First alias whose cell is present and non-empty, trimmed.
fn resolve<'a>(row: &Row<'a>, aliases: &[&str]) -> Option<&'a str> {
    aliases
        .iter()
        .filter_map(|alias| row.get(alias).copied())
        .find(|value| !value.is_empty())
        .map(str::trim)
}
