//! Schema validation for movie payloads.
//!
//! Two entry points share one set of field rules:
//!
//! - [`validate_movie`] — every field required (except `rate`, which defaults).
//! - [`validate_partial_movie`] — every field optional; only supplied ones are checked.
//!
//! Both take arbitrary JSON and either produce a typed payload or the full list
//! of field-level errors. Unknown keys are ignored, which also means a client
//! can never smuggle in an `id`.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::movie::{Genre, Movie, MovieId};

pub const MIN_YEAR: i64 = 1900;
pub const MAX_YEAR: i64 = 2100;
pub const MIN_RATE: f64 = 0.0;
pub const MAX_RATE: f64 = 10.0;
pub const DEFAULT_RATE: f64 = 5.0;

/// One step in the location of an error inside the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Machine-readable kind of a field error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidType,
    Required,
    TooSmall,
    TooBig,
    InvalidUrl,
    InvalidEnumValue,
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub path: Vec<PathSegment>,
    pub code: ErrorCode,
    pub message: String,
}

impl FieldError {
    fn new(path: Vec<PathSegment>, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            path,
            code,
            message: message.into(),
        }
    }

    fn at(key: &str, code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(vec![key.into()], code, message)
    }

    /// Dotted rendering of the path, e.g. `genre.1`.
    pub fn location(&self) -> String {
        self.path
            .iter()
            .map(|segment| match segment {
                PathSegment::Key(key) => key.clone(),
                PathSegment::Index(index) => index.to_string(),
            })
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.location(), self.message)
        }
    }
}

/// Every field error found in one payload. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// True when some error is located under `key`.
    pub fn has_error_for(&self, key: &str) -> bool {
        self.0
            .iter()
            .any(|e| matches!(e.path.first(), Some(PathSegment::Key(k)) if k == key))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "invalid movie: {}", rendered.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// A fully validated payload for creating a movie.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub year: u16,
    pub director: String,
    pub duration: u32,
    pub rate: f64,
    pub poster: String,
    pub genre: Vec<Genre>,
}

impl NewMovie {
    /// Attach an identifier, producing the record to store.
    pub fn into_movie(self, id: MovieId) -> Movie {
        Movie {
            id,
            title: self.title,
            year: self.year,
            director: self.director,
            duration: self.duration,
            rate: self.rate,
            poster: self.poster,
            genre: self.genre,
        }
    }
}

/// A validated partial payload. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoviePatch {
    pub title: Option<String>,
    pub year: Option<u16>,
    pub director: Option<String>,
    pub duration: Option<u32>,
    pub rate: Option<f64>,
    pub poster: Option<String>,
    pub genre: Option<Vec<Genre>>,
}

impl MoviePatch {
    /// Shallow merge over `movie`. The identifier is never touched.
    pub fn apply(self, movie: &mut Movie) {
        if let Some(title) = self.title {
            movie.title = title;
        }
        if let Some(year) = self.year {
            movie.year = year;
        }
        if let Some(director) = self.director {
            movie.director = director;
        }
        if let Some(duration) = self.duration {
            movie.duration = duration;
        }
        if let Some(rate) = self.rate {
            movie.rate = rate;
        }
        if let Some(poster) = self.poster {
            movie.poster = poster;
        }
        if let Some(genre) = self.genre {
            movie.genre = genre;
        }
    }
}

/// Validate a complete movie payload.
pub fn validate_movie(input: &Value) -> Result<NewMovie, ValidationErrors> {
    let object = as_object(input)?;
    let mut fields = Fields::new(object, Mode::Full);

    let title = fields.field("title", check_title);
    let year = fields.field("year", check_year);
    let director = fields.field("director", check_director);
    let duration = fields.field("duration", check_duration);
    let rate = fields.optional_field("rate", check_rate).unwrap_or(DEFAULT_RATE);
    let poster = fields.field("poster", check_poster);
    let genre = fields.field("genre", check_genre);

    let errors = fields.into_errors();
    match (title, year, director, duration, rate, poster, genre) {
        (
            Some(title),
            Some(year),
            Some(director),
            Some(duration),
            rate,
            Some(poster),
            Some(genre),
        ) if errors.is_empty() => Ok(NewMovie {
            title,
            year,
            director,
            duration,
            rate,
            poster,
            genre,
        }),
        _ => Err(ValidationErrors(errors)),
    }
}

/// Validate a partial movie payload. Absent fields are not checked.
pub fn validate_partial_movie(input: &Value) -> Result<MoviePatch, ValidationErrors> {
    let object = as_object(input)?;
    let mut fields = Fields::new(object, Mode::Partial);

    let patch = MoviePatch {
        title: fields.field("title", check_title),
        year: fields.field("year", check_year),
        director: fields.field("director", check_director),
        duration: fields.field("duration", check_duration),
        rate: fields.field("rate", check_rate),
        poster: fields.field("poster", check_poster),
        genre: fields.field("genre", check_genre),
    };

    let errors = fields.into_errors();
    if errors.is_empty() {
        Ok(patch)
    } else {
        Err(ValidationErrors(errors))
    }
}

// =============================================================================
// Field walking
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Full,
    Partial,
}

type Check<T> = fn(&'static str, &Value) -> Result<T, Vec<FieldError>>;

/// Collects errors while pulling typed fields out of a JSON object.
struct Fields<'a> {
    object: &'a Map<String, Value>,
    mode: Mode,
    errors: Vec<FieldError>,
}

impl<'a> Fields<'a> {
    fn new(object: &'a Map<String, Value>, mode: Mode) -> Self {
        Self {
            object,
            mode,
            errors: Vec::new(),
        }
    }

    /// Pull a field that is required in full mode.
    fn field<T>(&mut self, key: &'static str, check: Check<T>) -> Option<T> {
        if self.mode == Mode::Full && !self.object.contains_key(key) {
            self.errors
                .push(FieldError::at(key, ErrorCode::Required, required_message(key)));
            return None;
        }
        self.optional_field(key, check)
    }

    /// Pull a field that may be absent in either mode.
    fn optional_field<T>(&mut self, key: &'static str, check: Check<T>) -> Option<T> {
        let value = self.object.get(key)?;
        match check(key, value) {
            Ok(parsed) => Some(parsed),
            Err(errors) => {
                self.errors.extend(errors);
                None
            }
        }
    }

    fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}

fn as_object(input: &Value) -> Result<&Map<String, Value>, ValidationErrors> {
    input.as_object().ok_or_else(|| {
        ValidationErrors(vec![FieldError::new(
            Vec::new(),
            ErrorCode::InvalidType,
            format!("Expected object, received {}", type_name(input)),
        )])
    })
}

fn required_message(key: &str) -> &'static str {
    match key {
        "title" => "Movie title is required.",
        "genre" => "Movie genre is required.",
        _ => "Required",
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn invalid_type(key: &str, expected: &str, value: &Value) -> Vec<FieldError> {
    vec![FieldError::at(
        key,
        ErrorCode::InvalidType,
        format!("Expected {}, received {}", expected, type_name(value)),
    )]
}

// =============================================================================
// Field rules
// =============================================================================

fn check_string(key: &'static str, value: &Value) -> Result<String, Vec<FieldError>> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid_type(key, "string", value))
}

fn check_title(key: &'static str, value: &Value) -> Result<String, Vec<FieldError>> {
    value.as_str().map(str::to_string).ok_or_else(|| {
        vec![FieldError::at(key, ErrorCode::InvalidType, "Movie title must be a string")]
    })
}

fn check_director(key: &'static str, value: &Value) -> Result<String, Vec<FieldError>> {
    check_string(key, value)
}

fn check_number(key: &'static str, value: &Value) -> Result<f64, Vec<FieldError>> {
    value
        .as_f64()
        .filter(|n| n.is_finite())
        .ok_or_else(|| invalid_type(key, "number", value))
}

/// Accepts whole numbers, including ones written with a fractional part of zero.
fn check_integer(key: &'static str, value: &Value) -> Result<i64, Vec<FieldError>> {
    let number = value.as_number().ok_or_else(|| invalid_type(key, "number", value))?;
    if let Some(n) = number.as_i64() {
        return Ok(n);
    }
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
        _ => Err(vec![FieldError::at(
            key,
            ErrorCode::InvalidType,
            "Expected integer, received float",
        )]),
    }
}

fn check_year(key: &'static str, value: &Value) -> Result<u16, Vec<FieldError>> {
    let year = check_integer(key, value)?;
    if year < MIN_YEAR {
        return Err(vec![FieldError::at(
            key,
            ErrorCode::TooSmall,
            format!("Number must be greater than or equal to {}", MIN_YEAR),
        )]);
    }
    if year > MAX_YEAR {
        return Err(vec![FieldError::at(
            key,
            ErrorCode::TooBig,
            format!("Number must be less than or equal to {}", MAX_YEAR),
        )]);
    }
    // Bounds above keep this in range.
    Ok(year as u16)
}

fn check_duration(key: &'static str, value: &Value) -> Result<u32, Vec<FieldError>> {
    let duration = check_integer(key, value)?;
    if duration <= 0 {
        return Err(vec![FieldError::at(
            key,
            ErrorCode::TooSmall,
            "Number must be greater than 0",
        )]);
    }
    u32::try_from(duration).map_err(|_| {
        vec![FieldError::at(
            key,
            ErrorCode::TooBig,
            format!("Number must be less than or equal to {}", u32::MAX),
        )]
    })
}

fn check_rate(key: &'static str, value: &Value) -> Result<f64, Vec<FieldError>> {
    let rate = check_number(key, value)?;
    if rate < MIN_RATE {
        return Err(vec![FieldError::at(
            key,
            ErrorCode::TooSmall,
            format!("Number must be greater than or equal to {}", MIN_RATE),
        )]);
    }
    if rate > MAX_RATE {
        return Err(vec![FieldError::at(
            key,
            ErrorCode::TooBig,
            format!("Number must be less than or equal to {}", MAX_RATE),
        )]);
    }
    Ok(rate)
}

fn check_poster(key: &'static str, value: &Value) -> Result<String, Vec<FieldError>> {
    let poster = check_string(key, value)?;
    match url::Url::parse(&poster) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(poster),
        _ => Err(vec![FieldError::at(
            key,
            ErrorCode::InvalidUrl,
            "Poster must be a valid URL",
        )]),
    }
}

fn check_genre(key: &'static str, value: &Value) -> Result<Vec<Genre>, Vec<FieldError>> {
    let items = value.as_array().ok_or_else(|| {
        vec![FieldError::at(
            key,
            ErrorCode::InvalidType,
            "Movie genre must be an array of enum Genre",
        )]
    })?;

    if items.is_empty() {
        return Err(vec![FieldError::at(
            key,
            ErrorCode::TooSmall,
            "Array must contain at least 1 element(s)",
        )]);
    }

    let mut genres = Vec::with_capacity(items.len());
    let mut errors = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let path = vec![key.into(), index.into()];
        match item.as_str() {
            Some(name) => match Genre::parse(name) {
                Some(genre) => {
                    if !genres.contains(&genre) {
                        genres.push(genre);
                    }
                }
                None => errors.push(FieldError::new(
                    path,
                    ErrorCode::InvalidEnumValue,
                    format!(
                        "Invalid enum value. Expected {}, received '{}'",
                        expected_genres(),
                        name
                    ),
                )),
            },
            None => errors.push(FieldError::new(
                path,
                ErrorCode::InvalidType,
                format!("Expected string, received {}", type_name(item)),
            )),
        }
    }

    if errors.is_empty() {
        Ok(genres)
    } else {
        Err(errors)
    }
}

fn expected_genres() -> String {
    Genre::ALL
        .iter()
        .map(|g| format!("'{}'", g))
        .collect::<Vec<_>>()
        .join(" | ")
}
