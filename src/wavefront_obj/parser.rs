//! Line parser for triangle-only .obj files.

use super::{Error, ParseOutcome, RecordError, RecordKind, Result};
use crate::{config::LoaderConfig, model::Model};

use std::{
    convert::TryFrom,
    fs::File,
    io::{prelude::*, BufReader},
    path::Path,
};

use log::{debug, trace};
use ultraviolet::Vec3;

type RecordResult<T> = std::result::Result<T, RecordError>;

/// Represents the abstract data of a line in OBJ file.
#[derive(Debug, Clone, PartialEq)]
enum ObjCommand {
    /// `#`
    Comment,

    /// `v`
    Vertex(Vec3),

    /// `vt`, recognized but dropped
    VertexUv,

    /// `vn`
    VertexNormal(Vec3),

    /// `f`, already converted to 0-based position indices
    Face([u32; 3]),

    /// Blank lines and any other keyword
    Ignored(Box<str>),
}

/// Accumulators of the load in progress.
#[derive(Debug, Default)]
struct ModelBuffer {
    positions: Vec<f32>,
    normals: Vec<f32>,
    face_indices: Vec<u32>,

    /// Line number of each face, kept only for bounds checking.
    face_lines: Vec<usize>,
}

impl ModelBuffer {
    fn clear(&mut self) {
        self.positions.clear();
        self.normals.clear();
        self.face_indices.clear();
        self.face_lines.clear();
    }

    fn to_model(&self) -> Model {
        Model::new(
            self.positions.clone(),
            self.normals.clone(),
            self.face_indices.clone(),
        )
    }

    /// Finds the first face referencing a position that was never defined.
    /// The reported content is rebuilt from the position indices only.
    fn check_index_bounds(&self) -> Result<()> {
        let count = self.positions.len() / 3;
        let faces = self.face_indices.chunks(3).zip(self.face_lines.iter());
        for (face, &line) in faces {
            if let Some(&index) = face.iter().find(|&&i| i as usize >= count) {
                let one_based = |i: u32| u64::from(i) + 1;
                let content = format!(
                    "f {} {} {}",
                    one_based(face[0]),
                    one_based(face[1]),
                    one_based(face[2])
                );
                return Err(Error::Parse {
                    line,
                    record: RecordKind::Face,
                    content: content.into(),
                    cause: RecordError::IndexOutOfRange {
                        index: index as usize,
                        count,
                    },
                });
            }
        }
        Ok(())
    }
}

/// Loads positions, normals and triangle indices from OBJ text.
///
/// Each load starts from scratch; results of a previous load are discarded.
/// On failure the accessors are left empty and the error is kept until the
/// next load or `reset`.
#[derive(Debug, Default)]
pub struct ObjLoader {
    config: LoaderConfig,
    buffer: ModelBuffer,
    last_error: Option<Error>,
}

impl ObjLoader {
    /// Creates a loader with the default (permissive) configuration.
    pub fn new() -> ObjLoader {
        ObjLoader {
            ..Default::default()
        }
    }

    /// Creates a loader with given configuration.
    pub fn with_config(config: LoaderConfig) -> ObjLoader {
        ObjLoader {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Parses lines in order. Line numbers in errors are 1-based.
    pub fn parse<I>(&mut self, lines: I) -> ParseOutcome
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.reset();
        for (index, line) in lines.into_iter().enumerate() {
            if let Err(err) = self.process_line(index + 1, line.as_ref()) {
                return self.fail(err);
            }
        }
        self.finish()
    }

    /// Parses the OBJ text read from `reader`.
    /// The reader will be wrapped with `BufReader`, so you don't have to
    /// do so. A trailing `\r` of each line is removed.
    pub fn load_reader(&mut self, reader: impl Read) -> ParseOutcome {
        self.reset();
        let mut reader = BufReader::new(reader);

        let mut line_buffer = String::with_capacity(1024);
        let mut line_number = 0;
        loop {
            line_buffer.clear();
            line_number += 1;
            match reader.read_line(&mut line_buffer) {
                Ok(0) => break,
                Ok(_) => (),
                Err(e) => {
                    return self.fail(Error::Read {
                        line: line_number,
                        reason: e.to_string(),
                    })
                }
            }

            let line = line_buffer.trim_end_matches(&['\n', '\r'][..]);
            if let Err(err) = self.process_line(line_number, line) {
                return self.fail(err);
            }
        }
        self.finish()
    }

    /// Opens and parses the OBJ file at `path`.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> ParseOutcome {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                self.reset();
                return self.fail(Error::Open {
                    path: path.to_owned(),
                    reason: e.to_string(),
                });
            }
        };

        debug!("Loading {}", path.display());
        self.load_reader(file)
    }

    /// Clears the model data and the last error.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.last_error = None;
    }

    /// Returns a copy of the flattened positions.
    pub fn positions(&self) -> Vec<f32> {
        self.buffer.positions.clone()
    }

    /// Returns a copy of the flattened normals.
    pub fn normals(&self) -> Vec<f32> {
        self.buffer.normals.clone()
    }

    /// Returns a copy of the 0-based face indices, three per triangle.
    pub fn face_indices(&self) -> Vec<u32> {
        self.buffer.face_indices.clone()
    }

    /// Returns a snapshot of everything loaded so far.
    pub fn model(&self) -> Model {
        self.buffer.to_model()
    }

    /// Returns the error of the last load, if it failed.
    pub fn error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    pub fn has_error(&self) -> bool {
        self.last_error.is_some()
    }

    /// Returns the diagnostic of the last load, or `"no error"`.
    pub fn error_message(&self) -> String {
        match &self.last_error {
            Some(error) => error.to_string(),
            None => "no error".to_owned(),
        }
    }

    fn process_line(&mut self, line_number: usize, line: &str) -> Result<()> {
        let mut elements = line.split_whitespace();
        let keyword = elements.next().unwrap_or("");
        let data: Vec<&str> = elements.collect();

        let command =
            parse_obj_line(keyword, &data, &self.config).map_err(|(record, cause)| {
                Error::Parse {
                    line: line_number,
                    record,
                    content: line.into(),
                    cause,
                }
            })?;

        match command {
            ObjCommand::Comment | ObjCommand::VertexUv => (),
            ObjCommand::Vertex(v) => self.buffer.positions.extend_from_slice(&[v.x, v.y, v.z]),
            ObjCommand::VertexNormal(n) => {
                self.buffer.normals.extend_from_slice(&[n.x, n.y, n.z])
            }
            ObjCommand::Face(indices) => {
                self.buffer.face_indices.extend_from_slice(&indices);
                if self.config.check_index_bounds {
                    self.buffer.face_lines.push(line_number);
                }
            }
            ObjCommand::Ignored(keyword) => {
                if !keyword.is_empty() {
                    trace!("Ignoring OBJ keyword on line {}: {}", line_number, keyword);
                }
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> ParseOutcome {
        if self.config.check_index_bounds {
            if let Err(err) = self.buffer.check_index_bounds() {
                return self.fail(err);
            }
        }

        debug!(
            "Loaded {} vertices, {} normals, {} triangles",
            self.buffer.positions.len() / 3,
            self.buffer.normals.len() / 3,
            self.buffer.face_indices.len() / 3
        );
        Ok(self.buffer.to_model())
    }

    fn fail(&mut self, error: Error) -> ParseOutcome {
        debug!("Load failed: {}", error);
        self.buffer.clear();
        self.last_error = Some(error.clone());
        Err(error)
    }
}

/// Parses a line of OBJ file.
fn parse_obj_line(
    keyword: &str,
    data: &[&str],
    config: &LoaderConfig,
) -> std::result::Result<ObjCommand, (RecordKind, RecordError)> {
    let value = match keyword {
        "#" => ObjCommand::Comment,
        "v" => {
            let value = take_vec3(data, config.strict_arity)
                .map_err(|e| (RecordKind::Position, e))?;
            ObjCommand::Vertex(value)
        }
        "vt" => ObjCommand::VertexUv,
        "vn" => {
            let value =
                take_vec3(data, config.strict_arity).map_err(|e| (RecordKind::Normal, e))?;
            ObjCommand::VertexNormal(value)
        }
        "f" => {
            let face = parse_face(data, config).map_err(|e| (RecordKind::Face, e))?;
            ObjCommand::Face(face)
        }
        _ => ObjCommand::Ignored(keyword.into()),
    };

    Ok(value)
}

/// Parses a `f` command into three 0-based position indices.
fn parse_face(
    vertices: impl IntoIterator<Item = impl AsRef<str>>,
    config: &LoaderConfig,
) -> RecordResult<[u32; 3]> {
    let mut vertices = vertices.into_iter();
    let mut indices = [0; 3];
    for (found, index) in indices.iter_mut().enumerate() {
        let vertex = vertices
            .next()
            .ok_or(RecordError::NotEnoughData { found, expected: 3 })?;
        *index = parse_index_group(vertex.as_ref(), config.strict_index_groups)?;
    }

    let extra = vertices.count();
    if config.strict_arity && extra > 0 {
        return Err(RecordError::TooManyValues {
            found: 3 + extra,
            expected: 3,
        });
    }

    Ok(indices)
}

/// Parses `position[/texcoord[/normal]]` and returns the 0-based position index.
/// Texcoord and normal references are checked only when `strict` is set.
fn parse_index_group(group: &str, strict: bool) -> RecordResult<u32> {
    let mut fields = group.split('/');
    let position = match fields.next() {
        Some(s) if !s.is_empty() => parse_index(s)?,
        _ => return Err(RecordError::InvalidFaceVertex),
    };

    if strict {
        for field in fields.by_ref().take(2).filter(|s| !s.is_empty()) {
            parse_index(field)?;
        }
        if fields.next().is_some() {
            return Err(RecordError::InvalidFaceVertex);
        }
    }

    Ok(position)
}

/// Converts a 1-based OBJ index into a 0-based one.
/// Relative (negative) and zero indices are rejected.
fn parse_index(s: &str) -> RecordResult<u32> {
    let value: i64 = s
        .parse()
        .map_err(|_| RecordError::InvalidNumber(s.into()))?;
    if value < 1 {
        return Err(RecordError::InvalidIndex(s.into()));
    }
    u32::try_from(value - 1).map_err(|_| RecordError::InvalidIndex(s.into()))
}

/// Consumes the iterator and parses into `Vec3`.
fn take_vec3(it: impl IntoIterator<Item = impl AsRef<str>>, strict: bool) -> RecordResult<Vec3> {
    let mut it = it.into_iter();
    let first = it.next().ok_or(RecordError::NotEnoughData {
        found: 0,
        expected: 3,
    })?;
    let second = it.next().ok_or(RecordError::NotEnoughData {
        found: 1,
        expected: 3,
    })?;
    let third = it.next().ok_or(RecordError::NotEnoughData {
        found: 2,
        expected: 3,
    })?;

    let extra = it.count();
    if strict && extra > 0 {
        return Err(RecordError::TooManyValues {
            found: 3 + extra,
            expected: 3,
        });
    }

    Ok(Vec3::new(
        parse_float(first.as_ref())?,
        parse_float(second.as_ref())?,
        parse_float(third.as_ref())?,
    ))
}

fn parse_float(s: &str) -> RecordResult<f32> {
    s.parse().map_err(|_| RecordError::InvalidNumber(s.into()))
}
