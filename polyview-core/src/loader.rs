//! Parser for the comma-separated object description
//!
//! ```text
//! num_vertices,num_faces
//! vertex_id,x,y,z        (num_vertices lines)
//! id,id,id[,id...]       (num_faces lines)
//! ```
use nom::{
    bytes::complete::take_till,
    character::complete::{char, i64 as integer, space0, u64 as unsigned},
    combinator::all_consuming,
    multi::separated_list1,
    number::complete::double,
    sequence::delimited,
    IResult,
};
use std::fs;
use std::path::Path;

use crate::error::{LoadError, Result};
use crate::geometry::{Face, Mesh, Vertex, VertexId};

/// Upper bound on capacity reserved from header counts before any line is validated
const MAX_PRESIZE: usize = 1 << 16;

/// Read and parse an object description file
pub fn load_mesh(path: impl AsRef<Path>, scale: f64) -> Result<Mesh> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mesh = parse_mesh(&text, scale)?;
    log::info!(
        "Loaded {}: {} vertices, {} faces",
        path.display(),
        mesh.vertices().len(),
        mesh.faces().len()
    );
    Ok(mesh)
}

/// Parse an object description, multiplying every coordinate by `scale`
pub fn parse_mesh(input: &str, scale: f64) -> Result<Mesh> {
    let mut lines = Lines::new(input);

    let (line, text) = lines.next_line("header `num_vertices,num_faces`")?;
    let header = split_fields(text);
    if header.len() != 2 {
        return Err(LoadError::FieldCount {
            line,
            kind: "header",
            expected: 2,
            found: header.len(),
        });
    }
    let num_vertices = parse_count(line, 1, header[0])?;
    let num_faces = parse_count(line, 2, header[1])?;

    let mut mesh = Mesh::with_capacity(num_vertices.min(MAX_PRESIZE), num_faces.min(MAX_PRESIZE));

    for _ in 0..num_vertices {
        let (line, text) = lines.next_line("vertex line `id,x,y,z`")?;
        let vertex = parse_vertex(line, text, scale)?;
        if mesh.add_vertex(vertex).is_none() {
            return Err(LoadError::DuplicateVertex { line, id: vertex.id });
        }
    }

    for _ in 0..num_faces {
        let (line, text) = lines.next_line("face line of vertex ids")?;
        let face = parse_face(line, text, &mesh)?;
        mesh.add_face(face);
    }

    let trailing = lines.remaining_non_blank();
    if trailing > 0 {
        log::debug!("Ignoring {} trailing lines after the last face", trailing);
    }

    Ok(mesh)
}

fn parse_vertex(line: usize, text: &str, scale: f64) -> Result<Vertex> {
    let fields = split_fields(text);
    if fields.len() != 4 {
        return Err(LoadError::FieldCount {
            line,
            kind: "vertex",
            expected: 4,
            found: fields.len(),
        });
    }

    let id = parse_id(line, 1, fields[0])?;
    let x = parse_coordinate(line, 2, fields[1])?;
    let y = parse_coordinate(line, 3, fields[2])?;
    let z = parse_coordinate(line, 4, fields[3])?;

    Ok(Vertex::new(id, x * scale, y * scale, z * scale))
}

fn parse_face(line: usize, text: &str, mesh: &Mesh) -> Result<Face> {
    let fields = split_fields(text);
    let found = if text.is_empty() { 0 } else { fields.len() };
    if found < 3 {
        return Err(LoadError::FaceTooSmall { line, found });
    }

    let mut indices = Vec::with_capacity(fields.len());
    for (i, id_text) in fields.iter().enumerate() {
        let id = parse_id(line, i + 1, id_text)?;
        let index = mesh
            .index_of(id)
            .ok_or(LoadError::UnknownVertex { line, id })?;
        indices.push(index);
    }

    Ok(Face::new(indices))
}

fn split_fields(text: &str) -> Vec<&str> {
    match field_list(text) {
        Ok((_, fields)) => fields,
        Err(_) => vec![text],
    }
}

fn field_list(input: &str) -> IResult<&str, Vec<&str>> {
    all_consuming(separated_list1(char(','), take_till(|c: char| c == ',')))(input)
}

/// Run `parser` over a whole field, allowing surrounding blanks
fn field<'a, O, P>(parser: P, text: &'a str) -> Option<O>
where
    P: FnMut(&'a str) -> IResult<&'a str, O>,
{
    all_consuming(delimited(space0, parser, space0))(text)
        .ok()
        .map(|(_, value)| value)
}

fn invalid(line: usize, field: usize, kind: &'static str, text: &str) -> LoadError {
    LoadError::InvalidNumber {
        line,
        field,
        kind,
        text: text.to_string(),
    }
}

fn parse_count(line: usize, index: usize, text: &str) -> Result<usize> {
    field(unsigned, text)
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| invalid(line, index, "count", text))
}

fn parse_id(line: usize, index: usize, text: &str) -> Result<VertexId> {
    field(integer, text).ok_or_else(|| invalid(line, index, "integer", text))
}

fn parse_coordinate(line: usize, index: usize, text: &str) -> Result<f64> {
    field(double, text).ok_or_else(|| invalid(line, index, "coordinate", text))
}

/// Numbered, trimmed line reader
struct Lines<'a> {
    inner: std::iter::Enumerate<std::str::Lines<'a>>,
    consumed: usize,
}

impl<'a> Lines<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            inner: input.lines().enumerate(),
            consumed: 0,
        }
    }

    fn next_line(&mut self, expected: &'static str) -> Result<(usize, &'a str)> {
        match self.inner.next() {
            Some((i, text)) => {
                self.consumed = i + 1;
                Ok((i + 1, text.trim()))
            }
            None => Err(LoadError::UnexpectedEof {
                line: self.consumed + 1,
                expected,
            }),
        }
    }

    fn remaining_non_blank(self) -> usize {
        self.inner.filter(|(_, text)| !text.trim().is_empty()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PYRAMID: &str = "\
5,5
1,-1,-1,0
2,1,-1,0
3,1,1,0
4,-1,1,0
5,0,0,1.5
1,2,3,4
1,2,5
2,3,5
3,4,5
4,1,5
";

    #[test]
    fn test_parse_counts_match_header() {
        let mesh = parse_mesh(PYRAMID, 100.0).unwrap();
        assert_eq!(mesh.vertices().len(), 5);
        assert_eq!(mesh.faces().len(), 5);
        assert_eq!(mesh.faces()[0].len(), 4);
    }

    #[test]
    fn test_face_ids_resolve_to_vertices() {
        let mesh = parse_mesh(PYRAMID, 100.0).unwrap();
        for face in mesh.faces() {
            for id in mesh.face_ids(face) {
                assert!(mesh.index_of(id).is_some());
            }
        }
        let ids: Vec<_> = mesh.face_ids(&mesh.faces()[4]).collect();
        assert_eq!(ids, vec![4, 1, 5]);
    }

    #[test]
    fn test_coordinates_scaled() {
        let mesh = parse_mesh(PYRAMID, 100.0).unwrap();
        let apex = mesh.vertices()[mesh.index_of(5).unwrap()].position;
        assert!((apex.z - 150.0).abs() < 1e-9);
        let corner = mesh.vertices()[0].position;
        assert!((corner.x + 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_blank_padding_and_trailing_lines() {
        let input = "3, 1\r\n 10 , 0.5, 0 ,0\n11,0,1,0\n12,0,0,1\n10, 11 ,12\n\nextra\n";
        let mesh = parse_mesh(input, 2.0).unwrap();
        assert_eq!(mesh.vertices().len(), 3);
        assert!((mesh.vertices()[0].position.x - 1.0).abs() < 1e-12);
        assert_eq!(mesh.faces()[0].indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = parse_mesh("0,0\n", 100.0).unwrap();
        assert!(mesh.vertices().is_empty());
        assert!(mesh.faces().is_empty());
    }

    #[test]
    fn test_malformed_header() {
        assert!(matches!(
            parse_mesh("4\n", 100.0),
            Err(LoadError::FieldCount { line: 1, kind: "header", expected: 2, found: 1 })
        ));
        assert!(matches!(
            parse_mesh("4,x\n", 100.0),
            Err(LoadError::InvalidNumber { line: 1, field: 2, .. })
        ));
        assert!(matches!(
            parse_mesh("-1,0\n", 100.0),
            Err(LoadError::InvalidNumber { line: 1, field: 1, .. })
        ));
        assert!(matches!(parse_mesh("", 100.0), Err(LoadError::UnexpectedEof { line: 1, .. })));
    }

    #[test]
    fn test_vertex_field_count() {
        let err = parse_mesh("1,0\n1,0,0\n", 100.0).unwrap_err();
        assert!(matches!(
            err,
            LoadError::FieldCount { line: 2, kind: "vertex", expected: 4, found: 3 }
        ));
    }

    #[test]
    fn test_non_numeric_fields() {
        let err = parse_mesh("1,0\n1,0,abc,0\n", 100.0).unwrap_err();
        match err {
            LoadError::InvalidNumber { line, field, kind, text } => {
                assert_eq!((line, field, kind), (2, 3, "coordinate"));
                assert_eq!(text, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = parse_mesh("1,0\n1.5,0,0,0\n", 100.0).unwrap_err();
        assert!(matches!(err, LoadError::InvalidNumber { line: 2, field: 1, kind: "integer", .. }));
    }

    #[test]
    fn test_duplicate_vertex() {
        let err = parse_mesh("2,0\n1,0,0,0\n1,1,1,1\n", 100.0).unwrap_err();
        assert!(matches!(err, LoadError::DuplicateVertex { line: 3, id: 1 }));
    }

    #[test]
    fn test_unknown_vertex_reference() {
        let err = parse_mesh("3,1\n1,0,0,0\n2,1,0,0\n3,0,1,0\n1,2,9\n", 100.0).unwrap_err();
        assert!(matches!(err, LoadError::UnknownVertex { line: 5, id: 9 }));
    }

    #[test]
    fn test_face_too_small() {
        let err = parse_mesh("2,1\n1,0,0,0\n2,1,0,0\n1,2\n", 100.0).unwrap_err();
        assert!(matches!(err, LoadError::FaceTooSmall { line: 4, found: 2 }));

        let err = parse_mesh("2,1\n1,0,0,0\n2,1,0,0\n\n", 100.0).unwrap_err();
        assert!(matches!(err, LoadError::FaceTooSmall { line: 4, found: 0 }));
    }

    #[test]
    fn test_truncated_input() {
        let err = parse_mesh("3,1\n1,0,0,0\n2,1,0,0\n", 100.0).unwrap_err();
        assert!(matches!(err, LoadError::UnexpectedEof { line: 4, .. }));

        let err = parse_mesh("3,1\n1,0,0,0\n2,1,0,0\n3,0,1,0\n", 100.0).unwrap_err();
        assert!(matches!(err, LoadError::UnexpectedEof { line: 5, .. }));
    }

    #[test]
    fn test_error_message_names_line() {
        let err = parse_mesh("1,0\n1,0,0\n", 100.0).unwrap_err();
        assert_eq!(err.to_string(), "line 2: vertex line has 3 fields, expected 4");
    }

    #[test]
    fn test_bundled_cube() {
        let mesh = parse_mesh(include_str!("../../assets/cube.txt"), 100.0).unwrap();
        assert_eq!(mesh.vertices().len(), 8);
        assert_eq!(mesh.faces().len(), 6);
        assert!(mesh.faces().iter().all(|face| face.len() == 4));
    }

    #[test]
    fn test_missing_file() {
        let err = load_mesh("/nonexistent/polyview/object.txt", 100.0).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
