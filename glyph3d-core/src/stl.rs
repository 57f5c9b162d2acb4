/// ASCII STL mesh loader
use std::error::Error;
use std::fmt;

use nalgebra::{Point3, Vector3};
use nom::{
    bytes::complete::tag,
    character::complete::{multispace0, multispace1, not_line_ending},
    multi::many0,
    number::complete::float,
    sequence::preceded,
    IResult,
};

use crate::geometry::{Mesh, Triangle};

/// Errors surfaced while loading a mesh from STL text.
#[derive(Debug, Clone, PartialEq)]
pub enum StlError {
    /// The input does not match the `solid`/`facet`/`endsolid` grammar.
    Malformed(String),
    /// A facet spans no area and therefore has no usable normal.
    DegenerateFacet { index: usize },
}

impl fmt::Display for StlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StlError::Malformed(detail) => write!(f, "malformed STL: {}", detail),
            StlError::DegenerateFacet { index } => {
                write!(f, "degenerate facet at index {}", index)
            }
        }
    }
}

impl Error for StlError {}

/// Parse an ASCII STL solid into a mesh.
///
/// Facet vertex order is normalized against the embedded facet normal so
/// the mesh satisfies the consistent-winding invariant the cull stage
/// depends on, even for files with mixed winding. Zero-area facets are
/// rejected rather than carried into the pipeline.
pub fn parse_ascii_stl(input: &str) -> Result<Mesh, StlError> {
    let facets = match parse_solid(input) {
        Ok((_, facets)) => facets,
        Err(e) => return Err(StlError::Malformed(format!("{:?}", e))),
    };

    let mut mesh = Mesh::with_capacity(facets.len());
    for (index, (stated_normal, mut triangle)) in facets.into_iter().enumerate() {
        let winding_normal = triangle
            .face_normal()
            .ok_or(StlError::DegenerateFacet { index })?;

        // Reorder corners whose winding contradicts the stated normal.
        if winding_normal.dot(&stated_normal) < 0.0 {
            triangle.points.swap(1, 2);
        }

        mesh.add_triangle(triangle);
    }

    Ok(mesh)
}

fn parse_solid(input: &str) -> IResult<&str, Vec<(Vector3<f32>, Triangle)>> {
    let (input, _) = preceded(multispace0, tag("solid"))(input)?;
    let (input, _) = not_line_ending(input)?; // optional solid name
    let (input, facets) = many0(parse_facet)(input)?;
    let (input, _) = preceded(multispace0, tag("endsolid"))(input)?;
    let (input, _) = not_line_ending(input)?;
    Ok((input, facets))
}

fn parse_facet(input: &str) -> IResult<&str, (Vector3<f32>, Triangle)> {
    let (input, _) = preceded(multispace0, tag("facet"))(input)?;
    let (input, _) = preceded(multispace1, tag("normal"))(input)?;
    let (input, (nx, ny, nz)) = parse_vector3(input)?;
    let (input, _) = preceded(multispace0, tag("outer"))(input)?;
    let (input, _) = preceded(multispace1, tag("loop"))(input)?;
    let (input, p1) = parse_vertex(input)?;
    let (input, p2) = parse_vertex(input)?;
    let (input, p3) = parse_vertex(input)?;
    let (input, _) = preceded(multispace0, tag("endloop"))(input)?;
    let (input, _) = preceded(multispace0, tag("endfacet"))(input)?;

    Ok((
        input,
        (Vector3::new(nx, ny, nz), Triangle::new(p1, p2, p3)),
    ))
}

fn parse_vertex(input: &str) -> IResult<&str, Point3<f32>> {
    let (input, _) = preceded(multispace0, tag("vertex"))(input)?;
    let (input, (x, y, z)) = parse_vector3(input)?;
    Ok((input, Point3::new(x, y, z)))
}

fn parse_vector3(input: &str) -> IResult<&str, (f32, f32, f32)> {
    let (input, _) = multispace0(input)?;
    let (input, x) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, y) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, z) = float(input)?;
    Ok((input, (x, y, z)))
}
