use std::fs;

use log::warn;
use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{digit1, line_ending, not_line_ending, space0, space1, multispace0};
use nom::combinator::{map_res, opt, recognize};
use nom::multi::many0;
use nom::sequence::tuple;

use crate::builder::build_manual_graph_with;
use crate::color::Palette;
use crate::error::SimError;
use crate::graph::{Graph, NodeId};

/// largest number of vertices accepted in a DIMACS header
pub const MAX_VERTICES:usize = 1 << 24;

/**
reads a graph in the DIMACS format (`p edge n m` header, `e u v` lines, `c` comments).
Vertices are numbered from 1 in the file; node ids are numbered from 0.
Duplicate edges and self-loops are skipped like in the manual builder.
*/
pub fn read_graph(filename:&str, palette:Palette) -> Result<Graph, SimError> {
    let content = fs::read_to_string(filename)
        .map_err(|source| SimError::Io { path: filename.to_string(), source })?;
    parse_graph(&content, palette)
}

/** builds a graph from the content of a DIMACS file */
pub fn parse_graph(content:&str, palette:Palette) -> Result<Graph, SimError> {
    let (n, edges) = parse_instance(content)?;
    let ids:Vec<NodeId> = (0..n).collect();
    Ok(build_manual_graph_with(&ids, &edges, palette))
}

/** parses a DIMACS instance, returns (n, edges) with 0-based vertices */
pub fn parse_instance(content:&str) -> Result<(usize, Vec<(NodeId, NodeId)>), SimError> {
    let s1 = content.replace("\r", "");
    let (s2, _) = skip_comments(s1.as_str())
        .map_err(|e| SimError::Parse(format!("comments: {:?}", e)))?;
    let (mut s3, (n, m)) = read_header(s2)
        .map_err(|e| SimError::Parse(format!("header: {:?}", e)))?;
    if n > MAX_VERTICES {
        return Err(SimError::Parse(format!("header: {} vertices (at most {})", n, MAX_VERTICES)));
    }
    // the edge count of the header is only used to warn
    let mut edges = Vec::new();
    loop {
        let (tmp, _) = skip_comments(s3)
            .map_err(|e| SimError::Parse(format!("comments: {:?}", e)))?;
        match read_edge(tmp) {
            Ok((remaining, (a, b))) => {
                if a == 0 || b == 0 || a > n || b > n {
                    return Err(SimError::Parse(format!("edge ({},{}): vertices must be in 1..{}", a, b, n)));
                }
                edges.push((a-1, b-1));
                s3 = remaining;
            },
            Err(_) => { s3 = tmp; break; },
        }
    }
    if !s3.trim().is_empty() {
        let line = s3.lines().next().unwrap_or_default();
        return Err(SimError::Parse(format!("unexpected line \"{}\"", line)));
    }
    if edges.len() != m && 2*edges.len() != m {
        warn!("DIMACS header announces {} edges, {} read", m, edges.len());
    }
    Ok((n, edges))
}

/// skips a single comment line (and the blank lines after it)
fn skip_comment(s:&str) -> IResult<&str, &str> {
    let (s, comment) = recognize(tuple((tag("c"), not_line_ending, opt(line_ending))))(s)?;
    let (s, _) = multispace0(s)?;
    Ok((s, comment))
}

/// skips all comments (and blank lines)
pub fn skip_comments(s:&str) -> IResult<&str, Vec<&str>> {
    let (s, _) = multispace0(s)?;
    many0(skip_comment)(s)
}

/// reads a number
fn read_integer(s:&str) -> IResult<&str, usize> {
    map_res(digit1, |e:&str| e.parse::<usize>())(s)
}

/// reads two numbers separated by spaces, and the end of the line
fn read_two_integers(s:&str) -> IResult<&str, (usize,usize)> {
    let (s, n1) = read_integer(s)?;
    let (s, _) = space1(s)?;
    let (s, n2) = read_integer(s)?;
    let (s, _) = space0(s)?;
    let (s, _) = opt(line_ending)(s)?;
    Ok((s, (n1, n2)))
}

/// reads header containing (n,m)
pub fn read_header(s:&str) -> IResult<&str, (usize,usize)> {
    let (s, _) = alt((tag("p edge "), tag("p col ")))(s)?;
    read_two_integers(s)
}

/// reads edge line (WARNING: indices start at 1 in the DIMACS format)
pub fn read_edge(s:&str) -> IResult<&str, (usize,usize)> {
    let (s, _) = tag("e ")(s)?;
    read_two_integers(s)
}
