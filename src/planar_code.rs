//! Reading graphs in planar code.
//!
//! A planar code stream starts with the tag `>>planar_code`, optionally
//! followed by a variant such as ` le` or ` be`, and closed by `<<`. Each
//! record is a vertex count followed, for every vertex, by its neighbours in
//! clockwise order and a terminating zero. Records whose first byte is zero
//! use 2-byte elements throughout; all others use single bytes.

use std::collections::VecDeque;
use std::io::{BufReader, ErrorKind, Read};

use tracing::debug;

use crate::error::{PlanarCodeError, Result};
use crate::{MAX_DEGREE, MAX_VERTICES};

const HEADER: &[u8; 13] = b">>planar_code";

/// Width of the elements of one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementWidth {
    /// One byte per element.
    Short,
    /// Two bytes per element, in native byte order.
    Long,
}

/// One decoded record: the vertex count and, for each vertex, its 1-based
/// neighbour ids in the rotation order of the embedding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyRecord {
    pub vertex_count: usize,
    pub neighbours: Vec<Vec<usize>>,
    pub width: ElementWidth,
}

impl AdjacencyRecord {
    /// A record from 1-based neighbour lists.
    pub fn new(neighbours: Vec<Vec<usize>>) -> Self {
        Self {
            vertex_count: neighbours.len(),
            neighbours,
            width: ElementWidth::Short,
        }
    }
}

/// Stateful reader of a single planar code stream.
pub struct Decoder<R> {
    reader: BufReader<R>,
    /// Bytes read ahead while checking for an interior header.
    pending: VecDeque<u8>,
    header_consumed: bool,
    exhausted: bool,
    variant: Option<String>,
    records_read: usize,
}

impl<R: Read> Decoder<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            pending: VecDeque::with_capacity(2),
            header_consumed: false,
            exhausted: false,
            variant: None,
            records_read: 0,
        }
    }

    /// The variant tag written between `>>planar_code` and `<<`, if any.
    ///
    /// Only known once the first record has been requested.
    pub fn header_variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }

    /// Number of records returned so far.
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Read the next record, or `None` at a clean end of stream.
    pub fn next_record(&mut self) -> Result<Option<AdjacencyRecord>> {
        if self.exhausted {
            return Ok(None);
        }
        if !self.header_consumed {
            self.header_consumed = true;
            if !self.read_outer_header()? {
                self.exhausted = true;
                return Ok(None);
            }
        }

        loop {
            let Some(first) = self.read_byte()? else {
                self.exhausted = true;
                return Ok(None);
            };

            if first == b'>' {
                // Either an interior header or a vertex count of 62.
                let peek = [self.read_byte()?, self.read_byte()?];
                if peek == [Some(b'>'), Some(b'p')] {
                    self.skip_interior_header()?;
                    continue;
                }
                self.pending.extend(peek.into_iter().flatten());
            }

            let record = self.read_body(first)?;
            self.records_read += 1;
            return Ok(Some(record));
        }
    }

    /// Returns `false` when the stream ends before the header is closed.
    fn read_outer_header(&mut self) -> Result<bool> {
        let mut tag = [0u8; 13];
        match self.reader.read_exact(&mut tag) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                return Err(PlanarCodeError::HeaderTooShort);
            }
            Err(e) => return Err(e.into()),
        }
        if &tag != HEADER {
            return Err(PlanarCodeError::MissingHeader {
                found: String::from_utf8_lossy(&tag).into_owned(),
            });
        }

        let mut variant = Vec::new();
        loop {
            match self.read_byte()? {
                Some(b'<') => break,
                Some(c) => variant.push(c),
                None => return Ok(false),
            }
        }
        // the second '<' is not checked for the outer header
        if self.read_byte()?.is_none() {
            return Ok(false);
        }

        let variant = String::from_utf8_lossy(&variant).trim().to_string();
        debug!(variant = %variant, "planar code header consumed");
        self.variant = (!variant.is_empty()).then_some(variant);
        Ok(true)
    }

    /// Skip the remainder of `>>planar_code...<<` after `>>p` was read.
    fn skip_interior_header(&mut self) -> Result<()> {
        loop {
            match self.read_byte()? {
                Some(b'<') => break,
                Some(_) => {}
                None => return Err(PlanarCodeError::UnterminatedHeader),
            }
        }
        match self.read_byte()? {
            Some(b'<') => {
                debug!(record = self.records_read, "skipped interior header");
                Ok(())
            }
            Some(found) => Err(PlanarCodeError::SingleHeaderDelimiter { found }),
            None => Err(PlanarCodeError::UnterminatedHeader),
        }
    }

    fn read_body(&mut self, first: u8) -> Result<AdjacencyRecord> {
        let (width, vertex_count) = if first != 0 {
            (ElementWidth::Short, usize::from(first))
        } else {
            let count = self
                .read_element(ElementWidth::Long)?
                .ok_or(PlanarCodeError::UnexpectedEof { vertex: 0 })?;
            (ElementWidth::Long, count)
        };

        if vertex_count == 0 || vertex_count > MAX_VERTICES {
            return Err(PlanarCodeError::VertexCountOutOfRange {
                count: vertex_count,
                max: MAX_VERTICES,
            });
        }

        let mut neighbours = Vec::with_capacity(vertex_count);
        for vertex in 1..=vertex_count {
            let mut rotation = Vec::new();
            loop {
                let id = self
                    .read_element(width)?
                    .ok_or(PlanarCodeError::UnexpectedEof { vertex })?;
                if id == 0 {
                    break;
                }
                if rotation.len() == MAX_DEGREE {
                    return Err(PlanarCodeError::DegreeTooLarge {
                        vertex,
                        max: MAX_DEGREE,
                    });
                }
                if id > vertex_count {
                    return Err(PlanarCodeError::NeighbourOutOfRange {
                        vertex,
                        neighbour: id,
                        vertex_count,
                    });
                }
                rotation.push(id);
            }
            neighbours.push(rotation);
        }

        Ok(AdjacencyRecord {
            vertex_count,
            neighbours,
            width,
        })
    }

    fn read_element(&mut self, width: ElementWidth) -> Result<Option<usize>> {
        match width {
            ElementWidth::Short => Ok(self.read_byte()?.map(usize::from)),
            ElementWidth::Long => {
                let (Some(lo), Some(hi)) = (self.read_byte()?, self.read_byte()?) else {
                    return Ok(None);
                };
                Ok(Some(usize::from(u16::from_ne_bytes([lo, hi]))))
            }
        }
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        if let Some(b) = self.pending.pop_front() {
            return Ok(Some(b));
        }
        let mut buf = [0u8; 1];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}
